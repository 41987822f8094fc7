//! Output formatting utilities for the CLI.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;

/// Rendered result of a CLI command, in human or JSON form.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

/// Print a command result to stdout in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// One row of the synthesized-stack summary table.
#[derive(Debug, Clone, Serialize)]
pub struct StackRow {
    pub kind: String,
    pub name: String,
    pub account_id: String,
    pub region: String,
    pub resources: usize,
    pub outputs: usize,
}

/// Format synthesized stacks as a table.
pub fn format_stack_table(rows: &[StackRow]) -> String {
    let mut table = base_table();
    table.set_header(header_cells(&[
        "Stack", "Name", "Account", "Region", "Resources", "Outputs",
    ]));

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.kind),
            Cell::new(&row.name),
            Cell::new(&row.account_id),
            Cell::new(&row.region),
            Cell::new(row.resources),
            Cell::new(row.outputs),
        ]);
    }

    table.to_string()
}

/// Format tenant identifiers as a single-column table.
pub fn format_tenant_table(tenants: &[String]) -> String {
    let mut table = base_table();
    table.set_header(header_cells(&["Tenant"]));
    for tenant in tenants {
        table.add_row(vec![Cell::new(tenant)]);
    }
    table.to_string()
}

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cells(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| {
            if console::colors_enabled() {
                Cell::new(title).add_attribute(Attribute::Bold)
            } else {
                Cell::new(title)
            }
        })
        .collect()
}
