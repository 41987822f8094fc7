//! Stack definitions.
//!
//! A stack turns a resolved tenant configuration into a declarative resource
//! template. Stacks never perform I/O; emission is the synthesizer's job.

pub mod data_stack;
pub mod warehouse_stack;

pub use data_stack::DataStack;
pub use warehouse_stack::WarehouseStack;

use crate::domain::errors::{ConfigResult, SynthError, SynthResult};
use crate::domain::models::template::Template;
use crate::domain::models::tenant::TenantConfig;

/// A provisionable stack definition.
pub trait Stack {
    /// Short selector used on the command line (`--stack <kind>`).
    fn kind(&self) -> &'static str;

    /// The stack's full name for a given tenant/environment.
    fn name(&self, config: &TenantConfig) -> ConfigResult<String>;

    /// Build the stack's resource template from the tenant configuration.
    fn synthesize(&self, config: &TenantConfig) -> ConfigResult<Template>;
}

/// All stacks this tool knows how to synthesize, in synthesis order.
pub fn builtin_stacks() -> Vec<Box<dyn Stack>> {
    vec![Box::new(DataStack), Box::new(WarehouseStack)]
}

/// Select stacks by kind. An empty selection means every built-in stack.
pub fn select_stacks(kinds: &[String]) -> SynthResult<Vec<Box<dyn Stack>>> {
    let mut stacks = builtin_stacks();
    if kinds.is_empty() {
        return Ok(stacks);
    }

    let available = stacks
        .iter()
        .map(|stack| stack.kind())
        .collect::<Vec<_>>()
        .join(", ");

    let mut selected: Vec<Box<dyn Stack>> = Vec::with_capacity(kinds.len());
    for kind in kinds {
        if selected.iter().any(|stack| stack.kind() == kind) {
            continue;
        }
        match stacks.iter().position(|stack| stack.kind() == kind) {
            Some(index) => selected.push(stacks.remove(index)),
            None => {
                return Err(SynthError::UnknownStack {
                    name: kind.clone(),
                    available,
                })
            }
        }
    }
    Ok(selected)
}
