//! CLI command implementations.

pub mod synth;
pub mod tenants;
pub mod validate;

use crate::cli::output::StackRow;
use crate::services::synthesizer::SynthesizedStack;

pub(crate) fn stack_row(stack: &SynthesizedStack) -> StackRow {
    StackRow {
        kind: stack.kind.clone(),
        name: stack.name.clone(),
        account_id: stack.target.account_id.clone(),
        region: stack.target.region.clone(),
        resources: stack.template.resource_count(),
        outputs: stack.template.output_names().len(),
    }
}
