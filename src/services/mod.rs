//! Service layer: configuration resolution and stack synthesis.

pub mod resolver;
pub mod synthesizer;

pub use resolver::ConfigResolver;
pub use synthesizer::{build_stacks, SynthesizedStack, Synthesizer, TargetEnvironment};
