mod registry;

pub use registry::{SourceKind, SourceKindRegistry};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
