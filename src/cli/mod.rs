mod commands;

pub use commands::{build_registry, run};
