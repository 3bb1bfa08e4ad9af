#![warn(clippy::pedantic)]
// Noisy doc/signature lints — would require annotating most pub functions
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
// Style preference — keeping format!("{}", x) over format!("{x}") for readability with complex exprs
#![allow(clippy::uninlined_format_args)]
// Intentional f64 math in human-readable size formatting
#![allow(clippy::cast_precision_loss)]
// Module structure — our tool modules have foo::FooTool pattern by design
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod errors;
pub mod sandbox;
pub mod tools;
pub mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
