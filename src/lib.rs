pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod language;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod rules;
pub mod scanner;

pub use error::{Result, StyleGuardError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
pub const EXIT_TOOL_FAILURE: i32 = 3;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
