//! Identifier case checks shared by the naming rules.

use std::sync::LazyLock;

use regex::Regex;

static LOWER_CAMEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("Invalid regex"));

static PASCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("Invalid regex"));

static UPPER_SNAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(_[A-Z0-9]+)*$").expect("Invalid regex"));

/// `lowerCamelCase`: lowercase start, no underscores.
pub fn is_lower_camel(name: &str) -> bool {
    LOWER_CAMEL.is_match(name)
}

/// `PascalCase`: uppercase start, no underscores, not all capitals.
pub fn is_pascal(name: &str) -> bool {
    PASCAL.is_match(name) && (name.len() == 1 || name.chars().any(|c| c.is_ascii_lowercase()))
}

/// `UPPER_CASE_WITH_UNDERSCORES`.
pub fn is_upper_snake(name: &str) -> bool {
    UPPER_SNAKE.is_match(name)
}

/// Upper snake case with more than one character, the shape of a constant.
pub fn looks_like_constant(name: &str) -> bool {
    name.len() > 1 && is_upper_snake(name)
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
