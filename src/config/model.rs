use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

pub const DEFAULT_MAX_LINE_WIDTH: usize = 100;

/// Top-level configuration, as read from `.cpp-style-guard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Maximum line length in characters.
    #[serde(default = "default_max_line_width")]
    pub max_line_width: usize,

    /// When set, only these rules run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,

    /// Rules to turn off. Applied after `rules`.
    #[serde(default)]
    pub disable: Vec<String>,

    /// Rule id to severity.
    #[serde(default)]
    pub severity_overrides: IndexMap<String, Severity>,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub heuristics: HeuristicsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: Some(CONFIG_VERSION.to_string()),
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            rules: None,
            disable: Vec::new(),
            severity_overrides: IndexMap::new(),
            files: FilesConfig::default(),
            heuristics: HeuristicsConfig::default(),
        }
    }
}

/// Which files are checked and how they are classified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// Header extensions, without the dot.
    #[serde(default = "default_interface_extensions")]
    pub interface_extensions: Vec<String>,

    /// Source extensions, without the dot.
    #[serde(default = "default_implementation_extensions")]
    pub implementation_extensions: Vec<String>,

    /// Glob patterns of paths to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            interface_extensions: default_interface_extensions(),
            implementation_extensions: default_implementation_extensions(),
            exclude: Vec::new(),
        }
    }
}

/// Tunables for the conditions the style guide leaves open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HeuristicsConfig {
    /// Extra type names treated as plain data, on top of the built-in
    /// arithmetic and fixed-width integer types.
    #[serde(default)]
    pub pod_types: Vec<String>,

    /// Types meant to be passed by value (ownership sinks, cheap views).
    #[serde(default = "default_sink_types")]
    pub sink_types: Vec<String>,

    /// Headers that must never be included.
    #[serde(default = "default_umbrella_headers")]
    pub umbrella_headers: Vec<String>,

    /// Comment text that exempts a plain `enum` from `enum-class`.
    #[serde(default = "default_c_interop_marker")]
    pub c_interop_marker: String,

    /// Words a public alias comment must contain (case-insensitive).
    #[serde(default = "default_alias_permanence_keywords")]
    pub alias_permanence_keywords: Vec<String>,

    /// Accept a signature split right after its return type.
    #[serde(default = "default_true")]
    pub allow_return_type_split: bool,

    /// Words in an enum or enumerator name that mark it as low-level.
    #[serde(default = "default_low_level_enum_hints")]
    pub low_level_enum_hints: Vec<String>,

    /// Longest underscore-free macro name accepted. 0 disables the check.
    #[serde(default)]
    pub macro_max_word_length: usize,

    /// Header name to the symbols it provides, extending the built-in table.
    #[serde(default)]
    pub header_symbols: IndexMap<String, Vec<String>>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            pod_types: Vec::new(),
            sink_types: default_sink_types(),
            umbrella_headers: default_umbrella_headers(),
            c_interop_marker: default_c_interop_marker(),
            alias_permanence_keywords: default_alias_permanence_keywords(),
            allow_return_type_split: true,
            low_level_enum_hints: default_low_level_enum_hints(),
            macro_max_word_length: 0,
            header_symbols: IndexMap::new(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_max_line_width() -> usize {
    DEFAULT_MAX_LINE_WIDTH
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_interface_extensions() -> Vec<String> {
    strings(&["h", "hh", "hpp", "hxx"])
}

fn default_implementation_extensions() -> Vec<String> {
    strings(&["c", "cc", "cpp", "cxx"])
}

fn default_sink_types() -> Vec<String> {
    strings(&[
        "std::unique_ptr",
        "std::shared_ptr",
        "std::function",
        "std::string_view",
        "std::span",
    ])
}

fn default_umbrella_headers() -> Vec<String> {
    strings(&["bits/stdc++.h"])
}

fn default_c_interop_marker() -> String {
    "c-interop".to_string()
}

fn default_alias_permanence_keywords() -> Vec<String> {
    strings(&["permanent", "stable", "guarantee"])
}

fn default_low_level_enum_hints() -> Vec<String> {
    strings(&[
        "flag", "mask", "bit", "register", "opcode", "wire", "packed", "protocol",
    ])
}
