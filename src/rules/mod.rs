//! Style rules and their registry.
//!
//! A rule is a pure function from one declaration node (plus read-only file
//! context) to findings. Rules never see each other's output; the engine
//! attaches rule ids and severities afterwards.

mod aliases;
mod classes;
mod enums;
mod functions;
mod headers;
mod layout;
mod naming;
mod variables;

pub use aliases::AliasStyle;
pub use classes::{ClassEncapsulation, ClassNaming};
pub use enums::{EnumClass, EnumUnderlyingType, EnumeratorNaming};
pub use functions::{FunctionNaming, ParameterPassing};
pub use headers::{HeaderHygiene, MacroNaming, NamespaceUsing};
pub use layout::{BraceStyle, LineWidth};
pub use variables::VariableNaming;

use std::path::Path;

use indexmap::IndexMap;

use crate::config::{Config, HeuristicsConfig};
use crate::diagnostic::Severity;
use crate::error::{Result, StyleGuardError};
use crate::language::SourceKind;
use crate::lexer::{Position, Token};
use crate::parser::{Category, DeclNode, SyntaxTree};

/// A rule violation before the engine turns it into a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub pos: Position,
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn new(pos: Position, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

/// Read-only view of one file shared by every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub path: &'a Path,
    pub source: &'a str,
    pub kind: SourceKind,
    pub tokens: &'a [Token<'a>],
    pub tree: &'a SyntaxTree,
    pub max_line_width: usize,
    pub heuristics: &'a HeuristicsConfig,
}

impl RuleContext<'_> {
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == SourceKind::Interface
    }
}

pub trait Rule: Send + Sync {
    /// Stable kebab-case identifier used in config and output.
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Node categories passed to [`Rule::check`].
    fn categories(&self) -> &'static [Category];

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding>;
}

/// Run `rule` over every applicable node of the file, in tree order.
#[must_use]
pub fn apply(rule: &dyn Rule, ctx: &RuleContext<'_>) -> Vec<Finding> {
    let categories = rule.categories();
    ctx.tree
        .iter()
        .filter(|node| categories.contains(&node.category()))
        .flat_map(|node| rule.check(node, ctx))
        .collect()
}

/// All known rules, keyed by id in registration order.
pub struct RuleRegistry {
    rules: IndexMap<&'static str, Box<dyn Rule>>,
}

impl RuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Registry holding every built-in rule.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(LineWidth));
        registry.register(Box::new(HeaderHygiene));
        registry.register(Box::new(NamespaceUsing));
        registry.register(Box::new(MacroNaming));
        registry.register(Box::new(VariableNaming));
        registry.register(Box::new(BraceStyle));
        registry.register(Box::new(FunctionNaming));
        registry.register(Box::new(ParameterPassing));
        registry.register(Box::new(ClassNaming));
        registry.register(Box::new(ClassEncapsulation));
        registry.register(Box::new(EnumClass));
        registry.register(Box::new(EnumeratorNaming));
        registry.register(Box::new(EnumUnderlyingType));
        registry.register(Box::new(AliasStyle));
        registry
    }

    /// Add a rule, replacing any rule with the same id.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.insert(rule.id(), rule);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.get(id).map(|rule| &**rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.values().map(|rule| &**rule)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn ensure_known(&self, id: &str) -> Result<()> {
        if self.rules.contains_key(id) {
            Ok(())
        } else {
            Err(StyleGuardError::UnknownRule(id.to_string()))
        }
    }

    /// Resolve the enabled rules and their effective severities.
    ///
    /// # Errors
    /// Returns [`StyleGuardError::UnknownRule`] when `rules`, `disable` or
    /// `severity_overrides` name a rule that is not registered.
    pub fn select(&self, config: &Config) -> Result<RuleSet<'_>> {
        if let Some(enabled) = &config.rules {
            for id in enabled {
                self.ensure_known(id)?;
            }
        }
        for id in config.disable.iter().chain(config.severity_overrides.keys()) {
            self.ensure_known(id)?;
        }
        let rules = self
            .iter()
            .filter(|rule| {
                config
                    .rules
                    .as_ref()
                    .is_none_or(|enabled| enabled.iter().any(|id| id == rule.id()))
            })
            .filter(|rule| !config.disable.iter().any(|id| id == rule.id()))
            .map(|rule| SelectedRule {
                rule,
                severity: config
                    .severity_overrides
                    .get(rule.id())
                    .copied()
                    .unwrap_or_else(|| rule.default_severity()),
            })
            .collect();
        Ok(RuleSet { rules })
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Clone, Copy)]
pub struct SelectedRule<'r> {
    pub rule: &'r dyn Rule,
    pub severity: Severity,
}

/// Enabled rules with effective severities, in registry order.
#[derive(Clone)]
pub struct RuleSet<'r> {
    rules: Vec<SelectedRule<'r>>,
}

impl<'r> RuleSet<'r> {
    pub fn iter(&self) -> impl Iterator<Item = &SelectedRule<'r>> {
        self.rules.iter()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|s| s.rule.id()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
