use super::naming::is_pascal;
use super::{Finding, Rule, RuleContext};
use crate::parser::{AliasForm, Category, DeclKind, DeclNode, Visibility};

pub struct AliasStyle;

impl Rule for AliasStyle {
    fn id(&self) -> &'static str {
        "alias-style"
    }

    fn description(&self) -> &'static str {
        "`using` over `typedef`, PascalCase alias names, public aliases documented as permanent"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Alias]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let DeclKind::Alias { form, target } = &node.kind else {
            return Vec::new();
        };
        let name = node.name.as_str();
        let mut findings = Vec::new();
        if *form == AliasForm::Typedef {
            findings.push(Finding::new(
                node.span.start,
                format!("use `using {name} = {target};` instead of `typedef`"),
            ));
        }
        if !is_pascal(name) {
            findings.push(Finding::new(
                node.name_pos,
                format!("alias `{name}` should be PascalCase"),
            ));
        }
        if is_public(node, ctx) && !documents_permanence(node, &ctx.heuristics.alias_permanence_keywords)
        {
            findings.push(Finding::new(
                node.name_pos,
                format!("public alias `{name}` needs a comment stating that it is permanent"),
            ));
        }
        findings
    }
}

/// Public class members anywhere, namespace-scope aliases of interface files.
fn is_public(node: &DeclNode, ctx: &RuleContext<'_>) -> bool {
    let Some(parent) = ctx.tree.parent(node.id) else {
        return false;
    };
    match parent.category() {
        Category::Class | Category::Struct | Category::Union => {
            node.visibility == Some(Visibility::Public)
        }
        Category::TranslationUnit | Category::Namespace => ctx.is_interface(),
        _ => false,
    }
}

fn documents_permanence(node: &DeclNode, keywords: &[String]) -> bool {
    let Some(comment) = &node.leading_comment else {
        return false;
    };
    let comment = comment.to_lowercase();
    keywords
        .iter()
        .any(|keyword| comment.contains(&keyword.to_lowercase()))
}

#[cfg(test)]
#[path = "aliases_tests.rs"]
mod tests;
