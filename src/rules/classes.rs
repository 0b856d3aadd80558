//! Class names and class layout.

use super::naming::is_pascal;
use super::{Finding, Rule, RuleContext};
use crate::parser::{
    AccessSection, Category, DeclNode, FunctionRole, RecordDecl, SyntaxTree, VarScope, Visibility,
};

pub struct ClassNaming;

impl Rule for ClassNaming {
    fn id(&self) -> &'static str {
        "class-naming"
    }

    fn description(&self) -> &'static str {
        "Class, struct, union and enum names are PascalCase"
    }

    fn categories(&self) -> &'static [Category] {
        &[
            Category::Class,
            Category::Struct,
            Category::Union,
            Category::Enum,
            Category::EnumClass,
        ]
    }

    fn check(&self, node: &DeclNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        if node.name.is_empty() || is_pascal(&node.name) {
            return Vec::new();
        }
        vec![Finding::new(
            node.name_pos,
            format!("{} `{}` should be PascalCase", node.category(), node.name),
        )]
    }
}

pub struct ClassEncapsulation;

impl Rule for ClassEncapsulation {
    fn id(&self) -> &'static str {
        "class-encapsulation"
    }

    fn description(&self) -> &'static str {
        "Private data members end with `_`; sections run public, private, protected; constructors, destructor, then methods"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Class, Category::Struct, Category::Union]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(record) = node.as_record() else {
            return Vec::new();
        };
        let mut findings = private_members(record, ctx.tree);
        findings.extend(section_order(node, record, ctx.tree));
        for section in &record.sections {
            findings.extend(member_order(section, ctx.tree));
        }
        findings
    }
}

fn private_members(record: &RecordDecl, tree: &SyntaxTree) -> Vec<Finding> {
    record
        .sections
        .iter()
        .filter(|section| section.visibility == Visibility::Private)
        .flat_map(|section| section.members.iter().map(|&id| tree.get(id)))
        .filter(|member| {
            member.as_variable().is_some_and(|var| {
                var.scope == VarScope::Member && !(var.is_static && var.is_constant())
            }) && !member.name.ends_with('_')
        })
        .map(|member| {
            Finding::new(
                member.name_pos,
                format!("private data member `{}` should end with `_`", member.name),
            )
        })
        .collect()
}

/// Non-exempt sections must not go back to an earlier visibility.
fn section_order(node: &DeclNode, record: &RecordDecl, tree: &SyntaxTree) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut latest: Option<Visibility> = None;
    for section in record.sections.iter().filter(|s| !s.exempt) {
        if let Some(prev) = latest
            && section.visibility.rank() < prev.rank()
        {
            let pos = section
                .label
                .or_else(|| section.members.first().map(|&id| tree.get(id).span.start))
                .unwrap_or(node.name_pos);
            findings.push(Finding::new(
                pos,
                format!(
                    "`{}` section of `{}` should come before the `{prev}` section",
                    section.visibility, node.name
                ),
            ));
        }
        if latest.is_none_or(|prev| section.visibility.rank() > prev.rank()) {
            latest = Some(section.visibility);
        }
    }
    findings
}

const fn role_rank(role: FunctionRole) -> u8 {
    match role {
        FunctionRole::Constructor => 0,
        FunctionRole::Destructor => 1,
        FunctionRole::Free | FunctionRole::Method | FunctionRole::Operator => 2,
    }
}

const fn role_name(role: FunctionRole) -> &'static str {
    match role {
        FunctionRole::Constructor => "constructor",
        FunctionRole::Destructor => "destructor",
        FunctionRole::Free | FunctionRole::Method | FunctionRole::Operator => "member function",
    }
}

/// Within a section: constructors, then the destructor, then other functions.
fn member_order(section: &AccessSection, tree: &SyntaxTree) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut latest: Option<(FunctionRole, &DeclNode)> = None;
    for member in section.members.iter().map(|&id| tree.get(id)) {
        let Some(decl) = member.as_function() else {
            continue;
        };
        match latest {
            Some((prev_role, prev)) if role_rank(decl.role) < role_rank(prev_role) => {
                findings.push(Finding::new(
                    member.name_pos,
                    format!(
                        "{} `{}` should be declared before {} `{}`",
                        role_name(decl.role),
                        member.name,
                        role_name(prev_role),
                        prev.name
                    ),
                ));
            }
            _ => latest = Some((decl.role, member)),
        }
    }
    findings
}

#[cfg(test)]
#[path = "classes_tests.rs"]
mod tests;
