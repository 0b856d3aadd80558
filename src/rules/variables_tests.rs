use super::*;
use crate::rules::test_support::{check_source, messages, positions};

#[test]
fn global_without_prefix_is_flagged_once() {
    let findings = check_source(&VariableNaming, "int name;\n");
    assert_eq!(
        messages(&findings),
        vec!["global variable `name` should be prefixed with `g_`"]
    );
    assert_eq!(positions(&findings), vec![(1, 5)]);
}

#[test]
fn prefixed_global_is_accepted() {
    assert!(check_source(&VariableNaming, "int g_name;\n").is_empty());
    assert!(check_source(&VariableNaming, "static int g_hitCount = 0;\n").is_empty());
}

#[test]
fn prefixed_global_must_be_camel_case() {
    let findings = check_source(&VariableNaming, "int g_hit_count;\n");
    assert_eq!(
        messages(&findings),
        vec!["global variable `g_hit_count` should be `g_` followed by lowerCamelCase"]
    );
}

#[test]
fn constant_globals_skip_the_prefix() {
    let src = "const int MAX_SIZE = 10;\nconstexpr double pi = 3.14;\nconst int Max_Size = 1;\n";
    let findings = check_source(&VariableNaming, src);
    assert_eq!(
        messages(&findings),
        vec!["global constant `Max_Size` should be lowerCamelCase or UPPER_CASE"]
    );
}

#[test]
fn pointer_to_const_is_not_a_constant() {
    let findings = check_source(&VariableNaming, "const char* LABEL = \"x\";\n");
    assert_eq!(
        messages(&findings),
        vec!["`LABEL` is named like a constant but is not declared const or constexpr"]
    );
}

#[test]
fn locals_are_lower_camel_case() {
    let src = "\
void run()
{
    int itemCount = 0;
    int item_total = 0;
    const int LIMIT = 4;
    int BUFFER_SIZE = 8;
    for (int i = 0; i < LIMIT; ++i)
    {
        itemCount += i;
        item_total += i;
    }
}
";
    let findings = check_source(&VariableNaming, src);
    assert_eq!(
        messages(&findings),
        vec![
            "local variable `item_total` should be lowerCamelCase",
            "`BUFFER_SIZE` is named like a constant but is not declared const or constexpr",
        ]
    );
}

#[test]
fn members_allow_trailing_underscore() {
    let src = "\
class Widget
{
public:
    int width;
    static constexpr int MAX_WIDTH = 10;
private:
    int height_;
    int Depth_;
};
";
    let findings = check_source(&VariableNaming, src);
    assert_eq!(
        messages(&findings),
        vec!["data member `Depth_` should be lowerCamelCase"]
    );
}
