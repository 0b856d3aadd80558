use super::*;
use crate::rules::test_support::{check_header, check_source, messages, positions};

#[test]
fn typedef_is_flagged() {
    let findings = check_source(&AliasStyle, "typedef unsigned int Count;\n");
    assert_eq!(
        messages(&findings),
        vec!["use `using Count = unsigned int;` instead of `typedef`"]
    );
    assert_eq!(positions(&findings), vec![(1, 1)]);
}

#[test]
fn alias_names_are_pascal_case() {
    let findings = check_source(&AliasStyle, "using index_type = int;\nusing Index = int;\n");
    assert_eq!(
        messages(&findings),
        vec!["alias `index_type` should be PascalCase"]
    );
    assert_eq!(positions(&findings), vec![(1, 7)]);
}

#[test]
fn public_aliases_in_headers_need_permanence_comment() {
    let src = "\
namespace app
{
// Stable: part of the public API.
using Handle = int;

using Token = long;
}
";
    let findings = check_header(&AliasStyle, src);
    assert_eq!(
        messages(&findings),
        vec!["public alias `Token` needs a comment stating that it is permanent"]
    );
    assert!(check_source(&AliasStyle, src).is_empty());
}

#[test]
fn class_aliases_follow_section_visibility() {
    let src = "\
class Store
{
public:
    /// Guaranteed to remain an integer key.
    using Key = int;
    using Value = double;

private:
    using Bucket = int;
};
";
    let findings = check_source(&AliasStyle, src);
    assert_eq!(
        messages(&findings),
        vec!["public alias `Value` needs a comment stating that it is permanent"]
    );
}
