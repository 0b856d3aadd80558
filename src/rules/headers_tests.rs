use super::*;
use crate::config::Config;
use crate::language::SourceKind;
use crate::rules::test_support::{check_header, check_source, check_with, messages, positions};

#[test]
fn unused_standard_include_in_header_is_flagged() {
    let src = "#include <vector>\n#include <string>\n\nclass Widget\n{\npublic:\n    std::string name() const;\n};\n";
    let findings = check_header(&HeaderHygiene, src);
    assert_eq!(
        messages(&findings),
        vec!["<vector> is not used by this interface; include it in the implementation file instead"]
    );
    assert_eq!(positions(&findings), vec![(1, 1)]);
}

#[test]
fn implementation_files_may_include_anything() {
    let src = "#include <vector>\n\nint main()\n{\n    return 0;\n}\n";
    assert!(check_source(&HeaderHygiene, src).is_empty());
}

#[test]
fn unknown_headers_are_skipped() {
    let src = "#include \"detail/impl.h\"\n#include <boost/asio.hpp>\n";
    assert!(check_header(&HeaderHygiene, src).is_empty());
}

#[test]
fn symbols_in_macros_count_as_use() {
    let src = "#include <iostream>\n#define TRACE(x) std::cerr << (x)\n";
    assert!(check_header(&HeaderHygiene, src).is_empty());
}

#[test]
fn configured_header_symbols_are_used() {
    let mut config = Config::default();
    config
        .heuristics
        .header_symbols
        .insert("my_widget.h".to_string(), vec!["ui::MyWidget".to_string()]);
    let unused = "#include \"my_widget.h\"\n\nvoid show();\n";
    let used = "#include \"my_widget.h\"\n\nvoid show(const ui::MyWidget& widget);\n";

    let findings = check_with(&HeaderHygiene, unused, SourceKind::Interface, &config);
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.starts_with("\"my_widget.h\""));
    assert!(check_with(&HeaderHygiene, used, SourceKind::Interface, &config).is_empty());
}

#[test]
fn umbrella_header_is_flagged_everywhere() {
    let src = "#include <bits/stdc++.h>\n";
    assert_eq!(check_source(&HeaderHygiene, src).len(), 1);
    let findings = check_header(&HeaderHygiene, src);
    assert_eq!(
        messages(&findings),
        vec!["umbrella header <bits/stdc++.h> must not be included; include the specific headers instead"]
    );
}

#[test]
fn using_directive_in_header_is_flagged() {
    let src = "#include <string>\nusing namespace std;\nstring name();\n";
    let findings = check_header(&NamespaceUsing, src);
    assert_eq!(
        messages(&findings),
        vec!["`using namespace std` in an interface file"]
    );
    assert_eq!(positions(&findings), vec![(2, 1)]);
    assert!(check_source(&NamespaceUsing, src).is_empty());
}

#[test]
fn namespace_scope_using_declaration_is_flagged() {
    let src = "namespace app\n{\nusing std::string;\n}\n";
    let findings = check_header(&NamespaceUsing, src);
    assert_eq!(
        messages(&findings),
        vec!["using-declaration `using std::string` at namespace scope in an interface file"]
    );
}

#[test]
fn class_scope_using_declaration_is_exempt() {
    let src = "class Derived : public Base\n{\npublic:\n    using Base::Base;\n    using Base::run;\n};\n";
    assert!(check_header(&NamespaceUsing, src).is_empty());
}

#[test]
fn lowercase_macro_is_flagged() {
    let src = "#define MAX_SIZE 10\n#define maxSize 10\n#define Log(x) x\n";
    let findings = check_source(&MacroNaming, src);
    assert_eq!(
        messages(&findings),
        vec![
            "macro `maxSize` should be UPPER_CASE",
            "macro `Log` should be UPPER_CASE",
        ]
    );
    assert_eq!(positions(&findings), vec![(2, 9), (3, 9)]);
}

#[test]
fn long_unseparated_macro_needs_heuristic() {
    let src = "#define MAXBUFFERSIZE 10\n#define MAX_BUFFER_SIZE 10\n";
    assert!(check_source(&MacroNaming, src).is_empty());

    let mut config = Config::default();
    config.heuristics.macro_max_word_length = 8;
    let findings = check_with(&MacroNaming, src, SourceKind::Implementation, &config);
    assert_eq!(
        messages(&findings),
        vec!["macro `MAXBUFFERSIZE` is 13 characters without an underscore; separate its words"]
    );
}
