use super::*;

#[test]
fn exit_codes_are_distinct() {
    let codes = [
        EXIT_SUCCESS,
        EXIT_VIOLATIONS,
        EXIT_CONFIG_ERROR,
        EXIT_TOOL_FAILURE,
    ];
    for (i, a) in codes.iter().enumerate() {
        for b in &codes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn exit_codes_match_documented_values() {
    assert_eq!(EXIT_SUCCESS, 0);
    assert_eq!(EXIT_VIOLATIONS, 1);
    assert_eq!(EXIT_CONFIG_ERROR, 2);
    assert_eq!(EXIT_TOOL_FAILURE, 3);
}
