//! Pattern compilation and matching tests.

use quill_command::{Pattern, PatternSlot, PatternToken};
use quill_foundation::{ErrorKind, PatternDefect};

#[test]
fn compile_mixed_pattern() {
    let pattern = Pattern::compile("give <item> to <target>").unwrap();

    assert_eq!(
        pattern.tokens(),
        &[
            PatternToken::Literal("give".into()),
            PatternToken::Positional("item".into()),
            PatternToken::Literal("to".into()),
            PatternToken::Positional("target".into()),
        ]
    );
    assert_eq!(pattern.slots().len(), 2);
    assert!(!pattern.has_rest());
}

#[test]
fn slots_keep_declaration_order() {
    let pattern = Pattern::compile("tag <a> <b> <...c>").unwrap();

    let names: Vec<&str> = pattern.slots().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(
        pattern.slots().last(),
        Some(&PatternSlot {
            name: "c".into(),
            rest: true
        })
    );
}

#[test]
fn matching_is_case_sensitive() {
    let pattern = Pattern::compile("Ping").unwrap();

    assert!(pattern.matches("Ping"));
    assert!(!pattern.matches("ping"));
}

#[test]
fn matching_tolerates_extra_whitespace() {
    let pattern = Pattern::compile("welcome <name>").unwrap();

    assert!(pattern.matches("  welcome   Bob  "));
}

#[test]
fn rest_pattern_accepts_bare_minimum() {
    let pattern = Pattern::compile("welcome <...name>").unwrap();

    assert!(pattern.matches("welcome"));
    assert!(pattern.matches("welcome Bob the Builder"));
}

#[test]
fn interleaved_literal_positions_must_line_up() {
    let pattern = Pattern::compile("give <item> to <target>").unwrap();

    assert!(pattern.matches("give sword to Bob"));
    assert!(!pattern.matches("give sword at Bob"));
    assert!(!pattern.matches("give sword to"));
}

#[test]
fn compile_rejects_each_defect() {
    let cases = [
        ("", PatternDefect::Empty),
        ("say <>", PatternDefect::EmptySlotName),
        ("say <...> now", PatternDefect::EmptySlotName),
        ("copy <x> <x>", PatternDefect::DuplicateSlotName("x".into())),
        ("say <...words> loudly", PatternDefect::RestNotLast),
        ("say <...a> <...b>", PatternDefect::MultipleRestSlots),
    ];

    for (source, expected) in cases {
        let err = Pattern::compile(source).unwrap_err();
        match err.kind {
            ErrorKind::MalformedPattern { defect, .. } => {
                assert_eq!(defect, expected, "pattern {source:?}");
            }
            other => panic!("expected pattern error for {source:?}, got {other}"),
        }
    }
}

#[test]
fn compiled_patterns_are_independent() {
    let a = Pattern::compile("ping").unwrap();
    let b = Pattern::compile("ping").unwrap();

    // Equivalent patterns are never deduplicated; each command owns one.
    assert_eq!(a.tokens(), b.tokens());
    assert!(a.matches("ping") && b.matches("ping"));
}
