use mend_syntax::{
    expand_bodies, lex, parse, parse_with_cursor, print_unit, CursorSpec, ParseOptions,
    SyntaxKind, TextRange,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const MAX_FRAGMENTS: usize = 96;

fn punct_fragment() -> impl Strategy<Value = String> {
    const PUNCT: &[&str] = &[
        "{", "}", "{", "}", "(", ")", "[", "]", ";", ";", ",", ".", "=", "+", "-", "<", ">",
        "?", ":", "@", "->", "::", "...", "&&", "++", "*",
    ];
    proptest::sample::select(PUNCT).prop_map(ToString::to_string)
}

fn keyword_fragment() -> impl Strategy<Value = String> {
    const KEYWORDS: &[&str] = &[
        "class", "interface", "enum", "@interface", "void", "int", "public", "private",
        "static", "final", "abstract", "if", "else", "for", "while", "do", "switch", "case",
        "default", "break", "continue", "return", "new", "try", "catch", "finally", "throw",
        "throws", "package", "import", "extends", "implements", "this", "super", "assert",
        "synchronized", "instanceof",
    ];
    proptest::sample::select(KEYWORDS).prop_map(ToString::to_string)
}

fn literal_fragment() -> impl Strategy<Value = String> {
    const LITERALS: &[&str] = &["0", "42", "1.5f", "0x1F", "'c'", "\"s\"", "true", "null"];
    proptest::sample::select(LITERALS).prop_map(ToString::to_string)
}

fn identifier_fragment() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r"[A-Za-z_][A-Za-z0-9_]{0,6}").unwrap()
}

fn trivia_fragment() -> impl Strategy<Value = String> {
    const TRIVIA: &[&str] = &["// line\n", "/* block */", "/** doc */", "\n"];
    proptest::sample::select(TRIVIA).prop_map(ToString::to_string)
}

/// Space-separated fragments that look enough like Java to reach deep into
/// the grammar before going wrong.
fn token_soup() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        4 => punct_fragment(),
        3 => keyword_fragment(),
        3 => identifier_fragment(),
        1 => literal_fragment(),
        1 => trivia_fragment(),
    ];
    proptest::collection::vec(fragment, 0..MAX_FRAGMENTS).prop_map(|parts| parts.join(" "))
}

fn braces_balanced(printed: &str) -> bool {
    let mut depth = 0i64;
    for token in lex(printed, Default::default()) {
        match token.kind {
            SyntaxKind::LBrace => depth += 1,
            SyntaxKind::RBrace => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_input_parses_to_balanced_output(text in token_soup()) {
        let full = print_unit(&parse(&text, &ParseOptions::full()));
        let diet = print_unit(&parse(&text, &ParseOptions::diet()));
        prop_assert!(braces_balanced(&full), "unbalanced full output:\n{}", full);
        prop_assert!(braces_balanced(&diet), "unbalanced diet output:\n{}", diet);
    }

    #[test]
    fn expansion_agrees_with_full_parse(text in token_soup()) {
        let options = ParseOptions::diet();
        let mut unit = parse(&text, &options);
        expand_bodies(&mut unit, &text, &options);
        assert_eq!(
            print_unit(&unit),
            print_unit(&parse(&text, &ParseOptions::full()))
        );
    }

    #[test]
    fn cursor_parse_is_total(text in token_soup(), at in 0usize..=1024, width in 0usize..8) {
        let caret = at.min(text.len() + 1) as u32;
        let options = ParseOptions::diet();
        // Either a unit or a typed rejection; never a panic.
        if let Ok(parsed) = parse_with_cursor(&text, &options, CursorSpec::Completion(caret)) {
            prop_assert!(braces_balanced(&print_unit(&parsed.unit)));
            if let Some(assist) = parsed.assist {
                prop_assert!(assist.replaced.start <= assist.replaced.end);
            }
        }

        let start = at.min(text.len());
        let end = (start + width).min(text.len());
        let _ = parse_with_cursor(
            &text,
            &ParseOptions::full(),
            CursorSpec::Selection(TextRange::new(start, end)),
        );
    }
}
