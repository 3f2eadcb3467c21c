use pretty_assertions::assert_eq;

use mend_syntax::{expand_bodies, lex, parse, print_unit, ParseOptions, SyntaxKind};
use mend_test_utils::assert_golden;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[test]
fn parser_corpus() -> io::Result<()> {
    for java_path in collect_java_files(&testdata_dir().join("parser"))? {
        let input = read_normalized(&java_path)?;
        let full = parse(&input, &ParseOptions::full());
        assert!(
            !full.has_problems(),
            "expected no problems for `{}`: {:?}",
            java_path.display(),
            full.problems
        );

        let printed = print_unit(&full);
        check_common_properties(&java_path, &input, &printed);

        let reprinted = print_unit(&parse(&printed, &ParseOptions::full()));
        assert_eq!(
            reprinted,
            printed,
            "printing is not idempotent for `{}`",
            java_path.display()
        );
    }
    Ok(())
}

#[test]
fn recovery_corpus() -> io::Result<()> {
    for java_path in collect_java_files(&testdata_dir().join("recovery"))? {
        let input = read_normalized(&java_path)?;
        let full = parse(&input, &ParseOptions::full());
        assert!(
            full.has_problems(),
            "recovery fixture `{}` parsed without problems",
            java_path.display()
        );

        let printed = print_unit(&full);
        check_common_properties(&java_path, &input, &printed);
        assert_golden(&java_path.with_extension("expected"), &printed);
    }
    Ok(())
}

/// Diet plus expansion agrees with a full parse, and every printed mode has
/// balanced braces.
fn check_common_properties(java_path: &Path, input: &str, full_printed: &str) {
    let options = ParseOptions::diet();
    let mut unit = parse(input, &options);
    let diet_printed = print_unit(&unit);
    expand_bodies(&mut unit, input, &options);
    let expanded_printed = print_unit(&unit);

    assert_eq!(
        expanded_printed,
        full_printed,
        "diet + expansion differs from full parse for `{}`",
        java_path.display()
    );
    for printed in [&diet_printed, &expanded_printed] {
        assert!(
            braces_balanced(printed),
            "unbalanced braces printed for `{}`:\n{printed}",
            java_path.display()
        );
    }
}

fn braces_balanced(printed: &str) -> bool {
    let mut depth = 0i64;
    for token in lex(printed, Default::default()) {
        match token.kind {
            SyntaxKind::LBrace => depth += 1,
            SyntaxKind::RBrace => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
}

fn collect_java_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.extension() == Some(OsStr::new("java")) {
            files.push(path);
        }
    }
    files.sort();
    assert!(!files.is_empty(), "no fixtures under {}", root.display());
    Ok(files)
}

fn read_normalized(path: &Path) -> io::Result<String> {
    Ok(fs::read_to_string(path)?.replace("\r\n", "\n"))
}
