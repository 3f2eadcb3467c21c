use std::env;
use std::fs;
use std::ops::Range;
use std::path::Path;

/// Marker used in fixtures to denote a completion caret.
pub const CURSOR_MARKER: &str = "$0";

/// Extracts the caret position from a fixture containing a single `$0` marker.
///
/// Returns the fixture with the marker removed and the byte offset the marker
/// occupied.
pub fn extract_cursor(fixture: &str) -> (String, usize) {
    let offset = fixture
        .find(CURSOR_MARKER)
        .expect("fixture missing $0 cursor marker");
    assert!(
        fixture[offset + CURSOR_MARKER.len()..]
            .find(CURSOR_MARKER)
            .is_none(),
        "fixture contains more than one $0 marker"
    );

    let mut text = String::with_capacity(fixture.len());
    text.push_str(&fixture[..offset]);
    text.push_str(&fixture[offset + CURSOR_MARKER.len()..]);
    (text, offset)
}

/// Extracts a byte range selection from a fixture containing `/*start*/` and
/// `/*end*/` markers.
///
/// Returns the fixture with markers removed and the selection pointing at the
/// extracted region.
pub fn extract_range(fixture: &str) -> (String, Range<usize>) {
    let start_marker = "/*start*/";
    let end_marker = "/*end*/";

    let start = fixture
        .find(start_marker)
        .expect("fixture missing /*start*/ marker");
    let after_start = start + start_marker.len();
    let end = fixture
        .find(end_marker)
        .expect("fixture missing /*end*/ marker");
    assert!(end >= after_start, "/*end*/ must come after /*start*/");

    let mut text = String::with_capacity(fixture.len());
    text.push_str(&fixture[..start]);
    text.push_str(&fixture[after_start..end]);
    text.push_str(&fixture[end + end_marker.len()..]);

    // The start position stays the same; the end shrinks by the start marker.
    (text, start..end - start_marker.len())
}

/// Whether golden files should be rewritten instead of compared (`BLESS=1`).
pub fn bless_enabled() -> bool {
    let Ok(val) = env::var("BLESS") else {
        return false;
    };
    let val = val.trim().to_ascii_lowercase();
    !(val.is_empty() || val == "0" || val == "false")
}

/// Compares `actual` against the golden file at `path`.
///
/// With `BLESS=1` the file is (re)written instead. Line endings are normalized
/// so fixtures checked out on Windows compare equal.
pub fn assert_golden(path: &Path, actual: &str) {
    let actual = normalize_newlines(actual);
    if bless_enabled() {
        write_if_changed(path, &actual);
        return;
    }

    let expected = match fs::read_to_string(path) {
        Ok(text) => normalize_newlines(&text),
        Err(err) => panic!(
            "failed to read golden file {} ({err}); run with `BLESS=1` to create it",
            path.display()
        ),
    };
    assert!(
        expected == actual,
        "golden mismatch for {}\n--- expected\n{expected}\n--- actual\n{actual}",
        path.display()
    );
}

fn write_if_changed(path: &Path, contents: &str) {
    if let Ok(existing) = fs::read_to_string(path) {
        if normalize_newlines(&existing) == contents {
            return;
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create golden dir");
    }
    fs::write(path, contents).expect("write golden file");
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_marker_is_removed() {
        let (text, offset) = extract_cursor("class A { fo$0 }");
        assert_eq!(text, "class A { fo }");
        assert_eq!(offset, 12);
    }

    #[test]
    fn range_markers_are_removed() {
        let (text, range) = extract_range("class A extends /*start*/Foo/*end*/ {}");
        assert_eq!(text, "class A extends Foo {}");
        assert_eq!(&text[range], "Foo");
    }
}
