//! Cursor-sensitive parsing for completion and selection.
//!
//! The token under the cursor is rewritten into an identifier (or an empty
//! identifier is inserted at the caret) before the ordinary grammar runs.
//! Whichever grammar rule consumes that token builds the [`AssistNode`]
//! standing for the construct around the cursor.

use thiserror::Error;

use crate::ast::{AssistKind, AssistMode, AssistNode, CompilationUnit, DeclPath};
use crate::lexer::{lex, Token};
use crate::printer::Printer;
use crate::syntax_kind::SyntaxKind;
use crate::{ParseOptions, TextRange};

use super::{walk, Parser};

/// Where the caller wants assistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSpec {
    /// Caret offset; the identifier prefix before it is what gets completed.
    Completion(u32),
    /// Selected source range.
    Selection(TextRange),
}

/// Cursor positions where completion or selection has no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidCursorLocation {
    #[error("cursor is inside a number literal")]
    NumberLiteral,
    #[error("cursor is inside a comment")]
    Comment,
}

impl CursorSpec {
    /// Moves offsets that fall inside a multi-byte character back to its start.
    fn snapped_to(self, text: &str) -> Self {
        match self {
            CursorSpec::Completion(caret) => CursorSpec::Completion(floor_char_boundary(text, caret)),
            CursorSpec::Selection(range) => CursorSpec::Selection(TextRange {
                start: floor_char_boundary(text, range.start),
                end: floor_char_boundary(text, range.end),
            }),
        }
    }
}

/// Offsets past the end are left alone; they mean "after the last token".
fn floor_char_boundary(text: &str, offset: u32) -> u32 {
    let mut at = offset as usize;
    if at > text.len() {
        return offset;
    }
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at as u32
}

impl InvalidCursorLocation {
    /// Stable reason code for clients.
    pub fn code(self) -> &'static str {
        match self {
            InvalidCursorLocation::NumberLiteral => "NO_COMPLETION_INSIDE_NUMBER",
            InvalidCursorLocation::Comment => "NO_COMPLETION_INSIDE_COMMENT",
        }
    }
}

/// Parser-side state of a cursor parse.
#[derive(Debug, Clone)]
pub(crate) struct AssistState {
    pub(crate) mode: AssistMode,
    /// Index of the cursor token in the parser's token stream; `None` when the
    /// cursor is past the end of input or inside a string literal.
    pub(crate) token: Option<usize>,
    pub(crate) partial: String,
    pub(crate) caret: u32,
    pub(crate) found: Option<AssistNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistParse {
    pub unit: CompilationUnit,
    /// `None` when no grammar rule took the cursor token.
    pub assist: Option<AssistInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistInfo {
    pub mode: AssistMode,
    pub kind: AssistKind,
    pub partial: String,
    pub replaced: TextRange,
    /// Canonical form of the node, e.g. `<CompleteOnName:s.>`.
    pub printed: String,
    /// Type declarations (and member) enclosing the replaced span.
    pub enclosing: DeclPath,
}

/// Parses `text` with the construct at `cursor` replaced by an assist node.
///
/// Fails only for cursors inside number literals or comments; every other
/// position, including broken code around the cursor, yields a unit.
pub fn parse_with_cursor(
    text: &str,
    options: &ParseOptions,
    cursor: CursorSpec,
) -> Result<AssistParse, InvalidCursorLocation> {
    let _span = tracing::debug_span!(target: "mend.syntax", "parse_with_cursor", ?cursor, mode = ?options.mode).entered();

    let cursor = cursor.snapped_to(text);
    let all = lex(text, options.language_level);
    if let Err(err) = check_cursor(text, &all, cursor) {
        tracing::debug!(target: "mend.syntax", code = err.code(), "rejected cursor location");
        return Err(err);
    }
    let mut tokens: Vec<Token> = all
        .into_iter()
        .filter(|token| !token.kind.is_trivia())
        .collect();
    let state = match cursor {
        CursorSpec::Completion(caret) => completion_state(text, &mut tokens, caret),
        CursorSpec::Selection(range) => selection_state(text, &tokens, range),
    };

    let mut parser = Parser::new(text, &tokens, *options);
    parser.assist = Some(state);
    let mut unit = parser.parse_compilation_unit();
    let found = parser.assist.take().and_then(|state| state.found);
    walk::insert_implicit_super_calls(&mut unit);

    let assist = found.map(|node| {
        let mut printer = Printer::new();
        printer.assist(&node);
        AssistInfo {
            mode: node.mode,
            kind: node.kind,
            partial: node.partial.clone(),
            replaced: node.replaced,
            printed: printer.finish(),
            enclosing: unit.path_at(node.replaced.start),
        }
    });
    if assist.is_none() {
        tracing::debug!(target: "mend.syntax", "no assist node placed");
    }
    Ok(AssistParse { unit, assist })
}

fn check_cursor(text: &str, tokens: &[Token], cursor: CursorSpec) -> Result<(), InvalidCursorLocation> {
    let offsets = match cursor {
        CursorSpec::Completion(offset) => [offset, offset],
        CursorSpec::Selection(range) => [range.start, range.end],
    };
    for offset in offsets {
        for token in tokens {
            classify_offset(text, token, offset)?;
        }
    }
    Ok(())
}

fn classify_offset(text: &str, token: &Token, offset: u32) -> Result<(), InvalidCursorLocation> {
    let TextRange { start, end } = token.range;
    if start >= offset {
        return Ok(());
    }
    match token.kind {
        kind if kind.is_number_literal() && offset <= end => Err(InvalidCursorLocation::NumberLiteral),
        SyntaxKind::LineComment if offset <= end => Err(InvalidCursorLocation::Comment),
        SyntaxKind::BlockComment | SyntaxKind::DocComment => {
            // An unterminated comment runs to the end of input, caret included.
            let terminated = token.text(text).len() >= 4 && token.text(text).ends_with("*/");
            if offset < end || (!terminated && offset == end) {
                Err(InvalidCursorLocation::Comment)
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

/// Turns the word ending at the caret into the assist token, or inserts an
/// empty identifier there.
fn completion_state(text: &str, tokens: &mut Vec<Token>, caret: u32) -> AssistState {
    let mut state = AssistState {
        mode: AssistMode::Completion,
        token: None,
        partial: String::new(),
        caret,
        found: None,
    };
    if caret as usize > text.len() {
        return state;
    }

    let touching = tokens
        .iter()
        .position(|token| token.range.start < caret && caret <= token.range.end);
    match touching {
        Some(idx) if tokens[idx].kind.is_word() => {
            let token = &mut tokens[idx];
            state.partial = text[token.range.start as usize..caret as usize].to_owned();
            token.kind = SyntaxKind::Identifier;
            state.token = Some(idx);
        }
        Some(idx)
            if matches!(
                tokens[idx].kind,
                SyntaxKind::StringLiteral | SyntaxKind::CharLiteral
            ) && caret < tokens[idx].range.end =>
        {
            tracing::trace!(target: "mend.syntax", caret, "cursor inside a literal");
        }
        _ => {
            let idx = tokens
                .iter()
                .position(|token| token.range.start >= caret)
                .unwrap_or(tokens.len());
            tokens.insert(
                idx,
                Token {
                    kind: SyntaxKind::Identifier,
                    range: TextRange::empty(caret),
                },
            );
            state.token = Some(idx);
        }
    }
    state
}

/// Picks the last identifier (or `this`/`super`) inside the selection, or
/// failing that one covering it.
fn selection_state(text: &str, tokens: &[Token], range: TextRange) -> AssistState {
    let selectable = |token: &Token| {
        matches!(
            token.kind,
            SyntaxKind::Identifier | SyntaxKind::ThisKw | SyntaxKind::SuperKw
        )
    };
    let idx = tokens
        .iter()
        .rposition(|token| {
            selectable(token) && range.start <= token.range.start && token.range.end <= range.end
        })
        .or_else(|| {
            tokens.iter().position(|token| {
                selectable(token) && token.range.start <= range.start && range.end <= token.range.end
            })
        });

    let (partial, caret) = match idx {
        Some(idx) => (
            tokens[idx].text(text).to_owned(),
            tokens[idx].range.end,
        ),
        None => (String::new(), range.end),
    };
    AssistState {
        mode: AssistMode::Selection,
        token: idx,
        partial,
        caret,
        found: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JavaLanguageLevel;

    fn significant(text: &str) -> Vec<Token> {
        lex(text, JavaLanguageLevel::default())
            .into_iter()
            .filter(|token| !token.kind.is_trivia())
            .collect()
    }

    #[test]
    fn completion_rewrites_keyword_prefix_into_identifier() {
        let text = "class X { void m() { ret } }";
        let mut tokens = significant(text);
        let caret = text.find("ret").map(|at| at as u32 + 2).unwrap_or_default();
        let state = completion_state(text, &mut tokens, caret);
        let idx = state.token.unwrap();
        assert_eq!(state.partial, "re");
        assert_eq!(tokens[idx].kind, SyntaxKind::Identifier);
        assert_eq!(tokens[idx].text(text), "ret");
    }

    #[test]
    fn completion_after_dot_inserts_empty_identifier() {
        let text = "a.";
        let mut tokens = significant(text);
        let before = tokens.len();
        let state = completion_state(text, &mut tokens, 2);
        assert_eq!(tokens.len(), before + 1);
        let idx = state.token.unwrap();
        assert_eq!(tokens[idx].range, TextRange::empty(2));
        assert_eq!(tokens[idx + 1].kind, SyntaxKind::Eof);
    }

    #[test]
    fn completion_inside_string_has_no_token() {
        let text = r#"String s = "abc";"#;
        let mut tokens = significant(text);
        let state = completion_state(text, &mut tokens, 13);
        assert_eq!(state.token, None);
    }

    #[test]
    fn caret_inside_multibyte_char_snaps_to_its_start() {
        let text = "int café;";
        let inside = text.find('é').map(|at| at as u32 + 1).unwrap_or_default();
        assert_eq!(floor_char_boundary(text, inside), inside - 1);
        assert_eq!(floor_char_boundary(text, 3), 3);
        assert_eq!(floor_char_boundary(text, 40), 40);

        let mut tokens = significant(text);
        let state = completion_state(text, &mut tokens, floor_char_boundary(text, inside));
        assert_eq!(state.partial, "caf");
    }

    #[test]
    fn selection_prefers_identifier_inside_range() {
        let text = "foo.bar.baz";
        let tokens = significant(text);
        let state = selection_state(text, &tokens, TextRange::new(4, 7));
        assert_eq!(state.partial, "bar");
        assert_eq!(state.caret, 7);
    }

    #[test]
    fn cursor_checks_cover_numbers_and_comments() {
        let text = "int x = 15; // note\n/** doc */";
        let tokens = lex(text, JavaLanguageLevel::default());
        let check = |offset| check_cursor(text, &tokens, CursorSpec::Completion(offset));
        assert_eq!(check(9), Err(InvalidCursorLocation::NumberLiteral));
        assert_eq!(check(10), Err(InvalidCursorLocation::NumberLiteral));
        assert_eq!(check(8), Ok(()));
        assert_eq!(check(15), Err(InvalidCursorLocation::Comment));
        assert_eq!(check(19), Err(InvalidCursorLocation::Comment));
        assert_eq!(check(23), Err(InvalidCursorLocation::Comment));
        assert_eq!(check(30), Ok(()));
    }
}
