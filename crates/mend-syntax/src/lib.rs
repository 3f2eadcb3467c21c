//! Recovering Java parser.
//!
//! Entry points:
//! - [`parse`]: builds a [`CompilationUnit`] from any input. In
//!   [`ParseMode::Diet`] method bodies are kept as opaque ranges; in
//!   [`ParseMode::Full`] they are parsed into statements.
//! - [`expand_bodies`]: turns a diet unit into a "diet + body" unit in place.
//! - [`parse_with_cursor`]: the completion/selection variant, which marks the
//!   node under the cursor with an [`AssistNode`].
//! - [`print_unit`]: the canonical printed form used to compare trees.
//!
//! Syntax errors never abort a parse: they are recorded on
//! [`CompilationUnit::problems`] and recovery keeps going.

pub mod ast;
mod language_level;
mod lexer;
mod parser;
mod printer;
mod syntax_kind;

#[cfg(test)]
mod tests;

pub use ast::*;
pub use language_level::{JavaFeature, JavaLanguageLevel, UnknownLanguageLevel};
pub use lexer::{lex, Lexer, Token};
pub use parser::assist::{
    parse_with_cursor, AssistInfo, AssistParse, CursorSpec, InvalidCursorLocation,
};
pub use parser::expand::{expand_bodies, BodyExpander};
pub use printer::{print_unit, Printer};
pub use syntax_kind::SyntaxKind;

use serde::{Deserialize, Serialize};

/// How much of the unit a parse resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Declarations, headers and field initializers; bodies stay opaque.
    Diet,
    /// Everything, statement bodies included.
    Full,
}

/// Immutable configuration threaded through every parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub language_level: JavaLanguageLevel,
    pub mode: ParseMode,
    /// Keep the statements of a body that contains syntax errors. When off, such
    /// a body is emptied.
    pub statements_recovery: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            language_level: JavaLanguageLevel::default(),
            mode: ParseMode::Full,
            statements_recovery: true,
        }
    }
}

impl ParseOptions {
    pub fn diet() -> Self {
        Self {
            mode: ParseMode::Diet,
            ..Self::default()
        }
    }

    pub fn full() -> Self {
        Self::default()
    }

    pub fn with_level(self, language_level: JavaLanguageLevel) -> Self {
        Self {
            language_level,
            ..self
        }
    }
}

/// Parses `text` into a compilation unit. Never fails; see
/// [`CompilationUnit::problems`] for what recovery had to fix.
pub fn parse(text: &str, options: &ParseOptions) -> CompilationUnit {
    parser::parse_unit(text, options)
}

/// A recoverable syntax problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

/// A half-open byte range within a source file (`start..end`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    #[inline]
    pub fn empty(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// `start <= offset <= end`.
    #[inline]
    pub fn contains_inclusive(self, offset: u32) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Smallest range covering both.
    #[inline]
    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
