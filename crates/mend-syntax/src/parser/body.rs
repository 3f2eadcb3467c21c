//! The body handling strategy: the only place diet and full parses differ.

use crate::ast::{Block, Body, OpaqueBody};
use crate::syntax_kind::SyntaxKind;
use crate::{ParseMode, TextRange};

use super::recovery::{scan_body_extent, BodyExtent};
use super::Parser;

/// What to do with a method, constructor or initializer body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyHandling {
    /// Record the token range and move on (diet).
    Opaque,
    /// Parse statements (full, and every body the expander revisits).
    Parse,
}

impl BodyHandling {
    pub(crate) fn for_mode(mode: ParseMode) -> Self {
        match mode {
            ParseMode::Diet => BodyHandling::Opaque,
            ParseMode::Full => BodyHandling::Parse,
        }
    }
}

impl Parser<'_> {
    /// Parses a member body at `{`.
    ///
    /// Both strategies first compute the body's extent with the skipper; the
    /// parsing strategy then builds statements over exactly that extent, so a
    /// later expansion of the opaque range yields the same block.
    pub(super) fn parse_member_body(&mut self) -> Body {
        debug_assert!(self.at(SyntaxKind::LBrace));
        let lbrace = self.pos;
        let extent = scan_body_extent(&self.tokens[..self.limit], lbrace);

        let parse = match self.body {
            BodyHandling::Parse => true,
            // A diet cursor parse still has to reach the body holding the cursor.
            BodyHandling::Opaque => self.assist.as_ref().is_some_and(|state| {
                state
                    .token
                    .is_some_and(|token| token > lbrace && token < extent.end)
            }),
        };

        if parse {
            Body::Parsed(self.parse_body_block(extent))
        } else {
            self.skip_body(extent)
        }
    }

    fn skip_body(&mut self, extent: BodyExtent) -> Body {
        let open = self.current_range();
        let body = if extent.closed {
            let close = self.range_of(extent.end);
            self.pos = extent.end + 1;
            OpaqueBody {
                inner: TextRange {
                    start: open.end,
                    end: close.start,
                },
                range: TextRange {
                    start: open.start,
                    end: close.end,
                },
            }
        } else {
            let at = TextRange::empty(self.range_of(extent.end).start);
            self.error_at(at, "expected `}`");
            self.pos = extent.end;
            let end = self.prev_end();
            OpaqueBody {
                inner: TextRange {
                    start: open.end,
                    end,
                },
                range: TextRange {
                    start: open.start,
                    end,
                },
            }
        };
        tracing::trace!(target: "mend.syntax", start = body.range.start, end = body.range.end, "skipped body");
        Body::Opaque(body)
    }

    /// Parses the block at `{` over a precomputed extent.
    pub(super) fn parse_body_block(&mut self, extent: BodyExtent) -> Block {
        let saved_limit = self.limit;
        let target = if extent.closed {
            extent.end + 1
        } else {
            extent.end
        };
        self.limit = target.min(saved_limit);
        let errors_before = self.errors.len();

        let mut block = self.parse_block();

        self.limit = saved_limit;
        if self.pos < target {
            self.pos = target;
        }
        // The `}` synthesized where an unterminated body ends is a problem of
        // the enclosing declaration, not of the statements.
        let synthesized_close =
            (!extent.closed).then(|| TextRange::empty(self.range_of(extent.end).start));
        let statement_errors = self.errors[errors_before..]
            .iter()
            .filter(|error| {
                Some(error.range) != synthesized_close || error.message != "expected `}`"
            })
            .count();
        if !self.options.statements_recovery && statement_errors > 0 {
            tracing::debug!(target: "mend.recovery", start = block.range.start, "statements recovery off; dropping body");
            block.stmts.clear();
        }
        block
    }
}
