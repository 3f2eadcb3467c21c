//! Turns opaque bodies of a diet parse into parsed blocks.
//!
//! Each body is re-parsed from the token at its recorded `{` with the same
//! extent computation a full parse uses, so a diet unit expanded here prints
//! exactly like a full parse of the same text.

use crate::ast::{Block, Body, CompilationUnit, Member, OpaqueBody, TypeDecl};
use crate::lexer::Token;
use crate::{ParseError, ParseMode, ParseOptions};

use super::body::BodyHandling;
use super::recovery::{scan_body_extent, FrameKind};
use super::{significant_tokens, walk, Parser};

/// Expands the bodies of one source text, token stream computed once.
pub struct BodyExpander<'a> {
    text: &'a str,
    options: ParseOptions,
    tokens: Vec<Token>,
    problems: Vec<ParseError>,
}

impl<'a> BodyExpander<'a> {
    pub fn new(text: &'a str, options: &ParseOptions) -> Self {
        Self {
            text,
            options: ParseOptions {
                mode: ParseMode::Full,
                ..*options
            },
            tokens: significant_tokens(text, options.language_level),
            problems: Vec::new(),
        }
    }

    /// Parses every opaque method, constructor and initializer body of `ty`
    /// and of the types nested in it.
    pub fn expand_type(&mut self, ty: &mut TypeDecl) {
        walk::visit_type_mut(ty, &mut |decl: &mut TypeDecl| {
            for member in &mut decl.members {
                let body = match member {
                    Member::Method(method) => &mut method.body,
                    Member::Constructor(ctor) => &mut ctor.body,
                    Member::Initializer(init) => &mut init.body,
                    Member::Field(_) | Member::Type(_) => continue,
                };
                if let Body::Opaque(opaque) = body {
                    let opaque = *opaque;
                    *body = Body::Parsed(self.expand_body(opaque));
                }
            }
        });
    }

    /// Problems found in the bodies expanded so far.
    pub fn problems(&self) -> &[ParseError] {
        &self.problems
    }

    pub fn into_problems(self) -> Vec<ParseError> {
        self.problems
    }

    fn expand_body(&mut self, opaque: OpaqueBody) -> Block {
        let Ok(lbrace) = self
            .tokens
            .binary_search_by_key(&opaque.range.start, |token| token.range.start)
        else {
            tracing::debug!(target: "mend.syntax", start = opaque.range.start, "no `{{` token at opaque body start");
            return Block::empty(opaque.range);
        };

        let mut parser = Parser::new(self.text, &self.tokens, self.options);
        parser.body = BodyHandling::Parse;
        parser.pos = lbrace;
        parser.frames.push(FrameKind::Unit);
        parser.frames.push(FrameKind::TypeBody);

        let extent = scan_body_extent(&self.tokens[..parser.limit], lbrace);
        let block = parser.parse_body_block(extent);
        tracing::trace!(
            target: "mend.syntax",
            start = opaque.range.start,
            stmts = block.stmts.len(),
            "expanded body"
        );
        self.problems.extend(parser.take_errors());
        block
    }
}

/// Expands every opaque body in `unit` in place, merging the problems found
/// into the unit, and marks the unit as having parsed bodies.
pub fn expand_bodies(unit: &mut CompilationUnit, text: &str, options: &ParseOptions) {
    let _span = tracing::debug_span!(target: "mend.syntax", "expand_bodies", types = unit.types.len()).entered();

    let mut expander = BodyExpander::new(text, options);
    for ty in &mut unit.types {
        expander.expand_type(ty);
    }

    let mut problems = std::mem::take(&mut unit.problems);
    problems.extend(expander.into_problems());
    problems.sort_by_key(|problem| problem.range.start);
    problems.dedup();
    unit.problems = problems;
    unit.bodies_parsed = true;
    walk::insert_implicit_super_calls(unit);

    tracing::debug!(target: "mend.syntax", problems = unit.problems.len(), "expanded bodies");
}
