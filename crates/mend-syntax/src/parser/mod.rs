//! Recursive-descent grammar engine shared by every parse mode.
//!
//! One [`Parser`] handles diet, full and cursor-sensitive parses; the modes
//! differ only in the [`BodyHandling`] strategy and in whether an
//! [`assist::AssistState`] is installed. All closing decisions are delegated
//! to the frame table in [`recovery`].

pub(crate) mod assist;
mod body;
mod decls;
pub(crate) mod expand;
mod exprs;
mod recovery;
mod stmts;
mod types;
mod walk;

use crate::ast::{
    AssistKind, AssistMode, AssistNode, AssistTarget, CompilationUnit, Ident, TypeRef,
};
use crate::language_level::JavaFeature;
use crate::lexer::{lex, Token};
use crate::syntax_kind::SyntaxKind;
use crate::{JavaLanguageLevel, ParseError, ParseOptions, TextRange};

use self::assist::AssistState;
use self::body::BodyHandling;
use self::recovery::{anchor_at, Anchor, FrameStack};

pub(crate) fn parse_unit(text: &str, options: &ParseOptions) -> CompilationUnit {
    let _span = tracing::debug_span!(
        target: "mend.syntax",
        "parse",
        mode = ?options.mode,
        level = %options.language_level,
        len = text.len()
    )
    .entered();

    let tokens = significant_tokens(text, options.language_level);
    let mut unit = Parser::new(text, &tokens, *options).parse_compilation_unit();
    walk::insert_implicit_super_calls(&mut unit);

    tracing::debug!(
        target: "mend.syntax",
        types = unit.types.len(),
        problems = unit.problems.len(),
        "parsed compilation unit"
    );
    unit
}

/// Lexes `text` and drops trivia. The result always ends with `Eof`.
pub(crate) fn significant_tokens(text: &str, level: JavaLanguageLevel) -> Vec<Token> {
    lex(text, level)
        .into_iter()
        .filter(|token| !token.kind.is_trivia())
        .collect()
}

/// What a name assist does with the dotted segments after the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameTail {
    Swallow,
    Keep,
}

pub(crate) struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    /// Tokens at or past `limit` read as end of input. Lets body parses stop
    /// exactly at the extent the skipper computed.
    limit: usize,
    options: ParseOptions,
    body: BodyHandling,
    frames: FrameStack,
    errors: Vec<ParseError>,
    assist: Option<AssistState>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, tokens: &'a [Token], options: ParseOptions) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            limit: tokens.len().saturating_sub(1),
            options,
            body: BodyHandling::for_mode(options.mode),
            frames: FrameStack::default(),
            errors: Vec::new(),
            assist: None,
        }
    }

    pub(crate) fn take_errors(&mut self) -> Vec<ParseError> {
        let mut errors = std::mem::take(&mut self.errors);
        errors.sort_by_key(|error| error.range.start);
        errors
    }

    fn level(&self) -> JavaLanguageLevel {
        self.options.language_level
    }

    // --- token access ---

    fn nth(&self, n: usize) -> SyntaxKind {
        let idx = self.pos + n;
        if idx >= self.limit {
            SyntaxKind::Eof
        } else {
            self.tokens[idx].kind
        }
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn bump(&mut self) {
        if self.pos < self.limit {
            self.pos += 1;
        }
    }

    fn range_of(&self, idx: usize) -> TextRange {
        if idx < self.limit {
            self.tokens[idx].range
        } else {
            let offset = self
                .tokens
                .get(self.limit)
                .map_or(self.source.len() as u32, |token| token.range.start);
            TextRange::empty(offset)
        }
    }

    fn current_range(&self) -> TextRange {
        self.range_of(self.pos)
    }

    fn nth_range(&self, n: usize) -> TextRange {
        self.range_of(self.pos + n)
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> u32 {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].range.end,
            None => 0,
        }
    }

    /// Whether tokens `n` and `n + 1` touch, used to glue `>` `>` into shifts.
    fn adjacent(&self, n: usize) -> bool {
        self.nth_range(n).end == self.nth_range(n + 1).start
    }

    /// Source text of a token. The assist token reads as its partial identifier.
    fn text_at(&self, idx: usize) -> &str {
        if let Some(state) = &self.assist {
            if state.token == Some(idx) {
                return &state.partial;
            }
        }
        match self.tokens.get(idx) {
            Some(token) if idx < self.limit => token.text(self.source),
            _ => "",
        }
    }

    fn bump_ident(&mut self) -> Ident {
        let ident = Ident::new(self.text_at(self.pos), self.current_range());
        self.bump();
        ident
    }

    fn expect_ident(&mut self, what: &str) -> Ident {
        if self.at(SyntaxKind::Identifier) {
            self.bump_ident()
        } else {
            self.error_here(format!("expected {what}"));
            Ident::missing(self.prev_end())
        }
    }

    fn expect(&mut self, kind: SyntaxKind, message: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error_here(message);
            false
        }
    }

    // --- diagnostics ---

    fn error_here(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.error_at(range, message);
    }

    fn error_at(&mut self, range: TextRange, message: impl Into<String>) {
        // One report per location; cascades at the same token add nothing.
        if self.errors.last().is_some_and(|last| last.range == range) {
            return;
        }
        let message = message.into();
        tracing::trace!(target: "mend.recovery", start = range.start, end = range.end, %message, "syntax error");
        self.errors.push(ParseError { message, range });
    }

    /// Reports a construct the configured level does not have.
    fn feature_error(&mut self, feature: JavaFeature, range: TextRange) {
        let message = format!(
            "{} require source level 1.{} or above [{}]",
            feature.display_name(),
            feature.stable_since(),
            feature.diagnostic_code()
        );
        self.error_at(range, message);
    }

    fn supports(&self, feature: JavaFeature) -> bool {
        self.level().is_enabled(feature)
    }

    // --- recovery ---

    fn anchor(&self) -> Option<Anchor> {
        anchor_at(&self.tokens[..self.limit], self.pos)
    }

    /// Whether the current token is an anchor owned by a frame below `depth`,
    /// meaning the construct whose frame sits at `depth` must close here.
    fn unwinds(&self, depth: usize) -> bool {
        let Some(anchor) = self.anchor() else {
            return false;
        };
        match self.frames.owner(anchor) {
            Some(owner) if owner < depth => {
                tracing::trace!(
                    target: "mend.recovery",
                    ?anchor,
                    depth,
                    owner,
                    offset = self.current_range().start,
                    "closing open frames"
                );
                true
            }
            _ => false,
        }
    }

    /// Whether the current token is claimed by any open frame.
    fn at_claimed_anchor(&self) -> bool {
        self.anchor()
            .is_some_and(|anchor| self.frames.owner(anchor).is_some())
    }

    // --- assist support ---

    fn is_assist(&self, idx: usize) -> bool {
        idx < self.limit
            && matches!(&self.assist, Some(state) if state.token == Some(idx) && state.found.is_none())
    }

    fn at_assist(&self) -> bool {
        self.is_assist(self.pos)
    }

    fn nth_is_assist(&self, n: usize) -> bool {
        self.is_assist(self.pos + n)
    }

    /// An empty identifier the cursor variant inserted at the caret.
    fn at_inserted_assist(&self) -> bool {
        self.at_assist() && self.current_range().is_empty()
    }

    fn assist_mode(&self) -> Option<AssistMode> {
        self.assist.as_ref().map(|state| state.mode)
    }

    /// Text of the assist token up to the caret; the whole token when selecting.
    fn assist_partial(&self) -> String {
        self.assist
            .as_ref()
            .map(|state| state.partial.clone())
            .unwrap_or_default()
    }

    fn assist_caret(&self) -> u32 {
        self.assist.as_ref().map_or(0, |state| state.caret)
    }

    /// Builds an assist node and records it as the parse's single assist.
    fn place_assist(
        &mut self,
        kind: AssistKind,
        target: AssistTarget,
        replaced: TextRange,
    ) -> Box<AssistNode> {
        let (mode, partial) = match &self.assist {
            Some(state) => (state.mode, state.partial.clone()),
            None => (AssistMode::Completion, String::new()),
        };
        let kind = match (mode, kind) {
            (
                AssistMode::Selection,
                AssistKind::Class
                | AssistKind::Interface
                | AssistKind::Exception
                | AssistKind::MultiCatchException,
            ) => AssistKind::Type,
            _ => kind,
        };
        let node = AssistNode {
            mode,
            kind,
            target,
            partial,
            replaced,
        };
        tracing::debug!(target: "mend.syntax", ?mode, ?kind, start = replaced.start, end = replaced.end, "placed assist node");
        if let Some(state) = &mut self.assist {
            state.found = Some(node.clone());
        }
        Box::new(node)
    }

    /// Changes the kind of an already placed node once enclosing context
    /// (multi-catch union, array initializer) becomes known.
    fn retag_assist(&mut self, node: &mut AssistNode, kind: AssistKind) {
        if node.mode == AssistMode::Selection && kind == AssistKind::MultiCatchException {
            return;
        }
        node.kind = kind;
        if let Some(found) = self.assist.as_mut().and_then(|state| state.found.as_mut()) {
            found.kind = kind;
        }
    }

    /// Places a name-shaped assist at the current token. `qualifier` holds the
    /// segments already read.
    ///
    /// In package, import and type names the segments after the cursor are
    /// swallowed into the replaced span. In expressions they are left to the
    /// postfix parser, so `x.y|.z.w()` keeps its field access and call.
    fn name_assist(
        &mut self,
        qualifier: Vec<Ident>,
        kind: AssistKind,
        tail: NameTail,
    ) -> Box<AssistNode> {
        let token = self.current_range();
        let start = qualifier.first().map_or(token.start, |ident| ident.range.start);
        let partial = self.assist_partial();
        self.bump();
        let mut end = token.end.max(self.assist_caret());
        while tail == NameTail::Swallow
            && self.at(SyntaxKind::Dot)
            && self.nth(1) == SyntaxKind::Identifier
        {
            self.bump();
            self.bump();
            end = end.max(self.prev_end());
        }
        self.place_assist(
            kind,
            AssistTarget::Name { qualifier, partial },
            TextRange { start, end },
        )
    }

    /// Consumes the assist token as the name of a declaration of type `ty`.
    fn decl_assist(&mut self, kind: AssistKind, ty: TypeRef) -> Box<AssistNode> {
        let range = self.current_range();
        let name = self.assist_partial();
        self.bump();
        self.place_assist(kind, AssistTarget::Decl { ty, name }, range)
    }

    /// Consumes the assist token as a bare word (keyword, label).
    fn assist_word(&mut self, kind: AssistKind) -> Box<AssistNode> {
        let range = self.current_range();
        let word = self.assist_partial();
        self.bump();
        self.place_assist(kind, AssistTarget::Word(word), range)
    }

    fn has_assist(&self) -> bool {
        self.assist.is_some()
    }

    fn assist_found(&self) -> bool {
        self.assist
            .as_ref()
            .is_some_and(|state| state.found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseMode;

    #[test]
    fn limit_reads_as_end_of_input() {
        let text = "a b c";
        let tokens = significant_tokens(text, JavaLanguageLevel::default());
        let mut parser = Parser::new(text, &tokens, ParseOptions::default());
        parser.limit = 2;
        assert_eq!(parser.nth(1), SyntaxKind::Identifier);
        assert_eq!(parser.nth(2), SyntaxKind::Eof);
        parser.bump();
        parser.bump();
        parser.bump();
        assert_eq!(parser.pos, 2);
        assert_eq!(parser.current_range(), TextRange::empty(4));
    }

    #[test]
    fn errors_at_same_token_are_reported_once() {
        let text = "x";
        let tokens = significant_tokens(text, JavaLanguageLevel::default());
        let mut parser = Parser::new(
            text,
            &tokens,
            ParseOptions {
                mode: ParseMode::Diet,
                ..ParseOptions::default()
            },
        );
        parser.error_here("first");
        parser.error_here("second");
        assert_eq!(parser.take_errors().len(), 1);
    }
}
