//! Recovery controller state: the open-construct frame stack, the structural
//! anchors that close frames, and the body-extent scanner diet mode uses to
//! skip statement bodies.
//!
//! Every closing decision goes through [`FrameKind::claims`]. The recursive
//! descent parser consults it through [`FrameStack::owner`] at each loop
//! iteration, and [`scan_body_extent`] replays the same table over raw tokens,
//! which keeps the extent a diet parse records identical to the block a full
//! parse builds.

use crate::lexer::Token;
use crate::syntax_kind::SyntaxKind;

/// An open construct the parser is inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Unit,
    /// Class, interface, enum, annotation or anonymous class body.
    TypeBody,
    /// Method bodies, nested blocks, lambda bodies, switch blocks.
    Block,
    /// `{ ... }` array initializer, including annotation element arrays.
    ArrayInit,
    /// Any parenthesized list or expression.
    Parens,
    /// `for ( ... )`, which also owns its `;` separators.
    ForHeader,
    Brackets,
}

/// A token that can end constructs other than the one currently parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    RBrace,
    RParen,
    RBracket,
    Semicolon,
    /// A token sequence that can only start a class member.
    MemberBoundary,
    /// `package` or `import`.
    UnitBoundary,
    Eof,
}

impl FrameKind {
    /// The per-frame recovery table: which anchors this frame consumes or stops at.
    pub(crate) fn claims(self, anchor: Anchor) -> bool {
        use Anchor::*;
        match self {
            FrameKind::Unit => matches!(anchor, Semicolon | UnitBoundary | Eof),
            FrameKind::TypeBody => matches!(anchor, RBrace | Semicolon | MemberBoundary),
            FrameKind::Block => matches!(anchor, RBrace | Semicolon),
            FrameKind::ArrayInit => anchor == RBrace,
            FrameKind::Parens => anchor == RParen,
            FrameKind::ForHeader => matches!(anchor, RParen | Semicolon),
            FrameKind::Brackets => anchor == RBracket,
        }
    }

    /// Frames an anchor may not look past: a stray `)` inside a block belongs to
    /// nobody instead of closing an argument list around the block.
    fn stops(self, anchor: Anchor) -> bool {
        match self {
            FrameKind::TypeBody | FrameKind::Block => {
                matches!(anchor, Anchor::RParen | Anchor::RBracket | Anchor::Semicolon)
            }
            FrameKind::ArrayInit => matches!(anchor, Anchor::RParen | Anchor::RBracket),
            _ => false,
        }
    }

    fn is_brace(self) -> bool {
        matches!(
            self,
            FrameKind::TypeBody | FrameKind::Block | FrameKind::ArrayInit
        )
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FrameStack {
    frames: Vec<FrameKind>,
}

impl FrameStack {
    pub(crate) fn push(&mut self, kind: FrameKind) -> usize {
        self.frames.push(kind);
        self.frames.len() - 1
    }

    /// Drops the frame at `depth` and everything above it.
    pub(crate) fn pop_to(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    pub(crate) fn top(&self) -> Option<FrameKind> {
        self.frames.last().copied()
    }

    /// Index of the innermost frame that claims `anchor`.
    pub(crate) fn owner(&self, anchor: Anchor) -> Option<usize> {
        for (index, frame) in self.frames.iter().enumerate().rev() {
            if frame.claims(anchor) {
                return Some(index);
            }
            if frame.stops(anchor) {
                return None;
            }
        }
        None
    }
}

pub(crate) fn kind_at(tokens: &[Token], idx: usize) -> SyntaxKind {
    tokens.get(idx).map_or(SyntaxKind::Eof, |token| token.kind)
}

/// Classifies `tokens[idx]` as an anchor. `tokens` must already be cut at the
/// parse limit so that anything past it reads as end of input.
pub(crate) fn anchor_at(tokens: &[Token], idx: usize) -> Option<Anchor> {
    match kind_at(tokens, idx) {
        SyntaxKind::RBrace => Some(Anchor::RBrace),
        SyntaxKind::RParen => Some(Anchor::RParen),
        SyntaxKind::RBracket => Some(Anchor::RBracket),
        SyntaxKind::Semicolon => Some(Anchor::Semicolon),
        SyntaxKind::Eof => Some(Anchor::Eof),
        SyntaxKind::PackageKw | SyntaxKind::ImportKw => Some(Anchor::UnitBoundary),
        _ if member_boundary_at(tokens, idx) => Some(Anchor::MemberBoundary),
        _ => None,
    }
}

/// Whether a class member, and never a statement, starts at `idx`.
///
/// Only statement-start positions qualify (right after `;`, `{` or `}`). A
/// member-only modifier such as `public` or `static` qualifies outright;
/// otherwise annotations and other modifiers are skipped and a method header
/// shape (`void m(`, `Type m(`, `<T> Type m(`) must follow.
pub(crate) fn member_boundary_at(tokens: &[Token], idx: usize) -> bool {
    if idx > 0
        && !matches!(
            kind_at(tokens, idx - 1),
            SyntaxKind::Semicolon | SyntaxKind::LBrace | SyntaxKind::RBrace
        )
    {
        return false;
    }

    let mut i = idx;
    loop {
        let kind = kind_at(tokens, i);
        if kind == SyntaxKind::At && kind_at(tokens, i + 1) == SyntaxKind::Identifier {
            i = skip_annotation(tokens, i);
        } else if kind.is_member_only_modifier() {
            return true;
        } else if kind.is_modifier_keyword() {
            i += 1;
        } else {
            break;
        }
    }
    method_header_at(tokens, i)
}

/// `[<T>] (void | Type) name (` starting at `idx`.
pub(crate) fn method_header_at(tokens: &[Token], idx: usize) -> bool {
    let mut i = idx;
    if kind_at(tokens, i) == SyntaxKind::Less {
        match skip_angles(tokens, i) {
            Some(next) => i = next,
            None => return false,
        }
    }
    match kind_at(tokens, i) {
        SyntaxKind::VoidKw => i += 1,
        kind if kind.is_primitive_type() => i = skip_dims(tokens, i + 1),
        SyntaxKind::Identifier => match skip_type_name(tokens, i) {
            Some(next) => i = next,
            None => return false,
        },
        _ => return false,
    }
    kind_at(tokens, i) == SyntaxKind::Identifier && kind_at(tokens, i + 1) == SyntaxKind::LParen
}

/// Skips `Name(<...>)?(.Name(<...>)?)*([])*`, returning the index after it.
pub(crate) fn skip_type_name(tokens: &[Token], idx: usize) -> Option<usize> {
    let mut i = idx;
    loop {
        if kind_at(tokens, i) != SyntaxKind::Identifier {
            return None;
        }
        i += 1;
        if kind_at(tokens, i) == SyntaxKind::Less {
            i = skip_angles(tokens, i)?;
        }
        if kind_at(tokens, i) == SyntaxKind::Dot && kind_at(tokens, i + 1) == SyntaxKind::Identifier
        {
            i += 1;
            continue;
        }
        return Some(skip_dims(tokens, i));
    }
}

pub(crate) fn skip_dims(tokens: &[Token], idx: usize) -> usize {
    let mut i = idx;
    while kind_at(tokens, i) == SyntaxKind::LBracket && kind_at(tokens, i + 1) == SyntaxKind::RBracket
    {
        i += 2;
    }
    i
}

/// Skips a balanced `<...>` holding only tokens that can appear in type
/// arguments or type parameters.
pub(crate) fn skip_angles(tokens: &[Token], idx: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = idx;
    loop {
        match kind_at(tokens, i) {
            SyntaxKind::Less => depth += 1,
            SyntaxKind::Greater => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            SyntaxKind::Identifier
            | SyntaxKind::Dot
            | SyntaxKind::Comma
            | SyntaxKind::Question
            | SyntaxKind::ExtendsKw
            | SyntaxKind::SuperKw
            | SyntaxKind::Amp
            | SyntaxKind::LBracket
            | SyntaxKind::RBracket => {}
            kind if kind.is_primitive_type() => {}
            _ => return None,
        }
        i += 1;
    }
}

/// Skips `@Name(.Name)*` and a balanced argument list, if any.
pub(crate) fn skip_annotation(tokens: &[Token], idx: usize) -> usize {
    let mut i = idx + 1;
    while kind_at(tokens, i) == SyntaxKind::Identifier {
        i += 1;
        if kind_at(tokens, i) == SyntaxKind::Dot {
            i += 1;
        } else {
            break;
        }
    }
    if kind_at(tokens, i) == SyntaxKind::LParen {
        let mut depth = 0usize;
        loop {
            match kind_at(tokens, i) {
                SyntaxKind::LParen => depth += 1,
                SyntaxKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return i + 1;
                    }
                }
                SyntaxKind::Eof | SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::Semicolon => {
                    return i
                }
                _ => {}
            }
            i += 1;
        }
    }
    i
}

/// Whether the `(` at `idx` opens the argument list of `new Type(...)`.
pub(crate) fn is_allocation_paren(tokens: &[Token], idx: usize) -> bool {
    let mut j = idx;
    while j > 0 {
        j -= 1;
        match tokens[j].kind {
            SyntaxKind::Identifier | SyntaxKind::Dot => {}
            SyntaxKind::NewKw => return true,
            SyntaxKind::Greater => {
                let mut depth = 1usize;
                while depth > 0 {
                    if j == 0 {
                        return false;
                    }
                    j -= 1;
                    match tokens[j].kind {
                        SyntaxKind::Greater => depth += 1,
                        SyntaxKind::Less => depth -= 1,
                        _ => {}
                    }
                }
            }
            _ => return false,
        }
    }
    false
}

/// Where an opaque body ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BodyExtent {
    /// Index of the closing `}` when `closed`, otherwise of the first token the
    /// body does not own.
    pub end: usize,
    pub closed: bool,
}

/// Finds the extent of the body opened by the `{` at `lbrace` without parsing
/// statements, applying the same frame table a statement parse would.
pub(crate) fn scan_body_extent(tokens: &[Token], lbrace: usize) -> BodyExtent {
    let mut frames = FrameStack::default();
    // Parallel to `frames`: whether a `Parens` frame is an allocation's arguments.
    let mut allocation = vec![false];
    frames.push(FrameKind::Block);
    let mut allocation_close: Option<usize> = None;
    // Stack height at which a local `class`/`interface`/`enum` header is open;
    // its `{` opens a type body, whose members must not end the outer body.
    let mut type_header: Option<usize> = None;

    let mut i = lbrace + 1;
    loop {
        if let Some(anchor) = anchor_at(tokens, i) {
            let Some(owner) = frames.owner(anchor) else {
                if matches!(
                    anchor,
                    Anchor::MemberBoundary | Anchor::UnitBoundary | Anchor::Eof
                ) {
                    tracing::trace!(target: "mend.recovery", ?anchor, end = i, "body left unterminated");
                    return BodyExtent {
                        end: i,
                        closed: false,
                    };
                }
                // Stray closer nobody owns.
                i += 1;
                continue;
            };
            frames.pop_to(owner + 1);
            allocation.truncate(owner + 1);
            if anchor == Anchor::Semicolon {
                type_header = None;
            }
            let closes_owner = match anchor {
                Anchor::RBrace => true,
                Anchor::RParen | Anchor::RBracket => true,
                _ => false,
            };
            if closes_owner {
                if owner == 0 {
                    return BodyExtent {
                        end: i,
                        closed: true,
                    };
                }
                if anchor == Anchor::RParen && allocation[owner] {
                    allocation_close = Some(i);
                }
                frames.pop_to(owner);
                allocation.truncate(owner);
            }
            i += 1;
            continue;
        }

        match tokens[i].kind {
            SyntaxKind::ClassKw | SyntaxKind::InterfaceKw | SyntaxKind::EnumKw
                if i == 0 || tokens[i - 1].kind != SyntaxKind::Dot =>
            {
                type_header = Some(allocation.len());
            }
            SyntaxKind::LParen => {
                let for_header = i > 0 && tokens[i - 1].kind == SyntaxKind::ForKw;
                frames.push(if for_header {
                    FrameKind::ForHeader
                } else {
                    FrameKind::Parens
                });
                allocation.push(is_allocation_paren(tokens, i));
            }
            SyntaxKind::LBracket => {
                frames.push(FrameKind::Brackets);
                allocation.push(false);
            }
            SyntaxKind::LBrace => {
                let prev = tokens[i - 1].kind;
                let kind = if type_header == Some(allocation.len()) {
                    type_header = None;
                    FrameKind::TypeBody
                } else if prev == SyntaxKind::RParen && allocation_close == Some(i - 1) {
                    FrameKind::TypeBody
                } else if matches!(
                    prev,
                    SyntaxKind::RBracket | SyntaxKind::Eq | SyntaxKind::LParen
                ) || (matches!(prev, SyntaxKind::Comma | SyntaxKind::LBrace)
                    && frames.top() == Some(FrameKind::ArrayInit))
                {
                    FrameKind::ArrayInit
                } else {
                    FrameKind::Block
                };
                debug_assert!(kind.is_brace());
                frames.push(kind);
                allocation.push(false);
            }
            _ => {}
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lex, JavaLanguageLevel};

    fn significant(text: &str) -> Vec<Token> {
        lex(text, JavaLanguageLevel::default())
            .into_iter()
            .filter(|token| !token.kind.is_trivia() && token.kind != SyntaxKind::Eof)
            .collect()
    }

    fn extent_text(text: &str) -> (String, bool) {
        let tokens = significant(text);
        let lbrace = tokens
            .iter()
            .position(|token| token.kind == SyntaxKind::LBrace)
            .unwrap();
        let extent = scan_body_extent(&tokens, lbrace);
        let end = tokens
            .get(extent.end)
            .map_or(text.len(), |token| token.range.start as usize);
        (text[tokens[lbrace].range.start as usize..end].to_string(), extent.closed)
    }

    #[test]
    fn balanced_body_is_closed_at_matching_brace() {
        let (body, closed) = extent_text("{ if (a) { b(); } c(); } int x;");
        assert_eq!(body, "{ if (a) { b(); } c(); ");
        assert!(closed);
    }

    #[test]
    fn member_modifier_ends_unterminated_body() {
        let (body, closed) = extent_text("{ System.out.println(); public int h; }");
        assert_eq!(body, "{ System.out.println(); ");
        assert!(!closed);
    }

    #[test]
    fn method_header_ends_unterminated_body() {
        let (body, closed) = extent_text("{ foo(); void bar() {} }");
        assert_eq!(body, "{ foo(); ");
        assert!(!closed);
    }

    #[test]
    fn anonymous_class_members_do_not_end_body() {
        let (body, closed) =
            extent_text("{ r = new Runnable() { public void run() {} }; } int y;");
        assert_eq!(body, "{ r = new Runnable() { public void run() {} }; ");
        assert!(closed);
    }

    #[test]
    fn closed_local_class_keeps_body_open() {
        let (body, closed) = extent_text(
            "{ a(); class L { void baz() {} } public int h; void bar() {} }",
        );
        assert_eq!(body, "{ a(); class L { void baz() {} } ");
        assert!(!closed);

        let (body, closed) = extent_text("{ Object c = String.class; if (c != null) { } } int y;");
        assert_eq!(body, "{ Object c = String.class; if (c != null) { } ");
        assert!(closed);
    }

    #[test]
    fn local_declarations_are_not_boundaries() {
        let tokens = significant("{ final int x = 1; synchronized (this) {} }");
        assert!(!member_boundary_at(&tokens, 1));
        let sync = tokens
            .iter()
            .position(|token| token.kind == SyntaxKind::SynchronizedKw)
            .unwrap();
        assert!(!member_boundary_at(&tokens, sync));
    }

    #[test]
    fn stray_paren_inside_block_is_ignored() {
        let (body, closed) = extent_text("{ a); } int y;");
        assert_eq!(body, "{ a); ");
        assert!(closed);
    }

    #[test]
    fn frame_table_unwinds_to_owner() {
        let mut frames = FrameStack::default();
        frames.push(FrameKind::Unit);
        frames.push(FrameKind::TypeBody);
        frames.push(FrameKind::Block);
        frames.push(FrameKind::Parens);
        assert_eq!(frames.owner(Anchor::Semicolon), Some(2));
        assert_eq!(frames.owner(Anchor::MemberBoundary), Some(1));
        assert_eq!(frames.owner(Anchor::Eof), Some(0));
        assert_eq!(frames.owner(Anchor::RParen), Some(3));
        frames.pop_to(3);
        assert_eq!(frames.owner(Anchor::RParen), None);
    }
}
