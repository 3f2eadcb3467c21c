//! Blocks and statements.

use crate::ast::{
    AssistKind, AssistTarget, Block, CatchClause, ConstructorCall, DeclName, Expr, Ident,
    LocalVar, Modifiers, Nesting, Stmt, SwitchGroup, TypeRef,
};
use crate::language_level::JavaFeature;
use crate::syntax_kind::SyntaxKind;
use crate::TextRange;

use super::decls::ModifierContext;
use super::recovery::{kind_at, skip_dims, skip_type_name, FrameKind};
use super::Parser;

impl Parser<'_> {
    pub(super) fn parse_block(&mut self) -> Block {
        let start = self.current_range().start;
        if !self.eat(SyntaxKind::LBrace) {
            self.error_here("expected `{`");
            return Block::empty(TextRange::empty(self.prev_end()));
        }
        let depth = self.frames.push(FrameKind::Block);
        let stmts = self.parse_block_statements(depth);
        self.frames.pop_to(depth);
        Block {
            stmts,
            range: TextRange {
                start,
                end: self.prev_end(),
            },
        }
    }

    fn parse_block_statements(&mut self, depth: usize) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            if self.eat(SyntaxKind::RBrace) {
                break;
            }
            if self.unwinds(depth) {
                self.error_here("expected `}`");
                break;
            }
            let before = self.pos;
            self.parse_block_statement(&mut stmts);
            if self.pos == before {
                self.error_here("unexpected token in block");
                self.bump();
            }
        }
        stmts
    }

    /// Parses one block statement into `stmts`. Local variable declarations
    /// push one statement per declarator.
    fn parse_block_statement(&mut self, stmts: &mut Vec<Stmt>) {
        if self.at_assist() && self.keyword_follows(stmts) {
            let node = self.assist_word(AssistKind::Keyword);
            self.eat(SyntaxKind::Semicolon);
            stmts.push(Stmt::Expr(Expr::Assist(node)));
            return;
        }

        match self.current() {
            SyntaxKind::ClassKw | SyntaxKind::InterfaceKw | SyntaxKind::EnumKw => {
                let start = self.current_range().start;
                let decl = self.parse_type_decl(start, Modifiers::empty(), Vec::new(), Nesting::Local);
                stmts.push(Stmt::LocalType(Box::new(decl)));
            }
            SyntaxKind::FinalKw | SyntaxKind::AbstractKw | SyntaxKind::StrictfpKw => {
                self.parse_local_declaration(stmts);
            }
            SyntaxKind::At if self.nth(1) != SyntaxKind::InterfaceKw => {
                self.parse_local_declaration(stmts);
            }
            _ if self.at_local_var_decl() => self.parse_local_declaration(stmts),
            _ => {
                let stmt = self.parse_statement();
                stmts.push(stmt);
            }
        }
    }

    /// `try {} catch (E e) {} fin|` and `if (c) {} el|`: a word after a
    /// statement that could still take a keyword continuation.
    fn keyword_follows(&self, stmts: &[Stmt]) -> bool {
        let open = match stmts.last() {
            Some(Stmt::Try { finally, .. }) => finally.is_none(),
            Some(Stmt::If { else_branch, .. }) => else_branch.is_none(),
            _ => false,
        };
        open && matches!(
            self.nth(1),
            SyntaxKind::Semicolon | SyntaxKind::RBrace | SyntaxKind::Eof
        )
    }

    /// `Type name` at the current position, possibly generic, qualified or
    /// an array.
    pub(super) fn at_local_var_decl(&self) -> bool {
        let tokens = &self.tokens[..self.limit];
        let kind = self.current();
        let after_type = if kind.is_primitive_type() {
            skip_dims(tokens, self.pos + 1)
        } else if kind == SyntaxKind::Identifier {
            match skip_type_name(tokens, self.pos) {
                Some(next) => next,
                None => return false,
            }
        } else {
            return false;
        };
        kind_at(tokens, after_type) == SyntaxKind::Identifier
    }

    fn parse_local_declaration(&mut self, stmts: &mut Vec<Stmt>) {
        let start = self.current_range().start;
        let (modifiers, annotations) = self.parse_modifiers(ModifierContext::Local);
        if self.at_type_keyword() {
            let decl = self.parse_type_decl(start, modifiers, annotations, Nesting::Local);
            stmts.push(Stmt::LocalType(Box::new(decl)));
            return;
        }
        if !self.at_type_start() {
            self.error_here("expected local variable declaration");
            return;
        }
        let ty = self.parse_type();
        let name = self.parse_local_name(&ty);
        stmts.extend(self.parse_declarators(modifiers, annotations, ty, name));
        self.expect(SyntaxKind::Semicolon, "expected `;` after local variable declaration");
    }

    fn parse_local_name(&mut self, ty: &TypeRef) -> DeclName {
        if self.at_assist() {
            DeclName::Assist(self.decl_assist(AssistKind::LocalName, ty.clone()))
        } else if self.at(SyntaxKind::Identifier) {
            DeclName::Ident(self.bump_ident())
        } else {
            self.error_here("expected variable name");
            DeclName::Ident(Ident::missing(self.prev_end()))
        }
    }

    /// The remaining declarators after the first name has been read.
    fn parse_declarators(
        &mut self,
        modifiers: Modifiers,
        annotations: Vec<crate::ast::Annotation>,
        ty: TypeRef,
        first: DeclName,
    ) -> Vec<Stmt> {
        let mut out = Vec::new();
        let mut name = first;
        loop {
            let dims = self.parse_dims();
            let init = if self.eat(SyntaxKind::Eq) {
                Some(self.parse_variable_init())
            } else {
                None
            };
            out.push(Stmt::LocalVar(LocalVar {
                modifiers,
                annotations: annotations.clone(),
                ty: ty.clone().array_of(dims),
                name,
                init,
            }));
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
            name = self.parse_local_name(&ty);
        }
        out
    }

    /// A statement in a position that takes exactly one (`if`, loops,
    /// labels). A declaration there yields a block of its declarators.
    fn parse_embedded_statement(&mut self) -> Stmt {
        if self.at_claimed_anchor() && !self.at(SyntaxKind::Semicolon) {
            self.error_here("expected statement");
            return Stmt::Empty;
        }
        let before = self.pos;
        let mut stmts = Vec::new();
        self.parse_block_statement(&mut stmts);
        if self.pos == before {
            self.error_here("expected statement");
            self.bump();
        }
        match stmts.len() {
            0 => Stmt::Empty,
            1 => stmts.pop().unwrap_or(Stmt::Empty),
            _ => Stmt::Block(Block {
                stmts,
                range: TextRange::empty(self.prev_end()),
            }),
        }
    }

    fn parse_statement(&mut self) -> Stmt {
        if self.at(SyntaxKind::Identifier)
            && self.nth(1) == SyntaxKind::Colon
            && !self.at_assist()
        {
            let label = self.bump_ident();
            self.bump();
            let body = self.parse_embedded_statement();
            return Stmt::Labeled {
                label,
                body: Box::new(body),
            };
        }

        match self.current() {
            SyntaxKind::LBrace => Stmt::Block(self.parse_block()),
            SyntaxKind::Semicolon => {
                self.bump();
                Stmt::Empty
            }
            SyntaxKind::IfKw => {
                self.bump();
                let cond = self.parse_condition("if");
                let then_branch = self.parse_embedded_statement();
                let else_branch = if self.eat(SyntaxKind::ElseKw) {
                    Some(Box::new(self.parse_embedded_statement()))
                } else {
                    None
                };
                Stmt::If {
                    cond,
                    then_branch: Box::new(then_branch),
                    else_branch,
                }
            }
            SyntaxKind::WhileKw => {
                self.bump();
                let cond = self.parse_condition("while");
                let body = self.parse_embedded_statement();
                Stmt::While {
                    cond,
                    body: Box::new(body),
                }
            }
            SyntaxKind::DoKw => {
                self.bump();
                let body = self.parse_embedded_statement();
                let cond = if self.expect(SyntaxKind::WhileKw, "expected `while` after `do` body") {
                    self.parse_condition("while")
                } else {
                    Expr::Missing
                };
                self.expect(SyntaxKind::Semicolon, "expected `;` after do-while");
                Stmt::DoWhile {
                    body: Box::new(body),
                    cond,
                }
            }
            SyntaxKind::ForKw => self.parse_for_statement(),
            SyntaxKind::SwitchKw => self.parse_switch_statement(),
            SyntaxKind::TryKw => self.parse_try_statement(),
            SyntaxKind::SynchronizedKw => {
                self.bump();
                let lock = self.parse_condition("synchronized");
                let body = self.parse_block();
                Stmt::Synchronized { lock, body }
            }
            SyntaxKind::AssertKw => {
                if !self.supports(JavaFeature::Assertions) {
                    self.feature_error(JavaFeature::Assertions, self.current_range());
                }
                self.bump();
                let cond = self.parse_expression();
                let message = if self.eat(SyntaxKind::Colon) {
                    Some(self.parse_expression())
                } else {
                    None
                };
                self.expect(SyntaxKind::Semicolon, "expected `;` after assert");
                Stmt::Assert { cond, message }
            }
            SyntaxKind::ReturnKw => {
                self.bump();
                let value = if self.at(SyntaxKind::Semicolon) || self.at_claimed_anchor() {
                    None
                } else {
                    Some(self.parse_expression())
                };
                self.expect(SyntaxKind::Semicolon, "expected `;` after return");
                Stmt::Return(value)
            }
            SyntaxKind::ThrowKw => {
                self.bump();
                let value = self.parse_expression();
                self.expect(SyntaxKind::Semicolon, "expected `;` after throw");
                Stmt::Throw(value)
            }
            SyntaxKind::BreakKw | SyntaxKind::ContinueKw => {
                let is_break = self.at(SyntaxKind::BreakKw);
                self.bump();
                let label = if self.at_assist() {
                    Some(DeclName::Assist(self.assist_word(AssistKind::Label)))
                } else if self.at(SyntaxKind::Identifier) {
                    Some(DeclName::Ident(self.bump_ident()))
                } else {
                    None
                };
                if is_break {
                    self.expect(SyntaxKind::Semicolon, "expected `;` after break");
                    Stmt::Break(label)
                } else {
                    self.expect(SyntaxKind::Semicolon, "expected `;` after continue");
                    Stmt::Continue(label)
                }
            }
            SyntaxKind::ThisKw | SyntaxKind::SuperKw if self.nth(1) == SyntaxKind::LParen => {
                self.parse_constructor_call(None)
            }
            SyntaxKind::Identifier if self.at_qualified_super_call() => {
                let qualifier = self.parse_qualifier_before_super();
                self.parse_constructor_call(Some(Box::new(qualifier)))
            }
            _ => {
                let expr = self.parse_expression();
                self.expect(SyntaxKind::Semicolon, "expected `;` after expression");
                Stmt::Expr(expr)
            }
        }
    }

    /// `( expr )` after `if`, `while`, `switch` and `synchronized`.
    fn parse_condition(&mut self, keyword: &str) -> Expr {
        self.expect(SyntaxKind::LParen, &format!("expected `(` after {keyword}"));
        let depth = self.frames.push(FrameKind::Parens);
        let cond = self.parse_expression();
        self.finish_parens(depth);
        cond
    }

    pub(super) fn finish_parens(&mut self, depth: usize) {
        self.finish_group(depth, SyntaxKind::RParen, "expected `)`");
    }

    /// Consumes the `closer` owned by the frame at `depth`, skipping junk
    /// before it, and pops the frame. Stops early when an enclosing frame
    /// owns the current token or a block starts.
    pub(super) fn finish_group(&mut self, depth: usize, closer: SyntaxKind, message: &str) {
        loop {
            if self.eat(closer) {
                break;
            }
            self.error_here(message);
            if self.unwinds(depth) || self.at(SyntaxKind::LBrace) {
                break;
            }
            self.bump();
        }
        self.frames.pop_to(depth);
    }

    fn parse_for_statement(&mut self) -> Stmt {
        self.bump();
        self.expect(SyntaxKind::LParen, "expected `(` after for");
        let depth = self.frames.push(FrameKind::ForHeader);

        let mut init = Vec::new();
        let declares = self.at(SyntaxKind::FinalKw)
            || (self.at(SyntaxKind::At) && self.nth(1) != SyntaxKind::InterfaceKw)
            || self.at_local_var_decl();
        if declares {
            let (modifiers, annotations) = self.parse_modifiers(ModifierContext::Local);
            let ty = self.parse_type();
            let name = self.parse_local_name(&ty);
            if self.at(SyntaxKind::Colon) {
                if !self.supports(JavaFeature::EnhancedFor) {
                    self.feature_error(JavaFeature::EnhancedFor, self.current_range());
                }
                self.bump();
                let iterable = self.parse_expression();
                self.finish_parens(depth);
                let body = self.parse_embedded_statement();
                return Stmt::ForEach {
                    var: LocalVar {
                        modifiers,
                        annotations,
                        ty,
                        name,
                        init: None,
                    },
                    iterable,
                    body: Box::new(body),
                };
            }
            init = self.parse_declarators(modifiers, annotations, ty, name);
        } else if !self.at(SyntaxKind::Semicolon) {
            init = self
                .parse_expression_list()
                .into_iter()
                .map(Stmt::Expr)
                .collect();
        }

        self.expect(SyntaxKind::Semicolon, "expected `;` in for header");
        let cond = if self.at(SyntaxKind::Semicolon) || self.at(SyntaxKind::RParen) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.expect(SyntaxKind::Semicolon, "expected `;` in for header");
        let update = if self.at(SyntaxKind::RParen) || self.unwinds(depth) {
            Vec::new()
        } else {
            self.parse_expression_list()
        };
        self.finish_parens(depth);

        let body = self.parse_embedded_statement();
        Stmt::For {
            init,
            cond,
            update,
            body: Box::new(body),
        }
    }

    fn parse_expression_list(&mut self) -> Vec<Expr> {
        let mut exprs = vec![self.parse_expression()];
        while self.eat(SyntaxKind::Comma) {
            exprs.push(self.parse_expression());
        }
        exprs
    }

    fn parse_switch_statement(&mut self) -> Stmt {
        self.bump();
        let selector = self.parse_condition("switch");
        let mut groups: Vec<SwitchGroup> = Vec::new();
        if !self.eat(SyntaxKind::LBrace) {
            self.error_here("expected `{` after switch");
            return Stmt::Switch { selector, groups };
        }

        let depth = self.frames.push(FrameKind::Block);
        loop {
            if self.eat(SyntaxKind::RBrace) {
                break;
            }
            if self.unwinds(depth) {
                self.error_here("expected `}` after switch block");
                break;
            }
            if self.at(SyntaxKind::CaseKw) || self.at(SyntaxKind::DefaultKw) {
                let labels = self.parse_switch_labels();
                groups.push(SwitchGroup {
                    labels,
                    stmts: Vec::new(),
                });
                continue;
            }
            if groups.is_empty() {
                self.error_here("expected `case` or `default`");
                groups.push(SwitchGroup {
                    labels: Vec::new(),
                    stmts: Vec::new(),
                });
            }
            let before = self.pos;
            if let Some(group) = groups.last_mut() {
                let mut stmts = std::mem::take(&mut group.stmts);
                self.parse_block_statement(&mut stmts);
                group.stmts = stmts;
            }
            if self.pos == before {
                self.error_here("unexpected token in switch block");
                self.bump();
            }
        }
        self.frames.pop_to(depth);
        Stmt::Switch { selector, groups }
    }

    /// Consecutive `case X:` / `default:` labels of one group.
    fn parse_switch_labels(&mut self) -> Vec<Option<Expr>> {
        let mut labels = Vec::new();
        loop {
            if self.eat(SyntaxKind::CaseKw) {
                let value = if self.at(SyntaxKind::Colon) {
                    self.error_here("expected case label expression");
                    Expr::Missing
                } else {
                    self.parse_expression()
                };
                labels.push(Some(value));
            } else if self.eat(SyntaxKind::DefaultKw) {
                labels.push(None);
            } else {
                return labels;
            }
            self.expect(SyntaxKind::Colon, "expected `:` after switch label");
        }
    }

    fn parse_try_statement(&mut self) -> Stmt {
        self.bump();
        let mut resources = Vec::new();
        if self.at(SyntaxKind::LParen) {
            if self.supports(JavaFeature::TryWithResources) {
                resources = self.parse_resources();
            } else {
                self.feature_error(JavaFeature::TryWithResources, self.current_range());
                self.skip_balanced_parens();
            }
        }
        let block = self.parse_block();

        let mut catches = Vec::new();
        while self.at(SyntaxKind::CatchKw) {
            catches.push(self.parse_catch_clause());
        }
        let finally = if self.eat(SyntaxKind::FinallyKw) {
            Some(self.parse_block())
        } else {
            None
        };
        if catches.is_empty() && finally.is_none() && resources.is_empty() {
            self.error_here("expected `catch` or `finally`");
        }
        Stmt::Try {
            resources,
            block,
            catches,
            finally,
        }
    }

    fn parse_resources(&mut self) -> Vec<LocalVar> {
        self.bump();
        let depth = self.frames.push(FrameKind::Parens);
        let mut resources = Vec::new();
        loop {
            if self.at(SyntaxKind::RParen) {
                break;
            }
            // `;` separates resources; no enclosing frame gets it here.
            if self.eat(SyntaxKind::Semicolon) {
                continue;
            }
            if self.unwinds(depth) || (!self.at_type_start() && !self.at(SyntaxKind::FinalKw)) {
                break;
            }
            let (modifiers, annotations) = self.parse_modifiers(ModifierContext::Local);
            let ty = self.parse_type();
            let name = self.parse_local_name(&ty);
            let init = if self.expect(SyntaxKind::Eq, "expected `=` in resource") {
                Some(self.parse_expression())
            } else {
                None
            };
            resources.push(LocalVar {
                modifiers,
                annotations,
                ty,
                name,
                init,
            });
            if !self.at(SyntaxKind::Semicolon) {
                break;
            }
        }
        self.finish_parens(depth);
        resources
    }

    fn skip_balanced_parens(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                SyntaxKind::LParen => depth += 1,
                SyntaxKind::RParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                SyntaxKind::Eof | SyntaxKind::LBrace | SyntaxKind::RBrace => return,
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_catch_clause(&mut self) -> CatchClause {
        self.bump();
        self.expect(SyntaxKind::LParen, "expected `(` after catch");
        let depth = self.frames.push(FrameKind::Parens);
        let (modifiers, _) = self.parse_modifiers(ModifierContext::Parameter);

        let mut types = vec![self.parse_type_in(AssistKind::Exception)];
        while self.at(SyntaxKind::Pipe) {
            if !self.supports(JavaFeature::MultiCatch) {
                self.feature_error(JavaFeature::MultiCatch, self.current_range());
                self.bump();
                let _ = self.parse_type();
                continue;
            }
            self.bump();
            types.push(self.parse_type_in(AssistKind::Exception));
        }
        if types.len() > 1 {
            for ty in &mut types {
                if let TypeRef::Assist(node) = ty {
                    self.retag_assist(node, AssistKind::MultiCatchException);
                }
            }
        }

        let name = if self.at_assist() {
            let ty = types.first().cloned().unwrap_or(TypeRef::Missing);
            DeclName::Assist(self.decl_assist(AssistKind::ArgumentName, ty))
        } else {
            DeclName::Ident(self.expect_ident("catch parameter name"))
        };
        self.finish_parens(depth);
        let body = self.parse_block();
        CatchClause {
            modifiers,
            types,
            name,
            body,
        }
    }

    /// `a.b.super(` ahead: a qualified superclass constructor call.
    fn at_qualified_super_call(&self) -> bool {
        let tokens = &self.tokens[..self.limit];
        let mut i = self.pos;
        while kind_at(tokens, i) == SyntaxKind::Identifier && kind_at(tokens, i + 1) == SyntaxKind::Dot
        {
            i += 2;
            if kind_at(tokens, i) == SyntaxKind::SuperKw {
                return kind_at(tokens, i + 1) == SyntaxKind::LParen;
            }
        }
        false
    }

    /// Reads `a.b` and the `.` before `super`.
    fn parse_qualifier_before_super(&mut self) -> Expr {
        let mut segments = vec![self.bump_ident()];
        while self.eat(SyntaxKind::Dot) {
            if self.at(SyntaxKind::SuperKw) {
                break;
            }
            segments.push(self.bump_ident());
        }
        Expr::Name(crate::ast::QualifiedName { segments })
    }

    /// `this(...)`, `super(...)` or `qualifier.super(...)` at the keyword.
    fn parse_constructor_call(&mut self, qualifier: Option<Box<Expr>>) -> Stmt {
        let keyword = self.current_range();
        let selected = self.at_assist();
        let is_super = self.at(SyntaxKind::SuperKw);
        self.bump();
        let (args, assist_here) = self.parse_arguments();
        self.expect(SyntaxKind::Semicolon, "expected `;` after constructor call");

        let kind = if qualifier.is_some() {
            AssistKind::QualifiedExplicitConstructorCall
        } else {
            AssistKind::ExplicitConstructorCall
        };
        let call = ConstructorCall {
            is_super,
            qualifier,
            args,
            implicit: false,
        };
        if assist_here || selected {
            let replaced = if selected {
                keyword
            } else {
                TextRange::empty(self.assist_caret())
            };
            let node = self.place_assist(kind, AssistTarget::ConstructorCall(call), replaced);
            return Stmt::Expr(Expr::Assist(node));
        }
        Stmt::ConstructorCall(call)
    }
}
