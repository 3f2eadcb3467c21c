//! Pratt expression parser.

use crate::ast::{
    AssignOp, AssistKind, AssistMode, AssistNode, AssistTarget, BinaryOp, Expr, Ident,
    LambdaBody, LambdaParam, LiteralKind, PostfixOp, QualifiedName, TypeArg, TypeRef, TypeSegment,
    UnaryOp,
};
use crate::language_level::JavaFeature;
use crate::syntax_kind::SyntaxKind;
use crate::TextRange;

use super::decls::ModifierContext;
use super::recovery::{kind_at, skip_dims, skip_type_name, FrameKind};
use super::types::primitive_type;
use super::{NameTail, Parser};

#[derive(Debug, Clone, Copy)]
enum InfixOp {
    Binary(BinaryOp),
    Assign(AssignOp),
    InstanceOf,
    Conditional,
}

/// Returns (left_bp, right_bp). Larger = tighter binding.
fn infix_binding_power(op: InfixOp) -> (u8, u8) {
    match op {
        InfixOp::Binary(op) => match op {
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => (70, 71),
            BinaryOp::Add | BinaryOp::Sub => (60, 61),
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => (55, 56),
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => (50, 51),
            BinaryOp::Eq | BinaryOp::Ne => (45, 46),
            BinaryOp::BitAnd => (40, 41),
            BinaryOp::BitXor => (39, 40),
            BinaryOp::BitOr => (38, 39),
            BinaryOp::And => (30, 31),
            BinaryOp::Or => (20, 21),
        },
        InfixOp::InstanceOf => (50, 51),
        // Right-associative.
        InfixOp::Conditional => (2, 1),
        InfixOp::Assign(_) => (1, 0),
    }
}

/// Binding power of prefix operators and cast operands.
const PREFIX_BP: u8 = 100;

fn literal_kind(kind: SyntaxKind) -> Option<LiteralKind> {
    Some(match kind {
        SyntaxKind::IntLiteral => LiteralKind::Int,
        SyntaxKind::LongLiteral => LiteralKind::Long,
        SyntaxKind::FloatLiteral => LiteralKind::Float,
        SyntaxKind::DoubleLiteral => LiteralKind::Double,
        SyntaxKind::CharLiteral => LiteralKind::Char,
        SyntaxKind::StringLiteral => LiteralKind::String,
        SyntaxKind::TrueKw | SyntaxKind::FalseKw => LiteralKind::Boolean,
        SyntaxKind::NullKw => LiteralKind::Null,
        _ => return None,
    })
}

/// The type a selected `new X` names, without the assist wrapper.
fn plain_type(node: &AssistNode) -> TypeRef {
    match &node.target {
        AssistTarget::Name { qualifier, partial } => {
            let mut segments: Vec<TypeSegment> = qualifier
                .iter()
                .cloned()
                .map(|name| TypeSegment { name, args: None })
                .collect();
            segments.push(TypeSegment {
                name: Ident::new(partial.clone(), node.replaced),
                args: None,
            });
            TypeRef::Named(segments)
        }
        _ => TypeRef::Missing,
    }
}

impl Parser<'_> {
    pub(super) fn parse_expression(&mut self) -> Expr {
        self.parse_expr_bp(0)
    }

    pub(super) fn parse_expr_bp(&mut self, min_bp: u8) -> Expr {
        let mut lhs = self.parse_unary();
        loop {
            // `x inst|`: only a keyword can follow a complete operand.
            if self.at_assist() && min_bp <= 50 && !matches!(lhs, Expr::Missing) {
                lhs = Expr::Assist(self.assist_word(AssistKind::Keyword));
                continue;
            }

            let Some((op, tokens)) = self.infix_op() else {
                break;
            };
            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }
            for _ in 0..tokens {
                self.bump();
            }

            lhs = match op {
                InfixOp::Binary(op) => {
                    let rhs = self.parse_expr_bp(r_bp);
                    Expr::Binary {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    }
                }
                InfixOp::Assign(op) => {
                    let value = self.parse_expr_bp(r_bp);
                    Expr::Assign {
                        op,
                        target: Box::new(lhs),
                        value: Box::new(value),
                    }
                }
                InfixOp::InstanceOf => {
                    let ty = self.parse_type();
                    Expr::InstanceOf {
                        expr: Box::new(lhs),
                        ty,
                    }
                }
                InfixOp::Conditional => {
                    let then_expr = self.parse_expression();
                    self.expect(SyntaxKind::Colon, "expected `:` in conditional expression");
                    let else_expr = self.parse_expr_bp(r_bp);
                    Expr::Conditional {
                        cond: Box::new(lhs),
                        then_expr: Box::new(then_expr),
                        else_expr: Box::new(else_expr),
                    }
                }
            };
        }
        lhs
    }

    /// The operator at the current position and how many tokens it spans.
    fn infix_op(&self) -> Option<(InfixOp, usize)> {
        let binary = |op| Some((InfixOp::Binary(op), 1));
        let compound = |op| Some((InfixOp::Assign(AssignOp(Some(op))), 1));
        match self.current() {
            SyntaxKind::Star => binary(BinaryOp::Mul),
            SyntaxKind::Slash => binary(BinaryOp::Div),
            SyntaxKind::Percent => binary(BinaryOp::Rem),
            SyntaxKind::Plus => binary(BinaryOp::Add),
            SyntaxKind::Minus => binary(BinaryOp::Sub),
            SyntaxKind::LeftShift => binary(BinaryOp::Shl),
            SyntaxKind::Less => binary(BinaryOp::Lt),
            SyntaxKind::LessEq => binary(BinaryOp::Le),
            SyntaxKind::GreaterEq => binary(BinaryOp::Ge),
            SyntaxKind::Greater => Some(self.right_angle_op()),
            SyntaxKind::EqEq => binary(BinaryOp::Eq),
            SyntaxKind::BangEq => binary(BinaryOp::Ne),
            SyntaxKind::Amp => binary(BinaryOp::BitAnd),
            SyntaxKind::Caret => binary(BinaryOp::BitXor),
            SyntaxKind::Pipe => binary(BinaryOp::BitOr),
            SyntaxKind::AmpAmp => binary(BinaryOp::And),
            SyntaxKind::PipePipe => binary(BinaryOp::Or),
            SyntaxKind::InstanceofKw => Some((InfixOp::InstanceOf, 1)),
            SyntaxKind::Question => Some((InfixOp::Conditional, 1)),
            SyntaxKind::Eq => Some((InfixOp::Assign(AssignOp(None)), 1)),
            SyntaxKind::PlusEq => compound(BinaryOp::Add),
            SyntaxKind::MinusEq => compound(BinaryOp::Sub),
            SyntaxKind::StarEq => compound(BinaryOp::Mul),
            SyntaxKind::SlashEq => compound(BinaryOp::Div),
            SyntaxKind::PercentEq => compound(BinaryOp::Rem),
            SyntaxKind::AmpEq => compound(BinaryOp::BitAnd),
            SyntaxKind::PipeEq => compound(BinaryOp::BitOr),
            SyntaxKind::CaretEq => compound(BinaryOp::BitXor),
            SyntaxKind::LeftShiftEq => compound(BinaryOp::Shl),
            _ => None,
        }
    }

    /// `>` tokens are lexed singly; touching ones glue into shifts.
    fn right_angle_op(&self) -> (InfixOp, usize) {
        if self.adjacent(0) {
            match self.nth(1) {
                SyntaxKind::Greater if self.adjacent(1) && self.nth(2) == SyntaxKind::Greater => {
                    return (InfixOp::Binary(BinaryOp::UShr), 3);
                }
                SyntaxKind::Greater if self.adjacent(1) && self.nth(2) == SyntaxKind::GreaterEq => {
                    return (InfixOp::Assign(AssignOp(Some(BinaryOp::UShr))), 3);
                }
                SyntaxKind::Greater => return (InfixOp::Binary(BinaryOp::Shr), 2),
                SyntaxKind::GreaterEq => {
                    return (InfixOp::Assign(AssignOp(Some(BinaryOp::Shr))), 2);
                }
                _ => {}
            }
        }
        (InfixOp::Binary(BinaryOp::Gt), 1)
    }

    fn parse_unary(&mut self) -> Expr {
        let op = match self.current() {
            SyntaxKind::PlusPlus => Some(UnaryOp::PreInc),
            SyntaxKind::MinusMinus => Some(UnaryOp::PreDec),
            SyntaxKind::Plus => Some(UnaryOp::Plus),
            SyntaxKind::Minus => Some(UnaryOp::Minus),
            SyntaxKind::Bang => Some(UnaryOp::Not),
            SyntaxKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let operand = self.parse_expr_bp(PREFIX_BP);
            return Expr::Unary {
                op,
                operand: Box::new(operand),
            };
        }

        if let Some(arrow) = self.lambda_arrow() {
            if self.supports(JavaFeature::Lambdas) {
                return self.parse_lambda();
            }
            let range = self.range_of(arrow);
            self.feature_error(JavaFeature::Lambdas, range);
        }
        if self.at(SyntaxKind::LParen) && self.is_cast() {
            return self.parse_cast();
        }
        let primary = self.parse_primary();
        self.parse_postfix(primary)
    }

    /// Index of the `->` when a lambda starts here: `x ->` or `( ... ) ->`.
    fn lambda_arrow(&self) -> Option<usize> {
        let tokens = &self.tokens[..self.limit];
        match self.current() {
            SyntaxKind::Identifier if self.nth(1) == SyntaxKind::Arrow => Some(self.pos + 1),
            SyntaxKind::LParen => {
                let mut depth = 0usize;
                let mut i = self.pos;
                loop {
                    match kind_at(tokens, i) {
                        SyntaxKind::LParen => depth += 1,
                        SyntaxKind::RParen => {
                            depth -= 1;
                            if depth == 0 {
                                return (kind_at(tokens, i + 1) == SyntaxKind::Arrow)
                                    .then_some(i + 1);
                            }
                        }
                        SyntaxKind::Semicolon
                        | SyntaxKind::LBrace
                        | SyntaxKind::RBrace
                        | SyntaxKind::Eof => return None,
                        _ => {}
                    }
                    i += 1;
                }
            }
            _ => None,
        }
    }

    fn parse_lambda(&mut self) -> Expr {
        let (params, parenthesized) = if self.at(SyntaxKind::LParen) {
            self.bump();
            let depth = self.frames.push(FrameKind::Parens);
            let mut params = Vec::new();
            while !self.at(SyntaxKind::RParen) && !self.unwinds(depth) {
                if self.at(SyntaxKind::Identifier)
                    && matches!(self.nth(1), SyntaxKind::Comma | SyntaxKind::RParen)
                {
                    let name = self.bump_ident();
                    params.push(LambdaParam { ty: None, name });
                } else {
                    let _ = self.parse_modifiers(ModifierContext::Parameter);
                    let ty = self.parse_type();
                    let name = self.expect_ident("parameter name");
                    params.push(LambdaParam { ty: Some(ty), name });
                }
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
            self.finish_parens(depth);
            (params, true)
        } else {
            let name = self.bump_ident();
            (vec![LambdaParam { ty: None, name }], false)
        };
        self.expect(SyntaxKind::Arrow, "expected `->`");
        let body = if self.at(SyntaxKind::LBrace) {
            LambdaBody::Block(self.parse_block())
        } else {
            LambdaBody::Expr(Box::new(self.parse_expression()))
        };
        Expr::Lambda {
            params,
            parenthesized,
            body,
        }
    }

    /// `( Type ) operand`. Reference-type casts must not be followed by `+`
    /// or `-`, which would make them a parenthesized operand instead.
    fn is_cast(&self) -> bool {
        let tokens = &self.tokens[..self.limit];
        let first = self.pos + 1;
        let kind = kind_at(tokens, first);
        if kind.is_primitive_type() {
            return kind_at(tokens, skip_dims(tokens, first + 1)) == SyntaxKind::RParen;
        }
        if kind != SyntaxKind::Identifier {
            return false;
        }
        let Some(close) = skip_type_name(tokens, first) else {
            return false;
        };
        if kind_at(tokens, close) != SyntaxKind::RParen {
            return false;
        }
        let next = kind_at(tokens, close + 1);
        next == SyntaxKind::Identifier
            || next.is_literal()
            || matches!(
                next,
                SyntaxKind::LParen
                    | SyntaxKind::ThisKw
                    | SyntaxKind::SuperKw
                    | SyntaxKind::NewKw
                    | SyntaxKind::Bang
                    | SyntaxKind::Tilde
            )
    }

    fn parse_cast(&mut self) -> Expr {
        self.bump();
        let ty = self.parse_type();
        self.expect(SyntaxKind::RParen, "expected `)` after cast type");
        let expr = self.parse_expr_bp(PREFIX_BP);
        Expr::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    fn parse_primary(&mut self) -> Expr {
        let kind = self.current();
        if let Some(literal) = literal_kind(kind) {
            let text = self.text_at(self.pos).to_owned();
            self.bump();
            return Expr::Literal {
                kind: literal,
                text,
            };
        }
        if let Some(primitive) = primitive_type(kind) {
            self.bump();
            let dims = self.parse_dims();
            return self.parse_type_suffix(TypeRef::Primitive(primitive).array_of(dims));
        }

        match kind {
            SyntaxKind::Identifier => self.parse_name_primary(),
            SyntaxKind::ThisKw => {
                self.bump();
                Expr::This
            }
            SyntaxKind::SuperKw => {
                self.bump();
                Expr::Super(None)
            }
            SyntaxKind::NewKw => self.parse_new(None),
            SyntaxKind::VoidKw => {
                self.bump();
                self.parse_type_suffix(TypeRef::Void)
            }
            SyntaxKind::LParen => {
                self.bump();
                let depth = self.frames.push(FrameKind::Parens);
                let inner = self.parse_expression();
                self.finish_parens(depth);
                inner
            }
            _ => {
                self.error_here("expected expression");
                Expr::Missing
            }
        }
    }

    /// A dotted name, possibly ending in a call, `.class`, `.this` or
    /// `.super`, or turning into an array type for `X[].class`.
    fn parse_name_primary(&mut self) -> Expr {
        let mut segments: Vec<Ident> = Vec::new();
        loop {
            if self.at_assist() {
                if self.nth(1) == SyntaxKind::LParen {
                    let receiver = if segments.is_empty() {
                        None
                    } else {
                        Some(Box::new(Expr::Name(QualifiedName { segments })))
                    };
                    return self.message_send_name_assist(receiver);
                }
                return Expr::Assist(self.name_assist(segments, AssistKind::Name, NameTail::Keep));
            }

            let ident = self.bump_ident();
            if self.at(SyntaxKind::LParen) {
                let receiver = if segments.is_empty() {
                    None
                } else {
                    Some(Box::new(Expr::Name(QualifiedName { segments })))
                };
                return self.finish_call(receiver, Vec::new(), ident);
            }
            segments.push(ident);

            if self.at(SyntaxKind::LBracket) && self.nth(1) == SyntaxKind::RBracket {
                let dims = self.parse_dims();
                let ty = named_type(segments).array_of(dims);
                return self.parse_type_suffix(ty);
            }
            if !self.at(SyntaxKind::Dot) {
                break;
            }
            match self.nth(1) {
                SyntaxKind::Identifier => self.bump(),
                SyntaxKind::ClassKw => {
                    self.bump();
                    self.bump();
                    return Expr::ClassLiteral(named_type(segments));
                }
                SyntaxKind::ThisKw => {
                    self.bump();
                    self.bump();
                    return Expr::QualifiedThis(QualifiedName { segments });
                }
                SyntaxKind::SuperKw => {
                    self.bump();
                    self.bump();
                    return Expr::Super(Some(QualifiedName { segments }));
                }
                _ => break,
            }
        }
        Expr::Name(QualifiedName { segments })
    }

    /// `.class`, `.cla|` or `::` after a primitive or array type.
    fn parse_type_suffix(&mut self, ty: TypeRef) -> Expr {
        if self.at(SyntaxKind::Dot) {
            if self.nth(1) == SyntaxKind::ClassKw {
                self.bump();
                self.bump();
                return Expr::ClassLiteral(ty);
            }
            if self.nth_is_assist(1) {
                self.bump();
                let range = self.current_range();
                let partial = self.assist_partial();
                self.bump();
                let replaced = TextRange {
                    start: range.start,
                    end: range.end.max(self.assist_caret()),
                };
                let node = self.place_assist(
                    AssistKind::ClassLiteralAccess,
                    AssistTarget::ClassLiteral { ty, partial },
                    replaced,
                );
                return Expr::Assist(node);
            }
        }
        if self.at(SyntaxKind::DoubleColon) {
            if self.supports(JavaFeature::MethodReferences) {
                return self.parse_method_ref(Expr::Type(ty));
            }
            self.feature_error(JavaFeature::MethodReferences, self.current_range());
            return Expr::Type(ty);
        }
        self.error_here("expected `.class`");
        Expr::Type(ty)
    }

    fn parse_method_ref(&mut self, target: Expr) -> Expr {
        self.bump();
        let name = if self.at(SyntaxKind::NewKw) {
            let range = self.current_range();
            self.bump();
            Ident::new("new", range)
        } else {
            self.expect_ident("method name after `::`")
        };
        Expr::MethodRef {
            target: Box::new(target),
            name,
        }
    }

    /// The assist token is a method name followed by `(`.
    fn message_send_name_assist(&mut self, receiver: Option<Box<Expr>>) -> Expr {
        let replaced = self.current_range();
        let name = self.bump_ident();
        let (args, _) = self.parse_arguments();
        let call = Expr::MethodCall {
            receiver,
            type_args: Vec::new(),
            name,
            args,
        };
        Expr::Assist(self.place_assist(
            AssistKind::MessageSendName,
            AssistTarget::Expr(call),
            replaced,
        ))
    }

    fn finish_call(&mut self, receiver: Option<Box<Expr>>, type_args: Vec<TypeRef>, name: Ident) -> Expr {
        let (args, assist_here) = self.parse_arguments();
        let call = Expr::MethodCall {
            receiver,
            type_args,
            name,
            args,
        };
        if !assist_here {
            return call;
        }
        let replaced = TextRange::empty(self.assist_caret());
        Expr::Assist(self.place_assist(AssistKind::MessageSend, AssistTarget::Expr(call), replaced))
    }

    fn parse_postfix(&mut self, mut expr: Expr) -> Expr {
        loop {
            match self.current() {
                SyntaxKind::Dot => {
                    if self.nth_is_assist(1) {
                        self.bump();
                        expr = if self.nth(1) == SyntaxKind::LParen {
                            self.message_send_name_assist(Some(Box::new(expr)))
                        } else {
                            self.member_access_assist(expr)
                        };
                        continue;
                    }
                    match self.nth(1) {
                        SyntaxKind::Identifier => {
                            self.bump();
                            let name = self.bump_ident();
                            expr = if self.at(SyntaxKind::LParen) {
                                self.finish_call(Some(Box::new(expr)), Vec::new(), name)
                            } else {
                                Expr::FieldAccess {
                                    receiver: Box::new(expr),
                                    name,
                                }
                            };
                        }
                        SyntaxKind::Less => {
                            self.bump();
                            let type_args = self
                                .parse_type_args(false)
                                .unwrap_or_default()
                                .into_iter()
                                .filter_map(|arg| match arg {
                                    TypeArg::Type(ty) => Some(ty),
                                    TypeArg::Wildcard(_) => None,
                                })
                                .collect();
                            let name = self.expect_ident("method name");
                            expr = self.finish_call(Some(Box::new(expr)), type_args, name);
                        }
                        SyntaxKind::NewKw => {
                            self.bump();
                            expr = self.parse_new(Some(Box::new(expr)));
                        }
                        _ => {
                            self.bump();
                            self.error_here("expected identifier after `.`");
                            break;
                        }
                    }
                }
                SyntaxKind::LBracket => {
                    self.bump();
                    let depth = self.frames.push(FrameKind::Brackets);
                    let index = if self.at(SyntaxKind::RBracket) {
                        self.error_here("expected index expression");
                        Expr::Missing
                    } else {
                        self.parse_expression()
                    };
                    self.finish_group(depth, SyntaxKind::RBracket, "expected `]`");
                    expr = Expr::ArrayAccess {
                        array: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => {
                    let op = if self.at(SyntaxKind::PlusPlus) {
                        PostfixOp::Inc
                    } else {
                        PostfixOp::Dec
                    };
                    self.bump();
                    expr = Expr::Postfix {
                        op,
                        operand: Box::new(expr),
                    };
                }
                SyntaxKind::DoubleColon => {
                    if !self.supports(JavaFeature::MethodReferences) {
                        self.feature_error(JavaFeature::MethodReferences, self.current_range());
                        break;
                    }
                    expr = self.parse_method_ref(expr);
                }
                _ => break,
            }
        }
        expr
    }

    /// `receiver.par|` where the receiver is not a plain name.
    fn member_access_assist(&mut self, receiver: Expr) -> Expr {
        let range = self.current_range();
        let partial = self.assist_partial();
        self.bump();
        let replaced = TextRange {
            start: range.start,
            end: range.end.max(self.assist_caret()),
        };
        Expr::Assist(self.place_assist(
            AssistKind::MemberAccess,
            AssistTarget::MemberAccess { receiver, partial },
            replaced,
        ))
    }

    /// `new` expression at the keyword; `outer` is the enclosing instance of
    /// `outer.new Inner()`.
    pub(super) fn parse_new(&mut self, outer: Option<Box<Expr>>) -> Expr {
        self.bump();
        if self.at(SyntaxKind::Less) {
            let _ = self.parse_type_args(false);
        }
        if let Some(primitive) = primitive_type(self.current()) {
            self.bump();
            return self.parse_array_creation(TypeRef::Primitive(primitive));
        }
        if !self.at(SyntaxKind::Identifier) {
            self.error_here("expected type after `new`");
            return Expr::Missing;
        }

        let selecting = self.at_assist() && self.assist_mode() == Some(AssistMode::Selection);
        let mut ty = self.parse_class_type(AssistKind::Type, true);
        if self.at(SyntaxKind::LBracket) {
            return self.parse_array_creation(ty);
        }
        let mut selected = None;
        if selecting {
            if let TypeRef::Assist(node) = &ty {
                selected = Some(node.replaced);
                ty = plain_type(node);
            }
        }

        let (args, assist_here) = if self.at(SyntaxKind::LParen) {
            self.parse_arguments()
        } else {
            self.error_here("expected `(` or `[` after type");
            (Vec::new(), false)
        };
        let body = if self.at(SyntaxKind::LBrace) {
            Some(Box::new(self.parse_anonymous_body()))
        } else {
            None
        };

        let kind = if outer.is_some() {
            AssistKind::QualifiedAllocationExpression
        } else {
            AssistKind::AllocationExpression
        };
        let expr = Expr::New {
            outer,
            ty,
            args,
            body,
        };
        let replaced = match selected {
            Some(range) => range,
            None if assist_here => TextRange::empty(self.assist_caret()),
            None => return expr,
        };
        Expr::Assist(self.place_assist(kind, AssistTarget::Expr(expr), replaced))
    }

    fn parse_array_creation(&mut self, element: TypeRef) -> Expr {
        let mut dims = Vec::new();
        while self.at(SyntaxKind::LBracket) {
            if self.nth(1) == SyntaxKind::RBracket {
                self.bump();
                self.bump();
                dims.push(None);
                continue;
            }
            self.bump();
            let depth = self.frames.push(FrameKind::Brackets);
            let size = self.parse_expression();
            self.finish_group(depth, SyntaxKind::RBracket, "expected `]`");
            dims.push(Some(size));
        }
        if dims.is_empty() {
            self.error_here("expected `[`");
        }
        let init = if self.at(SyntaxKind::LBrace) {
            Some(self.parse_array_init())
        } else {
            None
        };
        Expr::NewArray {
            element,
            dims,
            init,
        }
    }

    /// `( args )`. The flag reports an empty completion token sitting where
    /// an argument starts, which makes the whole call the assist; the
    /// arguments around it are kept.
    pub(super) fn parse_arguments(&mut self) -> (Vec<Expr>, bool) {
        let mut args = Vec::new();
        let mut assist_here = false;
        if !self.eat(SyntaxKind::LParen) {
            self.error_here("expected `(`");
            return (args, assist_here);
        }
        let depth = self.frames.push(FrameKind::Parens);
        loop {
            if self.eat(SyntaxKind::RParen) {
                break;
            }
            if self.unwinds(depth) {
                self.error_here("expected `)`");
                break;
            }
            if self.at_inserted_assist() && self.assist_mode() == Some(AssistMode::Completion) {
                self.bump();
                assist_here = true;
                self.eat(SyntaxKind::Comma);
                continue;
            }

            let before = self.pos;
            args.push(self.parse_expression());
            if self.eat(SyntaxKind::Comma) || self.at(SyntaxKind::RParen) || self.unwinds(depth) {
                continue;
            }
            self.error_here("expected `,` or `)`");
            if self.pos == before || !self.at_claimed_anchor() {
                self.bump();
            }
        }
        self.frames.pop_to(depth);
        (args, assist_here)
    }

    /// `{ a, b, }` at the `{`.
    pub(super) fn parse_array_init(&mut self) -> Vec<Expr> {
        self.bump();
        let depth = self.frames.push(FrameKind::ArrayInit);
        let mut values = Vec::new();
        loop {
            if self.eat(SyntaxKind::RBrace) {
                break;
            }
            if self.unwinds(depth) {
                self.error_here("expected `}`");
                break;
            }
            let before = self.pos;
            let mut value = self.parse_variable_init();
            if let Expr::Assist(node) = &mut value {
                if node.kind == AssistKind::Name {
                    self.retag_assist(node, AssistKind::ArrayInitializerElement);
                }
            }
            values.push(value);
            if self.eat(SyntaxKind::Comma) || self.at(SyntaxKind::RBrace) || self.unwinds(depth) {
                continue;
            }
            self.error_here("expected `,` or `}`");
            if self.pos == before || !self.at_claimed_anchor() {
                self.bump();
            }
        }
        self.frames.pop_to(depth);
        values
    }

    pub(super) fn parse_variable_init(&mut self) -> Expr {
        if self.at(SyntaxKind::LBrace) {
            Expr::ArrayInit(self.parse_array_init())
        } else {
            self.parse_expression()
        }
    }
}

fn named_type(segments: Vec<Ident>) -> TypeRef {
    TypeRef::Named(
        segments
            .into_iter()
            .map(|name| TypeSegment { name, args: None })
            .collect(),
    )
}
