use crate::ast::{
    AssistKind, PrimitiveType, TypeArg, TypeParam, TypeRef, TypeSegment, WildcardBound,
};
use crate::language_level::JavaFeature;
use crate::syntax_kind::SyntaxKind;

use super::{NameTail, Parser};

pub(super) fn primitive_type(kind: SyntaxKind) -> Option<PrimitiveType> {
    Some(match kind {
        SyntaxKind::BooleanKw => PrimitiveType::Boolean,
        SyntaxKind::ByteKw => PrimitiveType::Byte,
        SyntaxKind::ShortKw => PrimitiveType::Short,
        SyntaxKind::IntKw => PrimitiveType::Int,
        SyntaxKind::LongKw => PrimitiveType::Long,
        SyntaxKind::CharKw => PrimitiveType::Char,
        SyntaxKind::FloatKw => PrimitiveType::Float,
        SyntaxKind::DoubleKw => PrimitiveType::Double,
        _ => return None,
    })
}

impl Parser<'_> {
    pub(super) fn at_type_start(&self) -> bool {
        self.current().is_primitive_type() || self.at(SyntaxKind::Identifier)
    }

    pub(super) fn parse_type(&mut self) -> TypeRef {
        self.parse_type_in(AssistKind::Type)
    }

    /// Reads a type. `context` is the assist kind given to a cursor on it.
    pub(super) fn parse_type_in(&mut self, context: AssistKind) -> TypeRef {
        let base = if let Some(primitive) = primitive_type(self.current()) {
            self.bump();
            TypeRef::Primitive(primitive)
        } else if self.at(SyntaxKind::Identifier) {
            self.parse_class_type(context, false)
        } else {
            self.error_here("expected type");
            return TypeRef::Missing;
        };
        let dims = self.parse_dims();
        base.array_of(dims)
    }

    /// Return types additionally allow `void`.
    pub(super) fn parse_return_type(&mut self) -> TypeRef {
        if self.eat(SyntaxKind::VoidKw) {
            TypeRef::Void
        } else {
            self.parse_type()
        }
    }

    /// `Name<Args>.Name<Args>`; the caller checked for an identifier.
    pub(super) fn parse_class_type(&mut self, context: AssistKind, allow_diamond: bool) -> TypeRef {
        let mut segments: Vec<TypeSegment> = Vec::new();
        loop {
            if self.at_assist() {
                return self.finish_type_assist(segments, context);
            }
            let name = self.bump_ident();
            let args = if self.at(SyntaxKind::Less) {
                self.parse_type_args(allow_diamond)
            } else {
                None
            };
            segments.push(TypeSegment { name, args });
            if self.at(SyntaxKind::Dot) && self.nth(1) == SyntaxKind::Identifier {
                self.bump();
                continue;
            }
            return TypeRef::Named(segments);
        }
    }

    fn finish_type_assist(&mut self, segments: Vec<TypeSegment>, context: AssistKind) -> TypeRef {
        let qualifier = segments.into_iter().map(|segment| segment.name).collect();
        let node = self.name_assist(qualifier, context, NameTail::Swallow);
        if self.at(SyntaxKind::Less) && self.level().supports_generics() {
            let _ = self.parse_type_args(true);
        }
        TypeRef::Assist(node)
    }

    /// `<...>` after a type name. Below 1.5 the `<` is left for recovery.
    pub(super) fn parse_type_args(&mut self, allow_diamond: bool) -> Option<Vec<TypeArg>> {
        if !self.level().supports_generics() {
            self.feature_error(JavaFeature::Generics, self.current_range());
            return None;
        }
        self.bump();
        if self.at(SyntaxKind::Greater) {
            if !allow_diamond {
                self.error_here("expected type argument");
            } else if !self.supports(JavaFeature::Diamond) {
                self.feature_error(JavaFeature::Diamond, self.current_range());
            }
            self.bump();
            return Some(Vec::new());
        }

        let mut args = Vec::new();
        loop {
            if self.eat(SyntaxKind::Question) {
                let bound = if self.eat(SyntaxKind::ExtendsKw) {
                    Some(WildcardBound::Extends(self.parse_type()))
                } else if self.eat(SyntaxKind::SuperKw) {
                    Some(WildcardBound::Super(self.parse_type()))
                } else {
                    None
                };
                args.push(TypeArg::Wildcard(bound));
            } else if self.at_type_start() {
                args.push(TypeArg::Type(self.parse_type()));
            } else {
                self.error_here("expected type argument");
                break;
            }
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Greater, "expected `>`");
        Some(args)
    }

    /// `<T extends A & B, U>` on a class or method header.
    pub(super) fn parse_type_params(&mut self) -> Vec<TypeParam> {
        if !self.level().supports_generics() {
            self.feature_error(JavaFeature::Generics, self.current_range());
            return Vec::new();
        }
        self.bump();
        let mut params = Vec::new();
        loop {
            let name = self.expect_ident("type parameter name");
            let mut bounds = Vec::new();
            if self.eat(SyntaxKind::ExtendsKw) {
                bounds.push(self.parse_type());
                while self.eat(SyntaxKind::Amp) {
                    bounds.push(self.parse_type());
                }
            }
            params.push(TypeParam { name, bounds });
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Greater, "expected `>`");
        params
    }

    pub(super) fn parse_dims(&mut self) -> usize {
        let mut dims = 0;
        while self.at(SyntaxKind::LBracket) && self.nth(1) == SyntaxKind::RBracket {
            self.bump();
            self.bump();
            dims += 1;
        }
        dims
    }

    pub(super) fn parse_type_list(&mut self, context: AssistKind) -> Vec<TypeRef> {
        let mut types = vec![self.parse_type_in(context)];
        while self.eat(SyntaxKind::Comma) {
            types.push(self.parse_type_in(context));
        }
        types
    }
}
