//! Compilation unit, type and member declarations.

use crate::ast::{
    Annotation, AnnotationArgs, AssistKind, Block, Body, CompilationUnit, ConstructorDecl,
    DeclName, ElementValue, ElementValuePair, EnumConstant, Expr, FieldDecl, Ident, ImportDecl,
    Initializer, Member, MethodDecl, Modifiers, NameRef, Nesting, PackageDecl, Param,
    QualifiedName, TypeDecl, TypeKind, TypeParam, TypeRef,
};
use crate::language_level::JavaFeature;
use crate::syntax_kind::SyntaxKind;
use crate::TextRange;

use super::recovery::{method_header_at, skip_annotation, FrameKind};
use super::{NameTail, Parser};

/// Where a modifier list appears; decides which keywords count as modifiers
/// and what happens to malformed annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ModifierContext {
    Declaration,
    Member,
    Parameter,
    Local,
}

/// Modifiers a local variable or local class may carry.
const LOCAL_MODIFIERS: Modifiers = Modifiers::FINAL
    .union(Modifiers::ABSTRACT)
    .union(Modifiers::STRICTFP);

fn modifier_flag(kind: SyntaxKind) -> Option<Modifiers> {
    Some(match kind {
        SyntaxKind::PublicKw => Modifiers::PUBLIC,
        SyntaxKind::ProtectedKw => Modifiers::PROTECTED,
        SyntaxKind::PrivateKw => Modifiers::PRIVATE,
        SyntaxKind::StaticKw => Modifiers::STATIC,
        SyntaxKind::FinalKw => Modifiers::FINAL,
        SyntaxKind::SynchronizedKw => Modifiers::SYNCHRONIZED,
        SyntaxKind::VolatileKw => Modifiers::VOLATILE,
        SyntaxKind::TransientKw => Modifiers::TRANSIENT,
        SyntaxKind::NativeKw => Modifiers::NATIVE,
        SyntaxKind::AbstractKw => Modifiers::ABSTRACT,
        SyntaxKind::StrictfpKw => Modifiers::STRICTFP,
        _ => return None,
    })
}

impl Parser<'_> {
    pub(crate) fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let depth = self.frames.push(FrameKind::Unit);
        let mut unit = CompilationUnit {
            package: None,
            imports: Vec::new(),
            types: Vec::new(),
            keyword_assist: None,
            problems: Vec::new(),
            bodies_parsed: self.body == super::body::BodyHandling::Parse,
        };

        while !self.at(SyntaxKind::Eof) {
            let before = self.pos;
            match self.current() {
                SyntaxKind::Semicolon => self.bump(),
                SyntaxKind::PackageKw => {
                    let start = self.current_range().start;
                    let package = self.parse_package_decl(Vec::new(), start);
                    self.attach_package(&mut unit, package);
                }
                SyntaxKind::ImportKw => {
                    let import = self.parse_import_decl();
                    unit.imports.push(import);
                }
                _ => self.parse_top_level_item(&mut unit),
            }
            if self.pos == before {
                self.error_here("unexpected token");
                self.bump();
            }
        }

        self.frames.pop_to(depth);
        unit.problems = self.take_errors();
        unit
    }

    fn attach_package(&mut self, unit: &mut CompilationUnit, package: PackageDecl) {
        if unit.package.is_none() && unit.imports.is_empty() && unit.types.is_empty() {
            unit.package = Some(package);
        } else {
            self.error_at(package.range, "package declaration must come first");
        }
    }

    fn parse_package_decl(&mut self, annotations: Vec<Annotation>, start: u32) -> PackageDecl {
        self.bump();
        let name = self.parse_name_ref(AssistKind::Package);
        self.expect(SyntaxKind::Semicolon, "expected `;`");
        PackageDecl {
            annotations,
            name,
            range: TextRange {
                start,
                end: self.prev_end(),
            },
        }
    }

    fn parse_import_decl(&mut self) -> ImportDecl {
        let start = self.current_range().start;
        self.bump();
        let is_static = if self.at(SyntaxKind::StaticKw) {
            if !self.supports(JavaFeature::StaticImports) {
                self.feature_error(JavaFeature::StaticImports, self.current_range());
            }
            self.bump();
            true
        } else {
            false
        };
        let name = self.parse_name_ref(AssistKind::Import);
        let is_star = if self.at(SyntaxKind::Dot) && self.nth(1) == SyntaxKind::Star {
            self.bump();
            self.bump();
            true
        } else {
            false
        };
        self.expect(SyntaxKind::Semicolon, "expected `;`");
        ImportDecl {
            is_static,
            is_star,
            name,
            range: TextRange {
                start,
                end: self.prev_end(),
            },
        }
    }

    /// A dotted name in a package or import declaration.
    fn parse_name_ref(&mut self, context: AssistKind) -> NameRef {
        let mut segments: Vec<Ident> = Vec::new();
        loop {
            if self.at_assist() {
                return NameRef::Assist(self.name_assist(segments, context, NameTail::Swallow));
            }
            if !self.at(SyntaxKind::Identifier) {
                self.error_here("expected name");
                break;
            }
            segments.push(self.bump_ident());
            if self.at(SyntaxKind::Dot) && self.nth(1) == SyntaxKind::Identifier {
                self.bump();
                continue;
            }
            break;
        }
        NameRef::Path(QualifiedName { segments })
    }

    fn parse_top_level_item(&mut self, unit: &mut CompilationUnit) {
        let start = self.current_range().start;
        if self.at_assist() {
            unit.keyword_assist = Some(self.assist_word(AssistKind::Keyword));
            return;
        }
        if self.at(SyntaxKind::RBrace) {
            self.error_here("unmatched `}`");
            self.bump();
            return;
        }

        let (modifiers, annotations) = self.parse_modifiers(ModifierContext::Declaration);
        if self.at(SyntaxKind::PackageKw) {
            let package = self.parse_package_decl(annotations, start);
            self.attach_package(unit, package);
            return;
        }
        if self.at_type_keyword() {
            let decl = self.parse_type_decl(start, modifiers, annotations, Nesting::TopLevel);
            unit.types.push(decl);
            return;
        }
        if self.at_assist() {
            unit.keyword_assist = Some(self.assist_word(AssistKind::Keyword));
            return;
        }

        self.error_here("expected class, interface, enum or annotation type declaration");
        self.recover_top_level();
    }

    /// Skips at least one token, then up to something that can start a
    /// top-level declaration.
    fn recover_top_level(&mut self) {
        loop {
            self.bump();
            let kind = self.current();
            if kind == SyntaxKind::Eof
                || kind == SyntaxKind::At
                || kind == SyntaxKind::PackageKw
                || kind == SyntaxKind::ImportKw
                || kind.is_modifier_keyword()
                || self.at_type_keyword()
            {
                return;
            }
        }
    }

    pub(super) fn at_type_keyword(&self) -> bool {
        match self.current() {
            SyntaxKind::ClassKw | SyntaxKind::InterfaceKw | SyntaxKind::EnumKw => true,
            SyntaxKind::At => self.nth(1) == SyntaxKind::InterfaceKw,
            _ => false,
        }
    }

    // --- modifiers and annotations ---

    pub(super) fn parse_modifiers(&mut self, context: ModifierContext) -> (Modifiers, Vec<Annotation>) {
        let mut modifiers = Modifiers::empty();
        let mut annotations = Vec::new();
        loop {
            let kind = self.current();
            if let Some(flag) = modifier_flag(kind) {
                if context == ModifierContext::Local && !LOCAL_MODIFIERS.contains(flag) {
                    break;
                }
                if modifiers.contains(flag) {
                    self.error_here("duplicate modifier");
                }
                modifiers |= flag;
                self.bump();
                continue;
            }
            if kind == SyntaxKind::DefaultKw
                && context == ModifierContext::Member
                && self.nth(1) != SyntaxKind::Colon
            {
                if !self.supports(JavaFeature::DefaultMethods) {
                    self.feature_error(JavaFeature::DefaultMethods, self.current_range());
                }
                modifiers |= Modifiers::DEFAULT;
                self.bump();
                continue;
            }
            if kind == SyntaxKind::At && self.nth(1) != SyntaxKind::InterfaceKw {
                if !self.level().supports_annotations() {
                    self.feature_error(JavaFeature::Annotations, self.current_range());
                    self.pos = skip_annotation(&self.tokens[..self.limit], self.pos);
                    continue;
                }
                let errors_before = self.errors.len();
                let assist_before = self.assist_found();
                let annotation = self.parse_annotation();
                let malformed = self.errors.len() > errors_before;
                let holds_assist = !assist_before && self.assist_found();
                if malformed
                    && !holds_assist
                    && (self.has_assist() || context == ModifierContext::Parameter)
                {
                    tracing::debug!(target: "mend.recovery", start = annotation.range.start, "dropping malformed annotation");
                    continue;
                }
                annotations.push(annotation);
                continue;
            }
            break;
        }
        (modifiers, annotations)
    }

    pub(super) fn parse_annotation(&mut self) -> Annotation {
        let start = self.current_range().start;
        self.bump();
        let name = if self.at(SyntaxKind::Identifier) {
            self.parse_class_type(AssistKind::Type, false)
        } else {
            self.error_here("expected annotation name");
            TypeRef::Missing
        };
        let args = if self.at(SyntaxKind::LParen) {
            self.parse_annotation_args()
        } else {
            AnnotationArgs::Marker
        };
        Annotation {
            name,
            args,
            range: TextRange {
                start,
                end: self.prev_end(),
            },
        }
    }

    fn parse_annotation_args(&mut self) -> AnnotationArgs {
        self.bump();
        let depth = self.frames.push(FrameKind::Parens);

        // `@A( int x)`: the list was cut off before any value.
        if self.at_local_var_decl() || self.at_declaration_start() {
            self.error_here("expected `)`");
            self.frames.pop_to(depth);
            return AnnotationArgs::Named(Vec::new());
        }

        let named = (self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::Eq)
            || (self.at_assist()
                && matches!(
                    self.nth(1),
                    SyntaxKind::Eq | SyntaxKind::RParen | SyntaxKind::Comma
                ));
        let args = if self.at(SyntaxKind::RParen) {
            AnnotationArgs::Named(Vec::new())
        } else if named {
            AnnotationArgs::Named(self.parse_element_value_pairs(depth))
        } else {
            AnnotationArgs::Single(self.parse_element_value())
        };

        loop {
            if self.eat(SyntaxKind::RParen) {
                break;
            }
            self.error_here("expected `)`");
            if (self.at_claimed_anchor() && !self.at(SyntaxKind::RParen))
                || self.at_declaration_start()
            {
                break;
            }
            self.bump();
        }
        self.frames.pop_to(depth);
        args
    }

    /// A token that can only begin the next declaration: a type keyword, an
    /// annotation, a modifier, or a method header.
    fn at_declaration_start(&self) -> bool {
        let kind = self.current();
        self.at_type_keyword()
            || kind == SyntaxKind::At
            || kind == SyntaxKind::VoidKw
            || kind.is_modifier_keyword()
            || method_header_at(&self.tokens[..self.limit], self.pos)
    }

    fn parse_element_value_pairs(&mut self, depth: usize) -> Vec<ElementValuePair> {
        let mut pairs = Vec::new();
        loop {
            if self.at(SyntaxKind::RParen) || self.unwinds(depth) {
                break;
            }
            if self.at_declaration_start() {
                break;
            }
            let name = if self.at_assist() {
                DeclName::Assist(self.assist_word(AssistKind::AttributeName))
            } else if self.at(SyntaxKind::Identifier) {
                DeclName::Ident(self.bump_ident())
            } else {
                self.error_here("expected element name");
                break;
            };
            let value = if self.eat(SyntaxKind::Eq) {
                self.parse_element_value()
            } else {
                if !matches!(name, DeclName::Assist(_)) {
                    self.error_here("expected `=`");
                }
                ElementValue::Expr(Expr::Missing)
            };
            pairs.push(ElementValuePair { name, value });
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        pairs
    }

    pub(super) fn parse_element_value(&mut self) -> ElementValue {
        match self.current() {
            SyntaxKind::At if self.level().supports_annotations() => {
                ElementValue::Annotation(Box::new(self.parse_annotation()))
            }
            SyntaxKind::LBrace => {
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
                    values.push(self.parse_element_value());
                    if self.eat(SyntaxKind::Comma) || self.at(SyntaxKind::RBrace) {
                        continue;
                    }
                    if self.unwinds(depth) {
                        continue;
                    }
                    self.error_here("expected `,` or `}`");
                    if self.pos == before || !self.at_claimed_anchor() {
                        self.bump();
                    }
                }
                self.frames.pop_to(depth);
                ElementValue::Array(values)
            }
            // Conditional level: element values never contain assignments.
            _ => ElementValue::Expr(self.parse_expr_bp(2)),
        }
    }

    // --- type declarations ---

    /// Parses a class, interface, enum or annotation type at its keyword.
    pub(super) fn parse_type_decl(
        &mut self,
        start: u32,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        nesting: Nesting,
    ) -> TypeDecl {
        let kind = match self.current() {
            SyntaxKind::InterfaceKw => TypeKind::Interface,
            SyntaxKind::EnumKw => TypeKind::Enum,
            SyntaxKind::At => {
                self.bump();
                TypeKind::Annotation
            }
            _ => TypeKind::Class,
        };
        self.bump();

        let name = if self.at(SyntaxKind::Identifier) {
            self.bump_ident()
        } else {
            self.error_here("expected type name");
            Ident::missing(self.prev_end())
        };
        let type_params = if self.at(SyntaxKind::Less) {
            self.parse_type_params()
        } else {
            Vec::new()
        };

        let mut decl = TypeDecl {
            kind,
            nesting,
            modifiers,
            annotations,
            name,
            type_params,
            superclass: None,
            interfaces: Vec::new(),
            enum_constants: Vec::new(),
            members: Vec::new(),
            header_recovered: false,
            range: TextRange::empty(start),
        };
        self.parse_type_header(&mut decl);
        let open = self.at(SyntaxKind::LBrace);
        if !open {
            tracing::debug!(target: "mend.recovery", name = %decl.name.text, "synthesizing `{{` for type body");
        }
        let header_end = self.current_range().start;
        decl.header_recovered = self
            .errors
            .iter()
            .any(|error| (start..=header_end).contains(&error.range.start));
        self.parse_type_body(&mut decl, open);
        decl.range = TextRange {
            start,
            end: self.prev_end(),
        };
        add_default_constructor(&mut decl);
        decl
    }

    fn parse_type_header(&mut self, decl: &mut TypeDecl) {
        loop {
            match self.current() {
                SyntaxKind::LBrace => break,
                SyntaxKind::ExtendsKw => {
                    self.bump();
                    match decl.kind {
                        TypeKind::Class if decl.superclass.is_none() => {
                            decl.superclass = Some(self.parse_type_in(AssistKind::Class));
                        }
                        TypeKind::Interface => {
                            let types = self.parse_type_list(AssistKind::Interface);
                            decl.interfaces.extend(types);
                        }
                        _ => {
                            self.error_here("unexpected `extends` clause");
                            let _ = self.parse_type();
                        }
                    }
                }
                SyntaxKind::ImplementsKw => {
                    self.bump();
                    if matches!(decl.kind, TypeKind::Class | TypeKind::Enum) {
                        let types = self.parse_type_list(AssistKind::Interface);
                        decl.interfaces.extend(types);
                    } else {
                        self.error_here("unexpected `implements` clause");
                        let _ = self.parse_type_list(AssistKind::Interface);
                    }
                }
                _ if self.at_assist() => {
                    let node = TypeRef::Assist(self.assist_word(AssistKind::Keyword));
                    if decl.kind == TypeKind::Class && decl.superclass.is_none() {
                        decl.superclass = Some(node);
                    } else {
                        decl.interfaces.push(node);
                    }
                }
                _ if self.header_ends_here() => {
                    self.error_here("expected `{`");
                    break;
                }
                _ => {
                    self.error_here("unexpected token in type header");
                    self.bump();
                }
            }
        }
        if matches!(decl.superclass, Some(TypeRef::Missing)) {
            decl.superclass = None;
        }
        decl.interfaces.retain(|ty| !matches!(ty, TypeRef::Missing));
    }

    /// A token after which the header cannot continue, so the body's `{` is
    /// taken as missing.
    fn header_ends_here(&self) -> bool {
        let kind = self.current();
        matches!(
            kind,
            SyntaxKind::RBrace
                | SyntaxKind::Semicolon
                | SyntaxKind::Eof
                | SyntaxKind::At
                | SyntaxKind::VoidKw
                | SyntaxKind::ClassKw
                | SyntaxKind::InterfaceKw
                | SyntaxKind::EnumKw
                | SyntaxKind::PackageKw
                | SyntaxKind::ImportKw
        ) || kind.is_modifier_keyword()
            || kind.is_primitive_type()
            || (kind == SyntaxKind::Identifier
                && matches!(
                    self.nth(1),
                    SyntaxKind::Identifier | SyntaxKind::LParen | SyntaxKind::Less
                ))
    }

    /// Parses members up to the closing `}`. When `open` is false the `{` was
    /// missing and the body starts at the current token.
    pub(super) fn parse_type_body(&mut self, decl: &mut TypeDecl, open: bool) {
        if open {
            self.bump();
        }
        let depth = self.frames.push(FrameKind::TypeBody);
        if decl.kind == TypeKind::Enum {
            self.parse_enum_constants(decl, depth);
        }
        loop {
            if self.eat(SyntaxKind::RBrace) {
                break;
            }
            if self.unwinds(depth) {
                self.error_here("expected `}`");
                break;
            }
            if self.eat(SyntaxKind::Semicolon) {
                continue;
            }
            let before = self.pos;
            self.parse_member(decl);
            if self.pos == before {
                self.error_here("unexpected token in type body");
                self.bump();
            }
        }
        self.frames.pop_to(depth);
    }

    /// `{ members }` of an anonymous class or enum constant, at `{`.
    pub(super) fn parse_anonymous_body(&mut self) -> TypeDecl {
        let start = self.current_range().start;
        let mut decl = TypeDecl {
            kind: TypeKind::Anonymous,
            nesting: Nesting::Anonymous,
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            name: Ident::missing(start),
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            enum_constants: Vec::new(),
            members: Vec::new(),
            header_recovered: false,
            range: TextRange::empty(start),
        };
        self.parse_type_body(&mut decl, true);
        decl.range = TextRange {
            start,
            end: self.prev_end(),
        };
        decl
    }

    fn at_enum_constant(&self) -> bool {
        let tokens = &self.tokens[..self.limit];
        let mut i = self.pos;
        while tokens.get(i).is_some_and(|token| token.kind == SyntaxKind::At) {
            i = skip_annotation(tokens, i);
        }
        let kind_at = |idx: usize| tokens.get(idx).map_or(SyntaxKind::Eof, |token| token.kind);
        kind_at(i) == SyntaxKind::Identifier
            && matches!(
                kind_at(i + 1),
                SyntaxKind::LParen
                    | SyntaxKind::LBrace
                    | SyntaxKind::Comma
                    | SyntaxKind::Semicolon
                    | SyntaxKind::RBrace
                    | SyntaxKind::Eof
            )
    }

    fn parse_enum_constants(&mut self, decl: &mut TypeDecl, depth: usize) {
        loop {
            if self.at(SyntaxKind::RBrace) || self.unwinds(depth) {
                return;
            }
            if self.eat(SyntaxKind::Semicolon) {
                return;
            }
            if !self.at_enum_constant() {
                self.error_here("expected `;` after enum constants");
                return;
            }
            let start = self.current_range().start;
            let mut annotations = Vec::new();
            while self.at(SyntaxKind::At) {
                annotations.push(self.parse_annotation());
            }
            let name = self.bump_ident();
            let args = if self.at(SyntaxKind::LParen) {
                Some(self.parse_arguments().0)
            } else {
                None
            };
            let body = if self.at(SyntaxKind::LBrace) {
                Some(Box::new(self.parse_anonymous_body()))
            } else {
                None
            };
            decl.enum_constants.push(EnumConstant {
                annotations,
                name,
                args,
                body,
                range: TextRange {
                    start,
                    end: self.prev_end(),
                },
            });
            if self.eat(SyntaxKind::Comma) {
                continue;
            }
            if self.eat(SyntaxKind::Semicolon) || self.at(SyntaxKind::RBrace) {
                return;
            }
            self.error_here("expected `,` or `;`");
            return;
        }
    }

    // --- members ---

    fn parse_member(&mut self, decl: &mut TypeDecl) {
        let start = self.current_range().start;
        let (modifiers, annotations) = self.parse_modifiers(ModifierContext::Member);

        match self.current() {
            SyntaxKind::LBrace => {
                let body = self.parse_member_body();
                decl.members.push(Member::Initializer(Initializer {
                    is_static: modifiers.contains(Modifiers::STATIC),
                    body,
                    range: TextRange {
                        start,
                        end: self.prev_end(),
                    },
                }));
            }
            _ if self.at_type_keyword() => {
                let ty = self.parse_type_decl(start, modifiers, annotations, Nesting::Member);
                decl.members.push(Member::Type(ty));
            }
            SyntaxKind::Less => {
                let type_params = self.parse_type_params();
                if self.at(SyntaxKind::Less) {
                    return;
                }
                if self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::LParen {
                    let ctor = self.parse_constructor(start, modifiers, annotations, type_params);
                    decl.members.push(Member::Constructor(ctor));
                } else if self.at_type_start() || self.at(SyntaxKind::VoidKw) {
                    let return_type = self.parse_return_type();
                    if self.at(SyntaxKind::Identifier) {
                        let method = self.parse_method(
                            start,
                            modifiers,
                            annotations,
                            type_params,
                            return_type,
                        );
                        decl.members.push(Member::Method(method));
                    } else {
                        self.error_here("expected method name");
                    }
                } else {
                    self.error_here("expected method declaration");
                }
            }
            SyntaxKind::Identifier if self.nth(1) == SyntaxKind::LParen => {
                let ctor = self.parse_constructor(start, modifiers, annotations, Vec::new());
                decl.members.push(Member::Constructor(ctor));
            }
            _ if self.at_type_start() || self.at(SyntaxKind::VoidKw) => {
                let ty = self.parse_return_type();
                if self.at(SyntaxKind::Identifier)
                    && self.nth(1) == SyntaxKind::LParen
                    && !self.at_assist()
                {
                    let method =
                        self.parse_method(start, modifiers, annotations, Vec::new(), ty);
                    decl.members.push(Member::Method(method));
                } else {
                    self.parse_fields(decl, start, modifiers, annotations, ty);
                }
            }
            _ => {
                if !modifiers.is_empty() || !annotations.is_empty() {
                    self.error_here("expected member declaration");
                }
            }
        }
    }

    fn parse_fields(
        &mut self,
        decl: &mut TypeDecl,
        start: u32,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        ty: TypeRef,
    ) {
        let first = decl.members.len();
        loop {
            let name = if self.at_assist() {
                DeclName::Assist(self.decl_assist(AssistKind::FieldName, ty.clone()))
            } else if self.at(SyntaxKind::Identifier) {
                DeclName::Ident(self.bump_ident())
            } else {
                self.error_here("expected field name");
                DeclName::Ident(Ident::missing(self.prev_end()))
            };
            let dims = self.parse_dims();
            let init = if self.eat(SyntaxKind::Eq) {
                Some(self.parse_variable_init())
            } else {
                None
            };
            decl.members.push(Member::Field(FieldDecl {
                modifiers,
                annotations: annotations.clone(),
                ty: ty.clone().array_of(dims),
                name,
                init,
                range: TextRange::empty(start),
            }));
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        if !self.eat(SyntaxKind::Semicolon) {
            self.error_here("expected `;`");
        }
        let end = self.prev_end();
        for member in &mut decl.members[first..] {
            if let Member::Field(field) = member {
                field.range = TextRange { start, end };
            }
        }
    }

    fn parse_method(
        &mut self,
        start: u32,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        type_params: Vec<TypeParam>,
        return_type: TypeRef,
    ) -> MethodDecl {
        let name = self.bump_ident();
        let params = self.parse_params();
        let dims = self.parse_dims();
        let throws = self.parse_throws();
        let default_value = if self.eat(SyntaxKind::DefaultKw) {
            Some(self.parse_element_value())
        } else {
            None
        };
        let body = self.parse_method_body();
        MethodDecl {
            modifiers,
            annotations,
            type_params,
            return_type: return_type.array_of(dims),
            name,
            params,
            throws,
            default_value,
            body,
            range: TextRange {
                start,
                end: self.prev_end(),
            },
        }
    }

    fn parse_constructor(
        &mut self,
        start: u32,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        type_params: Vec<TypeParam>,
    ) -> ConstructorDecl {
        let name = self.bump_ident();
        let params = self.parse_params();
        let throws = self.parse_throws();
        let body = self.parse_method_body();
        ConstructorDecl {
            modifiers,
            annotations,
            type_params,
            name,
            params,
            throws,
            body,
            is_default: false,
            range: TextRange {
                start,
                end: self.prev_end(),
            },
        }
    }

    fn parse_throws(&mut self) -> Vec<TypeRef> {
        if !self.eat(SyntaxKind::ThrowsKw) {
            return Vec::new();
        }
        let mut throws = self.parse_type_list(AssistKind::Exception);
        throws.retain(|ty| !matches!(ty, TypeRef::Missing));
        throws
    }

    /// `{ ... }`, `;`, or nothing at all: a header cut short by recovery
    /// still gets an (empty) body.
    fn parse_method_body(&mut self) -> Body {
        match self.current() {
            SyntaxKind::LBrace => self.parse_member_body(),
            SyntaxKind::Semicolon => {
                self.bump();
                Body::Absent
            }
            _ => {
                self.error_here("expected `{` or `;`");
                Body::Parsed(Block::empty(TextRange::empty(self.prev_end())))
            }
        }
    }

    fn parse_params(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        if !self.at(SyntaxKind::LParen) {
            self.error_here("expected `(`");
            return params;
        }
        self.bump();
        let depth = self.frames.push(FrameKind::Parens);
        loop {
            if self.eat(SyntaxKind::RParen) {
                break;
            }
            if self.unwinds(depth) || self.member_starts_in_params() {
                self.error_here("expected `)`");
                break;
            }
            let before = self.pos;
            match self.parse_param() {
                Some(param) => params.push(param),
                None => {
                    self.error_here("expected parameter");
                    if self.pos == before {
                        self.bump();
                    }
                    continue;
                }
            }
            if self.eat(SyntaxKind::Comma) || self.at(SyntaxKind::RParen) {
                continue;
            }
            if self.anchor().is_some() || self.member_starts_in_params() {
                continue;
            }
            self.error_here("expected `,` or `)`");
            self.bump();
        }
        self.frames.pop_to(depth);
        params
    }

    /// A parameter list cut off by the next member: `int foo(int bar(` or
    /// `foo(static`.
    fn member_starts_in_params(&self) -> bool {
        let after_separator = self.pos.checked_sub(1).is_some_and(|prev| {
            matches!(
                self.tokens[prev].kind,
                SyntaxKind::LParen | SyntaxKind::Comma
            )
        });
        after_separator
            && (self.current().is_member_only_modifier()
                || method_header_at(&self.tokens[..self.limit], self.pos))
    }

    fn parse_param(&mut self) -> Option<Param> {
        let (modifiers, annotations) = self.parse_modifiers(ModifierContext::Parameter);
        if !self.at_type_start() {
            return None;
        }
        let ty = self.parse_type();
        let mut varargs = false;
        if self.at(SyntaxKind::Ellipsis) {
            if self.supports(JavaFeature::Varargs) {
                varargs = true;
            } else {
                self.feature_error(JavaFeature::Varargs, self.current_range());
            }
            self.bump();
        }
        let name = if self.at_assist() {
            DeclName::Assist(self.decl_assist(AssistKind::ArgumentName, ty.clone()))
        } else if self.at(SyntaxKind::Identifier) {
            DeclName::Ident(self.bump_ident())
        } else {
            self.error_here("expected parameter name");
            DeclName::Ident(Ident::missing(self.prev_end()))
        };
        let dims = self.parse_dims();
        Some(Param {
            modifiers,
            annotations,
            ty: ty.array_of(dims),
            varargs,
            name,
        })
    }
}

/// Adds the implicit no-argument constructor a class or enum gets when it
/// declares none.
fn add_default_constructor(decl: &mut TypeDecl) {
    let modifiers = match (decl.kind, decl.nesting) {
        (TypeKind::Class, Nesting::TopLevel | Nesting::Member | Nesting::Local) => {
            decl.modifiers & Modifiers::ACCESS
        }
        (TypeKind::Enum, _) => Modifiers::PRIVATE,
        _ => return,
    };
    if decl.name.is_missing() || decl.constructors().next().is_some() {
        return;
    }
    let at = decl.name.range.end;
    decl.members.push(Member::Constructor(ConstructorDecl {
        modifiers,
        annotations: Vec::new(),
        type_params: Vec::new(),
        name: decl.name.clone(),
        params: Vec::new(),
        throws: Vec::new(),
        body: Body::Parsed(Block::empty(TextRange::empty(at))),
        is_default: true,
        range: TextRange::empty(at),
    }));
}
