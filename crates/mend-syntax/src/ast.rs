//! Owned Java AST produced by every parse mode.
//!
//! The tree is plain data: nodes own their children and carry byte ranges.
//! Navigation back to enclosing declarations goes through [`DeclPath`]
//! (indices from the root) instead of parent pointers.

use bitflags::bitflags;

use crate::TextRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
    /// Keyword completion requested where a top-level declaration could start.
    pub keyword_assist: Option<Box<AssistNode>>,
    /// Syntax problems in source order. Empty for a clean parse.
    pub problems: Vec<crate::ParseError>,
    /// Whether method bodies have been parsed into statements (full mode or
    /// after expansion).
    pub bodies_parsed: bool,
}

impl CompilationUnit {
    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Path to the innermost type declaration (and member) enclosing `offset`.
    ///
    /// Only declaration structure is searched; local and anonymous types are
    /// reached through the members that contain them when bodies are parsed.
    pub fn path_at(&self, offset: u32) -> DeclPath {
        let mut path = DeclPath::default();
        let Some((index, mut ty)) = self
            .types
            .iter()
            .enumerate()
            .find(|(_, ty)| ty.range.contains_inclusive(offset))
        else {
            return path;
        };
        path.types.push(index);
        loop {
            let hit = ty.members.iter().enumerate().find(|(_, member)| {
                member
                    .range()
                    .is_some_and(|range| range.contains_inclusive(offset))
            });
            match hit {
                Some((member_index, Member::Type(inner))) => {
                    path.types.push(member_index);
                    ty = inner;
                }
                Some((member_index, _)) => {
                    path.member = Some(member_index);
                    return path;
                }
                None => return path,
            }
        }
    }

    /// Resolves a path produced by [`CompilationUnit::path_at`] to the chain of
    /// type declarations it names, outermost first.
    pub fn resolve_path(&self, path: &DeclPath) -> Vec<&TypeDecl> {
        let mut out = Vec::new();
        let Some((&first, rest)) = path.types.split_first() else {
            return out;
        };
        let Some(mut current) = self.types.get(first) else {
            return out;
        };
        out.push(current);
        for &index in rest {
            match current.members.get(index) {
                Some(Member::Type(inner)) => {
                    out.push(inner);
                    current = inner;
                }
                _ => break,
            }
        }
        out
    }
}

/// Index path from the unit root to a declaration.
///
/// `types[0]` indexes `CompilationUnit::types`; every following entry indexes
/// the member list of the previous type. `member` optionally names a
/// non-type member of the last type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclPath {
    pub types: Vec<usize>,
    pub member: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub text: String,
    pub range: TextRange,
}

impl Ident {
    pub fn new(text: impl Into<String>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }

    /// Placeholder for a name recovery could not find.
    pub fn missing(offset: u32) -> Self {
        Self {
            text: String::new(),
            range: TextRange {
                start: offset,
                end: offset,
            },
        }
    }

    pub fn is_missing(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub segments: Vec<Ident>,
}

impl QualifiedName {
    pub fn to_dotted(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&segment.text);
        }
        out
    }
}

/// A name slot that may hold the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameRef {
    Path(QualifiedName),
    Assist(Box<AssistNode>),
}

/// A declared name (field, local, parameter, label) that may hold the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclName {
    Ident(Ident),
    Assist(Box<AssistNode>),
}

impl DeclName {
    pub fn text(&self) -> &str {
        match self {
            DeclName::Ident(ident) => &ident.text,
            DeclName::Assist(node) => &node.partial,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, DeclName::Ident(ident) if ident.is_missing())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDecl {
    pub annotations: Vec<Annotation>,
    pub name: NameRef,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub is_static: bool,
    pub is_star: bool,
    pub name: NameRef,
    pub range: TextRange,
}

bitflags! {
    /// Declaration modifiers. Iteration order is the canonical print order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const SYNCHRONIZED = 1 << 5;
        const VOLATILE = 1 << 6;
        const TRANSIENT = 1 << 7;
        const NATIVE = 1 << 8;
        const ABSTRACT = 1 << 9;
        const STRICTFP = 1 << 10;
        const DEFAULT = 1 << 11;
    }
}

impl Modifiers {
    pub const ACCESS: Modifiers = Modifiers::PUBLIC
        .union(Modifiers::PROTECTED)
        .union(Modifiers::PRIVATE);

    /// Modifier keywords in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = String> {
        self.iter_names().map(|(name, _)| name.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: TypeRef,
    pub args: AnnotationArgs,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationArgs {
    Marker,
    Single(ElementValue),
    Named(Vec<ElementValuePair>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementValuePair {
    pub name: DeclName,
    pub value: ElementValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementValue {
    Expr(Expr),
    Annotation(Box<Annotation>),
    Array(Vec<ElementValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Anonymous,
}

/// Where a type declaration sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nesting {
    TopLevel,
    Member,
    Local,
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub nesting: Nesting,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    /// Empty for anonymous classes and for headers recovery could not name.
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    pub superclass: Option<TypeRef>,
    /// `implements` for classes and enums, `extends` for interfaces.
    pub interfaces: Vec<TypeRef>,
    pub enum_constants: Vec<EnumConstant>,
    pub members: Vec<Member>,
    /// The modifiers, annotations or header up to the body's `{` needed
    /// recovery. Such a class gets no implicit `super()` calls.
    pub header_recovered: bool,
    pub range: TextRange,
}

impl TypeDecl {
    pub fn is_class_like(&self) -> bool {
        matches!(self.kind, TypeKind::Class | TypeKind::Enum)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Constructor(ctor) => Some(ctor),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn member_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Type(ty) => Some(ty),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: Ident,
    pub bounds: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    pub annotations: Vec<Annotation>,
    pub name: Ident,
    pub args: Option<Vec<Expr>>,
    pub body: Option<Box<TypeDecl>>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer(Initializer),
    Type(TypeDecl),
}

impl Member {
    /// Source range, `None` for synthesized members.
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Member::Field(field) => Some(field.range),
            Member::Method(method) => Some(method.range),
            Member::Constructor(ctor) if ctor.is_default => None,
            Member::Constructor(ctor) => Some(ctor.range),
            Member::Initializer(init) => Some(init.range),
            Member::Type(ty) => Some(ty.range),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    pub name: DeclName,
    pub init: Option<Expr>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    pub return_type: TypeRef,
    pub name: Ident,
    pub params: Vec<Param>,
    pub throws: Vec<TypeRef>,
    /// `default` value of an annotation type element.
    pub default_value: Option<ElementValue>,
    pub body: Body,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    pub name: Ident,
    pub params: Vec<Param>,
    pub throws: Vec<TypeRef>,
    pub body: Body,
    /// Synthesized because the class declares no constructor.
    pub is_default: bool,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    pub is_static: bool,
    pub body: Body,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    pub varargs: bool,
    pub name: DeclName,
}

/// A method, constructor or initializer body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Abstract, native or interface method.
    Absent,
    /// Unparsed statements (diet mode).
    Opaque(OpaqueBody),
    Parsed(Block),
}

impl Body {
    pub fn is_opaque(&self) -> bool {
        matches!(self, Body::Opaque(_))
    }
}

/// The token range of a body left unparsed by a diet parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueBody {
    /// From just after `{` up to the closing `}` (or the point recovery closed
    /// the body).
    pub inner: TextRange,
    /// Range of the whole body including braces.
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub range: TextRange,
}

impl Block {
    pub fn empty(range: TextRange) -> Self {
        Self {
            stmts: Vec::new(),
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVar {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    pub name: DeclName,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Block(Block),
    /// One declarator; `int a, b;` yields two statements.
    LocalVar(LocalVar),
    LocalType(Box<TypeDecl>),
    Expr(Expr),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    For {
        init: Vec<Stmt>,
        cond: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        var: LocalVar,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Switch {
        selector: Expr,
        groups: Vec<SwitchGroup>,
    },
    Try {
        resources: Vec<LocalVar>,
        block: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },
    Throw(Expr),
    Return(Option<Expr>),
    Break(Option<DeclName>),
    Continue(Option<DeclName>),
    Labeled {
        label: Ident,
        body: Box<Stmt>,
    },
    Synchronized {
        lock: Expr,
        body: Block,
    },
    Assert {
        cond: Expr,
        message: Option<Expr>,
    },
    /// `this(...)`, `super(...)` or `outer.super(...)`.
    ConstructorCall(ConstructorCall),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorCall {
    pub is_super: bool,
    pub qualifier: Option<Box<Expr>>,
    pub args: Vec<Expr>,
    /// Synthesized implicit `super()`.
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchGroup {
    /// `None` is `default`.
    pub labels: Vec<Option<Expr>>,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchClause {
    pub modifiers: Modifiers,
    /// Alternatives of a multi-catch, in source order.
    pub types: Vec<TypeRef>,
    pub name: DeclName,
    pub body: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSegment {
    pub name: Ident,
    /// `Some(vec![])` is the diamond.
    pub args: Option<Vec<TypeArg>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Void,
    Named(Vec<TypeSegment>),
    Array(Box<TypeRef>),
    /// A type recovery could not read.
    Missing,
    Assist(Box<AssistNode>),
}

impl TypeRef {
    pub fn simple(name: Ident) -> Self {
        TypeRef::Named(vec![TypeSegment { name, args: None }])
    }

    pub fn array_of(self, dims: usize) -> Self {
        (0..dims).fold(self, |ty, _| TypeRef::Array(Box::new(ty)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArg {
    Type(TypeRef),
    Wildcard(Option<WildcardBound>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardBound {
    Extends(TypeRef),
    Super(TypeRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Boolean,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    PreInc,
    PreDec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    Inc,
    Dec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    UShr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// Assignment operator; `None` is plain `=`, otherwise the compound operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssignOp(pub Option<BinaryOp>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaParam {
    pub ty: Option<TypeRef>,
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal {
        kind: LiteralKind,
        text: String,
    },
    /// Simple or qualified ambiguous name (`a`, `a.b.c`).
    Name(QualifiedName),
    This,
    /// `Outer.this`
    QualifiedThis(QualifiedName),
    /// `super` as a member-access receiver; `Outer.super` when qualified.
    Super(Option<QualifiedName>),
    FieldAccess {
        receiver: Box<Expr>,
        name: Ident,
    },
    MethodCall {
        receiver: Option<Box<Expr>>,
        type_args: Vec<TypeRef>,
        name: Ident,
        args: Vec<Expr>,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    New {
        outer: Option<Box<Expr>>,
        ty: TypeRef,
        args: Vec<Expr>,
        body: Option<Box<TypeDecl>>,
    },
    NewArray {
        element: TypeRef,
        /// One entry per `[...]`; `None` for an empty dimension.
        dims: Vec<Option<Expr>>,
        init: Option<Vec<Expr>>,
    },
    ArrayInit(Vec<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    InstanceOf {
        expr: Box<Expr>,
        ty: TypeRef,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Cast {
        ty: TypeRef,
        expr: Box<Expr>,
    },
    ClassLiteral(TypeRef),
    /// A type in expression position (method reference targets).
    Type(TypeRef),
    Lambda {
        params: Vec<LambdaParam>,
        parenthesized: bool,
        body: LambdaBody,
    },
    MethodRef {
        target: Box<Expr>,
        /// `new` for constructor references.
        name: Ident,
    },
    /// A value recovery had to synthesize (`$missing$`).
    Missing,
    Assist(Box<AssistNode>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistMode {
    Completion,
    Selection,
}

/// What an assist node asks the completion/selection engine for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistKind {
    Name,
    Type,
    /// Type in a class `extends` clause.
    Class,
    /// Type in an `implements` clause or interface `extends` clause.
    Interface,
    /// Type in a `throws` clause or single-type catch.
    Exception,
    /// One alternative of a multi-catch union.
    MultiCatchException,
    MemberAccess,
    /// Cursor in the argument list of a method call.
    MessageSend,
    /// Cursor on the selector of a method call.
    MessageSendName,
    AllocationExpression,
    QualifiedAllocationExpression,
    ExplicitConstructorCall,
    QualifiedExplicitConstructorCall,
    FieldName,
    LocalName,
    ArgumentName,
    Label,
    Keyword,
    Package,
    Import,
    ClassLiteralAccess,
    ArrayInitializerElement,
    AttributeName,
}

impl AssistKind {
    /// The bracket tag printed for this kind, without the mode prefix.
    pub fn tag(self, mode: AssistMode) -> &'static str {
        match (self, mode) {
            (AssistKind::Name | AssistKind::ArrayInitializerElement, _) => "Name",
            (AssistKind::Type, _) => "Type",
            (
                AssistKind::Class
                | AssistKind::Interface
                | AssistKind::Exception
                | AssistKind::MultiCatchException,
                AssistMode::Selection,
            ) => "Type",
            (AssistKind::Class, AssistMode::Completion) => "Class",
            (AssistKind::Interface, AssistMode::Completion) => "Interface",
            (AssistKind::Exception | AssistKind::MultiCatchException, AssistMode::Completion) => {
                "Exception"
            }
            (AssistKind::MemberAccess, AssistMode::Completion) => "MemberAccess",
            (AssistKind::MemberAccess, AssistMode::Selection) => "FieldReference",
            (AssistKind::MessageSend, _) => "MessageSend",
            (AssistKind::MessageSendName, AssistMode::Completion) => "MessageSendName",
            (AssistKind::MessageSendName, AssistMode::Selection) => "MessageSend",
            (AssistKind::AllocationExpression, _) => "AllocationExpression",
            (AssistKind::QualifiedAllocationExpression, _) => "QualifiedAllocationExpression",
            (
                AssistKind::ExplicitConstructorCall | AssistKind::QualifiedExplicitConstructorCall,
                _,
            ) => "ExplicitConstructorCall",
            (AssistKind::FieldName, _) => "FieldName",
            (AssistKind::LocalName, _) => "LocalName",
            (AssistKind::ArgumentName, _) => "ArgumentName",
            (AssistKind::Label, _) => "Label",
            (AssistKind::Keyword, _) => "Keyword",
            (AssistKind::Package, _) => "Package",
            (AssistKind::Import, _) => "Import",
            (AssistKind::ClassLiteralAccess, _) => "ClassLiteralAccess",
            (AssistKind::AttributeName, _) => "AttributeName",
        }
    }
}

/// The best-guess construct an assist node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistTarget {
    /// `a.b.partial`; a trailing `.` when `partial` is empty.
    Name {
        qualifier: Vec<Ident>,
        partial: String,
    },
    MemberAccess {
        receiver: Expr,
        partial: String,
    },
    /// Call, allocation or other complete expression around the cursor.
    Expr(Expr),
    ConstructorCall(ConstructorCall),
    /// Declaration site: `int fo`.
    Decl {
        ty: TypeRef,
        name: String,
    },
    /// Keyword or label prefix.
    Word(String),
    ClassLiteral {
        ty: TypeRef,
        partial: String,
    },
}

/// The node standing in for whatever touches the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistNode {
    pub mode: AssistMode,
    pub kind: AssistKind,
    pub target: AssistTarget,
    /// Identifier text typed before the caret (the whole identifier for
    /// selections).
    pub partial: String,
    /// Source span a completion would replace.
    pub replaced: TextRange,
}
