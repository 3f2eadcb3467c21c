//! Canonical printed form of the AST.
//!
//! The output is the oracle the parser tests compare against, so it is
//! deterministic and independent of source formatting: two-space indentation,
//! fixed modifier order, member types first, fully parenthesised operators.
//! For trees without recovery the output is valid Java that re-parses to the
//! same tree.

use crate::ast::*;

const MISSING: &str = "$missing$";
const INDENT: &str = "  ";

/// Renders `unit` in its canonical form.
pub fn print_unit(unit: &CompilationUnit) -> String {
    let mut printer = Printer::new();
    printer.unit(unit);
    printer.finish()
}

/// Writes nodes into a string buffer.
///
/// Node methods write from the current position and leave the cursor at the
/// end of the node, without a trailing newline; only [`Printer::unit`] ends
/// lines. Nested blocks are indented relative to the printer's current level.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn ident(&mut self, ident: &Ident) {
        if ident.is_missing() {
            self.push(MISSING);
        } else {
            self.push(&ident.text);
        }
    }

    fn separated<T>(&mut self, items: &[T], sep: &str, mut f: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(sep);
            }
            f(self, item);
        }
    }

    pub fn unit(&mut self, unit: &CompilationUnit) {
        if let Some(package) = &unit.package {
            self.annotations(&package.annotations);
            self.push("package ");
            self.name_ref(&package.name);
            self.push(";");
            self.newline();
        }
        for import in &unit.imports {
            self.push("import ");
            if import.is_static {
                self.push("static ");
            }
            self.name_ref(&import.name);
            if import.is_star {
                self.push(".*");
            }
            self.push(";");
            self.newline();
        }
        for ty in &unit.types {
            self.type_decl(ty);
            self.newline();
        }
        if let Some(node) = &unit.keyword_assist {
            self.assist(node);
            self.newline();
        }
    }

    fn name_ref(&mut self, name: &NameRef) {
        match name {
            NameRef::Path(path) => self.push(&path.to_dotted()),
            NameRef::Assist(node) => self.assist(node),
        }
    }

    fn decl_name(&mut self, name: &DeclName) {
        match name {
            DeclName::Ident(ident) => self.ident(ident),
            DeclName::Assist(node) => self.assist(node),
        }
    }

    /// Modifier keywords followed by a space each.
    fn modifiers(&mut self, modifiers: Modifiers) {
        for keyword in modifiers.keywords() {
            self.push(&keyword);
            self.push(" ");
        }
    }

    /// Annotations followed by a space each.
    fn annotations(&mut self, annotations: &[Annotation]) {
        for annotation in annotations {
            self.annotation(annotation);
            self.push(" ");
        }
    }

    pub fn annotation(&mut self, annotation: &Annotation) {
        self.push("@");
        self.type_ref(&annotation.name);
        match &annotation.args {
            AnnotationArgs::Marker => {}
            AnnotationArgs::Single(value) => {
                self.push("(");
                self.element_value(value);
                self.push(")");
            }
            AnnotationArgs::Named(pairs) => {
                self.push("(");
                self.separated(pairs, ", ", |p, pair| {
                    let assist_only = matches!(pair.name, DeclName::Assist(_))
                        && matches!(pair.value, ElementValue::Expr(Expr::Missing));
                    p.decl_name(&pair.name);
                    if !assist_only {
                        p.push(" = ");
                        p.element_value(&pair.value);
                    }
                });
                self.push(")");
            }
        }
    }

    fn element_value(&mut self, value: &ElementValue) {
        match value {
            ElementValue::Expr(expr) => self.expr(expr),
            ElementValue::Annotation(annotation) => self.annotation(annotation),
            ElementValue::Array(values) => {
                self.push("{");
                self.separated(values, ", ", |p, value| p.element_value(value));
                self.push("}");
            }
        }
    }

    // --- declarations ---

    pub fn type_decl(&mut self, ty: &TypeDecl) {
        self.modifiers(ty.modifiers);
        self.annotations(&ty.annotations);
        let keyword = match ty.kind {
            TypeKind::Class | TypeKind::Anonymous => "class ",
            TypeKind::Interface => "interface ",
            TypeKind::Enum => "enum ",
            TypeKind::Annotation => "@interface ",
        };
        self.push(keyword);
        self.ident(&ty.name);
        self.type_params(&ty.type_params);
        if let Some(superclass) = &ty.superclass {
            self.push(" extends ");
            self.type_ref(superclass);
        }
        if !ty.interfaces.is_empty() {
            self.push(if ty.kind == TypeKind::Interface {
                " extends "
            } else {
                " implements "
            });
            self.separated(&ty.interfaces, ", ", |p, ty| p.type_ref(ty));
        }
        self.push(" ");
        self.type_body(ty);
    }

    /// `{`, enum constants and members in canonical order, `}`.
    fn type_body(&mut self, ty: &TypeDecl) {
        self.push("{");
        self.newline();
        self.indent += 1;

        let count = ty.enum_constants.len();
        for (i, constant) in ty.enum_constants.iter().enumerate() {
            self.write_indent();
            self.enum_constant(constant);
            self.push(if i + 1 == count { ";" } else { "," });
            self.newline();
        }
        if ty.kind == TypeKind::Enum && count == 0 && !ty.members.is_empty() {
            self.write_indent();
            self.push(";");
            self.newline();
        }

        let member_types = ty.members.iter().filter(|m| matches!(m, Member::Type(_)));
        let fields = ty
            .members
            .iter()
            .filter(|m| matches!(m, Member::Field(_) | Member::Initializer(_)));
        let default_ctor = ty
            .members
            .iter()
            .filter(|m| matches!(m, Member::Constructor(ctor) if ctor.is_default));
        let rest = ty.members.iter().filter(|m| match m {
            Member::Method(_) => true,
            Member::Constructor(ctor) => !ctor.is_default,
            _ => false,
        });
        for member in member_types.chain(fields).chain(default_ctor).chain(rest) {
            self.write_indent();
            self.member(member);
            self.newline();
        }

        self.indent -= 1;
        self.write_indent();
        self.push("}");
    }

    fn enum_constant(&mut self, constant: &EnumConstant) {
        self.annotations(&constant.annotations);
        self.ident(&constant.name);
        if let Some(args) = &constant.args {
            self.arguments(args);
        }
        if let Some(body) = &constant.body {
            self.push(" ");
            self.type_body(body);
        }
    }

    pub fn member(&mut self, member: &Member) {
        match member {
            Member::Field(field) => self.field(field),
            Member::Method(method) => self.method(method),
            Member::Constructor(ctor) => self.constructor(ctor),
            Member::Initializer(init) => {
                if init.is_static {
                    self.push("static ");
                }
                self.body(&init.body);
            }
            Member::Type(ty) => self.type_decl(ty),
        }
    }

    fn field(&mut self, field: &FieldDecl) {
        self.modifiers(field.modifiers);
        self.annotations(&field.annotations);
        match &field.name {
            DeclName::Assist(node) => self.assist(node),
            DeclName::Ident(name) if name.is_missing() => self.type_ref(&field.ty),
            DeclName::Ident(name) => {
                self.type_ref(&field.ty);
                self.push(" ");
                self.ident(name);
            }
        }
        if let Some(init) = &field.init {
            self.push(" = ");
            self.expr(init);
        }
        self.push(";");
    }

    fn method(&mut self, method: &MethodDecl) {
        self.modifiers(method.modifiers);
        self.annotations(&method.annotations);
        if !method.type_params.is_empty() {
            self.type_params(&method.type_params);
            self.push(" ");
        }
        self.type_ref(&method.return_type);
        self.push(" ");
        self.ident(&method.name);
        self.params(&method.params);
        self.throws(&method.throws);
        if let Some(value) = &method.default_value {
            self.push(" default ");
            self.element_value(value);
        }
        if !matches!(method.body, Body::Absent) {
            self.push(" ");
        }
        self.body(&method.body);
    }

    fn constructor(&mut self, ctor: &ConstructorDecl) {
        self.modifiers(ctor.modifiers);
        self.annotations(&ctor.annotations);
        if !ctor.type_params.is_empty() {
            self.type_params(&ctor.type_params);
            self.push(" ");
        }
        self.ident(&ctor.name);
        self.params(&ctor.params);
        self.throws(&ctor.throws);
        if !matches!(ctor.body, Body::Absent) {
            self.push(" ");
        }
        self.body(&ctor.body);
    }

    fn params(&mut self, params: &[Param]) {
        self.push("(");
        self.separated(params, ", ", |p, param| p.param(param));
        self.push(")");
    }

    fn param(&mut self, param: &Param) {
        self.modifiers(param.modifiers);
        self.annotations(&param.annotations);
        if let DeclName::Assist(node) = &param.name {
            self.assist(node);
            return;
        }
        self.type_ref(&param.ty);
        if param.varargs {
            self.push("...");
        }
        self.push(" ");
        self.decl_name(&param.name);
    }

    fn throws(&mut self, throws: &[TypeRef]) {
        if !throws.is_empty() {
            self.push(" throws ");
            self.separated(throws, ", ", |p, ty| p.type_ref(ty));
        }
    }

    fn body(&mut self, body: &Body) {
        match body {
            Body::Absent => self.push(";"),
            Body::Opaque(_) => {
                self.push("{");
                self.newline();
                self.write_indent();
                self.push("}");
            }
            Body::Parsed(block) => self.block(block),
        }
    }

    fn type_params(&mut self, params: &[TypeParam]) {
        if params.is_empty() {
            return;
        }
        self.push("<");
        self.separated(params, ", ", |p, param| {
            p.ident(&param.name);
            if !param.bounds.is_empty() {
                p.push(" extends ");
                p.separated(&param.bounds, " & ", |p, bound| p.type_ref(bound));
            }
        });
        self.push(">");
    }

    // --- types ---

    pub fn type_ref(&mut self, ty: &TypeRef) {
        match ty {
            TypeRef::Primitive(primitive) => self.push(primitive.keyword()),
            TypeRef::Void => self.push("void"),
            TypeRef::Named(segments) => {
                self.separated(segments, ".", |p, segment| {
                    p.ident(&segment.name);
                    if let Some(args) = &segment.args {
                        p.push("<");
                        p.separated(args, ", ", |p, arg| p.type_arg(arg));
                        p.push(">");
                    }
                });
            }
            TypeRef::Array(element) => {
                self.type_ref(element);
                self.push("[]");
            }
            TypeRef::Missing => self.push(MISSING),
            TypeRef::Assist(node) => self.assist(node),
        }
    }

    fn type_arg(&mut self, arg: &TypeArg) {
        match arg {
            TypeArg::Type(ty) => self.type_ref(ty),
            TypeArg::Wildcard(None) => self.push("?"),
            TypeArg::Wildcard(Some(WildcardBound::Extends(ty))) => {
                self.push("? extends ");
                self.type_ref(ty);
            }
            TypeArg::Wildcard(Some(WildcardBound::Super(ty))) => {
                self.push("? super ");
                self.type_ref(ty);
            }
        }
    }

    // --- statements ---

    fn block(&mut self, block: &Block) {
        self.push("{");
        self.newline();
        self.indent += 1;
        for stmt in &block.stmts {
            self.write_indent();
            self.stmt(stmt);
            self.newline();
        }
        self.indent -= 1;
        self.write_indent();
        self.push("}");
    }

    /// Body of `if`/`while`/`for`: a block stays on the header line, anything
    /// else goes on its own line one level deeper.
    fn branch(&mut self, body: &Stmt) {
        if let Stmt::Block(block) = body {
            self.push(" ");
            self.block(block);
        } else {
            self.newline();
            self.indent += 1;
            self.write_indent();
            self.stmt(body);
            self.indent -= 1;
        }
    }

    fn local_var(&mut self, var: &LocalVar) {
        self.modifiers(var.modifiers);
        self.annotations(&var.annotations);
        if !matches!(var.name, DeclName::Assist(_)) {
            self.type_ref(&var.ty);
            self.push(" ");
        }
        self.decl_name(&var.name);
        if let Some(init) = &var.init {
            self.push(" = ");
            self.expr(init);
        }
    }

    pub fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.block(block),
            Stmt::LocalVar(var) => {
                self.local_var(var);
                self.push(";");
            }
            Stmt::LocalType(ty) => self.type_decl(ty),
            Stmt::Expr(expr) => {
                self.top_level_expr(expr);
                self.push(";");
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.push("if (");
                self.expr(cond);
                self.push(")");
                self.branch(then_branch);
                if let Some(else_branch) = else_branch {
                    if matches!(**then_branch, Stmt::Block(_)) {
                        self.push(" ");
                    } else {
                        self.newline();
                        self.write_indent();
                    }
                    self.push("else");
                    if matches!(**else_branch, Stmt::If { .. }) {
                        self.push(" ");
                        self.stmt(else_branch);
                    } else {
                        self.branch(else_branch);
                    }
                }
            }
            Stmt::While { cond, body } => {
                self.push("while (");
                self.expr(cond);
                self.push(")");
                self.branch(body);
            }
            Stmt::DoWhile { body, cond } => {
                self.push("do");
                self.branch(body);
                if matches!(**body, Stmt::Block(_)) {
                    self.push(" ");
                } else {
                    self.newline();
                    self.write_indent();
                }
                self.push("while (");
                self.expr(cond);
                self.push(");");
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                self.push("for (");
                self.for_init(init);
                self.push(";");
                if let Some(cond) = cond {
                    self.push(" ");
                    self.expr(cond);
                }
                self.push(";");
                if !update.is_empty() {
                    self.push(" ");
                    self.separated(update, ", ", |p, expr| p.top_level_expr(expr));
                }
                self.push(")");
                self.branch(body);
            }
            Stmt::ForEach {
                var,
                iterable,
                body,
            } => {
                self.push("for (");
                self.local_var(var);
                self.push(" : ");
                self.expr(iterable);
                self.push(")");
                self.branch(body);
            }
            Stmt::Switch { selector, groups } => {
                self.push("switch (");
                self.expr(selector);
                self.push(") {");
                self.newline();
                self.indent += 1;
                for group in groups {
                    for label in &group.labels {
                        self.write_indent();
                        match label {
                            Some(expr) => {
                                self.push("case ");
                                self.expr(expr);
                                self.push(":");
                            }
                            None => self.push("default:"),
                        }
                        self.newline();
                    }
                    self.indent += 1;
                    for stmt in &group.stmts {
                        self.write_indent();
                        self.stmt(stmt);
                        self.newline();
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                self.write_indent();
                self.push("}");
            }
            Stmt::Try {
                resources,
                block,
                catches,
                finally,
            } => {
                self.push("try ");
                if !resources.is_empty() {
                    self.push("(");
                    self.separated(resources, "; ", |p, var| p.local_var(var));
                    self.push(") ");
                }
                self.block(block);
                for catch in catches {
                    self.push(" catch (");
                    self.modifiers(catch.modifiers);
                    if let DeclName::Assist(node) = &catch.name {
                        self.assist(node);
                    } else {
                        self.separated(&catch.types, " | ", |p, ty| p.type_ref(ty));
                        self.push(" ");
                        self.decl_name(&catch.name);
                    }
                    self.push(") ");
                    self.block(&catch.body);
                }
                if let Some(finally) = finally {
                    self.push(" finally ");
                    self.block(finally);
                }
            }
            Stmt::Throw(expr) => {
                self.push("throw ");
                self.expr(expr);
                self.push(";");
            }
            Stmt::Return(value) => {
                self.push("return");
                if let Some(value) = value {
                    self.push(" ");
                    self.expr(value);
                }
                self.push(";");
            }
            Stmt::Break(label) | Stmt::Continue(label) => {
                self.push(if matches!(stmt, Stmt::Break(_)) {
                    "break"
                } else {
                    "continue"
                });
                if let Some(label) = label {
                    self.push(" ");
                    self.decl_name(label);
                }
                self.push(";");
            }
            Stmt::Labeled { label, body } => {
                self.ident(label);
                self.push(": ");
                self.stmt(body);
            }
            Stmt::Synchronized { lock, body } => {
                self.push("synchronized (");
                self.expr(lock);
                self.push(") ");
                self.block(body);
            }
            Stmt::Assert { cond, message } => {
                self.push("assert ");
                self.expr(cond);
                if let Some(message) = message {
                    self.push(" : ");
                    self.expr(message);
                }
                self.push(";");
            }
            Stmt::ConstructorCall(call) => {
                self.constructor_call(call);
                self.push(";");
            }
            Stmt::Empty => self.push(";"),
        }
    }

    /// `int i = 0, j = 1` for declarations sharing a type, otherwise the
    /// expressions separated by commas.
    fn for_init(&mut self, init: &[Stmt]) {
        for (i, stmt) in init.iter().enumerate() {
            match stmt {
                Stmt::LocalVar(var) if i > 0 && matches!(init[i - 1], Stmt::LocalVar(_)) => {
                    self.push(", ");
                    self.decl_name(&var.name);
                    if let Some(value) = &var.init {
                        self.push(" = ");
                        self.expr(value);
                    }
                }
                Stmt::LocalVar(var) => self.local_var(var),
                Stmt::Expr(expr) => {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.top_level_expr(expr);
                }
                other => self.stmt(other),
            }
        }
    }

    fn constructor_call(&mut self, call: &ConstructorCall) {
        if let Some(qualifier) = &call.qualifier {
            self.expr(qualifier);
            self.push(".");
        }
        self.push(if call.is_super { "super" } else { "this" });
        self.arguments(&call.args);
    }

    // --- expressions ---

    /// An expression in statement position: a top-level assignment is not
    /// parenthesised.
    fn top_level_expr(&mut self, expr: &Expr) {
        if let Expr::Assign { op, target, value } = expr {
            self.assignment(*op, target, value);
        } else {
            self.expr(expr);
        }
    }

    fn assignment(&mut self, op: AssignOp, target: &Expr, value: &Expr) {
        self.expr(target);
        self.push(" ");
        if let Some(op) = op.0 {
            self.push(op.symbol());
        }
        self.push("= ");
        self.expr(value);
    }

    fn arguments(&mut self, args: &[Expr]) {
        self.push("(");
        self.separated(args, ", ", |p, arg| p.expr(arg));
        self.push(")");
    }

    fn anonymous_body(&mut self, body: &TypeDecl) {
        self.push(" ");
        self.type_body(body);
    }

    pub fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { text, .. } => self.push(text),
            Expr::Name(name) => self.push(&name.to_dotted()),
            Expr::This => self.push("this"),
            Expr::QualifiedThis(name) => {
                self.push(&name.to_dotted());
                self.push(".this");
            }
            Expr::Super(qualifier) => {
                if let Some(qualifier) = qualifier {
                    self.push(&qualifier.to_dotted());
                    self.push(".");
                }
                self.push("super");
            }
            Expr::FieldAccess { receiver, name } => {
                self.expr(receiver);
                self.push(".");
                self.ident(name);
            }
            Expr::MethodCall {
                receiver,
                type_args,
                name,
                args,
            } => {
                if let Some(receiver) = receiver {
                    self.expr(receiver);
                    self.push(".");
                }
                if !type_args.is_empty() {
                    self.push("<");
                    self.separated(type_args, ", ", |p, ty| p.type_ref(ty));
                    self.push(">");
                }
                self.ident(name);
                self.arguments(args);
            }
            Expr::ArrayAccess { array, index } => {
                self.expr(array);
                self.push("[");
                self.expr(index);
                self.push("]");
            }
            Expr::New {
                outer,
                ty,
                args,
                body,
            } => {
                if let Some(outer) = outer {
                    self.expr(outer);
                    self.push(".");
                }
                self.push("new ");
                self.type_ref(ty);
                self.arguments(args);
                if let Some(body) = body {
                    self.anonymous_body(body);
                }
            }
            Expr::NewArray {
                element,
                dims,
                init,
            } => {
                self.push("new ");
                self.type_ref(element);
                for dim in dims {
                    self.push("[");
                    if let Some(dim) = dim {
                        self.expr(dim);
                    }
                    self.push("]");
                }
                if let Some(values) = init {
                    self.array_init(values);
                }
            }
            Expr::ArrayInit(values) => self.array_init(values),
            Expr::Unary { op, operand } => {
                self.push("(");
                self.push(match op {
                    UnaryOp::Plus => "+",
                    UnaryOp::Minus => "-",
                    UnaryOp::Not => "!",
                    UnaryOp::BitNot => "~",
                    UnaryOp::PreInc => "++",
                    UnaryOp::PreDec => "--",
                });
                self.expr(operand);
                self.push(")");
            }
            Expr::Postfix { op, operand } => {
                self.expr(operand);
                self.push(match op {
                    PostfixOp::Inc => "++",
                    PostfixOp::Dec => "--",
                });
            }
            Expr::Binary { op, lhs, rhs } => {
                self.push("(");
                self.expr(lhs);
                self.push(" ");
                self.push(op.symbol());
                self.push(" ");
                self.expr(rhs);
                self.push(")");
            }
            Expr::InstanceOf { expr, ty } => {
                self.push("(");
                self.expr(expr);
                self.push(" instanceof ");
                self.type_ref(ty);
                self.push(")");
            }
            Expr::Assign { op, target, value } => {
                self.push("(");
                self.assignment(*op, target, value);
                self.push(")");
            }
            Expr::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                self.push("(");
                self.expr(cond);
                self.push(" ? ");
                self.expr(then_expr);
                self.push(" : ");
                self.expr(else_expr);
                self.push(")");
            }
            Expr::Cast { ty, expr } => {
                self.push("((");
                self.type_ref(ty);
                self.push(") ");
                self.expr(expr);
                self.push(")");
            }
            Expr::ClassLiteral(ty) => {
                self.type_ref(ty);
                self.push(".class");
            }
            Expr::Type(ty) => self.type_ref(ty),
            Expr::Lambda {
                params,
                parenthesized,
                body,
            } => {
                if *parenthesized {
                    self.push("(");
                }
                self.separated(params, ", ", |p, param| {
                    if let Some(ty) = &param.ty {
                        p.type_ref(ty);
                        p.push(" ");
                    }
                    p.ident(&param.name);
                });
                if *parenthesized {
                    self.push(")");
                }
                self.push(" -> ");
                match body {
                    LambdaBody::Expr(expr) => self.expr(expr),
                    LambdaBody::Block(block) => self.block(block),
                }
            }
            Expr::MethodRef { target, name } => {
                self.expr(target);
                self.push("::");
                self.ident(name);
            }
            Expr::Missing => self.push(MISSING),
            Expr::Assist(node) => self.assist(node),
        }
    }

    fn array_init(&mut self, values: &[Expr]) {
        self.push("{");
        self.separated(values, ", ", |p, value| p.expr(value));
        self.push("}");
    }

    // --- assist nodes ---

    /// `<CompleteOnKind:content>` or `<SelectOnKind:content>`.
    pub fn assist(&mut self, node: &AssistNode) {
        self.push(match node.mode {
            AssistMode::Completion => "<CompleteOn",
            AssistMode::Selection => "<SelectOn",
        });
        self.push(node.kind.tag(node.mode));
        self.push(":");
        match &node.target {
            AssistTarget::Name { qualifier, partial } => {
                for segment in qualifier {
                    self.ident(segment);
                    self.push(".");
                }
                self.push(partial);
            }
            AssistTarget::MemberAccess { receiver, partial } => {
                self.expr(receiver);
                self.push(".");
                self.push(partial);
            }
            AssistTarget::Expr(expr) => self.expr(expr),
            AssistTarget::ConstructorCall(call) => self.constructor_call(call),
            AssistTarget::Decl { ty, name } => {
                self.type_ref(ty);
                self.push(" ");
                self.push(name);
            }
            AssistTarget::Word(word) => self.push(word),
            AssistTarget::ClassLiteral { ty, partial } => {
                self.type_ref(ty);
                self.push(".");
                self.push(partial);
            }
        }
        self.push(">");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TextRange;

    fn ident(text: &str) -> Ident {
        Ident::new(text, TextRange::empty(0))
    }

    fn name(text: &str) -> Expr {
        Expr::Name(QualifiedName {
            segments: vec![ident(text)],
        })
    }

    fn print_expr(expr: &Expr) -> String {
        let mut printer = Printer::new();
        printer.expr(expr);
        printer.finish()
    }

    #[test]
    fn operators_are_fully_parenthesised() {
        let expr = Expr::Binary {
            op: BinaryOp::Mul,
            lhs: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(name("a")),
                rhs: Box::new(name("b")),
            }),
            rhs: Box::new(Expr::Unary {
                op: UnaryOp::Minus,
                operand: Box::new(name("c")),
            }),
        };
        assert_eq!(print_expr(&expr), "((a + b) * (-c))");
    }

    #[test]
    fn statement_level_assignment_is_bare() {
        let assign = Expr::Assign {
            op: AssignOp(Some(BinaryOp::Add)),
            target: Box::new(name("x")),
            value: Box::new(Expr::Missing),
        };
        let mut printer = Printer::new();
        printer.stmt(&Stmt::Expr(assign.clone()));
        assert_eq!(printer.finish(), "x += $missing$;");
        assert_eq!(print_expr(&assign), "(x += $missing$)");
    }

    #[test]
    fn assist_nodes_use_bracket_syntax() {
        let node = AssistNode {
            mode: AssistMode::Completion,
            kind: AssistKind::Name,
            target: AssistTarget::Name {
                qualifier: vec![ident("s")],
                partial: String::new(),
            },
            partial: String::new(),
            replaced: TextRange::new(0, 2),
        };
        let mut printer = Printer::new();
        printer.assist(&node);
        assert_eq!(printer.finish(), "<CompleteOnName:s.>");

        let node = AssistNode {
            mode: AssistMode::Selection,
            kind: AssistKind::Class,
            target: AssistTarget::Name {
                qualifier: Vec::new(),
                partial: "IOException".to_owned(),
            },
            partial: "IOException".to_owned(),
            replaced: TextRange::new(0, 11),
        };
        let mut printer = Printer::new();
        printer.assist(&node);
        assert_eq!(printer.finish(), "<SelectOnType:IOException>");
    }

    #[test]
    fn else_if_chains_and_non_block_branches() {
        let stmt = Stmt::If {
            cond: name("a"),
            then_branch: Box::new(Stmt::Return(None)),
            else_branch: Some(Box::new(Stmt::If {
                cond: name("b"),
                then_branch: Box::new(Stmt::Block(Block::empty(TextRange::empty(0)))),
                else_branch: Some(Box::new(Stmt::Empty)),
            })),
        };
        let mut printer = Printer::new();
        printer.stmt(&stmt);
        assert_eq!(
            printer.finish(),
            "if (a)\n  return;\nelse if (b) {\n} else\n  ;"
        );
    }
}
