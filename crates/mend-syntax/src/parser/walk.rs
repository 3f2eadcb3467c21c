//! Mutable pre-order walks over every type declaration in a tree, including
//! local and anonymous types inside parsed bodies and initializers.

use crate::ast::{
    AssistTarget, Block, Body, CompilationUnit, ConstructorCall, ElementValue, Expr, LambdaBody,
    Member, Stmt, TypeDecl, TypeKind,
};

pub(crate) fn visit_types_mut(unit: &mut CompilationUnit, f: &mut dyn FnMut(&mut TypeDecl)) {
    for ty in &mut unit.types {
        visit_type_mut(ty, f);
    }
}

/// Calls `f` on `ty` and then on every type nested in it. `f` runs before the
/// children are visited, so bodies it parses are walked too.
pub(crate) fn visit_type_mut(ty: &mut TypeDecl, f: &mut dyn FnMut(&mut TypeDecl)) {
    f(ty);
    for constant in &mut ty.enum_constants {
        for arg in constant.args.iter_mut().flatten() {
            visit_expr(arg, f);
        }
        if let Some(body) = &mut constant.body {
            visit_type_mut(body, f);
        }
    }
    for member in &mut ty.members {
        match member {
            Member::Field(field) => {
                if let Some(init) = &mut field.init {
                    visit_expr(init, f);
                }
            }
            Member::Method(method) => {
                if let Some(value) = &mut method.default_value {
                    visit_element_value(value, f);
                }
                visit_body(&mut method.body, f);
            }
            Member::Constructor(ctor) => visit_body(&mut ctor.body, f),
            Member::Initializer(init) => visit_body(&mut init.body, f),
            Member::Type(inner) => visit_type_mut(inner, f),
        }
    }
}

fn visit_body(body: &mut Body, f: &mut dyn FnMut(&mut TypeDecl)) {
    if let Body::Parsed(block) = body {
        visit_block(block, f);
    }
}

fn visit_block(block: &mut Block, f: &mut dyn FnMut(&mut TypeDecl)) {
    for stmt in &mut block.stmts {
        visit_stmt(stmt, f);
    }
}

fn visit_element_value(value: &mut ElementValue, f: &mut dyn FnMut(&mut TypeDecl)) {
    match value {
        ElementValue::Expr(expr) => visit_expr(expr, f),
        ElementValue::Annotation(_) => {}
        ElementValue::Array(values) => {
            for value in values {
                visit_element_value(value, f);
            }
        }
    }
}

fn visit_stmt(stmt: &mut Stmt, f: &mut dyn FnMut(&mut TypeDecl)) {
    match stmt {
        Stmt::Block(block) => visit_block(block, f),
        Stmt::LocalVar(var) => {
            if let Some(init) = &mut var.init {
                visit_expr(init, f);
            }
        }
        Stmt::LocalType(ty) => visit_type_mut(ty, f),
        Stmt::Expr(expr) | Stmt::Throw(expr) => visit_expr(expr, f),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visit_expr(cond, f);
            visit_stmt(then_branch, f);
            if let Some(else_branch) = else_branch {
                visit_stmt(else_branch, f);
            }
        }
        Stmt::While { cond, body } | Stmt::DoWhile { body, cond } => {
            visit_expr(cond, f);
            visit_stmt(body, f);
        }
        Stmt::For {
            init,
            cond,
            update,
            body,
        } => {
            for stmt in init {
                visit_stmt(stmt, f);
            }
            if let Some(cond) = cond {
                visit_expr(cond, f);
            }
            for expr in update {
                visit_expr(expr, f);
            }
            visit_stmt(body, f);
        }
        Stmt::ForEach { iterable, body, .. } => {
            visit_expr(iterable, f);
            visit_stmt(body, f);
        }
        Stmt::Switch { selector, groups } => {
            visit_expr(selector, f);
            for group in groups {
                for label in group.labels.iter_mut().flatten() {
                    visit_expr(label, f);
                }
                for stmt in &mut group.stmts {
                    visit_stmt(stmt, f);
                }
            }
        }
        Stmt::Try {
            resources,
            block,
            catches,
            finally,
        } => {
            for resource in resources {
                if let Some(init) = &mut resource.init {
                    visit_expr(init, f);
                }
            }
            visit_block(block, f);
            for catch in catches {
                visit_block(&mut catch.body, f);
            }
            if let Some(finally) = finally {
                visit_block(finally, f);
            }
        }
        Stmt::Return(value) => {
            if let Some(value) = value {
                visit_expr(value, f);
            }
        }
        Stmt::Labeled { body, .. } => visit_stmt(body, f),
        Stmt::Synchronized { lock, body } => {
            visit_expr(lock, f);
            visit_block(body, f);
        }
        Stmt::Assert { cond, message } => {
            visit_expr(cond, f);
            if let Some(message) = message {
                visit_expr(message, f);
            }
        }
        Stmt::ConstructorCall(call) => visit_constructor_call(call, f),
        Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty => {}
    }
}

fn visit_constructor_call(call: &mut ConstructorCall, f: &mut dyn FnMut(&mut TypeDecl)) {
    if let Some(qualifier) = &mut call.qualifier {
        visit_expr(qualifier, f);
    }
    for arg in &mut call.args {
        visit_expr(arg, f);
    }
}

fn visit_expr(expr: &mut Expr, f: &mut dyn FnMut(&mut TypeDecl)) {
    match expr {
        Expr::New {
            outer, args, body, ..
        } => {
            if let Some(outer) = outer {
                visit_expr(outer, f);
            }
            for arg in args {
                visit_expr(arg, f);
            }
            if let Some(body) = body {
                visit_type_mut(body, f);
            }
        }
        Expr::FieldAccess { receiver, .. } => visit_expr(receiver, f),
        Expr::MethodCall { receiver, args, .. } => {
            if let Some(receiver) = receiver {
                visit_expr(receiver, f);
            }
            for arg in args {
                visit_expr(arg, f);
            }
        }
        Expr::ArrayAccess { array, index } => {
            visit_expr(array, f);
            visit_expr(index, f);
        }
        Expr::NewArray { dims, init, .. } => {
            for dim in dims.iter_mut().flatten() {
                visit_expr(dim, f);
            }
            for value in init.iter_mut().flatten() {
                visit_expr(value, f);
            }
        }
        Expr::ArrayInit(values) => {
            for value in values {
                visit_expr(value, f);
            }
        }
        Expr::Unary { operand, .. } | Expr::Postfix { operand, .. } => visit_expr(operand, f),
        Expr::Binary { lhs, rhs, .. } => {
            visit_expr(lhs, f);
            visit_expr(rhs, f);
        }
        Expr::InstanceOf { expr, .. } | Expr::Cast { expr, .. } => visit_expr(expr, f),
        Expr::Assign { target, value, .. } => {
            visit_expr(target, f);
            visit_expr(value, f);
        }
        Expr::Conditional {
            cond,
            then_expr,
            else_expr,
        } => {
            visit_expr(cond, f);
            visit_expr(then_expr, f);
            visit_expr(else_expr, f);
        }
        Expr::Lambda { body, .. } => match body {
            LambdaBody::Expr(expr) => visit_expr(expr, f),
            LambdaBody::Block(block) => visit_block(block, f),
        },
        Expr::MethodRef { target, .. } => visit_expr(target, f),
        Expr::Assist(node) => match &mut node.target {
            AssistTarget::Expr(expr) | AssistTarget::MemberAccess { receiver: expr, .. } => {
                visit_expr(expr, f)
            }
            AssistTarget::ConstructorCall(call) => visit_constructor_call(call, f),
            _ => {}
        },
        Expr::Literal { .. }
        | Expr::Name(_)
        | Expr::This
        | Expr::QualifiedThis(_)
        | Expr::Super(_)
        | Expr::ClassLiteral(_)
        | Expr::Type(_)
        | Expr::Missing => {}
    }
}

/// Whether a statement already is an explicit `this(...)`/`super(...)` call,
/// including one standing under the cursor.
fn is_constructor_call(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::ConstructorCall(_) => true,
        Stmt::Expr(Expr::Assist(node)) => matches!(node.target, AssistTarget::ConstructorCall(_)),
        _ => false,
    }
}

/// Prepends `super();` to every class constructor body that does not start
/// with an explicit constructor call. Only applies once bodies are parsed,
/// and skips classes whose header needed recovery; running it twice changes
/// nothing.
pub(crate) fn insert_implicit_super_calls(unit: &mut CompilationUnit) {
    if !unit.bodies_parsed {
        return;
    }
    let mut inserted = 0usize;
    visit_types_mut(unit, &mut |ty: &mut TypeDecl| {
        if ty.kind != TypeKind::Class || ty.header_recovered {
            return;
        }
        for member in &mut ty.members {
            let Member::Constructor(ctor) = member else {
                continue;
            };
            let Body::Parsed(block) = &mut ctor.body else {
                continue;
            };
            if block.stmts.first().is_some_and(is_constructor_call) {
                continue;
            }
            block.stmts.insert(
                0,
                Stmt::ConstructorCall(ConstructorCall {
                    is_super: true,
                    qualifier: None,
                    args: Vec::new(),
                    implicit: true,
                }),
            );
            inserted += 1;
        }
    });
    tracing::trace!(target: "mend.syntax", inserted, "implicit super() calls");
}
