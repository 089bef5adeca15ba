//! Read-only traversal of the AST
//!
//! Implement [`Visit`] and override only the methods for the nodes you care
//! about. Each default method calls the matching `walk_*` function, which
//! visits the node's children; call it from an override to keep descending.

use crate::*;

pub trait Visit {
    fn visit_definition(&mut self, def: &Definition) {
        walk_definition(self, def)
    }

    fn visit_schema(&mut self, schema: &SchemaDef) {
        walk_schema(self, schema)
    }

    fn visit_field_def(&mut self, field: &FieldDef) {
        walk_field_def(self, field)
    }

    fn visit_type(&mut self, ty: &Type) {
        walk_type(self, ty)
    }

    fn visit_query(&mut self, query: &QueryDef) {
        walk_query(self, query)
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt)
    }

    fn visit_creation(&mut self, creation: &Creation) {
        walk_creation(self, creation)
    }

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr)
    }

    fn visit_step(&mut self, step: &Step) {
        walk_step(self, step)
    }

    fn visit_last_step(&mut self, last: &LastStep) {
        walk_last_step(self, last)
    }

    fn visit_object_step(&mut self, object: &ObjectStep) {
        walk_object_step(self, object)
    }

    fn visit_id_arg(&mut self, arg: &IdArg) {
        walk_id_arg(self, arg)
    }
}

pub fn walk_source<V: Visit + ?Sized>(visitor: &mut V, source: &Source) {
    for def in &source.definitions {
        visitor.visit_definition(def);
    }
}

pub fn walk_definition<V: Visit + ?Sized>(visitor: &mut V, def: &Definition) {
    match def {
        Definition::Schema(schema) => visitor.visit_schema(schema),
        Definition::Query(query) => visitor.visit_query(query),
    }
}

pub fn walk_schema<V: Visit + ?Sized>(visitor: &mut V, schema: &SchemaDef) {
    let fields = match schema {
        SchemaDef::Node(node) => &node.fields,
        SchemaDef::Edge(edge) => &edge.properties,
        SchemaDef::Vector(vector) => &vector.fields,
    };
    for field in fields {
        visitor.visit_field_def(field);
    }
}

pub fn walk_field_def<V: Visit + ?Sized>(visitor: &mut V, field: &FieldDef) {
    visitor.visit_type(&field.ty);
}

pub fn walk_type<V: Visit + ?Sized>(visitor: &mut V, ty: &Type) {
    match ty {
        Type::Array(inner) => visitor.visit_type(inner),
        Type::Object(fields) => {
            for field in fields {
                visitor.visit_field_def(field);
            }
        }
        Type::Named(_) | Type::Date | Type::Id | Type::Reference(_) => {}
    }
}

pub fn walk_query<V: Visit + ?Sized>(visitor: &mut V, query: &QueryDef) {
    for param in &query.params {
        visitor.visit_type(&param.ty);
    }
    for stmt in &query.body {
        visitor.visit_statement(stmt);
    }
    for expr in &query.returns {
        visitor.visit_expression(expr);
    }
}

pub fn walk_statement<V: Visit + ?Sized>(visitor: &mut V, stmt: &Statement) {
    match &stmt.kind {
        StatementKind::Assignment { value, .. } => visitor.visit_expression(value),
        StatementKind::Create(creation) => visitor.visit_creation(creation),
        StatementKind::Drop { target } => {
            if let Some(target) = target {
                visitor.visit_expression(target);
            }
        }
        StatementKind::ForLoop { body, .. } => {
            for stmt in body {
                visitor.visit_statement(stmt);
            }
        }
    }
}

pub fn walk_creation<V: Visit + ?Sized>(visitor: &mut V, creation: &Creation) {
    match creation {
        Creation::AddN(node) => walk_new_fields(visitor, &node.fields),
        Creation::AddE(edge) => walk_add_edge(visitor, edge),
        Creation::AddV(vector) => walk_new_fields(visitor, &vector.fields),
        Creation::BatchAddV(_) => {}
    }
}

fn walk_add_edge<V: Visit + ?Sized>(visitor: &mut V, edge: &AddEdge) {
    walk_new_fields(visitor, &edge.fields);
    walk_endpoints(visitor, &edge.endpoints);
}

fn walk_new_fields<V: Visit + ?Sized>(visitor: &mut V, fields: &[NewField]) {
    for field in fields {
        match &field.value {
            FieldValue::Expr(expr) => visitor.visit_expression(expr),
            FieldValue::Object(nested) => walk_new_fields(visitor, nested),
        }
    }
}

fn walk_endpoints<V: Visit + ?Sized>(visitor: &mut V, endpoints: &Endpoints) {
    if let Some(from) = &endpoints.from {
        visitor.visit_id_arg(from);
    }
    if let Some(to) = &endpoints.to {
        visitor.visit_id_arg(to);
    }
}

fn walk_chain<V: Visit + ?Sized>(visitor: &mut V, steps: &[Step], last: Option<&LastStep>) {
    for step in steps {
        visitor.visit_step(step);
    }
    if let Some(last) = last {
        visitor.visit_last_step(last);
    }
}

pub fn walk_expression<V: Visit + ?Sized>(visitor: &mut V, expr: &Expression) {
    match &expr.kind {
        ExpressionKind::Traversal(traversal) => {
            match &traversal.start.selector {
                Some(StartSelector::Ids(ids)) => {
                    for id in ids {
                        visitor.visit_id_arg(id);
                    }
                }
                Some(StartSelector::ByIndex { key, value }) => {
                    visitor.visit_id_arg(key);
                    visitor.visit_expression(value);
                }
                None => {}
            }
            walk_chain(visitor, &traversal.steps, traversal.last.as_ref());
        }
        ExpressionKind::IdTraversal(traversal) => {
            walk_chain(visitor, &traversal.steps, traversal.last.as_ref());
        }
        ExpressionKind::AnonymousTraversal(traversal) => {
            walk_chain(visitor, &traversal.steps, traversal.last.as_ref());
        }
        ExpressionKind::BoolCombinator(combinator) => {
            for operand in &combinator.operands {
                visitor.visit_expression(operand);
            }
        }
        ExpressionKind::ObjectStep(object) => visitor.visit_object_step(object),
        ExpressionKind::Create(creation) => visitor.visit_creation(creation),
        ExpressionKind::Exists(inner) => visitor.visit_expression(inner),
        ExpressionKind::Literal(_)
        | ExpressionKind::Identifier(_)
        | ExpressionKind::SearchVector(_) => {}
    }
}

pub fn walk_step<V: Visit + ?Sized>(visitor: &mut V, step: &Step) {
    match &step.kind {
        StepKind::Graph(GraphStep::ShortestPath { endpoints, .. }) => {
            walk_endpoints(visitor, endpoints)
        }
        StepKind::Where(cond) => visitor.visit_expression(cond),
        StepKind::Closure { object, .. } | StepKind::Object(object) => {
            visitor.visit_object_step(object)
        }
        StepKind::Range { start, end } => {
            visitor.visit_expression(start);
            visitor.visit_expression(end);
        }
        StepKind::AddE(edge) => walk_add_edge(visitor, edge),
        StepKind::Graph(_)
        | StepKind::Exclude(_)
        | StepKind::Count
        | StepKind::Id
        | StepKind::Field(_) => {}
    }
}

pub fn walk_last_step<V: Visit + ?Sized>(visitor: &mut V, last: &LastStep) {
    match &last.kind {
        LastStepKind::BoolOp { operand, .. } => visitor.visit_expression(operand),
        LastStepKind::Update { fields } => {
            for field in fields {
                visitor.visit_expression(&field.value);
            }
        }
    }
}

pub fn walk_object_step<V: Visit + ?Sized>(visitor: &mut V, object: &ObjectStep) {
    for field in &object.fields {
        if let Some(value) = &field.value {
            visitor.visit_expression(value);
        }
    }
}

pub fn walk_id_arg<V: Visit + ?Sized>(visitor: &mut V, arg: &IdArg) {
    if let IdArg::Traversal(traversal) = arg {
        walk_chain(visitor, &traversal.steps, traversal.last.as_ref());
    }
}
