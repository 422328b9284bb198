//! Filter expression evaluation against typed records.

use restbox_core::{
    error::RecordStoreResult,
    query::{Expr, FieldOp, QueryVisitor},
    record::Record,
    value::FilterValue,
};

pub struct RecordEvaluator<'a, R: Record> {
    record: &'a R,
}

impl<'a, R: Record> RecordEvaluator<'a, R> {
    pub fn new(record: &'a R) -> Self {
        Self { record }
    }

    pub fn evaluate(&mut self, expr: &Expr<R::Field>) -> RecordStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Keeps the records matching `expr`, in their original order.
    pub fn filter_records(
        records: impl IntoIterator<Item = &'a R>,
        expr: &Expr<R::Field>,
    ) -> RecordStoreResult<Vec<&'a R>> {
        let mut matched = Vec::new();

        for record in records {
            if RecordEvaluator::new(record).evaluate(expr)? {
                matched.push(record);
            }
        }

        Ok(matched)
    }
}

impl<'a, R: Record> QueryVisitor<R::Field> for RecordEvaluator<'a, R> {
    type Output = bool;

    fn visit_and(&mut self, exprs: &[Expr<R::Field>]) -> RecordStoreResult<Self::Output> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr<R::Field>]) -> RecordStoreResult<Self::Output> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_field(
        &mut self,
        field: &R::Field,
        op: &FieldOp,
        value: &FilterValue,
    ) -> RecordStoreResult<Self::Output> {
        let field_value = self.record.field(*field);

        match op {
            FieldOp::Eq => Ok(field_value.matches(value)),
            FieldOp::Contains => match value {
                FilterValue::Text(needle) => Ok(field_value.contains_ignore_case(needle)),
                _ => Ok(false),
            },
        }
    }
}
