//! Array literals, indexing and index assignment.
//!
//! Arrays are shared: indexing returns the stored element (retained, not
//! copied) and index assignment mutates the array in place, visible through
//! every binding that holds it.

use yuji_ir::Expr;

use super::Interpreter;
use crate::errors::{index_out_of_bounds, invalid_index_type, not_indexable, EvalError};
use crate::flow::{Flow, FlowResult};
use crate::value::{ArrayBuf, Heap, Value};

/// Check that `target[index]` names an existing element.
fn array_slot<'v>(target: &'v Value, index: &Value) -> Result<(&'v Heap<ArrayBuf>, usize), EvalError> {
    let Value::Array(items) = target else {
        return Err(not_indexable(target.type_name()));
    };
    let &Value::Int(i) = index else {
        return Err(invalid_index_type(index.type_name()));
    };
    let len = items.borrow().len();
    match usize::try_from(i) {
        Ok(slot) if slot < len => Ok((items, slot)),
        _ => Err(index_out_of_bounds(i, len)),
    }
}

impl Interpreter {
    pub(super) fn eval_array(&mut self, elements: &[Expr]) -> FlowResult {
        let mut items = Vec::with_capacity(elements.len());
        for element in elements {
            items.push(value_of!(self.eval_expr(element)));
        }
        Ok(Flow::Normal(Value::array(items)))
    }

    pub(super) fn eval_index(&mut self, object: &Expr, index: &Expr) -> FlowResult {
        let target = value_of!(self.eval_expr(object));
        let index = value_of!(self.eval_expr(index));
        let (items, slot) = array_slot(&target, &index)?;
        let element = items.borrow()[slot].clone();
        Ok(Flow::Normal(element))
    }

    pub(super) fn eval_index_assign(
        &mut self,
        object: &Expr,
        index: &Expr,
        value: &Expr,
    ) -> FlowResult {
        let target = value_of!(self.eval_expr(object));
        let index = value_of!(self.eval_expr(index));
        let value = value_of!(self.eval_expr(value));
        let (items, slot) = array_slot(&target, &index)?;
        items.borrow_mut()[slot] = value;
        Ok(Flow::Normal(Value::Null))
    }
}
