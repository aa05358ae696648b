//! Filter root
//!
//! A [`Filter`] owns a compiled expression tree and the context it is
//! currently bound to. [`Filter::test`] rebinds the tree only when the caller
//! hands it a different context, then evaluates the current row.

use crate::context::Context;
use crate::error::Result;
use crate::ir::Expression;
use crate::options::FilterOptions;
use lodestar_core::Term;
use std::rc::Rc;

/// Compiled filter over one expression tree
#[derive(Debug, Clone)]
pub struct Filter {
    expr: Expression,
}

impl Filter {
    pub fn new(expr: Expression) -> Self {
        Self { expr }
    }

    pub fn with_options(mut expr: Expression, options: &FilterOptions) -> Self {
        expr.apply_options(options);
        Self { expr }
    }

    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    pub fn into_expression(self) -> Expression {
        self.expr
    }

    /// Bind every variable in the tree to `ctx`
    pub fn set_context(&mut self, ctx: &Rc<dyn Context>) {
        self.expr.set_context(ctx);
    }

    pub fn current_context(&self) -> Option<&Rc<dyn Context>> {
        self.expr.current_context()
    }

    pub fn is_grounded(&self) -> bool {
        self.expr.is_grounded()
    }

    pub fn variables(&self) -> Vec<&str> {
        self.expr.variables()
    }

    /// Test the current row of `ctx`.
    ///
    /// Errors are returned to the caller; rejecting the row on error is the
    /// caller's policy.
    pub fn test(&mut self, ctx: &Rc<dyn Context>) -> Result<bool> {
        let rebind = self
            .current_context()
            .map_or(true, |current| !Rc::ptr_eq(current, ctx));
        if rebind {
            self.set_context(ctx);
        }
        let result = self.expr.eval_to_bool();
        match &result {
            Ok(pass) => tracing::trace!(pass, "filter result"),
            Err(e) => tracing::trace!(error = %e, "filter error"),
        }
        result
    }

    /// Evaluate the tree as a value against the current context
    pub fn value(&self) -> Result<Term> {
        self.expr.eval()
    }
}

impl From<Expression> for Filter {
    fn from(expr: Expression) -> Self {
        Filter::new(expr)
    }
}
