//! Function dispatch - routes Function to specialized implementations

use crate::error::Result;
use crate::ir::{Expression, Function};
use lodestar_core::{ArithmeticOp, Term};

use super::{arithmetic, cast, compare, logical, rdf, string};

impl Function {
    /// Evaluate this function to a term.
    ///
    /// Boolean-valued functions produce an `xsd:boolean` literal.
    pub fn eval(&self, args: &[Expression]) -> Result<Term> {
        match self {
            // Arithmetic operators
            Function::Add => arithmetic::eval_binary(ArithmeticOp::Add, args),
            Function::Sub => arithmetic::eval_binary(ArithmeticOp::Sub, args),
            Function::Mul => arithmetic::eval_binary(ArithmeticOp::Mul, args),
            Function::Div => arithmetic::eval_binary(ArithmeticOp::Div, args),
            Function::Negate => arithmetic::eval_negate(args),

            // Accessors
            Function::Str => rdf::eval_str(args),
            Function::Lang => rdf::eval_lang(args),
            Function::Datatype => rdf::eval_datatype(args),

            // Casts and external functions
            Function::Cast(datatype) => cast::eval_cast(datatype, args),
            Function::External(call) => cast::eval_external(call, args),

            Function::Eq
            | Function::Ne
            | Function::Lt
            | Function::Le
            | Function::Gt
            | Function::Ge
            | Function::SameTerm
            | Function::And
            | Function::Or
            | Function::Not
            | Function::Inverse
            | Function::In
            | Function::NotIn
            | Function::Bound
            | Function::IsIri
            | Function::IsBlank
            | Function::IsLiteral
            | Function::LangMatches
            | Function::Regex(_) => self.eval_to_bool(args).map(Term::from),
        }
    }

    /// Evaluate this function to an effective boolean value.
    pub fn eval_to_bool(&self, args: &[Expression]) -> Result<bool> {
        match self {
            // Comparison operators
            Function::Eq => compare::eval_eq(args),
            Function::Ne => compare::eval_ne(args),
            Function::Lt => compare::eval_lt(args),
            Function::Le => compare::eval_le(args),
            Function::Gt => compare::eval_gt(args),
            Function::Ge => compare::eval_ge(args),
            Function::SameTerm => compare::eval_same_term(args),

            // Logical operators
            Function::And => logical::eval_and(args),
            Function::Or => logical::eval_or(args),
            Function::Not => logical::eval_not(args),
            Function::Inverse => logical::eval_inverse(args),
            Function::In => logical::eval_in(args),
            Function::NotIn => logical::eval_not_in(args),

            // Term tests
            Function::Bound => rdf::eval_bound(args),
            Function::IsIri => rdf::eval_is_iri(args),
            Function::IsBlank => rdf::eval_is_blank(args),
            Function::IsLiteral => rdf::eval_is_literal(args),
            Function::LangMatches => rdf::eval_lang_matches(args),

            Function::Regex(cache) => string::eval_regex(cache, args),

            Function::Add
            | Function::Sub
            | Function::Mul
            | Function::Div
            | Function::Negate
            | Function::Str
            | Function::Lang
            | Function::Datatype
            | Function::Cast(_)
            | Function::External(_) => Ok(self.eval(args)?.effective_boolean()?),
        }
    }
}
