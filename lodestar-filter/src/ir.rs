//! Expression tree
//!
//! An [`Expression`] is a variable reference, a constant term, or a function
//! call over argument expressions. Trees are built once per query and then
//! evaluated row by row: the caller binds a [`Context`] with
//! [`Expression::set_context`], which walks the tree and hands the context to
//! every variable, then evaluates.

use crate::context::Context;
use crate::error::{FilterError, Result};
use crate::expression::PatternCache;
use crate::external::{ExternalCall, FunctionRegistry};
use crate::options::FilterOptions;
use lodestar_core::coerce::is_builtin_cast;
use lodestar_core::Term;
use lodestar_vocab::xsd;
use once_cell::unsync::OnceCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

// =============================================================================
// Variables
// =============================================================================

/// A named reference to a column of the current row.
///
/// The column index is looked up on first use and then kept for the life of
/// the tree, since the column layout does not change between rows.
#[derive(Clone)]
pub struct Var {
    name: Arc<str>,
    index: OnceCell<usize>,
    ctx: Option<Rc<dyn Context>>,
}

impl Var {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            index: OnceCell::new(),
            ctx: None,
        }
    }

    /// Variable with a column index already known at build time
    pub fn with_index(name: impl Into<Arc<str>>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: OnceCell::with_value(index),
            ctx: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_context(&mut self, ctx: &Rc<dyn Context>) {
        self.ctx = Some(Rc::clone(ctx));
    }

    pub fn context(&self) -> Option<&Rc<dyn Context>> {
        self.ctx.as_ref()
    }

    fn column(&self) -> Result<(&Rc<dyn Context>, usize)> {
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| FilterError::UnboundVariable(self.name.to_string()))?;
        let index = self.index.get_or_try_init(|| {
            ctx.column_index(&self.name)
                .ok_or_else(|| FilterError::UnboundVariable(format!("unknown variable {}", self.name)))
        })?;
        Ok((ctx, *index))
    }

    /// Resolve the variable to the term bound in the current row
    pub fn resolve(&self) -> Result<Term> {
        let (ctx, index) = self.column()?;
        let node = ctx.column_value(index)?;
        ctx.globalize(node)
    }

    /// True if the current row binds this variable; never an error
    pub fn is_bound(&self) -> bool {
        self.column()
            .map(|(ctx, index)| ctx.is_bound(index))
            .unwrap_or(false)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Built-in and external functions
#[derive(Debug, Clone)]
pub enum Function {
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    SameTerm,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Negate,

    // Logical
    And,
    Or,
    Not,
    /// Negation that reports `true` when its operand fails
    Inverse,
    In,
    NotIn,

    // Term accessors and tests
    Str,
    Lang,
    Datatype,
    Bound,
    IsIri,
    IsBlank,
    IsLiteral,
    LangMatches,

    /// Regular expression match with a last-pattern cache
    Regex(PatternCache),

    /// Cast to a built-in datatype (full IRI)
    Cast(Arc<str>),

    /// Function resolved through a registry
    External(ExternalCall),
}

impl Function {
    /// Name used in error messages
    pub fn name(&self) -> &str {
        match self {
            Function::Eq => "=",
            Function::Ne => "!=",
            Function::Lt => "<",
            Function::Le => "<=",
            Function::Gt => ">",
            Function::Ge => ">=",
            Function::SameTerm => "sameTerm",
            Function::Add => "+",
            Function::Sub => "-",
            Function::Mul => "*",
            Function::Div => "/",
            Function::Negate => "unary -",
            Function::And => "&&",
            Function::Or => "||",
            Function::Not => "!",
            Function::Inverse => "inverse",
            Function::In => "IN",
            Function::NotIn => "NOT IN",
            Function::Str => "str",
            Function::Lang => "lang",
            Function::Datatype => "datatype",
            Function::Bound => "bound",
            Function::IsIri => "isIRI",
            Function::IsBlank => "isBlank",
            Function::IsLiteral => "isLiteral",
            Function::LangMatches => "langMatches",
            Function::Regex(_) => "regex",
            Function::Cast(dt) => dt.as_ref(),
            Function::External(call) => call.name(),
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// Filter / value expression
#[derive(Debug, Clone)]
pub enum Expression {
    /// Variable reference
    Var(Var),
    /// Constant term
    Const(Term),
    /// Function call (includes operators like +, =, &&)
    Call {
        func: Function,
        args: Vec<Expression>,
    },
}

impl Expression {
    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn var(name: impl Into<Arc<str>>) -> Self {
        Expression::Var(Var::new(name))
    }

    pub fn constant(term: impl Into<Term>) -> Self {
        Expression::Const(term.into())
    }

    pub fn call(func: Function, args: Vec<Expression>) -> Self {
        Expression::Call { func, args }
    }

    fn binary(func: Function, left: Expression, right: Expression) -> Self {
        Self::call(func, vec![left, right])
    }

    fn unary(func: Function, arg: Expression) -> Self {
        Self::call(func, vec![arg])
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Eq, left, right)
    }

    pub fn ne(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Ne, left, right)
    }

    pub fn lt(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Lt, left, right)
    }

    pub fn le(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Le, left, right)
    }

    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Gt, left, right)
    }

    pub fn ge(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Ge, left, right)
    }

    pub fn same_term(left: Expression, right: Expression) -> Self {
        Self::binary(Function::SameTerm, left, right)
    }

    pub fn add(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Add, left, right)
    }

    pub fn sub(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Sub, left, right)
    }

    pub fn mul(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Mul, left, right)
    }

    pub fn div(left: Expression, right: Expression) -> Self {
        Self::binary(Function::Div, left, right)
    }

    pub fn negate(expr: Expression) -> Self {
        Self::unary(Function::Negate, expr)
    }

    /// Left-to-right conjunction
    pub fn and(exprs: Vec<Expression>) -> Self {
        Self::call(Function::And, exprs)
    }

    /// Left-to-right disjunction
    pub fn or(exprs: Vec<Expression>) -> Self {
        Self::call(Function::Or, exprs)
    }

    pub fn not(expr: Expression) -> Self {
        Self::unary(Function::Not, expr)
    }

    pub fn inverse(expr: Expression) -> Self {
        Self::unary(Function::Inverse, expr)
    }

    pub fn in_list(test: Expression, members: Vec<Expression>) -> Self {
        let mut args = Vec::with_capacity(members.len() + 1);
        args.push(test);
        args.extend(members);
        Self::call(Function::In, args)
    }

    pub fn not_in_list(test: Expression, members: Vec<Expression>) -> Self {
        match Self::in_list(test, members) {
            Expression::Call { args, .. } => Self::call(Function::NotIn, args),
            other => other,
        }
    }

    pub fn str(expr: Expression) -> Self {
        Self::unary(Function::Str, expr)
    }

    pub fn lang(expr: Expression) -> Self {
        Self::unary(Function::Lang, expr)
    }

    pub fn datatype(expr: Expression) -> Self {
        Self::unary(Function::Datatype, expr)
    }

    pub fn bound(var: impl Into<Arc<str>>) -> Self {
        Self::unary(Function::Bound, Self::var(var))
    }

    pub fn is_iri(expr: Expression) -> Self {
        Self::unary(Function::IsIri, expr)
    }

    pub fn is_blank(expr: Expression) -> Self {
        Self::unary(Function::IsBlank, expr)
    }

    pub fn is_literal(expr: Expression) -> Self {
        Self::unary(Function::IsLiteral, expr)
    }

    pub fn lang_matches(tagged: Expression, range: Expression) -> Self {
        Self::binary(Function::LangMatches, tagged, range)
    }

    pub fn regex(text: Expression, pattern: Expression, flags: Option<Expression>) -> Self {
        let mut args = vec![text, pattern];
        args.extend(flags);
        Self::call(Function::Regex(PatternCache::default()), args)
    }

    /// Cast to a built-in datatype, given by full or `xsd:` IRI
    pub fn cast(datatype: &str, expr: Expression) -> Result<Self> {
        if !is_builtin_cast(datatype) {
            return Err(FilterError::invalid(format!(
                "{} is not a built-in cast target",
                datatype
            )));
        }
        Ok(Self::unary(
            Function::Cast(Arc::from(xsd::expand(datatype).as_ref())),
            expr,
        ))
    }

    /// Call a function by qualified name.
    ///
    /// Built-in cast targets become [`Function::Cast`]; an XSD name used with
    /// anything other than one argument is rejected. Every other name,
    /// including datatypes without a built-in cast, is dispatched through
    /// `registry`.
    pub fn function_call(
        name: &str,
        args: Vec<Expression>,
        registry: &Arc<FunctionRegistry>,
    ) -> Result<Self> {
        if is_builtin_cast(name) || xsd::is_xsd(name) {
            if args.len() != 1 {
                return Err(FilterError::invalid(format!(
                    "cast to {} requires exactly 1 argument, got {}",
                    name,
                    args.len()
                )));
            }
            if is_builtin_cast(name) {
                let mut args = args;
                return Self::cast(name, args.remove(0));
            }
        }
        Ok(Self::call(
            Function::External(ExternalCall::new(name, Arc::clone(registry))),
            args,
        ))
    }

    // =========================================================================
    // Tree operations
    // =========================================================================

    /// Bind every variable in the tree to `ctx`
    pub fn set_context(&mut self, ctx: &Rc<dyn Context>) {
        match self {
            Expression::Var(var) => var.set_context(ctx),
            Expression::Const(_) => {}
            Expression::Call { args, .. } => {
                for arg in args {
                    arg.set_context(ctx);
                }
            }
        }
    }

    /// Context of the first variable in the tree, if any is bound
    pub fn current_context(&self) -> Option<&Rc<dyn Context>> {
        match self {
            Expression::Var(var) => var.context(),
            Expression::Const(_) => None,
            Expression::Call { args, .. } => args.iter().find_map(|a| a.current_context()),
        }
    }

    /// Names of the variables referenced, in first-occurrence order
    pub fn variables(&self) -> Vec<&str> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars<'a>(&'a self, vars: &mut Vec<&'a str>) {
        match self {
            Expression::Var(var) => {
                if !vars.contains(&var.name()) {
                    vars.push(var.name());
                }
            }
            Expression::Const(_) => {}
            Expression::Call { args, .. } => {
                for arg in args {
                    arg.collect_vars(vars);
                }
            }
        }
    }

    /// True if the tree references no variables
    pub fn is_grounded(&self) -> bool {
        match self {
            Expression::Var(_) => false,
            Expression::Const(_) => true,
            Expression::Call { args, .. } => args.iter().all(Expression::is_grounded),
        }
    }

    /// Apply evaluation options to every node that uses them
    pub fn apply_options(&mut self, options: &FilterOptions) {
        if let Expression::Call { func, args } = self {
            if let Function::Regex(cache) = func {
                cache.set_size_limit(options.regex_size_limit);
            }
            for arg in args {
                arg.apply_options(options);
            }
        }
    }
}

impl From<Var> for Expression {
    fn from(var: Var) -> Self {
        Expression::Var(var)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Expression::Const(term)
    }
}
