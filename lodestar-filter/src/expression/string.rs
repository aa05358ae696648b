//! Regular expression matching
//!
//! `regex(text, pattern [, flags])` where every operand must be a simple
//! literal without a language tag. Each regex node keeps the last compiled
//! pattern; a row whose pattern and flags equal the previous row's reuses it.

use crate::error::{FilterError, Result};
use crate::ir::Expression;
use crate::options::DEFAULT_REGEX_SIZE_LIMIT;
use lodestar_core::Term;
use regex::Regex;
use std::cell::RefCell;

use super::helpers::build_regex_with_flags;

#[derive(Debug, Clone)]
struct CompiledPattern {
    pattern: String,
    /// `None` when no flags operand was given, distinct from `Some("")`
    flags: Option<String>,
    regex: Regex,
}

/// Last-seen compiled pattern of one regex node
#[derive(Debug, Clone)]
pub struct PatternCache {
    last: RefCell<Option<CompiledPattern>>,
    size_limit: usize,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::with_size_limit(DEFAULT_REGEX_SIZE_LIMIT)
    }
}

impl PatternCache {
    pub fn with_size_limit(size_limit: usize) -> Self {
        Self {
            last: RefCell::new(None),
            size_limit,
        }
    }

    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    /// Change the size limit; drops the cached pattern
    pub fn set_size_limit(&mut self, size_limit: usize) {
        self.size_limit = size_limit;
        self.last.get_mut().take();
    }

    /// Pattern and flags of the cached matcher
    pub fn cached_key(&self) -> Option<(String, Option<String>)> {
        self.last
            .borrow()
            .as_ref()
            .map(|c| (c.pattern.clone(), c.flags.clone()))
    }

    /// Matcher for `pattern` and `flags`, compiling only if either changed
    pub fn matcher(&self, pattern: &str, flags: Option<&str>) -> Result<Regex> {
        if let Some(cached) = self.last.borrow().as_ref() {
            if cached.pattern == pattern && cached.flags.as_deref() == flags {
                return Ok(cached.regex.clone());
            }
        }
        let regex = build_regex_with_flags(pattern, flags.unwrap_or(""), self.size_limit)?;
        tracing::debug!(pattern, flags = flags.unwrap_or(""), "compiled regex");
        *self.last.borrow_mut() = Some(CompiledPattern {
            pattern: pattern.to_string(),
            flags: flags.map(str::to_string),
            regex: regex.clone(),
        });
        Ok(regex)
    }
}

/// Text of a plain simple literal operand
fn plain_text<'a>(term: &'a Term, role: &str) -> Result<&'a str> {
    match term {
        Term::SimpleLiteral { text, lang } if lang.is_empty() => Ok(text.as_ref()),
        other => Err(FilterError::type_error(format!(
            "regex {} must be a simple literal without a language tag, got {}",
            role, other
        ))),
    }
}

/// Evaluate regex(text, pattern [, flags])
pub fn eval_regex(cache: &PatternCache, args: &[Expression]) -> Result<bool> {
    if !(2..=3).contains(&args.len()) {
        return Err(FilterError::invalid(format!(
            "regex requires 2 or 3 arguments, got {}",
            args.len()
        )));
    }
    let text = args[0].eval()?;
    let pattern = args[1].eval()?;
    let flags = args.get(2).map(Expression::eval).transpose()?;

    let text = plain_text(&text, "text")?;
    let pattern = plain_text(&pattern, "pattern")?;
    let flags = flags
        .as_ref()
        .map(|f| plain_text(f, "flags"))
        .transpose()?;

    Ok(cache.matcher(pattern, flags)?.is_match(text))
}
