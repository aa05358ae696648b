//! Evaluation options

use serde::{Deserialize, Serialize};

/// Default compiled-program size limit for regex patterns (10 MiB)
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Default number of resolved external functions kept by a registry
pub const DEFAULT_FUNCTION_CACHE_CAPACITY: usize = 64;

/// Options controlling expression evaluation
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "regex_size_limit": 1048576, "function_cache_capacity": 16 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Size limit passed to `regex::RegexBuilder::size_limit`
    pub regex_size_limit: usize,
    /// LRU capacity of resolved external functions, keyed by (name, arity)
    pub function_cache_capacity: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            function_cache_capacity: DEFAULT_FUNCTION_CACHE_CAPACITY,
        }
    }
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the regex size limit
    pub fn with_regex_size_limit(mut self, limit: usize) -> Self {
        self.regex_size_limit = limit;
        self
    }

    /// Set the function cache capacity
    pub fn with_function_cache_capacity(mut self, capacity: usize) -> Self {
        self.function_cache_capacity = capacity;
        self
    }
}
