//! Row context protocol
//!
//! The execution engine exposes its current row through [`Context`]. Bindings
//! are compact [`NodeId`]s; [`Context::globalize`] turns one into a [`Term`]
//! and [`Context::localize`] goes the other way.
//!
//! The evaluator only reads the row the engine has positioned. It never
//! advances the cursor.

use crate::error::{FilterError, Result};
use lodestar_core::Term;
use lodestar_core::TypedLiteral;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;

/// Compact node identifier used by the execution engine
pub type NodeId = u64;

/// Sentinel id that never names a node
pub const UNBOUND: NodeId = 0;

/// Row cursor interface consumed by the evaluator
pub trait Context {
    /// Node bound to `index` in the current row.
    ///
    /// Fails with [`FilterError::UnboundColumn`] if the row has no binding
    /// there or there is no current row.
    fn column_value(&self, index: usize) -> Result<NodeId>;

    /// True if the current row binds `index`
    fn is_bound(&self, index: usize) -> bool;

    /// Column position of a variable name
    fn column_index(&self, name: &str) -> Option<usize>;

    /// Materialize a node id
    fn globalize(&self, node: NodeId) -> Result<Term>;

    /// Find or allocate the node id for a term
    fn localize(&self, term: &Term) -> Result<NodeId>;

    /// The unbound sentinel
    fn unbound(&self) -> NodeId {
        UNBOUND
    }
}

/// Exact identity of a pooled term. Language tags keep their case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NodeKey {
    Iri(Arc<str>),
    Blank(Arc<str>),
    Simple { text: Arc<str>, lang: Arc<str> },
    Typed { lexical: Arc<str>, datatype: Arc<str> },
}

impl NodeKey {
    fn of(term: &Term) -> Self {
        match term {
            Term::Iri(iri) => NodeKey::Iri(iri.clone()),
            Term::BlankNode(id) => NodeKey::Blank(id.clone()),
            Term::SimpleLiteral { text, lang } => NodeKey::Simple {
                text: text.clone(),
                lang: lang.clone(),
            },
            Term::TypedLiteral(lit) => NodeKey::typed(lit),
        }
    }

    fn typed(lit: &TypedLiteral) -> Self {
        NodeKey::Typed {
            lexical: Arc::from(lit.lexical_form()),
            datatype: Arc::from(lit.datatype()),
        }
    }
}

#[derive(Default)]
struct NodePool {
    terms: Vec<Term>,
    ids: HashMap<NodeKey, NodeId>,
}

/// In-memory [`Context`] over a fixed table of optional terms.
///
/// Starts positioned before the first row. Cells are interned into a node
/// pool on construction, so each distinct term gets one id.
pub struct MemoryContext {
    columns: Vec<Arc<str>>,
    rows: Vec<Vec<NodeId>>,
    nodes: RefCell<NodePool>,
    cursor: Cell<Option<usize>>,
}

impl MemoryContext {
    pub fn new(columns: &[&str], rows: Vec<Vec<Option<Term>>>) -> Self {
        let ctx = Self {
            columns: columns.iter().map(|c| Arc::from(*c)).collect(),
            rows: Vec::with_capacity(rows.len()),
            nodes: RefCell::new(NodePool::default()),
            cursor: Cell::new(None),
        };
        let encoded = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.map_or(UNBOUND, |term| ctx.intern(&term)))
                    .collect()
            })
            .collect();
        Self {
            rows: encoded,
            ..ctx
        }
    }

    fn intern(&self, term: &Term) -> NodeId {
        let mut pool = self.nodes.borrow_mut();
        let NodePool { terms, ids } = &mut *pool;
        *ids.entry(NodeKey::of(term)).or_insert_with(|| {
            terms.push(term.clone());
            terms.len() as NodeId
        })
    }

    /// Reset the cursor to before the first row
    pub fn before_first(&self) {
        self.cursor.set(None);
    }

    /// Advance to the next row; false once past the last row
    pub fn next(&self) -> bool {
        let next = self.cursor.get().map_or(0, |i| i + 1);
        self.cursor.set(Some(next.min(self.rows.len())));
        next < self.rows.len()
    }

    /// Current row position, if positioned on a row
    pub fn position(&self) -> Option<usize> {
        self.cursor.get().filter(|&i| i < self.rows.len())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn current_row(&self) -> Result<&[NodeId]> {
        self.position()
            .map(|i| self.rows[i].as_slice())
            .ok_or_else(|| FilterError::UnboundColumn("no current row".to_string()))
    }

    fn column_name(&self, index: usize) -> &str {
        self.columns.get(index).map_or("?", |c| c.as_ref())
    }
}

impl Context for MemoryContext {
    fn column_value(&self, index: usize) -> Result<NodeId> {
        let row = self.current_row()?;
        match row.get(index).copied() {
            Some(id) if id != UNBOUND => Ok(id),
            _ => Err(FilterError::UnboundColumn(format!(
                "{} ({})",
                index,
                self.column_name(index)
            ))),
        }
    }

    fn is_bound(&self, index: usize) -> bool {
        self.current_row()
            .map(|row| row.get(index).is_some_and(|&id| id != UNBOUND))
            .unwrap_or(false)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.as_ref() == name)
    }

    fn globalize(&self, node: NodeId) -> Result<Term> {
        let pool = self.nodes.borrow();
        node.checked_sub(1)
            .and_then(|i| pool.terms.get(i as usize))
            .cloned()
            .ok_or_else(|| FilterError::Context(format!("unknown node id {}", node)))
    }

    fn localize(&self, term: &Term) -> Result<NodeId> {
        Ok(self.intern(term))
    }
}
