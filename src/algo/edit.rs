//! Staged UV edits.
//!
//! [`UvEdit`] layers pending writes over a borrowed [`CornerUvs`]. Reads see
//! the staged value if there is one, so later phases observe earlier
//! writes, while the underlying layer stays untouched until the caller
//! applies [`UvEdit::into_changes`].

use std::collections::HashMap;

use nalgebra::Point2;

use crate::error::{MeshError, Result};
use crate::mesh::{CornerUvs, HalfEdgeId, MeshIndex};

/// Pending UV writes over a base layer.
#[derive(Debug)]
pub struct UvEdit<'a, I: MeshIndex = u32> {
    base: &'a CornerUvs<I>,
    staged: HashMap<HalfEdgeId<I>, Point2<f64>>,
}

impl<'a, I: MeshIndex> UvEdit<'a, I> {
    /// Start an empty edit over `base`.
    pub fn new(base: &'a CornerUvs<I>) -> Self {
        Self {
            base,
            staged: HashMap::new(),
        }
    }

    /// Current UV of a corner.
    #[inline]
    pub fn get(&self, he: HalfEdgeId<I>) -> Point2<f64> {
        self.staged.get(&he).copied().unwrap_or_else(|| self.base.get(he))
    }

    /// Stage a write; the last write to a corner wins.
    #[inline]
    pub fn set(&mut self, he: HalfEdgeId<I>, uv: Point2<f64>) {
        self.staged.insert(he, uv);
    }

    /// Number of corners with a staged value.
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Check if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Number of staged corners whose value differs from the base layer.
    pub fn num_changed(&self) -> usize {
        self.staged
            .iter()
            .filter(|(&he, uv)| self.base.get(he) != **uv)
            .count()
    }

    /// Fail on the first staged value that is NaN or infinite.
    pub fn check_finite(&self) -> Result<()> {
        let mut bad: Vec<HalfEdgeId<I>> = self
            .staged
            .iter()
            .filter(|(_, uv)| !(uv.x.is_finite() && uv.y.is_finite()))
            .map(|(&he, _)| he)
            .collect();
        bad.sort();
        match bad.first() {
            Some(he) => Err(MeshError::NonFiniteUv { corner: he.index() }),
            None => Ok(()),
        }
    }

    /// Staged writes sorted by corner handle.
    pub fn into_changes(self) -> Vec<(HalfEdgeId<I>, Point2<f64>)> {
        let mut changes: Vec<_> = self.staged.into_iter().collect();
        changes.sort_by_key(|&(he, _)| he);
        changes
    }
}
