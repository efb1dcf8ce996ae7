//! Arena-backed regression trees.
#![forbid(unsafe_code)]

use crowdcast_core::{FEATURE_COUNT, FeatureRow, InferenceError};
use serde::{Deserialize, Serialize};

/// A node in a [`RegressionTree`] arena.
///
/// Rows whose `feature` column is strictly below `threshold` descend to
/// `left`; all others descend to `right`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Internal decision node.
    Split {
        /// Column index into a [`FeatureRow`].
        feature: usize,
        /// Decision boundary.
        threshold: f32,
        /// Arena index of the left child.
        left: usize,
        /// Arena index of the right child.
        right: usize,
    },
    /// Terminal node contributing `value` to the ensemble sum.
    Leaf {
        /// Shrunk leaf weight.
        value: f64,
    },
}

/// A binary regression tree stored as a flat node arena rooted at index 0.
///
/// Children always sit at higher indices than their parent, which keeps
/// traversal acyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    pub(crate) const fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Nodes in arena order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Check the arena is a well-formed tree over [`FEATURE_COUNT`] columns.
    ///
    /// # Errors
    /// Returns [`InferenceError::FeatureMismatch`] when a split reads a column
    /// outside the row, and [`InferenceError::Backend`] for empty arenas,
    /// dangling or backward child links and non-finite values.
    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.nodes.is_empty() {
            return Err(backend("tree has no nodes"));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(InferenceError::FeatureMismatch {
                            expected: feature.saturating_add(1),
                            actual: FEATURE_COUNT,
                        });
                    }
                    if !threshold.is_finite() {
                        return Err(backend("split threshold is not finite"));
                    }
                    let in_arena = |child: usize| child > index && child < self.nodes.len();
                    if !(in_arena(left) && in_arena(right)) {
                        return Err(backend("split links outside the arena"));
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(backend("leaf value is not finite"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk `row` from the root to a leaf and return its value.
    ///
    /// # Errors
    /// Returns [`InferenceError`] when the walk leaves the arena, reads a
    /// column the row does not have, or fails to reach a leaf.
    pub fn predict_row(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        let mut index = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).ok_or(InferenceError::FeatureMismatch {
                        expected: feature.saturating_add(1),
                        actual: row.len(),
                    })?;
                    index = if *value < *threshold { *left } else { *right };
                }
                None => return Err(backend("tree walk left the arena")),
            }
        }
        Err(backend("tree walk did not reach a leaf"))
    }
}

fn backend(message: &str) -> InferenceError {
    InferenceError::Backend {
        message: message.to_owned(),
    }
}
