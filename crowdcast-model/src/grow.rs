//! Histogram-based growth of a single squared-error regression tree.
//!
//! Every feature the encoder emits is a small non-negative integer (hour,
//! weekday, flags and category ordinals), so each column is binned exactly
//! into [`BIN_COUNT`] buckets once per training run. Split search then scans
//! per-node histograms of residual sums instead of sorting rows.
//!
//! With unit hessians the split gain reduces to
//!
//! ```text
//! gain = S_L² / (n_L + λ) + S_R² / (n_R + λ) - S² / (n + λ)
//! ```
//!
//! and the leaf weight to `η · S / (n + λ)`, where `S` is the residual sum,
//! `n` the row count, `λ` the L2 penalty and `η` the learning rate.
#![forbid(unsafe_code)]

use crowdcast_core::{FEATURE_COUNT, FeatureRow};

use crate::{Node, RegressionTree, TrainParams};

/// Number of histogram buckets per feature.
pub(crate) const BIN_COUNT: usize = 256;

/// One binned training row.
pub(crate) type BinnedRow = [u8; FEATURE_COUNT];

/// Residual sum and row count accumulated in one bucket.
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    sum: f64,
    count: usize,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    /// Rows with a bin at or below this value go left.
    bin: u8,
    gain: f64,
}

/// Quantise feature rows into histogram bins.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "values are clamped into the u8 range before the cast"
)]
pub(crate) fn bin_rows(rows: &[FeatureRow]) -> Vec<BinnedRow> {
    rows.iter()
        .map(|row| row.map(|value| value.clamp(0.0, 255.0).round() as u8))
        .collect()
}

/// Grows one tree against the current residuals.
pub(crate) struct TreeGrower<'a> {
    bins: &'a [BinnedRow],
    residuals: &'a [f64],
    params: &'a TrainParams,
    nodes: Vec<Node>,
}

impl<'a> TreeGrower<'a> {
    pub(crate) const fn new(
        bins: &'a [BinnedRow],
        residuals: &'a [f64],
        params: &'a TrainParams,
    ) -> Self {
        Self {
            bins,
            residuals,
            params,
            nodes: Vec::new(),
        }
    }

    /// Grow a full tree over every row.
    pub(crate) fn grow(mut self) -> RegressionTree {
        let rows: Vec<usize> = (0..self.bins.len().min(self.residuals.len())).collect();
        self.grow_node(&rows, 0);
        RegressionTree::from_nodes(self.nodes)
    }

    fn grow_node(&mut self, rows: &[usize], depth: usize) -> usize {
        let index = self.nodes.len();
        let (sum, count) = self.totals(rows);
        self.nodes.push(Node::Leaf {
            value: self.leaf_value(sum, count),
        });
        if depth >= self.params.max_depth {
            return index;
        }
        let Some(split) = self.best_split(rows, sum, count) else {
            return index;
        };
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .copied()
            .partition(|&row| self.bin(row, split.feature) <= split.bin);
        let left = self.grow_node(&left_rows, depth.saturating_add(1));
        let right = self.grow_node(&right_rows, depth.saturating_add(1));
        if let Some(node) = self.nodes.get_mut(index) {
            *node = Node::Split {
                feature: split.feature,
                threshold: split_threshold(split.bin),
                left,
                right,
            };
        }
        index
    }

    fn bin(&self, row: usize, feature: usize) -> u8 {
        self.bins
            .get(row)
            .and_then(|bins| bins.get(feature))
            .copied()
            .unwrap_or_default()
    }

    fn residual(&self, row: usize) -> f64 {
        self.residuals.get(row).copied().unwrap_or_default()
    }

    fn totals(&self, rows: &[usize]) -> (f64, usize) {
        let sum = rows.iter().map(|&row| self.residual(row)).sum();
        (sum, rows.len())
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "leaf weights are shrunk Newton steps"
    )]
    fn leaf_value(&self, sum: f64, count: usize) -> f64 {
        self.params.learning_rate * sum / (as_weight(count) + self.params.reg_lambda)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "split gain compares regularised squared residual sums"
    )]
    fn score(&self, sum: f64, count: usize) -> f64 {
        sum * sum / (as_weight(count) + self.params.reg_lambda)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "split search accumulates residual histograms"
    )]
    fn best_split(&self, rows: &[usize], sum: f64, count: usize) -> Option<SplitCandidate> {
        let min_leaf = self.params.min_samples_leaf;
        if count < min_leaf.saturating_mul(2) {
            return None;
        }
        let parent = self.score(sum, count);
        let mut best: Option<SplitCandidate> = None;
        for feature in 0..FEATURE_COUNT {
            let histogram = self.histogram(rows, feature);
            let mut left = Bucket::default();
            for (bin, bucket) in (0..=u8::MAX).zip(histogram.iter()) {
                if bucket.count == 0 {
                    continue;
                }
                left.sum += bucket.sum;
                left.count += bucket.count;
                let right_count = count - left.count;
                if right_count == 0 {
                    break;
                }
                if left.count < min_leaf || right_count < min_leaf {
                    continue;
                }
                let gain = self.score(left.sum, left.count)
                    + self.score(sum - left.sum, right_count)
                    - parent;
                if gain > self.params.min_split_gain
                    && best.is_none_or(|current| gain > current.gain)
                {
                    best = Some(SplitCandidate { feature, bin, gain });
                }
            }
        }
        best
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "histogram buckets accumulate residual sums"
    )]
    fn histogram(&self, rows: &[usize], feature: usize) -> [Bucket; BIN_COUNT] {
        let mut histogram = [Bucket::default(); BIN_COUNT];
        for &row in rows {
            if let Some(bucket) = histogram.get_mut(usize::from(self.bin(row, feature))) {
                bucket.sum += self.residual(row);
                bucket.count += 1;
            }
        }
        histogram
    }
}

/// Midpoint between `bin` and the next integer value.
#[expect(
    clippy::float_arithmetic,
    reason = "thresholds sit halfway between integer bins"
)]
fn split_threshold(bin: u8) -> f32 {
    f32::from(bin) + 0.5
}

#[expect(
    clippy::cast_precision_loss,
    reason = "row counts stay far below 2^52"
)]
const fn as_weight(count: usize) -> f64 {
    count as f64
}
