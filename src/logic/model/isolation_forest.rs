//! Isolation Forest
//!
//! Ensemble of random isolation trees over a dense feature matrix. Each tree
//! is grown on a subsample drawn without replacement; a sample's raw score is
//! `-2^(-E[h(x)] / c(psi))`, so lower = easier to isolate = more anomalous.
//!
//! All randomness comes from the caller's RNG, so a fixed seed gives
//! identical trees and identical scores.

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use rand::seq::index;
use rand::Rng;

/// Euler–Mascheroni constant, used in the harmonic number approximation
const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Average path length of an unsuccessful BST search over `n` points
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Single isolation tree
#[derive(Debug, Clone)]
pub struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    /// Grow a tree on the given rows of `data`
    pub fn grow<R: Rng>(data: ArrayView2<f64>, rows: Vec<usize>, height_limit: usize, rng: &mut R) -> Self {
        Self {
            root: grow_node(data, rows, 0, height_limit, rng),
        }
    }

    /// Path length of one sample, with the c(size) adjustment at the leaf
    pub fn path_length(&self, sample: ArrayView1<f64>) -> f64 {
        let mut node = &self.root;
        let mut depth = 0usize;
        loop {
            match node {
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
                Node::Split { feature, threshold, left, right } => {
                    node = if sample[*feature] < *threshold { left } else { right };
                    depth += 1;
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }
}

fn grow_node<R: Rng>(
    data: ArrayView2<f64>,
    rows: Vec<usize>,
    depth: usize,
    height_limit: usize,
    rng: &mut R,
) -> Node {
    if depth >= height_limit || rows.len() <= 1 {
        return Node::Leaf { size: rows.len() };
    }

    // Only features that still vary within this node can split it
    let candidates: Vec<(usize, f64, f64)> = (0..data.ncols())
        .filter_map(|feature| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                let v = data[[r, feature]];
                (lo.min(v), hi.max(v))
            });
            (hi > lo).then_some((feature, lo, hi))
        })
        .collect();

    if candidates.is_empty() {
        return Node::Leaf { size: rows.len() };
    }

    let (feature, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = rng.gen_range(lo..hi);

    let (left, right): (Vec<usize>, Vec<usize>) = rows.into_iter().partition(|&r| data[[r, feature]] < threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_node(data, left, depth + 1, height_limit, rng)),
        right: Box::new(grow_node(data, right, depth + 1, height_limit, rng)),
    }
}

// ============================================================================
// FOREST
// ============================================================================

/// Fitted ensemble
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    subsample: usize,
}

impl IsolationForest {
    /// Fit `n_trees` trees, each on `min(max_samples, n)` rows
    pub fn fit<R: Rng>(data: ArrayView2<f64>, n_trees: usize, max_samples: usize, rng: &mut R) -> Self {
        let n = data.nrows();
        let subsample = max_samples.min(n);
        let height_limit = (subsample.max(2) as f64).log2().ceil() as usize;

        let trees = (0..n_trees)
            .map(|_| {
                let rows = index::sample(rng, n, subsample).into_vec();
                IsolationTree::grow(data, rows, height_limit, rng)
            })
            .collect();

        log::debug!(
            "Isolation forest fitted: {} trees, subsample {}, height limit {}",
            n_trees,
            subsample,
            height_limit
        );

        Self { trees, subsample }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn subsample(&self) -> usize {
        self.subsample
    }

    /// Mean path length of one sample across the ensemble
    pub fn mean_path_length(&self, sample: ArrayView1<f64>) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(|t| t.path_length(sample)).sum();
        total / self.trees.len() as f64
    }

    /// Raw scores in (-1, 0); lower = more anomalous
    pub fn score_samples(&self, data: ArrayView2<f64>) -> Array1<f64> {
        let norm = average_path_length(self.subsample);
        data.axis_iter(Axis(0))
            .map(|row| {
                let h = self.mean_path_length(row);
                if norm > 0.0 {
                    -(2f64.powf(-h / norm))
                } else {
                    -1.0
                }
            })
            .collect()
    }
}
