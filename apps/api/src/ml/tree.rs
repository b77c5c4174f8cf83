//! Regression trees fit to per-sample gradient/hessian pairs.
#![allow(dead_code)]
//!
//! Trees are grown greedily with exact split search over every feature.
//! Leaf values are the L2-regularized Newton step `-G / (H + lambda)`;
//! splits are scored by the usual gain
//! `0.5 * (GL^2/(HL+l) + GR^2/(HR+l) - G^2/(H+l))`.
//!
//! Every node records its training cover and the cover-weighted expected
//! value of its subtree. The attribution explainer consumes these:
//! walking a decision path and summing `expected(child) - expected(node)`
//! per split telescopes exactly from the root expectation to the leaf
//! value.

/// Split/leaf limits used when growing a tree.
#[derive(Debug, Clone)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// L2 regularization on leaf weights.
    pub lambda: f64,
    /// Minimum gain a split must clear; below this a node stays a leaf.
    pub min_gain: f64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_samples_leaf: 20,
            lambda: 1.0,
            min_gain: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        cover: f64,
        expected: f64,
    },
    Leaf {
        value: f64,
        cover: f64,
    },
}

impl Node {
    fn cover(&self) -> f64 {
        match self {
            Node::Split { cover, .. } | Node::Leaf { cover, .. } => *cover,
        }
    }

    fn expected(&self) -> f64 {
        match self {
            Node::Split { expected, .. } => *expected,
            Node::Leaf { value, .. } => *value,
        }
    }
}

/// A fitted tree. Nodes live in a flat arena with the root at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Fits a tree to gradient/hessian pairs. `rows`, `grad`, and `hess`
    /// must have equal length; callers validate that.
    pub fn fit(rows: &[Vec<f64>], grad: &[f64], hess: &[f64], params: &TreeParams) -> Self {
        let mut tree = RegressionTree { nodes: Vec::new() };
        let indices: Vec<usize> = (0..rows.len()).collect();
        tree.grow(rows, grad, hess, params, indices, 0);
        tree
    }

    fn grow(
        &mut self,
        rows: &[Vec<f64>],
        grad: &[f64],
        hess: &[f64],
        params: &TreeParams,
        indices: Vec<usize>,
        depth: usize,
    ) -> usize {
        let g_total: f64 = indices.iter().map(|&i| grad[i]).sum();
        let h_total: f64 = indices.iter().map(|&i| hess[i]).sum();
        let cover = indices.len() as f64;
        let leaf_value = -g_total / (h_total + params.lambda);

        if depth >= params.max_depth || indices.len() < (2 * params.min_samples_leaf).max(2) {
            return self.push(Node::Leaf {
                value: leaf_value,
                cover,
            });
        }

        let Some(split) = best_split(rows, grad, hess, &indices, params, g_total, h_total) else {
            return self.push(Node::Leaf {
                value: leaf_value,
                cover,
            });
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| rows[i][split.feature] < split.threshold);

        // Reserve this node's slot before the children so the root stays
        // at index 0; the placeholder is overwritten below.
        let id = self.push(Node::Leaf {
            value: leaf_value,
            cover,
        });
        let left = self.grow(rows, grad, hess, params, left_indices, depth + 1);
        let right = self.grow(rows, grad, hess, params, right_indices, depth + 1);

        let expected = (self.nodes[left].cover() * self.nodes[left].expected()
            + self.nodes[right].cover() * self.nodes[right].expected())
            / cover;

        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
            cover,
            expected,
        };
        id
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { value, .. } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    id = if x[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Walks the decision path for `x`, adding the expected-value change
    /// at every split to `contrib[feature]`. Returns the leaf value, so
    /// `root_expected() + deltas == leaf value` by telescoping.
    /// `contrib` must hold one slot per feature.
    pub fn path_contributions(&self, x: &[f64], contrib: &mut [f64]) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { value, .. } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    expected,
                    ..
                } => {
                    let next = if x[*feature] < *threshold { *left } else { *right };
                    contrib[*feature] += self.nodes[next].expected() - *expected;
                    id = next;
                }
            }
        }
    }

    /// Cover-weighted expectation over the whole training set.
    pub fn root_expected(&self) -> f64 {
        self.nodes[0].expected()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

fn best_split(
    rows: &[Vec<f64>],
    grad: &[f64],
    hess: &[f64],
    indices: &[usize],
    params: &TreeParams,
    g_total: f64,
    h_total: f64,
) -> Option<SplitCandidate> {
    let n_features = rows[indices[0]].len();
    let parent_score = g_total * g_total / (h_total + params.lambda);
    let mut best: Option<SplitCandidate> = None;

    let mut order: Vec<usize> = Vec::with_capacity(indices.len());
    for feature in 0..n_features {
        order.clear();
        order.extend_from_slice(indices);
        order.sort_by(|&a, &b| {
            rows[a][feature]
                .partial_cmp(&rows[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut g_left = 0.0;
        let mut h_left = 0.0;
        for pos in 0..order.len() - 1 {
            let i = order[pos];
            g_left += grad[i];
            h_left += hess[i];

            let left_count = pos + 1;
            if left_count < params.min_samples_leaf {
                continue;
            }
            if order.len() - left_count < params.min_samples_leaf {
                break;
            }

            let here = rows[i][feature];
            let next = rows[order[pos + 1]][feature];
            if next <= here {
                continue; // no boundary between equal values
            }

            let g_right = g_total - g_left;
            let h_right = h_total - h_left;
            let gain = 0.5
                * (g_left * g_left / (h_left + params.lambda)
                    + g_right * g_right / (h_right + params.lambda)
                    - parent_score);

            // Strictly greater keeps the first candidate on ties, so
            // fitting is deterministic.
            if gain > best.as_ref().map_or(params.min_gain, |b| b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: 0.5 * (here + next),
                    gain,
                });
            }
        }
    }
    best
}
