//! Gradient-boosted multiclass classifier with a softmax objective.
#![allow(dead_code)]
//!
//! One regression tree per class per boosting round. Round gradients are
//! the usual softmax pair: `g = p_k - 1{y = k}`, `h = p_k (1 - p_k)`,
//! with probabilities taken from the margins at the start of the round.

use crate::ml::tree::{RegressionTree, TreeParams};
use crate::ml::TrainError;

/// Keeps leaf values bounded when a class's probabilities saturate.
const HESSIAN_FLOOR: f64 = 1e-16;

#[derive(Debug, Clone)]
pub struct GbdtParams {
    pub n_classes: usize,
    pub n_rounds: usize,
    pub learning_rate: f64,
    pub tree: TreeParams,
}

impl Default for GbdtParams {
    fn default() -> Self {
        Self {
            n_classes: 3,
            n_rounds: 100,
            learning_rate: 0.1,
            tree: TreeParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GbdtClassifier {
    n_classes: usize,
    learning_rate: f64,
    /// One inner vector per class, one tree per round.
    trees: Vec<Vec<RegressionTree>>,
}

impl GbdtClassifier {
    pub fn fit(
        rows: &[Vec<f64>],
        labels: &[usize],
        params: &GbdtParams,
    ) -> Result<Self, TrainError> {
        if rows.is_empty() {
            return Err(TrainError::EmptyDataset);
        }
        if rows.len() != labels.len() {
            return Err(TrainError::LengthMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if params.n_classes < 2 {
            return Err(TrainError::TooFewClasses(params.n_classes));
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= params.n_classes) {
            return Err(TrainError::LabelOutOfRange {
                label,
                n_classes: params.n_classes,
            });
        }

        let n = rows.len();
        let mut margins = vec![vec![0.0f64; params.n_classes]; n];
        let mut trees: Vec<Vec<RegressionTree>> =
            vec![Vec::with_capacity(params.n_rounds); params.n_classes];
        let mut grad = vec![0.0f64; n];
        let mut hess = vec![0.0f64; n];

        for _round in 0..params.n_rounds {
            let probs: Vec<Vec<f64>> = margins.iter().map(|m| softmax(m)).collect();
            for class in 0..params.n_classes {
                for i in 0..n {
                    let p = probs[i][class];
                    let y = if labels[i] == class { 1.0 } else { 0.0 };
                    grad[i] = p - y;
                    hess[i] = (p * (1.0 - p)).max(HESSIAN_FLOOR);
                }
                let tree = RegressionTree::fit(rows, &grad, &hess, &params.tree);
                for (i, row) in rows.iter().enumerate() {
                    margins[i][class] += params.learning_rate * tree.predict(row);
                }
                trees[class].push(tree);
            }
        }

        Ok(GbdtClassifier {
            n_classes: params.n_classes,
            learning_rate: params.learning_rate,
            trees,
        })
    }

    /// Per-class raw margins (log-odds scale).
    pub fn raw_margins(&self, x: &[f64]) -> Vec<f64> {
        self.trees
            .iter()
            .map(|class_trees| {
                self.learning_rate * class_trees.iter().map(|t| t.predict(x)).sum::<f64>()
            })
            .collect()
    }

    /// Per-class probabilities; components sum to 1.
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        softmax(&self.raw_margins(x))
    }

    /// Argmax class index. Ties resolve to the lowest index.
    pub fn predict(&self, x: &[f64]) -> usize {
        argmax(&self.predict_proba(x))
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn trees_for_class(&self, class: usize) -> &[RegressionTree] {
        &self.trees[class]
    }
}

/// Numerically stable softmax.
pub(crate) fn softmax(margins: &[f64]) -> Vec<f64> {
    let max = margins.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = margins.iter().map(|m| (m - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three classes separable on feature 0, with an uninformative second
    /// feature. Deterministic, no RNG needed.
    fn separable_dataset(n: usize) -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut rows = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let x0 = i as f64 / n as f64;
            let x1 = ((i * 37) % 100) as f64 / 100.0;
            rows.push(vec![x0, x1]);
            labels.push(if x0 < 0.33 {
                0
            } else if x0 < 0.66 {
                1
            } else {
                2
            });
        }
        (rows, labels)
    }

    fn test_params() -> GbdtParams {
        GbdtParams {
            n_classes: 3,
            n_rounds: 20,
            learning_rate: 0.3,
            tree: TreeParams {
                max_depth: 3,
                min_samples_leaf: 5,
                lambda: 1.0,
                min_gain: 1e-6,
            },
        }
    }

    #[test]
    fn test_fit_learns_separable_classes() {
        let (rows, labels) = separable_dataset(300);
        let model = GbdtClassifier::fit(&rows, &labels, &test_params()).unwrap();

        let correct = rows
            .iter()
            .zip(&labels)
            .filter(|(row, &label)| model.predict(row) == label)
            .count();
        assert!(
            correct as f64 / rows.len() as f64 > 0.9,
            "training accuracy too low: {correct}/300"
        );
    }

    #[test]
    fn test_probabilities_sum_to_one_and_are_bounded() {
        let (rows, labels) = separable_dataset(300);
        let model = GbdtClassifier::fit(&rows, &labels, &test_params()).unwrap();

        for row in rows.iter().step_by(17) {
            let probs = model.predict_proba(row);
            assert_eq!(probs.len(), 3);
            let sum: f64 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "probabilities sum to {sum}");
            assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn test_predict_matches_argmax_of_probabilities() {
        let (rows, labels) = separable_dataset(300);
        let model = GbdtClassifier::fit(&rows, &labels, &test_params()).unwrap();

        for row in rows.iter().step_by(23) {
            let probs = model.predict_proba(row);
            assert_eq!(model.predict(row), argmax(&probs));
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (rows, labels) = separable_dataset(200);
        let a = GbdtClassifier::fit(&rows, &labels, &test_params()).unwrap();
        let b = GbdtClassifier::fit(&rows, &labels, &test_params()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let err = GbdtClassifier::fit(&[], &[], &test_params()).unwrap_err();
        assert!(matches!(err, TrainError::EmptyDataset));
    }

    #[test]
    fn test_label_out_of_range_is_an_error() {
        let rows = vec![vec![0.0], vec![1.0]];
        let labels = vec![0, 7];
        let err = GbdtClassifier::fit(&rows, &labels, &test_params()).unwrap_err();
        assert!(matches!(
            err,
            TrainError::LabelOutOfRange {
                label: 7,
                n_classes: 3
            }
        ));
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let rows = vec![vec![0.0], vec![1.0]];
        let labels = vec![0];
        let err = GbdtClassifier::fit(&rows, &labels, &test_params()).unwrap_err();
        assert!(matches!(err, TrainError::LengthMismatch { rows: 2, labels: 1 }));
    }

    #[test]
    fn test_softmax_is_stable_for_large_margins() {
        let probs = softmax(&[1000.0, 1001.0, 999.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(argmax(&probs), 1);
    }

    #[test]
    fn test_argmax_ties_resolve_to_lowest_index() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), 0);
    }
}
