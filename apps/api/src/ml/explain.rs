//! Path attribution for the boosted ensemble.
#![allow(dead_code)]
//!
//! For a given class, a feature's attribution is the sum over that
//! class's trees of the expected-value changes at every decision-path
//! split on the feature, scaled by the learning rate. Because each tree's
//! deltas telescope from root expectation to leaf value, the explainer
//! satisfies completeness:
//!
//! `base_value(class) + sum(attributions) == raw margin for the class`

use std::sync::Arc;

use crate::ml::gbdt::GbdtClassifier;

/// Attribution explainer paired with the ensemble it was built from. The
/// pair shares one `Arc`, so an explainer can never outlive or diverge
/// from its classifier.
#[derive(Debug, Clone)]
pub struct TreeExplainer {
    model: Arc<GbdtClassifier>,
    base_values: Vec<f64>,
}

impl TreeExplainer {
    pub fn new(model: Arc<GbdtClassifier>) -> Self {
        let base_values = (0..model.n_classes())
            .map(|class| {
                model.learning_rate()
                    * model
                        .trees_for_class(class)
                        .iter()
                        .map(|tree| tree.root_expected())
                        .sum::<f64>()
            })
            .collect();
        Self { model, base_values }
    }

    /// Per-class expected margins over the training distribution.
    pub fn base_values(&self) -> &[f64] {
        &self.base_values
    }

    /// Per-feature attributions of `x`'s margin for `class`, one entry
    /// per feature in `x`.
    pub fn attributions(&self, x: &[f64], class: usize) -> Vec<f64> {
        let mut contrib = vec![0.0f64; x.len()];
        for tree in self.model.trees_for_class(class) {
            tree.path_contributions(x, &mut contrib);
        }
        for c in contrib.iter_mut() {
            *c *= self.model.learning_rate();
        }
        contrib
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::gbdt::GbdtParams;
    use crate::ml::tree::TreeParams;

    fn fitted_model() -> Arc<GbdtClassifier> {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..240 {
            let x0 = i as f64 / 240.0;
            let x1 = ((i * 53) % 240) as f64 / 240.0;
            rows.push(vec![x0, x1]);
            labels.push(if x0 < 0.5 { 0 } else if x1 < 0.5 { 1 } else { 2 });
        }
        let params = GbdtParams {
            n_classes: 3,
            n_rounds: 15,
            learning_rate: 0.2,
            tree: TreeParams {
                max_depth: 3,
                min_samples_leaf: 5,
                lambda: 1.0,
                min_gain: 1e-6,
            },
        };
        Arc::new(GbdtClassifier::fit(&rows, &labels, &params).unwrap())
    }

    #[test]
    fn test_base_values_one_per_class() {
        let model = fitted_model();
        let explainer = TreeExplainer::new(Arc::clone(&model));
        assert_eq!(explainer.base_values().len(), 3);
    }

    #[test]
    fn test_completeness_reconstructs_margins() {
        let model = fitted_model();
        let explainer = TreeExplainer::new(Arc::clone(&model));

        for x in [&[0.1, 0.9][..], &[0.6, 0.2], &[0.8, 0.8], &[0.5, 0.5]] {
            let margins = model.raw_margins(x);
            for class in 0..3 {
                let attributions = explainer.attributions(x, class);
                let reconstructed =
                    explainer.base_values()[class] + attributions.iter().sum::<f64>();
                assert!(
                    (reconstructed - margins[class]).abs() < 1e-9,
                    "class {class}: margin {} vs reconstructed {reconstructed}",
                    margins[class]
                );
            }
        }
    }

    #[test]
    fn test_attribution_length_matches_features() {
        let model = fitted_model();
        let explainer = TreeExplainer::new(Arc::clone(&model));
        assert_eq!(explainer.attributions(&[0.3, 0.7], 0).len(), 2);
    }

    #[test]
    fn test_uninvolved_feature_gets_zero_attribution() {
        // A model trained on data where feature 1 carries no signal never
        // splits on it, so its attribution is exactly zero.
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..200 {
            rows.push(vec![i as f64 / 200.0, 0.5]);
            labels.push(usize::from(i >= 100));
        }
        let params = GbdtParams {
            n_classes: 2,
            n_rounds: 10,
            learning_rate: 0.2,
            tree: TreeParams {
                max_depth: 2,
                min_samples_leaf: 5,
                lambda: 1.0,
                min_gain: 1e-6,
            },
        };
        let model = Arc::new(GbdtClassifier::fit(&rows, &labels, &params).unwrap());
        let explainer = TreeExplainer::new(Arc::clone(&model));

        let attributions = explainer.attributions(&[0.9, 0.1], 1);
        assert_eq!(attributions[1], 0.0);
        assert!(attributions[0] > 0.0);
    }
}
