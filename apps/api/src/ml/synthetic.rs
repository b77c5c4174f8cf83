//! Reproducible synthetic training data.
//!
//! Stands in for real placement outcomes so the service can bootstrap a
//! runnable model. Columns are drawn independently from ranges that
//! approximate realistic feature values; the two ratio columns are
//! derived from their numerator/denominator columns. The continuous
//! target is a fixed linear blend (`TrainingConfig::target_weights`)
//! clipped to [0, 100], then bucketed into ordinal classes by the
//! configured thresholds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TrainingConfig;
use crate::features::NUM_FEATURES;
use crate::models::ReadinessClass;

pub struct Dataset {
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
}

/// Deterministic for a given `config.seed`.
pub fn generate(config: &TrainingConfig) -> Dataset {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.n_samples;
    let mut cols = vec![vec![0.0f64; n]; NUM_FEATURES];

    fill_int(&mut cols[0], &mut rng, 0, 10); // matched_required_skills
    fill_int(&mut cols[1], &mut rng, 5, 15); // total_required_skills
    fill_int(&mut cols[3], &mut rng, 0, 8); // matched_preferred_skills
    fill_int(&mut cols[4], &mut rng, 3, 10); // total_preferred_skills
    fill_uniform(&mut cols[6], &mut rng, 1.0, 3.0); // avg_skill_level
    fill_int(&mut cols[7], &mut rng, 0, 10); // num_projects
    fill_int(&mut cols[8], &mut rng, 0, 5); // num_internships
    fill_int(&mut cols[9], &mut rng, 0, 5); // num_certifications
    fill_uniform(&mut cols[10], &mut rng, 6.0, 10.0); // avg_cgpa
    fill_uniform(&mut cols[11], &mut rng, 0.0, 1.0); // weighted_skill_match
    fill_int(&mut cols[12], &mut rng, 0, 24); // total_experience_months

    for i in 0..n {
        cols[2][i] = cols[0][i] / cols[1][i].max(1.0); // matched_required_ratio
        cols[5][i] = cols[3][i] / cols[4][i].max(1.0); // matched_preferred_ratio
    }

    let mut rows = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let row: Vec<f64> = (0..NUM_FEATURES).map(|f| cols[f][i]).collect();
        let target = raw_target(&row, &config.target_weights);
        labels.push(classify(target, config).index());
        rows.push(row);
    }

    Dataset { rows, labels }
}

fn raw_target(row: &[f64], weights: &[f64; NUM_FEATURES]) -> f64 {
    row.iter()
        .zip(weights)
        .map(|(value, weight)| value * weight)
        .sum::<f64>()
        .clamp(0.0, 100.0)
}

/// Ordinal class for a synthetic 0-100 score.
pub fn classify(score: f64, config: &TrainingConfig) -> ReadinessClass {
    if score >= config.ready_threshold {
        ReadinessClass::Ready
    } else if score >= config.partial_threshold {
        ReadinessClass::Partial
    } else {
        ReadinessClass::NotReady
    }
}

fn fill_int(col: &mut [f64], rng: &mut StdRng, lo: i64, hi: i64) {
    for value in col.iter_mut() {
        *value = rng.gen_range(lo..hi) as f64;
    }
}

fn fill_uniform(col: &mut [f64], rng: &mut StdRng, lo: f64, hi: f64) {
    for value in col.iter_mut() {
        *value = rng.gen_range(lo..hi);
    }
}
