use anyhow::{Context, Result};

use crate::features::NUM_FEATURES;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub training: TrainingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut training = TrainingConfig::default();
        if let Ok(seed) = std::env::var("MODEL_SEED") {
            training.seed = seed
                .parse::<u64>()
                .context("MODEL_SEED must be an unsigned integer")?;
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            training,
        })
    }
}

/// Knobs for synthetic data generation and model fitting.
///
/// The target weights and class thresholds are configuration rather than
/// constants baked into the trainer: they are placeholders with no real
/// outcome data behind them, and a deployment with historical labels
/// would replace them wholesale.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub n_samples: usize,
    pub n_rounds: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// L2 regularization on leaf weights.
    pub lambda: f64,
    pub seed: u64,
    /// Synthetic score at or above which a sample is labeled ready.
    pub ready_threshold: f64,
    /// Synthetic score at or above which a sample is labeled partial.
    pub partial_threshold: f64,
    /// Linear weights producing the synthetic 0-100 target, one per
    /// feature in `FEATURE_NAMES` order.
    pub target_weights: [f64; NUM_FEATURES],
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            n_rounds: 100,
            learning_rate: 0.1,
            max_depth: 4,
            min_samples_leaf: 20,
            lambda: 1.0,
            seed: 42,
            ready_threshold: 70.0,
            partial_threshold: 50.0,
            // Ratio and weighted-match features dominate the target.
            target_weights: [
                0.0,  // matched_required_skills
                0.0,  // total_required_skills
                40.0, // matched_required_ratio
                0.0,  // matched_preferred_skills
                0.0,  // total_preferred_skills
                20.0, // matched_preferred_ratio
                10.0, // avg_skill_level
                2.0,  // num_projects
                3.0,  // num_internships
                2.0,  // num_certifications
                2.0,  // avg_cgpa
                15.0, // weighted_skill_match
                0.5,  // total_experience_months
            ],
        }
    }
}
