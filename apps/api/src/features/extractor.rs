//! Feature Extractor: maps a profile/role pair onto the feature vector
//! the classifier was trained on.
//!
//! Extraction is a pure function and cannot fail: missing or degenerate
//! inputs produce zeros, and every ratio guards its denominator. Skill
//! matching is case-insensitive over the union of declared skills,
//! project technologies, and internship-gained skills.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Role, StudentProfile};

pub const NUM_FEATURES: usize = 13;

/// Feature names in training order. `FeatureVector::to_array` must stay in
/// sync with this list.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "matched_required_skills",
    "total_required_skills",
    "matched_required_ratio",
    "matched_preferred_skills",
    "total_preferred_skills",
    "matched_preferred_ratio",
    "avg_skill_level",
    "num_projects",
    "num_internships",
    "num_certifications",
    "avg_cgpa",
    "weighted_skill_match",
    "total_experience_months",
];

/// Fixed experience approximation: no date arithmetic, each internship
/// counts as three months.
const MONTHS_PER_INTERNSHIP: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub matched_required_skills: f64,
    pub total_required_skills: f64,
    pub matched_required_ratio: f64,
    pub matched_preferred_skills: f64,
    pub total_preferred_skills: f64,
    pub matched_preferred_ratio: f64,
    pub avg_skill_level: f64,
    pub num_projects: f64,
    pub num_internships: f64,
    pub num_certifications: f64,
    pub avg_cgpa: f64,
    pub weighted_skill_match: f64,
    pub total_experience_months: f64,
}

impl FeatureVector {
    /// Values in `FEATURE_NAMES` order.
    pub fn to_array(&self) -> [f64; NUM_FEATURES] {
        [
            self.matched_required_skills,
            self.total_required_skills,
            self.matched_required_ratio,
            self.matched_preferred_skills,
            self.total_preferred_skills,
            self.matched_preferred_ratio,
            self.avg_skill_level,
            self.num_projects,
            self.num_internships,
            self.num_certifications,
            self.avg_cgpa,
            self.weighted_skill_match,
            self.total_experience_months,
        ]
    }
}

pub fn extract_features(profile: &StudentProfile, role: &Role) -> FeatureVector {
    let possessed = possessed_skills(profile);

    let required: Vec<String> = role
        .required_skills
        .iter()
        .map(|rs| rs.skill.to_lowercase())
        .collect();
    let preferred: Vec<String> = role
        .preferred_skills
        .iter()
        .map(|ps| ps.skill.to_lowercase())
        .collect();

    let matched_required_skills =
        required.iter().filter(|s| possessed.contains(*s)).count() as f64;
    let total_required_skills = required.len() as f64;
    let matched_required_ratio = matched_required_skills / total_required_skills.max(1.0);

    let matched_preferred_skills =
        preferred.iter().filter(|s| possessed.contains(*s)).count() as f64;
    let total_preferred_skills = preferred.len() as f64;
    let matched_preferred_ratio = matched_preferred_skills / total_preferred_skills.max(1.0);

    let avg_skill_level = if profile.skills.is_empty() {
        0.0
    } else {
        profile.skills.iter().map(|s| s.level.ordinal()).sum::<f64>()
            / profile.skills.len() as f64
    };

    // Present, finite, non-zero CGPA entries only.
    let cgpas: Vec<f64> = profile
        .academics
        .iter()
        .map(|a| a.cgpa)
        .filter(|c| c.is_finite() && *c != 0.0)
        .collect();
    let avg_cgpa = if cgpas.is_empty() {
        0.0
    } else {
        cgpas.iter().sum::<f64>() / cgpas.len() as f64
    };

    let mut matched_weight = 0.0;
    let mut total_weight = 0.0;
    for rs in &role.required_skills {
        total_weight += rs.weight;
        if possessed.contains(&rs.skill.to_lowercase()) {
            matched_weight += rs.weight;
        }
    }
    let weighted_skill_match = matched_weight / total_weight.max(1.0);

    FeatureVector {
        matched_required_skills,
        total_required_skills,
        matched_required_ratio,
        matched_preferred_skills,
        total_preferred_skills,
        matched_preferred_ratio,
        avg_skill_level,
        num_projects: profile.projects.len() as f64,
        num_internships: profile.internships.len() as f64,
        num_certifications: profile.certifications.len() as f64,
        avg_cgpa,
        weighted_skill_match,
        total_experience_months: profile.internships.len() as f64 * MONTHS_PER_INTERNSHIP,
    }
}

/// Lowercased union of everything the student can claim as a skill.
fn possessed_skills(profile: &StudentProfile) -> HashSet<String> {
    let mut possessed = HashSet::new();
    for skill in &profile.skills {
        possessed.insert(skill.name.to_lowercase());
    }
    for project in &profile.projects {
        for tech in &project.technologies {
            possessed.insert(tech.to_lowercase());
        }
    }
    for internship in &profile.internships {
        for gained in &internship.skills_gained {
            possessed.insert(gained.to_lowercase());
        }
    }
    possessed
}
