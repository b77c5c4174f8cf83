//! Role requirements input schema.

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredSkill {
    #[serde(default, deserialize_with = "lenient")]
    pub skill: String,
    /// Relative importance of the skill, >= 0. Unspecified or malformed
    /// weights fall back to 1.0.
    #[serde(default = "default_weight", deserialize_with = "lenient_weight")]
    pub weight: f64,
}

impl Default for RequiredSkill {
    fn default() -> Self {
        Self {
            skill: String::new(),
            weight: default_weight(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferredSkill {
    #[serde(default, deserialize_with = "lenient")]
    pub skill: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(default, deserialize_with = "lenient")]
    pub required_skills: Vec<RequiredSkill>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferred_skills: Vec<PreferredSkill>,
}

fn default_weight() -> f64 {
    1.0
}

fn lenient_weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|w| w.is_finite())
        .map(|w| w.max(0.0))
        .unwrap_or_else(default_weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserializes_camel_case() {
        let json = r#"{
            "requiredSkills": [
                {"skill": "python", "weight": 2},
                {"skill": "java"}
            ],
            "preferredSkills": [{"skill": "docker"}]
        }"#;

        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.required_skills.len(), 2);
        assert_eq!(role.required_skills[0].skill, "python");
        assert!((role.required_skills[0].weight - 2.0).abs() < f64::EPSILON);
        assert_eq!(role.preferred_skills[0].skill, "docker");
    }

    #[test]
    fn test_missing_weight_defaults_to_one() {
        let rs: RequiredSkill = serde_json::from_str(r#"{"skill": "java"}"#).unwrap();
        assert!((rs.weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_weight_defaults_to_one() {
        let rs: RequiredSkill = serde_json::from_str(r#"{"skill": "java", "weight": "heavy"}"#).unwrap();
        assert!((rs.weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_weight_clamps_to_zero() {
        let rs: RequiredSkill = serde_json::from_str(r#"{"skill": "java", "weight": -3}"#).unwrap();
        assert_eq!(rs.weight, 0.0);
    }

    #[test]
    fn test_empty_role() {
        let role: Role = serde_json::from_str("{}").unwrap();
        assert!(role.required_skills.is_empty());
        assert!(role.preferred_skills.is_empty());
    }
}
