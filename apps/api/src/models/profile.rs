//! Student profile input schema.
//!
//! Mirrors the nested records produced by the upstream student service
//! (camelCase wire names). Unknown fields are ignored; missing or
//! malformed fields default, so any JSON object deserializes into a
//! usable profile.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Declared proficiency for a skill. Unknown values fall back to beginner,
/// matching the defaulting rule applied during feature extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Ordinal used by the feature extractor: beginner=1 .. advanced=3.
    pub fn ordinal(self) -> f64 {
        match self {
            SkillLevel::Beginner => 1.0,
            SkillLevel::Intermediate => 2.0,
            SkillLevel::Advanced => 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    #[serde(default, deserialize_with = "lenient")]
    pub skills_gained: Vec<String>,
}

/// Only the count of certifications feeds the feature vector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcademicRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub cgpa: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default, deserialize_with = "lenient")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "lenient")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "lenient")]
    pub internships: Vec<Internship>,
    #[serde(default, deserialize_with = "lenient")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "lenient")]
    pub academics: Vec<AcademicRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_profile_deserializes() {
        let json = r#"{
            "skills": [
                {"name": "Python", "level": "advanced"},
                {"name": "SQL", "level": "intermediate"}
            ],
            "projects": [{"technologies": ["React", "Node"]}],
            "internships": [{"skillsGained": ["Docker"]}],
            "certifications": [{"name": "AWS CCP"}],
            "academics": [{"cgpa": 8.4}]
        }"#;

        let profile: StudentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.skills[0].level, SkillLevel::Advanced);
        assert_eq!(profile.projects[0].technologies, vec!["React", "Node"]);
        assert_eq!(profile.internships[0].skills_gained, vec!["Docker"]);
        assert_eq!(profile.certifications.len(), 1);
        assert!((profile.academics[0].cgpa - 8.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_object_is_empty_profile() {
        let profile: StudentProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.skills.is_empty());
        assert!(profile.projects.is_empty());
        assert!(profile.internships.is_empty());
        assert!(profile.certifications.is_empty());
        assert!(profile.academics.is_empty());
    }

    #[test]
    fn test_unknown_skill_level_defaults_to_beginner() {
        let skill: Skill = serde_json::from_str(r#"{"name": "Go", "level": "wizard"}"#).unwrap();
        assert_eq!(skill.level, SkillLevel::Beginner);
    }

    #[test]
    fn test_missing_skill_level_defaults_to_beginner() {
        let skill: Skill = serde_json::from_str(r#"{"name": "Go"}"#).unwrap();
        assert_eq!(skill.level, SkillLevel::Beginner);
    }

    #[test]
    fn test_wrong_typed_field_degrades_to_default() {
        let profile: StudentProfile =
            serde_json::from_str(r#"{"skills": 42, "academics": [{"cgpa": "high"}]}"#).unwrap();
        assert!(profile.skills.is_empty());
        assert_eq!(profile.academics.len(), 1);
        assert_eq!(profile.academics[0].cgpa, 0.0);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let profile: StudentProfile =
            serde_json::from_str(r#"{"resumeHeadline": "...", "skills": []}"#).unwrap();
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_skill_level_ordinals() {
        assert_eq!(SkillLevel::Beginner.ordinal(), 1.0);
        assert_eq!(SkillLevel::Intermediate.ordinal(), 2.0);
        assert_eq!(SkillLevel::Advanced.ordinal(), 3.0);
    }
}
