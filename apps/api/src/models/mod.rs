// Data models shared across the feature, ML, and scoring layers.
// Input records arrive loosely typed from the upstream student service;
// every field here must degrade to a default rather than fail a request.

pub mod profile;
pub mod readiness;
pub mod role;

pub use profile::{AcademicRecord, Certification, Internship, Project, Skill, SkillLevel, StudentProfile};
pub use readiness::ReadinessClass;
pub use role::{PreferredSkill, RequiredSkill, Role};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserializes a field to its `Default` when the value is null or of the
/// wrong type. Combined with `#[serde(default)]` for absent keys, this
/// makes the whole input schema total: malformed fields become defaults at
/// the boundary instead of scattering error handling downstream.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
