//! Candidate profile — the fixed record every analysis run is scored against.
//!
//! Loaded once from `candidate_profile.json` (camelCase keys) and read-only
//! for the lifetime of the run. A missing or malformed profile is always
//! fatal: no partial/default profile is ever synthesized, since every stage
//! prompt depends on it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub core: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub accomplishments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// The full candidate record, mirroring `candidate_profile.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl CandidateProfile {
    /// Loads the profile from disk. Missing file and structural parse
    /// failures are both configuration errors — the pipeline must not start
    /// without a valid profile.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "Candidate profile not readable at {}: {e}",
                path.display()
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::Configuration(format!(
                "Candidate profile at {} is not valid JSON: {e}",
                path.display()
            ))
        })
    }

    /// Pretty-printed JSON block embedded verbatim into stage prompts.
    pub fn prompt_json(&self) -> String {
        // Serialization of an already-deserialized value cannot fail.
        serde_json::to_string_pretty(self).expect("profile serializes to JSON")
    }

    pub fn name(&self) -> &str {
        &self.personal_info.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_PROFILE: &str = r#"{
        "personalInfo": {
            "name": "Jane Doe",
            "email": "jane@example.com",
            "links": ["https://github.com/janedoe"]
        },
        "summary": "Backend engineer with 8 years of distributed systems work.",
        "skills": {
            "technical": ["Rust", "PostgreSQL"],
            "core": ["System design"],
            "soft": ["Mentoring"]
        },
        "experience": [
            {
                "title": "Staff Engineer",
                "company": "Acme",
                "period": "2020-2024",
                "responsibilities": ["Owned the billing platform"],
                "accomplishments": ["Cut p99 latency by 40%"]
            }
        ],
        "projects": [],
        "education": [
            {"degree": "BSc Computer Science", "institution": "State University"}
        ]
    }"#;

    #[test]
    fn test_load_valid_profile() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_PROFILE.as_bytes()).unwrap();

        let profile = CandidateProfile::load(file.path()).unwrap();
        assert_eq!(profile.name(), "Jane Doe");
        assert_eq!(profile.skills.technical, vec!["Rust", "PostgreSQL"]);
        assert_eq!(profile.experience.len(), 1);
        assert!(profile.references.is_empty());
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = CandidateProfile::load(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = CandidateProfile::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_prompt_json_round_trips() {
        let profile: CandidateProfile = serde_json::from_str(VALID_PROFILE).unwrap();
        let rendered = profile.prompt_json();
        let back: CandidateProfile = serde_json::from_str(&rendered).unwrap();
        assert_eq!(back.name(), profile.name());
        assert!(rendered.contains("personalInfo"));
    }
}
