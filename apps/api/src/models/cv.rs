use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::design::DesignConfig;

/// Theme color of the static templates when none has been chosen.
pub const DEFAULT_THEME_COLOR: &str = "#2563eb";

/// Preset theme colors offered next to the static templates.
pub const THEME_PRESETS: [&str; 4] = ["#2563eb", "#059669", "#dc2626", "#1e293b"];

/// Free-text personal details. An empty string means "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
}

/// Addressable personal fields for single-field updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    JobTitle,
    Email,
    Phone,
    Location,
    Website,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    /// Free text; "Present" is as valid as a date.
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Informational only, never consulted by rendering.
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

impl Experience {
    pub fn blank() -> Self {
        Experience {
            id: Uuid::new_v4(),
            company: String::new(),
            role: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub year: String,
}

impl Education {
    pub fn blank() -> Self {
        Education {
            id: Uuid::new_v4(),
            school: String::new(),
            degree: String::new(),
            year: String::new(),
        }
    }
}

/// Level newly added skills start at.
pub const DEFAULT_SKILL_LEVEL: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    /// Nominally 1–5. Out-of-range values are kept as entered and clamped at render time.
    #[serde(default = "default_skill_level")]
    pub level: i32,
}

fn default_skill_level() -> i32 {
    DEFAULT_SKILL_LEVEL
}

impl Skill {
    pub fn blank() -> Self {
        Skill {
            id: Uuid::new_v4(),
            name: String::new(),
            level: DEFAULT_SKILL_LEVEL,
        }
    }

    /// Width of the level bar as a percentage: `level × 20`, clamped to [0, 100].
    pub fn bar_percent(&self) -> u8 {
        (self.level.saturating_mul(20)).clamp(0, 100) as u8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Elegant,
    Unique,
}

/// The résumé aggregate. Snapshots are replaced wholesale on every edit, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvData {
    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    #[serde(default)]
    pub template_id: TemplateId,
    /// Present once a design generation has succeeded. Only read by the unique template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_config: Option<DesignConfig>,
}

fn default_theme_color() -> String {
    DEFAULT_THEME_COLOR.to_string()
}

impl Default for CvData {
    fn default() -> Self {
        CvData {
            personal: PersonalInfo::default(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            theme_color: default_theme_color(),
            template_id: TemplateId::Modern,
            design_config: None,
        }
    }
}

impl CvData {
    /// Theme color of the static templates, falling back to the default blue when blank.
    pub fn theme_color(&self) -> &str {
        if self.theme_color.trim().is_empty() {
            DEFAULT_THEME_COLOR
        } else {
            &self.theme_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(level: i32) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            name: "Rust".to_string(),
            level,
        }
    }

    #[test]
    fn test_bar_percent_nominal_levels() {
        assert_eq!(skill(1).bar_percent(), 20);
        assert_eq!(skill(3).bar_percent(), 60);
        assert_eq!(skill(5).bar_percent(), 100);
    }

    #[test]
    fn test_bar_percent_clamps_out_of_range() {
        assert_eq!(skill(0).bar_percent(), 0);
        assert_eq!(skill(6).bar_percent(), 100);
        assert_eq!(skill(-3).bar_percent(), 0);
        assert_eq!(skill(i32::MAX).bar_percent(), 100);
        assert_eq!(skill(i32::MIN).bar_percent(), 0);
    }

    #[test]
    fn test_initial_data_defaults() {
        let data = CvData::default();
        assert_eq!(data.template_id, TemplateId::Modern);
        assert_eq!(data.theme_color, DEFAULT_THEME_COLOR);
        assert!(data.experience.is_empty());
        assert!(data.design_config.is_none());
    }

    #[test]
    fn test_cv_data_uses_camel_case_wire_names() {
        let json = serde_json::json!({
            "personal": {"fullName": "Jeanne Martin", "jobTitle": "Ingénieure"},
            "experience": [{
                "id": Uuid::new_v4(),
                "company": "Acme",
                "role": "Dev",
                "startDate": "2020",
                "endDate": "Present",
                "current": true,
                "description": "Rust"
            }],
            "templateId": "unique"
        });
        let data: CvData = serde_json::from_value(json).unwrap();
        assert_eq!(data.personal.full_name, "Jeanne Martin");
        assert_eq!(data.personal.email, "");
        assert_eq!(data.experience[0].end_date, "Present");
        assert_eq!(data.template_id, TemplateId::Unique);
        assert_eq!(data.theme_color, DEFAULT_THEME_COLOR);
    }

    #[test]
    fn test_missing_design_config_is_not_serialized() {
        let value = serde_json::to_value(CvData::default()).unwrap();
        assert!(value.get("designConfig").is_none());
        assert_eq!(value["templateId"], "modern");
    }

    #[test]
    fn test_blank_theme_color_falls_back() {
        let data = CvData {
            theme_color: "  ".to_string(),
            ..CvData::default()
        };
        assert_eq!(data.theme_color(), DEFAULT_THEME_COLOR);
    }
}
