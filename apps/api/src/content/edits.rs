//! Snapshot edits on `CvData`.
//!
//! Every edit borrows the current snapshot and returns a fresh one. Nested collections are
//! rebuilt rather than mutated, so a holder of the previous `Arc<CvData>` keeps seeing exactly
//! what it had and `Arc::ptr_eq` is enough to tell two snapshots apart.

use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    CvData, DesignConfig, Education, Experience, PersonalField, Skill, TemplateId,
};

/// Partial update for an experience entry. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationPatch {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub level: Option<i32>,
}

impl ExperiencePatch {
    fn apply(&self, exp: &Experience) -> Experience {
        Experience {
            id: exp.id,
            company: self.company.clone().unwrap_or_else(|| exp.company.clone()),
            role: self.role.clone().unwrap_or_else(|| exp.role.clone()),
            start_date: self
                .start_date
                .clone()
                .unwrap_or_else(|| exp.start_date.clone()),
            end_date: self.end_date.clone().unwrap_or_else(|| exp.end_date.clone()),
            current: self.current.unwrap_or(exp.current),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| exp.description.clone()),
        }
    }
}

impl EducationPatch {
    fn apply(&self, edu: &Education) -> Education {
        Education {
            id: edu.id,
            school: self.school.clone().unwrap_or_else(|| edu.school.clone()),
            degree: self.degree.clone().unwrap_or_else(|| edu.degree.clone()),
            year: self.year.clone().unwrap_or_else(|| edu.year.clone()),
        }
    }
}

impl SkillPatch {
    fn apply(&self, skill: &Skill) -> Skill {
        Skill {
            id: skill.id,
            name: self.name.clone().unwrap_or_else(|| skill.name.clone()),
            level: self.level.unwrap_or(skill.level),
        }
    }
}

impl CvData {
    pub fn with_personal_field(&self, field: PersonalField, value: impl Into<String>) -> CvData {
        let mut next = self.clone();
        let value = value.into();
        let slot = match field {
            PersonalField::FullName => &mut next.personal.full_name,
            PersonalField::JobTitle => &mut next.personal.job_title,
            PersonalField::Email => &mut next.personal.email,
            PersonalField::Phone => &mut next.personal.phone,
            PersonalField::Location => &mut next.personal.location,
            PersonalField::Website => &mut next.personal.website,
            PersonalField::Summary => &mut next.personal.summary,
        };
        *slot = value;
        next
    }

    pub fn with_theme_color(&self, color: impl Into<String>) -> CvData {
        CvData {
            theme_color: color.into(),
            ..self.clone()
        }
    }

    /// Switching template keeps any stored design so returning to `unique` restores it.
    pub fn with_template(&self, template_id: TemplateId) -> CvData {
        CvData {
            template_id,
            ..self.clone()
        }
    }

    /// Installs a freshly generated design, replacing the previous one wholesale,
    /// and selects the unique template.
    pub fn with_design(&self, design: DesignConfig) -> CvData {
        CvData {
            template_id: TemplateId::Unique,
            design_config: Some(design),
            ..self.clone()
        }
    }

    /// Prepends a blank experience entry. Returns the new snapshot and the entry id.
    pub fn with_new_experience(&self) -> (CvData, Uuid) {
        let entry = Experience::blank();
        let id = entry.id;
        let experience = std::iter::once(entry)
            .chain(self.experience.iter().cloned())
            .collect();
        (
            CvData {
                experience,
                ..self.clone()
            },
            id,
        )
    }

    pub fn with_experience_patch(&self, id: Uuid, patch: &ExperiencePatch) -> CvData {
        let experience = self
            .experience
            .iter()
            .map(|e| if e.id == id { patch.apply(e) } else { e.clone() })
            .collect();
        CvData {
            experience,
            ..self.clone()
        }
    }

    /// Removing an unknown id is a no-op on content but still yields a new snapshot.
    pub fn without_experience(&self, id: Uuid) -> CvData {
        CvData {
            experience: self
                .experience
                .iter()
                .filter(|e| e.id != id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    pub fn with_new_education(&self) -> (CvData, Uuid) {
        let entry = Education::blank();
        let id = entry.id;
        let education = std::iter::once(entry)
            .chain(self.education.iter().cloned())
            .collect();
        (
            CvData {
                education,
                ..self.clone()
            },
            id,
        )
    }

    pub fn with_education_patch(&self, id: Uuid, patch: &EducationPatch) -> CvData {
        let education = self
            .education
            .iter()
            .map(|e| if e.id == id { patch.apply(e) } else { e.clone() })
            .collect();
        CvData {
            education,
            ..self.clone()
        }
    }

    pub fn without_education(&self, id: Uuid) -> CvData {
        CvData {
            education: self
                .education
                .iter()
                .filter(|e| e.id != id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Skills append, unlike experience and education.
    pub fn with_new_skill(&self) -> (CvData, Uuid) {
        let entry = Skill::blank();
        let id = entry.id;
        let mut skills = self.skills.clone();
        skills.push(entry);
        (
            CvData {
                skills,
                ..self.clone()
            },
            id,
        )
    }

    pub fn with_skill_patch(&self, id: Uuid, patch: &SkillPatch) -> CvData {
        let skills = self
            .skills
            .iter()
            .map(|s| if s.id == id { patch.apply(s) } else { s.clone() })
            .collect();
        CvData {
            skills,
            ..self.clone()
        }
    }

    pub fn without_skill(&self, id: Uuid) -> CvData {
        CvData {
            skills: self
                .skills
                .iter()
                .filter(|s| s.id != id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    pub fn find_experience(&self, id: Uuid) -> Option<&Experience> {
        self.experience.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::design::LayoutKind;

    fn sample() -> CvData {
        let (data, first) = CvData::default().with_new_experience();
        let data = data.with_experience_patch(
            first,
            &ExperiencePatch {
                company: Some("Acme".to_string()),
                role: Some("Développeur".to_string()),
                ..Default::default()
            },
        );
        let (data, _) = data.with_new_education();
        let (data, _) = data.with_new_skill();
        data
    }

    #[test]
    fn test_new_experience_is_prepended() {
        let data = sample();
        let (next, id) = data.with_new_experience();
        assert_eq!(next.experience.len(), 2);
        assert_eq!(next.experience[0].id, id);
        assert_eq!(next.experience[1].company, "Acme");
    }

    #[test]
    fn test_new_education_is_prepended() {
        let data = sample();
        let (next, id) = data.with_new_education();
        assert_eq!(next.education[0].id, id);
        assert_eq!(next.education.len(), 2);
    }

    #[test]
    fn test_new_skill_is_appended_with_default_level() {
        let data = sample();
        let (next, id) = data.with_new_skill();
        assert_eq!(next.skills.last().map(|s| s.id), Some(id));
        assert_eq!(next.skills.last().map(|s| s.level), Some(4));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let (data, a) = CvData::default().with_new_experience();
        let (_, b) = data.with_new_experience();
        assert_ne!(a, b);
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let data = sample();
        let id = data.experience[0].id;
        let next = data.with_experience_patch(
            id,
            &ExperiencePatch {
                end_date: Some("Present".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(next.experience[0].end_date, "Present");
        assert_eq!(next.experience[0].company, "Acme");
        assert_eq!(data.experience[0].end_date, "", "previous snapshot untouched");
    }

    #[test]
    fn test_remove_unknown_experience_is_content_equal_new_snapshot() {
        let current = Arc::new(sample());
        let next = Arc::new(current.without_experience(Uuid::new_v4()));
        assert!(!Arc::ptr_eq(&current, &next));
        assert_eq!(*current, *next);
    }

    #[test]
    fn test_remove_existing_entries() {
        let data = sample();
        let next = data
            .without_experience(data.experience[0].id)
            .without_education(data.education[0].id)
            .without_skill(data.skills[0].id);
        assert!(next.experience.is_empty());
        assert!(next.education.is_empty());
        assert!(next.skills.is_empty());
    }

    #[test]
    fn test_skill_patch_keeps_out_of_range_level() {
        let data = sample();
        let id = data.skills[0].id;
        let next = data.with_skill_patch(
            id,
            &SkillPatch {
                level: Some(9),
                ..Default::default()
            },
        );
        assert_eq!(next.skills[0].level, 9);
        assert_eq!(next.skills[0].bar_percent(), 100);
    }

    #[test]
    fn test_personal_field_update() {
        let next = sample().with_personal_field(PersonalField::JobTitle, "Architecte");
        assert_eq!(next.personal.job_title, "Architecte");
    }

    #[test]
    fn test_with_design_replaces_wholesale_and_selects_unique() {
        let first = DesignConfig::default();
        let mut second = DesignConfig::default();
        second.layout = LayoutKind::Asymmetric;
        second.colors.accent = "#ff00aa".to_string();

        let data = sample().with_design(first).with_design(second.clone());
        assert_eq!(data.template_id, TemplateId::Unique);
        assert_eq!(data.design_config, Some(second));
    }

    #[test]
    fn test_template_switch_keeps_design() {
        let data = sample().with_design(DesignConfig::default());
        let next = data.with_template(TemplateId::Classic);
        assert_eq!(next.template_id, TemplateId::Classic);
        assert!(next.design_config.is_some());
    }
}
