// Content Model operations: immutable snapshot edits over `models::CvData`.

pub mod edits;

pub use edits::{EducationPatch, ExperiencePatch, SkillPatch};
