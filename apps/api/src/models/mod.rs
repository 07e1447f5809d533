pub mod cv;
pub mod design;

pub use cv::{CvData, Education, Experience, PersonalField, PersonalInfo, Skill, TemplateId};
pub use design::DesignConfig;
