//! Layout Compositor: places content blocks into the regions of a layout.
//!
//! The output is a renderer-agnostic tree: the HTML writer walks it together with the
//! resolved style. Empty collections never produce a block, so no empty heading can reach
//! the page, and the header always carries a name and a title (placeholders when blank).

use crate::layout::regions::{plan_for, Category, Region, SkillDisplay};
use crate::models::design::LayoutKind;
use crate::models::{CvData, PersonalInfo};

pub const NAME_PLACEHOLDER: &str = "Votre Nom";
pub const TITLE_PLACEHOLDER: &str = "Titre du poste";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Website,
}

impl ContactKind {
    pub fn glyph(self) -> &'static str {
        match self {
            ContactKind::Email => "\u{2709}",
            ContactKind::Phone => "\u{260E}",
            ContactKind::Location => "\u{2302}",
            ContactKind::Website => "\u{2295}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceItem {
    pub role: String,
    pub company: String,
    pub dates: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationItem {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillItem {
    pub name: String,
    /// Bar width in percent, already clamped to [0, 100].
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Contact(Vec<ContactItem>),
    Summary(String),
    Experience(Vec<ExperienceItem>),
    Education(Vec<EducationItem>),
    Skills {
        items: Vec<SkillItem>,
        display: SkillDisplay,
    },
}

impl Block {
    pub fn category(&self) -> Category {
        match self {
            Block::Contact(_) => Category::Contact,
            Block::Summary(_) => Category::Summary,
            Block::Experience(_) => Category::Experience,
            Block::Education(_) => Category::Education,
            Block::Skills { .. } => Category::Skills,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionContent {
    pub region: Region,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub layout: LayoutKind,
    pub header: HeaderBlock,
    /// Regions in plan order. Regions left without blocks are kept so the grid stays stable.
    pub regions: Vec<RegionContent>,
    pub columns: Option<&'static str>,
    pub sidebar_first: bool,
}

impl Composition {
    pub fn region(&self, region: Region) -> &[Block] {
        self.regions
            .iter()
            .find(|r| r.region == region)
            .map(|r| r.blocks.as_slice())
            .unwrap_or(&[])
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.regions.iter().flat_map(|r| r.blocks.iter())
    }
}

/// Trimmed value or the placeholder when blank.
pub fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `start - end`, the single value when only one is set, `None` when both are blank.
pub fn date_line(start: &str, end: &str) -> Option<String> {
    match (start.trim(), end.trim()) {
        ("", "") => None,
        (s, "") => Some(s.to_string()),
        ("", e) => Some(e.to_string()),
        (s, e) => Some(format!("{s} - {e}")),
    }
}

/// Non-blank contact fields in display order.
pub fn contact_items(personal: &PersonalInfo) -> Vec<ContactItem> {
    [
        (ContactKind::Email, &personal.email),
        (ContactKind::Phone, &personal.phone),
        (ContactKind::Location, &personal.location),
        (ContactKind::Website, &personal.website),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(kind, value)| ContactItem {
        kind,
        text: value.trim().to_string(),
    })
    .collect()
}

fn block_for(cv: &CvData, category: Category, skills: SkillDisplay) -> Option<Block> {
    match category {
        Category::Contact => {
            let items = contact_items(&cv.personal);
            (!items.is_empty()).then_some(Block::Contact(items))
        }
        Category::Summary => {
            let summary = cv.personal.summary.trim();
            (!summary.is_empty()).then(|| Block::Summary(summary.to_string()))
        }
        Category::Experience => (!cv.experience.is_empty()).then(|| {
            Block::Experience(
                cv.experience
                    .iter()
                    .map(|e| ExperienceItem {
                        role: e.role.clone(),
                        company: e.company.clone(),
                        dates: date_line(&e.start_date, &e.end_date),
                        description: e.description.clone(),
                    })
                    .collect(),
            )
        }),
        Category::Education => (!cv.education.is_empty()).then(|| {
            Block::Education(
                cv.education
                    .iter()
                    .map(|e| EducationItem {
                        school: e.school.clone(),
                        degree: e.degree.clone(),
                        year: e.year.clone(),
                    })
                    .collect(),
            )
        }),
        Category::Skills => (!cv.skills.is_empty()).then(|| Block::Skills {
            items: cv
                .skills
                .iter()
                .map(|s| SkillItem {
                    name: s.name.clone(),
                    percent: s.bar_percent(),
                })
                .collect(),
            display: skills,
        }),
    }
}

/// Places `cv` into `layout`. Pure and total: every layout accepts every snapshot.
pub fn compose(cv: &CvData, layout: LayoutKind) -> Composition {
    let plan = plan_for(layout);
    let regions = plan
        .slots
        .iter()
        .map(|(region, categories)| RegionContent {
            region: *region,
            blocks: categories
                .iter()
                .filter_map(|category| block_for(cv, *category, plan.skills))
                .collect(),
        })
        .collect();

    Composition {
        layout,
        header: HeaderBlock {
            name: or_placeholder(&cv.personal.full_name, NAME_PLACEHOLDER),
            title: or_placeholder(&cv.personal.job_title, TITLE_PLACEHOLDER),
        },
        regions,
        columns: plan.columns,
        sidebar_first: plan.sidebar_first,
    }
}
