//! Region assignment table: which content category lands in which region of each layout.

use crate::models::design::LayoutKind;

/// A named placement area within a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Name, job title, and whatever the layout lets into the header block.
    Header,
    /// The wide column.
    Main,
    /// The narrow column.
    Sidebar,
    /// Narrow-column block outside the sidebar card (asymmetric only).
    Aside,
    /// Two-up row below the main flow (single-column only).
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
}

/// How skills are visualised in a given layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillDisplay {
    /// Label plus a proportional level bar.
    Bars,
    /// Label-only chip.
    Chips,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionPlan {
    /// Ordered `(region, categories)` pairs; category order within a region is display order.
    pub slots: &'static [(Region, &'static [Category])],
    /// CSS grid track list for the two-column body, `None` for a single flow.
    pub columns: Option<&'static str>,
    /// True when the narrow column comes first in reading order.
    pub sidebar_first: bool,
    pub skills: SkillDisplay,
}

use Category::*;
use Region::*;

const SIDEBAR_LEFT: RegionPlan = RegionPlan {
    slots: &[
        (Sidebar, &[Contact, Summary, Skills, Education]),
        (Header, &[]),
        (Main, &[Experience]),
    ],
    columns: Some("30% 70%"),
    sidebar_first: true,
    skills: SkillDisplay::Chips,
};

const SIDEBAR_RIGHT: RegionPlan = RegionPlan {
    slots: &[
        (Header, &[]),
        (Main, &[Summary, Experience]),
        (Sidebar, &[Contact, Skills, Education]),
    ],
    columns: Some("70% 30%"),
    sidebar_first: false,
    skills: SkillDisplay::Bars,
};

const SINGLE_COLUMN: RegionPlan = RegionPlan {
    slots: &[
        (Header, &[Contact, Summary]),
        (Main, &[Experience]),
        (Footer, &[Education, Skills]),
    ],
    columns: None,
    sidebar_first: false,
    skills: SkillDisplay::Chips,
};

const MINIMAL_GRID: RegionPlan = RegionPlan {
    slots: &[
        (Header, &[Contact]),
        (Sidebar, &[Summary, Skills, Education]),
        (Main, &[Experience]),
    ],
    columns: Some("4fr 8fr"),
    sidebar_first: true,
    skills: SkillDisplay::Bars,
};

const ASYMMETRIC: RegionPlan = RegionPlan {
    slots: &[
        (Header, &[]),
        (Main, &[Experience]),
        (Aside, &[Summary]),
        (Sidebar, &[Contact, Skills, Education]),
    ],
    columns: Some("2fr 1fr"),
    sidebar_first: false,
    skills: SkillDisplay::Chips,
};

pub fn plan_for(layout: LayoutKind) -> &'static RegionPlan {
    match layout {
        LayoutKind::SidebarLeft => &SIDEBAR_LEFT,
        LayoutKind::SidebarRight => &SIDEBAR_RIGHT,
        LayoutKind::SingleColumn => &SINGLE_COLUMN,
        LayoutKind::MinimalGrid => &MINIMAL_GRID,
        LayoutKind::Asymmetric => &ASYMMETRIC,
    }
}

impl RegionPlan {
    /// Region a category is assigned to. Every category has exactly one home.
    pub fn region_of(&self, category: Category) -> Option<Region> {
        self.slots
            .iter()
            .find(|(_, cats)| cats.contains(&category))
            .map(|(region, _)| *region)
    }
}
