// Layout Compositor: page geometry, region assignment, and block placement.
// Everything here is synchronous and pure; it runs on every preview request.

pub mod compositor;
pub mod page;
pub mod regions;

pub use compositor::{compose, Block, Composition};
pub use page::{PageSpec, RenderMode};
pub use regions::{Region, SkillDisplay};
