/// Skill services
pub mod attributes;
pub mod playlist;

pub use attributes::AttributesManager;
