//! Plan management: snapshot model, TOML plan files.

pub mod model;
pub mod parser;
pub mod toml_format;

pub use model::{Course, CourseId, Plan, PlanError, PlannedCourse, Term};
pub use parser::{Catalog, PlanFileError, load_plan_toml, load_plan_with_catalog};
pub use toml_format::{CourseToml, PlanMeta, PlanToml, TermToml};
