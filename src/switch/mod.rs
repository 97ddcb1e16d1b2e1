//! Package-to-project reference switching

mod context;
mod engine;
mod report;

pub use context::SwitchContext;
pub use engine::{Switcher, VisitState};
pub use report::{Replacement, SwitchReport};
