//! Project metadata: the description type, the reader that produces it,
//! and the index of locally available projects

mod description;
pub mod index;
pub mod msbuild;
mod reader;

pub use description::ProjectDescription;
pub use index::LocalProjectIndex;
pub use reader::ProjectReader;
