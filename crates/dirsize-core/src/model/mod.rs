/// Data model for folder size results.
pub mod result;
pub mod size;

pub use result::{DirTotals, DirectorySizeResult};
