pub mod format;
pub mod glob;
pub mod path;
