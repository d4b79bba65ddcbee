//! A centralized module for user-facing formatting utilities.

use std::path::Path;

use thousands::Separable;

/// "12345" -> "12,345"
pub fn format_count(n: usize) -> String {
    n.separate_with_commas()
}

/// "1 file" / "3 files"
pub fn pluralize(n: u64, singular: &str, plural: &str) -> String {
    let label = if n == 1 { singular } else { plural };
    format!("{} {label}", n.separate_with_commas())
}

/// Creates a user-friendly label for a path.
/// Takes the file_name, or if that's missing, the last component of the
/// current directory.
pub fn format_path_label<P: AsRef<Path>>(p: P) -> String {
    let path = p.as_ref();
    if path.file_name().is_none() {
        std::env::current_dir()
            .ok()
            .and_then(|d| d.file_name().and_then(|n| n.to_str().map(str::to_owned)))
            .unwrap_or_else(|| ".".into())
    } else {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_owned()
    }
}
