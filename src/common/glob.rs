use anyhow::{Context, Result};
use glob::Pattern;

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiles validated patterns into one matcher. Like git pathspecs, `*`
/// also crosses directory separators.
pub fn build_globset(patterns: &[Pattern]) -> Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p.as_str()).with_context(|| format!("Invalid glob: '{}'", p.as_str()))?);
    }
    Ok(b.build()?)
}
