//! This module resolves the guidelines document and the prompt template,
//! and renders the prompt with Handlebars.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
#[cfg(feature = "colors")]
use colored::Colorize;
use handlebars::{Handlebars, no_escape};
use log::debug;

/// Guidelines file looked up in the working directory.
pub const GUIDELINES_FILE: &str = "CODE_REVIEW_GUIDELINES.md";
/// The example guidelines shipped alongside the project.
pub const EXAMPLE_GUIDELINES_FILE: &str = "code-review-guidelines.example.md";

pub const PROMPT_TEMPLATE_NAME: &str = "prompt";

/// Where a piece of text (template or guidelines) came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOrigin {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for TextOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextOrigin::File(p) => write!(f, "{}", p.display()),
            TextOrigin::Builtin => write!(f, "built-in default"),
        }
    }
}

/// A trait for sources that can provide template or guidelines content.
pub trait TextSource {
    /// Loads the content and reports where it came from.
    fn load(&self) -> Result<(Cow<'static, str>, TextOrigin)>;
}

/// The first existing file among `candidates`.
pub struct FileSource {
    pub candidates: Vec<PathBuf>,
}

impl TextSource for FileSource {
    fn load(&self) -> Result<(Cow<'static, str>, TextOrigin)> {
        for path in &self.candidates {
            if path.is_file() {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                return Ok((content.into(), TextOrigin::File(path.clone())));
            }
            debug!("No file at {}", path.display());
        }
        Err(anyhow!("No file found in candidate paths."))
    }
}

pub struct BuiltinSource(pub &'static str);

impl TextSource for BuiltinSource {
    fn load(&self) -> Result<(Cow<'static, str>, TextOrigin)> {
        Ok((self.0.into(), TextOrigin::Builtin))
    }
}

pub const BUILTIN_GUIDELINES: BuiltinSource =
    BuiltinSource(include_str!("../../default_guidelines.md"));
pub const BUILTIN_TEMPLATE: BuiltinSource =
    BuiltinSource(include_str!("../../default_template.hbs"));

fn user_config_file(name: &str) -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join("clip-review")
        .join(name)
}

/// Reads an explicitly requested file, or walks the candidates and falls back to `builtin`.
fn resolve_text(
    explicit: Option<&Path>,
    candidates: Vec<PathBuf>,
    builtin: &BuiltinSource,
) -> Result<(Cow<'static, str>, TextOrigin)> {
    // 1. An explicit path has highest priority and must exist.
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok((content.into(), TextOrigin::File(path.to_path_buf())));
    }

    // 2. Try file-based sources.
    if let Ok(result) = (FileSource { candidates }).load() {
        return Ok(result);
    }

    // 3. Fallback to built-in default if all file sources fail.
    builtin.load()
}

/// Finds the review guidelines.
///
/// Search order: explicit path, `CODE_REVIEW_GUIDELINES.md` and then the bundled
/// example in `work_dir`, the user config directory, the built-in text.
pub fn resolve_guidelines(
    work_dir: &Path,
    explicit: Option<&Path>,
) -> Result<(Cow<'static, str>, TextOrigin)> {
    resolve_text(
        explicit,
        vec![
            work_dir.join(GUIDELINES_FILE),
            work_dir.join(EXAMPLE_GUIDELINES_FILE),
            user_config_file("guidelines.md"),
        ],
        &BUILTIN_GUIDELINES,
    )
}

/// Finds the prompt template: explicit path, project-local, user-global, built-in.
pub fn resolve_template(
    repo_root: &Path,
    explicit: Option<&Path>,
) -> Result<(Cow<'static, str>, TextOrigin)> {
    resolve_text(
        explicit,
        vec![
            repo_root.join(".clip-review/template.hbs"),
            user_config_file("template.hbs"),
        ],
        &BUILTIN_TEMPLATE,
    )
}

/// Set up the Handlebars template engine.
pub fn handlebars_setup<'a>(template_str: &str, template_name: &str) -> Result<Handlebars<'a>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(no_escape);

    handlebars
        .register_template_string(template_name, template_str)
        .map_err(|e| anyhow::anyhow!("Failed to register template: {}", e))?;

    Ok(handlebars)
}

/// Renders the template with the provided data.
pub fn render_template(
    handlebars: &Handlebars,
    template_name: &str,
    data: &serde_json::Value,
) -> Result<String> {
    let rendered = handlebars
        .render(template_name, data)
        .map_err(|e| anyhow::anyhow!("Failed to render template: {}", e))?;
    Ok(rendered.trim().to_string())
}

/// Writes the rendered prompt to a specified output file.
pub fn write_to_file(output_path: &str, rendered: &str) -> Result<()> {
    let file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    let mut writer = std::io::BufWriter::new(file);
    write!(writer, "{rendered}")?;
    writer.flush()?;

    #[cfg(feature = "colors")]
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "✓".bold().green(),
        "]".bold().white(),
        format!("Prompt written to file: {output_path}").green()
    );

    #[cfg(not(feature = "colors"))]
    println!("[✓] Prompt written to file: {output_path}");

    Ok(())
}
