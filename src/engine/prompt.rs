use std::path::Path;

use anyhow::Result;

use crate::{
    common::{format::format_path_label, path::to_fwd_slash},
    engine::{
        model::{BranchDiff, PromptContext, SkippedContext},
        review::RESPONSE_SCHEMA,
    },
    ui::template::{PROMPT_TEMPLATE_NAME, handlebars_setup, render_template},
};

impl PromptContext {
    pub fn new(repo_root: &Path, diff: &BranchDiff, guidelines: &str, response_path: &Path) -> Self {
        Self {
            repository: format_path_label(repo_root),
            base: diff.base.clone(),
            target: diff.target.clone(),
            guidelines: guidelines.trim().to_string(),
            files: diff.files.clone(),
            skipped: diff
                .skipped
                .iter()
                .map(|s| SkippedContext {
                    path: to_fwd_slash(&s.path),
                    reason: s.reason.to_string(),
                })
                .collect(),
            response_path: response_path.display().to_string(),
            response_schema: RESPONSE_SCHEMA.to_string(),
        }
    }
}

/// Renders the review prompt from `template` and the collected context.
pub fn render_prompt(template: &str, context: &PromptContext) -> Result<String> {
    let hb = handlebars_setup(template, PROMPT_TEMPLATE_NAME)?;
    let data = serde_json::to_value(context)?;
    render_template(&hb, PROMPT_TEMPLATE_NAME, &data)
}
