//! The JSON document the reviewer hands back, and its markdown rendering.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Example document embedded in the prompt so the reviewer knows the exact shape.
pub const RESPONSE_SCHEMA: &str = r#"{
  "summary": "One paragraph describing the change and its overall quality.",
  "positivePoints": [
    "Something the change does well."
  ],
  "issues": [
    {
      "file": "path/to/file.rs",
      "line": 42,
      "description": "What is wrong and why it matters.",
      "suggestedFix": "How to fix it, code welcome."
    }
  ],
  "additionalNotes": [
    "Anything else worth mentioning."
  ]
}"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub summary: String,
    #[serde(default)]
    pub positive_points: Vec<String>,
    #[serde(default)]
    pub issues: Vec<ReviewIssue>,
    #[serde(default)]
    pub additional_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewIssue {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: Option<LineRef>,
    pub description: String,
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

/// Reviewers write either `42` or `"40-45"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineRef {
    Number(u64),
    Text(String),
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Number(n) => write!(f, "line {n}"),
            LineRef::Text(s) if s.contains('-') || s.contains(',') => write!(f, "lines {s}"),
            LineRef::Text(s) => write!(f, "line {s}"),
        }
    }
}

impl ReviewResponse {
    /// Parses a response, tolerating a surrounding markdown code fence.
    pub fn parse(text: &str) -> Result<Self> {
        let json = strip_code_fence(text);
        serde_json::from_str(json).context(
            "Response is not a valid review document \
             (expected summary, positivePoints, issues, additionalNotes)",
        )
    }

    /// Renders the review as the markdown body of a pull request comment.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## AI Code Review\n\n");

        out.push_str("### Summary\n\n");
        out.push_str(self.summary.trim());
        out.push_str("\n\n");

        if !self.positive_points.is_empty() {
            out.push_str("### Positive Points\n\n");
            push_bullets(&mut out, &self.positive_points);
        }

        out.push_str("### Issues\n\n");
        if self.issues.is_empty() {
            out.push_str("No issues found.\n\n");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            let file = match issue.file.trim() {
                "" => "General",
                f => f,
            };
            let _ = write!(out, "#### {}. `{}`", i + 1, file);
            if let Some(line) = issue.line.as_ref().filter(|l| !l.is_blank()) {
                let _ = write!(out, " ({line})");
            }
            out.push_str("\n\n");
            out.push_str(issue.description.trim());
            out.push_str("\n\n");
            if let Some(fix) = issue.suggested_fix.as_deref().map(str::trim) {
                if !fix.is_empty() {
                    out.push_str("**Suggested fix:**\n\n");
                    out.push_str(fix);
                    out.push_str("\n\n");
                }
            }
        }

        if !self.additional_notes.is_empty() {
            out.push_str("### Additional Notes\n\n");
            push_bullets(&mut out, &self.additional_notes);
        }

        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
        out
    }
}

impl LineRef {
    fn is_blank(&self) -> bool {
        matches!(self, LineRef::Text(s) if s.trim().is_empty())
    }
}

fn push_bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "- {}", item.trim());
    }
    out.push('\n');
}

/// Returns the text between a leading ```` ``` ```` line and the closing fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(nl) => &rest[nl + 1..],
        None => return trimmed,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
