use clip_review::{LineRef, ReviewIssue, ReviewResponse};

const FIXED_DOCUMENT: &str = r#"{
  "summary": "Adds retry logic to the HTTP client.",
  "positivePoints": [
    "Backoff is capped.",
    "Good test coverage."
  ],
  "issues": [
    {
      "file": "src/client.rs",
      "line": 42,
      "description": "The retry counter is never reset.",
      "suggestedFix": "Reset `attempts` after a successful request."
    },
    {
      "file": "src/config.rs",
      "line": "10-12",
      "description": "Timeout is read as milliseconds but documented as seconds."
    },
    {
      "file": "",
      "line": null,
      "description": "Consider a changelog entry.",
      "suggestedFix": ""
    }
  ],
  "additionalNotes": [
    "Retry behaviour could use a metric."
  ]
}"#;

const EXPECTED_MARKDOWN: &str = "## AI Code Review

### Summary

Adds retry logic to the HTTP client.

### Positive Points

- Backoff is capped.
- Good test coverage.

### Issues

#### 1. `src/client.rs` (line 42)

The retry counter is never reset.

**Suggested fix:**

Reset `attempts` after a successful request.

#### 2. `src/config.rs` (lines 10-12)

Timeout is read as milliseconds but documented as seconds.

#### 3. `General`

Consider a changelog entry.

### Additional Notes

- Retry behaviour could use a metric.
";

#[test]
fn test_markdown_is_stable_for_fixed_document() {
    let review = ReviewResponse::parse(FIXED_DOCUMENT).unwrap();
    let first = review.to_markdown();
    assert_eq!(first, EXPECTED_MARKDOWN);
    assert_eq!(ReviewResponse::parse(FIXED_DOCUMENT).unwrap().to_markdown(), first);
}

#[test]
fn test_parse_reads_all_fields() {
    let review = ReviewResponse::parse(FIXED_DOCUMENT).unwrap();
    assert_eq!(review.positive_points.len(), 2);
    assert_eq!(review.additional_notes.len(), 1);
    assert_eq!(
        review.issues[0],
        ReviewIssue {
            file: "src/client.rs".into(),
            line: Some(LineRef::Number(42)),
            description: "The retry counter is never reset.".into(),
            suggested_fix: Some("Reset `attempts` after a successful request.".into()),
        }
    );
    assert_eq!(review.issues[1].line, Some(LineRef::Text("10-12".into())));
    assert_eq!(review.issues[1].suggested_fix, None);
    assert_eq!(review.issues[2].line, None);
}

#[test]
fn test_minimal_document_renders_empty_sections() {
    let review = ReviewResponse::parse(r#"{"summary": "Looks good."}"#).unwrap();
    assert_eq!(
        review.to_markdown(),
        "## AI Code Review\n\n### Summary\n\nLooks good.\n\n### Issues\n\nNo issues found.\n"
    );
}

#[test]
fn test_fenced_response_is_accepted() {
    let fenced = format!("```json\n{FIXED_DOCUMENT}\n```\n");
    let review = ReviewResponse::parse(&fenced).unwrap();
    assert_eq!(review.to_markdown(), EXPECTED_MARKDOWN);
}

#[test]
fn test_invalid_documents_are_rejected() {
    assert!(ReviewResponse::parse("not json at all").is_err());
    assert!(ReviewResponse::parse(r#"{"positivePoints": []}"#).is_err());
    assert!(ReviewResponse::parse(r#"{"summary": "x", "issues": [{"file": "a.rs"}]}"#).is_err());
    let err = ReviewResponse::parse("{}").unwrap_err();
    assert!(err.to_string().contains("not a valid review document"));
}
