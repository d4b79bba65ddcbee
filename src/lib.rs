// src/lib.rs

//! Internal library for clip-review – not published on crates.io

pub mod app_controller;
pub mod common;
pub mod engine;
pub mod ui;

// Re-export a narrow, testable API surface
pub use engine::{
    config::{ReviewConfig, ReviewConfigBuilder},
    model::{BranchDiff, FileDiff, SkipReason, SkippedFile},
    response::ResponseFile,
    review::{LineRef, ReviewIssue, ReviewResponse},
};
