// src/engine/mod.rs
pub mod config;
pub mod config_file;
pub mod filter;
pub mod git;
pub mod github;
pub mod model;
pub mod prompt;
pub mod response;
pub mod review;
pub mod utils;
