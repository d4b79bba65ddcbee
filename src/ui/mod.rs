pub mod cli;
pub mod clipboard;
pub mod config;

#[cfg(feature = "interactive")]
pub mod interactive;

pub mod output;
pub mod template;
