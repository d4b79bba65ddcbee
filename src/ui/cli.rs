// src/ui/cli.rs

use clap::Parser;
use std::path::PathBuf;

// ~~~ CLI Arguments ~~~
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy an AI code-review prompt for the diff between two branches to the clipboard, \
             wait for the JSON review, and post it as a pull request comment."
)]
pub struct Cli {
    /// Base branch the pull request merges into (default: main, then master)
    #[clap(short = 'b', long = "base", value_name = "BRANCH")]
    pub base: Option<String>,

    /// Branch under review (default: the current branch)
    #[clap(short = 't', long = "target", value_name = "BRANCH")]
    pub target: Option<String>,

    /// Pick branches from a list and confirm the comment before it is posted
    #[clap(short = 'i', long)]
    pub interactive: bool,

    /// Pull request to comment on: number, URL or branch (default: the target branch)
    #[clap(long, value_name = "PR")]
    pub pr: Option<String>,

    /// Review guidelines file (default: ./CODE_REVIEW_GUIDELINES.md, then built-in)
    #[clap(long, value_name = "FILE")]
    pub guidelines: Option<PathBuf>,

    /// Optional Path to a custom Handlebars prompt template
    #[clap(short = 'T', long)]
    pub template: Option<PathBuf>,

    /// Also write the prompt to this file
    #[clap(short = 'O', long = "output-file")]
    pub output_file: Option<String>,

    /// Seconds to wait for the review JSON (default: 300)
    #[clap(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds between checks for the review JSON (default: 2)
    #[clap(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Skip files whose diff changes more lines than this (default: 1000)
    #[clap(long, value_name = "NUMBER")]
    pub max_diff_lines: Option<usize>,

    /// Patterns to include, comma-separated
    #[clap(long = "include", value_delimiter = ',')]
    pub include: Vec<String>,

    /// Patterns to exclude, comma-separated
    #[clap(short = 'e', long = "exclude", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Do not exclude lockfiles and minified assets by default
    #[clap(long)]
    pub no_default_excludes: bool,

    /// Disable copying to clipboard; print the prompt instead
    #[clap(long)]
    pub no_clipboard: bool,

    /// Print the formatted comment instead of posting it
    #[clap(long)]
    pub dry_run: bool,

    #[arg(long, hide = true)]
    pub clipboard_daemon: bool,
}
