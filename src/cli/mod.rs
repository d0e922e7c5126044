//! # Command-Line Interface
//!
//! User-facing commands wrapping the extraction engine.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `extract <FILE>` | Candidates, dependency edges, insights |
//! | `analyze <FILE>` | Recommendations layered on extraction |
//! | `classify <TEXT>` | Lexical classifiers on one span |
//! | `order <FILE>` | Candidates with prerequisites first |
//!
//! `<FILE>` may be `-` to read stdin. `--type` sets the declared content
//! type; otherwise it comes from the file extension.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr:
//! ```bash
//! taskdraft --verbose extract notes.md
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod input;
mod extract;
mod analyze;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
