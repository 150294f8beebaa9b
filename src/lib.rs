//! update-wiki — generate GitHub wiki pages from a source clone.
//!
//! Pages are Markdown templates with `__TOKEN__` placeholders. Tokens are
//! filled from the documented settings file, the commit history and the
//! project's CLI help, then most pages get a generated table of contents.

pub mod cli_help;
pub mod config;
pub mod contributors;
pub mod error;
pub mod git;
pub mod pipeline;
pub mod publish;
pub mod settings;
pub mod substitute;
pub mod toc;

pub use config::WikiConfig;
pub use error::{Result, WikiError};
