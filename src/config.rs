//! Run configuration, resolved once from flags and the environment.

use crate::error::{Result, WikiError};
use std::path::{Path, PathBuf};

pub const SOURCE_DIR_ENV: &str = "REZ_SOURCE_DIR";

pub const DEFAULT_RELEASE: &str = "unknown-release";
pub const DEFAULT_REPO: &str = "unknown/rez";
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_WORKFLOW: &str = "Wiki";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_CLI_PROGRAM: &str = "rez";

/// `owner/name` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn parse(repo: &str) -> Result<Self> {
        match repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(WikiError::InvalidRepo(repo.to_string())),
        }
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything a wiki update run needs to know.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    pub release: String,
    pub repo: RepoSlug,
    pub branch: String,
    pub workflow: String,
    pub clone_url: String,
    pub out_dir: PathBuf,
    /// Root of the source clone being documented.
    pub source_dir: PathBuf,
    pub pages_dir: PathBuf,
    pub media_dir: PathBuf,
    pub cli_program: String,
    /// Explicit subcommands to document; empty means discover.
    pub cli_commands: Vec<String>,
}

impl WikiConfig {
    /// Defaults for a source clone at `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let repo = RepoSlug {
            owner: "unknown".to_string(),
            name: "rez".to_string(),
        };
        Self {
            release: DEFAULT_RELEASE.to_string(),
            clone_url: default_clone_url(&repo),
            repo,
            branch: DEFAULT_BRANCH.to_string(),
            workflow: DEFAULT_WORKFLOW.to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            pages_dir: source_dir.join("wiki").join("pages"),
            media_dir: source_dir.join("wiki").join("media"),
            source_dir,
            cli_program: DEFAULT_CLI_PROGRAM.to_string(),
            cli_commands: Vec::new(),
        }
    }

    /// Settings source documented on the configuration page.
    pub fn rezconfig_path(&self) -> PathBuf {
        self.source_dir.join("src").join("rez").join("rezconfig.py")
    }

    pub fn page_path(&self, file_name: &str) -> PathBuf {
        self.pages_dir.join(file_name)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }
}

pub fn default_clone_url(repo: &RepoSlug) -> String {
    format!("git@github.com:{}.wiki.git", repo)
}

/// Percent-encode everything except unreserved URL characters, so the value
/// can sit inside a single path segment or query value.
pub fn url_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Resolve `path` against the current directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| WikiError::io(path, e))
}
