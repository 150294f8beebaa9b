//! Page generation: templates in, published wiki pages out.
//!
//! Generated pages come from `_<Name>.md` templates whose tokens are filled
//! from the source clone. Every other publishable file in the pages directory
//! is passed through. Pages not in [`NO_TOC`] get a table of contents.

use crate::cli_help::{self, HelpSource};
use crate::config::{url_escape, WikiConfig};
use crate::contributors;
use crate::error::{Result, WikiError};
use crate::git::VersionControl;
use crate::settings;
use crate::substitute::{substitute, TokenMap};
use crate::toc;
use std::fs;
use std::path::{Path, PathBuf};

/// Pages published without a generated table of contents.
pub const NO_TOC: &[&str] = &[
    "Credits.md",
    "Command-Line-Tools.md",
    "Home.md",
    "_Footer.md",
    "_Sidebar.md",
];

/// Underscore-prefixed files that are wiki pages rather than templates.
pub const PUBLISHED_SPECIAL: &[&str] = &["_Sidebar.md", "_Footer.md"];

const PAGE_SUFFIX: &str = ".md";

/// Pages produced from a template plus generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedPage {
    ConfiguringRez,
    Credits,
    CommandLineTools,
    Footer,
    Sidebar,
}

impl GeneratedPage {
    pub const ALL: [GeneratedPage; 5] = [
        GeneratedPage::ConfiguringRez,
        GeneratedPage::Credits,
        GeneratedPage::CommandLineTools,
        GeneratedPage::Footer,
        GeneratedPage::Sidebar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeneratedPage::ConfiguringRez => "Configuring-Rez",
            GeneratedPage::Credits => "Credits",
            GeneratedPage::CommandLineTools => "Command-Line-Tools",
            GeneratedPage::Footer => "_Footer",
            GeneratedPage::Sidebar => "_Sidebar",
        }
    }

    pub fn template_file(self) -> String {
        format!("_{}{}", self.name(), PAGE_SUFFIX)
    }

    pub fn output_file(self) -> String {
        format!("{}{}", self.name(), PAGE_SUFFIX)
    }
}

/// A page ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Output file name, e.g. `Home.md`.
    pub name: String,
    pub content: String,
    pub toc: bool,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let toc = !NO_TOC.contains(&name.as_str());
        Self {
            name,
            content: content.into(),
            toc,
        }
    }

    /// Final page text.
    pub fn render(&self) -> String {
        if self.toc {
            toc::add_toc(&self.content)
        } else {
            self.content.clone()
        }
    }
}

/// Whether a file in the pages directory is published as a wiki page.
///
/// Templates (leading underscore) and non-Markdown files are not.
pub fn is_published(file_name: &str) -> bool {
    if !file_name.ends_with(PAGE_SUFFIX) {
        return false;
    }
    !file_name.starts_with('_') || PUBLISHED_SPECIAL.contains(&file_name)
}

pub struct Pipeline<'a> {
    config: &'a WikiConfig,
    vcs: &'a dyn VersionControl,
    help: &'a dyn HelpSource,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a WikiConfig,
        vcs: &'a dyn VersionControl,
        help: &'a dyn HelpSource,
    ) -> Self {
        Self { config, vcs, help }
    }

    /// Tokens to fill in for one generated page.
    pub fn tokens(&self, page: GeneratedPage) -> Result<TokenMap> {
        let cfg = self.config;
        let repo = cfg.repo.to_string();
        let mut tokens = TokenMap::new();

        match page {
            GeneratedPage::ConfiguringRez => {
                let path = cfg.rezconfig_path();
                let source = read(&path)?;
                let md = settings::settings_markdown(&source, &path.display().to_string())?;
                tokens.insert("__REZCONFIG_MD__", md);
                tokens.insert("__GITHUB_REPO__", repo);
            }
            GeneratedPage::Credits => {
                let shortlog = self.vcs.shortlog(&cfg.source_dir)?;
                tokens.insert("__CONTRIBUTORS_MD__", contributors::contributors_markdown(&shortlog));
            }
            GeneratedPage::CommandLineTools => {
                tokens.insert("__GENERATED_MD__", cli_help::cli_markdown(self.help)?);
            }
            GeneratedPage::Footer => {
                tokens.insert("__GITHUB_REPO__", repo);
            }
            GeneratedPage::Sidebar => {
                tokens.insert("__GITHUB_RELEASE__", cfg.release.as_str());
                tokens.insert("__GITHUB_REPO__", repo);
                tokens.insert("___GITHUB_USER___", cfg.repo.owner.as_str());
                tokens.insert("__REPO_NAME__", cfg.repo.name.as_str());
                tokens.insert("__WORKFLOW__", url_escape(&cfg.workflow));
                tokens.insert("__BRANCH__", url_escape(&cfg.branch));
            }
        }
        Ok(tokens)
    }

    /// Fill one template.
    pub fn generate(&self, page: GeneratedPage) -> Result<Document> {
        let template = read(&self.config.page_path(&page.template_file()))?;
        let tokens = self.tokens(page)?;
        Ok(Document::new(page.output_file(), substitute(&template, &tokens)))
    }

    /// Publishable pages found in the pages directory, sorted by name.
    pub fn static_pages(&self) -> Result<Vec<String>> {
        let dir = &self.config.pages_dir;
        let entries = fs::read_dir(dir).map_err(|e| WikiError::io(dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| WikiError::io(dir, e))?;
            if !entry.path().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if is_published(&name) {
                names.push(name);
            } else {
                tracing::debug!("skipping {}", name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Generate and write every page. Returns the written paths in order.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for page in GeneratedPage::ALL {
            let doc = self.generate(page)?;
            written.push(self.write(&doc)?);
        }

        for name in self.static_pages()? {
            tracing::info!("Processing {}...", name);
            let source = self.config.page_path(&name);
            if NO_TOC.contains(&name.as_str()) {
                written.push(self.copy(&name, &source)?);
                continue;
            }
            let doc = Document::new(name, read(&source)?);
            written.push(self.write(&doc)?);
        }

        Ok(written)
    }

    /// Pages without a ToC are copied as raw bytes, so they need not be UTF-8.
    fn copy(&self, name: &str, source: &Path) -> Result<PathBuf> {
        let dest = self.config.output_path(name);
        tracing::info!("Writing {}...", dest.display());
        let bytes = fs::read(source).map_err(|e| WikiError::io(source, e))?;
        fs::write(&dest, bytes).map_err(|e| WikiError::io(&dest, e))?;
        Ok(dest)
    }

    fn write(&self, doc: &Document) -> Result<PathBuf> {
        let dest = self.config.output_path(&doc.name);
        tracing::info!("Writing {}...", dest.display());
        fs::write(&dest, doc.render()).map_err(|e| WikiError::io(&dest, e))?;
        Ok(dest)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| WikiError::io(path, e))
}
