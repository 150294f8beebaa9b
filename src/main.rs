//! update-wiki — regenerate the project wiki from a source clone.
//!
//! Clones the wiki repository into the output directory, copies media and
//! writes every page. Pushing the result is left to the calling workflow.
//!
//! `REZ_SOURCE_DIR=/path/to/rez update-wiki --github-repo owner/rez --out out`

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use update_wiki::cli_help::ProgramHelp;
use update_wiki::config::{self, RepoSlug, WikiConfig};
use update_wiki::git::{GitCli, VersionControl};
use update_wiki::{publish, WikiError};

#[derive(Parser)]
#[command(name = "update-wiki", about = "Update GitHub Wiki")]
struct Cli {
    /// GitHub release the wiki is generated from
    #[arg(long = "github-release", default_value = config::DEFAULT_RELEASE)]
    release: String,

    /// GitHub repository without leading github.com/
    #[arg(long = "github-repo", default_value = config::DEFAULT_REPO)]
    repo: String,

    /// Name of git branch that is generating the wiki
    #[arg(long = "github-branch", default_value = config::DEFAULT_BRANCH)]
    branch: String,

    /// Name of GitHub workflow that is generating the wiki
    #[arg(long = "github-workflow", default_value = config::DEFAULT_WORKFLOW)]
    workflow: String,

    /// Use this url to git clone wiki from [default: git@github.com:<repo>.wiki.git]
    #[arg(long = "wiki-url")]
    url: Option<String>,

    /// Output dir
    #[arg(long = "out", default_value = config::DEFAULT_OUT_DIR)]
    dir: PathBuf,

    /// Page templates directory [default: $REZ_SOURCE_DIR/wiki/pages]
    #[arg(long)]
    pages: Option<PathBuf>,

    /// Media directory copied into the wiki [default: $REZ_SOURCE_DIR/wiki/media]
    #[arg(long)]
    media: Option<PathBuf>,

    /// Program whose --help output documents the command-line tools
    #[arg(long, default_value = config::DEFAULT_CLI_PROGRAM)]
    cli_program: String,

    /// Subcommand to document (repeatable). Discovered from --help if omitted.
    #[arg(long = "cli-command")]
    cli_commands: Vec<String>,

    /// Root of the source clone being documented
    #[arg(long, env = config::SOURCE_DIR_ENV)]
    source_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<WikiConfig, WikiError> {
        let source_dir = self.source_dir.ok_or(WikiError::MissingSourceDir)?;
        let source_dir = config::absolute(&source_dir)?;
        let repo = RepoSlug::parse(&self.repo)?;

        let mut cfg = WikiConfig::new(source_dir);
        cfg.clone_url = self
            .url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| config::default_clone_url(&repo));
        cfg.repo = repo;
        cfg.release = self.release;
        cfg.branch = self.branch;
        cfg.workflow = self.workflow;
        cfg.out_dir = config::absolute(&self.dir)?;
        if let Some(pages) = self.pages {
            cfg.pages_dir = config::absolute(&pages)?;
        }
        if let Some(media) = self.media {
            cfg.media_dir = config::absolute(&media)?;
        }
        cfg.cli_program = self.cli_program;
        cfg.cli_commands = self.cli_commands;
        Ok(cfg)
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")
}

fn run(cli: Cli) -> Result<(), WikiError> {
    let git = GitCli::default();
    let version = git.version()?;
    tracing::debug!("{}", version);

    let cfg = cli.into_config()?;

    let help = ProgramHelp::new(cfg.cli_program.clone(), cfg.cli_commands.clone())
        .current_dir(&cfg.source_dir);

    let written = publish::update_wiki(&cfg, &git, &help)?;
    tracing::info!("Wrote {} pages to {}", written.len(), cfg.out_dir.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("update-wiki: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("update-wiki").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_original_workflow() {
        let cli = parse(&["--source-dir", "/src/rez"]);
        let cfg = cli.into_config().unwrap();
        assert_eq!(cfg.release, "unknown-release");
        assert_eq!(cfg.repo.to_string(), "unknown/rez");
        assert_eq!(cfg.branch, "master");
        assert_eq!(cfg.workflow, "Wiki");
        assert_eq!(cfg.clone_url, "git@github.com:unknown/rez.wiki.git");
        assert!(cfg.out_dir.is_absolute());
        assert!(cfg.out_dir.ends_with("out"));
    }

    #[test]
    fn clone_url_follows_repo() {
        let cli = parse(&["--source-dir", "/src", "--github-repo", "me/proj"]);
        let cfg = cli.into_config().unwrap();
        assert_eq!(cfg.clone_url, "git@github.com:me/proj.wiki.git");
    }

    #[test]
    fn explicit_wiki_url_wins() {
        let cli = parse(&["--source-dir", "/src", "--wiki-url", "/tmp/wiki.git"]);
        assert_eq!(cli.into_config().unwrap().clone_url, "/tmp/wiki.git");
    }

    #[test]
    fn repeated_cli_commands() {
        let cli = parse(&["--source-dir", "/src", "--cli-command", "env", "--cli-command", "build"]);
        assert_eq!(cli.into_config().unwrap().cli_commands, vec!["env", "build"]);
    }

    #[test]
    fn bad_repo_is_config_error() {
        let cli = parse(&["--source-dir", "/src", "--github-repo", "norepo"]);
        assert!(matches!(cli.into_config(), Err(WikiError::InvalidRepo(_))));
    }
}
