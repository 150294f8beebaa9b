//! Command-line tool reference built from a program's `--help` output.
//!
//! The help text is treated as opaque: each command gets a heading and a
//! fenced block with its help verbatim. The top-level command also gets a
//! table linking to every subcommand section.

use crate::error::Result;
use crate::git::run;
use crate::toc;
use regex::Regex;
use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

/// First `{a,b,c}` choice group in a usage line.
static RE_CHOICES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_.-]+(?:,[A-Za-z0-9_.-]+)*)\}").unwrap());

/// Help text for one command, e.g. `rez` or `rez build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHelp {
    pub name: String,
    pub text: String,
}

/// Source of raw help text, top-level command first.
pub trait HelpSource {
    fn command_help(&self) -> Result<Vec<CommandHelp>>;
}

/// Runs a program with `--help` to collect its help text.
#[derive(Debug, Clone)]
pub struct ProgramHelp {
    program: String,
    subcommands: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProgramHelp {
    /// With no explicit subcommands they are discovered from the top-level
    /// usage line.
    pub fn new(program: impl Into<String>, subcommands: Vec<String>) -> Self {
        Self {
            program: program.into(),
            subcommands,
            cwd: None,
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    fn help_for(&self, subcommand: Option<&str>) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        if let Some(sub) = subcommand {
            cmd.arg(sub);
        }
        cmd.arg("--help");
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        let shown = match subcommand {
            Some(sub) => format!("{} {} --help", self.program, sub),
            None => format!("{} --help", self.program),
        };
        let output = run(cmd, shown)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl HelpSource for ProgramHelp {
    fn command_help(&self) -> Result<Vec<CommandHelp>> {
        let main = self.help_for(None)?;
        let subcommands = if self.subcommands.is_empty() {
            discover_subcommands(&main)
        } else {
            self.subcommands.clone()
        };
        tracing::debug!("{} subcommands: {:?}", self.program, subcommands);

        let mut helps = vec![CommandHelp {
            name: self.program.clone(),
            text: main,
        }];
        for sub in &subcommands {
            helps.push(CommandHelp {
                name: format!("{} {}", self.program, sub),
                text: self.help_for(Some(sub))?,
            });
        }
        Ok(helps)
    }
}

/// Subcommand names from the first `{a,b,c}` group of a help text.
pub fn discover_subcommands(help: &str) -> Vec<String> {
    RE_CHOICES
        .captures(help)
        .map(|caps| caps[1].split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

/// One-line description of `sub` from the subcommand list that follows the
/// `COMMAND` heading of the top-level help. The list ends at a blank line.
fn describe(main_help: &str, sub: &str) -> String {
    main_help
        .lines()
        .skip_while(|line| line.trim() != "COMMAND")
        .skip(1)
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim_start)
        .find_map(|line| {
            let rest = line.strip_prefix(sub)?;
            if rest.starts_with(char::is_whitespace) {
                Some(rest.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_default()
}

fn render_command(help: &CommandHelp) -> String {
    format!("# {}\n```\n{}\n```", help.name, help.text.trim_end())
}

/// Render all commands, separated by two blank lines.
pub fn render_markdown(helps: &[CommandHelp]) -> String {
    let Some((main, subs)) = helps.split_first() else {
        return String::new();
    };

    let mut sections = Vec::with_capacity(helps.len());
    let mut first = render_command(main);
    if !subs.is_empty() {
        first.push_str("\n\n`COMMAND` | Description\n----|----");
        for sub in subs {
            let short = sub
                .name
                .strip_prefix(main.name.as_str())
                .map(str::trim)
                .unwrap_or(&sub.name);
            let words: Vec<&str> = sub.name.split_whitespace().collect();
            first.push_str(&format!(
                "\n[{}](#{}) | {}",
                short,
                toc::anchor(&words),
                describe(&main.text, short)
            ));
        }
    }
    sections.push(first);
    sections.extend(subs.iter().map(render_command));
    sections.join("\n\n\n")
}

pub fn cli_markdown(source: &dyn HelpSource) -> Result<String> {
    Ok(render_markdown(&source.command_help()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_HELP: &str = "\
usage: rez [-h] [-i] {build,env,release} ...

rez command-line tool

positional arguments:
  COMMAND
    build       Build a package from source.
    env         Open a rez-configured shell.
    release     Build a package and release it.
";

    #[test]
    fn discovers_choice_group() {
        assert_eq!(discover_subcommands(MAIN_HELP), vec!["build", "env", "release"]);
        assert!(discover_subcommands("usage: tool [-h]").is_empty());
    }

    #[test]
    fn describes_listed_subcommand() {
        assert_eq!(describe(MAIN_HELP, "env"), "Open a rez-configured shell.");
        assert_eq!(describe(MAIN_HELP, "missing"), "");
    }

    #[test]
    fn description_comes_from_command_list_only() {
        let help = "\
usage: rez [-h] {build,env} ...

build packages and environments
env vars are read from the config

positional arguments:
  COMMAND
    build       Build a package from source.

env         not part of the list
";
        assert_eq!(describe(help, "build"), "Build a package from source.");
        assert_eq!(describe(help, "env"), "");
    }

    #[test]
    fn no_command_heading_means_no_description() {
        assert_eq!(describe("usage: x\nbuild  Build things.\n", "build"), "");
    }

    #[test]
    fn renders_heading_code_block_and_links() {
        let helps = vec![
            CommandHelp { name: "rez".into(), text: MAIN_HELP.into() },
            CommandHelp { name: "rez env".into(), text: "usage: rez env [-h]\n\n".into() },
        ];
        let md = render_markdown(&helps);
        assert!(md.starts_with("# rez\n```\nusage: rez [-h]"));
        assert!(md.contains("`COMMAND` | Description\n----|----\n[env](#rez-env) | Open a rez-configured shell."));
        assert!(md.ends_with("\n\n\n# rez env\n```\nusage: rez env [-h]\n```"));
    }

    #[test]
    fn single_command_has_no_table() {
        let helps = vec![CommandHelp { name: "tool".into(), text: "usage: tool\n".into() }];
        assert_eq!(render_markdown(&helps), "# tool\n```\nusage: tool\n```");
    }

    #[test]
    fn empty_source_renders_nothing() {
        assert_eq!(render_markdown(&[]), "");
    }

    struct Fixed(Vec<CommandHelp>);

    impl HelpSource for Fixed {
        fn command_help(&self) -> Result<Vec<CommandHelp>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn cli_markdown_uses_source() {
        let src = Fixed(vec![CommandHelp { name: "x".into(), text: "help".into() }]);
        assert_eq!(cli_markdown(&src).unwrap(), "# x\n```\nhelp\n```");
    }
}
