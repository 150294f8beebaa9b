//! Contributor list built from `git shortlog -sn` output.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Marker appended to each name so the wiki renders one name per line.
pub const LINE_BREAK: &str = "<br>";

/// Historical names, emails and typos mapped to a display name.
/// Keys must be lower-case.
pub static ALIASES: &[(&str, &str)] = &[
    ("allan.johns", "Allan Johns"),
    ("allan johns", "Allan Johns"),
    ("ajohns", "Allan Johns"),
    ("nerdvegas", "Allan Johns"),
    ("nerdvegas@gmail.com", "Allan Johns"),
    ("method", "Allan Johns"),
    ("rachel johns", "Allan Johns"),
    ("root", "Allan Johns"),
    ("(no author)", "Allan Johns"),
    ("mylene pepe", "Mylene Pepe"),
    ("michael.morehouse", "Michael Morehouse"),
    ("phunter.nz", "Philip Hunter"),
    ("joe yu", "Joseph Yu"),
    ("j0yu", "Joseph Yu"),
    ("fpiparo", "Fabio Piparo"),
];

static RE_SHORTLOG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s+(.+?)\s*$").unwrap());

/// Aggregated commit count for one display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub name: String,
    pub commits: u64,
}

/// Resolve an author through the alias table.
pub fn display_name<'a>(author: &'a str) -> &'a str {
    let key = author.to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, name)| *name)
        .unwrap_or(author)
}

/// Parse shortlog lines into contributors ranked by commit count.
///
/// Lines that don't look like `<count> <author>` are skipped. Ties keep the
/// order in which names were first seen.
pub fn aggregate(shortlog: &str) -> Vec<Contributor> {
    let mut ranked: Vec<Contributor> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for line in shortlog.lines() {
        let Some(caps) = RE_SHORTLOG.captures(line) else {
            continue;
        };
        let Ok(commits) = caps[1].parse::<u64>() else {
            continue;
        };
        let name = format!("{}{}", display_name(&caps[2]), LINE_BREAK);

        match index.get(&name) {
            Some(&i) => ranked[i].commits += commits,
            None => {
                index.insert(name.clone(), ranked.len());
                ranked.push(Contributor { name, commits });
            }
        }
    }

    // sort_by is stable
    ranked.sort_by(|a, b| b.commits.cmp(&a.commits));
    ranked
}

/// One display name per line, most commits first.
pub fn render_markdown(contributors: &[Contributor]) -> String {
    contributors
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn contributors_markdown(shortlog: &str) -> String {
    render_markdown(&aggregate(shortlog))
}
