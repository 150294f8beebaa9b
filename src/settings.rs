//! Configuration reference extracted from a commented settings source file.
//!
//! The region between the `__DOC_START__` and `__DOC_END__` marker lines is
//! scanned for top-level assignments. Each assignment becomes a record made
//! of its code (indented into a Markdown code block) and the comment block
//! directly above it.

use crate::error::{Result, WikiError};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const DOC_START: &str = "__DOC_START__";
pub const DOC_END: &str = "__DOC_END__";

static RE_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9_]+) =").unwrap());

/// One documented setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub name: String,
    /// Definition lines, each indented by four spaces.
    pub code: String,
    pub description: String,
}

/// A definition still collecting code lines.
struct Pending {
    name: String,
    description: Vec<String>,
    code: Vec<String>,
}

/// Scanner state. Every transition consumes exactly one line, so the scan
/// cannot run past either end of the region.
enum ScanState {
    Idle,
    Comment(Vec<String>),
    /// Open definitions, oldest first. Each keeps taking lines until a blank
    /// or comment line closes them all.
    Definition(Vec<Pending>),
}

/// Lines strictly between the first start marker and the next end marker.
fn doc_region<'a>(lines: &[&'a str], origin: &str) -> Result<Vec<&'a str>> {
    let start = lines
        .iter()
        .position(|l| l.contains(DOC_START))
        .ok_or_else(|| WikiError::MissingDelimiter {
            marker: DOC_START,
            path: origin.to_string(),
        })?;
    let end = lines[start + 1..]
        .iter()
        .position(|l| l.contains(DOC_END))
        .map(|offset| start + 1 + offset)
        .ok_or_else(|| WikiError::MissingDelimiter {
            marker: DOC_END,
            path: origin.to_string(),
        })?;
    Ok(lines[start + 1..end].to_vec())
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

/// Strip the comment marker and one following space.
fn comment_text(line: &str) -> String {
    let rest = line.strip_prefix('#').unwrap_or(line);
    rest.strip_prefix(' ').unwrap_or(rest).to_string()
}

fn finish(settings: &mut BTreeMap<String, Setting>, state: ScanState) {
    let ScanState::Definition(open) = state else {
        return;
    };
    for pending in open {
        let code = pending
            .code
            .iter()
            .map(|l| format!("    {}", l))
            .collect::<Vec<_>>()
            .join("\n");
        settings.insert(
            pending.name.clone(),
            Setting {
                name: pending.name,
                code,
                description: pending.description.join("\n"),
            },
        );
    }
}

/// Extract settings from `source`, sorted by name. Later definitions of the
/// same name replace earlier ones.
///
/// `origin` names the source in error messages.
pub fn extract(source: &str, origin: &str) -> Result<Vec<Setting>> {
    let lines: Vec<&str> = source.lines().collect();
    let region = doc_region(&lines, origin)?;

    let mut settings = BTreeMap::new();
    let mut state = ScanState::Idle;

    for line in region {
        let assignment = RE_ASSIGN.captures(line).map(|caps| caps[1].to_string());

        state = match (state, assignment) {
            (ScanState::Comment(block), Some(name)) => ScanState::Definition(vec![Pending {
                name,
                description: block,
                code: vec![line.to_string()],
            }]),
            // An assignment inside a definition is part of its code and
            // also opens a record of its own.
            (ScanState::Definition(mut open), Some(name)) => {
                for pending in &mut open {
                    pending.code.push(line.to_string());
                }
                open.push(Pending {
                    name,
                    description: Vec::new(),
                    code: vec![line.to_string()],
                });
                ScanState::Definition(open)
            }
            (ScanState::Idle, Some(name)) => ScanState::Definition(vec![Pending {
                name,
                description: Vec::new(),
                code: vec![line.to_string()],
            }]),
            (ScanState::Comment(mut block), None) if is_comment(line) => {
                block.push(comment_text(line));
                ScanState::Comment(block)
            }
            (prev, None) if is_comment(line) => {
                finish(&mut settings, prev);
                ScanState::Comment(vec![comment_text(line)])
            }
            (prev, None) if line.trim().is_empty() => {
                finish(&mut settings, prev);
                ScanState::Idle
            }
            (ScanState::Definition(mut open), None) => {
                for pending in &mut open {
                    pending.code.push(line.to_string());
                }
                ScanState::Definition(open)
            }
            // Code that belongs to no documented assignment.
            (_, None) => ScanState::Idle,
        };
    }
    finish(&mut settings, state);

    Ok(settings.into_values().collect())
}

/// Render settings as `###` sections: name, code block, description.
pub fn render_markdown(settings: &[Setting]) -> String {
    settings
        .iter()
        .map(|s| format!("### {}\n\n{}\n\n{}\n", s.name, s.code, s.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract and render in one step.
pub fn settings_markdown(source: &str, origin: &str) -> Result<String> {
    Ok(render_markdown(&extract(source, origin)?))
}
