//! GitHub-style table of contents generated from a page's own headings.

/// A heading found in a page, with depth relative to the page's first heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub depth: usize,
    pub title: String,
    pub anchor: String,
}

/// Parse an ATX heading line into its marker count and title words.
///
/// The first word must consist only of `#`, so `#define` or `#!/bin/sh`
/// are not headings. Headings without a title are rejected.
fn parse_heading(line: &str) -> Option<(usize, Vec<&str>)> {
    if !line.starts_with('#') {
        return None;
    }
    let mut words = line.split_whitespace();
    let marker = words.next()?;
    if !marker.chars().all(|c| c == '#') {
        return None;
    }
    let title: Vec<&str> = words.collect();
    if title.is_empty() {
        return None;
    }
    Some((marker.len(), title))
}

/// Anchor for a heading: lower-cased words joined with hyphens.
///
/// Duplicate titles produce duplicate anchors.
pub fn anchor(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Collect all headings in document order.
///
/// Depths count from the first heading. A later heading shallower than the
/// first clamps to depth 0.
pub fn headings(text: &str) -> Vec<Heading> {
    let raw: Vec<(usize, Vec<&str>)> = text.lines().filter_map(parse_heading).collect();
    let baseline = raw.first().map(|(depth, _)| *depth).unwrap_or(0);

    raw.into_iter()
        .map(|(depth, words)| Heading {
            depth: depth.saturating_sub(baseline),
            title: words.join(" "),
            anchor: anchor(&words),
        })
        .collect()
}

/// Render one ToC list item.
pub fn render_toc_item(heading: &Heading) -> String {
    format!(
        "{}- [{}](#{})",
        " ".repeat(4 * heading.depth),
        heading.title,
        heading.anchor
    )
}

/// Prepend a ToC to `text`. Text without headings is returned unchanged.
pub fn add_toc(text: &str) -> String {
    let entries = headings(text);
    if entries.is_empty() {
        return text.to_string();
    }

    let toc: Vec<String> = entries.iter().map(render_toc_item).collect();
    format!("{}\n\n{}", toc.join("\n"), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_indentation() {
        let text = "# One\ntext\n## Two\n## Three\n### Four\n";
        let depths: Vec<usize> = headings(text).iter().map(|h| h.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2]);

        let out = add_toc(text);
        let expected = "- [One](#one)\n    - [Two](#two)\n    - [Three](#three)\n        - [Four](#four)\n\n";
        assert_eq!(out, format!("{}{}", expected, text));
    }

    #[test]
    fn no_headings_is_unchanged() {
        let text = "just text\n\n  more # not a heading\n";
        assert_eq!(add_toc(text), text);
    }

    #[test]
    fn baseline_is_first_heading() {
        let text = "## Sub first\n# Top\n### Deeper\n";
        let depths: Vec<usize> = headings(text).iter().map(|h| h.depth).collect();
        assert_eq!(depths, vec![0, 0, 1]);
        assert_eq!(
            add_toc(text),
            "- [Sub first](#sub-first)\n- [Top](#top)\n    - [Deeper](#deeper)\n\n## Sub first\n# Top\n### Deeper\n"
        );
    }

    #[test]
    fn anchor_lowercases_and_hyphenates() {
        let h = &headings("### Package   Search Path")[0];
        assert_eq!(h.title, "Package Search Path");
        assert_eq!(h.anchor, "package-search-path");
        assert_eq!(render_toc_item(h), "- [Package Search Path](#package-search-path)");
    }

    #[test]
    fn ignores_non_heading_hashes() {
        let text = "#define FOO\n#!/bin/bash\n#- x\n #indented\n#\n# Real\n";
        let found = headings(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Real");
    }

    #[test]
    fn duplicate_anchors_are_kept() {
        let found = headings("# Usage\n# Usage\n");
        assert_eq!(found[0].anchor, found[1].anchor);
    }
}
