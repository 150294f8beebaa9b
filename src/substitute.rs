//! Literal token replacement for page templates.
//!
//! Tokens are plain substrings such as `__GITHUB_REPO__`; there is no
//! pattern syntax and no escaping.

/// Ordered placeholder → Markdown mapping for a single document.
///
/// Tokens are applied in insertion order. When one token is a substring of
/// another the result depends on that order: whichever is applied first
/// claims the overlapping text.
#[derive(Debug, Default, Clone)]
pub struct TokenMap {
    entries: Vec<(String, String)>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token, or replace the value of an existing one in place.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        let token = token.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TokenMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A run of output text: either untouched template text or an inserted value.
enum Segment<'a> {
    Template(&'a str),
    Inserted(&'a str),
}

/// Replace every occurrence of every token in `text`.
///
/// Inserted values are never scanned again, so a value containing another
/// token's placeholder is emitted verbatim.
pub fn substitute(text: &str, tokens: &TokenMap) -> String {
    let mut segments = vec![Segment::Template(text)];

    for (token, value) in tokens.iter() {
        if token.is_empty() {
            continue;
        }
        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Inserted(_) => next.push(segment),
                Segment::Template(chunk) => {
                    let mut parts = chunk.split(token);
                    if let Some(first) = parts.next() {
                        next.push(Segment::Template(first));
                    }
                    for part in parts {
                        next.push(Segment::Inserted(value));
                        next.push(Segment::Template(part));
                    }
                }
            }
        }
        segments = next;
    }

    let mut out = String::with_capacity(text.len());
    for segment in segments {
        match segment {
            Segment::Template(s) | Segment::Inserted(s) => out.push_str(s),
        }
    }
    out
}
