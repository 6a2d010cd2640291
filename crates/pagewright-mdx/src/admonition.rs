//! Admonition containers.
//!
//! `:::kind Optional title` opens a callout and a bare `:::` closes it.
//! Containers are rewritten into HTML blocks before the markdown parser
//! runs, with blank lines around them so their content is still parsed as
//! markdown.

use std::borrow::Cow;

/// Recognised admonition kinds.
pub const ADMONITION_KINDS: &[&str] = &[
    "note",
    "tip",
    "info",
    "caution",
    "warning",
    "important",
    "danger",
    "success",
    "secondary",
];

/// Rewrite admonition containers in `source` into HTML.
///
/// Lines inside fenced code blocks are left alone. Unknown kinds and
/// unmatched closing markers pass through unchanged; containers still open
/// at the end of the input are closed.
pub fn expand_admonitions(source: &str) -> Cow<'_, str> {
    if !source.contains(":::") {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut fence: Option<Fence> = None;
    let mut depth = 0usize;
    let mut changed = false;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim();

        if let Some(open) = &fence {
            if open.closes(trimmed) {
                fence = None;
            }
            out.push_str(line);
            continue;
        }

        if let Some(open) = Fence::opening(trimmed) {
            fence = Some(open);
            out.push_str(line);
            continue;
        }

        match parse_marker(trimmed) {
            Some(Marker::Open { kind, title }) => {
                out.push_str(&open_html(kind, title));
                depth += 1;
                changed = true;
            }
            Some(Marker::Close) if depth > 0 => {
                out.push_str(CLOSE_HTML);
                depth -= 1;
                changed = true;
            }
            _ => out.push_str(line),
        }
    }

    if depth > 0 {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        for _ in 0..depth {
            out.push_str(CLOSE_HTML);
        }
        changed = true;
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(source)
    }
}

const CLOSE_HTML: &str = "\n</div></div>\n\n";

fn open_html(kind: &str, title: Option<&str>) -> String {
    let title = match title {
        Some(title) => escape(title),
        None => kind.to_uppercase(),
    };
    format!(
        "\n<div class=\"admonition admonition-{kind}\"><div class=\"admonition-heading\"><h5>{title}</h5></div><div class=\"admonition-content\">\n\n"
    )
}

enum Marker<'s> {
    Open { kind: &'s str, title: Option<&'s str> },
    Close,
}

fn parse_marker(line: &str) -> Option<Marker<'_>> {
    let rest = line.strip_prefix(":::")?;
    if rest.is_empty() {
        return Some(Marker::Close);
    }

    let (kind, title) = match rest.split_once(char::is_whitespace) {
        Some((kind, title)) => (kind, title.trim()),
        None => (rest, ""),
    };

    let kind = ADMONITION_KINDS.iter().copied().find(|k| *k == kind)?;
    let title = (!title.is_empty()).then_some(title);

    Some(Marker::Open { kind, title })
}

/// An open fenced code block.
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn opening(line: &str) -> Option<Self> {
        let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = line.chars().take_while(|c| *c == marker).count();
        (len >= 3).then_some(Self { marker, len })
    }

    fn closes(&self, line: &str) -> bool {
        let len = line.chars().take_while(|c| *c == self.marker).count();
        len >= self.len && line[len * self.marker.len_utf8()..].trim().is_empty()
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
