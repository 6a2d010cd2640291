//! Document resolution under the docs root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Mdx,
    Markdown,
}

impl DocFormat {
    /// Lookup order: `.mdx` wins over `.md`.
    pub const LOOKUP_ORDER: [DocFormat; 2] = [DocFormat::Mdx, DocFormat::Markdown];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mdx => "mdx",
            Self::Markdown => "md",
        }
    }

    /// Format for a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "mdx" => Some(Self::Mdx),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// A document read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Full path of the file that was read
    pub path: PathBuf,

    /// Source format
    pub format: DocFormat,

    /// Raw file contents
    pub source: String,
}

/// A document file that exists but could not be read.
#[derive(Debug, thiserror::Error)]
#[error("Failed to read {}: {source}", .path.display())]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// The fixed directory documents are resolved under.
#[derive(Debug, Clone)]
pub struct DocsRoot {
    root: PathBuf,
}

impl DocsRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Candidate file for `segments` in the given format.
    ///
    /// Returns `None` for segment lists that would escape the root or name
    /// nothing: empty lists, empty segments, `.`/`..`, or segments holding
    /// a path separator.
    pub fn candidate<S: AsRef<str>>(&self, segments: &[S], format: DocFormat) -> Option<PathBuf> {
        let (last, dirs) = segments.split_last()?;
        if !segments.iter().all(|s| is_valid_segment(s.as_ref())) {
            return None;
        }

        let mut path = self.root.clone();
        for dir in dirs {
            path.push(dir.as_ref());
        }
        path.push(format!("{}.{}", last.as_ref(), format.extension()));
        Some(path)
    }

    /// Resolve `segments` to a document: `.mdx` first, then `.md`.
    ///
    /// `Ok(None)` means neither file exists.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Result<Option<Document>, ReadError> {
        for format in DocFormat::LOOKUP_ORDER {
            let Some(path) = self.candidate(segments, format) else {
                return Ok(None);
            };

            if path.is_file() {
                let source = match fs::read_to_string(&path) {
                    Ok(source) => source,
                    Err(source) => return Err(ReadError { path, source }),
                };
                tracing::debug!("Resolved {} to {}", segments_display(segments), path.display());
                return Ok(Some(Document {
                    path,
                    format,
                    source,
                }));
            }
        }

        Ok(None)
    }
}

/// Whether `segment` names a single entry inside its parent directory.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}

fn segments_display<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}
