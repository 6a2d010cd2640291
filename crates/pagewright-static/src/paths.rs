//! Static path enumeration.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use serde::Serialize;
use walkdir::WalkDir;

use crate::resolve::DocFormat;

/// Paths to pre-render at build time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticPaths {
    /// URL paths relative to the docs route, e.g. `/scripting/SetTimer`
    pub paths: Vec<String>,

    /// Unknown paths are resolved on demand instead of failing
    pub fallback: bool,
}

/// Errors that can occur when enumerating documents.
#[derive(Debug, thiserror::Error)]
pub enum PathsError {
    #[error("Docs directory not found: {0}")]
    MissingRoot(String),
}

/// Enumerate every `.md` and `.mdx` document under `root`.
///
/// Paths come back sorted, and a document present in both formats is
/// listed once.
pub fn static_paths(root: &Path) -> Result<StaticPaths, PathsError> {
    if !root.is_dir() {
        return Err(PathsError::MissingRoot(root.display().to_string()));
    }

    let mut paths = BTreeSet::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(url) = url_path(root, entry.path()) {
            paths.insert(url);
        }
    }

    tracing::debug!("Found {} documents under {}", paths.len(), root.display());

    Ok(StaticPaths {
        paths: paths.into_iter().collect(),
        fallback: true,
    })
}

/// URL path of a document file: root prefix and extension stripped.
///
/// `docs/a/b.md` under `docs` becomes `/a/b`. Returns `None` for files that
/// are not documents or lie outside the root.
pub fn url_path(root: &Path, file: &Path) -> Option<String> {
    let ext = file.extension()?.to_str()?;
    DocFormat::from_extension(ext)?;

    let relative = file.strip_prefix(root).ok()?.with_extension("");

    let mut url = String::new();
    for component in relative.components() {
        let Component::Normal(part) = component else {
            return None;
        };
        url.push('/');
        url.push_str(part.to_str()?);
    }

    (!url.is_empty()).then_some(url)
}

/// Split a URL path into the segments used for resolution.
pub fn url_segments(url: &str) -> Vec<&str> {
    url.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn enumerates_md_and_mdx() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("a")).unwrap();
        fs::write(temp.path().join("a/b.md"), "").unwrap();
        fs::write(temp.path().join("c.mdx"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();

        let result = static_paths(temp.path()).unwrap();

        assert_eq!(result.paths, ["/a/b", "/c"]);
        assert!(result.fallback);
    }

    #[test]
    fn lists_dual_format_documents_once() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("x.md"), "").unwrap();
        fs::write(temp.path().join("x.mdx"), "").unwrap();

        let result = static_paths(temp.path()).unwrap();

        assert_eq!(result.paths, ["/x"]);
    }

    #[test]
    fn errors_on_missing_root() {
        let temp = tempdir().unwrap();

        let result = static_paths(&temp.path().join("missing"));

        assert!(matches!(result, Err(PathsError::MissingRoot(_))));
    }

    #[test]
    fn serializes_like_page_paths() {
        let paths = StaticPaths {
            paths: vec!["/c".to_string()],
            fallback: true,
        };

        assert_eq!(
            serde_json::to_string(&paths).unwrap(),
            r#"{"paths":["/c"],"fallback":true}"#
        );
    }

    #[test]
    fn strips_root_and_extension() {
        let root = Path::new("/srv/docs");

        assert_eq!(
            url_path(root, Path::new("/srv/docs/scripting/functions/SetTimer.md")),
            Some("/scripting/functions/SetTimer".to_string())
        );
        assert_eq!(url_path(root, Path::new("/srv/docs/readme.txt")), None);
        assert_eq!(url_path(root, Path::new("/elsewhere/a.md")), None);
    }

    #[test]
    fn splits_segments() {
        assert_eq!(url_segments("/a/b/"), ["a", "b"]);
        assert!(url_segments("/").is_empty());
    }
}
