//! Find candidate archives under a path.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// List archives at `root`.
///
/// A file root is returned as-is, whatever its extension. For a directory,
/// files (or symlinks to files) whose extension is in `extensions` are
/// returned in file-name order: immediate children only, or the whole
/// subtree when `recursive` is set. Symlinked directories are not entered.
/// Extension matching is case-sensitive.
pub fn discover_archives(root: &Path, extensions: &[String], recursive: bool) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root).map_err(|e| Error::path(root, e))?;
    if !metadata.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::path(path, e.into())
        })?;
        if entry.path().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.strip_prefix('.').unwrap_or(wanted) == ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXTENSIONS;

    fn defaults() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.xlsx", "b.txt", "c.docx"] {
            touch(&dir.path().join(name));
        }
        let files = discover_archives(dir.path(), &defaults(), false).unwrap();
        assert_eq!(names(dir.path(), &files), vec!["a.xlsx", "c.docx"]);
    }

    #[test]
    fn recursion_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.pptx"));
        touch(&dir.path().join("nested/deeper/inner.docx"));
        std::fs::create_dir_all(dir.path().join("folder.docx")).unwrap();

        let flat = discover_archives(dir.path(), &defaults(), false).unwrap();
        assert_eq!(names(dir.path(), &flat), vec!["top.pptx"]);

        let deep = discover_archives(dir.path(), &defaults(), true).unwrap();
        assert_eq!(
            names(dir.path(), &deep),
            vec!["nested/deeper/inner.docx", "top.pptx"]
        );
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("LOUD.DOCX"));
        touch(&dir.path().join("quiet.docx"));
        let files = discover_archives(dir.path(), &defaults(), false).unwrap();
        assert_eq!(names(dir.path(), &files), vec!["quiet.docx"]);
    }

    #[test]
    fn custom_extensions_without_dot() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.docm"));
        touch(&dir.path().join("b.docx"));
        let files = discover_archives(dir.path(), &["docm".to_string()], false).unwrap();
        assert_eq!(names(dir.path(), &files), vec!["a.docm"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_documents_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real/a.docx");
        touch(&real);
        let scan = dir.path().join("scan");
        std::fs::create_dir_all(&scan).unwrap();
        std::os::unix::fs::symlink(&real, scan.join("link.docx")).unwrap();
        std::os::unix::fs::symlink(scan.join("missing.docx"), scan.join("dangling.docx")).unwrap();

        let files = discover_archives(&scan, &defaults(), false).unwrap();
        assert_eq!(names(&scan, &files), vec!["link.docx"]);
    }

    #[test]
    fn file_root_is_returned_directly() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.bin");
        touch(&file);
        assert_eq!(discover_archives(&file, &defaults(), false).unwrap(), vec![file]);
    }

    #[test]
    fn missing_root_is_path_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_archives(&dir.path().join("nope"), &defaults(), true).unwrap_err();
        assert!(matches!(err, Error::Path { .. }));
    }
}
