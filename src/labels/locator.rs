use std::path::{Path, PathBuf};

use tracing::debug;

/// Location of the label metadata document inside an Office package.
pub const LABEL_INFO_PATH: &str = "docMetadata/LabelInfo.xml";

/// Check an extracted package for the label document.
///
/// The path is returned whether or not the file exists, so a set can
/// create it there. Matching is case-sensitive.
pub fn locate_label_info(root: &Path) -> (bool, PathBuf) {
    let path = LABEL_INFO_PATH
        .split('/')
        .fold(root.to_path_buf(), |path, part| path.join(part));
    let exists = path.is_file();
    debug!(path = %path.display(), exists, "checked label document");
    (exists, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_document_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let (exists, path) = locate_label_info(dir.path());
        assert!(!exists);
        assert_eq!(path, dir.path().join("docMetadata").join("LabelInfo.xml"));
    }

    #[test]
    fn finds_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docMetadata")).unwrap();
        std::fs::write(dir.path().join("docMetadata/LabelInfo.xml"), b"<x/>").unwrap();
        assert!(locate_label_info(dir.path()).0);
    }

    #[test]
    fn directory_at_document_path_is_not_a_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docMetadata/LabelInfo.xml")).unwrap();
        assert!(!locate_label_info(dir.path()).0);
    }
}
