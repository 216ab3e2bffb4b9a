//! Write new labels into an extracted package and replace the archive.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{debug, info};

use super::locator::LABEL_INFO_PATH;
use super::{LabelSet, codec};
use crate::error::{Error, Result};
use crate::io::MemoryReader;
use crate::zip::{ZipExtractor, pack_dir};

/// Replace the labels of the archive extracted at `work_dir`.
///
/// The label document at `label_info` is overwritten (or created), the
/// whole of `work_dir` is packed into memory and read back, and only then
/// is `archive` replaced through a temporary sibling file and a rename. Any
/// failure before that rename leaves `archive` untouched.
///
/// With `dry_run` nothing on disk is touched.
pub async fn set_labels(
    work_dir: &Path,
    archive: &Path,
    label_info: &Path,
    labels: &LabelSet,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        info!(archive = %archive.display(), "dry run, archive left unchanged");
        return Ok(());
    }

    let xml = codec::encode(labels);
    if let Some(parent) = label_info.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }
    fs::write(label_info, xml.as_bytes())
        .await
        .map_err(|e| Error::io(label_info, e))?;
    debug!(path = %label_info.display(), labels = labels.len(), "wrote label document");

    let packed: Arc<[u8]> = pack_dir(work_dir)?.into();
    verify_packed(Arc::clone(&packed), xml.as_bytes()).await?;
    replace_file(archive, &packed)?;
    info!(archive = %archive.display(), bytes = packed.len(), "replaced archive");
    Ok(())
}

/// Check that `packed` opens as an archive and carries the label document
/// exactly as written.
async fn verify_packed(packed: Arc<[u8]>, label_xml: &[u8]) -> Result<()> {
    let extractor = ZipExtractor::new(Arc::new(MemoryReader::new(packed)));
    let entries = extractor.list_files().await?;
    let entry = entries
        .iter()
        .find(|e| e.file_name == LABEL_INFO_PATH)
        .ok_or_else(|| Error::format(format!("repacked archive has no {LABEL_INFO_PATH}")))?;
    if extractor.extract_to_memory(entry).await? != label_xml {
        return Err(Error::format(format!(
            "repacked archive has a different {LABEL_INFO_PATH}"
        )));
    }
    debug!(entries = entries.len(), "verified repacked archive");
    Ok(())
}

/// Atomically replace `dest` with `data`, keeping its permissions.
fn replace_file(dest: &Path, data: &[u8]) -> Result<()> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = std::fs::metadata(dest)
        .map_err(|e| Error::io(dest, e))?
        .permissions();

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(data)
        .and_then(|_| tmp.as_file().sync_all())
        .and_then(|_| tmp.as_file().set_permissions(permissions))
        .map_err(|e| Error::io(tmp.path(), e))?;

    tmp.persist(dest).map_err(|e| Error::io(dest, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Label;

    #[tokio::test]
    async fn dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let work = dir.path().join("work");
        let archive = dir.path().join("a.docx");
        std::fs::write(&archive, b"original").unwrap();
        let label_info = work.join("docMetadata/LabelInfo.xml");

        let labels = LabelSet::single(Label::privileged("a", "b"));
        set_labels(&work, &archive, &label_info, &labels, true)
            .await
            .unwrap();

        assert!(!work.exists());
        assert_eq!(std::fs::read(&archive).unwrap(), b"original");
    }

    #[tokio::test]
    async fn failed_pack_keeps_original_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("a.docx");
        std::fs::write(&archive, b"original").unwrap();
        // A work dir that is a regular file cannot hold the label document.
        let work = dir.path().join("work");
        std::fs::write(&work, b"").unwrap();
        let label_info = work.join("docMetadata/LabelInfo.xml");

        let labels = LabelSet::single(Label::privileged("a", "b"));
        let err = set_labels(&work, &archive, &label_info, &labels, false)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(std::fs::read(&archive).unwrap(), b"original");
    }

    #[tokio::test]
    async fn repacked_archive_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let work = dir.path().join("work");
        let xml = codec::encode(&LabelSet::single(Label::privileged("a", "b")));
        std::fs::create_dir_all(work.join("docMetadata")).unwrap();
        std::fs::create_dir_all(work.join("word")).unwrap();
        std::fs::write(work.join(LABEL_INFO_PATH), &xml).unwrap();
        std::fs::write(work.join("word/document.xml"), b"<w:document/>").unwrap();

        let packed: Arc<[u8]> = pack_dir(&work).unwrap().into();
        verify_packed(Arc::clone(&packed), xml.as_bytes()).await.unwrap();

        let err = verify_packed(Arc::clone(&packed), b"<other/>").await.unwrap_err();
        assert!(matches!(err, Error::ArchiveFormat(_)), "{err}");

        std::fs::remove_file(work.join(LABEL_INFO_PATH)).unwrap();
        let without: Arc<[u8]> = pack_dir(&work).unwrap().into();
        let err = verify_packed(without, xml.as_bytes()).await.unwrap_err();
        assert!(matches!(err, Error::ArchiveFormat(_)), "{err}");

        let err = verify_packed(Arc::from(&b"not an archive"[..]), xml.as_bytes())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ArchiveFormat(_)), "{err}");
    }

    #[test]
    fn replace_file_swaps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.xlsx");
        std::fs::write(&dest, b"old").unwrap();
        replace_file(&dest, b"new contents").unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new contents");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
