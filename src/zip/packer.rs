//! Repackage an extracted directory tree into a zip archive.

use std::fs::File;
use std::io::Cursor;
use std::path::{Component, Path};

use time::OffsetDateTime;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Error, Result};

/// Pack every regular file under `root` into an in-memory zip archive.
///
/// Entry names are root-relative with `/` separators. Directories are not
/// stored; symlinks are skipped. Siblings are visited in file-name order and
/// each entry carries its file's modification time and permissions, so an
/// unchanged tree always produces the same archive.
pub fn pack_dir(root: &Path) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut count = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::format(format!("{} is outside {}", entry.path().display(), root.display())))?;
        let name = entry_name(relative)?;

        zip.start_file(name.as_str(), file_options(&entry)?)
            .map_err(|e| zip_error(entry.path(), e))?;
        let mut file = File::open(entry.path()).map_err(|e| Error::io(entry.path(), e))?;
        std::io::copy(&mut file, &mut zip).map_err(|e| Error::io(entry.path(), e))?;
        count += 1;
    }

    let archive = zip.finish().map_err(|e| zip_error(root, e))?.into_inner();
    debug!(root = %root.display(), entries = count, bytes = archive.len(), "packed directory");
    Ok(archive)
}

fn file_options(entry: &DirEntry) -> Result<SimpleFileOptions> {
    let metadata = entry.metadata().map_err(|e| Error::io(entry.path(), e.into()))?;

    // Times outside the DOS range (before 1980) fall back to 1980-01-01.
    let modified = metadata
        .modified()
        .ok()
        .and_then(|t| DateTime::try_from(OffsetDateTime::from(t)).ok())
        .unwrap_or_default();

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(modified)
        .large_file(metadata.len() >= u64::from(u32::MAX));

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    };

    Ok(options)
}

fn entry_name(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                Error::format(format!("file name is not valid UTF-8: {}", relative.display()))
            })?),
            Component::CurDir => {}
            _ => {
                return Err(Error::format(format!(
                    "unexpected path component in {}",
                    relative.display()
                )));
            }
        }
    }
    Ok(parts.join("/"))
}

fn zip_error(path: &Path, err: ZipError) -> Error {
    match err {
        ZipError::Io(e) => Error::io(path, e),
        other => Error::format(format!("{}: {other}", path.display())),
    }
}
