use flate2::read::DeflateDecoder;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::io::{LocalFileReader, ReadAt};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Upper bound on the buffer reserved up front for one inflated entry.
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all files in the archive
    pub async fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.list_files().await
    }

    /// Extract file data to memory, verifying size and CRC-32
    pub async fn extract_to_memory(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        if entry.is_encrypted() {
            return Err(Error::format(format!(
                "encrypted entries are not supported: {}",
                entry.file_name
            )));
        }

        let data_offset = self.parser.get_data_offset(entry).await?;
        let in_bounds = data_offset
            .checked_add(entry.compressed_size)
            .is_some_and(|end| end <= self.parser.reader().size());
        if !in_bounds {
            return Err(Error::format(format!(
                "entry data extends past end of file: {}",
                entry.file_name
            )));
        }

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_exact_at(data_offset, &mut raw).await?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                let mut out = Vec::with_capacity(entry.uncompressed_size.min(MAX_PREALLOC) as usize);
                DeflateDecoder::new(raw.as_slice())
                    .take(entry.uncompressed_size)
                    .read_to_end(&mut out)
                    .map_err(|e| Error::format(format!("{}: {e}", entry.file_name)))?;
                out
            }
            CompressionMethod::Unknown(method) => {
                return Err(Error::format(format!(
                    "unsupported compression method {method} for {}",
                    entry.file_name
                )));
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            return Err(Error::format(format!(
                "size mismatch for {}: expected {} bytes, got {}",
                entry.file_name,
                entry.uncompressed_size,
                data.len()
            )));
        }

        let mut crc = flate2::Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(Error::format(format!("CRC mismatch for {}", entry.file_name)));
        }

        Ok(data)
    }

    /// Extract file to disk
    pub async fn extract_to_file(&self, entry: &ZipFileEntry, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Error::io(parent, e))?;
            }
        }

        let data = self.extract_to_memory(entry).await?;

        fs::write(output_path, &data)
            .await
            .map_err(|e| Error::io(output_path, e))
    }

    /// Extract every entry below `dest`, preserving relative paths.
    ///
    /// Every entry name is checked before anything is written: a single
    /// name that escapes `dest` rejects the whole archive. Returns the
    /// number of entries written.
    pub async fn extract_all(&self, dest: &Path) -> Result<usize> {
        let entries = self.list_files().await?;

        let targets = entries
            .iter()
            .map(|entry| {
                enclosed_path(dest, &entry.file_name)
                    .map(|path| (entry, path))
                    .ok_or_else(|| Error::ArchiveTraversal(entry.file_name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        fs::create_dir_all(dest)
            .await
            .map_err(|e| Error::io(dest, e))?;

        for (entry, path) in &targets {
            trace!(entry = %entry.file_name, "extracting");
            if entry.is_directory {
                fs::create_dir_all(path)
                    .await
                    .map_err(|e| Error::io(path, e))?;
            } else {
                self.extract_to_file(entry, path).await?;
            }
        }

        Ok(targets.len())
    }
}

/// Unpack the archive at `src` into `dest`, creating `dest` if needed.
pub async fn extract_archive(src: &Path, dest: &Path) -> Result<usize> {
    let reader = Arc::new(LocalFileReader::new(src)?);
    let count = ZipExtractor::new(reader).extract_all(dest).await?;
    debug!(archive = %src.display(), dest = %dest.display(), entries = count, "extracted archive");
    Ok(count)
}

/// Resolve an entry name below `dest`, cleaning it lexically.
///
/// Both `/` and `\` separate components. `.` is dropped and `..` removes
/// the previous component. Returns `None` for absolute names, names climbing
/// above `dest`, names that clean down to `dest` itself and names holding a
/// NUL. On Windows a `:` is also refused, since it would name a drive or an
/// alternate data stream there.
pub fn enclosed_path(dest: &Path, name: &str) -> Option<PathBuf> {
    if name.starts_with(['/', '\\']) {
        return None;
    }

    let mut parts: Vec<&str> = Vec::new();
    for part in name.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            p if p.contains('\0') => return None,
            #[cfg(windows)]
            p if p.contains(':') => return None,
            p => parts.push(p),
        }
    }

    if parts.is_empty() {
        return None;
    }

    let mut path = dest.to_path_buf();
    path.extend(parts);
    Some(path)
}
