use super::ReadAt;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Local file reader with random access support
pub struct LocalFileReader {
    file: std::fs::File,
    path: PathBuf,
    size: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| Error::path(path, e))?;
        let size = file.metadata().map_err(|e| Error::path(path, e))?.len();
        Ok(Self {
            file,
            path: path.to_path_buf(),
            size,
        })
    }
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file
                .read_at(buf, offset)
                .map_err(|e| Error::io(&self.path, e))
        }

        #[cfg(windows)]
        {
            use std::os::windows::fs::FileExt;
            self.file
                .seek_read(buf, offset)
                .map_err(|e| Error::io(&self.path, e))
        }

        #[cfg(not(any(unix, windows)))]
        {
            use std::io::{Read, Seek, SeekFrom};
            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))
                .and_then(|_| file.read(buf))
                .map_err(|e| Error::io(&self.path, e))
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}
