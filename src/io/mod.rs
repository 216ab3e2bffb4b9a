mod local;
mod memory;

pub use local::LocalFileReader;
pub use memory::MemoryReader;

use crate::error::{Error, Result};
use async_trait::async_trait;

/// Trait for random access reading from an archive source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;

    /// Fill the whole buffer starting at `offset`.
    ///
    /// A short source is reported as a format error: every caller reads
    /// lengths taken from the archive's own records.
    async fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read_at(offset + filled as u64, &mut buf[filled..]).await?;
            if n == 0 {
                return Err(Error::format(format!(
                    "unexpected end of data at offset {}",
                    offset + filled as u64
                )));
            }
            filled += n;
        }
        Ok(())
    }
}
