//! ZIP archive reading, extraction and repacking.
//!
//! ## Architecture
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`extractor`]: Safe extraction of a whole archive into a directory
//! - [`packer`]: Packs a directory tree into a new archive with the `zip` crate
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! Reading starts from the EOCD, then the Central Directory, and only then
//! visits each entry's local header and data.
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions
//! - STORED and DEFLATE compression methods
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support

mod extractor;
mod packer;
mod parser;
mod structures;

pub use extractor::{ZipExtractor, enclosed_path, extract_archive};
pub use packer::pack_dir;
pub use parser::ZipParser;
pub use structures::*;
