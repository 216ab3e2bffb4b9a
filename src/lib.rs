//! # mip-labels
//!
//! Read and rewrite Microsoft sensitivity labels stored inside Office Open
//! XML documents (`.docx`, `.xlsx`, `.pptx`).
//!
//! Labels live in `docMetadata/LabelInfo.xml` inside the document's zip
//! package. Each archive is extracted into a private working directory,
//! the label document is decoded, and for a `set` the document is rewritten,
//! the directory repacked in memory and the original file atomically
//! replaced.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use mip_labels::{Command, Config, discover_archives, process_file};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     for archive in discover_archives(Path::new("./shared"), &config.extensions, false)? {
//!         let result = process_file(&archive, &Command::Get, &config).await?;
//!         println!("{} has {} label(s)", result.path.display(), result.labels.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod io;
pub mod labels;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod workdir;
pub mod zip;

pub use cli::Cli;
pub use config::{Config, DEFAULT_EXTENSIONS};
pub use discovery::discover_archives;
pub use error::{Error, Result};
pub use labels::{FileLabelResult, Label, LabelSet};
pub use pipeline::{Command, process_file};
