//! Per-archive processing: extract, inspect, optionally relabel, clean up.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::labels::{self, FileLabelResult, Label, LabelSet};
use crate::workdir::WorkDir;
use crate::zip::extract_archive;

/// What to do with each archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Report the labels present.
    Get,
    /// Replace all labels with a single privileged label.
    Set { label_id: String, tenant_id: String },
}

/// Process one archive.
///
/// The working directory is removed when this returns, on success and on
/// error alike, unless `config.keep_tmp` is set.
pub async fn process_file(archive: &Path, command: &Command, config: &Config) -> Result<FileLabelResult> {
    let work_dir = WorkDir::acquire(&config.tmp_dir, archive, config.keep_tmp)?;
    extract_archive(archive, work_dir.path()).await?;

    let (present, label_info) = labels::locate_label_info(work_dir.path());
    let found = if present {
        let xml = tokio::fs::read(&label_info)
            .await
            .map_err(|e| Error::io(&label_info, e))?;
        if config.strict {
            labels::decode(&xml)?
        } else {
            labels::decode_lenient(&xml)
        }
    } else {
        debug!(archive = %archive.display(), "no label document");
        LabelSet::default()
    };

    match command {
        Command::Get => Ok(FileLabelResult {
            path: archive.to_path_buf(),
            label_info: present,
            labels: found,
        }),
        Command::Set {
            label_id,
            tenant_id,
        } => {
            let applied = LabelSet::single(Label::privileged(label_id.as_str(), tenant_id.as_str()));
            info!(
                archive = %archive.display(),
                previous = found.len(),
                dry_run = config.dry_run,
                "setting label"
            );
            labels::set_labels(
                work_dir.path(),
                archive,
                &label_info,
                &applied,
                config.dry_run,
            )
            .await?;
            Ok(FileLabelResult {
                path: archive.to_path_buf(),
                label_info: true,
                labels: applied,
            })
        }
    }
}
