//! Sensitivity label records and the operations on the label metadata document.

pub mod codec;
pub mod locator;
pub mod mutator;

use std::path::PathBuf;

pub use codec::{decode, decode_lenient, encode};
pub use locator::{LABEL_INFO_PATH, locate_label_info};
pub use mutator::set_labels;

/// One `clbl:label` record.
///
/// `id` and `site_id` are held without the braces the document wraps them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    pub site_id: String,
    pub enabled: String,
    pub method: String,
    pub content_bits: String,
    pub removed: String,
}

impl Label {
    /// The label written by `set`: enabled, privileged assignment, no content marking.
    pub fn privileged(id: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            site_id: site_id.into(),
            enabled: "1".to_string(),
            method: "Privileged".to_string(),
            content_bits: "0".to_string(),
            removed: "0".to_string(),
        }
    }
}

/// Labels in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(Vec<Label>);

impl LabelSet {
    pub fn single(label: Label) -> Self {
        Self(vec![label])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }
}

impl From<Vec<Label>> for LabelSet {
    fn from(labels: Vec<Label>) -> Self {
        Self(labels)
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of processing one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabelResult {
    pub path: PathBuf,
    /// Whether `docMetadata/LabelInfo.xml` exists (after a set: will exist).
    pub label_info: bool,
    /// Labels found, or the labels applied by a set.
    pub labels: LabelSet,
}
