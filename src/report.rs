//! Text output for processed archives.

use std::collections::BTreeMap;
use std::fmt;

use crate::labels::{FileLabelResult, Label};
use crate::resolve::NameTable;

/// Column names printed before the first result line.
pub const HEADER: &str = "LabelInfo FilePath NumLabels Labels";

/// One space-delimited result line, e.g.
/// `true ./a.xlsx 1 [3de9faa6-... d5fe813e-...]`.
///
/// Identifiers are printed without braces, or replaced by their display
/// name when `names` knows them.
pub fn format_result(result: &FileLabelResult, names: Option<&NameTable>) -> String {
    let labels = result
        .labels
        .iter()
        .map(|label| {
            let id = names
                .and_then(|n| n.label_name(&label.id))
                .map(str::to_string)
                .unwrap_or_else(|| strip_braces(&label.id));
            let site = names
                .and_then(|n| n.tenant_name(&label.site_id))
                .map(str::to_string)
                .unwrap_or_else(|| strip_braces(&label.site_id));
            format!("{id} {site}")
        })
        .collect::<Vec<_>>();

    format!(
        "{} {} {} [{}]",
        result.label_info,
        result.path.display(),
        result.labels.len(),
        labels.join(", ")
    )
}

fn strip_braces(id: &str) -> String {
    id.replace(['{', '}'], "")
}

/// End-of-run totals.
#[derive(Debug, Default)]
pub struct Summary {
    files: usize,
    with_label_info: usize,
    labeled: usize,
    labels: BTreeMap<(String, String), usize>,
}

impl Summary {
    pub fn add(&mut self, result: &FileLabelResult) {
        self.files += 1;
        if result.label_info {
            self.with_label_info += 1;
        }
        if !result.labels.is_empty() {
            self.labeled += 1;
        }
        for Label { id, site_id, .. } in &result.labels {
            *self
                .labels
                .entry((strip_braces(id), strip_braces(site_id)))
                .or_default() += 1;
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary")?;
        writeln!(f, "  files: {}", self.files)?;
        writeln!(f, "  with LabelInfo: {}", self.with_label_info)?;
        write!(f, "  labeled: {}", self.labeled)?;
        for ((id, site_id), count) in &self.labels {
            write!(f, "\n  {id} {site_id}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelSet;
    use std::path::PathBuf;

    fn result(path: &str, labels: Vec<Label>) -> FileLabelResult {
        FileLabelResult {
            path: PathBuf::from(path),
            label_info: !labels.is_empty(),
            labels: LabelSet::from(labels),
        }
    }

    #[test]
    fn formats_labels_without_braces() {
        let r = result(
            "./123.xlsx",
            vec![
                Label::privileged("3de9faa6-9fe1", "d5fe813e-0caa"),
                Label::privileged("{odd}", "x"),
            ],
        );
        assert_eq!(
            format_result(&r, None),
            "true ./123.xlsx 2 [3de9faa6-9fe1 d5fe813e-0caa, odd x]"
        );
    }

    #[test]
    fn formats_unlabeled_file() {
        let r = result("b.docx", vec![]);
        assert_eq!(format_result(&r, None), "false b.docx 0 []");
    }

    #[test]
    fn summary_counts() {
        let mut summary = Summary::default();
        summary.add(&result("a.docx", vec![Label::privileged("l1", "t1")]));
        summary.add(&result("b.docx", vec![Label::privileged("l1", "t1")]));
        summary.add(&result("c.docx", vec![]));
        assert_eq!(
            summary.to_string(),
            "Summary\n  files: 3\n  with LabelInfo: 2\n  labeled: 2\n  l1 t1: 2"
        );
    }
}
