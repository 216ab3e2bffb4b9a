#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use mip_labels::Config;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub const LABEL_ID: &str = "3de9faa6-9fe1-49b3-9a08-227a296b54a6";
pub const TENANT_ID: &str = "d5fe813e-0caa-432a-b2ac-d555aa91bd1c";

pub const TWO_LABELS: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<clbl:labelList xmlns:clbl="http://schemas.microsoft.com/office/2020/mipLabelMetadata">
<clbl:label id="{3de9faa6-9fe1-49b3-9a08-227a296b54a6}" enabled="1" method="Standard" siteId="{d5fe813e-0caa-432a-b2ac-d555aa91bd1c}" contentBits="0" removed="0" />
<clbl:label id="{aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee}" enabled="1" method="Privileged" siteId="{d5fe813e-0caa-432a-b2ac-d555aa91bd1c}" contentBits="3" removed="0" />
</clbl:labelList>"#;

pub const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Quarterly numbers</w:t></w:r></w:p></w:body></w:document>"#;

pub fn archive_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    archive_with(entries, CompressionMethod::Deflated)
}

/// Build an archive in memory; names ending in `/` become directory entries.
pub fn archive_with(entries: &[(&str, &str)], method: CompressionMethod) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(method);
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

pub fn write_archive(path: &Path, entries: &[(&str, &str)]) {
    std::fs::write(path, archive_bytes(entries)).unwrap();
}

/// A minimal word document, optionally carrying a label document.
pub fn write_docx(path: &Path, label_info: Option<&str>) {
    let mut entries = vec![
        ("[Content_Types].xml", "<Types/>"),
        ("_rels/.rels", "<Relationships/>"),
        ("word/document.xml", DOCUMENT_XML),
    ];
    if let Some(xml) = label_info {
        entries.push(("docMetadata/LabelInfo.xml", xml));
    }
    write_archive(path, &entries);
}

pub fn config(tmp_dir: &Path) -> Config {
    Config {
        tmp_dir: tmp_dir.to_path_buf(),
        ..Config::default()
    }
}

/// Directory for working directories, separate from the documents.
pub fn scratch(root: &Path) -> PathBuf {
    let dir = root.join("scratch");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}
