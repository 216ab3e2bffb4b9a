//! Reading and writing `docMetadata/LabelInfo.xml`.
//!
//! The document is a `clbl:labelList` root with one empty `clbl:label`
//! element per label:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8" standalone="yes"?>
//! <clbl:labelList xmlns:clbl="http://schemas.microsoft.com/office/2020/mipLabelMetadata">
//!   <clbl:label id="{...}" enabled="1" method="Privileged" siteId="{...}" contentBits="0" removed="0"/>
//! </clbl:labelList>
//! ```
//!
//! Office re-reads documents written here, so [`encode`] emits one fixed
//! layout (no whitespace, fixed attribute order) rather than echoing what
//! was read.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use super::{Label, LabelSet};
use crate::error::{Error, Result};

/// Namespace bound to the `clbl` prefix.
pub const LABEL_NAMESPACE: &str = "http://schemas.microsoft.com/office/2020/mipLabelMetadata";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>"#;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse a label document.
///
/// Elements and attributes are matched by local name, so any prefix works.
/// Only direct children of the root named `label` are read; a missing
/// attribute reads as an empty string. An attribute that can't be read
/// (say, a bad entity reference) leaves its field empty without affecting
/// the rest of the document. A repeated attribute takes its last value.
pub fn decode(xml: &[u8]) -> Result<LabelSet> {
    let xml = xml.strip_prefix(UTF8_BOM).unwrap_or(xml);
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut labels = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(decode_error)? {
            Event::Start(e) => {
                if depth == 0 {
                    check_root(&e)?;
                    seen_root = true;
                } else if depth == 1 && e.local_name().as_ref() == b"label" {
                    labels.push(parse_label(&e));
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    check_root(&e)?;
                    seen_root = true;
                    break;
                } else if depth == 1 && e.local_name().as_ref() == b"label" {
                    labels.push(parse_label(&e));
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(Error::XmlDecode("document has no root element".to_string()));
    }
    if depth != 0 {
        return Err(Error::XmlDecode("unexpected end of document".to_string()));
    }

    Ok(labels.into())
}

/// Parse a label document, treating an unreadable one as carrying no labels.
pub fn decode_lenient(xml: &[u8]) -> LabelSet {
    decode(xml).unwrap_or_else(|err| {
        warn!(%err, "label document is unreadable, reporting no labels");
        LabelSet::default()
    })
}

/// Serialize labels into the canonical document text.
pub fn encode(labels: &LabelSet) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(&format!(r#"<clbl:labelList xmlns:clbl="{LABEL_NAMESPACE}">"#));
    for label in labels {
        xml.push_str(&format!(
            r#"<clbl:label id="{{{}}}" enabled="{}" method="{}" siteId="{{{}}}" contentBits="{}" removed="{}"/>"#,
            escape(&label.id),
            escape(&label.enabled),
            escape(&label.method),
            escape(&label.site_id),
            escape(&label.content_bits),
            escape(&label.removed),
        ));
    }
    xml.push_str("</clbl:labelList>");
    xml
}

fn check_root(e: &BytesStart<'_>) -> Result<()> {
    if e.local_name().as_ref() == b"labelList" {
        Ok(())
    } else {
        Err(Error::XmlDecode(format!(
            "expected labelList root, found {}",
            String::from_utf8_lossy(e.name().as_ref())
        )))
    }
}

fn parse_label(e: &BytesStart<'_>) -> Label {
    let mut label = Label::default();
    for attr in e.attributes().with_checks(false) {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) => {
                debug!(%err, "skipping malformed label attribute");
                continue;
            }
        };
        let value = match attr.unescape_value() {
            Ok(value) => value,
            Err(err) => {
                debug!(%err, "skipping undecodable label attribute");
                continue;
            }
        };
        match attr.key.local_name().as_ref() {
            b"id" => label.id = strip_braces(&value).to_string(),
            b"siteId" => label.site_id = strip_braces(&value).to_string(),
            b"enabled" => label.enabled = value.into_owned(),
            b"method" => label.method = value.into_owned(),
            b"contentBits" => label.content_bits = value.into_owned(),
            b"removed" => label.removed = value.into_owned(),
            _ => {}
        }
    }
    label
}

/// Remove one enclosing `{` `}` pair, if present.
fn strip_braces(value: &str) -> &str {
    value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .unwrap_or(value)
}

fn decode_error(err: impl std::fmt::Display) -> Error {
    Error::XmlDecode(err.to_string())
}
