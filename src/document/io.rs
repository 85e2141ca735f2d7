use std::io::{Read, Write};

use anyhow::Context as _;
use serde::Serialize as _;

use crate::document::model::Document;
use crate::foundation::error::{FcpxError, FcpxResult};

/// Declaration line written ahead of every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Indentation (spaces per level) used when none is requested explicitly.
pub const DEFAULT_INDENT: usize = 2;

/// Parse an FCPXML document from text.
pub fn parse_document(xml: &str) -> FcpxResult<Document> {
    quick_xml::de::from_str(xml)
        .map_err(|e| FcpxError::malformed_input(format!("parse FCPXML: {e}")))
}

/// Read and parse an FCPXML document.
///
/// Bytes that are not UTF-8 are malformed input; only the read itself fails as IO.
pub fn read_document<R: Read>(mut r: R) -> FcpxResult<Document> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes).context("read FCPXML")?;
    let xml = String::from_utf8(bytes)
        .map_err(|e| FcpxError::malformed_input(format!("parse FCPXML: {e}")))?;
    parse_document(&xml)
}

/// Serialize `doc` with the XML declaration, `indent` spaces per level (`0` = single line)
/// and a trailing newline.
pub fn to_xml_string(doc: &Document, indent: usize) -> FcpxResult<String> {
    let mut body = String::new();
    let mut ser = quick_xml::se::Serializer::new(&mut body);
    if indent > 0 {
        ser.indent(' ', indent);
    }
    doc.serialize(ser)
        .map_err(|e| FcpxError::malformed_input(format!("write FCPXML: {e}")))?;

    let mut out = String::with_capacity(XML_DECLARATION.len() + body.len() + 2);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&body);
    out.push('\n');
    Ok(out)
}

/// Serialize `doc` into `w`.
pub fn write_document<W: Write>(mut w: W, doc: &Document, indent: usize) -> FcpxResult<()> {
    let xml = to_xml_string(doc, indent)?;
    w.write_all(xml.as_bytes()).context("write FCPXML")?;
    w.flush().context("flush FCPXML")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/document/io.rs"]
mod tests;
