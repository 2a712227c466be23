//! BSON element framing
//!
//! The BSON codec only reads and writes whole documents. A single value is
//! marshaled by framing it as the sole element of a one-key document:
//!
//! ```text
//! | i32 total length | kind | "v\0" | value bytes | 0x00 |
//! ```
//!
//! Encoding strips the frame, decoding rebuilds it.

use bson::spec::ElementType;
use bson::{Bson, Document};
use typx_core::{CodecError, Result};

const KEY: &str = "v";

/// Length prefix, kind byte and the `"v\0"` key.
const HEADER_LEN: usize = 4 + 1 + KEY.len() + 1;

/// Marshal one value into its element kind and raw bytes.
pub fn encode_element(value: Bson) -> Result<(ElementType, Vec<u8>)> {
    let kind = value.element_type();
    let mut doc = Document::new();
    doc.insert(KEY, value);

    let mut buf = Vec::new();
    doc.to_writer(&mut buf).map_err(CodecError::from)?;

    let end = buf.len() - 1;
    Ok((kind, buf[HEADER_LEN..end].to_vec()))
}

/// Unmarshal the raw bytes of one element of kind `kind`.
pub fn decode_element(kind: ElementType, data: &[u8]) -> Result<Bson> {
    let len = HEADER_LEN + data.len() + 1;
    let prefix = i32::try_from(len).map_err(|_| {
        CodecError::MalformedElement(format!("element of {} bytes is too large", data.len()))
    })?;

    let mut buf = Vec::with_capacity(len);
    buf.extend_from_slice(&prefix.to_le_bytes());
    buf.push(kind as u8);
    buf.extend_from_slice(KEY.as_bytes());
    buf.push(0);
    buf.extend_from_slice(data);
    buf.push(0);

    let mut doc = Document::from_reader(buf.as_slice()).map_err(CodecError::from)?;
    doc.remove(KEY)
        .ok_or_else(|| CodecError::MalformedElement("element is missing".to_string()).into())
}
