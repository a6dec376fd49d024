//! Reading back an encoded payload
//!
//! Used to verify what the encoder produced: the trailing checksum is
//! recomputed and every declared length is checked against the bytes that
//! follow it.

use super::crc::checksum_hex;
use super::error::{PixError, Result};
use super::payload::CHECKSUM_HEADER;

/// Tags whose value is itself a list of fields
const COMPOSITE_TAGS: &[&str] = &["26", "62"];

/// A field read from a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub tag: String,
    pub value: String,
    /// Nested fields for composite tags
    pub children: Vec<DecodedField>,
}

impl DecodedField {
    /// Find a nested field by tag
    pub fn child(&self, tag: &str) -> Option<&DecodedField> {
        self.children.iter().find(|f| f.tag == tag)
    }
}

/// A payload whose checksum and field lengths have been verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub fields: Vec<DecodedField>,
    pub checksum: String,
}

impl DecodedPayload {
    /// Find a top-level field by tag
    pub fn get(&self, tag: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    pub fn pix_key(&self) -> Option<&str> {
        self.get("26")?.child("01").map(|f| f.value.as_str())
    }

    pub fn amount(&self) -> Option<&str> {
        self.get("54").map(|f| f.value.as_str())
    }

    pub fn merchant_name(&self) -> Option<&str> {
        self.get("59").map(|f| f.value.as_str())
    }

    pub fn merchant_city(&self) -> Option<&str> {
        self.get("60").map(|f| f.value.as_str())
    }

    pub fn description(&self) -> Option<&str> {
        self.get("62")?.child("05").map(|f| f.value.as_str())
    }
}

/// Verify and split a payload into its fields
pub fn decode_payload(payload: &str) -> Result<DecodedPayload> {
    if !payload.is_ascii() {
        return Err(PixError::NonAscii);
    }

    let trailer = CHECKSUM_HEADER.len() + 4;
    if payload.len() < trailer {
        return Err(PixError::MissingChecksum);
    }

    let (signed, checksum) = payload.split_at(payload.len() - 4);
    if !signed.ends_with(CHECKSUM_HEADER) {
        return Err(PixError::MissingChecksum);
    }

    let expected = checksum_hex(signed);
    if !checksum.eq_ignore_ascii_case(&expected) {
        return Err(PixError::ChecksumMismatch {
            expected,
            found: checksum.to_string(),
        });
    }

    let body = &signed[..signed.len() - CHECKSUM_HEADER.len()];
    let fields = parse_fields(body, 0)?;

    Ok(DecodedPayload {
        fields,
        checksum: checksum.to_uppercase(),
    })
}

fn parse_fields(input: &str, base: usize) -> Result<Vec<DecodedField>> {
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let offset = base + pos;
        let header = input
            .get(pos..pos + 4)
            .ok_or(PixError::Truncated { offset })?;
        let (tag, len) = header.split_at(2);
        let len: usize = len
            .parse()
            .map_err(|_| PixError::InvalidLength {
                tag: tag.to_string(),
                offset,
            })?;

        let start = pos + 4;
        let value = input
            .get(start..start + len)
            .ok_or(PixError::Truncated { offset })?;

        let children = if COMPOSITE_TAGS.contains(&tag) {
            parse_fields(value, base + start)?
        } else {
            Vec::new()
        };

        fields.push(DecodedField {
            tag: tag.to_string(),
            value: value.to_string(),
            children,
        });
        pos = start + len;
    }

    Ok(fields)
}
