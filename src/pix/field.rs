//! Tag-length-value fields of the payment payload
//!
//! Every field is written as a two character tag, a two digit decimal length
//! and the value itself. Composite fields carry nested fields as their value;
//! their length is derived from the encoded children so a declared length can
//! never disagree with the bytes that follow it.

use std::fmt::Write;

/// Largest value a two digit length prefix can declare
pub const MAX_VALUE_LEN: usize = 99;

/// Encode a single tag-length-value field
///
/// The value must already be normalized to one byte per character; values
/// longer than [`MAX_VALUE_LEN`] are the caller's responsibility.
///
/// ```
/// use wedding::pix::encode_field;
///
/// assert_eq!(encode_field("54", "150.00"), "5406150.00");
/// ```
pub fn encode_field(tag: &str, value: &str) -> String {
    let mut out = String::with_capacity(4 + value.len());
    write_header(&mut out, tag, value.len());
    out.push_str(value);
    out
}

fn write_header(out: &mut String, tag: &str, len: usize) {
    debug_assert_eq!(tag.len(), 2, "tags are two characters");
    // Writing into a String cannot fail
    let _ = write!(out, "{}{:02}", tag, len);
}

/// A field of the payload, either a plain value or a group of nested fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Tag with a literal value
    Simple { tag: &'static str, value: String },

    /// Tag whose value is the concatenation of its encoded children
    Composite {
        tag: &'static str,
        children: Vec<Field>,
    },
}

impl Field {
    /// Create a simple field
    pub fn simple(tag: &'static str, value: impl Into<String>) -> Self {
        Field::Simple {
            tag,
            value: value.into(),
        }
    }

    /// Create a composite field
    pub fn composite(tag: &'static str, children: Vec<Field>) -> Self {
        Field::Composite { tag, children }
    }

    /// The field tag
    pub fn tag(&self) -> &'static str {
        match self {
            Field::Simple { tag, .. } | Field::Composite { tag, .. } => tag,
        }
    }

    /// Length of the value part (what the length prefix declares)
    pub fn value_len(&self) -> usize {
        match self {
            Field::Simple { value, .. } => value.len(),
            Field::Composite { children, .. } => children.iter().map(Field::encoded_len).sum(),
        }
    }

    /// Length of the whole encoded field, header included
    pub fn encoded_len(&self) -> usize {
        4 + self.value_len()
    }

    /// Append the encoded field to `out`
    pub fn encode_into(&self, out: &mut String) {
        write_header(out, self.tag(), self.value_len());
        match self {
            Field::Simple { value, .. } => out.push_str(value),
            Field::Composite { children, .. } => {
                for child in children {
                    child.encode_into(out);
                }
            }
        }
    }

    /// Encode the field into a new string
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }
}
