//! Static Pix payment codes ("BR Code")
//!
//! A payment code is a flat ASCII string of tag-length-value fields followed
//! by a CRC-16/CCITT-FALSE checksum. Gift prices are turned into one of these
//! on every request; nothing here holds state or performs I/O.
//!
//! ```
//! use rust_decimal::Decimal;
//! use wedding::pix::{Merchant, decode_payload, encode_payment_payload};
//!
//! let merchant = Merchant::new("09261139680", "José", "Cataguases");
//! let payload = encode_payment_payload(&merchant, Decimal::new(123, 1), "Jogo de Panelas");
//!
//! let decoded = decode_payload(&payload).unwrap();
//! assert_eq!(decoded.merchant_name(), Some("Jose"));
//! assert_eq!(decoded.amount(), Some("12.30"));
//! ```

pub mod crc;
pub mod decode;
pub mod error;
pub mod field;
pub mod normalize;
pub mod payload;
#[cfg(feature = "qrcode")]
pub mod qr;

pub use crc::{checksum_hex, crc16_ccitt_false};
pub use decode::{DecodedField, DecodedPayload, decode_payload};
pub use error::PixError;
pub use field::{Field, MAX_VALUE_LEN, encode_field};
pub use normalize::{strip_diacritics, truncate_chars};
pub use payload::{
    MAX_DESCRIPTION_CHARS, Merchant, PaymentRequest, encode_payment_payload, format_amount,
};
#[cfg(feature = "qrcode")]
pub use qr::{QrOptions, render_svg, render_terminal};
