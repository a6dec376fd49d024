//! Static Pix payload assembly

use super::crc::checksum_hex;
use super::field::Field;
use super::normalize::{strip_diacritics, truncate_chars};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Scheme identifier carried in the merchant account block
pub const PIX_DOMAIN: &str = "br.gov.bcb.pix";

/// Merchant category code (unspecified)
pub const MERCHANT_CATEGORY_CODE: &str = "0000";

/// ISO 4217 numeric code for the Brazilian real
pub const CURRENCY_BRL: &str = "986";

/// ISO 3166 country code
pub const COUNTRY_CODE: &str = "BR";

/// Maximum characters kept from the description
pub const MAX_DESCRIPTION_CHARS: usize = 25;

/// Checksum tag and length, appended without a value of its own
pub const CHECKSUM_HEADER: &str = "6304";

/// Reference label used when the description normalizes to nothing
const EMPTY_REFERENCE: &str = "***";

/// Payee identity printed into every payment code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    /// Pix key of the payee (tax id, e-mail, phone or random key)
    pub key: String,

    /// Payee name
    pub name: String,

    /// Payee city
    pub city: String,
}

impl Merchant {
    pub fn new(key: impl Into<String>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            city: city.into(),
        }
    }
}

/// A single payment request, built on demand and never stored
#[derive(Debug, Clone)]
pub struct PaymentRequest<'a> {
    pub merchant: &'a Merchant,
    pub amount: Decimal,
    pub description: &'a str,
}

impl<'a> PaymentRequest<'a> {
    pub fn new(merchant: &'a Merchant, amount: Decimal, description: &'a str) -> Self {
        Self {
            merchant,
            amount,
            description,
        }
    }

    /// Ordered payload fields, checksum excluded
    pub fn fields(&self) -> Vec<Field> {
        let description = strip_diacritics(self.description);
        let description = match truncate_chars(&description, MAX_DESCRIPTION_CHARS) {
            "" => EMPTY_REFERENCE,
            truncated => truncated,
        };

        vec![
            Field::simple("00", "01"),
            Field::composite(
                "26",
                vec![
                    Field::simple("00", PIX_DOMAIN),
                    Field::simple("01", self.merchant.key.as_str()),
                ],
            ),
            Field::simple("52", MERCHANT_CATEGORY_CODE),
            Field::simple("53", CURRENCY_BRL),
            Field::simple("54", format_amount(self.amount)),
            Field::simple("58", COUNTRY_CODE),
            Field::simple("59", strip_diacritics(&self.merchant.name)),
            Field::simple("60", strip_diacritics(&self.merchant.city)),
            Field::composite("62", vec![Field::simple("05", description)]),
        ]
    }

    /// Payload up to and including the checksum header
    pub fn assemble(&self) -> String {
        let fields = self.fields();
        let len = fields.iter().map(Field::encoded_len).sum::<usize>() + 8;

        let mut payload = String::with_capacity(len);
        for field in &fields {
            field.encode_into(&mut payload);
        }
        payload.push_str(CHECKSUM_HEADER);
        payload
    }

    /// Complete payload with its checksum
    pub fn encode(&self) -> String {
        let mut payload = self.assemble();
        let checksum = checksum_hex(&payload);
        payload.push_str(&checksum);
        payload
    }
}

/// Encode a static Pix payment payload
///
/// ```
/// use rust_decimal::Decimal;
/// use wedding::pix::{Merchant, encode_payment_payload};
///
/// let merchant = Merchant::new("09261139680", "Pauline Cerqueira Barbosa", "Cataguases");
/// let payload = encode_payment_payload(&merchant, Decimal::from(150), "Jogo de Panelas");
///
/// assert!(payload.starts_with("000201"));
/// assert!(payload.contains("5406150.00"));
/// ```
pub fn encode_payment_payload(merchant: &Merchant, amount: Decimal, description: &str) -> String {
    PaymentRequest::new(merchant, amount, description).encode()
}

/// Render an amount with exactly two fractional digits
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
