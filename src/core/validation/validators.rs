//! Reusable field validators
//!
//! Each validator returns the message to show next to the form field, in the
//! language of the site's guests.

use regex::Regex;
use std::sync::OnceLock;

/// Validator: text must hold at least `min` characters once trimmed
pub fn min_chars(value: &str, min: usize) -> Result<(), String> {
    let len = value.trim().chars().count();
    if len < min {
        Err(format!("Deve ter pelo menos {} caracteres", min))
    } else {
        Ok(())
    }
}

/// Validator: text must not be blank
pub fn required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("Campo obrigatório".to_string())
    } else {
        Ok(())
    }
}

/// Validator: text must be a plausible e-mail address
pub fn email(value: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("static e-mail regex is valid")
    });

    if regex.is_match(value.trim()) {
        Ok(())
    } else {
        Err("Email inválido".to_string())
    }
}

/// Validator: number must be within `min..=max`
pub fn in_range(value: u32, min: u32, max: u32) -> Result<(), String> {
    if value < min || value > max {
        Err(format!("Deve estar entre {} e {}", min, max))
    } else {
        Ok(())
    }
}

/// Validator: MIME type must start with `prefix` (e.g. "image/")
pub fn content_type(value: &str, prefix: &str) -> Result<(), String> {
    if value.starts_with(prefix) {
        Ok(())
    } else {
        Err(format!("Tipo de arquivo não permitido: {}", value))
    }
}
