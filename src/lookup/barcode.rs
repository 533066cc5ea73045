use std::fmt;
use thiserror::Error;

const MIN_DIGITS: usize = 4;
const MAX_DIGITS: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Barcode cannot be empty")]
    EmptyBarcode,
    #[error("Invalid barcode format. Must be 4-14 digits.")]
    InvalidBarcode,
    #[error("Product name cannot be empty")]
    EmptySearchTerm,
}

/// A validated product barcode (4-14 ASCII digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Barcode(String);

impl Barcode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyBarcode);
        }
        let len_ok = (MIN_DIGITS..=MAX_DIGITS).contains(&trimmed.len());
        if !len_ok || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidBarcode);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_trimmed_digits() {
        let barcode = Barcode::parse("  3017620422003 ").unwrap();
        assert_eq!(barcode.as_str(), "3017620422003");
    }

    #[test]
    fn length_bounds() {
        assert!(Barcode::parse("1234").is_ok());
        assert!(Barcode::parse("12345678901234").is_ok());
        assert_eq!(Barcode::parse("123"), Err(ValidationError::InvalidBarcode));
        assert_eq!(
            Barcode::parse("123456789012345"),
            Err(ValidationError::InvalidBarcode)
        );
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(Barcode::parse("12a456"), Err(ValidationError::InvalidBarcode));
        assert_eq!(Barcode::parse("1234 5678"), Err(ValidationError::InvalidBarcode));
        assert_eq!(Barcode::parse("١٢٣٤٥"), Err(ValidationError::InvalidBarcode));
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(Barcode::parse("   "), Err(ValidationError::EmptyBarcode));
    }
}
