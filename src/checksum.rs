//! ISO 7064 MOD 97-10 over decimal strings of any length.

use crate::Error;

/// Digits consumed per reduction step. A remainder below 97 followed by seven
/// digits stays below `u32::MAX`.
const CHUNK_DIGITS: usize = 7;

/// Computes `digits mod 97` without converting the whole number.
///
/// The input is consumed in chunks of [`CHUNK_DIGITS`]; each chunk is read
/// with the previous remainder in front of it, the way long division carries
/// over. Empty input or anything other than ASCII digits is rejected.
pub fn mod97(digits: &str) -> Result<u8, Error> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidDigits(digits.into()));
    }
    let remainder = digits
        .as_bytes()
        .chunks(CHUNK_DIGITS)
        .fold(0u32, |remainder, chunk| {
            chunk
                .iter()
                .fold(remainder, |value, b| value * 10 + u32::from(b - b'0'))
                % 97
        });
    // The fold always ends on `% 97`.
    Ok(remainder as u8)
}

/// Replaces each base-36 character by its decimal value: digits stay as they
/// are, `A` becomes `10` up to `Z` as `35`. Other characters are dropped.
pub fn to_decimal_digits(text: &str) -> String {
    DigitsBase10::from(&DigitsBase36::from(text)).0
}

/// Check digits for an already rearranged IBAN, i.e. `BBAN + country + "00"`.
pub fn check_digits(rearranged: &str) -> Result<u8, Error> {
    Ok(98 - mod97(&to_decimal_digits(rearranged))?)
}

/// Whether `iban` (electronic form) carries correct check digits.
pub fn is_valid_iban_checksum(iban: &str) -> bool {
    if iban.len() < 5 || !iban.is_ascii() {
        return false;
    }
    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    matches!(mod97(&to_decimal_digits(&rearranged)), Ok(1))
}

#[derive(Debug, Clone)] struct DigitsBase10(String);
#[derive(Debug, Clone)] struct DigitsBase36(String);

impl From<&str> for DigitsBase36 {
    fn from(source: &str) -> Self {
        Self(source
             .to_ascii_uppercase()
             .chars()
             .filter(|c| c.is_digit(36))
             .collect())
    }
}

impl From<&DigitsBase36> for DigitsBase10 {
    fn from(digits: &DigitsBase36) -> Self {
        Self(digits.0
             .chars()
             .filter_map(|c| c.to_digit(36))
             .map(|d| d.to_string())
             .collect()
        )
    }
}
