//! Conversion of domestic account numbers to IBANs.
//!
//! How a domestic number maps to a BBAN differs per country, so the layout is
//! looked up by country code. Only the Czech layout
//! (`bank(4) + prefix(6) + account(10)`) is implemented.

use iban::{Iban, IbanLike};
use isocountry::CountryCode;

use crate::{account::LocalAccountNumber, checksum, Error};

/// Maps a domestic account number onto a country's BBAN.
pub trait BbanLayout: Sync {
    fn country(&self) -> CountryCode;

    fn bban(&self, local: &LocalAccountNumber) -> Result<String, Error>;
}

/// Czech BBAN: bank code, prefix padded to 6 digits, account padded to 10.
#[derive(Debug, Clone, Copy, Default)]
pub struct CzechLayout;

impl CzechLayout {
    const PREFIX_WIDTH: usize = 6;
    const ACCOUNT_WIDTH: usize = 10;
}

impl BbanLayout for CzechLayout {
    fn country(&self) -> CountryCode {
        CountryCode::CZE
    }

    fn bban(&self, local: &LocalAccountNumber) -> Result<String, Error> {
        if local.prefix().len() > Self::PREFIX_WIDTH || local.account().len() > Self::ACCOUNT_WIDTH {
            return Err(Error::AccountFormat(local.to_string()));
        }
        Ok(format!(
            "{}{:0>pw$}{:0>aw$}",
            local.bank_code(),
            local.prefix(),
            local.account(),
            pw = Self::PREFIX_WIDTH,
            aw = Self::ACCOUNT_WIDTH,
        ))
    }
}

static CZECH: CzechLayout = CzechLayout;

/// The BBAN layout registered for `country`, if any.
pub fn layout_for(country: CountryCode) -> Option<&'static dyn BbanLayout> {
    match country {
        CountryCode::CZE => Some(&CZECH),
        _ => None,
    }
}

/// Derives the IBAN of `local` under the layout of `country`.
pub fn derive_iban_for(country: CountryCode, local: &LocalAccountNumber) -> Result<Iban, Error> {
    let layout = layout_for(country)
        .ok_or_else(|| Error::UnsupportedCountry(country.alpha2().to_string()))?;
    let bban = layout.bban(local)?;
    let country_code = layout.country().alpha2();

    let check_digits = checksum::check_digits(&format!("{bban}{country_code}00"))?;
    let text = format!("{country_code}{check_digits:02}{bban}");
    tracing::trace!(account = %local, iban = %text, "derived IBAN");

    text.parse()
        .map_err(|source| Error::InvalidIban { input: text, source })
}

/// Derives the Czech IBAN of `local`.
pub fn derive_iban(local: &LocalAccountNumber) -> Result<Iban, Error> {
    derive_iban_for(CountryCode::CZE, local)
}

/// Parses `account` in `[prefix-]account/bank` notation and derives its
/// Czech IBAN.
///
/// ```
/// use qrplatba::IbanLike;
/// let iban = qrplatba::conversion::account_to_iban("2501301193/2010")?;
/// assert_eq!(iban.electronic_str(), "CZ3620100000002501301193");
/// # Ok::<(), qrplatba::Error>(())
/// ```
pub fn account_to_iban(account: &str) -> Result<Iban, Error> {
    derive_iban(&account.parse()?)
}

/// Accepts either a well-formed IBAN or a domestic account number.
///
/// The text is first validated as an IBAN (structure, per-country format and
/// check digits). Only when that fails is it read as a domestic account
/// number. If neither works, the IBAN validation failure is returned.
pub fn normalize_to_iban(text: &str) -> Result<Iban, Error> {
    match text.parse::<Iban>() {
        Ok(iban) => Ok(iban),
        Err(source) => match text.parse::<LocalAccountNumber>() {
            Ok(local) => {
                tracing::debug!(input = text, error = %source, "not an IBAN, deriving from account number");
                derive_iban(&local)
            }
            Err(_) => Err(Error::InvalidIban { input: text.into(), source }),
        },
    }
}
