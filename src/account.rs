use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::Error;

lazy_static! {
    static ref ACCOUNT_NOTATION: Regex =
        Regex::new(r"^(?:([0-9]{0,6})-)?([0-9]{1,10})/([0-9]{4})$").expect("This is a bug. Please report it.");
}

/// A domestic account number in the `[prefix-]account/bank` notation,
/// e.g. `19-2000145399/0800` or `2501301193/2010`.
///
/// The parts are kept as digit strings: leading zeros only matter for width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAccountNumber {
    prefix: String,
    account: String,
    bank_code: String,
}

impl LocalAccountNumber {
    /// Up to six digits, `"0"` when the notation has none.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// One to ten digits.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Exactly four digits.
    pub fn bank_code(&self) -> &str {
        &self.bank_code
    }
}

impl FromStr for LocalAccountNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = ACCOUNT_NOTATION
            .captures(s.trim())
            .ok_or_else(|| Error::AccountFormat(s.into()))?;
        let prefix = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|p| !p.is_empty())
            .unwrap_or("0");
        Ok(Self {
            prefix: prefix.to_string(),
            account: caps[2].to_string(),
            bank_code: caps[3].to_string(),
        })
    }
}

impl std::fmt::Display for LocalAccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.prefix.trim_start_matches('0').is_empty() {
            write!(f, "{}/{}", self.account, self.bank_code)
        } else {
            write!(f, "{}-{}/{}", self.prefix, self.account, self.bank_code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("2501301193/2010"       , "0"     , "2501301193", "2010")]
    #[case("12-3456789012/0100"    , "12"    , "3456789012", "0100")]
    #[case("123456-1234567890/0300", "123456", "1234567890", "0300")]
    #[case("-1234/0100"            , "0"     , "1234"      , "0100")]
    #[case(" 1234/0100 "           , "0"     , "1234"      , "0100")]
    fn parses(
        #[case] input: &str,
        #[case] prefix: &str,
        #[case] account: &str,
        #[case] bank_code: &str,
    ) -> anyhow::Result<()> {
        let parsed: LocalAccountNumber = input.parse()?;
        assert_eq!(parsed.prefix(), prefix);
        assert_eq!(parsed.account(), account);
        assert_eq!(parsed.bank_code(), bank_code);
        Ok(())
    }

    #[rstest]
    #[case("12345679870800")]
    #[case("1234567987/080")]
    #[case("1234567987/08000")]
    #[case("12345678901/0800")]
    #[case("1234567-1234/0800")]
    #[case("12-34-56/0800")]
    #[case("1234/0800/0100")]
    #[case("12a4/0800")]
    #[case("/0800")]
    #[case("CZ3620100000002501301193")]
    fn rejects_malformed(#[case] input: &str) {
        assert!(matches!(input.parse::<LocalAccountNumber>(), Err(Error::AccountFormat(_))));
    }

    #[rstest]
    #[case("12-3456789012/0100", "12-3456789012/0100")]
    #[case("000-1234/0100"     , "1234/0100")]
    #[case("1234/0100"         , "1234/0100")]
    fn displays_in_notation(#[case] input: &str, #[case] expected: &str) -> anyhow::Result<()> {
        assert_eq!(input.parse::<LocalAccountNumber>()?.to_string(), expected);
        Ok(())
    }
}
