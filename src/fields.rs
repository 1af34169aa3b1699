//! Field keys of the payment (`SPD`) and invoice (`SID`) descriptors.
//!
//! Each schema is a closed enum. Declaration order is the order in which the
//! fields are written out, so both enums must stay sorted by wire position.

use std::{collections::BTreeMap, fmt::Display};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentField {
    Account,             // ACC     IBAN[+BIC], max 46
    AlternativeAccounts, // ALT-ACC comma separated IBANs, max 93
    Amount,              // AM      max 10
    Currency,            // CC      exactly 3
    DueDate,             // DT      YYYYMMDD
    Message,             // MSG     max 60
    VariableSymbol,      // X-VS    max 10
    SpecificSymbol,      // X-SS    max 10
    ConstantSymbol,      // X-KS    max 10
    PaymentReference,    // RF      max 16 digits
    RecipientName,       // RN      max 35
    PaymentType,         // PT      max 3
    Crc32,               // CRC32   8 hex digits
    NotificationType,    // NT      P | E
    NotificationAddress, // NTA     max 320
    RetryDays,           // X-PER   0..=30
    PaymentId,           // X-ID    max 20
    Url,                 // X-URL   max 140
}

impl PaymentField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Account => "ACC",
            Self::AlternativeAccounts => "ALT-ACC",
            Self::Amount => "AM",
            Self::Currency => "CC",
            Self::DueDate => "DT",
            Self::Message => "MSG",
            Self::VariableSymbol => "X-VS",
            Self::SpecificSymbol => "X-SS",
            Self::ConstantSymbol => "X-KS",
            Self::PaymentReference => "RF",
            Self::RecipientName => "RN",
            Self::PaymentType => "PT",
            Self::Crc32 => "CRC32",
            Self::NotificationType => "NT",
            Self::NotificationAddress => "NTA",
            Self::RetryDays => "X-PER",
            Self::PaymentId => "X-ID",
            Self::Url => "X-URL",
        }
    }
}

impl Display for PaymentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvoiceField {
    Id,                      // ID    max 40
    IssueDate,               // DD    YYYYMMDD
    Amount,                  // AM    max 18
    TaxPerformance,          // TP    0 | 1 | 2
    DocumentType,            // TD    0..=5 | 9
    IncludesDeposit,         // SA    0 | 1
    Message,                 // MSG   max 40
    RelatedId,               // ON    max 20
    VariableSymbol,          // VS    max 10
    IssuerTaxId,             // VII   max 14
    IssuerRegistrationId,    // INI   max 8
    RecipientTaxId,          // VIR   max 14
    RecipientRegistrationId, // INR   max 8
    TaxDate,                 // DUZP  YYYYMMDD
    TaxReportDate,           // DPPD  YYYYMMDD
    DueDate,                 // DT    YYYYMMDD
    TaxBase0,                // TB0   max 18
    Tax0,                    // T0    max 18
    TaxBase1,                // TB1   max 18
    Tax1,                    // T1    max 18
    TaxBase2,                // TB2   max 18
    Tax2,                    // T2    max 18
    NoTaxBase,               // NTB   max 18
    Currency,                // CC    exactly 3
    ExchangeRate,            // FX    max 18
    ExchangeUnits,           // FXA   max 5
    Account,                 // ACC   max 46
    Crc32,                   // CRC32 8 hex digits
    Software,                // X-SW  max 30
    Url,                     // X-URL max 70
}

impl InvoiceField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::IssueDate => "DD",
            Self::Amount => "AM",
            Self::TaxPerformance => "TP",
            Self::DocumentType => "TD",
            Self::IncludesDeposit => "SA",
            Self::Message => "MSG",
            Self::RelatedId => "ON",
            Self::VariableSymbol => "VS",
            Self::IssuerTaxId => "VII",
            Self::IssuerRegistrationId => "INI",
            Self::RecipientTaxId => "VIR",
            Self::RecipientRegistrationId => "INR",
            Self::TaxDate => "DUZP",
            Self::TaxReportDate => "DPPD",
            Self::DueDate => "DT",
            Self::TaxBase0 => "TB0",
            Self::Tax0 => "T0",
            Self::TaxBase1 => "TB1",
            Self::Tax1 => "T1",
            Self::TaxBase2 => "TB2",
            Self::Tax2 => "T2",
            Self::NoTaxBase => "NTB",
            Self::Currency => "CC",
            Self::ExchangeRate => "FX",
            Self::ExchangeUnits => "FXA",
            Self::Account => "ACC",
            Self::Crc32 => "CRC32",
            Self::Software => "X-SW",
            Self::Url => "X-URL",
        }
    }

    /// The payment field carrying the same information, if any. An invoice
    /// value equal to its counterpart is left out of a combined descriptor.
    pub const fn payment_counterpart(self) -> Option<PaymentField> {
        match self {
            Self::Amount => Some(PaymentField::Amount),
            Self::Message => Some(PaymentField::Message),
            Self::VariableSymbol => Some(PaymentField::VariableSymbol),
            Self::DueDate => Some(PaymentField::DueDate),
            Self::Currency => Some(PaymentField::Currency),
            Self::Account => Some(PaymentField::Account),
            Self::Crc32 => Some(PaymentField::Crc32),
            Self::Url => Some(PaymentField::Url),
            _ => None,
        }
    }

    /// Tax base field for VAT level 0 (standard), 1 or 2 (reduced).
    pub(crate) fn tax_base(level: u8) -> Result<Self, Error> {
        match level {
            0 => Ok(Self::TaxBase0),
            1 => Ok(Self::TaxBase1),
            2 => Ok(Self::TaxBase2),
            _ => Err(tax_level_error(level)),
        }
    }

    /// Tax amount field for VAT level 0 (standard), 1 or 2 (reduced).
    pub(crate) fn tax(level: u8) -> Result<Self, Error> {
        match level {
            0 => Ok(Self::Tax0),
            1 => Ok(Self::Tax1),
            2 => Ok(Self::Tax2),
            _ => Err(tax_level_error(level)),
        }
    }
}

fn tax_level_error(level: u8) -> Error {
    Error::FieldOutOfRange {
        field: "tax level",
        value: level.to_string(),
        allowed: "0, 1 or 2",
    }
}

impl Display for InvoiceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Field values of one schema, iterated in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet<K> {
    values: BTreeMap<K, String>,
}

impl<K: Ord + Copy + Display> FieldSet<K> {
    pub fn new() -> Self {
        Self { values: BTreeMap::new() }
    }

    pub fn get(&self, field: K) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: K) -> bool {
        self.values.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn set(&mut self, field: K, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// `KEY:value` for every present field, values escaped.
    pub(crate) fn chunks(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(k, v)| format!("{k}:{}", escape(v)))
    }
}

impl<K: Ord + Copy + Display> Default for FieldSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent-encodes the field separator `*` and the escape character `%`.
pub(crate) fn escape(value: &str) -> String {
    value.replace('%', "%25").replace('*', "%2A")
}

/// Fails if `value` has more than `max` characters.
pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), Error> {
    let found = value.chars().count();
    if found > max {
        return Err(Error::FieldTooLong { field, max, found });
    }
    Ok(())
}

/// Fails unless `value` is exactly eight hexadecimal digits.
pub(crate) fn check_crc32(field: &'static str, value: &str) -> Result<(), Error> {
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::FieldOutOfRange {
            field,
            value: value.into(),
            allowed: "8 hexadecimal digits",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const PAYMENT_ORDER: [&str; 18] = [
        "ACC", "ALT-ACC", "AM", "CC", "DT", "MSG", "X-VS", "X-SS", "X-KS", "RF", "RN", "PT",
        "CRC32", "NT", "NTA", "X-PER", "X-ID", "X-URL",
    ];

    const INVOICE_ORDER: [&str; 30] = [
        "ID", "DD", "AM", "TP", "TD", "SA", "MSG", "ON", "VS", "VII", "INI", "VIR", "INR", "DUZP",
        "DPPD", "DT", "TB0", "T0", "TB1", "T1", "TB2", "T2", "NTB", "CC", "FX", "FXA", "ACC",
        "CRC32", "X-SW", "X-URL",
    ];

    #[rstest]
    fn payment_fields_iterate_in_wire_order() {
        use PaymentField::*;
        let mut set = FieldSet::new();
        // Inserted back to front on purpose.
        for field in [
            Url, PaymentId, RetryDays, NotificationAddress, NotificationType, Crc32, PaymentType,
            RecipientName, PaymentReference, ConstantSymbol, SpecificSymbol, VariableSymbol,
            Message, DueDate, Currency, Amount, AlternativeAccounts, Account,
        ] {
            set.set(field, "x");
        }
        let keys: Vec<_> = set.iter().map(|(k, _)| k.key()).collect();
        assert_eq!(keys, PAYMENT_ORDER);
    }

    #[rstest]
    fn invoice_fields_iterate_in_wire_order() {
        use InvoiceField::*;
        let mut set = FieldSet::new();
        for field in [
            Url, Software, Crc32, Account, ExchangeUnits, ExchangeRate, Currency, NoTaxBase, Tax2,
            TaxBase2, Tax1, TaxBase1, Tax0, TaxBase0, DueDate, TaxReportDate, TaxDate,
            RecipientRegistrationId, RecipientTaxId, IssuerRegistrationId, IssuerTaxId,
            VariableSymbol, RelatedId, Message, IncludesDeposit, DocumentType, TaxPerformance,
            Amount, IssueDate, Id,
        ] {
            set.set(field, "x");
        }
        let keys: Vec<_> = set.iter().map(|(k, _)| k.key()).collect();
        assert_eq!(keys, INVOICE_ORDER);
    }

    #[rstest]
    #[case(InvoiceField::Amount        , Some("AM"))]
    #[case(InvoiceField::VariableSymbol, Some("X-VS"))]
    #[case(InvoiceField::DueDate       , Some("DT"))]
    #[case(InvoiceField::Url           , Some("X-URL"))]
    #[case(InvoiceField::Id            , None)]
    #[case(InvoiceField::Software      , None)]
    fn counterparts(#[case] field: InvoiceField, #[case] expected: Option<&str>) {
        assert_eq!(field.payment_counterpart().map(PaymentField::key), expected);
    }

    #[rstest]
    fn chunks_are_key_value_pairs() {
        let mut set = FieldSet::new();
        set.set(PaymentField::Currency, "CZK");
        set.set(PaymentField::Account, "CZ5401000000000000001234");
        let chunks: Vec<_> = set.chunks().collect();
        assert_eq!(chunks, ["ACC:CZ5401000000000000001234", "CC:CZK"]);
    }

    #[rstest]
    #[case("Faktura 12", "Faktura 12")]
    #[case("A*B", "A%2AB")]
    #[case("sleva 10 %", "sleva 10 %25")]
    #[case("%2A", "%252A")]
    fn values_are_escaped(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(escape(value), expected);
        let mut set = FieldSet::new();
        set.set(PaymentField::Message, value);
        let chunks: Vec<_> = set.chunks().collect();
        assert_eq!(chunks, [format!("MSG:{expected}")]);
    }

    #[rstest]
    #[case("0123456789", true)]
    #[case("01234567890", false)]
    #[case("ěščřžýáíéú", true)]
    fn length_is_counted_in_characters(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(check_len("X-SS", value, 10).is_ok(), ok);
    }

    #[rstest]
    #[case(0, true)]
    #[case(2, true)]
    #[case(3, false)]
    fn tax_levels(#[case] level: u8, #[case] ok: bool) {
        assert_eq!(InvoiceField::tax_base(level).is_ok(), ok);
        assert_eq!(InvoiceField::tax(level).is_ok(), ok);
    }
}
