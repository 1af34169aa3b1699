//! Czech *QR Platba* (`SPD`) and *QR Faktura* (`SID`) descriptors.
//!
//! ```
//! use qrplatba::QRPlatba;
//!
//! let mut platba = QRPlatba::create("12-3456789012/0100", Some(1234.56), Some("2016001234"))?;
//! platba.set_message("Düakrítičs");
//! assert_eq!(
//!     platba.to_string(),
//!     "SPD*1.0*ACC:CZ0301000000123456789012*AM:1234.56*CC:CZK*MSG:Duakritics*X-VS:2016001234",
//! );
//! # Ok::<(), qrplatba::Error>(())
//! ```

use chrono::NaiveDate;
use deunicode::deunicode;
pub use iban::{Iban, IbanLike, ParseIbanError};
pub use isocountry::CountryCode;
use qrcode::types::QrError;

pub mod account;
pub mod checksum;
pub mod conversion;
pub mod fields;
mod invoice;
pub mod render;

pub use account::LocalAccountNumber;
pub use conversion::{account_to_iban, normalize_to_iban};
pub use fields::{FieldSet, InvoiceField, PaymentField};
pub use render::{OutputFormat, QrImage, RenderOptions};

const DEFAULT_CURRENCY: &str = "CZK";
const DATE_FMT: &str = "%Y%m%d";

/// Currency codes accepted for `CC`.
const CURRENCIES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN",
    "BAM", "BBD", "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL",
    "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF", "CHF", "CLP", "CNY",
    "COP", "CRC", "CUC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GGP", "GHS",
    "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL", "HRK", "HTG", "HUF",
    "IDR", "ILS", "IMP", "INR", "IQD", "IRR", "ISK", "JEP", "JMD", "JOD",
    "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT",
    "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD",
    "MMK", "MNT", "MOP", "MRO", "MUR", "MVR", "MWK", "MXN", "MYR", "MZN",
    "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN", "PGK",
    "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF", "SAR",
    "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLL", "SOS", "SPL", "SRD",
    "STD", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRY",
    "TTD", "TVD", "TWD", "TZS", "UAH", "UGX", "USD", "UYU", "UZS", "VEF",
    "VND", "VUV", "WST", "XAF", "XCD", "XDR", "XOF", "XPF", "YER", "ZAR",
    "ZMW", "ZWD",
];

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Account number {0:?} does not match the [prefix-]account/bank notation.")]
    AccountFormat(String),
    #[error("{input:?} is neither a valid IBAN nor an account number: {source}")]
    InvalidIban {
        input: String,
        #[source]
        source: ParseIbanError,
    },
    #[error("No account number layout is known for country {0}.")]
    UnsupportedCountry(String),
    #[error("Currency {0} is not supported.")]
    UnsupportedCurrency(String),
    #[error("{field} can be no more than {max} characters, found {found}.")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        found: usize,
    },
    #[error("{field} must be {allowed}, found {value:?}.")]
    FieldOutOfRange {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
    #[error("Expected a non-empty string of decimal digits, found {0:?}.")]
    InvalidDigits(String),
    #[error("An invoice needs both an ID and an issue date to be encoded.")]
    IncompleteInvoice,
    #[error("Output format {0:?} is not supported.")]
    UnsupportedOutput(String),
    #[error("An error with the QR code generation occured.")]
    Qr(#[from] QrError),
    #[error("An IO error occured.")]
    Io(#[from] std::io::Error),
    #[error("The generated SVG could not be read back: {0}")]
    Svg(#[from] svg2pdf::usvg::Error),
    #[error("Rasterizing the QR code failed: {0}")]
    Raster(String),
}

/// Channel over which the bank notifies the payee (`NT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationChannel {
    Phone,
    Email,
}

impl NotificationChannel {
    fn code(self) -> &'static str {
        match self {
            Self::Phone => "P",
            Self::Email => "E",
        }
    }
}

/// The values most payments need, for [`QRPlatba::with_options`].
#[derive(Debug, Clone, Default)]
pub struct QRPlatbaOptions {
    /// IBAN or `[prefix-]account/bank`.
    pub account: Option<String>,
    /// Left out of the descriptor when zero.
    pub amount: Option<f64>,
    pub variable_symbol: Option<String>,
    /// Three letter currency code, `CZK` when left out.
    pub currency: Option<String>,
}

/// A payment descriptor, optionally carrying invoice data.
///
/// Setters validate their input and leave the descriptor untouched when they
/// fail. The encoded text is produced fresh by [`QRPlatba::qr_data`] (or
/// `to_string()`) every time it is asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct QRPlatba {
    payment: FieldSet<PaymentField>,
    invoice: FieldSet<InvoiceField>,
    /// Emit only the `SID` invoice, without a payment.
    only_invoice: bool,
    /// Caption printed under the rendered QR code. Not encoded.
    label: Option<String>,
}

impl Default for QRPlatba {
    fn default() -> Self {
        let mut payment = FieldSet::new();
        payment.set(PaymentField::Currency, DEFAULT_CURRENCY);
        let mut invoice = FieldSet::new();
        invoice.set(InvoiceField::Currency, DEFAULT_CURRENCY);
        Self {
            payment,
            invoice,
            only_invoice: false,
            label: None,
        }
    }
}

impl QRPlatba {
    const PAYMENT_TAG: &'static str = "SPD";
    const INVOICE_TAG: &'static str = "SID";
    const VERSION: &'static str = "1.0";
    const SEPARATOR: &'static str = "*";
    /// Payment key under which a combined descriptor nests the invoice.
    const INVOICE_KEY: &'static str = "X-INV";

    /// An empty descriptor, currency `CZK`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a descriptor seeded with the given options.
    pub fn with_options(options: QRPlatbaOptions) -> Result<Self, Error> {
        let mut platba = Self::new();
        if let Some(account) = options.account.as_deref() {
            platba.set_account(account)?;
        }
        if let Some(amount) = options.amount.filter(|amount| *amount != 0.0) {
            platba.set_amount(amount)?;
        }
        if let Some(variable_symbol) = options.variable_symbol.as_deref() {
            platba.set_variable_symbol(variable_symbol)?;
        }
        if let Some(currency) = options.currency.as_deref() {
            platba.set_currency(currency)?;
        }
        Ok(platba)
    }

    /// Shorthand for the common account, amount and variable symbol triple.
    pub fn create(
        account: &str,
        amount: Option<f64>,
        variable_symbol: Option<&str>,
    ) -> Result<Self, Error> {
        Self::with_options(QRPlatbaOptions {
            account: Some(account.into()),
            amount,
            variable_symbol: variable_symbol.map(Into::into),
            currency: None,
        })
    }

    pub fn payment_fields(&self) -> &FieldSet<PaymentField> {
        &self.payment
    }

    pub fn invoice_fields(&self) -> &FieldSet<InvoiceField> {
        &self.invoice
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_only_invoice(&self) -> bool {
        self.only_invoice
    }

    /// Sets the payee account from an IBAN or a `[prefix-]account/bank`
    /// number, e.g. `12-3456789012/0100`.
    pub fn set_account(&mut self, account: &str) -> Result<&mut Self, Error> {
        let iban = conversion::normalize_to_iban(account)?;
        Ok(self.put_account(&iban))
    }

    /// Sets the payee account from an IBAN only.
    pub fn set_iban(&mut self, iban: &str) -> Result<&mut Self, Error> {
        let iban: Iban = iban.parse().map_err(|source| Error::InvalidIban {
            input: iban.into(),
            source,
        })?;
        Ok(self.put_account(&iban))
    }

    fn put_account(&mut self, iban: &Iban) -> &mut Self {
        self.payment.set(PaymentField::Account, iban.electronic_str());
        self.invoice.set(InvoiceField::Account, iban.electronic_str());
        self
    }

    /// Appends an alternative account given as `[prefix-]account/bank`.
    pub fn add_alternative_account(&mut self, account: &str) -> Result<&mut Self, Error> {
        let iban = conversion::account_to_iban(account)?;
        let field = PaymentField::AlternativeAccounts;
        let list = match self.payment.get(field) {
            Some(existing) => format!("{existing},{}", iban.electronic_str()),
            None => iban.electronic_str().to_string(),
        };
        fields::check_len(field.key(), &list, 93)?;
        self.payment.set(field, list);
        Ok(self)
    }

    /// Sets the amount, written with two decimals.
    pub fn set_amount(&mut self, amount: f64) -> Result<&mut Self, Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::FieldOutOfRange {
                field: PaymentField::Amount.key(),
                value: amount.to_string(),
                allowed: "a finite, non-negative number",
            });
        }
        let amount = format_amount(amount);
        fields::check_len(PaymentField::Amount.key(), &amount, 10)?;
        self.payment.set(PaymentField::Amount, amount.clone());
        self.invoice.set(InvoiceField::Amount, amount);
        Ok(self)
    }

    /// Sets the currency code, `CZK` by default. Only codes in the
    /// built-in list are accepted, uppercase.
    pub fn set_currency(&mut self, code: &str) -> Result<&mut Self, Error> {
        if !CURRENCIES.contains(&code) {
            return Err(Error::UnsupportedCurrency(code.into()));
        }
        self.payment.set(PaymentField::Currency, code);
        self.invoice.set(InvoiceField::Currency, code);
        Ok(self)
    }

    pub fn set_due_date(&mut self, date: NaiveDate) -> &mut Self {
        self.payment.set(PaymentField::DueDate, format_date(date));
        self.invoice.set(InvoiceField::DueDate, format_date(date));
        self
    }

    /// Message for the payee. Diacritics are removed and the text is cut to
    /// 60 characters (40 in the invoice).
    pub fn set_message(&mut self, message: &str) -> &mut Self {
        let message = deunicode(message);
        self.payment.set(PaymentField::Message, truncate(&message, 60));
        self.invoice.set(InvoiceField::Message, truncate(&message, 40));
        self
    }

    /// Payee name. Diacritics are removed and the text is cut to 35
    /// characters.
    pub fn set_recipient_name(&mut self, name: &str) -> &mut Self {
        self.payment
            .set(PaymentField::RecipientName, truncate(&deunicode(name), 35));
        self
    }

    pub fn set_variable_symbol(&mut self, symbol: &str) -> Result<&mut Self, Error> {
        fields::check_len(PaymentField::VariableSymbol.key(), symbol, 10)?;
        self.payment.set(PaymentField::VariableSymbol, symbol);
        self.invoice.set(InvoiceField::VariableSymbol, symbol);
        Ok(self)
    }

    pub fn set_specific_symbol(&mut self, symbol: &str) -> Result<&mut Self, Error> {
        fields::check_len(PaymentField::SpecificSymbol.key(), symbol, 10)?;
        self.payment.set(PaymentField::SpecificSymbol, symbol);
        Ok(self)
    }

    pub fn set_constant_symbol(&mut self, symbol: &str) -> Result<&mut Self, Error> {
        fields::check_len(PaymentField::ConstantSymbol.key(), symbol, 10)?;
        self.payment.set(PaymentField::ConstantSymbol, symbol);
        Ok(self)
    }

    /// Payment identifier for the payee (`RF`), at most 16 digits.
    pub fn set_payment_reference(&mut self, reference: &str) -> Result<&mut Self, Error> {
        let field = PaymentField::PaymentReference;
        fields::check_len(field.key(), reference, 16)?;
        if !reference.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::FieldOutOfRange {
                field: field.key(),
                value: reference.into(),
                allowed: "decimal digits",
            });
        }
        self.payment.set(field, reference);
        Ok(self)
    }

    /// Payment type code (`PT`), e.g. `IP` for an instant payment.
    pub fn set_payment_type(&mut self, payment_type: &str) -> Result<&mut Self, Error> {
        fields::check_len(PaymentField::PaymentType.key(), payment_type, 3)?;
        self.payment.set(PaymentField::PaymentType, payment_type);
        Ok(self)
    }

    pub fn set_crc32(&mut self, checksum: &str) -> Result<&mut Self, Error> {
        fields::check_crc32(PaymentField::Crc32.key(), checksum)?;
        self.payment
            .set(PaymentField::Crc32, checksum.to_ascii_uppercase());
        Ok(self)
    }

    /// Asks the bank to notify the payee by phone number or e-mail address.
    pub fn set_notification(
        &mut self,
        channel: NotificationChannel,
        address: &str,
    ) -> Result<&mut Self, Error> {
        fields::check_len(PaymentField::NotificationAddress.key(), address, 320)?;
        self.payment.set(PaymentField::NotificationType, channel.code());
        self.payment.set(PaymentField::NotificationAddress, address);
        Ok(self)
    }

    /// Number of days a failed payment is retried, at most 30.
    pub fn set_retry_days(&mut self, days: u8) -> Result<&mut Self, Error> {
        if days > 30 {
            return Err(Error::FieldOutOfRange {
                field: PaymentField::RetryDays.key(),
                value: days.to_string(),
                allowed: "between 0 and 30",
            });
        }
        self.payment.set(PaymentField::RetryDays, days.to_string());
        Ok(self)
    }

    /// Payer side payment identifier (`X-ID`).
    pub fn set_payment_id(&mut self, id: &str) -> Result<&mut Self, Error> {
        fields::check_len(PaymentField::PaymentId.key(), id, 20)?;
        self.payment.set(PaymentField::PaymentId, id);
        Ok(self)
    }

    pub fn set_url(&mut self, url: &str) -> Result<&mut Self, Error> {
        fields::check_len(PaymentField::Url.key(), url, 140)?;
        self.payment.set(PaymentField::Url, url);
        Ok(self)
    }

    /// Caption for the rendered image.
    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    /// Encode the invoice alone, without payment data.
    pub fn set_only_invoice(&mut self, only_invoice: bool) -> &mut Self {
        self.only_invoice = only_invoice;
        self
    }

    /// Returns the text to be encoded in the QR code.
    ///
    /// The invoice part is only written once it has an ID and an issue date.
    /// In invoice-only mode without those the result is empty.
    pub fn qr_data(&self) -> String {
        let mut chunks = Vec::new();
        if !self.only_invoice {
            chunks.push(Self::PAYMENT_TAG.to_string());
            chunks.push(Self::VERSION.to_string());
            chunks.extend(self.payment.chunks());
        }
        if let Some(invoice) = self.invoice_chunks() {
            if self.only_invoice {
                chunks = invoice;
            } else {
                // The nested segment is one value, so its separators are escaped too.
                chunks.push(format!(
                    "{}:{}",
                    Self::INVOICE_KEY,
                    fields::escape(&invoice.join(Self::SEPARATOR))
                ));
            }
        }
        chunks.join(Self::SEPARATOR)
    }

    /// `SID`, version and the invoice fields, or `None` while the invoice is
    /// incomplete. Next to a payment, values repeating their payment
    /// counterpart are dropped.
    fn invoice_chunks(&self) -> Option<Vec<String>> {
        if !self.has_complete_invoice() {
            return None;
        }
        let mut chunks = vec![Self::INVOICE_TAG.to_string(), Self::VERSION.to_string()];
        chunks.extend(
            self.invoice
                .iter()
                .filter(|(field, value)| {
                    self.only_invoice
                        || field
                            .payment_counterpart()
                            .and_then(|counterpart| self.payment.get(counterpart))
                            != Some(*value)
                })
                .map(|(field, value)| format!("{field}:{}", fields::escape(value))),
        );
        Some(chunks)
    }

    fn has_complete_invoice(&self) -> bool {
        self.invoice.contains(InvoiceField::Id) && self.invoice.contains(InvoiceField::IssueDate)
    }
}

impl std::fmt::Display for QRPlatba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qr_data())
    }
}

/// Two decimals, full stop, no grouping.
fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn platba() -> QRPlatba {
        QRPlatba::create("12-3456789012/0100", Some(1234.56), Some("2016001234"))
            .expect("Hard-wired test payment should build")
    }

    #[rstest]
    fn empty_descriptor_has_default_currency() {
        assert_eq!(QRPlatba::new().to_string(), "SPD*1.0*CC:CZK");
    }

    #[rstest]
    #[case(0.0      , "0.00")]
    #[case(1234.56  , "1234.56")]
    #[case(2410.0   , "2410.00")]
    #[case(9999999.99, "9999999.99")]
    fn amounts_have_two_decimals(#[case] amount: f64, #[case] expected: &str) -> anyhow::Result<()> {
        let mut platba = QRPlatba::new();
        platba.set_amount(amount)?;
        assert_eq!(platba.payment_fields().get(PaymentField::Amount), Some(expected));
        assert_eq!(platba.invoice_fields().get(InvoiceField::Amount), Some(expected));
        Ok(())
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_amounts(#[case] amount: f64) {
        assert!(matches!(
            QRPlatba::new().set_amount(amount),
            Err(Error::FieldOutOfRange { field: "AM", .. })
        ));
    }

    #[rstest]
    fn rejects_amounts_wider_than_ten_characters() {
        assert!(matches!(
            QRPlatba::new().set_amount(12345678.9),
            Err(Error::FieldTooLong { field: "AM", max: 10, found: 11 })
        ));
    }

    #[rstest]
    fn unsupported_currency_keeps_previous(mut platba: QRPlatba) -> anyhow::Result<()> {
        platba.set_currency("EUR")?;
        assert!(matches!(platba.set_currency("FAKE"), Err(Error::UnsupportedCurrency(c)) if c == "FAKE"));
        assert_eq!(platba.payment_fields().get(PaymentField::Currency), Some("EUR"));
        Ok(())
    }

    #[rstest]
    #[case("GGP", true)]
    #[case("JEP", true)]
    #[case("VEF", true)]
    #[case("XXX", false)]
    #[case("XTS", false)]
    #[case("XAU", false)]
    #[case("eur", false)]
    fn currency_allow_list(#[case] code: &str, #[case] accepted: bool) {
        let mut platba = QRPlatba::new();
        assert_eq!(platba.set_currency(code).is_ok(), accepted);
        let expected = if accepted { code } else { DEFAULT_CURRENCY };
        assert_eq!(platba.payment_fields().get(PaymentField::Currency), Some(expected));
        assert_eq!(platba.invoice_fields().get(InvoiceField::Currency), Some(expected));
    }

    #[rstest]
    fn zero_amount_is_left_out() -> anyhow::Result<()> {
        let platba = QRPlatba::create("1234567987/0800", Some(0.0), None)?;
        assert_eq!(platba.to_string(), "SPD*1.0*ACC:CZ0708000000001234567987*CC:CZK");
        Ok(())
    }

    #[rstest]
    fn separators_in_values_are_escaped(mut platba: QRPlatba) -> anyhow::Result<()> {
        platba
            .set_message("Objednavka *42*")
            .set_invoice_id("A*B")?
            .set_invoice_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        let data = platba.qr_data();
        assert_eq!(
            data,
            "SPD*1.0*ACC:CZ0301000000123456789012*AM:1234.56*CC:CZK*MSG:Objednavka %2A42%2A\
             *X-VS:2016001234*X-INV:SID%2A1.0%2AID:A%252AB%2ADD:20240630"
        );
        // Only the separators between fields stay raw.
        assert_eq!(data.matches('*').count(), 7);

        platba.set_only_invoice(true);
        assert_eq!(
            platba.qr_data(),
            "SID*1.0*ID:A%2AB*DD:20240630*AM:1234.56*MSG:Objednavka %2A42%2A*VS:2016001234\
             *CC:CZK*ACC:CZ0301000000123456789012"
        );
        Ok(())
    }

    #[rstest]
    fn message_is_stripped_and_truncated() {
        let mut platba = QRPlatba::new();
        platba.set_message(&"Příliš žluťoučký kůň úpěl ďábelské ódy ".repeat(3));
        let payment = platba.payment_fields().get(PaymentField::Message).unwrap();
        let invoice = platba.invoice_fields().get(InvoiceField::Message).unwrap();
        assert_eq!(payment.chars().count(), 60);
        assert_eq!(invoice.chars().count(), 40);
        assert!(payment.starts_with("Prilis zlutoucky kun upel dabelske ody "));
        assert!(payment.is_ascii());
    }

    #[rstest]
    fn recipient_name_is_cut_to_35() {
        let mut platba = QRPlatba::new();
        platba.set_recipient_name("Šimon Čermák, Žlutá ulice 12, Česká Třebová, Česká republika");
        let name = platba.payment_fields().get(PaymentField::RecipientName).unwrap();
        assert_eq!(name, "Simon Cermak, Zluta ulice 12, Ceska");
    }

    type Setter = for<'a> fn(&'a mut QRPlatba, &str) -> Result<&'a mut QRPlatba, Error>;

    #[rstest]
    #[case::variable(QRPlatba::set_variable_symbol)]
    #[case::specific(QRPlatba::set_specific_symbol)]
    #[case::constant(QRPlatba::set_constant_symbol)]
    fn symbols_are_at_most_ten_characters(#[case] set: Setter) {
        let mut platba = QRPlatba::new();
        assert!(set(&mut platba, "0123456789").is_ok());
        assert!(matches!(
            set(&mut platba, "01234567890"),
            Err(Error::FieldTooLong { max: 10, found: 11, .. })
        ));
    }

    #[rstest]
    fn set_iban_refuses_account_numbers() {
        assert!(matches!(
            QRPlatba::new().set_iban("1234567987/0800"),
            Err(Error::InvalidIban { .. })
        ));
    }

    #[rstest]
    fn failed_account_leaves_descriptor_untouched(mut platba: QRPlatba) {
        let before = platba.clone();
        assert!(platba.set_account("12345679870800").is_err());
        assert!(platba.add_alternative_account("not an account").is_err());
        assert_eq!(platba, before);
    }

    #[rstest]
    fn alternative_accounts_are_limited_to_93_characters() -> anyhow::Result<()> {
        let mut platba = QRPlatba::new();
        for account in ["1/0100", "2/0100", "3/0100"] {
            platba.add_alternative_account(account)?;
        }
        assert!(matches!(
            platba.add_alternative_account("4/0100"),
            Err(Error::FieldTooLong { field: "ALT-ACC", max: 93, found: 99 })
        ));
        Ok(())
    }

    #[rstest]
    fn optional_payment_fields() -> anyhow::Result<()> {
        let mut platba = QRPlatba::new();
        platba
            .set_payment_reference("1234567890123456")?
            .set_payment_type("IP")?
            .set_crc32("1234abcd")?
            .set_notification(NotificationChannel::Email, "platby@example.cz")?
            .set_retry_days(7)?
            .set_payment_id("ABC-1")?
            .set_url("https://example.cz/platba")?;
        assert_eq!(
            platba.to_string(),
            "SPD*1.0*CC:CZK*RF:1234567890123456*PT:IP*CRC32:1234ABCD*NT:E*NTA:platby@example.cz\
             *X-PER:7*X-ID:ABC-1*X-URL:https://example.cz/platba"
        );
        Ok(())
    }

    #[rstest]
    #[case::reference_letters(QRPlatba::new().set_payment_reference("12AB").map(drop))]
    #[case::reference_length(QRPlatba::new().set_payment_reference("12345678901234567").map(drop))]
    #[case::crc_length(QRPlatba::new().set_crc32("123").map(drop))]
    #[case::crc_hex(QRPlatba::new().set_crc32("1234567G").map(drop))]
    #[case::retry(QRPlatba::new().set_retry_days(31).map(drop))]
    #[case::payment_type(QRPlatba::new().set_payment_type("ABCD").map(drop))]
    fn rejects_invalid_optional_fields(#[case] result: Result<(), Error>) {
        assert!(result.is_err());
    }

    #[rstest]
    fn serialization_is_repeatable(mut platba: QRPlatba) {
        platba.set_message("Předplatné FlixNet");
        assert_eq!(platba.qr_data(), platba.qr_data());
        assert_eq!(platba.to_string(), platba.qr_data());
    }
}
