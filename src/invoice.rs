//! Setters for the *QR Faktura* (`SID`) invoice fields.
//!
//! The invoice is encoded once it has an ID ([`QRPlatba::set_invoice_id`])
//! and an issue date ([`QRPlatba::set_invoice_date`]).

use chrono::NaiveDate;
use deunicode::deunicode;

use crate::{
    fields::{self, InvoiceField},
    format_amount, format_date, truncate, Error, QRPlatba,
};

/// Longest rendering of any invoice amount or rate.
const MAX_AMOUNT_LEN: usize = 18;

impl QRPlatba {
    /// Invoice number, at most 40 characters.
    pub fn set_invoice_id(&mut self, id: &str) -> Result<&mut Self, Error> {
        self.set_invoice_text(InvoiceField::Id, id, 40)
    }

    /// Issue date of the invoice.
    pub fn set_invoice_date(&mut self, date: NaiveDate) -> &mut Self {
        self.invoice.set(InvoiceField::IssueDate, format_date(date));
        self
    }

    /// Kind of taxable supply: 0 regular, 1 reverse charge, 2 mixed.
    pub fn set_tax_performance(&mut self, kind: u8) -> Result<&mut Self, Error> {
        if kind > 2 {
            return Err(Error::FieldOutOfRange {
                field: InvoiceField::TaxPerformance.key(),
                value: kind.to_string(),
                allowed: "0, 1 or 2",
            });
        }
        self.invoice.set(InvoiceField::TaxPerformance, kind.to_string());
        Ok(self)
    }

    /// Type of document:
    ///
    /// * 0 non-tax document
    /// * 1 corrective tax document
    /// * 2 document for a received payment
    /// * 3 instalment calendar
    /// * 4 payment calendar
    /// * 5 summary tax document
    /// * 9 any other tax document
    pub fn set_invoice_document_type(&mut self, kind: u8) -> Result<&mut Self, Error> {
        if !matches!(kind, 0..=5 | 9) {
            return Err(Error::FieldOutOfRange {
                field: InvoiceField::DocumentType.key(),
                value: kind.to_string(),
                allowed: "0 to 5 or 9",
            });
        }
        self.invoice.set(InvoiceField::DocumentType, kind.to_string());
        Ok(self)
    }

    /// Whether the invoice settles previously paid deposits.
    pub fn set_invoice_including_deposit(&mut self, including_deposit: bool) -> &mut Self {
        let flag = if including_deposit { "1" } else { "0" };
        self.invoice.set(InvoiceField::IncludesDeposit, flag);
        self
    }

    /// Document this invoice follows up on, e.g. an order number.
    pub fn set_invoice_related_id(&mut self, id: &str) -> Result<&mut Self, Error> {
        self.set_invoice_text(InvoiceField::RelatedId, id, 20)
    }

    /// VAT ID (DIČ) of the issuer.
    pub fn set_company_tax_id(&mut self, id: &str) -> Result<&mut Self, Error> {
        self.set_invoice_text(InvoiceField::IssuerTaxId, id, 14)
    }

    /// Registration number (IČO) of the issuer.
    pub fn set_company_registration_id(&mut self, id: &str) -> Result<&mut Self, Error> {
        self.set_invoice_text(InvoiceField::IssuerRegistrationId, id, 8)
    }

    /// VAT ID (DIČ) of the customer.
    pub fn set_invoice_subject_tax_id(&mut self, id: &str) -> Result<&mut Self, Error> {
        self.set_invoice_text(InvoiceField::RecipientTaxId, id, 14)
    }

    /// Registration number (IČO) of the customer.
    pub fn set_invoice_subject_registration_id(&mut self, id: &str) -> Result<&mut Self, Error> {
        self.set_invoice_text(InvoiceField::RecipientRegistrationId, id, 8)
    }

    /// Date of the taxable supply (DUZP).
    pub fn set_tax_date(&mut self, date: NaiveDate) -> &mut Self {
        self.invoice.set(InvoiceField::TaxDate, format_date(date));
        self
    }

    /// Date on which the tax becomes reportable (DPPD).
    pub fn set_tax_report_date(&mut self, date: NaiveDate) -> &mut Self {
        self.invoice.set(InvoiceField::TaxReportDate, format_date(date));
        self
    }

    /// Tax base at VAT level 0 (standard rate), 1 or 2 (reduced rates).
    pub fn set_tax_base(&mut self, amount: f64, level: u8) -> Result<&mut Self, Error> {
        let field = InvoiceField::tax_base(level)?;
        self.set_invoice_amount(field, amount)
    }

    /// Tax at VAT level 0 (standard rate), 1 or 2 (reduced rates).
    pub fn set_tax_amount(&mut self, amount: f64, level: u8) -> Result<&mut Self, Error> {
        let field = InvoiceField::tax(level)?;
        self.set_invoice_amount(field, amount)
    }

    /// Amount exempt from VAT.
    pub fn set_no_tax_amount(&mut self, amount: f64) -> Result<&mut Self, Error> {
        self.set_invoice_amount(InvoiceField::NoTaxBase, amount)
    }

    /// Exchange rate between the invoice currency and CZK.
    pub fn set_exchange_rate(&mut self, rate: f64) -> Result<&mut Self, Error> {
        let field = InvoiceField::ExchangeRate;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::FieldOutOfRange {
                field: field.key(),
                value: rate.to_string(),
                allowed: "a finite, positive number",
            });
        }
        let rate = format!("{:.3}", rate);
        fields::check_len(field.key(), &rate, MAX_AMOUNT_LEN)?;
        self.invoice.set(field, rate);
        Ok(self)
    }

    /// Number of foreign currency units the exchange rate refers to.
    pub fn set_foreign_currency_units(&mut self, units: u32) -> Result<&mut Self, Error> {
        if !(1..=99_999).contains(&units) {
            return Err(Error::FieldOutOfRange {
                field: InvoiceField::ExchangeUnits.key(),
                value: units.to_string(),
                allowed: "between 1 and 99999",
            });
        }
        self.invoice.set(InvoiceField::ExchangeUnits, units.to_string());
        Ok(self)
    }

    pub fn set_invoice_crc32(&mut self, checksum: &str) -> Result<&mut Self, Error> {
        fields::check_crc32(InvoiceField::Crc32.key(), checksum)?;
        self.invoice
            .set(InvoiceField::Crc32, checksum.to_ascii_uppercase());
        Ok(self)
    }

    /// Software that issued the invoice. Diacritics are removed and the text
    /// is cut to 30 characters.
    pub fn set_tax_software(&mut self, software: &str) -> &mut Self {
        self.invoice
            .set(InvoiceField::Software, truncate(&deunicode(software), 30));
        self
    }

    pub fn set_invoice_url(&mut self, url: &str) -> Result<&mut Self, Error> {
        self.set_invoice_text(InvoiceField::Url, url, 70)
    }

    fn set_invoice_text(
        &mut self,
        field: InvoiceField,
        value: &str,
        max: usize,
    ) -> Result<&mut Self, Error> {
        fields::check_len(field.key(), value, max)?;
        self.invoice.set(field, value);
        Ok(self)
    }

    fn set_invoice_amount(&mut self, field: InvoiceField, amount: f64) -> Result<&mut Self, Error> {
        if !amount.is_finite() {
            return Err(Error::FieldOutOfRange {
                field: field.key(),
                value: amount.to_string(),
                allowed: "a finite number",
            });
        }
        let amount = format_amount(amount);
        fields::check_len(field.key(), &amount, MAX_AMOUNT_LEN)?;
        self.invoice.set(field, amount);
        Ok(self)
    }
}
