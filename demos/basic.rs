use chrono::NaiveDate;
use qrplatba::{QRPlatba, RenderOptions};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Shows how the account was read unless `RUST_LOG` says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "qrplatba=debug".into()))
        .init();

    let mut platba = QRPlatba::create("12-3456789012/0100", Some(1234.56), Some("2016001234"))?;
    platba
        .set_message("Platba za zboží")
        .set_due_date(NaiveDate::parse_from_str("2032.10.25", "%Y.%m.%d")?)
        .set_constant_symbol("0308")?
        .set_invoice_id("FAKT2032001")?
        .set_invoice_date(NaiveDate::parse_from_str("2032.10.11", "%Y.%m.%d")?)
        .set_label("QR Platba+F");

    println!("{platba}");

    let options = RenderOptions::default();
    platba.save_qr_code_image("qr_platba.svg", None, &options)?;
    platba.save_qr_code_image("qr_platba.png", None, &options)?;

    Ok(())
}
