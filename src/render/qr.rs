use lazy_static::lazy_static;
use qrcode::{EcLevel, QrCode};
use regex::Regex;
use svg::{
    node::element::{Path, Rectangle, Text},
    Document,
};

use crate::{render::RenderOptions, Error, QRPlatba};

lazy_static! {
    static ref PATH_DATA: Regex =
        Regex::new(r#"<path [^>]*\bd="([^"]*)""#).expect("This is a bug. Please report it.");
}

const FONT_FAMILY: &str = "Arial, Helvetica, Liberation Sans, sans-serif";
/// Rough advance of one character relative to the font size.
const CHAR_WIDTH_EM: f64 = 0.55;
const LINE_SPACING_EM: f64 = 1.25;

impl QRPlatba {
    /// Encodes [`QRPlatba::qr_data`] into a QR symbol with error correction
    /// level M.
    pub fn qr_code(&self) -> Result<QrCode, Error> {
        let data = self.qr_data();
        if data.is_empty() {
            return Err(Error::IncompleteInvoice);
        }
        Ok(QrCode::with_error_correction_level(data, EcLevel::M)?)
    }

    /// Returns a string containing the SVG of the QR code, with the label
    /// underneath when one is set.
    pub fn create_svg(&self, options: &RenderOptions) -> Result<String, Error> {
        let code = self.qr_code()?;
        let size = f64::from(options.size);
        let margin = f64::from(options.margin);
        let font_size = f64::from(options.label_font_size);
        let line_height = font_size * LINE_SPACING_EM;

        let width = size + 2.0 * margin;
        let lines = self.label_lines(width, font_size);
        let height = width + lines.len() as f64 * line_height;

        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"));

        // White background.
        let mut document = document.add(
            Rectangle::new()
                .set("x", 0.0)
                .set("y", 0.0)
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", "white"),
        );

        let scale = size / code.width() as f64;
        document = document.add(
            Path::new()
                .set("d", modules_path(&code))
                .set("fill", "black")
                .set("shape-rendering", "crispEdges")
                .set(
                    "transform",
                    format!("translate({margin}, {margin}) scale({scale})"),
                ),
        );

        for (i, line) in lines.into_iter().enumerate() {
            let y = margin + size + (i as f64 + 1.0) * line_height;
            document = document.add(
                Text::new("")
                    .add(svg::node::Text::new(line))
                    .set("x", width / 2.0)
                    .set("y", y)
                    .set("text-anchor", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", font_size),
            );
        }

        Ok(document.to_string())
    }

    /// The label wrapped to the width of the image.
    fn label_lines(&self, width: f64, font_size: f64) -> Vec<String> {
        let Some(label) = self.label.as_deref() else {
            return Vec::new();
        };
        let max_chars = ((width / (font_size * CHAR_WIDTH_EM)) as usize).max(1);
        textwrap::wrap(label, max_chars)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }
}

/// Path data of the dark modules, one unit per module, taken from the
/// symbol rendered by `qrcode` without quiet zone.
fn modules_path(code: &QrCode) -> String {
    let image = code
        .render()
        .dark_color(qrcode::render::svg::Color("black"))
        .light_color(qrcode::render::svg::Color("white"))
        .module_dimensions(1, 1)
        .quiet_zone(false)
        .build();
    let data = PATH_DATA
        .captures(&image)
        .expect("This is a bug. Please report it.");
    data[1].to_string()
}
