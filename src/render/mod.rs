//! Turning a descriptor into an image of its QR code.
//!
//! The SVG produced by [`QRPlatba::create_svg`] is the master; PNG and PDF are
//! converted from it.

use std::{path::Path, str::FromStr};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use resvg::{tiny_skia, usvg};

use crate::{Error, QRPlatba};

pub mod qr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
    /// A PNG inlined as `data:image/png;base64,…`.
    DataUri,
}

impl OutputFormat {
    /// Picks the format for a file extension (`svg`, `png` or `pdf`).
    pub fn from_extension(extension: &str) -> Result<Self, Error> {
        match extension.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            _ => Err(Error::UnsupportedOutput(extension.into())),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedOutput(path.display().to_string()))?;
        Self::from_extension(extension)
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
            // The payload carried by the URI.
            Self::DataUri => "image/png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("data-uri") {
            return Ok(Self::DataUri);
        }
        Self::from_extension(s)
    }
}

/// Size settings of the rendered image, in pixels (SVG user units).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Edge length of the QR symbol itself.
    pub size: u32,
    /// White border around the symbol.
    pub margin: u32,
    pub label_font_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 300,
            margin: 10,
            label_font_size: 16,
        }
    }
}

/// An encoded image of a descriptor's QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    format: OutputFormat,
    data: Vec<u8>,
}

impl QrImage {
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The image as text, for the SVG and data-URI formats.
    pub fn as_text(&self) -> Option<&str> {
        match self.format {
            OutputFormat::Svg | OutputFormat::DataUri => std::str::from_utf8(&self.data).ok(),
            OutputFormat::Png | OutputFormat::Pdf => None,
        }
    }
}

impl QRPlatba {
    /// Renders the QR code in the requested format.
    pub fn qr_image(&self, format: OutputFormat, options: &RenderOptions) -> Result<QrImage, Error> {
        tracing::debug!(?format, size = options.size, margin = options.margin, "rendering QR code");
        let data = match format {
            OutputFormat::Svg => self.create_svg(options)?.into_bytes(),
            OutputFormat::Png => self.create_png(options)?,
            OutputFormat::Pdf => self.create_pdf(options)?,
            OutputFormat::DataUri => self.data_uri(options)?.into_bytes(),
        };
        Ok(QrImage { format, data })
    }

    /// Returns the PNG encoded QR code.
    pub fn create_png(&self, options: &RenderOptions) -> Result<Vec<u8>, Error> {
        rasterize(&self.create_svg(options)?, self.label.is_some())
    }

    /// Returns the QR code as a one page PDF.
    pub fn create_pdf(&self, options: &RenderOptions) -> Result<Vec<u8>, Error> {
        let svg = self.create_svg(options)?;
        let mut usvg_options = svg2pdf::usvg::Options::default();
        // Only the label needs fonts.
        if self.label.is_some() {
            usvg_options.fontdb_mut().load_system_fonts();
        }
        let tree = svg2pdf::usvg::Tree::from_str(&svg, &usvg_options)?;
        Ok(svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), svg2pdf::PageOptions::default()))
    }

    /// Returns the PNG QR code as a `data:` URI.
    pub fn data_uri(&self, options: &RenderOptions) -> Result<String, Error> {
        let png = self.create_png(options)?;
        Ok(format!("data:{};base64,{}", OutputFormat::DataUri.mime_type(), STANDARD.encode(png)))
    }

    /// Returns an HTML `<img>` tag showing the QR code.
    pub fn html_img_tag(&self, options: &RenderOptions) -> Result<String, Error> {
        Ok(format!("<img src=\"{}\" alt=\"QR Platba\">", self.data_uri(options)?))
    }

    /// Writes the QR code into a file.
    ///
    /// * `format`: Defaults to the one matching the extension of `path`.
    pub fn save_qr_code_image(
        &self,
        path: impl AsRef<Path>,
        format: Option<OutputFormat>,
        options: &RenderOptions,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let format = match format {
            Some(format) => format,
            None => OutputFormat::from_path(path)?,
        };
        let image = self.qr_image(format, options)?;
        std::fs::write(path, image.as_bytes())?;
        tracing::debug!(path = %path.display(), ?format, "saved QR code");
        Ok(())
    }
}

/// Renders an SVG document into PNG bytes.
fn rasterize(svg: &str, load_fonts: bool) -> Result<Vec<u8>, Error> {
    let mut usvg_options = usvg::Options::default();
    if load_fonts {
        usvg_options.fontdb_mut().load_system_fonts();
    }
    let tree = usvg::Tree::from_str(svg, &usvg_options)?;
    let size = tree.size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width().ceil() as u32, size.height().ceil() as u32)
        .ok_or_else(|| Error::Raster("cannot allocate the image".into()))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|e| Error::Raster(e.to_string()))
}
