//! QR code encoding of the notice payload.

use std::io::{Seek, Write};

use image::{imageops, DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode, Version};

use super::NoticeError;

/// Pixels per QR module.
pub const BOX_SIZE: u32 = 8;
/// Quiet zone around the symbol, in modules.
pub const BORDER: u32 = 2;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// A rendered QR symbol together with the version the encoder picked.
#[derive(Debug, Clone)]
pub struct QrImage {
    pub image: GrayImage,
    pub version: Option<i16>,
}

/// Stateless QR encoder with medium error correction.
pub struct QrEncoder;

impl QrEncoder {
    /// Encode a text payload into a black-on-white bitmap.
    ///
    /// The smallest version that holds the UTF-8 bytes is chosen. A payload
    /// larger than a version 40 symbol fails with `NoticeError::Encoding`.
    pub fn encode(text: &str) -> Result<QrImage, NoticeError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)
            .map_err(NoticeError::Encoding)?;

        let version = match code.version() {
            Version::Normal(v) => Some(v),
            Version::Micro(_) => None,
        };
        log::debug!(
            "Encoded {} byte payload as QR version {:?}",
            text.len(),
            version
        );

        Ok(QrImage {
            image: rasterize(&code),
            version,
        })
    }

    /// Write the bitmap as PNG.
    pub fn write_png<W: Write + Seek>(qr: &QrImage, writer: &mut W) -> Result<(), NoticeError> {
        DynamicImage::ImageLuma8(qr.image.clone())
            .write_to(writer, ImageFormat::Png)
            .map_err(NoticeError::WriteQr)
    }
}

/// Render the symbol without its built-in quiet zone and frame it with a
/// `BORDER`-module white margin.
fn rasterize(code: &QrCode) -> GrayImage {
    let symbol = code
        .render::<Luma<u8>>()
        .dark_color(DARK)
        .light_color(LIGHT)
        .quiet_zone(false)
        .module_dimensions(BOX_SIZE, BOX_SIZE)
        .build();

    let margin = BORDER * BOX_SIZE;
    let mut framed = GrayImage::from_pixel(
        symbol.width() + 2 * margin,
        symbol.height() + 2 * margin,
        LIGHT,
    );
    imageops::overlay(&mut framed, &symbol, margin as i64, margin as i64);
    framed
}
