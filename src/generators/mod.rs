//! Generators module - business logic for turning a motivo into a printable notice.
//!
//! The pipeline is split the same way for every notice:
//! - `notice` - composes the QR payload text
//! - `qr` - encodes the payload into a bitmap
//! - `engine` - lays out the single-page PDF
//! - `aviso` - orchestrates one "generate" action end to end

pub mod aviso;
pub mod common;
pub mod engine;
pub mod fonts;
pub mod notice;
pub mod qr;
pub mod traits;
pub mod validation;

pub use aviso::{AvisoGenerator, AvisoRequest};
pub use engine::PdfRenderEngine;
pub use notice::compose_notice;
pub use qr::QrEncoder;
pub use traits::{Generator, Validator};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while managing motivos or generating a notice.
#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("{0}")]
    Validation(String),
    #[error("motivo desconocido: '{0}'")]
    UnknownReason(String),
    #[error("el contenido no cabe en un código QR: {0}")]
    Encoding(#[source] qrcode::types::QrError),
    #[error("failed to read motivos file: {0}")]
    ReadReasons(#[source] std::io::Error),
    #[error("failed to write motivos file: {0}")]
    WriteReasons(#[source] std::io::Error),
    #[error("failed to serialize motivos: {0}")]
    SerializeReasons(#[source] serde_json::Error),
    #[error("failed to create scratch QR file: {0}")]
    TempFile(#[source] std::io::Error),
    #[error("failed to write scratch QR image: {0}")]
    WriteQr(#[source] image::ImageError),
    #[error("failed to create output directory: {0}")]
    OutputDir(#[source] std::io::Error),
    #[error("failed to assemble PDF: {0}")]
    Pdf(String),
    #[error("failed to write generated PDF: {0}")]
    WritePdf(#[source] std::io::Error),
    #[error("QR image could not be drawn: {0}")]
    RenderDegraded(String),
}

impl NoticeError {
    /// Taxonomy tag shown to the clerk next to the message.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::UnknownReason(_) => "LookupError",
            Self::Encoding(_) => "EncodingError",
            Self::RenderDegraded(_) => "RenderDegraded",
            Self::ReadReasons(_)
            | Self::WriteReasons(_)
            | Self::SerializeReasons(_)
            | Self::TempFile(_)
            | Self::WriteQr(_)
            | Self::OutputDir(_)
            | Self::Pdf(_)
            | Self::WritePdf(_) => "IOError",
        }
    }
}

/// Result of a successful notice generation.
#[derive(Debug)]
pub struct GeneratedNotice {
    pub filename: String,
    /// Absolute path of the written PDF.
    pub path: PathBuf,
    pub fecha: String,
    /// QR symbol version picked for the payload (1-40).
    pub qr_version: Option<i16>,
    /// Set when the QR image could not be placed on the page.
    pub degraded: Option<NoticeError>,
}

impl GeneratedNotice {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            NoticeError::Validation("x".into()).category(),
            "ValidationError"
        );
        assert_eq!(
            NoticeError::UnknownReason("x".into()).category(),
            "LookupError"
        );
        assert_eq!(
            NoticeError::Encoding(qrcode::types::QrError::DataTooLong).category(),
            "EncodingError"
        );
        assert_eq!(NoticeError::Pdf("x".into()).category(), "IOError");
        assert_eq!(
            NoticeError::RenderDegraded("x".into()).category(),
            "RenderDegraded"
        );
    }

    #[test]
    fn test_unknown_reason_message() {
        let err = NoticeError::UnknownReason("Nada".to_string());
        assert!(err.to_string().contains("Nada"));
    }
}
