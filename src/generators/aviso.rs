//! Generator for the "Aviso de Estatus de Trámite" notice.
//!
//! One call to `generate` runs the whole pipeline: validate the request, look
//! the motivo up, compose the payload, encode it into a scratch QR image,
//! render the PDF and drop the scratch file.

use std::path::PathBuf;

use chrono::NaiveDate;

use super::common::today;
use super::engine::PdfRenderEngine;
use super::notice::compose_notice;
use super::qr::QrEncoder;
use super::traits::{Generator, Validator};
use super::{GeneratedNotice, NoticeError};
use crate::reasons::ReasonStore;

const SCRATCH_PREFIX: &str = "aviso-qr-";

/// Request to generate one notice.
#[derive(Debug, Default, Clone)]
pub struct AvisoRequest {
    /// Client name as typed by the clerk.
    pub cliente: String,
    /// Title of the selected motivo.
    pub motivo: String,
    pub fecha: Option<NaiveDate>,
}

impl AvisoRequest {
    pub fn new(cliente: impl Into<String>, motivo: impl Into<String>) -> Self {
        Self {
            cliente: cliente.into(),
            motivo: motivo.into(),
            fecha: None,
        }
    }

    pub fn with_fecha(mut self, fecha: NaiveDate) -> Self {
        self.fecha = Some(fecha);
        self
    }
}

impl Validator for AvisoRequest {
    fn validate(&self) -> Result<(), String> {
        use super::validation::*;

        let mut errors = ValidationErrors::new();
        validate_required(&self.cliente, "cliente", "El nombre del cliente", &mut errors);
        validate_required(&self.motivo, "motivo", "El motivo", &mut errors);
        errors.into_result()
    }
}

/// Orchestrates notice generation against a motivo store and output folder.
pub struct AvisoGenerator {
    store: ReasonStore,
    output_dir: PathBuf,
    engine: PdfRenderEngine,
    scratch_dir: Option<PathBuf>,
}

impl AvisoGenerator {
    pub fn new(store: ReasonStore, output_dir: impl Into<PathBuf>, engine: PdfRenderEngine) -> Self {
        Self {
            store,
            output_dir: output_dir.into(),
            engine,
            scratch_dir: None,
        }
    }

    /// Put the scratch QR image in `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    fn run(&self, request: &AvisoRequest) -> Result<GeneratedNotice, NoticeError> {
        Validator::validate(request).map_err(NoticeError::Validation)?;

        let cliente = request.cliente.trim();
        let motivo = request.motivo.trim();
        let fecha = request.fecha.unwrap_or_else(today);

        let reason = self
            .store
            .find(motivo)?
            .ok_or_else(|| NoticeError::UnknownReason(motivo.to_string()))?;

        let payload = compose_notice(cliente, &reason.title, &reason.detail, fecha);
        let qr = QrEncoder::encode(&payload)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX).suffix(".png");
        let mut scratch = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(NoticeError::TempFile)?;
        QrEncoder::write_png(&qr, scratch.as_file_mut())?;

        let rendered = self
            .engine
            .render(cliente, scratch.path(), &self.output_dir, Some(fecha));

        if let Err(e) = scratch.close() {
            log::debug!("Could not delete scratch QR image: {}", e);
        }

        let mut notice = rendered?;
        notice.qr_version = qr.version;
        log::info!(
            "Generated notice '{}' for motivo '{}' (QR version {:?})",
            notice.filename,
            reason.title,
            notice.qr_version
        );
        Ok(notice)
    }
}

impl Generator<AvisoRequest> for AvisoGenerator {
    fn generate(&self, request: AvisoRequest) -> Result<GeneratedNotice, NoticeError> {
        self.run(&request)
    }
}

impl AvisoGenerator {
    /// Generate the notice for `cliente` with the motivo titled `motivo`.
    pub fn generate(&self, cliente: &str, motivo: &str) -> Result<GeneratedNotice, NoticeError> {
        self.run(&AvisoRequest::new(cliente, motivo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation_lists_both_fields() {
        let err = Validator::validate(&AvisoRequest::new(" ", "")).unwrap_err();
        assert!(err.contains("2 dato(s)"));
        assert!(err.contains("[cliente]"));
        assert!(err.contains("[motivo]"));
    }
}
