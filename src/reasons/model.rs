use serde::{Deserialize, Serialize};

/// A predefined motivo a clerk can attach to a notice.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Reason {
    #[serde(rename = "titulo")]
    pub title: String,
    /// Text revealed when the QR code is scanned.
    #[serde(rename = "detalle")]
    pub detail: String,
}

impl Reason {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Reasons written on first run.
pub fn seed_reasons() -> Vec<Reason> {
    vec![
        Reason::new(
            "Firma no coincide",
            "La firma registrada en la documentación no coincide con nuestros registros. \
             Es necesario acudir a sucursal para actualizar su tarjeta de firmas.",
        ),
        Reason::new(
            "Documentos ilegibles",
            "Los archivos cargados presentan baja resolución. Favor de escanear nuevamente \
             el INE y el Comprobante de Domicilio en formato PDF de alta calidad.",
        ),
    ]
}
