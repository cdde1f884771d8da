//! Required-field checks for notice requests.
//!
//! Every missing field is collected so the clerk sees all of them at once.

use std::fmt;

/// A required field left blank.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Ok` when nothing was recorded, otherwise a numbered list of the
    /// missing fields under a one-line header.
    pub fn into_result(self) -> Result<(), String> {
        if self.0.is_empty() {
            return Ok(());
        }
        let header = format!(
            "Atención: {} dato(s) requerido(s) faltante(s)",
            self.0.len()
        );
        let lines = self
            .0
            .iter()
            .enumerate()
            .map(|(i, error)| format!("{}. {}", i + 1, error));
        Err(std::iter::once(header)
            .chain(lines)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Record `field` as missing when `value` is blank after trimming.
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.0.push(ValidationError {
            field: field.to_string(),
            message: format!("{} no puede estar vacío", label),
        });
    }
}
