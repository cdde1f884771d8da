//! Notice payload composition.
//!
//! The text produced here is exactly what a phone reveals after scanning the
//! QR code on the printed notice, so the template is fixed line by line.

use chrono::NaiveDate;

use super::common::format_fecha;

const RULE: &str = "------------------------------";

/// Build the notice text for a client and a motivo.
///
/// The client name and the motivo title are upper-cased; the detail is
/// copied verbatim with no escaping or length limit.
pub fn compose_notice(
    client_name: &str,
    reason_title: &str,
    reason_detail: &str,
    today: NaiveDate,
) -> String {
    format!(
        "NOTIFICACIÓN DE ESTATUS\n\
         Fecha: {fecha}\n\
         {RULE}\n\
         \n\
         ESTIMADO(A): {cliente}\n\
         \n\
         Le informamos que su trámite requiere atención.\n\
         \n\
         MOTIVO:\n\
         [{motivo}]\n\
         \n\
         DETALLE Y PASOS A SEGUIR:\n\
         {detalle}\n\
         \n\
         {RULE}\n\
         Departamento de Créditos\n\
         Favor de no responder a este mensaje automático.",
        fecha = format_fecha(today),
        cliente = client_name.to_uppercase(),
        motivo = reason_title.to_uppercase(),
        detalle = reason_detail,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()
    }

    #[test]
    fn test_template_layout() {
        let text = compose_notice("Ana Ruiz", "Firma no coincide", "Acuda a sucursal.", fecha());
        let expected = "NOTIFICACIÓN DE ESTATUS\n\
                        Fecha: 09/01/2026\n\
                        ------------------------------\n\
                        \n\
                        ESTIMADO(A): ANA RUIZ\n\
                        \n\
                        Le informamos que su trámite requiere atención.\n\
                        \n\
                        MOTIVO:\n\
                        [FIRMA NO COINCIDE]\n\
                        \n\
                        DETALLE Y PASOS A SEGUIR:\n\
                        Acuda a sucursal.\n\
                        \n\
                        ------------------------------\n\
                        Departamento de Créditos\n\
                        Favor de no responder a este mensaje automático.";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_detail_is_verbatim() {
        let detail = "Paso 1: traer INE.\n  Paso 2: firmar \"aquí\" {sin} [escape]";
        let text = compose_notice("josé", "documentos ilegibles", detail, fecha());
        assert!(text.contains(detail));
        assert!(text.contains("ESTIMADO(A): JOSÉ"));
        assert!(text.contains("[DOCUMENTOS ILEGIBLES]"));
    }
}
