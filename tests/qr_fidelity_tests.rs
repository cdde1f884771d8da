use avisos_credito::generators::notice::compose_notice;
use avisos_credito::generators::QrEncoder;
use chrono::NaiveDate;
use image::GrayImage;

fn decode(image: &GrayImage) -> String {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| image.get_pixel(x as u32, y as u32)[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR symbol");
    let (_meta, content) = grids[0].decode().unwrap();
    content
}

#[test]
fn test_short_ascii_payload_round_trips() {
    let qr = QrEncoder::encode("Hola").unwrap();
    assert_eq!(decode(&qr.image), "Hola");
}

#[test]
fn test_long_unicode_payload_round_trips() {
    let unit = "Trámite pendiente: ñandú, acción & «señal» ✓ 123. ";
    let payload: String = unit.chars().cycle().take(500).collect();
    assert_eq!(payload.chars().count(), 500);

    let qr = QrEncoder::encode(&payload).unwrap();
    assert_eq!(decode(&qr.image), payload);
}

#[test]
fn test_notice_payload_round_trips() {
    let fecha = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let payload = compose_notice(
        "María José Núñez",
        "Documentos ilegibles",
        "Los archivos cargados presentan baja resolución.\nFavor de escanear nuevamente.",
        fecha,
    );

    let qr = QrEncoder::encode(&payload).unwrap();
    let decoded = decode(&qr.image);
    assert_eq!(decoded, payload);
    assert!(decoded.contains("ESTIMADO(A): MARÍA JOSÉ NÚÑEZ"));
}
