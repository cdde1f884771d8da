//! PDF rendering engine.
//!
//! Lays out the single US-letter page of a notice with `lopdf` content
//! operators: header bar, recipient block, wrapped body paragraph, the
//! "DETALLE DIGITAL" panel holding the QR image and the footer bar.
//! Coordinates are PDF user space, origin at the bottom-left corner.
//!
//! There is no pagination. The layout assumes everything fits on one page.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::common::{format_fecha, notice_filename, today};
use super::fonts::{string_width, win_ansi_bytes, wrap_text, Font};
use super::{GeneratedNotice, NoticeError};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN_X: f32 = 60.0;
pub const PRINTABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;

pub const BODY_FONT: Font = Font::Helvetica;
pub const BODY_SIZE: f32 = 11.0;
const BODY_LEADING: f32 = 18.0;

pub const DEFAULT_CIUDAD: &str = "Ciudad de México";

pub const TITLE: &str = "AVISO DE ESTATUS DE TRÁMITE";
pub const BODY_TEXT: &str = "Por medio de la presente le informamos sobre el estatus de su solicitud. \
     Escanee el código QR adjunto para ver el desglose detallado y las \
     recomendaciones para continuar con su trámite.";
pub const FOOTER_TEXT: &str =
    "Este documento es informativo y de uso interno del área de créditos.";

const PANEL_WIDTH: f32 = 180.0;
const PANEL_HEIGHT: f32 = 200.0;
const PANEL_RADIUS: f32 = 10.0;
const QR_SIZE: f32 = 130.0;
const QR_XOBJECT: &str = "Im1";

#[derive(Debug, Clone, Copy)]
struct Rgb(u8, u8, u8);

impl Rgb {
    fn operands(self) -> Vec<Object> {
        [self.0, self.1, self.2]
            .iter()
            .map(|c| (*c as f32 / 255.0).into())
            .collect()
    }
}

const PRIMARY: Rgb = Rgb(0x1a, 0x23, 0x7e);
const TEXT: Rgb = Rgb(0x33, 0x33, 0x33);
const PANEL: Rgb = Rgb(0xf5, 0xf5, 0xf5);
const CAPTION: Rgb = Rgb(0x66, 0x66, 0x66);
const FOOTER: Rgb = Rgb(0x88, 0x88, 0x88);
const BLACK: Rgb = Rgb(0, 0, 0);

/// Lines of the informational paragraph as they are laid out on the page.
pub fn body_lines() -> Vec<String> {
    wrap_text(BODY_TEXT, BODY_FONT, BODY_SIZE, PRINTABLE_WIDTH)
}

/// Accumulates content-stream operations for one page.
#[derive(Default)]
struct PageCanvas {
    operations: Vec<Operation>,
}

impl PageCanvas {
    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn fill_color(&mut self, color: Rgb) {
        self.op("rg", color.operands());
    }

    fn stroke_color(&mut self, color: Rgb) {
        self.op("RG", color.operands());
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.op("re", vec![x.into(), y.into(), width.into(), height.into()]);
        self.op("f", vec![]);
    }

    fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32) {
        // Bezier approximation of a quarter circle.
        let k = 0.5523 * radius;
        let (right, top) = (x + width, y + height);

        self.op("m", vec![(x + radius).into(), y.into()]);
        self.op("l", vec![(right - radius).into(), y.into()]);
        self.curve(
            (right - radius + k, y),
            (right, y + radius - k),
            (right, y + radius),
        );
        self.op("l", vec![right.into(), (top - radius).into()]);
        self.curve(
            (right, top - radius + k),
            (right - radius + k, top),
            (right - radius, top),
        );
        self.op("l", vec![(x + radius).into(), top.into()]);
        self.curve((x + radius - k, top), (x, top - radius + k), (x, top - radius));
        self.op("l", vec![x.into(), (y + radius).into()]);
        self.curve((x, y + radius - k), (x + radius - k, y), (x + radius, y));
        self.op("h", vec![]);
        self.op("f", vec![]);
    }

    fn curve(&mut self, c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) {
        self.op(
            "c",
            vec![
                c1.0.into(),
                c1.1.into(),
                c2.0.into(),
                c2.1.into(),
                end.0.into(),
                end.1.into(),
            ],
        );
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.stroke_color(BLACK);
        self.op("w", vec![1.into()]);
        self.op("m", vec![x1.into(), y1.into()]);
        self.op("l", vec![x2.into(), y2.into()]);
        self.op("S", vec![]);
    }

    fn text(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        self.op("BT", vec![]);
        self.op("Tf", vec![font.resource_name().into(), size.into()]);
        self.op("Td", vec![x.into(), y.into()]);
        self.op(
            "Tj",
            vec![Object::String(win_ansi_bytes(text), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    fn text_centered(&mut self, font: Font, size: f32, center_x: f32, y: f32, text: &str) {
        let width = string_width(text, font, size);
        self.text(font, size, center_x - width / 2.0, y, text);
    }

    fn text_right(&mut self, font: Font, size: f32, right_x: f32, y: f32, text: &str) {
        let width = string_width(text, font, size);
        self.text(font, size, right_x - width, y, text);
    }

    fn image(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) {
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                y.into(),
            ],
        );
        self.op("Do", vec![name.into()]);
        self.op("Q", vec![]);
    }
}

/// Renders notices to PDF files.
pub struct PdfRenderEngine {
    ciudad: String,
}

impl Default for PdfRenderEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CIUDAD)
    }
}

impl PdfRenderEngine {
    /// Create an engine that prints `ciudad` on the date line.
    pub fn new(ciudad: impl Into<String>) -> Self {
        Self {
            ciudad: ciudad.into(),
        }
    }

    /// Render the notice for `client_name` into `output_dir`.
    ///
    /// # Arguments
    /// * `client_name` - Name as typed by the clerk; printed upper-cased and used for the filename.
    /// * `qr_image_path` - PNG produced by the QR encoder.
    /// * `output_dir` - Created if missing. An existing notice with the same name is overwritten.
    /// * `date_override` - Optional date to print; defaults to today.
    ///
    /// A QR image that cannot be loaded does not abort the page: the panel is
    /// drawn empty and the failure is returned in `GeneratedNotice::degraded`.
    pub fn render(
        &self,
        client_name: &str,
        qr_image_path: &Path,
        output_dir: &Path,
        date_override: Option<NaiveDate>,
    ) -> Result<GeneratedNotice, NoticeError> {
        let fecha = format_fecha(date_override.unwrap_or_else(today));

        fs::create_dir_all(output_dir).map_err(NoticeError::OutputDir)?;
        let filename = notice_filename(client_name);
        let output_path = output_dir.join(&filename);

        let mut doc = Document::with_version("1.5");
        let mut canvas = PageCanvas::default();

        let (qr_xobject, degraded) = match load_qr_xobject(qr_image_path) {
            Ok(stream) => (Some(doc.add_object(stream)), None),
            Err(e) => {
                log::error!("Failed to place QR image on notice for '{}': {}", client_name, e);
                (None, Some(e))
            }
        };

        self.draw_header(&mut canvas, &fecha);
        let body_y = draw_recipient(&mut canvas, client_name);
        draw_body(&mut canvas, body_y);
        draw_panel(&mut canvas, body_y - 250.0, qr_xobject.is_some());
        draw_footer(&mut canvas);

        assemble_page(&mut doc, canvas, qr_xobject, client_name)?;
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| NoticeError::Pdf(e.to_string()))?;
        fs::write(&output_path, bytes).map_err(NoticeError::WritePdf)?;
        let path = fs::canonicalize(&output_path).map_err(NoticeError::WritePdf)?;

        log::info!("Notice written to {}", path.display());

        Ok(GeneratedNotice {
            filename,
            path,
            fecha,
            qr_version: None,
            degraded,
        })
    }

    fn draw_header(&self, canvas: &mut PageCanvas, fecha: &str) {
        canvas.fill_color(PRIMARY);
        canvas.rect(0.0, PAGE_HEIGHT - 30.0, PAGE_WIDTH, 30.0);

        canvas.fill_color(TEXT);
        canvas.text_centered(
            Font::HelveticaBold,
            16.0,
            PAGE_WIDTH / 2.0,
            PAGE_HEIGHT - 80.0,
            TITLE,
        );
        canvas.text_right(
            Font::Helvetica,
            10.0,
            PAGE_WIDTH - 50.0,
            PAGE_HEIGHT - 110.0,
            &format!("{}, a {}", self.ciudad, fecha),
        );
    }
}

/// Draws the recipient block and returns the baseline where the body starts.
fn draw_recipient(canvas: &mut PageCanvas, client_name: &str) -> f32 {
    let mut y = PAGE_HEIGHT - 160.0;

    canvas.text(Font::HelveticaBold, 11.0, MARGIN_X, y, "A LA ATENCIÓN DE:");
    y -= 20.0;
    canvas.text(Font::Helvetica, 12.0, MARGIN_X, y, &client_name.to_uppercase());
    y -= 40.0;

    canvas.line(MARGIN_X, y + 10.0, PAGE_WIDTH - MARGIN_X, y + 10.0);
    y - 20.0
}

fn draw_body(canvas: &mut PageCanvas, top_baseline: f32) {
    for (i, line) in body_lines().iter().enumerate() {
        let y = top_baseline - i as f32 * BODY_LEADING;
        canvas.text(BODY_FONT, BODY_SIZE, MARGIN_X, y, line);
    }
}

fn draw_panel(canvas: &mut PageCanvas, panel_y: f32, with_qr: bool) {
    let center_x = PAGE_WIDTH / 2.0;

    canvas.fill_color(PANEL);
    canvas.round_rect(
        center_x - PANEL_WIDTH / 2.0,
        panel_y,
        PANEL_WIDTH,
        PANEL_HEIGHT,
        PANEL_RADIUS,
    );

    canvas.fill_color(PRIMARY);
    canvas.text_centered(Font::HelveticaBold, 10.0, center_x, panel_y + 175.0, "DETALLE DIGITAL");

    if with_qr {
        let qr_x = (PAGE_WIDTH - QR_SIZE) / 2.0;
        canvas.image(QR_XOBJECT, qr_x, panel_y + 35.0, QR_SIZE, QR_SIZE);
    }

    canvas.fill_color(CAPTION);
    canvas.text_centered(
        Font::HelveticaOblique,
        8.0,
        center_x,
        panel_y + 20.0,
        "Use la cámara de su celular para leer",
    );
}

fn draw_footer(canvas: &mut PageCanvas) {
    canvas.fill_color(PRIMARY);
    canvas.rect(0.0, 0.0, PAGE_WIDTH, 15.0);

    canvas.fill_color(FOOTER);
    canvas.text_centered(Font::Helvetica, 7.0, PAGE_WIDTH / 2.0, 25.0, FOOTER_TEXT);
}

fn load_qr_xobject(path: &Path) -> Result<Stream, NoticeError> {
    let image = image::open(path)
        .map_err(|e| NoticeError::RenderDegraded(format!("{}: {}", path.display(), e)))?
        .to_luma8();
    let (width, height) = image.dimensions();

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        image.into_raw(),
    ))
}

fn assemble_page(
    doc: &mut Document,
    canvas: PageCanvas,
    qr_xobject: Option<ObjectId>,
    client_name: &str,
) -> Result<(), NoticeError> {
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        fonts.set(
            font.resource_name(),
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }
    let mut resources = dictionary! { "Font" => fonts };
    if let Some(image_id) = qr_xobject {
        resources.set("XObject", dictionary! { QR_XOBJECT => image_id });
    }

    let content = Content {
        operations: canvas.operations,
    };
    let encoded = content
        .encode()
        .map_err(|e| NoticeError::Pdf(format!("content stream: {}", e)))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Resources" => resources,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(
            win_ansi_bytes(&format!("Aviso - {}", client_name.to_uppercase())),
            StringFormat::Literal,
        ),
        "Producer" => Object::string_literal("avisos-credito"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_lines_fit_printable_width() {
        let lines = body_lines();
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(string_width(line, BODY_FONT, BODY_SIZE) <= PRINTABLE_WIDTH);
        }
    }

    #[test]
    fn test_round_rect_closes_path() {
        let mut canvas = PageCanvas::default();
        canvas.round_rect(10.0, 10.0, 100.0, 50.0, 10.0);
        let operators: Vec<&str> = canvas
            .operations
            .iter()
            .map(|op| op.operator.as_str())
            .collect();
        assert_eq!(operators.first(), Some(&"m"));
        assert_eq!(operators.iter().filter(|o| **o == "c").count(), 4);
        assert_eq!(&operators[operators.len() - 2..], &["h", "f"]);
    }

    #[test]
    fn test_text_right_aligns_to_edge() {
        let mut canvas = PageCanvas::default();
        canvas.text_right(Font::Helvetica, 10.0, 500.0, 100.0, "Hello");
        let td = canvas
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        let x = td.operands[0].as_float().unwrap();
        assert!((x - (500.0 - 22.78)).abs() < 1e-3);
    }

    #[test]
    fn test_missing_qr_image_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let engine = PdfRenderEngine::default();
        let notice = engine
            .render(
                "Sin Imagen",
                &dir.path().join("no-existe.png"),
                dir.path(),
                None,
            )
            .unwrap();
        assert!(notice.is_degraded());
        assert!(notice.path.exists());
        assert_eq!(notice.filename, "Aviso_SinImagen.pdf");
    }
}
