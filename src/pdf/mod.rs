//! Report document composition.
//!
//! Builds the paginated PDF: a title block plus the bordered metrics table,
//! then one page per chart with a centered caption. Page geometry is in
//! millimetres (A4) and converted to points at the PDF op layer.
//!
//! Composition runs only after all chart PNGs exist; their bytes are read
//! back from disk and embedded as image XObjects.

use chrono::Local;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{
    BuiltinFont, Layer, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb, TextMatrix, XObjectId,
};

use crate::domain::{ChartArtifact, Dataset, RunConfig};
use crate::error::AppError;

/// Table columns, in print order.
pub const TABLE_COLUMNS: [&str; 5] = ["date", "campaign", "CTR", "CPC", "ConversionRate"];

/// Proportional column widths (fractions of page width) keeping the table
/// print-stable regardless of content length.
const COL_FRACTIONS: [f32; 5] = [0.15, 0.25, 0.15, 0.15, 0.25];

const PAGE_W_MM: f32 = 210.0;
const PAGE_H_MM: f32 = 297.0;
/// Left/top content margin.
const MARGIN_MM: f32 = 10.0;
/// Auto-page-break margin at the bottom of the table area.
const BREAK_MM: f32 = 15.0;
const ROW_H_MM: f32 = 8.0;
/// Side margin for embedded chart images.
const IMAGE_MARGIN_MM: f32 = 15.0;

/// Accumulating report document; pages are appended in order and the
/// document is immutable once serialized.
pub struct ReportComposer {
    document: PdfDocument,
}

/// Title-page fields.
pub struct ReportMeta {
    pub title: String,
    pub author: String,
}

impl ReportComposer {
    pub fn new(title: &str) -> Self {
        Self {
            document: PdfDocument::new(title),
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    /// Title block (title, author, generation timestamp) followed by the
    /// bordered metrics table. Rows that overflow the page continue on a
    /// fresh page.
    pub fn add_title_and_table(&mut self, meta: &ReportMeta, dataset: &Dataset) {
        let mut ops = Vec::new();

        centered_text(&mut ops, &meta.title, BuiltinFont::HelveticaBold, 16.0, 20.0);
        text_at(
            &mut ops,
            &format!("Author: {}", meta.author),
            BuiltinFont::Helvetica,
            12.0,
            MARGIN_MM,
            35.0,
        );
        let stamp = Local::now().format("%Y-%m-%d %H:%M");
        text_at(
            &mut ops,
            &format!("Date: {stamp}"),
            BuiltinFont::Helvetica,
            12.0,
            MARGIN_MM,
            45.0,
        );

        text_at(
            &mut ops,
            "Campaign Metrics",
            BuiltinFont::HelveticaBold,
            12.0,
            MARGIN_MM,
            60.0,
        );

        let mut y = 66.0;
        table_row(&mut ops, y, &TABLE_COLUMNS.map(str::to_string), BuiltinFont::HelveticaBold);
        y += ROW_H_MM;

        for record in &dataset.records {
            if y + ROW_H_MM > PAGE_H_MM - BREAK_MM {
                self.push_page(std::mem::take(&mut ops));
                y = BREAK_MM;
            }
            let m = record.metrics.unwrap_or(crate::domain::Metrics {
                ctr: f64::NAN,
                cpc: f64::NAN,
                conversion_rate: f64::NAN,
            });
            let cells = [
                record.date.to_string(),
                record.campaign.clone(),
                fmt_metric(m.ctr),
                fmt_metric(m.cpc),
                fmt_metric(m.conversion_rate),
            ];
            table_row(&mut ops, y, &cells, BuiltinFont::Helvetica);
            y += ROW_H_MM;
        }

        self.push_page(ops);
    }

    /// One chart page: the image scaled to page width with a small margin,
    /// followed by a centered bold caption.
    pub fn add_chart_page(
        &mut self,
        png: &[u8],
        caption: &str,
        y_start_mm: f32,
    ) -> Result<(), AppError> {
        let mut warnings = Vec::new();
        let raw = RawImage::decode_from_bytes(png, &mut warnings)
            .map_err(|e| AppError::document(format!("Failed to decode chart image: {e}")))?;
        let dims = (raw.width as u32, raw.height as u32);

        let xobj_id = XObjectId::new();
        self.document
            .resources
            .xobjects
            .map
            .insert(xobj_id.clone(), XObject::Image(raw));

        let img_w_mm = PAGE_W_MM - 2.0 * IMAGE_MARGIN_MM;
        let img_h_mm = img_w_mm * dims.1 as f32 / dims.0 as f32;

        let transform = XObjectTransform {
            translate_x: Some(mm(IMAGE_MARGIN_MM)),
            translate_y: Some(mm(PAGE_H_MM - y_start_mm - img_h_mm)),
            scale_x: Some(mm(img_w_mm).0 / dims.0 as f32),
            scale_y: Some(mm(img_h_mm).0 / dims.1 as f32),
            rotate: None,
            dpi: Some(72.0),
        };

        let mut ops = vec![Op::UseXobject {
            id: xobj_id,
            transform,
        }];
        centered_text(
            &mut ops,
            caption,
            BuiltinFont::HelveticaBold,
            12.0,
            y_start_mm + img_h_mm + 10.0,
        );

        self.push_page(ops);
        Ok(())
    }

    /// Serialize the assembled document to bytes.
    pub fn save(mut self) -> Vec<u8> {
        let mut warnings = Vec::new();
        self.document.save(&PdfSaveOptions::default(), &mut warnings)
    }

    fn push_page(&mut self, ops: Vec<Op>) {
        let page_num = self.document.pages.len() + 1;
        let layer_name = format!("Page {page_num} Layer 1");
        let layer = Layer::new(&*layer_name);
        let layer_id = self.document.add_layer(&layer);

        let mut final_ops = vec![Op::BeginLayer { layer_id }];
        final_ops.extend(ops);

        self.document
            .pages
            .push(PdfPage::new(Mm(PAGE_W_MM), Mm(PAGE_H_MM), final_ops));
    }
}

/// Compose the full report: title + table, then one page per chart in the
/// fixed order the artifacts were produced in.
pub fn compose_report(
    config: &RunConfig,
    dataset: &Dataset,
    charts: &[ChartArtifact],
) -> Result<Vec<u8>, AppError> {
    let mut composer = ReportComposer::new(&config.title);
    let meta = ReportMeta {
        title: config.title.clone(),
        author: config.author.clone(),
    };
    composer.add_title_and_table(&meta, dataset);

    for chart in charts {
        let png = std::fs::read(&chart.path).map_err(|e| {
            AppError::document(format!(
                "Failed to read chart image '{}': {e}",
                chart.path.display()
            ))
        })?;
        composer.add_chart_page(&png, &chart.caption, chart.y_start_mm)?;
    }

    Ok(composer.save())
}

/// Metric cells always render to exactly two decimal places; non-finite
/// values (zero impressions/clicks) come out as `inf`/`NaN`.
fn fmt_metric(value: f64) -> String {
    format!("{value:.2}")
}

fn mm(v: f32) -> Pt {
    Mm(v).into_pt()
}

fn pt_to_mm(v: f32) -> f32 {
    v * 25.4 / 72.0
}

/// Approximate rendered width of `text` in points. Good enough for
/// centering headings and captions in a fixed-width report.
fn approx_text_width_pt(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.6
}

fn text_at(ops: &mut Vec<Op>, text: &str, font: BuiltinFont, size: f32, x_mm: f32, baseline_mm: f32) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetFillColor {
        col: printpdf::color::Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)),
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::SetTextMatrix {
        matrix: TextMatrix::Translate(mm(x_mm), mm(PAGE_H_MM - baseline_mm)),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

fn centered_text(ops: &mut Vec<Op>, text: &str, font: BuiltinFont, size: f32, baseline_mm: f32) {
    let width_mm = pt_to_mm(approx_text_width_pt(text, size));
    let x_mm = ((PAGE_W_MM - width_mm) / 2.0).max(MARGIN_MM);
    text_at(ops, text, font, size, x_mm, baseline_mm);
}

/// One bordered table row at vertical offset `y_mm` (top of the row).
fn table_row(ops: &mut Vec<Op>, y_mm: f32, cells: &[String; 5], font: BuiltinFont) {
    let mut x = MARGIN_MM;
    for (i, cell) in cells.iter().enumerate() {
        let w = PAGE_W_MM * COL_FRACTIONS[i];
        cell_border(ops, x, y_mm, w, ROW_H_MM);

        // date/campaign left-aligned, metric columns centered.
        let text_x = if i < 2 {
            x + 2.0
        } else {
            let text_w = pt_to_mm(approx_text_width_pt(cell, 10.0));
            x + ((w - text_w) / 2.0).max(1.0)
        };
        text_at(ops, cell, font, 10.0, text_x, y_mm + 5.5);
        x += w;
    }
}

fn cell_border(ops: &mut Vec<Op>, x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32) {
    let x0 = mm(x_mm);
    let x1 = mm(x_mm + w_mm);
    let y_top = mm(PAGE_H_MM - y_mm);
    let y_bot = mm(PAGE_H_MM - y_mm - h_mm);

    let corner = |x: Pt, y: Pt| LinePoint {
        p: Point { x, y },
        bezier: false,
    };
    let polygon = Polygon {
        rings: vec![PolygonRing {
            points: vec![
                corner(x0, y_bot),
                corner(x1, y_bot),
                corner(x1, y_top),
                corner(x0, y_top),
                corner(x0, y_bot),
            ],
        }],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::EvenOdd,
    };

    ops.push(Op::SetOutlineThickness { pt: Pt(0.75) });
    ops.push(Op::SetOutlineColor {
        col: printpdf::color::Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)),
    });
    ops.push(Op::DrawPolygon { polygon });
}
