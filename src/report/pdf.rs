//! PDF assembly via `printpdf`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::charts::CHART_SIZE;
use crate::error::{DietError, Result};
use crate::models::{DietPlan, UserProfile};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;

/// Width a chart occupies on the page.
const CHART_WIDTH_MM: f32 = 141.0;

/// Characters per wrapped body line at 10pt.
const WRAP_CHARS: usize = 95;

pub const CHARTS_PLACEHOLDER: &str = "Charts could not be generated";

fn pdf_err<E: std::fmt::Display>(context: &str) -> impl Fn(E) -> DietError + '_ {
    move |e| DietError::Pdf(format!("{}: {}", context, e))
}

/// A chart image ready to be placed, with the heading shown above it.
pub struct ReportImage {
    pub heading: String,
    image: Image,
}

impl ReportImage {
    /// Decode a PNG written by the chart renderer.
    pub fn load(heading: impl Into<String>, path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let decoder = PngDecoder::new(reader).map_err(pdf_err("PNG decode error"))?;
        let image = Image::try_from(decoder).map_err(pdf_err("image embed error"))?;
        Ok(Self {
            heading: heading.into(),
            image,
        })
    }
}

/// Everything that goes into the report.
pub struct ReportContent<'a> {
    pub profile: &'a UserProfile,
    pub plan: &'a DietPlan,
    /// Chart images in display order.
    pub charts: Vec<ReportImage>,
    /// False prints a placeholder after whatever images are present.
    pub charts_complete: bool,
}

/// Writes top to bottom and starts a new page when the cursor runs out.
struct PageCursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PageCursor {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_err("PDF font error"))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err("PDF font error"))?;

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN_TOP,
            pages: 1,
        })
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height >= MARGIN_BOTTOM {
            return;
        }
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN_TOP;
        self.pages += 1;
    }

    fn line(&mut self, text: &str, size: f32, bold: bool, indent: f32) {
        let height = line_height(size);
        self.ensure_space(height);
        self.y -= height;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(sanitize(text), size, Mm(MARGIN_LEFT + indent), Mm(self.y), font);
    }

    fn paragraph(&mut self, text: &str, size: f32, bold: bool) {
        for line in wrap_text(text, WRAP_CHARS) {
            self.line(&line, size, bold, 0.0);
        }
    }

    fn space(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn image(&mut self, image: Image) {
        let (px_w, px_h) = CHART_SIZE;
        let height = CHART_WIDTH_MM * px_h as f32 / px_w as f32;
        self.ensure_space(height);
        self.y -= height;

        let dpi = px_w as f32 / (CHART_WIDTH_MM / 25.4);
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_LEFT)),
                translate_y: Some(Mm(self.y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(pdf_err("PDF save error"))?;
        buf.into_inner().map_err(pdf_err("PDF buffer error"))
    }
}

fn line_height(size: f32) -> f32 {
    size * 0.5
}

/// Build the report. Returns the PDF bytes and the page count.
pub fn build_report_pdf(content: ReportContent<'_>) -> Result<(Vec<u8>, usize)> {
    let profile = content.profile;
    let title = format!("Personalized Diet Plan for {}", profile.name);
    let mut cursor = PageCursor::new(&title)?;

    cursor.paragraph(&title, 18.0, true);
    cursor.space(6.0);

    let bmi = profile.bmi();
    cursor.line("User Information:", 11.0, true, 0.0);
    cursor.line(&format!("Weight: {} kg", profile.weight), 10.0, false, 0.0);
    cursor.line(&format!("Height: {} cm", profile.height), 10.0, false, 0.0);
    cursor.line(&format!("BMI: {}", bmi), 10.0, false, 0.0);
    cursor.space(10.0);

    cursor.line("Diet Plan:", 14.0, true, 0.0);
    cursor.space(2.0);
    for paragraph in content.plan.paragraphs() {
        cursor.paragraph(paragraph.trim(), 10.0, false);
        cursor.space(1.5);
    }

    for chart in content.charts {
        cursor.space(6.0);
        cursor.line(&chart.heading, 14.0, true, 0.0);
        cursor.space(2.0);
        cursor.image(chart.image);
    }
    if !content.charts_complete {
        cursor.space(6.0);
        cursor.line(CHARTS_PLACEHOLDER, 10.0, true, 0.0);
    }

    let pages = cursor.pages;
    Ok((cursor.finish()?, pages))
}

/// Simple word-wrap helper for PDF text rendering.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        if current_len + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Map text onto what the built-in PDF fonts can show.
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2022}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\t' => out.push(' '),
            c if (c as u32) < 0x20 => {}
            c if (c as u32) <= 0xFF => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, DietIntensity, DietType, Gender};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Meera".to_string(),
            age: 41,
            gender: Gender::Female,
            weight: 58.0,
            height: 162.0,
            diet_intensity: DietIntensity::Easy,
            activity_level: ActivityLevel::Light,
            diet_type: DietType::Vegetarian,
        }
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("“Dal” – 1 bowl…"), "\"Dal\" - 1 bowl...");
        assert_eq!(sanitize("₹50 café"), "?50 café");
    }

    #[test]
    fn test_placeholder_report_is_pdf() {
        let plan = DietPlan::new("Day 1:\nBreakfast\nPoha\n\nLunch\nDal");
        let content = ReportContent {
            profile: &profile(),
            plan: &plan,
            charts: Vec::new(),
            charts_complete: false,
        };
        let (bytes, pages) = build_report_pdf(content).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(pages, 1);
    }

    #[test]
    fn test_long_plan_paginates() {
        let text: String = (1..=200).map(|i| format!("Line {}\n", i)).collect();
        let plan = DietPlan::new(text);
        let content = ReportContent {
            profile: &profile(),
            plan: &plan,
            charts: Vec::new(),
            charts_complete: false,
        };
        let (_, pages) = build_report_pdf(content).unwrap();
        assert!(pages > 1);
    }
}
