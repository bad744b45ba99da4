//! Output document assembly.
//!
//! Builds the formatted CV: fixed page geometry, the logo right-aligned in the
//! running header, a centered bold label, then the extracted text as one plain
//! paragraph per non-blank line. No content-based re-formatting is applied.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, Header, LineSpacing, PageMargin, Paragraph, Pic, Run, RunFonts, Tab,
    TabValueType,
};
use serde::Serialize;

use crate::conversion::logo::LogoImage;
use crate::conversion::models::{ConversionError, ExtractedText};

const TWIPS_PER_INCH: f32 = 1440.0;
const EMU_PER_INCH: f32 = 914_400.0;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Page geometry and typography for a generated CV. Lengths are in inches,
/// font sizes in points.
#[derive(Debug, Clone, Serialize)]
pub struct PageConfig {
    pub page_width_in: f32,
    pub page_height_in: f32,
    /// Top margin is larger than the others to make room for the header.
    pub margin_top_in: f32,
    pub margin_bottom_in: f32,
    pub margin_left_in: f32,
    pub margin_right_in: f32,
    /// Distance from the top edge to the header paragraph.
    pub header_distance_in: f32,
    pub logo_width_in: f32,
    pub logo_height_in: f32,
    pub body_font: &'static str,
    pub body_font_size_pt: f32,
    /// CJK-capable face used for the label run.
    pub label_font: &'static str,
    pub label_font_size_pt: f32,
    pub label_space_after_pt: f32,
}

/// US letter, 1.2" top and 0.8" other margins, Calibri 11pt body,
/// MS Mincho 16pt bold label, logo at 2.634" × 0.508".
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_in: 8.5,
        page_height_in: 11.0,
        margin_top_in: 1.2,
        margin_bottom_in: 0.8,
        margin_left_in: 0.8,
        margin_right_in: 0.8,
        header_distance_in: 0.4,
        logo_width_in: 2.634,
        logo_height_in: 0.508,
        body_font: "Calibri",
        body_font_size_pt: 11.0,
        label_font: "ＭＳ 明朝",
        label_font_size_pt: 16.0,
        label_space_after_pt: 24.0,
    }
}

impl PageConfig {
    /// Usable line width; the header's right tab stop sits here.
    pub fn text_width_in(&self) -> f32 {
        self.page_width_in - self.margin_left_in - self.margin_right_in
    }
}

fn twips(inches: f32) -> i32 {
    (inches * TWIPS_PER_INCH).round() as i32
}

fn emu(inches: f32) -> u32 {
    (inches * EMU_PER_INCH).round() as u32
}

/// Word sizes are half-points.
fn half_points(pt: f32) -> usize {
    (pt * 2.0).round() as usize
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Produces the output DOCX bytes. Any failure is terminal: no partial
/// document is returned.
pub fn assemble(
    text: &ExtractedText,
    label: &str,
    logo: &LogoImage,
    page: &PageConfig,
) -> Result<Vec<u8>, ConversionError> {
    let mut docx = Docx::new()
        .page_size(
            twips(page.page_width_in) as u32,
            twips(page.page_height_in) as u32,
        )
        .page_margin(
            PageMargin::new()
                .top(twips(page.margin_top_in))
                .bottom(twips(page.margin_bottom_in))
                .left(twips(page.margin_left_in))
                .right(twips(page.margin_right_in))
                .header(twips(page.header_distance_in)),
        )
        .default_fonts(
            RunFonts::new()
                .ascii(page.body_font)
                .hi_ansi(page.body_font)
                .cs(page.body_font),
        )
        .default_size(half_points(page.body_font_size_pt))
        .header(logo_header(logo, page))
        .add_paragraph(label_paragraph(label, page))
        .add_paragraph(Paragraph::new());

    for line in text.lines() {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ConversionError::Assembly(e.to_string()))?;

    Ok(cursor.into_inner())
}

/// Header paragraph: a right tab stop at the right margin, a tab, then the logo.
/// Set once on the section, Word repeats it on every page.
fn logo_header(logo: &LogoImage, page: &PageConfig) -> Header {
    let (width_px, height_px) = logo.dimensions();
    let pic = Pic::new_with_dimensions(logo.png().to_vec(), width_px, height_px)
        .size(emu(page.logo_width_in), emu(page.logo_height_in));

    let paragraph = Paragraph::new()
        .align(AlignmentType::Right)
        .add_tab(
            Tab::new()
                .val(TabValueType::Right)
                .pos(twips(page.text_width_in()) as usize),
        )
        .add_run(Run::new().add_tab().add_image(pic));

    Header::new().add_paragraph(paragraph)
}

fn label_paragraph(label: &str, page: &PageConfig) -> Paragraph {
    let run = Run::new()
        .add_text(label)
        .bold()
        .size(half_points(page.label_font_size_pt))
        .fonts(
            RunFonts::new()
                .ascii(page.label_font)
                .hi_ansi(page.label_font)
                .east_asia(page.label_font),
        );

    Paragraph::new()
        .align(AlignmentType::Center)
        .line_spacing(LineSpacing::new().after(twips(page.label_space_after_pt / 72.0) as u32))
        .add_run(run)
}

#[cfg(test)]
pub(crate) mod inspect {
    use std::io::{Cursor, Read};

    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    /// Body paragraph texts of a packed DOCX, in order.
    pub fn body_paragraphs(docx: &[u8]) -> Vec<String> {
        let doc = docx_rs::read_docx(docx).unwrap();
        doc.document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(
                    p.children
                        .iter()
                        .filter_map(|c| match c {
                            ParagraphChild::Run(r) => Some(r),
                            _ => None,
                        })
                        .flat_map(|r| r.children.iter())
                        .filter_map(|c| match c {
                            RunChild::Text(t) => Some(t.text.as_str()),
                            _ => None,
                        })
                        .collect::<String>(),
                ),
                _ => None,
            })
            .collect()
    }

    /// Raw XML of one archive entry, e.g. `word/document.xml`.
    pub fn archive_entry(docx: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut xml = String::new();
        entry.read_to_string(&mut xml).unwrap();
        xml
    }

    /// Names of all header parts in the archive.
    pub fn header_parts(docx: &[u8]) -> Vec<String> {
        let archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
        archive
            .file_names()
            .filter(|n| n.starts_with("word/header"))
            .map(String::from)
            .collect()
    }
}
