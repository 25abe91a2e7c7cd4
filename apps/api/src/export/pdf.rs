//! PDF rendering for exported letters.
//!
//! A4 pages with 20mm margins, a bold 16pt "Cover Letter" title and the letter
//! body at 11pt. Text is set in the embedded DejaVu Sans, so any script the
//! font covers survives the export. genpdf wraps lines and breaks pages.

use genpdf::{elements, fonts, style, Element as _};

pub const TITLE: &str = "Cover Letter";
const FILENAME_SUFFIX: &str = "_Cover_Letter.pdf";

const MARGIN_MM: i32 = 20;
const TITLE_SIZE_PT: u8 = 16;
const BODY_SIZE_PT: u8 = 11;
const LINE_SPACING: f64 = 1.15;

static REGULAR_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static BOLD_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Download filename: every whitespace run in `name` becomes `_`.
pub fn pdf_filename(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(c);
            in_space = false;
        }
    }

    if stem.trim_matches('_').is_empty() {
        FILENAME_SUFFIX.trim_start_matches('_').to_string()
    } else {
        format!("{stem}{FILENAME_SUFFIX}")
    }
}

/// `Content-Disposition` value with an ASCII fallback and an RFC 5987 UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}

fn font_family() -> Result<fonts::FontFamily<fonts::FontData>, genpdf::error::Error> {
    let regular = fonts::FontData::new(REGULAR_TTF.to_vec(), None)?;
    let bold = fonts::FontData::new(BOLD_TTF.to_vec(), None)?;
    Ok(fonts::FontFamily {
        italic: regular.clone(),
        bold_italic: bold.clone(),
        regular,
        bold,
    })
}

/// Renders `letter_text` under the fixed title and returns the PDF bytes.
pub fn render_pdf(letter_text: &str) -> Result<Vec<u8>, genpdf::error::Error> {
    let mut doc = genpdf::Document::new(font_family()?);
    doc.set_title(TITLE);
    doc.set_paper_size(genpdf::PaperSize::A4);
    doc.set_font_size(BODY_SIZE_PT);
    doc.set_line_spacing(LINE_SPACING);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    doc.set_page_decorator(decorator);

    doc.push(
        elements::Paragraph::new(TITLE)
            .styled(style::Style::new().bold().with_font_size(TITLE_SIZE_PT)),
    );
    doc.push(elements::Break::new(1));

    for line in letter_text.lines() {
        if line.trim().is_empty() {
            doc.push(elements::Break::new(1));
        } else {
            // DejaVu has no tab glyph.
            doc.push(elements::Paragraph::new(line.replace('\t', "    ")));
        }
    }

    let mut out = Vec::new();
    doc.render(&mut out)?;
    Ok(out)
}
