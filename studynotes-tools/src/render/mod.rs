//! Plain-text to PDF rendering with the built-in Helvetica font.
//!
//! Every input line becomes one or more text lines on the page; markdown-like
//! markup is written verbatim. Each line is its own text object so the PDF
//! text layer reads back line by line.

pub mod encoding;
pub mod metrics;

use crate::text::{normalize_newlines, to_ascii};
use crate::tool_error::RenderError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

const FONT_RESOURCE: &str = "F1";
const TAB_EXPANSION: &str = "    ";

/// How response text is mapped onto the font's single-byte encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontMode {
    /// Fold everything to ASCII approximations first
    AsciiFold,
    /// Keep Latin-1 and typographic punctuation through `WinAnsiEncoding`
    WinAnsi,
}

/// Page geometry in PDF points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Baseline of the first line on each page, measured from the bottom edge
    pub first_baseline: f32,
    /// Lines whose baseline would fall below this move to the next page
    pub margin_bottom: f32,
    pub font_size: f32,
    pub leading: f32,
}

impl PageLayout {
    /// A4 with 10 mm lines, 10 mm side and top margins and a 20 mm page
    /// break margin at the bottom
    pub fn a4() -> Self {
        let height = 841.89;
        let font_size = 12.0;
        let leading = 28.35;
        // baseline offset from the top of a 10 mm line cell
        let baseline_in_cell = leading / 2.0 + 0.3 * font_size;
        Self {
            width: 595.28,
            height,
            margin_left: 28.35,
            margin_right: 28.35,
            first_baseline: height - 28.35 - baseline_in_cell,
            margin_bottom: 56.69 + leading - baseline_in_cell,
            font_size,
            leading,
        }
    }

    /// US Letter, text starting at (50, 750)
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_left: 50.0,
            margin_right: 50.0,
            first_baseline: 750.0,
            margin_bottom: 42.0,
            font_size: 12.0,
            leading: 14.4,
        }
    }

    /// Horizontal space available for a line of text
    pub fn text_width(&self) -> f32 {
        (self.width - self.margin_left - self.margin_right).max(self.font_size)
    }

    pub fn lines_per_page(&self) -> usize {
        if self.leading <= 0.0 || self.first_baseline <= self.margin_bottom {
            return 1;
        }
        ((self.first_baseline - self.margin_bottom) / self.leading).floor() as usize + 1
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub font_mode: FontMode,
    pub layout: PageLayout,
    /// Word-wrap lines wider than the text area
    pub wrap_lines: bool,
    /// Written to the document information dictionary
    pub title: Option<String>,
}

impl RenderOptions {
    pub fn new(font_mode: FontMode, layout: PageLayout) -> Self {
        Self {
            font_mode,
            layout,
            wrap_lines: true,
            title: None,
        }
    }

    pub fn with_wrapping(mut self, wrap_lines: bool) -> Self {
        self.wrap_lines = wrap_lines;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(FontMode::AsciiFold, PageLayout::a4())
    }
}

/// Render `text` to an in-memory PDF
pub fn render_pdf(text: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    let mut document = build_document(text, options)?;
    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Render `text` and write the PDF to `path`
pub fn render_pdf_to_file(
    text: &str,
    options: &RenderOptions,
    path: &Path,
) -> Result<(), RenderError> {
    let bytes = render_pdf(text, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encoded (and optionally wrapped) lines ready for placement
fn layout_lines(text: &str, options: &RenderOptions) -> Vec<Vec<u8>> {
    let normalized = normalize_newlines(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let layout = &options.layout;
    let mut lines = Vec::new();
    for line in normalized.split('\n') {
        let expanded = line.replace('\t', TAB_EXPANSION);
        let encoded = match options.font_mode {
            FontMode::AsciiFold => to_ascii(&expanded).into_bytes(),
            FontMode::WinAnsi => encoding::encode_win_ansi(&expanded),
        };
        if options.wrap_lines {
            lines.extend(metrics::wrap_line(
                &encoded,
                layout.text_width(),
                layout.font_size,
            ));
        } else {
            lines.push(encoded);
        }
    }
    lines
}

fn build_document(text: &str, options: &RenderOptions) -> Result<Document, RenderError> {
    let layout = &options.layout;
    let lines = layout_lines(text, options);
    let per_page = layout.lines_per_page();

    // Always at least one page, so empty text still yields an openable file
    let blank: &[Vec<u8>] = &[];
    let pages: Vec<&[Vec<u8>]> = if lines.is_empty() {
        vec![blank]
    } else {
        lines.chunks(per_page).collect()
    };

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });
    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(layout.width),
        Object::Real(layout.height),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page_lines in &pages {
        let content = page_content(page_lines, layout);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = info_dictionary(&mut doc, options);
    doc.trailer.set("Info", info_id);

    tracing::debug!(
        lines = lines.len(),
        pages = page_count,
        font_mode = ?options.font_mode,
        "Rendered PDF document"
    );

    Ok(doc)
}

fn page_content(lines: &[Vec<u8>], layout: &PageLayout) -> Content {
    let mut operations = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let baseline = layout.first_baseline - index as f32 * layout.leading;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), Object::Real(layout.font_size)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(layout.margin_left), Object::Real(baseline)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(line.clone(), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

fn info_dictionary(doc: &mut Document, options: &RenderOptions) -> ObjectId {
    let mut info = dictionary! {
        "Producer" => Object::string_literal("studynotes"),
    };
    if let Some(title) = &options.title {
        info.set("Title", Object::string_literal(to_ascii(title)));
    }
    doc.add_object(info)
}
