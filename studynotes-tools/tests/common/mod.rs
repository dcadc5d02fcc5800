#![allow(dead_code)]

use lopdf::{dictionary, Object, Stream};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Create a multi-page PDF. Each page has a single line of text; an empty
/// string produces a page without a content stream.
pub fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    let contents: Vec<String> = texts
        .iter()
        .map(|text| {
            if text.is_empty() {
                String::new()
            } else {
                format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text)
            }
        })
        .collect();
    let contents: Vec<&str> = contents.iter().map(String::as_str).collect();
    pdf_with_content_streams(&contents)
}

/// Create a PDF with one page per raw content stream, with Helvetica as `/F1`.
/// An empty stream produces a page without contents.
pub fn pdf_with_content_streams(contents: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for content in contents {
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        };
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Resources" => resources,
        };
        if !content.is_empty() {
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
            page_dict.set("Contents", Object::Reference(content_id));
        }
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(contents.len() as i64),
    });

    for &pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A shape placed on a fixture slide
pub enum SlideShape<'a> {
    /// Text shape with one paragraph per entry
    Text(&'a [&'a str]),
    /// Text shape without a text body
    Bare,
    /// Picture, which carries no text
    Picture,
}

/// Slide deck whose presentation order equals file order
pub fn pptx_with_slides(slides: &[Vec<SlideShape<'_>>]) -> Vec<u8> {
    let order: Vec<usize> = (0..slides.len()).collect();
    pptx_with_order(slides, &order)
}

/// Slide deck listing `slides[order[i]]` as the i-th slide of the presentation.
/// Slide files are still numbered by their index in `slides`.
pub fn pptx_with_order(slides: &[Vec<SlideShape<'_>>], order: &[usize]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#)
        .unwrap();

    let slide_ids: String = order
        .iter()
        .enumerate()
        .map(|(position, index)| {
            format!(
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                256 + position,
                index + 10
            )
        })
        .collect();
    writer.start_file("ppt/presentation.xml", options).unwrap();
    writer
        .write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
                slide_ids
            )
            .as_bytes(),
        )
        .unwrap();

    let relationships: String = (0..slides.len())
        .map(|index| {
            format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                index + 10,
                index + 1
            )
        })
        .collect();
    writer
        .start_file("ppt/_rels/presentation.xml.rels", options)
        .unwrap();
    writer
        .write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                relationships
            )
            .as_bytes(),
        )
        .unwrap();

    for (index, shapes) in slides.iter().enumerate() {
        writer
            .start_file(format!("ppt/slides/slide{}.xml", index + 1), options)
            .unwrap();
        writer.write_all(slide_xml(shapes).as_bytes()).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// Slide deck with only `ppt/slides/slideN.xml` parts, keyed by `N`, and no
/// presentation part to order them
pub fn pptx_without_presentation(slides: &[(u32, Vec<SlideShape<'_>>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (number, shapes) in slides {
        writer
            .start_file(format!("ppt/slides/slide{}.xml", number), options)
            .unwrap();
        writer.write_all(slide_xml(shapes).as_bytes()).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

fn slide_xml(shapes: &[SlideShape<'_>]) -> String {
    let body: String = shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| match shape {
            SlideShape::Text(paragraphs) => {
                let paragraphs: String = paragraphs
                    .iter()
                    .map(|p| {
                        if p.is_empty() {
                            "<a:p/>".to_string()
                        } else {
                            format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>", p)
                        }
                    })
                    .collect();
                format!(
                    r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Text {}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
                    index + 2,
                    index,
                    paragraphs
                )
            }
            SlideShape::Bare => format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Rectangle {}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>"#,
                index + 2,
                index
            ),
            SlideShape::Picture => format!(
                r#"<p:pic><p:nvPicPr><p:cNvPr id="{}" name="Picture {}"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill/><p:spPr/></p:pic>"#,
                index + 2,
                index
            ),
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
        body
    )
}

/// Write bytes to a temporary file with the given suffix
pub fn write_temp(bytes: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
