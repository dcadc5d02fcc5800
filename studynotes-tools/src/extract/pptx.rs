//! Slide deck (.pptx) text extraction.
//!
//! A .pptx file is a ZIP archive of XML parts. Slide order is defined by
//! `ppt/presentation.xml` and resolved through its relationships part; each
//! slide's top-level `p:sp` shapes are the ones that carry text.

use crate::tool_error::ExtractError;
use crate::types::{DocumentKind, ExtractedDocument};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
const SLIDE_PREFIX: &str = "ppt/slides/slide";

/// Join the text of every text-bearing shape, slide by slide, with newlines.
///
/// Every top-level `p:sp` shape contributes one entry, even when its text is
/// empty. Pictures, graphic frames, connectors and group shapes are skipped.
pub fn extract_pptx_text(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    let file = File::open(path)?;
    extract_from_reader(BufReader::new(file))
}

fn extract_from_reader<R: Read + Seek>(reader: R) -> Result<ExtractedDocument, ExtractError> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let slide_parts = slide_order(&mut archive)?;

    let mut fragments = Vec::new();
    for part in &slide_parts {
        let xml = read_part(&mut archive, part)?;
        fragments.extend(slide_shape_texts(&xml, part)?);
    }

    Ok(ExtractedDocument {
        kind: DocumentKind::Pptx,
        units: slide_parts.len(),
        text: fragments.join("\n"),
    })
}

fn read_part<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<String, ExtractError> {
    let mut part = archive.by_name(name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => ExtractError::MissingPart(name.to_string()),
        other => ExtractError::Zip(other),
    })?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Slide part names in presentation order
fn slide_order<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> Result<Vec<String>, ExtractError> {
    let has_presentation = archive.file_names().any(|n| n == PRESENTATION_PART);
    let has_rels = archive.file_names().any(|n| n == PRESENTATION_RELS_PART);

    if has_presentation && has_rels {
        let presentation = read_part(archive, PRESENTATION_PART)?;
        let rels = read_part(archive, PRESENTATION_RELS_PART)?;
        let targets = relationship_targets(&rels)?;
        let ordered: Vec<String> = slide_relationship_ids(&presentation)?
            .into_iter()
            .filter_map(|id| targets.get(&id).map(|target| resolve_target(target)))
            .collect();
        if !ordered.is_empty() {
            return Ok(ordered);
        }
    }

    tracing::debug!("No usable slide list in presentation part, ordering slides by file name");
    let mut numbered: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix(SLIDE_PREFIX)?
                .strip_suffix(".xml")?
                .parse::<u32>()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort_by_key(|(number, _)| *number);
    Ok(numbered.into_iter().map(|(_, name)| name).collect())
}

/// `r:id` values of `p:sldId` entries, in document order
fn slide_relationship_ids(presentation_xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(presentation_xml);
    let mut ids = Vec::new();

    loop {
        match reader
            .read_event()
            .map_err(|e| ExtractError::xml(PRESENTATION_PART, e))?
        {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                if let Some(id) = relationship_id(&e) {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

/// The namespaced `r:id` attribute; the unprefixed `id` is the numeric slide id
fn relationship_id(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id")
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Relationship id -> target for a `.rels` part
fn relationship_targets(rels_xml: &str) -> Result<HashMap<String, String>, ExtractError> {
    let mut reader = Reader::from_str(rels_xml);
    let mut targets = HashMap::new();

    loop {
        match reader
            .read_event()
            .map_err(|e| ExtractError::xml(PRESENTATION_RELS_PART, e))?
        {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        b"Target" => {
                            target = Some(String::from_utf8_lossy(&attr.value).into_owned())
                        }
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Relationship targets are relative to `ppt/` unless absolute
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Text of each top-level `p:sp` shape on a slide, in document order
fn slide_shape_texts(slide_xml: &str, part: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(slide_xml);
    reader.config_mut().trim_text(false);

    let mut depth = 0usize;
    let mut tree_depth: Option<usize> = None;
    let mut shape: Option<ShapeText> = None;
    let mut in_run_text = false;
    let mut texts = Vec::new();

    loop {
        match reader.read_event().map_err(|e| ExtractError::xml(part, e))? {
            Event::Start(e) => {
                depth += 1;
                let name = e.local_name();
                match name.as_ref() {
                    b"spTree" if tree_depth.is_none() => tree_depth = Some(depth),
                    b"sp" if shape.is_none() && tree_depth.map(|d| depth == d + 1) == Some(true) => {
                        shape = Some(ShapeText::new(depth));
                    }
                    b"p" => {
                        if let Some(shape) = shape.as_mut() {
                            shape.start_paragraph();
                        }
                    }
                    b"t" => in_run_text = shape.is_some(),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"sp" if shape.is_none() && tree_depth.map(|d| depth == d) == Some(true) => {
                        texts.push(String::new());
                    }
                    b"br" => {
                        if let Some(shape) = shape.as_mut() {
                            shape.push_str("\n");
                        }
                    }
                    b"p" => {
                        if let Some(shape) = shape.as_mut() {
                            shape.start_paragraph();
                        }
                    }
                    _ => {}
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"t" => in_run_text = false,
                    b"sp" if shape.as_ref().map(|s| s.depth == depth) == Some(true) => {
                        if let Some(done) = shape.take() {
                            texts.push(done.finish());
                        }
                    }
                    b"spTree" if tree_depth == Some(depth) => tree_depth = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(e) if in_run_text => {
                let text = e.unescape().map_err(|err| ExtractError::xml(part, err))?;
                if let Some(shape) = shape.as_mut() {
                    shape.push_str(&text);
                }
            }
            Event::CData(e) if in_run_text => {
                if let Some(shape) = shape.as_mut() {
                    shape.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(texts)
}

/// Paragraphs collected for one shape
struct ShapeText {
    depth: usize,
    paragraphs: Vec<String>,
}

impl ShapeText {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            paragraphs: Vec::new(),
        }
    }

    fn start_paragraph(&mut self) {
        self.paragraphs.push(String::new());
    }

    fn push_str(&mut self, text: &str) {
        match self.paragraphs.last_mut() {
            Some(paragraph) => paragraph.push_str(text),
            None => self.paragraphs.push(text.to_string()),
        }
    }

    fn finish(self) -> String {
        self.paragraphs.join("\n")
    }
}
