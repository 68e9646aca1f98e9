use std::fs::File;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

use crate::{reader::read_part, DocxError};

/// Read-only structural summary of a `.docx` package, for debugging
/// packages that Word flags or renders unexpectedly.
#[derive(Debug, Clone, Serialize)]
pub struct PackageSummary {
    pub parts: Vec<String>,
    pub paragraph_count: usize,
    pub numbered_paragraph_count: usize,
    pub abstract_numbering: Vec<AbstractNumbering>,
    pub concrete_numbering: Vec<ConcreteNumbering>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbstractNumbering {
    pub id: String,
    pub levels: Vec<NumberingLevel>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NumberingLevel {
    pub ilvl: Option<String>,
    pub num_fmt: Option<String>,
    pub lvl_text: Option<String>,
    pub start: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConcreteNumbering {
    pub num_id: String,
    pub abstract_num_id: Option<String>,
}

fn local_name(q: &[u8]) -> &[u8] {
    match q.iter().position(|&b| b == b':') {
        Some(i) => &q[i + 1..],
        None => q,
    }
}

fn attr_val(e: &BytesStart<'_>, key_local: &[u8]) -> Option<String> {
    for a in e.attributes().with_checks(false).flatten() {
        if local_name(a.key.as_ref()) == key_local {
            return Some(String::from_utf8_lossy(&a.value).into_owned());
        }
    }
    None
}

pub fn inspect_docx(path: &Path) -> Result<PackageSummary, DocxError> {
    let file = File::open(path).map_err(|e| DocxError::io(path, e))?;
    let mut archive = zip::ZipArchive::new(file)?;
    let parts: Vec<String> = archive.file_names().map(str::to_string).collect();
    drop(archive);

    let doc_xml = read_part(path, "word/document.xml")?
        .ok_or(DocxError::MissingPart("word/document.xml"))?;
    let (paragraph_count, numbered_paragraph_count) = count_paragraphs(&doc_xml)?;

    let (abstract_numbering, concrete_numbering) = match read_part(path, "word/numbering.xml")? {
        Some(xml) => parse_numbering(&xml)?,
        None => (Vec::new(), Vec::new()),
    };

    Ok(PackageSummary {
        parts,
        paragraph_count,
        numbered_paragraph_count,
        abstract_numbering,
        concrete_numbering,
    })
}

fn count_paragraphs(doc_xml: &str) -> Result<(usize, usize), DocxError> {
    let mut reader = Reader::from_str(doc_xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut paragraphs = 0usize;
    let mut numbered = 0usize;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match local_name(e.name().as_ref()) {
                b"p" => paragraphs += 1,
                b"numPr" => numbered += 1,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocxError::Xml { part: "word/document.xml", source: e }),
            _ => {}
        }
    }
    Ok((paragraphs, numbered))
}

fn parse_numbering(
    xml: &str,
) -> Result<(Vec<AbstractNumbering>, Vec<ConcreteNumbering>), DocxError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();

    let mut abstracts: Vec<AbstractNumbering> = Vec::new();
    let mut concretes: Vec<ConcreteNumbering> = Vec::new();
    let mut in_lvl = false;

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| DocxError::Xml { part: "word/numbering.xml", source: e })?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => match local_name(e.name().as_ref()) {
                b"abstractNum" => {
                    abstracts.push(AbstractNumbering {
                        id: attr_val(e, b"abstractNumId").unwrap_or_default(),
                        levels: Vec::new(),
                    });
                }
                b"lvl" => {
                    if let Some(a) = abstracts.last_mut() {
                        a.levels.push(NumberingLevel { ilvl: attr_val(e, b"ilvl"), ..Default::default() });
                        in_lvl = true;
                    }
                }
                b"numFmt" if in_lvl => {
                    if let Some(l) = abstracts.last_mut().and_then(|a| a.levels.last_mut()) {
                        l.num_fmt = attr_val(e, b"val");
                    }
                }
                b"lvlText" if in_lvl => {
                    if let Some(l) = abstracts.last_mut().and_then(|a| a.levels.last_mut()) {
                        l.lvl_text = attr_val(e, b"val");
                    }
                }
                b"start" if in_lvl => {
                    if let Some(l) = abstracts.last_mut().and_then(|a| a.levels.last_mut()) {
                        l.start = attr_val(e, b"val");
                    }
                }
                b"num" => {
                    concretes.push(ConcreteNumbering {
                        num_id: attr_val(e, b"numId").unwrap_or_default(),
                        abstract_num_id: None,
                    });
                }
                b"abstractNumId" => {
                    if let Some(c) = concretes.last_mut() {
                        c.abstract_num_id = attr_val(e, b"val");
                    }
                }
                _ => {}
            },
            Event::End(ref e) => {
                if local_name(e.name().as_ref()) == b"lvl" {
                    in_lvl = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((abstracts, concretes))
}
