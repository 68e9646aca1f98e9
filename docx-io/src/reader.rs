use std::fs::File;
use std::io::Read;
use std::path::Path;

use outline_model::ParagraphRecord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::DocxError;

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

pub(crate) fn read_part(path: &Path, part: &'static str) -> Result<Option<String>, DocxError> {
    let file = File::open(path).map_err(|e| DocxError::io(path, e))?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut xml = String::new();
    match archive.by_name(part) {
        Ok(mut f) => {
            f.read_to_string(&mut xml).map_err(|e| DocxError::io(path, e))?;
            Ok(Some(xml))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read a `.docx` package into paragraph records: opens the zip, streams
/// `word/document.xml`, accumulates each paragraph's visible text (tabs
/// and breaks preserved as `\t` / `\n`) and captures native list metadata
/// (`w:numPr/w:ilvl`) as the explicit outline level.
///
/// Word keeps computed list strings in internal counters, not in the
/// document part, so `explicit_numbering` is never populated from a
/// package; it arrives only through the JSON interchange.
///
/// Blank paragraphs are dropped; `index` numbers the kept records.
pub fn read_docx_to_paragraphs(path: &Path) -> Result<Vec<ParagraphRecord>, DocxError> {
    let doc_xml = read_part(path, "word/document.xml")?
        .ok_or(DocxError::MissingPart("word/document.xml"))?;

    let mut reader = Reader::from_str(&doc_xml);
    reader.trim_text(false);
    let mut buf = Vec::new();

    let mut records: Vec<ParagraphRecord> = Vec::new();
    let mut cur_text = String::new();
    let mut in_p = false;
    let mut in_t = false;
    let mut pending_level: Option<u32> = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                b"p" => {
                    in_p = true;
                    cur_text.clear();
                    pending_level = None;
                }
                b"ilvl" => {
                    if let Some(v) = attr_val(&e, b"val") {
                        if let Ok(n) = v.parse::<u32>() {
                            pending_level = Some(n);
                        }
                    }
                }
                b"t" => in_t = true,
                b"br" => cur_text.push('\n'),
                b"tab" => cur_text.push('\t'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match local_name(e.name().as_ref()) {
                b"ilvl" => {
                    if let Some(v) = attr_val(&e, b"val") {
                        if let Ok(n) = v.parse::<u32>() {
                            pending_level = Some(n);
                        }
                    }
                }
                b"br" => cur_text.push('\n'),
                b"tab" => cur_text.push('\t'),
                _ => {}
            },
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                b"t" => in_t = false,
                b"p" => {
                    if in_p {
                        let text = cur_text.trim();
                        if !text.is_empty() {
                            let mut rec = ParagraphRecord::new(records.len(), text);
                            rec.explicit_level = pending_level;
                            records.push(rec);
                        }
                        in_p = false;
                        cur_text.clear();
                        pending_level = None;
                    }
                }
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_t {
                    if let Ok(cow) = t.unescape() {
                        cur_text.push_str(&cow);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocxError::Xml { part: "word/document.xml", source: e });
            }
            _ => {}
        }
    }

    Ok(records)
}
