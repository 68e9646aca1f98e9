use std::fs::File;
use std::io::Write;
use std::path::Path;

use outline_model::ClassifiedParagraph;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::DocxError;

// Abstract numbering scheme: one level per canonical outline depth. The
// second level renders "1.01"-style subsections via decimalZero.
const NUMBERING_LEVELS: &[(&str, &str)] = &[
    ("decimal", "%1.0"),
    ("decimalZero", "%1.%2"),
    ("upperLetter", "%3."),
    ("decimal", "%4."),
    ("lowerLetter", "%5."),
    ("lowerRoman", "%6."),
];

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn build_document_xml(paragraphs: &[ClassifiedParagraph]) -> String {
    let mut body = String::new();
    for para in paragraphs {
        // Cleaned content equals the trimmed raw text for non-list
        // paragraphs; a list item may legitimately be token-only and
        // empty (Word renders just the number).
        let text = para.cleaned_content.as_str();
        if text.is_empty() && !para.is_list_item {
            continue;
        }
        body.push_str("<w:p>");
        if para.is_list_item {
            // Six levels are defined; anything deeper is clamped.
            let ilvl = para.level.unwrap_or(0).min(NUMBERING_LEVELS.len() as u32 - 1);
            body.push_str("<w:pPr><w:numPr>");
            body.push_str(&format!(r#"<w:ilvl w:val="{ilvl}"/><w:numId w:val="1"/>"#));
            body.push_str("</w:numPr></w:pPr>");
        }
        body.push_str(r#"<w:r><w:t xml:space="preserve">"#);
        body.push_str(&xml_escape(text));
        body.push_str("</w:t></w:r></w:p>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
 xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml"
 xmlns:w15="http://schemas.microsoft.com/office/word/2012/wordml"
 xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"
 xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 mc:Ignorable="w14 w15">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

fn build_numbering_xml() -> String {
    let mut levels = String::new();
    for (ilvl, (num_fmt, lvl_text)) in NUMBERING_LEVELS.iter().enumerate() {
        let indent = (ilvl + 1) * 720;
        levels.push_str(&format!(
            r#"<w:lvl w:ilvl="{ilvl}">
      <w:start w:val="1"/>
      <w:numFmt w:val="{num_fmt}"/>
      <w:lvlText w:val="{lvl_text}"/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="{indent}" w:hanging="360"/></w:pPr>
    </w:lvl>
    "#
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    {levels}</w:abstractNum>
  <w:num w:numId="1">
    <w:abstractNumId w:val="0"/>
  </w:num>
</w:numbering>"#
    )
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
}

fn word_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
}

fn styles_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#
}

/// Assemble a `.docx` package from a classified stream. List items get
/// `w:numPr` references into a single abstract numbering definition whose
/// levels follow the canonical outline scheme; text is written from the
/// cleaned content so Word's own numbering renders the prefixes.
pub fn write_docx(paragraphs: &[ClassifiedParagraph], out_path: &Path) -> Result<(), DocxError> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| DocxError::io(out_path, e))?;
        }
    }

    let file = File::create(out_path).map_err(|e| DocxError::io(out_path, e))?;
    let mut zip = ZipWriter::new(file);
    let opt = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let document_xml = build_document_xml(paragraphs);

    zip.start_file("[Content_Types].xml", opt)?;
    zip.write_all(content_types_xml().as_bytes()).map_err(|e| DocxError::io(out_path, e))?;

    zip.start_file("_rels/.rels", opt)?;
    zip.write_all(rels_xml().as_bytes()).map_err(|e| DocxError::io(out_path, e))?;

    zip.start_file("word/document.xml", opt)?;
    zip.write_all(document_xml.as_bytes()).map_err(|e| DocxError::io(out_path, e))?;

    zip.start_file("word/_rels/document.xml.rels", opt)?;
    zip.write_all(word_rels_xml().as_bytes()).map_err(|e| DocxError::io(out_path, e))?;

    zip.start_file("word/numbering.xml", opt)?;
    zip.write_all(build_numbering_xml().as_bytes()).map_err(|e| DocxError::io(out_path, e))?;

    zip.start_file("word/styles.xml", opt)?;
    zip.write_all(styles_xml().as_bytes()).map_err(|e| DocxError::io(out_path, e))?;

    zip.finish()?;
    Ok(())
}
