use std::io::Write;

use docx_io::inspect::inspect_docx;
use docx_io::reader::read_docx_to_paragraphs;
use docx_io::writer::write_docx;
use docx_io::DocxError;
use outline_classifier::classify;
use outline_classifier::pattern_table::PatternTable;
use outline_model::ParagraphRecord;

fn classified_fixture() -> Vec<outline_model::ClassifiedParagraph> {
    let records = vec![
        ParagraphRecord::new(0, "1.0\tGeneral"),
        ParagraphRecord::new(1, "1.01\tScope of work"),
        ParagraphRecord::new(2, "A. Submittals & samples"),
        ParagraphRecord::new(3, "Plain body text <with markup>"),
    ];
    classify(&records, &PatternTable::new())
}

#[test]
fn written_package_reads_back_with_text_and_levels() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("rebuilt.docx");
    write_docx(&classified_fixture(), &path).expect("package writes");

    let reread = read_docx_to_paragraphs(&path).expect("package reads back");
    assert_eq!(reread.len(), 4);

    assert_eq!(reread[0].raw_text, "General");
    assert_eq!(reread[0].explicit_level, Some(0));
    assert_eq!(reread[1].raw_text, "Scope of work");
    assert_eq!(reread[1].explicit_level, Some(1));
    assert_eq!(reread[2].raw_text, "Submittals & samples");
    assert_eq!(reread[2].explicit_level, Some(2));
    assert_eq!(reread[3].raw_text, "Plain body text <with markup>");
    assert_eq!(reread[3].explicit_level, None, "prose carries no numbering");
}

#[test]
fn written_package_defines_the_canonical_numbering_scheme() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("rebuilt.docx");
    write_docx(&classified_fixture(), &path).expect("package writes");

    let summary = inspect_docx(&path).expect("package inspects");
    assert!(summary.parts.iter().any(|p| p == "word/document.xml"));
    assert!(summary.parts.iter().any(|p| p == "word/numbering.xml"));
    assert!(summary.parts.iter().any(|p| p == "[Content_Types].xml"));

    assert_eq!(summary.paragraph_count, 4);
    assert_eq!(summary.numbered_paragraph_count, 3);

    assert_eq!(summary.abstract_numbering.len(), 1);
    let levels = &summary.abstract_numbering[0].levels;
    assert_eq!(levels.len(), 6);
    assert_eq!(levels[0].num_fmt.as_deref(), Some("decimal"));
    assert_eq!(levels[0].lvl_text.as_deref(), Some("%1.0"));
    assert_eq!(levels[1].num_fmt.as_deref(), Some("decimalZero"));
    assert_eq!(levels[1].lvl_text.as_deref(), Some("%1.%2"));
    assert_eq!(levels[2].num_fmt.as_deref(), Some("upperLetter"));
    assert_eq!(levels[4].num_fmt.as_deref(), Some("lowerLetter"));
    assert_eq!(levels[5].num_fmt.as_deref(), Some("lowerRoman"));
    for level in levels {
        assert_eq!(level.start.as_deref(), Some("1"));
    }

    assert_eq!(summary.concrete_numbering.len(), 1);
    assert_eq!(summary.concrete_numbering[0].num_id, "1");
    assert_eq!(summary.concrete_numbering[0].abstract_num_id.as_deref(), Some("0"));
}

#[test]
fn unlevelled_list_items_are_written_at_the_top_level() {
    let records = vec![ParagraphRecord::new(0, "(ii) Unclassifiable but listed")];
    let classified = classify(&records, &PatternTable::new());
    assert!(classified[0].is_list_item);
    assert_eq!(classified[0].level, None);

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("unlevelled.docx");
    write_docx(&classified, &path).expect("package writes");

    let reread = read_docx_to_paragraphs(&path).expect("package reads back");
    assert_eq!(reread[0].explicit_level, Some(0));
    assert_eq!(reread[0].raw_text, "Unclassifiable but listed");
}

#[test]
fn tab_and_break_runs_are_preserved_in_extracted_text() {
    // Hand-assemble a tiny package so the reader sees w:tab and w:br.
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("tabs.docx");
    let document = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>1.01</w:t><w:tab/><w:t>Scope</w:t></w:r></w:p>
    <w:p><w:r><w:t>first line</w:t><w:br/><w:t>second line</w:t></w:r></w:p>
    <w:p><w:r><w:t>   </w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    let file = std::fs::File::create(&path).expect("create file");
    let mut zip = zip::ZipWriter::new(file);
    let opt = zip::write::FileOptions::default();
    zip.start_file("word/document.xml", opt).expect("start entry");
    zip.write_all(document.as_bytes()).expect("write entry");
    zip.finish().expect("finish zip");

    let records = read_docx_to_paragraphs(&path).expect("package reads");
    assert_eq!(records.len(), 2, "blank paragraph is dropped");
    assert_eq!(records[0].raw_text, "1.01\tScope");
    assert_eq!(records[1].raw_text, "first line\nsecond line");
    assert_eq!(records[0].index, 0);
    assert_eq!(records[1].index, 1);
}

#[test]
fn non_zip_input_is_a_package_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("not-a-package.docx");
    std::fs::write(&path, "just text").expect("write file");

    let err = read_docx_to_paragraphs(&path).expect_err("plain text is not a package");
    assert!(matches!(err, DocxError::Package(_)), "unexpected error: {err:?}");
}

#[test]
fn zip_without_document_part_is_a_missing_part_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.docx");
    let file = std::fs::File::create(&path).expect("create file");
    let mut zip = zip::ZipWriter::new(file);
    let opt = zip::write::FileOptions::default();
    zip.start_file("word/styles.xml", opt).expect("start entry");
    zip.write_all(b"<w:styles/>").expect("write entry");
    zip.finish().expect("finish zip");

    let err = read_docx_to_paragraphs(&path).expect_err("document part is required");
    assert!(matches!(err, DocxError::MissingPart("word/document.xml")), "unexpected error: {err:?}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = read_docx_to_paragraphs(std::path::Path::new("does/not/exist.docx"))
        .expect_err("missing file fails");
    assert!(matches!(err, DocxError::Io { .. }), "unexpected error: {err:?}");
}
