pub mod contextual;
pub mod grouping;
pub mod pattern_table;
pub mod token_extract;

use outline_model::{ClassifiedParagraph, NumberingSource, ParagraphRecord};
use pattern_table::PatternTable;
use token_extract::extract_token;

/// Classify a paragraph stream in document order: one output per input,
/// no merging, no dropping. Each record is classified independently of its
/// neighbors; see [`contextual::refine_levels_contextually`] for the
/// opt-in sequential refinement.
///
/// Total over any input: malformed or empty text yields a non-list
/// paragraph, never an error.
pub fn classify(records: &[ParagraphRecord], table: &PatternTable) -> Vec<ClassifiedParagraph> {
    records.iter().map(|r| classify_record(r, table)).collect()
}

fn classify_record(record: &ParagraphRecord, table: &PatternTable) -> ClassifiedParagraph {
    let (numbering_token, numbering_source) = match &record.explicit_numbering {
        Some(explicit) => (Some(explicit.clone()), NumberingSource::Explicit),
        None => match extract_token(&record.raw_text) {
            Some((token, _rest)) => (Some(token), NumberingSource::Inferred),
            None => (None, NumberingSource::None),
        },
    };

    // No level without a numbering basis. Explicit metadata wins over the
    // canonical level; a token no matcher recognizes stays a list item
    // with its level left open.
    let level = match &numbering_token {
        Some(token) => record
            .explicit_level
            .or_else(|| table.classify_token(token).map(|(_, lvl)| lvl)),
        None => None,
    };

    let cleaned_content = clean_content(&record.raw_text, numbering_token.as_deref());
    let is_list_item = numbering_token.is_some();

    ClassifiedParagraph {
        index: record.index,
        raw_text: record.raw_text.clone(),
        explicit_numbering: record.explicit_numbering.clone(),
        explicit_level: record.explicit_level,
        numbering_token,
        numbering_source,
        level,
        cleaned_content,
        is_list_item,
    }
}

/// Strip the numbering token and one following whitespace run from the
/// start of the text. The match is exact and case-sensitive; when the
/// token is not a verbatim prefix (typical for tokens that came from list
/// metadata rather than the text itself) the text passes through trimmed.
fn clean_content(raw_text: &str, token: Option<&str>) -> String {
    let trimmed = raw_text.trim();
    match token {
        Some(tok) => match trimmed.strip_prefix(tok) {
            Some(rest) => rest.trim_start_matches([' ', '\t']).trim().to_string(),
            None => trimmed.to_string(),
        },
        None => trimmed.to_string(),
    }
}
