//! Shared models used across crates

use serde::{Deserialize, Serialize};

/// A single paragraph as delivered by a document reader, before any
/// numbering analysis has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphRecord {
    /// 0-based position in document order. Unique and stable.
    pub index: usize,
    /// Visible paragraph text, including any literal numbering prefix.
    pub raw_text: String,
    /// Numbering token already known from document metadata (e.g. a
    /// word processor's computed list string such as "1.01").
    #[serde(default)]
    pub explicit_numbering: Option<String>,
    /// Outline depth already known from document metadata.
    #[serde(default)]
    pub explicit_level: Option<u32>,
}

impl ParagraphRecord {
    pub fn new(index: usize, raw_text: impl Into<String>) -> Self {
        Self { index, raw_text: raw_text.into(), explicit_numbering: None, explicit_level: None }
    }
}

/// Where a paragraph's numbering token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingSource {
    /// Recorded in the source format's list metadata.
    Explicit,
    /// Recovered by pattern-matching the visible text.
    Inferred,
    /// No numbering basis at all.
    None,
}

/// Classification result for one paragraph. One output per input record,
/// in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedParagraph {
    pub index: usize,
    pub raw_text: String,
    #[serde(default)]
    pub explicit_numbering: Option<String>,
    #[serde(default)]
    pub explicit_level: Option<u32>,
    /// The numbering text actually used: explicit if present, else inferred.
    #[serde(default)]
    pub numbering_token: Option<String>,
    pub numbering_source: NumberingSource,
    /// Outline depth. Defined only when `numbering_token` is defined.
    #[serde(default)]
    pub level: Option<u32>,
    /// `raw_text` with the numbering prefix and one following separator removed.
    pub cleaned_content: String,
    pub is_list_item: bool,
}

/// Recognized numbering conventions, named by the *form* of the token.
/// `ooxml_name` maps each form onto the WordprocessingML `w:numFmt`
/// vocabulary used when a package is written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    /// "1.0", "2.0"
    MajorDecimal,
    /// "1.01", "1.02"
    MinorDecimal,
    /// "A.", "B."
    UpperLetter,
    /// "II.", "XVII." (two or more roman letters; a lone "I." is UpperLetter)
    UpperRoman,
    /// "1.", "47."
    PlainDecimal,
    /// "i.", "ii."
    LowerRoman,
    /// "a.", "b."
    LowerLetter,
    /// "(1)", "(2)"
    ParenDecimal,
    /// "(a)", "(b)"
    ParenLetter,
}

impl NumberFormat {
    pub fn ooxml_name(self) -> &'static str {
        match self {
            NumberFormat::MajorDecimal => "decimal",
            NumberFormat::MinorDecimal => "decimalZero",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::PlainDecimal => "decimal",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::ParenDecimal => "decimal",
            NumberFormat::ParenLetter => "lowerLetter",
        }
    }
}
