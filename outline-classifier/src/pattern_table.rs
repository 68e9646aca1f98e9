use once_cell::sync::Lazy;
use outline_model::NumberFormat;
use regex::Regex;

/// One recognized numbering convention: a form matcher plus the outline
/// depth that form conventionally implies.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    pub format: NumberFormat,
    pub canonical_level: u32,
    matcher: Regex,
}

impl PatternEntry {
    pub fn new(matcher: Regex, format: NumberFormat, canonical_level: u32) -> Self {
        Self { format, canonical_level, matcher }
    }

    pub fn matches(&self, token: &str) -> bool {
        self.matcher.is_match(token)
    }
}

/// Ordered table of numbering conventions. Matching is evaluated
/// top-to-bottom and the first hit wins; matchers test only the form of a
/// token (digit/letter/roman shape and punctuation), never its counting
/// value.
#[derive(Debug, Clone)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

static DEFAULT_ENTRIES: Lazy<Vec<PatternEntry>> = Lazy::new(|| {
    // Default order. UpperRoman requires two or more roman letters and is
    // tested after UpperLetter, so a lone "I." stays an upper letter while
    // "XVII." is roman. On the lowercase side roman comes first, so "i."
    // lands on the roman level the way "i., ii., iii." lists expect.
    vec![
        PatternEntry::new(re(r"^\d+\.0$"), NumberFormat::MajorDecimal, 0),
        PatternEntry::new(re(r"^\d+\.\d{2}$"), NumberFormat::MinorDecimal, 1),
        PatternEntry::new(re(r"^[A-Z]\.$"), NumberFormat::UpperLetter, 2),
        PatternEntry::new(re(r"^[IVX]{2,}\.$"), NumberFormat::UpperRoman, 2),
        PatternEntry::new(re(r"^\d+\.$"), NumberFormat::PlainDecimal, 3),
        PatternEntry::new(re(r"^[ivx]+\.$"), NumberFormat::LowerRoman, 5),
        PatternEntry::new(re(r"^[a-z]\.$"), NumberFormat::LowerLetter, 4),
        PatternEntry::new(re(r"^\(\d+\)$"), NumberFormat::ParenDecimal, 3),
        PatternEntry::new(re(r"^\([a-z]\)$"), NumberFormat::ParenLetter, 4),
    ]
});

impl PatternTable {
    /// The shared default table described above.
    pub fn new() -> Self {
        Self { entries: DEFAULT_ENTRIES.clone() }
    }

    /// Build a table with a caller-supplied matcher order.
    pub fn from_entries(entries: Vec<PatternEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// First matching convention for a full numbering token, or None.
    pub fn classify_token(&self, token: &str) -> Option<(NumberFormat, u32)> {
        self.entries
            .iter()
            .find(|e| e.matches(token))
            .map(|e| (e.format, e.canonical_level))
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Permissive candidate filter for separator-split token extraction: strip
/// everything non-alphanumeric and accept the usual token alphabets. Final
/// classification is always deferred to the pattern table.
pub fn looks_like_numbering(s: &str) -> bool {
    let stripped: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if stripped.is_empty() {
        return false;
    }
    let all_digits = stripped.chars().all(|c| c.is_ascii_digit());
    let all_upper = stripped.chars().all(|c| c.is_ascii_uppercase());
    let all_lower = stripped.chars().all(|c| c.is_ascii_lowercase());
    let all_roman = stripped
        .chars()
        .all(|c| matches!(c.to_ascii_lowercase(), 'i' | 'v' | 'x' | 'l' | 'c' | 'd' | 'm'));
    all_digits
        || all_upper
        || all_lower
        || all_roman
        || digits_then_letters(&stripped)
        || letters_then_digits(&stripped)
}

fn digits_then_letters(s: &str) -> bool {
    let n = s.chars().take_while(|c| c.is_ascii_digit()).count();
    n > 0 && n < s.len() && s[n..].chars().all(|c| c.is_ascii_alphabetic())
}

fn letters_then_digits(s: &str) -> bool {
    let n = s.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    n > 0 && n < s.len() && s[n..].chars().all(|c| c.is_ascii_digit())
}
