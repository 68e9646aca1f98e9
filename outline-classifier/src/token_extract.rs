use once_cell::sync::Lazy;
use regex::Regex;

use crate::pattern_table::looks_like_numbering;

// Separator-split candidates, in preference order for ties. For ") " and
// "] " the closing bracket belongs to the token, so "(a) Excavate" yields
// "(a)" rather than "(a".
struct Separator {
    needle: &'static str,
    keep_in_token: usize,
}

const SEPARATORS: &[Separator] = &[
    Separator { needle: "\t", keep_in_token: 0 },
    Separator { needle: "  ", keep_in_token: 0 },
    Separator { needle: " - ", keep_in_token: 0 },
    Separator { needle: ") ", keep_in_token: 1 },
    Separator { needle: "] ", keep_in_token: 1 },
];

// Anchored prefix forms mirroring the pattern table's order. Each captures
// the token and, after a whitespace run, the remainder (token-only
// paragraphs are accepted too).
static PREFIX_FORMS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?s)^(\d+\.0)(?:\s+(.*))?$",
        r"(?s)^(\d+\.\d{2})(?:\s+(.*))?$",
        r"(?s)^([A-Z]\.)(?:\s+(.*))?$",
        r"(?s)^([IVX]{2,}\.)(?:\s+(.*))?$",
        r"(?s)^(\d+\.)(?:\s+(.*))?$",
        r"(?s)^([ivx]+\.)(?:\s+(.*))?$",
        r"(?s)^([a-z]\.)(?:\s+(.*))?$",
        r"(?s)^(\(\d+\))(?:\s+(.*))?$",
        r"(?s)^(\([a-z]\))(?:\s+(.*))?$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern compiles"))
    .collect()
});

/// Try to split a paragraph's text into (numbering token, remainder).
///
/// Two strategies, in order: split on the earliest separator occurrence
/// and keep the left side when it looks like numbering; otherwise match
/// the pattern-table forms as an anchored prefix. Returns None when the
/// text carries no recognizable numbering prefix.
pub fn extract_token(raw_text: &str) -> Option<(String, String)> {
    let text = raw_text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some((token, rest)) = separator_split(text) {
        return Some((token, rest));
    }

    for form in PREFIX_FORMS.iter() {
        if let Some(caps) = form.captures(text) {
            let token = caps.get(1).map(|m| m.as_str().to_string())?;
            let rest = caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
            return Some((token, rest));
        }
    }

    None
}

fn separator_split(text: &str) -> Option<(String, String)> {
    let mut best: Option<(usize, &Separator)> = None;
    for sep in SEPARATORS {
        if let Some(pos) = text.find(sep.needle) {
            match best {
                Some((best_pos, _)) if best_pos <= pos => {}
                _ => best = Some((pos, sep)),
            }
        }
    }
    let (pos, sep) = best?;
    let left = text[..pos + sep.keep_in_token].trim();
    let right = text[pos + sep.needle.len()..].trim();
    if left.is_empty() || !looks_like_numbering(left) {
        return None;
    }
    Some((left.to_string(), right.to_string()))
}
