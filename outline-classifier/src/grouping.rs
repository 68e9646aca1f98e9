use std::collections::BTreeMap;

use outline_model::ClassifiedParagraph;
use serde::Serialize;

use crate::pattern_table::PatternTable;

/// A maximal run of consecutive list items. `members` holds positions in
/// the classified stream, not paragraph indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListGroup {
    /// 1-based group id in document order.
    pub list_id: u32,
    pub members: Vec<usize>,
}

/// Document-level statistics over a classified stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineSummary {
    pub total_paragraphs: usize,
    pub list_items: usize,
    pub non_list_items: usize,
    pub group_count: usize,
    /// Count of list items per assigned level.
    pub level_distribution: BTreeMap<u32, usize>,
    /// Count of classifiable tokens per OOXML numbering format name.
    pub format_distribution: BTreeMap<String, usize>,
}

/// Group contiguous list items. A non-list paragraph ends the current
/// group; groups are never merged across it.
pub fn group_lists(paragraphs: &[ClassifiedParagraph]) -> Vec<ListGroup> {
    let mut groups: Vec<ListGroup> = Vec::new();
    let mut current: Vec<usize> = Vec::new();

    for (pos, para) in paragraphs.iter().enumerate() {
        if para.is_list_item {
            current.push(pos);
        } else if !current.is_empty() {
            groups.push(ListGroup { list_id: groups.len() as u32 + 1, members: std::mem::take(&mut current) });
        }
    }
    if !current.is_empty() {
        groups.push(ListGroup { list_id: groups.len() as u32 + 1, members: current });
    }
    groups
}

pub fn summarize(paragraphs: &[ClassifiedParagraph], table: &PatternTable) -> OutlineSummary {
    let list_items = paragraphs.iter().filter(|p| p.is_list_item).count();
    let mut level_distribution: BTreeMap<u32, usize> = BTreeMap::new();
    let mut format_distribution: BTreeMap<String, usize> = BTreeMap::new();

    for para in paragraphs {
        if let Some(level) = para.level {
            *level_distribution.entry(level).or_insert(0) += 1;
        }
        if let Some((format, _)) = para.numbering_token.as_deref().and_then(|t| table.classify_token(t)) {
            *format_distribution.entry(format.ooxml_name().to_string()).or_insert(0) += 1;
        }
    }

    OutlineSummary {
        total_paragraphs: paragraphs.len(),
        list_items,
        non_list_items: paragraphs.len() - list_items,
        group_count: group_lists(paragraphs).len(),
        level_distribution,
        format_distribution,
    }
}
