use outline_model::ClassifiedParagraph;

use crate::pattern_table::PatternTable;

/// Sequential level refinement: re-derive each list item's depth from its
/// relationship to the items before it instead of from token form alone.
///
/// State is a stack of (canonical ladder position, assigned level) pairs,
/// reset at every non-list paragraph. A form one ladder step deeper than
/// the stack top nests one level; the same form is a sibling; a shallower
/// form pops back to its ancestor. Tokens no matcher recognizes continue
/// at the current depth. Explicit levels from document metadata still win
/// and re-seat the context.
///
/// This is a left-to-right fold and must run once per document; it never
/// runs inside the per-paragraph pass.
pub fn refine_levels_contextually(paragraphs: &mut [ClassifiedParagraph], table: &PatternTable) {
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for para in paragraphs.iter_mut() {
        if !para.is_list_item {
            stack.clear();
            continue;
        }

        let canon = para
            .numbering_token
            .as_deref()
            .and_then(|t| table.classify_token(t))
            .map(|(_, lvl)| lvl);

        let level = if let Some(explicit) = para.explicit_level {
            if let Some(c) = canon {
                while stack.last().is_some_and(|&(sc, _)| sc >= c) {
                    stack.pop();
                }
                stack.push((c, explicit));
            }
            explicit
        } else {
            assign_from_context(canon, &mut stack)
        };

        para.level = Some(level);
    }
}

fn assign_from_context(canon: Option<u32>, stack: &mut Vec<(u32, u32)>) -> u32 {
    let Some(c) = canon else {
        // Unknown form: stay at the current depth.
        return stack.last().map_or(0, |&(_, lvl)| lvl);
    };

    match stack.last().copied() {
        None => {
            stack.push((c, 0));
            0
        }
        Some((top_c, top_l)) if c > top_c => {
            // Deeper form nests exactly one step, however far its
            // canonical position jumps.
            let lvl = top_l + 1;
            stack.push((c, lvl));
            lvl
        }
        Some((top_c, top_l)) if c == top_c => top_l,
        Some(_) => {
            // Shallower form: pop to the matching ancestor, or restart.
            while stack.last().is_some_and(|&(sc, _)| sc > c) {
                stack.pop();
            }
            match stack.last().copied() {
                Some((sc, sl)) if sc == c => sl,
                Some((_, sl)) => {
                    let lvl = sl + 1;
                    stack.push((c, lvl));
                    lvl
                }
                None => {
                    stack.push((c, 0));
                    0
                }
            }
        }
    }
}
