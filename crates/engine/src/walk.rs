//! The column filter engine.
//!
//! Given a decision table, the answered columns and a starting position,
//! find the next column that needs a response. The walk narrows the
//! candidate rows once, then visits columns left to right:
//!
//! 1. already answered → next column
//! 2. result-only or hidden → next column
//! 3. commentary → [`StepResult::Comment`]
//! 4. otherwise zero / one / many candidate values →
//!    [`StepResult::Skip`] / [`StepResult::AutoSelect`] / [`StepResult::Options`]
//!
//! The first column that needs a response ends the turn.

use crate::decision::DecisionTable;
use liftcheck_core::column::ColumnRole;
use liftcheck_core::selection::Selection;
use liftcheck_core::step::{Flow, StepResult};

/// At most this many distinct values are joined into a comment.
pub const MAX_COMMENT_VALUES: usize = 5;
pub const COMMENT_SEPARATOR: &str = " / ";

/// Next step of the generic walk, or `Done(flow)` when exhausted.
pub fn next_step(
    table: &DecisionTable,
    selection: &Selection,
    start: usize,
    flow: Flow,
) -> StepResult {
    walk(table, selection, start).unwrap_or(StepResult::Done(flow))
}

/// `None` means every column from `start` is resolved.
fn walk(table: &DecisionTable, selection: &Selection, start: usize) -> Option<StepResult> {
    let candidates = table.candidates(selection);

    for column in table.descriptors().iter().skip(start) {
        if selection.contains(&column.name) {
            continue;
        }
        match column.role {
            ColumnRole::ResultOnly | ColumnRole::Hidden => continue,
            ColumnRole::Commentary => {
                let values = candidates.distinct_non_empty(&column.name);
                return Some(StepResult::Comment {
                    field: column.name.clone(),
                    text: comment_text(&values),
                });
            }
            ColumnRole::Question => {
                let values = candidates.distinct_non_empty(&column.name);
                return Some(StepResult::classify(column.name.clone(), values));
            }
        }
    }

    None
}

/// The single value, or the first few joined, or empty.
pub fn comment_text(values: &[String]) -> String {
    values
        .iter()
        .take(MAX_COMMENT_VALUES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(COMMENT_SEPARATOR)
}
