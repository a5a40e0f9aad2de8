//! Primary flow: three schema-specific entry questions, then the generic walk.

use crate::decision::DecisionTable;
use crate::schema::PrimarySchema;
use crate::walk::next_step;
use liftcheck_core::selection::Selection;
use liftcheck_core::step::{Flow, StepResult};

/// Next step of the main contactor flow.
///
/// - category: every value in the table
/// - panel model: values under the chosen category
/// - slope presence: values under category and panel model; may be skipped
///
/// Then the generic walk from the column after slope presence.
pub fn next_primary_step(
    table: &DecisionTable,
    schema: &PrimarySchema,
    selection: &Selection,
) -> StepResult {
    let category = schema.category_column.as_str();
    let panel_model = schema.panel_model_column.as_str();
    let slope = schema.slope_column.as_str();
    let data = table.table();

    if !selection.contains(category) {
        return entry_prompt(category, data.distinct_non_empty(category));
    }

    if !selection.contains(panel_model) {
        let subset = data.filter([(category, selection.value(category))]);
        return entry_prompt(panel_model, subset.distinct_non_empty(panel_model));
    }

    if !selection.contains(slope) {
        let subset = data.filter([
            (category, selection.value(category)),
            (panel_model, selection.value(panel_model)),
        ]);
        return StepResult::classify(slope, subset.distinct_non_empty(slope));
    }

    let start = table.position(slope).map_or(0, |idx| idx + 1);
    next_step(table, selection, start, Flow::Primary)
}

/// Category and panel model are always asked, even with nothing to offer;
/// a single value is still auto-selected.
fn entry_prompt(field: &str, values: Vec<String>) -> StepResult {
    if values.len() == 1 {
        StepResult::AutoSelect {
            field: field.to_string(),
            values,
        }
    } else {
        StepResult::Options {
            field: field.to_string(),
            values,
        }
    }
}
