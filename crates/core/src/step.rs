//! Engine responses, one per protocol turn.
//!
//! [`StepResult`] is the only shape the engine ever returns. Its
//! [`Serialize`] impl is the single place where the wire format lives:
//!
//! | Variant      | JSON                                          |
//! |--------------|-----------------------------------------------|
//! | `Options`    | `{"field", "options": [...]}`                 |
//! | `AutoSelect` | `{"field", "options": [v], "auto_select": true}` |
//! | `Skip`       | `{"field", "skip": true}`                     |
//! | `Comment`    | `{"field", "comment": "..."}`                 |
//! | `AutoFill`   | `{"field", "auto_fill": "..."}`               |
//! | `Done(Primary)`   | `{"done": true, "result_ready": true}`   |
//! | `Done(Secondary)` | `{"upsDone": true}`                      |

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Which decision flow reached its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The main contactor decision table.
    Primary,
    /// The backup-landing-device (UPS) table.
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The user must pick one of `values` for `field`.
    Options { field: String, values: Vec<String> },
    /// Exactly one candidate; the client advances without prompting.
    AutoSelect { field: String, values: Vec<String> },
    /// No candidates; the column contributes nothing.
    Skip { field: String },
    /// Informational text; displayed, never used to filter.
    Comment { field: String, text: String },
    /// Value computed from another table; the client stores it read-only.
    AutoFill { field: String, value: String },
    /// Every column of the flow is resolved.
    Done(Flow),
}

impl StepResult {
    /// Classify a column by its candidate count: zero, one, or many.
    pub fn classify(field: impl Into<String>, values: Vec<String>) -> Self {
        let field = field.into();
        match values.len() {
            0 => StepResult::Skip { field },
            1 => StepResult::AutoSelect { field, values },
            _ => StepResult::Options { field, values },
        }
    }

    /// The field this step is about, `None` for terminal steps.
    pub fn field(&self) -> Option<&str> {
        match self {
            StepResult::Options { field, .. }
            | StepResult::AutoSelect { field, .. }
            | StepResult::Skip { field }
            | StepResult::Comment { field, .. }
            | StepResult::AutoFill { field, .. } => Some(field),
            StepResult::Done(_) => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, StepResult::Done(_))
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StepResult::Options { .. } => "options",
            StepResult::AutoSelect { .. } => "auto_select",
            StepResult::Skip { .. } => "skip",
            StepResult::Comment { .. } => "comment",
            StepResult::AutoFill { .. } => "auto_fill",
            StepResult::Done(_) => "done",
        }
    }
}

impl Serialize for StepResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            StepResult::Options { field, values } => {
                map.serialize_entry("field", field)?;
                map.serialize_entry("options", values)?;
            }
            StepResult::AutoSelect { field, values } => {
                map.serialize_entry("field", field)?;
                map.serialize_entry("options", values)?;
                map.serialize_entry("auto_select", &true)?;
            }
            StepResult::Skip { field } => {
                map.serialize_entry("field", field)?;
                map.serialize_entry("skip", &true)?;
            }
            StepResult::Comment { field, text } => {
                map.serialize_entry("field", field)?;
                map.serialize_entry("comment", text)?;
            }
            StepResult::AutoFill { field, value } => {
                map.serialize_entry("field", field)?;
                map.serialize_entry("auto_fill", value)?;
            }
            StepResult::Done(Flow::Primary) => {
                map.serialize_entry("done", &true)?;
                map.serialize_entry("result_ready", &true)?;
            }
            StepResult::Done(Flow::Secondary) => {
                map.serialize_entry("upsDone", &true)?;
            }
        }
        map.end()
    }
}
