//! Task domains a question can exercise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The skill area a question belongs to.
///
/// Writing and visual-motor tasks share the `Writing` domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskDomain {
    Reading,
    Number,
    Attention,
    Writing,
}

impl TaskDomain {
    /// All domains, in declaration order.
    pub const ALL: [TaskDomain; 4] = [
        TaskDomain::Reading,
        TaskDomain::Number,
        TaskDomain::Attention,
        TaskDomain::Writing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskDomain::Reading => "reading",
            TaskDomain::Number => "number",
            TaskDomain::Attention => "attention",
            TaskDomain::Writing => "writing",
        }
    }
}

impl fmt::Display for TaskDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskDomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reading" => Ok(TaskDomain::Reading),
            "number" | "math" => Ok(TaskDomain::Number),
            "attention" => Ok(TaskDomain::Attention),
            "writing" | "visual" | "visual-motor" => Ok(TaskDomain::Writing),
            other => Err(ValidationError::UnknownDomain(other.to_string())),
        }
    }
}
