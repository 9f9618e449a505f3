//! JSON Patch support for partial habit updates
//!
//! Only `/name` and `/description` can be patched. The patched values are
//! validated with the same rules as a full update.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::model::Habit;
use crate::core::error::{ApiResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
    Test,
}

/// One operation of a JSON Patch document
#[derive(Debug, Clone, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
struct PatchableHabit {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters."))]
    description: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum PatchPath {
    Name,
    Description,
}

impl PatchPath {
    fn parse(path: &str) -> ApiResult<Self> {
        match path.trim_end_matches('/').to_ascii_lowercase().as_str() {
            "/name" => Ok(PatchPath::Name),
            "/description" => Ok(PatchPath::Description),
            _ => Err(invalid(format!("path '{path}' cannot be patched"))),
        }
    }
}

fn invalid(message: impl Into<String>) -> crate::core::ApiError {
    ValidationError::InvalidPatch {
        message: message.into(),
    }
    .into()
}

fn string_value(op: &PatchOperation) -> ApiResult<Option<String>> {
    match &op.value {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) => Ok(None),
        Some(_) => Err(invalid(format!("value for '{}' must be a string", op.path))),
        None => Err(invalid(format!("operation on '{}' requires a value", op.path))),
    }
}

impl PatchableHabit {
    fn apply(&mut self, op: &PatchOperation) -> ApiResult<()> {
        let path = PatchPath::parse(&op.path)?;
        match op.op {
            PatchOp::Add | PatchOp::Replace => {
                let value = string_value(op)?;
                match path {
                    PatchPath::Name => self.name = value.unwrap_or_default(),
                    PatchPath::Description => self.description = value,
                }
            }
            PatchOp::Remove => match path {
                PatchPath::Name => self.name.clear(),
                PatchPath::Description => self.description = None,
            },
            PatchOp::Test => {
                let expected = string_value(op)?;
                let actual = match path {
                    PatchPath::Name => Some(self.name.clone()),
                    PatchPath::Description => self.description.clone(),
                };
                if actual != expected {
                    return Err(invalid(format!("test failed for '{}'", op.path)));
                }
            }
        }
        Ok(())
    }
}

/// Apply a patch document to a habit
///
/// Operations run in order on a copy; the habit is only modified when every
/// operation succeeds and the result passes validation.
pub fn apply_patch(habit: &mut Habit, operations: &[PatchOperation]) -> ApiResult<()> {
    let mut patched = PatchableHabit {
        name: habit.name.clone(),
        description: habit.description.clone(),
    };

    for op in operations {
        patched.apply(op)?;
    }
    patched.validate()?;

    habit.name = patched.name;
    habit.description = patched.description;
    habit.updated_at_utc = Some(Utc::now());
    Ok(())
}
