//! Habit storage record

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Entity, FieldValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HabitType {
    Binary = 1,
    Measurable = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HabitStatus {
    Ongoing = 1,
    Completed = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrequencyType {
    Daily = 1,
    Weekly = 2,
    Monthly = 3,
}

// Enums sort and filter by their ordinal.
impl From<HabitType> for FieldValue {
    fn from(value: HabitType) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<HabitStatus> for FieldValue {
    fn from(value: HabitStatus) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<FrequencyType> for FieldValue {
    fn from(value: FrequencyType) -> Self {
        FieldValue::Integer(value as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequency {
    pub frequency_type: FrequencyType,
    pub times_per_period: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub value: i32,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub target: i32,
    pub current: i32,
}

/// A tag assigned to a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitTag {
    pub tag_id: String,
    pub created_at_utc: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub habit_type: HabitType,
    pub frequency: Frequency,
    pub target: Target,
    pub status: HabitStatus,
    pub is_archived: bool,
    pub end_date: Option<NaiveDate>,
    pub milestone: Option<Milestone>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
    pub last_completed_at_utc: Option<DateTime<Utc>>,
    pub tags: Vec<HabitTag>,
}

impl Habit {
    pub fn tag_ids(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.tag_id.as_str())
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids().any(|id| id == tag_id)
    }

    /// Whether the assigned tags are exactly `tag_ids`, ignoring order
    pub fn has_exact_tags(&self, tag_ids: &[String]) -> bool {
        self.tags.len() == tag_ids.len() && tag_ids.iter().all(|id| self.has_tag(id))
    }

    /// Replace the assignments with `tag_ids`
    ///
    /// Assignments that survive keep their original timestamp; new ones are
    /// stamped with `now` and appended in request order.
    pub fn replace_tags(&mut self, tag_ids: &[String], now: DateTime<Utc>) {
        self.tags.retain(|t| tag_ids.contains(&t.tag_id));
        for id in tag_ids {
            if !self.has_tag(id) {
                self.tags.push(HabitTag {
                    tag_id: id.clone(),
                    created_at_utc: now,
                });
            }
        }
    }

    /// Drop one assignment, returning whether it existed
    pub fn remove_tag(&mut self, tag_id: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.tag_id != tag_id);
        self.tags.len() != before
    }
}

impl Entity for Habit {
    fn resource_name() -> &'static str {
        "habits"
    }

    fn resource_name_singular() -> &'static str {
        "habit"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, path: &str) -> Option<FieldValue> {
        let value: FieldValue = match path.to_ascii_lowercase().as_str() {
            "id" => self.id.clone().into(),
            "name" => self.name.clone().into(),
            "description" => self.description.clone().into(),
            "type" => self.habit_type.into(),
            "status" => self.status.into(),
            "isarchived" => self.is_archived.into(),
            "enddate" => self.end_date.into(),
            "frequency.type" => self.frequency.frequency_type.into(),
            "frequency.timesperperiod" => self.frequency.times_per_period.into(),
            "target.value" => self.target.value.into(),
            "target.unit" => self.target.unit.clone().into(),
            "milestone.target" => self.milestone.as_ref().map(|m| m.target).into(),
            "milestone.current" => self.milestone.as_ref().map(|m| m.current).into(),
            "createdatutc" => self.created_at_utc.into(),
            "updatedatutc" => self.updated_at_utc.into(),
            "lastcompletedatutc" => self.last_completed_at_utc.into(),
            _ => return None,
        };
        Some(value)
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["Name", "Description"]
    }
}
