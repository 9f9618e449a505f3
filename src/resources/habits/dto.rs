//! Habit request and response representations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{
    Frequency, FrequencyType, Habit, HabitStatus, HabitType, Milestone, Target,
};
use crate::resources::new_id;
use crate::shapeable;
use crate::sorting::SortMapping;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyDto {
    #[serde(rename = "type")]
    pub frequency_type: FrequencyType,
    #[validate(range(min = 1, message = "Times per period must be at least 1."))]
    pub times_per_period: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TargetDto {
    #[validate(range(min = 1, message = "Target value must be at least 1."))]
    pub value: i32,
    #[validate(length(min = 1, max = 20, message = "Unit must be between 1 and 20 characters."))]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDto {
    pub target: i32,
    pub current: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneTargetDto {
    #[validate(range(min = 1, message = "Milestone target must be at least 1."))]
    pub target: i32,
}

/// Public representation of a habit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub frequency: FrequencyDto,
    pub target: TargetDto,
    pub status: HabitStatus,
    pub is_archived: bool,
    pub end_date: Option<NaiveDate>,
    pub milestone: Option<MilestoneDto>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
    pub last_completed_at_utc: Option<DateTime<Utc>>,
}

shapeable!(HabitDto {
    "id" => id,
    "name" => name,
    "description" => description,
    "type" => habit_type,
    "frequency" => frequency,
    "target" => target,
    "status" => status,
    "isArchived" => is_archived,
    "endDate" => end_date,
    "milestone" => milestone,
    "createdAtUtc" => created_at_utc,
    "updatedAtUtc" => updated_at_utc,
    "lastCompletedAtUtc" => last_completed_at_utc,
});

impl From<&Habit> for HabitDto {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            description: habit.description.clone(),
            habit_type: habit.habit_type,
            frequency: FrequencyDto {
                frequency_type: habit.frequency.frequency_type,
                times_per_period: habit.frequency.times_per_period,
            },
            target: TargetDto {
                value: habit.target.value,
                unit: habit.target.unit.clone(),
            },
            status: habit.status,
            is_archived: habit.is_archived,
            end_date: habit.end_date,
            milestone: habit.milestone.as_ref().map(|m| MilestoneDto {
                target: m.target,
                current: m.current,
            }),
            created_at_utc: habit.created_at_utc,
            updated_at_utc: habit.updated_at_utc,
            last_completed_at_utc: habit.last_completed_at_utc,
        }
    }
}

/// A habit together with the names of its tags
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithTagsDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub frequency: FrequencyDto,
    pub target: TargetDto,
    pub status: HabitStatus,
    pub is_archived: bool,
    pub end_date: Option<NaiveDate>,
    pub milestone: Option<MilestoneDto>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
    pub last_completed_at_utc: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

shapeable!(HabitWithTagsDto {
    "id" => id,
    "name" => name,
    "description" => description,
    "type" => habit_type,
    "frequency" => frequency,
    "target" => target,
    "status" => status,
    "isArchived" => is_archived,
    "endDate" => end_date,
    "milestone" => milestone,
    "createdAtUtc" => created_at_utc,
    "updatedAtUtc" => updated_at_utc,
    "lastCompletedAtUtc" => last_completed_at_utc,
    "tags" => tags,
});

impl HabitWithTagsDto {
    pub fn new(habit: &Habit, tags: Vec<String>) -> Self {
        let dto = HabitDto::from(habit);
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            habit_type: dto.habit_type,
            frequency: dto.frequency,
            target: dto.target,
            status: dto.status,
            is_archived: dto.is_archived,
            end_date: dto.end_date,
            milestone: dto.milestone,
            created_at_utc: dto.created_at_utc,
            updated_at_utc: dto.updated_at_utc,
            last_completed_at_utc: dto.last_completed_at_utc,
            tags,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters."))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    #[validate(nested)]
    pub frequency: FrequencyDto,
    #[validate(nested)]
    pub target: TargetDto,
    pub end_date: Option<NaiveDate>,
    #[validate(nested)]
    pub milestone: Option<MilestoneTargetDto>,
}

impl CreateHabitDto {
    /// New ongoing habit with a fresh id and no progress
    pub fn into_habit(self) -> Habit {
        Habit {
            id: new_id("h"),
            name: self.name,
            description: self.description,
            habit_type: self.habit_type,
            frequency: Frequency {
                frequency_type: self.frequency.frequency_type,
                times_per_period: self.frequency.times_per_period,
            },
            target: Target {
                value: self.target.value,
                unit: self.target.unit,
            },
            status: HabitStatus::Ongoing,
            is_archived: false,
            end_date: self.end_date,
            milestone: self.milestone.map(|m| Milestone {
                target: m.target,
                current: 0,
            }),
            created_at_utc: Utc::now(),
            updated_at_utc: None,
            last_completed_at_utc: None,
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters."))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    #[validate(nested)]
    pub frequency: FrequencyDto,
    #[validate(nested)]
    pub target: TargetDto,
    pub end_date: Option<NaiveDate>,
    #[validate(nested)]
    pub milestone: Option<MilestoneTargetDto>,
}

impl Habit {
    /// Replace the editable fields
    ///
    /// A milestone target creates the milestone when the habit has none and
    /// keeps current progress otherwise.
    pub fn apply_update(&mut self, dto: UpdateHabitDto) {
        self.name = dto.name;
        self.description = dto.description;
        self.habit_type = dto.habit_type;
        self.end_date = dto.end_date;
        self.frequency = Frequency {
            frequency_type: dto.frequency.frequency_type,
            times_per_period: dto.frequency.times_per_period,
        };
        self.target = Target {
            value: dto.target.value,
            unit: dto.target.unit,
        };
        if let Some(milestone) = dto.milestone {
            self.milestone
                .get_or_insert(Milestone {
                    target: 0,
                    current: 0,
                })
                .target = milestone.target;
        }
        self.updated_at_utc = Some(Utc::now());
    }
}

/// Optional equality filters on the habits collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitFilters {
    #[serde(rename = "type")]
    pub habit_type: Option<HabitType>,
    pub status: Option<HabitStatus>,
}

/// Public sort fields of [`HabitDto`] and the habit storage paths they order by
pub fn sort_mappings() -> Vec<SortMapping> {
    vec![
        SortMapping::new("name", "Name"),
        SortMapping::new("description", "Description"),
        SortMapping::new("type", "Type"),
        SortMapping::new("frequency.type", "Frequency.Type"),
        SortMapping::new("frequency.timesPerPeriod", "Frequency.TimesPerPeriod"),
        SortMapping::new("target.value", "Target.Value"),
        SortMapping::new("target.unit", "Target.Unit"),
        SortMapping::new("status", "Status"),
        SortMapping::new("endDate", "EndDate"),
        SortMapping::new("createdAtUtc", "CreatedAtUtc"),
        SortMapping::new("updatedAtUtc", "UpdatedAtUtc"),
        SortMapping::new("lastCompletedAtUtc", "LastCompletedAtUtc"),
        SortMapping::reversed("age", "CreatedAtUtc"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::habits::model::fixtures::habit;
    use crate::shaping::{FieldMap, select_fields, shape};
    use crate::sorting::SortMappingTable;

    fn create_payload() -> serde_json::Value {
        serde_json::json!({
            "name": "Read",
            "type": "measurable",
            "frequency": { "type": "daily", "timesPerPeriod": 1 },
            "target": { "value": 20, "unit": "pages" },
            "milestone": { "target": 1000 }
        })
    }

    #[test]
    fn test_create_dto_into_habit() {
        let dto: CreateHabitDto = serde_json::from_value(create_payload()).unwrap();
        assert!(dto.validate().is_ok());

        let habit = dto.into_habit();
        assert!(habit.id.starts_with("h_"));
        assert_eq!(habit.status, HabitStatus::Ongoing);
        assert_eq!(habit.milestone, Some(Milestone { target: 1000, current: 0 }));
        assert!(habit.updated_at_utc.is_none());
    }

    #[test]
    fn test_create_dto_validation() {
        let mut payload = create_payload();
        payload["name"] = serde_json::json!("");
        payload["target"]["unit"] = serde_json::json!("x".repeat(21));
        payload["frequency"]["timesPerPeriod"] = serde_json::json!(0);

        let dto: CreateHabitDto = serde_json::from_value(payload).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.errors().contains_key("target"));
        assert!(errors.errors().contains_key("frequency"));
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let mut payload = create_payload();
        payload["type"] = serde_json::json!("sometimes");
        assert!(serde_json::from_value::<CreateHabitDto>(payload).is_err());
    }

    #[test]
    fn test_update_creates_missing_milestone() {
        let mut habit = habit("h_1", "Run");
        let dto: UpdateHabitDto = serde_json::from_value(serde_json::json!({
            "name": "Run far",
            "type": "binary",
            "frequency": { "type": "weekly", "timesPerPeriod": 3 },
            "target": { "value": 5, "unit": "km" },
            "milestone": { "target": 100 }
        }))
        .unwrap();

        habit.apply_update(dto);
        assert_eq!(habit.name, "Run far");
        assert_eq!(habit.frequency.frequency_type, FrequencyType::Weekly);
        assert_eq!(habit.milestone, Some(Milestone { target: 100, current: 0 }));
        assert!(habit.updated_at_utc.is_some());
    }

    #[test]
    fn test_habit_dto_field_map() {
        let map = FieldMap::<HabitDto>::of();
        assert_eq!(map.descriptors().len(), 13);
        assert!(map.contains("lastcompletedatutc"));
        assert!(!map.contains("tags"));
        assert!(FieldMap::<HabitWithTagsDto>::of().contains("tags"));
    }

    #[test]
    fn test_shaped_habit_uses_public_names() {
        let dto = HabitDto::from(&habit("h_1", "Run"));
        let shaped = shape(&dto, &select_fields::<HabitDto>(Some("frequency,type,id")));
        assert_eq!(shaped.keys().collect::<Vec<_>>(), vec!["id", "type", "frequency"]);
        assert_eq!(shaped.get("type"), Some(&serde_json::json!("binary")));
        assert_eq!(
            shaped.get("frequency"),
            Some(&serde_json::json!({ "type": "daily", "timesPerPeriod": 1 }))
        );
    }

    #[test]
    fn test_sort_mappings_are_valid_table() {
        let table = SortMappingTable::new("HabitDto", sort_mappings()).unwrap();
        assert!(table.validate(Some("frequency.timesPerPeriod desc, age")));
        assert!(!table.validate(Some("isArchived")));
    }
}
