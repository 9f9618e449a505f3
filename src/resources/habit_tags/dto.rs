use serde::Deserialize;

/// Desired set of tags for a habit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertHabitTagsDto {
    pub tag_ids: Vec<String>,
}

impl UpsertHabitTagsDto {
    /// Requested ids with duplicates removed, first occurrence wins
    pub fn distinct_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(self.tag_ids.len());
        for id in &self.tag_ids {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_ids_keeps_first_occurrence() {
        let dto: UpsertHabitTagsDto =
            serde_json::from_value(serde_json::json!({ "tagIds": ["t_b", "t_a", "t_b"] })).unwrap();
        assert_eq!(dto.distinct_ids(), vec!["t_b", "t_a"]);
    }

    #[test]
    fn test_missing_tag_ids_rejected() {
        assert!(serde_json::from_value::<UpsertHabitTagsDto>(serde_json::json!({})).is_err());
    }
}
