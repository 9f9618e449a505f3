//! Demo data loaded at startup when `seed_demo_data` is enabled

use chrono::{Duration, Utc};

use super::Stores;
use super::habits::model::{
    Frequency, FrequencyType, Habit, HabitStatus, HabitTag, HabitType, Milestone, Target,
};
use super::new_id;
use super::tags::model::Tag;
use super::users::model::User;

fn tag(name: &str, description: &str) -> Tag {
    Tag {
        id: new_id("t"),
        name: name.to_string(),
        description: Some(description.to_string()),
        created_at_utc: Utc::now(),
        updated_at_utc: None,
    }
}

fn habit(
    name: &str,
    description: &str,
    habit_type: HabitType,
    frequency: (FrequencyType, i32),
    target: (i32, &str),
    tags: &[&Tag],
) -> Habit {
    let now = Utc::now();
    Habit {
        id: new_id("h"),
        name: name.to_string(),
        description: Some(description.to_string()),
        habit_type,
        frequency: Frequency {
            frequency_type: frequency.0,
            times_per_period: frequency.1,
        },
        target: Target {
            value: target.0,
            unit: target.1.to_string(),
        },
        status: HabitStatus::Ongoing,
        is_archived: false,
        end_date: None,
        milestone: None,
        created_at_utc: now,
        updated_at_utc: None,
        last_completed_at_utc: None,
        tags: tags
            .iter()
            .map(|t| HabitTag {
                tag_id: t.id.clone(),
                created_at_utc: now,
            })
            .collect(),
    }
}

/// Populate empty stores with one user, a few tags and three habits
pub async fn seed_demo_data(stores: &Stores) -> anyhow::Result<()> {
    stores
        .users
        .create(User {
            id: new_id("u"),
            email: "demo@devhabit.local".to_string(),
            name: "Demo User".to_string(),
            created_at_utc: Utc::now(),
            updated_at_utc: None,
        })
        .await?;

    let health = stores.tags.create(tag("Health", "Body and mind")).await?;
    let fitness = stores.tags.create(tag("Fitness", "Training sessions")).await?;
    let learning = stores.tags.create(tag("Learning", "Reading and study")).await?;

    let mut run = habit(
        "Run",
        "Morning run around the park",
        HabitType::Measurable,
        (FrequencyType::Weekly, 3),
        (5, "km"),
        &[&health, &fitness],
    );
    run.milestone = Some(Milestone {
        target: 100,
        current: 12,
    });
    run.created_at_utc -= Duration::days(30);

    let mut read = habit(
        "Read",
        "Twenty pages before bed",
        HabitType::Measurable,
        (FrequencyType::Daily, 1),
        (20, "pages"),
        &[&learning],
    );
    read.created_at_utc -= Duration::days(10);

    let swim = habit(
        "Swim",
        "Laps at the community pool",
        HabitType::Binary,
        (FrequencyType::Weekly, 1),
        (1, "sessions"),
        &[&fitness],
    );

    for habit in [run, read, swim] {
        stores.habits.create(habit).await?;
    }

    tracing::info!(users = 1, tags = 3, habits = 3, "seeded demo data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StorageQuery;

    #[tokio::test]
    async fn test_seed_populates_stores() {
        let stores = Stores::in_memory();
        seed_demo_data(&stores).await.unwrap();

        let habits = stores.habits.query(&StorageQuery::new()).await.unwrap();
        assert_eq!(habits.total_count, 3);
        let tags = stores.tags.query(&StorageQuery::new()).await.unwrap();
        assert_eq!(tags.total_count, 3);

        for habit in &habits.items {
            for tag_id in habit.tag_ids() {
                assert!(stores.tags.get(tag_id).await.unwrap().is_some());
            }
        }
    }
}
