use crate::models::{Activity, ActivityDraft, ActivityType, truncate_notes};
use crate::seed::seed_activities;
use uuid::Uuid;

/// Ordered, append-only activity sequence for one session.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    activities: Vec<Activity>,
}

impl ActivityStore {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn seeded() -> Self {
        Self::new(seed_activities())
    }

    pub fn append(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn all(&self) -> &[Activity] {
        &self.activities
    }

    pub fn of_type(&self, activity_type: ActivityType) -> impl Iterator<Item = &Activity> {
        self.activities
            .iter()
            .filter(move |activity| activity.activity_type == activity_type)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// Builds a record from a draft that already passed validation.
/// Returns `None` if the type or date is still missing.
pub fn new_activity(draft: &ActivityDraft) -> Option<Activity> {
    let activity_type = draft.activity_type?;
    let elevation_gain = match activity_type {
        ActivityType::Cycling => draft.elevation_gain.map(|gain| gain.max(0.0)),
        ActivityType::Running => None,
    };

    Some(Activity {
        id: Uuid::new_v4().to_string(),
        activity_type,
        date: draft.date?,
        duration: draft.duration,
        distance: draft.distance,
        calories: draft.calories,
        elevation_gain,
        avg_speed: draft.avg_speed,
        notes: draft.notes.as_deref().map(truncate_notes),
    })
}
