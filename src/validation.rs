use crate::models::{ActivityDraft, FormErrors};

/// Checks the required fields of a draft. An empty map means the draft can be saved.
pub fn validate_draft(draft: &ActivityDraft) -> FormErrors {
    let mut errors = FormErrors::new();

    if draft.activity_type.is_none() {
        errors.insert("type".into(), "Activity type is required".into());
    }

    if draft.date.is_none() {
        errors.insert("date".into(), "Date is required".into());
    }

    if !is_positive(draft.duration) {
        errors.insert("duration".into(), "Duration must be greater than 0".into());
    }

    if !is_positive(draft.distance) {
        errors.insert("distance".into(), "Distance must be greater than 0".into());
    }

    if draft.calories == 0 {
        errors.insert("calories".into(), "Calories must be greater than 0".into());
    }

    if !is_positive(draft.avg_speed) {
        errors.insert("avgSpeed".into(), "Average speed must be greater than 0".into());
    }

    errors
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}
