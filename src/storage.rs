use crate::models::Activity;
use crate::seed::seed_activities;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// Reads the seed file if one is configured, falling back to the built-in set.
pub async fn load_seed(path: Option<&Path>) -> Vec<Activity> {
    let Some(path) = path else {
        return seed_activities();
    };

    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<Activity>>(&bytes) {
            Ok(activities) => {
                let activities = sanitize(activities);
                info!(path = %path.display(), count = activities.len(), "loaded seed file");
                activities
            }
            Err(err) => {
                error!("failed to parse seed file: {err}");
                seed_activities()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "seed file not found, using built-in activities");
            seed_activities()
        }
        Err(err) => {
            error!("failed to read seed file: {err}");
            seed_activities()
        }
    }
}

/// Drops records that break the store invariants: duplicate ids and
/// non-positive metrics.
fn sanitize(activities: Vec<Activity>) -> Vec<Activity> {
    let mut seen = HashSet::new();
    activities
        .into_iter()
        .filter(|activity| {
            let valid = activity.duration > 0.0
                && activity.distance > 0.0
                && activity.calories > 0
                && activity.avg_speed > 0.0
                && activity.elevation_gain.is_none_or(|gain| gain >= 0.0);
            if !valid {
                warn!(id = %activity.id, "skipping seed activity with invalid metrics");
                return false;
            }
            if !seen.insert(activity.id.clone()) {
                warn!(id = %activity.id, "skipping seed activity with duplicate id");
                return false;
            }
            true
        })
        .collect()
}
