use crate::models::{Activity, ActivityType};
use chrono::NaiveDate;

struct SeedRow {
    id: &'static str,
    activity_type: ActivityType,
    date: (i32, u32, u32),
    duration: f64,
    distance: f64,
    calories: u32,
    elevation_gain: Option<f64>,
    avg_speed: f64,
    notes: &'static str,
}

const SEED: [SeedRow; 5] = [
    SeedRow {
        id: "1",
        activity_type: ActivityType::Running,
        date: (2025, 3, 18),
        duration: 45.0,
        distance: 7.5,
        calories: 450,
        elevation_gain: None,
        avg_speed: 10.0,
        notes: "Morning run in the park",
    },
    SeedRow {
        id: "2",
        activity_type: ActivityType::Cycling,
        date: (2025, 3, 20),
        duration: 90.0,
        distance: 30.0,
        calories: 520,
        elevation_gain: Some(150.0),
        avg_speed: 20.0,
        notes: "Weekend ride on mountain trails",
    },
    SeedRow {
        id: "3",
        activity_type: ActivityType::Running,
        date: (2025, 3, 22),
        duration: 30.0,
        distance: 5.0,
        calories: 320,
        elevation_gain: None,
        avg_speed: 10.0,
        notes: "Recovery run",
    },
    SeedRow {
        id: "4",
        activity_type: ActivityType::Cycling,
        date: (2025, 3, 23),
        duration: 120.0,
        distance: 40.0,
        calories: 680,
        elevation_gain: Some(200.0),
        avg_speed: 20.0,
        notes: "Long ride with cycling group",
    },
    SeedRow {
        id: "5",
        activity_type: ActivityType::Running,
        date: (2025, 3, 24),
        duration: 60.0,
        distance: 10.0,
        calories: 600,
        elevation_gain: None,
        avg_speed: 10.0,
        notes: "Tempo run",
    },
];

/// Built-in activities every fresh session starts from.
pub fn seed_activities() -> Vec<Activity> {
    SEED.iter()
        .filter_map(|row| {
            let (y, m, d) = row.date;
            Some(Activity {
                id: row.id.to_string(),
                activity_type: row.activity_type,
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                duration: row.duration,
                distance: row.distance,
                calories: row.calories,
                elevation_gain: row.elevation_gain,
                avg_speed: row.avg_speed,
                notes: Some(row.notes.to_string()),
            })
        })
        .collect()
}
