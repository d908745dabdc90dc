use crate::models::{
    Achievements, Activity, ActivityDraft, ActivityType, DistributionSlice, StatsResponse,
    TypeSummary, UserStats, WeeklyProgressPoint,
};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub const SENTINEL: &str = "-";
pub const CALORIE_MILESTONE: u64 = 2_000;
const WEEK_COUNT: usize = 4;
const RECENT_COUNT: usize = 3;

pub fn build_stats(activities: &[Activity]) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), activities)
}

/// `today` anchors the weekly chart when there are no activities.
pub fn build_stats_at(today: NaiveDate, activities: &[Activity]) -> StatsResponse {
    let stats = user_stats_at(today, activities);
    let achievements = achievements(activities);
    let start = activities.len().saturating_sub(RECENT_COUNT);

    StatsResponse {
        stats,
        summaries: ActivityType::ALL
            .iter()
            .map(|activity_type| type_summary(activities, *activity_type))
            .collect(),
        achievements,
        recent_activities: activities[start..].to_vec(),
    }
}

pub fn user_stats_at(today: NaiveDate, activities: &[Activity]) -> UserStats {
    let total_distance: f64 = activities.iter().map(|a| a.distance).sum();
    let total_duration: f64 = activities.iter().map(|a| a.duration).sum();
    let total_calories: u64 = activities.iter().map(|a| u64::from(a.calories)).sum();

    UserStats {
        total_activities: activities.len(),
        total_distance,
        total_duration,
        total_calories,
        avg_speed: speed(total_distance, total_duration).unwrap_or(0.0),
        weekly_progress: weekly_progress(today, activities),
        activity_distribution: ActivityType::ALL
            .iter()
            .map(|activity_type| DistributionSlice {
                name: activity_type.label().to_string(),
                value: activities
                    .iter()
                    .filter(|a| a.activity_type == *activity_type)
                    .count(),
            })
            .collect(),
    }
}

pub fn type_summary(activities: &[Activity], activity_type: ActivityType) -> TypeSummary {
    let subset: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.activity_type == activity_type)
        .collect();
    let count = subset.len();

    if count == 0 {
        return TypeSummary {
            activity_type,
            count,
            total_distance: SENTINEL.to_string(),
            average_pace: SENTINEL.to_string(),
            average_speed: SENTINEL.to_string(),
            average_distance: SENTINEL.to_string(),
        };
    }

    let distance: f64 = subset.iter().map(|a| a.distance).sum();
    let duration: f64 = subset.iter().map(|a| a.duration).sum();

    TypeSummary {
        activity_type,
        count,
        total_distance: format!("{distance:.1} km"),
        average_pace: format!("{} min/km", pace(duration, distance)),
        average_speed: speed(distance, duration)
            .map(|kmh| format!("{kmh:.1} km/h"))
            .unwrap_or_else(|| SENTINEL.to_string()),
        average_distance: format!("{:.1} km", distance / count as f64),
    }
}

/// Minutes per kilometer as `m:ss`, or `0:00` when either input is not positive.
pub fn pace(duration_minutes: f64, distance_km: f64) -> String {
    if !(duration_minutes > 0.0 && distance_km > 0.0) {
        return "0:00".to_string();
    }

    let pace = duration_minutes / distance_km;
    let mut minutes = pace.floor() as u64;
    let mut seconds = ((pace - pace.floor()) * 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{minutes}:{seconds:02}")
}

/// km/h over a duration in minutes; `None` when the duration is not positive.
pub fn speed(distance_km: f64, duration_minutes: f64) -> Option<f64> {
    (duration_minutes > 0.0).then(|| distance_km / (duration_minutes / 60.0))
}

/// Speed hint shown under the form's average speed input.
pub fn suggested_speed(draft: &ActivityDraft) -> Option<f64> {
    if draft.distance > 0.0 {
        speed(draft.distance, draft.duration)
    } else {
        None
    }
}

pub fn format_duration(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    format!("{}h {}m", total / 60, total % 60)
}

pub fn achievements(activities: &[Activity]) -> Achievements {
    let total_calories: u64 = activities.iter().map(|a| u64::from(a.calories)).sum();

    Achievements {
        distance_record: activities.iter().map(|a| a.distance).reduce(f64::max),
        longest_streak_days: longest_streak(activities),
        total_calories,
        calorie_milestone_reached: total_calories >= CALORIE_MILESTONE,
    }
}

/// Longest run of consecutive calendar days with at least one activity.
fn longest_streak(activities: &[Activity]) -> u32 {
    let mut dates: Vec<NaiveDate> = activities.iter().map(|a| a.date).collect();
    dates.sort_unstable();
    dates.dedup();

    let mut best = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        current = match previous {
            Some(prev) if date - prev == Duration::days(1) => current + 1,
            _ => 1,
        };
        best = best.max(current);
        previous = Some(date);
    }
    best
}

fn weekly_progress(today: NaiveDate, activities: &[Activity]) -> Vec<WeeklyProgressPoint> {
    let anchor = activities.iter().map(|a| a.date).max().unwrap_or(today);
    let current_week_start = week_start(anchor);

    let mut points = Vec::with_capacity(WEEK_COUNT);
    for offset in (0..WEEK_COUNT).rev() {
        // Weeks before the earliest representable date are left out.
        let Some(start) = current_week_start.checked_sub_signed(Duration::weeks(offset as i64))
        else {
            continue;
        };
        let end = start
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX);

        let mut running_distance = 0.0;
        let mut cycling_distance = 0.0;
        for activity in activities.iter().filter(|a| a.date >= start && a.date <= end) {
            match activity.activity_type {
                ActivityType::Running => running_distance += activity.distance,
                ActivityType::Cycling => cycling_distance += activity.distance,
            }
        }

        points.push(WeeklyProgressPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            running_distance,
            cycling_distance,
        });
    }
    points
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_signed(Duration::days(date.weekday().num_days_from_monday() as i64))
        .unwrap_or(NaiveDate::MIN)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
