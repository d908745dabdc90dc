use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const NOTES_MAX_CHARS: usize = 500;

/// Field name -> message for every field that failed validation.
pub type FormErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Running,
    Cycling,
}

impl ActivityType {
    pub const ALL: [ActivityType; 2] = [ActivityType::Running, ActivityType::Cycling];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Running => "running",
            ActivityType::Cycling => "cycling",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
        }
    }

    /// Upper bound offered by the form's average speed input, in km/h.
    pub fn max_avg_speed(self) -> u32 {
        match self {
            ActivityType::Running => 40,
            ActivityType::Cycling => 100,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(ActivityType::Running),
            "cycling" => Ok(ActivityType::Cycling),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: NaiveDate,
    /// Minutes.
    pub duration: f64,
    /// Kilometers.
    pub distance: f64,
    pub calories: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    /// km/h.
    pub avg_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Form input under construction. Only a validated draft becomes an [`Activity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    #[serde(rename = "type", default)]
    pub activity_type: Option<ActivityType>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub elevation_gain: Option<f64>,
    #[serde(default)]
    pub avg_speed: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ActivityDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            activity_type: Some(ActivityType::Running),
            date: Some(today),
            duration: 0.0,
            distance: 0.0,
            calories: 0,
            elevation_gain: None,
            avg_speed: 0.0,
            notes: None,
        }
    }

    /// Coerces raw form input. Unparseable numbers become zero so the
    /// positivity rules report them.
    pub fn from_form(form: &DraftForm) -> Self {
        Self {
            activity_type: form.activity_type.as_deref().and_then(|v| v.parse().ok()),
            date: form
                .date
                .as_deref()
                .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok()),
            duration: coerce_number(form.duration.as_deref()),
            distance: coerce_number(form.distance.as_deref()),
            calories: coerce_number(form.calories.as_deref()) as u32,
            elevation_gain: form
                .elevation_gain
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| coerce_number(Some(v))),
            avg_speed: coerce_number(form.avg_speed.as_deref()),
            notes: form
                .notes
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(truncate_notes),
        }
    }
}

/// Raw `application/x-www-form-urlencoded` fields of the add-activity form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftForm {
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub date: Option<String>,
    pub duration: Option<String>,
    pub distance: Option<String>,
    pub calories: Option<String>,
    pub elevation_gain: Option<String>,
    pub avg_speed: Option<String>,
    pub notes: Option<String>,
}

impl DraftForm {
    /// Lenient read of a JSON draft body: strings and numbers are kept as
    /// raw text for [`ActivityDraft::from_form`], anything else is treated
    /// as absent.
    pub fn from_json(body: &serde_json::Value) -> Self {
        let field = |name: &str| match body.get(name)? {
            serde_json::Value::String(value) => Some(value.clone()),
            serde_json::Value::Number(value) => Some(value.to_string()),
            _ => None,
        };

        Self {
            activity_type: field("type"),
            date: field("date"),
            duration: field("duration"),
            distance: field("distance"),
            calories: field("calories"),
            elevation_gain: field("elevationGain"),
            avg_speed: field("avgSpeed"),
            notes: field("notes"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Dashboard,
    Activities,
    AddActivity,
    Progress,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Activities, View::AddActivity, View::Progress];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Activities => "activities",
            View::AddActivity => "addActivity",
            View::Progress => "progress",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Activities => "Activities",
            View::AddActivity => "Add Activity",
            View::Progress => "Progress",
        }
    }
}

impl FromStr for View {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s.trim())
            .ok_or(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgressPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub running_distance: f64,
    pub cycling_distance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_activities: usize,
    pub total_distance: f64,
    pub total_duration: f64,
    pub total_calories: u64,
    pub avg_speed: f64,
    pub weekly_progress: Vec<WeeklyProgressPoint>,
    pub activity_distribution: Vec<DistributionSlice>,
}

/// Per-type figures. Everything except `count` reads `"-"` for an empty subset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub count: usize,
    pub total_distance: String,
    pub average_pace: String,
    pub average_speed: String,
    pub average_distance: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievements {
    pub distance_record: Option<f64>,
    pub longest_streak_days: u32,
    pub total_calories: u64,
    pub calorie_milestone_reached: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: UserStats,
    pub summaries: Vec<TypeSummary>,
    pub achievements: Achievements,
    pub recent_activities: Vec<Activity>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub view: View,
    pub draft: ActivityDraft,
    pub errors: FormErrors,
}

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub view: View,
}

#[derive(Debug, Deserialize)]
pub struct PaceQuery {
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaceResponse {
    pub pace: String,
}

/// Longest leading prefix that reads as a finite number, else zero
/// (`"12abc"` -> 12, `"abc"` -> 0).
fn coerce_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim) else {
        return 0.0;
    };
    raw.char_indices()
        .map(|(index, ch)| index + ch.len_utf8())
        .rev()
        .find_map(|end| raw[..end].parse::<f64>().ok().filter(|v| v.is_finite()))
        .unwrap_or(0.0)
}

pub fn truncate_notes(notes: &str) -> String {
    notes.chars().take(NOTES_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> DraftForm {
        let mut form = DraftForm::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "type" => form.activity_type = value,
                "date" => form.date = value,
                "duration" => form.duration = value,
                "distance" => form.distance = value,
                "calories" => form.calories = value,
                "elevationGain" => form.elevation_gain = value,
                "avgSpeed" => form.avg_speed = value,
                "notes" => form.notes = value,
                other => panic!("unknown field {other}"),
            }
        }
        form
    }

    #[test]
    fn unparseable_numbers_coerce_to_zero() {
        let draft = ActivityDraft::from_form(&form(&[
            ("duration", "abc"),
            ("distance", ""),
            ("calories", "NaN"),
            ("avgSpeed", "inf"),
        ]));
        assert_eq!(draft.duration, 0.0);
        assert_eq!(draft.distance, 0.0);
        assert_eq!(draft.calories, 0);
        assert_eq!(draft.avg_speed, 0.0);
    }

    #[test]
    fn numbers_keep_their_leading_numeric_prefix() {
        let draft = ActivityDraft::from_form(&form(&[
            ("duration", "12abc"),
            ("distance", " 7.5km "),
            ("avgSpeed", "e5"),
        ]));
        assert_eq!(draft.duration, 12.0);
        assert_eq!(draft.distance, 7.5);
        assert_eq!(draft.avg_speed, 0.0);
    }

    #[test]
    fn json_body_is_read_leniently() {
        let body = serde_json::json!({
            "type": "swimming",
            "date": "2025-03-25",
            "duration": "abc",
            "distance": 5,
            "calories": 300.5,
            "avgSpeed": true,
            "notes": null
        });
        let draft = ActivityDraft::from_form(&DraftForm::from_json(&body));
        assert_eq!(draft.activity_type, None);
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2025, 3, 25));
        assert_eq!(draft.duration, 0.0);
        assert_eq!(draft.distance, 5.0);
        assert_eq!(draft.calories, 300);
        assert_eq!(draft.avg_speed, 0.0);
        assert_eq!(draft.notes, None);

        let empty = DraftForm::from_json(&serde_json::json!([1, 2]));
        assert!(empty.activity_type.is_none() && empty.duration.is_none());
    }

    #[test]
    fn calories_truncate_to_whole_number() {
        let draft = ActivityDraft::from_form(&form(&[("calories", "450.9")]));
        assert_eq!(draft.calories, 450);

        let draft = ActivityDraft::from_form(&form(&[("calories", "-3")]));
        assert_eq!(draft.calories, 0);
    }

    #[test]
    fn bad_date_and_type_become_missing() {
        let draft = ActivityDraft::from_form(&form(&[("type", "swimming"), ("date", "yesterday")]));
        assert_eq!(draft.activity_type, None);
        assert_eq!(draft.date, None);

        let draft = ActivityDraft::from_form(&form(&[("type", "cycling"), ("date", "2025-03-20")]));
        assert_eq!(draft.activity_type, Some(ActivityType::Cycling));
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2025, 3, 20));
    }

    #[test]
    fn notes_are_bounded_and_blank_optionals_dropped() {
        let long = "x".repeat(NOTES_MAX_CHARS + 20);
        let draft = ActivityDraft::from_form(&form(&[("notes", long.as_str()), ("elevationGain", "  ")]));
        assert_eq!(draft.notes.as_deref().map(|n| n.chars().count()), Some(NOTES_MAX_CHARS));
        assert_eq!(draft.elevation_gain, None);
    }

    #[test]
    fn activity_serializes_with_camel_case_fields() {
        let activity = Activity {
            id: "1".to_string(),
            activity_type: ActivityType::Cycling,
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            duration: 90.0,
            distance: 30.0,
            calories: 520,
            elevation_gain: Some(150.0),
            avg_speed: 20.0,
            notes: None,
        };
        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["type"], "cycling");
        assert_eq!(value["date"], "2025-03-20");
        assert_eq!(value["elevationGain"], 150.0);
        assert_eq!(value["avgSpeed"], 20.0);
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn view_wire_names() {
        let names: Vec<_> = View::ALL
            .iter()
            .map(|view| serde_json::to_value(view).unwrap())
            .collect();
        assert_eq!(names, vec!["dashboard", "activities", "addActivity", "progress"]);
        assert_eq!(View::default(), View::Dashboard);
        assert_eq!("addActivity".parse::<View>(), Ok(View::AddActivity));
        assert!("settings".parse::<View>().is_err());
    }
}
