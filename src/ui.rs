use crate::models::{Activity, ActivityType, NOTES_MAX_CHARS, TypeSummary, View, WeeklyProgressPoint};
use crate::session::Session;
use crate::stats::{build_stats_at, format_duration, pace, suggested_speed};
use chrono::NaiveDate;
use std::fmt::Write;

pub fn render_index(session: &Session, today: NaiveDate) -> String {
    let view = session.view();
    let panel = match view {
        View::Dashboard => render_dashboard(session, today),
        View::Activities => render_activities(session.activities()),
        View::AddActivity => render_form(session, today),
        View::Progress => render_progress(session, today),
    };

    INDEX_HTML
        .replace("{{TITLE}}", view.title())
        .replace("{{NAV}}", &render_nav(view))
        .replace("{{PANEL}}", &panel)
}

fn render_nav(active: View) -> String {
    let mut html = String::new();
    for view in View::ALL {
        let class = if view == active { "tab active" } else { "tab" };
        let _ = write!(
            html,
            r#"<form method="post" action="/view/{name}"><button class="{class}" type="submit" data-view="{name}" aria-selected="{selected}">{title}</button></form>"#,
            name = view.as_str(),
            selected = view == active,
            title = view.title(),
        );
    }
    html
}

fn render_dashboard(session: &Session, today: NaiveDate) -> String {
    let response = build_stats_at(today, session.activities());
    let stats = &response.stats;

    let mut html = String::new();
    html.push_str(r#"<section class="panel">"#);
    html.push_str(&stat_card("Total activities", &stats.total_activities.to_string(), "total-activities"));
    html.push_str(&stat_card("Total distance", &format!("{:.1} km", stats.total_distance), "total-distance"));
    html.push_str(&stat_card("Total time", &format_duration(stats.total_duration), "total-duration"));
    html.push_str(&stat_card("Calories", &format!("{} kcal", stats.total_calories), "total-calories"));
    html.push_str(&stat_card("Avg speed", &format!("{:.1} km/h", stats.avg_speed), "avg-speed"));
    html.push_str("</section>");

    html.push_str(r#"<section class="charts"><div class="chart-card"><h2>Activity distribution</h2>"#);
    let total: usize = stats.activity_distribution.iter().map(|s| s.value).sum();
    for slice in &stats.activity_distribution {
        let percent = if total == 0 {
            0.0
        } else {
            slice.value as f64 * 100.0 / total as f64
        };
        let _ = write!(
            html,
            r#"<div class="bar-row"><span class="bar-label">{name} {percent:.0}%</span><div class="bar-track"><div class="bar {class}" style="width: {percent:.1}%"></div></div><span class="bar-value">{value}</span></div>"#,
            name = slice.name,
            class = slice.name.to_lowercase(),
            value = slice.value,
        );
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="chart-card"><h2>Weekly progress</h2>"#);
    html.push_str(&weekly_chart(&stats.weekly_progress));
    html.push_str("</div></section>");

    html.push_str(r#"<section class="table-card"><div class="section-header"><h2>Recent activities</h2>"#);
    html.push_str(r#"<form method="post" action="/view/activities"><button class="btn-primary" type="submit">View all</button></form></div>"#);
    html.push_str(&activity_table(&response.recent_activities, false));
    html.push_str("</section>");
    html
}

fn render_activities(activities: &[Activity]) -> String {
    let mut html = String::from(r#"<section class="table-card"><div class="section-header"><h2>All activities</h2>"#);
    html.push_str(r#"<form method="post" action="/view/addActivity"><button class="btn-primary" type="submit">Add activity</button></form></div>"#);
    if activities.is_empty() {
        html.push_str(r#"<p class="hint">No activities yet. Record your first one.</p>"#);
    } else {
        html.push_str(&activity_table(activities, true));
    }
    html.push_str("</section>");
    html
}

fn render_form(session: &Session, today: NaiveDate) -> String {
    let draft = session.draft();
    let errors = session.errors();
    let selected = draft.activity_type.unwrap_or(ActivityType::Running);

    let mut html = String::from(
        r#"<section class="form-card"><h2>Record activity</h2><form id="activity-form" method="post" action="/activities">"#,
    );

    html.push_str(r#"<fieldset class="type-choice"><legend>Activity type *</legend>"#);
    for activity_type in ActivityType::ALL {
        let _ = write!(
            html,
            r#"<label><input type="radio" name="type" value="{value}" data-max-speed="{max}"{checked}> {label}</label>"#,
            value = activity_type.as_str(),
            max = activity_type.max_avg_speed(),
            checked = if Some(activity_type) == draft.activity_type { " checked" } else { "" },
            label = activity_type.label(),
        );
    }
    html.push_str("</fieldset>");
    html.push_str(&field_error(errors.get("type")));

    let date = draft.date.map(|d| d.to_string()).unwrap_or_default();
    let _ = write!(
        html,
        r#"<label class="field">Date *<input type="date" name="date" value="{date}" max="{today}" required></label>"#,
    );
    html.push_str(&field_error(errors.get("date")));

    html.push_str(r#"<div class="field-grid">"#);
    html.push_str(&number_field("Duration (min) *", "duration", number_value(draft.duration), "1", "1440", "1", errors.get("duration")));
    html.push_str(&number_field("Distance (km) *", "distance", number_value(draft.distance), "0.1", "1000", "0.1", errors.get("distance")));
    html.push_str(&number_field(
        "Calories *",
        "calories",
        if draft.calories == 0 { String::new() } else { draft.calories.to_string() },
        "1",
        "10000",
        "1",
        errors.get("calories"),
    ));
    let max_speed = selected.max_avg_speed().to_string();
    html.push_str(&number_field("Avg speed (km/h) *", "avgSpeed", number_value(draft.avg_speed), "0.1", &max_speed, "0.1", errors.get("avgSpeed")));
    html.push_str("</div>");

    if let Some(suggested) = suggested_speed(draft) {
        let _ = write!(html, r#"<p class="hint">Suggested speed: {suggested:.1} km/h</p>"#);
    }

    let hidden = if selected == ActivityType::Cycling { "" } else { " hidden" };
    let _ = write!(
        html,
        r#"<label class="field" id="elevation-field"{hidden}>Elevation gain (m)<input type="number" name="elevationGain" value="{value}" min="0" max="10000" step="1"></label>"#,
        value = draft.elevation_gain.map(|g| g.to_string()).unwrap_or_default(),
    );

    let notes = draft.notes.as_deref().unwrap_or_default();
    let _ = write!(
        html,
        r#"<label class="field">Notes<textarea name="notes" id="notes" maxlength="{max}" rows="3">{notes}</textarea></label><p class="hint counter"><span id="notes-count">{count}</span>/{max} characters</p>"#,
        max = NOTES_MAX_CHARS,
        notes = escape_html(notes),
        count = notes.chars().count(),
    );

    html.push_str(r#"<button class="btn-primary wide" type="submit">Save activity</button></form></section>"#);
    html
}

fn render_progress(session: &Session, today: NaiveDate) -> String {
    let response = build_stats_at(today, session.activities());
    let mut html = String::from(r#"<section class="charts">"#);
    for summary in &response.summaries {
        html.push_str(&summary_card(summary));
    }
    html.push_str("</section>");

    let achievements = &response.achievements;
    html.push_str(r#"<section class="table-card"><h2>Recent achievements</h2><div class="panel">"#);
    let record = achievements
        .distance_record
        .map(|d| format!("{d:.1} km"))
        .unwrap_or_else(|| "-".to_string());
    html.push_str(&achievement_card("Distance record", "Longest distance in a single activity.", &record));
    html.push_str(&achievement_card(
        "Consistency",
        "Longest run of consecutive active days.",
        &format!("{} days", achievements.longest_streak_days),
    ));
    let milestone = if achievements.calorie_milestone_reached {
        "Over 2,000 calories burned. Great job!"
    } else {
        "Burn 2,000 calories to reach this milestone."
    };
    html.push_str(&achievement_card(
        "Calorie milestone",
        milestone,
        &format!("{} kcal", group_thousands(achievements.total_calories)),
    ));
    html.push_str("</div></section>");
    html
}

fn summary_card(summary: &TypeSummary) -> String {
    let (count_label, average_label, average) = match summary.activity_type {
        ActivityType::Running => ("Total runs", "Average pace", &summary.average_pace),
        ActivityType::Cycling => ("Total rides", "Average speed", &summary.average_speed),
    };
    format!(
        r#"<div class="chart-card summary {class}"><h2>{label} summary</h2><dl><dt>{count_label}</dt><dd>{count}</dd><dt>Total distance</dt><dd>{distance}</dd><dt>{average_label}</dt><dd>{average}</dd><dt>Average distance</dt><dd>{average_distance}</dd></dl></div>"#,
        class = summary.activity_type.as_str(),
        label = summary.activity_type.label(),
        count = summary.count,
        distance = summary.total_distance,
        average_distance = summary.average_distance,
    )
}

fn achievement_card(title: &str, description: &str, value: &str) -> String {
    format!(
        r#"<div class="stat achievement"><span class="label">{title}</span><p class="hint">{description}</p><span class="value">{value}</span></div>"#
    )
}

fn stat_card(label: &str, value: &str, id: &str) -> String {
    format!(r#"<div class="stat"><span class="label">{label}</span><span id="{id}" class="value">{value}</span></div>"#)
}

fn activity_table(activities: &[Activity], full: bool) -> String {
    let mut html = String::from("<table><thead><tr><th>Type</th><th>Date</th><th>Distance</th><th>Duration</th><th>Speed</th>");
    if full {
        html.push_str("<th>Pace</th><th>Calories</th><th>Notes</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for activity in activities {
        let _ = write!(
            html,
            r#"<tr data-id="{id}"><td class="type {kind}">{label}</td><td>{date}</td><td>{distance:.1} km</td><td>{duration}</td><td>{speed:.1} km/h</td>"#,
            id = escape_html(&activity.id),
            kind = activity.activity_type.as_str(),
            label = activity.activity_type.label(),
            date = activity.date,
            distance = activity.distance,
            duration = format_duration(activity.duration),
            speed = activity.avg_speed,
        );
        if full {
            let _ = write!(
                html,
                "<td>{pace} min/km</td><td>{calories}</td><td>{notes}</td>",
                pace = pace(activity.duration, activity.distance),
                calories = activity.calories,
                notes = escape_html(activity.notes.as_deref().unwrap_or("-")),
            );
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

fn weekly_chart(points: &[WeeklyProgressPoint]) -> String {
    const WIDTH: f64 = 600.0;
    const HEIGHT: f64 = 240.0;
    const PADDING: f64 = 36.0;

    let max = points
        .iter()
        .flat_map(|p| [p.running_distance, p.cycling_distance])
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let slot = (WIDTH - PADDING * 2.0) / points.len().max(1) as f64;
    let bar_width = slot / 3.0;
    let scale = (HEIGHT - PADDING * 2.0) / max;
    let baseline = HEIGHT - PADDING;

    let mut svg = format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Weekly distance by type"><line class="chart-axis" x1="{PADDING}" y1="{baseline}" x2="{x2}" y2="{baseline}" />"#,
        x2 = WIDTH - PADDING,
    );
    for (index, point) in points.iter().enumerate() {
        let x = PADDING + slot * index as f64 + bar_width / 2.0;
        for (offset, value, class) in [
            (0.0, point.running_distance, "running"),
            (bar_width, point.cycling_distance, "cycling"),
        ] {
            let height = value * scale;
            let _ = write!(
                svg,
                r#"<rect class="bar {class}" x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{height:.1}"><title>{value:.1} km</title></rect>"#,
                x = x + offset,
                y = baseline - height,
            );
        }
        let _ = write!(
            svg,
            r#"<text class="chart-label" x="{x:.1}" y="{y:.1}" text-anchor="middle">{week}</text>"#,
            x = x + bar_width,
            y = baseline + 18.0,
            week = point.week,
        );
    }
    svg.push_str("</svg>");
    svg
}

fn number_field(
    label: &str,
    name: &str,
    value: String,
    min: &str,
    max: &str,
    step: &str,
    error: Option<&String>,
) -> String {
    let class = if error.is_some() { "field invalid" } else { "field" };
    format!(
        r#"<label class="{class}">{label}<input type="number" name="{name}" id="{name}" value="{value}" min="{min}" max="{max}" step="{step}" required></label>{error}"#,
        error = field_error(error),
    )
}

fn number_value(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn field_error(error: Option<&String>) -> String {
    error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape_html(message)))
        .unwrap_or_default()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>FitTrack · {{TITLE}}</title>
  <style>
    :root {
      --bg: #f7f7fa;
      --ink: #242428;
      --muted: #5d5d5d;
      --running: #fc4c02;
      --cycling: #2d87c3;
      --card: #ffffff;
      --error: #c63b2b;
      --shadow: 0 12px 32px rgba(36, 36, 40, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Roboto Condensed", "Trebuchet MS", sans-serif;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 14px 24px;
      background: var(--card);
      border-bottom: 1px solid #e5e5ea;
    }

    h1 {
      margin: 0;
      font-size: 1.6rem;
      letter-spacing: -0.02em;
    }

    h1 span {
      color: var(--running);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.15rem;
    }

    nav {
      display: flex;
      gap: 4px;
      padding: 0 16px;
      background: var(--card);
      border-bottom: 1px solid #e5e5ea;
      overflow-x: auto;
    }

    nav form {
      margin: 0;
    }

    .tab {
      appearance: none;
      border: none;
      background: transparent;
      padding: 14px 20px;
      font-size: 0.95rem;
      font-weight: 600;
      color: var(--muted);
      border-bottom: 2px solid transparent;
      cursor: pointer;
    }

    .tab.active {
      color: var(--running);
      border-bottom-color: var(--running);
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 24px 16px 48px;
      display: grid;
      gap: 24px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat, .chart-card, .table-card, .form-card {
      background: var(--card);
      border-radius: 12px;
      padding: 18px;
      border: 1px solid #e5e5ea;
      box-shadow: var(--shadow);
    }

    .stat {
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 700;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 110px 1fr 32px;
      align-items: center;
      gap: 10px;
      margin-bottom: 10px;
    }

    .bar-track {
      background: #eeeef2;
      border-radius: 999px;
      height: 12px;
      overflow: hidden;
    }

    .bar-track .bar {
      height: 100%;
    }

    .bar.running {
      background: var(--running);
      fill: var(--running);
    }

    .bar.cycling {
      background: var(--cycling);
      fill: var(--cycling);
    }

    .chart {
      width: 100%;
      height: 240px;
      display: block;
    }

    .chart-axis {
      stroke: rgba(36, 36, 40, 0.25);
    }

    .chart-label {
      fill: #757575;
      font-size: 11px;
    }

    .section-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .section-header form {
      margin: 0;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.95rem;
    }

    th {
      text-align: left;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
      padding: 10px 12px;
      background: var(--bg);
    }

    td {
      padding: 10px 12px;
      border-top: 1px solid #eeeef2;
    }

    td.type.running {
      color: var(--running);
      font-weight: 600;
    }

    td.type.cycling {
      color: var(--cycling);
      font-weight: 600;
    }

    .btn-primary {
      appearance: none;
      border: none;
      border-radius: 6px;
      padding: 10px 18px;
      background: var(--running);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-primary.wide {
      width: 100%;
      padding: 14px;
    }

    .form-card form {
      display: grid;
      gap: 14px;
    }

    .type-choice {
      display: flex;
      gap: 16px;
      border: none;
      padding: 0;
    }

    .field {
      display: grid;
      gap: 6px;
      font-weight: 600;
    }

    .field input, .field textarea {
      padding: 8px 12px;
      border: 1px solid #d0d0d6;
      border-radius: 6px;
      font: inherit;
      font-weight: 400;
    }

    .field.invalid input {
      border-color: var(--error);
      background: #fdf0ee;
    }

    .field-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 14px;
    }

    .error {
      margin: 0;
      color: var(--error);
      font-size: 0.9rem;
    }

    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .counter {
      text-align: right;
    }

    dl {
      display: grid;
      grid-template-columns: 1fr auto;
      gap: 10px;
      margin: 0;
    }

    dd {
      margin: 0;
      font-weight: 700;
    }
  </style>
</head>
<body>
  <header>
    <h1>FIT<span>TRACK</span></h1>
    <form method="post" action="/view/addActivity"><button class="btn-primary" type="submit">Record</button></form>
  </header>
  <nav role="tablist">{{NAV}}</nav>
  <main>
    {{PANEL}}
  </main>

  <script>
    const notes = document.getElementById('notes');
    const notesCount = document.getElementById('notes-count');
    if (notes && notesCount) {
      notes.addEventListener('input', () => {
        notesCount.textContent = notes.value.length;
      });
    }

    const elevation = document.getElementById('elevation-field');
    const speed = document.getElementById('avgSpeed');
    document.querySelectorAll('input[name="type"]').forEach((radio) => {
      radio.addEventListener('change', () => {
        if (elevation) {
          elevation.hidden = radio.value !== 'cycling';
        }
        if (speed) {
          speed.max = radio.dataset.maxSpeed;
        }
      });
    });
  </script>
</body>
</html>
"#;
