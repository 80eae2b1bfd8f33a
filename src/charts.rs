use crate::frequency::FrequencyTable;
use crate::profile::Profile;
use crate::taxonomy;
use crate::temporal::WEEKDAY_NAMES;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '█';
const PEAK_MARK: &str = " *";

fn bar(count: usize, max: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let len = ((count * BAR_WIDTH) as f64 / max as f64).round().max(1.0) as usize;
    BAR_CHAR.to_string().repeat(len)
}

fn title(text: &str) -> String {
    format!("{}\n{}\n", text, "=".repeat(text.chars().count()))
}

/// Horizontal bars for (label, count) rows. Labels are padded to line up.
fn bar_rows<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (String, usize, &'a str)>,
{
    let rows: Vec<(String, usize, &str)> = rows.into_iter().collect();
    let max = rows.iter().map(|(_, c, _)| *c).max().unwrap_or(0);
    let width = rows.iter().map(|(l, _, _)| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, count, suffix) in &rows {
        let pad = width - label.chars().count();
        let mut filled = bar(*count, max);
        if !filled.is_empty() {
            filled.push(' ');
        }
        out.push_str(&format!(
            "{}{} | {}{}{}\n",
            label,
            " ".repeat(pad),
            filled,
            count,
            suffix
        ));
    }
    out
}

/// Sessions per hour, all 24 hours, peak hours marked
pub fn render_hours_chart(profile: &Profile) -> String {
    let peaks = &profile.working_patterns.peak_hours;
    let mut out = title("Activity by hour");
    out.push_str(&bar_rows((0..24u32).map(|h| {
        let mark = if peaks.contains(&h) { PEAK_MARK } else { "" };
        (format!("{:02}:00", h), profile.hours_detail.get(&h), mark)
    })));
    out
}

/// Sessions per weekday in calendar order, weekend rows marked
pub fn render_weekdays_chart(profile: &Profile) -> String {
    let mut out = title("Activity by weekday");
    out.push_str(&bar_rows(WEEKDAY_NAMES.iter().enumerate().map(|(i, day)| {
        let mark = if i >= 5 { " (weekend)" } else { "" };
        (day.to_string(), profile.weekdays_detail.get(&day.to_string()), mark)
    })));
    out
}

fn table_rows(table: &FrequencyTable<String>) -> String {
    bar_rows(table.iter().map(|(label, count)| (label.clone(), count, "")))
}

/// Top technologies for each category; categories without data say so
pub fn render_tech_chart(profile: &Profile) -> String {
    let mut out = title("Tech stack");
    for category in taxonomy::category_names() {
        out.push_str(&format!("\n[{}]\n", category));
        match profile.tech_stack.get(category) {
            Some(table) if !table.is_empty() => out.push_str(&table_rows(table)),
            _ => out.push_str("(no data)\n"),
        }
    }
    out
}

/// Task types with their share of all matches
pub fn render_task_chart(profile: &Profile) -> String {
    let total = profile.task_types.total();
    let mut out = title("Task types");
    let shares: Vec<String> = profile
        .task_types
        .iter()
        .map(|(_, count)| format!(" ({:.1}%)", count as f64 * 100.0 / total.max(1) as f64))
        .collect();
    out.push_str(&bar_rows(
        profile
            .task_types
            .iter()
            .zip(shares.iter())
            .map(|((label, count), share)| (label.clone(), count, share.as_str())),
    ));
    out
}

/// One-page overview: metrics plus the compact charts
pub fn render_dashboard(profile: &Profile) -> String {
    let m = &profile.metrics;
    let mut out = title("Developer profile dashboard");
    out.push_str(&format!(
        "\nSessions: {}\nMessages: {}\nMessages per session: {:.1}\nAverage message length: {} chars\nQuestion ratio: {:.1}%\nProjects: {}\n",
        m.total_sessions,
        m.total_messages,
        m.avg_messages_per_session,
        m.avg_message_length,
        m.question_ratio,
        profile.project_count
    ));

    for (heading, table) in [
        ("Task types", Some(&profile.task_types)),
        ("Languages", profile.tech_stack.get("languages")),
        ("Tools", profile.tech_stack.get("tools")),
    ] {
        out.push_str(&format!("\n{}\n", heading));
        match table {
            Some(table) if !table.is_empty() => out.push_str(&table_rows(&table.top(5))),
            _ => out.push_str("(no data)\n"),
        }
    }

    out.push('\n');
    out.push_str(&render_hours_chart(profile));
    out.push('\n');
    out.push_str(&render_weekdays_chart(profile));
    out
}

/// Write the chart files into `dir`, returning the paths written.
/// Charts with no data are skipped; the dashboard is always written.
pub fn write_charts(profile: &Profile, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create chart directory: {}", dir.display()))?;

    let mut charts = Vec::new();
    if !profile.task_types.is_empty() {
        charts.push(("task_types.txt", render_task_chart(profile)));
    }
    if !profile.hours_detail.is_empty() {
        charts.push(("activity_hours.txt", render_hours_chart(profile)));
    }
    if !profile.tech_stack.is_empty() {
        charts.push(("tech_stack.txt", render_tech_chart(profile)));
    }
    if !profile.weekdays_detail.is_empty() {
        charts.push(("activity_weekdays.txt", render_weekdays_chart(profile)));
    }
    charts.push(("dashboard.txt", render_dashboard(profile)));

    let mut written = Vec::with_capacity(charts.len());
    for (name, content) in charts {
        let path = dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write chart: {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
