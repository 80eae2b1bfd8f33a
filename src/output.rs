use crate::profile::Profile;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How the report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Serialize the full profile as pretty JSON
pub fn render_json(profile: &Profile) -> Result<String> {
    serde_json::to_string_pretty(profile).context("Failed to serialize profile")
}

/// Render the profile as a Markdown summary. Empty sections are left out.
pub fn render_summary(profile: &Profile) -> String {
    let mut lines = vec!["## Developer Profile".to_string(), String::new()];

    let m = &profile.metrics;
    lines.push("### Activity".to_string());
    lines.push(format!("- Total sessions: {}", m.total_sessions));
    lines.push(format!("- Total messages: {}", m.total_messages));
    lines.push(format!("- Messages per session: {:.1}", m.avg_messages_per_session));
    lines.push(format!("- Average message length: {} chars", m.avg_message_length));
    lines.push(format!("- Question ratio: {:.1}%", m.question_ratio));
    lines.push(format!("- Projects: {}", profile.project_count));
    lines.push(String::new());

    if !profile.tech_stack.is_empty() {
        lines.push("### Tech Stack".to_string());
        for (category, techs) in &profile.tech_stack.categories {
            let list: Vec<String> = techs.iter().map(|(t, c)| format!("{}({})", t, c)).collect();
            lines.push(format!("- **{}**: {}", category, list.join(", ")));
        }
        lines.push(String::new());
    }

    if !profile.task_types.is_empty() {
        lines.push("### Task Types".to_string());
        for (task, count) in profile.task_types.iter() {
            lines.push(format!("- {}: {}", task, count));
        }
        lines.push(String::new());
    }

    let wp = &profile.working_patterns;
    if !wp.peak_hours.is_empty() {
        lines.push("### Working Patterns".to_string());
        let hours: Vec<String> = wp.peak_hours.iter().map(|h| format!("{:02}:00", h)).collect();
        lines.push(format!("- Peak hours: {}", hours.join(", ")));
        if !wp.active_days.is_empty() {
            lines.push(format!("- Most active days: {}", wp.active_days.join(", ")));
        }
    }

    lines.join("\n")
}

pub fn render(profile: &Profile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(profile),
        OutputFormat::Text => Ok(render_summary(profile)),
    }
}

/// Write the rendered report to a file, or print it when no destination is given
pub fn write_output(rendered: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            log::info!("Saved: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
