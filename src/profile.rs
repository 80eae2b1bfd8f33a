use crate::classifier::{self, TechStack};
use crate::extractor;
use crate::frequency::FrequencyTable;
use crate::metrics::{self, Metrics};
use crate::parser;
use crate::projects::{self, ProjectRecord, SessionRecord};
use crate::temporal::{self, WorkingHours};
use anyhow::Result;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::path::Path;

const TOP_TECH_PER_CATEGORY: usize = 5;
const TOP_PEAK_HOURS: usize = 3;
const TOP_ACTIVE_DAYS: usize = 3;

/// The aggregate developer profile for one run
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub generated_at: String,
    pub anonymized: bool,
    pub metrics: Metrics,
    pub tech_stack: TechStackSummary,
    pub task_types: FrequencyTable<String>,
    pub working_patterns: WorkingPatterns,
    pub hours_detail: FrequencyTable<u32>,
    pub weekdays_detail: FrequencyTable<String>,
    pub project_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkingPatterns {
    pub peak_hours: Vec<u32>,
    pub active_days: Vec<String>,
}

/// Top technologies per category. Categories without any match are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechStackSummary {
    pub categories: Vec<(String, FrequencyTable<String>)>,
}

impl TechStackSummary {
    pub fn from_stack(stack: &TechStack, top: usize) -> Self {
        Self {
            categories: stack
                .categories
                .iter()
                .filter(|(_, table)| !table.is_empty())
                .map(|(name, table)| (name.clone(), table.top(top)))
                .collect(),
        }
    }

    pub fn get(&self, category: &str) -> Option<&FrequencyTable<String>> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, table)| table)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for TechStackSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, table) in &self.categories {
            map.serialize_entry(name, table)?;
        }
        map.end()
    }
}

/// Everything pulled out of the session logs, ready for analysis
#[derive(Debug, Default)]
pub struct CollectedData {
    pub project_names: Vec<String>,
    pub sessions: Vec<SessionRecord>,
    pub user_texts: Vec<String>,
    pub files: Vec<String>,
}

/// Obfuscated label for a project name: `project_NNNN`.
///
/// Deterministic but not collision free; two projects can share a label.
pub fn anonymize_project_name(name: &str) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    format!("project_{:04}", hasher.finish() % 10000)
}

/// Read every session log of the given projects. A log that cannot be read
/// is logged and treated as empty.
pub fn collect(projects: &[ProjectRecord], anonymize: bool) -> CollectedData {
    let mut data = CollectedData::default();

    for project in projects {
        let name = if anonymize {
            anonymize_project_name(&project.name)
        } else {
            project.name.clone()
        };
        data.project_names.push(name);
        data.sessions.extend(project.sessions.iter().cloned());

        for session in &project.sessions {
            let Some(ref log_path) = session.full_path else {
                continue;
            };
            let log = match parser::load_session_log(log_path) {
                Ok(log) => log,
                Err(e) => {
                    log::warn!("Skipping session {}: {:#}", session.id, e);
                    continue;
                }
            };
            data.user_texts.extend(extractor::extract_user_texts(&log.records));
            data.files.extend(extractor::extract_file_changes(&log.records));
        }
    }

    data
}

/// Assemble a profile from collected data
pub fn build_profile(data: &CollectedData, anonymize: bool) -> Profile {
    let tech_stack = classifier::analyze_tech_stack(&data.user_texts, &data.files);
    let task_types = classifier::analyze_task_types(&data.user_texts);
    let WorkingHours { hours, weekdays } = temporal::analyze_working_hours(&data.sessions);
    let metrics = metrics::calculate_metrics(&data.sessions, &data.user_texts);

    // Counted over the labels actually reported, so colliding anonymized
    // labels count as one project.
    let project_count = data.project_names.iter().collect::<HashSet<_>>().len();

    Profile {
        generated_at: chrono::Local::now().to_rfc3339(),
        anonymized: anonymize,
        metrics,
        tech_stack: TechStackSummary::from_stack(&tech_stack, TOP_TECH_PER_CATEGORY),
        task_types: task_types.ranked(),
        working_patterns: WorkingPatterns {
            peak_hours: hours.top_keys(TOP_PEAK_HOURS),
            active_days: weekdays.top_keys(TOP_ACTIVE_DAYS),
        },
        hours_detail: hours,
        weekdays_detail: weekdays,
        project_count,
    }
}

/// Scan a projects root and build the profile
pub fn generate_profile(projects_dir: &Path, anonymize: bool) -> Result<Profile> {
    let projects = projects::load_projects(projects_dir)?;
    log::info!(
        "Analyzing {} projects under {}",
        projects.len(),
        projects_dir.display()
    );

    let data = collect(&projects, anonymize);
    log::info!(
        "Collected {} sessions, {} user messages, {} file references",
        data.sessions.len(),
        data.user_texts.len(),
        data.files.len()
    );

    Ok(build_profile(&data, anonymize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_anonymize_stable_and_padded() {
        let a = anonymize_project_name("-Users-dev-myapp");
        let b = anonymize_project_name("-Users-dev-myapp");
        assert_eq!(a, b);
        assert!(a.starts_with("project_"));
        assert_eq!(a.len(), "project_".len() + 4);
        assert!(a["project_".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_project_count_over_reported_labels() {
        // Duplicate labels stand in for a hash collision
        let data = CollectedData {
            project_names: vec!["project_0042".into(), "project_0042".into(), "project_0007".into()],
            ..Default::default()
        };
        assert_eq!(build_profile(&data, true).project_count, 2);
    }

    #[test]
    fn test_empty_profile() {
        let profile = build_profile(&CollectedData::default(), true);
        assert_eq!(profile.metrics.total_sessions, 0);
        assert!(profile.tech_stack.is_empty());
        assert!(profile.task_types.is_empty());
        assert!(profile.working_patterns.peak_hours.is_empty());
        assert!(profile.working_patterns.active_days.is_empty());
        assert_eq!(profile.project_count, 0);
    }

    #[test]
    fn test_tech_stack_truncated_to_top_five() {
        let data = CollectedData {
            user_texts: vec![
                "python typescript javascript rust golang java kotlin".to_string(),
            ],
            ..Default::default()
        };
        let profile = build_profile(&data, true);
        let langs = profile.tech_stack.get("languages").unwrap();
        // seven languages tie at 1; the first five in taxonomy order survive
        assert_eq!(
            langs.top_keys(5),
            vec!["python", "typescript", "javascript", "rust", "go"]
        );
    }

    fn write_session(dir: &Path, name: &str, lines: &[&str]) -> String {
        let path = dir.join(name);
        fs::write(&path, lines.join("\n")).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_generate_profile_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("-Users-dev-app");
        fs::create_dir(&project).unwrap();

        let a = write_session(
            &project,
            "a.jsonl",
            &[
                r#"{"type":"user","message":{"content":"I need to fix this bug in my python script"}}"#,
                r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Sure"}]}}"#,
                "garbage line",
            ],
        );
        let b = write_session(
            &project,
            "b.jsonl",
            &[r#"{"type":"user","message":{"content":[{"type":"text","text":"is it fixed now?"}]}}"#],
        );
        let index = serde_json::json!({
            "entries": [
                {"sessionId": "a", "created": "2024-03-04T09:15:00Z", "messageCount": 5, "fullPath": a},
                {"sessionId": "b", "created": "2024-03-05T09:30:00Z", "messageCount": 3, "fullPath": b}
            ]
        });
        fs::write(project.join("sessions-index.json"), index.to_string()).unwrap();

        let profile = generate_profile(tmp.path(), false).unwrap();
        assert_eq!(profile.metrics.total_sessions, 2);
        assert_eq!(profile.metrics.total_messages, 8);
        assert_eq!(profile.metrics.avg_messages_per_session, 4.0);
        assert_eq!(profile.metrics.question_ratio, 50.0);
        assert!(profile.tech_stack.get("languages").unwrap().get(&"python".to_string()) >= 1);
        assert!(profile.task_types.get(&"debugging".to_string()) >= 2);
        assert_eq!(profile.hours_detail.get(&9), 2);
        assert_eq!(profile.weekdays_detail.get(&"Monday".to_string()), 1);
        assert_eq!(profile.weekdays_detail.get(&"Tuesday".to_string()), 1);
        assert_eq!(profile.working_patterns.peak_hours, vec![9]);
        assert_eq!(profile.working_patterns.active_days, vec!["Monday", "Tuesday"]);
        assert_eq!(profile.project_count, 1);
    }
}
