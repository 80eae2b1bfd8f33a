#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A session to place in a fixture project
pub struct FixtureSession<'a> {
    pub id: &'a str,
    pub created: Option<&'a str>,
    pub message_count: u64,
    /// JSONL lines of the session log; `None` leaves the log missing
    pub lines: Option<&'a [&'a str]>,
}

/// Create `$tmp/.claude/projects/{name}/` with a sessions index and logs.
/// Mirrors the real layout so the CLI can find it through HOME.
pub fn add_project(tmp: &TempDir, name: &str, sessions: &[FixtureSession]) -> PathBuf {
    let project_dir = projects_root(tmp).join(name);
    fs::create_dir_all(&project_dir).unwrap();

    let mut entries = Vec::new();
    for session in sessions {
        let log_path = project_dir.join(format!("{}.jsonl", session.id));
        if let Some(lines) = session.lines {
            fs::write(&log_path, lines.join("\n")).unwrap();
        }

        let mut entry = serde_json::json!({
            "sessionId": session.id,
            "messageCount": session.message_count,
            "fullPath": log_path,
        });
        if let Some(created) = session.created {
            entry["created"] = serde_json::json!(created);
        }
        entries.push(entry);
    }

    let index = serde_json::json!({ "version": 1, "entries": entries });
    fs::write(project_dir.join("sessions-index.json"), index.to_string()).unwrap();
    project_dir
}

pub fn projects_root(tmp: &TempDir) -> PathBuf {
    tmp.path().join(".claude").join("projects")
}

pub fn user_line(text: &str) -> String {
    serde_json::json!({"type": "user", "message": {"role": "user", "content": text}}).to_string()
}

/// Build a CLI command with HOME overridden to the temp directory.
#[allow(deprecated)]
pub fn cli_with_home(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("devprofile").unwrap();
    cmd.env("HOME", tmp.path());
    cmd.env_remove("USERPROFILE");
    cmd.env("RUST_LOG", "warn");
    cmd
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
