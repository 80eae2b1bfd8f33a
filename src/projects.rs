use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_PROJECTS_PATH: &str = ".claude/projects";
const SESSIONS_INDEX_FILE: &str = "sessions-index.json";

/// One session as listed in a project's sessions index
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "sessionId", default)]
    pub id: String,
    /// ISO-8601 creation time; may be absent or malformed
    #[serde(default)]
    pub created: Option<String>,
    #[serde(rename = "messageCount", default)]
    pub message_count: u64,
    #[serde(rename = "fullPath", default)]
    pub full_path: Option<PathBuf>,
}

/// A project directory and the sessions its index lists
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub name: String,
    pub path: PathBuf,
    pub sessions: Vec<SessionRecord>,
}

#[derive(Debug, Deserialize)]
struct SessionsIndex {
    #[serde(default)]
    entries: Vec<serde_json::Value>,
}

/// The user's home directory: `HOME`, then `USERPROFILE`
pub fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Neither HOME nor USERPROFILE environment variable is set")?;

    Ok(PathBuf::from(home))
}

/// Default projects root: ~/.claude/projects
pub fn default_projects_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(DEFAULT_PROJECTS_PATH))
}

/// List project directories under the root, sorted by name.
/// A root that does not exist has no projects.
pub fn list_projects(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !root.exists() {
        log::info!("Projects directory not found: {}", root.display());
        return Ok(Vec::new());
    }

    let mut projects = Vec::new();
    for entry in fs::read_dir(root)
        .with_context(|| format!("Failed to read projects directory: {}", root.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        projects.push((name, path));
    }

    projects.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(projects)
}

/// Parse the contents of a sessions index. Entries that do not fit the
/// expected shape are dropped one by one; an unparseable index is empty.
pub fn parse_sessions_index(content: &str) -> Vec<SessionRecord> {
    let index: SessionsIndex = match serde_json::from_str(content) {
        Ok(index) => index,
        Err(e) => {
            log::debug!("Unreadable sessions index ({}), treating as empty", e);
            return Vec::new();
        }
    };

    let mut sessions = Vec::with_capacity(index.entries.len());
    for (i, entry) in index.entries.into_iter().enumerate() {
        match serde_json::from_value::<SessionRecord>(entry) {
            Ok(session) => sessions.push(session),
            Err(e) => log::debug!("Skipping sessions index entry {}: {}", i, e),
        }
    }

    sessions
}

/// Load the sessions index of a project directory, in stored order.
/// A project without an index has no sessions.
pub fn load_sessions_index(project_dir: &Path) -> Result<Vec<SessionRecord>> {
    let index_path = project_dir.join(SESSIONS_INDEX_FILE);

    let content = match fs::read_to_string(&index_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            log::debug!("Sessions index is not UTF-8: {}", index_path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read sessions index: {}", index_path.display()))
        }
    };

    Ok(parse_sessions_index(&content))
}

/// Enumerate every project under the root together with its sessions
pub fn load_projects(root: &Path) -> Result<Vec<ProjectRecord>> {
    let mut projects = Vec::new();

    for (name, path) in list_projects(root)? {
        let sessions = load_sessions_index(&path)?;
        log::debug!("Project {}: {} sessions", name, sessions.len());
        projects.push(ProjectRecord {
            name,
            path,
            sessions,
        });
    }

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_index_entries() {
        let content = r#"{
            "version": 1,
            "entries": [
                {"sessionId": "a", "created": "2024-03-04T09:15:00Z", "messageCount": 5, "fullPath": "/tmp/a.jsonl", "gitBranch": "main"},
                {"sessionId": "b"}
            ]
        }"#;
        let sessions = parse_sessions_index(content);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, "a");
        assert_eq!(sessions[0].message_count, 5);
        assert_eq!(sessions[0].full_path, Some(PathBuf::from("/tmp/a.jsonl")));
        assert_eq!(sessions[1].created, None);
        assert_eq!(sessions[1].message_count, 0);
        assert_eq!(sessions[1].full_path, None);
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let content = r#"{"entries": [
            {"sessionId": "ok", "messageCount": 2},
            {"sessionId": "bad", "messageCount": "many"},
            "not an object"
        ]}"#;
        let sessions = parse_sessions_index(content);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "ok");
    }

    #[test]
    fn test_unparseable_index_is_empty() {
        assert!(parse_sessions_index("{ not json").is_empty());
        assert!(parse_sessions_index("{}").is_empty());
    }

    #[test]
    fn test_missing_index_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_sessions_index(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_list_projects_sorted_dirs_only() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("zeta")).unwrap();
        fs::create_dir(tmp.path().join("alpha")).unwrap();
        fs::write(tmp.path().join("stray.txt"), "x").unwrap();

        let names: Vec<String> = list_projects(tmp.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_missing_root_has_no_projects() {
        let tmp = TempDir::new().unwrap();
        let projects = load_projects(&tmp.path().join("missing")).unwrap();
        assert!(projects.is_empty());
    }
}
