//! Frontend Models
//!
//! Serde projections of the server read-models. Nothing here is
//! authoritative: every value is a snapshot of the last server reply and is
//! replaced wholesale on the next load.

use serde::{Deserialize, Serialize};

/// Decision recorded on a task. At most one per task; once the server has
/// recorded anything other than `None` the client treats it as immutable and
/// re-fetches instead of mutating it locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    #[default]
    None,
    Accept,
    Ignore,
    Reject,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::None => "none",
            Decision::Accept => "accept",
            Decision::Ignore => "ignore",
            Decision::Reject => "reject",
        }
    }

    pub fn parse(text: &str) -> Decision {
        match text {
            "accept" => Decision::Accept,
            "ignore" => Decision::Ignore,
            "reject" => Decision::Reject,
            _ => Decision::None,
        }
    }

    /// Glyph shown next to the status text in the task detail panel.
    pub fn icon(self) -> &'static str {
        match self {
            Decision::None => "",
            Decision::Accept => "✓",
            Decision::Ignore => "–",
            Decision::Reject => "✗",
        }
    }
}

/// A pending or historic administrative action request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub action: String,
    pub entity: String,
    pub author: String,
    pub status: String,
    #[serde(default)]
    pub decision: Decision,
    pub created: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Extended detail for a task, fetched lazily on first expansion in the
/// admin-tasks variant. Cached on the task entry once loaded.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TaskDetail {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// One row of the project board. Derived business values (totals, quotas)
/// come from the server; the client only performs the display-only usage
/// division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub resources: u64,
    #[serde(default)]
    pub consumed: u64,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub extension: bool,
    #[serde(default)]
    pub renewal: bool,
    #[serde(default)]
    pub activate: bool,
    #[serde(default)]
    pub transform: bool,
    #[serde(default)]
    pub created: String,
}

/// Independent boolean ACL flags. No hierarchy is enforced client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Roles {
    #[serde(default)]
    pub user: bool,
    #[serde(default)]
    pub responsible: bool,
    #[serde(default)]
    pub manager: bool,
    #[serde(default)]
    pub tech: bool,
    #[serde(default)]
    pub committee: bool,
    #[serde(default)]
    pub admin: bool,
}

/// One account row of the registry table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: u32,
    pub login: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub roles: Roles,
}

/// Cluster partition summary shown above the project board.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PartitionInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: u32,
    #[serde(default)]
    pub cores: u32,
    #[serde(default)]
    pub occupancy: Option<String>,
}

/// Response envelope shared by every endpoint: `data` carries the operation
/// result (record, list, boolean or count), `message` an optional toast text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
}

impl Reply {
    /// Decode `data` as a list; a missing/null `data` is an empty list.
    pub fn list<T: serde::de::DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        if self.data.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(self.data.clone())
    }

    /// Decode `data` as a single record.
    pub fn record<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }

    /// `data` as a remaining-count badge value.
    pub fn count(&self) -> Option<u64> {
        self.data.as_u64()
    }

    /// Destructive endpoints confirm with a bare `true`.
    pub fn confirmed(&self) -> bool {
        self.data.as_bool() == Some(true)
    }

    /// Toast text: an explicit `message`, or `data` when it is a bare string.
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or_else(|| self.data.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_list_null_is_empty() {
        let reply: Reply = serde_json::from_str("{}").unwrap();
        let tasks: Vec<Task> = reply.list().unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_reply_text_falls_back_to_data_string() {
        let reply: Reply = serde_json::from_str(r#"{"data": "saved"}"#).unwrap();
        assert_eq!(reply.text(), Some("saved"));
        let reply: Reply =
            serde_json::from_str(r#"{"data": 3, "message": "3 left"}"#).unwrap();
        assert_eq!(reply.text(), Some("3 left"));
        assert_eq!(reply.count(), Some(3));
    }

    #[test]
    fn test_reply_confirmed_requires_true() {
        let yes: Reply = serde_json::from_str(r#"{"data": true}"#).unwrap();
        let no: Reply = serde_json::from_str(r#"{"data": 1}"#).unwrap();
        assert!(yes.confirmed());
        assert!(!no.confirmed());
    }

    #[test]
    fn test_decision_deserializes_lowercase() {
        let task: Task = serde_json::from_str(
            r#"{"id": 7, "action": "registration", "entity": "prj42",
                "author": "marie", "status": "pending", "decision": "accept",
                "created": "2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(task.decision, Decision::Accept);
        assert_eq!(task.description, None);
    }

    #[test]
    fn test_project_row_missing_optionals_default() {
        let row: ProjectRow =
            serde_json::from_str(r#"{"id": 1, "name": "prj1"}"#).unwrap();
        assert_eq!(row.title, "");
        assert_eq!(row.users.len(), 0);
        assert!(!row.extension);
    }
}
