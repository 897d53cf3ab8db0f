use serde::{Deserialize, Deserializer, Serialize};

/// A single to-do entry. The wire shape is fixed for compatibility with
/// pre-existing stores: exactly `id`, `text`, `completed`, `createdAt`,
/// where `id` may arrive as a JSON number (legacy stores used epoch-millis
/// ids) or a string. Ids always serialize back out as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
}

/// Display-only predicate narrowing which tasks are rendered. Per-session
/// state, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(value) => value.to_string(),
        RawId::Text(value) => value,
    })
}

#[cfg(test)]
mod tests {
    use super::{Filter, Task};

    fn task(completed: bool) -> Task {
        Task {
            id: "task-1".to_string(),
            text: "demo".to_string(),
            completed,
            created_at: "2026-08-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn filter_matches_by_completion() {
        assert!(Filter::All.matches(&task(false)));
        assert!(Filter::All.matches(&task(true)));
        assert!(Filter::Active.matches(&task(false)));
        assert!(!Filter::Active.matches(&task(true)));
        assert!(Filter::Completed.matches(&task(true)));
        assert!(!Filter::Completed.matches(&task(false)));
    }

    #[test]
    fn task_accepts_numeric_id() {
        let json = r#"{"id":1732450000000,"text":"demo","completed":false,"createdAt":"2026-08-01T00:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "1732450000000");
    }

    #[test]
    fn task_serializes_camel_case_created_at() {
        let json = serde_json::to_string(&task(false)).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("created_at"));
    }
}
