//! Core data types for the task store.

use crate::id::generate_id;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single actionable item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier: "td-" + 12 hex chars from content hash + entropy
    pub id: String,

    /// Short description of the task
    pub title: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current state
    pub status: Status,

    /// Priority level, unset if the caller cleared it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Freeform tags for filtering; order preserved, duplicates allowed
    #[serde(default)]
    pub tags: Vec<String>,

    /// When created (whole seconds, UTC)
    #[serde(with = "ts_second")]
    pub created_at: DateTime<Utc>,

    /// Stamped on the first update, then on every subsequent one
    #[serde(default, with = "ts_second_opt", skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Free-form due date string; never validated beyond being a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Task {
    /// Create a task with the documented defaults: pending, medium priority,
    /// no tags, `modified_at` unset.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let now = now_second();
        Self {
            id: generate_id(&title, now),
            title,
            description: None,
            status: Status::Pending,
            priority: Some(Priority::Medium),
            tags: Vec::new(),
            created_at: now,
            modified_at: None,
            due_date: None,
        }
    }

    /// Validate the task's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Task status states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "completed" => Ok(Status::Completed),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidPriority(other.to_string())),
        }
    }
}

/// Structured partial update: `None` means "leave unchanged".
///
/// Invalid priority or status strings are rejected by `FromStr` before a
/// patch can carry them, so a patch never half-applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<String>,
}

impl TaskPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status.
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replace the tag list.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = Some(tags.into_iter().map(|t| t.into()).collect());
        self
    }

    /// Set the due date.
    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Search criteria. Criteria combine with AND; within `tags` a task matches
/// if it carries at least one of the given tags.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Case-insensitive substring match against title or description
    pub query: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

impl Filter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by text query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Filter by status.
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Filter by a single tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    /// Filter by multiple tags (any-of).
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags
            .get_or_insert_with(Vec::new)
            .extend(tags.into_iter().map(|t| t.into()));
        self
    }

    /// Check whether a task matches every supplied criterion.
    ///
    /// An empty query string or an empty tag list is treated as "no
    /// criterion", matching the lenient front-end inputs.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(query) = &self.query
            && !query.is_empty()
        {
            let q = query.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&q);
            let in_description = task
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&q));
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(status) = self.status
            && task.status != status
        {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority != Some(priority)
        {
            return false;
        }
        if let Some(tags) = &self.tags
            && !tags.is_empty()
            && !tags.iter().any(|t| task.tags.contains(t))
        {
            return false;
        }
        true
    }
}

/// Validation errors for tasks and their string-typed inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
    InvalidPriority(String),
    InvalidStatus(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "task title cannot be empty"),
            ValidationError::InvalidPriority(p) => {
                write!(f, "invalid priority '{}': must be high, medium, or low", p)
            }
            ValidationError::InvalidStatus(s) => {
                write!(f, "invalid status '{}': must be pending or completed", s)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Current UTC time truncated to whole seconds, the store's timestamp grain.
pub(crate) fn now_second() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Serde format for timestamps: ISO-8601 seconds precision, trailing `Z`.
pub(crate) mod ts_second {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Like [`ts_second`] but for optional timestamps.
pub(crate) mod ts_second_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => super::ts_second::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
        }
    }
}
