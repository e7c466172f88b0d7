use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one emitted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Creates a random notification identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    /// Neutral or positive outcome.
    #[default]
    Default,
    /// Failed outcome.
    Destructive,
}

impl NotificationVariant {
    /// Returns stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Destructive => "destructive",
        }
    }
}

/// Notification content before it is stamped and emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Headline.
    pub title: String,
    /// Optional second line.
    pub description: Option<String>,
    /// Visual treatment.
    pub variant: NotificationVariant,
}

impl Notice {
    /// Creates a default-variant notice.
    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: NotificationVariant::Default,
        }
    }

    /// Creates a destructive notice.
    #[must_use]
    pub fn destructive(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Transient user-facing announcement delivered to toast surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Unique identifier.
    pub id: NotificationId,
    /// Headline.
    pub title: String,
    /// Optional second line.
    pub description: Option<String>,
    /// Visual treatment.
    pub variant: NotificationVariant,
    /// Emission time.
    pub emitted_at: DateTime<Utc>,
}

impl NotificationEvent {
    /// Stamps a notice with a fresh identifier and the current time.
    #[must_use]
    pub fn stamp(notice: Notice) -> Self {
        Self {
            id: NotificationId::new(),
            title: notice.title,
            description: notice.description,
            variant: notice.variant,
            emitted_at: Utc::now(),
        }
    }
}
