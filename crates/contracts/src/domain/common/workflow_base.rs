use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::status::{lenient, WorkflowStatus};

/// Базовые поля записи с жизненным циклом, общие для всех сущностей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(serialize = "S: Serialize", deserialize = "S: WorkflowStatus"))]
pub struct WorkflowBase<S> {
    /// Идентификатор, назначенный backend
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<S>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Ключ сортировки "новые сверху"
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl<S: WorkflowStatus> WorkflowBase<S> {
    pub fn new(id: impl Into<String>, status: S) -> Self {
        Self {
            id: id.into(),
            status: Some(status),
            reason: None,
            created_at: None,
        }
    }

    pub fn created(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Разбор даты создания в форматах, которые отдаёт backend
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
