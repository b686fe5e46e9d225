use serde::Serialize;
use serde_json::Value;

use super::sort::sort_newest_first;
use crate::domain::common::{WorkflowRecord, WorkflowStatus};

/// Значение выпадающего списка "все"
pub const ALL: &str = "all";

/// Выбор в выпадающем фильтре
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    /// Мягкое сравнение: отсутствующее значение у записи фильтр проходит
    pub fn admits(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Choice::All, _) => true,
            (Choice::Only(_), None) => true,
            (Choice::Only(expected), Some(actual)) => expected == actual,
        }
    }
}

impl<S: WorkflowStatus> Choice<S> {
    /// Значение выпадающего списка статусов: `"all"` или статус на проводе
    pub fn from_status_dropdown(value: &str) -> Self {
        if value == ALL {
            return Choice::All;
        }
        match S::from_wire(value) {
            Some(status) => Choice::Only(status),
            None => {
                log::warn!("Неизвестное значение фильтра статуса: {}", value);
                Choice::All
            }
        }
    }

    pub fn to_dropdown(&self) -> String {
        match self {
            Choice::All => ALL.to_string(),
            Choice::Only(status) => status.as_wire().to_string(),
        }
    }
}

/// Второй выпадающий фильтр по полю записи (например, `position`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChoice {
    pub field: String,
    pub value: Choice<String>,
}

impl FieldChoice {
    pub fn from_dropdown(field: impl Into<String>, value: &str) -> Self {
        Self {
            field: field.into(),
            value: if value == ALL {
                Choice::All
            } else {
                Choice::Only(value.to_string())
            },
        }
    }
}

/// Фильтры над списком
#[derive(Debug, Clone, PartialEq)]
pub struct ListFilter<S> {
    /// Свободный текст; пустая строка не фильтрует
    pub search: String,
    pub status: Choice<S>,
    pub secondary: Vec<FieldChoice>,
}

impl<S> Default for ListFilter<S> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: Choice::All,
            secondary: Vec::new(),
        }
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn serialized_fields<R: Serialize>(record: &R) -> Vec<(String, String)> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map
            .iter()
            .filter_map(|(key, value)| stringify(value).map(|s| (key.clone(), s)))
            .collect(),
        Ok(other) => stringify(&other)
            .map(|s| vec![(String::new(), s)])
            .unwrap_or_default(),
        Err(e) => {
            log::error!("Не удалось сериализовать запись для поиска: {}", e);
            Vec::new()
        }
    }
}

/// Строковое значение поля записи (имя поля как на проводе)
pub fn field_value<R: Serialize>(record: &R, field: &str) -> Option<String> {
    serialized_fields(record)
        .into_iter()
        .find(|(key, _)| key == field)
        .map(|(_, value)| value)
}

/// Поиск без учёта регистра по строковому виду каждого поля записи
pub fn matches_search<R: Serialize>(record: &R, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    serialized_fields(record)
        .iter()
        .any(|(_, value)| value.to_lowercase().contains(&needle))
}

fn passes<R: WorkflowRecord>(
    record: &R,
    filter: &ListFilter<R::Status>,
    status_tab: Option<R::Status>,
) -> bool {
    let status = record.status();
    if !filter.status.admits(status.as_ref()) {
        return false;
    }
    if let Some(tab) = status_tab {
        if !Choice::Only(tab).admits(status.as_ref()) {
            return false;
        }
    }
    for choice in &filter.secondary {
        let value = field_value(record, &choice.field);
        if !choice.value.admits(value.as_ref()) {
            return false;
        }
    }
    matches_search(record, &filter.search)
}

/// Отфильтровать записи и упорядочить "новые сверху"
pub fn filter_records<R: WorkflowRecord>(
    records: &[R],
    filter: &ListFilter<R::Status>,
    status_tab: Option<R::Status>,
) -> Vec<R> {
    let mut rows: Vec<R> = records
        .iter()
        .filter(|record| passes(*record, filter, status_tab))
        .cloned()
        .collect();
    sort_newest_first(&mut rows);
    rows
}

/// Уникальные непустые значения поля (варианты для выпадающего фильтра)
pub fn distinct_field_values<R: Serialize>(records: &[R], field: &str) -> Vec<String> {
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|record| field_value(record, field))
        .filter(|value| !value.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ApprovalStatus;
    use crate::shared::test_support::{ids, miner};

    fn sample() -> Vec<crate::domain::a001_miner::Miner> {
        vec![
            miner("m-1", Some(ApprovalStatus::Pending), 3, "Driller"),
            miner("m-2", Some(ApprovalStatus::Approved), 7, "Blaster"),
            miner("m-3", None, 1, "Driller"),
            miner("m-4", Some(ApprovalStatus::Rejected), 9, "Assayer"),
        ]
    }

    #[test]
    fn test_noop_filter_equals_newest_first() {
        let records = sample();
        let mut expected = records.clone();
        sort_newest_first(&mut expected);

        let filter = ListFilter::default();
        assert_eq!(filter_records(&records, &filter, None), expected);
        assert_eq!(ids(&expected), vec!["m-4", "m-2", "m-1", "m-3"]);
    }

    #[test]
    fn test_search_hits_contain_needle_case_insensitively() {
        let records = sample();
        for search in ["DRILL", "blast", "m-", "pending", "zzz"] {
            let filter = ListFilter {
                search: search.to_string(),
                ..ListFilter::default()
            };
            let needle = search.to_lowercase();
            for record in filter_records(&records, &filter, None) {
                let fields = serialized_fields(&record);
                assert!(
                    fields.iter().any(|(_, v)| v.to_lowercase().contains(&needle)),
                    "{} matched without containing {}",
                    record.base.id,
                    search
                );
            }
        }
        let filter = ListFilter {
            search: "zzz".to_string(),
            ..ListFilter::default()
        };
        assert!(filter_records(&records, &filter, None).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let filter = ListFilter {
            search: "ill".to_string(),
            status: Choice::Only(ApprovalStatus::Pending),
            secondary: vec![FieldChoice::from_dropdown("position", "Driller")],
        };
        let once = filter_records(&records, &filter, None);
        let twice = filter_records(&once, &filter, None);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_status_dropdown_excludes_mismatch_but_keeps_missing_status() {
        let records = sample();
        let filter = ListFilter {
            status: Choice::from_status_dropdown("APPROVED"),
            ..ListFilter::default()
        };
        let rows = filter_records(&records, &filter, None);
        // m-2 совпадает, m-3 без статуса проходит мягко
        assert_eq!(ids(&rows), vec!["m-2", "m-3"]);
        assert!(rows
            .iter()
            .all(|r| r.base.status.map_or(true, |s| s == ApprovalStatus::Approved)));
    }

    #[test]
    fn test_status_tab_and_secondary_dropdown() {
        let records = sample();
        let filter = ListFilter {
            secondary: vec![FieldChoice::from_dropdown("position", "Driller")],
            ..ListFilter::default()
        };
        let rows = filter_records(&records, &filter, Some(ApprovalStatus::Pending));
        assert_eq!(ids(&rows), vec!["m-1", "m-3"]);

        let all = FieldChoice::from_dropdown("position", ALL);
        assert_eq!(all.value, Choice::All);
    }

    #[test]
    fn test_distinct_field_values_for_dropdown() {
        assert_eq!(
            distinct_field_values(&sample(), "position"),
            vec!["Assayer", "Blaster", "Driller"]
        );
        assert_eq!(
            Choice::<ApprovalStatus>::from_status_dropdown("bogus"),
            Choice::All
        );
    }
}
