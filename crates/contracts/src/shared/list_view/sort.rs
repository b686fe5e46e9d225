use std::cmp::Ordering;

use serde::Serialize;

use super::filter::field_value;
use crate::domain::common::WorkflowRecord;

/// Сортировка по колонке таблицы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub ascending: bool,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }

    /// Повторный клик по той же колонке меняет направление
    pub fn toggle(current: Option<&SortSpec>, field: &str) -> SortSpec {
        match current {
            Some(spec) if spec.field == field => SortSpec {
                field: field.to_string(),
                ascending: !spec.ascending,
            },
            _ => SortSpec::ascending(field),
        }
    }
}

fn compare_values(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => a.to_lowercase().cmp(&b.to_lowercase()),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Сортирует список по указанному полю (стабильно)
pub fn sort_by_field<R: Serialize>(items: &mut [R], spec: &SortSpec) {
    let mut keyed: Vec<(Option<String>, usize)> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (field_value(item, &spec.field), i))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let cmp = compare_values(a.as_deref(), b.as_deref());
        if spec.ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
    let order: Vec<usize> = keyed.into_iter().map(|(_, i)| i).collect();
    apply_order(items, &order);
}

fn apply_order<R>(items: &mut [R], order: &[usize]) {
    // перестановка по циклам: order[i]: откуда взять элемент для позиции i
    let mut placed = vec![false; items.len()];
    for start in 0..items.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let source = order[current];
            if source == start {
                break;
            }
            items.swap(current, source);
            current = source;
        }
    }
}

/// Общий компаратор "новые сверху"; записи без даты уходят в конец.
/// Сортировка стабильна.
pub fn sort_newest_first<R: WorkflowRecord>(items: &mut [R]) {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::{ids, miner};

    #[test]
    fn test_sort_by_field_both_directions() {
        let mut records = vec![
            miner("a", None, 1, "Driller"),
            miner("b", None, 2, "assayer"),
            miner("c", None, 3, "Blaster"),
        ];
        sort_by_field(&mut records, &SortSpec::ascending("position"));
        assert_eq!(ids(&records), vec!["b", "c", "a"]);
        sort_by_field(&mut records, &SortSpec::descending("position"));
        assert_eq!(ids(&records), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_numeric_fields_compare_as_numbers() {
        assert_eq!(compare_values(Some("9"), Some("10")), Ordering::Less);
        assert_eq!(compare_values(Some("x"), None), Ordering::Less);
    }

    #[test]
    fn test_toggle_flips_same_column_only() {
        let spec = SortSpec::toggle(None, "name");
        assert!(spec.ascending);
        let spec = SortSpec::toggle(Some(&spec), "name");
        assert!(!spec.ascending);
        let spec = SortSpec::toggle(Some(&spec), "surname");
        assert_eq!(spec, SortSpec::ascending("surname"));
    }

    #[test]
    fn test_missing_dates_sink_to_bottom() {
        let mut undated = miner("u", None, 0, "Driller");
        undated.base.created_at = None;
        let mut records = vec![undated, miner("old", None, 1, "x"), miner("new", None, 4, "x")];
        sort_newest_first(&mut records);
        assert_eq!(ids(&records), vec!["new", "old", "u"]);
    }
}
