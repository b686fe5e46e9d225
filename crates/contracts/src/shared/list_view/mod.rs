//! Поведение универсальной таблицы: поиск, выпадающие фильтры,
//! сортировка "новые сверху" и постраничный вывод.

pub mod filter;
pub mod pagination;
pub mod sort;

pub use filter::{
    distinct_field_values, field_value, filter_records, matches_search, Choice, FieldChoice,
    ListFilter, ALL,
};
pub use pagination::Pagination;
pub use sort::{sort_by_field, sort_newest_first, SortSpec};

use crate::domain::common::WorkflowRecord;

/// Полное состояние запроса к списку
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<S> {
    pub filter: ListFilter<S>,
    /// Активная вкладка статуса
    pub status_tab: Option<S>,
    /// Сортировка по колонке (заголовок таблицы)
    pub sort: Option<SortSpec>,
    pub pagination: Pagination,
}

impl<S> ListQuery<S> {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            filter: ListFilter::default(),
            status_tab: None,
            sort: None,
            pagination: Pagination::new(rows_per_page),
        }
    }
}

/// Видимая страница списка
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R> {
    pub rows: Vec<R>,
    /// Число записей после фильтрации
    pub total_count: usize,
    pub total_pages: usize,
    /// Номер страницы после приведения к допустимому диапазону
    pub page: usize,
}

/// Все строки запроса без разбиения на страницы (для экспорта)
pub fn filtered_rows<R: WorkflowRecord>(records: &[R], query: &ListQuery<R::Status>) -> Vec<R> {
    let mut rows = filter_records(records, &query.filter, query.status_tab);
    if let Some(sort) = &query.sort {
        sort_by_field(&mut rows, sort);
        sort_newest_first(&mut rows);
    }
    rows
}

/// Фильтр → сортировка по колонке → "новые сверху" → страница.
///
/// Проход "новые сверху" выполняется последним и стабилен, поэтому порядок
/// выбранной колонки сохраняется только среди записей с одинаковой датой.
pub fn apply_list_query<R: WorkflowRecord>(
    records: &[R],
    query: &ListQuery<R::Status>,
) -> ListPage<R> {
    let rows = filtered_rows(records, query);
    let total_count = rows.len();
    let pagination = query.pagination.clamped(total_count);
    ListPage {
        rows: pagination.slice(&rows).to_vec(),
        total_count,
        total_pages: pagination.total_pages(total_count),
        page: pagination.page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ApprovalStatus;
    use crate::shared::test_support::miner;

    #[test]
    fn test_pending_tab_keeps_two_pending_newest_first() {
        let records = vec![
            miner("a", Some(ApprovalStatus::Pending), 1, "Driller"),
            miner("b", Some(ApprovalStatus::Approved), 2, "Driller"),
            miner("c", Some(ApprovalStatus::Pending), 3, "Driller"),
        ];
        let mut query = ListQuery::new(5);
        query.status_tab = Some(ApprovalStatus::Pending);

        let page = apply_list_query(&records, &query);
        let ids: Vec<&str> = page.rows.iter().map(|m| m.base.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn test_newest_first_wins_over_column_sort() {
        let records = vec![
            miner("a", None, 1, "Blaster"),
            miner("b", None, 5, "Assayer"),
            miner("c", None, 5, "Welder"),
        ];
        let mut query = ListQuery::new(5);
        query.sort = Some(SortSpec::descending("position"));

        let page = apply_list_query(&records, &query);
        let ids: Vec<&str> = page.rows.iter().map(|m| m.base.id.as_str()).collect();
        // b и c созданы в один день: между ними остаётся порядок колонки
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_page_is_clamped_when_filter_shrinks_rows() {
        let records: Vec<_> = (0..12)
            .map(|i| miner(&format!("m{}", i), Some(ApprovalStatus::Pending), i, "Driller"))
            .collect();
        let mut query = ListQuery::new(5);
        query.pagination.page = 2;
        assert_eq!(apply_list_query(&records, &query).rows.len(), 2);

        query.filter.search = "m1".to_string();
        let page = apply_list_query(&records, &query);
        // m1, m10, m11
        assert_eq!(page.total_count, 3);
        assert_eq!(page.page, 0);
        assert_eq!(page.rows.len(), 3);
        assert_eq!(filtered_rows(&records, &query).len(), 3);
    }
}
