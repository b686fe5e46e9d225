use std::collections::HashSet;

use contracts::domain::common::RecordStatus;
use contracts::domain::EntityRecord;
use contracts::shared::list_view::{apply_list_query, ListPage, ListQuery};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct EntityListState {
    pub query: ListQuery<RecordStatus>,
    /// Видимая страница после фильтров
    pub visible: ListPage<EntityRecord>,
    pub is_loaded: bool,
}

impl EntityListState {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            query: ListQuery::new(rows_per_page),
            visible: ListPage {
                rows: Vec::new(),
                total_count: 0,
                total_pages: 1,
                page: 0,
            },
            is_loaded: false,
        }
    }

    /// Пересчитать видимую страницу; номер страницы приводится к допустимому
    pub fn refresh(&mut self, records: &[EntityRecord]) {
        self.visible = apply_list_query(records, &self.query);
        self.query.pagination.page = self.visible.page;
    }

    pub fn reset_page(&mut self) {
        self.query.pagination.page = 0;
    }

    /// Сбросить поиск, фильтры, вкладку и сортировку
    pub fn reset_filters(&mut self) {
        self.query.filter = Default::default();
        self.query.status_tab = None;
        self.query.sort = None;
        self.reset_page();
    }

    pub fn visible_ids(&self) -> Vec<String> {
        use contracts::domain::common::WorkflowRecord;
        self.visible.rows.iter().map(|r| r.id().to_string()).collect()
    }
}

pub fn create_state(rows_per_page: usize) -> RwSignal<EntityListState> {
    RwSignal::new(EntityListState::new(rows_per_page))
}

/// Пересчитать страницу из загруженных записей.
/// `false`, если страница уже размонтирована и сигналы освобождены.
pub fn refresh_view(
    state: RwSignal<EntityListState>,
    all_records: RwSignal<Vec<EntityRecord>>,
) -> bool {
    all_records
        .try_with_untracked(|all| state.try_update(|s| s.refresh(all)).is_some())
        .unwrap_or(false)
}

/// Применить ответ списка. Ответ, пришедший после закрытия страницы, отбрасывается.
pub fn apply_loaded(
    state: RwSignal<EntityListState>,
    all_records: RwSignal<Vec<EntityRecord>>,
    selected: RwSignal<HashSet<String>>,
    data: Vec<EntityRecord>,
) -> bool {
    if all_records.try_set(data).is_some() {
        return false;
    }
    if selected.try_update(|sel| sel.clear()).is_none() {
        return false;
    }
    state.try_update(|s| s.is_loaded = true).is_some() && refresh_view(state, all_records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::ApprovalStatus;
    use contracts::enums::EntityKind;
    use serde_json::json;

    fn records() -> Vec<EntityRecord> {
        EntityRecord::list_from_value(
            EntityKind::Driver,
            json!([
                {"id": "d-1", "name": "Farai", "surname": "Ncube", "status": "PENDING", "createdAt": "2024-02-01T10:00:00Z"},
                {"id": "d-2", "name": "Chipo", "surname": "Dube", "status": "Approved", "createdAt": "2024-02-03T10:00:00Z"},
                {"id": "d-3", "name": "Tawanda", "surname": "Sibanda", "status": "PENDING", "createdAt": "2024-02-05T10:00:00Z"}
            ]),
        )
        .unwrap()
    }

    #[test]
    fn test_refresh_applies_tab_and_newest_first() {
        let mut state = EntityListState::new(5);
        state.query.status_tab = Some(RecordStatus::Approval(ApprovalStatus::Pending));
        state.refresh(&records());
        assert_eq!(state.visible_ids(), vec!["d-3", "d-1"]);
        assert_eq!(state.visible.total_count, 2);
    }

    #[test]
    fn test_reset_filters_clears_search_text() {
        let mut state = EntityListState::new(5);
        state.query.filter.search = "farai".to_string();
        state.query.status_tab = Some(RecordStatus::Approval(ApprovalStatus::Pending));
        state.query.pagination.page = 3;
        state.reset_filters();
        assert!(state.query.filter.search.is_empty());
        assert_eq!(state.query.status_tab, None);
        assert_eq!(state.query.pagination.page, 0);

        state.refresh(&records());
        assert_eq!(state.visible.total_count, 3);
    }

    #[test]
    fn test_apply_loaded_fills_visible_page() {
        let owner = Owner::new();
        owner.set();
        let state = create_state(5);
        let all_records = RwSignal::new(Vec::new());
        let selected = RwSignal::new(HashSet::from(["d-9".to_string()]));

        assert!(apply_loaded(state, all_records, selected, records()));
        assert!(selected.get_untracked().is_empty());
        state.with_untracked(|s| {
            assert!(s.is_loaded);
            assert_eq!(s.visible_ids(), vec!["d-3", "d-2", "d-1"]);
        });
    }

    #[test]
    fn test_response_after_unmount_is_dropped() {
        let owner = Owner::new();
        owner.set();
        let state = create_state(5);
        let all_records = RwSignal::new(Vec::new());
        let selected = RwSignal::new(HashSet::new());
        owner.cleanup();

        assert!(!apply_loaded(state, all_records, selected, records()));
        assert!(!refresh_view(state, all_records));
    }

    #[test]
    fn test_refresh_clamps_page_into_query() {
        let mut state = EntityListState::new(1);
        state.query.pagination.page = 7;
        state.refresh(&records());
        assert_eq!(state.query.pagination.page, 2);
        assert_eq!(state.visible_ids(), vec!["d-1"]);

        state.query.filter.search = "chipo".to_string();
        state.refresh(&records());
        assert_eq!(state.query.pagination.page, 0);
        assert_eq!(state.visible_ids(), vec!["d-2"]);
    }
}
