mod state;

use std::collections::HashSet;

use contracts::domain::common::{
    RecordStatus, StatusVocabulary, TransitionAction, WorkflowRecord, WorkflowStatus,
};
use contracts::domain::EntityRecord;
use contracts::enums::EntityKind;
use contracts::shared::batch::bulk_transition;
use contracts::shared::decision_dialog::Notice;
use contracts::shared::list_view::{
    distinct_field_values, filtered_rows, Choice, FieldChoice, SortSpec, ALL,
};
use contracts::shared::api::WorkflowApi;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::DecisionDialogView;
use crate::domain::workflow::api::EntityClient;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::components::table_selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::export::export_records;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};
use state::{apply_loaded, create_state, refresh_view, EntityListState};

/// Действие для пакетной обработки выбранных строк
fn bulk_action(kind: EntityKind) -> TransitionAction {
    match kind.vocabulary() {
        StatusVocabulary::Approval => TransitionAction::Approve,
        StatusVocabulary::Incident => TransitionAction::Resolve,
    }
}

/// Строки из выбранных, для которых действие допустимо
fn actionable_ids(
    records: &[EntityRecord],
    selected: &HashSet<String>,
    action: TransitionAction,
) -> Vec<String> {
    records
        .iter()
        .filter(|r| selected.contains(r.id()) && r.available_actions().contains(&action))
        .map(|r| r.id().to_string())
        .collect()
}

fn notice_view(notice: Notice) -> AnyView {
    match notice {
        Notice::Success(message) => {
            view! { <div class="alert alert--success">{message}</div> }.into_any()
        }
        Notice::Error(message) => {
            view! { <div class="alert alert--error">{message}</div> }.into_any()
        }
    }
}

/// Универсальная страница списка сущности с диалогом решения
#[component]
pub fn EntityListPage(kind: EntityKind) -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let config = ctx.config.get_untracked();
    let page_size_options = config.page_size_options();
    let refresh_delay_ms = config.workflow.refresh_delay_ms;

    let state = create_state(config.list.rows_per_page);
    let all_records: RwSignal<Vec<EntityRecord>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (notice, set_notice) = signal::<Option<Notice>>(None);
    let (bulk_running, set_bulk_running) = signal(false);
    let selected: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());
    let open_id: RwSignal<Option<String>> = RwSignal::new(None);
    // Счётчик обновлений; пишет только эта страница
    let refresh_trigger = RwSignal::new(0u32);

    let status_value = RwSignal::new(ALL.to_string());
    let secondary_value = RwSignal::new(ALL.to_string());
    let statuses = RecordStatus::all_for(kind.vocabulary());
    let secondary = kind.secondary_filter();
    let headers = EntityRecord::headers_for(kind);
    let fields = EntityRecord::fields_for(kind);
    let status_column = fields.iter().position(|f| *f == "status");
    let action = bulk_action(kind);

    let redraw = move || {
        refresh_view(state, all_records);
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let client = EntityClient::from_context(&ctx, kind);
        spawn_local(async move {
            // Страница могла закрыться, пока шёл запрос
            match client.fetch_all().await {
                Ok(data) => {
                    let count = data.len();
                    if !apply_loaded(state, all_records, selected, data) {
                        log::debug!("{}: страница закрыта, ответ отброшен", kind.code());
                        return;
                    }
                    log::debug!("{}: загружено {} записей", kind.code(), count);
                }
                Err(e) => {
                    log::error!("{}: ошибка загрузки списка: {}", kind.code(), e);
                    let message = format!("Не удалось загрузить данные: {}", e);
                    if set_error.try_set(Some(message)).is_some() {
                        return;
                    }
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    // Первая загрузка и каждое обновление счётчика или токена
    Effect::new(move |_| {
        refresh_trigger.track();
        ctx.auth_token.track();
        load_data();
    });

    let schedule_refresh = move || {
        spawn_local(async move {
            TimeoutFuture::new(refresh_delay_ms).await;
            let _ = refresh_trigger.try_update(|n| *n = n.wrapping_add(1));
        });
    };

    let update_query = move |f: &dyn Fn(&mut EntityListState)| {
        state.update(|s| {
            f(s);
            s.reset_page();
        });
        redraw();
    };

    let set_tab = move |tab: Option<RecordStatus>| {
        update_query(&|s| s.query.status_tab = tab);
    };

    let on_search = move |text: String| {
        update_query(&|s| s.query.filter.search = text.clone());
    };

    let on_status_change = move |value: String| {
        status_value.set(value.clone());
        update_query(&|s| s.query.filter.status = Choice::from_status_dropdown(&value));
    };

    let on_secondary_change = move |value: String| {
        secondary_value.set(value.clone());
        if let Some(filter) = secondary {
            update_query(&|s| {
                s.query.filter.secondary = vec![FieldChoice::from_dropdown(filter.field, &value)]
            });
        }
    };

    let reset_filters = move || {
        status_value.set(ALL.to_string());
        secondary_value.set(ALL.to_string());
        state.update(|s| s.reset_filters());
        redraw();
    };

    let toggle_sort = move |field: &'static str| {
        state.update(|s| s.query.sort = Some(SortSpec::toggle(s.query.sort.as_ref(), field)));
        redraw();
    };

    let go_to_page = move |page: usize| {
        state.update(|s| s.query.pagination.page = page);
        redraw();
    };

    let change_page_size = move |size: usize| {
        state.update(|s| s.query.pagination = s.query.pagination.with_rows_per_page(size));
        redraw();
    };

    let secondary_options = Memo::new(move |_| match secondary {
        Some(filter) => all_records.with(|all| distinct_field_values(all, filter.field)),
        None => Vec::new(),
    });

    let on_export = move || {
        let rows = all_records.with_untracked(|all| {
            state.with_untracked(|s| filtered_rows(all, &s.query))
        });
        match export_records(kind, &rows) {
            Ok(()) => set_notice.set(None),
            Err(e) => set_notice.set(Some(Notice::Error(e))),
        }
    };

    let on_bulk = move || {
        let ids = all_records.with_untracked(|all| {
            selected.with_untracked(|sel| actionable_ids(all, sel, action))
        });
        let skipped = selected.with_untracked(|sel| sel.len()) - ids.len();
        if ids.is_empty() {
            set_notice.set(Some(Notice::Error(
                "Среди выбранных нет записей, ожидающих решения".to_string(),
            )));
            return;
        }
        set_bulk_running.set(true);
        let client = EntityClient::from_context(&ctx, kind);
        spawn_local(async move {
            match bulk_transition(&client, ids, action, None).await {
                Ok(result) => {
                    for failure in &result.failed {
                        log::warn!("{} {}: {}", action.label(), failure.item, failure.error);
                    }
                    let mut summary = result.summary();
                    if skipped > 0 {
                        summary.push_str(&format!(", пропущено: {}", skipped));
                    }
                    let notice = if result.is_complete_success() {
                        Notice::Success(summary)
                    } else {
                        Notice::Error(summary)
                    };
                    if set_notice.try_set(Some(notice)).is_some() {
                        return;
                    }
                    if !result.succeeded.is_empty() {
                        schedule_refresh();
                    }
                }
                Err(e) => {
                    let _ = set_notice.try_set(Some(Notice::Error(e.to_string())));
                }
            }
            let _ = set_bulk_running.try_set(false);
        });
    };

    let visible_ids = Signal::derive(move || state.with(|s| s.visible_ids()));
    let selected_signal = Signal::derive(move || selected.get());

    let toggle_selection = move |(id, checked): (String, bool)| {
        selected.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    };

    let toggle_all = move |check_all: bool| {
        let ids = visible_ids.get_untracked();
        selected.update(|s| {
            for id in ids {
                if check_all {
                    s.insert(id);
                } else {
                    s.remove(&id);
                }
            }
        });
    };

    let on_dialog_changed = Callback::new(move |_: ()| schedule_refresh());
    let on_dialog_close = Callback::new(move |_: ()| open_id.set(None));

    let tab_statuses = statuses.clone();
    let dropdown_statuses = statuses;
    let header_cells = headers
        .iter()
        .zip(fields.iter())
        .map(|(label, field)| (*label, *field))
        .collect::<Vec<_>>();

    view! {
        <PageFrame page_id=page_id(kind.code(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{kind.display_name()}</h1>
                    <Badge>
                        {move || state.with(|s| s.visible.total_count.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_bulk()
                        disabled=Signal::derive(move || selected.with(|s| s.is_empty()) || bulk_running.get())
                    >
                        {icon("check")}
                        {move || format!(" {} выбранные ({})", action.label(), selected.with(|s| s.len()))}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_export()
                    >
                        {icon("download")}
                        " CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <div class="alert alert--error">
                        <span>{e}</span>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| load_data()
                        >
                            "Повторить"
                        </Button>
                    </div>
                })}
                {move || notice.get().map(notice_view)}

                <div class="status-tabs">
                    <button
                        class="status-tabs__tab"
                        class:status-tabs__tab--active=move || state.with(|s| s.query.status_tab.is_none())
                        on:click=move |_| set_tab(None)
                    >
                        "Все"
                    </button>
                    {tab_statuses.into_iter().map(|status| view! {
                        <button
                            class="status-tabs__tab"
                            class:status-tabs__tab--active=move || state.with(|s| s.query.status_tab == Some(status))
                            on:click=move |_| set_tab(Some(status))
                        >
                            {status.display_name()}
                        </button>
                    }).collect_view()}
                </div>

                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            {icon("filter")}
                            <span class="filter-panel__title">"Фильтры"</span>
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || state.with(|s| s.visible.page))
                                total_pages=Signal::derive(move || state.with(|s| s.visible.total_pages))
                                total_count=Signal::derive(move || state.with(|s| s.visible.total_count))
                                page_size=Signal::derive(move || state.with(|s| s.query.pagination.rows_per_page))
                                on_page_change=Callback::new(go_to_page)
                                on_page_size_change=Callback::new(change_page_size)
                                page_size_options=page_size_options
                            />
                        </div>
                    </div>

                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <SearchInput
                                value=Signal::derive(move || state.with(|s| s.query.filter.search.clone()))
                                on_change=Callback::new(on_search)
                            />
                            <select
                                class="filter-select"
                                prop:value=move || status_value.get()
                                on:change=move |ev| on_status_change(event_target_value(&ev))
                            >
                                <option value=ALL>"Все статусы"</option>
                                {dropdown_statuses.into_iter().map(|status| view! {
                                    <option value=status.as_wire()>{status.display_name()}</option>
                                }).collect_view()}
                            </select>
                            {secondary.map(|filter| view! {
                                <select
                                    class="filter-select"
                                    title=filter.label
                                    prop:value=move || secondary_value.get()
                                    on:change=move |ev| on_secondary_change(event_target_value(&ev))
                                >
                                    <option value=ALL>{format!("{}: все", filter.label)}</option>
                                    {move || secondary_options.get().into_iter().map(|value| view! {
                                        <option value=value.clone()>{value.clone()}</option>
                                    }).collect_view()}
                                </select>
                            })}
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| reset_filters()
                            >
                                "Сбросить"
                            </Button>
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    ids=visible_ids
                                    selected=selected_signal
                                    on_change=Callback::new(toggle_all)
                                />
                                {header_cells.into_iter().map(|(label, field)| view! {
                                    <TableHeaderCell resizable=false min_width=100.0>
                                        <div class="table__sortable-header" style="cursor:pointer;" on:click=move |_| toggle_sort(field)>
                                            {label}
                                            <span class=move || state.with(|s| get_sort_class(s.query.sort.as_ref(), field))>
                                                {move || state.with(|s| get_sort_indicator(s.query.sort.as_ref(), field))}
                                            </span>
                                        </div>
                                    </TableHeaderCell>
                                }).collect_view()}
                                <TableHeaderCell resizable=false min_width=60.0>
                                </TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.with(|s| s.visible.rows.clone())
                                key=|record| (record.id().to_string(), record.status())
                                children=move |record| {
                                    let record_id = record.id().to_string();
                                    let id_for_open = record_id.clone();
                                    let id_for_button = record_id.clone();
                                    let status = record.status();
                                    let cells = record.csv_row();
                                    view! {
                                        <TableRow
                                            attr:style="cursor: pointer;"
                                            on:click=move |_| open_id.set(Some(id_for_open.clone()))
                                        >
                                            <TableCellCheckbox
                                                item_id=record_id
                                                selected=selected_signal
                                                on_change=Callback::new(toggle_selection)
                                            />
                                            {cells.into_iter().enumerate().map(|(i, cell)| {
                                                if Some(i) == status_column {
                                                    view! {
                                                        <TableCell>
                                                            <TableCellLayout>
                                                                <StatusBadge status=status />
                                                            </TableCellLayout>
                                                        </TableCell>
                                                    }.into_any()
                                                } else {
                                                    view! {
                                                        <TableCell>
                                                            <TableCellLayout truncate=true>{cell}</TableCellLayout>
                                                        </TableCell>
                                                    }.into_any()
                                                }
                                            }).collect_view()}
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |ev: leptos::ev::MouseEvent| {
                                                        ev.stop_propagation();
                                                        open_id.set(Some(id_for_button.clone()));
                                                    }
                                                    attr:title="Открыть"
                                                >
                                                    {icon("eye")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    {move || (state.with(|s| s.is_loaded && s.visible.rows.is_empty())).then(|| view! {
                        <div class="table__empty">"Нет записей"</div>
                    })}
                </div>

                {move || open_id.get().map(|id| view! {
                    <DecisionDialogView
                        kind=kind
                        id=id
                        on_close=on_dialog_close
                        on_changed=on_dialog_changed
                    />
                })}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bulk_only_targets_open_selected_records() {
        let records = EntityRecord::list_from_value(
            EntityKind::Loan,
            json!([
                {"id": "l-1", "applicantName": "A", "status": "PENDING"},
                {"id": "l-2", "applicantName": "B", "status": "APPROVED"},
                {"id": "l-3", "applicantName": "C", "status": "PENDING"}
            ]),
        )
        .unwrap();
        let selected: HashSet<String> = ["l-1", "l-2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            actionable_ids(&records, &selected, TransitionAction::Approve),
            vec!["l-1".to_string()]
        );
        assert_eq!(bulk_action(EntityKind::Incident), TransitionAction::Resolve);
        assert_eq!(bulk_action(EntityKind::Loan), TransitionAction::Approve);
    }
}
