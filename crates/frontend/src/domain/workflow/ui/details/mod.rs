use std::sync::Arc;

use contracts::domain::common::{
    TransitionAction, TransitionRequest, TransitionResult, WorkflowRecord,
};
use contracts::domain::EntityRecord;
use contracts::enums::EntityKind;
use contracts::shared::api::WorkflowApi;
use contracts::shared::decision_dialog::{DialogState, Notice, ValidationError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::workflow::api::EntityClient;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::date_utils::{format_date, format_datetime_opt};
use crate::shared::modal::Modal;

/// Поля карточки: подпись и значение для отображения
fn record_fields(
    kind: EntityKind,
    record: &EntityRecord,
) -> Vec<(&'static str, &'static str, String)> {
    EntityRecord::headers_for(kind)
        .into_iter()
        .zip(EntityRecord::fields_for(kind))
        .zip(record.csv_row())
        .map(|((label, field), value)| {
            let value = match field {
                "createdAt" => format_datetime_opt(record.created_at()),
                f if f.ends_with("Date") && !value.is_empty() => format_date(&value),
                _ if value.is_empty() => "-".to_string(),
                _ => value,
            };
            (label, field, value)
        })
        .collect()
}

type DialogSignal = RwSignal<DialogState<EntityRecord>>;

/// Ответ загрузки карточки; `false`, если диалог уже закрыт
fn finish_load(
    state: DialogSignal,
    id: &str,
    outcome: Result<Option<EntityRecord>, String>,
) -> bool {
    state.try_update(|s| s.load_finished(id, outcome)).is_some()
}

/// Ответ на смену статуса; `true`, если диалог открыт и запись изменилась
fn finish_transition(state: DialogSignal, outcome: Result<TransitionResult, String>) -> bool {
    state
        .try_update(|s| s.submit_finished(outcome))
        .unwrap_or(false)
}

/// Действие, ожидающее ввода причины
fn pending_action(s: &DialogState<EntityRecord>) -> Option<TransitionAction> {
    match s {
        DialogState::AwaitingReason { action, .. } => Some(*action),
        _ => None,
    }
}

fn reason_text(s: &DialogState<EntityRecord>) -> String {
    match s {
        DialogState::AwaitingReason { reason, .. } => reason.clone(),
        _ => String::new(),
    }
}

/// Подсказка под полем причины: ошибка проверки или напоминание о пустой причине
fn reason_hint(s: &DialogState<EntityRecord>) -> Option<String> {
    match s {
        DialogState::AwaitingReason {
            validation: Some(message),
            ..
        } => Some(message.clone()),
        DialogState::AwaitingReason { action, .. } if !s.can_submit() => {
            Some(ValidationError::ReasonRequired(action.label()).to_string())
        }
        _ => None,
    }
}

/// Диалог просмотра записи и принятия решения
#[component]
pub fn DecisionDialogView(
    kind: EntityKind,
    id: String,
    /// Закрытие диалога
    on_close: Callback<()>,
    /// Запись изменила статус; список нужно обновить
    on_changed: Callback<()>,
) -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let workflow = ctx.config.get_untracked().workflow;
    let policy = workflow.confirmation;
    let default_reason = StoredValue::new(workflow.approve_default_reason);

    let state: RwSignal<DialogState<EntityRecord>> = RwSignal::new(DialogState::Closed);

    let load = move |id: String| {
        state.update(|s| s.open(id.clone()));
        let client = EntityClient::from_context(&ctx, kind);
        spawn_local(async move {
            let outcome = client.fetch_by_id(&id).await.map_err(|e| {
                log::error!("Не удалось загрузить {} {}: {}", kind.code(), id, e);
                e.to_string()
            });
            if !finish_load(state, &id, outcome) {
                log::debug!("{} {}: диалог закрыт, ответ отброшен", kind.code(), id);
            }
        });
    };

    let send = move |action: TransitionAction, request: TransitionRequest| {
        let client = EntityClient::from_context(&ctx, kind);
        spawn_local(async move {
            log::info!("{} {}: {}", kind.code(), request.id, action.label());
            let outcome = client
                .transition(action, request)
                .await
                .map_err(|e| e.to_string());
            if finish_transition(state, outcome) {
                let _ = on_changed.try_run(());
            }
        });
    };

    let choose = move |action: TransitionAction| {
        let mut outcome = Ok(None);
        state.update(|s| {
            outcome = default_reason.with_value(|reason| s.choose(action, policy, reason));
        });
        match outcome {
            Ok(Some(request)) => send(action, request),
            Ok(None) => {}
            Err(e) => log::warn!("{}", e),
        }
    };

    let submit = move || {
        let Some(action) = state.with_untracked(pending_action) else {
            return;
        };
        let mut outcome = None;
        state.update(|s| outcome = Some(s.submit()));
        if let Some(Ok(request)) = outcome {
            send(action, request);
        }
    };

    let retry = move || {
        let id = state.with_untracked(|s| match s {
            DialogState::Error { id, .. } => Some(id.clone()),
            _ => None,
        });
        if let Some(id) = id {
            load(id);
        }
    };

    let close = Callback::new(move |_: ()| {
        state.update(|s| s.close());
        on_close.run(());
    });

    load(id);

    let awaiting = Memo::new(move |_| state.with(pending_action));
    let submitting = Memo::new(move |_| {
        state.with(|s| match s {
            DialogState::Submitting { action, .. } => Some(*action),
            _ => None,
        })
    });

    let title = Signal::derive(move || {
        state.with(|s| match s.record() {
            Some(record) => format!("{}: {}", kind.display_name(), record.title()),
            None => kind.display_name().to_string(),
        })
    });

    let footer: ChildrenFn = Arc::new(move || {
        view! {
            <Flex gap=FlexGap::Small>
                {move || state.with(|s| s.actions()).iter().map(|action| {
                    let action = *action;
                    let appearance = if action.requires_reason() {
                        ButtonAppearance::Secondary
                    } else {
                        ButtonAppearance::Primary
                    };
                    view! {
                        <Button
                            appearance=appearance
                            on_click=move |_| choose(action)
                            disabled=Signal::derive(move || state.with(|s| s.is_submitting()))
                        >
                            {action.label()}
                        </Button>
                    }
                }).collect_view()}
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| close.run(())
                >
                    "Закрыть"
                </Button>
            </Flex>
        }
        .into_any()
    });

    view! {
        <Modal title=title on_close=close footer=footer>
            {move || {
                state.with(|s| match s {
                    DialogState::Closed => ().into_any(),
                    DialogState::Loading { .. } => view! {
                        <div class="dialog__loading">
                            <Spinner />
                            " Загрузка..."
                        </div>
                    }.into_any(),
                    DialogState::Error { message, .. } => {
                        let message = message.clone();
                        view! {
                            <div class="alert alert--error">
                                <span>{message}</span>
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| retry()
                                >
                                    "Повторить"
                                </Button>
                            </div>
                        }.into_any()
                    }
                    other => {
                        let Some(record) = other.record() else {
                            return ().into_any();
                        };
                        let fields = record_fields(kind, record);
                        let status = record.status();
                        let notice = other.notice().cloned();
                        view! {
                            <div class="dialog__body">
                                {notice.map(|notice| match notice {
                                    Notice::Success(message) => view! {
                                        <div class="alert alert--success">{message}</div>
                                    }.into_any(),
                                    Notice::Error(message) => view! {
                                        <div class="alert alert--error">{message}</div>
                                    }.into_any(),
                                })}
                                <dl class="details-grid">
                                    {fields.into_iter().map(|(label, field, value)| {
                                        let value_view = if field == "status" {
                                            view! { <StatusBadge status=status /> }.into_any()
                                        } else {
                                            value.into_any()
                                        };
                                        view! {
                                            <dt class="details-grid__label">{label}</dt>
                                            <dd class="details-grid__value">{value_view}</dd>
                                        }
                                    }).collect_view()}
                                </dl>
                            </div>
                        }.into_any()
                    }
                })
            }}

            {move || awaiting.get().map(|action| {
                let placeholder = if action.requires_reason() {
                    "Причина (обязательно)"
                } else {
                    "Комментарий"
                };
                view! {
                    <div class="reason-box">
                        <div class="reason-box__title">{action.label()}</div>
                        <textarea
                            class="reason-box__input"
                            rows=3
                            placeholder=placeholder
                            prop:value=move || state.with(reason_text)
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                state.update(|s| s.set_reason(text));
                            }
                        />
                        {move || state.with(reason_hint).map(|message| view! {
                            <div class="reason-box__error">{message}</div>
                        })}
                        <Flex gap=FlexGap::Small>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| state.update(|s| s.cancel_reason())
                            >
                                "Отмена"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| submit()
                                disabled=Signal::derive(move || !state.with(|s| s.can_submit()))
                            >
                                "Подтвердить"
                            </Button>
                        </Flex>
                    </div>
                }
            })}

            {move || submitting.get().map(|action| view! {
                <div class="reason-box">
                    <Spinner />
                    {format!(" {}...", action.label())}
                </div>
            })}
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::{ApprovalStatus, RecordStatus};
    use contracts::shared::decision_dialog::ConfirmationPolicy;
    use serde_json::json;

    fn pending_miner() -> EntityRecord {
        EntityRecord::from_value(
            EntityKind::Miner,
            json!({
                "id": "m-1",
                "name": "Tendai",
                "surname": "Moyo",
                "status": "PENDING",
                "createdAt": "2024-03-15T14:02:26Z"
            }),
        )
        .unwrap()
    }

    fn loaded() -> DialogState<EntityRecord> {
        let mut state = DialogState::Closed;
        state.open("m-1");
        state.load_finished("m-1", Ok(Some(pending_miner())));
        state
    }

    #[test]
    fn test_reject_submit_disabled_until_reason_typed() {
        let mut state = loaded();
        state
            .choose(TransitionAction::Reject, ConfirmationPolicy::ReasonOnly, "")
            .unwrap();
        assert_eq!(pending_action(&state), Some(TransitionAction::Reject));
        assert!(!state.can_submit());
        assert_eq!(
            reason_hint(&state).as_deref(),
            Some("Укажите причину: Отклонить")
        );

        state.set_reason("   ");
        assert!(!state.can_submit());

        state.set_reason("missing documents");
        assert!(state.can_submit());
        assert_eq!(reason_text(&state), "missing documents");
        assert_eq!(reason_hint(&state), None);
    }

    #[test]
    fn test_transition_response_patches_open_dialog() {
        let owner = Owner::new();
        owner.set();
        let state: DialogSignal = RwSignal::new(DialogState::Closed);
        state.update(|s| s.open("m-1"));
        assert!(finish_load(state, "m-1", Ok(Some(pending_miner()))));
        state.update(|s| {
            s.choose(TransitionAction::Approve, ConfirmationPolicy::ReasonOnly, "")
                .unwrap();
        });

        assert!(finish_transition(state, Ok(TransitionResult::ok())));
        let status = state.with_untracked(|s| s.record().and_then(|r| r.status()));
        assert_eq!(status, Some(RecordStatus::Approval(ApprovalStatus::Approved)));
    }

    #[test]
    fn test_responses_after_close_are_dropped() {
        let owner = Owner::new();
        owner.set();
        let state: DialogSignal = RwSignal::new(DialogState::Closed);
        state.update(|s| s.open("m-1"));
        owner.cleanup();

        assert!(!finish_load(state, "m-1", Ok(Some(pending_miner()))));
        assert!(!finish_transition(state, Ok(TransitionResult::ok())));
    }

    #[test]
    fn test_record_fields_format_dates_and_blanks() {
        let record = pending_miner();
        let fields = record_fields(EntityKind::Miner, &record);
        let created = fields.iter().find(|(_, f, _)| *f == "createdAt").unwrap();
        assert_eq!(created.2, "15.03.2024 14:02");
        let phone = fields.iter().find(|(_, f, _)| *f == "phone").unwrap();
        assert_eq!(phone.2, "-");
    }
}
