use serde::Deserialize;
use thiserror::Error;

use crate::domain::common::{
    TransitionAction, TransitionRequest, TransitionResult, WorkflowRecord, WorkflowStatus,
};

/// Единая политика подтверждения для всех типов сущностей
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationPolicy {
    /// Одобрение тоже проходит через окно подтверждения (причина необязательна)
    Always,
    /// Окно только для действий с обязательной причиной
    ReasonOnly,
}

/// Ошибка ввода в диалоге; запрос к backend не отправляется
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Укажите причину: {0}")]
    ReasonRequired(&'static str),
    #[error("Действие «{0}» недоступно для текущего статуса")]
    ActionUnavailable(&'static str),
    #[error("Диалог не готов к этому действию")]
    NotReady,
}

/// Сообщение под карточкой после попытки перехода
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub const UNEXPECTED_ERROR: &str = "Произошла непредвиденная ошибка";

/// Состояние диалога просмотра и решения по записи
#[derive(Debug, Clone, PartialEq)]
pub enum DialogState<R> {
    Closed,
    Loading {
        id: String,
    },
    Loaded {
        record: R,
        notice: Option<Notice>,
    },
    Error {
        id: String,
        message: String,
    },
    AwaitingReason {
        record: R,
        action: TransitionAction,
        reason: String,
        validation: Option<String>,
    },
    Submitting {
        record: R,
        action: TransitionAction,
        reason: Option<String>,
    },
}

impl<R> Default for DialogState<R> {
    fn default() -> Self {
        DialogState::Closed
    }
}

impl<R: WorkflowRecord> DialogState<R> {
    pub fn open(&mut self, id: impl Into<String>) {
        *self = DialogState::Loading { id: id.into() };
    }

    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }

    /// id записи, которую ждёт загрузка
    pub fn loading_id(&self) -> Option<&str> {
        match self {
            DialogState::Loading { id } => Some(id),
            _ => None,
        }
    }

    /// Результат загрузки. Ответ, пришедший после закрытия диалога или
    /// для другой записи, игнорируется.
    pub fn load_finished(&mut self, id: &str, outcome: Result<Option<R>, String>) {
        if self.loading_id() != Some(id) {
            log::debug!("Ответ загрузки {} пришёл поздно, пропуск", id);
            return;
        }
        *self = match outcome {
            Ok(Some(record)) => DialogState::Loaded {
                record,
                notice: None,
            },
            Ok(None) => DialogState::Error {
                id: id.to_string(),
                message: "Запись не найдена".to_string(),
            },
            Err(message) => DialogState::Error {
                id: id.to_string(),
                message,
            },
        };
    }

    pub fn record(&self) -> Option<&R> {
        match self {
            DialogState::Loaded { record, .. }
            | DialogState::AwaitingReason { record, .. }
            | DialogState::Submitting { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            DialogState::Loaded { notice, .. } => notice.as_ref(),
            _ => None,
        }
    }

    /// Кнопки действий показываются только в состоянии Loaded и только для открытого статуса
    pub fn actions(&self) -> &'static [TransitionAction] {
        match self {
            DialogState::Loaded { record, .. } => record.available_actions(),
            _ => &[],
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DialogState::Submitting { .. })
    }

    /// Кнопка отправки активна
    pub fn can_submit(&self) -> bool {
        match self {
            DialogState::AwaitingReason { action, reason, .. } => {
                !action.requires_reason() || !reason.trim().is_empty()
            }
            _ => false,
        }
    }

    /// Нажатие кнопки действия. `Some(request)`: отправлять сразу, без окна причины.
    pub fn choose(
        &mut self,
        action: TransitionAction,
        policy: ConfirmationPolicy,
        default_reason: &str,
    ) -> Result<Option<TransitionRequest>, ValidationError> {
        let record = match self {
            DialogState::Loaded { record, .. } => record.clone(),
            _ => return Err(ValidationError::NotReady),
        };
        if !record.available_actions().contains(&action) {
            return Err(ValidationError::ActionUnavailable(action.label()));
        }

        if action.requires_reason() || policy == ConfirmationPolicy::Always {
            let reason = if action.requires_reason() {
                String::new()
            } else {
                default_reason.to_string()
            };
            *self = DialogState::AwaitingReason {
                record,
                action,
                reason,
                validation: None,
            };
            return Ok(None);
        }

        let request = TransitionRequest {
            id: record.id().to_string(),
            reason: None,
        };
        *self = DialogState::Submitting {
            record,
            action,
            reason: None,
        };
        Ok(Some(request))
    }

    pub fn set_reason(&mut self, text: impl Into<String>) {
        if let DialogState::AwaitingReason {
            reason, validation, ..
        } = self
        {
            *reason = text.into();
            *validation = None;
        }
    }

    /// Отмена окна причины
    pub fn cancel_reason(&mut self) {
        if let DialogState::AwaitingReason { record, .. } = self {
            *self = DialogState::Loaded {
                record: record.clone(),
                notice: None,
            };
        }
    }

    /// Отправка из окна причины. Пустая причина для Reject/PushBack блокируется.
    pub fn submit(&mut self) -> Result<TransitionRequest, ValidationError> {
        let (record, action, reason) = match self {
            DialogState::AwaitingReason {
                record,
                action,
                reason,
                validation,
            } => {
                let trimmed = reason.trim();
                if action.requires_reason() && trimmed.is_empty() {
                    let error = ValidationError::ReasonRequired(action.label());
                    *validation = Some(error.to_string());
                    return Err(error);
                }
                let reason = (!trimmed.is_empty()).then(|| trimmed.to_string());
                (record.clone(), *action, reason)
            }
            _ => return Err(ValidationError::NotReady),
        };
        let request = TransitionRequest {
            id: record.id().to_string(),
            reason: reason.clone(),
        };
        *self = DialogState::Submitting {
            record,
            action,
            reason,
        };
        Ok(request)
    }

    /// Ответ на отправку. Возвращает `true`, если запись изменилась и список
    /// нужно обновить.
    pub fn submit_finished(&mut self, outcome: Result<TransitionResult, String>) -> bool {
        let (mut record, action, reason) = match self {
            DialogState::Submitting {
                record,
                action,
                reason,
            } => (record.clone(), *action, reason.clone()),
            _ => return false,
        };

        let (notice, changed) = match outcome {
            Ok(result) if result.success => {
                match record.status().and_then(|status| status.after(action)) {
                    Some(target) => {
                        record.set_status(target, reason);
                        (
                            Notice::Success(format!("Статус изменён: {}", target.display_name())),
                            true,
                        )
                    }
                    None => {
                        log::warn!(
                            "Backend подтвердил {:?} для {}, но локальный статус не допускает переход",
                            action,
                            record.id()
                        );
                        (Notice::Success("Действие выполнено".to_string()), true)
                    }
                }
            }
            Ok(result) => (
                Notice::Error(
                    result
                        .error
                        .unwrap_or_else(|| "Действие отклонено сервером".to_string()),
                ),
                false,
            ),
            Err(message) => {
                log::error!("Ошибка при смене статуса {}: {}", record.id(), message);
                (Notice::Error(UNEXPECTED_ERROR.to_string()), false)
            }
        };

        *self = DialogState::Loaded {
            record,
            notice: Some(notice),
        };
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_miner::Miner;
    use crate::domain::common::ApprovalStatus;
    use crate::shared::test_support::miner;

    fn loaded(status: ApprovalStatus) -> DialogState<Miner> {
        let mut state = DialogState::default();
        state.open("m-1");
        state.load_finished("m-1", Ok(Some(miner("m-1", Some(status), 1, "Driller"))));
        state
    }

    #[test]
    fn test_open_load_and_failure_paths() {
        let mut state: DialogState<Miner> = DialogState::default();
        state.open("m-1");
        assert_eq!(state.loading_id(), Some("m-1"));
        state.load_finished("m-1", Err("timeout".to_string()));
        assert_eq!(
            state,
            DialogState::Error {
                id: "m-1".to_string(),
                message: "timeout".to_string()
            }
        );

        state.open("m-2");
        state.load_finished("m-2", Ok(None));
        assert!(matches!(state, DialogState::Error { .. }));
    }

    #[test]
    fn test_late_response_after_close_is_ignored() {
        let mut state: DialogState<Miner> = DialogState::default();
        state.open("m-1");
        state.close();
        state.load_finished("m-1", Ok(Some(miner("m-1", None, 1, "x"))));
        assert_eq!(state, DialogState::Closed);
    }

    #[test]
    fn test_reject_with_blank_reason_stays_awaiting() {
        let mut state = loaded(ApprovalStatus::Pending);
        let direct = state
            .choose(TransitionAction::Reject, ConfirmationPolicy::ReasonOnly, "")
            .unwrap();
        assert!(direct.is_none());
        assert!(!state.can_submit());

        state.set_reason("   ");
        assert_eq!(
            state.submit(),
            Err(ValidationError::ReasonRequired("Отклонить"))
        );
        match &state {
            DialogState::AwaitingReason { validation, .. } => assert!(validation.is_some()),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_approve_policy_controls_confirmation() {
        let mut direct = loaded(ApprovalStatus::Pending);
        let request = direct
            .choose(TransitionAction::Approve, ConfirmationPolicy::ReasonOnly, "ok")
            .unwrap()
            .unwrap();
        assert_eq!(request.reason, None);
        assert!(direct.is_submitting());

        let mut confirmed = loaded(ApprovalStatus::Pending);
        assert!(confirmed
            .choose(TransitionAction::Approve, ConfirmationPolicy::Always, "Документы проверены")
            .unwrap()
            .is_none());
        assert!(confirmed.can_submit());
        let request = confirmed.submit().unwrap();
        assert_eq!(request.reason.as_deref(), Some("Документы проверены"));
    }

    #[test]
    fn test_success_patches_status_and_hides_actions() {
        let mut state = loaded(ApprovalStatus::Pending);
        state
            .choose(TransitionAction::PushBack, ConfirmationPolicy::Always, "")
            .unwrap();
        state.set_reason("blurred photo");
        state.submit().unwrap();

        assert!(state.submit_finished(Ok(TransitionResult::ok())));
        let record = state.record().unwrap();
        assert_eq!(record.base.status, Some(ApprovalStatus::PushedBack));
        assert_eq!(record.base.reason.as_deref(), Some("blurred photo"));
        assert!(state.actions().is_empty());
        assert!(matches!(state.notice(), Some(Notice::Success(_))));
    }

    #[test]
    fn test_business_failure_leaves_record_unchanged() {
        let mut state = loaded(ApprovalStatus::Pending);
        state
            .choose(TransitionAction::Approve, ConfirmationPolicy::ReasonOnly, "")
            .unwrap();
        assert!(!state.submit_finished(Ok(TransitionResult::failed("Licence expired"))));
        assert_eq!(
            state.record().unwrap().base.status,
            Some(ApprovalStatus::Pending)
        );
        assert_eq!(
            state.notice(),
            Some(&Notice::Error("Licence expired".to_string()))
        );
        assert_eq!(state.actions().len(), 3);

        state
            .choose(TransitionAction::Approve, ConfirmationPolicy::ReasonOnly, "")
            .unwrap();
        assert!(!state.submit_finished(Err("connection reset".to_string())));
        assert_eq!(
            state.notice(),
            Some(&Notice::Error(UNEXPECTED_ERROR.to_string()))
        );
    }

    #[test]
    fn test_terminal_record_offers_nothing() {
        let mut state = loaded(ApprovalStatus::Approved);
        assert!(state.actions().is_empty());
        assert_eq!(
            state.choose(TransitionAction::Reject, ConfirmationPolicy::Always, ""),
            Err(ValidationError::ActionUnavailable("Отклонить"))
        );
        state.cancel_reason();
        state.close();
        assert_eq!(state, DialogState::Closed);
    }
}
