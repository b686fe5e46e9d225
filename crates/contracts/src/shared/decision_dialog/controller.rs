//! Headless-драйвер диалога решения: ведёт `DialogState` по шагам
//! (загрузка, выбор действия, причина, отправка) поверх любого `WorkflowApi`
//! без DOM и реактивности. Используется нативными клиентами и тестами.
//!
//! Браузерная карточка (`frontend::domain::workflow::ui::details`) хранит
//! тот же `DialogState` в сигнале и вызывает те же переходы
//! (`open`, `load_finished`, `choose`, `submit`, `submit_finished`),
//! поэтому правила подтверждения и валидации причины у них общие.

use super::state::{ConfirmationPolicy, DialogState, ValidationError};
use crate::domain::common::{TransitionAction, TransitionRequest};
use crate::shared::api::WorkflowApi;
use crate::shared::config::WorkflowConfig;

/// Диалог просмотра записи и принятия решения поверх клиента API
pub struct DecisionDialog<A: WorkflowApi> {
    api: A,
    policy: ConfirmationPolicy,
    default_reason: String,
    state: DialogState<A::Record>,
}

impl<A: WorkflowApi> DecisionDialog<A> {
    pub fn new(api: A, config: &WorkflowConfig) -> Self {
        Self {
            api,
            policy: config.confirmation,
            default_reason: config.approve_default_reason.clone(),
            state: DialogState::Closed,
        }
    }

    pub fn state(&self) -> &DialogState<A::Record> {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Открыть диалог и загрузить запись
    pub async fn open(&mut self, id: &str) {
        self.state.open(id);
        let outcome = self.api.fetch_by_id(id).await.map_err(|e| {
            log::error!("Не удалось загрузить запись {}: {}", id, e);
            e.to_string()
        });
        self.state.load_finished(id, outcome);
    }

    /// Повторить загрузку после ошибки
    pub async fn retry(&mut self) {
        if let DialogState::Error { id, .. } = &self.state {
            let id = id.clone();
            self.open(&id).await;
        }
    }

    /// Нажатие кнопки действия; без окна причины запрос уходит сразу.
    /// Возвращает `true`, если запись изменилась.
    pub async fn choose(&mut self, action: TransitionAction) -> Result<bool, ValidationError> {
        match self.state.choose(action, self.policy, &self.default_reason)? {
            Some(request) => Ok(self.send(action, request).await),
            None => Ok(false),
        }
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.state.set_reason(reason);
    }

    pub fn cancel_reason(&mut self) {
        self.state.cancel_reason();
    }

    /// Отправить решение из окна причины
    pub async fn submit(&mut self) -> Result<bool, ValidationError> {
        let action = match &self.state {
            DialogState::AwaitingReason { action, .. } => *action,
            _ => return Err(ValidationError::NotReady),
        };
        let request = self.state.submit()?;
        Ok(self.send(action, request).await)
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    async fn send(&mut self, action: TransitionAction, request: TransitionRequest) -> bool {
        let outcome = self
            .api
            .transition(action, request)
            .await
            .map_err(|e| e.to_string());
        self.state.submit_finished(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{ApprovalStatus, TransitionResult, WorkflowRecord};
    use crate::shared::api::ApiError;
    use crate::shared::decision_dialog::{Notice, UNEXPECTED_ERROR};
    use crate::shared::test_support::{miner, MockApi};

    fn config(policy: ConfirmationPolicy) -> WorkflowConfig {
        WorkflowConfig {
            confirmation: policy,
            ..WorkflowConfig::default()
        }
    }

    fn pending_api() -> MockApi {
        MockApi::new(vec![miner("m-7", Some(ApprovalStatus::Pending), 2, "Driller")])
    }

    #[tokio::test]
    async fn test_reject_requires_reason_then_calls_once() {
        let mut dialog = DecisionDialog::new(pending_api(), &config(ConfirmationPolicy::Always));
        dialog.open("m-7").await;
        assert_eq!(dialog.state().actions().len(), 3);

        assert_eq!(dialog.choose(TransitionAction::Reject).await, Ok(false));
        assert_eq!(
            dialog.submit().await,
            Err(ValidationError::ReasonRequired("Отклонить"))
        );
        assert!(dialog.api().transitions().is_empty());

        dialog.set_reason("missing documents");
        assert_eq!(dialog.submit().await, Ok(true));
        assert_eq!(
            dialog.api().transitions(),
            vec![(
                TransitionAction::Reject,
                "m-7".to_string(),
                Some("missing documents".to_string())
            )]
        );

        let record = dialog.state().record().unwrap();
        assert_eq!(record.status(), Some(ApprovalStatus::Rejected));
        assert_eq!(record.reason(), Some("missing documents"));
        assert!(dialog.state().actions().is_empty());
    }

    #[tokio::test]
    async fn test_approve_without_confirmation_sends_immediately() {
        let mut dialog =
            DecisionDialog::new(pending_api(), &config(ConfirmationPolicy::ReasonOnly));
        dialog.open("m-7").await;
        assert_eq!(dialog.choose(TransitionAction::Approve).await, Ok(true));
        assert_eq!(
            dialog.api().transitions(),
            vec![(TransitionAction::Approve, "m-7".to_string(), None)]
        );
        assert_eq!(
            dialog.state().record().unwrap().status(),
            Some(ApprovalStatus::Approved)
        );
    }

    #[tokio::test]
    async fn test_server_refusal_keeps_status() {
        let api = pending_api().respond_with(Ok(TransitionResult::failed("Already processed")));
        let mut dialog = DecisionDialog::new(api, &config(ConfirmationPolicy::ReasonOnly));
        dialog.open("m-7").await;
        assert_eq!(dialog.choose(TransitionAction::Approve).await, Ok(false));
        assert_eq!(
            dialog.state().record().unwrap().status(),
            Some(ApprovalStatus::Pending)
        );
        assert_eq!(
            dialog.state().notice(),
            Some(&Notice::Error("Already processed".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_shows_generic_error() {
        let api = pending_api().respond_with(Err(ApiError::Status(502)));
        let mut dialog = DecisionDialog::new(api, &config(ConfirmationPolicy::Always));
        dialog.open("m-7").await;
        dialog.choose(TransitionAction::PushBack).await.unwrap();
        dialog.set_reason("photo unreadable");
        assert_eq!(dialog.submit().await, Ok(false));
        assert!(matches!(
            dialog.state().notice(),
            Some(Notice::Error(message)) if message == UNEXPECTED_ERROR
        ));
    }

    #[tokio::test]
    async fn test_missing_record_then_retry() {
        let mut dialog = DecisionDialog::new(pending_api(), &config(ConfirmationPolicy::Always));
        dialog.open("nope").await;
        assert!(matches!(dialog.state(), DialogState::Error { .. }));
        dialog.retry().await;
        assert!(matches!(dialog.state(), DialogState::Error { .. }));
        dialog.close();
        assert_eq!(dialog.state(), &DialogState::Closed);
    }
}
