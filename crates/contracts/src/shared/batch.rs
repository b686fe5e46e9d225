//! Пакетные операции с результатом по каждому элементу.
//!
//! Элементы обрабатываются последовательно; ошибка одного не прерывает
//! остальные и не откатывает уже выполненные.

use std::future::Future;

use super::api::WorkflowApi;
use super::decision_dialog::ValidationError;
use crate::domain::common::{TransitionAction, TransitionRequest, TransitionResult};

#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure<I> {
    pub item: I,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult<I, T> {
    pub succeeded: Vec<(I, T)>,
    pub failed: Vec<BatchFailure<I>>,
}

impl<I, T> Default for BatchResult<I, T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<I, T> BatchResult<I, T> {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Итог для уведомления пользователя
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Выполнено: {}", self.succeeded.len())
        } else {
            format!(
                "Выполнено: {}, с ошибкой: {}",
                self.succeeded.len(),
                self.failed.len()
            )
        }
    }
}

/// Выполнить операцию для каждого элемента по очереди
pub async fn run_batch<I, T, F, Fut>(items: Vec<I>, mut op: F) -> BatchResult<I, T>
where
    I: Clone,
    F: FnMut(I) -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    let mut result = BatchResult::default();
    for item in items {
        match op(item.clone()).await {
            Ok(value) => result.succeeded.push((item, value)),
            Err(error) => result.failed.push(BatchFailure { item, error }),
        }
    }
    if !result.failed.is_empty() {
        log::warn!("Пакетная операция: {}", result.summary());
    }
    result
}

/// Одно и то же действие для списка записей. Обязательная причина
/// проверяется до первого запроса.
pub async fn bulk_transition<A: WorkflowApi>(
    api: &A,
    ids: Vec<String>,
    action: TransitionAction,
    reason: Option<String>,
) -> Result<BatchResult<String, TransitionResult>, ValidationError> {
    let reason = reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    if action.requires_reason() && reason.is_none() {
        return Err(ValidationError::ReasonRequired(action.label()));
    }

    Ok(run_batch(ids, |id| {
        let request = TransitionRequest {
            id,
            reason: reason.clone(),
        };
        async move {
            match api.transition(action, request).await {
                Ok(result) if result.success => Ok(result),
                Ok(result) => Err(result
                    .error
                    .unwrap_or_else(|| "Действие отклонено сервером".to_string())),
                Err(e) => Err(e.to_string()),
            }
        }
    })
    .await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ApprovalStatus;
    use crate::shared::test_support::{miner, MockApi};

    fn api() -> MockApi {
        MockApi::new(vec![
            miner("m-1", Some(ApprovalStatus::Pending), 1, "Driller"),
            miner("m-2", Some(ApprovalStatus::Pending), 2, "Driller"),
            miner("m-3", Some(ApprovalStatus::Pending), 3, "Driller"),
        ])
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_rest() {
        let api = api().failing_for(&["m-2"]);
        let result = bulk_transition(
            &api,
            ids(&["m-1", "m-2", "m-3"]),
            TransitionAction::Approve,
            None,
        )
        .await
        .unwrap();

        assert_eq!(api.transitions().len(), 3);
        let done: Vec<&str> = result.succeeded.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(done, vec!["m-1", "m-3"]);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].item, "m-2");
        assert!(!result.is_complete_success());
        assert_eq!(result.summary(), "Выполнено: 2, с ошибкой: 1");
    }

    #[tokio::test]
    async fn test_business_refusal_is_a_per_item_failure() {
        let api = api().respond_with(Ok(TransitionResult::failed("Already approved")));
        let result = bulk_transition(&api, ids(&["m-1"]), TransitionAction::Approve, None)
            .await
            .unwrap();
        assert!(result.succeeded.is_empty());
        assert_eq!(result.failed[0].error, "Already approved");
    }

    #[tokio::test]
    async fn test_required_reason_checked_before_any_call() {
        let api = api();
        let outcome = bulk_transition(
            &api,
            ids(&["m-1", "m-2"]),
            TransitionAction::Reject,
            Some("  ".to_string()),
        )
        .await;
        assert_eq!(outcome, Err(ValidationError::ReasonRequired("Отклонить")));
        assert!(api.transitions().is_empty());
    }

    #[tokio::test]
    async fn test_run_batch_reports_every_item() {
        let result = run_batch(vec![1, 2, 3, 4], |n| async move {
            if n % 2 == 0 {
                Ok(n * 10)
            } else {
                Err(format!("odd {}", n))
            }
        })
        .await;
        assert_eq!(result.total(), 4);
        assert_eq!(result.succeeded, vec![(2, 20), (4, 40)]);
        assert_eq!(result.failed[1].error, "odd 3");
    }
}
