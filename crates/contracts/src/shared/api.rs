//! Контракт клиента REST backend.
//!
//! Backend внешний; здесь только форма запросов и ответов. Реализация
//! для браузера живёт во frontend (gloo-net), тесты используют mock.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::common::{TransitionAction, TransitionRequest, TransitionResult, WorkflowRecord};

/// Ключ local storage с bearer токеном
pub const AUTH_TOKEN_KEY: &str = "custom-auth-token";

/// Ошибка транспорта или разбора ответа
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Failed to send request: {0}")]
    Network(String),
    #[error("Server error: {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Заголовок `Authorization` для сохранённого токена
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Обёртка клиента над endpoint одного типа сущности
#[async_trait(?Send)]
pub trait WorkflowApi {
    type Record: WorkflowRecord;

    /// Список; пустой ответ: пустой вектор
    async fn fetch_all(&self) -> Result<Vec<Self::Record>, ApiError>;

    /// Карточка по id; `None`, если записи нет
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Self::Record>, ApiError>;

    /// Смена статуса. Бизнес-отказ: `Ok` с `success: false`.
    async fn transition(
        &self,
        action: TransitionAction,
        request: TransitionRequest,
    ) -> Result<TransitionResult, ApiError>;

    async fn approve(&self, id: &str) -> Result<TransitionResult, ApiError> {
        let request = TransitionRequest {
            id: id.to_string(),
            reason: None,
        };
        self.transition(TransitionAction::Approve, request).await
    }

    async fn reject(&self, id: &str, reason: &str) -> Result<TransitionResult, ApiError> {
        let request = TransitionRequest {
            id: id.to_string(),
            reason: Some(reason.to_string()),
        };
        self.transition(TransitionAction::Reject, request).await
    }

    async fn pushback(&self, id: &str, reason: &str) -> Result<TransitionResult, ApiError> {
        let request = TransitionRequest {
            id: id.to_string(),
            reason: Some(reason.to_string()),
        };
        self.transition(TransitionAction::PushBack, request).await
    }
}
