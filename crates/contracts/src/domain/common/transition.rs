use serde::{Deserialize, Serialize};

/// Действие перевода записи в другой статус
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionAction {
    Approve,
    Reject,
    PushBack,
    Resolve,
    Close,
    Escalate,
}

impl TransitionAction {
    /// Часть имени endpoint: `approve` в `approve-miner`
    pub fn slug(&self) -> &'static str {
        match self {
            TransitionAction::Approve => "approve",
            TransitionAction::Reject => "reject",
            TransitionAction::PushBack => "pushback",
            TransitionAction::Resolve => "resolve",
            TransitionAction::Close => "close",
            TransitionAction::Escalate => "escalate",
        }
    }

    /// Подпись кнопки
    pub fn label(&self) -> &'static str {
        match self {
            TransitionAction::Approve => "Одобрить",
            TransitionAction::Reject => "Отклонить",
            TransitionAction::PushBack => "Вернуть на доработку",
            TransitionAction::Resolve => "Решено",
            TransitionAction::Close => "Закрыть инцидент",
            TransitionAction::Escalate => "Эскалировать",
        }
    }

    /// Для перехода обязательна непустая причина
    pub fn requires_reason(&self) -> bool {
        matches!(
            self,
            TransitionAction::Reject
                | TransitionAction::PushBack
                | TransitionAction::Close
                | TransitionAction::Escalate
        )
    }
}

/// Тело запроса на смену статуса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Ответ обёртки клиента на смену статуса.
///
/// Ожидаемые отказы приходят как `success: false`, а не как ошибка транспорта.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TransitionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_missing_reason() {
        let request = TransitionRequest {
            id: "m-1".to_string(),
            reason: None,
        };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"id":"m-1"}"#);
    }

    #[test]
    fn test_action_labels_are_distinct() {
        let all = [
            TransitionAction::Approve,
            TransitionAction::Reject,
            TransitionAction::PushBack,
            TransitionAction::Resolve,
            TransitionAction::Close,
            TransitionAction::Escalate,
        ];
        let mut labels: Vec<&str> = all.iter().map(|a| a.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), all.len());
        assert_eq!(TransitionAction::Close.label(), "Закрыть инцидент");
    }

    #[test]
    fn test_result_tolerates_minimal_body() {
        let result: TransitionResult = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!result.success);
        assert!(result.error.is_none());
    }
}
