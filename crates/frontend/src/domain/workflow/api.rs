use async_trait::async_trait;
use contracts::domain::common::{TransitionAction, TransitionRequest, TransitionResult};
use contracts::domain::EntityRecord;
use contracts::enums::EntityKind;
use contracts::shared::api::{bearer, ApiError, WorkflowApi};
use gloo_net::http::{Request, Response};
use leptos::prelude::*;
use serde_json::Value;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::api_url;

/// Клиент REST для одного типа сущности; токен добавляется к каждому запросу
#[derive(Clone, Debug)]
pub struct EntityClient {
    kind: EntityKind,
    port: u16,
    token: Option<String>,
}

impl EntityClient {
    pub fn new(kind: EntityKind, port: u16, token: Option<String>) -> Self {
        Self { kind, port, token }
    }

    /// Клиент с текущими настройками и токеном приложения
    pub fn from_context(ctx: &AppGlobalContext, kind: EntityKind) -> Self {
        let port = ctx.config.with_untracked(|c| c.api.port);
        Self::new(kind, port, ctx.auth_token.get_untracked())
    }

    fn auth_header(&self) -> Result<String, ApiError> {
        self.token
            .as_deref()
            .map(bearer)
            .ok_or(ApiError::NotAuthenticated)
    }

    async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let auth_header = self.auth_header()?;
        Request::get(&api_url(self.port, path))
            .header("Authorization", &auth_header)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

fn check_status(response: &Response) -> Result<(), ApiError> {
    match response.status() {
        401 | 403 => Err(ApiError::NotAuthenticated),
        _ if response.ok() => Ok(()),
        status => Err(ApiError::Status(status)),
    }
}

/// Тело ответа на смену статуса приводится к `TransitionResult`.
///
/// Backend отвечает по-разному: `{success, error, data}`, сама запись,
/// или пустое тело. Отказ по бизнес-правилу приходит как `success: false`
/// либо как 4xx с полем `error`/`message`.
fn transition_result(status: u16, ok: bool, body: Value) -> Result<TransitionResult, ApiError> {
    let message = body
        .get("error")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if !ok {
        return match (status, message) {
            (401 | 403, _) => Err(ApiError::NotAuthenticated),
            (400..=499, Some(message)) => Ok(TransitionResult::failed(message)),
            _ => Err(ApiError::Status(status)),
        };
    }

    match body.get("success").and_then(Value::as_bool) {
        Some(false) => Ok(TransitionResult::failed(
            message.unwrap_or_else(|| "Действие отклонено сервером".to_string()),
        )),
        _ => Ok(TransitionResult {
            success: true,
            error: None,
            data: body.get("data").cloned().or(Some(body)),
        }),
    }
}

#[async_trait(?Send)]
impl WorkflowApi for EntityClient {
    type Record = EntityRecord;

    async fn fetch_all(&self) -> Result<Vec<EntityRecord>, ApiError> {
        let response = self.get(&self.kind.list_path()).await?;
        check_status(&response)?;
        let body = read_json(response).await?;
        Ok(EntityRecord::list_from_value(self.kind, body)?)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<EntityRecord>, ApiError> {
        let encoded = urlencoding::encode(id);
        let response = self.get(&self.kind.detail_path(&encoded)).await?;
        if response.status() == 404 {
            return Ok(None);
        }
        check_status(&response)?;
        match read_json(response).await? {
            Value::Null => Ok(None),
            body => Ok(Some(EntityRecord::from_value(self.kind, body)?)),
        }
    }

    async fn transition(
        &self,
        action: TransitionAction,
        request: TransitionRequest,
    ) -> Result<TransitionResult, ApiError> {
        let auth_header = self.auth_header()?;
        let url = api_url(self.port, &self.kind.transition_path(action));
        log::debug!("{} {}", url, request.id);

        let response = Request::post(&url)
            .header("Authorization", &auth_header)
            .json(&request)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let ok = response.ok();
        let body = read_json(response).await.unwrap_or(Value::Null);
        transition_result(status, ok, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transition_result_shapes() {
        let ok =
            transition_result(200, true, json!({"success": true, "data": {"id": "m-1"}})).unwrap();
        assert!(ok.success);
        assert_eq!(ok.data, Some(json!({"id": "m-1"})));

        let empty = transition_result(204, true, Value::Null).unwrap();
        assert!(empty.success);

        let refused =
            transition_result(200, true, json!({"success": false, "error": "Expired"})).unwrap();
        assert_eq!(refused, TransitionResult::failed("Expired"));

        let bad_request =
            transition_result(409, false, json!({"message": "Already approved"})).unwrap();
        assert_eq!(bad_request.error.as_deref(), Some("Already approved"));
    }

    #[test]
    fn test_transport_errors_stay_errors() {
        assert_eq!(
            transition_result(500, false, json!({"error": "boom"})),
            Err(ApiError::Status(500))
        );
        assert_eq!(
            transition_result(401, false, Value::Null),
            Err(ApiError::NotAuthenticated)
        );
    }
}
