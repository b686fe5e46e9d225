//! Общие фикстуры тестов

use std::cell::RefCell;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use crate::domain::a001_miner::Miner;
use crate::domain::common::{
    ApprovalStatus, TransitionAction, TransitionRequest, TransitionResult, WorkflowBase,
    WorkflowRecord,
};
use crate::shared::api::{ApiError, WorkflowApi};

/// Горняк, созданный через `day` дней после 1 января 2024
pub fn miner(id: &str, status: Option<ApprovalStatus>, day: i64, position: &str) -> Miner {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(day);
    Miner {
        base: WorkflowBase {
            id: id.to_string(),
            status,
            reason: None,
            created_at: Some(created),
        },
        name: "Tendai".to_string(),
        surname: "Moyo".to_string(),
        national_id: None,
        position: Some(position.to_string()),
        district: Some("Kwekwe".to_string()),
        phone: None,
        cooperative: None,
    }
}

pub fn ids<R: WorkflowRecord>(records: &[R]) -> Vec<&str> {
    records.iter().map(|r| r.id()).collect()
}

type TransitionCall = (TransitionAction, String, Option<String>);

/// Клиент API в памяти, записывающий вызовы смены статуса
pub struct MockApi {
    records: Vec<Miner>,
    response: Result<TransitionResult, ApiError>,
    failing_ids: Vec<String>,
    calls: RefCell<Vec<TransitionCall>>,
}

impl MockApi {
    pub fn new(records: Vec<Miner>) -> Self {
        Self {
            records,
            response: Ok(TransitionResult::ok()),
            failing_ids: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn respond_with(mut self, response: Result<TransitionResult, ApiError>) -> Self {
        self.response = response;
        self
    }

    /// Для этих id transition вернёт ошибку сети
    pub fn failing_for(mut self, ids: &[&str]) -> Self {
        self.failing_ids = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn transitions(&self) -> Vec<TransitionCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl WorkflowApi for MockApi {
    type Record = Miner;

    async fn fetch_all(&self) -> Result<Vec<Miner>, ApiError> {
        Ok(self.records.clone())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Miner>, ApiError> {
        Ok(self.records.iter().find(|r| r.id() == id).cloned())
    }

    async fn transition(
        &self,
        action: TransitionAction,
        request: TransitionRequest,
    ) -> Result<TransitionResult, ApiError> {
        self.calls
            .borrow_mut()
            .push((action, request.id.clone(), request.reason.clone()));
        if self.failing_ids.contains(&request.id) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        self.response.clone()
    }
}
