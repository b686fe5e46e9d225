use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{CsvExportable, HasWorkflowBase, IncidentStatus, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Запись об обучении по технике безопасности
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    #[serde(flatten)]
    pub base: WorkflowBase<IncidentStatus>,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub trainer: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub participants: Option<u32>,
}

impl HasWorkflowBase for Training {
    type Status = IncidentStatus;

    fn base(&self) -> &WorkflowBase<IncidentStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<IncidentStatus> {
        &mut self.base
    }
}

impl CsvExportable for Training {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Тема",
            "Категория",
            "Инструктор",
            "Место",
            "Дата",
            "Участники",
            "Статус",
            "Причина",
            "Создано",
        ]
    }

    fn fields() -> Vec<&'static str> {
        vec![
            "id",
            "title",
            "category",
            "trainer",
            "location",
            "scheduledDate",
            "participants",
            "status",
            "reason",
            "createdAt",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.id.clone(),
            self.title.clone(),
            opt_cell(&self.category),
            opt_cell(&self.trainer),
            opt_cell(&self.location),
            opt_cell(&self.scheduled_date),
            self.participants.map(|v| v.to_string()).unwrap_or_default(),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}
