use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{ApprovalStatus, CsvExportable, HasWorkflowBase, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Обогатительная фабрика
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mill {
    #[serde(flatten)]
    pub base: WorkflowBase<ApprovalStatus>,

    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub capacity_tonnes_per_day: Option<f64>,
}

impl HasWorkflowBase for Mill {
    type Status = ApprovalStatus;

    fn base(&self) -> &WorkflowBase<ApprovalStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<ApprovalStatus> {
        &mut self.base
    }
}

impl CsvExportable for Mill {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Название",
            "Расположение",
            "Владелец",
            "Мощность, т/сут",
            "Статус",
            "Причина",
            "Создано",
        ]
    }

    fn fields() -> Vec<&'static str> {
        vec![
            "id",
            "name",
            "location",
            "ownerName",
            "capacityTonnesPerDay",
            "status",
            "reason",
            "createdAt",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.id.clone(),
            self.name.clone(),
            opt_cell(&self.location),
            opt_cell(&self.owner_name),
            self.capacity_tonnes_per_day.map(|v| v.to_string()).unwrap_or_default(),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}
