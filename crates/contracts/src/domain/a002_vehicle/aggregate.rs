use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{ApprovalStatus, CsvExportable, HasWorkflowBase, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Транспортное средство для вывоза руды
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(flatten)]
    pub base: WorkflowBase<ApprovalStatus>,

    #[serde(default)]
    pub registration_number: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub capacity_tonnes: Option<f64>,
    #[serde(default)]
    pub owner_name: Option<String>,
}

impl HasWorkflowBase for Vehicle {
    type Status = ApprovalStatus;

    fn base(&self) -> &WorkflowBase<ApprovalStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<ApprovalStatus> {
        &mut self.base
    }
}

impl CsvExportable for Vehicle {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Госномер",
            "Марка",
            "Модель",
            "Тип ТС",
            "Грузоподъёмность, т",
            "Владелец",
            "Статус",
            "Причина",
            "Создано",
        ]
    }

    fn fields() -> Vec<&'static str> {
        vec![
            "id",
            "registrationNumber",
            "make",
            "model",
            "vehicleType",
            "capacityTonnes",
            "ownerName",
            "status",
            "reason",
            "createdAt",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.id.clone(),
            self.registration_number.clone(),
            opt_cell(&self.make),
            opt_cell(&self.model),
            opt_cell(&self.vehicle_type),
            self.capacity_tonnes.map(|v| v.to_string()).unwrap_or_default(),
            opt_cell(&self.owner_name),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}
