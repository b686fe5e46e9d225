use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{ApprovalStatus, CsvExportable, HasWorkflowBase, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Рейс перевозки руды
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OreTransport {
    #[serde(flatten)]
    pub base: WorkflowBase<ApprovalStatus>,

    #[serde(default)]
    pub vehicle_registration: String,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub ore_type: Option<String>,
    #[serde(default)]
    pub weight_tonnes: Option<f64>,
}

impl HasWorkflowBase for OreTransport {
    type Status = ApprovalStatus;

    fn base(&self) -> &WorkflowBase<ApprovalStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<ApprovalStatus> {
        &mut self.base
    }
}

impl CsvExportable for OreTransport {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Госномер ТС",
            "Водитель",
            "Откуда",
            "Куда",
            "Тип руды",
            "Вес, т",
            "Статус",
            "Причина",
            "Создано",
        ]
    }

    fn fields() -> Vec<&'static str> {
        vec![
            "id",
            "vehicleRegistration",
            "driverName",
            "origin",
            "destination",
            "oreType",
            "weightTonnes",
            "status",
            "reason",
            "createdAt",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.id.clone(),
            self.vehicle_registration.clone(),
            opt_cell(&self.driver_name),
            opt_cell(&self.origin),
            opt_cell(&self.destination),
            opt_cell(&self.ore_type),
            self.weight_tonnes.map(|v| v.to_string()).unwrap_or_default(),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}
