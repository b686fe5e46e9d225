use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{ApprovalStatus, CsvExportable, HasWorkflowBase, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Водитель, допущенный к перевозке руды
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(flatten)]
    pub base: WorkflowBase<ApprovalStatus>,

    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub license_class: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle_registration: Option<String>,
}

impl HasWorkflowBase for Driver {
    type Status = ApprovalStatus;

    fn base(&self) -> &WorkflowBase<ApprovalStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<ApprovalStatus> {
        &mut self.base
    }
}

impl CsvExportable for Driver {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Имя",
            "Фамилия",
            "Номер прав",
            "Категория",
            "Телефон",
            "Госномер ТС",
            "Статус",
            "Причина",
            "Создано",
        ]
    }

    fn fields() -> Vec<&'static str> {
        vec![
            "id",
            "name",
            "surname",
            "licenseNumber",
            "licenseClass",
            "phone",
            "vehicleRegistration",
            "status",
            "reason",
            "createdAt",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.id.clone(),
            self.name.clone(),
            self.surname.clone(),
            self.license_number.clone(),
            opt_cell(&self.license_class),
            opt_cell(&self.phone),
            opt_cell(&self.vehicle_registration),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}
