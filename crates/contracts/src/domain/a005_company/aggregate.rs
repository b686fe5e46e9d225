use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{ApprovalStatus, CsvExportable, HasWorkflowBase, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Компания-контрагент
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(flatten)]
    pub base: WorkflowBase<ApprovalStatus>,

    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl HasWorkflowBase for Company {
    type Status = ApprovalStatus;

    fn base(&self) -> &WorkflowBase<ApprovalStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<ApprovalStatus> {
        &mut self.base
    }
}

impl CsvExportable for Company {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Название",
            "Рег. номер",
            "Отрасль",
            "Адрес",
            "Email",
            "Статус",
            "Причина",
            "Создано",
        ]
    }

    fn fields() -> Vec<&'static str> {
        vec![
            "id",
            "name",
            "registrationNumber",
            "sector",
            "address",
            "contactEmail",
            "status",
            "reason",
            "createdAt",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.id.clone(),
            self.name.clone(),
            opt_cell(&self.registration_number),
            opt_cell(&self.sector),
            opt_cell(&self.address),
            opt_cell(&self.contact_email),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}
