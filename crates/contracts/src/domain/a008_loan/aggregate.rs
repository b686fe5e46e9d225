use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{ApprovalStatus, CsvExportable, HasWorkflowBase, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Заявка на заём
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(flatten)]
    pub base: WorkflowBase<ApprovalStatus>,

    #[serde(default)]
    pub applicant_name: String,
    #[serde(default)]
    pub loan_type: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub term_months: Option<u32>,
}

impl HasWorkflowBase for Loan {
    type Status = ApprovalStatus;

    fn base(&self) -> &WorkflowBase<ApprovalStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<ApprovalStatus> {
        &mut self.base
    }
}

impl CsvExportable for Loan {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Заявитель",
            "Тип займа",
            "Сумма",
            "Валюта",
            "Цель",
            "Срок, мес",
            "Статус",
            "Причина",
            "Создано",
        ]
    }

    fn fields() -> Vec<&'static str> {
        vec![
            "id",
            "applicantName",
            "loanType",
            "amount",
            "currency",
            "purpose",
            "termMonths",
            "status",
            "reason",
            "createdAt",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.id.clone(),
            self.applicant_name.clone(),
            opt_cell(&self.loan_type),
            self.amount.map(|v| v.to_string()).unwrap_or_default(),
            opt_cell(&self.currency),
            opt_cell(&self.purpose),
            self.term_months.map(|v| v.to_string()).unwrap_or_default(),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}
