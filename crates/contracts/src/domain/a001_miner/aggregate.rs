use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{ApprovalStatus, CsvExportable, HasWorkflowBase, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Горняк (старатель), зарегистрированный в кооперативе
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Miner {
    #[serde(flatten)]
    pub base: WorkflowBase<ApprovalStatus>,

    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cooperative: Option<String>,
}

impl HasWorkflowBase for Miner {
    type Status = ApprovalStatus;

    fn base(&self) -> &WorkflowBase<ApprovalStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<ApprovalStatus> {
        &mut self.base
    }
}

impl CsvExportable for Miner {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Имя",
            "Фамилия",
            "Паспорт",
            "Должность",
            "Район",
            "Телефон",
            "Кооператив",
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
            "nationalId",
            "position",
            "district",
            "phone",
            "cooperative",
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
            opt_cell(&self.national_id),
            opt_cell(&self.position),
            opt_cell(&self.district),
            opt_cell(&self.phone),
            opt_cell(&self.cooperative),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::WorkflowRecord;

    #[test]
    fn test_decode_backend_payload() {
        let json = r#"{
            "id": "6651f0c2",
            "name": "Tendai",
            "surname": "Moyo",
            "position": "Blaster",
            "status": "Pushed Back",
            "reason": "ID copy unreadable",
            "createdAt": "2024-05-02T08:15:00Z"
        }"#;
        let miner: Miner = serde_json::from_str(json).unwrap();
        assert_eq!(miner.id(), "6651f0c2");
        assert_eq!(miner.status(), Some(ApprovalStatus::PushedBack));
        assert_eq!(miner.reason(), Some("ID copy unreadable"));
        assert_eq!(miner.position.as_deref(), Some("Blaster"));
        assert!(miner.district.is_none());
    }

    #[test]
    fn test_serialized_form_is_flat_and_canonical() {
        let miner = Miner {
            base: WorkflowBase::new("m-1", ApprovalStatus::Pending),
            name: "Rudo".to_string(),
            surname: "Chari".to_string(),
            national_id: None,
            position: Some("Driller".to_string()),
            district: None,
            phone: None,
            cooperative: None,
        };
        let value = serde_json::to_value(&miner).unwrap();
        assert_eq!(value["id"], "m-1");
        assert_eq!(value["status"], "PENDING");
        assert_eq!(value["position"], "Driller");
        assert_eq!(Miner::headers().len(), miner.to_csv_row().len());
    }
}
