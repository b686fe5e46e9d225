use crate::domain::common::record::{created_cell, opt_cell, status_cell};
use crate::domain::common::{CsvExportable, HasWorkflowBase, IncidentStatus, WorkflowBase};
use serde::{Deserialize, Serialize};

/// Инцидент на участке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(flatten)]
    pub base: WorkflowBase<IncidentStatus>,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reported_by: Option<String>,
}

impl HasWorkflowBase for Incident {
    type Status = IncidentStatus;

    fn base(&self) -> &WorkflowBase<IncidentStatus> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WorkflowBase<IncidentStatus> {
        &mut self.base
    }
}

impl CsvExportable for Incident {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Заголовок",
            "Описание",
            "Серьёзность",
            "Место",
            "Сообщил",
            "Статус",
            "Причина",
            "Создано",
        ]
    }

    fn fields() -> Vec<&'static str> {
        vec![
            "id",
            "title",
            "description",
            "severity",
            "location",
            "reportedBy",
            "status",
            "reason",
            "createdAt",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.id.clone(),
            self.title.clone(),
            opt_cell(&self.description),
            opt_cell(&self.severity),
            opt_cell(&self.location),
            opt_cell(&self.reported_by),
            status_cell(self.base.status),
            opt_cell(&self.base.reason),
            created_cell(self.base.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{TransitionAction, WorkflowRecord};

    #[test]
    fn test_investigating_incident_offers_incident_actions() {
        let incident: Incident = serde_json::from_str(
            r#"{"id":"i-3","title":"Shaft flooding","severity":"HIGH","status":"Investigating"}"#,
        )
        .unwrap();
        assert_eq!(
            incident.available_actions(),
            &[
                TransitionAction::Resolve,
                TransitionAction::Close,
                TransitionAction::Escalate
            ]
        );
    }
}
