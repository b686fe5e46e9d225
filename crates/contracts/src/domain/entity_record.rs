//! Закрытое объединение всех сущностей бэк-офиса.
//!
//! Используется там, где UI работает с произвольным типом сущности
//! (универсальная страница списка и диалог решения).

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::a001_miner::Miner;
use super::a002_vehicle::Vehicle;
use super::a003_driver::Driver;
use super::a004_mill::Mill;
use super::a005_company::Company;
use super::a006_ore_transport::OreTransport;
use super::a007_incident::Incident;
use super::a008_loan::Loan;
use super::a009_training::Training;
use super::common::{CsvExportable, RecordStatus, WorkflowRecord, WorkflowStatus};
use crate::enums::EntityKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityRecord {
    Miner(Miner),
    Vehicle(Vehicle),
    Driver(Driver),
    Mill(Mill),
    Company(Company),
    OreTransport(OreTransport),
    Incident(Incident),
    Loan(Loan),
    Training(Training),
}

macro_rules! dispatch {
    ($record:expr, $inner:ident => $body:expr) => {
        match $record {
            EntityRecord::Miner($inner) => $body,
            EntityRecord::Vehicle($inner) => $body,
            EntityRecord::Driver($inner) => $body,
            EntityRecord::Mill($inner) => $body,
            EntityRecord::Company($inner) => $body,
            EntityRecord::OreTransport($inner) => $body,
            EntityRecord::Incident($inner) => $body,
            EntityRecord::Loan($inner) => $body,
            EntityRecord::Training($inner) => $body,
        }
    };
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRecord::Miner(_) => EntityKind::Miner,
            EntityRecord::Vehicle(_) => EntityKind::Vehicle,
            EntityRecord::Driver(_) => EntityKind::Driver,
            EntityRecord::Mill(_) => EntityKind::Mill,
            EntityRecord::Company(_) => EntityKind::Company,
            EntityRecord::OreTransport(_) => EntityKind::OreTransport,
            EntityRecord::Incident(_) => EntityKind::Incident,
            EntityRecord::Loan(_) => EntityKind::Loan,
            EntityRecord::Training(_) => EntityKind::Training,
        }
    }

    /// Разобрать одну запись ответа backend для указанного типа сущности
    pub fn from_value(
        kind: EntityKind,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            EntityKind::Miner => EntityRecord::Miner(serde_json::from_value(value)?),
            EntityKind::Vehicle => EntityRecord::Vehicle(serde_json::from_value(value)?),
            EntityKind::Driver => EntityRecord::Driver(serde_json::from_value(value)?),
            EntityKind::Mill => EntityRecord::Mill(serde_json::from_value(value)?),
            EntityKind::Company => EntityRecord::Company(serde_json::from_value(value)?),
            EntityKind::OreTransport => {
                EntityRecord::OreTransport(serde_json::from_value(value)?)
            }
            EntityKind::Incident => EntityRecord::Incident(serde_json::from_value(value)?),
            EntityKind::Loan => EntityRecord::Loan(serde_json::from_value(value)?),
            EntityKind::Training => EntityRecord::Training(serde_json::from_value(value)?),
        })
    }

    /// Разобрать ответ списка. `null` означает пустой список.
    pub fn list_from_value(
        kind: EntityKind,
        value: serde_json::Value,
    ) -> Result<Vec<Self>, serde_json::Error> {
        match value {
            serde_json::Value::Null => Ok(Vec::new()),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| Self::from_value(kind, item))
                .collect(),
            other => Err(serde::de::Error::custom(format!(
                "Expected array of {}, got {}",
                kind.code(),
                other
            ))),
        }
    }

    /// Заголовки колонок таблицы / CSV для типа сущности
    pub fn headers_for(kind: EntityKind) -> Vec<&'static str> {
        match kind {
            EntityKind::Miner => Miner::headers(),
            EntityKind::Vehicle => Vehicle::headers(),
            EntityKind::Driver => Driver::headers(),
            EntityKind::Mill => Mill::headers(),
            EntityKind::Company => Company::headers(),
            EntityKind::OreTransport => OreTransport::headers(),
            EntityKind::Incident => Incident::headers(),
            EntityKind::Loan => Loan::headers(),
            EntityKind::Training => Training::headers(),
        }
    }

    /// Имена полей на проводе в порядке колонок
    pub fn fields_for(kind: EntityKind) -> Vec<&'static str> {
        match kind {
            EntityKind::Miner => Miner::fields(),
            EntityKind::Vehicle => Vehicle::fields(),
            EntityKind::Driver => Driver::fields(),
            EntityKind::Mill => Mill::fields(),
            EntityKind::Company => Company::fields(),
            EntityKind::OreTransport => OreTransport::fields(),
            EntityKind::Incident => Incident::fields(),
            EntityKind::Loan => Loan::fields(),
            EntityKind::Training => Training::fields(),
        }
    }

    pub fn csv_row(&self) -> Vec<String> {
        dispatch!(self, inner => inner.to_csv_row())
    }

    /// Заголовок карточки в диалоге
    pub fn title(&self) -> String {
        match self {
            EntityRecord::Miner(m) => format!("{} {}", m.name, m.surname),
            EntityRecord::Vehicle(v) => v.registration_number.clone(),
            EntityRecord::Driver(d) => format!("{} {}", d.name, d.surname),
            EntityRecord::Mill(m) => m.name.clone(),
            EntityRecord::Company(c) => c.name.clone(),
            EntityRecord::OreTransport(t) => t.vehicle_registration.clone(),
            EntityRecord::Incident(i) => i.title.clone(),
            EntityRecord::Loan(l) => l.applicant_name.clone(),
            EntityRecord::Training(t) => t.title.clone(),
        }
    }
}

impl WorkflowRecord for EntityRecord {
    type Status = RecordStatus;

    fn id(&self) -> &str {
        dispatch!(self, inner => inner.id())
    }

    fn status(&self) -> Option<RecordStatus> {
        dispatch!(self, inner => inner.status().map(RecordStatus::from))
    }

    fn reason(&self) -> Option<&str> {
        dispatch!(self, inner => inner.reason())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        dispatch!(self, inner => inner.created_at())
    }

    fn set_status(&mut self, status: RecordStatus, reason: Option<String>) {
        match (self, status) {
            (EntityRecord::Incident(inner), RecordStatus::Incident(s)) => {
                inner.set_status(s, reason)
            }
            (EntityRecord::Training(inner), RecordStatus::Incident(s)) => {
                inner.set_status(s, reason)
            }
            (EntityRecord::Miner(inner), RecordStatus::Approval(s)) => inner.set_status(s, reason),
            (EntityRecord::Vehicle(inner), RecordStatus::Approval(s)) => {
                inner.set_status(s, reason)
            }
            (EntityRecord::Driver(inner), RecordStatus::Approval(s)) => inner.set_status(s, reason),
            (EntityRecord::Mill(inner), RecordStatus::Approval(s)) => inner.set_status(s, reason),
            (EntityRecord::Company(inner), RecordStatus::Approval(s)) => {
                inner.set_status(s, reason)
            }
            (EntityRecord::OreTransport(inner), RecordStatus::Approval(s)) => {
                inner.set_status(s, reason)
            }
            (EntityRecord::Loan(inner), RecordStatus::Approval(s)) => inner.set_status(s, reason),
            (record, status) => log::warn!(
                "Статус {} не относится к словарю {}",
                status.as_wire(),
                record.kind().code()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{ApprovalStatus, IncidentStatus};
    use serde_json::json;

    #[test]
    fn test_list_decodes_by_kind_and_null_is_empty() {
        let value = json!([
            {"id": "v-1", "registrationNumber": "ABE 1234", "status": "APPROVED"},
            {"id": "v-2", "registrationNumber": "ACF 9981", "status": "Pending"}
        ]);
        let records = EntityRecord::list_from_value(EntityKind::Vehicle, value).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind(), EntityKind::Vehicle);
        assert_eq!(
            records[1].status(),
            Some(RecordStatus::Approval(ApprovalStatus::Pending))
        );

        let empty = EntityRecord::list_from_value(EntityKind::Vehicle, json!(null)).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_set_status_ignores_foreign_vocabulary() {
        let mut record = EntityRecord::from_value(
            EntityKind::Loan,
            json!({"id": "l-1", "applicantName": "Nyasha", "status": "PENDING"}),
        )
        .unwrap();
        record.set_status(RecordStatus::Incident(IncidentStatus::Closed), None);
        assert_eq!(
            record.status(),
            Some(RecordStatus::Approval(ApprovalStatus::Pending))
        );
        record.set_status(
            RecordStatus::Approval(ApprovalStatus::Rejected),
            Some("no collateral".to_string()),
        );
        assert_eq!(record.reason(), Some("no collateral"));
    }

    #[test]
    fn test_headers_match_rows() {
        let record = EntityRecord::from_value(
            EntityKind::Training,
            json!({"id": "t-1", "title": "First aid", "participants": 12}),
        )
        .unwrap();
        assert_eq!(
            EntityRecord::headers_for(EntityKind::Training).len(),
            record.csv_row().len()
        );
        for kind in EntityKind::all() {
            let fields = EntityRecord::fields_for(kind);
            assert_eq!(fields.len(), EntityRecord::headers_for(kind).len());
            assert_eq!(fields.first(), Some(&"id"));
            assert_eq!(fields.last(), Some(&"createdAt"));
        }
        assert_eq!(record.title(), "First aid");
    }
}
