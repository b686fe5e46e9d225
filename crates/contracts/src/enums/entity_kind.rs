use serde::{Deserialize, Serialize};

use crate::domain::common::{StatusVocabulary, TransitionAction};

/// Второй выпадающий фильтр списка (например, должность горняка)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryFilter {
    /// Имя поля на проводе (camelCase)
    pub field: &'static str,
    /// Подпись в UI
    pub label: &'static str,
}

/// Типы сущностей бэк-офиса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Miner,
    Vehicle,
    Driver,
    Mill,
    Company,
    OreTransport,
    Incident,
    Loan,
    Training,
}

impl EntityKind {
    /// Получить код сущности
    pub fn code(&self) -> &'static str {
        match self {
            EntityKind::Miner => "a001_miner",
            EntityKind::Vehicle => "a002_vehicle",
            EntityKind::Driver => "a003_driver",
            EntityKind::Mill => "a004_mill",
            EntityKind::Company => "a005_company",
            EntityKind::OreTransport => "a006_ore_transport",
            EntityKind::Incident => "a007_incident",
            EntityKind::Loan => "a008_loan",
            EntityKind::Training => "a009_training",
        }
    }

    /// Получить человекочитаемое название (множественное число)
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Miner => "Горняки",
            EntityKind::Vehicle => "Транспорт",
            EntityKind::Driver => "Водители",
            EntityKind::Mill => "Фабрики",
            EntityKind::Company => "Компании",
            EntityKind::OreTransport => "Перевозки руды",
            EntityKind::Incident => "Инциденты",
            EntityKind::Loan => "Займы",
            EntityKind::Training => "Обучение",
        }
    }

    /// Получить все типы сущностей
    pub fn all() -> Vec<EntityKind> {
        vec![
            EntityKind::Miner,
            EntityKind::Vehicle,
            EntityKind::Driver,
            EntityKind::Mill,
            EntityKind::Company,
            EntityKind::OreTransport,
            EntityKind::Incident,
            EntityKind::Loan,
            EntityKind::Training,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.code() == code)
    }

    /// Сегмент REST пути коллекции
    pub fn api_segment(&self) -> &'static str {
        match self {
            EntityKind::Miner => "miners",
            EntityKind::Vehicle => "vehicles",
            EntityKind::Driver => "drivers",
            EntityKind::Mill => "mills",
            EntityKind::Company => "companies",
            EntityKind::OreTransport => "ore-transports",
            EntityKind::Incident => "incidents",
            EntityKind::Loan => "loans",
            EntityKind::Training => "trainings",
        }
    }

    /// Существительное в именах endpoint переходов (`approve-miner`)
    pub fn endpoint_noun(&self) -> &'static str {
        match self {
            EntityKind::Miner => "miner",
            EntityKind::Vehicle => "vehicle",
            EntityKind::Driver => "driver",
            EntityKind::Mill => "mill",
            EntityKind::Company => "company",
            EntityKind::OreTransport => "ore-transport",
            EntityKind::Incident => "incident",
            EntityKind::Loan => "loan",
            EntityKind::Training => "training",
        }
    }

    pub fn vocabulary(&self) -> StatusVocabulary {
        match self {
            EntityKind::Incident | EntityKind::Training => StatusVocabulary::Incident,
            _ => StatusVocabulary::Approval,
        }
    }

    pub fn secondary_filter(&self) -> Option<SecondaryFilter> {
        let (field, label) = match self {
            EntityKind::Miner => ("position", "Должность"),
            EntityKind::Vehicle => ("vehicleType", "Тип ТС"),
            EntityKind::Driver => ("licenseClass", "Категория прав"),
            EntityKind::Mill => return None,
            EntityKind::Company => ("sector", "Отрасль"),
            EntityKind::OreTransport => ("oreType", "Тип руды"),
            EntityKind::Incident => ("severity", "Серьёзность"),
            EntityKind::Loan => ("loanType", "Тип займа"),
            EntityKind::Training => ("category", "Категория"),
        };
        Some(SecondaryFilter { field, label })
    }

    /// Путь списка: `/api/miners`
    pub fn list_path(&self) -> String {
        format!("/api/{}", self.api_segment())
    }

    /// Путь карточки: `/api/miners/{id}`
    pub fn detail_path(&self, id: &str) -> String {
        format!("/api/{}/{}", self.api_segment(), id)
    }

    /// Путь перехода: `/api/miners/approve-miner`
    pub fn transition_path(&self, action: TransitionAction) -> String {
        format!(
            "/api/{}/{}-{}",
            self.api_segment(),
            action.slug(),
            self.endpoint_noun()
        )
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for kind in EntityKind::all() {
            assert_eq!(EntityKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(EntityKind::from_code("a999_unknown"), None);
    }

    #[test]
    fn test_transition_endpoint_names() {
        assert_eq!(
            EntityKind::Miner.transition_path(TransitionAction::Approve),
            "/api/miners/approve-miner"
        );
        assert_eq!(
            EntityKind::Mill.transition_path(TransitionAction::PushBack),
            "/api/mills/pushback-mill"
        );
        assert_eq!(EntityKind::Driver.detail_path("d-7"), "/api/drivers/d-7");
    }

    #[test]
    fn test_incident_and_training_share_vocabulary() {
        assert_eq!(EntityKind::Incident.vocabulary(), StatusVocabulary::Incident);
        assert_eq!(EntityKind::Training.vocabulary(), StatusVocabulary::Incident);
        assert_eq!(EntityKind::Loan.vocabulary(), StatusVocabulary::Approval);
    }
}
