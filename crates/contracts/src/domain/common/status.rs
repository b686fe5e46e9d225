use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::transition::TransitionAction;

/// Словарь статусов, которым пользуется сущность
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusVocabulary {
    /// PENDING / APPROVED / REJECTED / PUSHED_BACK
    Approval,
    /// INVESTIGATING / RESOLVED / CLOSED / ESCALATED
    Incident,
}

/// Трейт статуса жизненного цикла записи
///
/// Каждая реализация: закрытый канонический enum одного словаря.
/// Нормализация строк backend выполняется только в `from_wire`.
pub trait WorkflowStatus: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Каноническое значение на проводе (UPPER_SNAKE)
    fn as_wire(&self) -> &'static str;

    /// Разбор значения от backend, включая все наблюдавшиеся варианты написания
    fn from_wire(value: &str) -> Option<Self>;

    /// Название для UI
    fn display_name(&self) -> &'static str;

    /// CSS модификатор бейджа
    fn badge_class(&self) -> &'static str;

    /// Запись ждёт решения, диалог предлагает действия
    fn is_open(&self) -> bool;

    /// Решение окончательное
    fn is_terminal(&self) -> bool;

    /// Действия, доступные из этого статуса
    fn available_actions(&self) -> &'static [TransitionAction];

    /// Статус после выполнения действия; `None`, если действие недопустимо
    fn after(&self, action: TransitionAction) -> Option<Self>;

    /// Все значения словаря (для выпадающих фильтров)
    fn all() -> Vec<Self>;
}

const APPROVAL_ACTIONS: &[TransitionAction] = &[
    TransitionAction::Approve,
    TransitionAction::Reject,
    TransitionAction::PushBack,
];

const INCIDENT_ACTIONS: &[TransitionAction] = &[
    TransitionAction::Resolve,
    TransitionAction::Close,
    TransitionAction::Escalate,
];

// ============================================================================
// ApprovalStatus
// ============================================================================

/// Статус согласования (горняки, техника, водители, фабрики, компании, перевозки, займы)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    PushedBack,
}

impl WorkflowStatus for ApprovalStatus {
    fn as_wire(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "PENDING",
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::Rejected => "REJECTED",
            ApprovalStatus::PushedBack => "PUSHED_BACK",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "PENDING" | "Pending" => Some(ApprovalStatus::Pending),
            "APPROVED" | "Approved" => Some(ApprovalStatus::Approved),
            "REJECTED" | "Rejected" => Some(ApprovalStatus::Rejected),
            "PUSHED_BACK" | "Pushed Back" => Some(ApprovalStatus::PushedBack),
            _ => None,
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "На рассмотрении",
            ApprovalStatus::Approved => "Одобрено",
            ApprovalStatus::Rejected => "Отклонено",
            ApprovalStatus::PushedBack => "На доработке",
        }
    }

    fn badge_class(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "badge--warning",
            ApprovalStatus::Approved => "badge--success",
            ApprovalStatus::Rejected => "badge--error",
            ApprovalStatus::PushedBack => "badge--neutral",
        }
    }

    fn is_open(&self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }

    fn is_terminal(&self) -> bool {
        matches!(self, ApprovalStatus::Approved | ApprovalStatus::Rejected)
    }

    fn available_actions(&self) -> &'static [TransitionAction] {
        if self.is_open() {
            APPROVAL_ACTIONS
        } else {
            &[]
        }
    }

    fn after(&self, action: TransitionAction) -> Option<Self> {
        if !self.is_open() {
            return None;
        }
        match action {
            TransitionAction::Approve => Some(ApprovalStatus::Approved),
            TransitionAction::Reject => Some(ApprovalStatus::Rejected),
            TransitionAction::PushBack => Some(ApprovalStatus::PushedBack),
            _ => None,
        }
    }

    fn all() -> Vec<Self> {
        vec![
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
            ApprovalStatus::PushedBack,
        ]
    }
}

// ============================================================================
// IncidentStatus
// ============================================================================

/// Статус расследования (инциденты и обучение)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncidentStatus {
    Investigating,
    Resolved,
    Closed,
    Escalated,
}

impl WorkflowStatus for IncidentStatus {
    fn as_wire(&self) -> &'static str {
        match self {
            IncidentStatus::Investigating => "INVESTIGATING",
            IncidentStatus::Resolved => "RESOLVED",
            IncidentStatus::Closed => "CLOSED",
            IncidentStatus::Escalated => "ESCALATED",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "INVESTIGATING" | "Investigating" => Some(IncidentStatus::Investigating),
            "RESOLVED" | "Resolved" => Some(IncidentStatus::Resolved),
            "CLOSED" | "Closed" => Some(IncidentStatus::Closed),
            "ESCALATED" | "Escalated" => Some(IncidentStatus::Escalated),
            _ => None,
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            IncidentStatus::Investigating => "Расследуется",
            IncidentStatus::Resolved => "Решено",
            IncidentStatus::Closed => "Закрыто",
            IncidentStatus::Escalated => "Эскалировано",
        }
    }

    fn badge_class(&self) -> &'static str {
        match self {
            IncidentStatus::Investigating => "badge--warning",
            IncidentStatus::Resolved => "badge--success",
            IncidentStatus::Closed => "badge--neutral",
            IncidentStatus::Escalated => "badge--error",
        }
    }

    fn is_open(&self) -> bool {
        matches!(self, IncidentStatus::Investigating)
    }

    fn is_terminal(&self) -> bool {
        matches!(self, IncidentStatus::Resolved | IncidentStatus::Closed)
    }

    fn available_actions(&self) -> &'static [TransitionAction] {
        if self.is_open() {
            INCIDENT_ACTIONS
        } else {
            &[]
        }
    }

    fn after(&self, action: TransitionAction) -> Option<Self> {
        if !self.is_open() {
            return None;
        }
        match action {
            TransitionAction::Resolve => Some(IncidentStatus::Resolved),
            TransitionAction::Close => Some(IncidentStatus::Closed),
            TransitionAction::Escalate => Some(IncidentStatus::Escalated),
            _ => None,
        }
    }

    fn all() -> Vec<Self> {
        vec![
            IncidentStatus::Investigating,
            IncidentStatus::Resolved,
            IncidentStatus::Closed,
            IncidentStatus::Escalated,
        ]
    }
}

// ============================================================================
// RecordStatus
// ============================================================================

/// Статус записи любого словаря (для разнородных списков в UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Approval(ApprovalStatus),
    Incident(IncidentStatus),
}

impl RecordStatus {
    pub fn vocabulary(&self) -> StatusVocabulary {
        match self {
            RecordStatus::Approval(_) => StatusVocabulary::Approval,
            RecordStatus::Incident(_) => StatusVocabulary::Incident,
        }
    }

    /// Значения одного словаря
    pub fn all_for(vocabulary: StatusVocabulary) -> Vec<Self> {
        match vocabulary {
            StatusVocabulary::Approval => ApprovalStatus::all()
                .into_iter()
                .map(RecordStatus::Approval)
                .collect(),
            StatusVocabulary::Incident => IncidentStatus::all()
                .into_iter()
                .map(RecordStatus::Incident)
                .collect(),
        }
    }
}

impl From<ApprovalStatus> for RecordStatus {
    fn from(status: ApprovalStatus) -> Self {
        RecordStatus::Approval(status)
    }
}

impl From<IncidentStatus> for RecordStatus {
    fn from(status: IncidentStatus) -> Self {
        RecordStatus::Incident(status)
    }
}

impl WorkflowStatus for RecordStatus {
    fn as_wire(&self) -> &'static str {
        match self {
            RecordStatus::Approval(s) => s.as_wire(),
            RecordStatus::Incident(s) => s.as_wire(),
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        ApprovalStatus::from_wire(value)
            .map(RecordStatus::Approval)
            .or_else(|| IncidentStatus::from_wire(value).map(RecordStatus::Incident))
    }

    fn display_name(&self) -> &'static str {
        match self {
            RecordStatus::Approval(s) => s.display_name(),
            RecordStatus::Incident(s) => s.display_name(),
        }
    }

    fn badge_class(&self) -> &'static str {
        match self {
            RecordStatus::Approval(s) => s.badge_class(),
            RecordStatus::Incident(s) => s.badge_class(),
        }
    }

    fn is_open(&self) -> bool {
        match self {
            RecordStatus::Approval(s) => s.is_open(),
            RecordStatus::Incident(s) => s.is_open(),
        }
    }

    fn is_terminal(&self) -> bool {
        match self {
            RecordStatus::Approval(s) => s.is_terminal(),
            RecordStatus::Incident(s) => s.is_terminal(),
        }
    }

    fn available_actions(&self) -> &'static [TransitionAction] {
        match self {
            RecordStatus::Approval(s) => s.available_actions(),
            RecordStatus::Incident(s) => s.available_actions(),
        }
    }

    fn after(&self, action: TransitionAction) -> Option<Self> {
        match self {
            RecordStatus::Approval(s) => s.after(action).map(RecordStatus::Approval),
            RecordStatus::Incident(s) => s.after(action).map(RecordStatus::Incident),
        }
    }

    fn all() -> Vec<Self> {
        let mut all = Self::all_for(StatusVocabulary::Approval);
        all.extend(Self::all_for(StatusVocabulary::Incident));
        all
    }
}

// ============================================================================
// Serde
// ============================================================================

fn serialize_status<S: WorkflowStatus, Ser: Serializer>(
    status: &S,
    serializer: Ser,
) -> Result<Ser::Ok, Ser::Error> {
    serializer.serialize_str(status.as_wire())
}

fn deserialize_status<'de, S: WorkflowStatus, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<S, D::Error> {
    let raw = String::deserialize(deserializer)?;
    S::from_wire(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("Unknown status: {}", raw)))
}

impl Serialize for ApprovalStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_status(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ApprovalStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_status(deserializer)
    }
}

impl Serialize for IncidentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_status(self, serializer)
    }
}

impl<'de> Deserialize<'de> for IncidentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_status(deserializer)
    }
}

impl Serialize for RecordStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_status(self, serializer)
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_status(deserializer)
    }
}

/// Мягкий разбор статуса: неизвестное или отсутствующее значение даёт `None`,
/// а не ошибку разбора всей записи.
pub fn lenient<'de, S, D>(deserializer: D) -> Result<Option<S>, D::Error>
where
    S: WorkflowStatus,
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(value)) => {
            let status = S::from_wire(&value);
            if status.is_none() {
                log::warn!("Неизвестный статус записи: {:?}", value);
            }
            status
        }
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            log::warn!("Статус записи не является строкой: {}", other);
            None
        }
    })
}
