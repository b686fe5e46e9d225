use chrono::{DateTime, Utc};
use serde::Serialize;

use super::status::WorkflowStatus;
use super::transition::TransitionAction;
use super::workflow_base::WorkflowBase;

/// Узкий общий интерфейс записи, с которым работает логика списков и диалога.
///
/// Доменные поля остаются закрытыми в конкретных структурах; поиск по ним
/// идёт через сериализованное представление (`Serialize`).
pub trait WorkflowRecord: Clone + Serialize {
    type Status: WorkflowStatus;

    fn id(&self) -> &str;

    fn status(&self) -> Option<Self::Status>;

    fn reason(&self) -> Option<&str>;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Локально применить новый статус (оптимистичное обновление после ответа backend)
    fn set_status(&mut self, status: Self::Status, reason: Option<String>);

    /// Действия, которые диалог может предложить для записи
    fn available_actions(&self) -> &'static [TransitionAction] {
        self.status()
            .map(|status| status.available_actions())
            .unwrap_or(&[])
    }
}

/// Доступ к базовым полям; реализация `WorkflowRecord` выводится автоматически
pub trait HasWorkflowBase: Clone + Serialize {
    type Status: WorkflowStatus;

    fn base(&self) -> &WorkflowBase<Self::Status>;

    fn base_mut(&mut self) -> &mut WorkflowBase<Self::Status>;
}

impl<T: HasWorkflowBase> WorkflowRecord for T {
    type Status = T::Status;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn status(&self) -> Option<Self::Status> {
        self.base().status
    }

    fn reason(&self) -> Option<&str> {
        self.base().reason.as_deref()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.base().created_at
    }

    fn set_status(&mut self, status: Self::Status, reason: Option<String>) {
        let base = self.base_mut();
        base.status = Some(status);
        if reason.is_some() {
            base.reason = reason;
        }
    }
}

/// Trait для типов, которые могут быть экспортированы в CSV и показаны таблицей
pub trait CsvExportable {
    /// Возвращает массив заголовков колонок
    fn headers() -> Vec<&'static str>;

    /// Имена полей на проводе в порядке колонок (для сортировки по заголовку)
    fn fields() -> Vec<&'static str>;

    /// Преобразует объект в массив значений для CSV
    fn to_csv_row(&self) -> Vec<String>;
}

/// Строковое значение необязательного поля для таблиц и CSV
pub fn opt_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Строковое значение статуса для таблиц и CSV
pub fn status_cell<S: WorkflowStatus>(status: Option<S>) -> String {
    status
        .map(|s| s.as_wire().to_string())
        .unwrap_or_default()
}

/// Дата создания для таблиц и CSV
pub fn created_cell(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
