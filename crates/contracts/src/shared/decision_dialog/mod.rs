//! Диалог решения по записи: загрузка карточки, выбор действия,
//! обязательная причина и локальное обновление статуса после ответа.
//!
//! Логика переходов живёт в [`state::DialogState`]. [`DecisionDialog`] связывает
//! её с асинхронным `WorkflowApi` для нативного (headless) использования,
//! веб-интерфейс связывает её с сигналами Leptos.

pub mod controller;
pub mod state;

pub use controller::DecisionDialog;
pub use state::{ConfirmationPolicy, DialogState, Notice, ValidationError, UNEXPECTED_ERROR};
