use contracts::domain::common::{RecordStatus, WorkflowStatus};
use leptos::prelude::*;

/// Бейдж статуса; запись без статуса показывает нейтральный бейдж
#[component]
pub fn StatusBadge(status: Option<RecordStatus>) -> impl IntoView {
    let (class, label) = match status {
        Some(status) => (
            format!("badge {}", status.badge_class()),
            status.display_name(),
        ),
        None => ("badge badge--neutral".to_string(), "Без статуса"),
    };

    view! { <span class=class>{label}</span> }
}
