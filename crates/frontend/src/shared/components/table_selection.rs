//! Чекбоксы выбора строк таблицы
//!
//! ```rust,ignore
//! <TableHeaderCheckbox ids=page_ids selected=selected on_change=Callback::new(toggle_all) />
//! <TableCellCheckbox item_id=row_id selected=selected on_change=Callback::new(toggle_one) />
//! ```

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

fn checkbox_state(ids: &[String], selected: &HashSet<String>) -> CheckboxState {
    let selected_count = ids.iter().filter(|id| selected.contains(*id)).count();
    if selected_count == 0 {
        CheckboxState::Unchecked
    } else if selected_count == ids.len() {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

/// Чекбокс в заголовке: выбрать / снять все строки текущей страницы
#[component]
pub fn TableHeaderCheckbox(
    /// id строк текущей страницы
    #[prop(into)]
    ids: Signal<Vec<String>>,

    #[prop(into)]
    selected: Signal<HashSet<String>>,

    /// true = выбрать все, false = снять все
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || selected.with(|sel| checkbox_state(&ids.get(), sel)));

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate задаётся только через DOM свойство
    Effect::new(move |_| {
        let state = state.get();
        if let Some(input) = checkbox_ref.get() {
            input.set_indeterminate(state == CheckboxState::Indeterminate);
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == CheckboxState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

/// Чекбокс строки; клик не открывает карточку
#[component]
pub fn TableCellCheckbox(
    #[prop(into)]
    item_id: String,

    #[prop(into)]
    selected: Signal<HashSet<String>>,

    /// (item_id, checked)
    on_change: Callback<(String, bool)>,
) -> impl IntoView {
    let item_id_for_checked = item_id.clone();

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || selected.with(|sel| sel.contains(&item_id_for_checked))
                on:change=move |ev| {
                    on_change.run((item_id.clone(), event_target_checked(&ev)));
                }
            />
        </TableCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_state_follows_selection() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let mut selected = HashSet::new();
        assert_eq!(checkbox_state(&ids, &selected), CheckboxState::Unchecked);
        selected.insert("a".to_string());
        assert_eq!(checkbox_state(&ids, &selected), CheckboxState::Indeterminate);
        selected.insert("b".to_string());
        assert_eq!(checkbox_state(&ids, &selected), CheckboxState::Checked);
        assert_eq!(checkbox_state(&[], &selected), CheckboxState::Unchecked);
    }
}
