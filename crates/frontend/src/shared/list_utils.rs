/// Утилиты списков: поле поиска и индикаторы сортировки
use contracts::shared::list_view::SortSpec;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Задержка перед применением поиска, мс
const SEARCH_DEBOUNCE_MS: i32 = 300;

/// Новое содержимое поля, если значение фильтра поменялось извне (например, сброс).
/// Пока ждёт debounce, поле не трогаем: пользователь ещё печатает.
fn synced_input(input: &str, filter: &str, pending: bool) -> Option<String> {
    (!pending && input != filter).then(|| filter.to_string())
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    let debounce_timeout = StoredValue::new(None::<i32>);

    Effect::new(move |_| {
        let filter = value.get();
        let pending = debounce_timeout.get_value().is_some();
        if let Some(next) = synced_input(&input_value.get_untracked(), &filter, pending) {
            set_input_value.set(next);
        }
    });

    let cancel_pending = move || {
        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timeout_id);
            }
            debounce_timeout.set_value(None);
        }
    };

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };

        cancel_pending();

        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            let _ = debounce_timeout.try_set_value(None);
            let _ = on_change.try_run(new_value.clone());
        }) as Box<dyn Fn()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            SEARCH_DEBOUNCE_MS,
        ) {
            Ok(timeout_id) => debounce_timeout.set_value(Some(timeout_id)),
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
        closure.forget();
    };

    let is_filter_active = move || !value.get().is_empty();

    let clear_filter = move |_| {
        cancel_pending();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder={placeholder}
                style=move || format!(
                    "width: 250px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; background: {};",
                    if is_filter_active() { "#fffbea" } else { "white" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                        on:click=clear_filter
                        title="Очистить"
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

/// Индикатор сортировки для заголовка
pub fn get_sort_indicator(sort: Option<&SortSpec>, field: &str) -> &'static str {
    match sort {
        Some(spec) if spec.field == field => {
            if spec.ascending {
                " ▲"
            } else {
                " ▼"
            }
        }
        _ => " ⇅",
    }
}

/// CSS класс индикатора сортировки
pub fn get_sort_class(sort: Option<&SortSpec>, field: &str) -> &'static str {
    match sort {
        Some(spec) if spec.field == field => "table__sort-indicator table__sort-indicator--active",
        _ => "table__sort-indicator",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        let spec = SortSpec::descending("name");
        assert_eq!(get_sort_indicator(Some(&spec), "name"), " ▼");
        assert_eq!(get_sort_indicator(Some(&spec), "surname"), " ⇅");
        assert_eq!(get_sort_indicator(None, "name"), " ⇅");
        assert!(get_sort_class(Some(&spec), "name").ends_with("--active"));
    }

    #[test]
    fn test_search_box_clears_after_filter_reset() {
        assert_eq!(synced_input("drill", "", false), Some(String::new()));
        assert_eq!(synced_input("", "", false), None);
    }

    #[test]
    fn test_search_box_keeps_text_while_typing() {
        assert_eq!(synced_input("dri", "", true), None);
        assert_eq!(synced_input("", "drill", false), Some("drill".to_string()));
    }
}
