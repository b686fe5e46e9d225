//! TopHeader component - application top navigation bar.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let is_sidebar_visible = move || ctx.left_open.get();
    let token_draft = RwSignal::new(String::new());

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Горнорудный бэк-офис"</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Скрыть навигацию" } else { "Показать навигацию" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    {move || if ctx.auth_token.get().is_some() {
                        view! {
                            <span>"Сессия активна"</span>
                            <button
                                class="top-header__icon-btn"
                                title="Выйти"
                                on:click=move |_| ctx.sign_out()
                            >
                                {icon("log-out")}
                            </button>
                        }.into_any()
                    } else {
                        view! {
                            <input
                                class="top-header__token"
                                type="password"
                                placeholder="Токен доступа"
                                prop:value=move || token_draft.get()
                                on:input=move |ev| token_draft.set(event_target_value(&ev))
                            />
                            <button
                                class="top-header__icon-btn"
                                title="Войти"
                                on:click=move |_| {
                                    ctx.sign_in(token_draft.get_untracked());
                                    token_draft.set(String::new());
                                }
                            >
                                {icon("check")}
                            </button>
                        }.into_any()
                    }}
                </div>
            </div>
        </div>
    }
}
