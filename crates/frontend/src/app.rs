use crate::domain::workflow::ui::list::EntityListPage;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::system::config::load_config;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    spawn_local(async move {
        let config = load_config().await;
        ctx.apply_config(config);
    });

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <Show
                        when=move || ctx.config_loaded.get()
                        fallback=|| view! { <div class="page__loading">"Загрузка настроек..."</div> }
                    >
                        // Пересоздаём страницу при смене сущности, чтобы сбросить фильтры
                        {move || {
                            let kind = ctx.active.get();
                            view! { <EntityListPage kind=kind /> }
                        }}
                    </Show>
                }.into_any()
            }
        />
    }
}
