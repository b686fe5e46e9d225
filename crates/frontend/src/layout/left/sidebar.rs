//! Sidebar component with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use contracts::enums::EntityKind;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<EntityKind>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "registers",
            label: "Реестры",
            icon: "database",
            items: vec![
                EntityKind::Miner,
                EntityKind::Company,
                EntityKind::Mill,
                EntityKind::Vehicle,
                EntityKind::Driver,
            ],
        },
        MenuGroup {
            id: "operations",
            label: "Операции",
            icon: "layers",
            items: vec![EntityKind::OreTransport, EntityKind::Loan, EntityKind::Training],
        },
        MenuGroup {
            id: "safety",
            label: "Безопасность",
            icon: "alert-triangle",
            items: vec![EntityKind::Incident],
        },
    ]
}

/// Иконка пункта меню для типа сущности
pub fn entity_icon(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Miner => "users",
        EntityKind::Vehicle => "truck",
        EntityKind::Driver => "id-card",
        EntityKind::Mill => "factory",
        EntityKind::Company => "building",
        EntityKind::OreTransport => "route",
        EntityKind::Incident => "alert-triangle",
        EntityKind::Loan => "wallet",
        EntityKind::Training => "book",
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let expanded_groups = RwSignal::new(vec![
        "registers".to_string(),
        "operations".to_string(),
        "safety".to_string(),
    ]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let group_id_for_exp = group_id.clone();
                let group_id_for_click = group_id.clone();
                let items_stored = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = group_id_for_click.clone();
                                expanded_groups.update(move |items| {
                                    if let Some(pos) = items.iter().position(|x| x == &gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id_for_exp)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {items_stored.get_value().into_iter().map(|kind| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.active.get() == kind
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_entity(kind)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(entity_icon(kind))}
                                                <span>{kind.display_name()}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
