//! PageFrame: standard root wrapper for every page.
//!
//! Guarantees two metadata attributes on the root DOM element:
//!   - `id`                 - `"{entity}--{category}"`, e.g. `"a001_miner--list"`
//!   - `data-page-category` - one of the PAGE_CAT_* constants

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    #[prop(into)]
    page_id: String,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(&page_id) {
        log::warn!("PageFrame: некорректный id страницы '{}'", page_id);
    }

    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page",
    };

    view! {
        <div
            id=page_id
            class=class
            data-page-category=category
        >
            {children()}
        </div>
    }
}
