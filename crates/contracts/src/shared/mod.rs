pub mod api;
pub mod batch;
pub mod config;
pub mod decision_dialog;
pub mod export;
pub mod list_view;

#[cfg(test)]
pub(crate) mod test_support;
