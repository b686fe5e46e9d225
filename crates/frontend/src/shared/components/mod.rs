pub mod pagination_controls;
pub mod status_badge;
pub mod table_selection;
