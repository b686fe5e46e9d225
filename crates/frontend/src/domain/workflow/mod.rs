//! Универсальный раздел сущности: список, диалог решения, клиент REST.

pub mod api;
pub mod ui;
