//! Общие контракты административной панели горнодобывающего бэк-офиса.
//!
//! Модель данных сущностей, словари статусов, логика списков и диалога
//! согласования. Крейт не зависит от браузера и тестируется нативно.

pub mod domain;
pub mod enums;
pub mod shared;
