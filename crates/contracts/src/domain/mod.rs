pub mod a001_miner;
pub mod a002_vehicle;
pub mod a003_driver;
pub mod a004_mill;
pub mod a005_company;
pub mod a006_ore_transport;
pub mod a007_incident;
pub mod a008_loan;
pub mod a009_training;
pub mod common;
pub mod entity_record;

pub use entity_record::EntityRecord;
