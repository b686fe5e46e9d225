pub mod aggregate;

pub use aggregate::Incident;
