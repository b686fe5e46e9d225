pub mod aggregate;

pub use aggregate::Vehicle;
