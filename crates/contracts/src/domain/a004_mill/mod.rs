pub mod aggregate;

pub use aggregate::Mill;
