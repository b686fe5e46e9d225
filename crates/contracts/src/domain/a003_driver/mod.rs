pub mod aggregate;

pub use aggregate::Driver;
