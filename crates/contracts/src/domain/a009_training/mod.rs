pub mod aggregate;

pub use aggregate::Training;
