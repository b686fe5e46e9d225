pub mod aggregate;

pub use aggregate::Miner;
