pub mod aggregate;

pub use aggregate::Loan;
