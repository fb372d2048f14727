//! Service layer: token verification, demo seeding, test running.

pub mod demo;
pub mod test_runner;
pub mod token;

pub use demo::{DemoSeedOptions, DemoSeedSummary, DemoSeeder};
pub use test_runner::{TestRunResults, TestRunner};
pub use token::TokenService;
