pub mod config;
pub mod contract;
pub mod outcome;
pub mod validate;
