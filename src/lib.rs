pub mod apply;
pub mod cli;
pub mod config;
pub mod error;
pub mod fill;
pub mod git;
pub mod info;
pub mod model;
pub mod plan;
pub mod publish;
pub mod schedule;
