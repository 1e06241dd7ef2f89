pub mod runner;
pub mod tracker;
