pub mod drills;
pub mod runner;
