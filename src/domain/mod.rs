// Domain layer: exercise records, run reports and ports (interfaces).

pub mod model;
pub mod ports;
pub mod report;
