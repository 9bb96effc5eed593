pub mod collections;
pub mod delayed_square;
pub mod dispatch;
pub mod scheduler;
pub mod text;

pub use crate::domain::model::{Car, Day, DayType, Product, RatedItem, Value, Vehicle};
pub use crate::domain::ports::{Drill, Scheduler, Storage};
pub use crate::domain::report::{DrillOutcome, DrillReport};
pub use crate::utils::error::Result;
