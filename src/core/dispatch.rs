use crate::core::{Day, DayType, Value};

/// Text maps to its length in characters, numbers are doubled.
pub fn process_value(value: &Value) -> f64 {
    match value {
        Value::Text(text) => text.chars().count() as f64,
        Value::Number(n) => n * 2.0,
    }
}

pub fn day_type(day: Day) -> DayType {
    match day {
        Day::Saturday | Day::Sunday => DayType::Weekend,
        _ => DayType::Weekday,
    }
}
