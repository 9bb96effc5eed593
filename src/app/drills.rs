use crate::config::toml_config::{FormatCase, VehicleConfig};
use crate::core::collections::{concatenate_arrays, filter_by_rating, most_expensive_product};
use crate::core::delayed_square::DelayedSquare;
use crate::core::dispatch::{day_type, process_value};
use crate::core::text::format_string;
use crate::core::{Car, Day, Drill, DrillOutcome, Product, RatedItem, Result, Scheduler, Value, Vehicle};
use crate::utils::error::DrillError;
use async_trait::async_trait;
use serde_json::json;
use std::time::Instant;
use tokio::task::JoinSet;

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

pub struct FormatDrill {
    cases: Vec<FormatCase>,
}

impl FormatDrill {
    pub fn new(cases: Vec<FormatCase>) -> Self {
        Self { cases }
    }
}

#[async_trait]
impl Drill for FormatDrill {
    fn name(&self) -> &str {
        "format"
    }

    fn planned(&self) -> usize {
        self.cases.len()
    }

    async fn run(&self) -> Result<Vec<DrillOutcome>> {
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let start = Instant::now();
                let output = format_string(&case.text, case.upper);
                DrillOutcome::success(self.name(), case, output, elapsed_ms(start))
            })
            .collect())
    }
}

pub struct RatingDrill {
    items: Vec<RatedItem>,
}

impl RatingDrill {
    pub fn new(items: Vec<RatedItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl Drill for RatingDrill {
    fn name(&self) -> &str {
        "ratings"
    }

    fn planned(&self) -> usize {
        1
    }

    async fn run(&self) -> Result<Vec<DrillOutcome>> {
        let start = Instant::now();
        let kept = filter_by_rating(&self.items);
        tracing::debug!("Kept {} of {} rated items", kept.len(), self.items.len());
        Ok(vec![DrillOutcome::success(
            self.name(),
            &self.items,
            kept,
            elapsed_ms(start),
        )])
    }
}

pub struct ConcatDrill {
    arrays: Vec<Vec<serde_json::Value>>,
}

impl ConcatDrill {
    pub fn new(arrays: Vec<Vec<serde_json::Value>>) -> Self {
        Self { arrays }
    }
}

#[async_trait]
impl Drill for ConcatDrill {
    fn name(&self) -> &str {
        "concat"
    }

    fn planned(&self) -> usize {
        1
    }

    async fn run(&self) -> Result<Vec<DrillOutcome>> {
        let start = Instant::now();
        let joined = concatenate_arrays(self.arrays.iter().cloned());
        Ok(vec![DrillOutcome::success(
            self.name(),
            &self.arrays,
            joined,
            elapsed_ms(start),
        )])
    }
}

pub struct VehicleDrill {
    vehicles: Vec<VehicleConfig>,
}

impl VehicleDrill {
    pub fn new(vehicles: Vec<VehicleConfig>) -> Self {
        Self { vehicles }
    }
}

#[async_trait]
impl Drill for VehicleDrill {
    fn name(&self) -> &str {
        "vehicles"
    }

    fn planned(&self) -> usize {
        self.vehicles.len()
    }

    async fn run(&self) -> Result<Vec<DrillOutcome>> {
        Ok(self
            .vehicles
            .iter()
            .map(|config| {
                let start = Instant::now();
                let output = match &config.model {
                    Some(model) => {
                        let car = Car::new(config.make.as_str(), config.year, model.as_str());
                        json!({ "info": car.info(), "model": car.model_label() })
                    }
                    None => {
                        let vehicle = Vehicle::new(config.make.as_str(), config.year);
                        json!({ "info": vehicle.info() })
                    }
                };
                DrillOutcome::success(self.name(), config, output, elapsed_ms(start))
            })
            .collect())
    }
}

pub struct ProcessDrill {
    values: Vec<Value>,
}

impl ProcessDrill {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }
}

#[async_trait]
impl Drill for ProcessDrill {
    fn name(&self) -> &str {
        "process"
    }

    fn planned(&self) -> usize {
        self.values.len()
    }

    async fn run(&self) -> Result<Vec<DrillOutcome>> {
        Ok(self
            .values
            .iter()
            .map(|value| {
                let start = Instant::now();
                DrillOutcome::success(self.name(), value, process_value(value), elapsed_ms(start))
            })
            .collect())
    }
}

pub struct ProductDrill {
    products: Vec<Product>,
}

impl ProductDrill {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl Drill for ProductDrill {
    fn name(&self) -> &str {
        "products"
    }

    fn planned(&self) -> usize {
        1
    }

    async fn run(&self) -> Result<Vec<DrillOutcome>> {
        let start = Instant::now();
        let most_expensive = most_expensive_product(&self.products);
        Ok(vec![DrillOutcome::success(
            self.name(),
            &self.products,
            most_expensive,
            elapsed_ms(start),
        )])
    }
}

pub struct DayDrill {
    days: Vec<Day>,
}

impl DayDrill {
    pub fn new(days: Vec<Day>) -> Self {
        Self { days }
    }
}

#[async_trait]
impl Drill for DayDrill {
    fn name(&self) -> &str {
        "days"
    }

    fn planned(&self) -> usize {
        self.days.len()
    }

    async fn run(&self) -> Result<Vec<DrillOutcome>> {
        Ok(self
            .days
            .iter()
            .map(|day| {
                let start = Instant::now();
                let kind = day_type(*day).to_string();
                DrillOutcome::success(self.name(), day, kind, elapsed_ms(start))
            })
            .collect())
    }
}

/// Starts every square at once and records outcomes in the order they settle.
pub struct SquareDrill<S: Scheduler> {
    square: DelayedSquare<S>,
    inputs: Vec<f64>,
}

impl<S: Scheduler> SquareDrill<S> {
    pub fn new(square: DelayedSquare<S>, inputs: Vec<f64>) -> Self {
        Self { square, inputs }
    }
}

#[async_trait]
impl<S: Scheduler> Drill for SquareDrill<S> {
    fn name(&self) -> &str {
        "square"
    }

    fn planned(&self) -> usize {
        self.inputs.len()
    }

    async fn run(&self) -> Result<Vec<DrillOutcome>> {
        let start = tokio::time::Instant::now();
        let mut pending = JoinSet::new();

        for &n in &self.inputs {
            let deferred = self.square.compute(n);
            pending.spawn(async move { (n, deferred.await, start.elapsed()) });
        }

        let mut outcomes = Vec::with_capacity(self.inputs.len());
        while let Some(joined) = pending.join_next().await {
            let (n, result, elapsed) = joined.map_err(|e| {
                tracing::error!("Square task failed to join: {}", e);
                DrillError::TaskDropped
            })?;
            let elapsed_ms = elapsed.as_millis() as u64;

            let outcome = match result {
                Ok(squared) => {
                    tracing::info!("✅ square({}) = {} after {}ms", n, squared, elapsed_ms);
                    DrillOutcome::success(self.name(), n, squared, elapsed_ms)
                }
                Err(e) => {
                    tracing::info!("❌ square({}) failed after {}ms: {}", n, elapsed_ms, e);
                    DrillOutcome::failure(self.name(), n, e.to_string(), elapsed_ms)
                }
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
