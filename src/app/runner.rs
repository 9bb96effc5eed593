use crate::app::drills::{
    ConcatDrill, DayDrill, FormatDrill, ProcessDrill, ProductDrill, RatingDrill, SquareDrill,
    VehicleDrill,
};
use crate::config::toml_config::DrillsConfig;
use crate::core::delayed_square::DelayedSquare;
use crate::core::scheduler::TokioScheduler;
use crate::core::{Drill, DrillReport, Result, Storage};
use chrono::Utc;

/// Runs a set of drills and optionally stores the JSON report.
pub struct DrillRunner<S: Storage> {
    name: String,
    drills: Vec<Box<dyn Drill>>,
    storage: Option<(S, String)>,
}

/// What a run produced and where the report went, if anywhere.
#[derive(Debug)]
pub struct RunResult {
    pub report: DrillReport,
    pub saved_to: Option<String>,
}

impl<S: Storage> DrillRunner<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            drills: Vec::new(),
            storage: None,
        }
    }

    /// One drill per section present in the scenario file, in file order.
    pub fn from_config(config: &DrillsConfig) -> Self {
        let mut runner = Self::new(config.run.name.as_str());

        if !config.format.is_empty() {
            runner.add(FormatDrill::new(config.format.clone()));
        }
        if let Some(ratings) = &config.ratings {
            runner.add(RatingDrill::new(ratings.items.clone()));
        }
        if let Some(concat) = &config.concat {
            runner.add(ConcatDrill::new(concat.arrays.clone()));
        }
        if !config.vehicles.is_empty() {
            runner.add(VehicleDrill::new(config.vehicles.clone()));
        }
        if let Some(process) = &config.process {
            runner.add(ProcessDrill::new(process.values.clone()));
        }
        if let Some(products) = &config.products {
            runner.add(ProductDrill::new(products.items.clone()));
        }
        if let Some(days) = &config.days {
            runner.add(DayDrill::new(days.days.clone()));
        }
        if let Some(square) = &config.square {
            runner.add(SquareDrill::new(
                DelayedSquare::new(TokioScheduler::new()),
                square.inputs.clone(),
            ));
        }

        runner
    }

    pub fn add(&mut self, drill: impl Drill + 'static) -> &mut Self {
        self.drills.push(Box::new(drill));
        self
    }

    pub fn with_storage(mut self, storage: S, filename: impl Into<String>) -> Self {
        self.storage = Some((storage, filename.into()));
        self
    }

    /// Drill names with the number of scenarios each will run.
    pub fn plan(&self) -> Vec<(String, usize)> {
        self.drills
            .iter()
            .map(|drill| (drill.name().to_string(), drill.planned()))
            .collect()
    }

    pub async fn run(&self) -> Result<RunResult> {
        tracing::info!("🚀 Starting run '{}' with {} drills", self.name, self.drills.len());
        let started_at = Utc::now();
        let mut outcomes = Vec::new();

        for drill in &self.drills {
            tracing::info!("▶️  Running '{}' ({} scenarios)", drill.name(), drill.planned());
            let drill_outcomes = drill.run().await?;

            for outcome in &drill_outcomes {
                tracing::debug!(
                    "{} {} {} -> {}",
                    if outcome.ok { "✅" } else { "❌" },
                    outcome.drill,
                    outcome.input,
                    outcome.output
                );
            }
            outcomes.extend(drill_outcomes);
        }

        let report = DrillReport {
            name: self.name.clone(),
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        tracing::info!(
            "📊 Run '{}' finished: {} succeeded, {} failed",
            report.name,
            report.succeeded(),
            report.failed()
        );

        let saved_to = match &self.storage {
            Some((storage, filename)) => {
                let data = serde_json::to_vec_pretty(&report)?;
                let path = storage.write_file(filename, &data).await?;
                tracing::info!("📁 Report saved to: {}", path);
                Some(path)
            }
            None => None,
        };

        Ok(RunResult { report, saved_to })
    }
}
