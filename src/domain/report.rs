use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillOutcome {
    pub drill: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
    pub ok: bool,
    pub elapsed_ms: u64,
}

impl DrillOutcome {
    pub fn success(
        drill: &str,
        input: impl Serialize,
        output: impl Serialize,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            drill: drill.to_string(),
            input: to_json(input),
            output: to_json(output),
            ok: true,
            elapsed_ms,
        }
    }

    pub fn failure(drill: &str, input: impl Serialize, reason: String, elapsed_ms: u64) -> Self {
        Self {
            drill: drill.to_string(),
            input: to_json(input),
            output: serde_json::Value::String(reason),
            ok: false,
            elapsed_ms,
        }
    }
}

// 非有限浮點數無法編碼，以 null 表示
fn to_json(value: impl Serialize) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillReport {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<DrillOutcome>,
}

impl DrillReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn outcomes_for<'a>(&'a self, drill: &'a str) -> impl Iterator<Item = &'a DrillOutcome> + 'a {
        self.outcomes.iter().filter(move |o| o.drill == drill)
    }
}
