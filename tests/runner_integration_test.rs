use starter_drills::core::DrillReport;
use starter_drills::utils::validation::Validate;
use starter_drills::{DrillRunner, DrillsConfig, LocalStorage};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const SCENARIOS: &str = r#"
[run]
name = "assignment"

[output]
filename = "drills.json"
path = "./drills-output"

[[format]]
text = "Hello World"

[[format]]
text = "Hello World"
upper = false

[ratings]
items = [
    { title = "Book A", rating = 4.5 },
    { title = "Book B", rating = 3.2 },
    { title = "Book C", rating = 5.0 },
]

[concat]
arrays = [["a", "b"], ["c"]]

[[vehicles]]
make = "Toyota"
year = 2020
model = "Corolla"

[process]
values = ["hello", 10]

[products]
items = [
    { name = "Pen", price = 10 },
    { name = "Notebook", price = 25 },
    { name = "Bag", price = 50 },
]

[days]
days = ["Monday", "Sunday"]

[square]
inputs = [5, -3, 0, 2.5]
"#;

#[tokio::test(start_paused = true)]
async fn test_end_to_end_run_writes_report() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut scenario_file = NamedTempFile::new().unwrap();
    scenario_file.write_all(SCENARIOS.as_bytes()).unwrap();

    let config = DrillsConfig::from_file(scenario_file.path()).unwrap();
    assert!(config.validate().is_ok());

    let runner = DrillRunner::from_config(&config)
        .with_storage(LocalStorage::new(output_path.clone()), config.report_filename());
    let result = runner.run().await.unwrap();

    let saved_to = result.saved_to.expect("report should be saved");
    assert!(saved_to.ends_with("drills.json"));

    let data = std::fs::read(std::path::Path::new(&output_path).join("drills.json")).unwrap();
    let report: DrillReport = serde_json::from_slice(&data).unwrap();

    assert_eq!(report.name, "assignment");
    assert_eq!(report.failed(), 1);

    let format: Vec<_> = report.outcomes_for("format").collect();
    assert_eq!(format[0].output, serde_json::json!("HELLO WORLD"));
    assert_eq!(format[1].output, serde_json::json!("hello world"));

    let ratings: Vec<_> = report.outcomes_for("ratings").collect();
    let kept = ratings[0].output.as_array().unwrap();
    assert_eq!(kept.len(), 2);

    let concat: Vec<_> = report.outcomes_for("concat").collect();
    assert_eq!(concat[0].output, serde_json::json!(["a", "b", "c"]));

    let vehicles: Vec<_> = report.outcomes_for("vehicles").collect();
    assert_eq!(vehicles[0].output["model"], "Model: Corolla");

    let products: Vec<_> = report.outcomes_for("products").collect();
    assert_eq!(products[0].output["name"], "Bag");

    let days: Vec<_> = report.outcomes_for("days").collect();
    assert_eq!(days[1].output, serde_json::json!("Weekend"));

    let squares: Vec<_> = report.outcomes_for("square").collect();
    assert_eq!(squares.len(), 4);
    // 負數立即失敗，排在所有成功結果之前
    assert!(!squares[0].ok);
    assert_eq!(squares[0].input, serde_json::json!(-3.0));
    assert!(squares[1..].iter().all(|o| o.ok && o.elapsed_ms >= 1000));

    let mut results: Vec<f64> = squares[1..]
        .iter()
        .map(|o| o.output.as_f64().unwrap())
        .collect();
    results.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(results, vec![0.0, 6.25, 25.0]);
}

#[test]
fn test_invalid_scenario_file_is_rejected() {
    let config = DrillsConfig::from_toml_str("[run]\nname = \"x\"\n[square]\ninputs = [nan]\n").unwrap();
    assert!(config.validate().is_err());

    assert!(DrillsConfig::from_file("/definitely/not/here.toml").is_err());
}
