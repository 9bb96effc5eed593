use anyhow::Context;
use clap::Parser;
use starter_drills::core::dispatch::{day_type, process_value};
use starter_drills::core::text::format_string;
use starter_drills::utils::error::ErrorSeverity;
use starter_drills::utils::{logger, validation::Validate};
use starter_drills::{
    compute_delayed_square, CliConfig, Command, DrillError, DrillRunner, DrillsConfig,
    LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match config.command {
        Command::Square { n } => {
            tracing::info!("⏳ Squaring {}", n);
            match compute_delayed_square(n).await {
                Ok(squared) => println!("{}", squared),
                Err(e) => exit_with(e),
            }
        }
        Command::Format { text, lower } => {
            println!("{}", format_string(&text, Some(!lower)));
        }
        Command::Day { day } => {
            println!("{}", day_type(day));
        }
        Command::Process { value } => {
            println!("{}", process_value(&value));
        }
        Command::Run {
            config: path,
            output,
            dry_run,
        } => run_scenarios(&path, output, dry_run).await?,
    }

    Ok(())
}

async fn run_scenarios(path: &str, output: Option<String>, dry_run: bool) -> anyhow::Result<()> {
    tracing::info!("📁 Loading scenarios from: {}", path);

    let scenarios = DrillsConfig::from_file(path)
        .with_context(|| format!("failed to load scenario file '{}'", path))?;

    if let Err(e) = scenarios.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        exit_with(e);
    }

    let mut runner = DrillRunner::from_config(&scenarios);
    if let Some(dir) = output.or_else(|| scenarios.output_path().map(str::to_string)) {
        runner = runner.with_storage(LocalStorage::new(dir), scenarios.report_filename());
    }

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No drills will be executed");
        for (name, planned) in runner.plan() {
            println!("  • {} ({} scenarios)", name, planned);
        }
        return Ok(());
    }

    match runner.run().await {
        Ok(result) => {
            println!(
                "✅ {}: {} succeeded, {} failed",
                result.report.name,
                result.report.succeeded(),
                result.report.failed()
            );
            for outcome in &result.report.outcomes {
                let mark = if outcome.ok { "✅" } else { "❌" };
                println!("  {} {} {} -> {}", mark, outcome.drill, outcome.input, outcome.output);
            }
            if let Some(saved_to) = result.saved_to {
                println!("📁 Report saved to: {}", saved_to);
            }
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: DrillError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
