use chrono::Local;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use ecg_analyzer::batch::screen_folder;
use ecg_analyzer::report::render_html;
use ecg_analyzer::upload::read_image_as_data_url;
use ecg_analyzer::{AnalysisResult, AnalyzerConfig, EcgAnalyzer};

/// Heuristic ECG image screening (not a medical device)
#[derive(Parser)]
#[command(name = "ecg-analyzer", version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the simulated processing delay, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an image looks like an ECG
    Validate {
        image: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Validate and screen an ECG image
    Analyze {
        image: PathBuf,
        #[arg(long)]
        json: bool,
        /// Also print the synthetic vitals
        #[arg(long)]
        metrics: bool,
        /// Write a printable HTML report
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Screen every image in a folder
    Batch {
        folder: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Describe the screening model
    ModelInfo {
        #[arg(long)]
        json: bool,
    },
}

/// Log to stderr; RUST_LOG overrides the default of info for this crate
fn init_logging() {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if std::env::var_os("RUST_LOG").is_none() {
        if let Ok(directive) = "ecg_analyzer=info".parse() {
            filter = filter.add_directive(directive);
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_result(result: &AnalysisResult) {
    if result.abnormal {
        println!("⚠️  Potential abnormalities detected");
    } else {
        println!("✅ No significant abnormalities");
    }
    println!("Confidence: {:.1}%", result.confidence_score);

    if !result.conditions.is_empty() {
        println!("\nDetected conditions:");
        for condition in &result.conditions {
            println!("  {:<36} {:>5.1}%", condition.name, condition.probability);
        }
    }

    println!("\nRecommendations:");
    for recommendation in &result.recommendations {
        println!("  • {}", recommendation);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let cli = Cli::parse();
    let mut config = AnalyzerConfig::resolve(cli.config.as_deref())?;
    if let Some(delay_ms) = cli.delay_ms {
        config = config.with_delay_ms(delay_ms);
    }
    let max_upload = config.max_upload_bytes;
    let analyzer = EcgAnalyzer::new(config);

    match cli.cmd {
        Commands::Validate { image, json } => {
            let data_url = read_image_as_data_url(&image, max_upload).await?;
            let verdict = analyzer.validate(&data_url).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else if verdict.is_valid {
                println!("✅ {} looks like an ECG", image.display());
            } else {
                println!(
                    "❌ {}: {}",
                    image.display(),
                    verdict.message.as_deref().unwrap_or_default()
                );
            }
        }
        Commands::Analyze { image, json, metrics, report } => {
            let data_url = read_image_as_data_url(&image, max_upload).await?;
            let result = analyzer.analyze(&data_url).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }

            if metrics {
                let output = analyzer.run_model(&data_url).await?;
                println!("{}", serde_json::to_string_pretty(&output.metrics)?);
            }

            if let Some(path) = report {
                let html = render_html(&result, Some(&data_url), Local::now().date_naive());
                tokio::fs::write(&path, html).await?;
                println!("\n📄 Report written: {}", path.display());
            }
        }
        Commands::Batch { folder, json } => {
            let summary = screen_folder(&analyzer, &folder).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "📊 {} analyzed ({} abnormal), {} rejected, {} failed",
                    summary.analyzed_count,
                    summary.abnormal_count,
                    summary.rejected_count,
                    summary.failed_count
                );
            }
        }
        Commands::ModelInfo { json } => {
            let info = analyzer.model_info();
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{} {}", info.name, info.version);
                println!("Architecture: {}", info.architecture);
                println!("Reported accuracy: {}%", info.accuracy);
                println!("Supported conditions: {}", info.supported_conditions);
                println!("Citation: {}", info.citation_index);
            }
        }
    }

    Ok(())
}
