use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use claims_pipeline::app::process_batch_use_case::ProcessBatchUseCase;
use claims_pipeline::config::PipelineConfig;
use claims_pipeline::domain::{BatchResult, BatchStatus};
use claims_pipeline::infra::sink_ndjson::NdjsonSink;
use claims_pipeline::infra::transport_fs::FsTransport;
use claims_pipeline::logging::init_logging;
use claims_pipeline::observability;
use claims_pipeline::pipeline::processing::coordinator::BatchCoordinator;

/// Where the NDJSON sink adapter lands promoted batches.
const SINK_DIR: &str = "data/warehouse";

#[derive(Parser)]
#[command(name = "claims_pipeline")]
#[command(about = "Quality-gated retail claims transformation and risk scoring")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one claims batch from the drop directory
    Process {
        /// Payload file name inside the configured source directory
        #[arg(long)]
        input: String,
        /// Processing date (yyyy-MM-dd); defaults to now
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Path to a TOML config file; defaults apply when omitted
        #[arg(long)]
        config: Option<String>,
    },
    /// Run a small in-memory batch and print the quality report
    Demo,
}

fn print_summary(result: &BatchResult) {
    println!("\n📊 Batch Results ({}):", result.batch_id);
    println!("   Status: {:?}", result.status);
    println!("   Total records: {}", result.report.total_records);
    println!("   Null claim ids: {}", result.report.null_claim_ids);
    println!("   Null amounts: {}", result.report.null_amounts);
    println!("   Negative amounts: {}", result.report.negative_amounts);
    println!("   Quality: {}%", result.report.quality_percentage);

    let escalations = result
        .enriched_records
        .iter()
        .filter(|r| r.requires_escalation)
        .count();
    println!("   Escalations: {}", escalations);

    if !result.report.flagged_claim_ids.is_empty() {
        println!("\n⚠️  Flagged records:");
        for id in &result.report.flagged_claim_ids {
            println!("   - {}", id);
        }
    }
    if !result.errors.is_empty() {
        println!("\n❌ Errors:");
        for err in &result.errors {
            println!("   - {}", err);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    if let Err(e) = observability::init() {
        warn!("metrics init failed: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            as_of,
            config,
        } => {
            let config = match config {
                Some(path) => PipelineConfig::load(&path)?,
                None => PipelineConfig::default(),
            };
            let as_of = match as_of {
                Some(date) => Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()),
                None => Utc::now(),
            };

            let span = tracing::info_span!("process_batch", input = %input);
            let _enter = span.enter();
            info!("Starting batch run");

            let transport = FsTransport::new(config.source_path.clone());
            let sink = NdjsonSink::new(SINK_DIR)?;
            let use_case =
                ProcessBatchUseCase::new(Box::new(transport), Box::new(sink), config);

            match use_case.run(&input, as_of).await {
                Ok(result) => {
                    info!(status = ?result.status, "Batch run finished");
                    print_summary(&result);
                    if result.status == BatchStatus::Rejected {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    error!("Batch run failed: {:#}", e);
                    return Err(e);
                }
            }
        }
        Commands::Demo => {
            let payload = br#"[
                {"claim_id": "CLM-001", "customer_id": "CU-01", "status": "REJECTED",
                 "claim_amount": -40.0, "claim_date": "2024-06-01"},
                {"customer_id": "CU-02", "status": "CLOSED",
                 "claim_amount": 120.0, "claim_date": "2024-06-02"},
                {"claim_id": "CLM-003", "customer_id": "CU-03", "status": "PENDING",
                 "claim_amount": 80.0, "claim_date": "2024-06-05"},
                {"claim_id": "CLM-004", "customer_id": "CU-04", "status": "APPROVED",
                 "claim_amount": 3000.0, "claim_date": "2024-06-14"}
            ]"#;

            let result =
                BatchCoordinator::process_batch(payload, Utc::now(), &PipelineConfig::default());
            print_summary(&result);
        }
    }

    Ok(())
}
