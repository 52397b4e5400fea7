//! Command-line entry point for report extraction and follow-up chat.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use mrx::schema::{MiningReport, ResourceInfo};
use mrx::{build_adapter, ExtractError, Extraction, Extractor, ProviderConfig, ProviderKind};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the report document (PDF).
    document: PathBuf,

    /// Backend to run against.
    #[arg(long, default_value = "gemini")]
    provider: ProviderKind,

    /// Model identifier; defaults per backend.
    #[arg(long)]
    model: Option<String>,

    /// Output path for the extracted JSON; defaults to
    /// `<document-stem>_result.json` next to the document.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Open an interactive question session after extraction.
    #[arg(long)]
    chat: bool,
}

#[tokio::main]
async fn main() -> Result<(), ExtractError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ProviderConfig::from_env(cli.provider, cli.model.clone());
    let adapter = build_adapter(cli.provider, &config)?;
    let extractor = Extractor::new(adapter);

    let extraction = extractor.extract_path(&cli.document).await?;
    print_summary(&extraction.report);

    let output = cli.output.clone().unwrap_or_else(|| default_output(&cli.document));
    let json = serde_json::to_string_pretty(&extraction.report)
        .map_err(|e| ExtractError::SchemaViolation(e.to_string()))?;
    tokio::fs::write(&output, json).await?;
    tracing::info!(path = %output.display(), "Extraction result saved");

    if cli.chat {
        run_chat(&extractor, &extraction).await?;
    }

    Ok(())
}

fn default_output(document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map_or_else(|| "document".to_string(), |s| s.to_string_lossy().into_owned());
    document.with_file_name(format!("{stem}_result.json"))
}

fn print_summary(report: &MiningReport) {
    if let Some(meta) = &report.report {
        if let Some(title) = &meta.title {
            println!("Report:   {title}");
        }
        if let Some(by) = &meta.prepared_by {
            println!("Prepared: {by}");
        }
    }
    if let Some(rights) = &report.rights {
        if let Some(name) = &rights.name {
            println!("Rights:   {name}");
        }
    }
    if let Some(resources) = &report.resources {
        for resource in resources {
            print_resource(resource);
        }
    }
    if let Some(bodies) = &report.ore_bodies {
        println!("Ore bodies: {}", bodies.len());
    }
}

fn print_resource(resource: &ResourceInfo) {
    let commodity = resource.commodity.as_deref().unwrap_or("(unnamed commodity)");
    println!("Resource: {commodity}");
    let Some(quantities) = &resource.quantities else {
        return;
    };
    let tiers = [
        ("inferred", &quantities.inferred),
        ("indicated", &quantities.indicated),
        ("measured", &quantities.measured),
        ("total", &quantities.total),
    ];
    for (label, detail) in tiers {
        if let Some(detail) = detail {
            let tonnage = detail.ore_tonnage.as_deref().unwrap_or("-");
            let metal = detail.metal_content.as_deref().unwrap_or("-");
            let grade = detail.grade.as_deref().unwrap_or("-");
            println!("  {label:<9} ore: {tonnage}  metal: {metal}  grade: {grade}");
        }
    }
}

async fn run_chat(extractor: &Extractor, extraction: &Extraction) -> Result<(), ExtractError> {
    let mut session = match extractor.conversation(extraction) {
        Ok(session) => session,
        Err(ExtractError::SessionNotReady) => {
            println!(
                "Backend {} does not support follow-up questions.",
                extractor.provider_name()
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!("Ask questions about the report. Type \"exit\" to quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question == "exit" || question == "quit" {
            break;
        }

        // Ctrl-C abandons the in-flight turn; the session keeps its
        // previous continuation token and stays usable.
        tokio::select! {
            result = session.ask_with(question, |fragment| {
                print!("{fragment}");
                let _ = std::io::stdout().flush();
            }) => {
                match result {
                    Ok(_) => println!(),
                    Err(e) => eprintln!("\nTurn failed: {e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\n[turn cancelled]");
            }
        }
    }

    session.close();
    Ok(())
}
