use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use assist_core::{
    ask, build_context, evaluate_cases, AiConfig, EvalCase, JsonlCatalog, OpenAiProvider,
    Orchestrator, Product, ProductCatalog,
};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "assist")]
#[command(about = "Product question assistant CLI")]
struct Cli {
    /// API key for the external AI service. Without it the local answer
    /// chain handles every question.
    #[arg(long, env = "ASSIST_API_KEY", global = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible chat completions service.
    #[arg(long, env = "ASSIST_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Model name sent to the external service.
    #[arg(long, env = "ASSIST_MODEL", global = true)]
    model: Option<String>,

    /// External call timeout in seconds.
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Answer one question about a product.
    Ask {
        #[arg(long)]
        products: PathBuf,
        #[arg(long)]
        product_id: i64,
        #[arg(long)]
        question: String,
    },
    /// Run local-chain regression cases against a product.
    Eval {
        #[arg(long)]
        products: PathBuf,
        #[arg(long)]
        product_id: i64,
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        min_pass_rate: f32,
    },
    /// Print the context block the external service would receive.
    Context {
        #[arg(long)]
        products: PathBuf,
        #[arg(long)]
        product_id: i64,
    },
}

fn ai_config(cli: &Cli) -> AiConfig {
    let mut config = AiConfig {
        api_key: cli.api_key.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        ..AiConfig::default()
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    config
}

fn read_eval_cases_json(path: &Path) -> Result<Vec<EvalCase>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let cases: Vec<EvalCase> = serde_json::from_reader(file).context("parse eval cases json")?;
    Ok(cases)
}

fn load_product(catalog: &JsonlCatalog, product_id: i64) -> Result<Product> {
    catalog
        .product(product_id)?
        .with_context(|| format!("product {product_id} not found"))
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Ask {
            products,
            product_id,
            question,
        } => {
            let catalog = JsonlCatalog::load(products)?;
            let provider = OpenAiProvider::new(ai_config(&cli))?;
            let orchestrator = Orchestrator::new(provider);

            let answer = ask(&catalog, &orchestrator, *product_id, question).await?;
            println!("product_id={} source={:?}", product_id, answer.source);
            println!("answer={}", answer.text);
        }
        Commands::Eval {
            products,
            product_id,
            cases,
            min_pass_rate,
        } => {
            let catalog = JsonlCatalog::load(products)?;
            let product = load_product(&catalog, *product_id)?;
            let cases = read_eval_cases_json(cases)?;
            let summary = evaluate_cases(&product, &cases);

            println!(
                "product_id={} total={} passed={} failed={} pass_rate={:.4} required={:.4}",
                product_id,
                summary.total,
                summary.passed,
                summary.failed,
                summary.pass_rate,
                min_pass_rate
            );
            for outcome in &summary.outcomes {
                println!(
                    "case={} passed={} source={:?} latency={:.1}ms",
                    outcome.case_id, outcome.passed, outcome.actual_source, outcome.latency_ms
                );
            }

            if summary.pass_rate < *min_pass_rate {
                anyhow::bail!(
                    "pass rate {:.4} below required {:.4}",
                    summary.pass_rate,
                    min_pass_rate
                );
            }
        }
        Commands::Context {
            products,
            product_id,
        } => {
            let catalog = JsonlCatalog::load(products)?;
            let product = load_product(&catalog, *product_id)?;
            print!("{}", build_context(&product));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
