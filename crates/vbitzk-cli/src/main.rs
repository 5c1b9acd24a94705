//! vBitZK Proof Demo CLI
//!
//! Walks through a simulated beneficial-ownership proof run in the terminal.
//! No real proof is generated and nothing leaves the machine.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vbitzk_prover::{
    InstantScheduler, Network, ProofResult, ProverConfig, Scheduler, Session, SimulationEvent,
    SystemClock, ThreadScheduler, VbitzkError, PROOF_SIZE_BYTES,
};
use vbitzk_runtime::Identifier;

/// Width of the percentage bars in the exposure section
const BAR_WIDTH: usize = 24;

#[derive(Parser)]
#[command(name = "vbitzk-prove")]
#[command(about = "Zero-knowledge beneficial ownership proofs (demo)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulated proof for a wallet
    Prove {
        /// Wallet address (any non-empty string)
        #[arg(short, long)]
        wallet: String,

        /// Network (ethereum, base, arbitrum, optimism)
        #[arg(short, long, default_value = "ethereum", value_parser = parse_network)]
        network: Network,

        /// Optional JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the step delays
        #[arg(long)]
        fast: bool,

        /// Print the result as JSON instead of the result panel
        #[arg(long)]
        json: bool,
    },

    /// List the progress steps of a run
    Steps {
        /// Optional JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show demo wallets and supported networks
    Info {
        /// Optional JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn parse_network(s: &str) -> std::result::Result<Network, String> {
    s.parse::<Network>().map_err(|e| e.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ProverConfig> {
    match path {
        Some(path) => {
            let config = ProverConfig::load(path)
                .with_context(|| format!("Failed to load config file: {:?}", path))?;
            tracing::debug!(path = ?path, steps = config.steps.len(), "config loaded");
            Ok(config)
        }
        None => Ok(ProverConfig::default()),
    }
}

fn percentage_bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn render_result(result: &ProofResult, identifier: &Identifier) -> String {
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    line("✅ Proof Generated Successfully".to_string());
    line(format!(
        "   Verified beneficial ownership across {} protocol layers",
        result.nesting_depth
    ));
    line(String::new());
    line(format!("   Proving Time: {}ms", result.proving_time_ms));
    line(format!("   Proof Size:   {} bytes", PROOF_SIZE_BYTES));
    line(format!("   Layers Deep:  {}", result.nesting_depth));
    line(format!("   Total Value:  {}", result.total_value_label));
    line(String::new());

    line("📊 Terminal Asset Exposure".to_string());
    for exposure in &result.exposures {
        let icon = if exposure.asset_symbol == "ETH" { "◆" } else { "$" };
        line(format!(
            "   {} {:<6} {:>12}  {} {}",
            icon,
            exposure.asset_symbol,
            exposure.amount,
            percentage_bar(exposure.percentage),
            exposure.percentage_label()
        ));
    }
    line(String::new());

    line("🔗 Protocol Path".to_string());
    let mut path = format!("   👛 {}", identifier.short_display());
    for protocol in &result.protocol_path {
        path.push_str(" → ");
        path.push_str(protocol);
    }
    line(path);
    line(String::new());

    line("🔐 ZK Proof Data".to_string());
    line(format!("   {}", result.proof_preview()));
    line(format!("   Generated at {}", result.generated_at));
    line(String::new());

    line(
        "   [⛓ Verify On-Chain]  [📄 Download SAR]  [📋 Export JSON]  (not available in demo)"
            .to_string(),
    );

    out
}

fn print_event(event: &SimulationEvent, steps: &[String]) {
    match event {
        SimulationEvent::StepActive { index, .. } => {
            println!("   [{}/{}] ● {}", index + 1, steps.len(), steps[*index]);
        }
        SimulationEvent::Completed { elapsed, .. } => {
            println!("   Completed in {:.1}s", elapsed.as_secs_f64());
            println!();
        }
    }
}

fn prove(
    wallet: &str,
    network: Network,
    config: &ProverConfig,
    seed: Option<u64>,
    fast: bool,
    json: bool,
) -> Result<()> {
    let scheduler: Box<dyn Scheduler> =
        if fast { Box::new(InstantScheduler::new()) } else { Box::new(ThreadScheduler) };
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config, scheduler, rng, SystemClock);
    session.set_network(network)?;

    let ticket = match session.submit(wallet) {
        Ok(ticket) => ticket,
        Err(VbitzkError::InvalidInput(_)) => {
            anyhow::bail!("Wallet address is required");
        }
        Err(err) => return Err(err.into()),
    };

    if !json {
        println!("🚀 vBitZK Prover");
        println!("   Wallet:  {}", ticket.identifier().short_display());
        println!("   Network: {}", session.network());
        println!();
    }

    let steps = config.steps.clone();
    let result = session.run(&ticket, |event| {
        if !json {
            print_event(event, &steps);
        }
    })?;

    if json {
        let out = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        println!("{}", out);
    } else {
        print!("{}", render_result(result, ticket.identifier()));
    }

    Ok(())
}

fn show_steps(config: &ProverConfig) {
    println!("📋 Progress steps ({})", config.steps.len());
    for (i, step) in config.steps.iter().enumerate() {
        println!("   {}. {}", i + 1, step);
    }
    let timing = config.timing;
    println!();
    println!(
        "   Each step waits {}ms + up to {}ms (at most {:.1}s per run)",
        timing.base_delay_ms,
        timing.jitter_ms,
        timing.max_total(config.steps.len()).as_secs_f64()
    );
}

fn show_info(config: &ProverConfig) {
    println!("📋 Demo wallets (canned results):");
    for key in config.dataset().keys() {
        println!("   {}", key);
    }
    println!();
    println!("   Any other non-empty wallet gets generated figures.");
    println!();
    println!("🌐 Networks (display only):");
    for network in Network::ALL {
        println!("   {:<10} {}", network.cli_name(), network.label());
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Prove { wallet, network, config, seed, fast, json } => {
            let config = load_config(config.as_deref())?;
            prove(&wallet, network, &config, seed, fast, json)?;
        }
        Commands::Steps { config } => {
            show_steps(&load_config(config.as_deref())?);
        }
        Commands::Info { config } => {
            show_info(&load_config(config.as_deref())?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;
    use tempfile::NamedTempFile;
    use vbitzk_prover::{DemoDataset, FixedClock, Synthesizer, CANONICAL_DEMO_KEY};

    fn canonical_result() -> ProofResult {
        let clock = FixedClock(Utc.timestamp_opt(0, 0).unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        Synthesizer::new(DemoDataset::builtin()).synthesize(
            &Identifier::parse(CANONICAL_DEMO_KEY).unwrap(),
            &mut rng,
            &clock,
        )
    }

    #[test]
    fn test_cli_parses_prove() {
        let cli = Cli::try_parse_from([
            "vbitzk-prove",
            "prove",
            "--wallet",
            "0xabc",
            "--network",
            "base",
            "--seed",
            "7",
            "--fast",
        ])
        .unwrap();

        match cli.command {
            Commands::Prove { wallet, network, seed, fast, json, config } => {
                assert_eq!(wallet, "0xabc");
                assert_eq!(network, Network::Base);
                assert_eq!(seed, Some(7));
                assert!(fast);
                assert!(!json);
                assert!(config.is_none());
            }
            _ => panic!("expected prove"),
        }
    }

    #[test]
    fn test_cli_default_network() {
        let cli = Cli::try_parse_from(["vbitzk-prove", "prove", "-w", "0xabc"]).unwrap();
        match cli.command {
            Commands::Prove { network, .. } => assert_eq!(network, Network::EthereumMainnet),
            _ => panic!("expected prove"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_network() {
        let result =
            Cli::try_parse_from(["vbitzk-prove", "prove", "-w", "0xabc", "-n", "solana"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_wallet() {
        assert!(Cli::try_parse_from(["vbitzk-prove", "prove"]).is_err());
    }

    #[test]
    fn test_prove_refuses_empty_wallet() {
        let err = prove("", Network::default(), &ProverConfig::default(), Some(1), true, true)
            .unwrap_err();
        assert!(err.to_string().contains("Wallet address is required"));
    }

    #[test]
    fn test_prove_fast_run() {
        let result = prove(
            CANONICAL_DEMO_KEY,
            Network::Arbitrum,
            &ProverConfig::default(),
            Some(3),
            true,
            true,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_config_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config, ProverConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"steps": ["a", "b"]}}"#).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.steps, vec!["a", "b"]);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to load config file"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Some(Path::new("/nonexistent/config.json"))).is_err());
    }

    #[test]
    fn test_percentage_bar() {
        assert_eq!(percentage_bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(percentage_bar(100.0), "█".repeat(BAR_WIDTH));
        assert_eq!(percentage_bar(50.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
        assert_eq!(percentage_bar(150.0).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_render_canonical_result() {
        let result = canonical_result();
        let id = Identifier::parse(CANONICAL_DEMO_KEY).unwrap();

        let panel = render_result(&result, &id);

        assert!(panel.contains("across 7 protocol layers"));
        assert!(panel.contains("$426,847"));
        assert!(panel.contains("312 bytes"));
        assert!(panel.contains("79.2%"));
        assert!(panel.contains("20.8%"));
        assert!(panel.contains("👛 0x742d...f8a2 → Aave V3 → Pendle Finance → EigenLayer → Kelp DAO"));
        assert!(panel.contains(&result.proof_preview()));
        assert!(panel.contains("1970-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_show_steps_and_info() {
        // Just verify they don't panic
        show_steps(&ProverConfig::default());
        show_info(&ProverConfig::default());
    }
}
