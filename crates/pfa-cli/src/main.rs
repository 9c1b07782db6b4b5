//! # pfa CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pfa_cli::compare::{run_compare, CompareArgs};
use pfa_cli::jurisdictions::{run_jurisdictions, JurisdictionsArgs};
use pfa_cli::output::emit;
use pfa_cli::recommend::{run_recommend, RecommendArgs};
use pfa_cli::score::{run_score, ScoreArgs};

/// Private Fund Architect: jurisdiction scoring and comparison.
#[derive(Parser, Debug)]
#[command(name = "pfa", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print JSON on a single line.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the reference jurisdictions.
    Jurisdictions(JurisdictionsArgs),

    /// Score one jurisdiction for a fund.
    Score(ScoreArgs),

    /// Rank several jurisdictions for a fund.
    Compare(CompareArgs),

    /// Recommend a domicile, with alternatives.
    Recommend(RecommendArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Jurisdictions(args) => run_jurisdictions(args).and_then(|v| emit(&v, cli.compact)),
        Commands::Score(args) => run_score(args).and_then(|v| emit(&v, cli.compact)),
        Commands::Compare(args) => run_compare(args).and_then(|v| emit(&v, cli.compact)),
        Commands::Recommend(args) => run_recommend(args).and_then(|v| emit(&v, cli.compact)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_jurisdictions() {
        let cli = Cli::try_parse_from(["pfa", "jurisdictions"]).unwrap();
        assert!(matches!(cli.command, Commands::Jurisdictions(_)));
        assert!(!cli.compact);
    }

    #[test]
    fn cli_parse_jurisdictions_unknown_strategy_rejected() {
        assert!(Cli::try_parse_from(["pfa", "jurisdictions", "--strategy", "hedge"]).is_err());
    }

    #[test]
    fn cli_parse_score_with_flags() {
        let cli = Cli::try_parse_from([
            "pfa",
            "score",
            "cayman-islands",
            "--fund-size",
            "100",
            "--lp-count",
            "15",
            "--strategy",
            "private-equity",
            "--compact",
        ])
        .unwrap();
        assert!(cli.compact);
        if let Commands::Score(args) = cli.command {
            assert_eq!(args.jurisdiction, "cayman-islands");
            assert_eq!(args.fund.fund_size, Some(100.0));
            assert_eq!(args.fund.lp_count, Some(15));
        } else {
            panic!("expected score command");
        }
    }

    #[test]
    fn cli_parse_negative_fund_size() {
        let cli = Cli::try_parse_from(["pfa", "score", "bvi", "--fund-size", "-5"]).unwrap();
        if let Commands::Score(args) = cli.command {
            assert_eq!(args.fund.fund_size, Some(-5.0));
        }
    }

    #[test]
    fn cli_parse_compare_with_params_file() {
        let cli = Cli::try_parse_from([
            "pfa", "compare", "bvi", "jersey", "--params", "fund.yaml",
        ])
        .unwrap();
        if let Commands::Compare(args) = cli.command {
            assert_eq!(args.jurisdictions, ["bvi", "jersey"]);
            assert_eq!(args.fund.params, Some(PathBuf::from("fund.yaml")));
        } else {
            panic!("expected compare command");
        }
    }

    #[test]
    fn cli_parse_compare_requires_ids() {
        assert!(Cli::try_parse_from(["pfa", "compare"]).is_err());
    }

    #[test]
    fn cli_parse_recommend_limit() {
        let cli = Cli::try_parse_from(["pfa", "recommend"]).unwrap();
        if let Commands::Recommend(args) = cli.command {
            assert_eq!(usize::from(args.limit), pfa_scoring::DEFAULT_RECOMMENDATION_LIMIT);
        }
        assert!(Cli::try_parse_from(["pfa", "recommend", "--limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["pfa", "recommend", "--limit", "33"]).is_err());
    }

    #[test]
    fn cli_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
