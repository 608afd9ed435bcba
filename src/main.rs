use clap::Parser;
use dotenv::dotenv;

use pairs_signal::cli::{BacktestCliConfig, Cli, Commands, ScreenCliConfig};
use pairs_signal::commands::{run_backtest, run_screen};
use pairs_signal::observability::init_tracing;
use pairs_signal::StrategyConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from the .env file
    dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.verbose)?;

    let base = match &cli.config {
        Some(path) => StrategyConfig::from_json_file(path)?,
        None => StrategyConfig::default(),
    };

    match cli.command {
        Commands::Screen {
            prices,
            min_correlation,
            pval_threshold,
            output,
        } => {
            let config =
                ScreenCliConfig::resolve(base, prices, min_correlation, pval_threshold, output)?;
            run_screen(config)?;
        }
        Commands::Backtest {
            prices,
            leg_y,
            leg_x,
            entry,
            exit,
            pval_threshold,
            output,
        } => {
            let config = BacktestCliConfig::resolve(
                base,
                prices,
                leg_y,
                leg_x,
                entry,
                exit,
                pval_threshold,
                output,
            )?;
            run_backtest(config)?;
        }
    }

    Ok(())
}
