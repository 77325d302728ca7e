//! footy CLI
//!
//! Predicts goals, shots and fouls for a Premier League fixture.

use clap::{Parser, Subcommand};
use footy::{Config, Result};

#[derive(Parser)]
#[command(name = "footy")]
#[command(about = "Premier League match statistic prediction", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict goals, shots and fouls for a fixture (prompts if teams are omitted)
    Predict {
        /// Home team, e.g. "manchester city"
        home: Option<String>,
        /// Away team
        away: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
        /// Override the training seed
        #[arg(long, conflicts_with = "unseeded")]
        seed: Option<u64>,
        /// Train without a fixed seed (results vary between runs)
        #[arg(long)]
        unseeded: bool,
        /// Fit a fresh regressor pair for every statistic call
        #[arg(long)]
        retrain: bool,
    },
    /// List the teams that can be predicted
    Teams,
    /// Data management commands
    Data {
        #[command(subcommand)]
        action: DataCommands,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum DataCommands {
    /// Show a summary of the season data
    Status,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Predict {
            home,
            away,
            format,
            seed,
            unseeded,
            retrain,
        } => commands::predict(config, home, away, format, seed, unseeded, retrain),
        Commands::Teams => commands::teams(),
        Commands::Data { action } => match action {
            DataCommands::Status => commands::data_status(&config),
        },
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use footy::data::{DataSummary, HistoricalData};
    use footy::predict::prompt::animate_loading;
    use footy::predict::{forecast_json, format_forecast, select_fixture, Predictor};
    use footy::Team;
    use std::time::Duration;

    type MyBackend = Autodiff<NdArray<f32>>;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        println!("Created data/ directory");

        println!("\nNext steps:");
        println!("  1. Place the season CSV at {}", config.data.matches_path);
        println!("  2. Run 'footy data status' to check it loads");
        println!("  3. Run 'footy predict \"arsenal\" \"chelsea\"' to make a prediction");

        Ok(())
    }

    pub fn teams() -> Result<()> {
        println!("Known teams");
        println!("───────────────────────────────");
        for team in Team::ALL {
            println!("  {:<20} {}", team.key(), team.display_name());
        }
        Ok(())
    }

    pub fn data_status(config: &Config) -> Result<()> {
        let data = HistoricalData::load(&config.data.matches_path)?;
        let summary = DataSummary::from_matches(data.matches());

        println!("Season Data");
        println!("───────────────────────────────");
        println!("  Path:     {}", config.data.matches_path);
        print!("{}", summary);
        println!(
            "  Encoded:  {} home columns, {} away columns",
            data.home().width(),
            data.away().width()
        );

        Ok(())
    }

    pub fn predict(
        mut config: Config,
        home: Option<String>,
        away: Option<String>,
        format: OutputFormat,
        seed: Option<u64>,
        unseeded: bool,
        retrain: bool,
    ) -> Result<()> {
        if unseeded {
            config.training.seed = None;
        } else if seed.is_some() {
            config.training.seed = seed;
        }
        let retrain = retrain || config.predict.retrain_each_call;

        // The season data is required before anything else can happen
        let data = HistoricalData::load(&config.data.matches_path)?;

        let (home, away) = (home.as_deref(), away.as_deref());
        let mut input = std::io::stdin().lock();
        let fixture = match format {
            OutputFormat::Table => select_fixture(home, away, &mut input, &mut std::io::stdout())?,
            // Keep stdout to the JSON document alone
            OutputFormat::Json => select_fixture(home, away, &mut input, &mut std::io::stderr())?,
        };

        if matches!(format, OutputFormat::Table) && config.predict.animate {
            println!();
            animate_loading(&mut std::io::stdout(), Duration::from_millis(100))?;
        }

        let device = Default::default();
        let mut predictor = Predictor::<MyBackend>::new(&data, fixture, config.training, device)
            .with_retrain_each_call(retrain);
        let forecast = predictor.forecast()?;

        match format {
            OutputFormat::Table => print!("{}", format_forecast(&forecast)),
            OutputFormat::Json => println!("{}", forecast_json(&forecast)?),
        }

        Ok(())
    }
}
