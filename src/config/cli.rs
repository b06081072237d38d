use super::toml_config::AppConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "kisan-kit")]
#[command(about = "Farmer tools: loan and yield calculators, produce listings, prices and crop doctor")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Override storage.data_dir
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Override api.base_url
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Monthly installment for a loan
    Emi {
        #[arg(long)]
        principal: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
    /// Expected harvest and revenue
    Yield {
        #[arg(long)]
        crop: String,
        /// Cultivated area in acres
        #[arg(long)]
        area: f64,
        /// traditional, standard, improved (or 0.9, 1.0, 1.1)
        #[arg(long, default_value = "standard")]
        practice: String,
    },
    /// Manage the produce listing board
    Listings {
        #[command(subcommand)]
        action: ListingsCommand,
    },
    /// Hold / sell advice from a price series
    Trend {
        #[arg(value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
        samples: Vec<f64>,
    },
    /// Simulated daily mandi prices
    Prices {
        #[arg(long)]
        commodity: String,
        #[arg(long, default_value = "30")]
        days: usize,
        /// Seed for a reproducible series
        #[arg(long)]
        seed: Option<u64>,
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Straight-line price forecast
    Forecast {
        #[arg(long)]
        commodity: String,
        #[arg(long, default_value = "7")]
        days: usize,
    },
    /// Current mandi quote
    Quote { commodity: String },
    /// Weather advisory for a city
    Weather { city: String },
    /// Upload a leaf photo to the crop doctor
    Detect {
        image: PathBuf,
        /// Fail instead of showing the offline placeholder
        #[arg(long)]
        strict: bool,
    },
    /// Check the backend health endpoint
    Health,
    /// Show or change the last active tool
    View {
        #[command(subcommand)]
        action: ViewCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ListingsCommand {
    Add(AddListingArgs),
    Remove { id: String },
    List {
        #[arg(long)]
        crop: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AddListingArgs {
    #[arg(long)]
    pub crop: String,
    /// Quantity in quintals
    #[arg(long)]
    pub quantity: f64,
    /// Price per quintal
    #[arg(long)]
    pub price: f64,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub contact: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ViewCommand {
    Show,
    Set { view: String },
}

impl Cli {
    /// Applies command line overrides on top of file configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if let Some(base_url) = &self.api_base_url {
            config.api.base_url = base_url.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emi() {
        let cli = Cli::try_parse_from([
            "kisan-kit", "emi", "--principal", "100000", "--rate", "12", "--months", "12",
        ])
        .unwrap();
        match cli.command {
            Command::Emi {
                principal,
                rate,
                months,
            } => {
                assert_eq!(principal, 100000.0);
                assert_eq!(rate, 12.0);
                assert_eq!(months, 12);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_trend_samples() {
        let cli = Cli::try_parse_from(["kisan-kit", "trend", "10,10,10,20"]).unwrap();
        match cli.command {
            Command::Trend { samples } => assert_eq!(samples, vec![10.0, 10.0, 10.0, 20.0]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "kisan-kit",
            "health",
            "--api-base-url",
            "http://10.0.0.2:5000",
            "--data-dir",
            "/tmp/kisan",
            "--json-logs",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.api.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.storage.data_dir, "/tmp/kisan");
        assert!(config.logging.json);
    }
}
