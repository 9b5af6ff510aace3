use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leaflens", version, about = "Identify plants and check their growing conditions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Location override for the weather lookup.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LocationArgs {
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify a plant from a photo (file path or http(s) URL)
    Identify {
        image: String,

        /// Add the result to the saved collection
        #[arg(long)]
        save: bool,

        /// Also assess current growing conditions
        #[arg(long)]
        assess: bool,

        #[command(flatten)]
        location: LocationArgs,
    },
    /// Assess growing conditions for a saved plant
    Assess {
        id: String,

        #[command(flatten)]
        location: LocationArgs,
    },
    /// List saved plants
    List,
    /// Show a saved plant and its care guide
    Show { id: String },
    /// Remove a saved plant
    Remove { id: String },
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identify_with_negative_longitude() {
        let cli = Cli::parse_from([
            "leaflens", "identify", "fern.jpg", "--save", "--assess", "--lat", "39.8", "--lon",
            "-75.8",
        ]);
        match cli.command {
            Commands::Identify {
                image,
                save,
                assess,
                location,
            } => {
                assert_eq!(image, "fern.jpg");
                assert!(save);
                assert!(assess);
                assert_eq!(location.lat, Some(39.8));
                assert_eq!(location.lon, Some(-75.8));
            }
            _ => panic!("expected identify"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["leaflens", "assess", "abc", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["leaflens", "list", "--json", "-vv"]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
