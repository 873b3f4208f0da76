//! Command-line argument definition

use clap::{Parser, Subcommand};
use shared::{validate_rating, FeedbackType, HistoryFilter, Language, SoilPreset, Theme};

/// AgriSmart - crop recommendations from your soil, weather and location
#[derive(Parser, Debug)]
#[command(name = "agrismart")]
#[command(version)]
#[command(about = "Crop recommendations from your soil, weather and location", long_about = None)]
pub struct Cli {
    /// Override the backend base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Display language for this run (en, te, hi); not persisted
    #[arg(long, global = true)]
    pub lang: Option<Language>,

    /// Enable verbose output (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect the farm location and recommend crops for it
    Detect {
        /// Latitude reported by the device GPS
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude reported by the device GPS
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Accuracy radius in metres
        #[arg(long)]
        accuracy: Option<f64>,
    },
    /// Recommend crops from soil nutrients and weather readings
    Manual(ManualArgs),
    /// Soil type for a coordinate pair
    Soil {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Current weather for a coordinate pair
    Weather {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Search history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show or change the display language
    Language {
        /// en, te or hi
        language: Option<Language>,
    },
    /// Translate free text through the backend
    Translate {
        text: String,
        /// Target language (defaults to the current language)
        #[arg(long)]
        to: Option<Language>,
    },
    /// Farmer community feed
    Community {
        #[command(subcommand)]
        action: CommunityAction,
    },
    /// Send feedback to the AgriSmart team
    Feedback {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long = "type", default_value = "general")]
        feedback_type: FeedbackType,
        /// 1 to 5 stars
        #[arg(long, default_value_t = 5, value_parser = parse_rating)]
        rating: u8,
        /// Keep the feedback out of the community feed
        #[arg(long)]
        private: bool,
        message: String,
    },
    /// Farmer profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// List video tutorials
    Tutorials,
    /// Ask the assistant a question
    Chat { message: Option<String> },
    /// Demo sign-in (sign-up when --confirm is given)
    Login {
        email: String,
        password: String,
        #[arg(long)]
        confirm: Option<String>,
    },
    /// End the demo session
    Logout,
    /// Show, set or toggle the colour theme
    Theme {
        theme: Option<Theme>,
        #[arg(long, conflicts_with = "theme")]
        toggle: bool,
    },
}

fn parse_rating(raw: &str) -> Result<u8, String> {
    let rating: u8 = raw.trim().parse().map_err(|_| "rating must be a whole number".to_string())?;
    validate_rating(rating)?;
    Ok(rating)
}

#[derive(clap::Args, Debug)]
pub struct ManualArgs {
    /// Start from known-good conditions (rice, wheat, cotton)
    #[arg(long)]
    pub preset: Option<SoilPreset>,
    /// Nitrogen (kg/ha)
    #[arg(short = 'n', long)]
    pub nitrogen: Option<String>,
    /// Phosphorus (kg/ha)
    #[arg(short = 'p', long)]
    pub phosphorus: Option<String>,
    /// Potassium (kg/ha)
    #[arg(short = 'k', long)]
    pub potassium: Option<String>,
    /// Temperature (°C)
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: Option<String>,
    /// Relative humidity (%)
    #[arg(long)]
    pub humidity: Option<String>,
    /// Soil pH
    #[arg(long)]
    pub ph: Option<String>,
    /// Rainfall (mm)
    #[arg(long)]
    pub rainfall: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List past searches
    List {
        #[arg(long, default_value = "all")]
        filter: HistoryFilter,
    },
    /// Delete a search by its listed index
    Remove { index: usize },
    /// Search counts and the most recommended crop
    Stats,
    /// Pull history saved on the server
    Sync,
}

#[derive(Subcommand, Debug)]
pub enum CommunityAction {
    List,
    Post {
        #[arg(long)]
        author: String,
        #[arg(long)]
        title: String,
        content: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    Show,
    Save {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        farm_size: Option<String>,
        /// small, medium, large or organic
        #[arg(long)]
        farm_type: Option<String>,
    },
}
