//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Landing page carousel, mobile menu and registration client
#[derive(Parser, Debug)]
#[command(name = "cei-site")]
#[command(version, about = "Landing page carousel and registration client", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive carousel (reads commands from stdin)
    Carousel {
        /// Milliseconds between automatic slide changes
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Slide title (repeat for several slides; overrides config)
        #[arg(long = "slide")]
        slides: Vec<String>,
    },
    /// Submit the registration form
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Account password
        #[arg(long)]
        password: String,

        /// Registration service base URL (overrides config and CEI_API_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Endpoint path (default: /api/registrar)
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
