use cei_site::cli::{self, Args, Command};
use cei_site::config::Config;
use cei_site::registration::RegistrationForm;
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::path::Path;

/// Log to stderr at `warn`, `debug` for this crate with `--verbose`.
/// `RUST_LOG` filters are applied on top.
fn init_logger(verbose: bool) {
    let mut builder = Builder::new();
    builder.target(Target::Stderr).filter_level(LevelFilter::Warn);
    if verbose {
        builder.filter_module("cei_site", LevelFilter::Debug);
    }
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

/// Load .env file without overriding existing environment variables.
fn load_env() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
}

fn main() {
    load_env();

    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(args.command, args.config.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    Config::load(path).map_err(|e| e.to_string())
}

fn run(command: Command, config_path: Option<&Path>) -> Result<(), String> {
    match command {
        Command::Config { action } => cli::handle_config_action(action, config_path),
        Command::Carousel {
            interval_ms,
            slides,
        } => cli::run_carousel(&load_config(config_path)?, interval_ms, &slides),
        Command::Register {
            name,
            email,
            phone,
            password,
            base_url,
            endpoint,
        } => {
            let config = load_config(config_path)?;
            let form = RegistrationForm::new(name, email, phone, password);
            let accepted =
                cli::run_register(&config, &form, base_url.as_deref(), endpoint.as_deref())?;
            if !accepted {
                // The notice has already been shown
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
