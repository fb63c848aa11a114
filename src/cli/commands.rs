//! Subcommand handlers for carousel, register and config actions.

use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;

use super::args::ConfigAction;
use crate::carousel::{Carousel, Slide, TokioScheduler};
use crate::config::{default_path, Config, DEFAULT_CONFIG_TOML};
use crate::event_loop::{self, HELP};
use crate::menu::MobileMenu;
use crate::registration::{
    submit_and_notify, ConsoleNotifier, RegistrationClient, RegistrationForm, BASE_URL_ENV,
};

/// Pick the registration base URL: flag, then environment, then config.
pub fn resolve_base_url(flag: Option<&str>, env: Option<&str>, config: &Config) -> String {
    flag.or(env)
        .map(str::to_string)
        .unwrap_or_else(|| config.registration.base_url.clone())
}

/// Slides from `--slide` flags, or from config when none were given.
pub fn resolve_slides(titles: &[String], config: &Config) -> Vec<Slide> {
    if titles.is_empty() {
        config.carousel.build_slides()
    } else {
        titles.iter().map(Slide::new).collect()
    }
}

/// Run the interactive carousel until `quit`, Ctrl+C or end of input.
pub fn run_carousel(
    config: &Config,
    interval_ms: Option<u64>,
    titles: &[String],
) -> Result<(), String> {
    let interval = interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.carousel.interval());
    let slides = resolve_slides(titles, config);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    rt.block_on(async {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        if let Err(e) = event_loop::setup_ctrlc_handler(cmd_tx.clone()) {
            log::warn!("Failed to install Ctrl+C handler: {}", e);
        }
        event_loop::spawn_stdin_reader(cmd_tx);

        let mut carousel = Carousel::with_interval(slides, interval, TokioScheduler::new(tick_tx));
        let mut menu = MobileMenu::with_links(config.menu.links.iter().cloned());

        println!("{}", HELP);
        let mut stdout = std::io::stdout();
        event_loop::run(&mut carousel, &mut menu, tick_rx, cmd_rx, &mut stdout)
            .await
            .map_err(|e| format!("Failed to write output: {}", e))
    })
}

/// Submit the registration form once and show the result.
///
/// Returns whether the endpoint accepted the registration.
pub fn run_register(
    config: &Config,
    form: &RegistrationForm,
    base_url: Option<&str>,
    endpoint: Option<&str>,
) -> Result<bool, String> {
    let env_base_url = std::env::var(BASE_URL_ENV).ok();
    let base_url = resolve_base_url(base_url, env_base_url.as_deref(), config);
    let endpoint = endpoint.unwrap_or(&config.registration.endpoint);

    let client =
        RegistrationClient::with_settings(base_url, endpoint, config.registration.timeout())
            .map_err(|e| format!("Failed to create registration client: {}", e))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    let notice = rt.block_on(submit_and_notify(&client, form, &mut ConsoleNotifier));
    Ok(notice.is_success())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), String> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path)).map_err(|e| e.to_string())?;

            println!("Current configuration:");
            println!("  Carousel interval: {} ms", config.carousel.interval_ms);
            println!("  Slides:");
            for (i, slide) in config.carousel.slides.iter().enumerate() {
                match &slide.image {
                    Some(image) => println!("    {}. {} ({})", i + 1, slide.title, image),
                    None => println!("    {}. {}", i + 1, slide.title),
                }
            }
            println!("  Menu links: {}", config.menu.links.join(", "));
            println!(
                "  Registration: {}{}",
                config.registration.base_url, config.registration.endpoint
            );
            println!("  Timeout: {} s", config.registration.timeout_secs);
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'cei-site config show' to view current settings.",
                    config_path.display()
                ));
            }

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&config_path, DEFAULT_CONFIG_TOML)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}
