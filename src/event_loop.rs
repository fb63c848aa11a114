//! Async event loop for the interactive carousel.
//!
//! Timer ticks and user commands arrive on two channels and are handled one at
//! a time, each to completion, in the order they are received. Nothing else
//! touches the carousel while the loop runs.

use std::io::{BufRead, Write};

use tokio::sync::mpsc;

use crate::carousel::{Carousel, CarouselEvent, Scheduler};
use crate::menu::MobileMenu;
use crate::renderer;

/// A user command read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward an event to the carousel.
    Carousel(CarouselEvent),
    /// Open or close the mobile menu.
    ToggleMenu,
    /// Follow a link in the mobile menu.
    FollowLink,
    /// Redraw the current state.
    Show,
    /// Leave the loop.
    Quit,
}

/// Help text listing the accepted commands.
pub const HELP: &str = "commands: enter | leave | next | go <n> | menu | link | show | quit";

/// Parse one input line into a command.
///
/// Slide numbers typed by the user are 1-based.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Command::Show);
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "enter" => Command::Carousel(CarouselEvent::PointerEnter),
        "leave" => Command::Carousel(CarouselEvent::PointerLeave),
        "next" | "n" => Command::Carousel(CarouselEvent::Next),
        "go" | "click" => {
            let arg = parts
                .next()
                .ok_or_else(|| format!("'{}' needs a slide number", word))?;
            let number: usize = arg
                .parse()
                .map_err(|_| format!("'{}' is not a valid slide number", arg))?;
            if number == 0 {
                return Err("Slide numbers start at 1".to_string());
            }
            Command::Carousel(CarouselEvent::IndicatorClick(number - 1))
        }
        "menu" => Command::ToggleMenu,
        "link" => Command::FollowLink,
        "show" => Command::Show,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{}'. {}", other, HELP)),
    };

    if parts.next().is_some() {
        return Err(format!("Too many arguments. {}", HELP));
    }
    Ok(command)
}

/// Run until `Quit` is received or the command channel closes.
///
/// The carousel and menu are redrawn to `out` after every change.
pub async fn run<S: Scheduler, W: Write>(
    carousel: &mut Carousel<S>,
    menu: &mut MobileMenu,
    mut ticks: mpsc::UnboundedReceiver<CarouselEvent>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    out: &mut W,
) -> std::io::Result<()> {
    renderer::render(out, carousel, menu)?;

    loop {
        tokio::select! {
            // Ticks first so a queued tick is never overtaken by a later command
            biased;

            Some(event) = ticks.recv() => {
                let advanced = match event {
                    CarouselEvent::Tick(id) => carousel.on_tick(id),
                    other => {
                        if let Err(e) = carousel.handle(other) {
                            log::warn!("{}", e);
                        }
                        true
                    }
                };
                if advanced {
                    renderer::render(out, carousel, menu)?;
                }
            }

            maybe_command = commands.recv() => {
                match maybe_command {
                    Some(Command::Quit) | None => break,
                    Some(Command::Carousel(event)) => {
                        if let Err(e) = carousel.handle(event) {
                            writeln!(out, "{}", e)?;
                        }
                    }
                    Some(Command::ToggleMenu) => menu.toggle(),
                    Some(Command::FollowLink) => menu.follow_link(),
                    Some(Command::Show) => {}
                }
                renderer::render(out, carousel, menu)?;
            }
        }
    }

    log::debug!("Carousel loop finished on slide {}", carousel.current_index());
    Ok(())
}

/// Read commands from stdin on a background thread.
///
/// Invalid lines are reported on stderr; end of input closes the channel.
pub fn spawn_stdin_reader(commands: mpsc::UnboundedSender<Command>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::error!("Failed to read stdin: {}", e);
                    break;
                }
            };
            match parse_command(&line) {
                Ok(command) => {
                    if commands.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }
    });
}

/// Turn Ctrl+C into a `Quit` command.
pub fn setup_ctrlc_handler(commands: mpsc::UnboundedSender<Command>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        let _ = commands.send(Command::Quit);
    })
}
