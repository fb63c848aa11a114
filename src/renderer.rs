//! Plain-text rendering of carousel and menu state.

use std::io::Write;

use crate::carousel::{Carousel, Scheduler};
use crate::menu::MobileMenu;

const HIGHLIGHTED: char = '●';
const DIMMED: char = '○';

/// Indicator strip, one dot per slide: `●○○`.
pub fn indicator_strip<S: Scheduler>(carousel: &Carousel<S>) -> String {
    carousel
        .indicators()
        .iter()
        .map(|ind| if ind.is_highlighted() { HIGHLIGHTED } else { DIMMED })
        .collect()
}

/// One status line for the carousel.
///
/// Format: `[●○○] 1/3 Title (image) | running`
pub fn format_carousel<S: Scheduler>(carousel: &Carousel<S>) -> String {
    let state = if carousel.is_running() { "running" } else { "paused" };

    match carousel.current_slide() {
        Some(slide) => {
            let image = slide
                .image()
                .map(|img| format!(" ({})", img))
                .unwrap_or_default();
            format!(
                "[{}] {}/{} {}{} | {}",
                indicator_strip(carousel),
                carousel.current_index() + 1,
                carousel.len(),
                slide.title(),
                image,
                state
            )
        }
        None => format!("[] no slides | {}", state),
    }
}

/// One status line for the mobile menu.
pub fn format_menu(menu: &MobileMenu) -> String {
    if menu.is_open() {
        format!("✕ menu: {}", menu.links().join(" | "))
    } else {
        "☰ menu".to_string()
    }
}

/// Write the carousel and menu lines to `out`.
pub fn render<S: Scheduler, W: Write>(
    out: &mut W,
    carousel: &Carousel<S>,
    menu: &MobileMenu,
) -> std::io::Result<()> {
    writeln!(out, "{}", format_carousel(carousel))?;
    writeln!(out, "{}", format_menu(menu))?;
    out.flush()
}
