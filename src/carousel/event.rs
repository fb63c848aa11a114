//! Stimuli the host delivers to a carousel.

use super::timer::TimerId;

/// One input to the carousel, handled to completion before the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// A repeating timer fired.
    Tick(TimerId),
    /// The indicator for slide `index` was clicked.
    IndicatorClick(usize),
    /// Pointer moved over the carousel.
    PointerEnter,
    /// Pointer left the carousel.
    PointerLeave,
    /// Manual advance to the next slide.
    Next,
}
