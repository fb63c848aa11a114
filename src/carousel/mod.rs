//! Auto-advancing image carousel.
//!
//! A [`Carousel`] owns the slides, an index-aligned list of indicators, the
//! current index and one repeating timer obtained from a [`Scheduler`]. The
//! host feeds it [`CarouselEvent`]s one at a time.

mod controller;
mod event;
mod state;
mod timer;

pub use controller::{Carousel, CarouselError, DEFAULT_INTERVAL};
pub use event::CarouselEvent;
pub use state::{Activation, Indicator, Slide};
pub use timer::{
    ManualScheduler, Scheduler, TimerId, TokioScheduler, MAX_TICKS_PER_ADVANCE, MIN_PERIOD,
};
