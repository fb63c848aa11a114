//! Carousel controller: owns the slides, their indicators, the current index
//! and the single repeating timer that advances them.

use std::time::Duration;

use super::event::CarouselEvent;
use super::state::{Activation, Indicator, Slide};
use super::timer::{ManualScheduler, Scheduler, TimerId};

/// Default time between automatic advances.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Errors surfaced by carousel operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarouselError {
    #[error("slide index {index} out of range (carousel has {len} slides)")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of slides
        len: usize,
    },
}

/// Auto-advancing carousel.
///
/// Exactly one slide and the indicator at the same index are active once the
/// carousel has at least one slide. At most one timer is live at any time:
/// every restart cancels the previous timer before scheduling a new one.
pub struct Carousel<S: Scheduler> {
    slides: Vec<Slide>,
    indicators: Vec<Indicator>,
    current: usize,
    interval: Duration,
    timer: Option<TimerId>,
    scheduler: S,
}

impl<S: Scheduler> Carousel<S> {
    /// Build a carousel with the default interval and start rotating.
    pub fn new(slides: Vec<Slide>, scheduler: S) -> Self {
        Self::with_interval(slides, DEFAULT_INTERVAL, scheduler)
    }

    /// Build a carousel with a custom interval and start rotating.
    ///
    /// Creates one indicator per slide, activates slide 0 and starts the
    /// timer. An empty slide list yields an idle carousel with no timer.
    pub fn with_interval(slides: Vec<Slide>, interval: Duration, scheduler: S) -> Self {
        let indicators = (0..slides.len()).map(Indicator::new).collect();
        let mut carousel = Self {
            slides,
            indicators,
            current: 0,
            interval,
            timer: None,
            scheduler,
        };

        if carousel.is_empty() {
            log::warn!("Carousel created without slides; rotation disabled");
        } else {
            carousel.activate(0);
        }
        carousel.resume();
        carousel
    }

    /// Show the slide at `index` and highlight its indicator.
    ///
    /// Every other slide and indicator becomes inactive. Out-of-range indices
    /// are rejected and leave the carousel untouched.
    pub fn go_to_slide(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.slides.len() {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        self.activate(index);
        Ok(())
    }

    /// Advance to `(current + 1) mod N`. No-op without slides.
    pub fn next_slide(&mut self) {
        if self.is_empty() {
            return;
        }
        let next = (self.current + 1) % self.slides.len();
        self.activate(next);
    }

    /// Stop automatic advance. No-op when already paused.
    pub fn pause(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
            log::debug!("Carousel paused on slide {}", self.current);
        }
    }

    /// (Re)start automatic advance.
    ///
    /// Any live timer is cancelled first so two timers never run at once.
    pub fn resume(&mut self) {
        self.pause();
        if self.is_empty() {
            return;
        }
        self.timer = Some(self.scheduler.start_repeating(self.interval));
        log::debug!("Carousel running every {:?}", self.interval);
    }

    /// Handle a click on the indicator for slide `index`.
    pub fn click_indicator(&mut self, index: usize) -> Result<(), CarouselError> {
        self.go_to_slide(index)
    }

    /// Pointer entered the carousel area.
    pub fn pointer_enter(&mut self) {
        self.pause();
    }

    /// Pointer left the carousel area.
    pub fn pointer_leave(&mut self) {
        self.resume();
    }

    /// Handle a timer tick. Ticks from timers other than the live one are
    /// dropped; returns whether the carousel advanced.
    pub fn on_tick(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            log::debug!("Dropping stale tick from timer {:?}", id);
            return false;
        }
        self.next_slide();
        true
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: CarouselEvent) -> Result<(), CarouselError> {
        match event {
            CarouselEvent::Tick(id) => {
                self.on_tick(id);
            }
            CarouselEvent::IndicatorClick(index) => self.click_indicator(index)?,
            CarouselEvent::PointerEnter => self.pointer_enter(),
            CarouselEvent::PointerLeave => self.pointer_leave(),
            CarouselEvent::Next => self.next_slide(),
        }
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a timer is live.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Id of the live timer, if any.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Index of the sole active slide/indicator pair.
    ///
    /// Returns `None` if no slide is active, more than one is, or the active
    /// indicator is not aligned with the active slide.
    pub fn active_pair(&self) -> Option<usize> {
        let mut active_slides = self
            .slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, _)| i);
        let mut active_indicators = self
            .indicators
            .iter()
            .enumerate()
            .filter(|(_, ind)| ind.is_highlighted())
            .map(|(i, _)| i);

        let slide = active_slides.next()?;
        let indicator = active_indicators.next()?;
        if active_slides.next().is_some() || active_indicators.next().is_some() {
            return None;
        }
        (slide == indicator).then_some(slide)
    }

    fn activate(&mut self, index: usize) {
        for slide in &mut self.slides {
            slide.set_activation(Activation::Inactive);
        }
        for indicator in &mut self.indicators {
            indicator.set_activation(Activation::Inactive);
        }
        self.slides[index].set_activation(Activation::Active);
        self.indicators[index].set_activation(Activation::Active);
        self.current = index;
    }
}

impl Carousel<ManualScheduler> {
    /// Move the fake clock forward and deliver every tick that fell due.
    ///
    /// Returns how many ticks advanced the carousel.
    pub fn advance_time(&mut self, by: Duration) -> usize {
        self.scheduler
            .advance(by)
            .into_iter()
            .filter(|id| self.on_tick(*id))
            .count()
    }
}

impl<S: Scheduler> Drop for Carousel<S> {
    fn drop(&mut self) {
        self.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::timer::ManualScheduler;

    fn slides(n: usize) -> Vec<Slide> {
        (0..n).map(|i| Slide::new(format!("Slide {}", i))).collect()
    }

    fn carousel(n: usize) -> Carousel<ManualScheduler> {
        Carousel::new(slides(n), ManualScheduler::new())
    }

    fn advance(carousel: &mut Carousel<ManualScheduler>, by: Duration) {
        carousel.advance_time(by);
    }

    #[test]
    fn test_init_activates_first_pair_and_starts_timer() {
        let c = carousel(3);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.active_pair(), Some(0));
        assert_eq!(c.indicators().len(), 3);
        assert!(c.is_running());
        assert_eq!(c.scheduler().active_timers(), 1);
        assert_eq!(c.interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn test_indicators_are_index_aligned() {
        let c = carousel(4);
        for (i, indicator) in c.indicators().iter().enumerate() {
            assert_eq!(indicator.slide_to(), i);
        }
    }

    #[test]
    fn test_next_slide_wraps_around() {
        let mut c = carousel(3);
        let mut visited = Vec::new();
        for _ in 0..3 {
            c.next_slide();
            visited.push(c.current_index());
        }
        assert_eq!(visited, vec![1, 2, 0]);
    }

    #[test]
    fn test_index_after_k_advances_is_k_mod_n() {
        for n in 1..=6 {
            let mut c = carousel(n);
            for k in 1..=20 {
                c.next_slide();
                assert_eq!(c.current_index(), k % n, "n={} k={}", n, k);
                assert_eq!(c.active_pair(), Some(k % n));
            }
        }
    }

    #[test]
    fn test_go_to_slide_sets_sole_active_pair() {
        let mut c = carousel(5);
        for i in 0..5 {
            c.go_to_slide(i).unwrap();
            assert_eq!(c.current_index(), i);
            assert_eq!(c.active_pair(), Some(i));
            let active = c.slides().iter().filter(|s| s.is_active()).count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn test_go_to_slide_is_idempotent() {
        let mut c = carousel(3);
        c.go_to_slide(2).unwrap();
        c.go_to_slide(2).unwrap();
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.active_pair(), Some(2));
    }

    #[test]
    fn test_go_to_slide_out_of_range_leaves_state() {
        let mut c = carousel(3);
        c.go_to_slide(1).unwrap();

        let err = c.go_to_slide(3).unwrap_err();
        assert_eq!(err, CarouselError::OutOfRange { index: 3, len: 3 });
        assert_eq!(err.to_string(), "slide index 3 out of range (carousel has 3 slides)");
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.active_pair(), Some(1));
    }

    #[test]
    fn test_click_indicator_jumps_to_slide() {
        let mut c = carousel(3);
        c.click_indicator(2).unwrap();

        assert_eq!(c.current_index(), 2);
        assert!(c.slides()[2].is_active());
        assert!(c.indicators()[2].is_highlighted());
        assert!(!c.slides()[0].is_active());
        assert!(!c.indicators()[0].is_highlighted());
        assert!(!c.slides()[1].is_active());
        assert!(!c.indicators()[1].is_highlighted());
    }

    #[test]
    fn test_timer_advances_once_per_period() {
        let mut c = carousel(3);
        advance(&mut c, Duration::from_millis(4999));
        assert_eq!(c.current_index(), 0);
        advance(&mut c, Duration::from_millis(1));
        assert_eq!(c.current_index(), 1);
        advance(&mut c, DEFAULT_INTERVAL * 2);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_pause_stops_automatic_advance() {
        let mut c = carousel(3);
        c.pause();
        assert!(!c.is_running());
        advance(&mut c, DEFAULT_INTERVAL * 10);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_pause_twice_is_noop() {
        let mut c = carousel(3);
        c.pause();
        c.pause();
        assert!(!c.is_running());
        assert_eq!(c.scheduler().active_timers(), 0);
    }

    #[test]
    fn test_pause_then_resume_runs_single_timer() {
        let mut c = carousel(4);
        c.pause();
        c.resume();
        assert_eq!(c.scheduler().active_timers(), 1);

        advance(&mut c, DEFAULT_INTERVAL);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_resume_without_pause_cancels_previous_timer() {
        let mut c = carousel(4);
        c.resume();
        c.resume();
        c.pointer_leave();
        assert_eq!(c.scheduler().active_timers(), 1);

        advance(&mut c, DEFAULT_INTERVAL);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_resume_restarts_period() {
        let mut c = carousel(3);
        advance(&mut c, Duration::from_millis(3000));
        c.pointer_enter();
        c.pointer_leave();

        advance(&mut c, Duration::from_millis(4999));
        assert_eq!(c.current_index(), 0);
        advance(&mut c, Duration::from_millis(1));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let mut c = carousel(3);
        let old = c.timer().unwrap();
        c.pointer_enter();
        c.pointer_leave();

        assert!(!c.on_tick(old));
        assert_eq!(c.current_index(), 0);
        let live = c.timer().unwrap();
        assert!(c.on_tick(live));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_indicator_click_keeps_timer_running() {
        let mut c = carousel(3);
        c.handle(CarouselEvent::IndicatorClick(2)).unwrap();
        assert!(c.is_running());
        advance(&mut c, DEFAULT_INTERVAL);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_handle_dispatches_events() {
        let mut c = carousel(3);
        c.handle(CarouselEvent::Next).unwrap();
        assert_eq!(c.current_index(), 1);

        c.handle(CarouselEvent::PointerEnter).unwrap();
        assert!(!c.is_running());
        c.handle(CarouselEvent::PointerLeave).unwrap();
        assert!(c.is_running());

        let id = c.timer().unwrap();
        c.handle(CarouselEvent::Tick(id)).unwrap();
        assert_eq!(c.current_index(), 2);

        assert!(c.handle(CarouselEvent::IndicatorClick(7)).is_err());
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_empty_carousel_is_idle() {
        let mut c = carousel(0);
        assert!(c.is_empty());
        assert!(!c.is_running());
        assert!(c.current_slide().is_none());
        assert_eq!(c.active_pair(), None);

        c.next_slide();
        c.resume();
        assert_eq!(c.current_index(), 0);
        assert!(!c.is_running());
        assert!(matches!(
            c.go_to_slide(0),
            Err(CarouselError::OutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_single_slide_stays_on_itself() {
        let mut c = carousel(1);
        advance(&mut c, DEFAULT_INTERVAL * 3);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.active_pair(), Some(0));
    }

    #[test]
    fn test_custom_interval() {
        let mut c = Carousel::with_interval(slides(2), Duration::from_millis(250), ManualScheduler::new());
        advance(&mut c, Duration::from_millis(250));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_advance_time_counts_advances_and_keeps_timer() {
        let mut c = carousel(3);
        assert_eq!(c.advance_time(DEFAULT_INTERVAL * 4), 4);
        assert_eq!(c.current_index(), 1);
        assert!(c.is_running());
        assert_eq!(c.scheduler().active_timers(), 1);
        assert!(c.timer().is_some_and(|id| c.scheduler().is_active(id)));

        c.pause();
        assert_eq!(c.advance_time(DEFAULT_INTERVAL * 4), 0);
        assert_eq!(c.scheduler().active_timers(), 0);
    }

    #[test]
    fn test_current_slide_follows_index() {
        let mut c = carousel(3);
        c.go_to_slide(2).unwrap();
        assert_eq!(c.current_slide().map(Slide::title), Some("Slide 2"));
    }
}
