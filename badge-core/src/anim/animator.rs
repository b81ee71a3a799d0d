//! Animator: swipes and scrolling text
//!
//! Each step is a direct write through [`SharedDisplay::set_all`], so a
//! swipe stops any blinking on the display. Between steps the animator
//! either sleeps or, when given a non-empty filter, waits on the button
//! queue; an accepted event ends the animation on the frame already shown.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant, Timer};

use super::direction::Direction;
use crate::display::SharedDisplay;
use crate::glyph::glyph;
use crate::input::{ButtonEvent, ButtonFilter, ButtonQueue};
use crate::GRID_SIZE;

/// Drives animations on a display, interruptible through a button queue
pub struct Animator<'a, M: RawMutex> {
    display: &'a SharedDisplay<M>,
    buttons: &'a ButtonQueue<M>,
}

impl<'a, M: RawMutex> Clone for Animator<'a, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M: RawMutex> Copy for Animator<'a, M> {}

impl<'a, M: RawMutex> Animator<'a, M> {
    pub const fn new(display: &'a SharedDisplay<M>, buttons: &'a ButtonQueue<M>) -> Self {
        Self { display, buttons }
    }

    pub fn display(&self) -> &'a SharedDisplay<M> {
        self.display
    }

    pub fn buttons(&self) -> &'a ButtonQueue<M> {
        self.buttons
    }

    /// Swipe `target` onto the display over eight steps
    ///
    /// With an empty `filter` each step just sleeps `step_delay`.
    /// Otherwise each step waits up to `step_delay` for an event in
    /// `filter` and returns it immediately, leaving the partial frame on
    /// the display.
    pub async fn swipe(
        &self,
        target: u64,
        direction: Direction,
        step_delay: Duration,
        filter: ButtonFilter,
    ) -> Option<ButtonEvent> {
        self.swipe_steps(target, Some(direction), step_delay, filter)
            .await
    }

    /// [`swipe`](Self::swipe) with the direction given as a letter
    ///
    /// An unknown letter is logged and every step re-renders the current
    /// picture unchanged; the delays and reads still happen.
    pub async fn swipe_letter(
        &self,
        target: u64,
        letter: char,
        step_delay: Duration,
        filter: ButtonFilter,
    ) -> Option<ButtonEvent> {
        let direction = Direction::from_letter(letter);
        if direction.is_none() {
            warn!("Unexpected swipe direction '{}'", letter);
        }
        self.swipe_steps(target, direction, step_delay, filter).await
    }

    async fn swipe_steps(
        &self,
        target: u64,
        direction: Option<Direction>,
        step_delay: Duration,
        filter: ButtonFilter,
    ) -> Option<ButtonEvent> {
        let mut current = self.display.steady();
        let mut incoming = target;

        for _ in 0..GRID_SIZE {
            if let Some(direction) = direction {
                (current, incoming) = direction.shift(current, incoming);
            }
            self.display.set_all(current);

            if let Some(event) = self.pause(step_delay, filter).await {
                debug!("Swipe interrupted by '{}'", event.letter());
                return Some(event);
            }
        }
        None
    }

    async fn pause(&self, delay: Duration, filter: ButtonFilter) -> Option<ButtonEvent> {
        // a closed queue would return at once; keep the animation's pace
        if filter.is_empty() || self.buttons.is_closed() {
            let until = Instant::now().checked_add(delay).unwrap_or(Instant::MAX);
            Timer::at(until).await;
            None
        } else {
            self.buttons.read(filter, delay).await
        }
    }

    /// Swipe the display blank
    pub async fn clear(&self, direction: Direction, step_delay: Duration) {
        self.swipe(0, direction, step_delay, ButtonFilter::NONE).await;
    }

    /// Scroll `text` across the display once, one glyph per swipe
    pub async fn scroll_once(
        &self,
        text: &str,
        direction: Direction,
        step_delay: Duration,
        filter: ButtonFilter,
    ) -> Option<ButtonEvent> {
        for ch in text.chars() {
            if let Some(event) = self.swipe(glyph(ch), direction, step_delay, filter).await {
                return Some(event);
            }
        }
        None
    }

    /// Scroll `text` repeatedly, with a blank gap, until a button arrives
    ///
    /// Never returns with an empty filter.
    pub async fn scroll_infinite(
        &self,
        text: &str,
        direction: Direction,
        step_delay: Duration,
        filter: ButtonFilter,
    ) -> ButtonEvent {
        loop {
            if let Some(event) = self.scroll_once(text, direction, step_delay, filter).await {
                return event;
            }
            if let Some(event) = self.swipe(0, direction, step_delay, filter).await {
                return event;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    type Display = SharedDisplay<CriticalSectionRawMutex>;
    type Queue = ButtonQueue<CriticalSectionRawMutex>;

    const STEP: Duration = Duration::from_millis(1);
    const GLYPH_A: u64 = 0x183C_6666_7E66_6600;

    #[test]
    fn test_swipe_left_shows_glyph() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        let result = block_on(animator.swipe(glyph('A'), Direction::Left, STEP, ButtonFilter::NONE));
        assert_eq!(result, None);
        assert_eq!(display.steady(), GLYPH_A);
    }

    #[test]
    fn test_swipe_replaces_any_picture() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        for direction in Direction::ALL {
            display.set_all(0xDEAD_BEEF_0BAD_F00D);
            block_on(animator.swipe(GLYPH_A, direction, STEP, ButtonFilter::NONE));
            assert_eq!(display.steady(), GLYPH_A);
        }
    }

    #[test]
    fn test_swipe_stops_blinking() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        display.mask_blink(0xFF, true);
        block_on(animator.swipe(0, Direction::Up, STEP, ButtonFilter::NONE));
        assert_eq!(display.snapshot().blinking(), 0);
    }

    #[test]
    fn test_swipe_interrupted_keeps_partial_frame() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        let a = ButtonEvent::pressed(Button::A);
        queue.push(a).unwrap();
        let result = block_on(animator.swipe(
            GLYPH_A,
            Direction::Left,
            Duration::from_millis(50),
            ButtonFilter::from_letters("A"),
        ));
        assert_eq!(result, Some(a));

        let (first_frame, _) = Direction::Left.shift(0, GLYPH_A);
        assert_eq!(display.steady(), first_frame);
        assert_ne!(display.steady(), GLYPH_A);
    }

    #[test]
    fn test_swipe_ignores_unfiltered_buttons() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        queue.push(ButtonEvent::pressed(Button::B)).unwrap();
        let result = block_on(animator.swipe(
            GLYPH_A,
            Direction::Down,
            STEP,
            ButtonFilter::from_letters("A"),
        ));
        assert_eq!(result, None);
        assert_eq!(display.steady(), GLYPH_A);
    }

    #[test]
    fn test_empty_filter_leaves_queue_alone() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        let a = ButtonEvent::pressed(Button::A);
        queue.push(a).unwrap();
        block_on(animator.clear(Direction::Right, STEP));
        assert_eq!(display.steady(), 0);
        assert_eq!(block_on(queue.read(ButtonFilter::ALL, STEP)), Some(a));
    }

    #[test]
    fn test_unbounded_step_delay_does_not_overflow() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);
        block_on(Timer::after(Duration::from_millis(2)));

        // reading step returns on the buffered press
        let a = ButtonEvent::pressed(Button::A);
        queue.push(a).unwrap();
        let result = block_on(animator.swipe(
            GLYPH_A,
            Direction::Left,
            Duration::MAX,
            ButtonFilter::ALL,
        ));
        assert_eq!(result, Some(a));

        // sleeping step just never finishes
        let sleeping = block_on(embassy_time::with_timeout(
            Duration::from_millis(10),
            animator.swipe(0, Direction::Up, Duration::MAX, ButtonFilter::NONE),
        ));
        assert!(sleeping.is_err());
    }

    #[test]
    fn test_unknown_direction_letter_is_noop() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        display.set_all(0x1234);
        display.mask_blink(0x8000, false);
        let result = block_on(animator.swipe_letter(GLYPH_A, '?', STEP, ButtonFilter::NONE));
        assert_eq!(result, None);
        assert_eq!(display.steady(), 0x1234);
        assert_eq!(display.snapshot().blinking(), 0);

        block_on(animator.swipe_letter(GLYPH_A, 'U', STEP, ButtonFilter::NONE));
        assert_eq!(display.steady(), GLYPH_A);
    }

    #[test]
    fn test_scroll_once_ends_on_last_glyph() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        let result = block_on(animator.scroll_once("Hi!", Direction::Left, STEP, ButtonFilter::NONE));
        assert_eq!(result, None);
        assert_eq!(display.steady(), glyph('!'));
    }

    #[test]
    fn test_scroll_once_stops_on_button() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        let up = ButtonEvent::pressed(Button::Up);
        queue.push(up).unwrap();
        let result = block_on(animator.scroll_once(
            "שלום",
            Direction::Right,
            STEP,
            ButtonFilter::presses(),
        ));
        assert_eq!(result, Some(up));
        assert_eq!(display.steady(), Direction::Right.shift(0, glyph('ש')).0);
    }

    #[test]
    fn test_scroll_infinite_returns_button() {
        let display = Display::new();
        let queue = Queue::new();
        let animator = Animator::new(&display, &queue);

        let release = ButtonEvent::released(Button::B);
        queue.push(release).unwrap();
        let event = block_on(animator.scroll_infinite(
            "AB",
            Direction::Up,
            STEP,
            ButtonFilter::ALL,
        ));
        assert_eq!(event, release);
    }
}
