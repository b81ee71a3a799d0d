//! Canned display effects
//!
//! - Boot animation: the badge name in Latin and Hebrew letters
//! - Breathing: a sine-shaped brightness fade, down then up

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};

use crate::anim::{Animator, Direction};
use crate::config::MAX_BRIGHTNESS;
use crate::display::SharedDisplay;
use crate::input::ButtonFilter;

/// Per-step delay of the boot animation swipes
pub const BOOT_STEP_DELAY: Duration = Duration::from_millis(10);

/// Pause between the boot animation's two words
pub const BOOT_PAUSE: Duration = Duration::from_millis(100);

/// Latin spelling, scrolled left
pub const BOOT_TEXT: &str = "Hackeriot";

/// Hebrew spelling, scrolled right
pub const BOOT_TEXT_HEBREW: &str = "האקריות";

/// Play the boot animation; ignores buttons and ends on a blank screen
pub async fn boot_animation<M: RawMutex>(animator: &Animator<'_, M>) {
    info!("Boot animation started");

    animator
        .scroll_once(BOOT_TEXT, Direction::Left, BOOT_STEP_DELAY, ButtonFilter::NONE)
        .await;
    Timer::after(BOOT_PAUSE).await;

    animator
        .scroll_once(
            BOOT_TEXT_HEBREW,
            Direction::Right,
            BOOT_STEP_DELAY,
            ButtonFilter::NONE,
        )
        .await;
    Timer::after(BOOT_PAUSE).await;

    animator.clear(Direction::Right, Duration::from_ticks(0)).await;
}

/// Number of brightness levels in each half of a breath
const BREATH_LEVELS: usize = 15;

/// Dwell time per level, in units of [`BREATH_UNIT_US`]
///
/// `delta[i] = 1000 * 2/π * (asin((i+1)/n) - asin(i/n))`, reversed, so the
/// brightness follows a sine.
const BREATH_DELTAS: [u8; BREATH_LEVELS] = [
    234, 99, 77, 66, 59, 55, 52, 49, 47, 46, 44, 44, 43, 43, 42,
];

const BREATH_UNIT_US: u64 = 400;

/// One breath: `(brightness %, dwell)` for a fade down and back up
#[derive(Debug, Clone, Default)]
pub struct BreathCurve {
    step: usize,
}

impl BreathCurve {
    pub const fn new() -> Self {
        Self { step: 0 }
    }

    /// Steps in one full breath
    pub const fn len() -> usize {
        2 * BREATH_LEVELS
    }
}

impl Iterator for BreathCurve {
    type Item = (u8, Duration);

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.step;
        if step >= Self::len() {
            return None;
        }
        self.step += 1;

        let (level, delta) = if step < BREATH_LEVELS {
            // fading out
            (BREATH_LEVELS - step, BREATH_DELTAS[step])
        } else {
            // fading in
            let i = step - BREATH_LEVELS;
            (i, BREATH_DELTAS[BREATH_LEVELS - 1 - i])
        };
        let percent = (level * MAX_BRIGHTNESS as usize / BREATH_LEVELS) as u8;
        Some((percent, Duration::from_micros(delta as u64 * BREATH_UNIT_US)))
    }
}

/// Breathe forever by publishing brightness requests to the display
pub async fn breathe<M: RawMutex>(display: &SharedDisplay<M>) {
    info!("Breathing effect started");
    loop {
        for (percent, dwell) in BreathCurve::new() {
            display.set_brightness(percent);
            Timer::after(dwell).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::glyph;
    use crate::input::ButtonQueue;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::with_timeout;

    #[test]
    fn test_breath_curve_shape() {
        let steps: std::vec::Vec<_> = BreathCurve::new().collect();
        assert_eq!(steps.len(), BreathCurve::len());
        assert_eq!(steps[0], (100, Duration::from_micros(234 * 400)));
        assert_eq!(steps[14].0, 6);
        assert_eq!(steps[15], (0, Duration::from_micros(42 * 400)));
        assert_eq!(steps[29], (93, Duration::from_micros(234 * 400)));

        // monotonic down, then monotonic up
        assert!(steps[..15].windows(2).all(|w| w[0].0 > w[1].0));
        assert!(steps[15..].windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_breathe_publishes_brightness() {
        let display: SharedDisplay<CriticalSectionRawMutex> = SharedDisplay::new();
        let _ = block_on(with_timeout(Duration::from_millis(5), breathe(&display)));
        assert_eq!(display.take_brightness(), Some(100));
    }

    #[test]
    fn test_boot_animation_ends_blank() {
        let display: SharedDisplay<CriticalSectionRawMutex> = SharedDisplay::new();
        let queue: ButtonQueue<CriticalSectionRawMutex> = ButtonQueue::new();
        let animator = Animator::new(&display, &queue);

        display.set_all(glyph('X'));
        block_on(boot_animation(&animator));
        assert_eq!(display.steady(), 0);
    }
}
