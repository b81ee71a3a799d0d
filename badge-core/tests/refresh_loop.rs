//! Refresh loop running against a recording driver

use std::thread;
use std::time::Duration as StdDuration;

use badge_core::refresh::apply_commands;
use badge_core::{
    run_refresh, BlinkRate, BoardRevision, DisplayConfig, LedMatrixDriver, Refresher,
    SharedDisplay,
};
use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{with_timeout, Duration};

type Display = SharedDisplay<CriticalSectionRawMutex>;

/// Mirrors the matrix: one bit per physical LED
#[derive(Default)]
struct MatrixMirror {
    lit: u128,
    writes: usize,
    brightness: Vec<u8>,
    blink: Option<BlinkRate>,
}

impl LedMatrixDriver for MatrixMirror {
    type Error = core::convert::Infallible;

    fn set_led(&mut self, physical: u8, on: bool) -> Result<(), Self::Error> {
        self.writes += 1;
        if on {
            self.lit |= 1 << physical;
        } else {
            self.lit &= !(1 << physical);
        }
        Ok(())
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), Self::Error> {
        self.brightness.push(percent);
        Ok(())
    }

    fn set_blink_rate(&mut self, rate: BlinkRate) -> Result<(), Self::Error> {
        self.blink = Some(rate);
        Ok(())
    }
}

impl MatrixMirror {
    /// Logical bitmap currently shown, undoing the board mapping
    fn shown(&self, board: BoardRevision) -> u64 {
        (0..64u8)
            .filter(|&pos| self.lit & (1 << board.led_index(pos)) != 0)
            .fold(0, |acc, pos| acc | 1 << pos)
    }
}

#[test]
fn test_run_refresh_shows_display_state() {
    let display = Display::new();
    let config = DisplayConfig {
        brightness: 60,
        ..DisplayConfig::default()
    };
    let mut driver = MatrixMirror::default();

    display.set_all(0x8142_2418_1824_4281);
    display.blink_all(BlinkRate::Hz2);

    let _ = block_on(with_timeout(
        Duration::from_millis(100),
        run_refresh(&display, &mut driver, &config),
    ));

    assert_eq!(driver.shown(config.board), 0x8142_2418_1824_4281);
    assert_eq!(driver.brightness.first(), Some(&60));
    assert_eq!(driver.blink, Some(BlinkRate::Hz2));
    // picture drawn once, then left alone
    assert_eq!(driver.writes, 16);
}

#[test]
fn test_writer_thread_and_refresh_agree() {
    let display = Display::new();
    let config = DisplayConfig::default();
    let mut driver = MatrixMirror::default();

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..64u8 {
                display.pixel_on(i);
                thread::sleep(StdDuration::from_micros(200));
            }
            display.mask_off(0x00FF_00FF_00FF_00FF);
            display.set_brightness(20);
        });

        let _ = block_on(with_timeout(
            Duration::from_millis(150),
            run_refresh(&display, &mut driver, &config),
        ));
    });

    assert_eq!(driver.shown(config.board), 0xFF00_FF00_FF00_FF00);
    assert_eq!(driver.brightness.last(), Some(&20));
}

#[test]
fn test_manual_ticks_match_state_after_blinks_end() {
    let display = Display::new();
    let config = DisplayConfig {
        board: BoardRevision::Breadboard,
        ..DisplayConfig::default()
    };
    let mut driver = MatrixMirror::default();
    let mut refresher = Refresher::new(&config);

    display.mask_blink(0xF0, true);
    display.mask_blink(0x0F, false);
    for _ in 0..7 {
        refresher.tick(&display.snapshot(), &mut driver);
    }
    // fast pixels toggled at ticks 0 and 5, slow ones only at 0
    assert_eq!(refresher.shadow(), 0x0F);

    display.mask_on(0xFF);
    apply_commands(&display, &mut driver);
    refresher.tick(&display.snapshot(), &mut driver);
    assert_eq!(refresher.shadow(), 0xFF);
    assert_eq!(driver.shown(config.board), 0xFF);
}
