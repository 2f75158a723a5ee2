// Copyright (c) 2026 kanafall developers

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    Rng,
};

use crate::cell::Cell;
use crate::config::Mode;
use crate::frame::Frame;
use crate::palette::Tone;

pub(crate) const SPEED_RANGE: (f32, f32) = (0.5, 2.0);
pub(crate) const TRAIL_RANGE_BOUNDED: (u16, u16) = (6, 20);
pub(crate) const TRAIL_RANGE_WRAPPING: (u16, u16) = (4, 12);
pub(crate) const DELAY_RANGE: (u16, u16) = (0, 50);

// Chance per tick that a wrapping column re-rolls its trail length.
const TRAIL_RESEED_CHANCE: f32 = 0.01;

/// Per-mode sampling ranges, built once per run. Wrapping mode ignores
/// the speed and delay samplers (unit speed, no stagger).
pub struct Tuning {
    mode: Mode,
    height: u16,
    start: Uniform<f32>,
    speed: Uniform<f32>,
    trail: Uniform<u16>,
    delay: Uniform<u16>,
    chance: Uniform<f32>,
}

impl Tuning {
    pub fn new(mode: Mode, height: u16) -> Self {
        let height = height.max(1);
        // Bounded heads start above the screen; wrapping heads start on it.
        let start = match mode {
            Mode::Bounded => Uniform::new(-(height as f32), 0.0),
            Mode::Wrapping => Uniform::new(0.0, height as f32),
        }
        .expect("valid range");
        let (trail_low, trail_high) = match mode {
            Mode::Bounded => TRAIL_RANGE_BOUNDED,
            Mode::Wrapping => TRAIL_RANGE_WRAPPING,
        };

        Self {
            mode,
            height,
            start,
            speed: Uniform::new(SPEED_RANGE.0, SPEED_RANGE.1).expect("valid range"),
            trail: Uniform::new(trail_low, trail_high).expect("valid range"),
            delay: Uniform::new(DELAY_RANGE.0, DELAY_RANGE.1).expect("valid range"),
            chance: Uniform::new(0.0, 1.0).expect("valid range"),
        }
    }

    pub fn roll(&self, rng: &mut StdRng) -> f32 {
        self.chance.sample(rng)
    }
}

/// One vertical lane of the animation, tied to a fixed horizontal
/// position. `y` is the head position; the trail hangs above it.
#[derive(Clone, Debug)]
pub struct Column {
    pub x: u16,
    pub y: f32,
    pub speed: f32,
    pub trail_len: u16,
    pub delay: u16,
}

impl Column {
    pub fn new(x: u16, tuning: &Tuning, rng: &mut StdRng) -> Self {
        let mut col = Self {
            x,
            y: 0.0,
            speed: 1.0,
            trail_len: 1,
            delay: 0,
        };
        col.reset(tuning, rng);
        col
    }

    /// Full state replacement: the column respawns with fresh random
    /// position, speed, trail length, and (bounded mode) start delay.
    pub fn reset(&mut self, tuning: &Tuning, rng: &mut StdRng) {
        match tuning.mode {
            Mode::Bounded => {
                self.y = tuning.start.sample(rng);
                self.speed = tuning.speed.sample(rng);
                self.trail_len = tuning.trail.sample(rng);
                self.delay = tuning.delay.sample(rng);
            }
            Mode::Wrapping => {
                self.y = tuning.start.sample(rng).floor();
                self.speed = 1.0;
                self.trail_len = tuning.trail.sample(rng);
                self.delay = 0;
            }
        }
    }

    /// Advance one tick. A delayed column only counts down; it neither
    /// moves nor draws until the countdown hits zero.
    pub fn update(&mut self, tuning: &Tuning, rng: &mut StdRng) {
        if self.delay > 0 {
            self.delay -= 1;
            return;
        }

        match tuning.mode {
            Mode::Bounded => {
                self.y += self.speed;
                // Head plus trail fully below the screen: respawn.
                if self.y >= tuning.height as f32 + self.trail_len as f32 {
                    self.reset(tuning, rng);
                }
            }
            Mode::Wrapping => {
                self.y = ((self.y as i32 + 1).rem_euclid(tuning.height as i32)) as f32;
                if tuning.chance.sample(rng) < TRAIL_RESEED_CHANCE {
                    self.trail_len = tuning.trail.sample(rng);
                }
            }
        }
    }

    /// Paint the trail onto the frame, then blank exactly one cell past
    /// the tail — that single erase is what removes the previous frame's
    /// tail without clearing the screen. Every rendered cell gets a
    /// freshly sampled glyph; glyphs are never cached per cell.
    pub fn draw(&self, tuning: &Tuning, frame: &mut Frame, glyphs: &[char], rng: &mut StdRng) {
        if self.delay > 0 {
            return;
        }

        let height = tuning.height as i32;
        let head = self.y as i32;

        for i in 0..self.trail_len as i32 {
            let row = match tuning.mode {
                Mode::Bounded => {
                    let row = head - i;
                    if row < 0 || row >= height {
                        continue;
                    }
                    row
                }
                Mode::Wrapping => (head - i).rem_euclid(height),
            };

            let tone = self.tone_at(i as u16, tuning.mode);
            let ch = glyphs[rng.random_range(0..glyphs.len())];
            frame.set(self.x, row as u16, Cell::glyph(ch, tone.color(), tone.bold()));
        }

        let tail = head - self.trail_len as i32;
        let tail_row = match tuning.mode {
            Mode::Bounded => {
                if tail < 0 || tail >= height {
                    return;
                }
                tail
            }
            Mode::Wrapping => tail.rem_euclid(height),
        };
        frame.set(self.x, tail_row as u16, Cell::blank());
    }

    fn tone_at(&self, i: u16, mode: Mode) -> Tone {
        if i == 0 {
            return Tone::Head;
        }
        match mode {
            Mode::Bounded => {
                if i < self.trail_len / 3 {
                    Tone::Mid
                } else {
                    Tone::Dim
                }
            }
            // Wrapping trails are a single tone behind the head.
            Mode::Wrapping => Tone::Mid,
        }
    }
}
