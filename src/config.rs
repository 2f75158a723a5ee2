// Copyright (c) 2026 kanafall developers

use std::time::Duration;

use clap::Parser;

/// Vertical motion variant. The two behaviors are mutually exclusive and
/// selected explicitly; nothing is shared between them at runtime beyond
/// the column model itself.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Fractional speeds, staggered starts, columns respawn after
    /// falling off the bottom.
    #[value(name = "bounded")]
    Bounded,
    /// Unit speed, every column active, heads wrap modulo the screen
    /// height.
    #[value(name = "wrapping")]
    Wrapping,
}

impl Mode {
    /// Fixed wall-clock interval between frames: ~30 fps bounded,
    /// ~13 fps wrapping.
    pub fn frame_interval(self) -> Duration {
        match self {
            Mode::Bounded => Duration::from_millis(33),
            Mode::Wrapping => Duration::from_millis(75),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "kanafall", version, about = "Classic katakana digital rain for the terminal")]
pub struct Args {
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        default_value_t = Mode::Bounded,
        help = "Rain variant (bounded or wrapping vertical motion)"
    )]
    pub mode: Mode,

    #[arg(
        long = "seed",
        help = "Seed the random source for a reproducible run (default: OS entropy)"
    )]
    pub seed: Option<u64>,
}
