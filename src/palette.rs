// Copyright (c) 2026 kanafall developers

use crossterm::style::Color;

/// Brightness band of a trail position. The head is the leading glyph,
/// the mid band sits just behind it, the dim band is the fading tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Head,
    Mid,
    Dim,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Tone::Head => Color::White,
            Tone::Mid => Color::Green,
            Tone::Dim => Color::DarkGreen,
        }
    }

    pub fn bold(self) -> bool {
        matches!(self, Tone::Head)
    }
}
