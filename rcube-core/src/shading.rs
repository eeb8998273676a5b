/// Added to a depth before it is turned into a channel value
pub const SHADE_OFFSET: f32 = 80.0;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// Channel value for a depth: deeper (larger z) is darker.
///
/// The depth is offset, truncated toward zero and clamped to `0..=255`
/// before being inverted, so any input (including NaN and infinities)
/// yields a valid channel.
pub fn shade_level(depth: f32) -> u8 {
    // `as` saturates on overflow and maps NaN to 0.
    let col = ((depth + SHADE_OFFSET) as i32).clamp(0, 255);
    (255 - col) as u8
}

pub fn shade(depth: f32) -> Rgb {
    Rgb::grey(shade_level(depth))
}
