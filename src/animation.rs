//! Per-frame animation state for the triangle stage.
//!
//! Everything here advances by a fixed amount per frame rather than per second; the frame loop
//! sleeps a fixed time after every frame, which keeps the speed roughly constant.

use glam::{Vec3, Vec4};

/// A value that moves back and forth between two bounds by a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Either `1.0` or `-1.0`.
    pub direction: f32,
}

impl Oscillator {
    /// Creates an oscillator starting at `value` and moving towards `max`. `min` must not be
    /// greater than `max`.
    pub fn new(value: f32, min: f32, max: f32, step: f32) -> Self {
        debug_assert!(min <= max, "oscillator bounds reversed: {min} > {max}");
        Self {
            value: value.clamp(min, max),
            min,
            max,
            step,
            direction: 1.0,
        }
    }

    /// Moves one step, turning around once a bound is reached.
    pub fn advance(&mut self) -> f32 {
        self.value += self.step * self.direction;
        if self.value >= self.max {
            self.value = self.max;
            self.direction = -1.0;
        } else if self.value <= self.min {
            self.value = self.min;
            self.direction = 1.0;
        }
        self.value
    }
}

/// Converts a color from HSV to RGB. `h` wraps around, `s` and `v` are in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Vec3::new(r + m, g + m, b + m)
}

/// A color that slowly walks around the hue circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCycle {
    /// Current hue in `[0, 1)`.
    pub hue: f32,
    pub hue_step: f32,
    pub saturation: f32,
    pub value: f32,
}

impl ColorCycle {
    pub fn new(hue: f32, hue_step: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue: hue.rem_euclid(1.0),
            hue_step,
            saturation,
            value,
        }
    }

    pub fn advance(&mut self) {
        self.hue = (self.hue + self.hue_step).rem_euclid(1.0);
    }

    /// The current color, fully opaque.
    pub fn color(&self) -> Vec4 {
        hsv_to_rgb(self.hue, self.saturation, self.value).extend(1.0)
    }

    /// The color on the opposite side of the hue circle, at the given brightness.
    pub fn complement(&self, value: f32) -> Vec4 {
        hsv_to_rgb(self.hue + 0.5, self.saturation, value).extend(1.0)
    }
}

/// Animation state of the triangle stage: a horizontally bouncing triangle over a background
/// that cycles through the hues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleAnimation {
    pub offset: Oscillator,
    pub background: ColorCycle,
}

impl Default for TriangleAnimation {
    fn default() -> Self {
        Self {
            offset: Oscillator::new(0.0, -0.7, 0.7, 0.005),
            background: ColorCycle::new(0.0, 0.002, 0.6, 0.35),
        }
    }
}

impl TriangleAnimation {
    pub fn advance(&mut self) {
        self.offset.advance();
        self.background.advance();
    }

    pub fn clear_color(&self) -> Vec4 {
        self.background.color()
    }

    pub fn triangle_color(&self) -> Vec4 {
        self.background.complement(1.0)
    }
}
