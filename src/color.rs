use std::ops::{AddAssign, Mul};

const MAX_SAMPLE_VALUE: f32 = 255.0;

const LUMA_RED_WEIGHT: f32 = 0.299;
const LUMA_GREEN_WEIGHT: f32 = 0.587;
const LUMA_BLUE_WEIGHT: f32 = 0.114;

/// A single pixel. Inside the pipeline every channel is a normalized `f32`
/// in `[0, 1]`; 8-bit samples only exist at the file boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RGBColorFormat<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
}

impl<T: Copy> RGBColorFormat<T> {
    pub fn new(red: T, green: T, blue: T) -> Self {
        RGBColorFormat { red, green, blue }
    }

    pub fn gray(value: T) -> Self {
        RGBColorFormat {
            red: value,
            green: value,
            blue: value,
        }
    }

    pub fn map<F: Fn(T) -> T>(self, f: F) -> Self {
        RGBColorFormat {
            red: f(self.red),
            green: f(self.green),
            blue: f(self.blue),
        }
    }
}

impl RGBColorFormat<f32> {
    pub fn black() -> Self {
        Self::gray(0.0)
    }

    pub fn white() -> Self {
        Self::gray(1.0)
    }

    /// Builds a pixel from the blue, green, red byte order used on disk.
    pub fn from_bgr_samples(samples: [u8; 3]) -> Self {
        RGBColorFormat {
            red: channel_from_sample(samples[2]),
            green: channel_from_sample(samples[1]),
            blue: channel_from_sample(samples[0]),
        }
    }

    pub fn to_bgr_samples(&self) -> [u8; 3] {
        [
            channel_to_sample(self.blue),
            channel_to_sample(self.green),
            channel_to_sample(self.red),
        ]
    }

    pub fn luma(&self) -> f32 {
        LUMA_RED_WEIGHT * self.red + LUMA_GREEN_WEIGHT * self.green + LUMA_BLUE_WEIGHT * self.blue
    }

    pub fn clamped(self) -> Self {
        self.map(clamp_channel)
    }
}

impl AddAssign for RGBColorFormat<f32> {
    fn add_assign(&mut self, rhs: Self) {
        self.red += rhs.red;
        self.green += rhs.green;
        self.blue += rhs.blue;
    }
}

impl Mul<f32> for RGBColorFormat<f32> {
    type Output = Self;

    fn mul(self, weight: f32) -> Self {
        self.map(|channel| channel * weight)
    }
}

pub fn clamp_channel(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

pub fn channel_from_sample(sample: u8) -> f32 {
    sample as f32 / MAX_SAMPLE_VALUE
}

/// Rounds to the nearest 8-bit level; out-of-range values saturate.
pub fn channel_to_sample(value: f32) -> u8 {
    (clamp_channel(value) * MAX_SAMPLE_VALUE).round() as u8
}

/// Snaps a channel onto the grid of values an 8-bit sample can represent.
pub fn quantize_channel(value: f32) -> f32 {
    channel_from_sample(channel_to_sample(value))
}
