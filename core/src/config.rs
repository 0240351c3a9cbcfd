use crate::constants::{DEFAULT_SPEED, TONE_FREQUENCY};

/// Tunables for a [`Cpu`](crate::Cpu).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Instructions executed per call to `cycle`.
    pub speed: usize,
    /// Frequency handed to the speaker while the sound timer runs.
    pub tone_frequency: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            speed: DEFAULT_SPEED,
            tone_frequency: TONE_FREQUENCY,
        }
    }
}
