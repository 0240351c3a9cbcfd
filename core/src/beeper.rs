use tracing::info;

use crate::peripherals::Speaker;

/// # Beeper
/// A [`Speaker`] that tracks whether its tone is on and logs each change.
///
/// Repeated `play` or `stop` calls are no-ops, so it can be driven directly
/// by the once-per-frame sound update.
#[derive(Debug, Default, Clone)]
pub struct Beeper {
    frequency: Option<f32>,
    starts: usize,
}

impl Beeper {
    pub fn new() -> Self {
        Beeper::default()
    }

    pub fn is_playing(&self) -> bool {
        self.frequency.is_some()
    }

    /// The frequency of the tone currently playing.
    pub fn frequency(&self) -> Option<f32> {
        self.frequency
    }

    /// How many times the tone has been switched on.
    pub fn starts(&self) -> usize {
        self.starts
    }
}

impl Speaker for Beeper {
    fn play(&mut self, frequency: f32) {
        if self.frequency != Some(frequency) {
            info!(frequency, "tone on");
            self.frequency = Some(frequency);
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        if self.frequency.take().is_some() {
            info!("tone off");
        }
    }
}
