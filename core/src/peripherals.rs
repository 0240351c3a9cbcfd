//! The devices a [`Cpu`](crate::Cpu) talks to.
//!
//! The CPU only ever calls into these traits; how pixels reach a screen, keys
//! are read or tones are synthesised is up to the host. Each trait is also
//! implemented for `&mut T` so a host can lend its devices to a CPU and keep
//! ownership of them.

/// A 64x32 monochrome display that sprites are XORed onto.
pub trait Display {
    /// Toggles the pixel at (x, y), wrapping coordinates past the edges.
    /// Returns true if a lit pixel was erased.
    fn set_pixel(&mut self, x: usize, y: usize) -> bool;

    /// Turns every pixel off.
    fn clear(&mut self);

    /// Presents the current frame.
    fn render(&mut self);
}

/// The 16-key hexadecimal keypad.
pub trait Keyboard {
    /// Whether key 0x0..=0xF is currently held down.
    fn is_key_pressed(&self, key: u8) -> bool;
}

/// A square-wave tone generator.
///
/// Both calls are made every frame, so implementations must tolerate being
/// asked to play while already playing and to stop while already stopped.
pub trait Speaker {
    fn play(&mut self, frequency: f32);
    fn stop(&mut self);
}

impl<T: Display + ?Sized> Display for &mut T {
    fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        (**self).set_pixel(x, y)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn render(&mut self) {
        (**self).render()
    }
}

impl<T: Keyboard + ?Sized> Keyboard for &mut T {
    fn is_key_pressed(&self, key: u8) -> bool {
        (**self).is_key_pressed(key)
    }
}

impl<T: Speaker + ?Sized> Speaker for &mut T {
    fn play(&mut self, frequency: f32) {
        (**self).play(frequency)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
