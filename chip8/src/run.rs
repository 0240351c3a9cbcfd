use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use emu8_core::{keymap, Beeper, Config, Cpu, FrameBuffer, Keypad, Rom};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

type HeadlessCpu = Cpu<FrameBuffer, Keypad, Beeper>;

pub struct Options {
    pub rom: PathBuf,
    pub config: Config,
    pub fps: u32,
    pub frames: Option<u64>,
    pub keys: String,
    pub seed: Option<u64>,
}

pub fn run(options: Options) -> anyhow::Result<()> {
    let keys = parse_keys(&options.keys)?;

    let rom = Rom::from_path(&options.rom)
        .with_context(|| format!("unable to load ROM {}", options.rom.display()))?;

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut cpu = Cpu::with_rng(
        FrameBuffer::new(),
        Keypad::new(),
        Beeper::new(),
        options.config,
        rng,
    );
    cpu.boot(rom.bytes())
        .with_context(|| format!("unable to boot ROM {}", options.rom.display()))?;
    info!(rom = %options.rom.display(), bytes = rom.len(), "successfully loaded ROM");

    let result = drive(&mut cpu, &options, keys);
    println!("{}", cpu.display().to_text());
    result
}

/// Maps each character of `keys` onto the keypad.
fn parse_keys(keys: &str) -> anyhow::Result<Vec<u8>> {
    keys.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| keymap(c).ok_or_else(|| anyhow!("{:?} is not on the keypad", c)))
        .collect()
}

/// Cycles the CPU once per frame until the frame limit or a fatal error.
fn drive(cpu: &mut HeadlessCpu, options: &Options, keys: Vec<u8>) -> anyhow::Result<()> {
    let frame_time = Duration::from_secs(1) / options.fps;
    let mut keys = keys.into_iter();
    let mut held: Option<u8> = None;
    let mut last_frame = Instant::now();
    let mut frames: u64 = 0;
    let mut out_of_keys = false;

    while options.frames.map_or(true, |limit| frames < limit) {
        // a typed key is held for one frame
        if let Some(key) = held.take() {
            cpu.keyboard_mut().release(key);
        }
        if cpu.is_paused() {
            match keys.next() {
                Some(key) => {
                    cpu.keyboard_mut().press(key);
                    cpu.deliver_key(key);
                    held = Some(key);
                }
                None if !out_of_keys => {
                    warn!("program is waiting for a key but none are left to type");
                    out_of_keys = true;
                }
                None => {}
            }
        }

        cpu.cycle()
            .with_context(|| format!("emulation halted after {} frames", frames))?;
        frames += 1;

        if cpu.display_mut().take_frame().is_some() {
            debug!(frames, "frame rendered");
        }

        // Handle timing
        let elapsed = last_frame.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }

    info!(frames, "finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!(parse_keys("1, q v").unwrap(), vec![0x1, 0x4, 0xF]);
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_keys("P").is_err());
    }
}
