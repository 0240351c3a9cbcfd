use std::io::Write;

use emu8_core::constants::PROGRAM_START;
use emu8_core::{
    Beeper, Config, Cpu, Error, FrameBuffer, Keyboard, Keypad, Mode, Rom, RomError,
};
use rand::rngs::mock::StepRng;
use tempfile::NamedTempFile;

#[test]
fn test_adds_to_a_register() {
    let mut cpu = Cpu::new(FrameBuffer::new(), Keypad::new(), Beeper::new());
    cpu.load_sprites();
    cpu.load_program(&[0x60, 0x05, 0x70, 0x03]).unwrap();
    cpu.execute_instruction(0x6005).unwrap();
    cpu.execute_instruction(0x7003).unwrap();
    assert_eq!(cpu.registers()[0x0], 8);
    assert_eq!(cpu.pc(), 0x204);
}

#[test]
fn test_runs_a_program_from_a_rom_file() {
    let program = [
        0x60, 0x07, // V0 = 7
        0xF0, 0x29, // I = glyph(V0)
        0x61, 0x05, // V1 = 5
        0x62, 0x03, // V2 = 3
        0xD1, 0x25, // draw at (V1, V2)
        0x12, 0x0A, // spin
    ];
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&program).unwrap();

    let rom = Rom::from_path(file.path()).unwrap();
    let mut cpu = Cpu::new(FrameBuffer::new(), Keypad::new(), Beeper::new());
    cpu.boot(rom.bytes()).unwrap();
    cpu.cycle().unwrap();

    assert_eq!(cpu.pc(), PROGRAM_START + 0xA);
    let frame = cpu.display_mut().take_frame().unwrap();
    // the 7 glyph: F0 10 20 40 40
    assert_eq!(frame[3][5..9], [1, 1, 1, 1]);
    assert_eq!(frame[4][5..9], [0, 0, 0, 1]);
    assert_eq!(frame[5][5..9], [0, 0, 1, 0]);
    assert_eq!(frame[6][5..9], [0, 1, 0, 0]);
    assert_eq!(frame[7][5..9], [0, 1, 0, 0]);
    assert_eq!(cpu.registers()[0xF], 0);
}

#[test]
fn test_missing_rom_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ch8");
    assert!(matches!(
        Rom::from_path(&path),
        Err(RomError::NotFound { .. })
    ));
}

#[test]
fn test_waits_for_a_key_with_borrowed_devices() {
    let mut display = FrameBuffer::new();
    let mut keypad = Keypad::new();
    let mut beeper = Beeper::new();

    {
        let mut cpu = Cpu::with_rng(
            &mut display,
            &mut keypad,
            &mut beeper,
            Config { speed: 4, ..Config::default() },
            StepRng::new(0, 0),
        );
        // F30A: wait for a key into V3; E39E: skip if it is held; 6401; 6502
        cpu.boot(&[0xF3, 0x0A, 0xE3, 0x9E, 0x64, 0x01, 0x65, 0x02])
            .unwrap();
        cpu.cycle().unwrap();
        assert_eq!(cpu.mode(), Mode::AwaitingKey { register: 0x3 });

        cpu.keyboard_mut().press(0xC);
        assert!(cpu.deliver_key(0xC));
        cpu.cycle().unwrap();

        assert_eq!(cpu.registers()[0x3], 0xC);
        assert_eq!(cpu.registers()[0x4], 0x0);
        assert_eq!(cpu.registers()[0x5], 0x2);
    }

    // the devices outlive the CPU and keep their state
    assert!(display.take_frame().is_some());
    assert!(!beeper.is_playing());
    assert!(keypad.is_key_pressed(0xC));
}

#[test]
fn test_halts_on_stack_underflow() {
    let mut cpu = Cpu::new(FrameBuffer::new(), Keypad::new(), Beeper::new());
    // 6001 00EE
    cpu.boot(&[0x60, 0x01, 0x00, 0xEE]).unwrap();
    assert_eq!(cpu.cycle(), Err(Error::StackUnderflow { pc: 0x202 }));
    assert_eq!(cpu.registers()[0x0], 0x1);
}

#[test]
fn test_reboot_starts_from_scratch() {
    let mut cpu = Cpu::new(FrameBuffer::new(), Keypad::new(), Beeper::new());
    cpu.boot(&[0x6A, 0x42, 0x22, 0x00]).unwrap();
    cpu.cycle().unwrap();
    assert_eq!(cpu.registers()[0xA], 0x42);

    cpu.boot(&[0x6B, 0x01]).unwrap();
    assert_eq!(cpu.registers()[0xA], 0x0);
    assert_eq!(cpu.pc(), PROGRAM_START);
    assert_eq!(cpu.stack_depth(), 0);
    assert_eq!(cpu.memory().as_bytes()[0x202..0x204], [0x0, 0x0]);
}
