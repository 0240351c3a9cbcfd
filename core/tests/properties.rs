use emu8_core::constants::{MAX_PROGRAM_SIZE, PROGRAM_START};
use emu8_core::{Beeper, Config, Cpu, Error, FrameBuffer, Keypad};
use proptest::prelude::*;
use rand::rngs::mock::StepRng;

type TestCpu = Cpu<FrameBuffer, Keypad, Beeper, StepRng>;

fn cpu() -> TestCpu {
    let mut cpu = Cpu::with_rng(
        FrameBuffer::new(),
        Keypad::new(),
        Beeper::new(),
        Config::default(),
        StepRng::new(0, 1),
    );
    cpu.load_sprites();
    cpu
}

fn exec(cpu: &mut TestCpu, op: u16) {
    cpu.execute_instruction(op).unwrap();
}

/// `6xkk`
fn set(cpu: &mut TestCpu, x: usize, value: u8) {
    exec(cpu, 0x6000 | (x as u16) << 8 | u16::from(value));
}

/// `1nnn`
fn jump(cpu: &mut TestCpu, addr: u16) {
    exec(cpu, 0x1000 | addr);
}

/// Two distinct general purpose registers, excluding VF.
fn register_pair() -> impl Strategy<Value = (usize, usize)> {
    (0usize..0xF, 0usize..0xF).prop_filter("distinct registers", |(x, y)| x != y)
}

/// An even address in program memory with room for a following instruction.
fn program_address() -> impl Strategy<Value = u16> {
    (PROGRAM_START / 2..0x7FE).prop_map(|half| half * 2)
}

proptest! {
    #[test]
    fn test_8xy4_adds_with_carry((x, y) in register_pair(), a: u8, b: u8) {
        let mut cpu = cpu();
        set(&mut cpu, x, a);
        set(&mut cpu, y, b);
        exec(&mut cpu, 0x8004 | (x as u16) << 8 | (y as u16) << 4);
        let sum = u16::from(a) + u16::from(b);
        prop_assert_eq!(cpu.registers()[x], (sum % 256) as u8);
        prop_assert_eq!(cpu.registers()[0xF], u8::from(sum > 255));
    }

    #[test]
    fn test_8xy5_subtracts_with_borrow((x, y) in register_pair(), a: u8, b: u8) {
        let mut cpu = cpu();
        set(&mut cpu, x, a);
        set(&mut cpu, y, b);
        exec(&mut cpu, 0x8005 | (x as u16) << 8 | (y as u16) << 4);
        prop_assert_eq!(cpu.registers()[x], a.wrapping_sub(b));
        prop_assert_eq!(cpu.registers()[0xF], u8::from(a > b));
    }

    #[test]
    fn test_call_then_return_is_straight_line(start in program_address(), target in program_address()) {
        let mut cpu = cpu();
        jump(&mut cpu, start);
        exec(&mut cpu, 0x2000 | target);
        prop_assert_eq!(cpu.pc(), target);
        exec(&mut cpu, 0x00EE);
        prop_assert_eq!(cpu.pc(), start + 2);
        prop_assert_eq!(cpu.stack_depth(), 0);
    }

    #[test]
    fn test_skips_advance_by_four_or_two((x, y) in register_pair(), a: u8, b: u8, kk: u8, start in program_address()) {
        let skips = [
            (0x3000 | (x as u16) << 8 | u16::from(kk), a == kk),
            (0x4000 | (x as u16) << 8 | u16::from(kk), a != kk),
            (0x5000 | (x as u16) << 8 | (y as u16) << 4, a == b),
            (0x9000 | (x as u16) << 8 | (y as u16) << 4, a != b),
        ];
        for (op, taken) in skips.iter() {
            let mut cpu = cpu();
            set(&mut cpu, x, a);
            set(&mut cpu, y, b);
            jump(&mut cpu, start);
            exec(&mut cpu, *op);
            let expected = if *taken { start + 4 } else { start + 2 };
            prop_assert_eq!(cpu.pc(), expected, "opcode {:#06X}", op);
        }
    }

    #[test]
    fn test_fx33_stores_decimal_digits(value: u8, address in 0x300u16..0xFFD) {
        let mut cpu = cpu();
        set(&mut cpu, 0x3, value);
        exec(&mut cpu, 0xA000 | address);
        exec(&mut cpu, 0xF333);
        let start = address as usize;
        prop_assert_eq!(
            &cpu.memory().as_bytes()[start..start + 3],
            &[value / 100, value / 10 % 10, value % 10][..]
        );
    }

    #[test]
    fn test_fx55_then_fx65_restores_registers(values: [u8; 15], x in 0usize..0xF, address in 0x300u16..0xFF0) {
        let mut cpu = cpu();
        for (register, value) in values.iter().enumerate() {
            set(&mut cpu, register, *value);
        }
        exec(&mut cpu, 0xA000 | address);
        let before = *cpu.registers();
        exec(&mut cpu, 0xF055 | (x as u16) << 8);
        exec(&mut cpu, 0xF065 | (x as u16) << 8);
        prop_assert_eq!(*cpu.registers(), before);

        for register in 0..=x {
            set(&mut cpu, register, values[register].wrapping_add(1));
        }
        exec(&mut cpu, 0xF065 | (x as u16) << 8);
        prop_assert_eq!(*cpu.registers(), before);
    }

    #[test]
    fn test_oversized_programs_are_rejected(extra in 1usize..256) {
        let mut cpu = cpu();
        let program = vec![0xFF; MAX_PROGRAM_SIZE + extra];
        prop_assert_eq!(
            cpu.load_program(&program),
            Err(Error::ProgramTooLarge { size: MAX_PROGRAM_SIZE + extra, capacity: MAX_PROGRAM_SIZE })
        );
        prop_assert!(cpu.memory().as_bytes()[PROGRAM_START as usize..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_redrawing_a_sprite_erases_it(glyph in 0u8..16, x: u8, y: u8) {
        let mut cpu = cpu();
        set(&mut cpu, 0x0, x);
        set(&mut cpu, 0x1, y);
        set(&mut cpu, 0x2, glyph);
        exec(&mut cpu, 0xF229);
        exec(&mut cpu, 0xD015);
        prop_assert_eq!(cpu.registers()[0xF], 0);
        exec(&mut cpu, 0xD015);
        prop_assert_eq!(cpu.registers()[0xF], 1);
        prop_assert!(cpu.display().pixels().iter().flatten().all(|&p| p == 0));
    }
}
