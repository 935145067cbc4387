use bitflags::bitflags;

use crate::cpu::Interrupt;

use super::{reg, GameBoyBus};

/// The eight DMG buttons.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
    Select,
}

bitflags! {
    /// Held buttons. The low nibble is the d-pad group and the high nibble
    /// the action group, each in P1 bit order.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(super) struct Buttons: u8 {
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const SELECT = 1 << 6;
        const START = 1 << 7;
    }
}

impl From<Button> for Buttons {
    fn from(button: Button) -> Self {
        match button {
            Button::Right => Buttons::RIGHT,
            Button::Left => Buttons::LEFT,
            Button::Up => Buttons::UP,
            Button::Down => Buttons::DOWN,
            Button::A => Buttons::A,
            Button::B => Buttons::B,
            Button::Select => Buttons::SELECT,
            Button::Start => Buttons::START,
        }
    }
}

#[derive(Default)]
pub(super) struct Joypad {
    /// P1 bits 5 (action group) and 4 (d-pad group); 0 selects.
    pub(super) select: u8,
    pub(super) held: Buttons,
}

impl Joypad {
    /// Merged P1 value for the current selection. Pressed buttons read as 0.
    pub(super) fn state(&self) -> u8 {
        let select = self.select & 0x30;
        let mut low = 0x0F;
        if select & 0x10 == 0 {
            low &= !self.held.bits() & 0x0F;
        }
        if select & 0x20 == 0 {
            low &= !(self.held.bits() >> 4) & 0x0F;
        }
        0xC0 | select | low
    }
}

impl GameBoyBus {
    pub(super) fn write_joyp(&mut self, value: u8) {
        // Only the select bits are writable; the low nibble is recomputed.
        self.joypad.select = value & 0x30;
        self.io[reg::JOYP] = self.joypad.state();
    }

    pub(in super::super) fn set_button(&mut self, button: Button, pressed: bool) {
        let flag = Buttons::from(button);
        self.joypad.held.set(flag, pressed);
        self.io[reg::JOYP] = self.joypad.state();
        if pressed {
            self.if_reg |= Interrupt::JOYPAD.bits();
        }
    }
}
