//! Timer / divider unit.
//!
//! Both counters are driven by batches of T-cycles handed over by the bus
//! after every instruction. DIV ticks at a fixed 16384 Hz; TIMA ticks at the
//! rate selected by TAC[1:0] while TAC bit 2 is set.

use crate::cpu::Interrupt;

/// T-cycles per DIV increment (4194304 / 16384).
const DIV_PERIOD: i32 = 256;

pub(super) struct Timer {
    /// DIV (FF04).
    pub(super) div: u8,
    /// TIMA (FF05).
    pub(super) tima: u8,
    /// TMA (FF06).
    pub(super) tma: u8,
    /// TAC (FF07), lower 3 bits.
    pub(super) tac: u8,
    div_countdown: i32,
    tima_countdown: i32,
    /// TIMA overflowed during the previous update; the reload from TMA and
    /// the interrupt request happen at the start of the next one.
    overflow: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            div: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            div_countdown: DIV_PERIOD,
            tima_countdown: tima_period(0),
            overflow: false,
        }
    }

    /// DMG power-on state: DIV reads back as 0xAB at PC=0x0100.
    pub(super) fn init_dmg(&mut self) {
        *self = Self::new();
        self.div = 0xAB;
    }

    #[inline]
    pub(super) fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    pub(super) fn read_tac(&self) -> u8 {
        self.tac | 0b1111_1000
    }

    pub(super) fn write_div(&mut self) {
        self.div = 0;
        self.div_countdown = DIV_PERIOD;
    }

    pub(super) fn write_tac(&mut self, value: u8) {
        let old_period = tima_period(self.tac);
        self.tac = value & 0x07;
        let new_period = tima_period(self.tac);
        if new_period != old_period {
            self.tima_countdown = new_period;
        }
    }

    /// Advance both counters by `cycles` T-cycles, requesting INT $50 in
    /// `if_reg` one update after TIMA wraps.
    pub(super) fn update(&mut self, cycles: u32, if_reg: &mut u8) {
        if self.overflow {
            self.overflow = false;
            self.tima = self.tma;
            *if_reg |= Interrupt::TIMER.bits();
        }

        let cycles = cycles as i32;

        self.div_countdown -= cycles;
        while self.div_countdown <= 0 {
            self.div_countdown += DIV_PERIOD;
            self.div = self.div.wrapping_add(1);
        }

        if !self.enabled() {
            return;
        }

        self.tima_countdown -= cycles;
        // Stop counting once an overflow is pending; any leftover countdown
        // is consumed after the reload.
        while self.tima_countdown <= 0 && !self.overflow {
            self.tima_countdown += tima_period(self.tac);
            let (next, overflow) = self.tima.overflowing_add(1);
            self.tima = next;
            self.overflow = overflow;
        }
    }
}

/// T-cycles per TIMA increment for the rate selected in TAC[1:0].
fn tima_period(tac: u8) -> i32 {
    match tac & 0x03 {
        0x00 => 1024,
        0x01 => 16,
        0x02 => 64,
        _ => 256,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tima_counts_at_selected_rate() {
        let mut timer = Timer::new();
        let mut if_reg = 0;
        timer.write_tac(0x05);

        timer.update(15, &mut if_reg);
        assert_eq!(timer.tima, 0);
        timer.update(1, &mut if_reg);
        assert_eq!(timer.tima, 1);

        timer.write_tac(0x04);
        timer.update(1023, &mut if_reg);
        assert_eq!(timer.tima, 1);
        timer.update(1, &mut if_reg);
        assert_eq!(timer.tima, 2);
        assert_eq!(if_reg, 0);
    }

    #[test]
    fn disabled_timer_only_advances_div() {
        let mut timer = Timer::new();
        let mut if_reg = 0;
        timer.write_tac(0x01);

        timer.update(DIV_PERIOD as u32 * 3, &mut if_reg);

        assert_eq!(timer.div, 3);
        assert_eq!(timer.tima, 0);
    }

    #[test]
    fn overflow_interrupt_is_deferred_by_one_update() {
        let mut timer = Timer::new();
        let mut if_reg = 0;
        timer.tma = 0x80;
        timer.tima = 0xFF;
        timer.write_tac(0x05);

        timer.update(16, &mut if_reg);
        assert_eq!(timer.tima, 0x00);
        assert_eq!(if_reg, 0);

        timer.update(4, &mut if_reg);
        assert_eq!(timer.tima, 0x80);
        assert_eq!(if_reg, Interrupt::TIMER.bits());
    }

    #[test]
    fn counting_pauses_while_overflow_is_pending() {
        let mut timer = Timer::new();
        let mut if_reg = 0;
        timer.tma = 0x10;
        timer.tima = 0xFF;
        timer.write_tac(0x05);

        // Enough cycles for three increments, but the first one overflows.
        timer.update(48, &mut if_reg);
        assert_eq!(timer.tima, 0x00);

        // Reload first, then the carried-over countdown catches up.
        timer.update(0, &mut if_reg);
        assert_eq!(timer.tima, 0x12);
    }

    #[test]
    fn tac_reads_with_upper_bits_set() {
        let mut timer = Timer::new();
        timer.write_tac(0xFF);
        assert_eq!(timer.read_tac(), 0xFF);
        timer.write_tac(0x00);
        assert_eq!(timer.read_tac(), 0xF8);
    }
}
