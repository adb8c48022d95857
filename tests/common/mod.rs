//! Shared test infrastructure for keypad-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use keypad_sequencer::{
    CharDisplay, DecoderConfig, KeypadAdc, KeypadSequencer, SEQUENCE_CAPACITY, SequencerConfig,
    ToneGenerator,
};

// ============================================================================
// Keypad voltages
// ============================================================================

/// Reading with no key pressed (ladder pulled up to the reference).
pub const IDLE_MV: u32 = 3300;
pub const LEFT_MV: u32 = 2500;
pub const DOWN_MV: u32 = 1500;
pub const RIGHT_MV: u32 = 100;
pub const UP_MV: u32 = 500;

/// Raw ADC value that scales back to exactly `millivolts` under `config`.
pub fn raw_for(millivolts: u32, config: &DecoderConfig) -> u16 {
    let full_scale = u64::from(config.adc_full_scale);
    let vref = u64::from(config.vref_mv);
    let raw = (u64::from(millivolts) * full_scale).div_ceil(vref);
    raw.min(full_scale) as u16
}

// ============================================================================
// Mock ADC
// ============================================================================

/// Mock keypad ADC returning a settable voltage
pub struct MockAdc {
    config: DecoderConfig,
    millivolts: u32,
    failing_calibrations: u32,
    pub calibrate_calls: u32,
    pub reads: u32,
}

impl MockAdc {
    pub fn new() -> Self {
        Self {
            config: DecoderConfig::default(),
            millivolts: IDLE_MV,
            failing_calibrations: 0,
            calibrate_calls: 0,
            reads: 0,
        }
    }

    /// Makes the first `count` calibration attempts fail.
    pub fn failing_calibrations(mut self, count: u32) -> Self {
        self.failing_calibrations = count;
        self
    }

    pub fn set_millivolts(&mut self, millivolts: u32) {
        self.millivolts = millivolts;
    }
}

impl KeypadAdc for MockAdc {
    type Error = &'static str;

    fn calibrate(&mut self) -> Result<(), Self::Error> {
        self.calibrate_calls += 1;
        if self.failing_calibrations > 0 {
            self.failing_calibrations -= 1;
            return Err("calibration failed");
        }
        Ok(())
    }

    fn read_raw(&mut self) -> u16 {
        self.reads += 1;
        raw_for(self.millivolts, &self.config)
    }
}

// ============================================================================
// Mock Display
// ============================================================================

pub const ROWS: usize = 2;
pub const COLUMNS: usize = 16;

/// Mock 2x16 character display backed by a grid
pub struct MockDisplay {
    grid: [[char; COLUMNS]; ROWS],
    row: usize,
    col: usize,
    pub clears: u32,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            grid: [[' '; COLUMNS]; ROWS],
            row: 0,
            col: 0,
            clears: 0,
        }
    }

    pub fn row_text(&self, row: usize) -> String {
        self.grid[row].iter().collect()
    }

    pub fn char_at(&self, row: usize, col: usize) -> char {
        self.grid[row][col]
    }
}

impl CharDisplay for MockDisplay {
    fn set_cursor(&mut self, row: u8, col: u8) {
        self.row = row as usize;
        self.col = col as usize;
    }

    fn write_char(&mut self, ch: char) {
        if self.row < ROWS && self.col < COLUMNS {
            self.grid[self.row][self.col] = ch;
        }
        self.col += 1;
    }

    fn clear(&mut self) {
        self.grid = [[' '; COLUMNS]; ROWS];
        self.row = 0;
        self.col = 0;
        self.clears += 1;
    }
}

// ============================================================================
// Mock Tone Generator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    Program(u8, u32),
    Start(u8),
    Stop(u8),
}

/// Mock tone generator that records every call
pub struct MockTone {
    pub period: Option<u32>,
    pub running: bool,
    history: heapless::Vec<ToneEvent, 64>,
}

impl MockTone {
    pub fn new() -> Self {
        Self {
            period: None,
            running: false,
            history: heapless::Vec::new(),
        }
    }

    pub fn history(&self) -> &[ToneEvent] {
        &self.history
    }

    /// Periods programmed so far, in order.
    pub fn programmed(&self) -> Vec<u32> {
        self.history
            .iter()
            .filter_map(|event| match event {
                ToneEvent::Program(_, period) => Some(*period),
                _ => None,
            })
            .collect()
    }
}

impl ToneGenerator for MockTone {
    fn program(&mut self, channel: u8, period: u32) {
        self.period = Some(period);
        let _ = self.history.push(ToneEvent::Program(channel, period));
    }

    fn start(&mut self, channel: u8) {
        self.running = true;
        let _ = self.history.push(ToneEvent::Start(channel));
    }

    fn stop(&mut self, channel: u8) {
        self.running = false;
        let _ = self.history.push(ToneEvent::Stop(channel));
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestSequencer = KeypadSequencer<MockAdc, MockDisplay, MockTone, SEQUENCE_CAPACITY>;

/// Sequencer with mock hardware, calibrated and showing the note prompt.
pub fn ready_sequencer() -> TestSequencer {
    let mut sequencer = TestSequencer::new(
        MockAdc::new(),
        MockDisplay::new(),
        MockTone::new(),
        SequencerConfig::default(),
    )
    .unwrap();
    sequencer.calibrate();
    sequencer
}

pub fn run_ticks(sequencer: &mut TestSequencer, ticks: u32) {
    for _ in 0..ticks {
        sequencer.tick().unwrap();
    }
}

/// Holds a key for one settle period, then releases it for one settle period.
pub fn tap(sequencer: &mut TestSequencer, millivolts: u32) {
    sequencer.adc_mut().set_millivolts(millivolts);
    run_ticks(sequencer, 5);
    sequencer.adc_mut().set_millivolts(IDLE_MV);
    run_ticks(sequencer, 5);
}

pub fn tap_times(sequencer: &mut TestSequencer, millivolts: u32, times: u32) {
    for _ in 0..times {
        tap(sequencer, millivolts);
    }
}
