//! Keypad sequencer with lifecycle management and the control loop.
//!
//! Provides [`KeypadSequencer`] which owns the keypad ADC, the character
//! display and the tone generator, and runs the [`InputDecoder`] and the
//! [`Composer`] once per tick. Also defines the [`CharDisplay`] and
//! [`ToneGenerator`] traits for hardware abstraction.

use crate::command::{Effect, Effects};
use crate::composer::Composer;
use crate::config::SequencerConfig;
use crate::decoder::{InputDecoder, KeypadAdc};
use crate::time::TickTimer;
use crate::types::{KeySignal, Lifecycle, SequencerError};

/// Trait for abstracting a character display.
///
/// Rows and columns are zero based. Handle any hardware errors internally -
/// these methods cannot fail.
pub trait CharDisplay {
    /// Moves the write position to (`row`, `col`).
    fn set_cursor(&mut self, row: u8, col: u8);

    /// Writes one character at the write position and advances it.
    fn write_char(&mut self, ch: char);

    /// Writes a string at the write position.
    fn write_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.write_char(ch);
        }
    }

    /// Blanks the display and homes the write position.
    fn clear(&mut self);
}

/// Trait for abstracting a square-wave tone generator.
///
/// `period` is in hardware timer ticks.
pub trait ToneGenerator {
    /// Loads a new period. Takes effect immediately if the channel is running.
    fn program(&mut self, channel: u8, period: u32);

    fn start(&mut self, channel: u8);

    fn stop(&mut self, channel: u8);
}

/// Drives the keypad decoder and the composer from a fixed-period tick.
///
/// # Type Parameters
/// * `A` - Keypad ADC implementation type
/// * `D` - Display implementation type
/// * `G` - Tone generator implementation type
/// * `N` - Sequence capacity
pub struct KeypadSequencer<A: KeypadAdc, D: CharDisplay, G: ToneGenerator, const N: usize> {
    adc: A,
    display: D,
    tone: G,
    config: SequencerConfig,
    decoder: InputDecoder,
    composer: Composer<N>,
    signal: KeySignal,
    lifecycle: Lifecycle,
}

impl<A: KeypadAdc, D: CharDisplay, G: ToneGenerator, const N: usize> KeypadSequencer<A, D, G, N> {
    /// Creates an uncalibrated sequencer. Nothing is written to the hardware.
    ///
    /// # Errors
    /// * `Config` - The decoder configuration is invalid
    pub fn new(
        adc: A,
        display: D,
        tone: G,
        config: SequencerConfig,
    ) -> Result<Self, SequencerError> {
        let decoder = InputDecoder::new(config.decoder)?;

        Ok(Self {
            adc,
            display,
            tone,
            config,
            decoder,
            composer: Composer::new(),
            signal: KeySignal::None,
            lifecycle: Lifecycle::Uncalibrated,
        })
    }

    /// Calibrates the ADC, retrying until it succeeds, then draws the initial screen.
    ///
    /// Blocks forever if the hardware never calibrates. Returns the number of
    /// attempts that were needed. Calling it again once running is a no-op.
    pub fn calibrate(&mut self) -> u32 {
        if self.lifecycle == Lifecycle::Running {
            return 0;
        }

        let mut attempts: u32 = 1;
        while self.adc.calibrate().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("ADC calibration failed (attempt {}), retrying", attempts);
            attempts = attempts.saturating_add(1);
        }

        let effects = self.composer.startup();
        self.apply(&effects);
        self.lifecycle = Lifecycle::Running;

        #[cfg(feature = "defmt")]
        defmt::info!("calibrated after {} attempt(s), ready", attempts);

        attempts
    }

    /// Runs one control-loop iteration: decoder, then composer.
    ///
    /// The signal produced by the decoder is always consumed by the end of the
    /// tick, whether or not the composer acted on it.
    ///
    /// # Errors
    /// * `InvalidState` - [`calibrate`](Self::calibrate) has not completed
    pub fn tick(&mut self) -> Result<(), SequencerError> {
        if self.lifecycle != Lifecycle::Running {
            return Err(SequencerError::InvalidState {
                expected: "Running",
                actual: self.lifecycle,
            });
        }

        let pressed = self.decoder.poll(&mut self.adc);
        if pressed.is_key() {
            self.signal = pressed;
        }

        let signal = self.signal.take();
        let effects = self.composer.step(signal);
        self.apply(&effects);
        Ok(())
    }

    /// Calibrates, then runs the control loop forever at the configured period.
    pub fn run<T: TickTimer>(mut self, timer: &mut T) -> ! {
        self.calibrate();
        let period = self.config.tick_period_ms;
        timer.wait_period(period);

        loop {
            // Cannot fail once calibrated.
            let _ = self.tick();
            timer.wait_period(period);
        }
    }

    fn apply(&mut self, effects: &Effects) {
        let channel = self.config.tone_channel;
        for effect in effects {
            match *effect {
                Effect::ClearDisplay => self.display.clear(),
                Effect::WriteStr { row, col, text } => {
                    self.display.set_cursor(row, col);
                    self.display.write_str(text);
                }
                Effect::WriteChar { row, col, ch } => {
                    self.display.set_cursor(row, col);
                    self.display.write_char(ch);
                }
                Effect::ProgramTone { period } => self.tone.program(channel, period),
                Effect::StartTone => self.tone.start(channel),
                Effect::StopTone => self.tone.stop(channel),
            }
        }
    }

    /// Returns the lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn composer(&self) -> &Composer<N> {
        &self.composer
    }

    pub fn decoder(&self) -> &InputDecoder {
        &self.decoder
    }

    /// Signal waiting for the composer. `None` between ticks.
    pub fn pending_signal(&self) -> KeySignal {
        self.signal
    }

    /// The configuration the sequencer was built with.
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn adc(&self) -> &A {
        &self.adc
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn tone(&self) -> &G {
        &self.tone
    }

    /// Releases the hardware.
    pub fn into_parts(self) -> (A, D, G) {
        (self.adc, self.display, self.tone)
    }
}
