//! Resistive keypad decoder.
//!
//! All four keys share one analog input through a resistor ladder. The
//! [`InputDecoder`] averages a burst of raw samples, converts the result to
//! millivolts, and runs a small press/hold state machine over the reading:
//!
//! - From released, a reading inside a key's press band presses that key and
//!   emits it as a [`KeySignal`].
//! - A held key releases only once a reading leaves its (wider) hold band.
//! - There is no direct transition between two held keys.
//!
//! Classification runs at most once every `settle_ticks` ticks, which together
//! with the hysteresis gives one signal per physical press.

use crate::config::DecoderConfig;
use crate::types::{ConfigError, KeySignal};

/// Trait for abstracting the keypad's analog input.
///
/// Implement this for your ADC peripheral. Both operations block.
pub trait KeypadAdc {
    /// Calibration failure reported by the hardware.
    type Error;

    /// Runs the converter's self-calibration.
    fn calibrate(&mut self) -> Result<(), Self::Error>;

    /// Performs one single-shot conversion and returns the raw result.
    fn read_raw(&mut self) -> u16;
}

/// Averages `config.samples` raw conversions and scales the mean to millivolts.
pub fn measure_millivolts<A: KeypadAdc>(adc: &mut A, config: &DecoderConfig) -> u32 {
    let samples = u32::from(config.samples.max(1));
    let mut sum: u32 = 0;
    for _ in 0..samples {
        sum += u32::from(adc.read_raw());
    }
    let mean = u64::from(sum / samples);

    let millivolts = mean * u64::from(config.vref_mv) / u64::from(config.adc_full_scale.max(1));
    u32::try_from(millivolts).unwrap_or(u32::MAX)
}

/// Debouncing decoder for the resistive keypad.
#[derive(Debug, Clone)]
pub struct InputDecoder {
    config: DecoderConfig,
    held: KeySignal,
    delay: u8,
    last_millivolts: Option<u32>,
}

impl InputDecoder {
    /// Creates a decoder with no key held.
    ///
    /// The first call to [`poll`](Self::poll) classifies immediately.
    ///
    /// # Errors
    /// Returns the first problem found by [`DecoderConfig::validate`].
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            held: KeySignal::None,
            delay: 0,
            last_millivolts: None,
        })
    }

    /// Advances the settle countdown by one tick and, when it expires, measures
    /// and classifies the keypad voltage.
    ///
    /// Returns the newly pressed key, or `KeySignal::None` when nothing was pressed
    /// this tick (including ticks that only release a key).
    pub fn poll<A: KeypadAdc>(&mut self, adc: &mut A) -> KeySignal {
        self.delay = self.delay.saturating_sub(1);
        if self.delay > 0 {
            return KeySignal::None;
        }

        let millivolts = measure_millivolts(adc, &self.config);
        self.delay = self.config.settle_ticks;
        self.classify(millivolts)
    }

    /// Runs one step of the press/hold state machine on a millivolt reading.
    ///
    /// Ignores the settle countdown.
    pub fn classify(&mut self, millivolts: u32) -> KeySignal {
        self.last_millivolts = Some(millivolts);

        if self.held.is_key() {
            let held = self.held;
            let released = self
                .config
                .bands
                .iter()
                .find(|band| band.key == held)
                .is_none_or(|band| !band.hold.contains(millivolts));

            if released {
                #[cfg(feature = "defmt")]
                defmt::trace!("key {} released at {} mV", held, millivolts);
                self.held = KeySignal::None;
            }
            return KeySignal::None;
        }

        match self
            .config
            .bands
            .iter()
            .find(|band| band.press.contains(millivolts))
        {
            Some(band) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("key {} pressed at {} mV", band.key, millivolts);
                self.held = band.key;
                band.key
            }
            None => KeySignal::None,
        }
    }

    /// The key currently considered held.
    pub fn held(&self) -> KeySignal {
        self.held
    }

    /// Ticks left until the next classification.
    pub fn settle_remaining(&self) -> u8 {
        self.delay
    }

    /// The most recently classified reading, if any.
    pub fn last_millivolts(&self) -> Option<u32> {
        self.last_millivolts
    }

    /// The validated configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}
