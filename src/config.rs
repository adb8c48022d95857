//! Decoder thresholds and loop configuration.

use crate::time::TICK_PERIOD_MS;
use crate::types::{ConfigError, KeySignal};

/// An inclusive millivolt range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band {
    pub low: u32,
    pub high: u32,
}

impl Band {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    #[inline]
    pub const fn contains(&self, millivolts: u32) -> bool {
        self.low <= millivolts && millivolts <= self.high
    }

    #[inline]
    const fn contains_band(&self, other: &Band) -> bool {
        self.low <= other.low && other.high <= self.high
    }

    #[inline]
    const fn overlaps(&self, other: &Band) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

/// Voltage bands for one keypad key.
///
/// A key registers when a reading falls inside `press` and stays held until
/// a reading falls outside `hold`. The hold band is wider than the press band
/// so that noise around the edge of the press band cannot retrigger the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyBand {
    pub key: KeySignal,
    pub press: Band,
    pub hold: Band,
}

impl KeyBand {
    pub const fn new(key: KeySignal, press: Band, hold: Band) -> Self {
        Self { key, press, hold }
    }
}

/// Resistor ladder of the common 4-button LCD shield read at 3.3 V.
pub const DEFAULT_KEY_BANDS: [KeyBand; 4] = [
    KeyBand::new(KeySignal::Left, Band::new(2101, 3299), Band::new(2000, 3299)),
    KeyBand::new(KeySignal::Down, Band::new(801, 2099), Band::new(700, 2200)),
    KeyBand::new(KeySignal::Right, Band::new(0, 234), Band::new(0, 335)),
    KeyBand::new(KeySignal::Up, Band::new(236, 799), Band::new(135, 900)),
];

/// Configuration of the keypad input decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Ticks between two classifications.
    pub settle_ticks: u8,
    /// Raw ADC samples averaged per measurement.
    pub samples: u8,
    /// ADC reference voltage in millivolts.
    pub vref_mv: u32,
    /// Raw ADC value corresponding to `vref_mv`.
    pub adc_full_scale: u32,
    /// Per-key press and hold bands.
    pub bands: [KeyBand; 4],
}

impl DecoderConfig {
    /// 50 ms settle at a 10 ms tick, 16-sample average, 16-bit ADC at 3.3 V.
    pub const DEFAULT: Self = Self {
        settle_ticks: 5,
        samples: 16,
        vref_mv: 3300,
        adc_full_scale: 0xFFFF,
        bands: DEFAULT_KEY_BANDS,
    };

    /// Sets the number of ticks between two classifications.
    pub fn with_settle_ticks(mut self, ticks: u8) -> Self {
        self.settle_ticks = ticks;
        self
    }

    /// Sets the number of raw samples averaged per measurement.
    pub fn with_samples(mut self, samples: u8) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the reference voltage and the raw value it maps to.
    pub fn with_scale(mut self, vref_mv: u32, adc_full_scale: u32) -> Self {
        self.vref_mv = vref_mv;
        self.adc_full_scale = adc_full_scale;
        self
    }

    /// Replaces the per-key press and hold bands.
    pub fn with_bands(mut self, bands: [KeyBand; 4]) -> Self {
        self.bands = bands;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// * `ZeroSamples`, `ZeroSettleTicks`, `ZeroFullScale` - degenerate scalars
    /// * `UnassignedBand` - a band names `KeySignal::None`
    /// * `InvertedBand` - low bound above high bound
    /// * `PressOutsideHold` - a key would release on a reading that presses it
    /// * `DuplicateKey` - two bands name the same key
    /// * `OverlappingPress` - a reading could press two keys
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.settle_ticks == 0 {
            return Err(ConfigError::ZeroSettleTicks);
        }
        if self.adc_full_scale == 0 {
            return Err(ConfigError::ZeroFullScale);
        }

        for band in &self.bands {
            if !band.key.is_key() {
                return Err(ConfigError::UnassignedBand);
            }
            if band.press.low > band.press.high || band.hold.low > band.hold.high {
                return Err(ConfigError::InvertedBand(band.key));
            }
            if !band.hold.contains_band(&band.press) {
                return Err(ConfigError::PressOutsideHold(band.key));
            }
        }

        for (i, a) in self.bands.iter().enumerate() {
            for b in &self.bands[i + 1..] {
                if a.key == b.key {
                    return Err(ConfigError::DuplicateKey(a.key));
                }
                if a.press.overlaps(&b.press) {
                    return Err(ConfigError::OverlappingPress(a.key, b.key));
                }
            }
        }

        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration of the whole control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerConfig {
    /// Scheduling period in milliseconds.
    pub tick_period_ms: u32,
    /// Tone generator channel used for playback.
    pub tone_channel: u8,
    pub decoder: DecoderConfig,
}

impl SequencerConfig {
    pub const DEFAULT: Self = Self {
        tick_period_ms: TICK_PERIOD_MS,
        tone_channel: 0,
        decoder: DecoderConfig::DEFAULT,
    };

    /// Sets the tone generator channel used for playback.
    pub fn with_tone_channel(mut self, channel: u8) -> Self {
        self.tone_channel = channel;
        self
    }

    /// Sets the scheduling period in milliseconds.
    pub fn with_tick_period_ms(mut self, period_ms: u32) -> Self {
        self.tick_period_ms = period_ms;
        self
    }

    /// Replaces the decoder configuration.
    pub fn with_decoder(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
