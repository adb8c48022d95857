//! Core types shared by the decoder, composer and controller.

/// A decoded keypad edge.
///
/// The decoder produces at most one non-`None` signal per physical press; the
/// consumer takes it, leaving `None` behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeySignal {
    /// No unconsumed edge.
    #[default]
    None,
    Left,
    Up,
    Right,
    Down,
}

impl KeySignal {
    /// Returns true for any of the four direction keys.
    #[inline]
    pub fn is_key(self) -> bool {
        self != KeySignal::None
    }

    /// Takes the signal, leaving `None` in its place.
    #[inline]
    pub fn take(&mut self) -> KeySignal {
        core::mem::take(self)
    }
}

/// Which screen of the composer is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComposerState {
    /// Browsing pitches for the next slot.
    SelectNote,
    /// Browsing note lengths for the slot being built.
    SelectValue,
    /// Looping playback of the stored sequence.
    Play,
}

/// Lifecycle of the top-level controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// ADC calibration has not succeeded yet. The loop must not run.
    Uncalibrated,
    /// Calibrated and the initial screen has been drawn.
    Running,
}

/// Decoder configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Averaging over zero samples.
    ZeroSamples,

    /// Settle period of zero ticks.
    ZeroSettleTicks,

    /// ADC full-scale value of zero.
    ZeroFullScale,

    /// A band whose low bound is above its high bound.
    InvertedBand(KeySignal),

    /// A press band that is not contained in the key's hold band.
    PressOutsideHold(KeySignal),

    /// Two keys whose press bands share a voltage.
    OverlappingPress(KeySignal, KeySignal),

    /// A key band assigned to `KeySignal::None`.
    UnassignedBand,

    /// The same key named by more than one band.
    DuplicateKey(KeySignal),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroSamples => write!(f, "sample count must be at least one"),
            ConfigError::ZeroSettleTicks => {
                write!(f, "settle period must be at least one tick")
            }
            ConfigError::ZeroFullScale => write!(f, "ADC full scale must be non-zero"),
            ConfigError::InvertedBand(key) => {
                write!(f, "band for {:?} has low bound above high bound", key)
            }
            ConfigError::PressOutsideHold(key) => {
                write!(f, "press band for {:?} is not inside its hold band", key)
            }
            ConfigError::OverlappingPress(a, b) => {
                write!(f, "press bands for {:?} and {:?} overlap", a, b)
            }
            ConfigError::UnassignedBand => write!(f, "key band must name a direction key"),
            ConfigError::DuplicateKey(key) => write!(f, "{:?} is named by more than one band", key),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Errors that can occur during controller operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// Operation called from an invalid lifecycle state.
    InvalidState {
        /// Human-readable description of the expected state.
        expected: &'static str,
        /// The actual current state
        actual: Lifecycle,
    },
    /// Decoder configuration was rejected.
    Config(ConfigError),
}

impl core::fmt::Display for SequencerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequencerError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but sequencer is {:?}",
                    expected, actual
                )
            }
            SequencerError::Config(err) => write!(f, "configuration error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequencerError {}

impl From<ConfigError> for SequencerError {
    fn from(err: ConfigError) -> Self {
        SequencerError::Config(err)
    }
}
