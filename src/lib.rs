#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`InputDecoder`**: Turns a resistor-ladder keypad voltage into debounced `KeySignal` edges
//! - **`KeySignal`**: One decoded key press (`Left`, `Up`, `Right`, `Down`) or `None`
//! - **`Composer`**: Note-entry state machine and looping player, emitting `Effect`s
//! - **`NoteSequence`**: Fixed-capacity ring buffer of committed (pitch, length) pairs
//! - **`Pitch`** / **`NoteValue`**: Cyclic indices into the fixed pitch and length tables
//! - **`KeypadSequencer`**: Owns the hardware and runs decoder and composer every tick
//! - **`KeypadAdc`**, **`CharDisplay`**, **`ToneGenerator`**, **`TickTimer`**: Traits to
//!   implement for your hardware
//!
//! The composer is hardware independent: every transition returns the display and tone
//! generator effects it wants applied, which `KeypadSequencer` forwards to the traits.

pub mod time;
pub mod types;
pub mod tables;
pub mod config;
pub mod decoder;
pub mod sequence;
pub mod command;
pub mod composer;
pub mod sequencer;

pub use command::{Effect, Effects, MAX_EFFECTS};
pub use composer::{Composer, PlaybackCursor};
pub use config::{Band, DecoderConfig, KeyBand, SequencerConfig};
pub use decoder::{InputDecoder, KeypadAdc, measure_millivolts};
pub use sequence::{NoteEntry, NoteSequence, SEQUENCE_CAPACITY};
pub use sequencer::{CharDisplay, KeypadSequencer, ToneGenerator};
pub use tables::{NOTE_VALUE_TABLE, NoteValue, PITCH_TABLE, Pitch};
pub use time::{TICK_PERIOD_MS, TickTimer};
pub use types::{ComposerState, ConfigError, KeySignal, Lifecycle, SequencerError};

/// Sequencer with the default 12-note capacity.
pub type DefaultSequencer<A, D, G> = KeypadSequencer<A, D, G, SEQUENCE_CAPACITY>;
