//! Effects emitted by the composer for the display and tone generator.
//!
//! The composer never touches hardware. Each transition returns a short list
//! of [`Effect`]s which the controller applies in order.

use heapless::Vec;

/// Largest number of effects a single tick can produce.
pub const MAX_EFFECTS: usize = 4;

/// Effects produced by one composer step.
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// A single side effect requested by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Blank the whole display.
    ClearDisplay,
    /// Write a string starting at (`row`, `col`).
    WriteStr {
        row: u8,
        col: u8,
        text: &'static str,
    },
    /// Write one character at (`row`, `col`).
    WriteChar { row: u8, col: u8, ch: char },
    /// Load a new period into the tone generator.
    ProgramTone { period: u32 },
    /// Start the tone generator.
    StartTone,
    /// Stop the tone generator.
    StopTone,
}

/// Appends `effect`, which always fits for the transitions the composer makes.
pub(crate) fn emit(effects: &mut Effects, effect: Effect) {
    let pushed = effects.push(effect);
    debug_assert!(pushed.is_ok(), "effect buffer overflow");
}
