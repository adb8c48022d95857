//! Note composer and looping player.
//!
//! [`Composer`] is the UI state machine driven by decoded key signals:
//!
//! | State         | Key   | Next state    | Effects                                   |
//! |---------------|-------|---------------|-------------------------------------------|
//! | `SelectNote`  | Up    | `SelectNote`  | next pitch glyph                          |
//! | `SelectNote`  | Down  | `SelectNote`  | previous pitch glyph                      |
//! | `SelectNote`  | Right | `SelectValue` | length prompt                             |
//! | `SelectNote`  | Left  | `Play`        | program slot 0, start tone                |
//! | `SelectValue` | Up    | `SelectValue` | next length glyph                         |
//! | `SelectValue` | Down  | `SelectValue` | previous length glyph                     |
//! | `SelectValue` | Right | `SelectNote`  | commit, glyph on row 0, note prompt       |
//! | `Play`        | Left  | `SelectNote`  | stop tone, clear sequence and row 0       |
//!
//! Every other combination is ignored. While playing, each tick also counts
//! down the current note and moves on to the next slot when it expires.

use crate::command::{Effect, Effects, emit};
use crate::sequence::{NoteEntry, NoteSequence};
use crate::tables::{NoteValue, Pitch};
use crate::types::{ComposerState, KeySignal};

/// Display columns.
pub const DISPLAY_COLUMNS: u8 = 16;
/// Row showing one glyph per committed slot.
pub const SEQUENCE_ROW: u8 = 0;
/// Row showing the current prompt and selector.
pub const PROMPT_ROW: u8 = 1;

/// Note prompt, padded to cover the length prompt and its glyph.
pub const NOTE_PROMPT: &str = "Note:    ";
/// Column of the pitch glyph after [`NOTE_PROMPT`].
pub const NOTE_GLYPH_COL: u8 = 6;
/// Prompt shown while choosing a note length.
pub const LENGTH_PROMPT: &str = "Length: ";
/// Column of the length glyph after [`LENGTH_PROMPT`].
///
/// One past the prompt's trailing space, which column 7 would overwrite.
pub const LENGTH_GLYPH_COL: u8 = 8;
/// Blank line used to wipe the sequence row.
pub const BLANK_ROW: &str = "                ";

/// Position of the player within the stored sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackCursor {
    /// Slot currently sounding.
    pub slot: usize,
    /// Ticks left before moving to the next slot.
    pub remaining: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SelectNote,
    SelectValue,
    Play(PlaybackCursor),
}

/// Composes a sequence of notes from key signals and plays it back.
///
/// # Type Parameters
/// * `N` - Sequence capacity, at most one slot per display column
#[derive(Debug, Clone)]
pub struct Composer<const N: usize> {
    mode: Mode,
    note_selector: Pitch,
    value_selector: NoteValue,
    sequence: NoteSequence<N>,
}

impl<const N: usize> Composer<N> {
    /// Creates a composer in `SelectNote` with an empty sequence.
    pub fn new() -> Self {
        const {
            assert!(
                N <= DISPLAY_COLUMNS as usize,
                "sequence must fit on one display row"
            )
        };

        Self {
            mode: Mode::SelectNote,
            note_selector: Pitch::default(),
            value_selector: NoteValue::default(),
            sequence: NoteSequence::new(),
        }
    }

    /// Effects that draw the initial screen.
    pub fn startup(&self) -> Effects {
        let mut effects = Effects::new();
        emit(&mut effects, Effect::ClearDisplay);
        self.note_prompt(&mut effects);
        effects
    }

    /// Runs one control-loop tick: advances playback, then handles `signal`.
    pub fn step(&mut self, signal: KeySignal) -> Effects {
        let mut effects = Effects::new();
        self.advance_playback_into(&mut effects);
        self.handle_into(signal, &mut effects);
        effects
    }

    /// Applies a key signal to the current state without advancing playback.
    pub fn handle(&mut self, signal: KeySignal) -> Effects {
        let mut effects = Effects::new();
        self.handle_into(signal, &mut effects);
        effects
    }

    /// Counts down the sounding note, moving to the next slot when it expires.
    ///
    /// Does nothing outside `Play`.
    pub fn advance_playback(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.advance_playback_into(&mut effects);
        effects
    }

    fn handle_into(&mut self, signal: KeySignal, effects: &mut Effects) {
        match (self.mode, signal) {
            (Mode::SelectNote, KeySignal::Up) => {
                self.note_selector = self.note_selector.next();
                self.note_glyph(effects);
            }
            (Mode::SelectNote, KeySignal::Down) => {
                self.note_selector = self.note_selector.prev();
                self.note_glyph(effects);
            }
            (Mode::SelectNote, KeySignal::Right) => {
                self.mode = Mode::SelectValue;
                emit(
                    effects,
                    Effect::WriteStr {
                        row: PROMPT_ROW,
                        col: 0,
                        text: LENGTH_PROMPT,
                    },
                );
                self.value_glyph(effects);
            }
            (Mode::SelectNote, KeySignal::Left) => self.start_playback(effects),
            (Mode::SelectValue, KeySignal::Up) => {
                self.value_selector = self.value_selector.next();
                self.value_glyph(effects);
            }
            (Mode::SelectValue, KeySignal::Down) => {
                self.value_selector = self.value_selector.prev();
                self.value_glyph(effects);
            }
            (Mode::SelectValue, KeySignal::Right) => self.commit(effects),
            (Mode::Play(_), KeySignal::Left) => self.stop_playback(effects),
            _ => {}
        }
    }

    fn commit(&mut self, effects: &mut Effects) {
        let entry = NoteEntry::new(self.note_selector, self.value_selector);
        let slot = self.sequence.push(entry);

        #[cfg(feature = "defmt")]
        defmt::debug!("committed {} to slot {}", entry, slot);

        emit(
            effects,
            Effect::WriteChar {
                row: SEQUENCE_ROW,
                col: slot as u8,
                ch: entry.pitch.glyph(),
            },
        );

        self.note_selector = Pitch::default();
        self.value_selector = NoteValue::default();
        self.mode = Mode::SelectNote;
        self.note_prompt(effects);
    }

    fn start_playback(&mut self, effects: &mut Effects) {
        let first = self.sequence.entry(0);

        #[cfg(feature = "defmt")]
        defmt::debug!("playback started with {} notes", self.sequence.len());

        emit(effects, Effect::ProgramTone { period: first.period() });
        emit(effects, Effect::StartTone);
        self.mode = Mode::Play(PlaybackCursor {
            slot: 0,
            remaining: first.ticks(),
        });
    }

    fn stop_playback(&mut self, effects: &mut Effects) {
        #[cfg(feature = "defmt")]
        defmt::debug!("playback stopped, sequence cleared");

        emit(effects, Effect::StopTone);
        self.sequence.clear();
        emit(
            effects,
            Effect::WriteStr {
                row: SEQUENCE_ROW,
                col: 0,
                text: BLANK_ROW,
            },
        );
        self.mode = Mode::SelectNote;
    }

    fn advance_playback_into(&mut self, effects: &mut Effects) {
        let Mode::Play(cursor) = &mut self.mode else {
            return;
        };

        if cursor.remaining > 0 {
            cursor.remaining -= 1;
            return;
        }

        cursor.slot = self.sequence.next_playback_slot(cursor.slot);
        let entry = self.sequence.entry(cursor.slot);
        cursor.remaining = entry.ticks();

        #[cfg(feature = "defmt")]
        defmt::trace!("playing slot {}", cursor.slot);

        emit(effects, Effect::ProgramTone { period: entry.period() });
    }

    fn note_prompt(&self, effects: &mut Effects) {
        emit(
            effects,
            Effect::WriteStr {
                row: PROMPT_ROW,
                col: 0,
                text: NOTE_PROMPT,
            },
        );
        self.note_glyph(effects);
    }

    fn note_glyph(&self, effects: &mut Effects) {
        emit(
            effects,
            Effect::WriteChar {
                row: PROMPT_ROW,
                col: NOTE_GLYPH_COL,
                ch: self.note_selector.glyph(),
            },
        );
    }

    fn value_glyph(&self, effects: &mut Effects) {
        emit(
            effects,
            Effect::WriteChar {
                row: PROMPT_ROW,
                col: LENGTH_GLYPH_COL,
                ch: self.value_selector.glyph(),
            },
        );
    }

    /// Returns the active state.
    pub fn state(&self) -> ComposerState {
        match self.mode {
            Mode::SelectNote => ComposerState::SelectNote,
            Mode::SelectValue => ComposerState::SelectValue,
            Mode::Play(_) => ComposerState::Play,
        }
    }

    /// Pitch offered for the next slot.
    pub fn note_selector(&self) -> Pitch {
        self.note_selector
    }

    /// Length offered for the next slot.
    pub fn value_selector(&self) -> NoteValue {
        self.value_selector
    }

    /// Slot the next committed note will be written to.
    pub fn write_cursor(&self) -> usize {
        self.sequence.head()
    }

    /// Returns the committed notes.
    pub fn sequence(&self) -> &NoteSequence<N> {
        &self.sequence
    }

    /// Playback position, present only while playing.
    pub fn playback(&self) -> Option<PlaybackCursor> {
        match self.mode {
            Mode::Play(cursor) => Some(cursor),
            _ => None,
        }
    }

    /// Returns true while the sequence is playing.
    pub fn is_playing(&self) -> bool {
        matches!(self.mode, Mode::Play(_))
    }
}

impl<const N: usize> Default for Composer<N> {
    fn default() -> Self {
        Self::new()
    }
}
