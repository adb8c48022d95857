//! Fixed pitch and note-length tables.
//!
//! Pitches are stored as tone generator periods (timer ticks per half wave),
//! lengths as control-loop ticks. Both tables are browsed through cyclic
//! selectors, [`Pitch`] and [`NoteValue`], which can only ever hold a valid
//! table index.

/// Number of entries in the pitch table.
pub const PITCH_COUNT: usize = 12;

/// Number of entries in the note-length table.
pub const NOTE_VALUE_COUNT: usize = 4;

/// One entry of the pitch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PitchEntry {
    /// Character shown on the display. Lowercase marks a sharp.
    pub glyph: char,
    /// Tone generator period in timer ticks.
    pub period: u32,
}

/// One entry of the note-length table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteValueEntry {
    /// Character shown on the display (1, 2, 4 or 8).
    pub glyph: char,
    /// Length in control-loop ticks.
    pub ticks: u16,
}

const fn pitch(glyph: char, period: u32) -> PitchEntry {
    PitchEntry { glyph, period }
}

const fn value(glyph: char, ticks: u16) -> NoteValueEntry {
    NoteValueEntry { glyph, ticks }
}

/// Chromatic octave starting at C.
pub const PITCH_TABLE: [PitchEntry; PITCH_COUNT] = [
    pitch('C', 20040),
    pitch('c', 18915),
    pitch('D', 17853),
    pitch('d', 16851),
    pitch('E', 15905),
    pitch('F', 15013),
    pitch('f', 14170),
    pitch('G', 13375),
    pitch('g', 12624),
    pitch('A', 11916),
    pitch('a', 11247),
    pitch('B', 10616),
];

/// Note lengths from shortest to longest.
pub const NOTE_VALUE_TABLE: [NoteValueEntry; NOTE_VALUE_COUNT] = [
    value('1', 25),
    value('2', 50),
    value('4', 100),
    value('8', 200),
];

/// Cyclic index into [`PITCH_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pitch(u8);

impl Pitch {
    /// Returns the pitch at `index`, or `None` if it is outside the table.
    pub const fn new(index: usize) -> Option<Self> {
        if index < PITCH_COUNT {
            Some(Pitch(index as u8))
        } else {
            None
        }
    }

    /// Table index of this pitch.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next pitch, wrapping from B back to C.
    #[inline]
    pub const fn next(self) -> Self {
        Pitch(((self.0 as usize + 1) % PITCH_COUNT) as u8)
    }

    /// Previous pitch, wrapping from C to B.
    #[inline]
    pub const fn prev(self) -> Self {
        Pitch(((self.0 as usize + PITCH_COUNT - 1) % PITCH_COUNT) as u8)
    }

    #[inline]
    pub const fn entry(self) -> PitchEntry {
        PITCH_TABLE[self.index()]
    }

    #[inline]
    pub const fn glyph(self) -> char {
        self.entry().glyph
    }

    #[inline]
    pub const fn period(self) -> u32 {
        self.entry().period
    }
}

/// Cyclic index into [`NOTE_VALUE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteValue(u8);

impl NoteValue {
    /// Returns the note length at `index`, or `None` if it is outside the table.
    pub const fn new(index: usize) -> Option<Self> {
        if index < NOTE_VALUE_COUNT {
            Some(NoteValue(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next length, wrapping from the longest back to the shortest.
    #[inline]
    pub const fn next(self) -> Self {
        NoteValue(((self.0 as usize + 1) % NOTE_VALUE_COUNT) as u8)
    }

    /// Previous length, wrapping from the shortest to the longest.
    #[inline]
    pub const fn prev(self) -> Self {
        NoteValue(((self.0 as usize + NOTE_VALUE_COUNT - 1) % NOTE_VALUE_COUNT) as u8)
    }

    #[inline]
    pub const fn entry(self) -> NoteValueEntry {
        NOTE_VALUE_TABLE[self.index()]
    }

    #[inline]
    pub const fn glyph(self) -> char {
        self.entry().glyph
    }

    #[inline]
    pub const fn ticks(self) -> u16 {
        self.entry().ticks
    }
}
