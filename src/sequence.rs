use crate::tables::{NoteValue, Pitch};

/// Default number of notes a sequence can hold.
pub const SEQUENCE_CAPACITY: usize = 12;

/// A committed (pitch, length) pair.
///
/// The default entry is the first row of both tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteEntry {
    pub pitch: Pitch,
    pub value: NoteValue,
}

impl NoteEntry {
    #[inline]
    pub const fn new(pitch: Pitch, value: NoteValue) -> Self {
        Self { pitch, value }
    }

    /// Tone generator period for this note.
    #[inline]
    pub const fn period(&self) -> u32 {
        self.pitch.period()
    }

    /// Length of this note in control-loop ticks.
    #[inline]
    pub const fn ticks(&self) -> u16 {
        self.value.ticks()
    }
}

/// Fixed-capacity ring buffer of composed notes.
///
/// Entries are written at `head`, which wraps to slot 0 after the last slot,
/// so once the buffer is full each new entry overwrites the oldest one.
/// `len` counts the slots holding a committed entry and saturates at `N`.
/// Unwritten slots hold [`NoteEntry::default`].
///
/// # Type Parameters
/// * `N` - Number of slots
#[derive(Debug, Clone)]
pub struct NoteSequence<const N: usize> {
    slots: [NoteEntry; N],
    head: usize,
    len: usize,
}

impl<const N: usize> NoteSequence<N> {
    /// Creates an empty sequence with every slot at the default entry.
    pub fn new() -> Self {
        const { assert!(N > 0, "sequence needs at least one slot") };

        Self {
            slots: [NoteEntry::default(); N],
            head: 0,
            len: 0,
        }
    }

    /// Writes an entry at the write cursor and advances it cyclically.
    ///
    /// Returns the slot that was written.
    pub fn push(&mut self, entry: NoteEntry) -> usize {
        let slot = self.head;
        self.slots[slot] = entry;
        self.head = (self.head + 1) % N;
        self.len = (self.len + 1).min(N);
        slot
    }

    /// Resets every slot to the default entry and rewinds the write cursor.
    pub fn clear(&mut self) {
        self.slots = [NoteEntry::default(); N];
        self.head = 0;
        self.len = 0;
    }

    /// Returns the entry stored in `slot`, committed or not.
    pub fn get(&self, slot: usize) -> Option<&NoteEntry> {
        self.slots.get(slot)
    }

    /// Returns the entry in `slot`, falling back to the default entry.
    pub fn entry(&self, slot: usize) -> NoteEntry {
        self.get(slot).copied().unwrap_or_default()
    }

    /// Slot the next entry will be written to.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// All slots in storage order, including unwritten ones.
    pub fn slots(&self) -> &[NoteEntry] {
        &self.slots
    }

    /// Committed entries in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &NoteEntry> {
        self.slots[..self.len].iter()
    }

    /// Slot played after `slot`: wraps after the last committed entry.
    ///
    /// An empty sequence keeps replaying slot 0.
    pub fn next_playback_slot(&self, slot: usize) -> usize {
        (slot + 1) % self.len.max(1)
    }
}

impl<const N: usize> Default for NoteSequence<N> {
    fn default() -> Self {
        Self::new()
    }
}
