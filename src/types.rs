/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

use sealed::sealed;
use std::fmt;
use std::hash::Hash;

/// Holds the arena of items in a document. Removed items leave a `None` behind so handles of the
/// remaining items stay valid.
pub type Store<T> = Vec<Option<T>>;

/// The handle trait is implemented on various handle types. They have in common that they refer to the internal id
/// of an item in a [`crate::Store`] by index. Types implementing this are lightweight and do not borrow anything, they can be passed and copied freely.
/// To get an actual reference to the item from a handle type, call the `get()` method on the document that holds it.
/// This is a sealed trait, not implementable outside this crate.
#[sealed(pub(crate))] //<-- this ensures nobody outside this crate can implement the trait
pub trait Handle:
    Clone + Copy + core::fmt::Debug + PartialEq + Eq + PartialOrd + Ord + Hash
{
    /// Create a new handle for an internal ID. You shouldn't need to use this as handles will always be generated for you by higher-level functions.
    fn new(intid: usize) -> Self;
    /// Returns the internal index for this handle.
    fn as_usize(&self) -> usize;
}

/// The specificity level of a span. Levels are ordered from least specific (the whole text)
/// to most specific (a single token): `Text < Sentence < Chunk < Token`.
///
/// Only `Text`, `Sentence` and `Chunk` may contain other spans, a `Token` is always a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Text = 0,
    Sentence = 1,
    Chunk = 2,
    Token = 3,
}

impl Level {
    /// All levels, in order of increasing specificity
    pub const ALL: [Level; 4] = [Level::Text, Level::Sentence, Level::Chunk, Level::Token];

    /// Can spans of this level contain other spans?
    pub fn is_container(&self) -> bool {
        !matches!(self, Self::Token)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Sentence => "Sentence",
            Self::Chunk => "Chunk",
            Self::Token => "Token",
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [`Level`]s, used as the predicate for type-filtered iteration.
/// Conversions exist from a single [`Level`] and from slices and arrays of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LevelSet(u8);

impl LevelSet {
    /// The empty set, matches nothing
    pub fn empty() -> Self {
        Self(0)
    }

    /// Matches spans of any level
    pub fn all() -> Self {
        Self::of(&Level::ALL)
    }

    pub fn of(levels: &[Level]) -> Self {
        let mut set = Self::empty();
        for level in levels {
            set.insert(*level);
        }
        set
    }

    pub fn insert(&mut self, level: Level) {
        self.0 |= level.bit();
    }

    /// Builder pattern variant of [`Self::insert()`]
    pub fn with(mut self, level: Level) -> Self {
        self.insert(level);
        self
    }

    pub fn remove(&mut self, level: Level) {
        self.0 &= !level.bit();
    }

    pub fn contains(&self, level: Level) -> bool {
        self.0 & level.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the levels in this set, in order of increasing specificity
    pub fn iter(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL.into_iter().filter(|level| self.contains(*level))
    }
}

impl From<Level> for LevelSet {
    fn from(level: Level) -> Self {
        Self(level.bit())
    }
}

impl From<&[Level]> for LevelSet {
    fn from(levels: &[Level]) -> Self {
        Self::of(levels)
    }
}

impl<const N: usize> From<[Level; N]> for LevelSet {
    fn from(levels: [Level; N]) -> Self {
        Self::of(&levels)
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        let mut set = Self::empty();
        for level in iter {
            set.insert(level);
        }
        set
    }
}
