/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! This module contains the typed handles for the different span levels and the [`Section`]
//! trait, which is implemented by the levels that can contain other spans.
//!
//! Typed handles are lightweight copies that do not borrow the document, all operations take the
//! document as an argument:
//!
//! ```
//! use analysedtext::*;
//! let mut doc = AnalysedText::from_string("Hello world. Bye.");
//! let sentence = doc.add_sentence(0, 12)?;
//! let token = sentence.add_token(&mut doc, 6, 11)?;
//! assert_eq!(doc.span(token)?.text(), "world");
//! # Ok::<(), NlpError>(())
//! ```

use sealed::sealed;

use crate::analysedtext::AnalysedText;
use crate::cursor::{Enclosed, SpanCursor};
use crate::error::NlpError;
use crate::span::SpanHandle;
use crate::types::*;

/// Handle to a span of level [`Level::Text`], there is exactly one per document
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TextSection(pub(crate) SpanHandle);

/// Handle to a span of level [`Level::Sentence`]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Sentence(pub(crate) SpanHandle);

/// Handle to a span of level [`Level::Chunk`]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Chunk(pub(crate) SpanHandle);

/// Handle to a span of level [`Level::Token`]. Tokens are leaves and offer no child operations.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Token(pub(crate) SpanHandle);

impl From<TextSection> for SpanHandle {
    fn from(section: TextSection) -> Self {
        section.0
    }
}

impl From<Sentence> for SpanHandle {
    fn from(sentence: Sentence) -> Self {
        sentence.0
    }
}

impl From<Chunk> for SpanHandle {
    fn from(chunk: Chunk) -> Self {
        chunk.0
    }
}

impl From<Token> for SpanHandle {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl Token {
    pub fn handle(&self) -> SpanHandle {
        self.0
    }
}

impl TextSection {
    /// Adds a sentence, sentences can only be added to the document-level section
    pub fn add_sentence(
        self,
        doc: &mut AnalysedText,
        begin: usize,
        end: usize,
    ) -> Result<Sentence, NlpError> {
        doc.add_relative(self.0, Level::Sentence, begin, end)
            .map(Sentence)
    }
}

/// The level-specific view on a registered span, see [`crate::ResultSpan::kind()`]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum SpanKind {
    Text(TextSection),
    Sentence(Sentence),
    Chunk(Chunk),
    Token(Token),
}

impl SpanKind {
    pub(crate) fn new(level: Level, handle: SpanHandle) -> Self {
        match level {
            Level::Text => Self::Text(TextSection(handle)),
            Level::Sentence => Self::Sentence(Sentence(handle)),
            Level::Chunk => Self::Chunk(Chunk(handle)),
            Level::Token => Self::Token(Token(handle)),
        }
    }

    pub fn handle(&self) -> SpanHandle {
        match self {
            Self::Text(x) => x.0,
            Self::Sentence(x) => x.0,
            Self::Chunk(x) => x.0,
            Self::Token(x) => x.0,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            Self::Text(_) => Level::Text,
            Self::Sentence(_) => Level::Sentence,
            Self::Chunk(_) => Level::Chunk,
            Self::Token(_) => Level::Token,
        }
    }
}

/// A section is a span that can contain other spans: the document, a sentence or a chunk.
/// Offsets passed to the methods of this trait are relative to the begin of the section.
///
/// All methods take the document the section belongs to. Passing any other document yields
/// handle errors or meaningless results.
///
/// If the section itself was removed from the document, adding children fails with
/// [`NlpError::HandleError`] and iterating its children yields nothing.
///
/// This is a sealed trait, not implementable outside this crate.
#[sealed(pub(crate))]
pub trait Section: Copy + Into<SpanHandle> {
    /// The level of the section
    fn level(&self) -> Level;

    fn handle(&self) -> SpanHandle {
        (*self).into()
    }

    /// Adds a span within this section. The level must be at least as specific as the level of
    /// the section, and sentences can only be added to the document-level section, otherwise
    /// this fails with [`NlpError::InvalidLevel`].
    /// Adding a span that already exists returns the existing one.
    fn add_child(
        self,
        doc: &mut AnalysedText,
        level: Level,
        begin: usize,
        end: usize,
    ) -> Result<SpanHandle, NlpError> {
        doc.add_relative(self.into(), level, begin, end)
    }

    /// Adds a chunk within this section
    fn add_chunk(self, doc: &mut AnalysedText, begin: usize, end: usize) -> Result<Chunk, NlpError> {
        self.add_child(doc, Level::Chunk, begin, end).map(Chunk)
    }

    /// Adds a token within this section
    fn add_token(self, doc: &mut AnalysedText, begin: usize, end: usize) -> Result<Token, NlpError> {
        self.add_child(doc, Level::Token, begin, end).map(Token)
    }

    /// Returns a detached cursor over the spans of the given levels that are enclosed by this
    /// section. The cursor does not borrow the document, so new spans can be added while
    /// iterating, see [`SpanCursor`].
    fn cursor(self, doc: &AnalysedText, levels: impl Into<LevelSet>) -> SpanCursor {
        match doc.get(self.into()) {
            Ok(span) => SpanCursor::new(doc, self.into(), span.begin(), span.end(), levels.into()),
            Err(_) => SpanCursor::finished(doc, self.into()),
        }
    }

    /// Like [`Self::cursor()`] but restricted to `[begin, end)` relative to this section.
    /// The range is validated like a span that would be created in this section.
    fn cursor_in(
        self,
        doc: &AnalysedText,
        levels: impl Into<LevelSet>,
        begin: usize,
        end: usize,
    ) -> Result<SpanCursor, NlpError> {
        let span = doc.get(self.into())?;
        let bounds = crate::span::Span::new_relative(Level::Token, span, begin, end)?;
        Ok(SpanCursor::new(
            doc,
            self.into(),
            bounds.begin(),
            bounds.end(),
            levels.into(),
        ))
    }

    /// Iterates over all spans enclosed by this section in document order, the section itself
    /// is not included
    fn children(self, doc: &AnalysedText) -> Enclosed<'_> {
        self.children_of_type(doc, LevelSet::all())
    }

    /// Iterates over the spans of the given levels enclosed by this section, in document order
    fn children_of_type(self, doc: &AnalysedText, levels: impl Into<LevelSet>) -> Enclosed<'_> {
        self.cursor(doc, levels).iter(doc)
    }

    /// Iterates over the spans of the given levels that lie within `[begin, end)` relative to
    /// this section
    fn children_in(
        self,
        doc: &AnalysedText,
        levels: impl Into<LevelSet>,
        begin: usize,
        end: usize,
    ) -> Result<Enclosed<'_>, NlpError> {
        Ok(self.cursor_in(doc, levels, begin, end)?.iter(doc))
    }

    fn chunks(self, doc: &AnalysedText) -> Enclosed<'_> {
        self.children_of_type(doc, Level::Chunk)
    }

    fn tokens(self, doc: &AnalysedText) -> Enclosed<'_> {
        self.children_of_type(doc, Level::Token)
    }
}

#[sealed]
impl Section for TextSection {
    fn level(&self) -> Level {
        Level::Text
    }
}

#[sealed]
impl Section for Sentence {
    fn level(&self) -> Level {
        Level::Sentence
    }
}

#[sealed]
impl Section for Chunk {
    fn level(&self) -> Level {
        Level::Chunk
    }
}
