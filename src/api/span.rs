/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

use std::fmt;

use crate::analysedtext::AnalysedText;
use crate::annotation::{AnnotationKey, AnnotationStore, AnnotationValue, Value, Values};
use crate::config::Configurable;
use crate::cursor::{Enclosed, SpanCursor};
use crate::error::NlpError;
use crate::section::{Chunk, Sentence, SpanKind, Token};
use crate::span::{Span, SpanHandle};
use crate::text::Text;
use crate::types::*;

/// A registered [`Span`] along with a reference to the [`AnalysedText`] that holds it.
/// This is what iteration and [`AnalysedText::span()`] produce, it gives access to the text of
/// the span.
#[derive(Clone, Copy)]
pub struct ResultSpan<'doc> {
    span: &'doc Span,
    doc: &'doc AnalysedText,
}

impl<'doc> ResultSpan<'doc> {
    pub(crate) fn new(span: &'doc Span, doc: &'doc AnalysedText) -> Self {
        Self { span, doc }
    }

    /// Returns a reference to the underlying span
    pub fn as_ref(&self) -> &'doc Span {
        self.span
    }

    /// Returns the document the span belongs to
    pub fn document(&self) -> &'doc AnalysedText {
        self.doc
    }

    pub fn handle(&self) -> SpanHandle {
        self.span
            .handle()
            .expect("handle was already guaranteed for ResultSpan")
    }

    pub fn level(&self) -> Level {
        self.span.level()
    }

    pub fn begin(&self) -> usize {
        self.span.begin()
    }

    pub fn end(&self) -> usize {
        self.span.end()
    }

    /// Returns the typed handle matching the level of this span
    pub fn kind(&self) -> SpanKind {
        SpanKind::new(self.level(), self.handle())
    }

    pub fn as_sentence(&self) -> Option<Sentence> {
        match self.kind() {
            SpanKind::Sentence(sentence) => Some(sentence),
            _ => None,
        }
    }

    pub fn as_chunk(&self) -> Option<Chunk> {
        match self.kind() {
            SpanKind::Chunk(chunk) => Some(chunk),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<Token> {
        match self.kind() {
            SpanKind::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn annotations(&self) -> &'doc AnnotationStore {
        self.span.annotations()
    }

    /// Returns the most probable value for the key
    pub fn annotation<T: AnnotationValue>(&self, key: &AnnotationKey<T>) -> Option<&'doc Value<T>> {
        self.span.annotations().get(key)
    }

    /// Returns all values for the key, most probable first
    pub fn annotation_values<T: AnnotationValue>(&self, key: &AnnotationKey<T>) -> Values<'doc, T> {
        self.span.annotations().get_all(key)
    }

    /// Iterates over all registered spans of the given levels that lie within the bounds of
    /// this span, regardless of the level of this span
    pub fn enclosed(&self, levels: impl Into<LevelSet>) -> Enclosed<'doc> {
        SpanCursor::new(
            self.doc,
            self.handle(),
            self.begin(),
            self.end(),
            levels.into(),
        )
        .iter(self.doc)
    }

    /// Returns the begin of this span relative to the begin of a container
    pub fn relative_begin_in(&self, container: &ResultSpan<'_>) -> Option<usize> {
        self.span.relative_begin_in(container.span)
    }

    /// Returns the UTF-8 byte range of the text of this span in the document
    fn byterange(&self) -> (usize, usize) {
        //bounds of registered spans were validated against the text upon creation
        let beginbyte = self
            .doc
            .utf8byte(self.begin())
            .expect("utf8byte conversion should succeed");
        let endbyte = self
            .doc
            .utf8byte(self.end())
            .expect("utf8byte conversion should succeed");
        (beginbyte, endbyte)
    }
}

/// this implementation defers to the document for offset conversion, with cursors relative to this span
impl<'doc, 'slf> Text<'doc, 'slf> for ResultSpan<'doc>
where
    'doc: 'slf,
{
    /// Returns the text of the span, computed upon first access and cached (unless disabled in the configuration)
    fn text(&'slf self) -> &'doc str {
        let (beginbyte, endbyte) = if self.doc.config().cache_text() {
            *self.span.textcache.get_or_init(|| self.byterange())
        } else {
            self.byterange()
        };
        &self.doc.text()[beginbyte..endbyte]
    }

    fn textlen(&self) -> usize {
        self.span.len()
    }

    fn absolute_cursor(&self, cursor: usize) -> usize {
        self.begin() + cursor
    }

    fn utf8byte(&self, cursor: usize) -> Result<usize, NlpError> {
        if cursor > self.textlen() {
            return Err(NlpError::CursorOutOfBounds(cursor, "ResultSpan::utf8byte"));
        }
        let beginbyte = self.doc.utf8byte(self.begin())?;
        Ok(self.doc.utf8byte(self.absolute_cursor(cursor))? - beginbyte)
    }

    fn utf8byte_to_charpos(&self, bytecursor: usize) -> Result<usize, NlpError> {
        let beginbyte = self.doc.utf8byte(self.begin())?;
        let charpos = self.doc.utf8byte_to_charpos(beginbyte + bytecursor)?;
        if charpos > self.end() {
            return Err(NlpError::CursorOutOfBounds(
                bytecursor,
                "ResultSpan::utf8byte_to_charpos (cursor in bytes)",
            ));
        }
        Ok(charpos - self.begin())
    }
}

/// Wrapped spans are equal if they are equal spans of the same document
impl<'doc> PartialEq for ResultSpan<'doc> {
    fn eq(&self, other: &Self) -> bool {
        self.doc.document_id() == other.doc.document_id() && self.span == other.span
    }
}

impl<'doc> Eq for ResultSpan<'doc> {}

impl<'doc> fmt::Debug for ResultSpan<'doc> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ResultSpan")
            .field("span", self.span)
            .field("document", &self.doc.document_id())
            .finish()
    }
}

impl<'doc> fmt::Display for ResultSpan<'doc> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:?}", self.span, self.text())
    }
}
