/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! This module contains the iteration over enclosed spans: the detached [`SpanCursor`] and the
//! borrowing [`Enclosed`] iterator that is built on top of it.

use std::ops::Bound::{Excluded, Included, Unbounded};

use crate::analysedtext::{AnalysedText, DocumentId};
use crate::api::ResultSpan;
use crate::error::NlpError;
use crate::span::{Span, SpanHandle, SpanKey};
use crate::types::*;

/// A cursor over the spans enclosed by a section, in document order.
///
/// The cursor holds no borrow on the document, only the position it last visited. Each call to
/// [`Self::next()`] looks up the next registered span strictly after that position, so spans may
/// be added (or removed) between calls:
///
/// * spans added after the current position will be visited,
/// * spans added before the current position will not be visited,
/// * no span is ever visited twice.
///
/// The children of a section are the spans that follow it in document order and lie within
/// its bounds. A span with the same bounds as the section but a less specific level precedes
/// the section and is therefore not one of its children.
///
/// ```
/// use analysedtext::*;
/// let mut doc = AnalysedText::from_string("one two");
/// let sentence = doc.add_sentence(0, 7)?;
/// let mut cursor = sentence.cursor(&doc, Level::Chunk);
/// sentence.add_chunk(&mut doc, 0, 3)?;
/// while let Some(chunk) = cursor.next(&doc) {
///     if doc.get(chunk)?.begin() == 0 {
///         //registered during iteration, lies ahead of the cursor and will be seen next
///         sentence.add_chunk(&mut doc, 4, 7)?;
///     }
/// }
/// assert_eq!(doc.chunks().count(), 2);
/// # Ok::<(), NlpError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SpanCursor {
    document: DocumentId,
    /// The section that is iterated, it is never yielded itself
    section: SpanHandle,
    begin: usize,
    end: usize,
    levels: LevelSet,
    /// Key of the last registry entry that was inspected
    last: Option<SpanKey>,
    current: Option<SpanHandle>,
    done: bool,
}

impl SpanCursor {
    pub(crate) fn new(
        doc: &AnalysedText,
        section: SpanHandle,
        begin: usize,
        end: usize,
        levels: LevelSet,
    ) -> Self {
        //iteration starts strictly after the section itself (the root is not registered),
        //so spans with the same bounds at a less specific level are never its children
        let last = if section == SpanHandle::ROOT {
            None
        } else {
            doc.get(section)
                .ok()
                .map(|span| span.key())
                .filter(|key| *key >= SpanKey::lower_bound(begin))
        };
        Self {
            document: doc.document_id(),
            section,
            begin,
            end,
            levels,
            last,
            current: None,
            done: false,
        }
    }

    /// A cursor that yields nothing
    pub(crate) fn finished(doc: &AnalysedText, section: SpanHandle) -> Self {
        let mut cursor = Self::new(doc, section, 0, 0, LevelSet::empty());
        cursor.done = true;
        cursor
    }

    /// Advances to the next matching span and returns its handle, or None when the section is
    /// exhausted. Once exhausted, the cursor stays exhausted.
    pub fn next(&mut self, doc: &AnalysedText) -> Option<SpanHandle> {
        self.current = None;
        if self.done {
            return None;
        }
        if doc.document_id() != self.document {
            tracing::warn!(
                target: "analysedtext",
                "SpanCursor: called with a document ({:?}) other than the one it was created for ({:?})",
                doc.document_id(),
                self.document
            );
            self.done = true;
            return None;
        }
        loop {
            let lower = match &self.last {
                Some(key) => Excluded(*key),
                None => Included(SpanKey::lower_bound(self.begin)),
            };
            let Some((key, handle)) = doc.registry.range((lower, Unbounded)).next() else {
                self.done = true;
                return None;
            };
            if key.begin >= self.end {
                self.done = true;
                return None;
            }
            self.last = Some(*key);
            if *handle == self.section || key.end > self.end || !self.levels.contains(key.level) {
                continue;
            }
            self.current = Some(*handle);
            return self.current;
        }
    }

    /// Returns the span that was most recently yielded by [`Self::next()`], if it was not removed
    pub fn current(&self) -> Option<SpanHandle> {
        self.current
    }

    /// Returns the section this cursor iterates over
    pub fn section(&self) -> SpanHandle {
        self.section
    }

    /// Removes the span that was most recently yielded from the document and returns it.
    /// Fails with [`NlpError::NoCurrentSpan`] if nothing was yielded yet, the cursor is
    /// exhausted, or the current span was already removed.
    /// The iteration continues after the position of the removed span.
    pub fn remove(&mut self, doc: &mut AnalysedText) -> Result<Span, NlpError> {
        if doc.document_id() != self.document {
            return Err(NlpError::HandleError(
                "SpanCursor::remove: cursor belongs to another document",
            ));
        }
        let handle = self
            .current
            .take()
            .ok_or(NlpError::NoCurrentSpan("SpanCursor::remove"))?;
        doc.remove_span(handle)
    }

    /// Turns this cursor into a borrowing iterator
    pub fn iter(self, doc: &AnalysedText) -> Enclosed<'_> {
        Enclosed { doc, cursor: self }
    }
}

/// Iterator over the spans enclosed by a section, in document order. Produced by
/// [`crate::Section::children()`] and similar methods.
pub struct Enclosed<'doc> {
    doc: &'doc AnalysedText,
    cursor: SpanCursor,
}

impl<'doc> Iterator for Enclosed<'doc> {
    type Item = ResultSpan<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let handle = self.cursor.next(self.doc)?;
            //handles come straight from the registry so this won't fail
            if let Ok(span) = self.doc.span(handle) {
                return Some(span);
            }
        }
    }
}

impl<'doc> std::iter::FusedIterator for Enclosed<'doc> {}
