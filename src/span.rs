/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! This module contains the low-level [`Span`], the positional primitive of the model, and
//! its [`SpanHandle`].

use datasize::DataSize;
use sealed::sealed;
use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::analysedtext::DocumentId;
use crate::annotation::AnnotationStore;
use crate::error::NlpError;
use crate::types::*;

/// Handle to a [`Span`] registered in an [`crate::AnalysedText`]. Handles are only meaningful
/// for the document that issued them.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord, DataSize)]
pub struct SpanHandle(u32);

impl SpanHandle {
    /// The document-level span always occupies the first slot
    pub(crate) const ROOT: SpanHandle = SpanHandle(0);
}

#[sealed]
impl Handle for SpanHandle {
    fn new(intid: usize) -> Self {
        //the arena size is checked upon registration
        Self(u32::try_from(intid).expect("span handle out of range"))
    }
    fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

/// The key under which spans are held in the registry of a document.
/// This determines the canonical document order: begin ascending, then end *descending*
/// (so enclosing spans come first), then level ascending.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub(crate) struct SpanKey {
    pub(crate) begin: usize,
    pub(crate) end: usize,
    pub(crate) level: Level,
}

impl SpanKey {
    /// The smallest possible key that starts at the given position
    pub(crate) fn lower_bound(begin: usize) -> Self {
        Self {
            begin,
            end: usize::MAX,
            level: Level::Text,
        }
    }
}

impl Ord for SpanKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| other.end.cmp(&self.end))
            .then_with(|| self.level.cmp(&other.level))
    }
}

impl PartialOrd for SpanKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A span is a half-open range `[begin, end)` of unicode codepoints over the text of a document,
/// tagged with a specificity [`Level`] and carrying an [`AnnotationStore`].
///
/// The bounds of a span are immutable. Spans are usually not constructed directly but obtained by
/// registering them with a document or section, e.g. [`crate::AnalysedText::add_token()`].
#[derive(Debug)]
pub struct Span {
    /// The internal numeric identifier (may only be None upon creation when not bound yet)
    pub(crate) intid: Option<SpanHandle>,
    /// The document that issued this span, this is not an ownership relation
    pub(crate) document: Option<DocumentId>,
    pub(crate) level: Level,
    pub(crate) begin: usize,
    pub(crate) end: usize,
    pub(crate) annotations: AnnotationStore,
    /// UTF-8 byte range of the text, computed upon first access
    pub(crate) textcache: OnceCell<(usize, usize)>,
}

impl Span {
    /// Creates a new unbound span with absolute offsets. Fails if `end < begin`.
    pub fn new(level: Level, begin: usize, end: usize) -> Result<Self, NlpError> {
        if end < begin {
            return Err(NlpError::InvalidRange(begin, end, "Span::new"));
        }
        Ok(Self {
            intid: None,
            document: None,
            level,
            begin,
            end,
            annotations: AnnotationStore::new(),
            textcache: OnceCell::new(),
        })
    }

    /// Creates a new unbound span with offsets relative to the begin of a parent span.
    /// Fails if `local_end < local_begin`, or if the span would end beyond the end of the parent.
    pub fn new_relative(
        level: Level,
        parent: &Span,
        local_begin: usize,
        local_end: usize,
    ) -> Result<Self, NlpError> {
        if local_end < local_begin {
            return Err(NlpError::InvalidRange(
                local_begin,
                local_end,
                "Span::new_relative",
            ));
        }
        let end = parent
            .begin
            .checked_add(local_end)
            .ok_or(NlpError::OutOfBounds(
                usize::MAX,
                parent.end,
                "Span::new_relative",
            ))?;
        if end > parent.end {
            return Err(NlpError::OutOfBounds(end, parent.end, "Span::new_relative"));
        }
        let mut span = Self::new(level, parent.begin + local_begin, end)?;
        span.document = parent.document;
        Ok(span)
    }

    /// Returns the handle of this span, or None if it is not registered
    pub fn handle(&self) -> Option<SpanHandle> {
        self.intid
    }

    /// Like [`Self::handle()`] but returns a [`NlpError::HandleError`] if the span is not registered
    pub fn handle_or_err(&self) -> Result<SpanHandle, NlpError> {
        self.intid.ok_or(NlpError::HandleError("span is not registered"))
    }

    /// Returns the identity of the document this span belongs to, if it is bound to one
    pub fn document(&self) -> Option<DocumentId> {
        self.document
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Return the begin position (unicode points)
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Return the end position (non-inclusive) in unicode points
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the length of the span in unicode points
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationStore {
        &mut self.annotations
    }

    pub(crate) fn key(&self) -> SpanKey {
        SpanKey {
            begin: self.begin,
            end: self.end,
            level: self.level,
        }
    }

    /// Does this span fully cover the other one?
    pub fn embeds(&self, other: &Span) -> bool {
        other.begin >= self.begin && other.end <= self.end
    }

    /// Do the two spans share at least one codepoint?
    pub fn overlaps(&self, other: &Span) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    /// Returns the begin of this span relative to the begin of a container. Returns None if
    /// the container does not embed this span.
    pub fn relative_begin_in(&self, container: &Span) -> Option<usize> {
        if container.embeds(self) {
            Some(self.begin - container.begin)
        } else {
            None
        }
    }

    /// Returns the end of this span relative to the begin of a container. Returns None if
    /// the container does not embed this span.
    pub fn relative_end_in(&self, container: &Span) -> Option<usize> {
        if container.embeds(self) {
            Some(self.end - container.begin)
        } else {
            None
        }
    }

    /// Compares two spans in document order, like [`Ord::cmp()`], but returns
    /// [`NlpError::CrossDocumentComparison`] if the spans come from different documents.
    pub fn checked_cmp(&self, other: &Span) -> Result<Ordering, NlpError> {
        if self.is_foreign(other) {
            Err(NlpError::CrossDocumentComparison("Span::checked_cmp"))
        } else {
            Ok(self.key().cmp(&other.key()))
        }
    }

    fn is_foreign(&self, other: &Span) -> bool {
        matches!((self.document, other.document), (Some(a), Some(b)) if a != b)
    }

    pub(crate) fn clear_textcache(&mut self) {
        self.textcache.take();
    }
}

/// Spans are equal if they have the same level and bounds, the document is not considered.
impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.begin == other.begin && self.end == other.end
    }
}

impl Eq for Span {}

impl Hash for Span {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.begin, self.end, self.level).hash(state);
    }
}

impl Ord for Span {
    /// Document order. Comparing spans of different documents yields an order without meaning;
    /// this does not fail but is reported in debug builds.
    fn cmp(&self, other: &Self) -> Ordering {
        #[cfg(debug_assertions)]
        {
            if self.is_foreign(other) {
                tracing::warn!(
                    target: "analysedtext",
                    "comparing spans of different documents ({:?} and {:?}), the order is meaningless",
                    self.document,
                    other.document
                );
            }
        }
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}, {})", self.level, self.begin, self.end)
    }
}

impl DataSize for Span {
    const IS_DYNAMIC: bool = true;
    const STATIC_HEAP_SIZE: usize = 0;

    fn estimate_heap_size(&self) -> usize {
        self.annotations.estimate_heap_size()
    }
}
