/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! This module contains the [`AnalysedText`], the document-level root of the model. It owns the
//! text, every registered [`Span`] and the registry that keeps those spans in document order.

use datasize::{data_size, DataSize};
use nanoid::nanoid;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::annotation::AnnotationStore;
use crate::api::ResultSpan;
use crate::blob::Blob;
use crate::config::{debug, Config, Configurable};
use crate::cursor::{Enclosed, SpanCursor};
use crate::error::NlpError;
use crate::section::{Chunk, Section, Sentence, TextSection, Token};
use crate::span::{Span, SpanHandle, SpanKey};
use crate::text::Text;
use crate::types::*;

static DOCUMENT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Process-wide unique identity of an [`AnalysedText`], used to recognise spans that stem from
/// different documents.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        Self(DOCUMENT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// The handle of the document-level span, it always occupies the first slot of the arena
pub(crate) const ROOT: SpanHandle = SpanHandle::ROOT;

/// The highest arena slot a span handle can address
pub(crate) const MAX_SPANS: usize = u32::MAX as usize;

/// An analysed text: the plain text derived from a [`Blob`] together with all the sentences,
/// chunks and tokens that analysis steps registered over it, and their annotations.
///
/// The document itself behaves as the `Text`-level span `[0, len)`. Spans are registered at most
/// once per `(level, begin, end)`, registering an existing one returns its handle. All iteration
/// follows document order: begin ascending, then end descending, then level ascending.
#[derive(Debug)]
pub struct AnalysedText {
    /// Public identifier for the document (optional)
    id: Option<String>,

    document: DocumentId,

    blob: Blob,

    /// The complete textual content
    text: Arc<str>,

    /// Length of the text in unicode points
    textlen: usize,

    /// Set if the text is pure ASCII, then no index is needed for offset conversion
    ascii: bool,

    /// UTF-8 byte positions of every n-th unicode point (n = `milestone_interval`), empty for ASCII text
    pub(crate) milestones: Vec<usize>,

    /// The interval the milestones were built with
    milestone_interval: usize,

    /// The arena of spans, the first slot holds the document-level span
    pub(crate) spans: Store<Span>,

    /// All registered spans (not the document-level span) in document order
    pub(crate) registry: BTreeMap<SpanKey, SpanHandle>,

    config: Config,
}

impl AnalysedText {
    /// Creates a document for the given blob and the plain text that was derived from it.
    /// The text must be provided as-is, offsets of all spans refer to it.
    pub fn new(blob: Blob, text: impl Into<String>) -> Self {
        let text: String = text.into();
        let document = DocumentId::next();
        let textlen = text.chars().count();
        let root = Span {
            intid: Some(ROOT),
            document: Some(document),
            level: Level::Text,
            begin: 0,
            end: textlen,
            annotations: AnnotationStore::new(),
            textcache: OnceCell::new(),
        };
        let mut doc = Self {
            id: None,
            document,
            blob,
            ascii: text.is_ascii(),
            text: text.into(),
            textlen,
            milestones: Vec::new(),
            milestone_interval: 0,
            spans: vec![Some(root)],
            registry: BTreeMap::new(),
            config: Config::default(),
        };
        doc.build_index();
        doc
    }

    /// Creates a document from plain text, a `text/plain` blob is derived from it
    pub fn from_string(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let blob = Blob::from_text(&text);
        Self::new(blob, text)
    }

    /// Creates a document from a textual blob by decoding its content as UTF-8.
    /// Fails with [`NlpError::UnsupportedMimeType`] if the blob is not `text/*` or declares a
    /// charset other than UTF-8 (or its subset US-ASCII), and with [`NlpError::EncodingError`]
    /// if the content is not valid UTF-8.
    pub fn from_blob(blob: Blob) -> Result<Self, NlpError> {
        if !blob.is_text() {
            return Err(NlpError::UnsupportedMimeType(
                blob.mimetype().to_string(),
                "AnalysedText::from_blob",
            ));
        }
        if let Some(charset) = blob.charset() {
            if !["utf-8", "utf8", "us-ascii"]
                .iter()
                .any(|supported| charset.eq_ignore_ascii_case(supported))
            {
                return Err(NlpError::UnsupportedMimeType(
                    blob.mimetype().to_string(),
                    "AnalysedText::from_blob: unsupported charset",
                ));
            }
        }
        let text = std::str::from_utf8(blob.content())
            .map_err(|e| NlpError::EncodingError(e, "AnalysedText::from_blob"))?
            .to_string();
        Ok(Self::new(blob, text))
    }

    /// Builder pattern to set the public identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the public identifier, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn document_id(&self) -> DocumentId {
        self.document
    }

    /// Returns the blob this document was derived from
    pub fn blob(&self) -> &Blob {
        &self.blob
    }

    /// Returns a shared reference-counted handle to the text
    pub fn text_arc(&self) -> Arc<str> {
        self.text.clone()
    }

    /// Returns the document-level section, which all sentences are added to
    pub fn root(&self) -> TextSection {
        TextSection(ROOT)
    }

    /// Returns the document-level span
    pub fn as_span(&self) -> &Span {
        //the root can not be removed
        self.spans[0].as_ref().expect("root span must exist")
    }

    /// Returns the number of registered spans, the document-level span is not counted
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Retrieves a span by handle. Fails with [`NlpError::HandleError`] if the handle is
    /// unknown to this document or the span was removed.
    pub fn get(&self, handle: impl Into<SpanHandle>) -> Result<&Span, NlpError> {
        self.spans
            .get(handle.into().as_usize())
            .and_then(|slot| slot.as_ref())
            .ok_or(NlpError::HandleError("Span in AnalysedText"))
    }

    fn get_mut(&mut self, handle: impl Into<SpanHandle>) -> Result<&mut Span, NlpError> {
        self.spans
            .get_mut(handle.into().as_usize())
            .and_then(|slot| slot.as_mut())
            .ok_or(NlpError::HandleError("Span in AnalysedText"))
    }

    /// Retrieves a span by handle, wrapped along with a reference to this document so its
    /// text can be accessed.
    pub fn span(&self, handle: impl Into<SpanHandle>) -> Result<ResultSpan<'_>, NlpError> {
        let span = self.get(handle)?;
        Ok(ResultSpan::new(span, self))
    }

    /// Looks up a registered span by its level and absolute bounds
    pub fn find(&self, level: Level, begin: usize, end: usize) -> Option<SpanHandle> {
        if level == Level::Text && begin == 0 && end == self.textlen {
            return Some(ROOT);
        }
        self.registry
            .get(&SpanKey { begin, end, level })
            .copied()
    }

    /// Returns the annotations of the span
    pub fn annotations(&self, handle: impl Into<SpanHandle>) -> Result<&AnnotationStore, NlpError> {
        Ok(self.get(handle)?.annotations())
    }

    /// Returns the annotations of the span for modification
    pub fn annotations_mut(
        &mut self,
        handle: impl Into<SpanHandle>,
    ) -> Result<&mut AnnotationStore, NlpError> {
        Ok(self.get_mut(handle)?.annotations_mut())
    }

    /// Adds a sentence, with offsets relative to the document
    pub fn add_sentence(&mut self, begin: usize, end: usize) -> Result<Sentence, NlpError> {
        self.root().add_sentence(self, begin, end)
    }

    /// Adds a chunk, with offsets relative to the document
    pub fn add_chunk(&mut self, begin: usize, end: usize) -> Result<Chunk, NlpError> {
        self.root().add_chunk(self, begin, end)
    }

    /// Adds a token, with offsets relative to the document
    pub fn add_token(&mut self, begin: usize, end: usize) -> Result<Token, NlpError> {
        self.root().add_token(self, begin, end)
    }

    /// Adds a span of any level other than `Text`, with offsets relative to the document
    pub fn add_child(
        &mut self,
        level: Level,
        begin: usize,
        end: usize,
    ) -> Result<SpanHandle, NlpError> {
        self.root().add_child(self, level, begin, end)
    }

    /// Creates a span relative to the parent and registers it, or returns the handle of the
    /// span that is already registered with the same level and bounds.
    pub(crate) fn add_relative(
        &mut self,
        parent: SpanHandle,
        level: Level,
        begin: usize,
        end: usize,
    ) -> Result<SpanHandle, NlpError> {
        if level == Level::Text {
            return Err(NlpError::InvalidLevel(
                level,
                "the document-level span can not be added as a child",
            ));
        }
        let parent = self.get(parent)?;
        if !parent.level().is_container() {
            return Err(NlpError::InvalidLevel(
                parent.level(),
                "spans of this level can not contain other spans",
            ));
        }
        if level < parent.level() || (level == Level::Sentence && parent.level() != Level::Text) {
            return Err(NlpError::InvalidLevel(
                level,
                "a section can only contain spans of its own or a more specific level, sentences only the document",
            ));
        }
        let span = Span::new_relative(level, parent, begin, end)?;
        self.register(span)
    }

    fn register(&mut self, mut span: Span) -> Result<SpanHandle, NlpError> {
        let key = span.key();
        if let Some(handle) = self.registry.get(&key) {
            debug(self.config(), || {
                format!("AnalysedText.register: {} already exists as {:?}", span, handle)
            });
            return Ok(*handle);
        }
        if self.spans.len() > MAX_SPANS {
            return Err(NlpError::HandleError(
                "AnalysedText.register: no more spans can be registered",
            ));
        }
        let handle = SpanHandle::new(self.spans.len());
        span.intid = Some(handle);
        span.document = Some(self.document);
        debug(self.config(), || {
            format!("AnalysedText.register: new {} as {:?}", span, handle)
        });
        self.spans.push(Some(span));
        self.registry.insert(key, handle);
        Ok(handle)
    }

    /// Unregisters a span and returns it, the slot of the span remains empty so all other handles stay valid
    pub(crate) fn remove_span(&mut self, handle: SpanHandle) -> Result<Span, NlpError> {
        if handle == ROOT {
            return Err(NlpError::HandleError(
                "the document-level span can not be removed",
            ));
        }
        let mut span = self
            .spans
            .get_mut(handle.as_usize())
            .and_then(|slot| slot.take())
            .ok_or(NlpError::HandleError("Span in AnalysedText"))?;
        self.registry.remove(&span.key());
        span.intid = None;
        debug(self.config(), || {
            format!("AnalysedText.remove_span: removed {} ({:?})", span, handle)
        });
        Ok(span)
    }

    /// Returns a detached cursor over all registered spans of the given levels, in document
    /// order. Unlike [`Self::enclosed()`], the cursor does not borrow the document, so spans
    /// may be added while iterating.
    pub fn cursor(&self, levels: impl Into<LevelSet>) -> SpanCursor {
        self.root().cursor(self, levels)
    }

    /// Iterates over all registered spans of the given levels, in document order
    pub fn enclosed(&self, levels: impl Into<LevelSet>) -> Enclosed<'_> {
        self.root().children_of_type(self, levels)
    }

    /// Iterates over the registered spans of the given levels that lie within `[begin, end)`
    pub fn enclosed_in(
        &self,
        levels: impl Into<LevelSet>,
        begin: usize,
        end: usize,
    ) -> Result<Enclosed<'_>, NlpError> {
        self.root().children_in(self, levels, begin, end)
    }

    /// Iterates over all registered spans, in document order
    pub fn spans(&self) -> Enclosed<'_> {
        self.root().children(self)
    }

    pub fn sentences(&self) -> Enclosed<'_> {
        self.enclosed(Level::Sentence)
    }

    pub fn chunks(&self) -> Enclosed<'_> {
        self.enclosed(Level::Chunk)
    }

    pub fn tokens(&self) -> Enclosed<'_> {
        self.enclosed(Level::Token)
    }

    /// Drops the cached text positions of all spans, they are recomputed upon next access
    pub fn clear_text_cache(&mut self) {
        for span in self.spans.iter_mut().flatten() {
            span.clear_textcache();
        }
    }

    /// Returns an estimate of the memory consumption of this document in bytes
    pub fn meminfo(&self) -> usize {
        data_size(self)
    }

    /// (Re)builds the index used to convert between unicode points and UTF-8 bytes
    fn build_index(&mut self) {
        self.milestones.clear();
        self.milestone_interval = self.config.milestone_interval();
        if !self.ascii && self.milestone_interval > 0 {
            let interval = self.milestone_interval;
            self.milestones = self
                .text
                .char_indices()
                .enumerate()
                .filter(|(charpos, _)| charpos % interval == 0)
                .map(|(_, (bytepos, _))| bytepos)
                .collect();
        }
        debug(self.config(), || {
            format!(
                "AnalysedText.build_index: {} unicode points, {} bytes, {} milestones",
                self.textlen,
                self.text.len(),
                self.milestones.len()
            )
        });
    }

    /// Returns the nearest milestone at or before the unicode point, as `(charpos, bytepos)`
    fn milestone_before_char(&self, charpos: usize) -> (usize, usize) {
        if self.milestones.is_empty() {
            (0, 0)
        } else {
            let index = (charpos / self.milestone_interval).min(self.milestones.len() - 1);
            (index * self.milestone_interval, self.milestones[index])
        }
    }

    /// Returns the nearest milestone at or before the byte, as `(charpos, bytepos)`
    fn milestone_before_byte(&self, bytepos: usize) -> (usize, usize) {
        match self.milestones.partition_point(|milestone| *milestone <= bytepos) {
            0 => (0, 0),
            index => ((index - 1) * self.milestone_interval, self.milestones[index - 1]),
        }
    }
}

impl<'slf> Text<'slf, 'slf> for AnalysedText {
    fn text(&'slf self) -> &'slf str {
        &self.text
    }

    fn textlen(&self) -> usize {
        self.textlen
    }

    fn absolute_cursor(&self, cursor: usize) -> usize {
        cursor
    }

    /// Converts a unicode point to a UTF-8 byte position, using the milestones as a starting point
    fn utf8byte(&self, abscursor: usize) -> Result<usize, NlpError> {
        if abscursor > self.textlen {
            return Err(NlpError::CursorOutOfBounds(abscursor, "AnalysedText::utf8byte"));
        } else if abscursor == self.textlen {
            return Ok(self.text.len());
        } else if self.ascii {
            return Ok(abscursor);
        }
        let (charpos, bytepos) = self.milestone_before_char(abscursor);
        self.text[bytepos..]
            .char_indices()
            .nth(abscursor - charpos)
            .map(|(offset, _)| bytepos + offset)
            .ok_or(NlpError::CursorOutOfBounds(abscursor, "AnalysedText::utf8byte"))
    }

    /// Converts a UTF-8 byte position to a unicode point, the byte must be on a character boundary
    fn utf8byte_to_charpos(&self, bytecursor: usize) -> Result<usize, NlpError> {
        if bytecursor > self.text.len() || !self.text.is_char_boundary(bytecursor) {
            return Err(NlpError::CursorOutOfBounds(
                bytecursor,
                "AnalysedText::utf8byte_to_charpos (cursor in bytes)",
            ));
        } else if self.ascii {
            return Ok(bytecursor);
        }
        let (charpos, bytepos) = self.milestone_before_byte(bytecursor);
        Ok(charpos + self.text[bytepos..bytecursor].chars().count())
    }
}

impl Configurable for AnalysedText {
    fn config(&self) -> &Config {
        &self.config
    }

    fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Sets the configuration, this rebuilds the text index and drops cached text positions
    fn set_config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        if self.id.is_none() && self.config.generate_ids() {
            self.id = Some(format!("T{}", nanoid!()));
        }
        self.build_index();
        self.clear_text_cache();
        self
    }
}

impl DataSize for AnalysedText {
    const IS_DYNAMIC: bool = true;
    const STATIC_HEAP_SIZE: usize = 0;

    fn estimate_heap_size(&self) -> usize {
        self.id.as_ref().map(|id| id.capacity()).unwrap_or(0)
            + self.blob.len()
            + self.text.len()
            + self.milestones.capacity() * std::mem::size_of::<usize>()
            + self.spans.capacity() * std::mem::size_of::<Option<Span>>()
            + self
                .spans
                .iter()
                .flatten()
                .map(|span| span.estimate_heap_size())
                .sum::<usize>()
            + self.registry.len()
                * (std::mem::size_of::<SpanKey>() + std::mem::size_of::<SpanHandle>())
    }
}
