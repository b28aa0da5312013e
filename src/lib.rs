/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! ## Introduction
//!
//! This library holds the results of natural language processing over a single, immutable text.
//! The text is overlaid with a hierarchy of spans at increasing levels of specificity:
//! the document itself, sentences, chunks and tokens. Every span carries annotations, such as
//! part-of-speech tags or named entities, each of which may hold several alternative values
//! ranked by probability.
//!
//! **What can you do with this library?**
//!
//! * Register sentences, chunks and tokens with offsets relative to their enclosing section,
//!   spans are unique per level and bounds, re-registering returns the existing one.
//! * Iterate over the spans enclosed by any section in a stable document order, optionally
//!   filtered by level, and keep adding spans while iterating (see [`SpanCursor`]).
//! * Attach typed, probability-ranked annotations to any span (see [`AnnotationKey`]).
//! * Access the covered text of any span and convert between unicode points and UTF-8 bytes.
//!
//! All offsets are in unicode points (not bytes), begin inclusive and end exclusive.
//!
//! The higher-level API is formed by [`AnalysedText`], the typed section handles
//! ([`Sentence`], [`Chunk`], [`Token`], [`TextSection`]) with the [`Section`] trait, and
//! [`ResultSpan`]. The low-level API consists of [`Span`] and [`AnnotationStore`].

mod analysedtext;
mod annotation;
mod api;
mod blob;
mod config;
mod cursor;
mod error;
mod section;
mod span;
mod text;
mod types;

pub mod nlp;

// Our internal crate structure is not very relevant to the outside world,
// expose all structs and traits in the root namespace, and be explicit about it:

pub use analysedtext::{AnalysedText, DocumentId};
pub use annotation::{AnnotationKey, AnnotationStore, AnnotationValue, Value, Values};
pub use api::*;
pub use blob::Blob;
pub use config::{Config, Configurable};
pub use cursor::{Enclosed, SpanCursor};
pub use error::NlpError;
pub use section::{Chunk, Section, Sentence, SpanKind, TextSection, Token};
pub use span::{Span, SpanHandle};
pub use text::{FindRegexIter, FindTextIter, Text};
pub use types::*;

pub use regex::Regex;
