/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! This module contains the [`NlpError`] type, the single error type returned by all fallible
//! operations in this library.

use std::error::Error;
use std::fmt;
use std::io;

use crate::types::Level;

// ------------------------------ ERROR DEFINITIONS & IMPLEMENTATIONS -------------------------------------------------------------

/// This is the error type used throughout the library. Each variant carries the offending data
/// and a string that names the context (usually the failing method) in which the error arose.
#[derive(Debug)]
pub enum NlpError {
    /// End lies before begin. Carries the begin and end offsets.
    InvalidRange(usize, usize, &'static str),

    /// A span created relative to a parent would end beyond the parent's end.
    /// Carries the absolute end that was requested and the end of the parent.
    OutOfBounds(usize, usize, &'static str),

    /// Two spans from different documents were compared with a checked comparison
    CrossDocumentComparison(&'static str),

    /// The level can not be used in this context (e.g. adding a `Text`-level child)
    InvalidLevel(Level, &'static str),

    /// A probability outside of `[0.0, 1.0]` (or NaN)
    InvalidProbability(f64, &'static str),

    /// No such span handle, or the span was removed
    HandleError(&'static str),

    /// A cursor operation was requested that needs a current span, but there is none
    NoCurrentSpan(&'static str),

    /// A codepoint cursor lies beyond the end of the text
    CursorOutOfBounds(usize, &'static str),

    /// The blob does not hold textual content
    UnsupportedMimeType(String, &'static str),

    /// The blob is not valid UTF-8
    EncodingError(std::str::Utf8Error, &'static str),

    IOError(io::Error, String, &'static str),

    JsonError(
        serde_path_to_error::Error<serde_json::error::Error>,
        String,
        &'static str,
    ),
}

impl From<&NlpError> for String {
    /// Returns the error message as a String
    fn from(error: &NlpError) -> String {
        match error {
            NlpError::InvalidRange(begin, end, contextmsg) => format!(
                "InvalidRange: End ({}) must not lie before begin ({}) ({})",
                end, begin, contextmsg
            ),
            NlpError::OutOfBounds(end, parent_end, contextmsg) => format!(
                "OutOfBounds: Span would end at {} which exceeds the end of its parent ({}) ({})",
                end, parent_end, contextmsg
            ),
            NlpError::CrossDocumentComparison(contextmsg) => format!(
                "CrossDocumentComparison: Spans belong to different documents, their order has no meaning ({})",
                contextmsg
            ),
            NlpError::InvalidLevel(level, contextmsg) => {
                format!("InvalidLevel: Level {} is not allowed here ({})", level, contextmsg)
            }
            NlpError::InvalidProbability(probability, contextmsg) => format!(
                "InvalidProbability: Probability must be in the range 0.0 - 1.0, got {} ({})",
                probability, contextmsg
            ),
            NlpError::HandleError(contextmsg) => {
                format!("HandleError: No such span, it may have been removed ({})", contextmsg)
            }
            NlpError::NoCurrentSpan(contextmsg) => format!(
                "NoCurrentSpan: The cursor does not point at an existing span ({})",
                contextmsg
            ),
            NlpError::CursorOutOfBounds(cursor, contextmsg) => format!(
                "CursorOutOfBounds: Cursor {} lies beyond the end of the text ({})",
                cursor, contextmsg
            ),
            NlpError::UnsupportedMimeType(mimetype, contextmsg) => format!(
                "UnsupportedMimeType: Expected textual content, got {} ({})",
                mimetype, contextmsg
            ),
            NlpError::EncodingError(err, contextmsg) => {
                format!("EncodingError: {} ({})", err, contextmsg)
            }
            NlpError::IOError(err, filename, contextmsg) => {
                format!("IOError: {}: {} ({})", filename, err, contextmsg)
            }
            NlpError::JsonError(err, path, contextmsg) => {
                format!("JsonError: {} at {} ({})", err, path, contextmsg)
            }
        }
    }
}

impl fmt::Display for NlpError {
    /// Formats the error message for printing
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let errmsg: String = String::from(self);
        write!(f, "[NlpError] {}", errmsg)
    }
}

impl Error for NlpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NlpError::EncodingError(err, _) => Some(err),
            NlpError::IOError(err, _, _) => Some(err),
            NlpError::JsonError(err, _, _) => Some(err),
            _ => None,
        }
    }
}
