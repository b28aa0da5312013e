/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

use std::fmt;
use std::sync::Arc;

/// An opaque handle to the raw content a document's text was derived from. The
/// content is immutable and cheap to clone.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    mimetype: String,
    content: Arc<[u8]>,
}

impl Blob {
    pub fn new(mimetype: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mimetype: mimetype.into(),
            content: content.into(),
        }
    }

    /// Wraps plain text as a `text/plain` blob
    pub fn from_text(text: &str) -> Self {
        Self::new("text/plain; charset=UTF-8", text.as_bytes())
    }

    /// Returns the full mimetype, including any parameters
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    /// Returns the mimetype without parameters, e.g. `text/plain`
    pub fn essence(&self) -> &str {
        self.mimetype
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// Returns the value of the `charset` parameter of the mimetype, if any
    pub fn charset(&self) -> Option<&str> {
        self.mimetype.split(';').skip(1).find_map(|param| {
            let (name, value) = param.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
    }

    /// Is this textual content (`text/*`)?
    pub fn is_text(&self) -> bool {
        self.essence().starts_with("text/")
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Blob")
            .field("mimetype", &self.mimetype)
            .field("len", &self.content.len())
            .finish()
    }
}
