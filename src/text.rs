/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! This module defines and partially implements the [`Text`] trait.

use regex::{Matches, Regex};

use crate::error::NlpError;

/// This trait provides methods that operate on structures that hold or represent text content.
/// Positions are always unicode codepoints, relative to the structure the method is called on,
/// unless stated otherwise.
pub trait Text<'doc, 'slf>
where
    'doc: 'slf,
{
    /// Returns a reference to the text
    fn text(&'slf self) -> &'doc str;

    /// Returns the length of the text in unicode points
    /// For bytes, use `Self::text().len()` instead.
    fn textlen(&'slf self) -> usize;

    /// Converts a unicode character position to a UTF-8 byte position
    fn utf8byte(&'slf self, cursor: usize) -> Result<usize, NlpError>;

    /// Converts a UTF-8 byte position into a unicode position
    fn utf8byte_to_charpos(&'slf self, bytecursor: usize) -> Result<usize, NlpError>;

    /// Resolves a cursor relative to this structure to an absolute cursor (i.e. relative to the document).
    fn absolute_cursor(&'slf self, cursor: usize) -> usize;

    fn is_empty(&'slf self) -> bool {
        self.text().is_empty()
    }

    /// Finds the utf-8 byte position where the specified text subslice begins
    /// The returned offset is relative to this structure
    fn subslice_utf8_offset(&'slf self, subslice: &str) -> Option<usize> {
        let self_begin = self.text().as_ptr() as usize;
        let sub_begin = subslice.as_ptr() as usize;
        if sub_begin < self_begin || sub_begin > self_begin.wrapping_add(self.text().len()) {
            None
        } else {
            Some(sub_begin.wrapping_sub(self_begin))
        }
    }

    /// Returns a string reference to a slice of text as specified by a relative offset
    fn text_by_offset(&'slf self, begin: usize, end: usize) -> Result<&'doc str, NlpError> {
        if end < begin {
            return Err(NlpError::InvalidRange(begin, end, "Text::text_by_offset"));
        }
        let beginbyte = self.utf8byte(begin)?;
        let endbyte = self.utf8byte(end)?;
        Ok(&self.text()[beginbyte..endbyte])
    }

    /// Searches for the specified text fragment. Returns an iterator over the `(begin, end)`
    /// offsets of all non-overlapping matches, relative to this structure, so they can be passed
    /// directly to the `add_*` methods of a section.
    fn find_text<'fragment>(&'slf self, fragment: &'fragment str) -> FindTextIter<'doc, 'fragment> {
        FindTextIter {
            text: self.text(),
            fragment,
            bytepos: 0,
            charpos: 0,
        }
    }

    /// Searches the text using a regular expression. Returns an iterator over the `(begin, end)`
    /// offsets of all non-overlapping matches, relative to this structure.
    fn find_regex<'regex>(&'slf self, expression: &'regex Regex) -> FindRegexIter<'doc, 'regex> {
        let text = self.text();
        FindRegexIter {
            text,
            matches: expression.find_iter(text),
            bytepos: 0,
            charpos: 0,
        }
    }
}

/// Iterator over the matches of a text fragment, see [`Text::find_text()`]
pub struct FindTextIter<'doc, 'fragment> {
    text: &'doc str,
    fragment: &'fragment str,
    /// Byte position from which to search
    bytepos: usize,
    /// Codepoint position corresponding to bytepos
    charpos: usize,
}

impl<'doc, 'fragment> Iterator for FindTextIter<'doc, 'fragment> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.fragment.is_empty() || self.bytepos > self.text.len() {
            return None;
        }
        let remainder = &self.text[self.bytepos..];
        let foundbyte = remainder.find(self.fragment)?;
        let begin = self.charpos + remainder[..foundbyte].chars().count();
        let end = begin + self.fragment.chars().count();
        self.bytepos += foundbyte + self.fragment.len();
        self.charpos = end;
        Some((begin, end))
    }
}

/// Iterator over the matches of a regular expression, see [`Text::find_regex()`]
pub struct FindRegexIter<'doc, 'regex> {
    text: &'doc str,
    matches: Matches<'regex, 'doc>,
    /// Byte position where the previous match ended
    bytepos: usize,
    /// Codepoint position corresponding to bytepos
    charpos: usize,
}

impl<'doc, 'regex> Iterator for FindRegexIter<'doc, 'regex> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.matches.next()?;
        let begin = self.charpos + self.text[self.bytepos..m.start()].chars().count();
        let end = begin + m.as_str().chars().count();
        self.bytepos = m.end();
        self.charpos = end;
        Some((begin, end))
    }
}
