/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

// This root module holds the higher-level API: spans wrapped together with the document they
// belong to, so their text and enclosed spans can be reached without passing the document around.

mod span;

pub use span::*;
