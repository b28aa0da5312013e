#![allow(dead_code)]
use analysedtext::*;

pub const EXAMPLE_TEXT: &str = "The Stanbol enhancer can detect famous \
    cities such as Paris and people such as Bob Marley. With \
    disambiguation it would even be able to detect the Comedian \
    Bob Marley trafeling to Paris in Texas.";

/// Returns the relative offsets of the first occurrence of the fragment in a span
pub fn find(doc: &AnalysedText, handle: impl Into<SpanHandle>, fragment: &str) -> (usize, usize) {
    doc.span(handle)
        .expect("span must exist")
        .find_text(fragment)
        .next()
        .expect("fragment must exist")
}

pub fn setup_example_1() -> Result<AnalysedText, NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT)
        .with_id("example1")
        .with_config(Config::default().with_debug(true));

    let sentence_end = EXAMPLE_TEXT.find('.').expect("text has a full stop") + 1;
    let sent1 = doc.add_sentence(0, sentence_end)?;
    let sent2 = doc.add_sentence(sentence_end + 1, EXAMPLE_TEXT.len())?;

    sent1.add_token(&mut doc, 0, 3)?;
    let stanbol = sent1.add_token(&mut doc, 4, 11)?;
    let (begin, end) = find(&doc, sent1, "enhancer");
    let enhancer = sent1.add_token(&mut doc, begin, end)?;

    //a chunk added to the document rather than the sentence
    let chunk_begin = doc.get(stanbol)?.begin();
    let chunk_end = doc.get(enhancer)?.end();
    doc.add_chunk(chunk_begin, chunk_end)?;

    let (begin, end) = find(&doc, sent1, "Paris");
    sent1.add_token(&mut doc, begin, end)?;

    let (begin, end) = find(&doc, sent1, "Bob Marley");
    let bob_marley = sent1.add_chunk(&mut doc, begin, end)?;
    bob_marley.add_token(&mut doc, 0, 3)?;
    bob_marley.add_token(&mut doc, 4, 10)?;

    sent2.add_token(&mut doc, 0, 4)?;
    sent2.add_token(&mut doc, 5, 5 + "disambiguation".len())?;

    let (begin, end) = find(&doc, sent2, "Comedian Bob Marley");
    let comedian_bob_marley = sent2.add_chunk(&mut doc, begin, end)?;
    comedian_bob_marley.add_token(&mut doc, 0, "Comedian".len())?;
    comedian_bob_marley.add_token(&mut doc, 9, 9 + "Bob".len())?;
    comedian_bob_marley.add_token(&mut doc, 13, 13 + "Marley".len())?;

    let (begin, end) = find(&doc, sent2, "Paris in Texas");
    let paris_in_texas = sent2.add_chunk(&mut doc, begin, end)?;
    paris_in_texas.add_token(&mut doc, 0, "Paris".len())?;
    let (begin, end) = find(&doc, paris_in_texas, "in");
    paris_in_texas.add_token(&mut doc, begin, end)?;
    let (begin, end) = find(&doc, paris_in_texas, "Texas");
    paris_in_texas.add_token(&mut doc, begin, end)?;

    Ok(doc)
}

pub const EXPECTED_SENTENCES: [&str; 2] = [
    "The Stanbol enhancer can detect famous cities such as Paris and people such as Bob Marley.",
    "With disambiguation it would even be able to detect the Comedian Bob Marley trafeling to Paris in Texas.",
];

pub const EXPECTED_CHUNKS: [&str; 4] = [
    "Stanbol enhancer",
    "Bob Marley",
    "Comedian Bob Marley",
    "Paris in Texas",
];

pub const EXPECTED_TOKENS: [&str; 14] = [
    "The",
    "Stanbol",
    "enhancer",
    "Paris",
    "Bob",
    "Marley",
    "With",
    "disambiguation",
    "Comedian",
    "Bob",
    "Marley",
    "Paris",
    "in",
    "Texas",
];

pub const TOKEN_LENGTH: usize = 5;
pub const CHUNK_LENGTH: usize = TOKEN_LENGTH * 3;
pub const SENTENCE_LENGTH: usize = CHUNK_LENGTH * 3;

/// Builds three sentences of three chunks of three tokens each, all adjacent. The chunks and
/// tokens are added while iterating over the sentences.
pub fn setup_hierarchy() -> Result<AnalysedText, NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    for s in 0..3 {
        doc.add_sentence(s * SENTENCE_LENGTH, (s + 1) * SENTENCE_LENGTH)?;
    }
    let mut sentences = doc.cursor(Level::Sentence);
    while let Some(handle) = sentences.next(&doc) {
        let sentence = doc
            .span(handle)?
            .as_sentence()
            .expect("cursor only yields sentences");
        for c in 0..3 {
            let chunk = sentence.add_chunk(&mut doc, c * CHUNK_LENGTH, (c + 1) * CHUNK_LENGTH)?;
            for t in 0..3 {
                chunk.add_token(&mut doc, t * TOKEN_LENGTH, (t + 1) * TOKEN_LENGTH)?;
            }
        }
    }
    Ok(doc)
}
