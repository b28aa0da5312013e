use criterion::{black_box, criterion_group, criterion_main, Criterion};

use analysedtext::{AnalysedText, Level, NlpError, Regex, Section, Text};

const SENTENCE: &str = "The quick brown fox jumps over the lazy dog near the riverbank. ";

/// Tokenises every sentence, adding tokens while iterating over the sentences
fn tokenise(doc: &mut AnalysedText, expression: &Regex) -> Result<(), NlpError> {
    let mut sentences = doc.cursor(Level::Sentence);
    while let Some(handle) = sentences.next(doc) {
        let span = doc.span(handle)?;
        let sentence = span.as_sentence().expect("cursor only yields sentences");
        let offsets: Vec<(usize, usize)> = span.find_regex(expression).collect();
        for (begin, end) in offsets {
            sentence.add_token(doc, begin, end)?;
        }
    }
    Ok(())
}

fn build_document(sentences: usize, text: &str) -> Result<AnalysedText, NlpError> {
    let expression = Regex::new(r"\w+(?:[-_]\w+)*|[\.\?,]").expect("valid expression");
    let mut doc = AnalysedText::from_string(text);
    let len = SENTENCE.chars().count();
    for i in 0..sentences {
        doc.add_sentence(i * len, (i + 1) * len)?;
    }
    tokenise(&mut doc, &expression)?;
    Ok(doc)
}

pub fn bench_registration(c: &mut Criterion) {
    let text = SENTENCE.repeat(1000);

    c.bench_function("register_sentences_and_tokens", |b| {
        b.iter(|| {
            let doc = build_document(black_box(1000), &text).unwrap();
            assert!(doc.len() > 1000);
        })
    });
}

pub fn bench_iteration(c: &mut Criterion) {
    let text = SENTENCE.repeat(1000);
    let doc = build_document(1000, &text).unwrap();
    let unicode = "Ünïcödé ".repeat(8).repeat(1000);
    let mut unicode_doc = AnalysedText::from_string(unicode.as_str());
    for i in 0..8000 {
        unicode_doc.add_token(i * 8, i * 8 + 7).unwrap();
    }

    c.bench_function("iterate_tokens", |b| {
        b.iter(|| {
            let mut sumlen = 0;
            for token in black_box(&doc).tokens() {
                sumlen += token.textlen(); //just so we have something to do with the token
            }
            assert!(sumlen > 0);
        })
    });

    c.bench_function("iterate_tokens_per_sentence", |b| {
        b.iter(|| {
            let mut count = 0;
            for sentence in black_box(&doc).sentences() {
                if let Some(sentence) = sentence.as_sentence() {
                    count += sentence.tokens(&doc).count();
                }
            }
            assert!(count > 0);
        })
    });

    c.bench_function("unicode_text_access", |b| {
        b.iter(|| {
            unicode_doc.clear_text_cache();
            let mut sumlen = 0;
            for token in black_box(&unicode_doc).tokens() {
                sumlen += token.text().len();
            }
            assert!(sumlen > 0);
        })
    });
}

criterion_group!(benches, bench_registration, bench_iteration);
criterion_main!(benches);
