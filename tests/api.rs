mod common;
use crate::common::*;

use analysedtext::nlp::*;
use analysedtext::*;

#[test]
fn instantiation() -> Result<(), NlpError> {
    let doc = AnalysedText::from_string(EXAMPLE_TEXT);
    assert_eq!(doc.text(), EXAMPLE_TEXT);
    assert_eq!(doc.textlen(), EXAMPLE_TEXT.len());
    let root = doc.span(doc.root())?;
    assert_eq!(root.text(), EXAMPLE_TEXT);
    assert_eq!(root.begin(), 0);
    assert_eq!(root.end(), EXAMPLE_TEXT.len());
    assert_eq!(root.level(), Level::Text);
    assert!(doc.is_empty());
    assert_eq!(doc.blob().essence(), "text/plain");
    Ok(())
}

#[test]
fn span_filter() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    let sentences: Vec<&str> = doc.sentences().map(|s| s.text()).collect();
    assert_eq!(sentences, EXPECTED_SENTENCES);
    let chunks: Vec<&str> = doc.chunks().map(|s| s.text()).collect();
    assert_eq!(chunks, EXPECTED_CHUNKS);
    let tokens: Vec<&str> = doc.tokens().map(|s| s.text()).collect();
    assert_eq!(tokens, EXPECTED_TOKENS);
    assert!(doc.tokens().all(|token| token.level() == Level::Token));
    assert_eq!(doc.len(), 2 + 4 + 14);
    Ok(())
}

#[test]
fn add_span_methods() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let token: SpanHandle = doc.add_token(4, 11)?.into();
    let chunk: SpanHandle = doc.add_chunk(4, 19)?.into();
    let sentence: SpanHandle = doc.add_sentence(0, 91)?.into();
    let all: Vec<SpanHandle> = doc.spans().map(|span| span.handle()).collect();
    assert_eq!(all, vec![sentence, chunk, token]);
    Ok(())
}

#[test]
fn exceeds_relative_span() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let sentence = doc.add_sentence(0, 10)?;
    assert!(matches!(
        sentence.add_chunk(&mut doc, 5, 15),
        Err(NlpError::OutOfBounds(15, 10, _))
    ));
    assert_eq!(doc.chunks().count(), 0);
    Ok(())
}

#[test]
fn invalid_range() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    assert!(matches!(
        doc.add_sentence(10, 5),
        Err(NlpError::InvalidRange(10, 5, _))
    ));
    let sentence = doc.add_sentence(0, 10)?;
    assert!(matches!(
        sentence.add_token(&mut doc, 6, 2),
        Err(NlpError::InvalidRange(6, 2, _))
    ));
    assert_eq!(doc.len(), 1);
    Ok(())
}

#[test]
fn beyond_end_of_text() {
    let mut doc = AnalysedText::from_string("short");
    assert!(matches!(
        doc.add_token(0, 6),
        Err(NlpError::OutOfBounds(6, 5, _))
    ));
}

#[test]
fn text_level_child_rejected() {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    assert!(matches!(
        doc.add_child(Level::Text, 0, 5),
        Err(NlpError::InvalidLevel(Level::Text, _))
    ));
}

#[test]
fn deduplication() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let sentence = doc.add_sentence(0, 90)?;
    let a = sentence.add_token(&mut doc, 4, 11)?;
    doc.annotations_mut(a)?
        .add_value(&POS_ANNOTATION, Value::new(PosTag::new("NNP")));
    //same absolute bounds, reached via the document level
    let b = doc.add_token(4, 11)?;
    assert_eq!(a, b);
    assert_eq!(doc.tokens().count(), 1);
    //the annotations of the existing span are kept
    assert_eq!(
        doc.span(b)?.annotation(&POS_ANNOTATION).map(|v| v.value().tag()),
        Some("NNP")
    );
    //same bounds at a different level is a different span
    let chunk = doc.add_chunk(4, 11)?;
    assert_ne!(SpanHandle::from(chunk), SpanHandle::from(a));
    assert_eq!(doc.len(), 3);
    Ok(())
}

#[test]
fn zero_length_span() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let sentence = doc.add_sentence(0, 10)?;
    let empty = sentence.add_token(&mut doc, 3, 3)?;
    assert_eq!(doc.span(empty)?.text(), "");
    //a zero-length span at the very end of a section is not one of its children
    sentence.add_token(&mut doc, 10, 10)?;
    let children: Vec<(usize, usize)> = sentence
        .children(&doc)
        .map(|span| (span.begin(), span.end()))
        .collect();
    assert_eq!(children, vec![(3, 3)]);
    Ok(())
}

#[test]
fn document_order() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    doc.add_token(12, 20)?;
    doc.add_token(4, 11)?;
    doc.add_chunk(4, 20)?;
    doc.add_sentence(0, 90)?;
    doc.add_chunk(0, 90)?;
    doc.add_token(0, 3)?;
    let order: Vec<String> = doc.spans().map(|span| span.as_ref().to_string()).collect();
    assert_eq!(
        order,
        vec![
            "Sentence [0, 90)",
            "Chunk [0, 90)",
            "Token [0, 3)",
            "Chunk [4, 20)",
            "Token [4, 11)",
            "Token [12, 20)",
        ]
    );
    //iteration is stable
    let again: Vec<String> = doc.spans().map(|span| span.as_ref().to_string()).collect();
    assert_eq!(order, again);
    Ok(())
}

#[test]
fn same_bounds_at_different_levels() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let sentence = doc.add_sentence(0, 11)?;
    let chunk = doc.add_chunk(0, 11)?;
    chunk.add_token(&mut doc, 0, 3)?;
    let chunk_children: Vec<String> = chunk
        .children(&doc)
        .map(|span| span.as_ref().to_string())
        .collect();
    assert_eq!(chunk_children, vec!["Token [0, 3)"]);
    let sentence_children: Vec<String> = sentence
        .children(&doc)
        .map(|span| span.as_ref().to_string())
        .collect();
    assert_eq!(sentence_children, vec!["Chunk [0, 11)", "Token [0, 3)"]);
    //sub-range starting at the begin of the section is bound the same way
    let in_range: Vec<String> = chunk
        .children_in(&doc, LevelSet::all(), 0, 11)?
        .map(|span| span.as_ref().to_string())
        .collect();
    assert_eq!(in_range, vec!["Token [0, 3)"]);
    Ok(())
}

#[test]
fn containment_is_acyclic() -> Result<(), NlpError> {
    let mut doc = setup_example_1()?;
    //duplicate the bounds of existing spans at other levels
    let spans: Vec<(Level, usize, usize)> = doc
        .spans()
        .map(|span| (span.level(), span.begin(), span.end()))
        .collect();
    for (level, begin, end) in spans {
        match level {
            Level::Sentence => {
                doc.add_chunk(begin, end)?;
            }
            Level::Chunk => {
                doc.add_token(begin, end)?;
            }
            _ => {}
        }
    }
    for parent in doc.spans() {
        for child in parent.enclosed(LevelSet::all()) {
            assert!(
                child.enclosed(LevelSet::all()).all(|grandchild| grandchild != parent),
                "{} and {} contain each other",
                parent,
                child
            );
        }
    }
    Ok(())
}

#[test]
fn child_levels() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let sentence = doc.add_sentence(0, 38)?;
    let chunk = sentence.add_chunk(&mut doc, 4, 21)?;
    assert!(matches!(
        chunk.add_child(&mut doc, Level::Sentence, 0, 7),
        Err(NlpError::InvalidLevel(Level::Sentence, _))
    ));
    assert!(matches!(
        sentence.add_child(&mut doc, Level::Sentence, 0, 7),
        Err(NlpError::InvalidLevel(Level::Sentence, _))
    ));
    //nested chunks are allowed
    let nested = chunk.add_chunk(&mut doc, 0, 7)?;
    assert_eq!(doc.span(nested)?.text(), "Stanbol");
    assert_eq!(doc.len(), 3);
    Ok(())
}

#[test]
fn span_hierarchy() -> Result<(), NlpError> {
    let doc = setup_hierarchy()?;
    let sentences: Vec<ResultSpan> = doc.sentences().collect();
    assert_eq!(sentences.len(), 3);
    for (s, sentence) in sentences.iter().enumerate() {
        assert_eq!(sentence.begin(), s * SENTENCE_LENGTH);
        assert_eq!(sentence.end(), (s + 1) * SENTENCE_LENGTH);
        let section = sentence.as_sentence().expect("must be a sentence");
        let chunks: Vec<ResultSpan> = section.chunks(&doc).collect();
        assert_eq!(chunks.len(), 3, "3 chunks expected in sentence");
        for (c, chunk) in chunks.iter().enumerate() {
            let chunk_begin = sentence.begin() + c * CHUNK_LENGTH;
            assert_eq!(chunk.begin(), chunk_begin);
            assert_eq!(chunk.end(), chunk_begin + CHUNK_LENGTH);
            let tokens: Vec<ResultSpan> = chunk
                .as_chunk()
                .expect("must be a chunk")
                .tokens(&doc)
                .collect();
            assert_eq!(tokens.len(), 3, "3 tokens expected in chunk");
            for (t, token) in tokens.iter().enumerate() {
                assert_eq!(token.begin(), chunk_begin + t * TOKEN_LENGTH);
                assert_eq!(token.end(), chunk_begin + (t + 1) * TOKEN_LENGTH);
            }
        }
        assert_eq!(section.tokens(&doc).count(), 9, "9 tokens expected in sentence");
    }
    assert_eq!(doc.chunks().count(), 9);
    assert_eq!(doc.tokens().count(), 27);

    //token order at the document level follows the nesting
    let begins: Vec<usize> = doc.tokens().map(|token| token.begin()).collect();
    let expected: Vec<usize> = (0..27).map(|t| t * TOKEN_LENGTH).collect();
    assert_eq!(begins, expected);

    //sentences and chunks mixed
    let mut sentence_count = 0;
    let mut chunk_count = 0;
    for span in doc.enclosed([Level::Sentence, Level::Chunk]) {
        match span.kind() {
            SpanKind::Sentence(_) => {
                //a sentence is always immediately followed by its chunks
                assert_eq!(chunk_count, sentence_count * 3);
                sentence_count += 1;
            }
            SpanKind::Chunk(_) => chunk_count += 1,
            other => panic!("unexpected span {:?}", other),
        }
    }
    assert_eq!(sentence_count, 3);
    assert_eq!(chunk_count, 9);
    Ok(())
}

#[test]
fn sub_section_iteration() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    let levels = [Level::Sentence, Level::Token];

    let texts: Vec<&str> = doc.enclosed_in(levels, 4, 90)?.map(|span| span.text()).collect();
    assert_eq!(texts, vec!["Stanbol", "enhancer", "Paris", "Bob", "Marley"]);

    let last = doc.sentences().last().expect("sentences exist");
    let last = last.as_sentence().expect("must be a sentence");
    let texts: Vec<&str> = last
        .children_in(&doc, levels, 5, 25)?
        .map(|span| span.text())
        .collect();
    assert_eq!(texts, vec!["disambiguation"]);

    assert!(matches!(
        last.children_in(&doc, levels, 5, 500),
        Err(NlpError::OutOfBounds(_, _, _))
    ));
    assert!(matches!(
        last.children_in(&doc, levels, 9, 5),
        Err(NlpError::InvalidRange(9, 5, _))
    ));
    Ok(())
}

#[test]
fn children_of_chunk_added_at_document_level() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    let chunk = doc.chunks().next().expect("chunk exists");
    assert_eq!(chunk.text(), "Stanbol enhancer");
    let tokens: Vec<&str> = chunk
        .as_chunk()
        .expect("must be a chunk")
        .tokens(&doc)
        .map(|token| token.text())
        .collect();
    //containment is positional, not by creation path
    assert_eq!(tokens, vec!["Stanbol", "enhancer"]);
    Ok(())
}

#[test]
fn iteration_filter_empty_levelset() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    assert_eq!(doc.enclosed(LevelSet::empty()).count(), 0);
    assert_eq!(doc.spans().count(), doc.len());
    Ok(())
}

#[test]
fn add_while_iterating() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let sentence = doc.add_sentence(0, 90)?;
    sentence.add_token(&mut doc, 12, 20)?;
    let mut cursor = sentence.cursor(&doc, Level::Token);
    let mut visited = Vec::new();
    while let Some(handle) = cursor.next(&doc) {
        let begin = doc.get(handle)?.begin();
        visited.push(begin);
        if begin == 12 {
            //ahead of the cursor: will be visited
            sentence.add_token(&mut doc, 25, 31)?;
            //behind the cursor: will not be visited
            sentence.add_token(&mut doc, 4, 11)?;
            //an existing span: nothing new to visit
            sentence.add_token(&mut doc, 12, 20)?;
        }
    }
    assert_eq!(visited, vec![12, 25]);
    let all: Vec<usize> = sentence.tokens(&doc).map(|t| t.begin()).collect();
    assert_eq!(all, vec![4, 12, 25]);
    //the cursor stays exhausted
    doc.add_token(80, 85)?;
    assert_eq!(cursor.next(&doc), None);
    Ok(())
}

#[test]
fn cursor_remove() -> Result<(), NlpError> {
    let mut doc = setup_example_1()?;
    let mut cursor = doc.cursor(Level::Token);
    assert!(matches!(
        cursor.remove(&mut doc),
        Err(NlpError::NoCurrentSpan(_))
    ));
    let mut removed = 0;
    while let Some(handle) = cursor.next(&doc) {
        if doc.span(handle)?.text() == "Bob" {
            let span = cursor.remove(&mut doc)?;
            assert_eq!(span.level(), Level::Token);
            assert!(span.handle().is_none());
            //second remove of the same span
            assert!(matches!(
                cursor.remove(&mut doc),
                Err(NlpError::NoCurrentSpan(_))
            ));
            assert!(matches!(doc.get(handle), Err(NlpError::HandleError(_))));
            removed += 1;
        }
    }
    assert_eq!(removed, 2);
    let tokens: Vec<&str> = doc.tokens().map(|t| t.text()).collect();
    assert_eq!(tokens.len(), EXPECTED_TOKENS.len() - 2);
    assert!(!tokens.contains(&"Bob"));
    assert!(matches!(
        cursor.remove(&mut doc),
        Err(NlpError::NoCurrentSpan(_))
    ));
    Ok(())
}

#[test]
fn removed_section() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let sentence = doc.add_sentence(0, 90)?;
    sentence.add_token(&mut doc, 0, 3)?;
    let mut cursor = doc.cursor(Level::Sentence);
    cursor.next(&doc);
    cursor.remove(&mut doc)?;
    assert_eq!(sentence.children(&doc).count(), 0);
    assert!(matches!(
        sentence.add_token(&mut doc, 4, 11),
        Err(NlpError::HandleError(_))
    ));
    //the token is still in the document
    assert_eq!(doc.tokens().count(), 1);
    Ok(())
}

#[test]
fn annotation_ranking() -> Result<(), NlpError> {
    let key: AnnotationKey<f64> = AnnotationKey::new("test");
    let mut doc = AnalysedText::from_string(EXAMPLE_TEXT);
    let root = doc.root();
    doc.annotations_mut(root)?.add(
        &key,
        vec![
            Value::with_probability(26.0, 0.6)?,
            Value::new(27.0),
            Value::new(28.0),
            Value::with_probability(25.0, 0.8)?,
        ],
    );
    let top = doc.span(root)?.annotation(&key).expect("annotation exists");
    assert_eq!(*top.value(), 27.0);
    assert_eq!(top.probability(), 1.0);

    //unscored values keep their insertion order
    doc.annotations_mut(root)?.add_value(&key, Value::new(29.0));
    let values: Vec<f64> = doc
        .span(root)?
        .annotation_values(&key)
        .map(|v| *v.value())
        .collect();
    assert_eq!(values, vec![27.0, 28.0, 29.0, 25.0, 26.0]);
    let probabilities: Vec<f64> = doc
        .span(root)?
        .annotation_values(&key)
        .map(|v| v.probability())
        .collect();
    assert!(probabilities.windows(2).all(|pair| pair[0] >= pair[1]));
    Ok(())
}

#[test]
fn annotations_well_known_keys() -> Result<(), NlpError> {
    let mut doc = setup_example_1()?;
    let handles: Vec<SpanHandle> = doc.tokens().map(|token| token.handle()).collect();
    for handle in handles {
        let is_name = doc.span(handle)?.text().starts_with(char::is_uppercase);
        let annotations = doc.annotations_mut(handle)?;
        if is_name {
            annotations.add(
                &POS_ANNOTATION,
                Value::ranked([
                    (PosTag::new("NNP").with_category(LexicalCategory::Noun), 0.9),
                    (PosTag::new("JJ").with_category(LexicalCategory::Adjective), 0.1),
                ])?,
            );
        } else {
            annotations.set_value(
                &POS_ANNOTATION,
                Value::new(PosTag::new("XX").with_category(LexicalCategory::Residual)),
            );
        }
    }
    let chunk = doc.chunks().nth(1).expect("chunk exists").handle();
    doc.annotations_mut(chunk)?.set_value(
        &NER_ANNOTATION,
        Value::with_probability(
            NerTag::new("PER").with_type("http://dbpedia.org/ontology/Person"),
            0.95,
        )?,
    );
    doc.annotations_mut(chunk)?.set_value(
        &PHRASE_ANNOTATION,
        Value::new(PhraseTag::new("NP").with_category(LexicalCategory::Noun)),
    );

    let nouns: Vec<&str> = doc
        .tokens()
        .filter(|token| {
            token
                .annotation(&POS_ANNOTATION)
                .map(|pos| pos.value().has_category(LexicalCategory::Noun))
                .unwrap_or(false)
        })
        .map(|token| token.text())
        .collect();
    assert_eq!(
        nouns,
        vec![
            "The", "Stanbol", "Paris", "Bob", "Marley", "With", "Comedian", "Bob", "Marley",
            "Paris", "Texas"
        ]
    );

    let entity = doc.span(chunk)?;
    assert_eq!(entity.text(), "Bob Marley");
    let ner = entity.annotation(&NER_ANNOTATION).expect("ner exists");
    assert_eq!(ner.value().tag(), "PER");
    assert_eq!(ner.probability(), 0.95);
    assert_eq!(
        entity
            .annotation(&PHRASE_ANNOTATION)
            .and_then(|phrase| phrase.value().category()),
        Some(LexicalCategory::Noun)
    );
    assert!(entity.annotation(&SENTIMENT_ANNOTATION).is_none());

    let bob = doc
        .tokens()
        .find(|token| token.text() == "Bob")
        .expect("token exists")
        .handle();
    let marley = doc
        .tokens()
        .find(|token| token.text() == "Marley")
        .expect("token exists")
        .handle();
    doc.annotations_mut(bob)?.set_value(
        &DEPENDENCY_ANNOTATION,
        Value::new(
            DependencyRelation::new("nn", true)
                .with_relation(GrammaticalRelation::NounCompoundModifier)
                .with_partner(marley),
        ),
    );
    doc.annotations_mut(marley)?.set_value(
        &DEPENDENCY_ANNOTATION,
        Value::new(
            DependencyRelation::new("nn", false)
                .with_relation(GrammaticalRelation::NounCompoundModifier)
                .with_partner(bob),
        ),
    );
    doc.annotations_mut(marley)?.set_value(
        &MORPHO_ANNOTATION,
        Value::new(
            MorphoFeatures::new("Marley")
                .with_case(CaseTag::new("nom").with_case(Case::Nominative))
                .with_pos(PosTag::new("NNP").with_category(LexicalCategory::Noun)),
        ),
    );

    let dependency = doc
        .span(bob)?
        .annotation(&DEPENDENCY_ANNOTATION)
        .expect("dependency exists")
        .value();
    assert!(dependency.is_dependent());
    assert_eq!(dependency.to_string(), "nn (NounCompoundModifier)");
    let relation = dependency.relation().expect("relation is mapped");
    assert!(relation.is_a(GrammaticalRelation::Modifier));
    assert!(!relation.is_a(GrammaticalRelation::Subject));
    assert_eq!(relation.category(), GrammaticalRelationCategory::DependencyLabel);
    let partner = doc.span(dependency.partner().expect("partner exists"))?;
    assert_eq!(partner.text(), "Marley");
    assert_eq!(
        partner
            .annotation(&DEPENDENCY_ANNOTATION)
            .and_then(|dependency| dependency.value().partner()),
        Some(bob)
    );

    let morpho = partner
        .annotation(&MORPHO_ANNOTATION)
        .expect("morpho exists")
        .value();
    assert_eq!(morpho.lemma(), "Marley");
    assert_eq!(morpho.cases()[0].case(), Some(Case::Nominative));
    assert!(morpho.pos()[0].has_category(LexicalCategory::Noun));
    Ok(())
}

#[test]
fn typed_handles() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    let first = doc.spans().next().expect("span exists");
    assert!(matches!(first.kind(), SpanKind::Sentence(_)));
    assert!(first.as_sentence().is_some());
    assert!(first.as_chunk().is_none());
    assert!(first.as_token().is_none());
    let token = doc.tokens().next().expect("token exists");
    assert_eq!(token.kind().level(), Level::Token);
    assert_eq!(token.kind().handle(), token.handle());
    assert_eq!(token.as_token().map(SpanHandle::from), Some(token.handle()));
    Ok(())
}

#[test]
fn span_text_unicode() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string("Ελληνικά και 日本語 text");
    let sentence = doc.add_sentence(0, 21)?;
    let greek = sentence.add_token(&mut doc, 0, 8)?;
    let japanese = sentence.add_token(&mut doc, 13, 16)?;
    let latin = sentence.add_token(&mut doc, 17, 21)?;
    assert_eq!(doc.span(greek)?.text(), "Ελληνικά");
    assert_eq!(doc.span(japanese)?.text(), "日本語");
    assert_eq!(doc.span(latin)?.text(), "text");
    assert_eq!(doc.span(japanese)?.textlen(), 3);
    assert_eq!(doc.span(japanese)?.text_by_offset(1, 3)?, "本語");
    Ok(())
}

#[test]
fn relative_positions() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    let sentence = doc.sentences().nth(1).expect("sentence exists");
    let texas = doc.tokens().last().expect("token exists");
    assert_eq!(texas.text(), "Texas");
    let relbegin = texas.relative_begin_in(&sentence).expect("token in sentence");
    assert_eq!(
        sentence.text_by_offset(relbegin, relbegin + texas.textlen())?,
        "Texas"
    );
    let first_sentence = doc.sentences().next().expect("sentence exists");
    assert_eq!(texas.relative_begin_in(&first_sentence), None);
    Ok(())
}

#[test]
fn resultspan_enclosed() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    let chunk = doc.chunks().nth(2).expect("chunk exists");
    assert_eq!(chunk.text(), "Comedian Bob Marley");
    let tokens: Vec<&str> = chunk.enclosed(Level::Token).map(|t| t.text()).collect();
    assert_eq!(tokens, vec!["Comedian", "Bob", "Marley"]);
    Ok(())
}

#[test]
fn display() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    let token = doc.tokens().nth(1).expect("token exists");
    assert_eq!(token.to_string(), "Token [4, 11) \"Stanbol\"");
    Ok(())
}

#[test]
fn find_text() -> Result<(), NlpError> {
    let doc = setup_example_1()?;
    let matches: Vec<(usize, usize)> = doc.find_text("Paris").collect();
    assert_eq!(matches, vec![(54, 59), (180, 185)]);
    let sentence = doc.sentences().nth(1).expect("sentence exists");
    let matches: Vec<(usize, usize)> = sentence.find_text("Bob").collect();
    assert_eq!(matches, vec![(65, 68)]);
    Ok(())
}

#[test]
fn equality_across_documents() -> Result<(), NlpError> {
    let mut doc1 = AnalysedText::from_string(EXAMPLE_TEXT);
    let mut doc2 = AnalysedText::from_string(EXAMPLE_TEXT);
    let a = doc1.add_token(0, 3)?;
    let b = doc2.add_token(0, 3)?;
    //spans compare by level and bounds
    assert_eq!(doc1.get(a)?, doc2.get(b)?);
    //wrapped spans also take the document into account
    assert_ne!(doc1.span(a)?, doc2.span(b)?);
    assert!(matches!(
        doc1.get(a)?.checked_cmp(doc2.get(b)?),
        Err(NlpError::CrossDocumentComparison(_))
    ));
    //a cursor is bound to its document
    let mut cursor = doc1.cursor(Level::Token);
    assert_eq!(cursor.next(&doc2), None);
    Ok(())
}

#[test]
fn find_regex_tokenisation() -> Result<(), NlpError> {
    let mut doc = AnalysedText::from_string("Grüße aus Köln, sagt François.");
    let sentence = doc.add_sentence(0, 30)?;
    let expression = Regex::new(r"\w+|[,\.]").expect("valid expression");
    let offsets: Vec<(usize, usize)> = doc.span(sentence)?.find_regex(&expression).collect();
    for (begin, end) in offsets {
        sentence.add_token(&mut doc, begin, end)?;
    }
    let tokens: Vec<&str> = sentence.tokens(&doc).map(|token| token.text()).collect();
    assert_eq!(tokens, vec!["Grüße", "aus", "Köln", ",", "sagt", "François", "."]);
    Ok(())
}
