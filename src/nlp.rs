/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! Well-known annotation keys and the tag payloads analysis components commonly attach to
//! spans. Nothing in the model depends on these, they are a shared vocabulary so that
//! independent components can read each other's results.

use std::borrow::Cow;
use std::fmt;

use crate::annotation::AnnotationKey;
use crate::span::SpanHandle;

/// Part-of-speech annotations, usually on tokens
pub const POS_ANNOTATION: AnnotationKey<PosTag> = AnnotationKey::new("stanbol.enhancer.nlp.pos");

/// Phrase annotations, usually on chunks
pub const PHRASE_ANNOTATION: AnnotationKey<PhraseTag> =
    AnnotationKey::new("stanbol.enhancer.nlp.phrase");

/// Named entity annotations, usually on chunks or tokens
pub const NER_ANNOTATION: AnnotationKey<NerTag> = AnnotationKey::new("stanbol.enhancer.nlp.ner");

/// Sentiment annotations, the payload ranges from `-1.0` (negative) to `1.0` (positive)
pub const SENTIMENT_ANNOTATION: AnnotationKey<f64> =
    AnnotationKey::new("stanbol.enhancer.nlp.sentiment");

/// Dependency relations, on the tokens that take part in the relation
pub const DEPENDENCY_ANNOTATION: AnnotationKey<DependencyRelation> =
    AnnotationKey::new("stanbol.enhancer.nlp.dependency");

/// Morphological analysis results, usually on tokens
pub const MORPHO_ANNOTATION: AnnotationKey<MorphoFeatures> =
    AnnotationKey::new("stanbol.enhancer.nlp.morpho");

/// The top-level lexical categories, a coarse classification that is independent of the
/// tag set of a particular tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LexicalCategory {
    Noun,
    Verb,
    Adjective,
    Adposition,
    Adverb,
    Conjuction,
    Interjection,
    PronounOrDeterminer,
    Punctuation,
    Quantifier,
    Residual,
    Unique,
}

impl LexicalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "Noun",
            Self::Verb => "Verb",
            Self::Adjective => "Adjective",
            Self::Adposition => "Adposition",
            Self::Adverb => "Adverb",
            Self::Conjuction => "Conjuction",
            Self::Interjection => "Interjection",
            Self::PronounOrDeterminer => "PronounOrDeterminer",
            Self::Punctuation => "Punctuation",
            Self::Quantifier => "Quantifier",
            Self::Residual => "Residual",
            Self::Unique => "Unique",
        }
    }
}

impl fmt::Display for LexicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A part-of-speech tag as emitted by a tagger (e.g. `NN`), optionally mapped to one or more
/// lexical categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PosTag {
    tag: Cow<'static, str>,
    categories: Vec<LexicalCategory>,
}

impl PosTag {
    /// A tag that is not mapped to any lexical category
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            categories: Vec::new(),
        }
    }

    /// Builder pattern to map the tag to a lexical category, may be called multiple times
    pub fn with_category(mut self, category: LexicalCategory) -> Self {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn categories(&self) -> &[LexicalCategory] {
        &self.categories
    }

    /// Is this tag mapped to the given category?
    pub fn has_category(&self, category: LexicalCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Is this tag not mapped to any lexical category?
    pub fn is_unmapped(&self) -> bool {
        self.categories.is_empty()
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.tag)?;
        if !self.categories.is_empty() {
            let categories: Vec<&str> = self.categories.iter().map(|c| c.as_str()).collect();
            write!(f, " ({})", categories.join(", "))?;
        }
        Ok(())
    }
}

/// A phrase tag (e.g. `NP`) as emitted by a chunker, optionally mapped to the lexical category
/// of the head of the phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhraseTag {
    tag: Cow<'static, str>,
    category: Option<LexicalCategory>,
}

impl PhraseTag {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: LexicalCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn category(&self) -> Option<LexicalCategory> {
        self.category
    }
}

impl fmt::Display for PhraseTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.category {
            Some(category) => write!(f, "{} ({})", self.tag, category),
            None => f.write_str(&self.tag),
        }
    }
}

/// A named entity tag (e.g. `PER`) as emitted by an entity recogniser, optionally mapped to
/// the URI of an ontological type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NerTag {
    tag: Cow<'static, str>,
    entity_type: Option<Cow<'static, str>>,
}

impl NerTag {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            entity_type: None,
        }
    }

    /// Builder pattern to set the type URI
    pub fn with_type(mut self, entity_type: impl Into<Cow<'static, str>>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }
}

impl fmt::Display for NerTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.entity_type {
            Some(entity_type) => write!(f, "{} <{}>", self.tag, entity_type),
            None => f.write_str(&self.tag),
        }
    }
}

/// The top-level classes of grammatical relations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammaticalRelationCategory {
    Argument,
    Auxiliary,
    DependencyLabel,
    SemanticDependent,
}

impl fmt::Display for GrammaticalRelationCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Grammatical relation types of a dependency parse. Relations form a hierarchy, see
/// [`Self::parent()`], rooted in a [`GrammaticalRelationCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammaticalRelation {
    Complement,
    /// The parser could not determine a more precise relation
    Dependent,
    Modifier,
    Object,
    AbbreviationModifier,
    AdjectivalComplement,
    AdjectivalModifier,
    AdverbialClauseModifier,
    AdverbialModifier,
    Agent,
    AppositionalModifier,
    Attributive,
    Auxiliary,
    ClausalComplementWithExternalSubject,
    ClausalComplementWithInternalSubject,
    Subject,
    ClausalSubject,
    Complementizer,
    CompoundNumberElement,
    Conjunct,
    ControllingSubject,
    Coordination,
    Copula,
    Determiner,
    DirectObject,
    Discourse,
    Expletive,
    IndirectObject,
    InfinitivalModifier,
    Marker,
    MeasurePhraseModifier,
    MultiWordExpression,
    NegationModifier,
    NominalSubject,
    NounCompoundModifier,
    NounPhraseAsAdverbialModifier,
    NumericModifier,
    ObjectOfPreposition,
    Parataxis,
    ParticipalModifier,
    PassiveAuxiliary,
    PassiveClausalSubject,
    PassiveNominalSubject,
    PhrasalVerbParticle,
    PossessionModifier,
    PossessiveModifier,
    Preconjunct,
    Predeterminer,
    PrepositionalModifier,
    PrepositionalClausalModifier,
    PrepositionalComplement,
    Punctuation,
    PurposeClauseModifier,
    QuantifierModifier,
    Referent,
    Relative,
    RelativeClauseModifier,
    /// The relation of the head of the sentence, it has no partner
    Root,
    TemporalModifier,
}

impl GrammaticalRelation {
    /// Returns the direct parent in the relation hierarchy, None for relations directly below a category
    pub fn parent(&self) -> Option<Self> {
        use GrammaticalRelation::*;
        match self {
            Complement | Dependent | Agent | Subject | ControllingSubject | Copula
            | PassiveAuxiliary | Root => None,
            Modifier | Auxiliary | Conjunct | Coordination | Expletive | Parataxis | Punctuation
            | Referent => Some(Dependent),
            Object
            | AdjectivalComplement
            | Attributive
            | ClausalComplementWithExternalSubject
            | ClausalComplementWithInternalSubject
            | Complementizer
            | Marker
            | PrepositionalComplement
            | Relative => Some(Complement),
            DirectObject | IndirectObject | ObjectOfPreposition => Some(Object),
            ClausalSubject | NominalSubject => Some(Subject),
            PassiveClausalSubject => Some(ClausalSubject),
            PassiveNominalSubject => Some(NominalSubject),
            NegationModifier => Some(AdverbialModifier),
            PrepositionalClausalModifier => Some(PrepositionalModifier),
            TemporalModifier => Some(NounPhraseAsAdverbialModifier),
            AbbreviationModifier
            | AdjectivalModifier
            | AdverbialClauseModifier
            | AdverbialModifier
            | AppositionalModifier
            | CompoundNumberElement
            | Determiner
            | Discourse
            | InfinitivalModifier
            | MeasurePhraseModifier
            | MultiWordExpression
            | NounCompoundModifier
            | NounPhraseAsAdverbialModifier
            | NumericModifier
            | ParticipalModifier
            | PhrasalVerbParticle
            | PossessionModifier
            | PossessiveModifier
            | Preconjunct
            | Predeterminer
            | PrepositionalModifier
            | PurposeClauseModifier
            | QuantifierModifier
            | RelativeClauseModifier => Some(Modifier),
        }
    }

    /// Returns the top-level category this relation belongs to
    pub fn category(&self) -> GrammaticalRelationCategory {
        use GrammaticalRelation::*;
        match self {
            Complement | Agent | Subject => GrammaticalRelationCategory::Argument,
            Dependent | Root => GrammaticalRelationCategory::DependencyLabel,
            ControllingSubject => GrammaticalRelationCategory::SemanticDependent,
            Copula | PassiveAuxiliary => GrammaticalRelationCategory::Auxiliary,
            other => match other.parent() {
                Some(parent) => parent.category(),
                None => GrammaticalRelationCategory::DependencyLabel,
            },
        }
    }

    /// Is this relation the given one or does it descend from it?
    pub fn is_a(&self, ancestor: Self) -> bool {
        let mut relation = Some(*self);
        while let Some(r) = relation {
            if r == ancestor {
                return true;
            }
            relation = r.parent();
        }
        false
    }
}

impl fmt::Display for GrammaticalRelation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One side of a dependency relation, stored on a token. The other side of the relation is
/// referenced by handle, the head of a sentence (relation [`GrammaticalRelation::Root`]) has no
/// partner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRelation {
    tag: Cow<'static, str>,
    relation: Option<GrammaticalRelation>,
    is_dependent: bool,
    partner: Option<SpanHandle>,
}

impl DependencyRelation {
    /// A relation as labelled by a parser (e.g. `nsubj`), `is_dependent` tells whether the
    /// annotated token is the dependent (or else the head) of the relation.
    pub fn new(tag: impl Into<Cow<'static, str>>, is_dependent: bool) -> Self {
        Self {
            tag: tag.into(),
            relation: None,
            is_dependent,
            partner: None,
        }
    }

    /// Builder pattern to map the tag to a grammatical relation
    pub fn with_relation(mut self, relation: GrammaticalRelation) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Builder pattern to set the token on the other side of the relation
    pub fn with_partner(mut self, partner: impl Into<SpanHandle>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn relation(&self) -> Option<GrammaticalRelation> {
        self.relation
    }

    pub fn is_dependent(&self) -> bool {
        self.is_dependent
    }

    pub fn partner(&self) -> Option<SpanHandle> {
        self.partner
    }
}

impl fmt::Display for DependencyRelation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.tag)?;
        if let Some(relation) = self.relation {
            write!(f, " ({})", relation)?;
        }
        Ok(())
    }
}

/// Grammatical cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Case {
    Abessive,
    Ablative,
    Absolutive,
    Accusative,
    Adessive,
    Aditive,
    Allative,
    Benefactive,
    Causative,
    Comitative,
    Contablative,
    Contallative,
    Conterminative,
    Contlative,
    Dative,
    Delative,
    Direct,
    Distributive,
    Elative,
    Equative,
    Ergative,
    Essive,
    EssiveFormal,
    Factive,
    Formal,
    Genitive,
    Illative,
    Inablative,
    Inallative,
    Inessive,
    Instrumental,
    Interablative,
    Interallative,
    Interessive,
    Interlative,
    Interminative,
    Interterminative,
    Intertranslative,
    Intranslative,
    Lative,
    Locational,
    Locative,
    Malefactive,
    Multiplicative,
    Nominative,
    Oblique,
    Partitive,
    Perlative,
    Possessed,
    Prepositional,
    Prolative,
    Proprietive,
    Purposive,
    Sociative,
    Subablative,
    Suballative,
    Subessive,
    Sublative,
    Subterminative,
    Subtranslative,
    Superablative,
    Superallative,
    Superessive,
    Superlative,
    Superterminative,
    Supertranslative,
    Temporalis,
    Terminative,
    Translative,
    Uninflected,
    Vocative,
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A case tag as emitted by a morphological analyser, optionally mapped to a [`Case`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseTag {
    tag: Cow<'static, str>,
    case: Option<Case>,
}

impl CaseTag {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            case: None,
        }
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.case = Some(case);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn case(&self) -> Option<Case> {
        self.case
    }
}

/// The morphological features of a word: its lemma, plus any cases and part-of-speech tags the
/// analyser determined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MorphoFeatures {
    lemma: Cow<'static, str>,
    cases: Vec<CaseTag>,
    pos: Vec<PosTag>,
}

impl MorphoFeatures {
    pub fn new(lemma: impl Into<Cow<'static, str>>) -> Self {
        Self {
            lemma: lemma.into(),
            cases: Vec::new(),
            pos: Vec::new(),
        }
    }

    /// Builder pattern to add a case, may be called multiple times
    pub fn with_case(mut self, case: CaseTag) -> Self {
        self.cases.push(case);
        self
    }

    /// Builder pattern to add a part-of-speech tag, may be called multiple times
    pub fn with_pos(mut self, pos: PosTag) -> Self {
        self.pos.push(pos);
        self
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn cases(&self) -> &[CaseTag] {
        &self.cases
    }

    pub fn pos(&self) -> &[PosTag] {
        &self.pos
    }
}
