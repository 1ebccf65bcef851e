//! Natural-language instruction interpreter
//!
//! `text -> tokens -> classification -> extraction -> confidence -> command`.
//! Tables for every locale are compiled once per `Interpreter`; each call
//! keeps no state beyond its own inputs.

pub mod classifier;
pub mod extractor;
pub mod grammar;
pub mod lexicon;
pub mod scorer;
pub mod token;

use tracing::debug;

use crate::builder;
use crate::errors::Result;
use crate::model::{Locale, OperationKind, ParsedCommand, RawInput};

pub use classifier::{Classification, Classifier};
pub use extractor::{Extraction, Extractor};

struct LocaleTables {
    classifier: Classifier,
    extractor: Extractor,
}

impl LocaleTables {
    fn new(locale: Locale) -> Result<Self> {
        Ok(Self {
            classifier: Classifier::new(locale)?,
            extractor: Extractor::new(locale)?,
        })
    }
}

/// Compiled interpreter for every supported locale
pub struct Interpreter {
    default_locale: Locale,
    en: LocaleTables,
    es: LocaleTables,
}

impl Interpreter {
    pub fn new(default_locale: Locale) -> Result<Self> {
        Ok(Self {
            default_locale,
            en: LocaleTables::new(Locale::En)?,
            es: LocaleTables::new(Locale::Es)?,
        })
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    fn tables(&self, locale: Locale) -> &LocaleTables {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
        }
    }

    /// Identify the operation requested by `input`
    pub fn classify(&self, input: &RawInput) -> Result<Classification> {
        let locale = input.locale_or(self.default_locale);
        self.tables(locale)
            .classifier
            .classify(&token::tokenize(&input.text))
    }

    /// Locate the parameters of `kind` in `input`
    pub fn extract(&self, kind: OperationKind, input: &RawInput, strict: bool) -> Result<Extraction> {
        let locale = input.locale_or(self.default_locale);
        self.tables(locale)
            .extractor
            .extract(kind, &token::tokenize(&input.text), strict)
    }

    /// Turn an instruction into a validated command
    ///
    /// # Errors
    ///
    /// `UnrecognizedOperation`, `InvalidParameterFormat`, `MissingParameter`
    /// or `Validation`, returned as soon as the failing stage reports.
    pub fn interpret(&self, input: &RawInput, strict: bool) -> Result<ParsedCommand> {
        let locale = input.locale_or(self.default_locale);
        let tables = self.tables(locale);
        let tokens = token::tokenize(&input.text);

        let classification = tables.classifier.classify(&tokens)?;
        let extraction = tables
            .extractor
            .extract(classification.kind, &tokens, strict)?;

        let penalty = if classification.ambiguous {
            scorer::AMBIGUITY_PENALTY
        } else {
            0.0
        };
        let confidence = scorer::score(classification.match_strength, extraction.coverage, penalty);

        debug!(
            operation = %classification.kind,
            locale = locale.tag(),
            match_strength = classification.match_strength,
            coverage = extraction.coverage,
            ambiguous = classification.ambiguous,
            confidence,
            "interpreted"
        );

        builder::build(classification.kind, extraction.parameters, confidence)
    }
}
