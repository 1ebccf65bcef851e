//! Keyword classifier
//!
//! Every keyword of every kind is searched in the normalized text with
//! word-boundary matching. The longest matched keyword wins; equal lengths
//! go to the kind declared first and mark the result ambiguous.

use regex::Regex;
use tracing::debug;

use crate::errors::{CadlexError, Result};
use crate::model::{Locale, OperationKind};
use crate::rules::catalog::{param_type, ParamType};

use super::grammar::Grammar;
use super::lexicon::Lexicon;
use super::token::Token;

/// Outcome of classifying one instruction
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: OperationKind,
    /// Keyword that decided the kind
    pub keyword: String,
    /// Keyword length over instruction-text length, in `[0, 1]`
    pub match_strength: f64,
    /// More than one kind matched a keyword of the winning length
    pub ambiguous: bool,
}

struct KeywordPattern {
    kind: OperationKind,
    keyword: &'static str,
    length: usize,
    regex: Regex,
}

/// Compiled keyword tables for one locale
pub struct Classifier {
    lexicon: &'static Lexicon,
    grammar: Grammar,
    patterns: Vec<KeywordPattern>,
}

impl Classifier {
    pub fn new(locale: Locale) -> Result<Self> {
        let lexicon = Lexicon::for_locale(locale);
        let grammar = Grammar::new(locale)?;

        // Articles, modifiers and colors may sit between the words of a phrase
        let gap = lexicon
            .keyword_gaps
            .iter()
            .copied()
            .chain(lexicon.colors.iter().map(|(name, _)| *name))
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let joiner = format!(r"(?:\s+(?:{}))*\s+", gap);

        let mut patterns = Vec::new();
        for (kind, keywords) in lexicon.keywords {
            for keyword in keywords.iter().copied() {
                let body = keyword
                    .split(' ')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(&joiner);
                let regex = Regex::new(&format!(r"\b{}\b", body)).map_err(|e| {
                    CadlexError::Internal {
                        message: format!("keyword '{}' failed to compile: {}", keyword, e),
                    }
                })?;
                patterns.push(KeywordPattern {
                    kind: *kind,
                    keyword,
                    length: keyword.chars().count(),
                    regex,
                });
            }
        }

        Ok(Self {
            lexicon,
            grammar,
            patterns,
        })
    }

    /// Identify the operation requested by `tokens`
    pub fn classify(&self, tokens: &[Token]) -> Result<Classification> {
        let normalized = tokens
            .iter()
            .filter(|t| !t.quoted)
            .map(|t| t.lower.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let mut best: Option<&KeywordPattern> = None;
        let mut tied_kinds: Vec<OperationKind> = Vec::new();

        for pattern in &self.patterns {
            if !pattern.regex.is_match(&normalized) {
                continue;
            }
            match best {
                Some(current) if pattern.length < current.length => {}
                Some(current) if pattern.length == current.length => {
                    if !tied_kinds.contains(&pattern.kind) {
                        tied_kinds.push(pattern.kind);
                    }
                    if pattern.kind.rank() < current.kind.rank() {
                        best = Some(pattern);
                    }
                }
                _ => {
                    best = Some(pattern);
                    tied_kinds = vec![pattern.kind];
                }
            }
        }

        let winner = best.ok_or_else(|| CadlexError::UnrecognizedOperation {
            text: tokens
                .iter()
                .map(|t| t.raw.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        })?;

        let instruction = self.instruction_text(tokens);
        let denominator = instruction.chars().count().max(winner.length);
        let match_strength = (winner.length as f64 / denominator as f64).clamp(0.0, 1.0);

        debug!(
            operation = %winner.kind,
            keyword = winner.keyword,
            instruction = %instruction,
            match_strength,
            "classified"
        );

        Ok(Classification {
            kind: winner.kind,
            keyword: winner.keyword.to_string(),
            match_strength,
            ambiguous: tied_kinds.len() > 1,
        })
    }

    /// The normalized text with every non-instruction token removed
    pub fn instruction_text(&self, tokens: &[Token]) -> String {
        let mut words: Vec<&str> = Vec::new();
        let mut after_value_label = false;

        for token in tokens {
            if token.quoted {
                after_value_label = false;
                continue;
            }
            let word = token.lower.as_str();
            let structural = self.lexicon.is_filler(word)
                || self.lexicon.is_separator(word)
                || self.lexicon.is_label_word(word);

            if after_value_label && !structural {
                // The value following `layer`, `named`, `block`, ...
                after_value_label = false;
                continue;
            }

            if structural
                || self.lexicon.color(word).is_some()
                || self.lexicon.is_flag_word(word)
                || self.grammar.is_numeric_like(word)
                || self.grammar.is_coordinate_like(word)
            {
                if self.is_value_label(word) {
                    after_value_label = true;
                }
                continue;
            }

            words.push(word);
        }

        words.join(" ")
    }

    fn is_value_label(&self, word: &str) -> bool {
        self.lexicon.labels.iter().any(|(param, phrases)| {
            param_type(param) == Some(ParamType::Text) && phrases.iter().any(|p| *p == word)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::token::tokenize;

    fn classify(text: &str) -> Result<Classification> {
        Classifier::new(Locale::En).unwrap().classify(&tokenize(text))
    }

    #[test]
    fn test_line_with_coordinates_is_a_full_match() {
        let c = classify("draw a line from 0,0 to 100,100").unwrap();
        assert_eq!(c.kind, OperationKind::DrawLine);
        assert_eq!(c.match_strength, 1.0);
        assert!(!c.ambiguous);
    }

    #[test]
    fn test_longest_keyword_wins() {
        let c = classify("draw a polyline").unwrap();
        assert_eq!(c.kind, OperationKind::DrawPolyline);
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        // "lines" must not trigger "line"
        assert!(classify("draw some lines").is_err());
    }

    #[test]
    fn test_equal_length_tie_goes_to_first_declared_and_is_ambiguous() {
        let c = classify("draw a line and a rect").unwrap();
        assert_eq!(c.kind, OperationKind::DrawLine);
        assert!(c.ambiguous);
    }

    #[test]
    fn test_unknown_instruction() {
        let err = classify("draw something").unwrap_err();
        assert!(matches!(err, CadlexError::UnrecognizedOperation { .. }));
    }

    #[test]
    fn test_multi_word_keyword_tolerates_articles_and_colors() {
        let c = classify("create a new red layer called Walls").unwrap();
        assert_eq!(c.kind, OperationKind::CreateLayer);
        assert_eq!(c.match_strength, 1.0);
    }

    #[test]
    fn test_layer_modifier_does_not_make_a_layer_command() {
        let c = classify("add a circle on layer Walls").unwrap();
        assert_eq!(c.kind, OperationKind::DrawCircle);
    }

    #[test]
    fn test_quoted_literals_are_not_searched() {
        let c = classify("add text \"draw a circle\" at 0,0").unwrap();
        assert_eq!(c.kind, OperationKind::DrawText);
    }

    #[test]
    fn test_extra_words_lower_the_strength() {
        let c = classify("draw a big circle").unwrap();
        // "circle" over "big circle"
        assert!((c.match_strength - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_layer_list_forms() {
        assert_eq!(classify("list all layers").unwrap().kind, OperationKind::ListLayers);
        assert_eq!(classify("show layers").unwrap().kind, OperationKind::ListLayers);
        assert_eq!(classify("show layer Walls").unwrap().kind, OperationKind::TurnLayerOn);
        assert_eq!(classify("turn off the layer Walls").unwrap().kind, OperationKind::TurnLayerOff);
    }

    #[test]
    fn test_spanish_keywords() {
        let classifier = Classifier::new(Locale::Es).unwrap();
        let c = classifier
            .classify(&tokenize("dibuja una línea desde 0;0 hasta 10;10"))
            .unwrap();
        assert_eq!(c.kind, OperationKind::DrawLine);
        assert_eq!(c.match_strength, 1.0);

        let c = classifier
            .classify(&tokenize("crear una nueva capa Muros"))
            .unwrap();
        assert_eq!(c.kind, OperationKind::CreateLayer);
    }
}
