//! Instruction tokenizer
//!
//! Splits on whitespace, keeps quoted literals whole (with their case), and
//! splits off `=` and a trailing `:` so that `r=5` and `radius: 5` tokenize like
//! `r = 5` and `radius : 5`.

/// One token of the instruction text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Text as written (quotes removed for literals)
    pub raw: String,
    /// Lower-cased text used for table lookups
    pub lower: String,
    /// Came from a quoted literal
    pub quoted: bool,
}

impl Token {
    fn word(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            lower: raw.to_lowercase(),
            quoted: false,
        }
    }

    fn literal(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            lower: raw.to_lowercase(),
            quoted: true,
        }
    }
}

fn closing_quote(open: char) -> Option<char> {
    match open {
        '"' => Some('"'),
        '\'' => Some('\''),
        '\u{201C}' => Some('\u{201D}'),
        '\u{2018}' => Some('\u{2019}'),
        _ => None,
    }
}

/// Tokenize an instruction
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        if let Some(close) = closing_quote(chars[i]) {
            if let Some(offset) = chars[i + 1..].iter().position(|c| *c == close) {
                let inner: String = chars[i + 1..i + 1 + offset].iter().collect();
                tokens.push(Token::literal(&inner));
                i += offset + 2;
                continue;
            }
        }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        let word: String = chars[start..i].iter().collect();
        push_word(&mut tokens, &word);
    }

    strip_final_punctuation(&mut tokens);
    tokens
}

fn push_word(tokens: &mut Vec<Token>, word: &str) {
    if word.len() > 1 && word.contains('=') {
        let mut parts = word.split('=').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                tokens.push(Token::word(part));
            }
            if parts.peek().is_some() {
                tokens.push(Token::word("="));
            }
        }
        return;
    }

    if word.len() > 1 && word.ends_with(':') {
        tokens.push(Token::word(&word[..word.len() - 1]));
        tokens.push(Token::word(":"));
        return;
    }

    tokens.push(Token::word(word));
}

/// Drop sentence punctuation closing the instruction ("... to 100,100.")
fn strip_final_punctuation(tokens: &mut Vec<Token>) {
    if let Some(last) = tokens.last_mut() {
        if last.quoted {
            return;
        }
        let trimmed = last.raw.trim_end_matches(['.', '!', '?']).to_string();
        if trimmed.is_empty() {
            tokens.pop();
        } else if trimmed.len() != last.raw.len() {
            *last = Token::word(&trimmed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.raw).collect()
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(raws("draw   a\tline"), vec!["draw", "a", "line"]);
    }

    #[test]
    fn test_quoted_literal_keeps_case_and_spaces() {
        let tokens = tokenize("add text \"Hello World\" at 1,2");
        assert_eq!(tokens[2].raw, "Hello World");
        assert!(tokens[2].quoted);
        assert_eq!(tokens[2].lower, "hello world");
    }

    #[test]
    fn test_unterminated_quote_is_a_word() {
        assert_eq!(raws("layer \"Walls"), vec!["layer", "\"Walls"]);
    }

    #[test]
    fn test_equals_and_colon_are_split() {
        assert_eq!(raws("r=50"), vec!["r", "=", "50"]);
        assert_eq!(raws("radius: 5"), vec!["radius", ":", "5"]);
    }

    #[test]
    fn test_final_period_is_stripped() {
        assert_eq!(raws("to 100,100."), vec!["to", "100,100"]);
        assert_eq!(raws("radius 2.5"), vec!["radius", "2.5"]);
    }

    #[test]
    fn test_coordinates_are_not_split() {
        assert_eq!(raws("from 0, 0"), vec!["from", "0,", "0"]);
    }
}
