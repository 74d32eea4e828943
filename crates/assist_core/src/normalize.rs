/// Articles, prepositions, conjunctions and interrogatives that carry no
/// matching signal, Romanian and English mixed.
pub const STOP_WORDS: &[&str] = &[
    "este", "sunt", "are", "cum", "ce", "care", "pentru", "cu", "de", "la", "in", "pe", "si",
    "sau", "the", "is", "how", "what", "which", "for", "with", "of", "to", "on", "and", "or",
];

/// Canonical comparison form: lowercase, Romanian diacritics folded to base
/// Latin letters, everything outside `[a-z0-9\s]` removed, trimmed.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars().flat_map(char::to_lowercase) {
        // ş/ţ are the legacy cedilla forms still common in catalog text
        let c = match c {
            'ă' | 'â' => 'a',
            'î' => 'i',
            'ș' | 'ş' => 's',
            'ț' | 'ţ' => 't',
            other => other,
        };
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
            out.push(c);
        }
    }

    out.trim().to_string()
}

/// Content words of a normalized string: split on whitespace, stop-words and
/// tokens of length <= 2 dropped. Input order is preserved.
pub fn extract_keywords(normalized: &str) -> Vec<String> {
    normalized
        .split([' ', '\t', '\n'])
        .filter(|w| !w.is_empty())
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_diacritics_and_case() {
        assert_eq!(normalize("Piele Ă"), "piele a");
        assert_eq!(normalize("Încălțăminte Știută"), "incaltaminte stiuta");
    }

    #[test]
    fn strips_punctuation_and_symbols() {
        assert_eq!(normalize("Preț: 10€!"), "pret 10");
        assert_eq!(normalize("   spații   interioare  "), "spatii   interioare");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize("Mărime: 42, piele naturală!");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn keywords_drop_stop_words_and_short_tokens() {
        let kws = extract_keywords("este un produs de piele cu talpa la fel");
        assert_eq!(kws, vec!["produs", "piele", "talpa", "fel"]);
    }

    #[test]
    fn keywords_preserve_order() {
        let kws = extract_keywords("talpa cauciuc piele");
        assert_eq!(kws, vec!["talpa", "cauciuc", "piele"]);
    }
}
