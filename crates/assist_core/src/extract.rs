use crate::normalize::normalize;
use crate::synonyms::expand_keywords;

const MAX_ANSWER_LEN: usize = 300;
const TRUNCATE_PERIOD_MIN: usize = 200;

#[derive(Debug, Clone)]
struct ScoredSentence {
    text: String,
    score: f64,
    index: usize,
}

/// Pick the most relevant 1-2 sentences of a product description for a
/// question. Scores every sentence against the synonym-expanded keyword set
/// and the question's own words, then merges adjacent winners. Returns an
/// empty string when nothing scores at least 1.0.
pub fn extract_relevant(description: &str, normalized_question: &str, keywords: &[String]) -> String {
    if description.is_empty() || keywords.is_empty() {
        return String::new();
    }

    let sentences = split_sentences(description);
    if sentences.is_empty() {
        return String::new();
    }

    let expanded = expand_keywords(keywords);
    let question_words: Vec<&str> = normalized_question
        .split(' ')
        .filter(|w| w.len() > 3)
        .collect();

    let mut scored: Vec<ScoredSentence> = Vec::with_capacity(sentences.len());
    for (index, sentence) in sentences.into_iter().enumerate() {
        let normalized = normalize(&sentence);
        let mut score = 0.0;

        for keyword in &expanded {
            if !normalized.contains(keyword.as_str()) {
                continue;
            }
            score += if keyword.len() > 4 {
                3.0
            } else if keyword.len() > 2 {
                2.0
            } else {
                1.0
            };
            if normalized.matches(keyword.as_str()).count() > 1 {
                score += 0.5;
            }
        }

        let matching_question_words = question_words
            .iter()
            .filter(|w| normalized.contains(**w))
            .count();
        score += matching_question_words as f64 * 1.5;

        let len = sentence.chars().count();
        if len > 30 && len < 200 {
            score += 0.5;
        }

        if score > 0.0 {
            scored.push(ScoredSentence {
                text: sentence,
                score,
                index,
            });
        }
    }

    // stable sort keeps description order between equal scores
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let top: Vec<&ScoredSentence> = scored.iter().filter(|s| s.score >= 1.0).take(2).collect();
    let Some(best) = top.first() else {
        return String::new();
    };

    let mut result = if let [first, second] = top.as_slice() {
        let (lo, hi) = if first.index <= second.index {
            (first, second)
        } else {
            (second, first)
        };
        if hi.index - lo.index <= 2 {
            format!("{} {}", lo.text, hi.text).trim().to_string()
        } else {
            best.text.trim().to_string()
        }
    } else {
        best.text.trim().to_string()
    };

    if !result.ends_with(['.', '!', '?']) {
        result.push('.');
    }

    truncate_answer(&result)
}

/// Split free text into sentences on `.`/`!`/`?` followed by whitespace.
/// The punctuation stays with its sentence; blank fragments are discarded
/// and the rest trimmed.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut start = 0usize;
    let mut iter = text.char_indices().peekable();

    while let Some((pos, c)) = iter.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let followed_by_space = matches!(iter.peek(), Some(&(_, next)) if next.is_whitespace());
        if !followed_by_space {
            continue;
        }
        push_trimmed(&mut sentences, &text[start..pos + c.len_utf8()]);
        while matches!(iter.peek(), Some(&(_, w)) if w.is_whitespace()) {
            iter.next();
        }
        start = iter.peek().map_or(text.len(), |&(p, _)| p);
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

/// Cap an extracted answer at 300 characters. Prefers cutting at the last
/// period when that keeps more than 200 characters, otherwise hard-truncates
/// with a trailing ellipsis.
pub fn truncate_answer(text: &str) -> String {
    if text.chars().count() <= MAX_ANSWER_LEN {
        return text.to_string();
    }

    let truncated: String = text.chars().take(MAX_ANSWER_LEN).collect();
    if let Some(pos) = truncated.rfind('.') {
        if truncated[..pos].chars().count() > TRUNCATE_PERIOD_MIN {
            return truncated[..=pos].to_string();
        }
    }

    format!("{}...", truncated.trim_end())
}
