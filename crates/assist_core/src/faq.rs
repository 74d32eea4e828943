use crate::model::FaqEntry;
use crate::normalize::normalize;
use crate::similarity::similarity;

const FAQ_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Resolve a question directly against the product's FAQ list.
///
/// An entry matches when, after normalization, one question contains the
/// other or their overlap ratio exceeds 0.6. Entries are tried in list order
/// and the first qualifying one wins; candidates are not re-ranked, so a
/// later, better match never displaces an earlier qualifying one.
pub fn match_faq<'a>(normalized_question: &str, faqs: &'a [FaqEntry]) -> Option<&'a str> {
    for faq in faqs {
        let normalized_faq_question = normalize(&faq.question);

        if normalized_faq_question.contains(normalized_question)
            || normalized_question.contains(&normalized_faq_question)
            || similarity(normalized_question, &normalized_faq_question)
                > FAQ_SIMILARITY_THRESHOLD
        {
            return Some(&faq.answer);
        }
    }
    None
}
