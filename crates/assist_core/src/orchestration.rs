use tracing::{debug, info, warn};

use crate::ai::{AnswerProvider, DegradedDetector};
use crate::catalog::ProductCatalog;
use crate::context::build_context;
use crate::error::AskError;
use crate::extract::extract_relevant;
use crate::faq::match_faq;
use crate::intent::classify;
use crate::model::{Answer, AnswerSource, Product};
use crate::normalize::{extract_keywords, normalize};

pub const FALLBACK_MESSAGE: &str = "Momentan nu avem detalii specifice despre acest aspect. Vă recomandăm să ne contactați direct pentru informații suplimentare despre produs. Suntem aici să vă ajutăm!";

/// Sequences the answer chain: external call, degraded-reply detection, then
/// the local FAQ / intent / extraction stages, ending at the fixed fallback
/// message. Local stages never fail; the caller always gets an answer.
pub struct Orchestrator<P> {
    provider: P,
    detector: DegradedDetector,
}

impl<P: AnswerProvider> Orchestrator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            detector: DegradedDetector::default(),
        }
    }

    pub fn with_detector(provider: P, detector: DegradedDetector) -> Self {
        Self { provider, detector }
    }

    /// Answer a question about a product. Suspends only for the external
    /// call; any error, timeout or degraded reply routes to the local chain.
    pub async fn answer(&self, question: &str, product: &Product) -> Answer {
        let context = build_context(product);

        match self.provider.answer(question, &context).await {
            Ok(reply) if !self.detector.is_degraded(&reply) => {
                debug!(product_id = product.id, "external service answered");
                return Answer::new(reply, AnswerSource::External);
            }
            Ok(reply) => {
                info!(
                    product_id = product.id,
                    reply = %reply,
                    "external reply is degraded, resolving locally"
                );
            }
            Err(err) => {
                warn!(
                    product_id = product.id,
                    error = %format!("{err:#}"),
                    "external call failed, resolving locally"
                );
            }
        }

        resolve_locally(question, product)
    }
}

/// The deterministic resolution chain, pure over (question, product):
/// FAQ containment/overlap match, then the intent rule table, then
/// relevance-scored sentence extraction, then the fixed fallback message.
pub fn resolve_locally(question: &str, product: &Product) -> Answer {
    let normalized_question = normalize(question);

    if let Some(answer) = match_faq(&normalized_question, &product.faqs) {
        debug!(product_id = product.id, "faq entry matched");
        return Answer::new(answer, AnswerSource::Faq);
    }

    if let Some(answer) = classify(&normalized_question, product) {
        debug!(product_id = product.id, "intent rule matched");
        return Answer::new(answer, AnswerSource::Intent);
    }

    let keywords = extract_keywords(&normalized_question);
    let extracted = extract_relevant(&product.description, &normalized_question, &keywords);
    if !extracted.is_empty() {
        debug!(product_id = product.id, "description sentence extracted");
        return Answer::new(extracted, AnswerSource::Extraction);
    }

    Answer::new(FALLBACK_MESSAGE, AnswerSource::Fallback)
}

/// Validated entry point: checks the request, loads the product and its FAQ
/// list (an unavailable FAQ collection degrades to an empty list), then runs
/// the orchestrator. Not-found stays an error and is never flattened into a
/// fallback answer.
pub async fn ask<C, P>(
    catalog: &C,
    orchestrator: &Orchestrator<P>,
    product_id: i64,
    question: &str,
) -> Result<Answer, AskError>
where
    C: ProductCatalog,
    P: AnswerProvider,
{
    if question.trim().is_empty() {
        return Err(AskError::EmptyQuestion);
    }
    if product_id <= 0 {
        return Err(AskError::InvalidProductId(product_id));
    }

    let mut product = catalog
        .product(product_id)
        .map_err(AskError::Catalog)?
        .ok_or(AskError::ProductNotFound(product_id))?;

    product.faqs = match catalog.faqs(product_id) {
        Ok(faqs) => faqs,
        Err(err) => {
            warn!(
                product_id,
                error = %format!("{err:#}"),
                "faq collection unavailable, continuing without it"
            );
            Vec::new()
        }
    };

    Ok(orchestrator.answer(question, &product).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::StaticProvider;
    use crate::model::FaqEntry;

    fn product() -> Product {
        Product {
            id: 3,
            title: "Pantofi Casual Comfort".to_string(),
            description: "Pantofi comozi pentru oraș. Fabricați din piele naturală premium. \
                          Livrare gratuită la orice comandă."
                .to_string(),
            price: 199.0,
            stock: 20,
            category: Some("Casual".to_string()),
            faqs: vec![FaqEntry::new(
                "Se pot purta iarna?",
                "Da, au căptușeală călduroasă.",
            )],
        }
    }

    #[test]
    fn faq_match_wins_before_intent_rules() {
        let answer = resolve_locally("se pot purta iarna", &product());
        assert_eq!(answer.source, AnswerSource::Faq);
        assert_eq!(answer.text, "Da, au căptușeală călduroasă.");
    }

    #[test]
    fn intent_rule_answers_when_no_faq_matches() {
        let answer = resolve_locally("Are garanție produsul?", &product());
        assert_eq!(answer.source, AnswerSource::Intent);
        assert!(answer.text.contains("garanție de 2 ani"));
    }

    #[test]
    fn extraction_answers_keyword_questions_without_rules() {
        let answer = resolve_locally("Cât durează livrarea comenzii?", &product());
        assert_eq!(answer.source, AnswerSource::Extraction);
        assert!(answer.text.contains("Livrare gratuită"), "got {}", answer.text);
    }

    #[test]
    fn fallback_message_when_every_stage_comes_up_empty() {
        let mut p = product();
        p.faqs.clear();
        p.description = "Culoare neagră.".to_string();
        let answer = resolve_locally("suporta incarcare wireless", &p);
        assert_eq!(answer.source, AnswerSource::Fallback);
        assert_eq!(answer.text, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn real_external_reply_is_returned_as_is() {
        let orchestrator = Orchestrator::new(StaticProvider::reply("Răspuns de la model."));
        let answer = orchestrator.answer("Are garanție?", &product()).await;
        assert_eq!(answer.source, AnswerSource::External);
        assert_eq!(answer.text, "Răspuns de la model.");
    }

    #[tokio::test]
    async fn degraded_external_reply_falls_back_to_local_chain() {
        let orchestrator =
            Orchestrator::new(StaticProvider::reply("AI service quota has been exceeded."));
        let answer = orchestrator.answer("Are garanție?", &product()).await;
        assert_eq!(answer.source, AnswerSource::Intent);
        assert!(answer.text.contains("garanție de 2 ani"));
    }

    #[tokio::test]
    async fn failed_external_call_falls_back_to_local_chain() {
        let orchestrator = Orchestrator::new(StaticProvider::failure("timeout"));
        let answer = orchestrator.answer("se pot purta iarna", &product()).await;
        assert_eq!(answer.source, AnswerSource::Faq);
    }

    #[tokio::test]
    async fn degraded_reply_with_no_local_match_ends_at_fallback_message() {
        let mut p = product();
        p.faqs.clear();
        p.description = "Culoare neagră.".to_string();
        let orchestrator = Orchestrator::new(StaticProvider::reply("quota exceeded"));
        let answer = orchestrator.answer("suporta incarcare wireless", &p).await;
        assert_eq!(answer.source, AnswerSource::Fallback);
        assert_eq!(answer.text, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn custom_detector_overrides_the_marker_list() {
        let detector = DegradedDetector::new(["model overloaded"]);
        let orchestrator =
            Orchestrator::with_detector(StaticProvider::reply("model overloaded"), detector);
        let answer = orchestrator.answer("Are garanție?", &product()).await;
        assert_eq!(answer.source, AnswerSource::Intent);
    }
}
