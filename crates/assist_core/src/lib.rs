pub mod ai;
pub mod catalog;
pub mod context;
pub mod error;
pub mod eval;
pub mod extract;
pub mod faq;
pub mod intent;
pub mod model;
pub mod normalize;
pub mod orchestration;
pub mod similarity;
pub mod storage;
pub mod synonyms;

pub use ai::{
    AiConfig, AnswerProvider, DegradedDetector, OpenAiProvider, StaticProvider, DEGRADED_MARKERS,
};
pub use catalog::{JsonlCatalog, ProductCatalog};
pub use context::build_context;
pub use error::AskError;
pub use eval::{evaluate_cases, CaseExpectation, EvalCase, EvalOutcome, EvalSummary};
pub use extract::{extract_relevant, split_sentences, truncate_answer};
pub use faq::match_faq;
pub use intent::{classify, matched_intent};
pub use model::{Answer, AnswerSource, AskRequest, FaqEntry, Product};
pub use normalize::{extract_keywords, normalize, STOP_WORDS};
pub use orchestration::{ask, resolve_locally, Orchestrator, FALLBACK_MESSAGE};
pub use similarity::similarity;
pub use storage::{load_products_jsonl, save_products_jsonl};
pub use synonyms::{expand_keywords, SYNONYMS};
