use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::model::{AnswerSource, Product};
use crate::orchestration::resolve_locally;

/// One regression case for the local resolution chain. `expected_source`
/// pins the stage that must answer; `expected_contains` pins a fragment of
/// the answer text. Either may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub case_id: String,
    pub question: String,
    #[serde(default)]
    pub expected_source: Option<AnswerSource>,
    #[serde(default)]
    pub expected_contains: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub case_id: String,
    pub passed: bool,
    pub actual_source: AnswerSource,
    pub actual_answer: String,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f32,
    pub outcomes: Vec<EvalOutcome>,
}

pub struct CaseExpectation;

impl CaseExpectation {
    pub fn matches(
        expected_source: Option<AnswerSource>,
        expected_contains: Option<&str>,
        actual_source: AnswerSource,
        actual_answer: &str,
    ) -> bool {
        if let Some(expected) = expected_source {
            if expected != actual_source {
                return false;
            }
        }

        if let Some(fragment) = expected_contains {
            if !actual_answer.contains(fragment) {
                return false;
            }
        }

        true
    }
}

/// Run every case through the local chain against one product snapshot.
/// The external service is deliberately out of the loop: evaluation must be
/// deterministic and runnable offline.
pub fn evaluate_cases(product: &Product, cases: &[EvalCase]) -> EvalSummary {
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let start = Instant::now();
        let answer = resolve_locally(&case.question, product);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let passed = CaseExpectation::matches(
            case.expected_source,
            case.expected_contains.as_deref(),
            answer.source,
            &answer.text,
        );

        outcomes.push(EvalOutcome {
            case_id: case.case_id.clone(),
            passed,
            actual_source: answer.source,
            actual_answer: answer.text,
            latency_ms,
        });
    }

    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = total.saturating_sub(passed);
    let pass_rate = if total == 0 {
        0.0
    } else {
        passed as f32 / total as f32
    };

    EvalSummary {
        total,
        passed,
        failed,
        pass_rate,
        outcomes,
    }
}
