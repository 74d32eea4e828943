use crate::extract::extract_relevant;
use crate::model::Product;
use crate::normalize::normalize;

pub const WARRANTY_ANSWER: &str = "Da, toate produsele noastre beneficiază de garanție de 2 ani pentru defecte de fabricație. Pentru detalii suplimentare, vă rugăm să ne contactați.";
pub const CHILDREN_ANSWER: &str = "Acest produs este recomandat pentru adulți. Pentru produse potrivite copiilor, vă recomandăm să consultați categoria dedicată sau să ne contactați pentru recomandări specifice.";
pub const SIZE_ANSWER: &str = "Produsele noastre sunt disponibile în mărimi standard de la 36 la 46. Pentru mărimi speciale sau consultanță personalizată, vă rugăm să ne contactați.";
pub const RUNNING_ANSWER: &str = "Da, acest produs este special proiectat pentru alergare și oferă suport excelent și amortizare pentru activități sportive.";
pub const RUNNING_REDIRECT_ANSWER: &str = "Acest produs este proiectat pentru uz zilnic și confort. Pentru alergare, recomandăm produsele din categoria Running Shoes care oferă suport specializat.";
pub const CLEANING_ANSWER: &str = "Recomandăm curățarea cu o cârpă umedă și un detergent blând. Evitați mașina de spălat și uscarea la soare direct pentru a menține calitatea produsului.";
pub const RETURN_ANSWER: &str = "Puteți returna produsul în termen de 14 zile de la cumpărare, în condiții originale, cu bonul fiscal. Pentru detalii despre procesul de returnare, vă rugăm să ne contactați.";
pub const LEATHER_ANSWER: &str = "Acest produs este confecționat din piele naturală de înaltă calitate, ceea ce asigură durabilitate și confort pe termen lung.";
pub const TEXTILE_ANSWER: &str = "Acest produs este confecționat din materiale textile de calitate, oferind confort și respirabilitate excelentă.";

/// Keyword list used for the material-specific description lookup, wider
/// than the trigger list so composition sentences score even when the
/// question only says "material".
const MATERIAL_INFO_KEYWORDS: &[&str] = &[
    "piele",
    "leather",
    "canvas",
    "textil",
    "cauciuc",
    "rubber",
    "material",
    "materials",
    "eva",
    "sintetic",
    "synthetic",
    "premium",
    "calitate",
    "fabricat",
    "realizat",
    "confectionat",
];

/// How a matched rule produces its answer.
#[derive(Debug, Clone, Copy)]
enum Resolver {
    /// A fixed message, independent of the product.
    Canned(&'static str),
    /// Affirmative for running-category products, a redirect otherwise.
    RunningSuitability,
    /// Description lookup; may produce nothing and fall through to the
    /// generic extractor.
    MaterialLookup,
}

struct IntentRule {
    name: &'static str,
    keywords: &'static [&'static str],
    resolver: Resolver,
}

/// Recognized question categories, evaluated top to bottom. A rule fires
/// when any keyword is a substring of the normalized question; the first
/// firing rule wins, except `material` which may decline and let the
/// generic extractor run.
const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        name: "warranty",
        keywords: &["garanție", "garantie", "warranty", "garantia"],
        resolver: Resolver::Canned(WARRANTY_ANSWER),
    },
    IntentRule {
        name: "children",
        keywords: &["copii", "children", "child", "kid", "kids"],
        resolver: Resolver::Canned(CHILDREN_ANSWER),
    },
    IntentRule {
        name: "size",
        keywords: &["măsură", "masura", "size", "mărime", "marime", "sizes"],
        resolver: Resolver::Canned(SIZE_ANSWER),
    },
    IntentRule {
        name: "running",
        keywords: &["alergare", "running", "jogging", "sport"],
        resolver: Resolver::RunningSuitability,
    },
    IntentRule {
        name: "cleaning",
        keywords: &["curățare", "curatare", "clean", "washing", "spălare", "spalare"],
        resolver: Resolver::Canned(CLEANING_ANSWER),
    },
    IntentRule {
        name: "returns",
        keywords: &["returnare", "return", "schimb", "exchange"],
        resolver: Resolver::Canned(RETURN_ANSWER),
    },
    IntentRule {
        name: "material",
        keywords: &[
            "material",
            "materials",
            "leather",
            "piele",
            "canvas",
            "textil",
            "cauciuc",
            "rubber",
        ],
        resolver: Resolver::MaterialLookup,
    },
];

/// Resolve a normalized question against the fixed intent rule table.
pub fn classify(normalized_question: &str, product: &Product) -> Option<String> {
    for rule in INTENT_RULES {
        if !contains_any(normalized_question, rule.keywords) {
            continue;
        }
        match rule.resolver {
            Resolver::Canned(answer) => return Some(answer.to_string()),
            Resolver::RunningSuitability => return Some(running_answer(product).to_string()),
            Resolver::MaterialLookup => {
                if let Some(answer) = material_answer(product, normalized_question) {
                    return Some(answer);
                }
            }
        }
    }
    None
}

/// Name of the first rule a question would trigger. Diagnostic only.
pub fn matched_intent(normalized_question: &str) -> Option<&'static str> {
    INTENT_RULES
        .iter()
        .find(|rule| contains_any(normalized_question, rule.keywords))
        .map(|rule| rule.name)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn running_answer(product: &Product) -> &'static str {
    let is_running_category = product
        .category
        .as_deref()
        .map(|c| c.to_lowercase().contains("running"))
        .unwrap_or(false);
    if is_running_category {
        RUNNING_ANSWER
    } else {
        RUNNING_REDIRECT_ANSWER
    }
}

fn material_answer(product: &Product, normalized_question: &str) -> Option<String> {
    let keywords: Vec<String> = MATERIAL_INFO_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect();
    let extracted = extract_relevant(&product.description, normalized_question, &keywords);
    if !extracted.is_empty() {
        return Some(extracted);
    }

    let normalized_description = normalize(&product.description);
    if normalized_description.contains("leather") || normalized_description.contains("piele") {
        return Some(LEATHER_ANSWER.to_string());
    }
    if normalized_description.contains("canvas") || normalized_description.contains("textil") {
        return Some(TEXTILE_ANSWER.to_string());
    }
    None
}
