use std::fmt::Write as _;

use crate::model::Product;

/// FAQ pairs included in the prompt context; the rest of the list is noise
/// for the model and cost for the caller.
const MAX_CONTEXT_FAQS: usize = 5;

/// Flatten a product snapshot into the context block sent to the external
/// assistant. The exact wording is not a contract, but it is covered by a
/// golden test so accidental drift is visible.
pub fn build_context(product: &Product) -> String {
    let mut context = String::new();

    let _ = writeln!(context, "Produs: {}", product.title);
    let _ = writeln!(context, "Descriere: {}", product.description);
    let _ = writeln!(context, "Preț: {} RON", product.price);
    let _ = writeln!(context, "Stoc: {} bucăți", product.stock);

    if let Some(category) = &product.category {
        let _ = writeln!(context, "Categorie: {category}");
    }

    if !product.faqs.is_empty() {
        let _ = writeln!(context, "\nÎntrebări frecvente:");
        for faq in product.faqs.iter().take(MAX_CONTEXT_FAQS) {
            let _ = writeln!(context, "Q: {}", faq.question);
            let _ = writeln!(context, "A: {}", faq.answer);
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FaqEntry, Product};

    fn product() -> Product {
        Product {
            id: 7,
            title: "Ghete Trekking Alpine".to_string(),
            description: "Ghete impermeabile pentru drumeții.".to_string(),
            price: 399.5,
            stock: 4,
            category: Some("Hiking".to_string()),
            faqs: vec![FaqEntry::new("Sunt impermeabile?", "Da, complet.")],
        }
    }

    #[test]
    fn includes_every_product_line_in_order() {
        let context = build_context(&product());
        assert_eq!(
            context,
            "Produs: Ghete Trekking Alpine\n\
             Descriere: Ghete impermeabile pentru drumeții.\n\
             Preț: 399.5 RON\n\
             Stoc: 4 bucăți\n\
             Categorie: Hiking\n\
             \n\
             Întrebări frecvente:\n\
             Q: Sunt impermeabile?\n\
             A: Da, complet.\n"
        );
    }

    #[test]
    fn omits_category_and_faq_block_when_absent() {
        let mut p = product();
        p.category = None;
        p.faqs.clear();
        let context = build_context(&p);
        assert!(!context.contains("Categorie:"));
        assert!(!context.contains("Întrebări frecvente:"));
    }

    #[test]
    fn caps_faq_pairs_at_five() {
        let mut p = product();
        p.faqs = (0..8)
            .map(|i| FaqEntry::new(format!("Întrebarea {i}?"), format!("Răspunsul {i}.")))
            .collect();
        let context = build_context(&p);
        assert_eq!(context.matches("Q: ").count(), 5);
        assert!(context.contains("Întrebarea 4?"));
        assert!(!context.contains("Întrebarea 5?"));
    }
}
