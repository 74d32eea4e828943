/// Domain synonym table: canonical concept -> surface variants seen in
/// product descriptions and customer questions. Loaded once, never mutated.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    (
        "material",
        &["material", "materiale", "fabricat", "realizat", "confectionat"],
    ),
    (
        "piele",
        &["piele", "leather", "piele naturala", "piele de vita"],
    ),
    ("cauciuc", &["cauciuc", "rubber", "talpa", "talpa exterioara"]),
    (
        "curatare",
        &["curatare", "curat", "spalare", "intretinere", "clean", "washing"],
    ),
    ("marime", &["marime", "masura", "size", "sizes", "disponibil"]),
    (
        "garantie",
        &["garantie", "garantia", "warranty", "garantie de"],
    ),
    (
        "livrare",
        &["livrare", "livrat", "delivery", "shipping", "trimis"],
    ),
    (
        "returnare",
        &["returnare", "return", "returnat", "schimb", "exchange"],
    ),
    (
        "impermeabil",
        &["impermeabil", "waterproof", "rezistent la apa", "apa"],
    ),
    ("iarna", &["iarna", "winter", "zapada", "frig", "rece"]),
    ("vara", &["vara", "summer", "cald", "caldura"]),
    (
        "alergare",
        &["alergare", "running", "jogging", "sport", "maraton"],
    ),
    (
        "hiking",
        &["hiking", "trekking", "drumetie", "outdoor", "montan"],
    ),
];

/// Expand a keyword set with every variant of each concept the keyword
/// touches. A concept fires when one of its variants contains the keyword or
/// the keyword contains the variant. Result keeps input order first and is
/// de-duplicated.
pub fn expand_keywords(keywords: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        push_unique(&mut expanded, keyword);
    }

    for keyword in keywords {
        for (_, variants) in SYNONYMS {
            let touches = variants
                .iter()
                .any(|v| v.contains(keyword.as_str()) || keyword.contains(v));
            if touches {
                for variant in *variants {
                    push_unique(&mut expanded, variant);
                }
            }
        }
    }

    expanded
}

fn push_unique(out: &mut Vec<String>, candidate: &str) {
    if !out.iter().any(|existing| existing == candidate) {
        out.push(candidate.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn expansion_is_a_superset_of_the_input() {
        let input = kw(&["piele"]);
        let out = expand_keywords(&input);
        assert!(out.contains(&"piele".to_string()));
        assert!(out.contains(&"leather".to_string()));
        assert!(out.contains(&"piele naturala".to_string()));
    }

    #[test]
    fn substring_in_either_direction_triggers_a_concept() {
        // "water" is a substring of the "waterproof" variant
        let out = expand_keywords(&kw(&["water"]));
        assert!(out.contains(&"impermeabil".to_string()));

        // "alergarea" contains the "alergare" variant
        let out = expand_keywords(&kw(&["alergarea"]));
        assert!(out.contains(&"jogging".to_string()));
    }

    #[test]
    fn result_is_deduplicated_and_keeps_input_first() {
        let out = expand_keywords(&kw(&["talpa", "cauciuc"]));
        assert_eq!(out[0], "talpa");
        assert_eq!(out[1], "cauciuc");
        let talpa_count = out.iter().filter(|w| w.as_str() == "talpa").count();
        assert_eq!(talpa_count, 1);
    }

    #[test]
    fn unrelated_keyword_passes_through_unchanged() {
        let out = expand_keywords(&kw(&["xyzabc"]));
        assert_eq!(out, kw(&["xyzabc"]));
    }
}
