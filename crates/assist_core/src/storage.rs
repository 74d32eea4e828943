use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Product;

pub fn save_products_jsonl(path: &Path, products: &[Product]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for product in products {
        let line = serde_json::to_string(product).context("serialize product")?;
        writer
            .write_all(line.as_bytes())
            .context("write product line")?;
        writer.write_all(b"\n").context("write newline")?;
    }

    writer.flush().context("flush output")
}

pub fn load_products_jsonl(path: &Path) -> Result<Vec<Product>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut products = Vec::new();

    for line in reader.lines() {
        let line = line.context("read jsonl line")?;
        if line.trim().is_empty() {
            continue;
        }
        let product: Product = serde_json::from_str(&line).context("parse product json")?;
        products.push(product);
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FaqEntry;

    fn sample() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                title: "Adidași Sport Run".to_string(),
                description: "Pentru alergare zilnică.".to_string(),
                price: 299.99,
                stock: 10,
                category: Some("Running Shoes".to_string()),
                faqs: vec![FaqEntry::new("Au amortizare?", "Da, talpă EVA.")],
            },
            Product {
                id: 2,
                title: "Ghete Piele".to_string(),
                description: "Piele naturală.".to_string(),
                price: 450.0,
                stock: 3,
                category: None,
                faqs: Vec::new(),
            },
        ]
    }

    #[test]
    fn roundtrips_products_with_faq_lists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("products.jsonl");

        save_products_jsonl(&path, &sample()).expect("save");
        let loaded = load_products_jsonl(&path).expect("load");

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, 1);
        assert_eq!(loaded[0].faqs.len(), 1);
        assert_eq!(loaded[0].faqs[0].answer, "Da, talpă EVA.");
        assert_eq!(loaded[1].category, None);
    }

    #[test]
    fn skips_blank_lines_and_parses_minimal_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("products.jsonl");
        // category and faqs are optional; created_at defaults when absent
        std::fs::write(
            &path,
            "\n{\"id\":9,\"title\":\"T\",\"description\":\"D\",\"price\":1.0,\"stock\":0}\n\n",
        )
        .expect("write");

        let loaded = load_products_jsonl(&path).expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 9);
        assert!(loaded[0].faqs.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_products_jsonl(Path::new("/nonexistent/products.jsonl")).is_err());
    }
}
