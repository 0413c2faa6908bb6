//! Tests for header tokenization.

use std::path::PathBuf;

use unify_map::HeaderTokenizer;
use unify_model::{Dataset, SpellingLocale, TranslationTable};
use unify_standards::ReferenceRegistry;

fn bundled_registry() -> ReferenceRegistry {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../reference");
    ReferenceRegistry::verify_and_load(&dir)
        .expect("bundled reference data should verify")
        .0
}

#[test]
fn gdp_header_with_gb_table() {
    let registry = bundled_registry();
    let tokenizer = HeaderTokenizer::new(registry.translations(SpellingLocale::Gb));

    let token = tokenizer.tokenize("GDP (current US$)");
    assert_eq!(token.unit.as_deref(), Some("current US$"));
    assert!(token.tokens.contains(&"GDP".to_string()));
    assert_eq!(token.context, None);
}

#[test]
fn us_table_rewrites_british_spellings() {
    let registry = bundled_registry();
    let tokenizer = HeaderTokenizer::new(registry.translations(SpellingLocale::Us));

    let token = tokenizer.tokenize("Labour force, female");
    assert_eq!(token.translated, "Labor force, female");
    assert_eq!(token.context.as_deref(), Some("female"));
    assert_eq!(token.tokens, vec!["Labor", "force"]);
}

#[test]
fn context_comma_without_space() {
    let table = TranslationTable::default();
    let token = HeaderTokenizer::new(&table).tokenize("Labour force,female");
    assert_eq!(token.translated, "Labour force,female");
    assert_eq!(token.context.as_deref(), Some("female"));
    assert_eq!(token.tokens, vec!["Labour", "force"]);
}

#[test]
fn clause_comma_segments_translate_separately() {
    let registry = bundled_registry();
    let tokenizer = HeaderTokenizer::new(registry.translations(SpellingLocale::Us));

    let token = tokenizer.tokenize("Population 2017,labour");
    assert_eq!(token.translated, "Population 2,017,labor");
    assert_eq!(token.context.as_deref(), Some("labor"));
    assert_eq!(token.tokens, vec!["Population", "2017"]);
}

#[test]
fn labour_participation_snapshot() {
    let table = TranslationTable::new([("labor", "labour")]);
    let token = HeaderTokenizer::new(&table)
        .tokenize("Labor force participation rate of women, total (% of population)");

    insta::assert_json_snapshot!(token, @r#"
    {
      "raw_header": "Labor force participation rate of women, total (% of population)",
      "translated": "Labour force participation rate of women, total (% of population)",
      "tokens": [
        "Labour",
        "force",
        "participation",
        "rate",
        "women"
      ],
      "combos": [
        "rate of women"
      ],
      "unit": "% of population",
      "context": "total"
    }
    "#);
}

#[test]
fn integers_gain_thousands_separators() {
    let table = TranslationTable::default();
    let token = HeaderTokenizer::new(&table).tokenize("Population 2017 (thousands)");
    assert_eq!(token.translated, "Population 2,017 (thousands)");
    assert_eq!(token.unit.as_deref(), Some("thousands"));
    assert_eq!(token.context, None);
    assert_eq!(token.tokens, vec!["Population", "2017"]);
}

#[test]
fn tokenizes_every_dataset_header() {
    let table = TranslationTable::default();
    let datasets = vec![
        Dataset::new(vec!["Country".to_string(), "Year".to_string()]),
        Dataset::new(vec!["Trade and industry".to_string()]),
    ];
    let tokens = HeaderTokenizer::new(&table).tokenize_datasets(&datasets);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].combos, vec!["Trade and industry"]);
    assert!(tokens[2].tokens.contains(&"Trade".to_string()));
}
