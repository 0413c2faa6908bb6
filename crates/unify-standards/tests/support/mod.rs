#![allow(dead_code)]

use std::fs;
use std::path::Path;

use unify_standards::hash::sha256_hex;

pub const COUNTRIES: &str = r#"[
  {"name": "United Kingdom", "alpha2": "GB", "alpha3": "GBR", "m49": "826", "aliases": ["Great Britain"]},
  {"name": "Yugoslavia", "alpha3": "YUG", "preceding": "former"},
  {"name": "Britain", "aliases": ["Great Britain"]}
]"#;

pub const US_GB: &str = r#"{"color": "colour", "labor": "labour"}"#;

pub const GB_US: &str = r#"{"colour": "color"}"#;

pub fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write fixture");
}

pub fn sha(path: &Path) -> String {
    sha256_of(&fs::read(path).expect("read fixture"))
}

pub fn sha256_of(bytes: &[u8]) -> String {
    sha256_hex(bytes)
}

/// Writes the three reference files plus a manifest pinning their hashes.
pub fn write_reference_dir(dir: &Path) {
    write(&dir.join("countries.json"), COUNTRIES.as_bytes());
    write(&dir.join("dictionaries/us-gb.json"), US_GB.as_bytes());
    write(&dir.join("dictionaries/gb-us.json"), GB_US.as_bytes());

    let manifest = format!(
        r#"[manifest]
schema = "unify.reference-manifest"
schema_version = 1

[pins]
countries = "fixture"
translations = "fixture"

[[files]]
path = "countries.json"
sha256 = "{}"
kind = "json"
role = "countries"

[[files]]
path = "dictionaries/us-gb.json"
sha256 = "{}"
kind = "json"
role = "translations_us_gb"

[[files]]
path = "dictionaries/gb-us.json"
sha256 = "{}"
kind = "json"
role = "translations_gb_us"
"#,
        sha(&dir.join("countries.json")),
        sha(&dir.join("dictionaries/us-gb.json")),
        sha(&dir.join("dictionaries/gb-us.json")),
    );
    write(&dir.join("manifest.toml"), manifest.as_bytes());
}
