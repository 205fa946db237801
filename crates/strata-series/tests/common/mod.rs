use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use strata_data::{FactsDocument, RawFact};

#[allow(dead_code)]
pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

#[allow(dead_code)]
pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative))
        .expect("fixture file should be readable")
}

#[allow(dead_code)]
pub fn companyfacts() -> FactsDocument {
    FactsDocument::parse_json(&read_fixture("companyfacts.json"))
        .expect("fixture should parse as companyfacts")
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(dead_code)]
pub fn raw(start: NaiveDate, end: NaiveDate, val: f64, form: &str, filed: NaiveDate) -> RawFact {
    RawFact {
        start: Some(start.to_string()),
        end: Some(end.to_string()),
        val: Some(val),
        form: Some(form.to_string()),
        filed: Some(filed.to_string()),
        ..Default::default()
    }
}
