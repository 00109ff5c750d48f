mod common;

use assert2::{check, let_assert};
use common::{SAMPLE_JSON, SEARCH_INDEX_JS, read_fixture};
use documenter_search::{Category, ParseError, SearchIndex, payload};
use rstest::rstest;

#[test]
fn sample_payload_has_seven_entries() {
    let_assert!(Ok(index) = payload::parse_json(&read_fixture(SAMPLE_JSON)));

    check!(index.len() == 7);
    let first = &index.entries()[0];
    check!(first.title == "Home");
    check!(first.category == Category::Page);
    check!(first.location == "");
    check!(first.text == "CurrentModule = UnfoldStats");
}

#[test]
fn sample_payload_preserves_build_order() {
    let index = payload::parse_json(&read_fixture(SAMPLE_JSON)).unwrap();
    let titles: Vec<&str> = index.iter().map(|e| e.title.as_str()).collect();
    check!(
        titles
            == vec![
                "Home",
                "UnfoldStats",
                "Home",
                "Home",
                "Home",
                "UnfoldStats.contained_or_equal",
                "UnfoldStats.extract_coefs",
            ]
    );
}

#[test]
fn generated_script_parses_through_wrapper() {
    let_assert!(Ok(index) = payload::parse(&read_fixture(SEARCH_INDEX_JS)));

    check!(index.len() == 11);
    check!(index.entries()[1].category == Category::Section);
    check!(index.by_category(&Category::Method).count() == 6);

    let last = &index.entries()[10];
    check!(last.title == "UnfoldStats.get_predictor_string");
    check!(last.text.contains("\":condition\""));
}

#[test]
fn sample_is_prefix_of_full_index() {
    let sample = payload::parse(&read_fixture(SAMPLE_JSON)).unwrap();
    let full = payload::parse(&read_fixture(SEARCH_INDEX_JS)).unwrap();
    check!(full.entries()[..7] == *sample.entries());
}

#[rstest]
#[case(SAMPLE_JSON)]
#[case(SEARCH_INDEX_JS)]
fn serialize_then_parse_is_identity(#[case] fixture: &str) {
    let index = payload::parse(&read_fixture(fixture)).unwrap();

    let json = payload::to_json(&index);
    check!(payload::parse_json(&json).unwrap() == index);

    let script = payload::to_script(&index, payload::DEFAULT_VAR_NAME);
    check!(payload::parse(&script).unwrap() == index);

    check!(payload::parse_json(&payload::to_json_pretty(&index)).unwrap().fingerprint() == index.fingerprint());
}

#[test]
fn serialized_shape_keeps_field_names() {
    let index = payload::parse(&read_fixture(SAMPLE_JSON)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload::to_json(&index)).unwrap();

    let_assert!(Some(docs) = value.get("docs").and_then(|d| d.as_array()));
    check!(docs.len() == 7);
    for doc in docs {
        let_assert!(Some(object) = doc.as_object());
        check!(object.len() == 5);
        for field in ["location", "page", "title", "text", "category"] {
            check!(object.get(field).is_some_and(serde_json::Value::is_string), "field {}", field);
        }
    }
}

#[rstest]
#[case("location")]
#[case("page")]
#[case("title")]
#[case("text")]
#[case("category")]
fn every_field_is_required(#[case] field: &str) {
    let mut value: serde_json::Value = serde_json::from_str(&read_fixture(SAMPLE_JSON)).unwrap();
    value["docs"][3].as_object_mut().unwrap().remove(field);

    let_assert!(Err(ParseError::InvalidEntry { index, message }) = payload::parse_json(&value.to_string()));
    check!(index == 3);
    check!(message.contains(field));
}

#[rstest]
#[case(serde_json::json!(1))]
#[case(serde_json::json!(null))]
#[case(serde_json::json!(["Home"]))]
#[case(serde_json::json!({"name": "Home"}))]
fn every_field_must_be_a_string(#[case] replacement: serde_json::Value) {
    let mut value: serde_json::Value = serde_json::from_str(&read_fixture(SAMPLE_JSON)).unwrap();
    value["docs"][0]["title"] = replacement;

    let_assert!(Err(ParseError::InvalidEntry { index: 0, .. }) = payload::parse_json(&value.to_string()));
}

#[test]
fn truncated_payload_is_a_syntax_error() {
    let content = read_fixture(SEARCH_INDEX_JS);
    let truncated = &content[..content.len() / 2];
    let_assert!(Err(ParseError::Syntax { .. }) = payload::parse(truncated));
}

#[test]
fn entries_expose_anchors() {
    let index: SearchIndex = payload::parse(&read_fixture(SEARCH_INDEX_JS)).unwrap();
    let anchors: Vec<_> = index
        .iter()
        .filter(|e| e.is_symbol())
        .filter_map(|e| e.anchor())
        .map(|a| (a.name().to_string(), a.signature.map(str::to_string)))
        .collect();

    check!(anchors.len() == 6);
    check!(anchors[0] == ("contained_or_equal".to_string(), Some("Tuple{Any, Any}".to_string())));
    check!(anchors[5] == ("get_predictor_string".to_string(), Some("Tuple{Symbol}".to_string())));
}
