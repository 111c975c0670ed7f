use drapeapp::api::DrapeApi;
use drapeapp::attributes::{parse, parse_with_stage, AttrValue, ParseStage};
use drapeapp::commands::QueryResult;
use drapeapp::config::DrapeConfig;
use drapeapp::model::{CatalogItem, RawPayload};
use drapeapp::selection::{FilterMode, FilterSelection};
use drapeapp::store::memory::InMemoryStore;
use serde_json::json;

fn item(id: &str, payload: RawPayload) -> CatalogItem {
    let mut item = CatalogItem::new(id, format!("Item {}", id));
    item.attributes = payload;
    item
}

fn api_with(items: Vec<CatalogItem>) -> DrapeApi<InMemoryStore> {
    let mut store = InMemoryStore::new();
    for item in items {
        store.add_item(item);
    }
    DrapeApi::new(store, DrapeConfig::default())
}

fn ids(result: &QueryResult) -> Vec<&str> {
    result.items.iter().map(|i| i.id.as_str()).collect()
}

fn attributes_mode() -> FilterSelection {
    FilterSelection::new(FilterMode::ByAttributes)
}

#[test]
fn test_single_quoted_bareword_payload() {
    let raw = RawPayload::text("{fabric: 'Cotton', primary_colour: 'Red'}");
    let (parsed, stage) = parse_with_stage(&raw);

    assert_eq!(stage, ParseStage::Sanitized);
    let keys: Vec<&str> = parsed.keys().collect();
    assert_eq!(keys, vec!["Fabric", "Primary colour"]);
    assert_eq!(parsed.get("Fabric"), Some(&AttrValue::Scalar("Cotton".into())));
    assert_eq!(
        parsed.get("Primary colour"),
        Some(&AttrValue::Scalar("Red".into()))
    );
}

#[test]
fn test_unclosed_payload_with_bare_array() {
    let raw = RawPayload::text(r#"{"sizes": [S, M, L]"#);
    let (parsed, stage) = parse_with_stage(&raw);

    assert_eq!(stage, ParseStage::PatternExtracted);
    assert_eq!(
        parsed.get("Sizes"),
        Some(&AttrValue::List(vec!["S".into(), "M".into(), "L".into()]))
    );
}

#[test]
fn test_json_text_with_apostrophes_keeps_full_values() {
    let api = api_with(vec![
        item(
            "A",
            RawPayload::text(r#"{"fabric": "Women's Cotton", "neck": "Boat"}"#),
        ),
        item("B", RawPayload::text("{fabric: 'Silk'}")),
    ]);

    let result = api
        .query(&attributes_mode().toggle_filter("Fabric", "cotton"))
        .unwrap();
    assert_eq!(ids(&result), vec!["A"]);

    let fabric = result.facets.get("Fabric").unwrap();
    let values: Vec<&str> = fabric.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["Women's Cotton", "Silk"]);
    assert!(result.facets.get("Neck").is_some());
}

#[test]
fn test_facet_counts_and_unparsable_item() {
    let api = api_with(vec![
        item("A", RawPayload::from(json!({"Fabric": ["Cotton", "Silk"]}))),
        item("B", RawPayload::from(json!({"Fabric": "Cotton"}))),
        item("C", RawPayload::text("<<garbage>>")),
    ]);

    let unfiltered = api.query(&attributes_mode()).unwrap();
    let fabric = unfiltered.facets.get("Fabric").unwrap();
    let counts: Vec<(&str, usize)> = fabric
        .options
        .iter()
        .map(|o| (o.value.as_str(), o.count))
        .collect();
    assert_eq!(counts, vec![("Cotton", 2), ("Silk", 1)]);
    assert_eq!(ids(&unfiltered), vec!["A", "B", "C"]);
    assert_eq!(unfiltered.applied_filter_count, 0);

    let filtered = api
        .query(&attributes_mode().toggle_filter("Fabric", "Silk"))
        .unwrap();
    assert_eq!(ids(&filtered), vec!["A"]);
    assert_eq!(filtered.facets, unfiltered.facets);
}

#[test]
fn test_two_keys_combine_and_release_independently() {
    let api = api_with(vec![
        item("1", RawPayload::text("{occasion: 'Party', fabric: 'Silk'}")),
        item("2", RawPayload::text("{occasion: 'Party', fabric: 'Cotton'}")),
        item("3", RawPayload::text("{occasion: 'Work', fabric: 'Silk'}")),
        item("4", RawPayload::text("{occasion: 'Work', fabric: 'Wool'}")),
    ]);

    let party = attributes_mode().toggle_filter("Occasion", "Party");
    let silk = attributes_mode().toggle_filter("Fabric", "Silk");
    let both = party.toggle_filter("Fabric", "Silk");

    assert_eq!(ids(&api.query(&both).unwrap()), vec!["1"]);
    assert_eq!(both.applied_filter_count(), 2);

    let without_fabric = both.toggle_filter("Fabric", "Silk");
    assert_eq!(without_fabric, party);
    assert_eq!(ids(&api.query(&without_fabric).unwrap()), vec!["1", "2"]);

    let without_occasion = both.toggle_filter("Occasion", "Party");
    assert_eq!(without_occasion, silk);
    assert_eq!(ids(&api.query(&without_occasion).unwrap()), vec!["1", "3"]);
}

#[test]
fn test_case_insensitive_substring_matching() {
    let api = api_with(vec![
        item("1", RawPayload::from(json!({"primary_colour": "Red Floral"}))),
        item("2", RawPayload::from(json!({"primary_colour": "DARK RED"}))),
        item("3", RawPayload::from(json!({"primary_colour": "Blue"}))),
    ]);
    let result = api
        .query(&attributes_mode().toggle_filter("Primary colour", "red"))
        .unwrap();
    assert_eq!(ids(&result), vec!["1", "2"]);
}

#[test]
fn test_missing_payload_parses_to_nothing() {
    assert!(parse(&RawPayload::Empty).is_empty());
    assert!(parse(&RawPayload::text("   ")).is_empty());
    assert!(parse(&RawPayload::from(json!(42))).is_empty());
}
