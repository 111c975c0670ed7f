use drapeapp::api::DrapeApi;
use drapeapp::config::DrapeConfig;
use drapeapp::model::{CatalogItem, RawPayload};
use drapeapp::selection::{FilterMode, FilterSelection};
use drapeapp::store::memory::InMemoryStore;
use std::collections::BTreeSet;

const FABRICS: &[&str] = &["Silk", "Cotton", "Wool", "Linen"];
const OCCASIONS: &[&str] = &["Party", "Work", "Casual"];
const SHAPES: &[&str] = &["Hourglass", "Pear", "Apple"];
const SEASONS: &[&str] = &["Spring", "Summer", "Autumn", "Winter"];

/// A catalog that covers every (fabric, occasion, shape, season) combination.
fn catalog() -> DrapeApi<InMemoryStore> {
    let mut store = InMemoryStore::new();
    let mut n = 0;
    for fabric in FABRICS {
        for occasion in OCCASIONS {
            n += 1;
            let mut item = CatalogItem::new(n.to_string(), format!("{} {}", fabric, occasion));
            item.attributes =
                RawPayload::text(format!("{{fabric: '{}', occasion: '{}'}}", fabric, occasion));
            item.body_shapes = vec![SHAPES[n % SHAPES.len()].to_string()];
            item.color_tones = vec![SEASONS[n % SEASONS.len()].to_string()];
            store.add_item(item);
        }
    }
    DrapeApi::new(store, DrapeConfig::default())
}

fn result_ids(api: &DrapeApi<InMemoryStore>, selection: &FilterSelection) -> BTreeSet<String> {
    api.query(selection)
        .unwrap()
        .items
        .into_iter()
        .map(|i| i.id)
        .collect()
}

#[test]
fn test_more_values_for_one_key_widen_results() {
    let api = catalog();
    let base = FilterSelection::new(FilterMode::ByAttributes);
    for (i, first) in FABRICS.iter().enumerate() {
        for second in &FABRICS[i + 1..] {
            let one = base.toggle_filter("Fabric", first);
            let two = one.toggle_filter("Fabric", second);
            let narrow = result_ids(&api, &one);
            let wide = result_ids(&api, &two);
            assert!(narrow.is_subset(&wide), "{} vs {}+{}", first, first, second);
            assert!(wide.len() > narrow.len());
        }
    }
}

#[test]
fn test_more_keys_narrow_results() {
    let api = catalog();
    let base = FilterSelection::new(FilterMode::ByAttributes);
    for fabric in FABRICS {
        for occasion in OCCASIONS {
            let one = base.toggle_filter("Fabric", fabric);
            let two = one.toggle_filter("Occasion", occasion);
            let first_only = result_ids(&api, &one);
            let both = result_ids(&api, &two);
            assert!(both.is_subset(&first_only));
            assert_eq!(both.len(), 1);
        }
    }
}

#[test]
fn test_all_mode_is_shape_or_season() {
    let api = catalog();
    let shape = FilterSelection::new(FilterMode::ByBodyShape).with_body_shape("Pear");
    let season = FilterSelection::new(FilterMode::ByColor).with_color_season("Winter");
    let all = FilterSelection::new(FilterMode::All)
        .with_body_shape("Pear")
        .with_color_season("Winter");

    let union: BTreeSet<String> = result_ids(&api, &shape)
        .union(&result_ids(&api, &season))
        .cloned()
        .collect();
    assert_eq!(result_ids(&api, &all), union);
}

#[test]
fn test_attribute_filters_layer_on_every_mode() {
    let api = catalog();
    let modes = [
        FilterSelection::new(FilterMode::All)
            .with_body_shape("Apple")
            .with_color_season("Summer"),
        FilterSelection::new(FilterMode::ByBodyShape).with_body_shape("Hourglass"),
        FilterSelection::new(FilterMode::ByColor).with_color_season("autumn"),
        FilterSelection::new(FilterMode::ByAttributes),
    ];
    for base in modes {
        let filtered = base.toggle_filter("Fabric", "silk");
        let narrowed = result_ids(&api, &filtered);
        assert!(narrowed.is_subset(&result_ids(&api, &base)));
        for id in narrowed {
            let n: usize = id.parse().unwrap();
            assert_eq!(FABRICS[(n - 1) / OCCASIONS.len()], "Silk");
        }
    }
}

#[test]
fn test_facets_do_not_depend_on_selection() {
    let api = catalog();
    let base = FilterSelection::new(FilterMode::ByBodyShape).with_body_shape("Pear");
    let filtered = base.toggle_filter("Occasion", "Work");
    assert_eq!(
        api.query(&base).unwrap().facets,
        api.query(&filtered).unwrap().facets
    );
}

#[test]
fn test_clearing_filters_restores_base_results() {
    let api = catalog();
    let base = FilterSelection::new(FilterMode::ByColor).with_color_season("Spring");
    let filtered = base
        .toggle_filter("Fabric", "Wool")
        .toggle_filter("Occasion", "Casual");
    assert_eq!(filtered.clear_filters(), base);
    assert_eq!(
        result_ids(&api, &filtered.clear_filters()),
        result_ids(&api, &base)
    );
}
