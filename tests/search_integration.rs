//! Integration tests for the search pipeline
//!
//! Exercises the full path from raw request input through configuration
//! resolution, predicate building, execution and projection.

use std::sync::Arc;

use chrono::NaiveDate;
use sift::entity::{AttributeKind, AttributeMeta, EntityMetadata};
use sift::query::RawValue;
use sift::schema::FieldKind;
use sift::{
    ConfigStore, Entity, EntityRegistry, FieldDescriptor, FieldValue, MemorySource, SearchConfig,
    SearchRequest, SearchService, SearchSettings, SiftError,
};

fn product_metadata() -> EntityMetadata {
    EntityMetadata::new()
        .attribute("name", AttributeMeta::new(AttributeKind::Text))
        .attribute("description", AttributeMeta::new(AttributeKind::Text))
        .attribute(
            "status",
            AttributeMeta::new(AttributeKind::Text).with_choices(vec![
                sift::Choice::new("active", "Active"),
                sift::Choice::new("inactive", "Inactive"),
            ]),
        )
        .attribute("price", AttributeMeta::new(AttributeKind::Numeric))
        .attribute("created", AttributeMeta::new(AttributeKind::Date))
}

fn product(id: u64, name: &str, status: &str, price: f64, created: &str) -> Entity {
    let date = NaiveDate::parse_from_str(created, "%Y-%m-%d").unwrap();
    Entity::new(id, name)
        .with_url(format!("/catalog/{}/", id))
        .set("name", FieldValue::Text(name.to_string()))
        .set("description", FieldValue::Text(format!("{} description", name)))
        .set("status", FieldValue::Text(status.to_string()))
        .set("price", FieldValue::Number(price))
        .set("created", FieldValue::Date(date))
}

struct Harness {
    service: SearchService,
    config_id: u64,
    type_id: u32,
}

fn setup(products: Vec<Entity>, results_limit: usize) -> Harness {
    let source = MemorySource::new(product_metadata()).with_records(products);

    let mut registry = EntityRegistry::new();
    let type_id = registry.register("shop.product", Arc::new(source));

    let store = ConfigStore::new();
    let config_id = store.insert_config(
        SearchConfig::new("Catalog search", "shop.product").with_results_limit(results_limit),
    );
    store
        .insert_field(
            config_id,
            FieldDescriptor::new("name", "Name", FieldKind::Text).with_order(0),
        )
        .unwrap();
    store
        .insert_field(
            config_id,
            FieldDescriptor::new("status", "Status", FieldKind::SingleChoice).with_order(1),
        )
        .unwrap();
    store
        .insert_field(
            config_id,
            FieldDescriptor::new("price", "Price", FieldKind::numeric_range()).with_order(2),
        )
        .unwrap();
    store
        .insert_field(
            config_id,
            FieldDescriptor::new("created", "Created", FieldKind::DateRange).with_order(3),
        )
        .unwrap();

    let service = SearchService::new(
        Arc::new(store),
        Arc::new(registry),
        SearchSettings::default(),
    );

    Harness {
        service,
        config_id,
        type_id,
    }
}

fn request(harness: &Harness) -> SearchRequest {
    SearchRequest {
        config_id: harness.config_id,
        content_type_id: harness.type_id,
        search_data: Default::default(),
        limit: None,
        order_by: None,
    }
}

fn five_products() -> Vec<Entity> {
    vec![
        product(1, "Desk lamp", "active", 40.0, "2024-01-10"),
        product(2, "Floor LAMP deluxe", "inactive", 90.0, "2024-02-01"),
        product(3, "Lamp shade", "inactive", 15.0, "2024-03-15"),
        product(4, "Office chair", "active", 120.0, "2024-01-20"),
        product(5, "Desk organizer", "active", 25.0, "2024-01-05"),
    ]
}

#[test]
fn test_text_and_choice_filters_combine_conjunctively() {
    let harness = setup(five_products(), 10);
    let mut req = request(&harness);
    req.search_data
        .insert("name".to_string(), RawValue::One("lamp".to_string()));
    req.search_data
        .insert("status".to_string(), RawValue::One("active".to_string()));

    // Only "Desk lamp" satisfies both: the other lamps are inactive and the
    // other active products have no "lamp" in the name
    let outcome = harness.service.search(&req).unwrap();
    assert_eq!(outcome.total, 1);
    assert_eq!(outcome.results[0].title, "Desk lamp");
}

#[test]
fn test_lower_bound_alone_filters_independently() {
    let harness = setup(five_products(), 10);
    let mut req = request(&harness);
    req.search_data.insert(
        "created_min".to_string(),
        RawValue::One("20.01.2024".to_string()),
    );

    let outcome = harness.service.search(&req).unwrap();
    // Everything created on or after 2024-01-20, no upper bound
    assert_eq!(outcome.total, 3);
}

#[test]
fn test_numeric_range_bounds() {
    let harness = setup(five_products(), 10);
    let mut req = request(&harness);
    req.search_data
        .insert("price_min".to_string(), RawValue::One("20".to_string()));
    req.search_data
        .insert("price_max".to_string(), RawValue::One("100".to_string()));

    let outcome = harness.service.search(&req).unwrap();
    assert_eq!(outcome.total, 3);
}

#[test]
fn test_limit_and_has_more() {
    let products = (1..=15)
        .map(|i| {
            product(
                i,
                &format!("Widget {}", i),
                "active",
                i as f64,
                "2024-01-01",
            )
        })
        .collect();
    let harness = setup(products, 10);

    let outcome = harness.service.search(&request(&harness)).unwrap();
    assert_eq!(outcome.total, 15);
    assert_eq!(outcome.results.len(), 10);
    assert!(outcome.has_more);
    assert!(outcome.show_count);
}

#[test]
fn test_empty_input_matches_everything() {
    let harness = setup(five_products(), 10);
    let outcome = harness.service.search(&request(&harness)).unwrap();
    assert_eq!(outcome.total, 5);
    assert!(!outcome.has_more);
}

#[test]
fn test_results_are_projected_uniformly() {
    let harness = setup(five_products(), 10);
    let mut req = request(&harness);
    req.search_data
        .insert("name".to_string(), RawValue::One("chair".to_string()));

    let outcome = harness.service.search(&req).unwrap();
    assert_eq!(outcome.results.len(), 1);
    let record = &outcome.results[0];
    assert_eq!(record.id, 4);
    assert_eq!(record.content_type, "shop.product");
    assert_eq!(record.title, "Office chair");
    assert_eq!(record.description, "Office chair description");
    assert_eq!(record.url.as_deref(), Some("/catalog/4/"));
}

#[test]
fn test_malformed_date_rejects_request() {
    let harness = setup(five_products(), 10);
    let mut req = request(&harness);
    req.search_data.insert(
        "created_min".to_string(),
        RawValue::One("not-a-date".to_string()),
    );

    let err = harness.service.search(&req).unwrap_err();
    assert!(matches!(err, SiftError::MalformedDate { .. }));
    assert!(err.is_invalid_input());
}

#[test]
fn test_unknown_entity_type_is_not_found_not_internal() {
    let store = ConfigStore::new();
    let config_id = store.insert_config(SearchConfig::new("Orphan", "gone.model"));
    let service = SearchService::new(
        Arc::new(store),
        Arc::new(EntityRegistry::new()),
        SearchSettings::default(),
    );

    let err = service
        .search(&SearchRequest {
            config_id,
            content_type_id: 1,
            search_data: Default::default(),
            limit: None,
            order_by: None,
        })
        .unwrap_err();
    assert!(matches!(err, SiftError::UnknownEntityType(_)));
    assert!(err.is_not_found());
}

#[test]
fn test_ordering_falls_back_on_unknown_key() {
    let harness = setup(five_products(), 10);
    let mut req = request(&harness);
    req.order_by = Some("secret_column".to_string());

    let outcome = harness.service.search(&req).unwrap();
    // Falls back to -created: newest first
    assert_eq!(outcome.results[0].id, 3);
}

#[test]
fn test_explicit_price_ordering() {
    let harness = setup(five_products(), 10);
    let mut req = request(&harness);
    req.order_by = Some("price".to_string());

    let outcome = harness.service.search(&req).unwrap();
    let ids: Vec<u64> = outcome.results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 5, 1, 2, 4]);
}

#[test]
fn test_field_choices_endpoint_path() {
    let harness = setup(five_products(), 10);
    let fields = harness.service.panel(harness.config_id).unwrap().fields;
    let status_field = fields.iter().find(|f| f.field_name == "status").unwrap();

    let resolved = harness
        .service
        .field_choices(harness.config_id, status_field.id)
        .unwrap();
    assert_eq!(resolved.field_type, "single_choice");
    assert_eq!(resolved.choices.len(), 2);
    assert_eq!(resolved.choices[0].value, "active");
}
