use crate::catalog::{Catalog, CatalogError, format_cents};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_builtin_catalog_loads() {
    let catalog = Catalog::builtin().unwrap();
    assert!(!catalog.is_empty());
    assert!(!catalog.categories().is_empty());
    assert!(catalog.dishes().iter().any(|d| d.is_popular));
    assert!(catalog.late_night_restaurants().all(|r| r.late_night));
}

#[test]
fn test_load_catalog_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    let content = r#"
{
  "dishes": [
    { "id": "a", "name": "Veggie Pizza", "description": "Cheesy",
      "restaurant": "Tony's", "category": "Pizza", "isPopular": true }
  ]
}
"#;
    fs::write(&path, content).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 1);
    let dish = catalog.find("a").unwrap();
    assert!(dish.is_popular);
    assert_eq!(dish.price_cents, 0);
    assert!(catalog.categories().is_empty());
}

#[test]
fn test_load_catalog_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Catalog::load(&temp_dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
}

#[test]
fn test_blank_field_rejected() {
    let content = r#"{ "dishes": [
        { "id": "x", "name": "Soup", "description": "Hot",
          "restaurant": "  ", "category": "healthy" } ] }"#;
    let err = Catalog::from_json(content).unwrap_err();
    match err {
        CatalogError::MissingField { id, field } => {
            assert_eq!(id, "x");
            assert_eq!(field, "restaurant");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_absent_field_is_parse_error() {
    let content = r#"{ "dishes": [ { "id": "x", "name": "Soup" } ] }"#;
    assert!(matches!(
        Catalog::from_json(content),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn test_duplicate_ids_kept() {
    let content = r#"{ "dishes": [
        { "id": "1", "name": "A", "description": "a", "restaurant": "r", "category": "c" },
        { "id": "1", "name": "B", "description": "b", "restaurant": "r", "category": "c" } ] }"#;
    let catalog = Catalog::from_json(content).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.find("1").unwrap().name, "A");
}

#[test]
fn test_format_cents() {
    assert_eq!(format_cents(1299), "$12.99");
    assert_eq!(format_cents(5), "$0.05");
    assert_eq!(format_cents(0), "$0.00");
}
