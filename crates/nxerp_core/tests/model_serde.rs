use chrono::NaiveDate;
use nxerp_core::{Category, Customer, Page, PageQuery, Supplier};
use rust_decimal::Decimal;
use serde_json::{json, Value};

#[test]
fn classifier_is_serialized_as_type() {
    let mut customer = Customer::new("CUS-1", "Acme");
    customer.kind = "Corporate".to_string();
    customer.opening_date = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
    customer.opening_balance = Decimal::new(98_050, 2);

    let value = serde_json::to_value(&customer).unwrap();
    assert_eq!(value["type"], json!("Corporate"));
    assert!(value.get("kind").is_none());
    assert_eq!(value["opening_date"], json!("2026-02-19"));
    assert_eq!(value["opening_balance"], json!("980.50"));

    let supplier = serde_json::to_value(Supplier::new("SUP-1", "Medi")).unwrap();
    assert_eq!(supplier["type"], json!("Distributor"));

    let category = serde_json::to_value(Category::new("CAT-1", "Syrup")).unwrap();
    assert_eq!(category["type"], json!("Medicine"));
    assert_eq!(category["parent_category"], json!(""));
}

#[test]
fn records_deserialize_from_the_wire_shape() {
    let customer: Customer = serde_json::from_value(json!({
        "code": "CUS-01002",
        "name": "City Clinic",
        "type": "Corporate",
        "contact": "0300-1234567",
        "opening_date": "2026-02-19",
        "opening_balance": "2150",
        "is_active": true,
        "updated_at": "2026-02-19T10:00:00Z"
    }))
    .unwrap();

    assert_eq!(customer.kind, "Corporate");
    assert_eq!(customer.opening_balance, Decimal::new(2150, 0));
}

#[test]
fn page_envelope_serializes_items_and_counts() {
    let page = Page {
        items: vec![Category::new("CAT-1", "Syrup")],
        total_count: 31,
        page_number: 2,
        page_size: 10,
    };
    let value: Value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["total_count"], json!(31));
    assert_eq!(value["items"].as_array().unwrap().len(), 1);
    assert_eq!(page.total_pages(), 4);

    let query: PageQuery = serde_json::from_value(json!({
        "search": "acme",
        "page_number": 1,
        "page_size": 25
    }))
    .unwrap();
    assert_eq!(query.search_term(), Some("acme"));
}
