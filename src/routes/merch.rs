use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MerchItem {
    pub id: u32,
    pub name: &'static str,
    pub price: f64,
}

const CATALOG: &[MerchItem] = &[
    MerchItem {
        id: 1,
        name: "Canada Day T-Shirt",
        price: 25.00,
    },
    MerchItem {
        id: 2,
        name: "Canadian Flag Hat",
        price: 15.00,
    },
];

/// Static merchandise list shown next to the itinerary
pub async fn list() -> Json<Vec<MerchItem>> {
    Json(CATALOG.to_vec())
}
