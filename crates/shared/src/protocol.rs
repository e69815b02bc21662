use serde::{Deserialize, Serialize};

use crate::{
    domain::{Category, Order, Product, User},
    error::FetchError,
};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Path of a category's collection, relative to the API gateway.
pub fn endpoint_path(category: Category) -> &'static str {
    match category {
        Category::Products => "be-ecom-products/api/products",
        Category::Orders => "be-ecom-orders/api/orders",
        Category::Users => "be-ecom-users/api/users",
    }
}

/// Joins a gateway base URL and a category path with exactly one slash.
pub fn endpoint_url(base_url: &str, category: Category) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint_path(category)
    )
}

/// A fetched collection, tagged with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "records", rename_all = "snake_case")]
pub enum Records {
    Products(Vec<Product>),
    Orders(Vec<Order>),
    Users(Vec<User>),
}

impl Records {
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Products => Records::Products(Vec::new()),
            Category::Orders => Records::Orders(Vec::new()),
            Category::Users => Records::Users(Vec::new()),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Records::Products(_) => Category::Products,
            Records::Orders(_) => Category::Orders,
            Records::Users(_) => Category::Users,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Records::Products(rows) => rows.len(),
            Records::Orders(rows) => rows.len(),
            Records::Users(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializes just the record array, in the shape the upstream sent it.
    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Records::Products(rows) => serde_json::to_value(rows),
            Records::Orders(rows) => serde_json::to_value(rows),
            Records::Users(rows) => serde_json::to_value(rows),
        }
    }
}

/// Decodes a response body as the record array for `category`.
pub fn decode_records(category: Category, body: &[u8]) -> Result<Records, FetchError> {
    let decoded = match category {
        Category::Products => serde_json::from_slice(body).map(Records::Products),
        Category::Orders => serde_json::from_slice(body).map(Records::Orders),
        Category::Users => serde_json::from_slice(body).map(Records::Users),
    };
    decoded.map_err(|err| FetchError::Decode(err.to_string()))
}
