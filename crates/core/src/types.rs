use serde::{Deserialize, Serialize};

pub type UserId = u32;
pub type ProductId = String;

/// One row of the rating dataset. Column names follow the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(rename = "User ID")]
    pub user_id: UserId,
    #[serde(rename = "Product ID")]
    pub product_id: ProductId,
    #[serde(rename = "Rating")]
    pub rating: f64,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    /// Auxiliary; a record without it still takes part in scoring.
    #[serde(rename = "Brand", default)]
    pub brand: Option<String>,
    #[serde(rename = "Color", default)]
    pub color: Option<String>,
}

impl RatingRecord {
    pub fn new(
        user_id: UserId,
        product_id: impl Into<ProductId>,
        rating: f64,
        product_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            product_id: product_id.into(),
            rating,
            product_name: product_name.into(),
            category: category.into(),
            brand: None,
            color: None,
        }
    }

    pub fn with_attributes(mut self, brand: impl Into<String>, color: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self.color = Some(color.into());
        self
    }

    /// Presentation row for the recommended-products table. `None` when an
    /// auxiliary field is missing or blank.
    pub fn summary(&self) -> Option<ProductSummary> {
        Some(ProductSummary {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            category: self.category.clone(),
            brand: non_blank(&self.brand)?,
            color: non_blank(&self.color)?,
        })
    }

    pub fn history_entry(&self) -> Option<HistoryEntry> {
        Some(HistoryEntry {
            product_name: self.product_name.clone(),
            category: self.category.clone(),
            brand: non_blank(&self.brand)?,
            color: non_blank(&self.color)?,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub user_id: UserId,
    pub product_name: String,
    pub category: String,
}

impl RecommendationQuery {
    pub fn new(user_id: UserId, product_name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            user_id,
            product_name: product_name.into(),
            category: category.into(),
        }
    }
}
