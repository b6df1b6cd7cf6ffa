//! Rating store — loads the rating dataset once from a data provider and
//! answers read-only lookups over it.

use fashion_core::types::{ProductId, RatingRecord, UserId};
use fashion_core::{RecommendError, RecommendResult};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::path::PathBuf;
use tracing::{debug, info};

/// Supplies the raw rating dataset.
pub trait RatingSource {
    fn fetch(&self) -> RecommendResult<Vec<RatingRecord>>;
}

/// Header columns every rating export must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "User ID",
    "Product ID",
    "Rating",
    "Product Name",
    "Category",
    "Brand",
    "Color",
];

/// Reads ratings from a CSV export with a header row.
#[derive(Debug, Clone)]
pub struct CsvRatingSource {
    path: PathBuf,
}

impl CsvRatingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RatingSource for CsvRatingSource {
    fn fetch(&self) -> RecommendResult<Vec<RatingRecord>> {
        let unavailable =
            |e: csv::Error| RecommendError::DataUnavailable(format!("{}: {}", self.path.display(), e));

        let mut reader = csv::Reader::from_path(&self.path).map_err(unavailable)?;
        let headers = reader.headers().map_err(unavailable)?;
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|h| h.trim() == **column))
        {
            return Err(RecommendError::DataUnavailable(format!(
                "{}: missing required column '{}'",
                self.path.display(),
                missing
            )));
        }

        let mut records = Vec::new();
        for result in reader.deserialize::<RatingRecord>() {
            records.push(result.map_err(unavailable)?);
        }

        debug!(path = %self.path.display(), rows = records.len(), "Read rating CSV");
        Ok(records)
    }
}

impl RatingSource for Vec<RatingRecord> {
    fn fetch(&self) -> RecommendResult<Vec<RatingRecord>> {
        Ok(self.clone())
    }
}

/// Immutable collection of rating records in dataset order.
#[derive(Debug, Clone)]
pub struct RatingStore {
    records: Vec<RatingRecord>,
    by_user: HashMap<UserId, Vec<usize>>,
    users: Vec<UserId>,
    products: Vec<ProductId>,
    product_names: Vec<String>,
    categories: Vec<String>,
}

impl RatingStore {
    /// Load and validate the dataset. Any schema or value problem fails the
    /// whole load with `DataUnavailable`.
    pub fn load<S: RatingSource + ?Sized>(source: &S) -> RecommendResult<Self> {
        let records = source.fetch()?;
        if records.is_empty() {
            return Err(RecommendError::DataUnavailable(
                "dataset contains no ratings".to_string(),
            ));
        }

        for (row, record) in records.iter().enumerate() {
            validate(row, record)?;
        }

        let store = Self::index(records);
        info!(
            records = store.records.len(),
            users = store.users.len(),
            products = store.products.len(),
            "Rating store loaded"
        );
        Ok(store)
    }

    fn index(records: Vec<RatingRecord>) -> Self {
        let mut by_user: HashMap<UserId, Vec<usize>> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            by_user.entry(record.user_id).or_default().push(i);
        }

        let users = first_occurrences(records.iter().map(|r| r.user_id));
        let products = first_occurrences(records.iter().map(|r| r.product_id.clone()));
        let product_names = first_occurrences(records.iter().map(|r| r.product_name.clone()));
        let categories = first_occurrences(records.iter().map(|r| r.category.clone()));

        Self {
            records,
            by_user,
            users,
            products,
            product_names,
            categories,
        }
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn distinct_users(&self) -> &[UserId] {
        &self.users
    }

    pub fn distinct_products(&self) -> &[ProductId] {
        &self.products
    }

    pub fn distinct_product_names(&self) -> &[String] {
        &self.product_names
    }

    pub fn distinct_categories(&self) -> &[String] {
        &self.categories
    }

    /// All records of one user in dataset order. Empty for unknown users.
    pub fn records_for_user(&self, user_id: UserId) -> impl Iterator<Item = &RatingRecord> {
        self.by_user
            .get(&user_id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.records[i])
    }

    /// Records with the given name and category, in dataset order.
    pub fn records_matching<'a>(
        &'a self,
        product_name: &'a str,
        category: &'a str,
    ) -> impl Iterator<Item = &'a RatingRecord> {
        self.records
            .iter()
            .filter(move |r| r.product_name == product_name && r.category == category)
    }
}

fn validate(row: usize, record: &RatingRecord) -> RecommendResult<()> {
    if !record.rating.is_finite() || record.rating < 0.0 {
        return Err(RecommendError::DataUnavailable(format!(
            "row {}: rating {} is not a non-negative number",
            row + 1,
            record.rating
        )));
    }

    let required = [
        ("Product ID", &record.product_id),
        ("Product Name", &record.product_name),
        ("Category", &record.category),
    ];
    for (column, value) in required {
        if value.trim().is_empty() {
            return Err(RecommendError::DataUnavailable(format!(
                "row {}: required field '{}' is empty",
                row + 1,
                column
            )));
        }
    }
    Ok(())
}

fn first_occurrences<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_records() -> Vec<RatingRecord> {
        vec![
            RatingRecord::new(3, "10", 4.0, "Dress", "Women's Fashion"),
            RatingRecord::new(1, "11", 2.5, "Jeans", "Men's Fashion"),
            RatingRecord::new(3, "12", 1.0, "Dress", "Kids' Fashion"),
            RatingRecord::new(2, "10", 5.0, "Dress", "Women's Fashion"),
        ]
    }

    #[test]
    fn test_distinct_lookups_keep_first_occurrence_order() {
        let store = RatingStore::load(&sample_records()).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.distinct_users(), &[3, 1, 2]);
        assert_eq!(store.distinct_products(), &["10", "11", "12"]);
        assert_eq!(store.distinct_product_names(), &["Dress", "Jeans"]);
        assert_eq!(
            store.distinct_categories(),
            &["Women's Fashion", "Men's Fashion", "Kids' Fashion"]
        );
    }

    #[test]
    fn test_records_for_user() {
        let store = RatingStore::load(&sample_records()).unwrap();
        let ids: Vec<_> = store.records_for_user(3).map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["10", "12"]);
        assert_eq!(store.records_for_user(99).count(), 0);
    }

    #[test]
    fn test_empty_dataset_is_unavailable() {
        let result = RatingStore::load(&Vec::<RatingRecord>::new());
        assert!(matches!(result, Err(RecommendError::DataUnavailable(_))));
    }

    #[test]
    fn test_negative_rating_rejected() {
        let records = vec![RatingRecord::new(1, "1", -1.0, "Shoes", "Men's Fashion")];
        assert!(matches!(
            RatingStore::load(&records),
            Err(RecommendError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_blank_category_rejected() {
        let records = vec![RatingRecord::new(1, "1", 3.0, "Shoes", " ")];
        assert!(matches!(
            RatingStore::load(&records),
            Err(RecommendError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_csv_source_loads_and_ignores_extra_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "User ID,Product ID,Product Name,Brand,Category,Price,Rating,Color,Size").unwrap();
        writeln!(file, "19,1,Dress,Adidas,Men's Fashion,40,1.04,Black,XL").unwrap();
        writeln!(file, "97,2,Shoes,H&M,Women's Fashion,82,4.35,Black,L").unwrap();
        writeln!(file, "25,3,Dress,Adidas,Women's Fashion,44,3.34,Yellow,XL").unwrap();

        let store = RatingStore::load(&CsvRatingSource::new(file.path())).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.distinct_users(), &[19, 97, 25]);
        assert_eq!(store.records()[1].brand.as_deref(), Some("H&M"));
    }

    #[test]
    fn test_csv_missing_required_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "User ID,Product ID,Product Name,Brand,Price,Rating,Color").unwrap();
        writeln!(file, "19,1,Dress,Adidas,40,1.04,Black").unwrap();

        let result = RatingStore::load(&CsvRatingSource::new(file.path()));
        assert!(matches!(result, Err(RecommendError::DataUnavailable(_))));
    }

    #[test]
    fn test_csv_without_brand_and_color_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "User ID,Product ID,Product Name,Category,Rating").unwrap();
        writeln!(file, "19,1,Dress,Men's Fashion,4.5").unwrap();

        match RatingStore::load(&CsvRatingSource::new(file.path())) {
            Err(RecommendError::DataUnavailable(msg)) => assert!(msg.contains("'Brand'")),
            other => panic!("expected DataUnavailable, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_csv_without_color_column_names_it() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "User ID,Product ID,Product Name,Brand,Category,Rating").unwrap();
        writeln!(file, "19,1,Dress,Adidas,Men's Fashion,4.5").unwrap();

        match RatingStore::load(&CsvRatingSource::new(file.path())) {
            Err(RecommendError::DataUnavailable(msg)) => assert!(msg.contains("'Color'")),
            other => panic!("expected DataUnavailable, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_csv_blank_brand_cell_still_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "User ID,Product ID,Product Name,Brand,Category,Rating,Color").unwrap();
        writeln!(file, "19,1,Dress,,Men's Fashion,4.5,Black").unwrap();

        let store = RatingStore::load(&CsvRatingSource::new(file.path())).unwrap();
        assert_eq!(store.records()[0].brand, None);
    }

    #[test]
    fn test_csv_malformed_rating() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "User ID,Product ID,Product Name,Brand,Category,Rating,Color").unwrap();
        writeln!(file, "19,1,Dress,Adidas,Men's Fashion,excellent,Black").unwrap();

        let result = RatingStore::load(&CsvRatingSource::new(file.path()));
        assert!(matches!(result, Err(RecommendError::DataUnavailable(_))));
    }

    #[test]
    fn test_csv_missing_file() {
        let result = RatingStore::load(&CsvRatingSource::new("/nonexistent/ratings.csv"));
        assert!(matches!(result, Err(RecommendError::DataUnavailable(_))));
    }
}
