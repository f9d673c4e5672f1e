//! Product conversion.

use velvet_outlet_core::ProductId;

use crate::gateway::RawRecord;
use crate::schema::{self, product};
use crate::types::Product;

use super::coerce;

/// Convert a raw `product_c` record into a [`Product`].
#[must_use]
pub fn product_from_record(record: &RawRecord) -> Product {
    Product {
        id: ProductId::new(coerce::record_ref(record.get(schema::ID)).unwrap_or_default()),
        name: coerce::string_or_empty(record.get(product::NAME)),
        category: coerce::string_or_empty(record.get(product::CATEGORY)),
        subcategory: coerce::string_or_empty(record.get(product::SUBCATEGORY)),
        price: coerce::decimal_or_zero(record.get(product::PRICE)),
        images: coerce::json_list_or_empty(record.get(product::IMAGES)),
        sizes: coerce::json_list_or_empty(record.get(product::SIZES)),
        colors: coerce::json_list_or_empty(record.get(product::COLORS)),
        description: coerce::string_or_empty(record.get(product::DESCRIPTION)),
        in_stock: coerce::bool_or_false(record.get(product::IN_STOCK)),
        stock_count: coerce::uint_or_zero(record.get(product::STOCK_COUNT)),
        featured: coerce::bool_or_false(record.get(product::FEATURED)),
        trending: coerce::bool_or_false(record.get(product::TRENDING)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => RawRecord::from(map),
            _ => RawRecord::new(),
        }
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let product = product_from_record(&record(json!({
            "Id": 7,
            "name_c": "Shirt",
            "price_c": "19.99",
            "images_c": "[\"a.png\"]",
            "in_stock_c": true,
            "stock_count_c": "abc",
        })));

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.name, "Shirt");
        assert_eq!(product.price, "19.99".parse().unwrap());
        assert_eq!(product.images, vec!["a.png"]);
        assert!(product.in_stock);
        assert_eq!(product.stock_count, 0);
        // Unprojected fields default rather than fail
        assert_eq!(product.category, "");
        assert_eq!(product.subcategory, "");
        assert!(product.sizes.is_empty());
        assert!(product.colors.is_empty());
        assert!(!product.featured);
        assert!(!product.trending);
    }

    #[test]
    fn test_malformed_embedded_json_degrades_to_empty() {
        let product = product_from_record(&record(json!({
            "Id": 1,
            "images_c": "[not json",
            "sizes_c": "{\"oops\":true}",
            "colors_c": 12,
        })));
        assert!(product.images.is_empty());
        assert!(product.sizes.is_empty());
        assert!(product.colors.is_empty());
    }

    #[test]
    fn test_full_record() {
        let product = product_from_record(&record(json!({
            "Id": 2,
            "name_c": "Silk Dress",
            "category_c": "women",
            "subcategory_c": "dresses",
            "price_c": "129.00",
            "images_c": "[\"front.jpg\",\"back.jpg\"]",
            "sizes_c": "[\"S\",\"M\",\"L\"]",
            "colors_c": "[\"Ivory\"]",
            "description_c": "Bias-cut silk.",
            "in_stock_c": true,
            "stock_count_c": "14",
            "featured_c": true,
            "trending_c": false,
        })));
        assert_eq!(product.sizes, vec!["S", "M", "L"]);
        assert_eq!(product.stock_count, 14);
        assert!(product.featured);
        assert!(!product.trending);
    }
}
