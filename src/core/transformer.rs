use crate::domain::model::{PriceRange, Product, TransformRules};
use bigdecimal::{BigDecimal, RoundingMode};

/// Fractional digits every output price carries.
pub const PRICE_SCALE: i64 = 2;

/// Applies the pricing rules to a parsed product, in this order:
///
/// 1. upper-case the name
/// 2. discount the configured category, then round to two decimals
///    (halves away from zero)
/// 3. move discounted products above the threshold into the premium category
/// 4. bucket the final price into a [`PriceRange`]
#[derive(Debug, Clone, Default)]
pub struct ProductTransformer {
    rules: TransformRules,
}

impl ProductTransformer {
    pub fn new(rules: TransformRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TransformRules {
        &self.rules
    }

    /// Returns the transformed copy, or `None` when the product is invalid.
    /// The input is left untouched.
    pub fn transform(&self, product: &Product) -> Option<Product> {
        if !product.is_valid() {
            tracing::debug!("Rejecting invalid product '{}'", product.id);
            return None;
        }

        let mut transformed = product.clone();
        transformed.price_range = None;

        transformed.name = product.name.to_uppercase();

        let final_price = self.discounted_price(product);

        if self.should_recategorize(&product.category, &final_price) {
            transformed.category = self.rules.premium_category.clone();
        }

        transformed.price_range = Some(PriceRange::classify(&final_price));
        transformed.price = final_price;
        Some(transformed)
    }

    fn discounted_price(&self, product: &Product) -> BigDecimal {
        if product.category == self.rules.discount_category {
            round_price(&(&product.price * &self.rules.discount_rate))
        } else {
            round_price(&product.price)
        }
    }

    fn should_recategorize(&self, category: &str, final_price: &BigDecimal) -> bool {
        category == self.rules.discount_category && *final_price > self.rules.premium_threshold
    }
}

/// Rounds to [`PRICE_SCALE`] digits, halves away from zero, and pins the
/// scale so whole numbers render as `50.00`. A negative price that rounds
/// to zero comes out as plain `0.00`.
pub fn round_price(price: &BigDecimal) -> BigDecimal {
    price.with_scale_round(PRICE_SCALE, RoundingMode::HalfUp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn product(price: &str, category: &str) -> Product {
        Product::new("P1", "widget", dec(price), category)
    }

    fn price_text(product: &Product) -> String {
        product.price.to_plain_string()
    }

    #[test]
    fn test_electronics_over_threshold_becomes_premium() {
        let transformer = ProductTransformer::default();
        let result = transformer
            .transform(&product("1000.00", "Electronics"))
            .unwrap();

        assert_eq!(result.name, "WIDGET");
        assert_eq!(price_text(&result), "900.00");
        assert_eq!(result.category, "Premium Electronics");
        assert_eq!(result.price_range, Some(PriceRange::Premium));
    }

    #[test]
    fn test_non_electronics_price_unchanged() {
        let transformer = ProductTransformer::default();
        let result = transformer.transform(&product("50", "Toys")).unwrap();

        assert_eq!(result.name, "WIDGET");
        assert_eq!(price_text(&result), "50.00");
        assert_eq!(result.category, "Toys");
        assert_eq!(result.price_range, Some(PriceRange::Medium));
    }

    #[test]
    fn test_discount_landing_on_threshold_stays_electronics() {
        let transformer = ProductTransformer::default();
        let result = transformer
            .transform(&product("555.56", "Electronics"))
            .unwrap();

        assert_eq!(price_text(&result), "500.00");
        assert_eq!(result.category, "Electronics");
        assert_eq!(result.price_range, Some(PriceRange::High));
    }

    #[test]
    fn test_non_electronics_never_recategorized() {
        let transformer = ProductTransformer::default();
        let result = transformer.transform(&product("9999.99", "Toys")).unwrap();

        assert_eq!(result.category, "Toys");
        assert_eq!(result.price_range, Some(PriceRange::Premium));
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let transformer = ProductTransformer::default();
        let result = transformer
            .transform(&product("1000.00", "electronics"))
            .unwrap();

        assert_eq!(price_text(&result), "1000.00");
        assert_eq!(result.category, "electronics");
    }

    #[test]
    fn test_rounding_is_half_up() {
        let transformer = ProductTransformer::default();

        let result = transformer.transform(&product("0.125", "Toys")).unwrap();
        assert_eq!(price_text(&result), "0.13");

        let result = transformer.transform(&product("0.124", "Toys")).unwrap();
        assert_eq!(price_text(&result), "0.12");

        let result = transformer.transform(&product("-0.125", "Toys")).unwrap();
        assert_eq!(price_text(&result), "-0.13");

        // 11.15 * 0.90 = 10.035
        let result = transformer
            .transform(&product("11.15", "Electronics"))
            .unwrap();
        assert_eq!(price_text(&result), "10.04");
        assert_eq!(result.price_range, Some(PriceRange::Medium));
    }

    #[test]
    fn test_electronics_discount_matches_formula() {
        let transformer = ProductTransformer::default();
        for cents in (0..200_000i64).step_by(997) {
            let input = BigDecimal::new(cents.into(), 2);
            let result = transformer
                .transform(&Product::new("P", "n", input, "Electronics"))
                .unwrap();

            // cents * 0.9, rounded half up to whole cents
            let expected_cents = (cents * 9 + 5) / 10;
            let expected = BigDecimal::new(expected_cents.into(), 2);
            assert_eq!(result.price, expected);

            let expected_category = if expected_cents > 50_000 {
                "Premium Electronics"
            } else {
                "Electronics"
            };
            assert_eq!(result.category, expected_category);
        }
    }

    #[test]
    fn test_price_boundaries() {
        let transformer = ProductTransformer::default();
        let range = |price: &str| {
            transformer
                .transform(&product(price, "Toys"))
                .unwrap()
                .price_range
                .unwrap()
        };

        assert_eq!(range("10.00"), PriceRange::Low);
        assert_eq!(range("10.01"), PriceRange::Medium);
        assert_eq!(range("100.00"), PriceRange::Medium);
        assert_eq!(range("500.00"), PriceRange::High);
        assert_eq!(range("500.01"), PriceRange::Premium);
        assert_eq!(range("-3.00"), PriceRange::Premium);
    }

    #[test]
    fn test_negative_zero_rounds_to_zero() {
        let transformer = ProductTransformer::default();
        let result = transformer.transform(&product("-0.001", "Toys")).unwrap();

        assert_eq!(price_text(&result), "0.00");
        assert_eq!(result.price_range, Some(PriceRange::Low));
    }

    #[test]
    fn test_prices_beyond_machine_precision() {
        let transformer = ProductTransformer::default();

        let result = transformer
            .transform(&product("0.12345678901234567890123456789", "Toys"))
            .unwrap();
        assert_eq!(price_text(&result), "0.12");
        assert_eq!(result.price_range, Some(PriceRange::Low));

        let result = transformer
            .transform(&product("10.004999999999999999999999999999", "Toys"))
            .unwrap();
        assert_eq!(price_text(&result), "10.00");
        assert_eq!(result.price_range, Some(PriceRange::Low));

        let result = transformer.transform(&product("1E-30", "Toys")).unwrap();
        assert_eq!(price_text(&result), "0.00");
        assert_eq!(result.price_range, Some(PriceRange::Low));

        let result = transformer
            .transform(&product("1234567890123456789012345678", "Toys"))
            .unwrap();
        assert_eq!(price_text(&result), "1234567890123456789012345678.00");
        assert_eq!(result.price_range, Some(PriceRange::Premium));

        let result = transformer.transform(&product("1E+30", "Toys")).unwrap();
        assert_eq!(
            price_text(&result),
            format!("1{}.00", "0".repeat(30))
        );
        assert_eq!(result.price_range, Some(PriceRange::Premium));
    }

    #[test]
    fn test_large_electronics_price_is_discounted() {
        let transformer = ProductTransformer::default();
        let result = transformer
            .transform(&product("1234567890123456789012345678", "Electronics"))
            .unwrap();

        assert_eq!(price_text(&result), "1111111101111111110111111110.20");
        assert_eq!(result.category, "Premium Electronics");
        assert_eq!(result.price_range, Some(PriceRange::Premium));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let transformer = ProductTransformer::default();
        let original = product("1000.00", "Electronics");
        let snapshot = original.clone();

        let _ = transformer.transform(&original);
        assert_eq!(original, snapshot);
        assert_eq!(original.price.to_plain_string(), "1000.00");
    }

    #[test]
    fn test_invalid_product_rejected() {
        let transformer = ProductTransformer::default();
        assert!(transformer
            .transform(&Product::new("P1", "  ", dec("1.00"), "Toys"))
            .is_none());
        assert!(transformer
            .transform(&Product::new("", "widget", dec("1.00"), "Toys"))
            .is_none());
    }

    #[test]
    fn test_custom_rules() {
        let transformer = ProductTransformer::new(TransformRules {
            discount_category: "Books".to_string(),
            premium_category: "Collector Books".to_string(),
            discount_rate: dec("0.50"),
            premium_threshold: dec("20.00"),
        });

        let result = transformer.transform(&product("100.00", "Books")).unwrap();
        assert_eq!(price_text(&result), "50.00");
        assert_eq!(result.category, "Collector Books");

        let result = transformer
            .transform(&product("100.00", "Electronics"))
            .unwrap();
        assert_eq!(price_text(&result), "100.00");
        assert_eq!(result.category, "Electronics");
    }
}
