use core::str::FromStr;

use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, Entity, ValueObject};

/// Longest product name accepted, in characters.
pub const NAME_MAX_LEN: usize = 255;

/// Product identifier, assigned by the store at creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a store-assigned identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))?;
        if raw <= 0 {
            return Err(DomainError::invalid_id("ProductId: must be positive"));
        }
        Ok(Self(raw))
    }
}

/// Non-negative, finite price.
///
/// Deserialization goes through [`Price::new`], so a `Price` can never hold a
/// negative or non-finite amount.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        // Collapse -0.0 so it never displays as "-0.00".
        Ok(Self(if amount == 0.0 { 0.0 } else { amount }))
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl ValueObject for Price {}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Always exactly two fraction digits, whatever precision is stored.
impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Validated mutable fields of a product (the body of a create or update).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    price: Price,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64) -> DomainResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            price: Price::new(price)?,
        })
    }

    /// Build a draft from possibly-missing inputs, as received over the wire.
    pub fn from_parts(name: Option<String>, price: Option<f64>) -> DomainResult<Self> {
        let name = name.ok_or_else(|| DomainError::validation("name is required"))?;
        let price = price.ok_or_else(|| DomainError::validation("price is required"))?;
        Self::new(name, price)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

impl ValueObject for ProductDraft {}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(DomainError::validation(format!(
            "name cannot exceed {NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
}

impl Product {
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Replace name and price wholesale; the id never changes.
    pub fn replace(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
    }

    /// The current mutable fields, e.g. to prefill an edit form.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: self.price,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new(ProductId::new(1), ProductDraft::new("Widget", 9.5).unwrap())
    }

    #[test]
    fn draft_rejects_blank_name() {
        let err = ProductDraft::new("   ", 1.0).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for blank name"),
        }
    }

    #[test]
    fn draft_rejects_overlong_name() {
        let name = "x".repeat(NAME_MAX_LEN + 1);
        assert!(ProductDraft::new(name, 1.0).is_err());
        assert!(ProductDraft::new("x".repeat(NAME_MAX_LEN), 1.0).is_ok());
    }

    #[test]
    fn draft_keeps_name_untrimmed() {
        let draft = ProductDraft::new("  Widget ", 1.0).unwrap();
        assert_eq!(draft.name(), "  Widget ");
    }

    #[test]
    fn draft_requires_both_parts() {
        assert!(ProductDraft::from_parts(None, Some(1.0)).is_err());
        assert!(ProductDraft::from_parts(Some("Widget".into()), None).is_err());
        assert!(ProductDraft::from_parts(Some("Widget".into()), Some(1.0)).is_ok());
    }

    #[test]
    fn price_rejects_negative_and_non_finite() {
        assert!(Price::new(-0.01).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
        assert!(Price::new(0.0).is_ok());
    }

    #[test]
    fn price_displays_two_fraction_digits() {
        assert_eq!(Price::new(9.5).unwrap().to_string(), "9.50");
        assert_eq!(Price::new(3.0).unwrap().to_string(), "3.00");
        assert_eq!(Price::new(1.239).unwrap().to_string(), "1.24");
        assert_eq!(Price::new(-0.0).unwrap().to_string(), "0.00");
    }

    #[test]
    fn product_id_parses_positive_integers_only() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert!("0".parse::<ProductId>().is_err());
        assert!("-3".parse::<ProductId>().is_err());
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn replace_keeps_id() {
        let mut product = widget();
        product.replace(ProductDraft::new("Gadget", 12.0).unwrap());
        assert_eq!(product.id(), ProductId::new(1));
        assert_eq!(product.name(), "Gadget");
        assert_eq!(product.price().amount(), 12.0);
    }

    #[test]
    fn replace_with_own_values_is_a_no_op() {
        let mut product = widget();
        let before = product.clone();
        product.replace(product.to_draft());
        assert_eq!(product, before);
    }

    #[test]
    fn json_shape_is_flat() {
        let json = serde_json::to_value(widget()).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 1, "name": "Widget", "price": 9.5 }));
    }

    #[test]
    fn deserializing_negative_price_fails() {
        let res: Result<Product, _> =
            serde_json::from_value(serde_json::json!({ "id": 1, "name": "x", "price": -1.0 }));
        assert!(res.is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every valid input survives validation unchanged.
            #[test]
            fn valid_drafts_preserve_inputs(
                name in "[A-Za-z][A-Za-z0-9 ]{0,99}",
                price in 0.0f64..1_000_000.0
            ) {
                let draft = ProductDraft::new(name.clone(), price).unwrap();
                prop_assert_eq!(draft.name(), name.as_str());
                prop_assert_eq!(draft.price().amount(), price);
            }

            /// Property: negative prices are always rejected.
            #[test]
            fn negative_prices_rejected(price in -1_000_000.0f64..-0.0001) {
                prop_assert!(Price::new(price).is_err());
            }

            /// Property: display always has exactly two fraction digits.
            #[test]
            fn display_has_two_fraction_digits(price in 0.0f64..1_000_000.0) {
                let shown = Price::new(price).unwrap().to_string();
                let (_, frac) = shown.split_once('.').unwrap();
                prop_assert_eq!(frac.len(), 2);
            }
        }
    }
}
