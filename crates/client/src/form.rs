//! Create/edit form: state machine plus field contents.

use catalog_products::{Product, ProductId};

use crate::api::{ClientError, ProductInput};

/// Which product, if any, the form is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// Creating a new product.
    #[default]
    Idle,
    /// Editing an existing product.
    Editing { id: ProductId },
}

/// Text and visibility that depend only on the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLabels {
    pub title: &'static str,
    pub submit: &'static str,
    pub cancel_visible: bool,
}

impl FormState {
    pub fn editing_id(&self) -> Option<ProductId> {
        match self {
            FormState::Idle => None,
            FormState::Editing { id } => Some(*id),
        }
    }

    pub fn labels(&self) -> FormLabels {
        match self {
            FormState::Idle => FormLabels {
                title: "Add New Product",
                submit: "Add Product",
                cancel_visible: false,
            },
            FormState::Editing { .. } => FormLabels {
                title: "Edit Product",
                submit: "Update Product",
                cancel_visible: true,
            },
        }
    }

    /// Verb used in failure notifications ("Failed to add product").
    pub fn verb(&self) -> &'static str {
        match self {
            FormState::Idle => "add",
            FormState::Editing { .. } => "update",
        }
    }
}

/// Raw text of the two inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    pub name: String,
    pub price: String,
}

impl FormFields {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name().to_string(),
            price: product.price().amount().to_string(),
        }
    }

    /// Build the request body. Only the price needs parsing here.
    pub fn to_input(&self) -> Result<ProductInput, ClientError> {
        let raw = self.price.trim();
        let price = raw
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ClientError::InvalidInput(format!("price {raw:?} is not a number")))?;

        Ok(ProductInput {
            name: self.name.clone(),
            price,
        })
    }
}

/// The form as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Form {
    state: FormState,
    fields: FormFields,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// `* -> Editing(id)`, prefilled with the product's current values.
    pub fn begin_edit(&mut self, product: &Product) {
        self.state = FormState::Editing {
            id: product.id_typed(),
        };
        self.fields = FormFields::from_product(product);
    }

    /// `* -> Idle` with cleared fields (cancel, or a successful submit).
    pub fn reset(&mut self) {
        self.state = FormState::Idle;
        self.fields = FormFields::default();
    }

    /// React to a successful delete. Resets only if `id` is the product being
    /// edited; returns whether it did.
    pub fn product_deleted(&mut self, id: ProductId) -> bool {
        if self.state.editing_id() == Some(id) {
            self.reset();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_products::ProductDraft;

    use super::*;

    fn product(id: i64, name: &str, price: f64) -> Product {
        Product::new(ProductId::new(id), ProductDraft::new(name, price).unwrap())
    }

    #[test]
    fn starts_idle_with_add_wording() {
        let form = Form::new();
        assert_eq!(form.state(), FormState::Idle);
        let labels = form.state().labels();
        assert_eq!(labels.title, "Add New Product");
        assert_eq!(labels.submit, "Add Product");
        assert!(!labels.cancel_visible);
    }

    #[test]
    fn begin_edit_prefills_and_switches_wording() {
        let mut form = Form::new();
        form.begin_edit(&product(3, "Widget", 9.5));

        assert_eq!(form.state(), FormState::Editing { id: ProductId::new(3) });
        assert_eq!(form.fields().name, "Widget");
        assert_eq!(form.fields().price, "9.5");
        let labels = form.state().labels();
        assert_eq!(labels.submit, "Update Product");
        assert_eq!(labels.title, "Edit Product");
        assert!(labels.cancel_visible);
    }

    #[test]
    fn deleting_the_edited_product_resets() {
        let mut form = Form::new();
        form.begin_edit(&product(3, "Widget", 9.5));

        assert!(form.product_deleted(ProductId::new(3)));
        assert_eq!(form, Form::new());
    }

    #[test]
    fn deleting_another_product_keeps_editing() {
        let mut form = Form::new();
        form.begin_edit(&product(3, "Widget", 9.5));

        assert!(!form.product_deleted(ProductId::new(7)));
        assert_eq!(form.state(), FormState::Editing { id: ProductId::new(3) });
        assert_eq!(form.fields().name, "Widget");
    }

    #[test]
    fn to_input_parses_price() {
        let fields = FormFields {
            name: "Widget".into(),
            price: " 9.5 ".into(),
        };
        let input = fields.to_input().unwrap();
        assert_eq!(input.name, "Widget");
        assert_eq!(input.price, 9.5);
    }

    #[test]
    fn to_input_rejects_non_numbers() {
        for raw in ["", "abc", "NaN", "inf"] {
            let fields = FormFields {
                name: "Widget".into(),
                price: raw.into(),
            };
            assert!(
                matches!(fields.to_input(), Err(ClientError::InvalidInput(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn verbs_follow_state() {
        assert_eq!(FormState::Idle.verb(), "add");
        assert_eq!(FormState::Editing { id: ProductId::new(1) }.verb(), "update");
    }
}
