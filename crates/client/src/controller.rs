//! Client controller: fetch, render, submit and delete.
//!
//! State lives in `RefCell`s that are never borrowed across an `.await`, so the
//! controller can be shared (`Rc`) between event handlers on a single-threaded
//! event loop while requests are in flight.

use std::cell::RefCell;

use catalog_products::{Product, ProductId};

use crate::api::{CatalogApi, ClientError};
use crate::form::{Form, FormFields, FormState};
use crate::render::{self, ListView, Markup};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";

/// Blocking user interaction (the browser's `confirm` and `alert`).
pub trait UserPrompt {
    fn confirm(&self, message: &str) -> bool;
    fn notify(&self, message: &str);
}

/// An action triggered from a rendered product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit(ProductId),
    Delete(ProductId),
}

impl<T> UserPrompt for &T
where
    T: UserPrompt + ?Sized,
{
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

pub struct CatalogController<A, P> {
    api: A,
    prompt: P,
    form: RefCell<Form>,
    list: RefCell<ListView>,
}

impl<A, P> CatalogController<A, P>
where
    A: CatalogApi,
    P: UserPrompt,
{
    pub fn new(api: A, prompt: P) -> Self {
        Self {
            api,
            prompt,
            form: RefCell::new(Form::new()),
            list: RefCell::new(ListView::Loading),
        }
    }

    pub fn state(&self) -> FormState {
        self.form.borrow().state()
    }

    pub fn form(&self) -> Form {
        self.form.borrow().clone()
    }

    pub fn list(&self) -> ListView {
        self.list.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.form.borrow_mut().fields_mut().name = name.into();
    }

    pub fn set_price(&self, price: impl Into<String>) {
        self.form.borrow_mut().fields_mut().price = price.into();
    }

    pub fn set_fields(&self, fields: FormFields) {
        *self.form.borrow_mut().fields_mut() = fields;
    }

    pub fn render_list(&self) -> Markup {
        render::render_list(&self.list.borrow())
    }

    pub fn render_form(&self) -> Markup {
        render::render_form(&self.form.borrow())
    }

    /// Fetch the whole collection and replace the list view.
    pub async fn refresh(&self) {
        let view = match self.api.list().await {
            Ok(products) => ListView::from_products(products),
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch products");
                ListView::LoadFailed
            }
        };
        *self.list.borrow_mut() = view;
    }

    pub async fn dispatch(&self, action: CardAction) {
        match action {
            CardAction::Edit(id) => {
                self.edit(id);
            }
            CardAction::Delete(id) => {
                // Failures are already reported to the user.
                let _ = self.delete(id).await;
            }
        }
    }

    /// Enter `Editing(id)` with the product's values from the current list.
    ///
    /// Returns false when `id` is not among the rendered products.
    pub fn edit(&self, id: ProductId) -> bool {
        let product = self.list.borrow().find(id).cloned();
        match product {
            Some(product) => {
                self.form.borrow_mut().begin_edit(&product);
                true
            }
            None => {
                tracing::warn!(%id, "edit requested for a product that is not listed");
                false
            }
        }
    }

    pub fn cancel(&self) {
        self.form.borrow_mut().reset();
    }

    /// Create or update, depending on the form state.
    ///
    /// On success the form returns to `Idle` and the list is re-fetched. On
    /// failure the user is notified and the form is left exactly as it was.
    pub async fn submit(&self) -> Result<Product, ClientError> {
        let (state, fields) = {
            let form = self.form.borrow();
            (form.state(), form.fields().clone())
        };

        let result = match fields.to_input() {
            Ok(input) => match state {
                FormState::Idle => self.api.create(&input).await,
                FormState::Editing { id } => self.api.update(id, &input).await,
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(product) => {
                tracing::info!(id = %product.id_typed(), action = state.verb(), "product saved");
                self.form.borrow_mut().reset();
                self.refresh().await;
                Ok(product)
            }
            Err(e) => {
                tracing::error!(error = %e, action = state.verb(), "product submit failed");
                self.prompt
                    .notify(&format!("Failed to {} product", state.verb()));
                Err(e)
            }
        }
    }

    /// Delete after confirmation.
    ///
    /// Returns `Ok(false)` when the user declines (no request is sent).
    pub async fn delete(&self, id: ProductId) -> Result<bool, ClientError> {
        if !self.prompt.confirm(DELETE_CONFIRMATION) {
            return Ok(false);
        }

        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "product deleted");
                self.form.borrow_mut().product_deleted(id);
                self.refresh().await;
                Ok(true)
            }
            Err(e) => {
                tracing::error!(error = %e, %id, "product delete failed");
                self.prompt.notify("Failed to delete product");
                Err(e)
            }
        }
    }
}
