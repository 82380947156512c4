//! Leptos application: create/edit form plus product list.

use std::rc::Rc;

use leptos::*;

use crate::api::HttpCatalogApi;
use crate::controller::{CardAction, CatalogController, UserPrompt};
use crate::render::{format_price, ListView};

/// `confirm` / `alert` on the browser window.
struct BrowserPrompt;

impl UserPrompt for BrowserPrompt {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn notify(&self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }
}

type Controller = Rc<CatalogController<HttpCatalogApi, BrowserPrompt>>;

fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let ctl: Controller = Rc::new(CatalogController::new(
        HttpCatalogApi::new(origin()),
        BrowserPrompt,
    ));
    // Bumped after every controller change; views re-read the controller.
    let revision = create_rw_signal(0u64);
    let bump = move || revision.update(|r| *r += 1);

    {
        let ctl = ctl.clone();
        spawn_local(async move {
            ctl.refresh().await;
            bump();
        });
    }

    let on_submit = {
        let ctl = ctl.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let ctl = ctl.clone();
            spawn_local(async move {
                let _ = ctl.submit().await;
                bump();
            });
        }
    };

    let on_cancel = {
        let ctl = ctl.clone();
        move |_| {
            ctl.cancel();
            bump();
        }
    };

    let labels = {
        let ctl = ctl.clone();
        move || {
            revision.get();
            ctl.state().labels()
        }
    };
    let title = {
        let labels = labels.clone();
        move || labels().title
    };
    let submit_label = {
        let labels = labels.clone();
        move || labels().submit
    };
    let cancel_style = move || {
        if labels().cancel_visible {
            "display: block"
        } else {
            "display: none"
        }
    };

    let name_value = {
        let ctl = ctl.clone();
        move || {
            revision.get();
            ctl.form().fields().name.clone()
        }
    };
    let price_value = {
        let ctl = ctl.clone();
        move || {
            revision.get();
            ctl.form().fields().price.clone()
        }
    };
    let on_name = {
        let ctl = ctl.clone();
        move |ev: ev::Event| ctl.set_name(event_target_value(&ev))
    };
    let on_price = {
        let ctl = ctl.clone();
        move |ev: ev::Event| ctl.set_price(event_target_value(&ev))
    };

    let list = move || {
        revision.get();
        match ctl.list() {
            ListView::Products(products) => products
                .into_iter()
                .map(|product| {
                    let id = product.id_typed();
                    let on_edit = {
                        let ctl = ctl.clone();
                        move |_| {
                            let ctl = ctl.clone();
                            spawn_local(async move {
                                ctl.dispatch(CardAction::Edit(id)).await;
                                bump();
                            });
                        }
                    };
                    let on_delete = {
                        let ctl = ctl.clone();
                        move |_| {
                            let ctl = ctl.clone();
                            spawn_local(async move {
                                ctl.dispatch(CardAction::Delete(id)).await;
                                bump();
                            });
                        }
                    };
                    view! {
                        <div class="product-card">
                            <div class="product-info">
                                <h3>{product.name().to_string()}</h3>
                                <div class="price">{format_price(product.price())}</div>
                            </div>
                            <div class="card-actions">
                                <button type="button" class="edit-btn" on:click=on_edit>"Edit"</button>
                                <button type="button" class="delete-btn" on:click=on_delete>"Delete"</button>
                            </div>
                        </div>
                    }
                })
                .collect_view(),
            other => {
                let text = other.placeholder().unwrap_or_default();
                view! {
                    <div class="empty-state">
                        <p>{text}</p>
                    </div>
                }
                .into_view()
            }
        }
    };

    view! {
        <section class="form-section">
            <h2>{title}</h2>
            <form id="productForm" on:submit=on_submit>
                <input
                    type="text"
                    id="name"
                    name="name"
                    placeholder="Product name"
                    required
                    prop:value=name_value
                    on:input=on_name
                />
                <input
                    type="number"
                    id="price"
                    name="price"
                    placeholder="Price"
                    step="0.01"
                    min="0"
                    required
                    prop:value=price_value
                    on:input=on_price
                />
                <button type="submit" id="submitBtn">{submit_label}</button>
                <button type="button" id="cancelBtn" class="cancel-btn" style=cancel_style on:click=on_cancel>
                    "Cancel"
                </button>
            </form>
        </section>
        <section class="list-section">
            <h2>"Products"</h2>
            <div id="productList">{list}</div>
        </section>
    }
}
