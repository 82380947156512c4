//! HTML rendering of the product page.
//!
//! All markup goes through [`Markup`]. Text and attribute values can only enter
//! it escaped; tag and attribute names must be `'static` literals. There is no
//! way to splice an arbitrary `String` in unescaped.

use catalog_products::{Price, Product, ProductId};

use crate::form::Form;

pub const LOADING_PLACEHOLDER: &str = "Loading products...";
pub const EMPTY_PLACEHOLDER: &str = "No products found. Add one above!";
pub const LOAD_FAILED_PLACEHOLDER: &str =
    "Could not load products. Make sure the database is connected.";

/// Where the server serves the wasm-bindgen `--target web` module.
pub const BUNDLE_PATH: &str = "/pkg/catalog_client.js";

/// Module importing the bundle and running its `init`, which instantiates the
/// wasm and runs the frontend's start function.
const BOOT_SCRIPT: &str = r#"import init from "/pkg/catalog_client.js"; init();"#;

/// Escape `&`, `<`, `>`, `"` and `'` for use in text or attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// `$` plus exactly two fraction digits, e.g. `$9.50`.
pub fn format_price(price: Price) -> String {
    format!("${price}")
}

/// A fragment of HTML that is safe by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escaped text node.
    pub fn text(raw: &str) -> Self {
        Self(escape_html(raw))
    }

    /// `<tag attrs...>children</tag>`.
    pub fn element(tag: &'static str, attrs: &[(&'static str, &str)], children: Markup) -> Self {
        let mut out = Self::open_tag(tag, attrs);
        out.0.push_str(&children.0);
        out.0.push_str("</");
        out.0.push_str(tag);
        out.0.push('>');
        out
    }

    /// Element without children or closing tag (`<input>`, `<meta>`).
    pub fn void_element(tag: &'static str, attrs: &[(&'static str, &str)]) -> Self {
        Self::open_tag(tag, attrs)
    }

    /// Inline `<script type="module">`. The source is a literal, never escaped
    /// and never built from runtime data.
    pub fn module_script(source: &'static str) -> Self {
        let mut out = Self::open_tag("script", &[("type", "module")]);
        out.0.push_str(source);
        out.0.push_str("</script>");
        out
    }

    fn open_tag(tag: &'static str, attrs: &[(&'static str, &str)]) -> Self {
        let mut s = String::new();
        s.push('<');
        s.push_str(tag);
        for (name, value) in attrs {
            s.push(' ');
            s.push_str(name);
            s.push_str("=\"");
            s.push_str(&escape_html(value));
            s.push('"');
        }
        s.push('>');
        Self(s)
    }

    pub fn append(mut self, other: Markup) -> Self {
        self.0.push_str(&other.0);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        iter.into_iter().fold(Markup::new(), Markup::append)
    }
}

impl core::fmt::Display for Markup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the product list area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListView {
    #[default]
    Loading,
    LoadFailed,
    Empty,
    /// Products in the order the server returned them.
    Products(Vec<Product>),
}

impl ListView {
    pub fn from_products(products: Vec<Product>) -> Self {
        if products.is_empty() {
            ListView::Empty
        } else {
            ListView::Products(products)
        }
    }

    /// Look up a rendered product by id (the card action dispatch table).
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        match self {
            ListView::Products(products) => products.iter().find(|p| p.id_typed() == id),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListView::Loading => Some(LOADING_PLACEHOLDER),
            ListView::LoadFailed => Some(LOAD_FAILED_PLACEHOLDER),
            ListView::Empty => Some(EMPTY_PLACEHOLDER),
            ListView::Products(_) => None,
        }
    }
}

pub fn render_card(product: &Product) -> Markup {
    let id = product.id_typed().to_string();

    let info = Markup::element(
        "div",
        &[("class", "product-info")],
        Markup::element("h3", &[], Markup::text(product.name())).append(Markup::element(
            "div",
            &[("class", "price")],
            Markup::text(&format_price(product.price())),
        )),
    );

    let actions = Markup::element(
        "div",
        &[("class", "card-actions")],
        Markup::element(
            "button",
            &[("type", "button"), ("class", "edit-btn")],
            Markup::text("Edit"),
        )
        .append(Markup::element(
            "button",
            &[("type", "button"), ("class", "delete-btn")],
            Markup::text("Delete"),
        )),
    );

    Markup::element(
        "div",
        &[("class", "product-card"), ("data-id", id.as_str())],
        info.append(actions),
    )
}

pub fn render_list(list: &ListView) -> Markup {
    match list {
        ListView::Products(products) => products.iter().map(render_card).collect(),
        other => {
            let text = other.placeholder().unwrap_or_default();
            Markup::element(
                "div",
                &[("class", "empty-state")],
                Markup::element("p", &[], Markup::text(text)),
            )
        }
    }
}

pub fn render_form(form: &Form) -> Markup {
    let labels = form.state().labels();
    let fields = form.fields();
    let cancel_style = if labels.cancel_visible {
        "display: block"
    } else {
        "display: none"
    };

    let inputs = Markup::void_element(
        "input",
        &[
            ("type", "text"),
            ("id", "name"),
            ("name", "name"),
            ("placeholder", "Product name"),
            ("value", fields.name.as_str()),
            ("required", ""),
        ],
    )
    .append(Markup::void_element(
        "input",
        &[
            ("type", "number"),
            ("id", "price"),
            ("name", "price"),
            ("placeholder", "Price"),
            ("step", "0.01"),
            ("min", "0"),
            ("value", fields.price.as_str()),
            ("required", ""),
        ],
    ))
    .append(Markup::element(
        "button",
        &[("type", "submit"), ("id", "submitBtn")],
        Markup::text(labels.submit),
    ))
    .append(Markup::element(
        "button",
        &[("type", "button"), ("id", "cancelBtn"), ("class", "cancel-btn"), ("style", cancel_style)],
        Markup::text("Cancel"),
    ));

    Markup::element(
        "section",
        &[("class", "form-section")],
        Markup::element("h2", &[], Markup::text(labels.title))
            .append(Markup::element("form", &[("id", "productForm")], inputs)),
    )
}

/// Full HTML document: form plus list, and the loader that boots the frontend
/// over the server-rendered contents of `#app`.
pub fn page_shell(form: &Form, list: &ListView) -> Markup {
    let head = Markup::void_element("meta", &[("charset", "utf-8")])
        .append(Markup::void_element(
            "meta",
            &[("name", "viewport"), ("content", "width=device-width, initial-scale=1")],
        ))
        .append(Markup::element("title", &[], Markup::text("Product Catalog")))
        .append(Markup::module_script(BOOT_SCRIPT));

    let list_section = Markup::element(
        "section",
        &[("class", "list-section")],
        Markup::element("h2", &[], Markup::text("Products")).append(Markup::element(
            "div",
            &[("id", "productList")],
            render_list(list),
        )),
    );

    let body = Markup::element(
        "div",
        &[("class", "container"), ("id", "app")],
        render_form(form).append(list_section),
    );

    let html = Markup::element(
        "html",
        &[("lang", "en")],
        Markup::element("head", &[], head).append(Markup::element("body", &[], body)),
    );

    Markup(format!("<!DOCTYPE html>{}", html.0))
}

#[cfg(test)]
mod tests {
    use catalog_products::ProductDraft;

    use super::*;

    fn product(id: i64, name: &str, price: f64) -> Product {
        Product::new(ProductId::new(id), ProductDraft::new(name, price).unwrap())
    }

    #[test]
    fn escape_covers_all_five_characters() {
        assert_eq!(
            escape_html(r#"&<>"'"#),
            "&amp;&lt;&gt;&quot;&#039;"
        );
    }

    #[test]
    fn bold_tag_in_name_renders_as_literal_text() {
        let html = render_card(&product(1, "<b>x</b>", 1.0)).into_string();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn script_tag_in_name_never_survives() {
        let list = ListView::from_products(vec![product(1, "<script>alert(1)</script>", 1.0)]);
        let html = render_list(&list).into_string();
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut form = Form::new();
        form.fields_mut().name = r#"" onfocus="alert(1)"#.to_string();
        let html = render_form(&form).into_string();
        assert!(html.contains(r#"value="&quot; onfocus=&quot;alert(1)""#));
    }

    #[test]
    fn price_renders_with_two_decimals() {
        assert_eq!(format_price(Price::new(9.5).unwrap()), "$9.50");
        let html = render_card(&product(1, "Widget", 9.5)).into_string();
        assert!(html.contains(r#"<div class="price">$9.50</div>"#));
    }

    #[test]
    fn empty_and_failed_lists_have_distinct_placeholders() {
        let empty = render_list(&ListView::from_products(vec![])).into_string();
        let failed = render_list(&ListView::LoadFailed).into_string();
        assert!(empty.contains("No products found"));
        assert!(failed.contains("Could not load products"));
        assert_ne!(empty, failed);
    }

    #[test]
    fn cards_keep_received_order() {
        let list = ListView::from_products(vec![product(7, "B", 1.0), product(3, "A", 2.0)]);
        let html = render_list(&list).into_string();

        let b = html.find("<h3>B</h3>").unwrap();
        let a = html.find("<h3>A</h3>").unwrap();
        assert!(b < a);
        assert!(html.contains(r#"<div class="product-card" data-id="7">"#));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn find_looks_up_by_id() {
        let list = ListView::from_products(vec![product(7, "B", 1.0)]);
        assert_eq!(list.find(ProductId::new(7)).map(|p| p.name()), Some("B"));
        assert!(list.find(ProductId::new(8)).is_none());
        assert!(ListView::Empty.find(ProductId::new(7)).is_none());
    }

    #[test]
    fn shell_shows_idle_form_and_list() {
        let html = page_shell(&Form::new(), &ListView::Empty).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>Add New Product</h2>"));
        assert!(html.contains(r#"style="display: none""#));
        assert!(html.contains(EMPTY_PLACEHOLDER));
        assert!(html.contains(r#"<div class="container" id="app">"#));
    }

    #[test]
    fn shell_boots_the_frontend_bundle() {
        let html = page_shell(&Form::new(), &ListView::Loading).into_string();

        let start = html.find(r#"<script type="module">"#).unwrap();
        let end = start + html[start..].find("</script>").unwrap();
        let script = &html[start..end];
        assert!(script.contains(&format!(r#"import init from "{BUNDLE_PATH}""#)));
        assert!(script.contains("init();"));
        // A bare `src=` import would load the module without instantiating it.
        assert!(!html.contains(r#"<script type="module" src="#));
        assert_eq!(html.matches("<script").count(), 1);
    }

    #[test]
    fn module_script_is_emitted_verbatim() {
        let html = Markup::module_script(r#"import x from "/a.js"; x();"#).into_string();
        assert_eq!(html, r#"<script type="module">import x from "/a.js"; x();</script>"#);
    }
}
