//! Turns product replies into the HTML list the widget shows.
//! Handlebars escapes every value so product names from the catalog
//! can't inject markup.

use handlebars::{Handlebars, RenderError};
use serde_json::json;

use crate::catalog::ProductSummary;

const PRODUCT_LIST: &str = "ProductList";

const PRODUCT_LIST_TEMPLATE: &str = r#"<ul class="list-disc pl-5 space-y-1">{{#each products}}<li class="mb-2"><strong>{{name}}</strong> - {{price}} USD</li>{{/each}}</ul>"#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string(PRODUCT_LIST, PRODUCT_LIST_TEMPLATE)
        .expect("Failed to register template");
    registry
}

/// Prices print the way a shopper would write them: `20` rather than
/// `20.0`, `19.99` as is. Output matches a browser's number to string
/// conversion, including exponent form below `1e-6` and from `1e21`
/// up.
pub fn format_price(price: f64) -> String {
    if price.is_nan() {
        return String::from("NaN");
    }
    if price.is_infinite() {
        let sign = if price < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    }
    // Also folds -0 into 0
    if price == 0.0 {
        return String::from("0");
    }

    let magnitude = price.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", price);
    }

    let exp = format!("{:e}", price);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => {
            format!("{}e+{}", mantissa, power)
        }
        _ => exp,
    }
}

pub fn render_product_list(
    registry: &Handlebars<'_>,
    products: &[ProductSummary],
) -> Result<String, RenderError> {
    let products: Vec<_> = products
        .iter()
        .map(|p| json!({ "name": p.name, "price": format_price(p.price) }))
        .collect();
    registry.render(PRODUCT_LIST, &json!({ "products": products }))
}

/// Plain text version used if the template ever fails to render.
pub fn plain_product_list(products: &[ProductSummary]) -> String {
    products
        .iter()
        .map(|p| format!("{} - {} USD", p.name, format_price(p.price)))
        .collect::<Vec<_>>()
        .join("\n")
}
