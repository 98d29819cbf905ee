use leptos::*;

use crate::models::product::PurchasedProduct;

/// Selection control over the visitor's purchased products. Labels come
/// from the catalog join; products the catalog no longer carries fall back
/// to an id-based label.
#[component]
pub fn PurchasePicker(
    purchases: Vec<PurchasedProduct>,
    selected: ReadSignal<Option<i64>>,
    on_select: Box<dyn Fn(i64)>,
) -> impl IntoView {
    let handle_change = move |e| {
        if let Ok(product_id) = event_target_value(&e).parse::<i64>() {
            on_select(product_id);
        }
    };

    view! {
        <div class="purchase-picker">
            <label>{ "Pick a product to review:" }</label>
            <select on:change=handle_change>
                {purchases.into_iter().map(|product| {
                    let product_id = product.product_id;
                    view! {
                        <option
                            value=product_id.to_string()
                            selected=move || selected.get() == Some(product_id)
                        >
                            { product.display_name() }
                        </option>
                    }
                }).collect::<Vec<_>>()}
            </select>
        </div>
    }
}
