/// Main application entry point for the purchase-review page.
/// Wires the name form, purchase picker, review form and reviews list into
/// one page backed by the /api routes.
use gloo_net::http::Request;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::name_form::NameForm;
use crate::components::purchase_picker::PurchasePicker;
use crate::components::review_form::ReviewForm;
use crate::components::reviews_list::ReviewsList;
use crate::models::product::PurchasedProduct;
use crate::models::review::{NewReview, Review};

/// Banner shown above the page content, mirroring the store's own
/// info/success/error styling.
#[derive(Clone, PartialEq)]
struct Notice {
    class: &'static str,
    text: String,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            class: "info",
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            class: "success",
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            class: "error",
            text: text.into(),
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/cyshop-reviews.css"/>
        <Title text="Review Your Purchases"/>
        <Router>
            <main>
                <Routes>
                    <Route path="" view=HomePage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    // Session state for the current visitor: the name they shop under,
    // what they bought, which product is selected, and the reviews shown.
    let (user_name, set_user_name) = create_signal(String::new());
    let (searched, set_searched) = create_signal(false);
    let (purchases, set_purchases) = create_signal(Vec::<PurchasedProduct>::new());
    let (selected, set_selected) = create_signal(None::<i64>);
    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let (notice, set_notice) = create_signal(None::<Notice>);

    let fetch_reviews = move |product_id: i64| {
        spawn_local(async move {
            let url = format!("/api/products/{}/reviews", product_id);
            match Request::get(&url).send().await {
                Ok(response) if response.ok() => match response.json::<Vec<Review>>().await {
                    Ok(rows) => set_reviews.set(rows),
                    Err(err) => set_notice.set(Some(Notice::error(format!(
                        "Failed to read reviews: {err}"
                    )))),
                },
                Ok(response) => set_notice.set(Some(Notice::error(format!(
                    "Failed to read reviews (status {})",
                    response.status()
                )))),
                Err(err) => set_notice.set(Some(Notice::error(format!(
                    "Failed to read reviews: {err}"
                )))),
            }
        });
    };

    let lookup_purchases = move |name: String| {
        if name.is_empty() {
            set_notice.set(Some(Notice::info(
                "Please enter your name to see your purchased items.",
            )));
            return;
        }
        set_user_name.set(name.clone());
        spawn_local(async move {
            let url = format!("/api/purchases?name={}", urlencoding::encode(&name));
            match Request::get(&url).send().await {
                Ok(response) if response.ok() => {
                    match response.json::<Vec<PurchasedProduct>>().await {
                        Ok(rows) => {
                            set_notice.set(None);
                            set_searched.set(true);
                            let first = rows.first().map(|p| p.product_id);
                            set_purchases.set(rows);
                            set_selected.set(first);
                            set_reviews.set(Vec::new());
                            if let Some(product_id) = first {
                                fetch_reviews(product_id);
                            }
                        }
                        Err(err) => set_notice.set(Some(Notice::error(format!(
                            "Failed to load purchases: {err}"
                        )))),
                    }
                }
                Ok(response) => set_notice.set(Some(Notice::error(format!(
                    "Failed to load purchases (status {})",
                    response.status()
                )))),
                Err(err) => set_notice.set(Some(Notice::error(format!(
                    "Failed to load purchases: {err}"
                )))),
            }
        });
    };

    let select_product = move |product_id: i64| {
        set_selected.set(Some(product_id));
        set_notice.set(None);
        fetch_reviews(product_id);
    };

    let submit_review = move |text: String| {
        let Some(product_id) = selected.get() else {
            return;
        };
        // Mirror the server-side check so an empty draft never leaves the page.
        if text.trim().is_empty() {
            set_notice.set(Some(Notice::error(
                "Please write something before submitting.",
            )));
            return;
        }
        let review = NewReview {
            product_id,
            user_name: user_name.get(),
            review: text,
        };
        spawn_local(async move {
            let request = match Request::post("/api/reviews").json(&review) {
                Ok(request) => request,
                Err(err) => {
                    set_notice.set(Some(Notice::error(format!(
                        "Failed to submit review: {err}"
                    ))));
                    return;
                }
            };
            match request.send().await {
                Ok(response) if response.ok() => {
                    set_notice.set(Some(Notice::success("Thank you! Your review is saved.")));
                    fetch_reviews(product_id);
                }
                Ok(response) => {
                    // The body carries the validation or store error text.
                    let body = response.text().await.unwrap_or_default();
                    let message = if body.is_empty() {
                        format!("Review rejected (status {})", response.status())
                    } else {
                        body
                    };
                    set_notice.set(Some(Notice::error(message)));
                }
                Err(err) => set_notice.set(Some(Notice::error(format!(
                    "Failed to submit review: {err}"
                )))),
            }
        });
    };

    view! {
        <div class="review-page">
            <h1>{ "🛒 Review Your Purchases" }</h1>
            <NameForm on_submit=Box::new(lookup_purchases) />

            {move || notice.get().map(|notice| view! {
                <p class=format!("notice {}", notice.class)>{ notice.text }</p>
            })}

            {move || (searched.get() && purchases.get().is_empty()).then(|| view! {
                <p class="notice warning">{ "No purchases found for this name. Buy something first! 🙂" }</p>
            })}

            {move || {
                let items = purchases.get();
                (!items.is_empty()).then(|| view! {
                    <PurchasePicker purchases=items selected=selected on_select=Box::new(select_product) />
                })
            }}

            {move || {
                selected.get()
                    .and_then(|product_id| {
                        purchases.get().into_iter().find(|p| p.product_id == product_id)
                    })
                    .map(|product| {
                        let caption = product.display_name();
                        view! {
                            <figure class="product-card">
                                {product.image_url.clone().map(|src| view! {
                                    <img src=src width="450" alt=caption.clone() />
                                })}
                                <figcaption>{ caption.clone() }</figcaption>
                            </figure>
                        }
                    })
            }}

            {move || selected.get().is_some().then(|| view! {
                <ReviewForm on_submit=Box::new(submit_review) />
                <hr/>
                <ReviewsList reviews=reviews.get() />
            })}
        </div>
    }
}
