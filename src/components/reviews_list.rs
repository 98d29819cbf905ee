use leptos::*;

use crate::models::review::Review;

/// Read-only display of a product's reviews, newest first. A product with
/// no reviews gets an explicit empty state rather than a bare table.
#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    view! {
        <div class="reviews-list">
            <h3>{ "📣 Reviews from other customers" }</h3>
            {if reviews.is_empty() {
                view! {
                    <p class="no-reviews">{ "No reviews yet – be the first!" }</p>
                }.into_view()
            } else {
                view! {
                    <table>
                        <thead>
                            <tr>
                                <th>{ "Name" }</th>
                                <th>{ "Review" }</th>
                                <th>{ "Posted (UTC)" }</th>
                            </tr>
                        </thead>
                        <tbody>
                            {reviews.into_iter().map(|review| view! {
                                <tr>
                                    <td>{ review.user_name }</td>
                                    <td>{ review.review }</td>
                                    <td>{ review.ts_utc.format("%Y-%m-%d %H:%M").to_string() }</td>
                                </tr>
                            }).collect::<Vec<_>>()}
                        </tbody>
                    </table>
                }.into_view()
            }}
        </div>
    }
}
