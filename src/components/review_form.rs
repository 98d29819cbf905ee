use leptos::ev::SubmitEvent;
use leptos::*;

/// Free-text review entry. Submission hands the raw text to the page and
/// clears the draft.
#[component]
pub fn ReviewForm(on_submit: Box<dyn Fn(String)>) -> impl IntoView {
    let (review_text, set_review_text) = create_signal(String::new());

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit(review_text.get());
        set_review_text.set(String::new());
    };

    view! {
        <form class="review-form" on:submit=handle_submit>
            <h3>{ "Submit Review" }</h3>
            <textarea
                placeholder="Write your review here"
                prop:value=move || review_text.get()
                on:input=move |e| set_review_text.set(event_target_value(&e))
            />
            <button type="submit">{ "Submit review" }</button>
        </form>
    }
}
