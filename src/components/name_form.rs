use leptos::ev::SubmitEvent;
use leptos::*;

/// Name entry form. The name has to match the order records exactly, so the
/// text is handed along untouched.
#[component]
pub fn NameForm(on_submit: Box<dyn Fn(String)>) -> impl IntoView {
    let (name, set_name) = create_signal(String::new());

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit(name.get());
    };

    view! {
        <form class="name-form" on:submit=handle_submit>
            <label>{ "Your name (exactly as used when ordering):" }</label>
            <input
                type="text"
                maxlength="50"
                placeholder="Your name"
                on:input=move |e| set_name.set(event_target_value(&e))
            />
            <button type="submit">{ "Show my purchases" }</button>
        </form>
    }
}
