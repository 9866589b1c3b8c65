//! Busy Overlay Component
//!
//! Blocking "sending…" indicator shown while any request is in flight.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn BusyOverlay() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Show when=move || ctx.is_busy()>
            <div class="busy-overlay">
                <div class="busy-box">"Sending…"</div>
            </div>
        </Show>
    }
}
