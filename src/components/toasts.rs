//! Notification Toasts Component
//!
//! Transient, non-blocking banners for reply messages and informational
//! results ("no tasks found"). Each toast dismisses itself; clicking
//! dismisses early.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-stack">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class="toast" on:click=move |_| ctx.dismiss(id)>
                            {toast.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
