//! Application Context
//!
//! Shared UI plumbing provided via the Leptos Context API: the blocking
//! "sending…" indicator, the transient notification queue and the global
//! error presenter.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::api::ApiError;

/// How long a notification toast stays on screen.
const TOAST_MS: u32 = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub text: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// In-flight request count; the overlay shows while it is non-zero.
    busy: ReadSignal<u32>,
    set_busy: WriteSignal<u32>,
    /// Notification queue - read
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    toast_seq: StoredValue<u32>,
}

impl AppContext {
    pub fn new() -> Self {
        let (busy, set_busy) = signal(0u32);
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        Self {
            busy,
            set_busy,
            toasts,
            set_toasts,
            toast_seq: StoredValue::new(0),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get() > 0
    }

    pub fn busy_begin(&self) {
        self.set_busy.update(|n| *n += 1);
    }

    pub fn busy_end(&self) {
        self.set_busy.update(|n| *n = n.saturating_sub(1));
    }

    /// Queue a transient toast; it dismisses itself after a few seconds.
    pub fn notify(&self, text: impl Into<String>) {
        let id = self.toast_seq.get_value();
        self.toast_seq.set_value(id + 1);
        self.set_toasts
            .update(|toasts| toasts.push(Toast { id, text: text.into() }));
        let set_toasts = self.set_toasts;
        Timeout::new(TOAST_MS, move || {
            set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Blocking alert used for local refusals (export, upload caps).
    pub fn alert(&self, text: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(text);
        }
    }

    /// Global presenter for transport failures: one blocking alert carrying
    /// the status line and body, plus the support-mailbox advice.
    pub fn present_error(&self, err: &ApiError) {
        web_sys::console::error_1(&format!("[API] {}", err).into());
        self.alert(&format!(
            "The server could not complete the request.\n\n{}\n\nIf the problem persists, contact support@mesocentre.example.org.",
            err
        ));
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the shared context; the root component provides it at mount.
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
