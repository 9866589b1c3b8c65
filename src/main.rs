//! Mesocentre Admin Portal Frontend Entry Point

mod api;
mod app;
mod commands;
mod components;
mod context;
mod export;
mod format;
mod models;
mod store;
mod table;
mod validate;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
