//! To-Do Frontend Entry Point

mod app;
mod components;
mod context;
mod shortcuts;
mod storage;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("starting to-do app");
    mount_to_body(App);
}
