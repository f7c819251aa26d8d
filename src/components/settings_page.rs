//! Settings Page
//!
//! Read-only view of the active configuration.

use leptos::prelude::*;

use crate::context::use_todos;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_todos();
    let config = ctx.config();

    view! {
        <section class="page">
            <h2>"Settings"</h2>
            <dl class="settings-list">
                <dt>"Storage slot"</dt>
                <dd>{ctx.storage_key()}</dd>
                <dt>"Remote API"</dt>
                <dd>{config.api_base_url}</dd>
                <dt>"Remote list size"</dt>
                <dd>{config.remote_limit}</dd>
                <dt>"Cache freshness"</dt>
                <dd>{format!("{} s", config.stale_time_ms / 1000)}</dd>
            </dl>
        </section>
    }
}
