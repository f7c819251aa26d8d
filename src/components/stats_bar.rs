//! Stats Bar Component
//!
//! Counters and a progress bar for the local list.

use leptos::prelude::*;

use crate::context::use_todos;

#[component]
pub fn StatsBar() -> impl IntoView {
    let ctx = use_todos();
    let stats = Memo::new(move |_| ctx.stats());

    view! {
        <div class="stats-bar">
            <span class="badge">{move || format!("{} total", stats.get().total)}</span>
            <span class="badge">{move || format!("{} remaining", stats.get().remaining)}</span>
            <span class="badge">{move || format!("{} done", stats.get().done)}</span>
            <div class="progress">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%;", stats.get().pct)
                ></div>
            </div>
            <span class="progress-label">{move || format!("{}%", stats.get().pct)}</span>
        </div>
    }
}
