//! Remote Tasks Page
//!
//! Server list with reload, optimistic add and import into the local list.

use leptos::prelude::*;

use todo_core::{MutationStatus, QueryStatus, RemoteTask};

use crate::context::use_todos;

#[component]
fn RemoteRow(task: RemoteTask) -> impl IntoView {
    let ctx = use_todos();
    let (import_error, set_import_error) = signal::<Option<String>>(None);

    let completed = task.completed;
    let optimistic = task.optimistic;
    let title = task.title.clone();

    let import = move |_| match ctx.import(&task) {
        Ok(_) => set_import_error.set(None),
        Err(e) => set_import_error.set(Some(format!("Could not import ({e})"))),
    };

    view! {
        <li class=if completed { "remote-row done" } else { "remote-row" }>
            <span class="remote-check">{if completed { "✓" } else { "" }}</span>
            <span class="remote-title">
                {title}
                {optimistic.then(|| view! { <em class="optimistic-tag">" (optimistic)"</em> })}
            </span>
            <button class="import-btn" title="Import into the local list" on:click=import>
                "Import"
            </button>
            {move || import_error.get().map(|msg| view! { <span class="error-text">{msg}</span> })}
        </li>
    }
}

#[component]
pub fn RemotePage() -> impl IntoView {
    let ctx = use_todos();
    let (title, set_title) = signal(String::new());

    // Fetch on mount, or refresh if the cached list went stale
    Effect::new(move |_| ctx.remote_query());

    let state = Memo::new(move |_| ctx.remote_state());
    let mutation = Memo::new(move |_| ctx.mutation_status());
    let fetching = move || state.with(|s| s.status.is_fetching());
    let sending = move || mutation.get() == MutationStatus::Pending;

    let add_remote = move || {
        if ctx.remote_add(&title.get_untracked()).is_ok() {
            set_title.set(String::new());
        }
    };

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Server Tasks"</h2>
                <button
                    class="reload-btn"
                    disabled=fetching
                    on:click=move |_| ctx.remote_refetch()
                >
                    {move || if fetching() { "Refreshing…" } else { "Reload" }}
                </button>
            </div>

            <div class="task-controls">
                <input
                    type="text"
                    class="new-task-input"
                    placeholder="New remote task…"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            add_remote();
                        }
                    }
                />
                <button class="add-btn" disabled=sending on:click=move |_| add_remote()>
                    {move || if sending() { "Sending…" } else { "Add remote" }}
                </button>
            </div>

            {move || match mutation.get() {
                MutationStatus::Error(msg) => Some(view! {
                    <p class="error-text">{format!("Could not add: {msg}")}</p>
                }),
                _ => None,
            }}

            <Show when=move || state.with(|s| s.status == QueryStatus::Loading)>
                <p class="muted">"Loading…"</p>
            </Show>
            {move || {
                state
                    .with(|s| if s.status == QueryStatus::Error { s.error.clone() } else { None })
                    .map(|msg| view! { <p class="error-text">{format!("Error: {msg}")}</p> })
            }}

            <ul class="remote-list">
                <For
                    each=move || state.with(|s| s.data.clone().unwrap_or_default())
                    key=|task| (task.id, task.optimistic)
                    children=|task| view! { <RemoteRow task=task /> }
                />
            </ul>
        </section>
    }
}
