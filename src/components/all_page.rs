//! All Tasks Page
//!
//! Search, new task input, bulk actions and the sorted task list.

use gloo_timers::callback::Timeout;
use leptos::html;
use leptos::prelude::*;

use todo_core::visible_tasks;

use crate::components::{StatsBar, TaskList};
use crate::context::use_todos;
use crate::shortcuts::use_shortcut;

/// Delay before the search box filters the list
const SEARCH_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn AllPage() -> impl IntoView {
    let ctx = use_todos();

    let (new_task, set_new_task) = signal(String::new());
    let (query, set_query) = signal(String::new());
    let (debounced_query, set_debounced_query) = signal(String::new());
    let search_timer = StoredValue::new_local(None::<Timeout>);

    let new_task_ref = NodeRef::<html::Input>::new();
    let search_ref = NodeRef::<html::Input>::new();

    // Replacing the pending timeout drops (cancels) it
    Effect::new(move |_| {
        let q = query.get();
        let timer = Timeout::new(SEARCH_DEBOUNCE_MS, move || set_debounced_query.set(q));
        search_timer.set_value(Some(timer));
    });

    // Focus the new task input on mount
    Effect::new(move |_| {
        if let Some(input) = new_task_ref.get() {
            let _ = input.focus();
            input.select();
        }
    });

    let add_task = move || {
        if ctx.add(&new_task.get_untracked()).is_ok() {
            set_new_task.set(String::new());
            if let Some(input) = new_task_ref.get_untracked() {
                let _ = input.focus();
            }
        }
    };

    use_shortcut("mod+k", move || {
        if let Some(input) = new_task_ref.get_untracked() {
            let _ = input.focus();
        }
    });
    use_shortcut("/", move || {
        if let Some(input) = search_ref.get_untracked() {
            let _ = input.focus();
        }
    });
    use_shortcut("mod+enter", add_task);
    use_shortcut("mod+shift+c", move || ctx.clear_completed());

    let visible = Signal::derive(move || {
        let q = debounced_query.get();
        ctx.tasks.with(|tasks| visible_tasks(tasks, &q))
    });

    view! {
        <section class="page">
            <h2>"All Tasks"</h2>
            <StatsBar />

            <div class="task-controls">
                <input
                    node_ref=search_ref
                    type="text"
                    class="search-input"
                    placeholder="Search… (/)"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <input
                    node_ref=new_task_ref
                    type="text"
                    class="new-task-input"
                    placeholder="New task… (Ctrl/⌘ + K)"
                    prop:value=move || new_task.get()
                    on:input=move |ev| set_new_task.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            add_task();
                        }
                    }
                />
                <button class="add-btn" on:click=move |_| add_task()>"Add"</button>
                <button class="clear-btn" on:click=move |_| ctx.clear_completed()>
                    "Clear completed"
                </button>
            </div>

            <TaskList tasks=visible empty_text="Nothing here yet ✨" />
        </section>
    }
}
