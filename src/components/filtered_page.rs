//! Filtered Task Page
//!
//! Active and Completed sections: the local list narrowed by completion.

use leptos::prelude::*;

use todo_core::{filter_tasks, Filter};

use crate::components::TaskList;
use crate::context::use_todos;

#[component]
pub fn FilteredPage(filter: Filter) -> impl IntoView {
    let ctx = use_todos();
    let tasks = Signal::derive(move || ctx.tasks.with(|tasks| filter_tasks(tasks, filter)));

    let (title, empty_text) = match filter {
        Filter::Active => ("Active", "No open tasks ✅"),
        Filter::Completed => ("Completed", "Nothing completed yet"),
        Filter::All => ("All Tasks", "Nothing here yet ✨"),
    };

    view! {
        <section class="page">
            <h2>{title}</h2>
            <TaskList tasks=tasks empty_text=empty_text />
        </section>
    }
}
