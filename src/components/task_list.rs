//! Task List Component

use leptos::prelude::*;

use todo_core::Task;

use crate::components::TaskItem;

/// Renders `tasks` in order, or `empty_text` when there are none
#[component]
pub fn TaskList(
    #[prop(into)] tasks: Signal<Vec<Task>>,
    empty_text: &'static str,
) -> impl IntoView {
    view! {
        <ul class="task-list">
            <Show when=move || tasks.with(|t| t.is_empty())>
                <li class="task-empty">{empty_text}</li>
            </Show>
            <For
                each=move || tasks.get()
                // done is part of the key so a toggled row re-renders
                key=|task| (task.id.clone(), task.done)
                children=|task| view! { <TaskItem task=task /> }
            />
        </ul>
    }
}
