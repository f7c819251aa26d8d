//! Task Item Component
//!
//! A single task row: completion checkbox, text and delete button.

use leptos::prelude::*;

use todo_core::Task;

use crate::context::use_todos;

#[component]
pub fn TaskItem(task: Task) -> impl IntoView {
    let ctx = use_todos();

    let done = task.done;
    let toggle_id = task.id.clone();
    let remove_id = task.id.clone();
    let delete_label = format!("Delete task \"{}\"", task.text);

    view! {
        <li class=if done { "task-row done" } else { "task-row" }>
            <label class="task-toggle">
                <input
                    type="checkbox"
                    checked=done
                    on:change=move |_| ctx.toggle(&toggle_id)
                />
                <span class="task-text">{task.text}</span>
            </label>
            <button
                class="delete-btn"
                title=delete_label.clone()
                aria-label=delete_label
                on:click=move |_| ctx.remove(&remove_id)
            >
                "×"
            </button>
        </li>
    }
}
