//! To-Do Frontend App
//!
//! App shell: tab bar, document title and the selected section.

use leptos::prelude::*;

use todo_core::{AppConfig, Filter};

use crate::components::{AllPage, FilteredPage, RemotePage, Section, SettingsPage, TabBar};
use crate::context::TodoContext;

#[component]
pub fn App() -> impl IntoView {
    let (section, set_section) = signal(Section::All);

    // Provide context to all children
    let ctx = TodoContext::new(AppConfig::default());
    provide_context(ctx);

    // Keep the tab title in sync with section and progress
    Effect::new(move |_| {
        let title = format!("To-Do — {} ({}%)", section.get().label(), ctx.stats().pct);
        document().set_title(&title);
    });

    view! {
        <div class="app-layout">
            <TabBar current=section set_current=set_section />
            <main class="main-content">
                {move || match section.get() {
                    Section::All => view! { <AllPage /> }.into_any(),
                    Section::Active => view! { <FilteredPage filter=Filter::Active /> }.into_any(),
                    Section::Completed => view! { <FilteredPage filter=Filter::Completed /> }.into_any(),
                    Section::Remote => view! { <RemotePage /> }.into_any(),
                    Section::Settings => view! { <SettingsPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
