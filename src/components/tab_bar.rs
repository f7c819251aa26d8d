//! Tab Bar Component
//!
//! Switches between the app sections.

use leptos::prelude::*;

/// App section selected in the tab bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    All,
    Active,
    Completed,
    Remote,
    Settings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::All,
        Section::Active,
        Section::Completed,
        Section::Remote,
        Section::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::All => "All",
            Section::Active => "Active",
            Section::Completed => "Completed",
            Section::Remote => "Remote",
            Section::Settings => "Settings",
        }
    }
}

#[component]
pub fn TabBar(
    current: ReadSignal<Section>,
    set_current: WriteSignal<Section>,
) -> impl IntoView {
    view! {
        <nav class="tab-bar">
            <h1 class="app-title">"To-Do"</h1>
            {Section::ALL.iter().map(|&section| {
                let tab_class = move || {
                    if current.get() == section { "tab active" } else { "tab" }
                };
                view! {
                    <button class=tab_class on:click=move |_| set_current.set(section)>
                        {section.label()}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
