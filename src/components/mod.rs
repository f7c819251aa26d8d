//! UI Components
//!
//! Leptos components and pages.

mod all_page;
mod filtered_page;
mod remote_page;
mod settings_page;
mod stats_bar;
mod tab_bar;
mod task_item;
mod task_list;

pub use all_page::AllPage;
pub use filtered_page::FilteredPage;
pub use remote_page::RemotePage;
pub use settings_page::SettingsPage;
pub use stats_bar::StatsBar;
pub use tab_bar::{Section, TabBar};
pub use task_item::TaskItem;
pub use task_list::TaskList;
