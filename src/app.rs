//! Portal Root Component
//!
//! Section tabs over the four views, with the shared chrome (busy overlay,
//! toast stack) always mounted.

use leptos::prelude::*;

use crate::api::{ADMIN_TASKS, COMMITTEE_BOARD};
use crate::components::{BusyOverlay, ProjectBoard, Registry, TaskBoard, Toasts};
use crate::context::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Tasks,
    Board,
    Projects,
    Registry,
}

const SECTIONS: [(Section, &str); 4] = [
    (Section::Tasks, "Tasks"),
    (Section::Board, "Board"),
    (Section::Projects, "Projects"),
    (Section::Registry, "Registry"),
];

#[component]
pub fn App() -> impl IntoView {
    let (section, set_section) = signal(Section::Tasks);
    let (tasks_open, set_tasks_open) = signal(true);
    let (board_open, set_board_open) = signal(true);

    provide_context(AppContext::new());

    view! {
        <div class="app-layout">
            <nav class="section-tabs">
                {SECTIONS.iter().map(|&(target, label)| view! {
                    <button
                        class=move || if section.get() == target { "tab-btn active" } else { "tab-btn" }
                        on:click=move |_| set_section.set(target)
                    >
                        {label}
                    </button>
                }).collect_view()}
            </nav>

            <main class="main-content">
                <Show when=move || section.get() == Section::Tasks>
                    <TaskBoard
                        group=ADMIN_TASKS
                        title="Registration tasks"
                        open=tasks_open
                        set_open=set_tasks_open
                    />
                </Show>
                <Show when=move || section.get() == Section::Board>
                    <TaskBoard
                        group=COMMITTEE_BOARD
                        title="Committee board"
                        open=board_open
                        set_open=set_board_open
                    />
                </Show>
                <Show when=move || section.get() == Section::Projects>
                    <ProjectBoard />
                </Show>
                <Show when=move || section.get() == Section::Registry>
                    <Registry />
                </Show>
            </main>

            <BusyOverlay />
            <Toasts />
        </div>
    }
}
