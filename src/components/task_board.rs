//! Task Board Component
//!
//! Expandable list of pending (or historic) tasks with accept/ignore/reject
//! dispatch. One implementation serves both endpoint families: the admin
//! registration tasks and the committee board.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::{TaskAction, TaskEndpoints};
use crate::commands;
use crate::components::TaskRow;
use crate::context::use_app_context;
use crate::store::{store_remove_task, store_set_tasks, TaskBoardState, TaskBoardStateStoreFields};

#[component]
pub fn TaskBoard(
    group: TaskEndpoints,
    title: &'static str,
    open: ReadSignal<bool>,
    set_open: WriteSignal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    let state = Store::new(TaskBoardState::default());
    let (history, set_history) = signal(false);

    let load = move || {
        let showing_history = history.get_untracked();
        spawn_local(async move {
            if let Some(tasks) = commands::task_list(ctx, group, showing_history).await {
                if tasks.is_empty() {
                    ctx.notify("No tasks found");
                }
                if !showing_history {
                    *state.pending().write() = tasks.len() as u32;
                }
                store_set_tasks(&state, tasks);
            }
        });
    };

    // Reload whenever the panel opens or the pending/history toggle flips.
    Effect::new(move |_| {
        let _ = history.get();
        if open.get() {
            load();
        }
    });

    let on_act = Callback::new(move |(action, id): (TaskAction, u32)| {
        spawn_local(async move {
            if let Some(reply) = commands::task_act(ctx, group, action, id).await {
                // both rows of the pair render from this one entry
                store_remove_task(&state, id);
                if let Some(remaining) = reply.count() {
                    *state.pending().write() = remaining as u32;
                    if remaining == 0 {
                        set_open.set(false);
                    }
                }
            }
        });
    });

    view! {
        <Show when=move || !open.get()>
            <button class="panel-open-btn" on:click=move |_| set_open.set(true)>
                {title}
                <span class="pending-badge">{move || state.pending().get()}</span>
            </button>
        </Show>
        <Show when=move || open.get()>
            <section class="task-panel">
                <header class="panel-header">
                    <h2>
                        {title}
                        <span class="pending-badge">{move || state.pending().get()}</span>
                    </h2>
                    <div class="panel-controls">
                        <button
                            class=move || if history.get() { "toggle-btn" } else { "toggle-btn active" }
                            on:click=move |_| set_history.set(false)
                        >
                            "Pending"
                        </button>
                        <button
                            class=move || if history.get() { "toggle-btn active" } else { "toggle-btn" }
                            on:click=move |_| set_history.set(true)
                        >
                            "History"
                        </button>
                        <button class="reload-btn" on:click=move |_| load()>"Reload"</button>
                        <button class="panel-close-btn" on:click=move |_| set_open.set(false)>"×"</button>
                    </div>
                </header>
                // empty list: the toast already said so, no table at all
                <Show when=move || !state.entries().get().is_empty()>
                    <table class="task-table">
                        <thead>
                            <tr>
                                <th></th>
                                <th>"Action"</th>
                                <th>"Entity"</th>
                                <th>"Author"</th>
                                <th>"Created"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || state.entries().get()
                                key=|entry| {
                                    // every field a patch can touch, so the row re-renders
                                    (
                                        entry.task.id,
                                        entry.expansion,
                                        entry.task.status.clone(),
                                        entry.task.decision,
                                        entry.detail.is_some(),
                                    )
                                }
                                children=move |entry| {
                                    view! {
                                        <TaskRow
                                            entry=entry
                                            group=group
                                            state=state
                                            history=history
                                            on_act=on_act
                                        />
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </section>
        </Show>
    }
}
