//! Project Board Component
//!
//! Sortable, filterable table of projects with expandable detail rows,
//! lifecycle dialogs and export of the filtered set. Everything renders
//! from the board store; rows are patched in place on action success.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{ActivityUpload, ProjectAction, ProjectDialog};
use crate::context::use_app_context;
use crate::export::{export_url, EXPORT_FORMATS};
use crate::format::{dom_id, usage};
use crate::store::{
    remove_project_user, store_set_projects, ProjectBoardState, ProjectBoardStateStoreFields,
};
use crate::table::{project_view, ProjectColumn, ProjectFilter, SortDir};

#[component]
pub fn ProjectBoard() -> impl IntoView {
    let ctx = use_app_context();
    let state = Store::new(ProjectBoardState::default());
    let (dialog, set_dialog) = signal::<Option<(ProjectAction, u32)>>(None);

    let load = move || {
        spawn_local(async move {
            if let Some(rows) = commands::project_list(ctx).await {
                if rows.is_empty() {
                    ctx.notify("No projects found");
                }
                store_set_projects(&state, rows);
            }
            if let Some(partition) = commands::partition_info(ctx).await {
                *state.partition().write() = Some(partition);
            }
        });
    };

    Effect::new(move |_| load());

    let view_rows = move || project_view(&state.rows().get(), &state.table().get());

    let sort_by = move |column: ProjectColumn| state.table().write().toggle_sort(column);
    let sort_marker = move |column: ProjectColumn| match state.table().get().sort {
        Some((current, SortDir::Asc)) if current == column => " ▲",
        Some((current, SortDir::Desc)) if current == column => " ▼",
        _ => "",
    };

    let export = move |format: &'static str| {
        let names: Vec<String> = view_rows().iter().map(|row| row.name.clone()).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        match export_url(format, &refs) {
            Ok(url) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.open_with_url(&url);
                }
            }
            Err(err) => ctx.alert(&err.to_string()),
        }
    };

    let remove_user = move |project_id: u32, login: String| {
        spawn_local(async move {
            if commands::project_delete_user(ctx, project_id, &login)
                .await
                .is_some()
            {
                remove_project_user(&mut state.rows().write(), project_id, &login);
            }
        });
    };

    view! {
        <section class="project-board">
            <header class="panel-header">
                <h2>"Projects"</h2>
                {move || state.partition().get().map(|partition| view! {
                    <p class="partition-info">
                        {partition.name}
                        ": "
                        {partition.nodes}
                        " nodes, "
                        {partition.cores}
                        " cores"
                        {partition.occupancy.map(|occupancy| format!(", occupancy {}", occupancy))}
                    </p>
                })}
                <div class="filter-bar">
                    {ProjectFilter::ALL.iter().map(|&filter| view! {
                        <button
                            class=move || {
                                if state.table().get().filter == Some(filter) {
                                    "filter-btn active"
                                } else {
                                    "filter-btn"
                                }
                            }
                            on:click=move |_| state.table().write().toggle_filter(filter)
                        >
                            {filter.label()}
                        </button>
                    }).collect_view()}
                </div>
                <div class="export-bar">
                    {EXPORT_FORMATS.iter().map(|&format| view! {
                        <button class="export-btn" on:click=move |_| export(format)>
                            {format}
                        </button>
                    }).collect_view()}
                </div>
            </header>

            <table class="project-table">
                <thead>
                    <tr>
                        <th></th>
                        <th class="sortable" on:click=move |_| sort_by(ProjectColumn::Name)>
                            "Name" {move || sort_marker(ProjectColumn::Name)}
                        </th>
                        <th>"Title"</th>
                        <th class="sortable" on:click=move |_| sort_by(ProjectColumn::Responsible)>
                            "Responsible" {move || sort_marker(ProjectColumn::Responsible)}
                        </th>
                        <th class="sortable" on:click=move |_| sort_by(ProjectColumn::Consumed)>
                            "Consumed" {move || sort_marker(ProjectColumn::Consumed)}
                        </th>
                        <th class="sortable" on:click=move |_| sort_by(ProjectColumn::Created)>
                            "Created" {move || sort_marker(ProjectColumn::Created)}
                        </th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=view_rows
                        key=|row| {
                            (
                                row.id,
                                row.extension,
                                row.renewal,
                                row.activate,
                                row.transform,
                                row.active,
                                row.responsible.clone(),
                                row.users.len(),
                            )
                        }
                        children=move |row| {
                            let id = row.id;
                            let expanded = move || state.table().get().is_expanded(id);
                            let users = row.users.clone();
                            let detail_responsible = row.responsible.clone();
                            let detail_title = row.title.clone();
                            let percent = usage(row.consumed, row.resources);
                            view! {
                                <tr class="project-row">
                                    <td>
                                        <button
                                            class="expand-btn"
                                            on:click=move |_| state.table().write().toggle_expanded(id)
                                        >
                                            {move || if expanded() { "−" } else { "+" }}
                                        </button>
                                    </td>
                                    <td>{row.name.clone()}</td>
                                    <td>{row.title.clone()}</td>
                                    <td>{row.responsible.clone()}</td>
                                    <td>{row.consumed} "/" {row.resources}</td>
                                    <td>{row.created.clone()}</td>
                                    <td class="project-actions">
                                        <button
                                            disabled=row.extension
                                            on:click=move |_| set_dialog.set(Some((ProjectAction::Extend, id)))
                                        >
                                            "Extend"
                                        </button>
                                        <button
                                            disabled=row.renewal
                                            on:click=move |_| set_dialog.set(Some((ProjectAction::Renew, id)))
                                        >
                                            "Renew"
                                        </button>
                                        <button
                                            disabled=row.transform
                                            on:click=move |_| set_dialog.set(Some((ProjectAction::Transform, id)))
                                        >
                                            "Transform"
                                        </button>
                                        <button
                                            disabled=row.active
                                            on:click=move |_| set_dialog.set(Some((ProjectAction::Activate, id)))
                                        >
                                            "Activate"
                                        </button>
                                        <button
                                            on:click=move |_| set_dialog.set(Some((ProjectAction::Reassign, id)))
                                        >
                                            "Reassign"
                                        </button>
                                    </td>
                                </tr>
                                <Show when=expanded>
                                    <tr class="project-detail">
                                        <td colspan="7">
                                            <p>"Responsible: " {detail_responsible.clone()}</p>
                                            <p>"Usage: " {percent.clone()} "%"</p>
                                            <p>"Title: " {detail_title.clone()}</p>
                                            <ul class="project-users">
                                                {users.iter().map(|login| {
                                                    let login = login.clone();
                                                    let shown = login.clone();
                                                    let chip_id = dom_id("member", &login);
                                                    view! {
                                                        <li class="user-chip" id=chip_id>
                                                            {shown}
                                                            <button
                                                                class="chip-remove"
                                                                on:click=move |_| remove_user(id, login.clone())
                                                            >
                                                                "×"
                                                            </button>
                                                        </li>
                                                    }
                                                }).collect_view()}
                                            </ul>
                                            <ActivityUpload project=id />
                                        </td>
                                    </tr>
                                </Show>
                            }
                        }
                    />
                </tbody>
            </table>

            <p class="board-count">
                {move || format!("{} of {} projects shown", view_rows().len(), state.rows().get().len())}
            </p>

            {move || dialog.get().and_then(|(action, id)| {
                state.rows().get().iter().find(|row| row.id == id).cloned().map(|project| view! {
                    <ProjectDialog
                        action=action
                        project=project
                        state=state
                        on_close=Callback::new(move |_| set_dialog.set(None))
                    />
                })
            })}
        </section>
    }
}
