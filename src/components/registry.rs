//! Registry Component
//!
//! Filterable table of user accounts and their ACL flags. Filter buttons
//! narrow by account status or by one role column; a role filter also
//! switches the visible detail columns from status to the ACL flags.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{DeleteDialog, PasswordDialog, UserEditDialog};
use crate::context::use_app_context;
use crate::models::UserRow;
use crate::store::{store_set_users, RegistryState, RegistryStateStoreFields};
use crate::table::{user_view, Role, SortDir, UserColumn, UserFilter};

#[derive(Clone)]
enum RegistryDialog {
    Create,
    Edit(UserRow),
    Password(UserRow),
    Delete(UserRow),
}

#[component]
pub fn Registry() -> impl IntoView {
    let ctx = use_app_context();
    let state = Store::new(RegistryState::default());
    let (dialog, set_dialog) = signal::<Option<RegistryDialog>>(None);
    let close = Callback::new(move |_: ()| set_dialog.set(None));

    let load = move || {
        spawn_local(async move {
            if let Some(rows) = commands::user_list(ctx).await {
                if rows.is_empty() {
                    ctx.notify("No accounts found");
                }
                store_set_users(&state, rows);
            }
        });
    };

    Effect::new(move |_| load());

    let view_rows = move || user_view(&state.rows().get(), &state.table().get());
    let show_roles = move || matches!(state.table().get().filter, Some(UserFilter::Role(_)));

    let sort_by = move |column: UserColumn| state.table().write().toggle_sort(column);
    let sort_marker = move |column: UserColumn| match state.table().get().sort {
        Some((current, SortDir::Asc)) if current == column => " ▲",
        Some((current, SortDir::Desc)) if current == column => " ▼",
        _ => "",
    };

    let filters: Vec<UserFilter> = [UserFilter::Active, UserFilter::Inactive]
        .into_iter()
        .chain(Role::ALL.into_iter().map(UserFilter::Role))
        .collect();

    view! {
        <section class="registry">
            <header class="panel-header">
                <h2>"Registry"</h2>
                <div class="filter-bar">
                    {filters.into_iter().map(|filter| view! {
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
                <button
                    class="create-btn"
                    on:click=move |_| set_dialog.set(Some(RegistryDialog::Create))
                >
                    "Create account"
                </button>
            </header>

            <table class="registry-table">
                <thead>
                    <tr>
                        <th class="sortable" on:click=move |_| sort_by(UserColumn::Login)>
                            "Login" {move || sort_marker(UserColumn::Login)}
                        </th>
                        <th class="sortable" on:click=move |_| sort_by(UserColumn::Name)>
                            "Name" {move || sort_marker(UserColumn::Name)}
                        </th>
                        <th class="sortable" on:click=move |_| sort_by(UserColumn::Email)>
                            "Email" {move || sort_marker(UserColumn::Email)}
                        </th>
                        <Show when=move || !show_roles()>
                            <th>"Status"</th>
                        </Show>
                        <Show when=show_roles>
                            {Role::ALL.iter().map(|role| view! {
                                <th class="role-col">{role.label()}</th>
                            }).collect_view()}
                        </Show>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=view_rows
                        key=|row| (row.id, row.login.clone(), row.email.clone(), row.active, row.roles)
                        children=move |row| {
                            let edit_row = row.clone();
                            let password_row = row.clone();
                            let delete_row = row.clone();
                            let active = row.active;
                            let roles = row.roles;
                            view! {
                                <tr class="registry-row">
                                    <td>{row.login.clone()}</td>
                                    <td>{format!("{} {}", row.surname, row.name)}</td>
                                    <td>{row.email.clone()}</td>
                                    <Show when=move || !show_roles()>
                                        <td class="status-cell">
                                            {if active { "active" } else { "inactive" }}
                                        </td>
                                    </Show>
                                    <Show when=show_roles>
                                        {Role::ALL.iter().map(|role| view! {
                                            <td class="role-cell">
                                                {if role.of(&roles) { "✓" } else { "" }}
                                            </td>
                                        }).collect_view()}
                                    </Show>
                                    <td class="registry-actions">
                                        <button on:click=move |_| {
                                            set_dialog.set(Some(RegistryDialog::Edit(edit_row.clone())))
                                        }>
                                            "Edit"
                                        </button>
                                        <button on:click=move |_| {
                                            set_dialog.set(Some(RegistryDialog::Password(password_row.clone())))
                                        }>
                                            "Password"
                                        </button>
                                        <button class="danger-btn" on:click=move |_| {
                                            set_dialog.set(Some(RegistryDialog::Delete(delete_row.clone())))
                                        }>
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <p class="board-count">
                {move || format!("{} of {} accounts shown", view_rows().len(), state.rows().get().len())}
            </p>

            {move || dialog.get().map(|dialog| match dialog {
                RegistryDialog::Create => view! {
                    <UserEditDialog user=None state=state on_close=close />
                }.into_any(),
                RegistryDialog::Edit(row) => view! {
                    <UserEditDialog user=Some(row) state=state on_close=close />
                }.into_any(),
                RegistryDialog::Password(row) => view! {
                    <PasswordDialog user=row on_close=close />
                }.into_any(),
                RegistryDialog::Delete(row) => view! {
                    <DeleteDialog user=row state=state on_close=close />
                }.into_any(),
            })}
        </section>
    }
}
