//! Registry Dialogs
//!
//! Create/edit, password-reset and purge/delete dialogs for the account
//! registry. Destructive confirmation follows the server: a row disappears
//! only once the reply confirms the deletion.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands::{self, UserDetailsArgs};
use crate::components::Modal;
use crate::context::use_app_context;
use crate::models::UserRow;
use crate::store::{patch_user, remove_user, RegistryState, RegistryStateStoreFields};
use crate::validate::is_filled;

/// Create a new account, or edit an existing one when `user` is set.
#[component]
pub fn UserEditDialog(
    user: Option<UserRow>,
    state: Store<RegistryState>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing = user.as_ref().map(|row| row.id);

    let initial = user.unwrap_or_else(|| UserRow {
        id: 0,
        login: String::new(),
        name: String::new(),
        surname: String::new(),
        email: String::new(),
        active: true,
        roles: Default::default(),
    });
    let (login, set_login) = signal(initial.login);
    let (name, set_name) = signal(initial.name);
    let (surname, set_surname) = signal(initial.surname);
    let (email, set_email) = signal(initial.email);
    let (login_invalid, set_login_invalid) = signal(false);
    let (email_invalid, set_email_invalid) = signal(false);

    // editing re-fetches the authoritative record for the prefill
    Effect::new(move |_| {
        let Some(id) = editing else { return };
        spawn_local(async move {
            if let Some(details) = commands::user_details_get(ctx, id).await {
                set_login.set(details.login);
                set_name.set(details.name);
                set_surname.set(details.surname);
                set_email.set(details.email);
            }
        });
    });

    let submit = move |_| {
        let login_value = login.get();
        let name_value = name.get();
        let surname_value = surname.get();
        let email_value = email.get();
        let login_ok = is_filled(&login_value);
        let email_ok = is_filled(&email_value);
        set_login_invalid.set(!login_ok);
        set_email_invalid.set(!email_ok);
        if !login_ok || !email_ok {
            return;
        }
        spawn_local(async move {
            let details = UserDetailsArgs {
                user: editing,
                login: &login_value,
                name: &name_value,
                surname: &surname_value,
                email: &email_value,
            };
            let saved = if editing.is_some() {
                commands::user_details_set(ctx, &details).await
            } else {
                commands::user_create(ctx, &details).await
            };
            if let Some(row) = saved {
                if editing.is_some() {
                    patch_user(&mut state.rows().write(), row);
                } else {
                    state.rows().write().push(row);
                }
                on_close.run(());
            }
        });
    };

    view! {
        <Modal
            title=if editing.is_some() { "Edit account" } else { "Create account" }
            on_close=on_close
        >
            <label class="dialog-field">
                "Login"
                <input
                    type="text"
                    name="login"
                    class=move || if login_invalid.get() { "field-input warning" } else { "field-input" }
                    prop:value=move || login.get()
                    on:input=move |ev| set_login.set(event_target_value(&ev))
                />
            </label>
            <label class="dialog-field">
                "Name"
                <input
                    type="text"
                    name="name"
                    class="field-input"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
            </label>
            <label class="dialog-field">
                "Surname"
                <input
                    type="text"
                    name="surname"
                    class="field-input"
                    prop:value=move || surname.get()
                    on:input=move |ev| set_surname.set(event_target_value(&ev))
                />
            </label>
            <label class="dialog-field">
                "Email"
                <input
                    type="text"
                    name="email"
                    class=move || if email_invalid.get() { "field-input warning" } else { "field-input" }
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
            </label>
            <div class="dialog-buttons">
                <button class="cancel-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                <button class="confirm-btn" on:click=submit>"Save"</button>
            </div>
        </Modal>
    }
}

/// Server-side password reset; the reply message becomes the toast.
#[component]
pub fn PasswordDialog(
    user: UserRow,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let id = user.id;

    let confirm = move |_| {
        spawn_local(async move {
            if commands::user_password_reset(ctx, id).await.is_some() {
                on_close.run(());
            }
        });
    };

    view! {
        <Modal title="Reset password" on_close=on_close>
            <p class="dialog-context">
                "Reset the password for " <strong>{user.login.clone()}</strong> "?"
            </p>
            <div class="dialog-buttons">
                <button class="cancel-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                <button class="confirm-btn" on:click=confirm>"Reset"</button>
            </div>
        </Modal>
    }
}

/// Delete an account, optionally purging its files. The row leaves the
/// table only when the reply confirms the deletion.
#[component]
pub fn DeleteDialog(
    user: UserRow,
    state: Store<RegistryState>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let id = user.id;
    let (with_files, set_with_files) = signal(false);

    let confirm = move |_| {
        let purge = with_files.get();
        spawn_local(async move {
            if let Some(reply) = commands::user_delete(ctx, id, purge).await {
                if reply.confirmed() {
                    remove_user(&mut state.rows().write(), id);
                    on_close.run(());
                } else {
                    ctx.notify("Deletion was not confirmed by the server");
                }
            }
            // transport failure: alert already shown, the row stays
        });
    };

    view! {
        <Modal title="Delete account" on_close=on_close>
            <p class="dialog-context">
                "Delete the account " <strong>{user.login.clone()}</strong> "? This cannot be undone."
            </p>
            <label class="dialog-field checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || with_files.get()
                    on:change=move |_| set_with_files.update(|value| *value = !*value)
                />
                "Also delete the account's files"
            </label>
            <div class="dialog-buttons">
                <button class="cancel-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                <button class="danger-btn" on:click=confirm>"Delete"</button>
            </div>
        </Modal>
    }
}
