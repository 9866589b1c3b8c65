//! Project Lifecycle Dialog
//!
//! Confirmation dialog for the state-changing project actions. Pre-filled
//! with contextual text from the matching `project/modal/*` endpoint,
//! validated locally before anything reaches the network, and patching the
//! affected row in place on success.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::endpoints;
use crate::commands;
use crate::components::Modal;
use crate::context::use_app_context;
use crate::format::fmt;
use crate::models::ProjectRow;
use crate::store::{patch_project, ProjectBoardState, ProjectBoardStateStoreFields};
use crate::validate::{is_filled, is_positive_int};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    Extend,
    Renew,
    Transform,
    Activate,
    Reassign,
}

impl ProjectAction {
    pub fn title(self) -> &'static str {
        match self {
            ProjectAction::Extend => "Extend allocation",
            ProjectAction::Renew => "Renew allocation",
            ProjectAction::Transform => "Transform project",
            ProjectAction::Activate => "Activate project",
            ProjectAction::Reassign => "Reassign responsible",
        }
    }

    fn modal_endpoint(self) -> &'static str {
        match self {
            ProjectAction::Extend | ProjectAction::Renew => endpoints::PROJECT_MODAL_ALLOCATE,
            ProjectAction::Transform => endpoints::PROJECT_MODAL_TRANSFORM,
            ProjectAction::Activate => endpoints::PROJECT_MODAL_ACTIVATE,
            ProjectAction::Reassign => endpoints::PROJECT_MODAL_ATTACH_USER,
        }
    }

    fn needs_cpu(self) -> bool {
        matches!(self, ProjectAction::Extend | ProjectAction::Renew)
    }

    fn text_label(self) -> &'static str {
        match self {
            ProjectAction::Reassign => "New responsible login",
            _ => "Motivation",
        }
    }
}

#[component]
pub fn ProjectDialog(
    action: ProjectAction,
    project: ProjectRow,
    state: Store<ProjectBoardState>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let project_id = project.id;
    let project_name = project.name.clone();

    let (context_text, set_context_text) = signal(String::new());
    let (cpu, set_cpu) = signal(String::new());
    let (text, set_text) = signal(String::new());
    let (cpu_invalid, set_cpu_invalid) = signal(false);
    let (text_invalid, set_text_invalid) = signal(false);

    // contextual prefill from the server
    Effect::new(move |_| {
        spawn_local(async move {
            if let Some(prefill) =
                commands::modal_text(ctx, action.modal_endpoint(), project_id).await
            {
                set_context_text.set(prefill);
            }
        });
    });

    let shown_context = move || {
        let prefill = context_text.get();
        if prefill.is_empty() {
            fmt("{0} for project {1}.", &[action.title(), &project_name])
        } else {
            prefill
        }
    };

    let submit = move |_| {
        let cpu_value = cpu.get();
        let text_value = text.get();
        let cpu_ok = !action.needs_cpu() || is_positive_int(&cpu_value);
        let text_ok = is_filled(&text_value);
        set_cpu_invalid.set(!cpu_ok);
        set_text_invalid.set(!text_ok);
        // a failed check blocks here: nothing reaches the network
        if !cpu_ok || !text_ok {
            return;
        }
        let hours: u64 = cpu_value.parse().unwrap_or(0);
        spawn_local(async move {
            let reply = match action {
                ProjectAction::Extend => {
                    commands::project_extend(ctx, project_id, hours, &text_value).await
                }
                ProjectAction::Renew => {
                    commands::project_renew(ctx, project_id, hours, &text_value).await
                }
                ProjectAction::Transform => {
                    commands::project_transform(ctx, project_id, &text_value).await
                }
                ProjectAction::Activate => {
                    commands::project_reactivate(ctx, project_id, &text_value).await
                }
                ProjectAction::Reassign => {
                    commands::assign_responsible(ctx, project_id, &text_value).await
                }
            };
            if reply.is_some() {
                patch_project(&mut state.rows().write(), project_id, |row| match action {
                    ProjectAction::Extend => row.extension = true,
                    ProjectAction::Renew => row.renewal = true,
                    ProjectAction::Transform => row.transform = true,
                    ProjectAction::Activate => {
                        row.active = true;
                        row.activate = false;
                    }
                    ProjectAction::Reassign => row.responsible = text_value.clone(),
                });
                on_close.run(());
            }
            // on failure the alert already fired and the row stays as it was
        });
    };

    view! {
        <Modal title=action.title() on_close=on_close>
            <p class="dialog-context">{shown_context}</p>
            <Show when=move || action.needs_cpu()>
                <label class="dialog-field">
                    "CPU hours"
                    <input
                        type="text"
                        name="cpu"
                        class=move || if cpu_invalid.get() { "field-input warning" } else { "field-input" }
                        prop:value=move || cpu.get()
                        on:input=move |ev| set_cpu.set(event_target_value(&ev))
                    />
                </label>
            </Show>
            <label class="dialog-field">
                {action.text_label()}
                <input
                    type="text"
                    name="comment"
                    class=move || if text_invalid.get() { "field-input warning" } else { "field-input" }
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                />
            </label>
            <div class="dialog-buttons">
                <button class="cancel-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                <button class="confirm-btn" on:click=submit>"Confirm"</button>
            </div>
        </Modal>
    }
}
