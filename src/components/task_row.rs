//! Task Row Component
//!
//! One summary row plus one detail row per task, both keyed by the task id.
//! The detail row is hidden until expanded; in the admin variant the first
//! expansion lazily fetches extended detail with a three-state glyph
//! (plus / spinner / minus).

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::{TaskAction, TaskEndpoints};
use crate::commands;
use crate::context::use_app_context;
use crate::format::{capitalize, opt_text};
use crate::models::Decision;
use crate::store::{
    detail_of, expansion_of, patch_entry, set_detail, set_expansion, Expansion, TaskBoardState,
    TaskBoardStateStoreFields, TaskEntry,
};

const STATUS_OPTIONS: [&str; 3] = ["pending", "in review", "processed"];
const DECISION_OPTIONS: [&str; 4] = ["none", "accept", "ignore", "reject"];

#[component]
pub fn TaskRow(
    entry: TaskEntry,
    group: TaskEndpoints,
    state: Store<TaskBoardState>,
    history: ReadSignal<bool>,
    #[prop(into)] on_act: Callback<(TaskAction, u32)>,
) -> impl IntoView {
    let ctx = use_app_context();

    let id = entry.task.id;
    let expansion = entry.expansion;
    let decision = entry.task.decision;
    let actionable = move || !history.get() && decision == Decision::None;

    // Consult the store, not the render-time snapshot: a double click must
    // see the Loading state the first click set.
    let on_toggle = move |_| match expansion_of(&state.entries().get(), id) {
        Expansion::Expanded => {
            set_expansion(&mut state.entries().write(), id, Expansion::Collapsed);
        }
        // fetch already in flight
        Expansion::Loading => {}
        Expansion::Collapsed => match group.detail {
            Some(endpoint) if detail_of(&state.entries().get(), id).is_none() => {
                set_expansion(&mut state.entries().write(), id, Expansion::Loading);
                spawn_local(async move {
                    match commands::task_detail(ctx, endpoint, id).await {
                        Some(detail) => {
                            set_detail(&mut state.entries().write(), id, detail);
                            set_expansion(&mut state.entries().write(), id, Expansion::Expanded);
                        }
                        // failed fetch: back to "+", never a stuck spinner
                        None => {
                            set_expansion(&mut state.entries().write(), id, Expansion::Collapsed);
                        }
                    }
                });
            }
            _ => set_expansion(&mut state.entries().write(), id, Expansion::Expanded),
        },
    };

    // In-place edit of the pending task, where the group supports it.
    let (edit_status, set_edit_status) = signal(entry.task.status.clone());
    let (edit_decision, set_edit_decision) = signal(decision.as_str().to_string());
    let save_edit = move |_| {
        let Some(endpoint) = group.update else {
            return;
        };
        let status = edit_status.get();
        let decision_text = edit_decision.get();
        spawn_local(async move {
            if commands::task_update(ctx, endpoint, id, &status, &decision_text)
                .await
                .is_some()
            {
                patch_entry(
                    &mut state.entries().write(),
                    id,
                    &status,
                    Decision::parse(&decision_text),
                );
            }
        });
    };

    let resend_visa = move |_| {
        let Some(endpoint) = group.visa else {
            return;
        };
        spawn_local(async move {
            // a success message arrives in the reply and becomes a toast
            let _ = commands::visa_resend(ctx, endpoint, id).await;
        });
    };

    let is_registration = entry.task.action == "registration";
    let description = entry.task.description.clone();
    let detail = entry.detail.clone();

    view! {
        <tr class="task-row" id=format!("task-{}", id)>
            <td>
                <button class="expand-btn" on:click=on_toggle>
                    {expansion.glyph()}
                </button>
            </td>
            <td>{capitalize(&entry.task.action)}</td>
            <td>{entry.task.entity.clone()}</td>
            <td>{entry.task.author.clone()}</td>
            <td>{entry.task.created.clone()}</td>
            <td class="task-status">
                <span class="decision-icon">{decision.icon()}</span>
                " "
                {entry.task.status.clone()}
            </td>
            <td class="task-actions">
                <Show when=actionable>
                    <button class="accept-btn" on:click=move |_| on_act.run((TaskAction::Accept, id))>
                        "Accept"
                    </button>
                    <button class="ignore-btn" on:click=move |_| on_act.run((TaskAction::Ignore, id))>
                        "Ignore"
                    </button>
                    <button class="reject-btn" on:click=move |_| on_act.run((TaskAction::Reject, id))>
                        "Reject"
                    </button>
                </Show>
            </td>
        </tr>
        <Show when=move || expansion == Expansion::Expanded>
            <tr class="task-detail" id=format!("task-{}-detail", id)>
                <td colspan="7">
                    <p class="task-description">{opt_text(&description).to_string()}</p>
                    {detail.clone().map(|detail| view! {
                        <dl class="task-detail-fields">
                            <dt>"Detail"</dt>
                            <dd>{opt_text(&detail.text).to_string()}</dd>
                            <dt>"Email"</dt>
                            <dd>{opt_text(&detail.email).to_string()}</dd>
                            <dt>"Phone"</dt>
                            <dd>{opt_text(&detail.phone).to_string()}</dd>
                            <dt>"Organization"</dt>
                            <dd>{opt_text(&detail.organization).to_string()}</dd>
                        </dl>
                    })}
                    <Show when=move || group.update.is_some() && actionable()>
                        <div class="task-edit">
                            <label>
                                "Status"
                                <select
                                    name="status"
                                    prop:value=move || edit_status.get()
                                    on:change=move |ev| set_edit_status.set(event_target_value(&ev))
                                >
                                    {STATUS_OPTIONS.iter().map(|option| view! {
                                        <option value=*option>{*option}</option>
                                    }).collect_view()}
                                </select>
                            </label>
                            <label>
                                "Decision"
                                <select
                                    name="decision"
                                    prop:value=move || edit_decision.get()
                                    on:change=move |ev| set_edit_decision.set(event_target_value(&ev))
                                >
                                    {DECISION_OPTIONS.iter().map(|option| view! {
                                        <option value=*option>{*option}</option>
                                    }).collect_view()}
                                </select>
                            </label>
                            <button class="save-btn" on:click=save_edit>"Save"</button>
                        </div>
                    </Show>
                    <Show when=move || group.visa.is_some() && is_registration>
                        <button class="visa-btn" on:click=resend_visa>"Resend visa"</button>
                    </Show>
                </td>
            </tr>
        </Show>
    }
}
