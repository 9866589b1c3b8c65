//! Activity Upload Component
//!
//! Drag-and-drop zone for project activity attachments. Client-side caps:
//! 3 files, 3 MB each, image MIME types only; a rejected file never enters
//! the pending set.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::DragEvent;

use crate::commands;
use crate::context::use_app_context;
use crate::validate::check_upload;

#[component]
pub fn ActivityUpload(project: u32) -> impl IntoView {
    let ctx = use_app_context();
    let (files, set_files) = signal(Vec::<web_sys::File>::new());
    let (is_over, set_is_over) = signal(false);

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_over.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_over.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) else {
            return;
        };
        for index in 0..list.length() {
            let Some(file) = list.get(index) else { continue };
            let accepted = files.get_untracked().len();
            match check_upload(accepted, &file.name(), file.size(), &file.type_()) {
                Ok(()) => set_files.update(|pending| pending.push(file)),
                Err(err) => ctx.alert(&err.to_string()),
            }
        }
    };

    let remove = move |name: String| {
        set_files.update(|pending| pending.retain(|file| file.name() != name));
    };

    let upload = move |_| {
        let pending = files.get_untracked();
        if pending.is_empty() {
            ctx.notify("Nothing to upload");
            return;
        }
        spawn_local(async move {
            if commands::activity_upload(ctx, project, &pending).await.is_some() {
                set_files.set(Vec::new());
            }
        });
    };

    let clean = move |_| {
        spawn_local(async move {
            let _ = commands::activity_clean(ctx, project).await;
        });
    };

    view! {
        <div class="activity-upload">
            <div
                class=move || if is_over.get() { "upload-zone active" } else { "upload-zone" }
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
            >
                "Drop activity images here (max 3 files, 3 MB each)"
            </div>
            <ul class="upload-pending">
                <For
                    each=move || { files.get().iter().map(|f| f.name()).collect::<Vec<_>>() }
                    key=|name| name.clone()
                    children=move |name| {
                        let remove_name = name.clone();
                        view! {
                            <li class="upload-chip">
                                {name.clone()}
                                <button
                                    class="chip-remove"
                                    on:click=move |_| remove(remove_name.clone())
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
            <div class="upload-controls">
                <button class="upload-btn" on:click=upload>"Upload"</button>
                <button class="clean-btn" on:click=clean>"Clean activity"</button>
            </div>
        </div>
    }
}
