//! Endpoint Command Wrappers
//!
//! Typed bindings over the transport helper, one function per server
//! operation. Every wrapper presents its own failure; callers only see
//! `Some` on a confirmed success.

use serde::Serialize;

use crate::api::{self, endpoints, TaskAction, TaskEndpoints};
use crate::context::AppContext;
use crate::models::{PartitionInfo, ProjectRow, Reply, Task, TaskDetail, UserRow};

// ========================
// Command Argument Structs
// ========================

#[derive(Serialize)]
pub struct TaskArgs {
    pub task: u32,
}

#[derive(Serialize)]
pub struct TaskUpdateArgs<'a> {
    pub task: u32,
    pub status: &'a str,
    pub decision: &'a str,
}

#[derive(Serialize)]
pub struct ProjectArgs {
    pub project: u32,
}

#[derive(Serialize)]
pub struct ProjectCpuArgs<'a> {
    pub project: u32,
    pub cpu: u64,
    pub comment: &'a str,
}

#[derive(Serialize)]
pub struct ProjectCommentArgs<'a> {
    pub project: u32,
    pub comment: &'a str,
}

#[derive(Serialize)]
pub struct ProjectUserArgs<'a> {
    pub project: u32,
    pub user: &'a str,
}

#[derive(Serialize)]
pub struct UserArgs {
    pub user: u32,
}

#[derive(Serialize)]
pub struct UserDetailsArgs<'a> {
    pub user: Option<u32>,
    pub login: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
}

fn log_loaded(what: &str, count: usize) {
    web_sys::console::log_1(&format!("[API] Loaded {} {}", count, what).into());
}

/// Decode a typed list out of a reply, presenting a decode failure the same
/// way the transport does.
fn decode_list<T: serde::de::DeserializeOwned>(
    ctx: AppContext,
    endpoint: &str,
    reply: &Reply,
) -> Option<Vec<T>> {
    match reply.list() {
        Ok(list) => Some(list),
        Err(source) => {
            ctx.present_error(&api::ApiError::Decode {
                endpoint: endpoint.to_string(),
                source,
            });
            None
        }
    }
}

fn decode_record<T: serde::de::DeserializeOwned>(
    ctx: AppContext,
    endpoint: &str,
    reply: &Reply,
) -> Option<T> {
    match reply.record() {
        Ok(record) => Some(record),
        Err(source) => {
            ctx.present_error(&api::ApiError::Decode {
                endpoint: endpoint.to_string(),
                source,
            });
            None
        }
    }
}

// ========================
// Task / Board Commands
// ========================

/// Pending or historic task list for one endpoint group.
pub async fn task_list(
    ctx: AppContext,
    group: TaskEndpoints,
    history: bool,
) -> Option<Vec<Task>> {
    let endpoint = if history { group.history } else { group.list };
    let reply = api::post(ctx, endpoint, &serde_json::json!({})).await?;
    let tasks = decode_list(ctx, endpoint, &reply)?;
    log_loaded("tasks", tasks.len());
    Some(tasks)
}

/// Apply accept/ignore/reject to one task; the reply carries the remaining
/// pending count.
pub async fn task_act(
    ctx: AppContext,
    group: TaskEndpoints,
    action: TaskAction,
    task: u32,
) -> Option<Reply> {
    api::post(ctx, action.endpoint(group), &TaskArgs { task }).await
}

pub async fn task_update(
    ctx: AppContext,
    endpoint: &'static str,
    task: u32,
    status: &str,
    decision: &str,
) -> Option<Reply> {
    api::post(ctx, endpoint, &TaskUpdateArgs { task, status, decision }).await
}

/// Lazy extended detail for one task (admin variant only).
pub async fn task_detail(
    ctx: AppContext,
    endpoint: &'static str,
    task: u32,
) -> Option<TaskDetail> {
    let reply = api::post(ctx, endpoint, &TaskArgs { task }).await?;
    decode_record(ctx, endpoint, &reply)
}

pub async fn visa_resend(ctx: AppContext, endpoint: &'static str, task: u32) -> Option<Reply> {
    api::post(ctx, endpoint, &TaskArgs { task }).await
}

// ========================
// Project Commands
// ========================

pub async fn project_list(ctx: AppContext) -> Option<Vec<ProjectRow>> {
    let reply = api::post(ctx, endpoints::PROJECT_LIST, &serde_json::json!({})).await?;
    let projects = decode_list(ctx, endpoints::PROJECT_LIST, &reply)?;
    log_loaded("projects", projects.len());
    Some(projects)
}

pub async fn partition_info(ctx: AppContext) -> Option<PartitionInfo> {
    let reply = api::post(ctx, endpoints::PARTITION_INFO, &serde_json::json!({})).await?;
    decode_record(ctx, endpoints::PARTITION_INFO, &reply)
}

/// Contextual text shown at the top of a lifecycle dialog. Uses the raw
/// transport: the returned string is dialog content, not a notification.
pub async fn modal_text(ctx: AppContext, endpoint: &'static str, project: u32) -> Option<String> {
    ctx.busy_begin();
    let result = api::send(endpoint, &ProjectArgs { project }).await;
    ctx.busy_end();
    match result {
        Ok(reply) => Some(reply.data.as_str().unwrap_or_default().to_string()),
        Err(err) => {
            ctx.present_error(&err);
            None
        }
    }
}

pub async fn project_extend(
    ctx: AppContext,
    project: u32,
    cpu: u64,
    comment: &str,
) -> Option<Reply> {
    api::post(ctx, endpoints::PROJECT_EXTEND, &ProjectCpuArgs { project, cpu, comment }).await
}

pub async fn project_renew(
    ctx: AppContext,
    project: u32,
    cpu: u64,
    comment: &str,
) -> Option<Reply> {
    api::post(ctx, endpoints::PROJECT_RENEW, &ProjectCpuArgs { project, cpu, comment }).await
}

pub async fn project_transform(ctx: AppContext, project: u32, comment: &str) -> Option<Reply> {
    api::post(
        ctx,
        endpoints::PROJECT_TRANSFORM,
        &ProjectCommentArgs { project, comment },
    )
    .await
}

pub async fn project_reactivate(ctx: AppContext, project: u32, comment: &str) -> Option<Reply> {
    api::post(
        ctx,
        endpoints::PROJECT_REACTIVATE,
        &ProjectCommentArgs { project, comment },
    )
    .await
}

pub async fn assign_responsible(ctx: AppContext, project: u32, user: &str) -> Option<Reply> {
    api::post(
        ctx,
        endpoints::PROJECT_ASSIGN_RESPONSIBLE,
        &ProjectUserArgs { project, user },
    )
    .await
}

pub async fn project_delete_user(ctx: AppContext, project: u32, user: &str) -> Option<Reply> {
    api::post(
        ctx,
        endpoints::PROJECT_DELETE_USER,
        &ProjectUserArgs { project, user },
    )
    .await
}

// ========================
// Activity Attachment Commands
// ========================

pub async fn activity_upload(
    ctx: AppContext,
    project: u32,
    files: &[web_sys::File],
) -> Option<Reply> {
    let form = web_sys::FormData::new().ok()?;
    let _ = form.append_with_str("project", &project.to_string());
    for file in files {
        let _ = form.append_with_blob_and_filename("files[]", file, &file.name());
    }
    api::post_multipart(ctx, endpoints::PROJECT_ACTIVITY_UPLOAD, form).await
}

pub async fn activity_clean(ctx: AppContext, project: u32) -> Option<Reply> {
    api::post(ctx, endpoints::PROJECT_ACTIVITY_CLEAN, &ProjectArgs { project }).await
}

// ========================
// Registry Commands
// ========================

pub async fn user_list(ctx: AppContext) -> Option<Vec<UserRow>> {
    let reply = api::post(ctx, endpoints::USER_LIST, &serde_json::json!({})).await?;
    let users = decode_list(ctx, endpoints::USER_LIST, &reply)?;
    log_loaded("users", users.len());
    Some(users)
}

pub async fn user_create(ctx: AppContext, details: &UserDetailsArgs<'_>) -> Option<UserRow> {
    let reply = api::post(ctx, endpoints::ADMIN_USER_CREATE, details).await?;
    decode_record(ctx, endpoints::ADMIN_USER_CREATE, &reply)
}

pub async fn user_details_get(ctx: AppContext, user: u32) -> Option<UserRow> {
    let reply = api::post(ctx, endpoints::ADMIN_USER_DETAILS_GET, &UserArgs { user }).await?;
    decode_record(ctx, endpoints::ADMIN_USER_DETAILS_GET, &reply)
}

pub async fn user_details_set(ctx: AppContext, details: &UserDetailsArgs<'_>) -> Option<UserRow> {
    let reply = api::post(ctx, endpoints::ADMIN_USER_DETAILS_SET, details).await?;
    decode_record(ctx, endpoints::ADMIN_USER_DETAILS_SET, &reply)
}

/// Legacy endpoint, still form-encoded.
pub async fn user_password_reset(ctx: AppContext, user: u32) -> Option<Reply> {
    let user_field = user.to_string();
    api::post_form(ctx, endpoints::ADMIN_USER_PASSWORD, &[("user", user_field.as_str())]).await
}

/// Delete an account; `with_files` selects the purge endpoint that also
/// removes the account's files.
pub async fn user_delete(ctx: AppContext, user: u32, with_files: bool) -> Option<Reply> {
    let endpoint = if with_files {
        endpoints::ADMIN_USER_PURGE
    } else {
        endpoints::ADMIN_USER_DELETE
    };
    api::post(ctx, endpoint, &UserArgs { user }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_payload_carries_no_cpu_field() {
        let value = serde_json::to_value(ProjectCommentArgs {
            project: 5,
            comment: "retired hardware",
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"project": 5, "comment": "retired hardware"})
        );
    }

    #[test]
    fn test_allocation_payload_carries_cpu_field() {
        let value = serde_json::to_value(ProjectCpuArgs {
            project: 5,
            cpu: 50_000,
            comment: "yearly extension",
        })
        .unwrap();
        assert_eq!(value["cpu"], 50_000);
    }
}
