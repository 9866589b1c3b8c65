//! Transport Helper
//!
//! Single-shot JSON POSTs to the portal server: show the blocking indicator,
//! bound the request with a wall-clock timeout, route every failure through
//! the global presenter and surface reply messages as toasts. No retries, no
//! de-duplication of concurrent identical requests.

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use thiserror::Error;
use web_sys::{AbortController, FormData};

use crate::context::AppContext;
use crate::models::Reply;

/// Wall-clock bound on a single request.
const TIMEOUT_MS: u32 = 30_000;

/// Endpoint path contract, preserved byte-for-byte from the server routes.
pub mod endpoints {
    #![allow(dead_code)] // the full route table is the contract; not every path is wired yet

    pub const REGISTRATION_ACCEPT: &str = "admin/registration/accept";
    pub const REGISTRATION_APPROVE: &str = "admin/registration/approve";
    pub const REGISTRATION_CREATE: &str = "admin/registration/create";
    pub const REGISTRATION_REJECT: &str = "admin/registration/reject";
    pub const REGISTRATION_IGNORE: &str = "admin/registration/ignore";
    pub const REGISTRATION_VISA: &str = "admin/registration/visa";

    pub const TASKS_LIST: &str = "admin/tasks/list";
    pub const TASKS_HISTORY: &str = "admin/tasks/history";
    pub const TASKS_ACCEPT: &str = "admin/tasks/accept";
    pub const TASKS_IGNORE: &str = "admin/tasks/ignore";
    pub const TASKS_REJECT: &str = "admin/tasks/reject";
    pub const TASKS_UPDATE: &str = "admin/tasks/update";

    pub const PARTITION_INFO: &str = "admin/partition/info";
    pub const SYS_INFO: &str = "admin/sys/info";

    pub const ADMIN_USER_INFO: &str = "admin/user/info";
    pub const ADMIN_USER_DETAILS_GET: &str = "admin/user/details/get";
    pub const ADMIN_USER_CREATE: &str = "admin/user/create";
    pub const ADMIN_USER_DETAILS_SET: &str = "admin/user/details/set";
    pub const ADMIN_USER_DELETE: &str = "admin/user/delete";
    pub const ADMIN_USER_PURGE: &str = "admin/user/purge";
    pub const ADMIN_USER_PASSWORD: &str = "admin/user/password";

    pub const BOARD_LIST: &str = "board/list";
    pub const BOARD_ACCEPT: &str = "board/accept";
    pub const BOARD_REJECT: &str = "board/reject";
    pub const BOARD_IGNORE: &str = "board/ignore";
    pub const BOARD_ACTIVATE: &str = "board/activate";
    pub const BOARD_TRANSFORM: &str = "board/transform";
    pub const BOARD_HISTORY: &str = "board/history";

    pub const PROJECT_LIST: &str = "project/list";
    pub const PROJECT_ADD_USER: &str = "project/add/user";
    pub const PROJECT_ASSIGN_USER: &str = "project/assign/user";
    pub const PROJECT_ASSIGN_RESPONSIBLE: &str = "project/assign/responsible";
    pub const PROJECT_EXTEND: &str = "project/extend";
    pub const PROJECT_RENEW: &str = "project/renew";
    pub const PROJECT_DELETE_USER: &str = "project/delete/user";
    pub const PROJECT_HISTORY: &str = "project/history";
    pub const PROJECT_REACTIVATE: &str = "project/reactivate";
    pub const PROJECT_TRANSFORM: &str = "project/transform";
    pub const PROJECT_ACTIVITY: &str = "project/activity";
    pub const PROJECT_ACTIVITY_UPLOAD: &str = "project/activity/upload";
    pub const PROJECT_ACTIVITY_CLEAN: &str = "project/activity/clean";
    pub const PROJECT_ACTIVITY_REMOVE: &str = "project/activity/remove";

    pub const PROJECT_MODAL_ALLOCATE: &str = "project/modal/allocate";
    pub const PROJECT_MODAL_TRANSFORM: &str = "project/modal/transform";
    pub const PROJECT_MODAL_ACTIVATE: &str = "project/modal/activate";
    pub const PROJECT_MODAL_ATTACH_USER: &str = "project/modal/attach/user";

    pub const USER_LIST: &str = "user/list";
    pub const USER_EDIT: &str = "user/edit";
    pub const USER_MODAL_EDIT: &str = "user/modal/edit";
    pub const USER_EDIT_INFO: &str = "user/edit/info";
}

/// One task-board endpoint family. The admin registration board and the
/// committee board run the same view-model against different groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskEndpoints {
    pub list: &'static str,
    pub history: &'static str,
    pub accept: &'static str,
    pub ignore: &'static str,
    pub reject: &'static str,
    /// In-place edit of a pending task, where the group supports it.
    pub update: Option<&'static str>,
    /// Lazy extended-detail fetch on first expansion (admin variant).
    pub detail: Option<&'static str>,
    /// Resend-visa action for registration tasks (admin variant).
    pub visa: Option<&'static str>,
}

pub const ADMIN_TASKS: TaskEndpoints = TaskEndpoints {
    list: endpoints::TASKS_LIST,
    history: endpoints::TASKS_HISTORY,
    accept: endpoints::TASKS_ACCEPT,
    ignore: endpoints::TASKS_IGNORE,
    reject: endpoints::TASKS_REJECT,
    update: Some(endpoints::TASKS_UPDATE),
    detail: Some(endpoints::ADMIN_USER_INFO),
    visa: Some(endpoints::REGISTRATION_VISA),
};

pub const COMMITTEE_BOARD: TaskEndpoints = TaskEndpoints {
    list: endpoints::BOARD_LIST,
    history: endpoints::BOARD_HISTORY,
    accept: endpoints::BOARD_ACCEPT,
    ignore: endpoints::BOARD_IGNORE,
    reject: endpoints::BOARD_REJECT,
    update: None,
    detail: None,
    visa: None,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Accept,
    Ignore,
    Reject,
}

impl TaskAction {
    pub fn endpoint(self, group: TaskEndpoints) -> &'static str {
        match self {
            TaskAction::Accept => group.accept,
            TaskAction::Ignore => group.ignore,
            TaskAction::Reject => group.reject,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskAction::Accept => "Accept",
            TaskAction::Ignore => "Ignore",
            TaskAction::Reject => "Reject",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        source: gloo_net::Error,
    },
    #[error("{endpoint} answered {status} {status_text}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("request to {endpoint} timed out after {secs}s")]
    Timeout { endpoint: String, secs: u32 },
    #[error("could not decode the reply from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
}

/// Aborts the fetch once the wall-clock bound elapses.
struct RequestTimer {
    signal: Option<web_sys::AbortSignal>,
    timer: Option<Timeout>,
    fired: Rc<Cell<bool>>,
}

impl RequestTimer {
    fn start() -> Self {
        let fired = Rc::new(Cell::new(false));
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        let timer = controller.map(|controller| {
            let fired = Rc::clone(&fired);
            Timeout::new(TIMEOUT_MS, move || {
                fired.set(true);
                controller.abort();
            })
        });
        Self { signal, timer, fired }
    }

    /// Cancel the pending abort; returns whether it already fired.
    fn finish(self) -> bool {
        if let Some(timer) = self.timer {
            timer.cancel();
        }
        self.fired.get()
    }
}

fn network_error(endpoint: &str, timed_out: bool, source: gloo_net::Error) -> ApiError {
    if timed_out {
        ApiError::Timeout {
            endpoint: endpoint.to_string(),
            secs: TIMEOUT_MS / 1000,
        }
    } else {
        ApiError::Network {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}

async fn read_reply(endpoint: &str, response: Response) -> Result<Reply, ApiError> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: response.status(),
            status_text: response.status_text(),
            body,
        });
    }
    let body = response.text().await.map_err(|source| ApiError::Network {
        endpoint: endpoint.to_string(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Raw JSON POST. Most callers want [`post`], which adds the busy guard and
/// the presenter.
pub async fn send<P: Serialize>(endpoint: &str, payload: &P) -> Result<Reply, ApiError> {
    let timer = RequestTimer::start();
    let request = Request::post(endpoint)
        .abort_signal(timer.signal.as_ref())
        .json(payload)
        .map_err(|source| ApiError::Network {
            endpoint: endpoint.to_string(),
            source,
        })?;
    let result = request.send().await;
    let timed_out = timer.finish();
    let response = result.map_err(|source| network_error(endpoint, timed_out, source))?;
    read_reply(endpoint, response).await
}

/// Form-encoded POST for the legacy endpoints that never moved to JSON.
pub async fn send_form(endpoint: &str, fields: &[(&str, &str)]) -> Result<Reply, ApiError> {
    let body = fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, NON_ALPHANUMERIC),
                utf8_percent_encode(value, NON_ALPHANUMERIC)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    let timer = RequestTimer::start();
    let request = Request::post(endpoint)
        .abort_signal(timer.signal.as_ref())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .map_err(|source| ApiError::Network {
            endpoint: endpoint.to_string(),
            source,
        })?;
    let result = request.send().await;
    let timed_out = timer.finish();
    let response = result.map_err(|source| network_error(endpoint, timed_out, source))?;
    read_reply(endpoint, response).await
}

/// Multipart POST used by the activity-attachment upload.
pub async fn send_multipart(endpoint: &str, form: FormData) -> Result<Reply, ApiError> {
    let timer = RequestTimer::start();
    let request = Request::post(endpoint)
        .abort_signal(timer.signal.as_ref())
        .body(form)
        .map_err(|source| ApiError::Network {
            endpoint: endpoint.to_string(),
            source,
        })?;
    let result = request.send().await;
    let timed_out = timer.finish();
    let response = result.map_err(|source| network_error(endpoint, timed_out, source))?;
    read_reply(endpoint, response).await
}

/// Present the outcome: toast on a message-bearing success, alert on
/// failure. Callers mutate state only when this returns `Some`.
fn finish(ctx: AppContext, result: Result<Reply, ApiError>) -> Option<Reply> {
    match result {
        Ok(reply) => {
            if let Some(text) = reply.text() {
                ctx.notify(text);
            }
            Some(reply)
        }
        Err(err) => {
            ctx.present_error(&err);
            None
        }
    }
}

/// JSON POST with the blocking indicator and the global presenter. The
/// indicator is released on both the success and the failure path.
pub async fn post<P: Serialize>(ctx: AppContext, endpoint: &str, payload: &P) -> Option<Reply> {
    ctx.busy_begin();
    let result = send(endpoint, payload).await;
    ctx.busy_end();
    finish(ctx, result)
}

/// Form-encoded counterpart of [`post`].
pub async fn post_form(ctx: AppContext, endpoint: &str, fields: &[(&str, &str)]) -> Option<Reply> {
    ctx.busy_begin();
    let result = send_form(endpoint, fields).await;
    ctx.busy_end();
    finish(ctx, result)
}

/// Multipart counterpart of [`post`].
pub async fn post_multipart(ctx: AppContext, endpoint: &str, form: FormData) -> Option<Reply> {
    ctx.busy_begin();
    let result = send_multipart(endpoint, form).await;
    ctx.busy_end();
    finish(ctx, result)
}
