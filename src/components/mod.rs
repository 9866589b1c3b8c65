//! UI Components
//!
//! Leptos components for the portal sections and their shared chrome.

mod activity_upload;
mod busy_overlay;
mod modal;
mod project_board;
mod project_dialog;
mod registry;
mod task_board;
mod task_row;
mod toasts;
mod user_dialog;

pub use activity_upload::ActivityUpload;
pub use busy_overlay::BusyOverlay;
pub use modal::Modal;
pub use project_board::ProjectBoard;
pub use project_dialog::{ProjectAction, ProjectDialog};
pub use registry::Registry;
pub use task_board::TaskBoard;
pub use task_row::TaskRow;
pub use toasts::Toasts;
pub use user_dialog::{DeleteDialog, PasswordDialog, UserEditDialog};
