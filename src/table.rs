//! Table View State
//!
//! Per-table ephemeral state: sort column/direction, the (at most one)
//! active filter, and the expanded-row set. Kept outside the DOM so the
//! predicates are testable without a browser. Reset on every reload.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{ProjectRow, UserRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Sort/filter/expansion state for one table widget.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState<C: Copy + PartialEq, F: Copy + PartialEq> {
    pub sort: Option<(C, SortDir)>,
    pub filter: Option<F>,
    pub expanded: BTreeSet<u32>,
}

impl<C: Copy + PartialEq, F: Copy + PartialEq> Default for TableState<C, F> {
    fn default() -> Self {
        Self {
            sort: None,
            filter: None,
            expanded: BTreeSet::new(),
        }
    }
}

impl<C: Copy + PartialEq, F: Copy + PartialEq> TableState<C, F> {
    /// Clicking a header cycles ascending → descending on the same column,
    /// or starts ascending on a new one.
    pub fn toggle_sort(&mut self, column: C) {
        self.sort = match self.sort {
            Some((current, SortDir::Asc)) if current == column => Some((column, SortDir::Desc)),
            Some((current, SortDir::Desc)) if current == column => None,
            _ => Some((column, SortDir::Asc)),
        };
    }

    /// Filter buttons are mutually exclusive: activating one replaces any
    /// other; clicking the active one clears it.
    pub fn toggle_filter(&mut self, filter: F) {
        if self.filter == Some(filter) {
            self.filter = None;
        } else {
            self.filter = Some(filter);
        }
    }

    pub fn toggle_expanded(&mut self, id: u32) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded.contains(&id)
    }
}

// ========================
// Project board columns / filters
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectColumn {
    Name,
    Responsible,
    Consumed,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    Extension,
    Renewal,
    Activation,
    Transformation,
}

impl ProjectFilter {
    pub const ALL: [ProjectFilter; 4] = [
        ProjectFilter::Extension,
        ProjectFilter::Renewal,
        ProjectFilter::Activation,
        ProjectFilter::Transformation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectFilter::Extension => "Extension",
            ProjectFilter::Renewal => "Renewal",
            ProjectFilter::Activation => "Activation",
            ProjectFilter::Transformation => "Transformation",
        }
    }

    pub fn matches(self, row: &ProjectRow) -> bool {
        match self {
            ProjectFilter::Extension => row.extension,
            ProjectFilter::Renewal => row.renewal,
            ProjectFilter::Activation => row.activate,
            ProjectFilter::Transformation => row.transform,
        }
    }
}

pub fn project_cmp(column: ProjectColumn, a: &ProjectRow, b: &ProjectRow) -> Ordering {
    match column {
        ProjectColumn::Name => a.name.cmp(&b.name),
        ProjectColumn::Responsible => a.responsible.cmp(&b.responsible),
        ProjectColumn::Consumed => a.consumed.cmp(&b.consumed),
        ProjectColumn::Created => a.created.cmp(&b.created),
    }
}

/// Rows in display order: filter, then sort. Runs on every store change.
pub fn project_view(
    rows: &[ProjectRow],
    state: &TableState<ProjectColumn, ProjectFilter>,
) -> Vec<ProjectRow> {
    let mut view: Vec<ProjectRow> = rows
        .iter()
        .filter(|row| state.filter.map_or(true, |f| f.matches(row)))
        .cloned()
        .collect();
    if let Some((column, dir)) = state.sort {
        view.sort_by(|a, b| {
            let ord = project_cmp(column, a, b);
            if dir == SortDir::Desc { ord.reverse() } else { ord }
        });
    }
    view
}

// ========================
// Registry columns / filters
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserColumn {
    Login,
    Name,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Responsible,
    Manager,
    Tech,
    Committee,
    Admin,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::User,
        Role::Responsible,
        Role::Manager,
        Role::Tech,
        Role::Committee,
        Role::Admin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Responsible => "Responsible",
            Role::Manager => "Manager",
            Role::Tech => "Tech",
            Role::Committee => "Committee",
            Role::Admin => "Admin",
        }
    }

    pub fn of(self, roles: &crate::models::Roles) -> bool {
        match self {
            Role::User => roles.user,
            Role::Responsible => roles.responsible,
            Role::Manager => roles.manager,
            Role::Tech => roles.tech,
            Role::Committee => roles.committee,
            Role::Admin => roles.admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFilter {
    Active,
    Inactive,
    Role(Role),
}

impl UserFilter {
    pub fn label(self) -> &'static str {
        match self {
            UserFilter::Active => "Active",
            UserFilter::Inactive => "Inactive",
            UserFilter::Role(role) => role.label(),
        }
    }

    pub fn matches(self, row: &UserRow) -> bool {
        match self {
            UserFilter::Active => row.active,
            UserFilter::Inactive => !row.active,
            UserFilter::Role(role) => role.of(&row.roles),
        }
    }
}

pub fn user_cmp(column: UserColumn, a: &UserRow, b: &UserRow) -> Ordering {
    match column {
        UserColumn::Login => a.login.cmp(&b.login),
        UserColumn::Name => (&a.surname, &a.name).cmp(&(&b.surname, &b.name)),
        UserColumn::Email => a.email.cmp(&b.email),
    }
}

pub fn user_view(
    rows: &[UserRow],
    state: &TableState<UserColumn, UserFilter>,
) -> Vec<UserRow> {
    let mut view: Vec<UserRow> = rows
        .iter()
        .filter(|row| state.filter.map_or(true, |f| f.matches(row)))
        .cloned()
        .collect();
    if let Some((column, dir)) = state.sort {
        view.sort_by(|a, b| {
            let ord = user_cmp(column, a, b);
            if dir == SortDir::Desc { ord.reverse() } else { ord }
        });
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Roles;

    fn project(id: u32, name: &str, extension: bool, renewal: bool) -> ProjectRow {
        ProjectRow {
            id,
            name: name.to_string(),
            title: String::new(),
            responsible: String::new(),
            resources: 1000,
            consumed: 0,
            users: Vec::new(),
            active: true,
            extension,
            renewal,
            activate: false,
            transform: false,
            created: String::new(),
        }
    }

    fn user(id: u32, login: &str, active: bool, admin: bool) -> UserRow {
        UserRow {
            id,
            login: login.to_string(),
            name: String::new(),
            surname: String::new(),
            email: format!("{}@example.org", login),
            active,
            roles: Roles { admin, ..Roles::default() },
        }
    }

    #[test]
    fn test_filter_buttons_mutually_exclusive() {
        let mut state: TableState<ProjectColumn, ProjectFilter> = TableState::default();
        state.toggle_filter(ProjectFilter::Extension);
        assert_eq!(state.filter, Some(ProjectFilter::Extension));
        // activating B after A leaves exactly B active
        state.toggle_filter(ProjectFilter::Renewal);
        assert_eq!(state.filter, Some(ProjectFilter::Renewal));
        // clicking the active one clears it
        state.toggle_filter(ProjectFilter::Renewal);
        assert_eq!(state.filter, None);
    }

    #[test]
    fn test_project_view_applies_new_filter_only() {
        let rows = vec![
            project(1, "alpha", true, false),
            project(2, "beta", false, true),
            project(3, "gamma", true, true),
        ];
        let mut state = TableState::default();
        state.toggle_filter(ProjectFilter::Extension);
        state.toggle_filter(ProjectFilter::Renewal);
        let view = project_view(&rows, &state);
        let ids: Vec<u32> = view.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_sort_cycles_asc_desc_off() {
        let mut state: TableState<ProjectColumn, ProjectFilter> = TableState::default();
        state.toggle_sort(ProjectColumn::Name);
        assert_eq!(state.sort, Some((ProjectColumn::Name, SortDir::Asc)));
        state.toggle_sort(ProjectColumn::Name);
        assert_eq!(state.sort, Some((ProjectColumn::Name, SortDir::Desc)));
        state.toggle_sort(ProjectColumn::Name);
        assert_eq!(state.sort, None);
        state.toggle_sort(ProjectColumn::Consumed);
        assert_eq!(state.sort, Some((ProjectColumn::Consumed, SortDir::Asc)));
    }

    #[test]
    fn test_project_view_sorted_desc() {
        let rows = vec![
            project(1, "beta", false, false),
            project(2, "alpha", false, false),
            project(3, "gamma", false, false),
        ];
        let mut state = TableState::default();
        state.toggle_sort(ProjectColumn::Name);
        state.toggle_sort(ProjectColumn::Name);
        let view = project_view(&rows, &state);
        let names: Vec<&str> = view.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["gamma", "beta", "alpha"]);
    }

    #[test]
    fn test_user_filters() {
        let rows = vec![
            user(1, "marie", true, true),
            user(2, "pierre", false, false),
            user(3, "jean", true, false),
        ];
        let mut state: TableState<UserColumn, UserFilter> = TableState::default();
        state.toggle_filter(UserFilter::Inactive);
        assert_eq!(user_view(&rows, &state).len(), 1);
        state.toggle_filter(UserFilter::Role(Role::Admin));
        let view = user_view(&rows, &state);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].login, "marie");
    }

    #[test]
    fn test_expanded_set_toggles() {
        let mut state: TableState<UserColumn, UserFilter> = TableState::default();
        state.toggle_expanded(7);
        assert!(state.is_expanded(7));
        state.toggle_expanded(7);
        assert!(!state.is_expanded(7));
    }
}
