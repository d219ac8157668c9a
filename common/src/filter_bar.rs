use serde::{Deserialize, Serialize};

use crate::filter::{FilterOptions, FilterRequest};

/// Draft filter selection. Nothing is applied until [`FilterBar::submit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterBar {
    draft: FilterRequest,
}

/// One selectable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry<T> {
    pub value: T,
    pub selected: bool,
}

/// The filter bar as the user sees it: every option, with the draft marked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterMenu {
    pub locations: Vec<MenuEntry<String>>,
    pub job_roles: Vec<MenuEntry<String>>,
    pub min_experiences: Vec<MenuEntry<i64>>,
    pub min_base_pays: Vec<MenuEntry<i64>>,
    pub company_name: String,
}

impl FilterBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &FilterRequest {
        &self.draft
    }

    pub fn toggle_location(&mut self, location: &str) {
        if !self.draft.locations.remove(location) {
            self.draft.locations.insert(location.to_string());
        }
    }

    pub fn toggle_job_role(&mut self, role: &str) {
        if !self.draft.job_roles.remove(role) {
            self.draft.job_roles.insert(role.to_string());
        }
    }

    pub fn select_min_experience(&mut self, years: Option<i64>) {
        self.draft.min_experience = years;
    }

    pub fn select_min_base_pay(&mut self, pay: Option<i64>) {
        self.draft.min_base_pay = pay;
    }

    pub fn set_company_name(&mut self, name: impl Into<String>) {
        self.draft.company_name = name.into();
    }

    /// Replaces the whole draft at once.
    pub fn replace(&mut self, draft: FilterRequest) {
        self.draft = draft;
    }

    pub fn clear(&mut self) {
        self.draft = FilterRequest::default();
    }

    pub fn submit(&self) -> FilterRequest {
        self.draft.clone()
    }

    /// Builds the menus for the given options. Numeric menus are sorted
    /// ascending; categorical menus keep the option order.
    pub fn menu(&self, options: &FilterOptions) -> FilterMenu {
        let mut min_experiences = options.min_experiences.clone();
        min_experiences.sort_unstable();
        let mut min_base_pays = options.min_base_pays.clone();
        min_base_pays.sort_unstable();

        FilterMenu {
            locations: options
                .locations
                .iter()
                .map(|value| MenuEntry {
                    selected: self.draft.locations.contains(value),
                    value: value.clone(),
                })
                .collect(),
            job_roles: options
                .job_roles
                .iter()
                .map(|value| MenuEntry {
                    selected: self.draft.job_roles.contains(value),
                    value: value.clone(),
                })
                .collect(),
            min_experiences: min_experiences
                .into_iter()
                .map(|value| MenuEntry {
                    value,
                    selected: self.draft.min_experience == Some(value),
                })
                .collect(),
            min_base_pays: min_base_pays
                .into_iter()
                .map(|value| MenuEntry {
                    value,
                    selected: self.draft.min_base_pay == Some(value),
                })
                .collect(),
            company_name: self.draft.company_name.clone(),
        }
    }
}
