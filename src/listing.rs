//! View state shared by the three stub list pages
//!
//! Filtering is client-side over the full collection: a case-insensitive
//! substring match on the name or a per-protocol secondary field, plus an
//! optional exact method filter.

use crate::model::{GraphQlStub, SoapStub, Stub};

/// Method filter choices, cycled with one key
pub const METHOD_FILTERS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "PATCH"];

pub trait Listable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    /// URL, operation name or SOAP action
    fn secondary(&self) -> &str;
    fn method(&self) -> Option<&str> {
        None
    }
}

impl Listable for Stub {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn secondary(&self) -> &str {
        self.request.display_url()
    }
    fn method(&self) -> Option<&str> {
        if self.request.method.is_empty() {
            None
        } else {
            Some(&self.request.method)
        }
    }
}

impl Listable for GraphQlStub {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn secondary(&self) -> &str {
        &self.operation_name
    }
}

impl Listable for SoapStub {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn secondary(&self) -> &str {
        &self.soap_action
    }
}

/// Two-press delete confirmation for one list.
///
/// At most one row is armed; arming a row disarms any other. Pressing delete
/// on the armed row confirms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteConfirm {
    armed: Option<String>,
}

impl DeleteConfirm {
    /// Returns true when this press confirms the delete of `id`
    pub fn press(&mut self, id: &str) -> bool {
        if self.armed.as_deref() == Some(id) {
            self.armed = None;
            true
        } else {
            self.armed = Some(id.to_string());
            false
        }
    }

    pub fn is_armed(&self, id: &str) -> bool {
        self.armed.as_deref() == Some(id)
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub search: String,
    pub method: Option<String>,
    pub selected: usize,
    pub confirm: DeleteConfirm,
}

impl ListView {
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || item.name().to_lowercase().contains(&needle)
            || item.secondary().to_lowercase().contains(&needle);

        let matches_method = match &self.method {
            None => true,
            Some(method) => item.method() == Some(method.as_str()),
        };

        matches_search && matches_method
    }

    pub fn filter<'a, T: Listable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// none -> GET -> POST -> ... -> PATCH -> none
    pub fn cycle_method(&mut self) {
        self.method = match &self.method {
            None => Some(METHOD_FILTERS[0].to_string()),
            Some(current) => METHOD_FILTERS
                .iter()
                .position(|m| m == current)
                .and_then(|idx| METHOD_FILTERS.get(idx + 1))
                .map(|m| m.to_string()),
        };
        self.selected = 0;
        self.confirm.disarm();
    }

    pub fn select_next(&mut self, visible: usize) {
        if visible > 0 && self.selected + 1 < visible {
            self.selected += 1;
        }
        self.confirm.disarm();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.confirm.disarm();
    }

    /// Keep the cursor inside the filtered list after it shrinks
    pub fn clamp(&mut self, visible: usize) {
        if visible == 0 {
            self.selected = 0;
        } else if self.selected >= visible {
            self.selected = visible - 1;
        }
    }

    pub fn selected_item<'a, T: Listable>(&self, items: &'a [T]) -> Option<&'a T> {
        self.filter(items).get(self.selected).copied()
    }
}
