//! Request journal filtering and ordering

use crate::model::RequestLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }
}

/// Status filter choices: first digit of the response status
pub const STATUS_FILTERS: [&str; 4] = ["2", "3", "4", "5"];

#[derive(Debug, Clone, Default)]
pub struct JournalView {
    pub search: String,
    pub method: Option<String>,
    pub status_prefix: Option<String>,
    pub order: SortOrder,
    pub selected: usize,
    /// Detail panel open for the selected entry
    pub show_details: bool,
}

impl JournalView {
    pub fn matches(&self, log: &RequestLog) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = log.request.url.to_lowercase().contains(&needle)
            || log.request.method.to_lowercase().contains(&needle);

        let matches_method = self
            .method
            .as_ref()
            .map_or(true, |m| &log.request.method == m);

        let matches_status = self.status_prefix.as_ref().map_or(true, |prefix| {
            log.response_definition
                .status
                .to_string()
                .starts_with(prefix.as_str())
        });

        matches_search && matches_method && matches_status
    }

    /// Filtered entries sorted by timestamp in the current order
    pub fn apply<'a>(&self, logs: &'a [RequestLog]) -> Vec<&'a RequestLog> {
        let mut out: Vec<&RequestLog> = logs.iter().filter(|l| self.matches(l)).collect();
        out.sort_by(|a, b| match (a.parsed_timestamp(), b.parsed_timestamp()) {
            (Some(x), Some(y)) => match self.order {
                SortOrder::Ascending => x.cmp(&y),
                SortOrder::Descending => y.cmp(&x),
            },
            _ => a.cmp_timestamp(b),
        });
        out
    }

    pub fn cycle_status(&mut self) {
        self.status_prefix = match &self.status_prefix {
            None => Some(STATUS_FILTERS[0].to_string()),
            Some(current) => STATUS_FILTERS
                .iter()
                .position(|s| s == current)
                .and_then(|idx| STATUS_FILTERS.get(idx + 1))
                .map(|s| s.to_string()),
        };
        self.selected = 0;
    }

    pub fn cycle_method(&mut self) {
        use crate::listing::METHOD_FILTERS;
        self.method = match &self.method {
            None => Some(METHOD_FILTERS[0].to_string()),
            Some(current) => METHOD_FILTERS
                .iter()
                .position(|m| m == current)
                .and_then(|idx| METHOD_FILTERS.get(idx + 1))
                .map(|m| m.to_string()),
        };
        self.selected = 0;
    }

    pub fn toggle_order(&mut self) {
        self.order = self.order.toggle();
    }

    pub fn selected_entry<'a>(&self, logs: &'a [RequestLog]) -> Option<&'a RequestLog> {
        self.apply(logs).get(self.selected).copied()
    }
}
