/// Top-level pages, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Stubs,
    GraphQl,
    Soap,
    Scenarios,
    Requests,
    Recording,
    ImportExport,
    Settings,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Dashboard,
        Page::Stubs,
        Page::GraphQl,
        Page::Soap,
        Page::Scenarios,
        Page::Requests,
        Page::Recording,
        Page::ImportExport,
        Page::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Stubs => "REST Stubs",
            Page::GraphQl => "GraphQL Stubs",
            Page::Soap => "SOAP Stubs",
            Page::Scenarios => "Scenarios",
            Page::Requests => "Request Journal",
            Page::Recording => "Recording",
            Page::ImportExport => "Import / Export",
            Page::Settings => "Settings",
        }
    }

    /// Page for a digit key `1`..=`9`
    pub fn from_hotkey(c: char) -> Option<Page> {
        let idx = c.to_digit(10)? as usize;
        Self::ALL.get(idx.checked_sub(1)?).copied()
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Page {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Page {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing into the current page's search box
    Searching,
    /// Typing into a single text field (editor field, settings, target URL, file path)
    EditingField,
    /// Typing the raw JSON of a stub
    EditingJson,
    /// Scenario state modal is open
    ScenarioModal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTab {
    #[default]
    Request,
    Response,
    Scenarios,
    Advanced,
}

impl EditorTab {
    pub const ALL: [EditorTab; 4] = [
        EditorTab::Request,
        EditorTab::Response,
        EditorTab::Scenarios,
        EditorTab::Advanced,
    ];

    pub fn title(self) -> &'static str {
        match self {
            EditorTab::Request => "Request",
            EditorTab::Response => "Response",
            EditorTab::Scenarios => "Scenarios",
            EditorTab::Advanced => "Advanced",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// How a form field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single line of text
    Line,
    /// Free text over several lines (bodies, lists of rows)
    Multiline,
    /// Enter steps through a fixed set of values
    Cycle,
    /// Enter flips a boolean
    Toggle,
}

impl FieldKind {
    pub fn is_text(self) -> bool {
        matches!(self, FieldKind::Line | FieldKind::Multiline)
    }
}

/// Severity of a one-line status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub tone: Tone,
    pub text: String,
}

impl Flash {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }
}
