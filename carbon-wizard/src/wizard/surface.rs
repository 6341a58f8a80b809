//! Rendering surface contract for the wizard.
//!
//! The controller never draws anything itself: it pushes visibility, progress, button state,
//! inline field errors and notifications into a [`FormSurface`]. The terminal UI renders from a
//! [`MemorySurface`]; tests assert against the same type.

use std::collections::{BTreeMap, BTreeSet};

const MAX_NOTICES: usize = 20;

/// State of the forward navigation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NextButton {
    #[default]
    Next,
    /// Last section: the button submits the form.
    Calculate,
}

impl NextButton {
    pub fn label(&self) -> &'static str {
        match self {
            NextButton::Next => "Next",
            NextButton::Calculate => "Calculate",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            NextButton::Next => "btn-next",
            NextButton::Calculate => "btn-submit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait FormSurface {
    fn show_section(&mut self, index: usize, visible: bool);
    /// Progress indicator width and accessibility value, in percent.
    fn set_progress(&mut self, percent: f64);
    fn set_back_visible(&mut self, visible: bool);
    fn set_next_button(&mut self, button: NextButton);
    /// Remove every inline validation message and invalid marker.
    fn clear_validation(&mut self);
    fn mark_invalid(&mut self, field: &str, message: &str);
    fn notify(&mut self, notice: Notice);
    fn navigate(&mut self, url: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub visible_sections: BTreeSet<usize>,
    pub progress: f64,
    pub progress_value: String,
    pub back_visible: bool,
    pub next_button: NextButton,
    pub field_errors: BTreeMap<String, Vec<String>>,
    pub notices: Vec<Notice>,
    pub navigated_to: Option<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_sections.len()
    }

    pub fn errors_for(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        !self.errors_for(field).is_empty()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl FormSurface for MemorySurface {
    fn show_section(&mut self, index: usize, visible: bool) {
        if visible {
            self.visible_sections.insert(index);
        } else {
            self.visible_sections.remove(&index);
        }
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = percent;
        self.progress_value = format!("{}", percent);
    }

    fn set_back_visible(&mut self, visible: bool) {
        self.back_visible = visible;
    }

    fn set_next_button(&mut self, button: NextButton) {
        self.next_button = button;
    }

    fn clear_validation(&mut self) {
        self.field_errors.clear();
    }

    fn mark_invalid(&mut self, field: &str, message: &str) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let start = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..start);
        }
    }

    fn navigate(&mut self, url: &str) {
        self.navigated_to = Some(url.to_string());
    }
}
