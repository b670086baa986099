//! Task entry form: five single-line fields and task construction.

use chrono::NaiveDate;
use taskpilot_proto::task::{DUE_DATE_FORMAT, Task};

use crate::editor::byte_index;

/// Default maximum title length in characters.
pub const DEFAULT_MAX_TITLE_LEN: usize = 256;

/// Errors raised when submitting the form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    /// The title is empty after trimming.
    #[error("Title is required")]
    TitleRequired,
}

/// The five form fields, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Task title (required).
    Title,
    /// Due date as `YYYY-MM-DD`.
    DueDate,
    /// Integer importance.
    Importance,
    /// Estimated hours.
    EstimatedHours,
    /// Comma-separated dependency titles.
    Dependencies,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::DueDate,
        Self::Importance,
        Self::EstimatedHours,
        Self::Dependencies,
    ];

    /// Label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::DueDate => "Due date",
            Self::Importance => "Importance",
            Self::EstimatedHours => "Hours",
            Self::Dependencies => "Depends on",
        }
    }

    /// Placeholder hint shown when the field is empty.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Title => "required",
            Self::DueDate => "YYYY-MM-DD",
            Self::Importance => "1-10",
            Self::EstimatedHours => "e.g. 3",
            Self::Dependencies => "Task A, Task B",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::DueDate => 1,
            Self::Importance => 2,
            Self::EstimatedHours => 3,
            Self::Dependencies => 4,
        }
    }

    /// The following field, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The preceding field, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Form state: field values, focused field and cursor.
#[derive(Debug, Clone)]
pub struct TaskForm {
    values: [String; 5],
    focus: FormField,
    cursor: usize,
    max_title_len: usize,
}

impl TaskForm {
    /// Creates an empty form focused on the title.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Default::default(),
            focus: FormField::Title,
            cursor: 0,
            max_title_len: DEFAULT_MAX_TITLE_LEN,
        }
    }

    /// Sets the maximum number of characters accepted in the title field.
    #[must_use]
    pub const fn with_max_title_len(mut self, max: usize) -> Self {
        self.max_title_len = max;
        self
    }

    /// Current text of a field.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    /// Overwrites a field and moves the cursor to its end if it is focused.
    pub fn set_value(&mut self, field: FormField, text: impl Into<String>) {
        self.values[field.index()] = text.into();
        if field == self.focus {
            self.cursor = self.values[field.index()].chars().count();
        }
    }

    /// The focused field.
    #[must_use]
    pub const fn focus(&self) -> FormField {
        self.focus
    }

    /// Cursor position in the focused field (characters).
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Focuses a field, placing the cursor at its end.
    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
        self.cursor = self.value(field).chars().count();
    }

    /// Focuses the next field.
    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    /// Focuses the previous field.
    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    fn focused_mut(&mut self) -> &mut String {
        &mut self.values[self.focus.index()]
    }

    /// Inserts a character at the cursor. Title input beyond the maximum
    /// length is ignored.
    pub fn enter_char(&mut self, c: char) {
        if self.focus == FormField::Title
            && self.value(FormField::Title).chars().count() >= self.max_title_len
        {
            return;
        }
        let cursor = self.cursor;
        let value = self.focused_mut();
        let at = byte_index(value, cursor);
        value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        let value = self.focused_mut();
        let at = byte_index(value, cursor - 1);
        value.remove(at);
        self.cursor -= 1;
    }

    /// Moves the cursor left.
    pub const fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value(self.focus).chars().count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start of the field.
    pub const fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the field.
    pub fn move_cursor_end(&mut self) {
        self.cursor = self.value(self.focus).chars().count();
    }

    /// Builds a task from the current field values.
    ///
    /// Only the title is validated. Unparseable optional fields become absent.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::TitleRequired`] if the trimmed title is empty.
    pub fn build_task(&self) -> Result<Task, FormError> {
        let title = self.value(FormField::Title).trim();
        if title.is_empty() {
            return Err(FormError::TitleRequired);
        }

        let mut task = Task::new(title);
        task.due_date = parse_due_date(self.value(FormField::DueDate));
        task.importance = parse_importance(self.value(FormField::Importance));
        task.estimated_hours = parse_hours(self.value(FormField::EstimatedHours));
        task.dependencies = split_dependencies(self.value(FormField::Dependencies));
        Ok(task)
    }

    /// Clears every field and focuses the title.
    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
        self.focus = FormField::Title;
        self.cursor = 0;
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a `YYYY-MM-DD` date; anything else is absent.
#[must_use]
pub fn parse_due_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DUE_DATE_FORMAT).ok()
}

/// Parses an integer importance; anything else is absent.
#[must_use]
pub fn parse_importance(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Parses a finite, non-negative number of hours; anything else is absent.
#[must_use]
pub fn parse_hours(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite() && *h >= 0.0)
}

/// Splits comma-separated dependencies, trimming and dropping empty entries.
#[must_use]
pub fn split_dependencies(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}
