//! Form field value objects

/// Wire value submitted while the select still shows its placeholder option
pub const UNSELECTED: &str = "0";

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Text that is masked when rendered
    Secret(String),
    /// Single choice; `None` means the placeholder option is showing
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
    Checkbox(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub value: FieldValue,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, placeholder: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            value: FieldValue::Text(String::new()),
        }
    }

    /// Create a new masked text field
    pub fn secret(name: &str, label: &str, placeholder: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            value: FieldValue::Secret(String::new()),
        }
    }

    /// Create a new select field starting on its placeholder option
    pub fn select(name: &str, label: &str, placeholder: &str, options: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            value: FieldValue::Select {
                options,
                selected: None,
            },
        }
    }

    /// Create a new unchecked checkbox
    pub fn checkbox(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            value: FieldValue::Checkbox(false),
        }
    }

    /// Whether typed characters edit this field
    pub fn accepts_text(&self) -> bool {
        matches!(self.value, FieldValue::Text(_) | FieldValue::Secret(_))
    }

    /// Get the submitted string value.
    ///
    /// Select fields yield the chosen option or [`UNSELECTED`]; checkboxes
    /// yield an empty string.
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) => s,
            FieldValue::Select { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(String::as_str)
                .unwrap_or(UNSELECTED),
            FieldValue::Checkbox(_) => "",
        }
    }

    /// Get the checkbox state (false for every other kind)
    pub fn is_checked(&self) -> bool {
        matches!(self.value, FieldValue::Checkbox(true))
    }

    /// Set the text value, keeping the field's masking
    pub fn set_text(&mut self, value: String) {
        match &mut self.value {
            FieldValue::Secret(s) => *s = value,
            _ => self.value = FieldValue::Text(value),
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) | FieldValue::Secret(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) | FieldValue::Secret(s) = &mut self.value {
            s.pop();
        }
    }

    /// Flip a checkbox; no-op for other kinds
    pub fn toggle(&mut self) {
        if let FieldValue::Checkbox(checked) = &mut self.value {
            *checked = !*checked;
        }
    }

    /// Advance a select to the next option, wrapping through the placeholder
    pub fn next_option(&mut self) {
        if let FieldValue::Select { options, selected } = &mut self.value {
            *selected = match *selected {
                None if !options.is_empty() => Some(0),
                Some(i) if i + 1 < options.len() => Some(i + 1),
                _ => None,
            };
        }
    }

    /// Move a select to the previous option, wrapping through the placeholder
    pub fn prev_option(&mut self) {
        if let FieldValue::Select { options, selected } = &mut self.value {
            *selected = match *selected {
                None => options.len().checked_sub(1),
                Some(0) => None,
                Some(i) => Some(i - 1),
            };
        }
    }

    /// Select the option with the given value; unknown values leave the
    /// placeholder showing
    pub fn select_value(&mut self, value: &str) {
        if let FieldValue::Select { options, selected } = &mut self.value {
            *selected = options.iter().position(|o| o == value);
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) => s.clear(),
            FieldValue::Select { selected, .. } => *selected = None,
            FieldValue::Checkbox(checked) => *checked = false,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Secret(s) => "•".repeat(s.chars().count()),
            FieldValue::Select { options, selected } => selected
                .and_then(|i| options.get(i))
                .cloned()
                .unwrap_or_else(|| self.placeholder.clone()),
            FieldValue::Checkbox(checked) => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                format!("{mark} {}", self.label)
            }
        }
    }
}
