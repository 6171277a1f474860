/// Plain-text tool output.
///
/// Results are read by an assistant, so lines stay short and labelled: a headline, then
/// `Label: value` fields, `- ` list items, and trailing `Note:` / `Warning:` lines.
pub(crate) struct TextBuilder {
    out: String,
}

impl TextBuilder {
    #[must_use]
    pub(crate) fn new(headline: &str) -> Self {
        let mut out = String::new();
        out.push_str(headline);
        out.push('\n');
        Self { out }
    }

    #[must_use]
    pub(crate) fn finish(self) -> String {
        self.out.trim_end().to_string()
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    pub(crate) fn push_field(&mut self, label: &str, value: &str) {
        self.push_line(&format!("{label}: {value}"));
    }

    pub(crate) fn push_item(&mut self, text: &str) {
        self.push_line(&format!("- {text}"));
    }

    pub(crate) fn push_note(&mut self, text: &str) {
        self.push_line(&format!("Note: {text}"));
    }

    pub(crate) fn push_warning(&mut self, text: &str) {
        self.push_line(&format!("Warning: {text}"));
    }
}

/// `Name (id)`, or just the id when the name is blank.
pub(crate) fn labelled(name: &str, id: &str) -> String {
    if name.trim().is_empty() {
        id.to_string()
    } else {
        format!("{name} ({id})")
    }
}

pub(crate) fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
