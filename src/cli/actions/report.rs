use crate::{flows::Outcome, ui::Label};

/// Visible page state after an action, one line per element.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    /// Adds `label` if it is currently shown.
    pub fn label(&mut self, name: &str, label: &Label) -> &mut Self {
        if label.is_shown() {
            self.lines.push(format!("{name}: {}", label.text));
        }
        self
    }

    pub fn outcome(&mut self, outcome: &Outcome) -> &mut Self {
        if let Some(target) = outcome.target() {
            self.lines.push(format!("navigate: {target}"));
        }
        self
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }
}
