//! Presentation model
//!
//! [`Screen`] implements the interpreter's presenter on top of a typewriter
//! [`TextBox`], the open choice labels and the balance HUD. It keeps a
//! transcript of everything shown so a terminal front end or a test can read
//! it back.

use crate::host::Presenter;
use crate::types::ChoiceOption;

pub mod textbox;

pub use textbox::TextBox;

/// Balance HUD label, two decimals
pub fn format_balance(balance: f64) -> String {
    if balance < 0.0 {
        format!("-${:.2}", balance.abs())
    } else {
        format!("${:.2}", balance)
    }
}

/// Something that appeared on screen
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEntry {
    Text(String),
    Choices(Vec<String>),
    Balance(String),
}

/// Recorded screen state
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    textbox: TextBox,
    choices: Vec<String>,
    balance_label: Option<String>,
    transcript: Vec<ScreenEntry>,
}

impl Screen {
    pub fn new() -> Self {
        Self::with_text_speed(usize::MAX)
    }

    /// Screen whose text box reveals `chars_per_tick` characters per frame
    pub fn with_text_speed(chars_per_tick: usize) -> Self {
        Self {
            textbox: TextBox::new(chars_per_tick),
            choices: Vec::new(),
            balance_label: None,
            transcript: Vec::new(),
        }
    }

    pub fn textbox(&self) -> &TextBox {
        &self.textbox
    }

    /// Full text of the box while it is visible
    pub fn current_text(&self) -> Option<&str> {
        self.textbox
            .is_visible()
            .then(|| self.textbox.full_text())
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn balance_label(&self) -> Option<&str> {
        self.balance_label.as_deref()
    }

    pub fn transcript(&self) -> &[ScreenEntry] {
        &self.transcript
    }

    /// Every text message shown so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|entry| match entry {
                ScreenEntry::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Advance the typewriter by one frame
    pub fn tick(&mut self) {
        self.textbox.tick();
    }

    /// Return everything recorded since the last drain
    pub fn drain_transcript(&mut self) -> Vec<ScreenEntry> {
        std::mem::take(&mut self.transcript)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for Screen {
    fn show_text(&mut self, text: &str) {
        self.textbox.clear();
        self.textbox.set_text(text);
        self.textbox.show();
        if self.textbox.is_typing() && self.textbox.visible_text().is_empty() {
            self.textbox.tick();
        }
        self.transcript.push(ScreenEntry::Text(text.to_string()));
    }

    fn hide_text(&mut self) {
        self.textbox.clear();
        self.textbox.hide();
    }

    fn show_choices(&mut self, options: &[ChoiceOption]) {
        self.choices = options.iter().map(|o| o.label.clone()).collect();
        self.transcript
            .push(ScreenEntry::Choices(self.choices.clone()));
    }

    fn hide_choices(&mut self) {
        self.choices.clear();
    }

    fn refresh_balance(&mut self, balance: f64) {
        let label = format_balance(balance);
        self.transcript.push(ScreenEntry::Balance(label.clone()));
        self.balance_label = Some(label);
    }

    fn is_typing(&self) -> bool {
        self.textbox.is_typing()
    }

    fn skip_typing(&mut self) {
        self.textbox.skip_typing();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_label_has_two_decimals() {
        assert_eq!(format_balance(0.0), "$0.00");
        assert_eq!(format_balance(12.5), "$12.50");
        assert_eq!(format_balance(-3.25), "-$3.25");
    }

    #[test]
    fn instant_screen_never_types() {
        let mut screen = Screen::new();
        screen.show_text("Hi there");
        assert!(!screen.is_typing());
        assert_eq!(screen.current_text(), Some("Hi there"));
    }

    #[test]
    fn slow_screen_types_until_skipped() {
        let mut screen = Screen::with_text_speed(1);
        screen.show_text("Hi there");
        assert!(screen.is_typing());
        assert_eq!(screen.textbox().visible_text(), "H");

        screen.skip_typing();
        assert!(!screen.is_typing());
    }

    #[test]
    fn hide_text_clears_box() {
        let mut screen = Screen::new();
        screen.show_text("Bye");
        screen.hide_text();
        assert_eq!(screen.current_text(), None);
        assert_eq!(screen.texts(), vec!["Bye"]);
    }
}
