//! Dialogue text box with typewriter reveal

/// The box at the bottom of the screen that shows dialogue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBox {
    visible: bool,
    text: String,
    revealed: usize,
    chars_per_tick: usize,
}

impl TextBox {
    pub fn new(chars_per_tick: usize) -> Self {
        Self {
            chars_per_tick: chars_per_tick.max(1),
            ..Self::default()
        }
    }

    /// Replace the contents and start revealing from the first character
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.revealed = 0;
        self.visible = true;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.revealed = 0;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_typing(&self) -> bool {
        self.visible && self.revealed < self.text.chars().count()
    }

    /// Reveal the rest of the text at once
    pub fn skip_typing(&mut self) {
        self.revealed = self.text.chars().count();
    }

    /// Advance the reveal by one frame
    pub fn tick(&mut self) {
        if self.is_typing() {
            self.revealed = self
                .revealed
                .saturating_add(self.chars_per_tick)
                .min(self.text.chars().count());
        }
    }

    /// The part of the text revealed so far
    pub fn visible_text(&self) -> String {
        self.text.chars().take(self.revealed).collect()
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_text_over_ticks() {
        let mut textbox = TextBox::new(2);
        textbox.set_text("Hello");

        assert!(textbox.is_typing());
        assert_eq!(textbox.visible_text(), "");
        textbox.tick();
        assert_eq!(textbox.visible_text(), "He");
        textbox.tick();
        textbox.tick();
        assert_eq!(textbox.visible_text(), "Hello");
        assert!(!textbox.is_typing());
    }

    #[test]
    fn skip_reveals_everything() {
        let mut textbox = TextBox::new(1);
        textbox.set_text("Welcome to the bank");
        textbox.skip_typing();

        assert!(!textbox.is_typing());
        assert_eq!(textbox.visible_text(), "Welcome to the bank");
    }

    #[test]
    fn hidden_box_is_never_typing() {
        let mut textbox = TextBox::new(1);
        textbox.set_text("...");
        textbox.hide();
        assert!(!textbox.is_typing());
    }
}
