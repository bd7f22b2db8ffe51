//! Choice menu shown under a text message

use crate::host::Presenter;
use crate::types::ChoiceOption;

/// A set of options of which exactly one may be chosen
///
/// The first valid selection latches the menu; every later activation is
/// ignored. The visible option set is removed before the selection is
/// returned, so the caller may open new UI straight away.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceMenu {
    options: Vec<ChoiceOption>,
    chosen: Option<usize>,
}

impl ChoiceMenu {
    /// Create the menu and put its options on screen
    pub fn open(options: Vec<ChoiceOption>, ui: &mut dyn Presenter) -> Self {
        ui.show_choices(&options);
        Self {
            options,
            chosen: None,
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn is_waiting_for_choice(&self) -> bool {
        self.chosen.is_none()
    }

    /// Index of the option that was taken, if any
    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Activate option `index`.
    ///
    /// Returns the chosen option on the first in-range activation and `None`
    /// otherwise. An out-of-range index does not latch the menu.
    pub fn select(&mut self, index: usize, ui: &mut dyn Presenter) -> Option<ChoiceOption> {
        if self.chosen.is_some() {
            return None;
        }
        let option = self.options.get(index)?.clone();

        self.chosen = Some(index);
        ui.hide_choices();
        Some(option)
    }
}
