//! NPC dialogue selection and choice menus

use crate::host::FlagStore;
use crate::types::TalkingEntry;

pub mod choice_menu;

pub use choice_menu::ChoiceMenu;

/// Which talking entry to play, and whether its gate actually holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The chosen entry's required flags are all set
    Eligible { index: usize },
    /// Nothing better qualified; the first entry was kept even though its
    /// own flags are not all set
    Fallback { index: usize },
}

impl Selection {
    pub fn index(self) -> usize {
        match self {
            Selection::Eligible { index } | Selection::Fallback { index } => index,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Selection::Fallback { .. })
    }
}

/// True when every required flag of `entry` is present
pub fn is_eligible(entry: &TalkingEntry, flags: &dyn FlagStore) -> bool {
    entry.required_flags.iter().all(|flag| flags.contains(flag))
}

/// Pick the most specific satisfied entry.
///
/// Starts from the first entry unconditionally. A later entry replaces the
/// current pick only when its flags are all set and it requires strictly more
/// flags than the pick, so ties keep the earlier entry. Returns `None` only
/// for an empty list.
pub fn select_entry(candidates: &[TalkingEntry], flags: &dyn FlagStore) -> Option<Selection> {
    let first = candidates.first()?;

    let mut best = 0;
    let mut best_len = first.required_flags.len();
    for (index, candidate) in candidates.iter().enumerate().skip(1) {
        if candidate.required_flags.len() > best_len && is_eligible(candidate, flags) {
            best = index;
            best_len = candidate.required_flags.len();
        }
    }

    if is_eligible(&candidates[best], flags) {
        Some(Selection::Eligible { index: best })
    } else {
        Some(Selection::Fallback { index: best })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFlagStore;
    use crate::types::Script;

    fn gated(flags: &[&str]) -> TalkingEntry {
        Script::new(flags.iter().map(|f| f.to_string()).collect(), Vec::new())
    }

    #[test]
    fn empty_candidates_select_nothing() {
        let flags = MemoryFlagStore::new();
        assert_eq!(select_entry(&[], &flags), None);
    }

    #[test]
    fn more_specific_satisfied_entry_wins() {
        let entries = vec![gated(&[]), gated(&["a"]), gated(&["a", "b"])];
        let mut flags = MemoryFlagStore::new();

        assert_eq!(
            select_entry(&entries, &flags),
            Some(Selection::Eligible { index: 0 })
        );

        flags.set("a", "true");
        assert_eq!(
            select_entry(&entries, &flags),
            Some(Selection::Eligible { index: 1 })
        );

        flags.set("b", "true");
        assert_eq!(
            select_entry(&entries, &flags),
            Some(Selection::Eligible { index: 2 })
        );
    }

    #[test]
    fn ties_keep_first_seen() {
        let entries = vec![gated(&[]), gated(&["a"]), gated(&["b"])];
        let mut flags = MemoryFlagStore::new();
        flags.set("a", "1");
        flags.set("b", "1");

        assert_eq!(select_entry(&entries, &flags).map(Selection::index), Some(1));
    }

    #[test]
    fn unsatisfied_first_entry_is_a_fallback() {
        let entries = vec![gated(&["x"]), gated(&["y", "z"])];
        let flags = MemoryFlagStore::new();

        let selection = select_entry(&entries, &flags).unwrap();
        assert_eq!(selection, Selection::Fallback { index: 0 });
        assert!(selection.is_fallback());
    }

    #[test]
    fn gated_first_entry_blocks_less_specific_candidates() {
        // The eligible single-flag entry never outranks the two-flag head
        let entries = vec![gated(&["x", "y"]), gated(&["a"])];
        let mut flags = MemoryFlagStore::new();
        flags.set("a", "1");

        assert_eq!(
            select_entry(&entries, &flags),
            Some(Selection::Fallback { index: 0 })
        );
    }
}
