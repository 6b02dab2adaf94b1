//! Modal Controller
//! Visibility state for the auxiliary dialogs.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Identifier of an overlay dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DialogId {
    Creator,
    Contact,
}

impl DialogId {
    pub const ALL: [DialogId; 2] = [DialogId::Creator, DialogId::Contact];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Contact => "contact",
        }
    }

    /// Window title and button caption.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Creator => "Creator",
            Self::Contact => "Contact",
        }
    }

    /// Identifier of the button that opens this dialog.
    pub const fn trigger(&self) -> &'static str {
        match self {
            Self::Creator => "creatorBtn",
            Self::Contact => "contactBtn",
        }
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DialogId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DialogId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown dialog: {s}"))
    }
}

/// Tracks which dialogs are open. Every dialog starts closed and each one is
/// independent of the others.
#[derive(Debug, Clone)]
pub struct ModalController {
    visible: BTreeMap<DialogId, bool>,
    /// Trigger identifier -> dialog it opens, built once at startup
    triggers: HashMap<&'static str, DialogId>,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            visible: DialogId::ALL.into_iter().map(|id| (id, false)).collect(),
            triggers: DialogId::ALL.into_iter().map(|id| (id.trigger(), id)).collect(),
        }
    }

    pub fn toggle(&mut self, id: DialogId, show: bool) {
        debug!(dialog = %id, show, "Dialog visibility changed");
        self.visible.insert(id, show);
    }

    pub fn open(&mut self, id: DialogId) {
        self.toggle(id, true);
    }

    pub fn close(&mut self, id: DialogId) {
        self.toggle(id, false);
    }

    pub fn is_open(&self, id: DialogId) -> bool {
        self.visible.get(&id).copied().unwrap_or(false)
    }

    /// Open dialogs in declaration order.
    pub fn open_dialogs(&self) -> Vec<DialogId> {
        DialogId::ALL
            .into_iter()
            .filter(|&id| self.is_open(id))
            .collect()
    }

    /// Run the handler registered for `trigger`. Returns false for unknown triggers.
    pub fn activate_trigger(&mut self, trigger: &str) -> bool {
        match self.triggers.get(trigger).copied() {
            Some(id) => {
                self.open(id);
                true
            }
            None => false,
        }
    }

    /// Close affordance inside a dialog: closes exactly the dialog named by `target`.
    pub fn close_target(&mut self, target: &str) -> bool {
        match target.parse::<DialogId>() {
            Ok(id) => {
                self.close(id);
                true
            }
            Err(_) => false,
        }
    }

    /// Click on the dimmed area behind `owner`.
    pub fn backdrop_clicked(&mut self, owner: DialogId) {
        self.close(owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_dialogs_start_closed() {
        let modals = ModalController::new();
        for id in DialogId::ALL {
            assert!(!modals.is_open(id));
        }
        assert!(modals.open_dialogs().is_empty());
    }

    #[test]
    fn open_then_close_returns_to_closed() {
        let mut modals = ModalController::new();
        for id in DialogId::ALL {
            modals.open(id);
            assert!(modals.is_open(id));
            modals.close(id);
            assert!(!modals.is_open(id));
        }
    }

    #[test]
    fn opening_one_leaves_the_other_alone() {
        let mut modals = ModalController::new();
        modals.open(DialogId::Creator);
        assert!(!modals.is_open(DialogId::Contact));

        modals.open(DialogId::Contact);
        modals.close(DialogId::Creator);
        assert!(modals.is_open(DialogId::Contact));
        assert_eq!(modals.open_dialogs(), vec![DialogId::Contact]);
    }

    #[test]
    fn triggers_open_their_own_dialog() {
        let mut modals = ModalController::new();
        assert!(modals.activate_trigger("contactBtn"));
        assert_eq!(modals.open_dialogs(), vec![DialogId::Contact]);
        assert!(!modals.activate_trigger("aboutBtn"));
        assert_eq!(modals.open_dialogs(), vec![DialogId::Contact]);
    }

    #[test]
    fn close_affordance_only_closes_its_target() {
        let mut modals = ModalController::new();
        modals.open(DialogId::Creator);
        modals.open(DialogId::Contact);

        assert!(modals.close_target("creator"));
        assert!(!modals.is_open(DialogId::Creator));
        assert!(modals.is_open(DialogId::Contact));

        assert!(!modals.close_target("nonexistent"));
        assert!(modals.is_open(DialogId::Contact));
    }

    #[test]
    fn backdrop_click_closes_owner() {
        let mut modals = ModalController::new();
        modals.toggle(DialogId::Creator, true);
        modals.backdrop_clicked(DialogId::Creator);
        assert!(!modals.is_open(DialogId::Creator));
    }

    #[test]
    fn ids_round_trip_through_text() {
        for id in DialogId::ALL {
            assert_eq!(id.to_string().parse::<DialogId>(), Ok(id));
        }
    }
}
