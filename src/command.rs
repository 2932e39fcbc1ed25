use log::{debug, info};

use crate::config::CanvasConfig;
use crate::document::Document;
use crate::selection::Selection;

/// Discrete editing commands that act on the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the primary selected shape one step up in paint order.
    Raise,
    /// Move the primary selected shape one step down in paint order.
    Lower,
    /// Clone every selected shape and select exactly the clones.
    Duplicate,
    DeleteSelection,
    /// Remove the topmost shape regardless of selection.
    EraseLast,
    /// Empty the drawing and the selection.
    Clear,
    SelectAll,
}

impl Command {
    /// Run the command. Returns whether the document or selection changed.
    ///
    /// The selection is pruned after every removal, so it never refers to
    /// shapes the document no longer holds.
    pub fn execute(&self, document: &mut Document, selection: &mut Selection, config: &CanvasConfig) -> bool {
        let changed = match self {
            Command::Raise => selection.primary().is_some_and(|id| document.raise(id)),
            Command::Lower => selection.primary().is_some_and(|id| document.lower(id)),
            Command::Duplicate => {
                if selection.is_empty() {
                    false
                } else {
                    let copies = document.duplicate(selection.ids(), config.duplicate_offset);
                    info!("Duplicated {} shapes", copies.len());
                    selection.replace(&copies);
                    true
                }
            }
            Command::DeleteSelection => {
                let mut removed = false;
                for id in selection.ids().to_vec() {
                    removed |= document.remove_element(id).is_some();
                }
                removed
            }
            Command::EraseLast => document.remove_last().is_some(),
            Command::Clear => {
                let changed = !document.is_empty() || !selection.is_empty();
                document.clear();
                selection.clear();
                changed
            }
            Command::SelectAll => {
                let ids: Vec<usize> = document.ids().collect();
                let changed = ids.as_slice() != selection.ids();
                selection.replace(&ids);
                changed
            }
        };

        selection.prune(document);
        if !changed {
            debug!("{self:?} had nothing to do");
        }
        changed
    }
}
