//! Section removal and dense renumbering.
//!
//! # Responsibility
//! - Drop one section together with every item it owns.
//! - Renumber survivors to `1..=N` and remap item references.
//!
//! # Invariants
//! - Survivors keep their relative order and their old geometry; only ids change.
//! - Every surviving item is remapped to the renumbered id of its section.

use crate::model::item::Item;
use crate::model::section::{Section, SectionId};

/// Sections and items left after removing one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRemoval {
    pub sections: Vec<Section>,
    pub items: Vec<Item>,
}

/// Survivors with dense ids, plus the old-to-new id mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Renumbering {
    /// Renumbered sections; rectangles still describe the old layout.
    pub sections: Vec<Section>,
    /// Items whose `section_id` now uses the new numbering.
    pub items: Vec<Item>,
    /// `(old_id, new_id)` for every surviving section, in order.
    pub id_map: Vec<(SectionId, SectionId)>,
}

/// Removes `section_id` and the items it owns.
///
/// Returns `None` when no section has that id.
pub fn remove_section(
    sections: &[Section],
    items: &[Item],
    section_id: SectionId,
) -> Option<SectionRemoval> {
    if !sections.iter().any(|section| section.id == section_id) {
        return None;
    }
    Some(SectionRemoval {
        sections: sections
            .iter()
            .filter(|section| section.id != section_id)
            .cloned()
            .collect(),
        items: items
            .iter()
            .filter(|item| item.section_id != section_id)
            .cloned()
            .collect(),
    })
}

/// Assigns dense ids to the surviving sections and remaps their items.
pub fn renumber(removal: SectionRemoval) -> Renumbering {
    let id_map: Vec<(SectionId, SectionId)> = removal
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| (section.id, index as SectionId + 1))
        .collect();

    let sections = removal
        .sections
        .into_iter()
        .zip(id_map.iter())
        .map(|(mut section, (_, new_id))| {
            section.id = *new_id;
            section
        })
        .collect();

    let items = removal
        .items
        .into_iter()
        .filter_map(|mut item| {
            let (_, new_id) = id_map.iter().find(|(old, _)| *old == item.section_id)?;
            item.section_id = *new_id;
            Some(item)
        })
        .collect();

    Renumbering {
        sections,
        items,
        id_map,
    }
}
