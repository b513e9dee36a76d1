use std::collections::BTreeSet;

use foundation::ids::SectionId;

use crate::error::NavError;

/// A content region of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub label: String,
    pub expanded: bool,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: true,
        }
    }

    pub fn collapsed(mut self) -> Self {
        self.expanded = false;
        self
    }
}

/// Menu item derived from a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub anchor: SectionId,
    pub label: String,
}

impl From<&Section> for NavEntry {
    fn from(section: &Section) -> Self {
        Self {
            anchor: section.id.clone(),
            label: section.label.clone(),
        }
    }
}

/// Ordered, id-unique set of page sections.
///
/// Ordering contract: iteration follows document order as discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSet {
    sections: Vec<Section>,
}

impl SectionSet {
    pub fn new(sections: Vec<Section>) -> Result<Self, NavError> {
        let mut seen = BTreeSet::new();
        for s in &sections {
            admit(&mut seen, s)?;
        }
        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|s| &s.id)
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == *id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == *id)
    }

    pub fn nav_entries(&self) -> Vec<NavEntry> {
        self.sections.iter().map(NavEntry::from).collect()
    }
}

fn admit(seen: &mut BTreeSet<SectionId>, section: &Section) -> Result<(), NavError> {
    if section.id.is_empty() {
        return Err(NavError::EmptySectionId);
    }
    if !seen.insert(section.id.clone()) {
        return Err(NavError::DuplicateSection(section.id.clone()));
    }
    Ok(())
}

/// Drops discovered sections that [`SectionSet::new`] would reject.
///
/// Returns the kept sections, still in document order, and one error per
/// dropped section. The first section with a given id wins.
pub fn retain_valid_sections<T>(found: Vec<(Section, T)>) -> (Vec<(Section, T)>, Vec<NavError>) {
    let mut seen = BTreeSet::new();
    let mut rejected = Vec::new();
    let mut kept = Vec::with_capacity(found.len());
    for (section, el) in found {
        match admit(&mut seen, &section) {
            Ok(()) => kept.push((section, el)),
            Err(err) => rejected.push(err),
        }
    }
    (kept, rejected)
}
