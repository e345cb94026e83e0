use std::collections::HashSet;
use std::fmt;

use crate::error::{SyncError, SyncResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A named, routable region of the page. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub path: String,
    pub title: String,
    /// Position among sibling sections; lower renders first.
    pub dom_order: usize,
}

impl Section {
    pub fn new(
        id: impl Into<String>,
        path: impl Into<String>,
        title: impl Into<String>,
        dom_order: usize,
    ) -> Self {
        Self {
            id: SectionId::new(id),
            path: path.into(),
            title: title.into(),
            dom_order,
        }
    }
}

/// The static set of sections known for a page session, kept in DOM order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new(mut sections: Vec<Section>) -> SyncResult<Self> {
        if sections.is_empty() {
            return Err(SyncError::invalid_registry("at least one section is required"));
        }

        let mut ids = HashSet::new();
        let mut paths = HashSet::new();
        let mut orders = HashSet::new();
        for section in &sections {
            if section.id.as_str().is_empty() {
                return Err(SyncError::invalid_registry("section id must not be empty"));
            }
            if !ids.insert(section.id.clone()) {
                return Err(SyncError::invalid_registry(format!(
                    "duplicate section id: {}",
                    section.id
                )));
            }
            if !paths.insert(section.path.clone()) {
                return Err(SyncError::invalid_registry(format!(
                    "duplicate section path: {}",
                    section.path
                )));
            }
            if !orders.insert(section.dom_order) {
                return Err(SyncError::invalid_registry(format!(
                    "duplicate dom order {} for section {}",
                    section.dom_order, section.id
                )));
            }
        }

        sections.sort_by_key(|section| section.dom_order);
        Ok(Self { sections })
    }

    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| &section.id == id)
    }

    pub fn require(&self, id: &SectionId) -> SyncResult<&Section> {
        self.get(id)
            .ok_or_else(|| SyncError::unknown_section(id.as_str()))
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.get(id).is_some()
    }

    pub fn by_path(&self, path: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.path == path)
    }

    pub fn first(&self) -> &Section {
        &self.sections[0]
    }

    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|section| &section.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// The section after `id`, wrapping to the first one.
    pub fn next_after(&self, id: &SectionId) -> &Section {
        let index = self.position(id).map_or(0, |i| (i + 1) % self.sections.len());
        &self.sections[index]
    }

    /// The section before `id`, wrapping to the last one.
    pub fn previous_before(&self, id: &SectionId) -> &Section {
        let len = self.sections.len();
        let index = self.position(id).map_or(0, |i| (i + len - 1) % len);
        &self.sections[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Section, SectionId, SectionRegistry};
    use crate::error::SyncError;

    fn sections() -> Vec<Section> {
        vec![
            Section::new("experience", "/experience", "Experience", 2),
            Section::new("home", "/", "Home", 0),
            Section::new("projects", "/projects", "Projects", 1),
        ]
    }

    #[test]
    fn registry_orders_sections_by_dom_order() {
        let registry = SectionRegistry::new(sections()).expect("registry should build");
        let ids: Vec<&str> = registry.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["home", "projects", "experience"]);
        assert_eq!(registry.first().id, SectionId::from("home"));
        assert_eq!(
            registry.by_path("/projects").map(|s| s.title.as_str()),
            Some("Projects")
        );
    }

    #[test]
    fn registry_rejects_duplicates_and_empty_sets() {
        assert!(matches!(
            SectionRegistry::new(Vec::new()),
            Err(SyncError::InvalidRegistry(_))
        ));

        let mut dup_id = sections();
        dup_id.push(Section::new("home", "/again", "Again", 9));
        assert!(SectionRegistry::new(dup_id).is_err());

        let mut dup_path = sections();
        dup_path.push(Section::new("contact", "/", "Contact", 9));
        assert!(SectionRegistry::new(dup_path).is_err());
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let registry = SectionRegistry::new(sections()).expect("registry should build");
        let last = SectionId::from("experience");
        assert_eq!(registry.next_after(&last).id.as_str(), "home");
        assert_eq!(
            registry.previous_before(&SectionId::from("home")).id.as_str(),
            "experience"
        );
        assert!(matches!(
            registry.require(&SectionId::from("contact")),
            Err(SyncError::UnknownSection { .. })
        ));
    }
}
