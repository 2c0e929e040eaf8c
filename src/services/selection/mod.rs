//! Selection store.
//!
//! Holds the three selectable entity collections (clients, care workers,
//! office staff) and the active perspective. The filter pipeline reads it;
//! only the host mutates it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::entity::SelectableEntity;
use crate::models::event::CalendarEvent;

/// Dimension used to pick and filter visible events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    #[default]
    Clients,
    CareWorkers,
    OfficeStaff,
}

impl Perspective {
    pub const ALL: [Perspective; 3] = [Self::Clients, Self::CareWorkers, Self::OfficeStaff];

    /// Event field matched against this perspective's selection.
    pub fn match_field(&self) -> MatchField {
        match self {
            Self::Clients => MatchField::Client,
            Self::CareWorkers | Self::OfficeStaff => MatchField::Resource,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "clients" | "client" => Some(Self::Clients),
            "careworkers" | "careworker" => Some(Self::CareWorkers),
            "officestaff" | "office" => Some(Self::OfficeStaff),
            _ => None,
        }
    }
}

/// Which id on an event a selection is compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Client,
    Resource,
}

impl MatchField {
    pub fn key<'a>(&self, event: &'a CalendarEvent) -> Option<&'a str> {
        match self {
            Self::Client => event.client_id.as_deref(),
            Self::Resource => event.resource_id.as_deref(),
        }
    }
}

/// Set of included ids. An empty set means "no filter" and matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn matches(&self, key: Option<&str>) -> bool {
        if self.ids.is_empty() {
            return true;
        }
        key.is_some_and(|id| self.ids.contains(id))
    }
}

/// One entity collection with its included flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityCollection {
    entities: Vec<SelectableEntity>,
}

impl EntityCollection {
    pub fn new(entities: Vec<SelectableEntity>) -> Self {
        Self { entities }
    }

    /// Swap in a fresh entity list, keeping the flag of ids that were already selected.
    pub fn replace(&mut self, entities: Vec<SelectableEntity>) {
        let previously_selected: HashSet<String> = self
            .entities
            .iter()
            .filter(|entity| entity.selected)
            .map(|entity| entity.id.clone())
            .collect();

        self.entities = entities
            .into_iter()
            .map(|mut entity| {
                entity.selected = entity.selected || previously_selected.contains(&entity.id);
                entity
            })
            .collect();
    }

    pub fn entities(&self) -> &[SelectableEntity] {
        &self.entities
    }

    pub fn get(&self, id: &str) -> Option<&SelectableEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Flip the included flag of `id`. Returns the new flag, or `None` for unknown ids.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let entity = self.entities.iter_mut().find(|entity| entity.id == id)?;
        entity.selected = !entity.selected;
        Some(entity.selected)
    }

    pub fn select_all(&mut self) {
        self.entities.iter_mut().for_each(|entity| entity.selected = true);
    }

    pub fn deselect_all(&mut self) {
        self.entities.iter_mut().for_each(|entity| entity.selected = false);
    }

    pub fn selected_ids(&self) -> SelectionSet {
        SelectionSet::new(
            self.entities
                .iter()
                .filter(|entity| entity.selected)
                .map(|entity| entity.id.clone()),
        )
    }

    pub fn selected_count(&self) -> usize {
        self.entities.iter().filter(|entity| entity.selected).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    pub clients: EntityCollection,
    pub care_workers: EntityCollection,
    pub office_staff: EntityCollection,
    perspective: Perspective,
}

impl SelectionStore {
    pub fn new(
        clients: Vec<SelectableEntity>,
        care_workers: Vec<SelectableEntity>,
        office_staff: Vec<SelectableEntity>,
    ) -> Self {
        Self {
            clients: EntityCollection::new(clients),
            care_workers: EntityCollection::new(care_workers),
            office_staff: EntityCollection::new(office_staff),
            perspective: Perspective::default(),
        }
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Returns true when the perspective actually changed.
    pub fn set_perspective(&mut self, perspective: Perspective) -> bool {
        if self.perspective == perspective {
            return false;
        }
        log::debug!(
            "Perspective changed: {:?} -> {:?}",
            self.perspective,
            perspective
        );
        self.perspective = perspective;
        true
    }

    pub fn collection(&self, perspective: Perspective) -> &EntityCollection {
        match perspective {
            Perspective::Clients => &self.clients,
            Perspective::CareWorkers => &self.care_workers,
            Perspective::OfficeStaff => &self.office_staff,
        }
    }

    pub fn collection_mut(&mut self, perspective: Perspective) -> &mut EntityCollection {
        match perspective {
            Perspective::Clients => &mut self.clients,
            Perspective::CareWorkers => &mut self.care_workers,
            Perspective::OfficeStaff => &mut self.office_staff,
        }
    }

    pub fn active_collection(&self) -> &EntityCollection {
        self.collection(self.perspective)
    }

    /// Selection and match field the grids filter by.
    pub fn active_selection(&self) -> (SelectionSet, MatchField) {
        (
            self.active_collection().selected_ids(),
            self.perspective.match_field(),
        )
    }

    /// Color of the entity an event belongs to under the current perspective.
    pub fn accent_color(&self, event: &CalendarEvent) -> Option<&str> {
        let key = self.perspective.match_field().key(event)?;
        self.active_collection()
            .get(key)
            .map(|entity| entity.color.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn collection(ids: &[&str]) -> EntityCollection {
        EntityCollection::new(
            ids.iter()
                .map(|id| SelectableEntity::new(*id, format!("Entity {}", id)))
                .collect(),
        )
    }

    #[test]
    fn test_toggle() {
        let mut clients = collection(&["a", "b"]);
        assert_eq!(clients.toggle("a"), Some(true));
        assert!(clients.selected_ids().contains("a"));
        assert_eq!(clients.toggle("a"), Some(false));
        assert!(clients.selected_ids().is_empty());
        assert_eq!(clients.toggle("zzz"), None);
    }

    #[test]
    fn test_select_and_deselect_all() {
        let mut clients = collection(&["a", "b", "c"]);
        clients.select_all();
        assert_eq!(clients.selected_count(), 3);
        clients.deselect_all();
        assert_eq!(clients.selected_count(), 0);
    }

    #[test]
    fn test_replace_preserves_selection() {
        let mut clients = collection(&["a", "b"]);
        clients.toggle("b");
        clients.replace(vec![
            SelectableEntity::new("b", "B"),
            SelectableEntity::new("c", "C"),
        ]);
        assert_eq!(clients.len(), 2);
        assert!(clients.get("b").unwrap().selected);
        assert!(!clients.get("c").unwrap().selected);
        assert!(clients.get("a").is_none());
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let set = SelectionSet::default();
        assert!(set.matches(Some("x")));
        assert!(set.matches(None));
    }

    #[test]
    fn test_non_empty_selection() {
        let set = SelectionSet::new(["x"]);
        assert!(set.matches(Some("x")));
        assert!(!set.matches(Some("y")));
        assert!(!set.matches(None));
    }

    #[test]
    fn test_set_perspective_reports_change() {
        let mut store = SelectionStore::default();
        assert_eq!(store.perspective(), Perspective::Clients);
        assert!(!store.set_perspective(Perspective::Clients));
        assert!(store.set_perspective(Perspective::OfficeStaff));
        assert_eq!(store.perspective(), Perspective::OfficeStaff);
    }

    #[test]
    fn test_active_selection_follows_perspective() {
        let mut store = SelectionStore::new(
            vec![SelectableEntity::new("c1", "Client")],
            vec![SelectableEntity::new("w1", "Worker")],
            vec![SelectableEntity::new("o1", "Office")],
        );
        store.care_workers.toggle("w1");

        let (set, field) = store.active_selection();
        assert!(set.is_empty());
        assert_eq!(field, MatchField::Client);

        store.set_perspective(Perspective::CareWorkers);
        let (set, field) = store.active_selection();
        assert!(set.contains("w1"));
        assert_eq!(field, MatchField::Resource);
    }

    #[test]
    fn test_accent_color() {
        let mut store = SelectionStore::new(
            vec![SelectableEntity::new("c1", "Client").with_color("#123456")],
            vec![],
            vec![],
        );
        let start = chrono::NaiveDate::from_ymd_opt(2025, 4, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let event = CalendarEvent::builder()
            .id("1")
            .start(start)
            .client_id("c1")
            .resource_id("w1")
            .build()
            .unwrap();

        assert_eq!(store.accent_color(&event), Some("#123456"));
        store.set_perspective(Perspective::CareWorkers);
        assert_eq!(store.accent_color(&event), None);
    }

    #[test_case("clients", Some(Perspective::Clients))]
    #[test_case("care-workers", Some(Perspective::CareWorkers))]
    #[test_case("Office Staff", Some(Perspective::OfficeStaff))]
    #[test_case("managers", None)]
    fn test_perspective_parse(raw: &str, expected: Option<Perspective>) {
        assert_eq!(Perspective::parse(raw), expected);
    }
}
