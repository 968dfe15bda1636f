//! Entity-class registry
//!
//! Maps a document's declared entity-type name to the OMC vocabulary's class
//! IRI and back. Static and read-only; loaded once, never mutated.

use crate::error::OmcError;
use nexus_vocab::omc;

/// The known entity-type set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// A creative work (film, episode, season)
    CreativeWork,
    /// A production asset (file, prop, artwork)
    Asset,
    /// A participant (person or organization in a production role)
    Participant,
    /// A physical or narrative location
    Location,
    /// A unit of production work
    Task,
    /// A grouping context relating entities to each other
    Context,
    /// A depicted character
    Character,
}

/// (name, type, class IRI) rows; the single source of truth for both
/// directions of the mapping.
const TABLE: &[(&str, EntityType, &str)] = &[
    ("CreativeWork", EntityType::CreativeWork, omc::CREATIVE_WORK),
    ("Asset", EntityType::Asset, omc::ASSET),
    ("Participant", EntityType::Participant, omc::PARTICIPANT),
    ("Location", EntityType::Location, omc::LOCATION),
    ("Task", EntityType::Task, omc::TASK),
    ("Context", EntityType::Context, omc::CONTEXT),
    ("Character", EntityType::Character, omc::CHARACTER),
];

impl EntityType {
    /// Parse an entity-type name, failing with `UnknownEntityType`
    pub fn from_name(name: &str) -> Result<Self, OmcError> {
        TABLE
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, t, _)| *t)
            .ok_or_else(|| OmcError::UnknownEntityType(name.to_string()))
    }

    /// Reverse lookup from a vocabulary class IRI (import direction)
    pub fn from_class_iri(iri: &str) -> Option<Self> {
        TABLE
            .iter()
            .find(|(_, _, c)| *c == iri)
            .map(|(_, t, _)| *t)
    }

    /// The entity-type name as it appears in documents
    pub fn name(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, t, _)| *t == self)
            .map(|(n, _, _)| *n)
            .expect("entity type present in table")
    }

    /// The vocabulary class IRI
    pub fn class_iri(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, t, _)| *t == self)
            .map(|(_, _, c)| *c)
            .expect("entity type present in table")
    }

    /// All known entity types
    pub fn all() -> impl Iterator<Item = EntityType> {
        TABLE.iter().map(|(_, t, _)| *t)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for et in EntityType::all() {
            assert_eq!(EntityType::from_name(et.name()).unwrap(), et);
            assert_eq!(EntityType::from_class_iri(et.class_iri()), Some(et));
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = EntityType::from_name("Bogus").unwrap_err();
        assert!(matches!(err, OmcError::UnknownEntityType(n) if n == "Bogus"));
    }

    #[test]
    fn test_unknown_class_iri_is_none() {
        assert_eq!(
            EntityType::from_class_iri("https://example.org/Nothing"),
            None
        );
    }
}
