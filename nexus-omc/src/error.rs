//! Error types for the codec
//!
//! The taxonomy mirrors how failures propagate: `MalformedInput` aborts a
//! whole call, the per-entity variants are fatal for single-entity input but
//! demoted to warnings when a collection is being parsed, and unresolved
//! references surface at finalization from the graph store.

use nexus_graph_ir::StoreError;
use nexus_graph_turtle::GraphTextError;

/// Error type for codec operations
#[derive(Debug, thiserror::Error)]
pub enum OmcError {
    /// Input text could not be parsed at all
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Entity document has no entityType field
    #[error("entity is missing entityType")]
    MissingEntityType,

    /// schemaVersionTag does not carry the expected version marker
    #[error(
        "schemaVersionTag {found:?} does not carry the expected version marker \"{}\"",
        nexus_vocab::schema::VERSION_MARKER
    )]
    InvalidSchemaVersion {
        /// The tag the document carried (empty if absent)
        found: String,
    },

    /// entityType is not a member of the known entity-type set
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// Entity document has an empty identifier array and none could be spliced
    #[error("entity {entity_type} has no identifier")]
    MissingIdentifier {
        /// The entity's declared type
        entity_type: String,
    },

    /// A cross-entity reference failed to resolve at finalization
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Graph-text could not be parsed
    #[error(transparent)]
    GraphText(#[from] GraphTextError),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, OmcError>;
