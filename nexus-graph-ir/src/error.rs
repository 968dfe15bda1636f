//! Error types for graph store operations

/// Error type for graph store operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A deferred reference never found its target within the pass.
    ///
    /// Surfaced at finalization so the caller knows exactly which relation
    /// failed; the reference is never coerced into a literal.
    #[error("unresolved reference: {subject} --{predicate}--> {target}")]
    UnresolvedReference {
        /// Subject the reference was emitted from
        subject: String,
        /// Predicate IRI of the relation
        predicate: String,
        /// Combined form that never appeared in the pass
        target: String,
    },
}

/// Result type for graph store operations
pub type Result<T> = std::result::Result<T, StoreError>;
