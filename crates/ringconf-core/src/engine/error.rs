use thiserror::Error;

/// Errors raised while filling or analysing a ring instance.
///
/// All of these are local to one structure: callers skip the structure,
/// report the diagnostic and continue with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("ligand '{0}' is not present in the atom name table")]
    UnrecognizedLigand(String),

    #[error("atom '{name}' matched ring position {slot} twice")]
    DuplicateSlotMatch { name: String, slot: usize },

    #[error("ring incomplete: {found} of {expected} atoms were found")]
    IncompleteRing { found: usize, expected: usize },

    #[error("unable to identify the ring oxygen from the element symbols")]
    MissingRingOxygen,

    #[error("ring oxygen identified twice")]
    DuplicateRingOxygen,

    #[error("ring has to be filled before analysis")]
    NotFilled,

    #[error("attempt to analyse the same ring twice")]
    AlreadyAnalysed,
}
