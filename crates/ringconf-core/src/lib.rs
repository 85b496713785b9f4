//! # Ringconf Core Library
//!
//! A library for classifying the three-dimensional conformations of small
//! molecular rings (cyclopentane, cyclohexane, oxane, pyrane, benzene) from
//! atomic coordinates, using a best-fit reference plane and a cascade of
//! tolerance-based geometric tests.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   ([`core::models::ring::RingInstance`], conformation registries), pure
//!   geometric primitives (planes, angles, dihedrals), the atom-name alias
//!   table, and PDB I/O utilities.
//!
//! - **[`engine`]: The Logic Core.** Implements the per-ring-kind
//!   classification cascades that turn plane-fit residuals, signed distances,
//!   and dihedral angles into a discrete conformation label.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties `engine` and `core` together to analyse whole structure files
//!   and to aggregate the results into lists, summaries, and CSV exports.

pub mod core;
pub mod engine;
pub mod workflows;
