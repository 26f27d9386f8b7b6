//! C text emission.
//!
//! The emitter is a tag-dispatched walk over parsed declarations. Child
//! order inside every composite is fixed by the grammar, so roles are
//! addressed by position; marker nodes are skipped or used to recognize
//! structure.

mod emitter;


pub use emitter::Emitter;
