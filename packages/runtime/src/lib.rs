//! # Pageforge Runtime
//!
//! The interaction interpreter: executes declarative event → action
//! bindings stored on nodes. A fixed-vocabulary command interpreter,
//! not a scripting engine.
//!
//! Internal actions (navigation, visibility) are issued back into the
//! editor as ordinary mutations. Actions with effects outside the
//! core (opening a URL, scrolling, submitting a form) are returned to
//! the embedding collaborator as [`Effect`]s; the core performs no
//! I/O of its own.

mod interpreter;

pub use interpreter::{dispatch, BindingOutcome, DispatchResult, Effect};
