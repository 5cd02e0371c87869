//! Line-oriented terminal interaction.
//!
//! - [`chat_loop`]: the prompt/dispatch/render cycle for one session.
//! - [`wizard`]: guided journey selection.
//! - [`status`]: the spinner shown while a request is outstanding.
//! - [`prompt`]: line input, backed by the raw-mode editor on a terminal.

pub mod chat_loop;
pub mod prompt;
pub mod splash;
pub mod status;
pub mod wizard;
