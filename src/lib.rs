//! hammock: rewrite the user's selected text with a language model.
//!
//! A side panel polls the host document for the current selection, sends
//! it with a fixed instruction (proofread, translate, change sentiment) to
//! a chat-completion endpoint, and writes the answer back on accept. The
//! service credential lives in a server-side proxy, never in the panel.

pub mod cli;
pub mod config;
pub mod host;
pub mod logging;
pub mod mvi;
pub mod panel;
pub mod proxy;
pub mod runtime;
pub mod transform;
