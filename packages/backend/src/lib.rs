//! # Backend client SDK for Noteless
//!
//! Everything the app needs to talk to its hosted backend: auth sessions,
//! record queries, local persistence, classified errors, bounded retry,
//! and the diagnostic error log. No UI types live here; the `ui` crate
//! builds its controllers on top of this surface.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`Client::connect`] and the cloneable client handle |
//! | [`auth`] | sign-in/up/out, session cache + refresh, the change stream |
//! | [`subscription`] | replay-first subscription to auth changes |
//! | [`query`] | PostgREST-style record queries (`from("notes")…`) |
//! | [`retry`] | the one bounded retry policy shared across the app |
//! | [`storage`] | silently-degrading key/value persistence per platform |
//! | [`diag`] | last-20 persistent error log for support diagnostics |
//! | [`config`] | endpoint resolution with environment overrides |

pub mod auth;
pub mod client;
pub mod config;
pub mod diag;
pub mod error;
pub mod query;
pub mod retry;
pub mod session;
pub mod storage;
pub mod subscription;

pub use auth::{Auth, SignUpResult};
pub use client::Client;
pub use config::Config;
pub use diag::{ErrorEntry, ErrorLog};
pub use error::{Error, ErrorKind, InitError};
pub use query::{Order, QueryBuilder};
pub use retry::{retry, RetryPolicy, RetryState};
pub use session::{AuthChange, AuthEvent, Session, User};
pub use storage::{default_store, KvStore, MemoryStore};
pub use subscription::Subscription;
