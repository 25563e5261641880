//! An in-process actor runtime: addressable processes communicating
//! through bounded mailboxes, supervised restart on receiver failure,
//! a dead-letter fallback for unroutable sends, and request/response
//! built on top of plain sends.
//!
//! ```
//! use std::time::Duration;
//! use meshact::{Engine, SpawnOptions};
//!
//! let engine = Engine::new();
//! let pid = engine
//!     .spawn_func(
//!         |ctx| {
//!             if let Some(n) = ctx.message_as::<i32>() {
//!                 ctx.respond(n * 2);
//!             }
//!         },
//!         "doubler",
//!         SpawnOptions::new(),
//!     )
//!     .unwrap();
//!
//! let reply: i32 = engine
//!     .request(&pid, 21, Duration::from_millis(100))
//!     .result()
//!     .unwrap();
//! assert_eq!(reply, 42);
//! ```

mod config;
mod context;
mod dead_letter;
mod engine;
mod envelope;
mod error;
mod events;
mod handle;
mod mailbox;
mod pid;
mod process;
mod receiver;
mod registry;
mod remote;
mod request;

pub use config::{EngineConfig, SpawnOptions};
pub use context::Context;
pub use engine::{Engine, DEAD_LETTER_NAME};
pub use envelope::SystemMessage;
pub use error::EngineError;
pub use events::Event;
pub use pid::{Pid, LOOKUP_SEPARATOR};
pub use receiver::Receiver;
pub use registry::Registry;
pub use remote::RemoteHook;
pub use request::Response;
