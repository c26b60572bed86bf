//! Duplicate-delivery guard for webhook handlers.
//!
//! Telegram redelivers an update when the webhook does not answer in time.
//! A [`DeliveryGuard`] marks an update as in progress with a marker file
//! named after its id, so a redelivered copy arriving while the first one is
//! still being handled can be dropped. The marker is removed when the guard
//! goes out of scope.
//!
//! # Example
//!
//! ```no_run
//! use tgkit_persistence::DeliveryGuard;
//!
//! match DeliveryGuard::acquire("/var/run/tgkit", 100)? {
//!     Some(_guard) => { /* handle update 100 */ }
//!     None => { /* already being handled */ }
//! }
//! # Ok::<(), tgkit_persistence::PersistenceError>(())
//! ```

pub mod atomic;
pub mod error;
pub mod guard;

pub use error::{PersistenceError, Result};
pub use guard::DeliveryGuard;
