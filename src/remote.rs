//! Seam for the (out-of-scope) remote transport.
//!
//! The engine never ships bytes over a wire itself. When a send's
//! destination address is non-local, it hands the envelope to whatever
//! `RemoteHook` has been installed; the hook owns serialization,
//! connection management, and eventual remote delivery.

use crate::envelope::Envelope;

pub trait RemoteHook: Send + Sync {
    /// Take ownership of an envelope addressed to a non-local PID.
    fn forward(&self, envelope: Envelope);
}
