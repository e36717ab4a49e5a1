//! Callback-to-await bridge for cookie writes.
//!
//! [`CookieStore::set_cookie`] reports completion through a callback. The
//! bridge turns each call into a single-shot suspension point backed by its
//! own `oneshot` channel, so a restore loop can issue one write, wait for
//! its acknowledgment, and only then issue the next.

use crate::cookies::store::CookieStore;
use std::time::Duration;
use tokio::sync::oneshot;

/// Outcome of one bridged cookie write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAck {
    /// The store acknowledged the write with `success = true`.
    Stored,
    /// The store acknowledged the write with `success = false`.
    Rejected,
    /// The store dropped the callback without invoking it.
    Abandoned,
    /// No acknowledgment arrived within the configured bound.
    TimedOut,
}

impl WriteAck {
    pub fn is_success(self) -> bool {
        self == WriteAck::Stored
    }
}

/// Issue one write and suspend until the store acknowledges it.
///
/// With `timeout = None` this waits for as long as the store takes; a store
/// that holds on to the callback and never calls it stalls the caller.
pub async fn set_cookie_acknowledged(
    store: &dyn CookieStore,
    domain: &str,
    cookie: &str,
    timeout: Option<Duration>,
) -> WriteAck {
    let (tx, rx) = oneshot::channel();
    store.set_cookie(
        domain,
        cookie,
        Box::new(move |success| {
            // Receiver is gone only if the waiting cycle was dropped.
            let _ = tx.send(success);
        }),
    );

    let received = match timeout {
        Some(limit) => match tokio::time::timeout(limit, rx).await {
            Ok(received) => received,
            Err(_) => return WriteAck::TimedOut,
        },
        None => rx.await,
    };

    match received {
        Ok(true) => WriteAck::Stored,
        Ok(false) => WriteAck::Rejected,
        Err(_) => WriteAck::Abandoned,
    }
}
