//! Scoped remote sessions
//!
//! A [`Session`] owns one connected store and closes it exactly once, either
//! through [`Session::close`] or when it is dropped.

use std::ops::Deref;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::traits::{Connector, RemoteStore};

/// An open session, closed on every exit path
pub struct Session<S: RemoteStore> {
    store: Option<S>,
    label: String,
}

impl<S: RemoteStore> Session<S> {
    /// Connect and authenticate through `connector`
    pub fn open<C>(connector: &C, credentials: &Credentials) -> Result<Self>
    where
        C: Connector<Store = S>,
    {
        let store = connector.connect(credentials)?;
        tracing::debug!("Session opened to {}", credentials.address());
        Ok(Self::from_store(store, credentials.address()))
    }

    /// Wrap an already connected store
    pub fn from_store(store: S, label: impl Into<String>) -> Self {
        Self {
            store: Some(store),
            label: label.into(),
        }
    }

    /// Close the session and report the close result
    pub fn close(mut self) -> Result<()> {
        match self.store.take() {
            Some(mut store) => {
                tracing::debug!("Session to {} closed", self.label);
                store.close()
            }
            None => Ok(()),
        }
    }
}

impl<S: RemoteStore> Deref for Session<S> {
    type Target = S;

    fn deref(&self) -> &S {
        // Only `close` and `drop` take the store, and both consume the session.
        match &self.store {
            Some(store) => store,
            None => unreachable!("session used after close"),
        }
    }
}

impl<S: RemoteStore> Drop for Session<S> {
    fn drop(&mut self) {
        if let Some(mut store) = self.store.take() {
            match store.close() {
                Ok(()) => tracing::debug!("Session to {} closed", self.label),
                Err(e) => tracing::warn!("Failed to close session to {}: {e}", self.label),
            }
        }
    }
}

/// Run `f` against a freshly opened session
///
/// The session is released before this returns, whatever `f` does. Connect
/// failures are returned as-is; nothing is retried.
pub fn with_session<C, T, F>(connector: &C, credentials: &Credentials, f: F) -> Result<T>
where
    C: Connector,
    F: FnOnce(&C::Store) -> Result<T>,
{
    let session = Session::open(connector, credentials)?;
    let result = f(&*session);
    match session.close() {
        Ok(()) => {}
        Err(e) => tracing::warn!("Failed to close session to {}: {e}", credentials.address()),
    }
    result
}
