//! Per-kind request tokens
//!
//! Every asynchronous request carries the token it was issued with. A
//! completion is applied only while its token is still the latest one of its
//! kind; anything older has been superseded.

use std::fmt;

/// Kinds of asynchronous work that can be superseded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Pending debounce window before an autocomplete
    Debounce,
    /// Autocomplete query
    Autocomplete,
    /// Suggestion details lookup or free-text geocode
    Resolution,
    /// Nearby search
    Nearby,
    /// Device location fix
    Location,
}

impl RequestKind {
    const COUNT: usize = 5;

    const fn index(self) -> usize {
        match self {
            Self::Debounce => 0,
            Self::Autocomplete => 1,
            Self::Resolution => 2,
            Self::Nearby => 3,
            Self::Location => 4,
        }
    }
}

/// Opaque, monotonically increasing request identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number, for logging
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Latest issued token for each [`RequestKind`]
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestTokens {
    latest: [u64; RequestKind::COUNT],
}

impl RequestTokens {
    /// Issue a new token for `kind`, superseding every earlier one
    pub(crate) fn issue(&mut self, kind: RequestKind) -> RequestToken {
        let slot = &mut self.latest[kind.index()];
        *slot += 1;
        RequestToken(*slot)
    }

    /// Invalidate every outstanding token of `kind` without issuing a request
    pub(crate) fn supersede(&mut self, kind: RequestKind) {
        self.latest[kind.index()] += 1;
    }

    /// Whether `token` is still the latest of its kind
    pub(crate) fn is_latest(&self, kind: RequestKind, token: RequestToken) -> bool {
        self.latest[kind.index()] == token.0
    }
}
