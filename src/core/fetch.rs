//! Fetch lifecycle for remote-derived view state
//!
//! Every field a screen fills from the provider is a [`Fetch`]: an explicit
//! `Idle -> Loading -> Loaded | Errored` state plus a monotonic request
//! counter. Responses carry the [`RequestId`] they were issued with and are
//! only applied when that id is still the latest one, so a slow response can
//! never overwrite the result of a newer request.

/// Identifier of one issued request, unique per [`RequestSeq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic request counter
#[derive(Debug, Clone, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new id; every previously issued id becomes stale.
    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest != 0 && id.0 == self.latest
    }

    pub fn latest(&self) -> Option<RequestId> {
        (self.latest != 0).then_some(RequestId(self.latest))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Loaded(T),
    Errored(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Errored(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}

/// A [`FetchState`] fenced by a [`RequestSeq`].
#[derive(Debug, Clone)]
pub struct Fetch<T> {
    state: FetchState<T>,
    seq: RequestSeq,
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Fetch<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            seq: RequestSeq::new(),
        }
    }

    /// Begin a new request. Previously loaded data and errors are cleared.
    pub fn start(&mut self) -> RequestId {
        self.state = FetchState::Loading;
        self.seq.issue()
    }

    /// Apply the outcome of request `id`.
    ///
    /// Returns `false` (and leaves the state untouched) when `id` is stale.
    pub fn finish(&mut self, id: RequestId, outcome: Result<T, String>) -> bool {
        if !self.seq.is_current(id) {
            tracing::debug!(request = %id, "discarding stale response");
            return false;
        }
        self.state = match outcome {
            Ok(value) => FetchState::Loaded(value),
            Err(reason) => FetchState::Errored(reason),
        };
        true
    }

    /// Drop back to `Idle` without invalidating the current request id.
    pub fn reset(&mut self) {
        self.state = FetchState::Idle;
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.seq.is_current(id)
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn loaded(&self) -> Option<&T> {
        self.state.loaded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_seq_is_monotonic() {
        let mut seq = RequestSeq::new();
        assert_eq!(seq.latest(), None);
        let first = seq.issue();
        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_default_id_is_never_current() {
        let seq = RequestSeq::new();
        assert!(!seq.is_current(RequestId::default()));
    }

    #[test]
    fn test_fetch_cycle() {
        let mut fetch: Fetch<u64> = Fetch::new();
        assert_eq!(fetch.state(), &FetchState::Idle);

        let id = fetch.start();
        assert!(fetch.is_loading());
        assert!(fetch.finish(id, Ok(42)));
        assert_eq!(fetch.loaded(), Some(&42));

        let id = fetch.start();
        assert_eq!(fetch.loaded(), None);
        assert!(fetch.finish(id, Err("boom".into())));
        assert_eq!(fetch.state().error(), Some("boom"));

        // The cycle can always restart
        let id = fetch.start();
        assert!(fetch.finish(id, Ok(7)));
        assert_eq!(fetch.loaded(), Some(&7));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut fetch: Fetch<&str> = Fetch::new();
        let slow = fetch.start();
        let fast = fetch.start();

        assert!(fetch.finish(fast, Ok("newer")));
        assert!(!fetch.finish(slow, Ok("older")));
        assert_eq!(fetch.loaded(), Some(&"newer"));
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut fetch: Fetch<u8> = Fetch::new();
        let old = fetch.start();
        let _new = fetch.start();

        assert!(!fetch.finish(old, Err("late failure".into())));
        assert!(fetch.is_loading());
    }
}
