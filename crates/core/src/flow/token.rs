/// Sequence number of a fetch. Later requests carry larger tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What happened to a response handed to a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The fetch failed; the view fell back to an empty list.
    Failed,
    /// A newer request was issued since; the response was dropped.
    Stale,
}

/// Issues tokens and remembers which one is still awaited.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    pending: Option<RequestToken>,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.pending = Some(token);
        token
    }

    pub fn is_pending(&self, token: RequestToken) -> bool {
        self.pending == Some(token)
    }

    /// Consume `token` if it is the one awaited. Each token settles at most once.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_pending(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }
}
