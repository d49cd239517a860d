/// A request token. Tokens issued by one engine increase monotonically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence(u64);

impl Sequence {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Issues request tokens and drops responses that are not for the latest one.
#[derive(Clone, Debug, Default)]
pub struct StaleFilter {
    next: u64,
    latest: Option<Sequence>,
    answered: bool,
    dropped: u64,
}

impl StaleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next token; every earlier token becomes stale.
    pub fn issue(&mut self) -> Sequence {
        let seq = Sequence(self.next);
        self.next = self.next.wrapping_add(1);
        self.latest = Some(seq);
        self.answered = false;
        seq
    }

    pub fn latest(&self) -> Option<Sequence> {
        self.latest
    }

    /// Returns `true` if a response tagged `seq` answers the latest request.
    pub fn accept(&mut self, seq: Sequence) -> bool {
        if self.latest == Some(seq) {
            self.answered = true;
            return true;
        }
        self.dropped = self.dropped.saturating_add(1);
        vtrace!(
            seq = seq.get(),
            latest = self.latest.map(Sequence::get),
            "dropping stale response"
        );
        false
    }

    /// Returns `true` while the latest request has not had its response accepted.
    pub fn is_awaiting(&self) -> bool {
        self.latest.is_some() && !self.answered
    }

    /// Number of responses dropped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
