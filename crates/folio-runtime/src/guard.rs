#![forbid(unsafe_code)]

//! Programmatic-scroll guard.
//!
//! While engaged, the active section is pinned to the navigation target and
//! scroll-derived recomputation is suppressed. Two completion sources race
//! to release it:
//!
//! - a scroll-end signal from the platform ([`ScrollGuard::release_on_scroll_end`]),
//! - a fallback deadline ([`ScrollGuard::expire`] from a platform timer, or
//!   [`ScrollGuard::poll`] from a host-driven clock).
//!
//! Whichever arrives first wins. Every engagement bumps a generation
//! counter and hands out a [`GuardTicket`]; a timer carrying a superseded
//! ticket is stale and cannot release a newer engagement.
//!
//! # Invariants
//!
//! 1. `pending_target().is_some() == is_engaged()`.
//! 2. An engaged guard always has a deadline no later than
//!    `engaged_at + timeout`, so [`poll`](ScrollGuard::poll) releases it in
//!    bounded time even if no completion signal ever arrives.
//! 3. Re-engaging overwrites the target and restarts the deadline
//!    (last writer wins).

use std::time::Duration;

use folio_core::section::Section;

/// Handle for the fallback timer of one engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuardTicket {
    generation: u64,
    deadline: Duration,
}

impl GuardTicket {
    /// Engagement counter this ticket belongs to.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Monotonic time at which the fallback fires.
    #[must_use]
    pub const fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Delay from `now` until the deadline (zero if already due).
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        self.deadline.saturating_sub(now)
    }
}

/// Which completion source released the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseReason {
    /// The platform reported scroll completion.
    ScrollEnd,
    /// The fallback deadline passed.
    Timeout,
    /// A navigation with nothing to scroll to replaced the engagement.
    Superseded,
}

/// How an operation affected the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardChange {
    #[default]
    Unchanged,
    /// A new engagement began; schedule a timer for the ticket.
    Engaged(GuardTicket),
    /// The guard cleared; any pending timer may be cancelled.
    Released(ReleaseReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Engagement {
    target: Section,
    ticket: GuardTicket,
}

/// Programmatic-scroll guard state.
#[derive(Debug, Clone)]
pub struct ScrollGuard {
    timeout: Duration,
    generation: u64,
    engagement: Option<Engagement>,
}

impl ScrollGuard {
    /// Create a released guard with the given fallback timeout.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            generation: 0,
            engagement: None,
        }
    }

    /// Pin `target` and (re)start the fallback deadline.
    pub fn engage(&mut self, target: Section, now: Duration) -> GuardTicket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = GuardTicket {
            generation: self.generation,
            deadline: now.saturating_add(self.timeout),
        };
        if let Some(previous) = self.engagement {
            tracing::trace!(
                previous = %previous.target,
                next = %target,
                "guard re-engaged, restarting fallback"
            );
        }
        self.engagement = Some(Engagement { target, ticket });
        ticket
    }

    /// Release because scrolling settled. Returns `false` if not engaged.
    pub fn release_on_scroll_end(&mut self) -> bool {
        self.release(ReleaseReason::ScrollEnd)
    }

    /// Release from a fallback timer. Stale tickets are ignored.
    pub fn expire(&mut self, ticket: GuardTicket) -> bool {
        match self.engagement {
            Some(current) if current.ticket == ticket => self.release(ReleaseReason::Timeout),
            _ => {
                tracing::trace!(generation = ticket.generation, "ignoring stale guard timer");
                false
            }
        }
    }

    /// Release if the deadline has passed at `now`.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.engagement {
            Some(current) if now >= current.ticket.deadline => {
                self.release(ReleaseReason::Timeout)
            }
            _ => false,
        }
    }

    /// Drop the current engagement without a completion signal.
    pub fn cancel(&mut self) -> bool {
        self.release(ReleaseReason::Superseded)
    }

    fn release(&mut self, reason: ReleaseReason) -> bool {
        match self.engagement.take() {
            Some(engagement) => {
                tracing::debug!(section = %engagement.target, ?reason, "scroll guard released");
                true
            }
            None => false,
        }
    }

    /// Whether a programmatic scroll is believed in flight.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.engagement.is_some()
    }

    /// Destination of the in-flight programmatic scroll.
    #[must_use]
    pub fn pending_target(&self) -> Option<Section> {
        self.engagement.map(|e| e.target)
    }

    /// Ticket of the current engagement.
    #[must_use]
    pub fn ticket(&self) -> Option<GuardTicket> {
        self.engagement.map(|e| e.ticket)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
