//! Stop list → arrivals navigation.
//!
//! ```text
//! Listing --select(s)--> StopSelected --(DetailScreen)--> ViewingArrivals
//!    ^                        |                                 |
//!    +---------back-----------+------------------back-----------+
//! ```
//!
//! On [`NavigationCapability::InlineOnly`] hosts the flow rests in
//! `StopSelected` and the host draws arrivals beside the list.

use std::fmt;
use std::sync::Arc;

use strum::Display;

use crate::platform::NavigationCapability;
use crate::transit::{Stop, StopIdentifier};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Screen {
    Listing,
    StopSelected,
    ViewingArrivals,
}

/// The stop the rider last tapped. Replaced wholesale on every tap, kept on back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    stop: Option<Stop>,
}

impl SelectionState {
    pub fn stop(&self) -> Option<&Stop> {
        self.stop.as_ref()
    }

    pub fn is(&self, id: &StopIdentifier) -> bool {
        self.stop.as_ref().is_some_and(|s| &s.id == id)
    }
}

pub type SelectionListener = Arc<dyn Fn(&Stop) + Send + Sync>;

/// Listeners owed a newly selected stop.
///
/// Delivered by the caller once it no longer holds any state lock, so a slow
/// host callback cannot stall other calls.
#[must_use = "listeners only hear about the selection once the notice is delivered"]
pub struct SelectionNotice {
    stop: Stop,
    listeners: Vec<SelectionListener>,
}

impl SelectionNotice {
    pub fn stop(&self) -> &Stop {
        &self.stop
    }

    pub fn deliver(self) {
        for listener in &self.listeners {
            listener(&self.stop);
        }
    }
}

impl fmt::Debug for SelectionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionNotice")
            .field("stop", &self.stop)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Result of a selection: where the flow ended up, which stop, if any,
/// needs its arrivals fetched, and who to tell.
#[derive(Debug)]
pub struct Transition {
    pub screen: Screen,
    pub fetch: Option<Stop>,
    pub notice: SelectionNotice,
}

pub struct SelectionFlow {
    screen: Screen,
    selection: SelectionState,
    capability: NavigationCapability,
    listeners: Vec<SelectionListener>,
}

impl SelectionFlow {
    pub fn new(capability: NavigationCapability) -> Self {
        Self {
            screen: Screen::Listing,
            selection: SelectionState::default(),
            capability,
            listeners: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn capability(&self) -> NavigationCapability {
        self.capability
    }

    /// Called with every newly selected stop, through [`Transition::notice`].
    pub fn subscribe(&mut self, listener: SelectionListener) {
        self.listeners.push(listener);
    }

    /// The rider tapped `stop`.
    ///
    /// A fetch is requested unless the same stop is already on screen.
    pub fn select(&mut self, stop: Stop) -> Transition {
        let already_showing = self.screen != Screen::Listing && self.selection.is(&stop.id);

        self.selection = SelectionState {
            stop: Some(stop.clone()),
        };
        self.screen = Screen::StopSelected;

        if self.capability.can_navigate() {
            self.screen = Screen::ViewingArrivals;
        }

        tracing::info!("selected stop {} ({}), now {}", stop.id, stop.name, self.screen);

        Transition {
            screen: self.screen,
            fetch: (!already_showing).then(|| stop.clone()),
            notice: SelectionNotice {
                stop,
                listeners: self.listeners.clone(),
            },
        }
    }

    /// Return to the stop list. The selection stays.
    pub fn back(&mut self) -> Screen {
        if self.screen != Screen::Listing {
            tracing::info!("back from {} to {}", self.screen, Screen::Listing);
            self.screen = Screen::Listing;
        }
        self.screen
    }

    /// Stop whose arrivals a manual refresh should re-fetch.
    pub fn refresh(&self) -> Option<Stop> {
        self.selection.stop.clone()
    }
}

impl fmt::Debug for SelectionFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionFlow")
            .field("screen", &self.screen)
            .field("selection", &self.selection)
            .field("capability", &self.capability)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn stop(id: &str) -> Stop {
        Stop::new(id, format!("Stop {id}"))
    }

    #[test]
    fn test_starts_listing() {
        let flow = SelectionFlow::new(NavigationCapability::DetailScreen);
        assert_eq!(flow.screen(), Screen::Listing);
        assert!(flow.selection().stop().is_none());
        assert!(flow.refresh().is_none());
    }

    #[test]
    fn test_mobile_navigates_to_arrivals() {
        let mut flow = SelectionFlow::new(NavigationCapability::DetailScreen);

        let transition = flow.select(stop("1"));
        assert_eq!(transition.screen, Screen::ViewingArrivals);
        assert_eq!(transition.fetch, Some(stop("1")));
        assert_eq!(flow.selection().stop(), Some(&stop("1")));
    }

    #[test]
    fn test_inline_host_stays_selected() {
        let mut flow = SelectionFlow::new(NavigationCapability::InlineOnly);

        let transition = flow.select(stop("1"));
        assert_eq!(transition.screen, Screen::StopSelected);
        assert_eq!(transition.fetch, Some(stop("1")));

        // Same stop again: nothing new to fetch
        let again = flow.select(stop("1"));
        assert_eq!(again.fetch, None);

        let other = flow.select(stop("2"));
        assert_eq!(other.screen, Screen::StopSelected);
        assert_eq!(other.fetch, Some(stop("2")));
        assert_eq!(flow.selection().stop(), Some(&stop("2")));
    }

    #[test]
    fn test_back_keeps_selection() {
        let mut flow = SelectionFlow::new(NavigationCapability::DetailScreen);
        flow.select(stop("1"));

        assert_eq!(flow.back(), Screen::Listing);
        assert_eq!(flow.selection().stop(), Some(&stop("1")));
        assert_eq!(flow.back(), Screen::Listing);

        // Re-entering from the list refreshes even for the same stop
        let transition = flow.select(stop("1"));
        assert_eq!(transition.fetch, Some(stop("1")));
        assert_eq!(flow.refresh(), Some(stop("1")));
    }

    #[test]
    fn test_listeners_see_each_selection() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut flow = SelectionFlow::new(NavigationCapability::InlineOnly);

        let sink = seen.clone();
        flow.subscribe(Arc::new(move |stop: &Stop| {
            sink.lock().unwrap().push(stop.id.to_string())
        }));

        let first = flow.select(stop("1"));
        let second = flow.select(stop("2"));
        assert!(seen.lock().unwrap().is_empty());

        assert_eq!(second.notice.stop(), &stop("2"));
        first.notice.deliver();
        second.notice.deliver();

        assert_eq!(*seen.lock().unwrap(), vec!["1", "2"]);
    }
}
