//! In-plugin navigation history.
//!
//! The navigator owns the current [`Route`] and a back stack. Every
//! navigation pushes the route it leaves; going back pops it. Home always
//! lands on the list and keeps history so "back" returns to where the user was.

use crate::infrastructure::Route;
use serde::{Deserialize, Serialize};

/// Oldest entries are discarded past this depth.
const MAX_HISTORY: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigator {
    current: Route,
    history: Vec<Route>,
}

impl Navigator {
    #[must_use]
    pub fn starting_at(path: &str) -> Self {
        Self { current: Route::parse(path), history: Vec::new() }
    }

    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Moves to `route`. Navigating to the current route is a no-op.
    ///
    /// Returns `true` when the route changed.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        tracing::debug!(from = %self.current, to = %route, "navigate");
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        true
    }

    /// Returns to the previous route, or to the list when history is empty.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(route) => {
                self.current = route;
                true
            }
            None if self.current != Route::List => {
                self.current = Route::List;
                true
            }
            None => false,
        }
    }

    pub fn home(&mut self) -> bool {
        self.navigate(Route::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_retraces_history() {
        let mut nav = Navigator::default();
        assert!(nav.navigate(Route::detail("路痴哥")));
        assert!(nav.navigate(Route::detail("报备哥")));
        assert!(nav.back());
        assert_eq!(nav.current(), &Route::detail("路痴哥"));
        assert!(nav.back());
        assert_eq!(nav.current(), &Route::List);
        assert!(!nav.back());
    }

    #[test]
    fn deep_link_backs_out_to_list() {
        let mut nav = Navigator::starting_at("/title/%E4%B8%8D%E5%AD%98%E5%9C%A8");
        assert_eq!(nav.current(), &Route::detail("不存在"));
        assert!(!nav.can_go_back());
        assert!(nav.back());
        assert_eq!(nav.current(), &Route::List);
    }

    #[test]
    fn navigating_to_current_route_is_noop() {
        let mut nav = Navigator::default();
        assert!(!nav.home());
        assert!(!nav.can_go_back());
    }
}
