// ABOUTME: History-stack router implementing the navigation contract

use tracing::info;

use crate::services::{Navigator, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    history: Vec<Route>,
    /// Bumped on every navigation so the app knows to remount
    generation: u64,
}

impl Router {
    pub fn new(root: Route) -> Self {
        Self {
            history: vec![root],
            generation: 0,
        }
    }

    /// `None` once the root has been popped
    pub fn current(&self) -> Option<Route> {
        self.history.last().copied()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Navigator for Router {
    fn go_to(&mut self, route: Route) {
        info!(?route, "navigate: go_to");
        self.history.push(route);
        self.generation += 1;
    }

    fn go_back(&mut self) {
        let popped = self.history.pop();
        info!(?popped, current = ?self.current(), "navigate: go_back");
        self.generation += 1;
    }

    fn replace(&mut self, route: Route) {
        info!(?route, "navigate: replace");
        self.history.pop();
        self.history.push(route);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_stack() {
        let mut router = Router::new(Route::Splash);
        router.replace(Route::Gateway);
        router.go_to(Route::MobileVerification);
        assert_eq!(router.history(), &[Route::Gateway, Route::MobileVerification]);

        router.go_back();
        assert_eq!(router.current(), Some(Route::Gateway));
        assert_eq!(router.generation(), 3);

        router.go_back();
        assert!(router.is_empty());
    }
}
