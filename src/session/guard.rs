//! Navigation guard: decides whether a protected view may render.
//!
//! The decision is recomputed on every navigation attempt; nothing is
//! cached across navigations, so an explicit logout re-gates immediately.

use std::sync::Arc;

use super::SessionStore;

/// Access requirement declared by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any authenticated session.
    Authenticated,
    /// A session whose role set carries the admin marker.
    AdminOnly,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The store has not finished bootstrapping; show a neutral waiting
    /// indicator, neither content nor a redirect.
    Loading,
    /// Render the requested view.
    Authorized,
    /// No session: go to the login view.
    RedirectToLogin,
    /// Session present but lacking the admin role: go to the landing
    /// view, not an error page.
    RedirectToDashboard,
}

#[derive(Clone)]
pub struct RouteGuard {
    store: Arc<SessionStore>,
}

impl RouteGuard {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    pub fn check(&self, policy: AccessPolicy) -> GuardDecision {
        if !self.store.is_bootstrapped() {
            return GuardDecision::Loading;
        }
        if !self.store.is_authenticated() {
            return GuardDecision::RedirectToLogin;
        }
        if policy == AccessPolicy::AdminOnly && !self.store.is_admin() {
            return GuardDecision::RedirectToDashboard;
        }
        GuardDecision::Authorized
    }
}
