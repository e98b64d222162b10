//! Which screens the router may show for a given [`AuthStatus`].
//!
//! This is a routing contract, not an access control boundary: the server
//! enforces authorization on every request.

use super::models::AuthStatus;

/// Every routable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Sign in with email, mobile number or username.
    Login,
    /// Register a new company (tenant).
    CompanyRegistration,
    /// Add the partners of a freshly registered company.
    PartnerSetup,
    /// Landing page after login.
    Dashboard,
    /// Create a friend who lends cards.
    AddFriend,
    /// Create a card.
    AddCard,
    /// Filterable card catalog.
    CardsList,
    /// Record a phone booking.
    AddBooking,
    /// Create and rename platforms.
    PlatformsManagement,
    /// Seller payments with filters.
    SellerPaymentsList,
    /// Record a seller payment.
    AddSellerPayment,
}

/// Screens reachable without a session. The first entry is the entry point.
pub const PUBLIC_SCREENS: &[Screen] = &[
    Screen::Login,
    Screen::CompanyRegistration,
    Screen::PartnerSetup,
];

/// Screens reachable with a session. The first entry is the entry point.
pub const PROTECTED_SCREENS: &[Screen] = &[
    Screen::Dashboard,
    Screen::AddFriend,
    Screen::AddCard,
    Screen::CardsList,
    Screen::AddBooking,
    Screen::PlatformsManagement,
    Screen::SellerPaymentsList,
    Screen::AddSellerPayment,
];

/// What the router renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    /// Session still loading; show a spinner and nothing else.
    Loading,
    /// Signed out.
    Public,
    /// Signed in.
    Protected,
}

impl GateView {
    /// Screens available in this view. Empty while loading.
    pub fn screens(self) -> &'static [Screen] {
        match self {
            Self::Loading => &[],
            Self::Public => PUBLIC_SCREENS,
            Self::Protected => PROTECTED_SCREENS,
        }
    }

    /// Screen to land on, if any.
    pub fn initial_screen(self) -> Option<Screen> {
        self.screens().first().copied()
    }

    /// Whether `screen` may be shown in this view.
    pub fn is_reachable(self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }
}

/// Pure mapping from session status to view.
pub fn navigation_gate(status: AuthStatus) -> GateView {
    match status {
        AuthStatus::Pending => GateView::Loading,
        AuthStatus::Authenticated => GateView::Protected,
        AuthStatus::Unauthenticated => GateView::Public,
    }
}
