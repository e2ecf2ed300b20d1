//! Screen implementations. Each screen is a top-level Component.

pub mod analytics;
pub mod users;

use roster_core::{DirectoryClient, UserForm};

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
///
/// The users screen gets a clone of the form controller so it can render
/// and edit the shared draft.
pub fn create_screens(form: UserForm<DirectoryClient>) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Users, Box::new(users::UsersScreen::new(form))),
        (
            ScreenId::Analytics,
            Box::new(analytics::AnalyticsScreen::new()),
        ),
    ]
}
