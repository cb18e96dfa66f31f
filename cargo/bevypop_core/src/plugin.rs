use crate::core::settings::PopupSettings;
use crate::core::PopupDismissed;
use crate::modules::controller::validate_popup_controller;
use crate::modules::follow::{CameraFollow, FollowMode};
use crate::modules::view::{animate_popups, handle_popup_buttons, sync_popup_views, PopupSet};
use bevy::prelude::*;

/// Registers popup settings, events and the per-frame systems.
///
/// The controller itself is not created here, the app inserts it with
/// [`crate::PopupAppExt::insert_popup_controller`].
#[derive(Default)]
pub struct PopupPlugin {
    settings: Option<PopupSettings>,
}

impl PopupPlugin {
    pub fn with_settings(settings: PopupSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }
}

impl Plugin for PopupPlugin {
    fn build(&self, app: &mut App) {
        match &self.settings {
            Some(settings) => app.insert_resource(settings.clone()),
            None => app.init_resource::<PopupSettings>(),
        };

        app.register_type::<CameraFollow>()
            .register_type::<FollowMode>()
            .add_event::<PopupDismissed>()
            .configure_sets(
                Update,
                (PopupSet::Input, PopupSet::Animate, PopupSet::Sync).chain(),
            )
            .add_systems(PostStartup, validate_popup_controller)
            .add_systems(Update, handle_popup_buttons.in_set(PopupSet::Input))
            .add_systems(Update, animate_popups.in_set(PopupSet::Animate))
            .add_systems(Update, sync_popup_views.in_set(PopupSet::Sync));
    }
}
