use bevy::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Reflect)]
pub enum FollowMode {
    #[default]
    None,
    Follow,
}

impl From<bool> for FollowMode {
    fn from(follow: bool) -> Self {
        if follow {
            FollowMode::Follow
        } else {
            FollowMode::None
        }
    }
}

/// Switch for whatever keeps the popup container in front of the viewer.
/// Popups only write the mode, the movement itself belongs to the host.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct CameraFollow {
    pub mode: FollowMode,
}
