#[macro_use]
pub mod error;
pub mod core;
pub mod logs;
pub mod modules;
pub mod plugin;

pub use crate::core::fade::Fade;
pub use crate::core::settings::PopupSettings;
pub use crate::core::{
    ButtonLayout, PopupCallback, PopupConfig, PopupDismissed, PopupResponse, PopupType,
};
pub use crate::error::{EResult, Error, ErrorKind};
pub use crate::logs::{LogBuffer, LogBufferPlugin, PushLog};
pub use crate::modules::controller::{
    register_controller, PopupAppExt, PopupCommandsExt, PopupController, ShowPopup,
};
pub use crate::modules::follow::{CameraFollow, FollowMode};
pub use crate::modules::view::{
    PopupButton, PopupOwner, PopupSet, PopupState, PopupTemplate, PopupText, PopupTint,
    PopupView, StandardPopupTemplate,
};
pub use crate::plugin::PopupPlugin;
