use bevy::prelude::*;

pub mod fade;
pub mod settings;

pub type PopupCallback = Box<dyn FnMut() + Send + Sync>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PopupType {
    Ok,
    OkCancel,
    YesNo,
    Custom,
    /// Behaves like `Custom`. Reading a text field value is not supported yet.
    InputFieldCustom,
}

/// Labels and visibility of the two action buttons for one popup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLayout {
    pub confirm_label: String,
    pub cancel_label: Option<String>,
}

impl ButtonLayout {
    pub fn cancel_visible(&self) -> bool {
        self.cancel_label.is_some()
    }
}

impl PopupType {
    /// Caller labels are only used by `Custom` and `InputFieldCustom`.
    pub fn layout(self, confirm_label: &str, cancel_label: &str) -> ButtonLayout {
        let (confirm, cancel) = match self {
            PopupType::Ok => ("OK", None),
            PopupType::OkCancel => ("OK", Some("Cancel")),
            PopupType::YesNo => ("Yes", Some("No")),
            PopupType::Custom | PopupType::InputFieldCustom => {
                (confirm_label, Some(cancel_label))
            }
        };

        ButtonLayout {
            confirm_label: confirm.to_string(),
            cancel_label: cancel.map(str::to_string),
        }
    }
}

/// One popup request. Transient: consumed by the view on setup.
pub struct PopupConfig {
    pub title: String,
    pub message: String,
    pub popup_type: PopupType,
    pub on_confirm: Option<PopupCallback>,
    pub on_cancel: Option<PopupCallback>,
    pub require_close_button: bool,
    pub follow_camera: bool,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl PopupConfig {
    pub fn new(title: impl Into<String>, message: impl Into<String>, popup_type: PopupType) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            popup_type,
            on_confirm: None,
            on_cancel: None,
            require_close_button: false,
            follow_camera: false,
            confirm_label: String::new(),
            cancel_label: String::new(),
        }
    }

    pub fn on_confirm(mut self, callback: impl FnMut() + Send + Sync + 'static) -> Self {
        self.on_confirm = Some(Box::new(callback));
        self
    }

    pub fn on_cancel(mut self, callback: impl FnMut() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    pub fn with_close_button(mut self, required: bool) -> Self {
        self.require_close_button = required;
        self
    }

    pub fn follow_camera(mut self, follow: bool) -> Self {
        self.follow_camera = follow;
        self
    }

    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PopupResponse {
    Confirmed,
    Cancelled,
    Closed,
}

/// Sent whenever a click on a popup button was accepted and the popup started fading out.
#[derive(Event, Debug, Clone)]
pub struct PopupDismissed {
    pub popup: Entity,
    pub response: PopupResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_types_ignore_caller_labels() {
        let ok = PopupType::Ok.layout("A", "B");
        assert_eq!(ok.confirm_label, "OK");
        assert!(!ok.cancel_visible());

        let ok_cancel = PopupType::OkCancel.layout("A", "B");
        assert_eq!(ok_cancel.confirm_label, "OK");
        assert_eq!(ok_cancel.cancel_label.as_deref(), Some("Cancel"));

        let yes_no = PopupType::YesNo.layout("A", "B");
        assert_eq!(yes_no.confirm_label, "Yes");
        assert_eq!(yes_no.cancel_label.as_deref(), Some("No"));
    }

    #[test]
    fn custom_types_use_caller_labels() {
        for popup_type in [PopupType::Custom, PopupType::InputFieldCustom] {
            let layout = popup_type.layout("Option 1", "Option 2");
            assert_eq!(layout.confirm_label, "Option 1");
            assert_eq!(layout.cancel_label.as_deref(), Some("Option 2"));
            assert!(layout.cancel_visible());
        }
    }

    #[test]
    fn config_defaults() {
        let config = PopupConfig::new("T", "M", PopupType::Ok);
        assert!(config.on_confirm.is_none());
        assert!(config.on_cancel.is_none());
        assert!(!config.require_close_button);
        assert!(!config.follow_camera);
        assert!(config.confirm_label.is_empty());
        assert!(config.cancel_label.is_empty());
    }
}
