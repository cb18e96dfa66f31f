use crate::core::fade::Fade;
use crate::core::settings::PopupSettings;
use crate::core::{PopupCallback, PopupConfig, PopupDismissed, PopupResponse};
use bevy::prelude::*;
use bevy::ui::FocusPolicy;
pub use template::{PopupTemplate, StandardPopupTemplate};

mod template;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

/// State of the single reusable popup. Lives on the popup root entity.
///
/// The component only holds data. `sync_popup_views` pushes it into the bevy_ui parts of
/// the popup, `animate_popups` advances the fade, and `handle_popup_buttons` routes clicks.
#[derive(Component, Default)]
pub struct PopupView {
    state: PopupState,
    alpha: f32,
    interactable: bool,
    captures_input: bool,
    title: String,
    message: String,
    confirm_label: String,
    cancel_label: String,
    cancel_visible: bool,
    close_visible: bool,
    on_confirm: Option<PopupCallback>,
    on_cancel: Option<PopupCallback>,
    fade: Option<Fade>,
    fade_out_duration: f32,
}

impl PopupView {
    /// Applies a request and starts fading in. Previous callbacks and any running fade are replaced.
    pub fn setup(&mut self, config: PopupConfig, settings: &PopupSettings) {
        let layout = config
            .popup_type
            .layout(&config.confirm_label, &config.cancel_label);

        self.title = config.title;
        self.message = config.message;
        self.confirm_label = layout.confirm_label.clone();
        self.cancel_visible = layout.cancel_visible();
        self.cancel_label = layout.cancel_label.unwrap_or_default();
        self.close_visible = config.require_close_button;

        self.on_confirm = config.on_confirm;
        self.on_cancel = config.on_cancel;

        self.fade_out_duration = settings.fade_out_duration;
        self.fade_in(settings.fade_in_duration);
    }

    pub fn confirm(&mut self) -> bool {
        if !self.accepts_clicks() {
            return false;
        }
        if let Some(callback) = self.on_confirm.as_mut() {
            callback();
        }
        self.fade_out();
        true
    }

    pub fn cancel(&mut self) -> bool {
        if !self.accepts_clicks() || !self.cancel_visible {
            return false;
        }
        if let Some(callback) = self.on_cancel.as_mut() {
            callback();
        }
        self.fade_out();
        true
    }

    pub fn close(&mut self) -> bool {
        if !self.accepts_clicks() || !self.close_visible {
            return false;
        }
        self.fade_out();
        true
    }

    pub fn respond(&mut self, response: PopupResponse) -> bool {
        match response {
            PopupResponse::Confirmed => self.confirm(),
            PopupResponse::Cancelled => self.cancel(),
            PopupResponse::Closed => self.close(),
        }
    }

    /// Advances the current fade and returns the new state when a transition happened.
    pub fn tick(&mut self, dt: f32) -> Option<PopupState> {
        let fade = self.fade.as_mut()?;
        self.alpha = fade.tick(dt);
        if fade.is_complete() {
            return Some(self.finish_fade());
        }
        None
    }

    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn interactable(&self) -> bool {
        self.interactable
    }

    pub fn captures_input(&self) -> bool {
        self.captures_input
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn confirm_label(&self) -> &str {
        &self.confirm_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    pub fn cancel_visible(&self) -> bool {
        self.cancel_visible
    }

    pub fn close_visible(&self) -> bool {
        self.close_visible
    }

    fn accepts_clicks(&self) -> bool {
        self.state == PopupState::Visible && self.interactable
    }

    fn fade_in(&mut self, duration: f32) {
        self.captures_input = true;
        self.interactable = false;
        self.state = PopupState::FadingIn;
        self.start_fade(Fade::new(0.0, 1.0, duration));
    }

    fn fade_out(&mut self) {
        self.state = PopupState::FadingOut;
        self.start_fade(Fade::new(1.0, 0.0, self.fade_out_duration));
    }

    // one animation slot: starting a fade drops whatever was running
    fn start_fade(&mut self, fade: Fade) {
        self.alpha = fade.alpha();
        if fade.is_complete() {
            self.fade = None;
            self.finish_fade();
        } else {
            self.fade = Some(fade);
        }
    }

    fn finish_fade(&mut self) -> PopupState {
        self.fade = None;
        match self.state {
            PopupState::FadingIn => {
                self.alpha = 1.0;
                self.interactable = true;
                self.state = PopupState::Visible;
            }
            PopupState::FadingOut => {
                self.alpha = 0.0;
                self.interactable = false;
                self.captures_input = false;
                self.state = PopupState::Hidden;
            }
            _ => {}
        }
        self.state
    }
}

#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PopupButton {
    Confirm,
    Cancel,
    Close,
}

impl PopupButton {
    pub fn response(self) -> PopupResponse {
        match self {
            PopupButton::Confirm => PopupResponse::Confirmed,
            PopupButton::Cancel => PopupResponse::Cancelled,
            PopupButton::Close => PopupResponse::Closed,
        }
    }
}

#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PopupText {
    Title,
    Message,
    ConfirmLabel,
    CancelLabel,
}

/// Root entity of the popup a part belongs to.
#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub struct PopupOwner(pub Entity);

/// Fully opaque color of a part. The rendered color is this scaled by the popup alpha.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub struct PopupTint(pub Color);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PopupSet {
    Input,
    Animate,
    Sync,
}

pub fn handle_popup_buttons(
    buttons: Query<(&Interaction, &PopupButton, &PopupOwner), Changed<Interaction>>,
    mut views: Query<&mut PopupView>,
    mut dismissed: EventWriter<PopupDismissed>,
) {
    for (interaction, button, owner) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        let Ok(mut view) = views.get_mut(owner.0) else {
            warn!("[PopupView] {:?} button has no popup view on {:?}", button, owner.0);
            continue;
        };

        let response = button.response();
        if view.respond(response) {
            dismissed.send(PopupDismissed {
                popup: owner.0,
                response,
            });
        } else {
            debug!("[PopupView] Ignored {:?} click while {:?}", button, view.state());
        }
    }
}

pub fn animate_popups(time: Res<Time>, mut views: Query<(Entity, &mut PopupView)>) {
    let dt = time.delta_seconds();
    for (entity, mut view) in views.iter_mut() {
        if !view.is_animating() {
            continue;
        }
        if let Some(state) = view.tick(dt) {
            debug!("[PopupView] {:?} is now {:?}", entity, state);
        }
    }
}

fn tinted(base: Color, alpha: f32) -> Color {
    base.with_a(base.a() * alpha)
}

fn visibility(shown: bool) -> Visibility {
    if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

pub fn sync_popup_views(
    mut views: Query<(
        &PopupView,
        &mut Visibility,
        &mut FocusPolicy,
        Option<&PopupTint>,
        Option<&mut BackgroundColor>,
    )>,
    mut parts: Query<
        (
            &PopupOwner,
            Option<&PopupText>,
            Option<&PopupButton>,
            Option<&PopupTint>,
            Option<&mut Text>,
            Option<&mut BackgroundColor>,
            Option<&mut Visibility>,
        ),
        Without<PopupView>,
    >,
) {
    for (view, mut root_visibility, mut focus, tint, background) in views.iter_mut() {
        let shown = visibility(view.state() != PopupState::Hidden);
        if *root_visibility != shown {
            *root_visibility = shown;
        }

        let policy = if view.captures_input() {
            FocusPolicy::Block
        } else {
            FocusPolicy::Pass
        };
        if *focus != policy {
            *focus = policy;
        }

        if let (Some(tint), Some(mut background)) = (tint, background) {
            let color = tinted(tint.0, view.alpha());
            if background.0 != color {
                background.0 = color;
            }
        }
    }

    for (owner, text_part, button, tint, text, background, part_visibility) in parts.iter_mut() {
        let Ok((view, ..)) = views.get(owner.0) else {
            continue;
        };

        if let Some(mut text) = text {
            if let Some(section) = text.sections.first() {
                let value = match text_part {
                    Some(PopupText::Title) => Some(view.title()),
                    Some(PopupText::Message) => Some(view.message()),
                    Some(PopupText::ConfirmLabel) => Some(view.confirm_label()),
                    Some(PopupText::CancelLabel) => Some(view.cancel_label()),
                    None => None,
                };
                let color = tint.map(|tint| tinted(tint.0, view.alpha()));

                let value_changed = value.map_or(false, |value| section.value != value);
                let color_changed = color.map_or(false, |color| section.style.color != color);
                if value_changed || color_changed {
                    let section = &mut text.sections[0];
                    if let Some(value) = value {
                        section.value = value.to_string();
                    }
                    if let Some(color) = color {
                        section.style.color = color;
                    }
                }
            }
        }

        if let (Some(tint), Some(mut background)) = (tint, background) {
            let color = tinted(tint.0, view.alpha());
            if background.0 != color {
                background.0 = color;
            }
        }

        if let (Some(button), Some(mut part_visibility)) = (button, part_visibility) {
            let shown = visibility(match button {
                PopupButton::Confirm => true,
                PopupButton::Cancel => view.cancel_visible(),
                PopupButton::Close => view.close_visible(),
            });
            if *part_visibility != shown {
                *part_visibility = shown;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PopupType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn shown(view: &mut PopupView, config: PopupConfig, settings: &PopupSettings) {
        view.setup(config, settings);
        while view.tick(1.0 / 60.0).is_none() && view.is_animating() {}
        assert_eq!(view.state(), PopupState::Visible);
    }

    #[test]
    fn setup_starts_fade_in_with_input_captured() {
        let mut view = PopupView::default();
        view.setup(PopupConfig::new("T", "M", PopupType::Ok), &PopupSettings::default());

        assert_eq!(view.state(), PopupState::FadingIn);
        assert_eq!(view.alpha(), 0.0);
        assert!(view.captures_input());
        assert!(!view.interactable());

        assert_eq!(view.tick(0.1), None);
        assert_eq!(view.tick(0.25), Some(PopupState::Visible));
        assert_eq!(view.alpha(), 1.0);
        assert!(view.interactable());
        assert!(!view.is_animating());
    }

    #[test]
    fn instant_settings_skip_intermediate_frames() {
        let mut view = PopupView::default();
        view.setup(PopupConfig::new("T", "M", PopupType::Ok), &PopupSettings::instant());
        assert_eq!(view.state(), PopupState::Visible);
        assert_eq!(view.alpha(), 1.0);

        assert!(view.confirm());
        assert_eq!(view.state(), PopupState::Hidden);
        assert_eq!(view.alpha(), 0.0);
        assert!(!view.interactable());
        assert!(!view.captures_input());
    }

    #[test]
    fn ok_popup_hides_cancel_regardless_of_other_options() {
        let mut view = PopupView::default();
        let config = PopupConfig::new("T", "M", PopupType::Ok)
            .with_labels("A", "B")
            .with_close_button(true)
            .follow_camera(true);
        view.setup(config, &PopupSettings::instant());

        assert_eq!(view.confirm_label(), "OK");
        assert!(!view.cancel_visible());
        assert!(view.close_visible());
        assert!(!view.cancel());
        assert_eq!(view.state(), PopupState::Visible);
    }

    #[test]
    fn confirm_calls_callback_once_then_fades_out() {
        let settings = PopupSettings::default();
        let (confirmed, on_confirm) = counter();
        let (cancelled, on_cancel) = counter();
        let mut view = PopupView::default();
        let config = PopupConfig::new("T", "M", PopupType::OkCancel)
            .on_confirm(on_confirm)
            .on_cancel(on_cancel);
        shown(&mut view, config, &settings);

        assert!(view.confirm());
        assert_eq!(view.state(), PopupState::FadingOut);
        assert!(!view.confirm());
        assert!(!view.cancel());

        let mut samples = vec![view.alpha()];
        while view.is_animating() {
            view.tick(1.0 / 60.0);
            samples.push(view.alpha());
        }
        assert_eq!(samples.first(), Some(&1.0));
        assert_eq!(samples.last(), Some(&0.0));
        assert!(samples.windows(2).all(|w| w[1] < w[0]));

        assert_eq!(confirmed.load(Ordering::SeqCst), 1);
        assert_eq!(cancelled.load(Ordering::SeqCst), 0);
        assert_eq!(view.state(), PopupState::Hidden);
    }

    #[test]
    fn close_fades_out_without_callbacks() {
        let (confirmed, on_confirm) = counter();
        let (cancelled, on_cancel) = counter();
        let mut view = PopupView::default();
        let config = PopupConfig::new("T", "M", PopupType::YesNo)
            .on_confirm(on_confirm)
            .on_cancel(on_cancel)
            .with_close_button(true);
        view.setup(config, &PopupSettings::instant());

        assert!(view.close());
        assert_eq!(view.state(), PopupState::Hidden);
        assert_eq!(confirmed.load(Ordering::SeqCst), 0);
        assert_eq!(cancelled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn close_requires_close_button() {
        let mut view = PopupView::default();
        view.setup(PopupConfig::new("T", "M", PopupType::Ok), &PopupSettings::instant());
        assert!(!view.close());
        assert_eq!(view.state(), PopupState::Visible);
    }

    #[test]
    fn clicks_during_fade_in_are_ignored() {
        let (confirmed, on_confirm) = counter();
        let mut view = PopupView::default();
        let config = PopupConfig::new("T", "M", PopupType::Ok).on_confirm(on_confirm);
        view.setup(config, &PopupSettings::default());

        assert!(!view.confirm());
        assert_eq!(confirmed.load(Ordering::SeqCst), 0);
        assert_eq!(view.state(), PopupState::FadingIn);
    }

    #[test]
    fn setup_replaces_callbacks_instead_of_accumulating() {
        let settings = PopupSettings::instant();
        let (first, on_first) = counter();
        let (second, on_second) = counter();
        let mut view = PopupView::default();

        view.setup(PopupConfig::new("T", "M", PopupType::Ok).on_confirm(on_first), &settings);
        view.setup(PopupConfig::new("T2", "M2", PopupType::Ok).on_confirm(on_second), &settings);
        assert!(view.confirm());

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(view.title(), "T2");
        assert_eq!(view.message(), "M2");
    }

    #[test]
    fn setup_during_fade_out_cancels_it() {
        let settings = PopupSettings::default();
        let mut view = PopupView::default();
        shown(&mut view, PopupConfig::new("T", "M", PopupType::Ok), &settings);

        assert!(view.confirm());
        view.tick(0.1);
        assert_eq!(view.state(), PopupState::FadingOut);

        view.setup(PopupConfig::new("T", "M", PopupType::Ok), &settings);
        assert_eq!(view.state(), PopupState::FadingIn);
        assert_eq!(view.alpha(), 0.0);

        let mut previous = view.alpha();
        while view.is_animating() {
            view.tick(1.0 / 60.0);
            assert!(view.alpha() > previous);
            previous = view.alpha();
        }
        assert_eq!(view.state(), PopupState::Visible);
    }

    #[test]
    fn custom_labels_and_close_button() {
        let mut view = PopupView::default();
        let config = PopupConfig::new("T", "M", PopupType::Custom)
            .with_labels("A", "B")
            .with_close_button(true);
        view.setup(config, &PopupSettings::instant());

        assert_eq!(view.confirm_label(), "A");
        assert_eq!(view.cancel_label(), "B");
        assert!(view.cancel_visible());
        assert!(view.close_visible());
    }
}
