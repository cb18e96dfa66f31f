use super::{PopupButton, PopupOwner, PopupText, PopupTint, PopupView};
use crate::bail;
use crate::error::{EResult, ErrorKind};
use bevy::prelude::*;
use bevy::ui::FocusPolicy;

/// Builds a fresh popup entity hierarchy. The returned entity must carry a [`PopupView`].
pub trait PopupTemplate: Send + Sync {
    fn instantiate(&self, world: &mut World, parent: Entity) -> EResult<Entity>;
}

/// Panel with a title, a message, confirm/cancel buttons and a close "X" in the corner.
pub struct StandardPopupTemplate {
    pub width: f32,
    pub panel_color: Color,
    pub button_color: Color,
    pub text_color: Color,
    pub title_size: f32,
    pub message_size: f32,
    pub label_size: f32,
}

impl Default for StandardPopupTemplate {
    fn default() -> Self {
        Self {
            width: 420.,
            panel_color: Color::rgba(0.12, 0.12, 0.14, 0.95),
            button_color: Color::rgb(0.25, 0.35, 0.6),
            text_color: Color::WHITE,
            title_size: 28.,
            message_size: 20.,
            label_size: 20.,
        }
    }
}

impl StandardPopupTemplate {
    fn text(&self, size: f32) -> TextBundle {
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: size,
                color: self.text_color.with_a(0.),
                ..default()
            },
        )
    }

    fn button(&self, style: Style) -> ButtonBundle {
        ButtonBundle {
            style,
            background_color: self.button_color.with_a(0.).into(),
            ..default()
        }
    }

    fn action_button_style() -> Style {
        Style {
            min_width: Val::Px(120.),
            height: Val::Px(44.),
            padding: UiRect::horizontal(Val::Px(12.)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        }
    }
}

impl PopupTemplate for StandardPopupTemplate {
    fn instantiate(&self, world: &mut World, parent: Entity) -> EResult<Entity> {
        if world.get_entity(parent).is_none() {
            bail!(
                ErrorKind::Configuration,
                "POPUP_TEMPLATE::INSTANTIATE::PARENT_NOT_FOUND",
                format!("{:?}", parent)
            );
        }

        let root = world
            .spawn((
                NodeBundle {
                    style: Style {
                        width: Val::Px(self.width),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(20.)),
                        row_gap: Val::Px(14.),
                        ..default()
                    },
                    background_color: self.panel_color.with_a(0.).into(),
                    focus_policy: FocusPolicy::Pass,
                    visibility: Visibility::Hidden,
                    ..default()
                },
                PopupView::default(),
                PopupTint(self.panel_color),
                Name::new("Popup"),
            ))
            .id();
        let owner = PopupOwner(root);
        let text_tint = PopupTint(self.text_color);
        let button_tint = PopupTint(self.button_color);

        world.entity_mut(root).with_children(|popup| {
            popup.spawn((
                self.button(Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(6.),
                    right: Val::Px(6.),
                    width: Val::Px(28.),
                    height: Val::Px(28.),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                }),
                PopupButton::Close,
                owner,
                button_tint,
            ))
            .with_children(|close| {
                let mut label = self.text(self.label_size);
                label.text.sections[0].value = "X".to_string();
                close.spawn((label, owner, text_tint));
            });

            popup.spawn((self.text(self.title_size), PopupText::Title, owner, text_tint));
            popup.spawn((
                self.text(self.message_size),
                PopupText::Message,
                owner,
                text_tint,
            ));

            popup
                .spawn(NodeBundle {
                    style: Style {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(16.),
                        ..default()
                    },
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        self.button(Self::action_button_style()),
                        PopupButton::Confirm,
                        owner,
                        button_tint,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            self.text(self.label_size),
                            PopupText::ConfirmLabel,
                            owner,
                            text_tint,
                        ));
                    });

                    row.spawn((
                        self.button(Self::action_button_style()),
                        PopupButton::Cancel,
                        owner,
                        button_tint,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            self.text(self.label_size),
                            PopupText::CancelLabel,
                            owner,
                            text_tint,
                        ));
                    });
                });
        });

        world.entity_mut(parent).push_children(&[root]);
        Ok(root)
    }
}
