use bevy::prelude::*;
use bevypop_core::logs::Level;
use bevypop_core::{
    CameraFollow, LogBufferPlugin, PopupAppExt, PopupCommandsExt, PopupConfig, PopupController,
    PopupDismissed, PopupPlugin, PopupSettings, PopupType, PushLog, StandardPopupTemplate,
};

const SETTINGS_PATH: &str = "./popup.ron";

fn main() {
    let (settings, load_error) = match PopupSettings::load_or_default(SETTINGS_PATH) {
        Ok(settings) => (settings, None),
        Err(e) => (PopupSettings::default(), Some(e.to_string())),
    };

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins((LogBufferPlugin, PopupPlugin::with_settings(settings)))
        .insert_popup_controller(
            PopupController::new().with_template(StandardPopupTemplate::default()),
        )
        .insert_resource(SettingsLoadError(load_error))
        .add_systems(Startup, (setup_scene, report_settings_error))
        .add_systems(Update, (show_popups, log_dismissed))
        .run();
}

/// Settings are read before the log plugin exists, so a failure is kept until startup.
#[derive(Resource)]
struct SettingsLoadError(Option<String>);

fn report_settings_error(error: Res<SettingsLoadError>, mut writer: EventWriter<PushLog>) {
    if let Some(error) = &error.0 {
        let message = format!("Using default popup settings: {}", error);
        warn!("{}", message);
        writer.send(PushLog(message, Level::Warn));
    }
}

fn setup_scene(mut commands: Commands, mut controller: ResMut<PopupController>) {
    commands.spawn(Camera2dBundle::default());

    let parent = commands
        .spawn((
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.),
                    height: Val::Percent(100.),
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                ..default()
            },
            Name::new("Popup Parent"),
        ))
        .id();
    let anchor = commands
        .spawn((
            SpatialBundle::default(),
            CameraFollow::default(),
            Name::new("Popup Anchor"),
        ))
        .id();

    controller.set_parent(parent);
    controller.set_follow(anchor);
}

fn show_popups(keys: Res<Input<KeyCode>>, mut commands: Commands) {
    if keys.just_pressed(KeyCode::Key1) {
        commands.show_popup(
            PopupConfig::new("Information", "This is an OK popup.", PopupType::Ok)
                .on_confirm(|| info!("OK Clicked"))
                .follow_camera(true),
        );
    }

    if keys.just_pressed(KeyCode::Key2) {
        commands.show_popup(
            PopupConfig::new("Confirmation", "Do you want to continue?", PopupType::OkCancel)
                .on_confirm(|| info!("OK Clicked"))
                .on_cancel(|| info!("Cancel Clicked")),
        );
    }

    if keys.just_pressed(KeyCode::Key3) {
        commands.show_popup(
            PopupConfig::new("Exit", "Are you sure you want to exit?", PopupType::YesNo)
                .on_confirm(|| info!("Yes Clicked"))
                .on_cancel(|| info!("No Clicked"))
                .with_close_button(true),
        );
    }

    if keys.just_pressed(KeyCode::Key4) {
        commands.show_popup(
            PopupConfig::new("Custom Choice", "Choose an option below.", PopupType::Custom)
                .on_confirm(|| info!("Option 1 Clicked"))
                .on_cancel(|| info!("Option 2 Clicked"))
                .with_close_button(true)
                .with_labels("Option 1", "Option 2"),
        );
    }

    // input field is not read yet, looks the same as Custom
    if keys.just_pressed(KeyCode::Key5) {
        commands.show_popup(
            PopupConfig::new("Rename", "Enter a new name.", PopupType::InputFieldCustom)
                .on_confirm(|| info!("Rename Clicked"))
                .on_cancel(|| info!("Skip Clicked"))
                .with_labels("Rename", "Skip"),
        );
    }
}

fn log_dismissed(mut reader: EventReader<PopupDismissed>) {
    for event in reader.iter() {
        info!("Popup {:?} dismissed: {:?}", event.popup, event.response);
    }
}
