use crate::bail;
use crate::core::settings::PopupSettings;
use crate::core::PopupConfig;
use crate::error::{EResult, ErrorKind};
use crate::logs::{push_log, Level};
use crate::modules::follow::{CameraFollow, FollowMode};
use crate::modules::view::{PopupTemplate, PopupView};
use bevy::ecs::system::Command;
use bevy::prelude::*;

/// Entry point for showing the popup. One per app, owned by the app as a resource.
///
/// The popup entity is created from the registered template on the first request and reused for
/// every request after that.
#[derive(Resource, Default)]
pub struct PopupController {
    template: Option<Box<dyn PopupTemplate>>,
    parent: Option<Entity>,
    follow: Option<Entity>,
    instance: Option<Entity>,
    instantiations: u32,
}

impl PopupController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: impl PopupTemplate + 'static) -> Self {
        self.set_template(template);
        self
    }

    pub fn with_parent(mut self, parent: Entity) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_follow(mut self, follow: Entity) -> Self {
        self.follow = Some(follow);
        self
    }

    pub fn set_template(&mut self, template: impl PopupTemplate + 'static) {
        self.template = Some(Box::new(template));
    }

    pub fn set_parent(&mut self, parent: Entity) {
        self.parent = Some(parent);
    }

    pub fn set_follow(&mut self, follow: Entity) {
        self.follow = Some(follow);
    }

    pub fn parent(&self) -> Option<Entity> {
        self.parent
    }

    pub fn follow(&self) -> Option<Entity> {
        self.follow
    }

    pub fn instance(&self) -> Option<Entity> {
        self.instance
    }

    pub fn instantiations(&self) -> u32 {
        self.instantiations
    }

    pub fn get(world: &World) -> Option<&PopupController> {
        world.get_resource::<PopupController>()
    }

    /// One warning per reference that is still unassigned.
    pub fn validate(&self, world: &World) -> Vec<String> {
        let mut warnings = vec![];
        if self.template.is_none() {
            warnings.push("[PopupController] Popup template is not registered.".to_string());
        }
        match self.parent {
            None => warnings.push("[PopupController] Popup parent is not registered.".to_string()),
            Some(parent) if world.get_entity(parent).is_none() => warnings.push(format!(
                "[PopupController] Popup parent {:?} does not exist.",
                parent
            )),
            Some(_) => {}
        }
        let follow_registered = self
            .follow
            .map_or(false, |follow| world.get::<CameraFollow>(follow).is_some());
        if !follow_registered {
            warnings.push("[PopupController] CameraFollow component is not registered.".to_string());
        }
        warnings
    }

    /// Shows the popup. Failures are logged and reported, never returned.
    pub fn show_popup(world: &mut World, config: PopupConfig) {
        if let Err(e) = Self::try_show_popup(world, config) {
            let message = format!("[PopupController] Error showing popup: {}", e);
            error!("{}", message);
            push_log(world, message, Level::Error);
        }
    }

    fn try_show_popup(world: &mut World, config: PopupConfig) -> EResult<Entity> {
        if !world.contains_resource::<PopupController>() {
            bail!(ErrorKind::Configuration, "POPUP_CONTROLLER::SHOW::NOT_REGISTERED");
        }
        let settings = world
            .get_resource::<PopupSettings>()
            .cloned()
            .unwrap_or_default();

        world.resource_scope(|world, mut controller: Mut<PopupController>| {
            controller.present(world, config, &settings)
        })
    }

    fn present(
        &mut self,
        world: &mut World,
        config: PopupConfig,
        settings: &PopupSettings,
    ) -> EResult<Entity> {
        let Some(template) = self.template.as_ref() else {
            bail!(ErrorKind::Configuration, "POPUP_CONTROLLER::SHOW::TEMPLATE_MISSING");
        };
        let Some(parent) = self.parent else {
            bail!(ErrorKind::Configuration, "POPUP_CONTROLLER::SHOW::PARENT_MISSING");
        };

        let existing = self
            .instance
            .filter(|instance| world.get_entity(*instance).is_some());
        let entity = match existing {
            Some(entity) => {
                debug!("[PopupController] Reusing popup {:?}", entity);
                entity
            }
            None => {
                if world.get_entity(parent).is_none() {
                    bail!(
                        ErrorKind::Configuration,
                        "POPUP_CONTROLLER::SHOW::PARENT_NOT_FOUND",
                        format!("{:?}", parent)
                    );
                }
                let entity = match template.instantiate(world, parent) {
                    Ok(entity) => entity,
                    Err(e) => bail!(
                        ErrorKind::Configuration,
                        "POPUP_CONTROLLER::SHOW::INSTANTIATE_FAILED",
                        e
                    ),
                };
                self.instance = Some(entity);
                self.instantiations += 1;
                info!("[PopupController] Created popup {:?} under {:?}", entity, parent);
                entity
            }
        };

        let follow_camera = config.follow_camera;
        match world.get_mut::<PopupView>(entity) {
            Some(mut view) => view.setup(config, settings),
            None => bail!(
                ErrorKind::Configuration,
                "POPUP_CONTROLLER::SHOW::VIEW_MISSING",
                format!("{:?}", entity)
            ),
        }

        self.apply_follow_mode(world, follow_camera.into());
        Ok(entity)
    }

    fn apply_follow_mode(&self, world: &mut World, mode: FollowMode) {
        match self.follow.and_then(|follow| world.get_mut::<CameraFollow>(follow)) {
            Some(mut follow) => follow.mode = mode,
            None => {
                let message = format!(
                    "[PopupController] Cannot set follow mode {:?}, CameraFollow is not registered",
                    mode
                );
                warn!("{}", message);
                push_log(world, message, Level::Warn);
            }
        }
    }
}

/// Inserts the controller unless one already exists. A duplicate is discarded.
pub fn register_controller(world: &mut World, controller: PopupController) -> bool {
    if world.contains_resource::<PopupController>() {
        let message = "[PopupController] Controller already registered, discarding duplicate";
        warn!("{}", message);
        push_log(world, message.to_string(), Level::Warn);
        return false;
    }
    world.insert_resource(controller);
    true
}

pub trait PopupAppExt {
    fn insert_popup_controller(&mut self, controller: PopupController) -> &mut Self;
}

impl PopupAppExt for App {
    fn insert_popup_controller(&mut self, controller: PopupController) -> &mut Self {
        register_controller(&mut self.world, controller);
        self
    }
}

pub struct ShowPopup(pub PopupConfig);

impl Command for ShowPopup {
    fn apply(self, world: &mut World) {
        PopupController::show_popup(world, self.0);
    }
}

pub trait PopupCommandsExt {
    fn show_popup(&mut self, config: PopupConfig);
}

impl PopupCommandsExt for Commands<'_, '_> {
    fn show_popup(&mut self, config: PopupConfig) {
        self.add(ShowPopup(config));
    }
}

pub fn validate_popup_controller(world: &mut World) {
    let Some(controller) = PopupController::get(world) else {
        let message = "[PopupController] No controller registered, popups cannot be shown";
        warn!("{}", message);
        push_log(world, message.to_string(), Level::Warn);
        return;
    };

    let warnings = controller.validate(world);
    for warning in warnings {
        warn!("{}", warning);
        push_log(world, warning, Level::Warn);
    }
}
