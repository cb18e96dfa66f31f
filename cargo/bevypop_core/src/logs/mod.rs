use bevy::app::{App, Plugin};
use bevy::prelude::{Event, EventReader, Events, ResMut, Resource, Update, World};
use std::collections::linked_list::Iter;
use std::collections::LinkedList;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Trace => write!(f, "TRACE"),
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
            Level::Fatal => write!(f, "FATAL"),
        }
    }
}

pub struct Log {
    level: Level,
    message: String,
}

impl Log {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Bounded in-app log of popup reports, meant for an in-game console.
#[derive(Resource, Default)]
pub struct LogBuffer(LinkedList<Log>);

const LOG_SIZE: usize = 100;

impl LogBuffer {
    pub fn write(&mut self, message: String, level: Level) {
        if self.0.len() == LOG_SIZE {
            self.0.pop_front();
        }
        self.0.push_back(Log { message, level });
    }

    pub fn iter(&self) -> Iter<Log> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, level: Level) -> usize {
        self.0.iter().filter(|log| log.level == level).count()
    }
}

macro_rules! impl_write_level {
    ($($level: ident),*) => {
        paste::item! {
            impl LogBuffer {
                $(
                    pub fn [< write_ $level:lower >](&mut self, message: String) {
                        self.write(message, Level::$level);
                    }
                )*
            }
        }
    }
}

impl_write_level!(Trace, Debug, Info, Warn, Error, Fatal);

fn store_logs(mut reader: EventReader<PushLog>, mut buffer: ResMut<LogBuffer>) {
    for event in reader.iter() {
        buffer.write(event.0.clone(), event.1);
    }
}

#[derive(Event)]
pub struct PushLog(pub String, pub Level);

/// Sends a report to the log buffer when [`LogBufferPlugin`] is installed, no-op otherwise.
pub fn push_log(world: &mut World, message: String, level: Level) {
    if let Some(mut events) = world.get_resource_mut::<Events<PushLog>>() {
        events.send(PushLog(message, level));
    }
}

pub struct LogBufferPlugin;

impl Plugin for LogBufferPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LogBuffer>()
            .add_event::<PushLog>()
            .add_systems(Update, store_logs);
    }
}
