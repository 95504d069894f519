mod fixtures;
pub use fixtures::*;

pub use skywatch::core::{
    FleetGenerator, NavStatus, Port, Session, ShipRecord, ShipType, UserDirectory, ports,
};
pub use skywatch::{Config, ShipDetection, ShipDetector};
