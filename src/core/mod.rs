pub mod auth;
pub mod fleet;
pub mod insights;
pub mod ports;
pub mod predict;
pub mod session;

pub use auth::{Role, User, UserDirectory, hash_password};
pub use fleet::{FleetGenerator, NavStatus, ShipRecord, ShipType};
pub use insights::{ActivityLevel, PortInsights};
pub use ports::{Port, TrafficTier, find_port};
pub use predict::{Anomaly, AnomalyKind, CongestionForecast, CongestionTrend, EtaPrediction};
pub use session::Session;
