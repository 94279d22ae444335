pub mod auth;
pub mod dashboard;
pub mod diversions;
pub mod permits;
pub mod reports;
pub mod road_updates;
pub mod signals;
pub mod transport;
pub mod workflow;
