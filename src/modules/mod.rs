//! Modules layer - infrastructure components for external integrations

pub mod storage;
