// Application layer - Loading and gesture handling use cases
pub mod chart_session;
pub mod data_loader;
pub mod record_source;
pub mod view_controller;
