// Domain layer - Time series, view window and selection models
pub mod category;
pub mod selection;
pub mod telemetry;
pub mod view_window;
