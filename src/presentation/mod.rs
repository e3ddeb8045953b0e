// Presentation layer - Console stand-in for the chart renderer
pub mod console_view;
pub mod gesture_script;
