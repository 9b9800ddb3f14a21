pub mod app;
pub mod clock;
pub mod font;
pub mod graphics;
pub mod regression;
pub mod surface;
pub mod text;
pub mod ui;
