pub mod app;
pub mod config;
pub mod controls;
pub mod derived;
pub mod logging;
pub mod params;
pub mod render;
pub mod terminal;
pub mod uniforms;
pub mod visual;
