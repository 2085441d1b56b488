pub mod config;
pub mod controls;
pub mod error;
pub mod export;
pub mod playback;
pub mod report;
pub mod settling;
pub mod viscosity;
pub mod window;
