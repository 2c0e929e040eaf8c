// Module exports for models

pub mod entity;
pub mod event;
pub mod raw;
pub mod settings;
pub mod view;
