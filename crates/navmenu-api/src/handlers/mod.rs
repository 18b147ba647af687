//! HTTP handlers

pub mod health;
pub mod menus;
pub mod modules;
pub mod resource;
