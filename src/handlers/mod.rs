// src/handlers/mod.rs

pub mod image;
pub mod redirect;
