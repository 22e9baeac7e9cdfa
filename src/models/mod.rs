// src/models/mod.rs

pub mod image;
pub mod redirect;
