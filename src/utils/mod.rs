// src/utils/mod.rs

pub mod guard;
pub mod image;
pub mod origin;
pub mod redirect;
