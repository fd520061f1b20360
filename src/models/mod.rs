// src/models/mod.rs

pub mod group;
pub mod vehicle_model;
pub mod item;
