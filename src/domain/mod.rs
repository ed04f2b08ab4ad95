// Domain layer - Core editor types and rules

pub mod geometry;
pub mod model;
pub mod rules;
