// Service module exports

pub mod input;
pub mod layout;
pub mod resolver;
pub mod settings;
