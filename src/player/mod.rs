pub mod controls;
pub mod engine;

pub use controls::Command;
pub use engine::SyncEngine;
