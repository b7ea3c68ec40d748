//! Core building blocks shared by every BookFinder crate: the [`Module`]
//! contract, the lifecycle-aware [`ModuleRegistry`] and layered [`Settings`].

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use settings::Settings;
