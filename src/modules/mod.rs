pub mod books;
pub mod borrowing;
pub mod members;

use bookfinder_kernel::ModuleRegistry;

use crate::library::SharedLibrary;

/// Register all library modules with the registry, sharing one library handle
pub fn register_all(registry: &mut ModuleRegistry, library: &SharedLibrary) -> anyhow::Result<()> {
    registry.register(books::create_module(library.clone()))?;
    registry.register(members::create_module(library.clone()))?;
    registry.register(borrowing::create_module(library.clone()))?;
    Ok(())
}
