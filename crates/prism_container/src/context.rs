//! Collaborators consumed during deserialization.
//!
//! The loader reads from and registers into these handles but does not own
//! them; their internal behavior belongs to the wider compiler. They are
//! deliberately thin: enough surface for the loader to call, no more.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use prism_base::{Blob, Name, NamePool};
use prism_diagnostics::DiagnosticCollection;

use crate::library::IrModule;

/// The compilation session modules are registered into.
#[derive(Default)]
pub struct Session {
    modules: Mutex<Vec<Name>>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loaded module with the session.
    pub fn register_module(&self, name: Name) {
        self.modules.lock().unwrap().push(name);
    }

    /// Returns the number of modules registered so far.
    pub fn module_count(&self) -> usize {
        self.modules.lock().unwrap().len()
    }
}

/// The shared AST builder parsed modules are constructed through.
#[derive(Default)]
pub struct AstBuilder {
    built: AtomicUsize,
}

impl AstBuilder {
    /// Creates a builder that has built nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an [`IrModule`] from its deserialized parts.
    pub fn build_module(&self, name: Name, ir: Blob) -> IrModule {
        self.built.fetch_add(1, Ordering::Relaxed);
        IrModule { name, ir }
    }

    /// Returns how many modules this builder has constructed. Useful for
    /// verifying that cached loads skip deserialization.
    pub fn built_count(&self) -> usize {
        self.built.load(Ordering::Relaxed)
    }
}

/// The source manager module source paths are registered with.
#[derive(Default)]
pub struct SourceManager {
    paths: Mutex<Vec<PathBuf>>,
}

impl SourceManager {
    /// Creates an empty source manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the source path a module was compiled from.
    pub fn register_path(&self, path: &str) {
        self.paths.lock().unwrap().push(PathBuf::from(path));
    }

    /// Returns the number of registered paths.
    pub fn path_count(&self) -> usize {
        self.paths.lock().unwrap().len()
    }
}

/// The target linkage a library is being loaded for.
pub struct Linkage {
    target: String,
}

impl Linkage {
    /// Creates a linkage for the named target.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Returns the target name.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Everything the deserializer needs from the surrounding compiler.
///
/// Borrowed for the duration of one load; nothing here is owned by the
/// loader.
pub struct LoadContext<'a> {
    /// Interner for module, symbol, and entry-point names.
    pub names: &'a NamePool,
    /// The active compilation session.
    pub session: &'a Session,
    /// The shared AST builder.
    pub ast: &'a AstBuilder,
    /// The source manager.
    pub sources: &'a SourceManager,
    /// The target linkage.
    pub linkage: &'a Linkage,
    /// Sink for non-fatal diagnostics emitted while loading.
    pub sink: &'a DiagnosticCollection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_registration() {
        let session = Session::new();
        assert_eq!(session.module_count(), 0);
        session.register_module(Name::from_raw(0));
        session.register_module(Name::from_raw(1));
        assert_eq!(session.module_count(), 2);
    }

    #[test]
    fn ast_builder_counts_builds() {
        let pool = NamePool::new();
        let ast = AstBuilder::new();
        let module = ast.build_module(pool.intern("m"), Blob::copy_from(b"ir"));
        assert_eq!(pool.resolve(module.name), "m");
        assert_eq!(ast.built_count(), 1);
    }

    #[test]
    fn source_manager_registration() {
        let sources = SourceManager::new();
        sources.register_path("shaders/sky.prism");
        assert_eq!(sources.path_count(), 1);
    }

    #[test]
    fn linkage_target() {
        let linkage = Linkage::new("spirv_1_5");
        assert_eq!(linkage.target(), "spirv_1_5");
    }
}
