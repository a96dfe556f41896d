//! The artifact: a compilation output with interchangeable materializations.

use std::io::Write as _;
use std::sync::{Arc, Mutex, Weak};

use prism_base::Blob;
use prism_cast::{Capability, CapabilityId, Castable, LazyCastableList, Unknown};

use crate::desc::ArtifactDesc;
use crate::error::ArtifactError;
use crate::keep::Keep;
use crate::list::ArtifactList;
use crate::representation::{BlobRepresentation, FileRepresentation};

/// A named, described compilation output.
///
/// An artifact owns two capability lists: `representations`, whose members
/// each materialize the artifact's actual content (bytes, a file, a parsed
/// form), and `associated`, whose members never do; they are descriptive
/// metadata riding alongside (diagnostics, binding ranges). Children, when
/// present, are owned through an [`ArtifactList`]; the parent link runs the
/// other way and is weak.
///
/// Artifacts are shared as `Arc<Artifact>`. Interior lists are
/// mutex-guarded so representation caching works through `&self`, but
/// concurrent mutation of the same artifact is not a supported pattern;
/// callers sharing one across threads serialize externally. Two racing
/// first materializations may both cache an equivalent representation,
/// which is tolerated.
pub struct Artifact {
    desc: ArtifactDesc,
    name: String,
    parent: Mutex<Weak<Artifact>>,
    representations: Mutex<LazyCastableList>,
    associated: Mutex<LazyCastableList>,
    children: Mutex<Option<Arc<ArtifactList>>>,
}

impl Artifact {
    /// Creates an artifact with no representations, metadata, or children.
    pub fn new(desc: ArtifactDesc, name: impl Into<String>) -> Arc<Artifact> {
        Arc::new(Artifact {
            desc,
            name: name.into(),
            parent: Mutex::new(Weak::new()),
            representations: Mutex::new(LazyCastableList::new()),
            associated: Mutex::new(LazyCastableList::new()),
            children: Mutex::new(None),
        })
    }

    /// Returns the immutable descriptor.
    pub fn desc(&self) -> &ArtifactDesc {
        &self.desc
    }

    /// Returns the artifact's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning parent artifact, if it is still alive.
    pub fn parent(&self) -> Option<Arc<Artifact>> {
        self.parent.lock().unwrap().upgrade()
    }

    pub(crate) fn set_parent(&self, parent: Weak<Artifact>) {
        *self.parent.lock().unwrap() = parent;
    }

    /// Clears the parent link, but only if it still points at `owner`.
    /// Another list may have reassigned the artifact in the meantime; its
    /// link must not be clobbered.
    pub(crate) fn clear_parent_if(&self, owner: &Weak<Artifact>) {
        let mut parent = self.parent.lock().unwrap();
        if parent.ptr_eq(owner) {
            *parent = Weak::new();
        }
    }

    /// Returns `true` if at least one representation or child is present.
    /// Pure bookkeeping; performs no I/O.
    pub fn exists(&self) -> bool {
        if !self.representations.lock().unwrap().is_empty() {
            return true;
        }
        self.children
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|children| !children.is_empty())
    }

    /// Returns the artifact's content as a byte blob.
    ///
    /// Searches representations for one directly holding bytes; failing
    /// that, derives bytes by reading a file-backed representation. Under
    /// [`Keep::Yes`] a derived blob is cached as a new representation;
    /// under other policies it is re-derived on each call.
    pub fn load_blob(&self, keep: Keep) -> Result<Blob, ArtifactError> {
        if let Some(rep) = self.find_representation_of::<BlobRepresentation>() {
            return Ok(rep.blob().clone());
        }

        if let Some(file) = self.find_representation_of::<FileRepresentation>() {
            let bytes = std::fs::read(file.path()).map_err(|source| ArtifactError::Io {
                path: file.path().to_path_buf(),
                source,
            })?;
            let blob = Blob::from_vec(bytes);
            if keep.can_keep() {
                self.add_representation(Arc::new(BlobRepresentation::new(blob.clone())));
            }
            return Ok(blob);
        }

        Err(ArtifactError::NotFound {
            artifact: self.name.clone(),
            requested: "a byte blob",
        })
    }

    /// Returns a filesystem-path-backed representation of the content.
    ///
    /// If only a byte blob exists, a temporary file is materialized from
    /// it; the temp file is deleted when the returned representation is
    /// released, unless [`Keep::Yes`] cached it on the artifact. The blob
    /// is fetched at the intermediate keep level since it is a stepping
    /// stone here.
    pub fn require_file(&self, keep: Keep) -> Result<Arc<FileRepresentation>, ArtifactError> {
        if let Some(file) = self.find_representation_of::<FileRepresentation>() {
            return Ok(file);
        }

        let blob = self.load_blob(keep.intermediate())?;

        let mut file = tempfile::NamedTempFile::new().map_err(|source| ArtifactError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
        file.write_all(&blob).map_err(|source| ArtifactError::Io {
            path: file.path().to_path_buf(),
            source,
        })?;
        file.flush().map_err(|source| ArtifactError::Io {
            path: file.path().to_path_buf(),
            source,
        })?;

        let rep = Arc::new(FileRepresentation::owned(file.into_temp_path()));
        if keep.can_keep() {
            self.add_representation(rep.clone());
        }
        Ok(rep)
    }

    /// Appends a representation.
    pub fn add_representation(&self, rep: Arc<dyn Castable>) {
        self.representations.lock().unwrap().add(rep);
    }

    /// Wraps a foreign object in an adapter and appends it as a
    /// representation.
    pub fn add_representation_wrapped(&self, rep: Arc<dyn Unknown>) {
        self.representations.lock().unwrap().add_wrapped(rep);
    }

    /// Returns the first representation answering `id`.
    pub fn find_representation(&self, id: CapabilityId) -> Option<Arc<dyn Castable>> {
        self.representations.lock().unwrap().find(id).cloned()
    }

    /// Returns the first representation of concrete type `T`.
    pub fn find_representation_of<T: Capability>(&self) -> Option<Arc<T>> {
        let found = self.find_representation(T::ID)?;
        prism_cast::cast_arc::<T>(&found)
    }

    /// Returns a snapshot of the representations in order.
    pub fn representations(&self) -> Vec<Arc<dyn Castable>> {
        self.representations.lock().unwrap().items().to_vec()
    }

    /// Appends associated metadata.
    pub fn add_associated(&self, associated: Arc<dyn Castable>) {
        self.associated.lock().unwrap().add(associated);
    }

    /// Returns the first associated object answering `id`.
    pub fn find_associated(&self, id: CapabilityId) -> Option<Arc<dyn Castable>> {
        self.associated.lock().unwrap().find(id).cloned()
    }

    /// Returns the first associated object of concrete type `T`.
    pub fn find_associated_of<T: Capability>(&self) -> Option<Arc<T>> {
        let found = self.find_associated(T::ID)?;
        prism_cast::cast_arc::<T>(&found)
    }

    /// Returns a snapshot of the associated metadata in order.
    pub fn associated(&self) -> Vec<Arc<dyn Castable>> {
        self.associated.lock().unwrap().items().to_vec()
    }

    /// Returns the owned child list, creating it on first use.
    pub fn children(self: &Arc<Self>) -> Arc<ArtifactList> {
        let mut children = self.children.lock().unwrap();
        children
            .get_or_insert_with(|| Arc::new(ArtifactList::with_parent(self)))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desc::{ArtifactKind, ArtifactPayload};

    fn container() -> Arc<Artifact> {
        Artifact::new(
            ArtifactDesc::new(ArtifactKind::Container, ArtifactPayload::CompiledModule),
            "lib.prism-module",
        )
    }

    #[test]
    fn fresh_artifact_does_not_exist() {
        let artifact = container();
        assert!(!artifact.exists());
        assert!(artifact.load_blob(Keep::No).is_err());
    }

    #[test]
    fn exists_after_adding_representation() {
        let artifact = container();
        artifact.add_representation(Arc::new(BlobRepresentation::new(Blob::copy_from(b"abc"))));
        assert!(artifact.exists());

        let blob = artifact.load_blob(Keep::No).unwrap();
        assert_eq!(blob.as_slice(), b"abc");
    }

    #[test]
    fn exists_after_adding_child() {
        let artifact = container();
        artifact.children().add(container());
        assert!(artifact.exists());
    }

    #[test]
    fn load_blob_not_found() {
        let artifact = container();
        match artifact.load_blob(Keep::Yes) {
            Err(ArtifactError::NotFound { artifact: name, .. }) => {
                assert_eq!(name, "lib.prism-module");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn load_blob_from_file_ephemeral_does_not_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kernel.bin");
        std::fs::write(&path, b"file bytes").unwrap();

        let artifact = container();
        artifact.add_representation(Arc::new(FileRepresentation::reference(&path)));

        let blob = artifact.load_blob(Keep::No).unwrap();
        assert_eq!(blob.as_slice(), b"file bytes");
        assert_eq!(artifact.representations().len(), 1);

        // Re-derived on each call, still not cached.
        artifact.load_blob(Keep::No).unwrap();
        assert_eq!(artifact.representations().len(), 1);
    }

    #[test]
    fn load_blob_from_file_yes_caches_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kernel.bin");
        std::fs::write(&path, b"file bytes").unwrap();

        let artifact = container();
        artifact.add_representation(Arc::new(FileRepresentation::reference(&path)));

        artifact.load_blob(Keep::Yes).unwrap();
        assert_eq!(artifact.representations().len(), 2);

        // Second call hits the cached blob directly.
        artifact.load_blob(Keep::Yes).unwrap();
        assert_eq!(artifact.representations().len(), 2);
    }

    #[test]
    fn load_blob_intermediate_does_not_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kernel.bin");
        std::fs::write(&path, b"x").unwrap();

        let artifact = container();
        artifact.add_representation(Arc::new(FileRepresentation::reference(&path)));
        artifact.load_blob(Keep::Intermediate).unwrap();
        assert_eq!(artifact.representations().len(), 1);
    }

    #[test]
    fn require_file_materializes_temp_from_blob() {
        let artifact = container();
        artifact.add_representation(Arc::new(BlobRepresentation::new(Blob::copy_from(b"tmp"))));

        let file = artifact.require_file(Keep::No).unwrap();
        assert_eq!(std::fs::read(file.path()).unwrap(), b"tmp");
        // Ephemeral: the blob stays the only representation.
        assert_eq!(artifact.representations().len(), 1);

        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());
    }

    #[test]
    fn require_file_yes_caches_and_keeps_file() {
        let artifact = container();
        artifact.add_representation(Arc::new(BlobRepresentation::new(Blob::copy_from(b"tmp"))));

        let file = artifact.require_file(Keep::Yes).unwrap();
        assert_eq!(artifact.representations().len(), 2);
        let path = file.path().to_path_buf();
        drop(file);
        // Still referenced by the cached representation.
        assert!(path.exists());

        let again = artifact.require_file(Keep::Yes).unwrap();
        assert_eq!(again.path(), path.as_path());
        assert_eq!(artifact.representations().len(), 2);
    }

    #[test]
    fn require_file_prefers_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.bin");
        std::fs::write(&path, b"y").unwrap();

        let artifact = container();
        artifact.add_representation(Arc::new(FileRepresentation::reference(&path)));
        let file = artifact.require_file(Keep::No).unwrap();
        assert_eq!(file.path(), path.as_path());
    }

    #[test]
    fn associated_metadata_is_separate_from_representations() {
        use crate::metadata::PostEmitMetadata;

        let artifact = container();
        artifact.add_associated(Arc::new(PostEmitMetadata::new(Vec::new())));

        // Metadata never materializes content.
        assert!(!artifact.exists());
        assert!(artifact.find_associated_of::<PostEmitMetadata>().is_some());
        assert!(artifact
            .find_representation(PostEmitMetadata::ID)
            .is_none());
    }

    #[test]
    fn desc_and_name_are_stable() {
        let artifact = container();
        assert_eq!(artifact.desc().kind, ArtifactKind::Container);
        assert_eq!(artifact.name(), "lib.prism-module");
    }
}
