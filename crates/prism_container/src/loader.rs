//! The module library deserialization pipeline.
//!
//! Loading is a linear, fail-fast sequence: parse the container
//! structurally, gate on the schema version, interpret the record chunks
//! against the caller's [`LoadContext`], and assemble an immutable
//! [`ModuleLibrary`]. The artifact-backed variant adds a cache check in
//! front and registers the result back onto the artifact, so each artifact
//! is deserialized at most once.

use std::sync::Arc;

use prism_artifact::{Artifact, ArtifactKind, Keep};
use prism_base::Blob;
use prism_diagnostics::Diagnostic;

use crate::chunk::{Chunk, ChunkBody, Container, LIST_TAG};
use crate::context::LoadContext;
use crate::error::ContainerError;
use crate::library::{EntryPoint, IrModule, ModuleLibrary};
use crate::schema::{
    decode_record, EntryPointRecord, ModuleRecord, SCHEMA_VERSION, TAG_ENTRY_POINT, TAG_MODULE,
    TAG_VERSION,
};

/// Deserializes a module library from raw container bytes.
///
/// Fails with [`ContainerError::Format`] on malformed bytes and
/// [`ContainerError::Schema`] on a version or record mismatch; schema
/// failures also land an error diagnostic in the context's sink. No
/// partially constructed library is observable on any error path.
pub fn load_module_library(
    bytes: &[u8],
    ctx: &LoadContext<'_>,
) -> Result<Arc<ModuleLibrary>, ContainerError> {
    let container = Container::parse(bytes)?;

    let mut chunks = container.children.iter();
    check_version(chunks.next(), ctx)?;

    let mut modules = Vec::new();
    let mut entry_points = Vec::new();
    deserialize_chunks(chunks.as_slice(), ctx, &mut modules, &mut entry_points)?;

    ctx.sink.maybe_add_note(format!(
        "loaded {} modules and {} entry points for target '{}'",
        modules.len(),
        entry_points.len(),
        ctx.linkage.target()
    ));
    Ok(Arc::new(ModuleLibrary::new(modules, entry_points)))
}

/// Deserializes a module library from an artifact's bytes, with caching.
///
/// If the artifact already owns a [`ModuleLibrary`] representation it is
/// returned without touching the bytes: at most one deserialization per
/// artifact. Otherwise the bytes are fetched at the intermediate keep
/// level (the blob is a stepping stone here) and deserialized. When `keep`
/// permits, the result is registered back onto the artifact so later
/// callers short-circuit at the cache check.
pub fn load_module_library_from_artifact(
    keep: Keep,
    artifact: &Artifact,
    ctx: &LoadContext<'_>,
) -> Result<Arc<ModuleLibrary>, ContainerError> {
    if let Some(library) = artifact.find_representation_of::<ModuleLibrary>() {
        return Ok(library);
    }

    let desc = artifact.desc();
    if desc.kind != ArtifactKind::Container {
        return Err(ContainerError::Unsupported {
            kind: desc.kind,
            payload: desc.payload,
        });
    }

    let blob = artifact.load_blob(keep.intermediate())?;
    let library = load_module_library(&blob, ctx)?;

    if keep.can_keep() {
        artifact.add_representation(library.clone());
    }
    Ok(library)
}

fn schema_error(ctx: &LoadContext<'_>, reason: String) -> ContainerError {
    ctx.sink.add(Diagnostic::error(reason.clone()));
    ContainerError::Schema { reason }
}

fn check_version(chunk: Option<&Chunk<'_>>, ctx: &LoadContext<'_>) -> Result<(), ContainerError> {
    let Some(chunk) = chunk else {
        return Err(schema_error(
            ctx,
            "container is missing its schema version chunk".to_string(),
        ));
    };
    let payload = match (&chunk.body, chunk.tag) {
        (ChunkBody::Data(payload), tag) if tag == TAG_VERSION => payload,
        _ => {
            return Err(schema_error(
                ctx,
                format!(
                    "expected leading '{TAG_VERSION}' chunk, found '{}'",
                    chunk.tag
                ),
            ));
        }
    };
    let Ok(raw) = <[u8; 4]>::try_from(*payload) else {
        return Err(schema_error(
            ctx,
            format!("schema version chunk has {} bytes, expected 4", payload.len()),
        ));
    };
    let version = u32::from_le_bytes(raw);
    if version != SCHEMA_VERSION {
        return Err(schema_error(
            ctx,
            format!("expected schema version {SCHEMA_VERSION}, found {version}"),
        ));
    }
    Ok(())
}

fn deserialize_chunks(
    chunks: &[Chunk<'_>],
    ctx: &LoadContext<'_>,
    modules: &mut Vec<IrModule>,
    entry_points: &mut Vec<EntryPoint>,
) -> Result<(), ContainerError> {
    for chunk in chunks {
        match &chunk.body {
            ChunkBody::List { children, .. } => {
                deserialize_chunks(children, ctx, modules, entry_points)?;
            }
            ChunkBody::Data(payload) if chunk.tag == TAG_MODULE => {
                let record: ModuleRecord =
                    decode_record(chunk.tag, payload).map_err(|e| match e {
                        ContainerError::Schema { reason } => schema_error(ctx, reason),
                        other => other,
                    })?;
                let name = ctx.names.intern(&record.name);
                if !record.source_path.is_empty() {
                    ctx.sources.register_path(&record.source_path);
                }
                ctx.session.register_module(name);
                modules.push(ctx.ast.build_module(name, Blob::from_vec(record.ir)));
            }
            ChunkBody::Data(payload) if chunk.tag == TAG_ENTRY_POINT => {
                let record: EntryPointRecord =
                    decode_record(chunk.tag, payload).map_err(|e| match e {
                        ContainerError::Schema { reason } => schema_error(ctx, reason),
                        other => other,
                    })?;
                entry_points.push(EntryPoint {
                    mangled_name: record.mangled_name,
                    name: ctx.names.intern(&record.name),
                    profile: record.profile,
                });
            }
            ChunkBody::Data(_) if chunk.tag == TAG_VERSION => {
                return Err(schema_error(
                    ctx,
                    "unexpected second schema version chunk".to_string(),
                ));
            }
            ChunkBody::Data(_) => {
                // Forward compatibility: later schema versions may add tags.
                ctx.sink
                    .maybe_add_note(format!("skipping unrecognized chunk '{}'", chunk.tag));
            }
        }
    }
    Ok(())
}
