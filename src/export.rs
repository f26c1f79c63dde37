//! Export entry points
//!
//! Exports are computed as plain strings first ([`DnmExport`]) and written
//! through an [`OutputSink`] afterwards, so a failed encode never leaves a
//! half-written file behind.
//!
//! | Layout                    | Main file                           | Side files         |
//! |---------------------------|-------------------------------------|--------------------|
//! | [`Embedded`][embedded]    | header, PCK blocks, SRF blocks, END | none               |
//! | [`PckOnly`][pck-only]     | header, PCK blocks                  | none               |
//! | [`Exploded`][exploded]    | header, SRF blocks, END             | `parts/<name>.srf` |
//! | [`PartsOnly`][parts-only] | none                                | `parts/<name>.srf` |
//!
//! [embedded]: crate::model::DnmLayout::Embedded
//! [pck-only]: crate::model::DnmLayout::PckOnly
//! [exploded]: crate::model::DnmLayout::Exploded
//! [parts-only]: crate::model::DnmLayout::PartsOnly

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::host::{HostScene, NodeId};
use crate::model::{DnmDocument, ExportConfig, PckShape};
use crate::output::{FileSystemSink, OutputSink};
use crate::scene::{ExportSession, SceneGraphBuilder};
use crate::writer::{dnm_to_string, surf_to_string};

/// One file produced by an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Path relative to the directory of the main file
    pub path: PathBuf,
    /// File contents
    pub contents: String,
}

/// Everything a DNM export produces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnmExport {
    /// Main DNM text, absent for [`crate::model::DnmLayout::PartsOnly`]
    pub main: Option<String>,
    /// Side files, in discovery order
    pub parts: Vec<ExportedFile>,
}

/// Encode one mesh node as a single PCK block of the given shape
///
/// The block is expressed relative to the node's own location, exactly as
/// it would be inside a DNM export.
pub fn export_pck(
    scene: &HostScene,
    node: NodeId,
    shape: PckShape,
    config: &ExportConfig,
) -> Result<String> {
    let host = scene.node(node).ok_or_else(|| {
        Error::Reference(format!("Node id {} is not in the scene", node))
    })?;
    let file_name = format!("{}.srf", host.name);
    let surface = crate::convert::surface_from_host(host, &file_name, config)?;
    surf_to_string(&surface, shape)
}

/// Encode one mesh node as a bare SURF file
///
/// Use [`ExportConfig::surf`] for the standalone exporter's smoothing rule.
pub fn export_surf(scene: &HostScene, node: NodeId, config: &ExportConfig) -> Result<String> {
    export_pck(scene, node, PckShape::Part, config)
}

/// Export every visible mesh node of `scene` with a fresh session
pub fn export_dnm(scene: &HostScene, config: &ExportConfig) -> Result<DnmExport> {
    let mut session = ExportSession::new(*config);
    export_dnm_with_session(scene, &mut session)
}

/// Export every visible mesh node not yet queued in `session`
///
/// The session keeps counting uids, so two calls without
/// [`ExportSession::reset`] in between produce disjoint uids and never export
/// a node twice.
pub fn export_dnm_with_session(
    scene: &HostScene,
    session: &mut ExportSession,
) -> Result<DnmExport> {
    let config = *session.config();
    let discovered = SceneGraphBuilder::new(scene, session).discover_all();
    debug!(
        "Exporting {} surface(s) with layout {:?}",
        discovered.len(),
        config.layout
    );

    let mut document = DnmDocument::new();
    let mut parts = Vec::new();

    for entry in &discovered {
        let surface = entry.pck_surface(scene, &config)?;
        if config.layout.embeds_pck() {
            document.surfaces.push(surface);
        } else {
            parts.push(ExportedFile {
                path: PathBuf::from(&entry.file_name),
                contents: surf_to_string(&surface, PckShape::Part)?,
            });
        }
        if config.layout.writes_nodes() {
            document.nodes.push(entry.srf_node(scene, &config)?);
        }
    }
    document.footer = config.layout.writes_nodes();

    let main = if config.layout.writes_main() {
        Some(dnm_to_string(&document)?)
    } else {
        None
    };
    Ok(DnmExport { main, parts })
}

/// Write an export through a sink
///
/// The main file goes to `main_file`; side files go to their own relative
/// paths. Side files are written first.
pub fn write_export<S: OutputSink + ?Sized>(
    export: &DnmExport,
    main_file: &Path,
    sink: &mut S,
) -> Result<()> {
    for part in &export.parts {
        sink.write_file(&part.path, &part.contents)?;
    }
    if let Some(main) = &export.main {
        sink.write_file(main_file, main)?;
    }
    Ok(())
}

/// Export a scene straight to `path`, side files next to it
pub fn export_dnm_to_path(
    scene: &HostScene,
    config: &ExportConfig,
    path: impl AsRef<Path>,
) -> Result<DnmExport> {
    let path = path.as_ref();
    let file_name = path.file_name().ok_or_else(|| {
        Error::file_io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;

    let export = export_dnm(scene, config)?;
    let mut sink = FileSystemSink::beside(path);
    write_export(&export, Path::new(file_name), &mut sink)?;
    info!(
        "Exported {} with {} side file(s)",
        path.display(),
        export.parts.len()
    );
    Ok(export)
}
