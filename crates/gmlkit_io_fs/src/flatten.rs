//! Source tree traversal and flat copy orchestration.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::report::{ReportFlatten, ReportFlattenBuilder};
use crate::spec::{C_EXT_SOURCE, FlattenError, SpecFlattenOptions};
use crate::util::{
    absolutize_path, copy_file_with_metadata, derive_base_name, is_candidate_name,
    is_same_directory, reserve_destination,
};

#[derive(Debug, Clone)]
struct SpecDirEntry {
    path_dir_src_sub: PathBuf,
    name_dir: OsString,
}

#[derive(Debug, Clone)]
struct SpecFileEntry {
    path_file_src: PathBuf,
    name_file: OsString,
}

#[derive(Debug)]
struct SpecFlattenContext {
    path_dir_dst: PathBuf,
    builder_report: ReportFlattenBuilder,
}

/// Copy every `.gml` file under `dir_source` into `dir_output` as `.txt`.
///
/// The source hierarchy is discarded: all copies land directly in the output
/// directory. When a name is taken, `_1`, `_2`, ... is appended to the base
/// name until a free one is found. The claim is made with a create-new open,
/// so an existing file is never overwritten.
///
/// Traversal is top-down and name-ordered; files of a directory are handled
/// before its subdirectories. Symlinked directories are not descended.
///
/// Returns [`FlattenError`] for precondition failures, before anything is
/// copied. Per-file failures are collected in the returned [`ReportFlatten`]
/// and do not stop the run.
pub fn flatten_copy(spec_options: &SpecFlattenOptions) -> Result<ReportFlatten, FlattenError> {
    let path_dir_src = absolutize_path(&spec_options.dir_source);
    let path_dir_dst = absolutize_path(&spec_options.dir_output);

    if !path_dir_src.is_dir() {
        return Err(FlattenError::InvalidSource(path_dir_src));
    }
    if is_same_directory(&path_dir_src, &path_dir_dst) {
        return Err(FlattenError::SameDirectory {
            source: path_dir_src,
            output: path_dir_dst,
        });
    }
    if path_dir_dst.exists() {
        if !path_dir_dst.is_dir() {
            return Err(FlattenError::InvalidOutput(path_dir_dst));
        }
    } else {
        fs::create_dir_all(&path_dir_dst).map_err(|e| FlattenError::OutputCreation {
            path: path_dir_dst.clone(),
            message: e.to_string(),
        })?;
        info!("Created output directory: '{}'", path_dir_dst.display());
    }

    info!(
        "Scanning '{}' for .{C_EXT_SOURCE} files...",
        path_dir_src.display()
    );

    let mut spec_ctx = SpecFlattenContext {
        builder_report: ReportFlattenBuilder::new(path_dir_dst.clone()),
        path_dir_dst,
    };
    walk_directory(&path_dir_src, &mut spec_ctx);
    Ok(spec_ctx.builder_report.build())
}

fn add_walk_warning(spec_ctx: &mut SpecFlattenContext, message: String) {
    warn!("  Warning: {message}");
    spec_ctx.builder_report.add_warning(message);
}

fn walk_directory(path_root: &Path, spec_ctx: &mut SpecFlattenContext) {
    let iter_entries = match fs::read_dir(path_root) {
        Ok(iter) => iter,
        Err(e) => {
            add_walk_warning(
                spec_ctx,
                format!("Failed to read directory {} ({e})", path_root.display()),
            );
            return;
        }
    };

    let mut l_dirs: Vec<SpecDirEntry> = Vec::new();
    let mut l_files: Vec<SpecFileEntry> = Vec::new();

    for entry_res in iter_entries {
        let entry = match entry_res {
            Ok(v) => v,
            Err(e) => {
                add_walk_warning(
                    spec_ctx,
                    format!(
                        "Failed to read directory entry under {} ({e})",
                        path_root.display()
                    ),
                );
                continue;
            }
        };

        let path_entry = entry.path();
        let cfg_file_type = match entry.file_type() {
            Ok(v) => v,
            Err(e) => {
                add_walk_warning(
                    spec_ctx,
                    format!("Failed to inspect {} ({e})", path_entry.display()),
                );
                continue;
            }
        };

        if cfg_file_type.is_dir() {
            l_dirs.push(SpecDirEntry {
                path_dir_src_sub: path_entry,
                name_dir: entry.file_name(),
            });
        } else if cfg_file_type.is_symlink() && path_entry.is_dir() {
            add_walk_warning(
                spec_ctx,
                format!("Symlinked directory not followed: {}", path_entry.display()),
            );
        } else {
            l_files.push(SpecFileEntry {
                path_file_src: path_entry,
                name_file: entry.file_name(),
            });
        }
    }

    l_dirs.sort_by(|a, b| a.name_dir.cmp(&b.name_dir));
    l_files.sort_by(|a, b| a.name_file.cmp(&b.name_file));

    for file_entry in l_files {
        handle_file_entry(file_entry, spec_ctx);
    }
    for dir_entry in l_dirs {
        walk_directory(&dir_entry.path_dir_src_sub, spec_ctx);
    }
}

fn handle_file_entry(spec_file_entry: SpecFileEntry, spec_ctx: &mut SpecFlattenContext) {
    if !is_candidate_name(&spec_file_entry.name_file) {
        return;
    }
    spec_ctx.builder_report.add_found();

    let path_file_src = spec_file_entry.path_file_src;
    match fs::metadata(&path_file_src) {
        Ok(meta_src) if meta_src.is_file() => {}
        Ok(_) => {
            record_copy_error(
                spec_ctx,
                path_file_src,
                None,
                "Not a regular file".to_string(),
            );
            return;
        }
        Err(e) => {
            record_copy_error(spec_ctx, path_file_src, None, e.to_string());
            return;
        }
    }

    let name_base = derive_base_name(&path_file_src);
    let spec_reservation = match reserve_destination(&spec_ctx.path_dir_dst, &name_base) {
        Ok(v) => v,
        Err(e) => {
            record_copy_error(spec_ctx, path_file_src, None, e.to_string());
            return;
        }
    };
    let path_file_dst = spec_reservation.path_file_dst;

    let if_renamed = spec_reservation.n_suffix > 0;
    if if_renamed {
        let name_dst = path_file_dst
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default();
        info!("  Note: Filename collision. Renaming to '{name_dst}'");
    }

    match copy_file_with_metadata(&path_file_src, spec_reservation.file_dst, &path_file_dst) {
        Ok(()) => {
            info!(
                "  Copied and renamed: '{}' -> '{}'",
                path_file_src.display(),
                path_file_dst.display()
            );
            spec_ctx.builder_report.add_converted();
            if if_renamed {
                spec_ctx.builder_report.add_renamed();
            }
        }
        Err(e) => {
            if let Err(e_remove) = fs::remove_file(&path_file_dst) {
                debug!(
                    "Failed to remove partial copy {} ({e_remove})",
                    path_file_dst.display()
                );
            }
            record_copy_error(spec_ctx, path_file_src, Some(path_file_dst), e.to_string());
        }
    }
}

fn record_copy_error(
    spec_ctx: &mut SpecFlattenContext,
    path_file_src: PathBuf,
    path_file_dst: Option<PathBuf>,
    exception: String,
) {
    match &path_file_dst {
        Some(path_dst) => warn!(
            "  Error copying '{}' to '{}': {exception}",
            path_file_src.display(),
            path_dst.display()
        ),
        None => warn!("  Error copying '{}': {exception}", path_file_src.display()),
    }
    spec_ctx
        .builder_report
        .add_error(path_file_src, path_file_dst, exception);
}
