use std::ffi::{OsStr, OsString};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::spec::{C_EXT_SOURCE, C_EXT_TARGET};

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

/// Absolute form of `path` with `.` and `..` folded lexically.
///
/// Symlinks are not resolved, so a missing path can still be normalized.
pub(crate) fn absolutize_path(path: &Path) -> PathBuf {
    let path_abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };

    let mut path_normalized = PathBuf::new();
    for component in path_abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                path_normalized.pop();
            }
            other => path_normalized.push(other.as_os_str()),
        }
    }
    path_normalized
}

/// Whether `src` and `dst` name the same directory.
///
/// Compares the lexical absolute forms first, then the canonical forms when
/// both paths exist (symlinked aliases of one directory).
pub fn is_same_directory(src: &Path, dst: &Path) -> bool {
    if absolutize_path(src) == absolutize_path(dst) {
        return true;
    }
    match (fs::canonicalize(src), fs::canonicalize(dst)) {
        (Ok(src_resolved), Ok(dst_resolved)) => src_resolved == dst_resolved,
        _ => false,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region NameDerivation

/// Case-insensitive `*.gml` test on a bare file name.
pub(crate) fn is_candidate_name(name_file: &OsStr) -> bool {
    let raw_name = name_file.as_encoded_bytes();
    let n_ext = C_EXT_SOURCE.len() + 1;
    if raw_name.len() < n_ext {
        return false;
    }
    let (_, raw_suffix) = raw_name.split_at(raw_name.len() - n_ext);
    raw_suffix[0] == b'.' && raw_suffix[1..].eq_ignore_ascii_case(C_EXT_SOURCE.as_bytes())
}

/// File name minus its final extension.
///
/// Leading dots never start an extension, so `.gml` and `..gml` are kept
/// whole while `...x.gml` becomes `...x`.
pub(crate) fn derive_base_name(path_file: &Path) -> OsString {
    let Some(name_file) = path_file.file_name() else {
        return OsString::new();
    };

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;

        let raw_name = name_file.as_bytes();
        OsStr::from_bytes(&raw_name[..calculate_base_len(raw_name)]).to_os_string()
    }
    #[cfg(not(unix))]
    {
        match name_file.to_str() {
            Some(name) => OsString::from(&name[..calculate_base_len(name.as_bytes())]),
            None => path_file
                .file_stem()
                .map(OsStr::to_os_string)
                .unwrap_or_default(),
        }
    }
}

/// Byte length of the base: up to the last `.` after any leading dot run.
fn calculate_base_len(raw_name: &[u8]) -> usize {
    let n_lead_dots = raw_name.iter().take_while(|b| **b == b'.').count();
    match raw_name[n_lead_dots..].iter().rposition(|b| *b == b'.') {
        Some(n_idx) => n_lead_dots + n_idx,
        None => raw_name.len(),
    }
}

/// `base.txt` for suffix 0, `base_<n>.txt` otherwise.
pub(crate) fn derive_output_name(name_base: &OsStr, n_suffix: u64) -> OsString {
    let mut name_output = name_base.to_os_string();
    if n_suffix > 0 {
        name_output.push(format!("_{n_suffix}"));
    }
    name_output.push(".");
    name_output.push(C_EXT_TARGET);
    name_output
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Reservation

/// A destination name claimed for one candidate.
#[derive(Debug)]
pub(crate) struct SpecReservation {
    pub(crate) path_file_dst: PathBuf,
    pub(crate) file_dst: File,
    /// 0 when the default name was free.
    pub(crate) n_suffix: u64,
}

/// Claim the first free `base[_n].txt` directly under `path_dir_output`.
///
/// Each probe opens with `create_new`, so an existing entry of any kind
/// (file, directory, dangling link) moves the probe to the next suffix and a
/// name is never claimed twice.
pub(crate) fn reserve_destination(
    path_dir_output: &Path,
    name_base: &OsStr,
) -> Result<SpecReservation, io::Error> {
    let mut n_suffix: u64 = 0;
    loop {
        let path_file_dst = path_dir_output.join(derive_output_name(name_base, n_suffix));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path_file_dst)
        {
            Ok(file_dst) => {
                return Ok(SpecReservation {
                    path_file_dst,
                    file_dst,
                    n_suffix,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n_suffix += 1,
            Err(e) => return Err(e),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CopyWithMetadata

/// Stream `path_file_src` into the reserved file, then copy metadata.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    mut file_dst: File,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    let mut file_src = File::open(path_file_src)?;
    io::copy(&mut file_src, &mut file_dst)?;
    drop(file_dst);
    apply_metadata(path_file_src, path_file_dst)
}

fn apply_metadata(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;

    #[cfg(target_os = "linux")]
    copy_xattrs_linux(path_file_src, path_file_dst);

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    fs::set_permissions(path_file_dst, stat_src.permissions())?;
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(_) => return,
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        let _ = xattr::set(path_file_dst, &name, &raw_value);
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
