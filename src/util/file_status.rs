//! File-type checks and metadata propagation from a `.Z` file to its
//! decompressed output.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

/// Sets mtime (atime becomes now), permission bits, and on Unix ownership.
///
/// Ownership is best-effort: an unprivileged user cannot give a file away,
/// and that failure is ignored. `path` must be a regular file.
pub fn set_file_stat(
    path: &Path,
    mtime: SystemTime,
    uid: u32,
    gid: u32,
    mode: u32,
) -> io::Result<()> {
    if !is_reg_file(path) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "set_file_stat: not a regular file",
        ));
    }

    filetime::set_file_times(
        path,
        FileTime::from_system_time(SystemTime::now()),
        FileTime::from_system_time(mtime),
    )?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))?;

        use nix::unistd::{chown, Gid, Uid};
        let _ = chown(path, Some(Uid::from_raw(uid)), Some(Gid::from_raw(gid)));
    }
    #[cfg(not(unix))]
    {
        let _ = (uid, gid);
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_readonly(mode & 0o200 == 0);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Copies mtime, permissions and ownership recorded in `src` onto `dst`.
pub fn copy_file_stat(src: &Metadata, dst: &Path) -> io::Result<()> {
    let mtime = src.modified()?;
    #[cfg(unix)]
    let (uid, gid, mode) = {
        use std::os::unix::fs::MetadataExt;
        (src.uid(), src.gid(), src.mode())
    };
    #[cfg(not(unix))]
    let (uid, gid, mode) = (0, 0, if src.permissions().readonly() { 0o444 } else { 0o644 });
    set_file_stat(dst, mtime, uid, gid, mode)
}

pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}
