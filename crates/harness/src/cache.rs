//! Page-cache hints for the import file
//!
//! The import file is written and then read back immediately. Dropping it
//! from the page cache in between keeps the timed read from being served by
//! the write-back cache. Both hints are advisory; on platforms without
//! `posix_fadvise` they do nothing.

use std::fs::File;
use std::io;

/// Ask the OS to drop `file`'s cached pages
pub fn advise_dont_need(file: &File) -> io::Result<()> {
    imp::advise(file, imp::DONTNEED)
}

/// Ask the OS to resume normal caching for `file`
pub fn advise_normal(file: &File) -> io::Result<()> {
    imp::advise(file, imp::NORMAL)
}

#[cfg(any(target_os = "linux", target_os = "android"))]
mod imp {
    use std::fs::File;
    use std::io;
    use std::os::unix::io::AsRawFd;

    pub(super) const DONTNEED: libc::c_int = libc::POSIX_FADV_DONTNEED;
    pub(super) const NORMAL: libc::c_int = libc::POSIX_FADV_NORMAL;

    pub(super) fn advise(file: &File, advice: libc::c_int) -> io::Result<()> {
        // Offset 0, length 0: the whole file.
        let rc = unsafe { libc::posix_fadvise(file.as_raw_fd(), 0, 0, advice) };
        if rc == 0 {
            Ok(())
        } else {
            // posix_fadvise returns the error number instead of setting errno
            Err(io::Error::from_raw_os_error(rc))
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
mod imp {
    use std::fs::File;
    use std::io;

    pub(super) const DONTNEED: i32 = 4;
    pub(super) const NORMAL: i32 = 0;

    pub(super) fn advise(_file: &File, _advice: i32) -> io::Result<()> {
        Ok(())
    }
}
