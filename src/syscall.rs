use std::io;

use libc::{c_int, c_void};

pub(crate) fn err_no() -> c_int {
    // SAFETY: raw_os_error guarantees Some if constructed from last_os_error.
    unsafe { io::Error::last_os_error().raw_os_error().unwrap_unchecked() }
}

/// # Safety
/// `dirp` must point to a writable buffer of at least `bytes` bytes, and `fd` must be a
/// descriptor opened with `O_DIRECTORY`.
pub(crate) unsafe fn getdents64(fd: c_int, dirp: *mut c_void, bytes: usize) -> isize {
    unsafe { libc::syscall(libc::SYS_getdents64, fd, dirp, bytes) as isize }
}
