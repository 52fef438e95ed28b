//! The [`Directory`] reader: one open directory stream, read a raw entry name at a time.
//!
//! # Opening
//! [`Directory::open`] takes a C pathname and classifies every open failure into
//! [`DirectoryAccessError`]. Opening is the only fallible operation: after a successful open,
//! reading runs to exhaustion and end-of-stream is a normal termination.
//!
//! # Reading
//! [`Directory::read_entry`] surfaces names in underlying-stream order, `.` and `..` included,
//! with no filtering and no buffering beyond one `getdents64` batch. Names are raw bytes;
//! decoding happens a layer up.

use std::ffi::CStr;
use std::fmt::{self, Debug, Formatter};
use std::mem::offset_of;
use std::ptr;

use libc::{EBADF, EFAULT, EINVAL, O_CLOEXEC, O_DIRECTORY, O_RDONLY, dirent64};

use crate::error::{CloseError, DirectoryAccessError};
use crate::fd::Fd;
use crate::panic::{BadBufferAddrPanic, BadFdPanic, Panic, UndersizedBufferPanic};
use crate::syscall;

const BUFFER_SIZE: usize = 1024;

// getdents64 places each record at an 8-aligned offset from the start of the buffer, so the
// buffer itself must be 8-aligned.
#[repr(C, align(8))]
struct DentBuffer([u8; BUFFER_SIZE]);

/// An open directory stream, exclusively owning its descriptor.
///
/// The descriptor is released exactly once: by [`close`](Directory::close), or on drop for
/// every other exit path (exhaustion, early abandonment, unwinding).
pub struct Directory {
    fd: Fd,
    buf: Box<DentBuffer>,
    len: usize,
    pos: usize,
}

impl Directory {
    pub fn open(pathname: &CStr) -> Result<Directory, DirectoryAccessError> {
        match Fd::open(pathname, O_RDONLY | O_DIRECTORY | O_CLOEXEC) {
            Ok(fd) => Ok(Directory {
                fd,
                buf: Box::new(DentBuffer([0; BUFFER_SIZE])),
                len: 0,
                pos: 0,
            }),
            Err(code) => Err(DirectoryAccessError::from_os_error(code)),
        }
    }

    /// The next raw entry name, or [`None`] once the stream is exhausted.
    ///
    /// Names are the bytes the kernel reports, without the terminating nul. A read failure
    /// after open terminates the stream.
    pub fn read_entry(&mut self) -> Option<Vec<u8>> {
        if self.pos >= self.len {
            self.fill()?;
        }

        // SAFETY: the kernel wrote a complete dirent64 record at pos; d_reclen is within the
        // record and d_name is nul-terminated inside it.
        let name = unsafe {
            let record = self.buf.0.as_ptr().add(self.pos);
            let reclen = record.add(offset_of!(dirent64, d_reclen)).cast::<u16>();
            self.pos += ptr::read_unaligned(reclen) as usize;
            CStr::from_ptr(record.add(offset_of!(dirent64, d_name)).cast())
        };
        Some(name.to_bytes().to_owned())
    }

    fn fill(&mut self) -> Option<()> {
        // SAFETY: the buffer outlives the call and its length is passed alongside it.
        match unsafe { syscall::getdents64(*self.fd, self.buf.0.as_mut_ptr().cast(), BUFFER_SIZE) } {
            -1 => match syscall::err_no() {
                EBADF =>  BadFdPanic.panic(),
                EFAULT => BadBufferAddrPanic.panic(),
                EINVAL => UndersizedBufferPanic.panic(),
                // Read failures after open terminate the stream.
                _ =>      None,
            },
            0 => None,
            count => {
                self.len = count as usize;
                self.pos = 0;
                Some(())
            },
        }
    }

    pub fn close(self) -> Result<(), CloseError> {
        self.fd.close()
    }
}

impl Debug for Directory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directory").field("fd", &self.fd).finish_non_exhaustive()
    }
}
