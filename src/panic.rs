use std::error::Error;

use derive_more::{Display, Error};
use libc::c_int;

pub(crate) trait Panic: Error {
    fn panic(&self) -> ! {
        panic!("{}", self)
    }
}

#[derive(Debug, Display, Error)]
#[display("file descriptor corruption")]
pub(crate) struct BadFdPanic;
impl Panic for BadFdPanic {}

#[derive(Debug, Display, Error)]
#[display("buffer pointer outside accessible address space")]
pub(crate) struct BadBufferAddrPanic;
impl Panic for BadBufferAddrPanic {}

#[derive(Debug, Display, Error)]
#[display("buffer too small to hold a directory entry")]
pub(crate) struct UndersizedBufferPanic;
impl Panic for UndersizedBufferPanic {}

#[derive(Debug, Display, Error)]
#[display("unexpected OS error with code: {_0}")]
pub(crate) struct UnexpectedErrorPanic(#[error(not(source))] pub(crate) c_int);
impl Panic for UnexpectedErrorPanic {}
