// Useful reference: _XPrintDefaultError() in XlibInt.c (X11 sources)

//! Catching asynchronous Xlib protocol errors while creating contexts.

use std::fmt::{self, Display, Formatter};
use std::os::raw::c_int;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use x11_dl::xlib as x;
use super::api::{X11Api, XErrorHandler};

// Xlib's error handler is global to the process, so this has to be too.
static ERROR_OCCURRED: AtomicBool = AtomicBool::new(false);
static LAST_ERROR_CODE: AtomicU8 = AtomicU8::new(0);
static LAST_REQUEST_CODE: AtomicU8 = AtomicU8::new(0);
static LAST_MINOR_CODE: AtomicU8 = AtomicU8::new(0);

/// The last protocol error reported while an `XErrorTrap` was installed.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct XErrorInfo {
    pub error_code: u8,
    pub request_code: u8,
    pub minor_code: u8,
}

impl Display for XErrorInfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "X error {} (request_code: {}, minor_code: {})", self.error_code, self.request_code, self.minor_code)
    }
}

pub(crate) unsafe extern "C" fn record_x_error(_x_display: *mut x::Display, e: *mut x::XErrorEvent) -> c_int {
    // NOTE: DO NOT make requests to the X server within X error handlers such as this one.
    if !e.is_null() {
        let e = &*e;
        LAST_ERROR_CODE.store(e.error_code, Ordering::SeqCst);
        LAST_REQUEST_CODE.store(e.request_code, Ordering::SeqCst);
        LAST_MINOR_CODE.store(e.minor_code, Ordering::SeqCst);
        error!("Received X error: XErrorEvent {{ resourceid: {}, serial: {}, error_code: {}, request_code: {}, minor_code: {} }}", e.resourceid, e.serial, e.error_code, e.request_code, e.minor_code);
    }
    ERROR_OCCURRED.store(true, Ordering::SeqCst);
    0 // The return value is ignored anyway
}

/// Records X protocol errors for as long as it lives, instead of letting
/// Xlib's default handler terminate the process.
///
/// Installing it swaps the process-wide Xlib error handler; dropping it puts
/// the previous one back, whichever way the enclosing function returns.
///
/// All display connections in all threads of a process share the same error
/// handler: another thread making Xlib calls while a trap is installed will
/// have its errors recorded here, and vice versa. Only create contexts from
/// one thread at a time.
pub struct XErrorTrap<'a, A: X11Api> {
    api: &'a A,
    previous: XErrorHandler,
}

impl<'a, A: X11Api> XErrorTrap<'a, A> {
    /// Clears any previously recorded error, then installs the recording handler.
    pub fn install(api: &'a A) -> Self {
        ERROR_OCCURRED.store(false, Ordering::SeqCst);
        let previous = unsafe {
            api.set_error_handler(Some(record_x_error))
        };
        trace!("Installed X error trap");
        Self { api, previous }
    }
    /// Gets the last error recorded since installation or the last `clear()`.
    ///
    /// Errors are only reported once the X server has processed the faulty
    /// request; call `XSync()` first.
    pub fn error(&self) -> Option<XErrorInfo> {
        if !ERROR_OCCURRED.load(Ordering::SeqCst) {
            return None;
        }
        Some(XErrorInfo {
            error_code: LAST_ERROR_CODE.load(Ordering::SeqCst),
            request_code: LAST_REQUEST_CODE.load(Ordering::SeqCst),
            minor_code: LAST_MINOR_CODE.load(Ordering::SeqCst),
        })
    }
    /// Forgets the last recorded error, e.g before retrying a request.
    pub fn clear(&self) {
        ERROR_OCCURRED.store(false, Ordering::SeqCst);
    }
}

impl<'a, A: X11Api> Drop for XErrorTrap<'a, A> {
    fn drop(&mut self) {
        unsafe {
            self.api.set_error_handler(self.previous);
        }
        trace!("Restored previous X error handler");
    }
}
