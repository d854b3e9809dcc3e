//! X11/GLX implementation of [`GLContextMethods`](crate::GLContextMethods).
//!
//! Xlib and libGL are loaded at runtime via `x11-dl`, so building this crate
//! doesn't require X11 development packages.

use std::os::raw::c_ulong;

pub mod api;
pub use self::api::{X11Api, DlX11Api, X11Visual, XErrorHandler};
pub mod context;
pub use self::context::X11GLContext;
pub mod glx;
pub mod missing_bits;
pub mod xlib_error;
pub use self::xlib_error::XErrorTrap;


/// Raw OpenGL function type returned by `glXGetProcAddressARB()`.
pub type X11GLProc = unsafe extern "C" fn();

/// A borrowed X11 window, usually owned by a widget toolkit.
///
/// Contexts bound to it never destroy it; the owner must keep it alive for as
/// long as the context uses it.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct X11WindowHandle(pub c_ulong);

impl X11WindowHandle {
    /// The window's XID.
    pub fn xid(&self) -> c_ulong {
        self.0
    }
}

impl From<c_ulong> for X11WindowHandle {
    fn from(xid: c_ulong) -> Self {
        X11WindowHandle(xid)
    }
}
