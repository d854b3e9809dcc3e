//! The BSDs: contexts are created through X11 and GLX, as on Linux.

use crate::x11::{X11GLContext, X11GLProc, X11WindowHandle};

pub type OsGLContext = X11GLContext;
pub type OsWindowHandle = X11WindowHandle;
pub type OsGLProc = X11GLProc;
