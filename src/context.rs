//! The capability set every platform-specific context implements.

use crate::error::Result;
use crate::gl::ContextSettings;

/// Operations a platform context must support so that [`NativeContext`](crate::NativeContext)
/// can stay platform-agnostic.
///
/// Contexts are created once, usually at startup, and then made current and
/// swapped any number of times. "Current" is state of the whole display
/// connection: implementations don't synchronize anything, so callers must
/// serialize `make_current()`/`done_current()` themselves if they use a context
/// from more than one thread.
pub trait GLContextMethods: Sized {
    /// Native handle to a window that a context can be bound to without owning it.
    type WindowHandle: Copy;
    /// Raw OpenGL function pointer type.
    type Proc: Copy;

    /// Creates an unshared context along with a small default window, makes it
    /// current and swaps buffers once.
    fn create(settings: &ContextSettings) -> Result<Self>;

    /// Creates a context that shares GPU-resident objects with `shared`, bound
    /// to `window`. The window is borrowed: it is never destroyed by the context.
    ///
    /// `shared` may be dropped before the returned context.
    fn create_shared(shared: &Self, window: Self::WindowHandle, settings: &ContextSettings) -> Result<Self>;

    /// Binds this context to its window, for its display connection.
    fn make_current(&self) -> Result<()>;

    /// Unbinds any context current on this context's display connection.
    fn done_current(&self) -> Result<()>;

    /// Presents the back buffer. The context should be current.
    fn swap_buffers(&self);

    /// Does this context render directly (i.e not through the windowing system's server) ?
    fn is_direct(&self) -> bool;

    /// Retrieves the OpenGL function pointer for the given name.
    fn get_proc_address(&self, name: &str) -> Option<Self::Proc>;
}
