//! The `NativeContext` facade, which owns one platform-specific context.

use crate::context::GLContextMethods;
use crate::error::{ErrorKind, Result, failed, failed_unexplained};
use crate::gl::ContextSettings;
use crate::OsGLContext;

/// Owns at most one platform-specific OpenGL context and forwards every
/// operation to it.
///
/// A `NativeContext` starts out empty; exactly one of the `create*()` methods
/// populates it. Dropping it tears the context down (and on X11, the window it
/// created, if any, then its display connection).
///
/// A typical widget host creates one unshared `NativeContext` per process, then one
/// per widget, shared with the former and bound to the widget's window.
#[derive(Debug)]
pub struct NativeContext<C: GLContextMethods = OsGLContext> {
    ctx: Option<C>,
}

impl<C: GLContextMethods> Default for NativeContext<C> {
    fn default() -> Self {
        Self { ctx: None }
    }
}

impl<C: GLContextMethods> NativeContext<C> {
    /// Creates an empty `NativeContext`. No platform resources are acquired yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Has one of the `create*()` methods succeeded ?
    pub fn is_created(&self) -> bool {
        self.ctx.is_some()
    }

    /// Gets the platform-specific context, if created.
    pub fn platform_context(&self) -> Option<&C> {
        self.ctx.as_ref()
    }

    /// Creates an unshared context with its own default window, using default settings.
    pub fn create(&mut self) -> Result<()> {
        self.create_with(&ContextSettings::default())
    }

    /// Creates an unshared context with its own window.
    pub fn create_with(&mut self, settings: &ContextSettings) -> Result<()> {
        self.ensure_empty()?;
        self.ctx = Some(C::create(settings)?);
        Ok(())
    }

    /// Creates a context sharing GPU resources with `shared`, bound to the
    /// (borrowed) `window`, using default settings.
    pub fn create_shared(&mut self, shared: &NativeContext<C>, window: C::WindowHandle) -> Result<()> {
        self.create_shared_with(shared, window, &ContextSettings::default())
    }

    /// Creates a context sharing GPU resources with `shared`, bound to the
    /// (borrowed) `window`.
    ///
    /// `shared` may be dropped before `self`; objects it created stay
    /// alive as long as one of the contexts sharing them does.
    pub fn create_shared_with(&mut self, shared: &NativeContext<C>, window: C::WindowHandle, settings: &ContextSettings) -> Result<()> {
        self.ensure_empty()?;
        let shared = match shared.ctx {
            Some(ref shared) => shared,
            None => return failed(ErrorKind::InvalidArgument, "the context to share with was not created"),
        };
        self.ctx = Some(C::create_shared(shared, window, settings)?);
        Ok(())
    }

    /// Makes this context current.
    pub fn make_current(&self) -> Result<()> {
        self.get()?.make_current()
    }

    /// Unbinds the current context, if any, from this context's display connection.
    pub fn done_current(&self) -> Result<()> {
        self.get()?.done_current()
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.get()?.swap_buffers();
        Ok(())
    }

    /// Does the context render directly ?
    pub fn is_direct(&self) -> Result<bool> {
        self.get().map(GLContextMethods::is_direct)
    }

    /// Retrieves the OpenGL function pointer for the given name, suitable for
    /// e.g `gl::load_with()`.
    pub fn get_proc_address(&self, name: &str) -> Option<C::Proc> {
        self.ctx.as_ref().and_then(|ctx| ctx.get_proc_address(name))
    }

    fn get(&self) -> Result<&C> {
        match self.ctx {
            Some(ref ctx) => Ok(ctx),
            None => failed_unexplained(ErrorKind::NotCreated),
        }
    }

    fn ensure_empty(&self) -> Result<()> {
        if self.ctx.is_some() {
            return failed_unexplained(ErrorKind::AlreadyCreated);
        }
        Ok(())
    }
}
