//! Scoped transforms
//!
//! A [`ScopedTransform`] pushes a transform onto a [`DrawContext`] and pops
//! it when dropped, so the transform is restored on every exit path: early
//! returns, `?` propagation and panics unwinding through the scope.

use std::ops::{Deref, DerefMut};

use crate::context::{DrawContext, Transform2D};

/// Guard that keeps a transform pushed for as long as it lives
pub struct ScopedTransform<'a> {
    ctx: &'a mut (dyn DrawContext + 'a),
}

impl<'a> ScopedTransform<'a> {
    /// Push `transform` onto `ctx` until the guard is dropped
    pub fn new(ctx: &'a mut (dyn DrawContext + 'a), transform: Transform2D) -> Self {
        ctx.push_transform(transform);
        Self { ctx }
    }
}

impl<'a> Deref for ScopedTransform<'a> {
    type Target = dyn DrawContext + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl<'a> DerefMut for ScopedTransform<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl Drop for ScopedTransform<'_> {
    fn drop(&mut self) {
        self.ctx.pop_transform();
    }
}

/// Run `f` with `transform` pushed, restoring it afterwards whatever `f`
/// returns
pub fn with_transform<R>(
    ctx: &mut dyn DrawContext,
    transform: Transform2D,
    f: impl FnOnce(&mut dyn DrawContext) -> R,
) -> R {
    let mut scope = ScopedTransform::new(ctx, transform);
    f(&mut *scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{PaintCommand, PaintContext};

    #[test]
    fn test_pops_on_drop() {
        let mut ctx = PaintContext::new();
        {
            let scope = ScopedTransform::new(&mut ctx, Transform2D::scale(2.0, 1.0));
            assert_eq!(scope.transform_depth(), 1);
        }
        assert_eq!(ctx.transform_depth(), 0);
        assert_eq!(ctx.commands().last(), Some(&PaintCommand::PopTransform));
    }

    #[test]
    fn test_restores_after_error() {
        let mut ctx = PaintContext::new();

        let result: Result<(), &str> =
            with_transform(&mut ctx, Transform2D::scale(1.0, 3.0), |_| Err("boom"));

        assert!(result.is_err());
        assert_eq!(ctx.transform_depth(), 0);
    }

    #[test]
    fn test_restores_after_panic() {
        let mut ctx = PaintContext::new();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            with_transform(&mut ctx, Transform2D::scale(2.0, 2.0), |_| {
                panic!("drawing failed");
            })
        }));

        assert!(outcome.is_err());
        assert_eq!(ctx.transform_depth(), 0);
    }
}
