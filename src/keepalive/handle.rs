//! Render Handle Module
//!
//! Contracts the cache needs from hosted screens and from the viewport.

// == Render Handle ==
/// An owned reference to a constructed view.
///
/// The cache never inspects a handle. It only hides it when its key stops
/// being active and shows it again on re-activation. Tearing the view down is
/// the handle's `Drop`: evicted, removed and cleared handles are dropped by
/// the store.
pub trait RenderHandle {
    /// Makes the view visible again without reinitializing it.
    fn show(&mut self);

    /// Hides the view while keeping it alive.
    fn hide(&mut self);
}

// == Viewport ==
/// The scroll container shared by every cached view.
pub trait Viewport {
    /// Current scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Whether the visible view has been laid out since it was shown.
    ///
    /// Scrolling a view that is not laid out has no effect.
    fn is_laid_out(&self) -> bool;

    /// Moves the viewport to `offset`.
    fn scroll_to(&mut self, offset: f64);
}
