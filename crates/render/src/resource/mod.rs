use crate::context::GlContext;
use crate::handle::{Category, Handle};

pub mod buffer;
pub mod framebuffer;
pub mod pixel_store;
pub mod tex_fbo;
pub mod texture;
pub mod vertex_array;

/// A category whose objects can be created and destroyed on their own.
///
/// Lets the owning guards in [`crate::scoped`] work over every category, the free
/// functions in the category modules remain the primary api.
pub trait Resource: Category + Sized {
    fn create<G: GlContext + ?Sized>(gl: &G) -> Handle<Self>;
    fn destroy<G: GlContext + ?Sized>(gl: &G, handle: Handle<Self>);
}
