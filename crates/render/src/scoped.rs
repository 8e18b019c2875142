//! Owners that release their native objects when dropped.
//!
//! The resource modules leave lifetimes to the caller. These guards sit one layer above
//! and tie an object to a shared context instead. Contexts are single threaded, hence `Rc`.

use crate::context::GlContext;
use crate::handle::Handle;
use crate::resource::tex_fbo::TexFbo;
use crate::resource::Resource;
use log::debug;
use std::mem;
use std::ops::Deref;
use std::rc::Rc;

/// One native object, deleted on drop unless it is the null handle. Derefs to its
/// handle for use with the resource modules.
#[derive(Debug)]
pub struct Owned<G: GlContext + ?Sized, C: Resource> {
    ctx: Rc<G>,
    handle: Handle<C>,
}

impl<G: GlContext + ?Sized, C: Resource> Owned<G, C> {
    /// Generate a new object
    pub fn new(ctx: Rc<G>) -> Self {
        let handle = C::create(&*ctx);
        Self { ctx, handle }
    }

    /// Take over an existing object, nothing else may delete it afterwards
    pub fn from_raw(ctx: Rc<G>, handle: Handle<C>) -> Self {
        Self { ctx, handle }
    }

    pub fn handle(&self) -> Handle<C> {
        self.handle
    }

    pub fn context(&self) -> &Rc<G> {
        &self.ctx
    }

    /// Give up ownership, the object stays alive
    pub fn into_raw(mut self) -> Handle<C> {
        mem::replace(&mut self.handle, Handle::NULL)
    }
}

impl<G: GlContext + ?Sized, C: Resource> Deref for Owned<G, C> {
    type Target = Handle<C>;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl<G: GlContext + ?Sized, C: Resource> Drop for Owned<G, C> {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            C::destroy(&*self.ctx, self.handle);
        }
    }
}

/// A linked [`TexFbo`] that finalizes itself on drop
#[derive(Debug)]
pub struct OwnedTexFbo<G: GlContext + ?Sized> {
    ctx: Rc<G>,
    target: TexFbo,
}

impl<G: GlContext + ?Sized> OwnedTexFbo<G> {
    /// Runs the whole setup: init, allocation of `width` x `height` and linking
    pub fn new(ctx: Rc<G>, width: i32, height: i32) -> Self {
        let mut target = TexFbo::default();
        target.init(&*ctx);
        target.alloc_empty(&*ctx, width, height);
        target.link_fbo(&*ctx);
        Self { ctx, target }
    }

    /// Reallocate the texture, the framebuffer keeps pointing at it
    pub fn resize(&mut self, width: i32, height: i32) {
        debug!(
            "resizing {:?} from {}x{} to {}x{}",
            self.target.tex, self.target.width, self.target.height, width, height
        );
        self.target.alloc_empty(&*self.ctx, width, height);
    }

    /// Give up ownership, the caller has to call [`TexFbo::fini`] itself
    pub fn into_inner(mut self) -> TexFbo {
        mem::take(&mut self.target)
    }
}

impl<G: GlContext + ?Sized> Deref for OwnedTexFbo<G> {
    type Target = TexFbo;

    fn deref(&self) -> &Self::Target {
        &self.target
    }
}

impl<G: GlContext + ?Sized> Drop for OwnedTexFbo<G> {
    fn drop(&mut self) {
        let target = mem::take(&mut self.target);
        // an empty pair was handed out through into_inner
        if target != TexFbo::default() {
            target.fini(&*self.ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::consts;
    use crate::handle::{Framebuffer, Texture, VertexArray};
    use crate::headless::{Call, HeadlessGl};
    use crate::resource::buffer::{ArrayBuffer, Usage, Vbo};
    use crate::resource::framebuffer::{self, Mode};
    use crate::resource::{texture, vertex_array};

    #[test]
    fn dropping_deletes() {
        let gl = Rc::new(HeadlessGl::new());
        let raw = {
            let tex = Owned::<_, Texture>::new(gl.clone());
            texture::bind(&*gl, *tex);
            texture::alloc_empty(&*gl, 2, 2);
            assert!(gl.is_texture(tex.raw()));
            tex.raw()
        };
        assert!(!gl.is_texture(raw));
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn every_category_is_released() {
        let gl = Rc::new(HeadlessGl::new());
        {
            let _tex = Owned::<_, Texture>::new(gl.clone());
            let _fbo = Owned::<_, Framebuffer>::new(gl.clone());
            let _vao = Owned::<_, VertexArray>::new(gl.clone());
            let vbo = Owned::<_, ArrayBuffer>::new(gl.clone());
            Vbo::bind(&*gl, *vbo);
            Vbo::upload_data(&*gl, &[1, 2, 3, 4], Usage::DynamicDraw);
            assert_eq!(gl.live_objects(), 4);
        }
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(gl.bound_buffer(consts::ARRAY_BUFFER), 0);
    }

    #[test]
    fn into_raw_keeps_object() {
        let gl = Rc::new(HeadlessGl::new());
        let vao = Owned::<_, VertexArray>::new(gl.clone()).into_raw();
        assert!(gl.is_vertex_array(vao.raw()));
        assert_eq!(Rc::strong_count(&gl), 1);
        vertex_array::del(&*gl, vao);
        assert!(!gl.is_vertex_array(vao.raw()));
    }

    #[test]
    fn adopts_existing_object() {
        let gl = Rc::new(HeadlessGl::new());
        let raw = framebuffer::gen(&*gl);
        drop(Owned::from_raw(gl.clone(), raw));
        assert!(!gl.is_framebuffer(raw.raw()));
    }

    #[test]
    fn works_through_trait_objects() {
        let headless = Rc::new(HeadlessGl::new());
        let gl: Rc<dyn GlContext> = headless.clone();
        let tex = Owned::<_, Texture>::new(gl);
        let raw = tex.handle();
        drop(tex);
        assert!(!headless.is_texture(raw.raw()));
    }

    #[test]
    fn tex_fbo_lifecycle() {
        let gl = Rc::new(HeadlessGl::new());
        let (tex, fbo) = {
            let target = OwnedTexFbo::new(gl.clone(), 16, 8);
            assert_eq!((target.width, target.height), (16, 8));
            assert_eq!(gl.color_attachment(target.fbo, 0), Some(target.tex));
            assert_eq!(gl.bound_framebuffer(Mode::Draw), target.fbo);
            (target.tex, target.fbo)
        };
        assert!(!gl.is_texture(tex.raw()));
        assert!(!gl.is_framebuffer(fbo.raw()));
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn tex_fbo_resize() {
        let gl = Rc::new(HeadlessGl::new());
        let mut target = OwnedTexFbo::new(gl.clone(), 16, 8);
        target.resize(4, 4);
        assert_eq!((target.width, target.height), (4, 4));
        assert_eq!(gl.texture_size(target.tex), Some((4, 4)));
        assert_eq!(gl.color_attachment(target.fbo, 0), Some(target.tex));
    }

    #[test]
    fn tex_fbo_into_inner() {
        let gl = Rc::new(HeadlessGl::new());
        let target = OwnedTexFbo::new(gl.clone(), 2, 2).into_inner();
        assert_eq!(gl.live_objects(), 2);
        assert_eq!(Rc::strong_count(&gl), 1);
        assert!(!gl.calls().iter().any(|c| matches!(c, Call::DeleteTexture { .. } | Call::DeleteFramebuffer { .. })));
        target.fini(&*gl);
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn null_handles_are_not_deleted() {
        let gl = Rc::new(HeadlessGl::new());
        drop(Owned::<_, Texture>::from_raw(gl.clone(), Handle::NULL));
        let raw = Owned::<_, ArrayBuffer>::new(gl.clone()).into_raw();
        assert!(gl.is_buffer(raw.raw()));
        assert!(!gl.calls().iter().any(|c| matches!(c, Call::DeleteTexture { .. } | Call::DeleteBuffer { .. })));
    }
}
