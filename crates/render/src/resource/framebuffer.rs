//! Framebuffer objects
//!
//! The native api keeps two framebuffer bind points, draw and read. Binding for
//! [`Mode::Generic`] sets both. [`set_target`] and [`clear`] act on the draw binding,
//! [`blit`] copies from the read binding into the draw binding.

use crate::compat::ToGl;
use crate::context::{consts, GlContext};
use crate::handle::{Framebuffer, FramebufferId, TextureId};
use crate::resource::Resource;
use log::trace;

/// Which bind point an operation affects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Draw,
    Read,
    Generic,
}

/// Filter used when a blit scales
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlitMode {
    Nearest,
    Linear,
}

impl Default for BlitMode {
    fn default() -> Self {
        BlitMode::Nearest
    }
}

pub fn gen<G: GlContext + ?Sized>(gl: &G) -> FramebufferId {
    let id = FramebufferId::new(gl.create_framebuffer());
    trace!("generated {:?}", id);
    id
}

/// The name must not be used afterwards
pub fn del<G: GlContext + ?Sized>(gl: &G, id: FramebufferId) {
    trace!("deleting {:?}", id);
    gl.delete_framebuffer(id.raw());
}

pub fn bind<G: GlContext + ?Sized>(gl: &G, id: FramebufferId, mode: Mode) {
    gl.bind_framebuffer(mode.to_gl(), id.raw());
}

/// Rebind the default framebuffer
pub fn unbind<G: GlContext + ?Sized>(gl: &G, mode: Mode) {
    bind(gl, FramebufferId::NULL, mode);
}

/// Attach `target` as color attachment 0 of the framebuffer bound for drawing
pub fn set_target<G: GlContext + ?Sized>(gl: &G, target: TextureId) {
    set_target_at(gl, target, 0);
}

/// Attach `target` as color attachment `color_attach` of the framebuffer bound for drawing
pub fn set_target_at<G: GlContext + ?Sized>(gl: &G, target: TextureId, color_attach: u32) {
    gl.framebuffer_texture_2d(
        consts::FRAMEBUFFER,
        consts::COLOR_ATTACHMENT0 + color_attach,
        consts::TEXTURE_2D,
        target.raw(),
        0,
    );
}

/// Copy a rectangle of the read framebuffer into a rectangle of the draw framebuffer,
/// scaling with `mode` when the sizes differ
#[allow(clippy::too_many_arguments)]
pub fn blit<G: GlContext + ?Sized>(
    gl: &G,
    src_x: i32,
    src_y: i32,
    src_w: i32,
    src_h: i32,
    dst_x: i32,
    dst_y: i32,
    dst_w: i32,
    dst_h: i32,
    mode: BlitMode,
) {
    gl.blit_framebuffer(
        src_x,
        src_y,
        src_x.wrapping_add(src_w),
        src_y.wrapping_add(src_h),
        dst_x,
        dst_y,
        dst_x.wrapping_add(dst_w),
        dst_y.wrapping_add(dst_h),
        consts::COLOR_BUFFER_BIT,
        mode.to_gl(),
    );
}

/// [`blit`] with the source size reused for the destination
#[allow(clippy::too_many_arguments)]
pub fn blit_same_size<G: GlContext + ?Sized>(
    gl: &G,
    src_x: i32,
    src_y: i32,
    dst_x: i32,
    dst_y: i32,
    src_w: i32,
    src_h: i32,
    mode: BlitMode,
) {
    blit(
        gl, src_x, src_y, src_w, src_h, dst_x, dst_y, src_w, src_h, mode,
    );
}

/// Clear the color buffer of the framebuffer bound for drawing
pub fn clear<G: GlContext + ?Sized>(gl: &G) {
    gl.clear(consts::COLOR_BUFFER_BIT);
}

impl Resource for Framebuffer {
    fn create<G: GlContext + ?Sized>(gl: &G) -> FramebufferId {
        gen(gl)
    }

    fn destroy<G: GlContext + ?Sized>(gl: &G, id: FramebufferId) {
        del(gl, id)
    }
}
