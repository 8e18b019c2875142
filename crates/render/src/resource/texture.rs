//! 2D textures
//!
//! Everything but [`gen`] and [`del`] acts on whatever texture is currently bound
//! to the `TEXTURE_2D` target, so [`bind`] first. Storage is always RGBA8.

use crate::compat::ToGl;
use crate::context::{consts, GlContext};
use crate::handle::{Texture, TextureId};
use crate::resource::Resource;
use log::trace;

/// Layout of the client side pixel data handed to an upload, components are always bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba,
    Bgra,
    Rgb,
    Red,
}

/// Default unpack alignment of the native API
pub const UNPACK_ALIGNMENT: usize = 4;

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
            PixelFormat::Rgb => 3,
            PixelFormat::Red => 1,
        }
    }

    /// Distance in bytes between two rows of a client image `row_length` pixels wide
    pub fn row_stride(self, row_length: usize) -> usize {
        let unaligned = row_length * self.bytes_per_pixel();
        (unaligned + UNPACK_ALIGNMENT - 1) / UNPACK_ALIGNMENT * UNPACK_ALIGNMENT
    }

    /// Bytes read for a tightly packed `width` x `height` image (no sub image setup)
    pub fn image_size(self, width: usize, height: usize) -> usize {
        if width == 0 || height == 0 {
            return 0;
        }
        self.row_stride(width) * (height - 1) + width * self.bytes_per_pixel()
    }
}

pub fn gen<G: GlContext + ?Sized>(gl: &G) -> TextureId {
    let id = TextureId::new(gl.create_texture());
    trace!("generated {:?}", id);
    id
}

/// The name must not be used afterwards
pub fn del<G: GlContext + ?Sized>(gl: &G, id: TextureId) {
    trace!("deleting {:?}", id);
    gl.delete_texture(id.raw());
}

pub fn bind<G: GlContext + ?Sized>(gl: &G, id: TextureId) {
    gl.bind_texture(consts::TEXTURE_2D, id.raw());
}

pub fn unbind<G: GlContext + ?Sized>(gl: &G) {
    bind(gl, TextureId::NULL);
}

/// (Re)allocate the bound texture as `width` x `height` and fill it from `data`.
///
/// # Panics
/// If `data` is smaller than a tightly packed image of that size.
///
/// # Safety
/// When a sub image is set up through [`crate::resource::pixel_store`], the driver reads
/// past what the size alone implies; `data` must cover the whole described client image.
pub unsafe fn upload_image<G: GlContext + ?Sized>(
    gl: &G,
    width: i32,
    height: i32,
    data: &[u8],
    format: PixelFormat,
) {
    assert!(
        data.len() >= format.image_size(width.max(0) as usize, height.max(0) as usize),
        "pixel data too small for a {}x{} {:?} image",
        width,
        height,
        format
    );
    gl.tex_image_2d(
        consts::TEXTURE_2D,
        0,
        consts::RGBA8 as i32,
        width,
        height,
        0,
        format.to_gl(),
        consts::UNSIGNED_BYTE,
        Some(data),
    );
}

/// Overwrite a region of the bound texture's existing storage.
///
/// Pair with [`crate::resource::pixel_store::setup_sub_image`] when `data` is itself a
/// region of a larger client image.
///
/// # Safety
/// `data` must hold every byte the driver reads for this region under the current pixel
/// unpack state. The storage is not reallocated, it has to be large enough already.
pub unsafe fn upload_sub_image<G: GlContext + ?Sized>(
    gl: &G,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    data: &[u8],
    format: PixelFormat,
) {
    gl.tex_sub_image_2d(
        consts::TEXTURE_2D,
        0,
        x,
        y,
        width,
        height,
        format.to_gl(),
        consts::UNSIGNED_BYTE,
        data,
    );
}

/// Allocate storage for the bound texture, contents are undefined
pub fn alloc_empty<G: GlContext + ?Sized>(gl: &G, width: i32, height: i32) {
    // Safety: no client memory is read
    unsafe {
        gl.tex_image_2d(
            consts::TEXTURE_2D,
            0,
            consts::RGBA8 as i32,
            width,
            height,
            0,
            consts::RGBA,
            consts::UNSIGNED_BYTE,
            None,
        );
    }
}

/// Repeat or clamp to edge, on both axes of the bound texture
pub fn set_repeat<G: GlContext + ?Sized>(gl: &G, mode: bool) {
    let wrap = (if mode {
        consts::REPEAT
    } else {
        consts::CLAMP_TO_EDGE
    }) as i32;
    gl.tex_parameter_i32(consts::TEXTURE_2D, consts::TEXTURE_WRAP_S, wrap);
    gl.tex_parameter_i32(consts::TEXTURE_2D, consts::TEXTURE_WRAP_T, wrap);
}

/// Linear or nearest filtering, for minification and magnification of the bound texture
pub fn set_smooth<G: GlContext + ?Sized>(gl: &G, mode: bool) {
    let filter = (if mode { consts::LINEAR } else { consts::NEAREST }) as i32;
    gl.tex_parameter_i32(consts::TEXTURE_2D, consts::TEXTURE_MIN_FILTER, filter);
    gl.tex_parameter_i32(consts::TEXTURE_2D, consts::TEXTURE_MAG_FILTER, filter);
}

impl Resource for Texture {
    fn create<G: GlContext + ?Sized>(gl: &G) -> TextureId {
        gen(gl)
    }

    fn destroy<G: GlContext + ?Sized>(gl: &G, id: TextureId) {
        del(gl, id)
    }
}
