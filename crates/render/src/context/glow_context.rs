//! The real driver, through `glow`.
//!
//! Only available for native targets. All calls assume the context is current on the
//! calling thread, which is the caller's job (the window or surface setup).

use super::GlContext;
use glow::{HasContext, NativeBuffer, NativeFramebuffer, NativeTexture, NativeVertexArray};
use log::error;
use std::num::NonZeroU32;

/// Object creation failures are logged and reported as the null name
fn name_of(created: Result<NonZeroU32, String>, what: &str) -> u32 {
    match created {
        Ok(name) => name.get(),
        Err(e) => {
            error!("failed to create {}: {}", what, e);
            0
        }
    }
}

fn texture(name: u32) -> Option<NativeTexture> {
    NonZeroU32::new(name).map(NativeTexture)
}

fn framebuffer(name: u32) -> Option<NativeFramebuffer> {
    NonZeroU32::new(name).map(NativeFramebuffer)
}

fn vertex_array(name: u32) -> Option<NativeVertexArray> {
    NonZeroU32::new(name).map(NativeVertexArray)
}

fn buffer(name: u32) -> Option<NativeBuffer> {
    NonZeroU32::new(name).map(NativeBuffer)
}

// Safety (for every block below): the context is current and every name was handed
// out by this context. Invalid names or enums end up in the error queue, they are not
// undefined behavior for the driver.
impl GlContext for glow::Context {
    fn create_texture(&self) -> u32 {
        name_of(unsafe { HasContext::create_texture(self) }.map(|t| t.0), "texture")
    }

    fn delete_texture(&self, name: u32) {
        if let Some(t) = texture(name) {
            unsafe { HasContext::delete_texture(self, t) }
        }
    }

    fn bind_texture(&self, target: u32, name: u32) {
        unsafe { HasContext::bind_texture(self, target, texture(name)) }
    }

    unsafe fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    ) {
        HasContext::tex_image_2d(
            self,
            target,
            level,
            internal_format,
            width,
            height,
            border,
            format,
            ty,
            pixels,
        )
    }

    unsafe fn tex_sub_image_2d(
        &self,
        target: u32,
        level: i32,
        x_offset: i32,
        y_offset: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    ) {
        HasContext::tex_sub_image_2d(
            self,
            target,
            level,
            x_offset,
            y_offset,
            width,
            height,
            format,
            ty,
            glow::PixelUnpackData::Slice(pixels),
        )
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        unsafe { HasContext::tex_parameter_i32(self, target, parameter, value) }
    }

    fn pixel_store_i32(&self, parameter: u32, value: i32) {
        unsafe { HasContext::pixel_store_i32(self, parameter, value) }
    }

    fn create_framebuffer(&self) -> u32 {
        name_of(
            unsafe { HasContext::create_framebuffer(self) }.map(|f| f.0),
            "framebuffer",
        )
    }

    fn delete_framebuffer(&self, name: u32) {
        if let Some(f) = framebuffer(name) {
            unsafe { HasContext::delete_framebuffer(self, f) }
        }
    }

    fn bind_framebuffer(&self, target: u32, name: u32) {
        unsafe { HasContext::bind_framebuffer(self, target, framebuffer(name)) }
    }

    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        name: u32,
        level: i32,
    ) {
        unsafe {
            HasContext::framebuffer_texture_2d(
                self,
                target,
                attachment,
                texture_target,
                texture(name),
                level,
            )
        }
    }

    fn blit_framebuffer(
        &self,
        src_x0: i32,
        src_y0: i32,
        src_x1: i32,
        src_y1: i32,
        dst_x0: i32,
        dst_y0: i32,
        dst_x1: i32,
        dst_y1: i32,
        mask: u32,
        filter: u32,
    ) {
        unsafe {
            HasContext::blit_framebuffer(
                self, src_x0, src_y0, src_x1, src_y1, dst_x0, dst_y0, dst_x1, dst_y1, mask, filter,
            )
        }
    }

    fn clear(&self, mask: u32) {
        unsafe { HasContext::clear(self, mask) }
    }

    fn create_vertex_array(&self) -> u32 {
        name_of(
            unsafe { HasContext::create_vertex_array(self) }.map(|v| v.0),
            "vertex array",
        )
    }

    fn delete_vertex_array(&self, name: u32) {
        if let Some(v) = vertex_array(name) {
            unsafe { HasContext::delete_vertex_array(self, v) }
        }
    }

    fn bind_vertex_array(&self, name: u32) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array(name)) }
    }

    fn create_buffer(&self) -> u32 {
        name_of(unsafe { HasContext::create_buffer(self) }.map(|b| b.0), "buffer")
    }

    fn delete_buffer(&self, name: u32) {
        if let Some(b) = buffer(name) {
            unsafe { HasContext::delete_buffer(self, b) }
        }
    }

    fn bind_buffer(&self, target: u32, name: u32) {
        unsafe { HasContext::bind_buffer(self, target, buffer(name)) }
    }

    fn buffer_data_size(&self, target: u32, size: i32, usage: u32) {
        unsafe { HasContext::buffer_data_size(self, target, size, usage) }
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { HasContext::buffer_data_u8_slice(self, target, data, usage) }
    }

    fn buffer_sub_data_u8_slice(&self, target: u32, offset: i32, data: &[u8]) {
        unsafe { HasContext::buffer_sub_data_u8_slice(self, target, offset, data) }
    }

    fn get_error(&self) -> u32 {
        unsafe { HasContext::get_error(self) }
    }
}
