//! Optional error reporting on top of the native error queue.
//!
//! None of the resource modules look at driver errors. Callers that want to know
//! either poll with [`check`] / [`drain_errors`] at points of their choosing or wrap
//! their context in [`Checked`], which inspects the queue after every single call.

use crate::context::{consts, GlContext};
use log::{error, warn};
use std::cell::Cell;
use thiserror::Error;

/// Broken or lost contexts may report the same error forever
const MAX_DRAINED: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum GlError {
    #[error("invalid enum")]
    InvalidEnum,
    #[error("invalid value")]
    InvalidValue,
    #[error("invalid operation")]
    InvalidOperation,
    #[error("invalid framebuffer operation")]
    InvalidFramebufferOperation,
    #[error("out of memory")]
    OutOfMemory,
    #[error("unknown error code {0:#06x}")]
    Unknown(u32),
}

impl GlError {
    /// `None` for `NO_ERROR`
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            consts::NO_ERROR => None,
            consts::INVALID_ENUM => Some(GlError::InvalidEnum),
            consts::INVALID_VALUE => Some(GlError::InvalidValue),
            consts::INVALID_OPERATION => Some(GlError::InvalidOperation),
            consts::INVALID_FRAMEBUFFER_OPERATION => Some(GlError::InvalidFramebufferOperation),
            consts::OUT_OF_MEMORY => Some(GlError::OutOfMemory),
            other => Some(GlError::Unknown(other)),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            GlError::InvalidEnum => consts::INVALID_ENUM,
            GlError::InvalidValue => consts::INVALID_VALUE,
            GlError::InvalidOperation => consts::INVALID_OPERATION,
            GlError::InvalidFramebufferOperation => consts::INVALID_FRAMEBUFFER_OPERATION,
            GlError::OutOfMemory => consts::OUT_OF_MEMORY,
            GlError::Unknown(code) => code,
        }
    }
}

/// Empty the error queue, oldest error first
pub fn drain_errors<G: GlContext + ?Sized>(gl: &G) -> Vec<GlError> {
    let mut errors = Vec::new();
    while errors.len() < MAX_DRAINED {
        match GlError::from_code(gl.get_error()) {
            Some(e) => errors.push(e),
            None => break,
        }
    }
    errors
}

/// Empty the error queue and fail with the oldest error, later ones are logged
pub fn check<G: GlContext + ?Sized>(gl: &G) -> Result<(), GlError> {
    let mut errors = drain_errors(gl).into_iter();
    match errors.next() {
        None => Ok(()),
        Some(first) => {
            for e in errors {
                warn!("additional driver error: {}", e);
            }
            Err(first)
        }
    }
}

/// A context that drains the error queue after every call and logs what it finds.
///
/// Errors are consumed in the process, so `get_error` on a `Checked` context will
/// usually report nothing; use [`Checked::failures`] instead.
#[derive(Debug)]
pub struct Checked<G: GlContext> {
    inner: G,
    failures: Cell<usize>,
}

impl<G: GlContext> Checked<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            failures: Cell::new(0),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    /// Number of errors reported so far
    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    fn after(&self, call: &str) {
        for e in drain_errors(&self.inner) {
            error!("{} failed: {}", call, e);
            self.failures.set(self.failures.get() + 1);
        }
    }
}

impl<G: GlContext> GlContext for Checked<G> {
    fn create_texture(&self) -> u32 {
        let name = self.inner.create_texture();
        self.after("create_texture");
        name
    }

    fn delete_texture(&self, texture: u32) {
        self.inner.delete_texture(texture);
        self.after("delete_texture");
    }

    fn bind_texture(&self, target: u32, texture: u32) {
        self.inner.bind_texture(target, texture);
        self.after("bind_texture");
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
        self.inner.tex_image_2d(
            target,
            level,
            internal_format,
            width,
            height,
            border,
            format,
            ty,
            pixels,
        );
        self.after("tex_image_2d");
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
        self.inner.tex_sub_image_2d(
            target, level, x_offset, y_offset, width, height, format, ty, pixels,
        );
        self.after("tex_sub_image_2d");
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        self.inner.tex_parameter_i32(target, parameter, value);
        self.after("tex_parameter_i32");
    }

    fn pixel_store_i32(&self, parameter: u32, value: i32) {
        self.inner.pixel_store_i32(parameter, value);
        self.after("pixel_store_i32");
    }

    fn create_framebuffer(&self) -> u32 {
        let name = self.inner.create_framebuffer();
        self.after("create_framebuffer");
        name
    }

    fn delete_framebuffer(&self, framebuffer: u32) {
        self.inner.delete_framebuffer(framebuffer);
        self.after("delete_framebuffer");
    }

    fn bind_framebuffer(&self, target: u32, framebuffer: u32) {
        self.inner.bind_framebuffer(target, framebuffer);
        self.after("bind_framebuffer");
    }

    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: u32,
        level: i32,
    ) {
        self.inner
            .framebuffer_texture_2d(target, attachment, texture_target, texture, level);
        self.after("framebuffer_texture_2d");
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
        self.inner.blit_framebuffer(
            src_x0, src_y0, src_x1, src_y1, dst_x0, dst_y0, dst_x1, dst_y1, mask, filter,
        );
        self.after("blit_framebuffer");
    }

    fn clear(&self, mask: u32) {
        self.inner.clear(mask);
        self.after("clear");
    }

    fn create_vertex_array(&self) -> u32 {
        let name = self.inner.create_vertex_array();
        self.after("create_vertex_array");
        name
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.inner.delete_vertex_array(vertex_array);
        self.after("delete_vertex_array");
    }

    fn bind_vertex_array(&self, vertex_array: u32) {
        self.inner.bind_vertex_array(vertex_array);
        self.after("bind_vertex_array");
    }

    fn create_buffer(&self) -> u32 {
        let name = self.inner.create_buffer();
        self.after("create_buffer");
        name
    }

    fn delete_buffer(&self, buffer: u32) {
        self.inner.delete_buffer(buffer);
        self.after("delete_buffer");
    }

    fn bind_buffer(&self, target: u32, buffer: u32) {
        self.inner.bind_buffer(target, buffer);
        self.after("bind_buffer");
    }

    fn buffer_data_size(&self, target: u32, size: i32, usage: u32) {
        self.inner.buffer_data_size(target, size, usage);
        self.after("buffer_data_size");
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.inner.buffer_data_u8_slice(target, data, usage);
        self.after("buffer_data_u8_slice");
    }

    fn buffer_sub_data_u8_slice(&self, target: u32, offset: i32, data: &[u8]) {
        self.inner.buffer_sub_data_u8_slice(target, offset, data);
        self.after("buffer_sub_data_u8_slice");
    }

    fn get_error(&self) -> u32 {
        self.inner.get_error()
    }
}
