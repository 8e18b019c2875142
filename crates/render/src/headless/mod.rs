//! A software driver for running without a window or a GPU.
//!
//! [`HeadlessGl`] models the native object model closely enough to exercise this crate:
//! names, bind points, texture storage (RGBA8, base level only), framebuffer color
//! attachments, buffer stores, the pixel unpack state and the error queue. Blits and
//! clears really move pixels, so results can be read back through the inspection
//! methods. Every call is also recorded in a journal, see [`HeadlessGl::calls`].
//!
//! The few things it does not model (mipmaps, depth, stencil, shaders) are rejected
//! with a driver error instead of silently ignored.

mod state;

pub use state::{TextureParams, UnpackState};

use crate::context::{consts, GlContext};
use crate::handle::{FramebufferId, TextureId, VertexArrayId};
use crate::resource::framebuffer::Mode;
use log::debug;
use parking_lot::Mutex;
use state::{BufferSource, Outcome, State};

/// One recorded call into the driver, object names are raw
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    CreateTexture { name: u32 },
    DeleteTexture { name: u32 },
    BindTexture { target: u32, name: u32 },
    TexImage2D {
        target: u32,
        width: i32,
        height: i32,
        format: u32,
        with_data: bool,
    },
    TexSubImage2D {
        target: u32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
    },
    TexParameter { target: u32, parameter: u32, value: i32 },
    PixelStore { parameter: u32, value: i32 },
    CreateFramebuffer { name: u32 },
    DeleteFramebuffer { name: u32 },
    BindFramebuffer { target: u32, name: u32 },
    FramebufferTexture2D { target: u32, attachment: u32, texture: u32 },
    BlitFramebuffer {
        src: [i32; 4],
        dst: [i32; 4],
        mask: u32,
        filter: u32,
    },
    Clear { mask: u32 },
    CreateVertexArray { name: u32 },
    DeleteVertexArray { name: u32 },
    BindVertexArray { name: u32 },
    CreateBuffer { name: u32 },
    DeleteBuffer { name: u32 },
    BindBuffer { target: u32, name: u32 },
    BufferData { target: u32, data: Vec<u8>, usage: u32 },
    BufferDataSize { target: u32, size: i32, usage: u32 },
    BufferSubData { target: u32, offset: i32, data: Vec<u8> },
}

#[derive(Debug, Default)]
struct Inner {
    state: State,
    calls: Vec<Call>,
}

/// See the module documentation
#[derive(Debug, Default)]
pub struct HeadlessGl {
    inner: Mutex<Inner>,
}

impl HeadlessGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal `call`, run it and queue up its error if it failed
    fn run(&self, call: Call, op: impl FnOnce(&mut State) -> Outcome) {
        let mut inner = self.inner.lock();
        if let Err(fault) = op(&mut inner.state) {
            debug!("{:?} failed with {}: {}", call, fault.error, fault.reason);
            inner.state.errors.push_back(fault.error.code());
        }
        inner.calls.push(call);
    }

    fn create(&self, op: impl FnOnce(&mut State) -> u32, call: impl FnOnce(u32) -> Call) -> u32 {
        let mut inner = self.inner.lock();
        let name = op(&mut inner.state);
        inner.calls.push(call(name));
        name
    }

    fn read<T>(&self, op: impl FnOnce(&State) -> T) -> T {
        op(&self.inner.lock().state)
    }

    // Inspection

    /// Every call made so far, oldest first
    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    /// Number of textures, framebuffers, vertex arrays and buffers currently alive
    pub fn live_objects(&self) -> usize {
        self.read(|s| s.live_objects())
    }

    pub fn bound_texture(&self) -> TextureId {
        TextureId::new(self.read(|s| s.texture_2d))
    }

    /// `Mode::Generic` reports the draw binding
    pub fn bound_framebuffer(&self, mode: Mode) -> FramebufferId {
        FramebufferId::new(self.read(|s| match mode {
            Mode::Read => s.read_framebuffer,
            Mode::Draw | Mode::Generic => s.draw_framebuffer,
        }))
    }

    pub fn bound_vertex_array(&self) -> VertexArrayId {
        VertexArrayId::new(self.read(|s| s.vertex_array))
    }

    /// Raw name bound to a buffer target, 0 for unknown targets
    pub fn bound_buffer(&self, target: u32) -> u32 {
        self.read(|s| s.buffer_binding(target).unwrap_or(0))
    }

    pub fn unpack_state(&self) -> UnpackState {
        self.read(|s| s.unpack)
    }

    pub fn is_texture(&self, name: u32) -> bool {
        self.read(|s| s.textures.contains_key(&name))
    }

    pub fn is_framebuffer(&self, name: u32) -> bool {
        self.read(|s| s.framebuffers.contains_key(&name))
    }

    pub fn is_vertex_array(&self, name: u32) -> bool {
        self.read(|s| s.vertex_arrays.contains(&name))
    }

    pub fn is_buffer(&self, name: u32) -> bool {
        self.read(|s| s.buffers.contains_key(&name))
    }

    pub fn texture_size(&self, id: TextureId) -> Option<(i32, i32)> {
        self.read(|s| s.textures.get(&id.raw()).map(|t| (t.width, t.height)))
    }

    /// RGBA8 contents, bottom row first
    pub fn texture_pixels(&self, id: TextureId) -> Option<Vec<u8>> {
        self.read(|s| s.textures.get(&id.raw()).map(|t| t.pixels.clone()))
    }

    pub fn texture_params(&self, id: TextureId) -> Option<TextureParams> {
        self.read(|s| s.textures.get(&id.raw()).map(|t| t.params))
    }

    pub fn color_attachment(&self, id: FramebufferId, index: u32) -> Option<TextureId> {
        self.read(|s| {
            s.framebuffers
                .get(&id.raw())
                .and_then(|fb| fb.colors.get(&index))
                .map(|tex| TextureId::new(*tex))
        })
    }

    pub fn buffer_contents(&self, name: u32) -> Option<Vec<u8>> {
        self.read(|s| s.buffers.get(&name).map(|b| b.data.clone()))
    }

    pub fn buffer_usage(&self, name: u32) -> Option<u32> {
        self.read(|s| s.buffers.get(&name).map(|b| b.usage))
    }
}

impl GlContext for HeadlessGl {
    fn create_texture(&self) -> u32 {
        self.create(State::create_texture, |name| Call::CreateTexture { name })
    }

    fn delete_texture(&self, texture: u32) {
        self.run(Call::DeleteTexture { name: texture }, |s| {
            s.delete_texture(texture);
            Ok(())
        });
    }

    fn bind_texture(&self, target: u32, texture: u32) {
        self.run(
            Call::BindTexture {
                target,
                name: texture,
            },
            |s| s.bind_texture(target, texture),
        );
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
        let call = Call::TexImage2D {
            target,
            width,
            height,
            format,
            with_data: pixels.is_some(),
        };
        self.run(call, |s| {
            s.tex_image_2d(
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
        });
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
        let call = Call::TexSubImage2D {
            target,
            x: x_offset,
            y: y_offset,
            width,
            height,
            format,
        };
        self.run(call, |s| {
            s.tex_sub_image_2d(
                target, level, x_offset, y_offset, width, height, format, ty, pixels,
            )
        });
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        self.run(
            Call::TexParameter {
                target,
                parameter,
                value,
            },
            |s| s.tex_parameter_i32(target, parameter, value),
        );
    }

    fn pixel_store_i32(&self, parameter: u32, value: i32) {
        self.run(Call::PixelStore { parameter, value }, |s| {
            s.pixel_store_i32(parameter, value)
        });
    }

    fn create_framebuffer(&self) -> u32 {
        self.create(State::create_framebuffer, |name| Call::CreateFramebuffer {
            name,
        })
    }

    fn delete_framebuffer(&self, framebuffer: u32) {
        self.run(Call::DeleteFramebuffer { name: framebuffer }, |s| {
            s.delete_framebuffer(framebuffer);
            Ok(())
        });
    }

    fn bind_framebuffer(&self, target: u32, framebuffer: u32) {
        self.run(
            Call::BindFramebuffer {
                target,
                name: framebuffer,
            },
            |s| s.bind_framebuffer(target, framebuffer),
        );
    }

    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: u32,
        level: i32,
    ) {
        self.run(
            Call::FramebufferTexture2D {
                target,
                attachment,
                texture,
            },
            |s| s.framebuffer_texture_2d(target, attachment, texture_target, texture, level),
        );
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
        let src = [src_x0, src_y0, src_x1, src_y1];
        let dst = [dst_x0, dst_y0, dst_x1, dst_y1];
        self.run(
            Call::BlitFramebuffer {
                src,
                dst,
                mask,
                filter,
            },
            |s| s.blit_framebuffer(src, dst, mask, filter),
        );
    }

    fn clear(&self, mask: u32) {
        self.run(Call::Clear { mask }, |s| s.clear(mask));
    }

    fn create_vertex_array(&self) -> u32 {
        self.create(State::create_vertex_array, |name| Call::CreateVertexArray {
            name,
        })
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.run(Call::DeleteVertexArray { name: vertex_array }, |s| {
            s.delete_vertex_array(vertex_array);
            Ok(())
        });
    }

    fn bind_vertex_array(&self, vertex_array: u32) {
        self.run(Call::BindVertexArray { name: vertex_array }, |s| {
            s.bind_vertex_array(vertex_array)
        });
    }

    fn create_buffer(&self) -> u32 {
        self.create(State::create_buffer, |name| Call::CreateBuffer { name })
    }

    fn delete_buffer(&self, buffer: u32) {
        self.run(Call::DeleteBuffer { name: buffer }, |s| {
            s.delete_buffer(buffer);
            Ok(())
        });
    }

    fn bind_buffer(&self, target: u32, buffer: u32) {
        self.run(
            Call::BindBuffer {
                target,
                name: buffer,
            },
            |s| s.bind_buffer(target, buffer),
        );
    }

    fn buffer_data_size(&self, target: u32, size: i32, usage: u32) {
        self.run(
            Call::BufferDataSize {
                target,
                size,
                usage,
            },
            |s| s.buffer_data(target, BufferSource::Size(size), usage),
        );
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.run(
            Call::BufferData {
                target,
                data: data.to_vec(),
                usage,
            },
            |s| s.buffer_data(target, BufferSource::Slice(data), usage),
        );
    }

    fn buffer_sub_data_u8_slice(&self, target: u32, offset: i32, data: &[u8]) {
        self.run(
            Call::BufferSubData {
                target,
                offset,
                data: data.to_vec(),
            },
            |s| s.buffer_sub_data(target, offset, data),
        );
    }

    fn get_error(&self) -> u32 {
        self.inner
            .lock()
            .state
            .errors
            .pop_front()
            .unwrap_or(consts::NO_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::buffer::{Usage, Vbo};
    use crate::resource::{framebuffer, texture};

    #[test]
    fn names_start_at_one_and_never_repeat() {
        let gl = HeadlessGl::new();
        let a = gl.create_texture();
        let b = gl.create_buffer();
        gl.delete_texture(a);
        let c = gl.create_texture();
        assert_eq!(a, 1);
        assert!(b > a);
        assert!(c > b);
    }

    #[test]
    fn errors_queue_in_order() {
        let gl = HeadlessGl::new();
        gl.bind_texture(0xFFFF, 0);
        gl.pixel_store_i32(consts::UNPACK_ROW_LENGTH, -4);
        gl.bind_buffer(consts::ARRAY_BUFFER, 42);
        assert_eq!(gl.get_error(), consts::INVALID_ENUM);
        assert_eq!(gl.get_error(), consts::INVALID_VALUE);
        assert_eq!(gl.get_error(), consts::INVALID_OPERATION);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn journal_records_failed_calls_too() {
        let gl = HeadlessGl::new();
        gl.clear(consts::COLOR_BUFFER_BIT);
        gl.bind_vertex_array(9);
        assert_eq!(
            gl.calls(),
            vec![Call::Clear { mask: consts::COLOR_BUFFER_BIT }, Call::BindVertexArray { name: 9 }]
        );
        gl.clear_calls();
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn deleting_unknown_names_is_silent() {
        let gl = HeadlessGl::new();
        gl.delete_texture(0);
        gl.delete_buffer(77);
        gl.delete_framebuffer(0);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn deleting_texture_detaches_it() {
        let gl = HeadlessGl::new();
        let tex = texture::gen(&gl);
        texture::bind(&gl, tex);
        texture::alloc_empty(&gl, 1, 1);
        let fbo = framebuffer::gen(&gl);
        framebuffer::bind(&gl, fbo, Mode::Draw);
        framebuffer::set_target(&gl, tex);

        texture::del(&gl, tex);
        assert_eq!(gl.color_attachment(fbo, 0), None);
    }

    #[test]
    fn deleting_framebuffer_resets_both_bindings() {
        let gl = HeadlessGl::new();
        let fbo = framebuffer::gen(&gl);
        framebuffer::bind(&gl, fbo, Mode::Generic);
        framebuffer::del(&gl, fbo);
        assert_eq!(gl.bound_framebuffer(Mode::Draw), FramebufferId::NULL);
        assert_eq!(gl.bound_framebuffer(Mode::Read), FramebufferId::NULL);
    }

    #[test]
    fn deleting_buffer_resets_binding() {
        let gl = HeadlessGl::new();
        let vbo = Vbo::gen(&gl);
        Vbo::bind(&gl, vbo);
        Vbo::upload_data(&gl, &[1], Usage::StreamDraw);
        assert_eq!(gl.buffer_usage(vbo.raw()), Some(consts::STREAM_DRAW));
        Vbo::del(&gl, vbo);
        assert_eq!(gl.bound_buffer(consts::ARRAY_BUFFER), 0);
        assert!(!gl.is_buffer(vbo.raw()));
        assert_eq!(gl.buffer_contents(vbo.raw()), None);
    }

    #[test]
    fn rgb_rows_are_aligned() {
        let gl = HeadlessGl::new();
        let tex = texture::gen(&gl);
        texture::bind(&gl, tex);
        // 1x2 RGB image, each row padded to 4 bytes
        let data = [10u8, 20, 30, 0, 40, 50, 60];
        unsafe { texture::upload_image(&gl, 1, 2, &data, texture::PixelFormat::Rgb) };
        assert_eq!(
            gl.texture_pixels(tex),
            Some(vec![10, 20, 30, 255, 40, 50, 60, 255])
        );
    }

    #[test]
    fn short_client_buffer_is_refused() {
        let gl = HeadlessGl::new();
        let tex = texture::gen(&gl);
        texture::bind(&gl, tex);
        texture::alloc_empty(&gl, 4, 4);
        crate::resource::pixel_store::setup_sub_image(&gl, 8, 0, 0);
        unsafe { texture::upload_sub_image(&gl, 0, 0, 2, 2, &[0u8; 16], texture::PixelFormat::Rgba) };
        assert_eq!(gl.get_error(), consts::INVALID_OPERATION);
    }

    #[test]
    fn unmodeled_features_are_rejected() {
        let gl = HeadlessGl::new();
        let tex = texture::gen(&gl);
        texture::bind(&gl, tex);
        unsafe {
            gl.tex_image_2d(consts::TEXTURE_2D, 1, consts::RGBA8 as i32, 1, 1, 0, consts::RGBA, consts::UNSIGNED_BYTE, None);
        }
        assert_eq!(gl.get_error(), consts::INVALID_VALUE);
        gl.clear(0x8000_0000);
        assert_eq!(gl.get_error(), consts::INVALID_VALUE);
        gl.tex_parameter_i32(consts::TEXTURE_2D, consts::TEXTURE_WRAP_S, 0x1234);
        assert_eq!(gl.get_error(), consts::INVALID_ENUM);
    }
}
