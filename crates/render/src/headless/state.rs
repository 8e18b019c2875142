use crate::compat::FromGl;
use crate::context::consts;
use crate::diagnostics::GlError;
use crate::resource::buffer::Usage;
use crate::resource::framebuffer::BlitMode;
use crate::resource::texture::PixelFormat;
use log::warn;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Highest color attachment index accepted, exclusive
pub(super) const MAX_COLOR_ATTACHMENTS: u32 = 8;

/// Largest texture edge accepted, the minimum the native api guarantees
pub(super) const MAX_TEXTURE_SIZE: i32 = 4096;

/// A failed call: the error the driver records and why
#[derive(Debug)]
pub(super) struct Fault {
    pub error: GlError,
    pub reason: String,
}

pub(super) type Outcome = Result<(), Fault>;

fn fault<T>(error: GlError, reason: impl Into<String>) -> Result<T, Fault> {
    Err(Fault {
        error,
        reason: reason.into(),
    })
}

/// Sampler state of a texture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureParams {
    pub wrap_s: u32,
    pub wrap_t: u32,
    pub min_filter: u32,
    pub mag_filter: u32,
}

impl Default for TextureParams {
    /// What the native api starts every texture with
    fn default() -> Self {
        Self {
            wrap_s: consts::REPEAT,
            wrap_t: consts::REPEAT,
            min_filter: consts::NEAREST_MIPMAP_LINEAR,
            mag_filter: consts::LINEAR,
        }
    }
}

/// Pixel unpack state, all zero by default
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnpackState {
    pub row_length: i32,
    pub skip_pixels: i32,
    pub skip_rows: i32,
}

#[derive(Clone, Debug, Default)]
pub(super) struct TextureObject {
    pub width: i32,
    pub height: i32,
    /// RGBA8, rows bottom to top
    pub pixels: Vec<u8>,
    pub params: TextureParams,
}

impl TextureObject {
    fn has_storage(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    fn texel(&self, x: i32, y: i32) -> [u8; 4] {
        let at = ((y * self.width + x) * 4) as usize;
        let mut texel = [0u8; 4];
        texel.copy_from_slice(&self.pixels[at..at + 4]);
        texel
    }

    fn set_texel(&mut self, x: i32, y: i32, texel: [u8; 4]) {
        let at = ((y * self.width + x) * 4) as usize;
        self.pixels[at..at + 4].copy_from_slice(&texel);
    }
}

#[derive(Debug, Default)]
pub(super) struct FramebufferObject {
    /// attachment index -> texture name
    pub colors: BTreeMap<u32, u32>,
}

#[derive(Debug)]
pub(super) struct BufferObject {
    pub data: Vec<u8>,
    pub usage: u32,
}

impl Default for BufferObject {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            usage: consts::STATIC_DRAW,
        }
    }
}

/// Everything the native driver would keep around for one context
#[derive(Debug, Default)]
pub(super) struct State {
    last_name: u32,
    pub textures: HashMap<u32, TextureObject>,
    pub framebuffers: HashMap<u32, FramebufferObject>,
    pub vertex_arrays: HashSet<u32>,
    pub buffers: HashMap<u32, BufferObject>,
    deleted: HashSet<u32>,

    pub texture_2d: u32,
    pub draw_framebuffer: u32,
    pub read_framebuffer: u32,
    pub vertex_array: u32,
    pub array_buffer: u32,
    pub element_array_buffer: u32,
    pub unpack: UnpackState,

    pub errors: VecDeque<u32>,
}

/// Convert client pixels to RGBA8
fn to_rgba(format: PixelFormat, src: &[u8]) -> [u8; 4] {
    match format {
        PixelFormat::Rgba => [src[0], src[1], src[2], src[3]],
        PixelFormat::Bgra => [src[2], src[1], src[0], src[3]],
        PixelFormat::Rgb => [src[0], src[1], src[2], 255],
        PixelFormat::Red => [src[0], 0, 0, 255],
    }
}

impl State {
    /// Names are never handed out twice, which makes stale handles detectable
    fn next_name(&mut self) -> u32 {
        self.last_name += 1;
        self.last_name
    }

    pub fn live_objects(&self) -> usize {
        self.textures.len() + self.framebuffers.len() + self.vertex_arrays.len() + self.buffers.len()
    }

    fn check_name(&self, live: bool, name: u32, kind: &str) -> Outcome {
        if name == 0 || live {
            return Ok(());
        }
        if self.deleted.contains(&name) {
            warn!("{} {} used after it was deleted", kind, name);
            fault(GlError::InvalidOperation, format!("{} {} was deleted", kind, name))
        } else {
            fault(GlError::InvalidOperation, format!("{} {} was never generated", kind, name))
        }
    }

    /// Remember a deleted name. Deleting unknown names is silent, as in the native api.
    fn retire(&mut self, existed: bool, name: u32, kind: &str) {
        if existed {
            self.deleted.insert(name);
        } else if self.deleted.contains(&name) {
            warn!("{} {} deleted twice", kind, name);
        }
    }

    // Textures

    pub fn create_texture(&mut self) -> u32 {
        let name = self.next_name();
        self.textures.insert(name, TextureObject::default());
        name
    }

    pub fn delete_texture(&mut self, name: u32) {
        if name == 0 {
            return;
        }
        let existed = self.textures.remove(&name).is_some();
        self.retire(existed, name, "texture");
        if !existed {
            return;
        }
        if self.texture_2d == name {
            self.texture_2d = 0;
        }
        // detached everywhere, not only from the bound framebuffers
        for fb in self.framebuffers.values_mut() {
            fb.colors.retain(|_, tex| *tex != name);
        }
    }

    pub fn bind_texture(&mut self, target: u32, name: u32) -> Outcome {
        if target != consts::TEXTURE_2D {
            return fault(GlError::InvalidEnum, format!("texture target {:#x}", target));
        }
        self.check_name(self.textures.contains_key(&name), name, "texture")?;
        self.texture_2d = name;
        Ok(())
    }

    fn bound_texture_mut(&mut self, target: u32) -> Result<&mut TextureObject, Fault> {
        if target != consts::TEXTURE_2D {
            return fault(GlError::InvalidEnum, format!("texture target {:#x}", target));
        }
        let name = self.texture_2d;
        match self.textures.get_mut(&name) {
            Some(tex) if name != 0 => Ok(tex),
            _ => fault(GlError::InvalidOperation, "no texture bound"),
        }
    }

    fn pixel_transfer(level: i32, format: u32, ty: u32) -> Result<PixelFormat, Fault> {
        if level != 0 {
            return fault(GlError::InvalidValue, "only the base level is modeled");
        }
        if ty != consts::UNSIGNED_BYTE {
            return fault(GlError::InvalidEnum, format!("component type {:#x}", ty));
        }
        match PixelFormat::from_gl(format) {
            Some(format) => Ok(format),
            None => fault(GlError::InvalidEnum, format!("pixel format {:#x}", format)),
        }
    }

    /// Read a `width` x `height` region of client memory honoring the unpack state
    fn read_client(
        &self,
        format: PixelFormat,
        width: i32,
        height: i32,
        src: &[u8],
    ) -> Result<Vec<[u8; 4]>, Fault> {
        let unpack = self.unpack;
        let row_length = (if unpack.row_length > 0 {
            unpack.row_length
        } else {
            width
        }) as usize;
        let stride = format.row_stride(row_length);
        let bpp = format.bytes_per_pixel();
        let (skip_x, skip_y) = (unpack.skip_pixels as usize, unpack.skip_rows as usize);
        let (width, height) = (width as usize, height as usize);

        if width > 0 && height > 0 {
            let needed = (skip_y + height - 1) * stride + (skip_x + width) * bpp;
            if src.len() < needed {
                return fault(
                    GlError::InvalidOperation,
                    format!("client buffer holds {} bytes, {} are read", src.len(), needed),
                );
            }
        }

        let mut texels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let at = (skip_y + y) * stride + (skip_x + x) * bpp;
                texels.push(to_rgba(format, &src[at..at + bpp]));
            }
        }
        Ok(texels)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    ) -> Outcome {
        if internal_format != consts::RGBA8 as i32 {
            return fault(GlError::InvalidEnum, "only RGBA8 storage is modeled");
        }
        let format = Self::pixel_transfer(level, format, ty)?;
        if width < 0 || height < 0 || border != 0 {
            return fault(
                GlError::InvalidValue,
                format!("size {}x{}, border {}", width, height, border),
            );
        }
        if width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
            return fault(
                GlError::InvalidValue,
                format!("size {}x{} above the maximum of {}", width, height, MAX_TEXTURE_SIZE),
            );
        }
        let texels = match pixels {
            Some(src) => Some(self.read_client(format, width, height, src)?),
            None => None,
        };

        let tex = self.bound_texture_mut(target)?;
        tex.width = width;
        tex.height = height;
        tex.pixels = match texels {
            Some(texels) => texels.concat(),
            None => vec![0; width as usize * height as usize * 4],
        };
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tex_sub_image_2d(
        &mut self,
        target: u32,
        level: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    ) -> Outcome {
        let format = Self::pixel_transfer(level, format, ty)?;
        if width < 0 || height < 0 {
            return fault(GlError::InvalidValue, format!("size {}x{}", width, height));
        }
        let texels = self.read_client(format, width, height, pixels)?;

        let tex = self.bound_texture_mut(target)?;
        let (x_end, y_end) = (i64::from(x) + i64::from(width), i64::from(y) + i64::from(height));
        if x < 0 || y < 0 || x_end > i64::from(tex.width) || y_end > i64::from(tex.height) {
            return fault(
                GlError::InvalidValue,
                format!(
                    "region {}x{} at ({}, {}) outside {}x{} storage",
                    width, height, x, y, tex.width, tex.height
                ),
            );
        }
        for row in 0..height {
            for col in 0..width {
                tex.set_texel(x + col, y + row, texels[(row * width + col) as usize]);
            }
        }
        Ok(())
    }

    pub fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32) -> Outcome {
        let value = value as u32;
        let valid = match parameter {
            consts::TEXTURE_WRAP_S | consts::TEXTURE_WRAP_T => {
                value == consts::REPEAT || value == consts::CLAMP_TO_EDGE
            }
            consts::TEXTURE_MIN_FILTER | consts::TEXTURE_MAG_FILTER => {
                value == consts::NEAREST || value == consts::LINEAR
            }
            _ => return fault(GlError::InvalidEnum, format!("texture parameter {:#x}", parameter)),
        };
        if !valid {
            return fault(GlError::InvalidEnum, format!("parameter value {:#x}", value));
        }

        let params = &mut self.bound_texture_mut(target)?.params;
        match parameter {
            consts::TEXTURE_WRAP_S => params.wrap_s = value,
            consts::TEXTURE_WRAP_T => params.wrap_t = value,
            consts::TEXTURE_MIN_FILTER => params.min_filter = value,
            _ => params.mag_filter = value,
        }
        Ok(())
    }

    pub fn pixel_store_i32(&mut self, parameter: u32, value: i32) -> Outcome {
        let slot = match parameter {
            consts::UNPACK_ROW_LENGTH => &mut self.unpack.row_length,
            consts::UNPACK_SKIP_PIXELS => &mut self.unpack.skip_pixels,
            consts::UNPACK_SKIP_ROWS => &mut self.unpack.skip_rows,
            _ => return fault(GlError::InvalidEnum, format!("pixel store parameter {:#x}", parameter)),
        };
        if value < 0 {
            return fault(GlError::InvalidValue, format!("negative pixel store value {}", value));
        }
        *slot = value;
        Ok(())
    }

    // Framebuffers

    pub fn create_framebuffer(&mut self) -> u32 {
        let name = self.next_name();
        self.framebuffers.insert(name, FramebufferObject::default());
        name
    }

    pub fn delete_framebuffer(&mut self, name: u32) {
        if name == 0 {
            return;
        }
        let existed = self.framebuffers.remove(&name).is_some();
        self.retire(existed, name, "framebuffer");
        if existed {
            if self.draw_framebuffer == name {
                self.draw_framebuffer = 0;
            }
            if self.read_framebuffer == name {
                self.read_framebuffer = 0;
            }
        }
    }

    pub fn bind_framebuffer(&mut self, target: u32, name: u32) -> Outcome {
        let (draw, read) = match target {
            consts::DRAW_FRAMEBUFFER => (true, false),
            consts::READ_FRAMEBUFFER => (false, true),
            consts::FRAMEBUFFER => (true, true),
            _ => return fault(GlError::InvalidEnum, format!("framebuffer target {:#x}", target)),
        };
        self.check_name(self.framebuffers.contains_key(&name), name, "framebuffer")?;
        if draw {
            self.draw_framebuffer = name;
        }
        if read {
            self.read_framebuffer = name;
        }
        Ok(())
    }

    pub fn framebuffer_texture_2d(
        &mut self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: u32,
        level: i32,
    ) -> Outcome {
        let bound = match target {
            consts::DRAW_FRAMEBUFFER | consts::FRAMEBUFFER => self.draw_framebuffer,
            consts::READ_FRAMEBUFFER => self.read_framebuffer,
            _ => return fault(GlError::InvalidEnum, format!("framebuffer target {:#x}", target)),
        };
        let index = attachment.wrapping_sub(consts::COLOR_ATTACHMENT0);
        if index >= MAX_COLOR_ATTACHMENTS {
            return fault(GlError::InvalidEnum, format!("attachment {:#x}", attachment));
        }
        if texture != 0 && texture_target != consts::TEXTURE_2D {
            return fault(GlError::InvalidEnum, format!("texture target {:#x}", texture_target));
        }
        if level != 0 {
            return fault(GlError::InvalidValue, "only the base level is modeled");
        }
        if bound == 0 {
            return fault(GlError::InvalidOperation, "the default framebuffer has no attachments");
        }
        self.check_name(self.textures.contains_key(&texture), texture, "texture")?;

        if let Some(fb) = self.framebuffers.get_mut(&bound) {
            if texture == 0 {
                fb.colors.remove(&index);
            } else {
                fb.colors.insert(index, texture);
            }
        }
        Ok(())
    }

    /// Texture behind color attachment 0 of `framebuffer` if it is complete
    fn color_target(&self, framebuffer: u32) -> Option<u32> {
        let tex = *self.framebuffers.get(&framebuffer)?.colors.get(&0)?;
        if self.textures.get(&tex)?.has_storage() {
            Some(tex)
        } else {
            None
        }
    }

    pub fn blit_framebuffer(&mut self, src: [i32; 4], dst: [i32; 4], mask: u32, filter: u32) -> Outcome {
        // linear filtering is treated like nearest, there is nothing to average over in tests
        if BlitMode::from_gl(filter).is_none() {
            return fault(GlError::InvalidEnum, format!("blit filter {:#x}", filter));
        }
        if mask & !consts::COLOR_BUFFER_BIT != 0 {
            return fault(GlError::InvalidValue, "only color blits are modeled");
        }
        let (read, draw) = match (
            self.color_target(self.read_framebuffer),
            self.color_target(self.draw_framebuffer),
        ) {
            (Some(read), Some(draw)) => (read, draw),
            _ => {
                return fault(
                    GlError::InvalidFramebufferOperation,
                    "read or draw framebuffer is incomplete",
                )
            }
        };
        if mask == 0 {
            return Ok(());
        }

        // read and draw may be the same texture
        let source = self.textures[&read].clone();
        let target = match self.textures.get_mut(&draw) {
            Some(target) => target,
            None => return Ok(()),
        };

        let [sx0, sy0, sx1, sy1] = src.map(f64::from);
        let [dx0, dy0, dx1, dy1] = dst.map(f64::from);
        let scale_x = (sx1 - sx0) / (dx1 - dx0);
        let scale_y = (sy1 - sy0) / (dy1 - dy0);
        // only destination texels inside the target storage are visited
        let rows = dst[1].min(dst[3]).max(0)..dst[1].max(dst[3]).min(target.height);
        let cols = dst[0].min(dst[2]).max(0)..dst[0].max(dst[2]).min(target.width);
        for dy in rows {
            let sy = (sy0 + (f64::from(dy) + 0.5 - dy0) * scale_y).floor();
            if !(sy >= 0.0 && sy < f64::from(source.height)) {
                continue;
            }
            for dx in cols.clone() {
                let sx = (sx0 + (f64::from(dx) + 0.5 - dx0) * scale_x).floor();
                if !(sx >= 0.0 && sx < f64::from(source.width)) {
                    continue;
                }
                let (sx, sy) = (sx as i32, sy as i32);
                target.set_texel(dx, dy, source.texel(sx, sy));
            }
        }
        Ok(())
    }

    pub fn clear(&mut self, mask: u32) -> Outcome {
        let known = consts::COLOR_BUFFER_BIT | consts::DEPTH_BUFFER_BIT | consts::STENCIL_BUFFER_BIT;
        if mask & !known != 0 {
            return fault(GlError::InvalidValue, format!("clear mask {:#x}", mask));
        }
        if mask & consts::COLOR_BUFFER_BIT == 0 {
            return Ok(());
        }
        let tex = self
            .framebuffers
            .get(&self.draw_framebuffer)
            .and_then(|fb| fb.colors.get(&0))
            .copied();
        if let Some(tex) = tex.and_then(|tex| self.textures.get_mut(&tex)) {
            tex.pixels.iter_mut().for_each(|b| *b = 0);
        }
        Ok(())
    }

    // Vertex arrays

    pub fn create_vertex_array(&mut self) -> u32 {
        let name = self.next_name();
        self.vertex_arrays.insert(name);
        name
    }

    pub fn delete_vertex_array(&mut self, name: u32) {
        if name == 0 {
            return;
        }
        let existed = self.vertex_arrays.remove(&name);
        self.retire(existed, name, "vertex array");
        if self.vertex_array == name {
            self.vertex_array = 0;
        }
    }

    pub fn bind_vertex_array(&mut self, name: u32) -> Outcome {
        self.check_name(self.vertex_arrays.contains(&name), name, "vertex array")?;
        self.vertex_array = name;
        Ok(())
    }

    // Buffers

    pub fn create_buffer(&mut self) -> u32 {
        let name = self.next_name();
        self.buffers.insert(name, BufferObject::default());
        name
    }

    pub fn delete_buffer(&mut self, name: u32) {
        if name == 0 {
            return;
        }
        let existed = self.buffers.remove(&name).is_some();
        self.retire(existed, name, "buffer");
        if self.array_buffer == name {
            self.array_buffer = 0;
        }
        if self.element_array_buffer == name {
            self.element_array_buffer = 0;
        }
    }

    pub fn buffer_binding(&self, target: u32) -> Result<u32, Fault> {
        match target {
            consts::ARRAY_BUFFER => Ok(self.array_buffer),
            consts::ELEMENT_ARRAY_BUFFER => Ok(self.element_array_buffer),
            _ => fault(GlError::InvalidEnum, format!("buffer target {:#x}", target)),
        }
    }

    pub fn bind_buffer(&mut self, target: u32, name: u32) -> Outcome {
        self.buffer_binding(target)?;
        self.check_name(self.buffers.contains_key(&name), name, "buffer")?;
        match target {
            consts::ARRAY_BUFFER => self.array_buffer = name,
            _ => self.element_array_buffer = name,
        }
        Ok(())
    }

    fn bound_buffer_mut(&mut self, target: u32) -> Result<&mut BufferObject, Fault> {
        let name = self.buffer_binding(target)?;
        match self.buffers.get_mut(&name) {
            Some(buffer) if name != 0 => Ok(buffer),
            _ => fault(GlError::InvalidOperation, "no buffer bound"),
        }
    }

    pub fn buffer_data(&mut self, target: u32, data: BufferSource<'_>, usage: u32) -> Outcome {
        if Usage::from_gl(usage).is_none() {
            return fault(GlError::InvalidEnum, format!("buffer usage {:#x}", usage));
        }
        let data = match data {
            BufferSource::Size(size) if size < 0 => {
                return fault(GlError::InvalidValue, format!("negative buffer size {}", size))
            }
            BufferSource::Size(size) => vec![0; size as usize],
            BufferSource::Slice(data) => data.to_vec(),
        };
        let buffer = self.bound_buffer_mut(target)?;
        buffer.data = data;
        buffer.usage = usage;
        Ok(())
    }

    pub fn buffer_sub_data(&mut self, target: u32, offset: i32, data: &[u8]) -> Outcome {
        let buffer = self.bound_buffer_mut(target)?;
        let end = offset as i64 + data.len() as i64;
        if offset < 0 || end > buffer.data.len() as i64 {
            return fault(
                GlError::InvalidValue,
                format!(
                    "update of {} bytes at {} outside {} byte store",
                    data.len(),
                    offset,
                    buffer.data.len()
                ),
            );
        }
        buffer.data[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }
}

/// The two ways of specifying a buffer store
pub(super) enum BufferSource<'a> {
    Size(i32),
    Slice(&'a [u8]),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound_texture(state: &mut State) -> u32 {
        let tex = state.create_texture();
        state.bind_texture(consts::TEXTURE_2D, tex).unwrap();
        tex
    }

    fn alloc(state: &mut State, width: i32, height: i32) -> Outcome {
        state.tex_image_2d(
            consts::TEXTURE_2D,
            0,
            consts::RGBA8 as i32,
            width,
            height,
            0,
            consts::RGBA,
            consts::UNSIGNED_BYTE,
            None,
        )
    }

    #[test]
    fn oversized_storage_is_refused() {
        let mut state = State::default();
        let tex = bound_texture(&mut state);

        let err = alloc(&mut state, 30000, 30000).unwrap_err();
        assert_eq!(err.error, GlError::InvalidValue);
        let err = alloc(&mut state, 1, MAX_TEXTURE_SIZE + 1).unwrap_err();
        assert_eq!(err.error, GlError::InvalidValue);
        assert_eq!(state.textures[&tex].width, 0);

        alloc(&mut state, MAX_TEXTURE_SIZE, 1).unwrap();
        assert_eq!(state.textures[&tex].pixels.len(), MAX_TEXTURE_SIZE as usize * 4);
    }

    #[test]
    fn sub_image_far_outside_storage_is_refused() {
        let mut state = State::default();
        bound_texture(&mut state);
        alloc(&mut state, 4, 4).unwrap();

        for &(x, y) in &[(i32::MAX, 0), (0, i32::MAX), (i32::MAX, i32::MAX)] {
            let err = state
                .tex_sub_image_2d(
                    consts::TEXTURE_2D,
                    0,
                    x,
                    y,
                    1,
                    1,
                    consts::RGBA,
                    consts::UNSIGNED_BYTE,
                    &[0; 4],
                )
                .unwrap_err();
            assert_eq!(err.error, GlError::InvalidValue);
        }
    }

    #[test]
    fn only_live_names_are_retired() {
        let mut state = State::default();
        state.delete_buffer(3);
        state.delete_texture(3);
        assert!(state.deleted.is_empty());

        let names: Vec<u32> = (0..3).map(|_| state.create_buffer()).collect();
        assert_eq!(names, vec![1, 2, 3]);
        state.delete_buffer(3);
        assert!(state.deleted.contains(&3));
        assert_eq!(state.deleted.len(), 1);

        // a texture delete with a buffer's name is unknown for textures
        state.delete_texture(2);
        assert!(!state.deleted.contains(&2));
        assert!(state.buffers.contains_key(&2));
    }

    #[test]
    fn blit_with_wrapped_coordinates_stays_in_bounds() {
        let mut state = State::default();
        let tex = bound_texture(&mut state);
        alloc(&mut state, 4, 4).unwrap();
        let fbo = state.create_framebuffer();
        state.bind_framebuffer(consts::FRAMEBUFFER, fbo).unwrap();
        state
            .framebuffer_texture_2d(consts::FRAMEBUFFER, consts::COLOR_ATTACHMENT0, consts::TEXTURE_2D, tex, 0)
            .unwrap();

        let huge = [i32::MIN, i32::MIN, i32::MAX, i32::MAX];
        state
            .blit_framebuffer(huge, [0, 0, 4, 4], consts::COLOR_BUFFER_BIT, consts::NEAREST)
            .unwrap();
        state
            .blit_framebuffer([0, 0, 4, 4], huge, consts::COLOR_BUFFER_BIT, consts::LINEAR)
            .unwrap();
        assert_eq!(state.textures[&tex].pixels.len(), 4 * 4 * 4);
    }
}
