pub mod consts;
#[cfg(all(feature = "glow", not(target_arch = "wasm32")))]
pub mod glow_context;

/// The native function table this layer is written against.
///
/// Object names are passed as raw `u32`s, zero meaning "none", exactly like the
/// native API does; the typed wrappers live in [`crate::handle`]. An implementation
/// is expected to be loaded and current before any call is made. All calls are
/// plain forwards: nothing is validated and errors are only observable through
/// [`GlContext::get_error`].
///
/// Native contexts are bound to a single thread, so there is no `Send`/`Sync` bound.
pub trait GlContext {
    // Textures

    /// Returns 0 if the driver failed to allocate a name
    fn create_texture(&self) -> u32;
    fn delete_texture(&self, texture: u32);
    fn bind_texture(&self, target: u32, texture: u32);

    /// (Re)allocate the storage of the texture bound to `target`, `None` leaves it uninitialized
    ///
    /// # Safety
    /// When `pixels` is given, it must hold at least as many bytes as the driver reads for
    /// the given size and format under the current pixel unpack state
    #[allow(clippy::too_many_arguments)]
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
    );

    /// # Safety
    /// Same as [`GlContext::tex_image_2d`]
    #[allow(clippy::too_many_arguments)]
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
    );

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32);
    fn pixel_store_i32(&self, parameter: u32, value: i32);

    // Framebuffers

    fn create_framebuffer(&self) -> u32;
    fn delete_framebuffer(&self, framebuffer: u32);
    fn bind_framebuffer(&self, target: u32, framebuffer: u32);
    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: u32,
        level: i32,
    );
    #[allow(clippy::too_many_arguments)]
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
    );
    fn clear(&self, mask: u32);

    // Vertex arrays

    fn create_vertex_array(&self) -> u32;
    fn delete_vertex_array(&self, vertex_array: u32);
    fn bind_vertex_array(&self, vertex_array: u32);

    // Buffers

    fn create_buffer(&self) -> u32;
    fn delete_buffer(&self, buffer: u32);
    fn bind_buffer(&self, target: u32, buffer: u32);
    /// Allocate `size` bytes of undefined content (the null data pointer case)
    fn buffer_data_size(&self, target: u32, size: i32, usage: u32);
    /// Replace the whole store with a copy of `data`
    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32);
    fn buffer_sub_data_u8_slice(&self, target: u32, offset: i32, data: &[u8]);

    // Diagnostics

    /// Pops the oldest recorded error, `consts::NO_ERROR` when there is none
    fn get_error(&self) -> u32;
}
