//! Global pixel unpack state
//!
//! This state is shared by every following texture upload, so always [`reset`] once the
//! upload that needed it is done.

use crate::context::{consts, GlContext};

/// Set up the next `upload_sub_image` (or `upload_image`) call for a client buffer that is
/// part of a bigger image: rows are `image_width` pixels long and the uploaded region
/// starts at pixel (`sub_x`, `sub_y`) of it.
pub fn setup_sub_image<G: GlContext + ?Sized>(gl: &G, image_width: i32, sub_x: i32, sub_y: i32) {
    gl.pixel_store_i32(consts::UNPACK_ROW_LENGTH, image_width);
    gl.pixel_store_i32(consts::UNPACK_SKIP_PIXELS, sub_x);
    gl.pixel_store_i32(consts::UNPACK_SKIP_ROWS, sub_y);
}

/// Undo everything [`setup_sub_image`] set
pub fn reset<G: GlContext + ?Sized>(gl: &G) {
    setup_sub_image(gl, 0, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessGl, UnpackState};
    use crate::resource::texture::{self, PixelFormat};

    #[test]
    fn setup_sets_unpack_state() {
        let gl = HeadlessGl::new();
        setup_sub_image(&gl, 640, 12, 34);
        assert_eq!(
            gl.unpack_state(),
            UnpackState {
                row_length: 640,
                skip_pixels: 12,
                skip_rows: 34,
            }
        );
    }

    #[test]
    fn reset_restores_default() {
        let gl = HeadlessGl::new();
        let untouched = gl.unpack_state();

        setup_sub_image(&gl, 640, 12, 34);
        reset(&gl);
        let after_reset = gl.unpack_state();

        setup_sub_image(&gl, 0, 0, 0);
        assert_eq!(after_reset, gl.unpack_state());
        assert_eq!(after_reset, untouched);

        // and once more, resetting the default changes nothing
        reset(&gl);
        assert_eq!(gl.unpack_state(), untouched);
    }

    #[test]
    fn sub_image_upload_reads_from_bigger_image() {
        let gl = HeadlessGl::new();
        let tex = texture::gen(&gl);
        texture::bind(&gl, tex);
        texture::alloc_empty(&gl, 2, 2);

        // 4x3 client image, red channel holds the linear pixel index
        let image: Vec<u8> = (0..12u8).flat_map(|i| vec![i, 0, 0, 255]).collect();

        setup_sub_image(&gl, 4, 1, 1);
        unsafe { texture::upload_sub_image(&gl, 0, 0, 2, 2, &image, PixelFormat::Rgba) };
        reset(&gl);

        let reds: Vec<u8> = gl
            .texture_pixels(tex)
            .unwrap()
            .chunks(4)
            .map(|p| p[0])
            .collect();
        assert_eq!(reds, vec![5, 6, 9, 10]);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn negative_values_are_rejected() {
        let gl = HeadlessGl::new();
        setup_sub_image(&gl, -1, 0, 0);
        assert_eq!(gl.get_error(), consts::INVALID_VALUE);
        assert_eq!(gl.unpack_state(), UnpackState::default());
    }
}
