use crate::context::GlContext;
use crate::handle::{FramebufferId, TextureId};
use crate::resource::framebuffer::{self, Mode};
use crate::resource::texture;
use log::debug;

/// A framebuffer paired with a 2D texture as its color target.
///
/// Building one is a sequence of explicit steps, in this order:
/// [`TexFbo::init`], [`TexFbo::alloc_empty`], [`TexFbo::link_fbo`]. After that it can
/// be rendered into and sampled from as often as needed, [`TexFbo::fini`] releases both
/// objects. Nothing happens on drop, see [`crate::scoped::OwnedTexFbo`] for that.
///
/// Each step rebinds the texture or the draw framebuffer and leaves it bound.
///
/// The pair itself can not be used after finalizing:
///
/// ```compile_fail
/// use render::headless::HeadlessGl;
/// use render::resource::tex_fbo::TexFbo;
///
/// let gl = HeadlessGl::new();
/// let mut target = TexFbo::default();
/// target.init(&gl);
/// target.fini(&gl);
/// target.link_fbo(&gl);
/// ```
#[derive(Debug, Default)]
pub struct TexFbo {
    pub tex: TextureId,
    pub fbo: FramebufferId,
    /// Only meaningful after [`TexFbo::alloc_empty`]
    pub width: i32,
    pub height: i32,
}

/// Two pairs are the same if they name the same objects, the size does not matter
impl PartialEq for TexFbo {
    fn eq(&self, other: &Self) -> bool {
        self.tex == other.tex && self.fbo == other.fbo
    }
}

impl Eq for TexFbo {}

impl TexFbo {
    /// Generate both objects, the texture gets clamping and nearest filtering
    pub fn init<G: GlContext + ?Sized>(&mut self, gl: &G) {
        self.tex = texture::gen(gl);
        self.fbo = framebuffer::gen(gl);
        texture::bind(gl, self.tex);
        texture::set_repeat(gl, false);
        texture::set_smooth(gl, false);
        debug!("initialized {:?} / {:?}", self.tex, self.fbo);
    }

    /// (Re)allocate the texture storage, the last call decides the recorded size
    pub fn alloc_empty<G: GlContext + ?Sized>(&mut self, gl: &G, width: i32, height: i32) {
        texture::bind(gl, self.tex);
        texture::alloc_empty(gl, width, height);
        self.width = width;
        self.height = height;
    }

    /// Make the texture the color target of the framebuffer (left bound for drawing)
    pub fn link_fbo<G: GlContext + ?Sized>(&self, gl: &G) {
        framebuffer::bind(gl, self.fbo, Mode::Draw);
        framebuffer::set_target(gl, self.tex);
    }

    /// Delete both objects. Consumes the pair, copies of its handles are dangling afterwards.
    pub fn fini<G: GlContext + ?Sized>(self, gl: &G) {
        debug!("finalizing {:?} / {:?}", self.tex, self.fbo);
        framebuffer::del(gl, self.fbo);
        texture::del(gl, self.tex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::consts;
    use crate::headless::HeadlessGl;
    use crate::resource::framebuffer::BlitMode;

    fn ready(gl: &HeadlessGl, w: i32, h: i32) -> TexFbo {
        let mut target = TexFbo::default();
        target.init(gl);
        target.alloc_empty(gl, w, h);
        target.link_fbo(gl);
        target
    }

    #[test]
    fn starts_empty() {
        let target = TexFbo::default();
        assert!(target.tex.is_null());
        assert!(target.fbo.is_null());
        assert_eq!((target.width, target.height), (0, 0));
    }

    #[test]
    fn init_sets_sampler_state() {
        let gl = HeadlessGl::new();
        let mut target = TexFbo::default();
        target.init(&gl);

        assert!(!target.tex.is_null());
        assert!(!target.fbo.is_null());
        assert_eq!(gl.bound_texture(), target.tex);
        let params = gl.texture_params(target.tex).unwrap();
        assert_eq!(params.wrap_s, consts::CLAMP_TO_EDGE);
        assert_eq!(params.wrap_t, consts::CLAMP_TO_EDGE);
        assert_eq!(params.min_filter, consts::NEAREST);
        assert_eq!(params.mag_filter, consts::NEAREST);
        // not linked yet
        assert_eq!(gl.color_attachment(target.fbo, 0), None);
        assert_eq!((target.width, target.height), (0, 0));
    }

    #[test]
    fn alloc_records_size() {
        let gl = HeadlessGl::new();
        let mut target = TexFbo::default();
        target.init(&gl);
        target.alloc_empty(&gl, 320, 240);

        assert_eq!((target.width, target.height), (320, 240));
        assert_eq!(gl.texture_size(target.tex), Some((320, 240)));
    }

    #[test]
    fn alloc_last_write_wins() {
        let gl = HeadlessGl::new();
        let mut target = TexFbo::default();
        target.init(&gl);
        target.alloc_empty(&gl, 64, 64);
        target.alloc_empty(&gl, 8, 16);

        assert_eq!((target.width, target.height), (8, 16));
        assert_eq!(gl.texture_size(target.tex), Some((8, 16)));
    }

    #[test]
    fn oversized_alloc_is_a_driver_error() {
        let gl = HeadlessGl::new();
        let mut target = TexFbo::default();
        target.init(&gl);
        target.alloc_empty(&gl, 30000, 30000);

        assert_eq!(gl.get_error(), consts::INVALID_VALUE);
        assert_eq!(gl.texture_size(target.tex), Some((0, 0)));
        // the pair only records what it asked for
        assert_eq!((target.width, target.height), (30000, 30000));
    }

    #[test]
    fn link_attaches_texture() {
        let gl = HeadlessGl::new();
        let target = ready(&gl, 4, 4);
        assert_eq!(gl.bound_framebuffer(Mode::Draw), target.fbo);
        assert_eq!(gl.color_attachment(target.fbo, 0), Some(target.tex));
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn equality_ignores_size() {
        let a = TexFbo {
            tex: TextureId::new(1),
            fbo: FramebufferId::new(2),
            width: 10,
            height: 10,
        };
        let b = TexFbo {
            tex: TextureId::new(1),
            fbo: FramebufferId::new(2),
            width: 20,
            height: 0,
        };
        let c = TexFbo {
            tex: TextureId::new(1),
            fbo: FramebufferId::new(3),
            width: 10,
            height: 10,
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn render_then_copy_between_targets() {
        let gl = HeadlessGl::new();
        let a = ready(&gl, 2, 2);
        texture::bind(&gl, a.tex);
        let red = [255u8, 0, 0, 255].repeat(4);
        unsafe { texture::upload_image(&gl, 2, 2, &red, texture::PixelFormat::Rgba) };

        let b = ready(&gl, 2, 2);
        framebuffer::bind(&gl, a.fbo, Mode::Read);
        framebuffer::bind(&gl, b.fbo, Mode::Draw);
        framebuffer::blit_same_size(&gl, 0, 0, 0, 0, a.width, a.height, BlitMode::Nearest);

        assert_eq!(gl.texture_pixels(b.tex), Some(red));
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn full_lifecycle() {
        let gl = HeadlessGl::new();
        let mut target = TexFbo::default();
        target.init(&gl);
        target.alloc_empty(&gl, 256, 128);
        target.link_fbo(&gl);
        assert_eq!(target.width, 256);
        assert_eq!(target.height, 128);

        let (tex, fbo) = (target.tex, target.fbo);
        target.fini(&gl);

        assert!(!gl.is_texture(tex.raw()));
        assert!(!gl.is_framebuffer(fbo.raw()));
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(gl.bound_framebuffer(Mode::Draw), FramebufferId::NULL);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }
}
