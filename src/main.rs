use anyhow::{bail, Context};
use bytemuck::{Pod, Zeroable};
use log::{info, warn};
use render::diagnostics::Checked;
use render::handle::{Framebuffer, Texture, VertexArray};
use render::headless::HeadlessGl;
use render::resource::buffer::{ArrayBuffer, ElementArrayBuffer, Ibo, Usage, Vbo};
use render::resource::framebuffer::{self, BlitMode, Mode};
use render::resource::texture::{self, PixelFormat};
use render::resource::{pixel_store, vertex_array};
use render::scoped::{Owned, OwnedTexFbo};
use std::rc::Rc;

mod logger;

type Gl = Checked<HeadlessGl>;

#[derive(Copy, Clone, Debug, Zeroable, Pod)]
#[repr(C)]
struct Vertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

const QUAD: [Vertex; 4] = [
    Vertex { pos: [-1.0, -1.0], uv: [0.0, 0.0] },
    Vertex { pos: [1.0, -1.0], uv: [1.0, 0.0] },
    Vertex { pos: [1.0, 1.0], uv: [1.0, 1.0] },
    Vertex { pos: [-1.0, 1.0], uv: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// An 8x8 RGBA atlas, each 4x4 quadrant in its own color
fn atlas() -> Vec<u8> {
    let mut pixels = Vec::with_capacity(8 * 8 * 4);
    for y in 0..8 {
        for x in 0..8 {
            let color = match (x < 4, y < 4) {
                (true, true) => [255, 0, 0, 255],
                (false, true) => [0, 255, 0, 255],
                (true, false) => [0, 0, 255, 255],
                (false, false) => [255, 255, 255, 255],
            };
            pixels.extend_from_slice(&color);
        }
    }
    pixels
}

/// Upload the top right quadrant of the atlas into a 4x4 texture
fn sprite_from_atlas(gl: &Rc<Gl>) -> Owned<Gl, Texture> {
    let sprite = Owned::<_, Texture>::new(gl.clone());
    texture::bind(&**gl, *sprite);
    texture::set_repeat(&**gl, false);
    texture::set_smooth(&**gl, false);
    texture::alloc_empty(&**gl, 4, 4);

    let atlas = atlas();
    pixel_store::setup_sub_image(&**gl, 8, 4, 4);
    // Safety: the atlas covers the whole 8 pixel wide image described above
    unsafe { texture::upload_sub_image(&**gl, 0, 0, 4, 4, &atlas, PixelFormat::Rgba) };
    pixel_store::reset(&**gl);

    info!("uploaded sprite {:?} from the atlas", *sprite);
    sprite
}

/// Render target round trip: copy the sprite into one target, scale it into a second one
fn render_targets(gl: &Rc<Gl>, sprite: &Owned<Gl, Texture>) -> anyhow::Result<()> {
    let small = OwnedTexFbo::new(gl.clone(), 4, 4);
    let mut large = OwnedTexFbo::new(gl.clone(), 4, 4);
    large.resize(16, 16);

    let source = Owned::<_, Framebuffer>::new(gl.clone());
    framebuffer::bind(&**gl, *source, Mode::Draw);
    framebuffer::set_target(&**gl, **sprite);

    framebuffer::bind(&**gl, *source, Mode::Read);
    framebuffer::bind(&**gl, small.fbo, Mode::Draw);
    framebuffer::blit_same_size(&**gl, 0, 0, 0, 0, 4, 4, BlitMode::Nearest);

    framebuffer::bind(&**gl, small.fbo, Mode::Read);
    framebuffer::bind(&**gl, large.fbo, Mode::Draw);
    framebuffer::blit(
        &**gl,
        0,
        0,
        small.width,
        small.height,
        0,
        0,
        large.width,
        large.height,
        BlitMode::Linear,
    );
    framebuffer::unbind(&**gl, Mode::Generic);

    let pixels = gl
        .inner()
        .texture_pixels(large.tex)
        .context("render target lost its texture")?;
    let white = pixels.chunks(4).filter(|p| *p == [255, 255, 255, 255]).count();
    info!(
        "scaled {}x{} into {}x{}, {} of {} texels white",
        small.width,
        small.height,
        large.width,
        large.height,
        white,
        pixels.len() / 4
    );
    if white != pixels.len() / 4 {
        bail!("scaled copy does not match the sprite");
    }
    Ok(())
}

fn geometry(gl: &Rc<Gl>) -> anyhow::Result<()> {
    let vao = Owned::<_, VertexArray>::new(gl.clone());
    let vbo = Owned::<_, ArrayBuffer>::new(gl.clone());
    let ibo = Owned::<_, ElementArrayBuffer>::new(gl.clone());

    vertex_array::bind(&**gl, *vao);
    Vbo::bind(&**gl, *vbo);
    Vbo::alloc_empty(
        &**gl,
        std::mem::size_of_val(&QUAD) as i32,
        Usage::DynamicDraw,
    );
    Vbo::upload_sub_pod(&**gl, 0, &QUAD);
    Ibo::bind(&**gl, *ibo);
    Ibo::upload_pod(&**gl, &QUAD_INDICES, Usage::StaticDraw);
    vertex_array::unbind(&**gl);

    let uploaded = gl
        .inner()
        .buffer_contents(vbo.raw())
        .context("vertex buffer vanished")?;
    if uploaded.as_slice() != bytemuck::cast_slice::<Vertex, u8>(&QUAD) {
        bail!("vertex data did not survive the upload");
    }
    info!(
        "quad uploaded: {} vertex bytes, {} index bytes",
        uploaded.len(),
        std::mem::size_of_val(&QUAD_INDICES)
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logger::init_logger()?;

    let gl = Rc::new(Checked::new(HeadlessGl::new()));

    let sprite = sprite_from_atlas(&gl);
    render_targets(&gl, &sprite)?;
    geometry(&gl)?;
    drop(sprite);

    let leaked = gl.inner().live_objects();
    if leaked != 0 {
        warn!("{} objects still alive at shutdown", leaked);
    }
    info!("{} native calls made", gl.inner().calls().len());

    if gl.failures() > 0 {
        bail!("{} driver errors reported", gl.failures());
    }
    Ok(())
}
