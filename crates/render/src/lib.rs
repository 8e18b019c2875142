//! Thin, typed handles over the native graphics API's object model.
//!
//! Every object kind (textures, framebuffers, vertex arrays, vertex and index buffers)
//! gets its own [`handle::Handle`] type, so names of different kinds can not be mixed
//! up, and a small set of free functions in [`resource`] that map one to one onto the
//! native calls. The functions are generic over [`context::GlContext`], the function
//! table they forward to.
//!
//! Most of the native API works on whatever object is bound to a target, and so does
//! this layer: bind first, then upload or configure.
//!
//! ```
//! use render::headless::HeadlessGl;
//! use render::resource::tex_fbo::TexFbo;
//!
//! let gl = HeadlessGl::new();
//! let mut target = TexFbo::default();
//! target.init(&gl);
//! target.alloc_empty(&gl, 256, 128);
//! target.link_fbo(&gl);
//! assert_eq!(gl.color_attachment(target.fbo, 0), Some(target.tex));
//! target.fini(&gl);
//! assert_eq!(gl.live_objects(), 0);
//! ```

pub mod compat;
pub mod context;
pub mod diagnostics;
pub mod handle;
pub mod headless;
pub mod resource;
pub mod scoped;

pub use context::GlContext;
pub use diagnostics::{Checked, GlError};
pub use handle::{FramebufferId, Handle, IboId, TextureId, VboId, VertexArrayId};
pub use headless::HeadlessGl;
pub use resource::tex_fbo::TexFbo;
pub use scoped::{Owned, OwnedTexFbo};
