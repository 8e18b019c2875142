//! Light type safety for native object names.
//!
//! Every native object is identified by a plain `u32`. [`Handle`] wraps that
//! name together with a zero sized category tag, so a texture name can never be
//! passed where a framebuffer name is expected:
//!
//! ```compile_fail
//! use render::handle::{FramebufferId, TextureId};
//! use render::headless::HeadlessGl;
//! use render::resource::framebuffer::{self, Mode};
//!
//! let gl = HeadlessGl::new();
//! let tex = TextureId::new(1);
//! framebuffer::bind(&gl, tex, Mode::Draw);
//! ```
//!
//! Handles of different categories can not even be compared:
//!
//! ```compile_fail
//! use render::handle::{FramebufferId, TextureId};
//!
//! let same = TextureId::new(1) == FramebufferId::new(1);
//! ```
//!
//! The same holds for the two buffer flavours, which share their implementation:
//!
//! ```compile_fail
//! use render::handle::IboId;
//! use render::headless::HeadlessGl;
//! use render::resource::buffer::Vbo;
//!
//! let gl = HeadlessGl::new();
//! Vbo::bind(&gl, IboId::new(1));
//! ```
//!
//! A handle does not own the object it names. Copies are free and destroying the
//! object is a separate, explicit call (see [`crate::scoped`] for owning guards).

use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use crate::resource::buffer::{ArrayBuffer, ElementArrayBuffer};

/// Tag for a family of native objects sharing one name space
pub trait Category: 'static {
    /// Used for debug output only
    const NAME: &'static str;
}

/// 2D texture objects
#[derive(Debug)]
pub enum Texture {}

/// Framebuffer objects
#[derive(Debug)]
pub enum Framebuffer {}

/// Vertex array objects
#[derive(Debug)]
pub enum VertexArray {}

impl Category for Texture {
    const NAME: &'static str = "TextureId";
}

impl Category for Framebuffer {
    const NAME: &'static str = "FramebufferId";
}

impl Category for VertexArray {
    const NAME: &'static str = "VertexArrayId";
}

/// A native object name tagged with its category.
///
/// Same layout as the raw `u32`, the zero name means "no object".
#[repr(transparent)]
pub struct Handle<C: Category> {
    raw: u32,
    // fn() -> C keeps the handle Send + Sync and covariant without owning a C
    _marker: PhantomData<fn() -> C>,
}

pub type TextureId = Handle<Texture>;
pub type FramebufferId = Handle<Framebuffer>;
pub type VertexArrayId = Handle<VertexArray>;
pub type VboId = Handle<ArrayBuffer>;
pub type IboId = Handle<ElementArrayBuffer>;

impl<C: Category> Handle<C> {
    /// The "no object" handle, binding it unbinds the target
    pub const NULL: Self = Self::new(0);

    pub const fn new(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    pub const fn raw(self) -> u32 {
        self.raw
    }

    pub const fn is_null(self) -> bool {
        self.raw == 0
    }
}

// region: manual trait implementations, derives would put bounds on C
impl<C: Category> Clone for Handle<C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<C: Category> Copy for Handle<C> {}
impl<C: Category> Default for Handle<C> {
    fn default() -> Self {
        Self::NULL
    }
}
impl<C: Category> PartialEq for Handle<C> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}
impl<C: Category> Eq for Handle<C> {}
impl<C: Category> Hash for Handle<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state)
    }
}
impl<C: Category> Debug for Handle<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", C::NAME, self.raw)
    }
}
// endregion

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::mem::{align_of, size_of};

    #[test]
    fn equality_follows_raw_name() {
        for a in 0..8u32 {
            for b in 0..8u32 {
                assert_eq!(TextureId::new(a) == TextureId::new(b), a == b);
                assert_eq!(VboId::new(a) == VboId::new(b), a == b);
            }
        }
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(TextureId::default(), TextureId::new(0));
        assert_eq!(FramebufferId::default(), FramebufferId::NULL);
        assert!(IboId::default().is_null());
        assert!(!VertexArrayId::new(3).is_null());
    }

    #[test]
    fn same_layout_as_raw_name() {
        assert_eq!(size_of::<TextureId>(), size_of::<u32>());
        assert_eq!(align_of::<IboId>(), align_of::<u32>());
        assert_eq!(size_of::<Option<u32>>(), size_of::<Option<FramebufferId>>());
    }

    #[test]
    fn hashing_uses_raw_name() {
        let set: HashSet<_> = vec![TextureId::new(1), TextureId::new(1), TextureId::new(2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn debug_names_the_category() {
        assert_eq!(format!("{:?}", TextureId::new(3)), "TextureId(3)");
        assert_eq!(format!("{:?}", IboId::new(7)), "IboId(7)");
        assert_eq!(format!("{:?}", VboId::NULL), "VboId(0)");
    }
}
