//! Buffer objects
//!
//! Vertex and index buffers share every operation and only differ in the native bind
//! target, so both are instances of [`GenericBo`]. Their handles stay distinct types.
//! Everything but `gen`/`del` acts on the buffer currently bound to that target.

use crate::compat::ToGl;
use crate::context::{consts, GlContext};
use crate::handle::{Category, Handle};
use crate::resource::Resource;
use bytemuck::Pod;
use log::trace;
use std::marker::PhantomData;

/// Tag for a buffer bind target
pub trait BufferTarget: Category {
    const TARGET: u32;
}

/// Vertex data, bound to `ARRAY_BUFFER`
#[derive(Debug)]
pub enum ArrayBuffer {}

/// Index data, bound to `ELEMENT_ARRAY_BUFFER`
#[derive(Debug)]
pub enum ElementArrayBuffer {}

impl Category for ArrayBuffer {
    const NAME: &'static str = "VboId";
}

impl Category for ElementArrayBuffer {
    const NAME: &'static str = "IboId";
}

impl BufferTarget for ArrayBuffer {
    const TARGET: u32 = consts::ARRAY_BUFFER;
}

impl BufferTarget for ElementArrayBuffer {
    const TARGET: u32 = consts::ELEMENT_ARRAY_BUFFER;
}

/// How often the store is expected to be rewritten, a hint for the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Usage {
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

impl Default for Usage {
    fn default() -> Self {
        Usage::StaticDraw
    }
}

/// Operations on buffers bound to `T::TARGET`, never constructed
pub struct GenericBo<T: BufferTarget>(PhantomData<fn() -> T>);

/// Vertex buffer objects
pub type Vbo = GenericBo<ArrayBuffer>;
/// Index buffer objects
pub type Ibo = GenericBo<ElementArrayBuffer>;

impl<T: BufferTarget> GenericBo<T> {
    pub fn gen<G: GlContext + ?Sized>(gl: &G) -> Handle<T> {
        let id = Handle::new(gl.create_buffer());
        trace!("generated {:?}", id);
        id
    }

    /// The name must not be used afterwards
    pub fn del<G: GlContext + ?Sized>(gl: &G, id: Handle<T>) {
        trace!("deleting {:?}", id);
        gl.delete_buffer(id.raw());
    }

    pub fn bind<G: GlContext + ?Sized>(gl: &G, id: Handle<T>) {
        gl.bind_buffer(T::TARGET, id.raw());
    }

    pub fn unbind<G: GlContext + ?Sized>(gl: &G) {
        Self::bind(gl, Handle::NULL);
    }

    /// Replace the whole store of the bound buffer with a copy of `data`.
    ///
    /// An empty slice gives a zero sized store, which is not the same call as
    /// [`GenericBo::alloc_empty`].
    pub fn upload_data<G: GlContext + ?Sized>(gl: &G, data: &[u8], usage: Usage) {
        gl.buffer_data_u8_slice(T::TARGET, data, usage.to_gl());
    }

    /// Overwrite part of the existing store, starting `offset` bytes in
    pub fn upload_sub_data<G: GlContext + ?Sized>(gl: &G, offset: i32, data: &[u8]) {
        gl.buffer_sub_data_u8_slice(T::TARGET, offset, data);
    }

    /// Allocate `size` bytes of undefined content for the bound buffer
    pub fn alloc_empty<G: GlContext + ?Sized>(gl: &G, size: i32, usage: Usage) {
        gl.buffer_data_size(T::TARGET, size, usage.to_gl());
    }

    /// [`GenericBo::upload_data`] for plain old data, e.g. a vertex slice
    pub fn upload_pod<G: GlContext + ?Sized, P: Pod>(gl: &G, data: &[P], usage: Usage) {
        Self::upload_data(gl, bytemuck::cast_slice(data), usage);
    }

    /// [`GenericBo::upload_sub_data`] for plain old data, `offset` is still in bytes
    pub fn upload_sub_pod<G: GlContext + ?Sized, P: Pod>(gl: &G, offset: i32, data: &[P]) {
        Self::upload_sub_data(gl, offset, bytemuck::cast_slice(data));
    }
}

macro_rules! impl_buffer_resource {
    ($target:ty) => {
        impl Resource for $target {
            fn create<G: GlContext + ?Sized>(gl: &G) -> Handle<Self> {
                GenericBo::<$target>::gen(gl)
            }

            fn destroy<G: GlContext + ?Sized>(gl: &G, id: Handle<Self>) {
                GenericBo::<$target>::del(gl, id)
            }
        }
    };
}

impl_buffer_resource!(ArrayBuffer);
impl_buffer_resource!(ElementArrayBuffer);
