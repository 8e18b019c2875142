//! Vertex array objects, only a binding context here. Attribute setup belongs to the
//! code that owns the shaders.

use crate::context::GlContext;
use crate::handle::{VertexArray, VertexArrayId};
use crate::resource::Resource;
use log::trace;

pub fn gen<G: GlContext + ?Sized>(gl: &G) -> VertexArrayId {
    let id = VertexArrayId::new(gl.create_vertex_array());
    trace!("generated {:?}", id);
    id
}

pub fn del<G: GlContext + ?Sized>(gl: &G, id: VertexArrayId) {
    trace!("deleting {:?}", id);
    gl.delete_vertex_array(id.raw());
}

pub fn bind<G: GlContext + ?Sized>(gl: &G, id: VertexArrayId) {
    gl.bind_vertex_array(id.raw());
}

pub fn unbind<G: GlContext + ?Sized>(gl: &G) {
    bind(gl, VertexArrayId::NULL);
}

impl Resource for VertexArray {
    fn create<G: GlContext + ?Sized>(gl: &G) -> VertexArrayId {
        gen(gl)
    }

    fn destroy<G: GlContext + ?Sized>(gl: &G, id: VertexArrayId) {
        del(gl, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::consts;
    use crate::headless::HeadlessGl;

    #[test]
    fn bind_cycle() {
        let gl = HeadlessGl::new();
        let vao = gen(&gl);
        assert!(!vao.is_null());

        bind(&gl, vao);
        assert_eq!(gl.bound_vertex_array(), vao);
        unbind(&gl);
        assert_eq!(gl.bound_vertex_array(), VertexArrayId::NULL);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn binding_deleted_name_fails_in_the_driver() {
        let gl = HeadlessGl::new();
        let vao = gen(&gl);
        del(&gl, vao);
        bind(&gl, vao);
        assert_eq!(gl.get_error(), consts::INVALID_OPERATION);
        assert_eq!(gl.bound_vertex_array(), VertexArrayId::NULL);
    }

    #[test]
    fn names_are_not_reused_while_alive() {
        let gl = HeadlessGl::new();
        let names: Vec<_> = (0..16).map(|_| gen(&gl)).collect();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
