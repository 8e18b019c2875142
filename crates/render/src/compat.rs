use crate::context::consts;
use crate::resource::buffer::Usage;
use crate::resource::framebuffer::{BlitMode, Mode};
use crate::resource::texture::PixelFormat;

/// Conversion from our typed enums into native enumeration values
pub trait ToGl {
    fn to_gl(self) -> u32;
}

impl ToGl for PixelFormat {
    fn to_gl(self) -> u32 {
        match self {
            PixelFormat::Rgba => consts::RGBA,
            PixelFormat::Bgra => consts::BGRA,
            PixelFormat::Rgb => consts::RGB,
            PixelFormat::Red => consts::RED,
        }
    }
}

impl ToGl for Mode {
    fn to_gl(self) -> u32 {
        match self {
            Mode::Draw => consts::DRAW_FRAMEBUFFER,
            Mode::Read => consts::READ_FRAMEBUFFER,
            Mode::Generic => consts::FRAMEBUFFER,
        }
    }
}

impl ToGl for BlitMode {
    fn to_gl(self) -> u32 {
        match self {
            BlitMode::Nearest => consts::NEAREST,
            BlitMode::Linear => consts::LINEAR,
        }
    }
}

impl ToGl for Usage {
    fn to_gl(self) -> u32 {
        match self {
            Usage::StaticDraw => consts::STATIC_DRAW,
            Usage::DynamicDraw => consts::DYNAMIC_DRAW,
            Usage::StreamDraw => consts::STREAM_DRAW,
        }
    }
}

/// The other direction, used by the headless driver to decode what it receives
pub trait FromGl: Sized {
    fn from_gl(value: u32) -> Option<Self>;
}

impl FromGl for PixelFormat {
    fn from_gl(value: u32) -> Option<Self> {
        match value {
            consts::RGBA => Some(PixelFormat::Rgba),
            consts::BGRA => Some(PixelFormat::Bgra),
            consts::RGB => Some(PixelFormat::Rgb),
            consts::RED => Some(PixelFormat::Red),
            _ => None,
        }
    }
}

impl FromGl for Mode {
    fn from_gl(value: u32) -> Option<Self> {
        match value {
            consts::DRAW_FRAMEBUFFER => Some(Mode::Draw),
            consts::READ_FRAMEBUFFER => Some(Mode::Read),
            consts::FRAMEBUFFER => Some(Mode::Generic),
            _ => None,
        }
    }
}

impl FromGl for BlitMode {
    fn from_gl(value: u32) -> Option<Self> {
        match value {
            consts::NEAREST => Some(BlitMode::Nearest),
            consts::LINEAR => Some(BlitMode::Linear),
            _ => None,
        }
    }
}

impl FromGl for Usage {
    fn from_gl(value: u32) -> Option<Self> {
        match value {
            consts::STATIC_DRAW => Some(Usage::StaticDraw),
            consts::DYNAMIC_DRAW => Some(Usage::DynamicDraw),
            consts::STREAM_DRAW => Some(Usage::StreamDraw),
            _ => None,
        }
    }
}
