//! SDL2 window that presents the framebuffer and translates input.

use sdl2::event::{Event as SdlEvent, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::{MouseButton as SdlMouseButton, MouseUtil};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use tracing::debug;

use crate::events::{Event, Key, MouseButton};

type TextureCreator = sdl2::render::TextureCreator<sdl2::video::WindowContext>;

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Field order matters: the texture borrows from the creator and must
    // be dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<TextureCreator>,
    event_pump: sdl2::EventPump,
    mouse: MouseUtil,
    relative_mouse: bool,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let texture = Self::create_texture(&texture_creator, width, height)?;
        let event_pump = sdl_context.event_pump()?;
        let mouse = sdl_context.mouse();

        debug!(title, width, height, "window created");
        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            mouse,
            relative_mouse: false,
            width,
            height,
        })
    }

    fn create_texture(
        texture_creator: &TextureCreator,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: the creator is boxed, so its address is stable, and the
        // window drops the texture before the creator (field order).
        let texture_creator: &'static TextureCreator = unsafe { &*(texture_creator as *const _) };
        texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drains pending SDL events. Key auto-repeat and unmapped events are
    /// dropped.
    pub fn poll_events(&mut self) -> Vec<Event> {
        self.event_pump.poll_iter().filter_map(translate).collect()
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        Ok(())
    }

    /// Hides and captures the cursor while enabled; only touches SDL when
    /// the mode changes.
    pub fn set_relative_mouse_mode(&mut self, enabled: bool) {
        if self.relative_mouse != enabled {
            self.mouse.set_relative_mouse_mode(enabled);
            self.relative_mouse = enabled;
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn translate(event: SdlEvent) -> Option<Event> {
    match event {
        SdlEvent::Quit { .. } => Some(Event::Quit),
        SdlEvent::KeyDown {
            keycode: Some(keycode),
            repeat: false,
            ..
        } => Some(Event::Keyboard {
            key: translate_key(keycode),
            pressed: true,
        }),
        SdlEvent::KeyUp {
            keycode: Some(keycode),
            ..
        } => Some(Event::Keyboard {
            key: translate_key(keycode),
            pressed: false,
        }),
        SdlEvent::MouseButtonDown {
            mouse_btn, x, y, ..
        } => translate_button(mouse_btn).map(|button| Event::MouseButton {
            button,
            pressed: true,
            x,
            y,
        }),
        SdlEvent::MouseButtonUp {
            mouse_btn, x, y, ..
        } => translate_button(mouse_btn).map(|button| Event::MouseButton {
            button,
            pressed: false,
            x,
            y,
        }),
        SdlEvent::MouseMotion {
            x, y, xrel, yrel, ..
        } => Some(Event::MouseMotion {
            x,
            y,
            rel_x: xrel,
            rel_y: yrel,
        }),
        SdlEvent::Window {
            win_event: WindowEvent::Resized(w, h),
            ..
        } => Some(Event::Resize {
            width: w.max(0) as u32,
            height: h.max(0) as u32,
        }),
        _ => None,
    }
}

fn translate_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::W => Key::W,
        Keycode::A => Key::A,
        Keycode::S => Key::S,
        Keycode::D => Key::D,
        Keycode::Q => Key::Q,
        Keycode::E => Key::E,
        Keycode::Escape => Key::Escape,
        Keycode::F12 => Key::F12,
        _ => Key::Other,
    }
}

fn translate_button(button: SdlMouseButton) -> Option<MouseButton> {
    match button {
        SdlMouseButton::Left => Some(MouseButton::Left),
        SdlMouseButton::Middle => Some(MouseButton::Middle),
        SdlMouseButton::Right => Some(MouseButton::Right),
        SdlMouseButton::X1 => Some(MouseButton::X1),
        SdlMouseButton::X2 => Some(MouseButton::X2),
        SdlMouseButton::Unknown => None,
    }
}
