use std::marker::PhantomData;
use sdl2::sys::ttf;
use tracing::info;
use crate::error::{check, SdlResult};

/// Initialized SDL2_ttf. Fonts must be closed before this is dropped.
pub struct TtfContext {
    _not_send: PhantomData<*const ()>,
}

impl TtfContext {
    pub fn new() -> SdlResult<TtfContext> {
        check(unsafe { ttf::TTF_Init() }, "TTF_Init")?;

        info!("SDL_ttf initialized");

        Ok(TtfContext {
            _not_send: PhantomData,
        })
    }
}

impl Drop for TtfContext {
    fn drop(&mut self) {
        unsafe { ttf::TTF_Quit() }
    }
}
