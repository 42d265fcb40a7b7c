use std::ffi::c_int;
use std::marker::PhantomData;
use bitflags::bitflags;
use sdl2::sys::image;
use tracing::info;
use crate::error::{SdlError, SdlResult};

bitflags! {
    /// Image formats SDL2_image should load support for
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageFormats: u32 {
        const JPG = image::IMG_InitFlags_IMG_INIT_JPG;
        const PNG = image::IMG_InitFlags_IMG_INIT_PNG;
        const TIF = image::IMG_InitFlags_IMG_INIT_TIF;
        const WEBP = image::IMG_InitFlags_IMG_INIT_WEBP;
    }
}

/// Initialized SDL2_image. `IMG_Quit` runs on drop.
pub struct ImageContext {
    _not_send: PhantomData<*const ()>,
}

fn img_init(formats: ImageFormats) -> SdlResult<ImageFormats> {
    let loaded = unsafe { image::IMG_Init(formats.bits() as c_int) } as u32;
    let loaded = ImageFormats::from_bits_truncate(loaded);

    if !loaded.contains(formats) {
        return Err(SdlError::last("IMG_Init"));
    }

    Ok(loaded)
}

impl ImageContext {
    /// Fails unless every requested format could be loaded
    pub fn new(formats: ImageFormats) -> SdlResult<ImageContext> {
        let loaded = img_init(formats)?;

        info!("SDL_image initialized ({:?})", loaded);

        Ok(ImageContext {
            _not_send: PhantomData,
        })
    }

    /// Load support for more formats, returns the currently loaded set
    pub fn add_formats(&self, formats: ImageFormats) -> SdlResult<ImageFormats> {
        img_init(formats)
    }

    pub fn formats(&self) -> ImageFormats {
        ImageFormats::from_bits_truncate(unsafe { image::IMG_Init(0) } as u32)
    }
}

impl Drop for ImageContext {
    fn drop(&mut self) {
        unsafe { image::IMG_Quit() }
    }
}
