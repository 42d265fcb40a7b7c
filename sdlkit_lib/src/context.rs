#[cfg(feature = "image")]
pub mod image;
#[cfg(feature = "ttf")]
pub mod ttf;

use std::marker::PhantomData;
use std::mem::MaybeUninit;
use sdl2::sys;
use tracing::{debug, info};
use crate::error::{check, SdlResult};
use crate::flags::InitFlags;

/// Initialized SDL library.
///
/// Dropping it releases the subsystems it initialized. Windows hold their
/// own reference on the video subsystem, so any still open keep video
/// running, and `SDL_Quit` only runs once none are left.
pub struct Context {
    flags: InitFlags,
    _not_send: PhantomData<*const ()>,
}

impl Context {
    pub fn new(flags: InitFlags) -> SdlResult<Context> {
        check(unsafe { sys::SDL_Init(flags.bits()) }, "SDL_Init")?;

        info!("SDL initialized ({:?})", flags);

        Ok(Context {
            flags,
            _not_send: PhantomData,
        })
    }

    /// Which of `flags` are currently initialized. An empty `flags` asks for
    /// every initialized subsystem.
    pub fn was_init(&self, flags: InitFlags) -> InitFlags {
        InitFlags::from_bits_truncate(unsafe { sys::SDL_WasInit(flags.bits()) })
    }

    pub fn init_subsystem(&self, flags: InitFlags) -> SdlResult<()> {
        debug!("Init subsystem {:?}", flags);
        check(unsafe { sys::SDL_InitSubSystem(flags.bits()) }, "SDL_InitSubSystem")
    }

    pub fn quit_subsystem(&self, flags: InitFlags) {
        debug!("Quit subsystem {:?}", flags);
        unsafe { sys::SDL_QuitSubSystem(flags.bits()) }
    }

    /// Milliseconds since SDL was initialized
    pub fn ticks(&self) -> u32 {
        unsafe { sys::SDL_GetTicks() }
    }

    pub fn delay(&self, ms: u32) {
        unsafe { sys::SDL_Delay(ms) }
    }

    /// Drain the event queue. Returns true if a quit request was among the
    /// pending events.
    pub fn poll_quit(&self) -> bool {
        let mut quit = false;
        let mut event = MaybeUninit::<sys::SDL_Event>::uninit();

        while unsafe { sys::SDL_PollEvent(event.as_mut_ptr()) } != 0 {
            // SAFETY: SDL_PollEvent filled the event, and every variant starts
            // with the `type_` word
            let kind = unsafe { event.assume_init_ref().type_ };
            if kind == sys::SDL_EventType::SDL_QUIT as u32 {
                quit = true;
            }
        }

        quit
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { sys::SDL_QuitSubSystem(self.flags.bits()) };

        if unsafe { sys::SDL_WasInit(sys::SDL_INIT_VIDEO) } == 0 {
            info!("SDL shutdown");
            unsafe { sys::SDL_Quit() }
        } else {
            debug!("Windows still open, leaving video running");
        }
    }
}
