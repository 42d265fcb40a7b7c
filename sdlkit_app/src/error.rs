use sdlkit_lib::SdlError;
use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("SDL call failed")]
    Sdl(#[from] SdlError),
    #[error("Failed to read config file")]
    Ini(#[from] ini::Error),
    #[error("Bad config value [{section}] {key} = {value}")]
    Config {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}
