//! HTTP Handlers

mod generation;
mod ping;
mod playback;
mod websocket;

pub use generation::*;
pub use ping::*;
pub use playback::*;
pub use websocket::*;
