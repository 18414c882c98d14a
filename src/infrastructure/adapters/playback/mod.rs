//! Playback Adapter

mod broadcast_player;

pub use broadcast_player::BroadcastAudioPlayer;
