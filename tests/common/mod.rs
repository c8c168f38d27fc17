//! Shared fixtures for integration tests.

#![allow(dead_code)]

use strictly_duel::RoomControl;

/// Room capability that records what a game asked of it.
#[derive(Debug, Default)]
pub struct RecordingRoom {
    pub host: bool,
    pub sent: Vec<(u8, Vec<u8>)>,
    pub visible: Option<bool>,
    pub open: Option<bool>,
}

impl RecordingRoom {
    pub fn host() -> Self {
        Self {
            host: true,
            ..Self::default()
        }
    }

    pub fn guest() -> Self {
        Self::default()
    }
}

impl RoomControl for RecordingRoom {
    fn send_event(&mut self, tag: u8, payload: Vec<u8>) {
        self.sent.push((tag, payload));
    }

    fn set_room_visible(&mut self, visible: bool) {
        self.visible = Some(visible);
    }

    fn set_room_open(&mut self, open: bool) {
        self.open = Some(open);
    }

    fn is_host(&self) -> bool {
        self.host
    }
}
