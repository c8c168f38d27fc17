//! In-process relay for local play, simulation and tests.
//!
//! A [`LoopbackHub`] holds every room and every participant's inbox behind
//! one shared lock. Each [`LoopbackClient`] is one participant's view of it
//! and implements [`Transport`]. Delivery is reliable and ordered.

use super::{LocalPlayer, PlayerId, RoomControl, RoomEvent, RoomInfo, Transport};
use crate::TransportError;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
struct Room {
    max_players: usize,
    open: bool,
    visible: bool,
    members: Vec<PlayerId>,
    host: PlayerId,
}

#[derive(Debug, Default)]
struct Participant {
    user_name: String,
    connected: bool,
    room: Option<String>,
    inbox: VecDeque<RoomEvent>,
}

#[derive(Debug, Default)]
struct HubState {
    next_id: PlayerId,
    participants: HashMap<PlayerId, Participant>,
    rooms: BTreeMap<String, Room>,
}

impl HubState {
    fn participant(&mut self, id: PlayerId) -> &mut Participant {
        self.participants.entry(id).or_default()
    }

    fn room_of(&self, id: PlayerId) -> Option<(&String, &Room)> {
        let name = self.participants.get(&id)?.room.as_ref()?;
        self.rooms.get_key_value(name)
    }

    fn player(&self, id: PlayerId, room: &Room) -> LocalPlayer {
        LocalPlayer {
            id,
            user_name: self
                .participants
                .get(&id)
                .map(|p| p.user_name.clone())
                .unwrap_or_default(),
            is_host: room.host == id,
        }
    }

    fn deliver(&mut self, to: PlayerId, event: RoomEvent) {
        self.participant(to).inbox.push_back(event);
    }

    fn ensure_connected_and_free(&self, id: PlayerId) -> Result<(), TransportError> {
        let participant = self.participants.get(&id).ok_or(TransportError::NotConnected)?;
        if !participant.connected {
            return Err(TransportError::NotConnected);
        }
        if let Some(room) = &participant.room {
            return Err(TransportError::AlreadyInRoom(room.clone()));
        }
        Ok(())
    }

    fn leave(&mut self, id: PlayerId) -> Result<String, TransportError> {
        let name = self
            .participant(id)
            .room
            .take()
            .ok_or(TransportError::NotInRoom)?;
        let remaining = match self.rooms.get_mut(&name) {
            Some(room) => {
                room.members.retain(|member| *member != id);
                if room.host == id {
                    room.host = room.members.first().copied().unwrap_or(id);
                }
                room.members.clone()
            }
            None => Vec::new(),
        };
        if remaining.is_empty() {
            self.rooms.remove(&name);
            debug!(room = %name, "Last participant left; room removed");
        }
        for member in remaining {
            self.deliver(member, RoomEvent::Left { player: id });
        }
        self.deliver(id, RoomEvent::SelfLeft);
        Ok(name)
    }
}

/// Shared in-process relay.
#[derive(Debug, Clone, Default)]
pub struct LoopbackHub {
    state: Arc<Mutex<HubState>>,
}

impl LoopbackHub {
    /// Creates an empty relay.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a new, disconnected participant.
    #[instrument(skip(self))]
    pub fn client(&self) -> LoopbackClient {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.participants.insert(id, Participant::default());
        debug!(id, "Loopback client created");
        LoopbackClient {
            hub: self.clone(),
            id,
            user_name: String::new(),
        }
    }

    /// Every room, visible or not.
    pub fn all_rooms(&self) -> Vec<RoomInfo> {
        let state = self.lock();
        state
            .rooms
            .iter()
            .map(|(name, room)| RoomInfo::new(name, room.members.len(), room.max_players, room.open))
            .collect()
    }

    /// Visibility of a room in discovery, if the room exists.
    pub fn is_visible(&self, name: &str) -> Option<bool> {
        self.lock().rooms.get(name).map(|room| room.visible)
    }
}

/// One participant's connection to a [`LoopbackHub`].
#[derive(Debug)]
pub struct LoopbackClient {
    hub: LoopbackHub,
    id: PlayerId,
    user_name: String,
}

impl LoopbackClient {
    /// Room-local identifier of this participant.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Runs `f` on the current room, if any.
    fn with_room<R>(&self, f: impl FnOnce(&mut Room) -> R) -> Option<R> {
        let mut state = self.hub.lock();
        let name = state.participants.get(&self.id)?.room.clone()?;
        state.rooms.get_mut(&name).map(f)
    }
}

impl RoomControl for LoopbackClient {
    #[instrument(skip(self, payload), fields(id = self.id, len = payload.len()))]
    fn send_event(&mut self, tag: u8, payload: Vec<u8>) {
        let mut state = self.hub.lock();
        let Some((_, room)) = state.room_of(self.id) else {
            warn!(tag, "Not in a room; event dropped");
            return;
        };
        let others: Vec<PlayerId> = room
            .members
            .iter()
            .copied()
            .filter(|member| *member != self.id)
            .collect();
        for member in others {
            state.deliver(
                member,
                RoomEvent::Custom {
                    sender: self.id,
                    tag,
                    payload: payload.clone(),
                },
            );
        }
    }

    #[instrument(skip(self), fields(id = self.id))]
    fn set_room_visible(&mut self, visible: bool) {
        if self.with_room(|room| room.visible = visible).is_none() {
            warn!("Not in a room; visibility unchanged");
        }
    }

    #[instrument(skip(self), fields(id = self.id))]
    fn set_room_open(&mut self, open: bool) {
        if self.with_room(|room| room.open = open).is_none() {
            warn!("Not in a room; open flag unchanged");
        }
    }

    fn is_host(&self) -> bool {
        let state = self.hub.lock();
        state
            .room_of(self.id)
            .is_some_and(|(_, room)| room.host == self.id)
    }
}

impl Transport for LoopbackClient {
    #[instrument(skip(self), fields(id = self.id))]
    fn connect(&mut self, display_name: &str, region: &str) -> Result<(), TransportError> {
        let mut state = self.hub.lock();
        let participant = state.participant(self.id);
        participant.user_name = display_name.to_string();
        participant.connected = true;
        self.user_name = display_name.to_string();
        info!("Connected to loopback relay");
        Ok(())
    }

    #[instrument(skip(self), fields(id = self.id))]
    fn disconnect(&mut self) {
        let mut state = self.hub.lock();
        if let Ok(room) = state.leave(self.id) {
            debug!(%room, "Left room on disconnect");
        }
        state.participant(self.id).connected = false;
        info!("Disconnected from loopback relay");
    }

    fn is_connected(&self) -> bool {
        self.hub
            .lock()
            .participants
            .get(&self.id)
            .is_some_and(|p| p.connected)
    }

    fn user_name(&self) -> &str {
        &self.user_name
    }

    fn list_rooms(&self) -> Vec<RoomInfo> {
        if !self.is_connected() {
            return Vec::new();
        }
        let state = self.hub.lock();
        state
            .rooms
            .iter()
            .filter(|(_, room)| room.visible)
            .map(|(name, room)| RoomInfo::new(name, room.members.len(), room.max_players, room.open))
            .collect()
    }

    #[instrument(skip(self), fields(id = self.id))]
    fn create_room(&mut self, name: &str, max_players: usize) -> Result<(), TransportError> {
        let mut state = self.hub.lock();
        state.ensure_connected_and_free(self.id)?;
        if state.rooms.contains_key(name) {
            return Err(TransportError::RoomExists(name.to_string()));
        }
        let room = Room {
            max_players,
            open: true,
            visible: true,
            members: vec![self.id],
            host: self.id,
        };
        let player = state.player(self.id, &room);
        state.rooms.insert(name.to_string(), room);
        state.participant(self.id).room = Some(name.to_string());
        state.deliver(
            self.id,
            RoomEvent::Joined {
                player,
                is_self: true,
            },
        );
        info!(room = %name, "Room created");
        Ok(())
    }

    #[instrument(skip(self), fields(id = self.id))]
    fn join_room(&mut self, name: &str) -> Result<(), TransportError> {
        let mut state = self.hub.lock();
        state.ensure_connected_and_free(self.id)?;
        let room = state
            .rooms
            .get_mut(name)
            .ok_or_else(|| TransportError::RoomNotFound(name.to_string()))?;
        if !room.open {
            return Err(TransportError::RoomClosed(name.to_string()));
        }
        if room.members.len() >= room.max_players {
            return Err(TransportError::RoomFull(name.to_string()));
        }
        room.members.push(self.id);
        let members = room.members.clone();
        let player = LocalPlayer {
            id: self.id,
            user_name: self.user_name.clone(),
            is_host: room.host == self.id,
        };

        state.participant(self.id).room = Some(name.to_string());
        for member in members {
            let is_self = member == self.id;
            state.deliver(
                member,
                RoomEvent::Joined {
                    player: player.clone(),
                    is_self,
                },
            );
        }
        info!(room = %name, "Joined room");
        Ok(())
    }

    #[instrument(skip(self), fields(id = self.id))]
    fn leave_room(&mut self) -> Result<(), TransportError> {
        let room = self.hub.lock().leave(self.id)?;
        info!(%room, "Left room");
        Ok(())
    }

    fn current_room(&self) -> Option<String> {
        self.hub.lock().room_of(self.id).map(|(name, _)| name.clone())
    }

    fn local_players(&self) -> Vec<LocalPlayer> {
        let state = self.hub.lock();
        let Some((_, room)) = state.room_of(self.id) else {
            return Vec::new();
        };
        room.members
            .iter()
            .map(|member| state.player(*member, room))
            .collect()
    }

    fn poll_events(&mut self) -> Vec<RoomEvent> {
        self.hub.lock().participant(self.id).inbox.drain(..).collect()
    }
}
