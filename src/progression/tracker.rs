//! Region tracking and gate unlocks
//!
//! Fed the player position once per tick. Tracks which region the player
//! stands in, fires the one-shot unlock latches and opens gates in the map.

use std::collections::HashSet;

use super::messages::{MessageQueue, TimedMessage};
use crate::world::{Gate, LayoutInfo, RegionLabel, TilePos, TileType, WorldError, WorldMap};

/// How long the "Entering" banner stays up
pub const BANNER_DURATION: f32 = 2.0;
/// How long an unlock message stays up
pub const UNLOCK_MESSAGE_DURATION: f32 = 4.0;

/// Session-scoped progression flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressionState {
    /// Region at the last update; `None` before the first one
    pub current_region: Option<RegionLabel>,
    pub unlocked: HashSet<Gate>,
    pub open_gates: HashSet<Gate>,
    pub visited_mountains: bool,
}

impl ProgressionState {
    pub fn is_unlocked(&self, gate: Gate) -> bool {
        self.unlocked.contains(&gate)
    }

    pub fn is_open(&self, gate: Gate) -> bool {
        self.open_gates.contains(&gate)
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionEvent {
    /// Region under the player changed; drives the ambient loop
    RegionChanged {
        from: Option<RegionLabel>,
        to: RegionLabel,
    },
    GateOpened(Gate),
    /// Unlock message queued for display
    Message(String),
}

#[derive(Debug, Clone)]
pub struct ProgressionTracker {
    layout: LayoutInfo,
    state: ProgressionState,
    current_tile: TilePos,
    banner: Option<TimedMessage>,
    messages: MessageQueue,
}

impl ProgressionTracker {
    /// Only maps with a layout can be tracked
    pub fn new(map: &WorldMap) -> Result<Self, WorldError> {
        let layout = map.layout().cloned().ok_or(WorldError::MissingLayout)?;
        Ok(Self {
            current_tile: layout.town_center,
            layout,
            state: ProgressionState::default(),
            banner: None,
            messages: MessageQueue::new(),
        })
    }

    /// Advance one tick with the player at a pixel position
    pub fn update(
        &mut self,
        map: &mut WorldMap,
        player_x: f32,
        player_y: f32,
        dt: f32,
    ) -> Vec<ProgressionEvent> {
        let mut events = Vec::new();

        self.messages.tick(dt);
        if self.banner.as_mut().is_some_and(|banner| !banner.tick(dt)) {
            self.banner = None;
        }

        let tile = map.world_to_tile(player_x, player_y);
        self.current_tile = tile;
        let region = if map.contains_world(player_x, player_y) {
            map.region_at(tile.x, tile.y).unwrap_or_default()
        } else {
            RegionLabel::None
        };

        if self.state.current_region != Some(region) {
            let from = self.state.current_region.replace(region);
            if from.is_some() {
                let text = format!("Entering: {}", region.display_name());
                log::debug!("{}", text);
                self.banner = Some(TimedMessage::new(text, BANNER_DURATION));
            }
            events.push(ProgressionEvent::RegionChanged { from, to: region });
        }

        if tile == self.layout.town_unlock && !self.state.is_unlocked(Gate::Forest) {
            self.fire_latch(map, &[Gate::Forest], "The forest gate swings open!", &mut events);
        }

        if tile == self.layout.forest_unlock
            && self.state.is_unlocked(Gate::Forest)
            && !self.state.is_unlocked(Gate::Farm)
        {
            self.fire_latch(
                map,
                &[Gate::Farm, Gate::Mountain],
                "The farm and mountain gates are open!",
                &mut events,
            );
        }

        if region == RegionLabel::Mountain && !self.state.visited_mountains {
            self.state.visited_mountains = true;
            self.fire_latch(map, &[Gate::Volcano], "The volcano path is open!", &mut events);
        }

        events
    }

    fn fire_latch(
        &mut self,
        map: &mut WorldMap,
        gates: &[Gate],
        message: &str,
        events: &mut Vec<ProgressionEvent>,
    ) {
        for &gate in gates {
            self.state.unlocked.insert(gate);
            if self.open_gate(map, gate) {
                events.push(ProgressionEvent::GateOpened(gate));
            }
        }
        self.messages.push(message, UNLOCK_MESSAGE_DURATION);
        events.push(ProgressionEvent::Message(message.to_string()));
    }

    /// Rewrite a gate's tiles to road. Returns false if it was already open.
    pub fn open_gate(&mut self, map: &mut WorldMap, gate: Gate) -> bool {
        if !self.state.open_gates.insert(gate) {
            return false;
        }

        let mut opened = 0;
        for &pos in self.layout.gate_tiles(gate) {
            if map.tile_type_at(pos.x, pos.y) != Ok(TileType::Gate) {
                continue;
            }
            match map.set_tile(pos, TileType::Road) {
                Ok(()) => opened += 1,
                Err(e) => log::warn!("Could not open {} gate tile: {}", gate.name(), e),
            }
        }
        log::info!("Opened {} gate ({} tiles)", gate.name(), opened);
        true
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.layout
    }

    /// Tile under the player at the last update
    pub fn current_tile(&self) -> TilePos {
        self.current_tile
    }

    /// Region whose ambient loop should play
    pub fn ambient_region(&self) -> RegionLabel {
        self.state.current_region.unwrap_or_default()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_ref().map(|banner| banner.text.as_str())
    }

    pub fn messages(&self) -> &MessageQueue {
        &self.messages
    }
}
