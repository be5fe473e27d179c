use contracts::debug_ensures;
use serde::{Deserialize, Serialize};

use crate::geometry::Direction;

/// How much of a barrier's surroundings has closed in toward the ray.
///
/// `UpOrLeftEdge` and `DownOrRightEdge` are half-open pockets, `Trap` a pocket
/// closed on both sides. The state only ever moves forward.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapState {
    #[default]
    None,
    UpOrLeftEdge,
    DownOrRightEdge,
    Trap,
}

impl TrapState {
    pub fn rank(self) -> u8 {
        match self {
            TrapState::None => 0,
            TrapState::UpOrLeftEdge | TrapState::DownOrRightEdge => 1,
            TrapState::Trap => 2,
        }
    }
}

/// Bounds of a trap on the travel axis.
///
/// `up_or_left` belongs to the side with the smaller cross coordinate,
/// `down_or_right` to the other one. `forward` is the edge the bounds started
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapData {
    pub state: TrapState,
    pub up_or_left: i32,
    pub down_or_right: i32,
    pub forward: i32,
}

impl TrapData {
    pub fn new(edge: i32) -> Self {
        Self {
            state: TrapState::None,
            up_or_left: edge,
            down_or_right: edge,
            forward: edge,
        }
    }

    /// Offers smaller bounds. Pass `i32::MAX` for a side with no candidate.
    pub fn transform_by_min(&mut self, up_or_left: i32, down_or_right: i32) {
        self.transform(
            up_or_left < self.up_or_left,
            down_or_right < self.down_or_right,
            up_or_left,
            down_or_right,
        );
    }

    /// Offers larger bounds. Pass `i32::MIN` for a side with no candidate.
    pub fn transform_by_max(&mut self, up_or_left: i32, down_or_right: i32) {
        self.transform(
            up_or_left > self.up_or_left,
            down_or_right > self.down_or_right,
            up_or_left,
            down_or_right,
        );
    }

    /// Offers bounds closer to the origin of a ray travelling in `direction`.
    pub fn approach(
        &mut self,
        direction: Direction,
        up_or_left: Option<i32>,
        down_or_right: Option<i32>,
    ) {
        if direction.sign() > 0 {
            self.transform_by_min(
                up_or_left.unwrap_or(i32::MAX),
                down_or_right.unwrap_or(i32::MAX),
            );
        } else {
            self.transform_by_max(
                up_or_left.unwrap_or(i32::MIN),
                down_or_right.unwrap_or(i32::MIN),
            );
        }
    }

    /// Offers bounds further along a ray travelling in `direction`.
    pub fn recede(
        &mut self,
        direction: Direction,
        up_or_left: Option<i32>,
        down_or_right: Option<i32>,
    ) {
        self.approach(direction.opposite(), up_or_left, down_or_right);
    }

    #[debug_ensures(self.state.rank() >= old(self.state.rank()))]
    fn transform(
        &mut self,
        up_or_left_improves: bool,
        down_or_right_improves: bool,
        up_or_left: i32,
        down_or_right: i32,
    ) {
        match (self.state, up_or_left_improves, down_or_right_improves) {
            (_, false, false) => (),
            (TrapState::Trap, ..) => {
                if up_or_left_improves {
                    self.up_or_left = up_or_left;
                }
                if down_or_right_improves {
                    self.down_or_right = down_or_right;
                }
            }
            // Both sides at once leave an open or half-open pocket as it is.
            (_, true, true) => (),
            (TrapState::None, true, false) => {
                self.state = TrapState::UpOrLeftEdge;
                self.up_or_left = up_or_left;
            }
            (TrapState::None, false, true) => {
                self.state = TrapState::DownOrRightEdge;
                self.down_or_right = down_or_right;
            }
            (TrapState::UpOrLeftEdge, true, false) => self.up_or_left = up_or_left,
            (TrapState::UpOrLeftEdge, false, true) => {
                self.state = TrapState::Trap;
                self.down_or_right = down_or_right;
            }
            (TrapState::DownOrRightEdge, false, true) => self.down_or_right = down_or_right,
            (TrapState::DownOrRightEdge, true, false) => {
                self.state = TrapState::Trap;
                self.up_or_left = up_or_left;
            }
        }
    }
}
