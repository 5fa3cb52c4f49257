//! Sample guard AI built with the fluent builder.
//!
//! The guard patrols between waypoints, rests when out of stamina, and
//! engages intruders: reload, pick an aim, then fire a three-round burst.

use behavior_tree::{
    Action, Behavior, BehaviorTree, BuildError, Status, Succeed, TreeBuilder, While,
};

pub const MAX_STAMINA: u32 = 6;
pub const MAGAZINE: u32 = 3;
pub const WAYPOINT: i32 = 4;

/// World and guard state shared with every leaf.
#[derive(Debug, Clone)]
pub struct Guard {
    pub intruder_visible: bool,
    pub position: i32,
    pub stamina: u32,
    pub ammo: u32,
    pub shots: u32,
    pub aim_high: u32,
    pub aim_low: u32,
}

impl Guard {
    pub fn new() -> Self {
        Self {
            intruder_visible: false,
            position: 0,
            stamina: MAX_STAMINA,
            ammo: 1,
            shots: 0,
            aim_high: 0,
            aim_low: 0,
        }
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::new()
    }
}

/// Tops up the magazine in a single tick; a full magazine is not a failure.
fn reload() -> Box<dyn Behavior<Guard>> {
    let has_room = Action::new("has_room", |_: i64, g: &mut Guard| {
        if g.ammo < MAGAZINE {
            Status::Success
        } else {
            Status::Failure
        }
    });
    let load_round = Action::new("load_round", |_: i64, g: &mut Guard| {
        g.ammo += 1;
        Status::Success
    });
    let top_up = While::new("top_up", Box::new(has_room), Box::new(load_round));
    Box::new(Succeed::new("reload", Box::new(top_up)))
}

fn walk(_: i64, g: &mut Guard) -> Status {
    if g.stamina == 0 {
        return Status::Failure;
    }
    g.stamina -= 1;
    g.position += 1;
    if g.position >= WAYPOINT {
        g.position = 0;
        Status::Success
    } else {
        Status::Running
    }
}

fn watch(_: i64, g: &mut Guard) -> Status {
    if g.intruder_visible {
        Status::Success
    } else {
        Status::Running
    }
}

fn fire(_: i64, g: &mut Guard) -> Status {
    if g.ammo == 0 {
        return Status::Failure;
    }
    g.ammo -= 1;
    g.shots += 1;
    Status::Success
}

fn is_intruder_visible(_: i64, g: &mut Guard) -> Status {
    if g.intruder_visible {
        Status::Success
    } else {
        Status::Failure
    }
}

fn is_tired(_: i64, g: &mut Guard) -> Status {
    if g.stamina == 0 {
        Status::Success
    } else {
        Status::Failure
    }
}

/// Assembles the guard tree:
///
/// ```text
/// guard
/// └── duty (selector)
///     ├── engage (sequence)
///     │   ├── spot_intruder
///     │   ├── reload (succeed → while has_room: load_round)
///     │   ├── aim (random: aim_high | aim_low)
///     │   └── burst (repeat fire × MAGAZINE)
///     ├── rest (sequence)
///     │   ├── is_tired
///     │   ├── recover (wait rest_time)
///     │   └── refill
///     └── patrol (race)
///         ├── walk
///         └── watch
/// ```
///
/// # Errors
///
/// Propagates [`BuildError`] if the tree shape is invalid.
pub fn build_tree(seed: u64, rest_time: i64) -> Result<BehaviorTree<Guard>, BuildError> {
    TreeBuilder::new("guard")
        .selector("duty")
        .sequence("engage")
        .action("spot_intruder", is_intruder_visible)
        .splice(reload())
        .random_seeded("aim", seed)
        .action("aim_high", |_, g: &mut Guard| {
            g.aim_high += 1;
            Status::Success
        })
        .action("aim_low", |_, g: &mut Guard| {
            g.aim_low += 1;
            Status::Success
        })
        .end()
        .repeat("burst", fire, MAGAZINE)
        .end()
        .sequence("rest")
        .action("is_tired", is_tired)
        .wait("recover", rest_time)
        .action("refill", |_, g: &mut Guard| {
            g.stamina = MAX_STAMINA;
            Status::Success
        })
        .end()
        .race("patrol")
        .action("walk", walk)
        .action("watch", watch)
        .end()
        .end()
        .build()
}
