//! Hand-built sandbox map for the depot demo.
//!
//! ```text
//!  z ┌────────────────────────────────────────┐
//!  0 │                                        │
//!  1 │ F ======= road ======================= M │   F = farm, M = mill
//!  2 │   ─────── track ───────────────────── S │   S = station
//!  3 │                          B           P │   P = port, B = bridge
//!  4 │ ~~~~~~~~~~~~~~ river ~~~~~~~~~~~~~~~~~ │
//!  5 │                                        │
//!    └────────────────────────────────────────┘
//!      0                                   15
//! ```

use std::f32::consts::PI;

use fr_core::{Bridge, ComplexId, ItemId, PieceId, SandboxWorld, TilePos};

pub const GRAIN: ItemId = ItemId(0);
pub const FLOUR: ItemId = ItemId(1);

pub struct DemoMap {
    pub world:   SandboxWorld,
    pub farm:    ComplexId,
    pub mill:    ComplexId,
    pub station: ComplexId,
    pub port:    ComplexId,
    /// The track piece the demo removes and restores mid-run.
    pub cut_piece: PieceId,
}

pub fn build_map() -> anyhow::Result<DemoMap> {
    let mut world = SandboxWorld::new(16, 6, 1.0, 4);

    // Road.
    world.paint_paths(TilePos::new(1, 1), TilePos::new(14, 1));

    // Track: alternate stored direction to exercise reorientation.
    let mut cut_piece = PieceId::INVALID;
    for x in 1..=14 {
        let yaw = if x % 3 == 0 { PI } else { 0.0 };
        let id = world.place_straight_track(TilePos::new(x, 2), yaw);
        if x == 8 {
            cut_piece = id;
        }
    }

    // River with a road bridge high enough for boats.
    world.dig_water(TilePos::new(0, 3), TilePos::new(15, 4), 1.5);
    world.set_bridge(TilePos::new(10, 4), Some(Bridge { boat_passable: true, deck_height: 3.0 }));

    let farm = world.add_complex(vec![TilePos::new(0, 1)], 500);
    let mill = world.add_complex(vec![TilePos::new(15, 1)], 500);
    let station = world.add_complex(vec![TilePos::new(15, 2)], 500);
    let port = world.add_complex(vec![TilePos::new(15, 3)], 500);

    world.set_stock(farm, GRAIN, 400)?;
    world.set_stock(mill, FLOUR, 100)?;

    Ok(DemoMap { world, farm, mill, station, port, cut_piece })
}
