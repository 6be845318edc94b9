//! depot — a small freight network with one carriage, one train, and one boat.
//!
//! The carriage hauls grain from the farm to the mill, the train carries
//! flour from the mill back to the farm, and the boat keeps half a hold of
//! grain topped up at the port.  Halfway through, a track piece is lifted and
//! relaid to show the lost/found cycle.
//!
//! Set `RUST_LOG=debug` to see every search and transaction.

mod world;

use std::io::Cursor;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fr_agent::{load_schedules_reader, Transfer};
use fr_core::{AgentId, AgentKind, FleetConfig, Storage, TilePos, Vec3};
use fr_fleet::{Fleet, FleetObserver};

use world::{build_map, FLOUR, GRAIN};

// ── Constants ─────────────────────────────────────────────────────────────────

const FRAME_SECS:  f32   = 0.25;
const FRAMES:      usize = 1_200;
const CUT_FRAME:   usize = 400;
const RELAY_FRAME: usize = 480;

// ── Schedule CSV ──────────────────────────────────────────────────────────────

// Agent 0 = carriage, 1 = train, 2 = boat.  Complex ids follow build order:
// 0 farm, 1 mill, 2 station, 3 port.
const SCHEDULE_CSV: &str = "\
agent_id,complex_id,action,quantity,item_id\n\
0,0,load,20,0\n\
0,1,unload,100%,0\n\
1,1,load,50%,1\n\
1,0,unload,100%,1\n\
2,3,maintain,50%,0\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Toasts {
    shown:  Vec<&'static str>,
    served: usize,
    moved:  u32,
}

impl FleetObserver for Toasts {
    fn on_agents_lost(&mut self, kind: AgentKind, message_key: &'static str) {
        warn!(%kind, message_key, "toast");
        self.shown.push(message_key);
    }

    fn on_agent_found(&mut self, kind: AgentKind, id: AgentId) {
        info!(%kind, %id, "back on the network");
    }

    fn on_stop_served(&mut self, _kind: AgentKind, _id: AgentId, transfer: &Transfer) {
        self.served += 1;
        self.moved += transfer.loaded + transfer.unloaded;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut map = build_map()?;
    let schedules = load_schedules_reader(Cursor::new(SCHEDULE_CSV), 3)?;
    let [carriage_plan, train_plan, boat_plan]: [_; 3] = schedules
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected three schedules"))?;

    let mut fleet = Fleet::new(FleetConfig { seed: 7, ..FleetConfig::default() })?;

    let carriage = fleet.carriages_mut().spawn_at(TilePos::new(2, 1).center(1.0));
    let train = fleet.trains_mut().spawn_at(Vec3::new(1.0, 0.0, 2.5));
    let boat = fleet.boats_mut().spawn_at(TilePos::new(1, 4).center(1.0));
    *fleet.view_mut(AgentKind::Carriage, carriage)?.schedule_mut() = carriage_plan;
    *fleet.view_mut(AgentKind::Train, train)?.schedule_mut() = train_plan;
    *fleet.view_mut(AgentKind::Boat, boat)?.schedule_mut() = boat_plan;
    fleet.view_mut(AgentKind::Boat, boat)?.set_name("Miller's Barge");

    let mut toasts = Toasts::default();
    fleet.topology_changed(&map.world, &mut toasts);
    info!(
        pieces = fleet.trains().network().piece_count(),
        links = fleet.trains().network().link_count(),
        "map ready"
    );

    let mut lifted = None;
    for frame in 0..FRAMES {
        if frame == CUT_FRAME {
            lifted = Some(map.world.remove_track(map.cut_piece)?);
            fleet.rebuild(AgentKind::Train, &map.world, &mut toasts);
        }
        if frame == RELAY_FRAME {
            if let Some(piece) = lifted.take() {
                map.cut_piece = map.world.place_track(piece.position, piece.yaw, piece.points);
                fleet.rebuild(AgentKind::Train, &map.world, &mut toasts);
            }
        }
        fleet.update(&mut map.world, FRAME_SECS, &mut toasts);
    }

    // ── Summary ───────────────────────────────────────────────────────────

    println!();
    println!("Simulated {:.0} s, {} stops served, {} units moved", fleet.clock().now(), toasts.served, toasts.moved);
    println!("Toasts: {:?}", toasts.shown);
    println!();
    println!("{:<16} {:<10} {:<12} {:>6} {:>6}", "Agent", "Kind", "State", "Grain", "Flour");
    println!("{}", "-".repeat(54));
    for (_, v) in fleet.views() {
        println!(
            "{:<16} {:<10} {:<12} {:>6} {:>6}",
            v.name(),
            v.kind(),
            v.state(),
            v.held(GRAIN),
            v.held(FLOUR),
        );
    }
    println!();
    for (label, complex) in [("farm", map.farm), ("mill", map.mill), ("station", map.station), ("port", map.port)] {
        println!(
            "{label:<8} grain {:>4}  flour {:>4}",
            map.world.stored_count(complex, GRAIN),
            map.world.stored_count(complex, FLOUR),
        );
    }

    Ok(())
}
