//! Unit tests for fr-fleet.

use fr_agent::{AgentStop, Schedule, StopAmount, TickContext, Transfer};
use fr_core::{AgentId, AgentKind, ComplexId, FleetConfig, ItemId, PieceId, SandboxWorld, SimClock, TilePos};
use fr_net::RoadNetwork;

use crate::{AgentManager, FleetObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const GOODS: ItemId = ItemId(0);

#[derive(Default)]
struct Recorder {
    lost:   Vec<(AgentKind, &'static str)>,
    found:  Vec<(AgentKind, AgentId)>,
    served: Vec<(AgentKind, AgentId, Transfer)>,
}

impl FleetObserver for Recorder {
    fn on_agents_lost(&mut self, kind: AgentKind, message_key: &'static str) {
        self.lost.push((kind, message_key));
    }

    fn on_agent_found(&mut self, kind: AgentKind, id: AgentId) {
        self.found.push((kind, id));
    }

    fn on_stop_served(&mut self, kind: AgentKind, id: AgentId, transfer: &Transfer) {
        self.served.push((kind, id, *transfer));
    }
}

/// An 8×3 map with a road along `z = 1` from `x = 1` to `x = 6` and a
/// complex at each end: `(0, 1)` and `(7, 1)`.
fn corridor() -> (SandboxWorld, ComplexId, ComplexId) {
    let mut w = SandboxWorld::new(8, 3, 1.0, 4);
    w.paint_paths(TilePos::new(1, 1), TilePos::new(6, 1));
    let west = w.add_complex(vec![TilePos::new(0, 1)], 100);
    let east = w.add_complex(vec![TilePos::new(7, 1)], 100);
    (w, west, east)
}

fn to(complex: ComplexId) -> Schedule {
    Schedule::new(vec![AgentStop::load(complex, GOODS, StopAmount::Fixed(1))])
}

/// A 10×6 map carrying all three networks:
///
/// - road along `z = 1` with complex `road_end` at `(9, 1)`,
/// - track along `z = 2` with complex `station` at `(9, 2)`,
/// - river along `z = 4` with complex `dock` on the bank at `(9, 3)`.
struct Harbour {
    world:    SandboxWorld,
    track:    Vec<PieceId>,
    road_end: ComplexId,
    station:  ComplexId,
    dock:     ComplexId,
}

fn harbour() -> Harbour {
    let mut world = SandboxWorld::new(10, 6, 1.0, 4);
    world.paint_paths(TilePos::new(1, 1), TilePos::new(8, 1));
    let track = (1..=8).map(|x| world.place_straight_track(TilePos::new(x, 2), 0.0)).collect();
    // Vertices z = 3..=5 dug, leaving row z = 4 navigable.
    world.dig_water(TilePos::new(0, 3), TilePos::new(9, 4), 1.0);

    let road_end = world.add_complex(vec![TilePos::new(9, 1)], 100);
    let station = world.add_complex(vec![TilePos::new(9, 2)], 100);
    let dock = world.add_complex(vec![TilePos::new(9, 3)], 100);
    for c in [road_end, station, dock] {
        world.set_stock(c, GOODS, 50).unwrap();
    }
    Harbour { world, track, road_end, station, dock }
}

// ── AgentManager ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod manager {
    use super::*;
    use crate::FleetError;
    use fr_agent::AgentState;

    struct Bench {
        world:  SandboxWorld,
        mgr:    AgentManager<RoadNetwork>,
        clock:  SimClock,
        config: FleetConfig,
        seen:   Recorder,
    }

    impl Bench {
        fn new(world: SandboxWorld) -> Self {
            let config = FleetConfig::default();
            Self {
                world,
                mgr: AgentManager::new(RoadNetwork::road(&config)),
                clock: SimClock::new(),
                config,
                seen: Recorder::default(),
            }
        }

        fn spawn_to(&mut self, tile: TilePos, target: ComplexId) -> AgentId {
            let id = self.mgr.spawn_at(tile.center(1.0));
            *self.mgr.get_mut(id).unwrap().schedule_mut() = to(target);
            id
        }

        fn find_paths(&mut self) -> usize {
            self.mgr.find_paths(&self.world, &mut self.seen)
        }

        fn tick(&mut self, dt: f32) {
            self.clock.advance(dt);
            let ctx = TickContext { clock: &self.clock, delta_secs: dt, config: &self.config };
            self.mgr.update(&mut self.world, &ctx, &mut self.seen);
        }
    }

    #[test]
    fn spawn_get_remove() {
        let (w, _, _) = corridor();
        let mut b = Bench::new(w);
        let a = b.mgr.spawn_at(TilePos::new(2, 1).center(1.0));
        let c = b.mgr.spawn_at(TilePos::new(3, 1).center(1.0));
        assert_ne!(a, c);
        assert_eq!(b.mgr.len(), 2);
        assert_eq!(b.mgr.get(a).unwrap().kind(), AgentKind::Carriage);
        assert_eq!(b.mgr.get(a).unwrap().state(), AgentState::Idle);

        b.mgr.remove(a).unwrap();
        assert_eq!(b.mgr.len(), 1);
        assert!(matches!(
            b.mgr.remove(a),
            Err(FleetError::AgentNotFound { kind: AgentKind::Carriage, id }) if id == a
        ));
        assert!(b.mgr.get(a).is_err());

        // Ids are never reused.
        let d = b.mgr.spawn_at(TilePos::new(4, 1).center(1.0));
        assert!(d != a && d != c);
    }

    #[test]
    fn agents_near_filters_by_ground_distance() {
        let (w, _, _) = corridor();
        let mut b = Bench::new(w);
        let near = b.mgr.spawn_at(TilePos::new(1, 1).center(1.0));
        b.mgr.spawn_at(TilePos::new(6, 1).center(1.0));

        let found: Vec<AgentId> = b.mgr.agents_near(TilePos::new(2, 1).center(1.0), 1.5).map(|(id, _)| id).collect();
        assert_eq!(found, vec![near]);
        assert_eq!(b.mgr.agents_near(TilePos::new(2, 1).center(1.0), 10.0).count(), 2);
    }

    #[test]
    fn lost_toast_fires_once_per_pass() {
        let (mut w, _, east) = corridor();
        w.set_path(TilePos::new(5, 1), false);
        let mut b = Bench::new(w);
        for x in 1..=3 {
            b.spawn_to(TilePos::new(x, 1), east);
        }

        // First tick: all three search and fail, one toast.
        b.tick(0.25);
        assert_eq!(b.mgr.lost_count(), 3);
        assert_eq!(b.seen.lost, vec![(AgentKind::Carriage, "toast_carriage_lost")]);

        // Staying lost is not news.
        b.tick(0.25);
        assert_eq!(b.find_paths(), 0);
        assert_eq!(b.seen.lost.len(), 1);
    }

    #[test]
    fn rebuild_reports_newly_lost_agents() {
        let (w, _, east) = corridor();
        let mut b = Bench::new(w);
        b.spawn_to(TilePos::new(1, 1), east);
        b.spawn_to(TilePos::new(2, 1), east);
        b.tick(0.25);
        assert_eq!(b.mgr.lost_count(), 0);

        b.world.set_path(TilePos::new(5, 1), false);
        assert_eq!(b.find_paths(), 2);
        assert_eq!(b.seen.lost, vec![(AgentKind::Carriage, "toast_carriage_lost")]);
    }

    #[test]
    fn lost_and_found_after_rebuild() {
        let (mut w, _, east) = corridor();
        w.set_path(TilePos::new(5, 1), false);
        let mut b = Bench::new(w);
        let id = b.spawn_to(TilePos::new(2, 1), east);
        b.tick(0.25);
        assert!(b.mgr.get(id).unwrap().is_lost());

        b.world.set_path(TilePos::new(5, 1), true);
        assert_eq!(b.find_paths(), 0);
        assert_eq!(b.seen.found, vec![(AgentKind::Carriage, id)]);
        assert_eq!(b.mgr.get(id).unwrap().state(), AgentState::Travelling);

        let before = b.mgr.get(id).unwrap().position();
        b.tick(0.25);
        assert!(b.mgr.get(id).unwrap().position().distance(before) > 0.0);
    }

    #[test]
    fn rebuild_checks_parked_agents() {
        let (w, west, east) = corridor();
        let mut b = Bench::new(w);
        let parked = b.spawn_to(TilePos::new(6, 1), east);
        let other = b.spawn_to(TilePos::new(1, 1), west);
        b.tick(0.25);
        assert_eq!(b.mgr.get(parked).unwrap().state(), AgentState::Loading);
        assert_eq!(b.mgr.get(other).unwrap().state(), AgentState::Loading);

        // Still reachable: keeps dwelling, nothing reported.
        assert_eq!(b.find_paths(), 0);
        assert_eq!(b.mgr.get(parked).unwrap().state(), AgentState::Loading);

        // The complex it is serving is demolished mid-dwell.
        b.world.remove_complex(east).unwrap();
        assert_eq!(b.find_paths(), 1);
        assert!(b.mgr.get(parked).unwrap().is_lost());
        assert_eq!(b.mgr.get(other).unwrap().state(), AgentState::Loading);
        assert_eq!(b.seen.lost, vec![(AgentKind::Carriage, "toast_carriage_lost")]);
    }

    #[test]
    fn rebuild_discards_history() {
        let (w, _, east) = corridor();
        let mut b = Bench::new(w);
        let id = b.spawn_to(TilePos::new(1, 1), east);
        for _ in 0..3 {
            b.tick(0.25);
        }
        let here = b.mgr.get(id).unwrap().position();
        b.find_paths();

        let agent = b.mgr.get(id).unwrap();
        assert_eq!(agent.distance(), 0.0);
        assert!(agent.path().start().distance(here) < 1e-6);
    }

    #[test]
    fn served_stops_are_reported() {
        let (mut w, west, _) = corridor();
        w.set_stock(west, GOODS, 10).unwrap();
        let mut b = Bench::new(w);
        let id = b.spawn_to(TilePos::new(3, 1), west);
        for _ in 0..200 {
            b.tick(0.25);
        }
        assert!(!b.seen.served.is_empty());
        let (kind, who, t) = b.seen.served[0];
        assert_eq!((kind, who), (AgentKind::Carriage, id));
        assert_eq!(t.complex, west);
        assert_eq!(t.loaded, 1);
    }
}

// ── Fleet and views ───────────────────────────────────────────────────────────

#[cfg(test)]
mod fleet {
    use super::*;
    use crate::{AgentView, Fleet, FleetError};
    use fr_core::{CoreError, Storage, Vec3};

    fn stocked_fleet(h: &Harbour) -> (Fleet, [AgentId; 3]) {
        let mut fleet = Fleet::new(FleetConfig::default()).unwrap();
        let car = fleet.carriages_mut().spawn_at(TilePos::new(2, 1).center(1.0));
        let train = fleet.trains_mut().spawn_at(Vec3::new(1.0, 0.0, 2.5));
        let boat = fleet.boats_mut().spawn_at(TilePos::new(1, 4).center(1.0));
        *fleet.view_mut(AgentKind::Carriage, car).unwrap().schedule_mut() = to(h.road_end);
        *fleet.view_mut(AgentKind::Train, train).unwrap().schedule_mut() = to(h.station);
        *fleet.view_mut(AgentKind::Boat, boat).unwrap().schedule_mut() = to(h.dock);
        (fleet, [car, train, boat])
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = FleetConfig { loading_secs: -1.0, ..FleetConfig::default() };
        assert!(matches!(Fleet::new(cfg), Err(FleetError::Core(CoreError::Config(_)))));
    }

    #[test]
    fn every_kind_serves_its_stop() {
        let mut h = harbour();
        let (mut fleet, _) = stocked_fleet(&h);
        let mut seen = Recorder::default();

        assert_eq!(fleet.topology_changed(&h.world, &mut seen), 0);
        assert_eq!(fleet.trains().network().piece_count(), 8);

        for _ in 0..400 {
            fleet.update(&mut h.world, 0.25, &mut seen);
        }

        assert!(seen.lost.is_empty(), "{:?}", seen.lost);
        for kind in AgentKind::ALL {
            assert!(seen.served.iter().any(|&(k, _, _)| k == kind), "{kind} never served");
        }
        let taken: u32 = [h.road_end, h.station, h.dock]
            .iter()
            .map(|&c| 50 - h.world.stored_count(c, GOODS))
            .sum();
        let held: u32 = fleet.views().map(|(_, v)| v.held(GOODS)).sum();
        assert_eq!(taken, held);
        assert_eq!(fleet.lost_count(), 0);
    }

    #[test]
    fn removing_track_strands_only_the_train() {
        let mut h = harbour();
        let (mut fleet, [car, train, _]) = stocked_fleet(&h);
        let mut seen = Recorder::default();
        fleet.topology_changed(&h.world, &mut seen);

        // Cut the line in the middle.
        h.world.remove_track(h.track[3]).unwrap();
        assert_eq!(fleet.rebuild(AgentKind::Train, &h.world, &mut seen), 1);
        assert_eq!(seen.lost, vec![(AgentKind::Train, "toast_train_lost")]);
        assert!(fleet.view(AgentKind::Train, train).unwrap().is_lost());
        assert!(!fleet.view(AgentKind::Carriage, car).unwrap().is_lost());
    }

    #[test]
    fn views_dispatch_over_all_kinds() {
        let h = harbour();
        let (fleet, [car, train, boat]) = stocked_fleet(&h);

        let listed: Vec<(AgentId, AgentKind)> = fleet.views().map(|(id, v)| (id, v.kind())).collect();
        assert_eq!(
            listed,
            vec![(car, AgentKind::Carriage), (train, AgentKind::Train), (boat, AgentKind::Boat)]
        );

        let v: AgentView<'_> = fleet.view(AgentKind::Boat, boat).unwrap();
        assert_eq!(v.icon(), "icon_boat");
        assert_eq!(v.capacity(), AgentKind::Boat.default_capacity());
        assert_eq!(v.name(), AgentKind::Boat.display_name());
        assert_eq!(v.schedule().len(), 1);
        assert_eq!(v.current_stop().unwrap().complex, h.dock);
        assert!(v.items().is_empty());

        assert!(matches!(
            fleet.view(AgentKind::Boat, AgentId(99)),
            Err(FleetError::AgentNotFound { kind: AgentKind::Boat, .. })
        ));
    }

    #[test]
    fn views_near_uses_ground_distance() {
        let h = harbour();
        let (fleet, [_, train, _]) = stocked_fleet(&h);
        let near: Vec<AgentKind> = fleet.views_near(Vec3::new(1.0, 5.0, 2.4), 0.5).map(|(_, v)| v.kind()).collect();
        assert_eq!(near, vec![AgentKind::Train]);
        assert_eq!(fleet.views_near(Vec3::new(1.0, 0.0, 2.4), 0.5).next().map(|(id, _)| id), Some(train));
    }

    #[test]
    fn view_mut_edits_reach_the_agent() {
        let mut h = harbour();
        let (mut fleet, [car, _, _]) = stocked_fleet(&h);
        fleet.topology_changed(&h.world, &mut crate::NoopObserver);
        for _ in 0..4 {
            fleet.update(&mut h.world, 0.25, &mut crate::NoopObserver);
        }

        {
            let mut v = fleet.view_mut(AgentKind::Carriage, car).unwrap();
            v.set_name("Dray");
            v.set_held(ItemId(3), 500);
            v.schedule_mut().push(AgentStop::unload(h.station, GOODS, StopAmount::Fraction(1.0)));
            assert!(!v.as_view().path_points().is_empty());
            v.reset_path();
            assert_eq!(v.as_view().path_points().len(), 1);
        }

        let v = fleet.view(AgentKind::Carriage, car).unwrap();
        assert_eq!(v.name(), "Dray");
        assert_eq!(v.held(ItemId(3)), AgentKind::Carriage.default_capacity());
        assert_eq!(v.schedule().len(), 2);

        fleet.remove(AgentKind::Carriage, car).unwrap();
        assert!(fleet.view(AgentKind::Carriage, car).is_err());
        assert_eq!(fleet.len(), 2);
    }
}
