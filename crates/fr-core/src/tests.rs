//! Unit tests for fr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ComplexId, ItemId};

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(ItemId::default(), ItemId(u16::MAX));
    }

    #[test]
    fn next_increments() {
        assert_eq!(ComplexId(4).next(), ComplexId(5));
        assert_eq!(AgentId(0).next().index(), 1);
    }

    #[test]
    fn display_includes_type_name() {
        assert_eq!(ComplexId(7).to_string(), "ComplexId(7)");
    }

    #[test]
    fn try_from_usize_overflow() {
        assert!(ItemId::try_from(70_000usize).is_err());
        assert_eq!(ItemId::try_from(3usize).unwrap(), ItemId(3));
    }
}

#[cfg(test)]
mod geo {
    use crate::geo::DIAGONAL_COST;
    use crate::{TilePos, Vec3};

    #[test]
    fn octile_distance_mixes_diagonal_and_straight() {
        let a = TilePos::new(0, 0);
        assert_eq!(a.octile_distance(TilePos::new(3, 0)), 3.0);
        assert!((a.octile_distance(TilePos::new(2, 2)) - 2.0 * DIAGONAL_COST).abs() < 1e-6);
        let d = a.octile_distance(TilePos::new(4, 1));
        assert!((d - (3.0 + DIAGONAL_COST)).abs() < 1e-6);
    }

    #[test]
    fn manhattan_distance_symmetric() {
        let a = TilePos::new(-2, 5);
        let b = TilePos::new(3, 1);
        assert_eq!(a.manhattan_distance(b), 9);
        assert_eq!(b.manhattan_distance(a), 9);
    }

    #[test]
    fn world_tile_roundtrip() {
        let t = TilePos::new(3, 7);
        let c = t.center(2.0);
        assert_eq!(c, Vec3::new(7.0, 0.0, 15.0));
        assert_eq!(TilePos::from_world(c, 2.0), t);
        assert_eq!(TilePos::from_world(Vec3::new(-0.1, 0.0, 0.0), 1.0), TilePos::new(-1, 0));
    }

    #[test]
    fn chunk_floors_negative_tiles() {
        assert_eq!(TilePos::new(-1, 15).chunk(16), (-1, 0));
        assert_eq!(TilePos::new(16, 31).chunk(16), (1, 1));
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = Vec3::new(1.0, 0.0, 0.0).rotate_y(std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 6.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(1.0, 2.0, 3.0));
    }
}

#[cfg(test)]
mod clock {
    use crate::{SimClock, Tick};

    #[test]
    fn advance_accumulates() {
        let mut c = SimClock::new();
        c.advance(0.5);
        c.advance(0.25);
        assert_eq!(c.current_tick, Tick(2));
        assert!((c.now() - 0.75).abs() < 1e-9);
        assert!((c.since(0.5) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn negative_delta_ignored() {
        let mut c = SimClock::new();
        c.advance(-3.0);
        assert_eq!(c.now(), 0.0);
        assert_eq!(c.current_tick, Tick(1));
    }
}

#[cfg(test)]
mod rng {
    use crate::JitterRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = JitterRng::new(9);
        let mut b = JitterRng::new(9);
        for _ in 0..16 {
            assert_eq!(a.planar_offset(0.3), b.planar_offset(0.3));
        }
    }

    #[test]
    fn offsets_stay_in_range() {
        let mut r = JitterRng::salted(1, 2);
        for _ in 0..256 {
            let (x, z) = r.planar_offset(0.25);
            assert!((-0.25..=0.25).contains(&x));
            assert!((-0.25..=0.25).contains(&z));
        }
        assert_eq!(r.symmetric(0.0), 0.0);
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, FleetConfig};

    #[test]
    fn default_is_valid() {
        FleetConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_tolerance() {
        let cfg = FleetConfig { track_snap_tolerance: 0.0, ..FleetConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_large_jitter() {
        let cfg = FleetConfig { jitter_fraction: 0.6, ..FleetConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod sandbox {
    use crate::{ComplexId, ItemId, SandboxWorld, Storage, Terrain, TilePos};

    #[test]
    fn storage_clamps_to_capacity() {
        let mut w = SandboxWorld::new(4, 4, 1.0, 2);
        let c = w.add_complex(vec![TilePos::new(1, 1)], 10);
        assert_eq!(w.add_stored(c, ItemId(0), 7), 7);
        assert_eq!(w.add_stored(c, ItemId(1), 7), 3);
        assert_eq!(w.stored_count(c, ItemId(1)), 3);
        assert_eq!(w.remove_stored(c, ItemId(0), 100), 7);
        assert_eq!(w.stored_count(c, ItemId(0)), 0);
    }

    #[test]
    fn unknown_complex_is_empty() {
        let mut w = SandboxWorld::new(2, 2, 1.0, 2);
        assert!(w.footprint(ComplexId(3)).is_empty());
        assert_eq!(w.add_stored(ComplexId(3), ItemId(0), 5), 0);
    }

    #[test]
    fn complex_footprint_marks_buildings() {
        let mut w = SandboxWorld::new(4, 4, 1.0, 2);
        let c = w.add_complex(vec![TilePos::new(2, 2), TilePos::new(2, 3)], 5);
        assert!(w.has_building(TilePos::new(2, 3)));
        w.remove_complex(c).unwrap();
        assert!(!w.has_building(TilePos::new(2, 3)));
        assert!(w.remove_complex(c).is_err());
    }

    #[test]
    fn track_bucketed_by_chunk() {
        let mut w = SandboxWorld::new(8, 8, 1.0, 4);
        let a = w.place_straight_track(TilePos::new(1, 1), 0.0);
        let b = w.place_straight_track(TilePos::new(5, 1), 0.0);
        assert_eq!(w.track_pieces_in_chunk(0, 0)[0].id, a);
        assert_eq!(w.track_pieces_in_chunk(1, 0)[0].id, b);
        assert_eq!(w.size_in_chunks(), (2, 2));
        w.remove_track(a).unwrap();
        assert!(w.track_pieces_in_chunk(0, 0).is_empty());
    }

    #[test]
    fn elevation_interpolates() {
        let mut w = SandboxWorld::new(2, 2, 2.0, 2);
        w.set_vertex_elevation(0, 0, 0.0);
        w.set_vertex_elevation(1, 0, 4.0);
        w.set_vertex_elevation(0, 1, 0.0);
        w.set_vertex_elevation(1, 1, 4.0);
        // Halfway across tile (0, 0) along x.
        assert!((w.elevation_at(1.0, 1.0) - 2.0).abs() < 1e-5);
    }
}
