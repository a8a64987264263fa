//! Unit tests for ev-network.
//!
//! All tests use hand-built networks so they run without any data files.

#[cfg(test)]
mod helpers {
    use ev_core::{GeoPoint, VillageId};

    use crate::{EvacNetwork, EvacNetworkBuilder, RoadSegmentSample, VillageTableBuilder};

    /// `A (0,0)` ↔ `B (0,1)`; `B` has one sample `{0, 5, 0.1}`.
    pub fn two_villages() -> (EvacNetwork, [VillageId; 2]) {
        let mut v = VillageTableBuilder::new();
        let a = v.add("A", GeoPoint::new(0.0, 0.0)).unwrap();
        let b = v.add("B", GeoPoint::new(0.0, 1.0)).unwrap();

        let mut nb = EvacNetworkBuilder::new(v.build());
        nb.add_road(a, b).unwrap();
        nb.set_samples(b, vec![RoadSegmentSample::new(0.0, 5.0, 0.1)]).unwrap();
        (nb.build(), [a, b])
    }

    /// Small star around `Hub` with one cross link:
    ///
    /// ```text
    ///   Bacolod ── Hub ── Bobon
    ///               │  ╲
    ///            Carolina ─ Lonoc      (Lonoc has no samples)
    /// ```
    ///
    /// Sample costs: Bacolod 0.1 (one easy segment), Bobon 0.9 + 0.9,
    /// Carolina 0.5.
    pub fn star() -> (EvacNetwork, [VillageId; 5]) {
        let mut v = VillageTableBuilder::new();
        let hub      = v.add("Hub",      GeoPoint::new(10.780, 122.380)).unwrap();
        let bacolod  = v.add("Bacolod",  GeoPoint::new(10.877, 122.307)).unwrap();
        let bobon    = v.add("Bobon",    GeoPoint::new(10.895, 122.297)).unwrap();
        let carolina = v.add("Carolina", GeoPoint::new(10.797, 122.352)).unwrap();
        let lonoc    = v.add("Lonoc",    GeoPoint::new(10.783, 122.342)).unwrap();

        let mut nb = EvacNetworkBuilder::new(v.build());
        nb.add_star(hub).unwrap();
        nb.add_road(carolina, lonoc).unwrap();
        nb.centre(hub).unwrap();

        nb.set_samples(bacolod, vec![RoadSegmentSample::new(-5.0, 0.0, 0.0)]).unwrap();
        nb.set_samples(
            bobon,
            vec![
                RoadSegmentSample::new(5.0, 30.0, 1.0),
                RoadSegmentSample::new(5.0, 30.0, 1.0),
            ],
        )
        .unwrap();
        nb.set_samples(carolina, vec![RoadSegmentSample::new(0.0, 5.0, 0.1)]).unwrap();

        nb.add_distance(bacolod, 19.9).unwrap();
        nb.add_distance(bacolod, 24.7).unwrap();
        nb.add_distance(bacolod, 20.0).unwrap();

        (nb.build(), [hub, bacolod, bobon, carolina, lonoc])
    }
}

// ── Villages ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod villages {
    use ev_core::{EvError, GeoPoint};

    use crate::{matches_query, VillageTableBuilder};

    #[test]
    fn find_is_case_insensitive() {
        let (net, [hub, bacolod, ..]) = super::helpers::star();
        assert_eq!(net.villages().find("hub"), Some(hub));
        assert_eq!(net.villages().find("  BACOLOD "), Some(bacolod));
        assert_eq!(net.villages().find("Baco"), None);
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut b = VillageTableBuilder::new();
        b.add("Gines", GeoPoint::new(0.0, 0.0)).unwrap();
        let err = b.add("gines", GeoPoint::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, EvError::DuplicateVillage(_)));
    }

    #[test]
    fn query_matching_rules() {
        assert!(matches_query("Bacolod", "bacolod"));
        assert!(matches_query("Bacolod", "baco"));
        assert!(matches_query("Bacolod", "Brgy. Bacolod")); // village inside query
        assert!(!matches_query("Bacolod", "Bobon"));
        assert!(!matches_query("Bacolod", ""));
        assert!(!matches_query("Bacolod", "   "));
    }

    #[test]
    fn matching_yields_id_order() {
        let (net, [_, bacolod, bobon, ..]) = super::helpers::star();
        let hits: Vec<_> = net.villages().matching("bo").collect();
        assert_eq!(hits, vec![bacolod, bobon]);
    }

    #[test]
    fn nearest_village() {
        let (net, [hub, _, bobon, ..]) = super::helpers::star();
        assert_eq!(net.villages().nearest(GeoPoint::new(10.781, 122.381)), Some(hub));
        assert_eq!(net.villages().nearest(GeoPoint::new(10.9, 122.29)), Some(bobon));
        assert!(VillageTableBuilder::new().build().nearest(GeoPoint::new(0.0, 0.0)).is_none());
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use ev_core::VillageId;

    use crate::RoadGraphBuilder;

    #[test]
    fn star_is_symmetric() {
        let (net, [hub, bacolod, bobon, carolina, lonoc]) = super::helpers::star();
        let g = net.graph();
        assert_eq!(g.out_degree(hub), 4);
        for v in [bacolod, bobon, carolina, lonoc] {
            assert!(g.has_edge(hub, v));
            assert!(g.has_edge(v, hub));
        }
        assert!(g.has_edge(carolina, lonoc) && g.has_edge(lonoc, carolina));
        assert!(!g.has_edge(bacolod, bobon));
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut b = RoadGraphBuilder::new(4);
        b.add_directed_edge(VillageId(2), VillageId(0));
        b.add_directed_edge(VillageId(0), VillageId(3));
        b.add_directed_edge(VillageId(0), VillageId(1));
        let g = b.build();
        assert_eq!(g.neighbors(VillageId(0)), &[VillageId(3), VillageId(1)]);
        assert_eq!(g.neighbors(VillageId(2)), &[VillageId(0)]);
        assert!(g.neighbors(VillageId(1)).is_empty());
    }

    #[test]
    fn duplicates_self_loops_and_out_of_range_dropped() {
        let mut b = RoadGraphBuilder::new(2);
        b.add_road(VillageId(0), VillageId(1));
        b.add_road(VillageId(0), VillageId(1));
        b.add_directed_edge(VillageId(1), VillageId(1));
        b.add_directed_edge(VillageId(0), VillageId(9));
        let g = b.build();
        assert_eq!(g.edge_count(), 2);
        assert!(g.neighbors(VillageId(9)).is_empty());
    }

    #[test]
    fn builder_rejects_unknown_ids() {
        let mut v = crate::VillageTableBuilder::new();
        let a = v.add("Only", ev_core::GeoPoint::new(0.0, 0.0)).unwrap();
        let mut nb = crate::EvacNetworkBuilder::new(v.build());
        assert!(nb.add_road(a, VillageId(5)).is_err());
        assert!(nb.add_distance(VillageId(5), 1.0).is_err());
    }
}

// ── Edge costs ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod edge_cost {
    use crate::network::{FALLBACK_COST_PER_KM, FALLBACK_SPEED_KMH};

    #[test]
    fn samples_are_summed_not_averaged() {
        let (net, [hub, _, bobon, ..]) = super::helpers::star();
        let model = net.model();
        let expected = model.evaluate(5.0, 30.0, 1.0) + model.evaluate(5.0, 30.0, 1.0);
        let e = net.edge_cost(hub, bobon);
        assert_eq!(e.cost, expected);
        assert_eq!(e.cost, 1.8);
        assert_eq!(e.time_min, 60.0);
    }

    #[test]
    fn cost_is_independent_of_source_when_sampled() {
        let (net, [hub, _, _, carolina, lonoc]) = super::helpers::star();
        assert_eq!(net.edge_cost(hub, carolina), net.edge_cost(lonoc, carolina));
    }

    #[test]
    fn distance_fallback_without_samples() {
        let (net, [hub, .., lonoc]) = super::helpers::star();
        let km = net.villages().pos(hub).distance_km(net.villages().pos(lonoc));
        let e = net.edge_cost(hub, lonoc);
        assert_eq!(e.cost, km * FALLBACK_COST_PER_KM);
        assert_eq!(e.time_min, km / FALLBACK_SPEED_KMH * 60.0);
        assert!((e.time_min - 2.0 * km).abs() < 1e-9);
    }

    #[test]
    fn fallback_ignores_distance_records() {
        // A distance record without samples still costs by haversine.
        use ev_core::GeoPoint;
        use crate::{EvacNetworkBuilder, VillageTableBuilder};

        let mut v = VillageTableBuilder::new();
        let a = v.add("A", GeoPoint::new(0.0, 0.0)).unwrap();
        let b = v.add("B", GeoPoint::new(0.0, 1.0)).unwrap();
        let mut nb = EvacNetworkBuilder::new(v.build());
        nb.add_road(a, b).unwrap();
        nb.add_distance(b, 19.9).unwrap();
        let net = nb.build();

        let km = GeoPoint::new(0.0, 0.0).distance_km(GeoPoint::new(0.0, 1.0));
        assert_eq!(net.edge_cost(a, b).cost, km * 0.5);
    }

    #[test]
    fn aggregate_none_without_samples() {
        let (net, [hub, .., lonoc]) = super::helpers::star();
        assert!(net.aggregate(lonoc).is_none());
        assert!(net.aggregate(hub).is_none());
    }

    #[test]
    fn reported_distance_is_shortest_record() {
        let (net, [hub, bacolod, ..]) = super::helpers::star();
        assert_eq!(net.reported_distance_km(bacolod), Some(19.9));
        assert_eq!(net.distances().alternatives(bacolod), &[19.9, 24.7, 20.0]);
        assert_eq!(net.reported_distance_km(hub), None);
    }

    #[test]
    fn selectable_excludes_centre() {
        let (net, [hub, ..]) = super::helpers::star();
        assert_eq!(net.centre(), Some(hub));
        assert!(net.selectable().all(|v| v != hub));
        assert_eq!(net.selectable().count(), 4);
        assert_eq!(net.segments().villages_with_data(), 3);
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use ev_core::{GeoPoint, VillageId};

    use crate::{
        EvacNetworkBuilder, HaversineHeuristic, Heuristic, RouteKind, RouteSearch,
        RoadSegmentSample, ScaledHaversine, SearchConfig, VillageTableBuilder, ZeroHeuristic,
    };

    #[test]
    fn two_village_scenario() {
        let (net, [a, b]) = super::helpers::two_villages();
        let r = RouteSearch::new(&net).best_route("A", "B").unwrap();
        assert_eq!(r.village, b);
        assert_eq!(r.cost, net.model().evaluate(0.0, 5.0, 0.1));
        assert_eq!(r.time_min, 5.0);
        assert_eq!(r.distance_km, None);
        assert_eq!(r.path, vec![a, b]);
        assert_eq!(r.kind, RouteKind::Graph);
    }

    #[test]
    fn substring_query_resolves() {
        let (net, [hub, bacolod, ..]) = super::helpers::star();
        let r = RouteSearch::new(&net).best_route("Hub", "baco").unwrap();
        assert_eq!(r.village, bacolod);
        assert_eq!(r.path, vec![hub, bacolod]);
        assert_eq!(r.cost, 0.1);
        assert_eq!(r.distance_km, Some(19.9));
    }

    #[test]
    fn unknown_goal_is_no_route() {
        let (net, _) = super::helpers::star();
        assert!(RouteSearch::new(&net).best_route("Hub", "Nowhere").is_none());
    }

    #[test]
    fn unknown_start_is_no_route() {
        let (net, _) = super::helpers::star();
        assert!(RouteSearch::new(&net).best_route("Atlantis", "Bacolod").is_none());
        assert!(RouteSearch::new(&net).best_route_from(VillageId(99), "Bacolod").is_none());
    }

    #[test]
    fn start_equal_to_goal_is_trivial() {
        let (net, [hub, ..]) = super::helpers::star();
        let r = RouteSearch::new(&net).best_route("Hub", "Hub").unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.path, vec![hub]);
        assert_eq!(r.cost, 0.0);
        assert_eq!(r.time_min, 0.0);
    }

    #[test]
    fn picks_cheapest_of_several_matches() {
        // "o" matches Bacolod (0.1), Bobon (1.8), Carolina (0.5), Lonoc.
        let (net, [_, bacolod, ..]) = super::helpers::star();
        let r = RouteSearch::new(&net).best_route("Hub", "o").unwrap();
        assert_eq!(r.village, bacolod);
        assert_eq!(r.cost, 0.1);
    }

    #[test]
    fn candidates_are_all_recorded_and_sorted() {
        let (net, [hub, bacolod, bobon, carolina, _]) = super::helpers::star();
        let all = RouteSearch::with_heuristic(&net, ZeroHeuristic).candidates(hub, "o");
        let villages: Vec<_> = all.iter().map(|c| c.village).collect();
        assert!(villages.contains(&bacolod));
        assert!(villages.contains(&bobon));
        assert!(villages.contains(&carolina));
        for w in all.windows(2) {
            assert!(w[0].cost <= w[1].cost);
        }
    }

    #[test]
    fn scaled_heuristic_scales_great_circle_distance() {
        let (net, [a, b]) = super::helpers::two_villages();
        let km = net.villages().pos(a).distance_km(net.villages().pos(b));
        let h = ScaledHaversine { cost_per_km: 0.25 };
        assert!((h.estimate(&net, a, &[b]) - 0.25 * km).abs() < 1e-12);
        assert_eq!(HaversineHeuristic.estimate(&net, a, &[b]), km);
        assert_eq!(h.estimate(&net, b, &[b]), 0.0);
    }

    #[test]
    fn scaled_heuristic_finds_same_route_as_uniform_cost() {
        let (net, [hub, ..]) = super::helpers::star();
        for query in ["o", "Lonoc", "Bobon"] {
            let scaled = RouteSearch::with_heuristic(&net, ScaledHaversine { cost_per_km: 0.01 })
                .best_route_from(hub, query)
                .unwrap();
            let uniform = RouteSearch::with_heuristic(&net, ZeroHeuristic)
                .best_route_from(hub, query)
                .unwrap();
            assert_eq!(scaled.village, uniform.village, "query {query:?}");
            assert_eq!(scaled.cost, uniform.cost, "query {query:?}");
        }
    }

    #[test]
    fn cross_link_route_through_intermediate() {
        // Lonoc has no samples and is reached from Hub directly (fallback
        // cost) or via Carolina (0.5 + fallback from Carolina).
        let (net, [hub, .., carolina, lonoc]) = super::helpers::star();
        let direct = net.edge_cost(hub, lonoc).cost;
        let via = net.edge_cost(hub, carolina).cost + net.edge_cost(carolina, lonoc).cost;

        let r = RouteSearch::with_heuristic(&net, ZeroHeuristic)
            .best_route("Hub", "Lonoc")
            .unwrap();
        assert_eq!(r.village, lonoc);
        assert_eq!(r.cost, direct.min(via));
        assert_eq!(r.path.first(), Some(&hub));
        assert_eq!(r.path.last(), Some(&lonoc));
    }

    #[test]
    fn unreachable_goal_falls_back_to_direct_samples() {
        let mut v = VillageTableBuilder::new();
        let a = v.add("A", GeoPoint::new(0.0, 0.0)).unwrap();
        let island = v.add("Island", GeoPoint::new(0.0, 1.0)).unwrap();
        let mut nb = EvacNetworkBuilder::new(v.build());
        nb.set_samples(island, vec![RoadSegmentSample::new(0.0, 5.0, 0.1)]).unwrap();
        nb.add_distance(island, 3.5).unwrap();
        let net = nb.build();

        let r = RouteSearch::new(&net).best_route("A", "isl").unwrap();
        assert_eq!(r.kind, RouteKind::Direct);
        assert_eq!(r.village, island);
        assert_eq!(r.cost, 0.5);
        assert_eq!(r.time_min, 5.0);
        assert_eq!(r.distance_km, Some(3.5));
        assert_eq!(r.path, vec![a, island]);
    }

    #[test]
    fn unreachable_goal_without_samples_is_no_route() {
        let mut v = VillageTableBuilder::new();
        v.add("A", GeoPoint::new(0.0, 0.0)).unwrap();
        v.add("Island", GeoPoint::new(0.0, 1.0)).unwrap();
        let net = EvacNetworkBuilder::new(v.build()).build();
        assert!(RouteSearch::new(&net).best_route("A", "Island").is_none());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let (net, _) = super::helpers::star();
        let search = RouteSearch::new(&net);
        let first = search.best_route("Hub", "o");
        for _ in 0..5 {
            assert_eq!(search.best_route("Hub", "o"), first);
        }
    }

    #[test]
    fn expansion_cap_stops_search() {
        let (net, _) = super::helpers::star();
        let r = RouteSearch::new(&net)
            .config(SearchConfig { max_expansions: 1 })
            .best_route("Hub", "Lonoc");
        // Only the start is popped; Lonoc has no samples for the fallback.
        assert!(r.is_none());
    }

    #[test]
    fn ties_break_by_pop_order() {
        // Two goals with identical samples at identical distance from the
        // start: the one pushed first (insertion order) wins.
        let mut v = VillageTableBuilder::new();
        let s = v.add("Start", GeoPoint::new(0.0, 0.0)).unwrap();
        let east = v.add("Twin East", GeoPoint::new(0.0, 0.1)).unwrap();
        let west = v.add("Twin West", GeoPoint::new(0.0, -0.1)).unwrap();
        let mut nb = EvacNetworkBuilder::new(v.build());
        nb.add_road(s, west).unwrap();
        nb.add_road(s, east).unwrap();
        let sample = vec![RoadSegmentSample::new(0.0, 5.0, 0.1)];
        nb.set_samples(east, sample.clone()).unwrap();
        nb.set_samples(west, sample).unwrap();
        let net = nb.build();

        let r = RouteSearch::new(&net).best_route("Start", "twin").unwrap();
        assert_eq!(r.village, west);
    }
}

// ── Snapshot handle ───────────────────────────────────────────────────────────

#[cfg(test)]
mod handle {
    use crate::NetworkHandle;

    #[test]
    fn snapshot_survives_publish() {
        let (two, _) = super::helpers::two_villages();
        let (star, _) = super::helpers::star();

        let handle = NetworkHandle::new(two);
        let before = handle.snapshot();
        let previous = handle.publish(star);

        assert_eq!(before.villages().len(), 2);
        assert_eq!(previous.villages().len(), 2);
        assert_eq!(handle.snapshot().villages().len(), 5);
    }
}
