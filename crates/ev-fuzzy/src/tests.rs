//! Unit tests for ev-fuzzy.

#[cfg(test)]
mod triangle {
    use crate::Triangle;

    #[test]
    fn peak_and_feet() {
        let t = Triangle::new(-2.0, 0.0, 2.0);
        assert_eq!(t.degree(0.0), 1.0);
        assert_eq!(t.degree(-2.0), 0.0);
        assert_eq!(t.degree(2.0), 0.0);
        assert_eq!(t.degree(1.0), 0.5);
        assert_eq!(t.degree(-1.0), 0.5);
        assert_eq!(t.degree(5.0), 0.0);
    }

    #[test]
    fn left_shoulder_reaches_one() {
        let fast = Triangle::new(0.0, 0.0, 10.0);
        assert_eq!(fast.degree(0.0), 1.0);
        assert_eq!(fast.degree(5.0), 0.5);
        assert_eq!(fast.degree(10.0), 0.0);
        assert_eq!(fast.degree(-1.0), 0.0);
    }

    #[test]
    fn right_shoulder_reaches_one() {
        let slow = Triangle::new(20.0, 30.0, 30.0);
        assert_eq!(slow.degree(30.0), 1.0);
        assert_eq!(slow.degree(25.0), 0.5);
        assert_eq!(slow.degree(31.0), 0.0);
    }
}

#[cfg(test)]
mod universe {
    use crate::Universe;

    #[test]
    fn standard_grid_sizes() {
        assert_eq!(Universe::new(-10.0, 10.0, 10).len(), 201);
        assert_eq!(Universe::new(0.0, 30.0, 1).len(), 31);
        assert_eq!(Universe::new(0.0, 1.0, 100).len(), 101);
    }

    #[test]
    fn grid_points_are_exact() {
        let u = Universe::new(-10.0, 10.0, 10);
        assert_eq!(u.start(), -10.0);
        assert_eq!(u.stop(), 10.0);
        assert_eq!(u.point(50), -5.0);
        assert_eq!(u.point(100), 0.0);

        let c = Universe::new(0.0, 1.0, 100);
        assert_eq!(c.point(10), 0.1);
        assert_eq!(c.point(50), 0.5);
    }
}

#[cfg(test)]
mod interpolation {
    use crate::interp_membership;

    const XS: [f64; 3] = [0.0, 1.0, 2.0];
    const YS: [f64; 3] = [0.0, 1.0, 0.0];

    #[test]
    fn on_grid_points() {
        assert_eq!(interp_membership(&XS, &YS, 0.0), 0.0);
        assert_eq!(interp_membership(&XS, &YS, 1.0), 1.0);
        assert_eq!(interp_membership(&XS, &YS, 2.0), 0.0);
    }

    #[test]
    fn between_grid_points() {
        assert_eq!(interp_membership(&XS, &YS, 0.5), 0.5);
        assert_eq!(interp_membership(&XS, &YS, 1.25), 0.75);
    }

    #[test]
    fn outside_is_zero() {
        let ys = [1.0, 1.0, 1.0];
        assert_eq!(interp_membership(&XS, &ys, -0.01), 0.0);
        assert_eq!(interp_membership(&XS, &ys, 2.01), 0.0);
        assert_eq!(interp_membership(&XS, &ys, f64::NAN), 0.0);
    }

    #[test]
    fn empty_grid_is_zero() {
        assert_eq!(interp_membership(&[], &[], 0.0), 0.0);
    }
}

#[cfg(test)]
mod model {
    use crate::{FuzzyCostModel, HIGH_RISK_CEILING};

    #[test]
    fn gentle_fast_straight_is_low_risk() {
        let m = FuzzyCostModel::default();
        let r = m.rules(-5.0, 0.0, 0.0);
        assert_eq!(r.low, 0.1);
        assert_eq!(r.medium, 0.0);
        assert_eq!(r.high, 0.0);
        assert_eq!(m.evaluate(-5.0, 0.0, 0.0), 0.1);
    }

    #[test]
    fn flat_road_is_medium_risk() {
        // slope 0 is fully MEDIUM; the medium rule saturates at its ceiling.
        let m = FuzzyCostModel::default();
        assert_eq!(m.evaluate(0.0, 5.0, 0.1), 0.5);
    }

    #[test]
    fn steep_slow_winding_is_capped_high() {
        let m = FuzzyCostModel::default();
        assert_eq!(m.evaluate(5.0, 30.0, 1.0), HIGH_RISK_CEILING);
    }

    #[test]
    fn partial_membership_passes_through() {
        // slope 7.5 → HIGH 0.5; time 0 → AVERAGE 0, SLOW 0; curvature 0 → all
        // non-LOW sets 0.  High rule = 0.5, medium = 0.
        let m = FuzzyCostModel::default();
        let r = m.rules(7.5, 0.0, 0.0);
        assert!((r.high - 0.5).abs() < 1e-12, "{r:?}");
        assert_eq!(r.medium, 0.0);
    }

    #[test]
    fn interpolates_between_grid_points() {
        // 7.5 min: FAST is 0.3 at 7 and 0.2 at 8 → 0.25.
        let m = FuzzyCostModel::default();
        let g = m.travel_time().fuzzify(7.5);
        assert!((g.low - 0.25).abs() < 1e-12, "{g:?}");
        assert!((g.medium - 0.25).abs() < 1e-12, "{g:?}");
    }

    #[test]
    fn out_of_domain_inputs_have_no_membership() {
        let m = FuzzyCostModel::default();
        assert_eq!(m.evaluate(50.0, 120.0, 3.0), 0.0);
        assert_eq!(m.evaluate(-11.0, -1.0, -0.5), 0.0);
    }

    #[test]
    fn one_input_out_of_domain_degrades_to_the_others() {
        // Travel time far outside [0, 30] contributes nothing; the flat slope
        // still fires the medium rule.
        let m = FuzzyCostModel::default();
        assert_eq!(m.evaluate(0.0, 45.0, 0.1), 0.5);
    }

    #[test]
    fn cost_stays_in_range_over_nominal_domain() {
        let m = FuzzyCostModel::default();
        let mut slope = -10.0;
        while slope <= 10.0 {
            let mut time = 0.0;
            while time <= 30.0 {
                for k in 0..=20 {
                    let curv = k as f64 * 0.05;
                    let c = m.evaluate(slope, time, curv);
                    assert!((0.0..=0.9).contains(&c), "evaluate({slope}, {time}, {curv}) = {c}");
                }
                time += 2.5;
            }
            slope += 0.7;
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let a = FuzzyCostModel::default();
        let b = FuzzyCostModel::default();
        for &(s, t, c) in &[(1.3, 12.7, 0.42), (-3.3, 4.0, 0.9), (9.99, 29.5, 0.01)] {
            let first = a.evaluate(s, t, c);
            assert_eq!(first.to_bits(), a.evaluate(s, t, c).to_bits());
            assert_eq!(first.to_bits(), b.evaluate(s, t, c).to_bits());
        }
    }
}
