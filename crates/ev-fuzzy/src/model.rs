//! Slope / travel-time / curvature risk model.
//!
//! # Rules
//!
//! ```text
//! low    = min(slope.low,  time.fast,    curv.low,    0.1)
//! medium = min(max(slope.medium, time.average, curv.medium), 0.5)
//! high   = min(max(slope.high,   time.slow,    curv.high),   0.9)
//! cost   = max(low, medium, high)
//! ```
//!
//! There is no centroid defuzzification: the capped maximum is used directly
//! as the crisp cost.  Route comparisons downstream depend on these exact
//! values, including the 0.1 / 0.5 / 0.9 ceilings.

use crate::membership::{Triangle, Universe};
use crate::variable::{Grades, LinguisticVariable};

pub const LOW_RISK_CEILING:    f64 = 0.1;
pub const MEDIUM_RISK_CEILING: f64 = 0.5;
pub const HIGH_RISK_CEILING:   f64 = 0.9;

/// Clipped output of each rule for one evaluation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleOutputs {
    pub low:    f64,
    pub medium: f64,
    pub high:   f64,
}

impl RuleOutputs {
    /// The crisp cost: maximum of the three rule outputs.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.low.max(self.medium.max(self.high))
    }
}

/// The fuzzy cost model.  Build once and share; evaluation is pure.
#[derive(Clone, Debug)]
pub struct FuzzyCostModel {
    slope:       LinguisticVariable,
    travel_time: LinguisticVariable,
    curvature:   LinguisticVariable,
}

impl FuzzyCostModel {
    pub fn new(
        slope: LinguisticVariable,
        travel_time: LinguisticVariable,
        curvature: LinguisticVariable,
    ) -> Self {
        Self { slope, travel_time, curvature }
    }

    /// Slope in degrees: LOW(-10,-5,0) MEDIUM(-2,0,2) HIGH(0,5,10) on
    /// `[-10, 10]` step 0.1.
    pub fn standard_slope() -> LinguisticVariable {
        LinguisticVariable::new(
            "slope",
            &Universe::new(-10.0, 10.0, 10),
            Triangle::new(-10.0, -5.0, 0.0),
            Triangle::new(-2.0, 0.0, 2.0),
            Triangle::new(0.0, 5.0, 10.0),
        )
    }

    /// Travel time in minutes: FAST(0,0,10) AVERAGE(5,15,25) SLOW(20,30,30)
    /// on `[0, 30]` step 1.
    pub fn standard_travel_time() -> LinguisticVariable {
        LinguisticVariable::new(
            "travel_time",
            &Universe::new(0.0, 30.0, 1),
            Triangle::new(0.0, 0.0, 10.0),
            Triangle::new(5.0, 15.0, 25.0),
            Triangle::new(20.0, 30.0, 30.0),
        )
    }

    /// Unitless curvature: LOW(0,0,0.5) MEDIUM(0.2,0.5,0.8) HIGH(0.5,1,1) on
    /// `[0, 1]` step 0.01.
    pub fn standard_curvature() -> LinguisticVariable {
        LinguisticVariable::new(
            "curvature",
            &Universe::new(0.0, 1.0, 100),
            Triangle::new(0.0, 0.0, 0.5),
            Triangle::new(0.2, 0.5, 0.8),
            Triangle::new(0.5, 1.0, 1.0),
        )
    }

    pub fn slope(&self) -> &LinguisticVariable {
        &self.slope
    }

    pub fn travel_time(&self) -> &LinguisticVariable {
        &self.travel_time
    }

    pub fn curvature(&self) -> &LinguisticVariable {
        &self.curvature
    }

    /// Fuzzify the three inputs and fire the rules.
    pub fn rules(&self, slope: f64, travel_time: f64, curvature: f64) -> RuleOutputs {
        let s = self.slope.fuzzify(slope);
        let t = self.travel_time.fuzzify(travel_time);
        let c = self.curvature.fuzzify(curvature);
        fire(s, t, c)
    }

    /// Crisp risk cost in `[0, 0.9]`.
    #[inline]
    pub fn evaluate(&self, slope: f64, travel_time: f64, curvature: f64) -> f64 {
        self.rules(slope, travel_time, curvature).cost()
    }
}

impl Default for FuzzyCostModel {
    fn default() -> Self {
        Self::new(
            Self::standard_slope(),
            Self::standard_travel_time(),
            Self::standard_curvature(),
        )
    }
}

fn fire(s: Grades, t: Grades, c: Grades) -> RuleOutputs {
    RuleOutputs {
        low:    s.low.min(t.low).min(c.low).min(LOW_RISK_CEILING),
        medium: s.medium.max(t.medium).max(c.medium).min(MEDIUM_RISK_CEILING),
        high:   s.high.max(t.high).max(c.high).min(HIGH_RISK_CEILING),
    }
}
