//! Gauss quadrature rules on the reference triangle
//!
//! Points are given in area coordinates (L1, L2, L3) with L1 + L2 + L3 = 1.
//! Weights sum to one, so an integral over an element is
//! `Σ f(Lᵢ) · wᵢ · detJ · ½` with detJ = 2 × area.

/// A quadrature point in area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriGaussPoint {
    /// Area coordinates (L1, L2, L3)
    pub coords: [f64; 3],
    /// Integration weight (normalised, rule weights sum to 1)
    pub weight: f64,
}

impl TriGaussPoint {
    pub const fn new(coords: [f64; 3], weight: f64) -> Self {
        Self { coords, weight }
    }

    /// ξ = L2
    #[inline]
    pub fn xi(&self) -> f64 {
        self.coords[1]
    }

    /// η = L3
    #[inline]
    pub fn eta(&self) -> f64 {
        self.coords[2]
    }
}

/// 3-point interior rule, exact for quadratics (used for DKT bending stiffness)
pub fn gauss_tri_3() -> [TriGaussPoint; 3] {
    let a = 2.0 / 3.0;
    let b = 1.0 / 6.0;
    let w = 1.0 / 3.0;
    [
        TriGaussPoint::new([a, b, b], w),
        TriGaussPoint::new([b, a, b], w),
        TriGaussPoint::new([b, b, a], w),
    ]
}

/// 7-point rule, exact for quintics (used for the consistent mass matrix)
pub fn gauss_tri_7() -> [TriGaussPoint; 7] {
    let a1 = 0.059_715_871_789_770;
    let b1 = 0.470_142_064_105_115;
    let w1 = 0.132_394_152_788_506;

    let a2 = 0.797_426_985_353_087;
    let b2 = 0.101_286_507_323_456;
    let w2 = 0.125_939_180_544_827;

    let third = 1.0 / 3.0;

    [
        TriGaussPoint::new([third, third, third], 0.225),
        TriGaussPoint::new([a1, b1, b1], w1),
        TriGaussPoint::new([b1, a1, b1], w1),
        TriGaussPoint::new([b1, b1, a1], w1),
        TriGaussPoint::new([a2, b2, b2], w2),
        TriGaussPoint::new([b2, a2, b2], w2),
        TriGaussPoint::new([b2, b2, a2], w2),
    ]
}
