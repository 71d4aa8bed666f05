//! Single knife-edge diffraction.
//!
//! # References
//!
//! 1. ITU-R P.526, section 4.1
//! 1. [Link loss](http://wireless.ictp.trieste.it/school_2002/labo/linkloss/index.html)

/// Obstructions with `v` at or below this cause no loss.
const V_THRESHOLD: f64 = -0.78;

/// Returns the Fresnel-Kirchhoff diffraction parameter `v` of an edge
/// at `edge_elev` meters, `d1` meters from a transmitter at
/// `start_elev` and `d2` meters from a receiver at `end_elev`.
///
/// `v` is positive when the edge rises above the line of sight and
/// negative when it lies below.
pub fn fresnel_kirchhoff(start_elev: f64, end_elev: f64, edge_elev: f64, d1: f64, d2: f64, wavelen: f64) -> f64 {
    let direct = (d1 + d2).hypot(end_elev - start_elev);
    let via_edge = d1.hypot(edge_elev - start_elev) + d2.hypot(edge_elev - end_elev);
    let excess = (via_edge - direct).max(0.0);
    let v = 2.0 * (excess / wavelen).sqrt();

    let sight = start_elev + (end_elev - start_elev) * d1 / (d1 + d2);
    if edge_elev < sight {
        -v
    } else {
        v
    }
}

/// Returns the diffraction loss (dB) for parameter `v`.
pub fn knife_edge_loss(v: f64) -> f64 {
    if v <= V_THRESHOLD {
        0.0
    } else {
        6.9 + 20.0 * (((v - 0.1).powi(2) + 1.0).sqrt() + v - 0.1).log10()
    }
}

#[cfg(test)]
mod tests {
    use super::{fresnel_kirchhoff, knife_edge_loss};
    use crate::fresnel::{freq_to_wavelen, fresnel};
    use approx::assert_relative_eq;

    #[test]
    fn test_loss_curve() {
        assert_eq!(knife_edge_loss(-1.0), 0.0);
        assert_eq!(knife_edge_loss(-0.78), 0.0);
        // Grazing incidence.
        assert_relative_eq!(knife_edge_loss(0.0), 6.03, epsilon = 0.01);
        assert_relative_eq!(knife_edge_loss(1.0), 13.9257, epsilon = 1e-4);
        assert!(knife_edge_loss(2.0) > knife_edge_loss(1.0));
    }

    #[test]
    fn test_v_matches_clearance_form() {
        // v = h * sqrt(2 d / (λ d1 d2)) for small angles.
        let wavelen = freq_to_wavelen(900e6);
        let (d1, d2): (f64, f64) = (1_200.0, 2_300.0);
        for h in [-8.0, -3.0, 2.5, 6.0] {
            let expected = h * (2.0 * (d1 + d2) / (wavelen * d1 * d2)).sqrt();
            let v = fresnel_kirchhoff(1500.0, 1500.0, 1500.0 + h, d1, d2, wavelen);
            assert_relative_eq!(v, expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_first_zone_edge() {
        // An edge at the bottom of the first fresnel zone sits at
        // v = -√2.
        let wavelen = freq_to_wavelen(900e6);
        let (d1, d2): (f64, f64) = (1_500.0, 1_500.0);
        let r = fresnel(1.0, wavelen, d1, d1 + d2);
        let v = fresnel_kirchhoff(1510.0, 1510.0, 1510.0 - r, d1, d2, wavelen);
        assert_relative_eq!(v, -std::f64::consts::SQRT_2, epsilon = 1e-4);
        assert_eq!(knife_edge_loss(v), 0.0);
    }
}
