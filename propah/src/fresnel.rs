use num_traits::{AsPrimitive, Float};

/// Speed of light in m/s
const C: usize = 299_792_458;

/// Returns the wavelength (meters) of `freq_hz`.
pub fn freq_to_wavelen<T>(freq_hz: T) -> T
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    C.as_() / freq_hz
}

/// Returns the radius of the `zone`th fresnel zone at `d1` meters
/// along a path `total` meters long.
pub fn fresnel<T: Float>(zone: T, wavelen: T, d1: T, total: T) -> T {
    if total <= T::zero() {
        return T::zero();
    }
    let d2 = (total - d1).max(T::zero());
    (zone * wavelen * d1 * d2 / total).sqrt()
}
