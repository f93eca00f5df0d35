//! Proximity search over located entities.

/// Anything positioned by a raw (latitude, longitude) pair.
pub trait Located {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
}

/// Planar Euclidean distance over decimal degrees.
///
/// Deliberately not geodesic. Callers rank candidates within a single
/// region, and existing consumers depend on this exact metric and its
/// tie-break, so the formula is part of the service contract.
pub fn euclidean_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    ((lat2 - lat1).powi(2) + (lon2 - lon1).powi(2)).sqrt()
}

/// The candidate closest to `(latitude, longitude)` under
/// [`euclidean_distance`], by linear scan.
///
/// Comparison is strict `<`, so among equidistant candidates the earliest
/// one wins. Returns `None` only for an empty slice.
pub fn nearest<T: Located>(candidates: &[T], latitude: f64, longitude: f64) -> Option<&T> {
    let mut closest = None;
    let mut best = f64::INFINITY;
    for candidate in candidates {
        let distance =
            euclidean_distance(latitude, longitude, candidate.latitude(), candidate.longitude());
        if distance < best {
            best = distance;
            closest = Some(candidate);
        }
    }
    closest
}
