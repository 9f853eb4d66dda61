//! Newtonian acceleration with collision detection.

use nbody_core::vector;

use crate::error::Collision;
use crate::field::{Acceleration, Position};
use crate::matrices::{GravitationalParameters, SafeDistances};
use crate::state::{Derivative, State};

/// Accelerations of all bodies at `position`.
///
/// Fails as soon as any pair is closer than its safe distance; no partial result is
/// returned in that case.
pub fn acceleration<const D: usize, const N: usize>(
    position: &Position<D, N>,
    gm: &GravitationalParameters<N>,
    safe: &SafeDistances<N>,
) -> Result<Acceleration<D, N>, Collision> {
    let mut out = Acceleration::<D, N>::zeros();

    // Each unordered pair once; i pulled along +r, j along -r
    for i in 0..N {
        let xi = position.body(i);
        for j in (i + 1)..N {
            let r = vector::sub(&position.body(j), &xi);
            let distance = vector::norm(&r);
            let limit = safe.get(i, j);
            if distance < limit {
                return Err(Collision::between(i, j, distance, limit));
            }

            let inv_r3 = (distance * distance * distance).recip();
            let toward_j = gm.get(i, j) * inv_r3;
            let toward_i = gm.get(j, i) * inv_r3;
            for (d, component) in r.iter().enumerate() {
                out[(d, i)] += toward_j * component;
                out[(d, j)] -= toward_i * component;
            }
        }
    }

    Ok(out)
}

/// Full time derivative of `state`: its own velocity and the gravitational acceleration.
pub fn derivative<const D: usize, const N: usize>(
    state: &State<D, N>,
    gm: &GravitationalParameters<N>,
    safe: &SafeDistances<N>,
) -> Result<Derivative<D, N>, Collision> {
    Ok(Derivative {
        velocity: state.velocity,
        acceleration: acceleration(&state.position, gm, safe)?,
    })
}
