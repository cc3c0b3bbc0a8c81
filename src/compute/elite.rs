//! Elite selection - periodic random promotion of alive cells to immortals.

use rand::Rng;

use super::GridState;

/// Recompute the immortal set from scratch.
///
/// Every alive cell draws one uniform value in `[0, 1)` (row-major order) and
/// becomes immortal when the draw is below `elite_fraction`. Dead cells are
/// never marked. With a zero fraction the status is cleared without drawing.
pub fn refresh_status<R: Rng + ?Sized>(grid: &mut GridState, elite_fraction: f64, rng: &mut R) {
    if elite_fraction <= 0.0 {
        grid.status_mut().fill(0);
        return;
    }

    let (state, status) = grid.state_and_status_mut();
    for (status, &cell) in status.iter_mut().zip(state) {
        *status = if cell == 1 {
            u8::from(rng.gen_range(0.0..1.0) < elite_fraction)
        } else {
            0
        };
    }

    log::debug!(
        "Refreshed elite status at generation {}: {} immortal of {} alive",
        grid.generation(),
        grid.count_immortal(),
        grid.count_alive()
    );
}
