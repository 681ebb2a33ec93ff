/*!
 * Allocation Pass
 * Single-pass, in-order servicing of workload memory requests
 */

use super::arena::MemoryArena;
use super::types::{MemoryRequest, PlacementStrategy};
use log::{info, warn};

/// Service `requests` strictly in workload order: one placement attempt per
/// request, no retry, no reordering. An unsatisfied request keeps
/// `block = None` and the pass continues; shortfall is an expected outcome,
/// not a failure of the run.
pub fn assign_requests(
    arena: &mut MemoryArena,
    strategy: PlacementStrategy,
    requests: &mut [MemoryRequest],
) {
    for request in requests.iter_mut() {
        match arena.find(strategy, request.size) {
            Some(index) => {
                let id = arena.split_and_allocate(index, request.pid, request.size);
                request.block = Some(id);
                info!(
                    "Placed {} bytes for pid {} in block {} ({})",
                    request.size, request.pid, id, strategy
                );
            }
            None => {
                warn!(
                    "No free block can hold {} bytes for pid {} ({}); request left unsatisfied",
                    request.size, request.pid, strategy
                );
            }
        }
    }
}
