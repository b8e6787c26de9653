//! Greedy cargo distribution
//!
//! First-fit over vehicles sorted by descending capacity, with VIP clients
//! served first. Vehicles that already carry cargo are always tried before a
//! new one is opened. There is no backtracking: once a client is placed it
//! stays there for the rest of the run.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::{Client, Vehicle, VehicleId};

/// Result of one distribution run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionOutcome {
    /// Vehicles that received at least one client, in activation order
    pub active: Vec<VehicleId>,
    /// Clients whose cargo fit in no vehicle
    pub unassigned: Vec<Client>,
}

impl DistributionOutcome {
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }
}

/// Client positions in service order: VIP tier first, insertion order within a tier
pub fn priority_order(clients: &[Client]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..clients.len()).collect();
    // sort_by_key is stable
    order.sort_by_key(|&i| !clients[i].is_vip());
    order
}

/// Vehicle positions by descending capacity, insertion order on ties
pub fn capacity_order(vehicles: &[Vehicle]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..vehicles.len()).collect();
    order.sort_by(|&a, &b| vehicles[b].capacity().total_cmp(&vehicles[a].capacity()));
    order
}

/// Reset every vehicle and assign `clients` to `vehicles`
pub fn distribute(clients: &[Client], vehicles: &mut [Vehicle]) -> DistributionOutcome {
    let client_order = priority_order(clients);
    let vehicle_order = capacity_order(vehicles);

    for vehicle in vehicles.iter_mut() {
        vehicle.reset();
    }

    let mut active: Vec<usize> = Vec::new();
    let mut unassigned = Vec::new();

    for &ci in &client_order {
        let client = &clients[ci];
        let weight = client.cargo_weight();

        // Already active vehicles first, then the largest idle one that fits
        let mut target = active
            .iter()
            .copied()
            .find(|&vi| vehicles[vi].can_load(weight));
        let mut opens_vehicle = false;
        if target.is_none() {
            target = vehicle_order
                .iter()
                .copied()
                .find(|vi| !active.contains(vi) && vehicles[*vi].can_load(weight));
            opens_vehicle = target.is_some();
        }

        match target {
            Some(vi) => {
                if let Err(e) = vehicles[vi].load_cargo(client) {
                    warn!(client = client.name(), error = %e, "Unexpected overload");
                    unassigned.push(client.clone());
                    continue;
                }
                // Activation only after a successful load
                if opens_vehicle {
                    active.push(vi);
                }
                debug!(
                    client = client.name(),
                    vehicle = %vehicles[vi].id(),
                    load = vehicles[vi].current_load,
                    "Assigned cargo"
                );
            }
            None => {
                warn!(
                    "Cargo of client {} ({}t) did not fit in any vehicle",
                    client.name(),
                    weight
                );
                unassigned.push(client.clone());
            }
        }
    }

    info!(
        clients = clients.len(),
        vehicles_used = active.len(),
        unassigned = unassigned.len(),
        "Distribution finished"
    );

    DistributionOutcome {
        active: active.iter().map(|&vi| vehicles[vi].id().clone()).collect(),
        unassigned,
    }
}
