//! Relationship views built from frequency heuristics.
//!
//! None of these look at articles: entities are "related" when their
//! counts are close, and link values are derived from counts alone. They
//! are stand-ins for co-occurrence, not measurements of it.

use crate::models::{
    ActorNetwork, AssociationMatrix, CategoryCounts, EntityCounts, FlowDiagram, FlowLink,
    NetworkEdge, ProximityGraph, RankedEntity,
};
use rand::Rng;

use super::aggregator::top_n;

/// Relative distance under which two counts are considered close.
pub const PROXIMITY_TOLERANCE: f64 = 0.8;

/// Persons of the actor network that may be linked to each other.
const NETWORK_LINK_CANDIDATES: usize = 10;

/// Share of the smaller count used as actor network edge weight.
const NETWORK_WEIGHT_FACTOR: f64 = 0.1;

/// Edges at or below this weight are dropped.
const NETWORK_MIN_WEIGHT: f64 = 5.0;

/// Range of the scaling factor applied to association matrix cells.
const ASSOCIATION_FACTOR: std::ops::Range<f64> = 0.1..0.5;

/// `candidate` is within the tolerance of `center`, strictly.
fn is_frequency_neighbor(center: u64, candidate: u64) -> bool {
    (candidate.abs_diff(center) as f64) < center as f64 * PROXIMITY_TOLERANCE
}

/// Connect `center` to entities with similar counts.
///
/// Candidates are the `candidate_pool` highest counts; eligible ones are
/// kept in descending count order up to `max_neighbors`. An absent center
/// has count 0 and therefore no neighbours.
pub fn proximity_graph(
    counts: &EntityCounts,
    center: &str,
    candidate_pool: usize,
    max_neighbors: usize,
) -> ProximityGraph {
    let center_count = counts.get(center).copied().unwrap_or(0);

    let neighbors = top_n(counts, candidate_pool)
        .into_iter()
        .filter(|c| c.entity != center && is_frequency_neighbor(center_count, c.count))
        .take(max_neighbors)
        .collect();

    ProximityGraph {
        center: center.to_string(),
        center_count,
        neighbors,
    }
}

/// Network of the top `size` persons.
///
/// Only the first ten persons can be linked; an edge weighs a tenth of the
/// smaller count and is kept above a weight of 5.
pub fn actor_network(persons: &EntityCounts, size: usize) -> ActorNetwork {
    let nodes = top_n(persons, size);
    let linked = &nodes[..nodes.len().min(NETWORK_LINK_CANDIDATES)];

    let mut edges = Vec::new();
    for (i, a) in linked.iter().enumerate() {
        for b in &linked[i + 1..] {
            let weight = a.count.min(b.count) as f64 * NETWORK_WEIGHT_FACTOR;
            if weight > NETWORK_MIN_WEIGHT {
                edges.push(NetworkEdge {
                    source: a.entity.clone(),
                    target: b.entity.clone(),
                    weight,
                });
            }
        }
    }

    ActorNetwork { nodes, edges }
}

/// Flow diagram from top persons to top locations.
///
/// Nodes are the persons followed by the locations. Person `i` flows into
/// the first `fanout` locations with value `count × (0.5 − 0.15·j)`;
/// non-positive values are dropped.
pub fn actor_flows(counts: &CategoryCounts, size: usize, fanout: usize) -> FlowDiagram {
    let actors = top_n(&counts.persons, size);
    let locations = top_n(&counts.locations, size);

    let mut links = Vec::new();
    for (i, actor) in actors.iter().enumerate() {
        for j in 0..fanout.min(locations.len()) {
            let value = actor.count as f64 * (0.5 - j as f64 * 0.15);
            if value > 0.0 {
                links.push(FlowLink {
                    source: i,
                    target: actors.len() + j,
                    value,
                });
            }
        }
    }

    let nodes = actors
        .into_iter()
        .chain(locations)
        .map(|e| e.entity)
        .collect();

    FlowDiagram { nodes, links }
}

/// Actor × location matrix of `min(actor, location) × factor`.
///
/// The factor is drawn uniformly from `[0.1, 0.5)` per cell, so the result is
/// non-deterministic unless `rng` is seeded.
pub fn association_matrix<R: Rng + ?Sized>(
    actors: &[RankedEntity],
    locations: &[RankedEntity],
    rng: &mut R,
) -> AssociationMatrix {
    let values = actors
        .iter()
        .map(|actor| {
            locations
                .iter()
                .map(|loc| actor.count.min(loc.count) as f64 * rng.random_range(ASSOCIATION_FACTOR))
                .collect()
        })
        .collect();

    AssociationMatrix {
        actors: actors.iter().map(|a| a.entity.clone()).collect(),
        locations: locations.iter().map(|l| l.entity.clone()).collect(),
        values,
    }
}
