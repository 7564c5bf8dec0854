use std::collections::VecDeque;

use thiserror::Error;
use uom::ConstZero;
use uom::si::f64::{HeatCapacity, Power, ThermodynamicTemperature};
use uom::si::thermodynamic_temperature::kelvin;

use crate::support::constraint::{ConstraintError, NonNegative, StrictlyPositive};
use crate::support::units::ThermalResistance;

use super::{Boundary, BoundaryId, Endpoint, Link, Network, Node, NodeId, Saturation};

/// Smallest heat capacity a node may carry, in J/K.
///
/// Below this the temperature rate `Q / C` is dominated by floating-point
/// noise rather than physics, so such capacities are rejected up front.
const MIN_CAPACITY: f64 = 1e-6;

/// An error found while assembling a [`Network`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("network has no nodes")]
    Empty,
    #[error("identifier does not belong to this builder")]
    UnknownId,
    #[error("node `{label}` needs a strictly positive heat capacity")]
    InvalidCapacity {
        label: String,
        #[source]
        source: ConstraintError,
    },
    #[error("heat capacity of node `{label}` is outside the solvable range")]
    CapacityOutOfRange { label: String },
    #[error("initial temperature of node `{label}` must be a finite absolute temperature")]
    InvalidInitialTemperature { label: String },
    #[error("temperature of boundary `{label}` must be a finite absolute temperature")]
    InvalidBoundaryTemperature { label: String },
    #[error("saturation threshold for node `{label}` must be a finite absolute temperature")]
    InvalidSaturation { label: String },
    #[error("heat input for node `{label}` must be non-negative")]
    InvalidHeatInput {
        label: String,
        #[source]
        source: ConstraintError,
    },
    #[error("link between `{a}` and `{b}` needs a strictly positive resistance")]
    InvalidResistance {
        a: String,
        b: String,
        #[source]
        source: ConstraintError,
    },
    #[error("`{label}` cannot be linked to itself")]
    SelfLink { label: String },
    #[error("boundaries `{a}` and `{b}` cannot be linked; only nodes store energy")]
    BoundaryToBoundary { a: String, b: String },
    #[error("`{a}` and `{b}` are already linked; merge parallel paths into one resistance first")]
    DuplicateLink { a: String, b: String },
    #[error("node `{label}` has no links")]
    UnlinkedNode { label: String },
    #[error("node `{label}` cannot exchange heat with any boundary")]
    UnreachableNode { label: String },
}

#[derive(Debug, Clone)]
struct NodeSpec {
    label: String,
    capacity: HeatCapacity,
    initial: ThermodynamicTemperature,
    saturation: Option<Saturation>,
    heat_input: Power,
}

#[derive(Debug, Clone)]
struct BoundarySpec {
    label: String,
    temperature: ThermodynamicTemperature,
}

/// Builds a validated [`Network`] incrementally.
///
/// Nodes, boundaries, and links are added one at a time, each checked as it
/// arrives; structural checks that need the whole picture (connectivity,
/// boundary reachability) run in [`build`](Self::build). Identifiers are
/// issued in insertion order, so assembling the same description twice yields
/// the same network, node for node.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    nodes: Vec<NodeSpec>,
    boundaries: Vec<BoundarySpec>,
    links: Vec<Link>,
}

impl NetworkBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a thermal mass with the given heat capacity and starting
    /// temperature.
    ///
    /// The label only appears in error messages and need not be unique.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is not strictly positive, is too
    /// small to integrate against, or the temperature is not a finite
    /// absolute temperature.
    pub fn add_node(
        &mut self,
        label: impl Into<String>,
        capacity: HeatCapacity,
        initial: ThermodynamicTemperature,
    ) -> Result<NodeId, BuildError> {
        let label = label.into();

        if let Err(source) = StrictlyPositive::new(capacity) {
            return Err(BuildError::InvalidCapacity { label, source });
        }
        if !capacity.value.is_finite() || capacity.value < MIN_CAPACITY {
            return Err(BuildError::CapacityOutOfRange { label });
        }
        if !is_absolute_temperature(initial) {
            return Err(BuildError::InvalidInitialTemperature { label });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSpec {
            label,
            capacity,
            initial,
            saturation: None,
            heat_input: Power::ZERO,
        });
        Ok(id)
    }

    /// Adds a fixed-temperature boundary, such as a heating plate surface or
    /// the ambient air.
    ///
    /// # Errors
    ///
    /// Returns an error if the temperature is not a finite absolute
    /// temperature.
    pub fn add_boundary(
        &mut self,
        label: impl Into<String>,
        temperature: ThermodynamicTemperature,
    ) -> Result<BoundaryId, BuildError> {
        let label = label.into();

        if !is_absolute_temperature(temperature) {
            return Err(BuildError::InvalidBoundaryTemperature { label });
        }

        let id = BoundaryId(self.boundaries.len());
        self.boundaries.push(BoundarySpec { label, temperature });
        Ok(id)
    }

    /// Attaches a phase-change plateau to a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or the threshold is not a
    /// finite absolute temperature.
    pub fn set_saturation(
        &mut self,
        node: NodeId,
        saturation: Saturation,
    ) -> Result<(), BuildError> {
        if node.0 >= self.nodes.len() {
            return Err(BuildError::UnknownId);
        }
        if !is_absolute_temperature(saturation.threshold) {
            return Err(BuildError::InvalidSaturation {
                label: self.nodes[node.0].label.clone(),
            });
        }

        self.nodes[node.0].saturation = Some(saturation);
        Ok(())
    }

    /// Applies a direct heat input to a node, independent of any link.
    ///
    /// Nodes start with zero heat input; calling this again replaces the
    /// previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or the power is negative.
    pub fn set_heat_input(&mut self, node: NodeId, power: Power) -> Result<(), BuildError> {
        if node.0 >= self.nodes.len() {
            return Err(BuildError::UnknownId);
        }
        if let Err(source) = NonNegative::new(power) {
            return Err(BuildError::InvalidHeatInput {
                label: self.nodes[node.0].label.clone(),
                source,
            });
        }

        self.nodes[node.0].heat_input = power;
        Ok(())
    }

    /// Joins two endpoints with the total resistance of the path between
    /// them.
    ///
    /// Each unordered pair may be linked at most once. When two physical
    /// paths join the same pair, merge them with
    /// [`resistance::parallel`](super::resistance::parallel) before linking.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is unknown, the endpoints are the
    /// same, both are boundaries, the pair is already linked, or the
    /// resistance is not strictly positive.
    pub fn link(
        &mut self,
        a: impl Into<Endpoint>,
        b: impl Into<Endpoint>,
        resistance: ThermalResistance,
    ) -> Result<(), BuildError> {
        let a = a.into();
        let b = b.into();

        if !self.contains(a) || !self.contains(b) {
            return Err(BuildError::UnknownId);
        }
        if a == b {
            return Err(BuildError::SelfLink {
                label: self.endpoint_label(a).to_owned(),
            });
        }
        if let (Endpoint::Boundary(_), Endpoint::Boundary(_)) = (a, b) {
            return Err(BuildError::BoundaryToBoundary {
                a: self.endpoint_label(a).to_owned(),
                b: self.endpoint_label(b).to_owned(),
            });
        }
        if self
            .links
            .iter()
            .any(|link| (link.a == a && link.b == b) || (link.a == b && link.b == a))
        {
            return Err(BuildError::DuplicateLink {
                a: self.endpoint_label(a).to_owned(),
                b: self.endpoint_label(b).to_owned(),
            });
        }

        let resistance = match StrictlyPositive::new(resistance) {
            Ok(resistance) => resistance.into_inner(),
            Err(source) => {
                return Err(BuildError::InvalidResistance {
                    a: self.endpoint_label(a).to_owned(),
                    b: self.endpoint_label(b).to_owned(),
                    source,
                });
            }
        };

        self.links.push(Link {
            a,
            b,
            conductance: resistance.recip(),
        });
        Ok(())
    }

    /// Finishes assembly, running the structural checks that need the whole
    /// network.
    ///
    /// Every node must take part in at least one link. When the network has
    /// boundaries, every node must also be able to exchange heat with one,
    /// directly or through other nodes; a network with no boundaries at all
    /// is legal and conserves its energy exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the network is empty, a node has no links, or a
    /// node cannot reach any boundary.
    pub fn build(self) -> Result<Network, BuildError> {
        if self.nodes.is_empty() {
            return Err(BuildError::Empty);
        }

        let mut linked = vec![false; self.nodes.len()];
        for link in &self.links {
            for endpoint in [link.a, link.b] {
                if let Endpoint::Node(NodeId(index)) = endpoint {
                    linked[index] = true;
                }
            }
        }
        if let Some(index) = linked.iter().position(|&ok| !ok) {
            return Err(BuildError::UnlinkedNode {
                label: self.nodes[index].label.clone(),
            });
        }

        if !self.boundaries.is_empty() {
            if let Some(index) = self.first_node_cut_off_from_boundaries() {
                return Err(BuildError::UnreachableNode {
                    label: self.nodes[index].label.clone(),
                });
            }
        }

        let nodes = self
            .nodes
            .into_iter()
            .map(|spec| Node {
                capacity: spec.capacity,
                initial: spec.initial,
                saturation: spec.saturation,
                heat_input: spec.heat_input,
            })
            .collect();
        let boundaries = self
            .boundaries
            .into_iter()
            .map(|spec| Boundary {
                temperature: spec.temperature,
            })
            .collect();

        Ok(Network {
            nodes,
            boundaries,
            links: self.links,
        })
    }

    /// Breadth-first search over node-to-node links, seeded from every node
    /// with a direct boundary link. Returns the first node left unvisited.
    fn first_node_cut_off_from_boundaries(&self) -> Option<usize> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        let mut queue = VecDeque::new();
        let mut visited = vec![false; self.nodes.len()];

        for link in &self.links {
            match (link.a, link.b) {
                (Endpoint::Node(NodeId(a)), Endpoint::Node(NodeId(b))) => {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }
                (Endpoint::Node(NodeId(node)), Endpoint::Boundary(_))
                | (Endpoint::Boundary(_), Endpoint::Node(NodeId(node))) => {
                    if !visited[node] {
                        visited[node] = true;
                        queue.push_back(node);
                    }
                }
                (Endpoint::Boundary(_), Endpoint::Boundary(_)) => {}
            }
        }

        while let Some(node) = queue.pop_front() {
            for &neighbor in &adjacency[node] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        visited.iter().position(|&ok| !ok)
    }

    fn contains(&self, endpoint: Endpoint) -> bool {
        match endpoint {
            Endpoint::Node(NodeId(index)) => index < self.nodes.len(),
            Endpoint::Boundary(BoundaryId(index)) => index < self.boundaries.len(),
        }
    }

    fn endpoint_label(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Node(NodeId(index)) => &self.nodes[index].label,
            Endpoint::Boundary(BoundaryId(index)) => &self.boundaries[index].label,
        }
    }
}

fn is_absolute_temperature(temperature: ThermodynamicTemperature) -> bool {
    let kelvin_value = temperature.get::<kelvin>();
    kelvin_value.is_finite() && kelvin_value > 0.0
}
