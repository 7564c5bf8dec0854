use thiserror::Error;
use uom::ConstZero;
use uom::si::f64::{Power, ThermodynamicTemperature};

use crate::support::units::{TemperatureDifference, TemperatureRate};

use super::{BoundaryId, Endpoint, Network, NodeId};

/// An error from evaluating the network's energy balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DerivativeError {
    #[error("state holds {actual} temperatures but the network has {expected} nodes")]
    StateLength { expected: usize, actual: usize },
    #[error("temperature of node {index} is not finite")]
    NonFiniteTemperature { index: usize },
}

impl Network {
    /// Evaluates the per-node energy balance at the given temperatures.
    ///
    /// Each link contributes `Q = (T_other - T_node) / R` to one end and the
    /// exact negation to the other, so heat exchanged between two nodes
    /// cancels identically in the network total. A node's rate of change is
    /// `ΣQ / C`, with any direct heat input included; a node whose
    /// [`Saturation`](super::Saturation) is engaged reports exactly zero
    /// instead, while its flows to neighbours are unaffected.
    ///
    /// Temperatures are in node order, as issued by the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length does not match the node count or
    /// any temperature is not finite.
    pub fn derivatives(
        &self,
        temperatures: &[ThermodynamicTemperature],
    ) -> Result<Vec<TemperatureRate>, DerivativeError> {
        if temperatures.len() != self.nodes.len() {
            return Err(DerivativeError::StateLength {
                expected: self.nodes.len(),
                actual: temperatures.len(),
            });
        }
        for (index, temperature) in temperatures.iter().enumerate() {
            if !temperature.value.is_finite() {
                return Err(DerivativeError::NonFiniteTemperature { index });
            }
        }

        let mut flows = vec![Power::ZERO; self.nodes.len()];
        for link in &self.links {
            let t_a = self.endpoint_temperature(link.a, temperatures);
            let t_b = self.endpoint_temperature(link.b, temperatures);

            // Positive q heats endpoint a; the same q, negated, leaves b.
            let q = link.conductance * t_b.minus(t_a);
            if let Endpoint::Node(NodeId(index)) = link.a {
                flows[index] += q;
            }
            if let Endpoint::Node(NodeId(index)) = link.b {
                flows[index] -= q;
            }
        }

        Ok(self
            .nodes
            .iter()
            .zip(&flows)
            .zip(temperatures)
            .map(|((node, &flow), &temperature)| match node.saturation {
                Some(saturation) if saturation.engaged(temperature) => TemperatureRate::ZERO,
                _ => (flow + node.heat_input) / node.capacity,
            })
            .collect())
    }

    fn endpoint_temperature(
        &self,
        endpoint: Endpoint,
        temperatures: &[ThermodynamicTemperature],
    ) -> ThermodynamicTemperature {
        match endpoint {
            Endpoint::Node(NodeId(index)) => temperatures[index],
            Endpoint::Boundary(BoundaryId(index)) => self.boundaries[index].temperature,
        }
    }
}
