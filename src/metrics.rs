//! Structured reports for synthesized circuits.
//!
//! This module turns a [`Synthesized`] circuit into a serializable report with a
//! CLI-friendly table formatter.

use ff::PrimeFieldBits;
use serde::Serialize;

use crate::circuit::{CircuitShape, GadgetCircuit, PublicOutputs, Synthesized};

/// One labelled output value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEntry {
    pub label: String,
    pub value: String,
}

/// Shape, satisfaction and outputs of one synthesized circuit.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitReport {
    pub circuit: String,
    pub mode: String,
    pub shape: CircuitShape,
    pub satisfied: bool,
    pub first_unsatisfied: Option<String>,
    pub outputs: Vec<OutputEntry>,
}

impl CircuitReport {
    /// Builds a report for circuit `C` from its synthesis result.
    pub fn new<F, C>(mode: impl Into<String>, synthesized: &Synthesized<C::Outputs>) -> Self
    where
        F: PrimeFieldBits,
        C: GadgetCircuit<F>,
    {
        Self {
            circuit: C::NAME.to_string(),
            mode: mode.into(),
            shape: synthesized.shape.clone(),
            satisfied: synthesized.satisfied,
            first_unsatisfied: synthesized.first_unsatisfied.clone(),
            outputs: synthesized
                .outputs
                .labelled()
                .into_iter()
                .map(|(label, value)| OutputEntry { label, value })
                .collect(),
        }
    }

    /// Format the report as a table for CLI output
    pub fn format_table(&self) -> String {
        let mut output = String::new();
        output.push_str("  ┌──────────────────────────────────────────────────────────┐\n");
        output.push_str(&format!(
            "  │ Circuit: {:<20} Mode: {:<22} │\n",
            self.circuit, self.mode
        ));
        output.push_str("  ├────────────────────────┬─────────────────────────────────┤\n");
        let rows = [
            ("Constraints", self.shape.num_constraints.to_string()),
            ("Public inputs", self.shape.num_inputs.to_string()),
            ("Auxiliary variables", self.shape.num_aux.to_string()),
            ("Structure hash", format!("{:016x}", self.shape.structure_hash)),
            (
                "Satisfied",
                if self.satisfied { "yes" } else { "NO" }.to_string(),
            ),
        ];
        for (label, value) in rows {
            output.push_str(&format!("  │ {:<22} │ {:>31} │\n", label, value));
        }
        output.push_str("  └────────────────────────┴─────────────────────────────────┘\n");

        if let Some(path) = &self.first_unsatisfied {
            output.push_str(&format!("  First failing constraint: {}\n", path));
        }
        for entry in &self.outputs {
            output.push_str(&format!("  {} = {}\n", entry.label, entry.value));
        }
        output
    }
}
