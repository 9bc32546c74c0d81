//! DOT rendering of the concept lattice.

use crate::bitset::Element;
use crate::bitvec::BitVec;
use crate::context::Context;
use crate::error::Result;
use crate::fca;
use std::collections::BTreeMap;

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the lattice of `context` as a DOT digraph. One node per concept,
/// numbered in the deterministic visit order of [`fca::concepts`], one edge
/// per cover pair pointing from the upper concept to the lower.
pub fn dot_graph<X: Element, Y: Element>(context: &Context<X, Y>) -> Result<String> {
    let all = fca::concepts(context)?;
    let mut index: BTreeMap<BitVec, usize> = BTreeMap::new();
    for (n, concept) in all.iter().enumerate() {
        index.insert(concept.objects().bits().clone(), n);
    }

    let mut out = String::from("digraph lattice {\n");
    out.push_str("  node [shape=box];\n");
    for (n, concept) in all.iter().enumerate() {
        out.push_str(&format!("  c{} [label=\"{}\"];\n", n, escape(&concept.to_string())));
    }
    fca::fold_concepts(context, (), |concept, uppers, _| {
        let low = index[concept.objects().bits()];
        for up in uppers {
            out.push_str(&format!("  c{} -> c{};\n", index[up.objects().bits()], low));
        }
        Ok(())
    })?;
    out.push_str("}\n");
    Ok(out)
}
