//! Best-effort DOT export of a crew's node/edge structure.

use std::path::Path;

use tracing::warn;

use crate::crew::Crew;

impl Crew {
    /// Render the crew as a Graphviz DOT digraph.
    pub fn to_dot(&self) -> String {
        let mut dot = format!("digraph \"{}\" {{\n", escape(self.name()));
        dot.push_str("    rankdir=LR;\n    node [shape=box];\n");

        for i in 0..self.len() {
            let id = crate::crew::AgentId(i);
            if let Some(agent) = self.agent(id) {
                dot.push_str(&format!("    n{} [label=\"{}\"];\n", i, escape(&agent.name)));
            }
        }
        for i in 0..self.len() {
            for dep in self.dependents(crate::crew::AgentId(i)) {
                dot.push_str(&format!("    n{} -> n{};\n", i, dep.index()));
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// Write the DOT rendering to a file.
    ///
    /// Side-effect only: a failure is logged and swallowed, never allowed
    /// to abort a run.
    pub fn plot(&self, path: &Path) {
        if let Err(e) = std::fs::write(path, self.to_dot()) {
            warn!(crew = %self.name(), path = %path.display(), error = %e, "failed to write crew plot");
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;

    #[test]
    fn test_dot_contains_nodes_and_edges() {
        let mut crew = Crew::new("pipeline");
        let a = crew.add(Agent::new("research"));
        let b = crew.add(Agent::new("write"));
        crew.add_dependent(a, [b]).unwrap();

        let dot = crew.to_dot();
        assert!(dot.starts_with("digraph \"pipeline\""));
        assert!(dot.contains("n0 [label=\"research\"]"));
        assert!(dot.contains("n0 -> n1;"));
    }

    #[test]
    fn test_plot_write_failure_is_swallowed() {
        let crew = Crew::new("c");
        // Directory path: the write fails, but plot() must not panic or error.
        crew.plot(Path::new("/"));
    }

    #[test]
    fn test_plot_writes_file() {
        let mut crew = Crew::new("c");
        crew.add(Agent::new("solo"));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crew.dot");
        crew.plot(&path);
        assert!(std::fs::read_to_string(&path).unwrap().contains("solo"));
    }
}
