use std::collections::BinaryHeap;
use std::time::Instant;

use tracing::{debug, info};

use troupe_core::error::{Result, TroupeError};
use troupe_core::types::RunId;

use crate::agent::Agent;
use crate::runner::TaskRunner;

/// Stable handle to an agent inside a crew.
///
/// Handles are arena indices; they are only meaningful for the crew that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(pub(crate) usize);

impl AgentId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Output of a single agent run.
#[derive(Debug, Clone)]
pub struct AgentOutput {
    /// Which agent produced this.
    pub id: AgentId,
    /// The agent's display name.
    pub name: String,
    /// The agent's text output.
    pub output: String,
    /// Execution time in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of a full crew run: every agent's output in execution order.
#[derive(Debug, Clone)]
pub struct CrewReport {
    pub run_id: RunId,
    pub outputs: Vec<AgentOutput>,
    pub total_elapsed_ms: u64,
}

impl CrewReport {
    /// The terminal sink's output (the last agent in execution order).
    pub fn final_output(&self) -> Option<&str> {
        self.outputs.last().map(|o| o.output.as_str())
    }
}

/// Owner of a set of agents and the directed edges between them.
///
/// The crew is an arena: it owns every [`Agent`], and edges are adjacency
/// lists of [`AgentId`] handles. Every wiring call updates both sides of an
/// edge, so `dependents[a]` contains `b` exactly when `dependencies[b]`
/// contains `a`.
pub struct Crew {
    name: String,
    agents: Vec<Agent>,
    dependencies: Vec<Vec<usize>>,
    dependents: Vec<Vec<usize>>,
}

impl Crew {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agents: Vec::new(),
            dependencies: Vec::new(),
            dependents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an agent, returning its handle.
    pub fn add(&mut self, agent: Agent) -> AgentId {
        let id = AgentId(self.agents.len());
        debug!(crew = %self.name, agent = %agent.name, handle = id.0, "registered agent");
        self.agents.push(agent);
        self.dependencies.push(Vec::new());
        self.dependents.push(Vec::new());
        id
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Handles that `id` depends on.
    pub fn dependencies(&self, id: AgentId) -> Vec<AgentId> {
        self.dependencies
            .get(id.0)
            .map(|v| v.iter().map(|&i| AgentId(i)).collect())
            .unwrap_or_default()
    }

    /// Handles that depend on `id`.
    pub fn dependents(&self, id: AgentId) -> Vec<AgentId> {
        self.dependents
            .get(id.0)
            .map(|v| v.iter().map(|&i| AgentId(i)).collect())
            .unwrap_or_default()
    }

    fn check(&self, id: AgentId) -> Result<()> {
        if id.0 >= self.agents.len() {
            return Err(TroupeError::UnknownAgent {
                crew: self.name.clone(),
                handle: id.0,
            });
        }
        Ok(())
    }

    /// Wire `from`'s output into each of `to`: `from` becomes a dependency
    /// of every target, and every target a dependent of `from`.
    ///
    /// All operands are validated before any edge is added.
    pub fn add_dependent(
        &mut self,
        from: AgentId,
        to: impl IntoIterator<Item = AgentId>,
    ) -> Result<()> {
        let targets: Vec<AgentId> = to.into_iter().collect();
        self.check(from)?;
        for &t in &targets {
            self.check(t)?;
        }
        for t in targets {
            self.dependents[from.0].push(t.0);
            self.dependencies[t.0].push(from.0);
        }
        Ok(())
    }

    /// The inverse wiring: each of `on` feeds its output into `to`.
    pub fn add_dependency(
        &mut self,
        to: AgentId,
        on: impl IntoIterator<Item = AgentId>,
    ) -> Result<()> {
        let sources: Vec<AgentId> = on.into_iter().collect();
        self.check(to)?;
        for &s in &sources {
            self.check(s)?;
        }
        for s in sources {
            self.dependencies[to.0].push(s.0);
            self.dependents[s.0].push(to.0);
        }
        Ok(())
    }

    /// Wire a linear pipeline: each handle feeds the next.
    pub fn chain(&mut self, ids: &[AgentId]) -> Result<()> {
        for pair in ids.windows(2) {
            self.add_dependent(pair[0], [pair[1]])?;
        }
        Ok(())
    }

    /// Compute a topological execution order over all registered agents.
    ///
    /// Ties among unordered agents break by registration order, so the
    /// schedule is deterministic for a fixed construction sequence. A cycle
    /// fails with `CycleDetected` before anything runs.
    pub fn schedule(&self) -> Result<Vec<AgentId>> {
        let n = self.agents.len();
        let mut indegree = vec![0usize; n];
        for (i, deps) in self.dependencies.iter().enumerate() {
            indegree[i] = deps.len();
        }

        // Min-heap on the arena index = registration-order tie-break.
        let mut ready: BinaryHeap<std::cmp::Reverse<usize>> = (0..n)
            .filter(|&i| indegree[i] == 0)
            .map(std::cmp::Reverse)
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(std::cmp::Reverse(u)) = ready.pop() {
            order.push(AgentId(u));
            for &v in &self.dependents[u] {
                indegree[v] -= 1;
                if indegree[v] == 0 {
                    ready.push(std::cmp::Reverse(v));
                }
            }
        }

        if order.len() < n {
            return Err(TroupeError::CycleDetected {
                crew: self.name.clone(),
            });
        }
        Ok(order)
    }

    /// Run every agent once, in scheduled order.
    ///
    /// Each agent's output is appended, tagged with its name, onto the
    /// accumulated context of every direct dependent. A failing run aborts
    /// the remaining schedule; context already propagated is not rolled
    /// back. Returns all per-agent outputs in execution order.
    pub async fn run(&mut self, runner: &dyn TaskRunner) -> Result<CrewReport> {
        let order = self.schedule()?;
        let run_id = RunId::new();
        let start = Instant::now();
        info!(crew = %self.name, run_id = %run_id, agents = order.len(), "starting crew run");

        let mut outputs = Vec::with_capacity(order.len());
        for id in order {
            let agent = &self.agents[id.0];
            info!(crew = %self.name, agent = %agent.name, "running agent");

            let prompt = agent.build_prompt();
            let agent_start = Instant::now();
            let output = runner.run(&agent.backstory, &prompt, &agent.tools).await?;
            let elapsed_ms = agent_start.elapsed().as_millis() as u64;

            debug!(agent = %agent.name, elapsed_ms, "agent run complete");

            let name = agent.name.clone();
            let dependents = self.dependents[id.0].clone();
            for d in dependents {
                self.agents[d].receive_context(&name, &output);
            }

            outputs.push(AgentOutput {
                id,
                name,
                output,
                elapsed_ms,
            });
        }

        let total_elapsed_ms = start.elapsed().as_millis() as u64;
        info!(crew = %self.name, run_id = %run_id, total_elapsed_ms, "crew run complete");

        Ok(CrewReport {
            run_id,
            outputs,
            total_elapsed_ms,
        })
    }
}
