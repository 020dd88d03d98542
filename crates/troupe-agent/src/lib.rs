//! Agents, the crew dependency graph, and the reflection loop.
//!
//! A crew is a directed acyclic graph of agents. Agents are added to a crew
//! and wired with `add_dependent`/`add_dependency`; the crew computes a
//! topological execution order, runs each agent once, and appends each
//! agent's output to the accumulated context of its direct dependents.

pub mod agent;
pub mod crew;
pub mod plot;
pub mod reflection;
pub mod runner;

pub use agent::Agent;
pub use crew::{AgentId, AgentOutput, Crew, CrewReport};
pub use reflection::{ReflectionLoop, STOP_SENTINEL};
pub use runner::{CompletionRunner, TaskRunner};
