use bevy::math::Vec3;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};

use super::animator::{Direction, EdgeAnimation, EdgeLine, Outcome};
use super::barrier::{Barrier, BarrierStatus, BarrierToken};
use super::claims::ClaimedEdges;
use super::config::{WaveConfig, check_duration};
use crate::error::WaveError;
use crate::graph::{EdgeId, GraphModel, Node, NodeId};

/// Where the wave stands, as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Signals queued by the scheduler; drain them with [`WaveScheduler::drain_events`]
#[derive(Debug, Clone, PartialEq)]
pub enum WaveEvent {
    /// A level's animations were launched
    LevelStarted {
        direction: Direction,
        level: usize,
        edges: usize,
    },
    /// Open ran out of unclaimed edges
    Opened,
    /// Close retracted level 0 and cleared the bookkeeping
    Closed,
    /// A level barrier timed out
    Stalled(WaveError),
}

/// One running animation and the barrier it reports to
#[derive(Debug)]
struct Flight {
    animation: EdgeAnimation,
    barrier: BarrierToken,
    /// Frontier node the tip is heading for (grows only)
    toward: Option<NodeId>,
}

/// What the level loop is waiting on
#[derive(Debug)]
enum Run {
    Idle,
    Expanding {
        level: usize,
        barrier: Barrier,
        /// Far ends of the edges that finished growing, in completion order
        reached: Vec<NodeId>,
    },
    Collapsing {
        level: usize,
        barrier: Barrier,
    },
}

/// Level-by-level reveal/hide of a graph's edges, starting from one root
///
/// Driven entirely by [`advance`](Self::advance): nothing moves between calls.
#[derive(Debug)]
pub struct WaveScheduler {
    graph: GraphModel,
    root: NodeId,
    config: WaveConfig,
    /// Indexed by EdgeId
    lines: Vec<EdgeLine>,
    claims: ClaimedEdges,
    flights: BTreeMap<EdgeId, Flight>,
    state: WaveState,
    run: Run,
    next_token: u64,
    events: Vec<WaveEvent>,
}

impl WaveScheduler {
    pub fn new(graph: GraphModel, root: NodeId, config: WaveConfig) -> Result<Self, WaveError> {
        config.validate()?;
        if !graph.contains(root) {
            return Err(WaveError::Config(format!("root node {} is not in the graph", root)));
        }

        let lines = graph
            .edges()
            .iter()
            .map(|edge| {
                EdgeLine::new(
                    position_of(&graph, edge.a),
                    position_of(&graph, edge.b),
                    config.node_inset,
                )
            })
            .collect();

        Ok(WaveScheduler {
            graph,
            root,
            config,
            lines,
            claims: ClaimedEdges::new(),
            flights: BTreeMap::new(),
            state: WaveState::Closed,
            run: Run::Idle,
            next_token: 0,
            events: Vec::new(),
        })
    }

    /// Root the wave at the node closest to `reference`
    pub fn with_nearest_root(
        graph: GraphModel,
        reference: Vec3,
        config: WaveConfig,
    ) -> Result<Self, WaveError> {
        let root = graph.select_root_nearest(reference);
        Self::new(graph, root, config)
    }

    // === Commands ===

    /// Start revealing from the root; returns false (no-op) unless Closed
    pub fn open(&mut self) -> bool {
        if self.state != WaveState::Closed {
            debug!("Open ignored while {:?}", self.state);
            return false;
        }

        self.state = WaveState::Opening;
        self.claims.clear();
        info!("Opening wave from node {}", self.root);
        self.expand(0, vec![self.root]);
        true
    }

    /// Retract everything the wave has claimed, outermost level first
    ///
    /// Returns false (no-op) when nothing is claimed or a close is already
    /// running. Interrupts an opening wave. An open wave whose root has no
    /// edges claimed nothing and closes at once.
    pub fn close(&mut self) -> bool {
        if self.claims.is_empty() {
            if self.state == WaveState::Open {
                self.finish_close();
                return true;
            }
            debug!("Close ignored: nothing claimed");
            return false;
        }
        if matches!(self.run, Run::Collapsing { .. }) {
            debug!("Close ignored: already closing");
            return false;
        }

        if self.state == WaveState::Opening {
            info!("Cancelling open wave at depth {}", self.claims.depth());
        }
        self.state = WaveState::Closing;
        self.run = Run::Idle;

        // Freeze every running animation; each level's shrink resumes from its tip
        for (edge, mut flight) in std::mem::take(&mut self.flights) {
            if let Some(done) = flight.animation.interrupt() {
                debug!("Edge {} handed off ({:?})", edge, done.direction);
            }
        }

        info!("Closing wave across {} level(s)", self.claims.depth());
        self.collapse(self.claims.depth() - 1);
        true
    }

    /// Open when Closed, close otherwise
    pub fn toggle(&mut self) -> bool {
        if self.state == WaveState::Closed {
            self.open()
        } else {
            self.close()
        }
    }

    /// Duration for animations launched from now on
    pub fn set_animation_duration(&mut self, duration: f32) -> Result<(), WaveError> {
        check_duration(duration)?;
        self.config.animation_duration = duration;
        Ok(())
    }

    /// Move every running animation and the pending barrier `dt` seconds forward
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let mut landed = Vec::new();
        for (edge, flight) in self.flights.iter_mut() {
            let line = &mut self.lines[edge.index()];
            if let Some(done) = flight.animation.advance(line, dt) {
                landed.push((done, flight.barrier, flight.toward));
            }
        }
        self.flights.retain(|_, flight| !flight.animation.is_finished());

        for (done, token, toward) in landed {
            match &mut self.run {
                Run::Expanding {
                    barrier, reached, ..
                } => {
                    if barrier.arrive(token) && done.outcome == Outcome::Finished {
                        reached.extend(toward);
                    }
                }
                Run::Collapsing { barrier, .. } => {
                    barrier.arrive(token);
                }
                Run::Idle => {}
            }
        }

        self.poll(dt);
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<WaveEvent> {
        std::mem::take(&mut self.events)
    }

    // === Queries ===

    pub fn state(&self) -> WaveState {
        self.state
    }

    /// True while a level barrier is pending
    pub fn is_busy(&self) -> bool {
        !matches!(self.run, Run::Idle)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn claims(&self) -> &ClaimedEdges {
        &self.claims
    }

    pub fn line(&self, edge: EdgeId) -> Option<&EdgeLine> {
        self.lines.get(edge.index())
    }

    /// All lines, indexed by EdgeId
    pub fn lines(&self) -> &[EdgeLine] {
        &self.lines
    }

    /// The running animation on an edge, if any
    pub fn animation(&self, edge: EdgeId) -> Option<&EdgeAnimation> {
        self.flights.get(&edge).map(|flight| &flight.animation)
    }

    pub fn is_animating(&self, edge: EdgeId) -> bool {
        self.flights.contains_key(&edge)
    }

    pub fn active_animations(&self) -> usize {
        self.flights.len()
    }

    // === Level loop ===

    fn expand(&mut self, level: usize, frontier: Vec<NodeId>) {
        let token = self.issue_token();
        let mut launched = 0;

        for node in frontier {
            let origin = position_of(&self.graph, node);
            let incident = self.graph.incident(node).to_vec();

            for (edge, neighbor) in incident {
                if !self.claims.try_claim(edge, level) {
                    continue;
                }

                let target = position_of(&self.graph, neighbor);
                self.lines[edge.index()].orient(origin, target, self.config.node_inset);

                match self.launch(edge, Direction::Grow, token, Some(neighbor)) {
                    Ok(()) => launched += 1,
                    Err(err) => warn!("Skipping grow of edge {}: {}", edge, err),
                }
            }
        }

        let barrier = Barrier::new(token, launched, self.config.barrier_timeout());
        if barrier.is_released() {
            // Nothing left to claim
            self.finish_open();
            return;
        }

        debug!("Grow level {}: {} edge(s)", level, launched);
        self.events.push(WaveEvent::LevelStarted {
            direction: Direction::Grow,
            level,
            edges: launched,
        });
        self.run = Run::Expanding {
            level,
            barrier,
            reached: Vec::new(),
        };
    }

    fn collapse(&mut self, level: usize) {
        let token = self.issue_token();
        let mut launched = 0;

        for edge in self.claims.level(level).to_vec() {
            match self.launch(edge, Direction::Shrink, token, None) {
                Ok(()) => launched += 1,
                Err(err) => warn!("Skipping shrink of edge {}: {}", edge, err),
            }
        }

        debug!("Shrink level {}: {} edge(s)", level, launched);
        self.events.push(WaveEvent::LevelStarted {
            direction: Direction::Shrink,
            level,
            edges: launched,
        });
        self.run = Run::Collapsing {
            level,
            barrier: Barrier::new(token, launched, self.config.barrier_timeout()),
        };

        if launched == 0 {
            self.poll(0.0);
        }
    }

    fn launch(
        &mut self,
        edge: EdgeId,
        direction: Direction,
        barrier: BarrierToken,
        toward: Option<NodeId>,
    ) -> Result<(), WaveError> {
        if self.flights.contains_key(&edge) {
            return Err(WaveError::DuplicateClaim(edge));
        }

        let line = &mut self.lines[edge.index()];
        let duration = self.config.animation_duration;
        let animation = match direction {
            Direction::Grow => EdgeAnimation::grow(edge, line, duration)?,
            Direction::Shrink => EdgeAnimation::shrink(edge, line, duration)?,
        };

        self.flights.insert(
            edge,
            Flight {
                animation,
                barrier,
                toward,
            },
        );
        Ok(())
    }

    /// Check the pending barrier and move to the next level once it opens
    fn poll(&mut self, dt: f32) {
        let status = match &mut self.run {
            Run::Idle => return,
            Run::Expanding { barrier, .. } | Run::Collapsing { barrier, .. } => barrier.wait(dt),
        };
        if status == BarrierStatus::Pending {
            return;
        }

        match std::mem::replace(&mut self.run, Run::Idle) {
            Run::Expanding {
                level,
                barrier,
                reached,
            } => {
                if status == BarrierStatus::TimedOut {
                    // Carry on with whatever did arrive
                    self.report_stall(Direction::Grow, level, barrier.remaining());
                }

                let mut seen = HashSet::new();
                let frontier = reached.into_iter().filter(|node| seen.insert(*node)).collect();
                self.expand(level + 1, frontier);
            }
            Run::Collapsing { level, barrier } => {
                if status == BarrierStatus::TimedOut {
                    // Stay Closing with claims intact; a retried close starts over
                    self.report_stall(Direction::Shrink, level, barrier.remaining());
                    return;
                }

                if level == 0 {
                    self.finish_close();
                } else {
                    self.collapse(level - 1);
                }
            }
            Run::Idle => {}
        }
    }

    fn finish_open(&mut self) {
        self.state = WaveState::Open;
        self.run = Run::Idle;
        info!(
            "Wave open: {} edge(s) over {} level(s)",
            self.claims.len(),
            self.claims.depth()
        );
        self.events.push(WaveEvent::Opened);
    }

    fn finish_close(&mut self) {
        self.claims.clear();
        self.flights.clear();
        self.state = WaveState::Closed;
        self.run = Run::Idle;
        info!("Wave closed");
        self.events.push(WaveEvent::Closed);
    }

    fn report_stall(&mut self, direction: Direction, level: usize, pending: usize) {
        let err = WaveError::StuckAnimation {
            direction,
            level,
            pending,
        };
        warn!("{}", err);
        self.events.push(WaveEvent::Stalled(err));
    }

    fn issue_token(&mut self) -> BarrierToken {
        self.next_token += 1;
        BarrierToken(self.next_token)
    }
}

fn position_of(graph: &GraphModel, id: NodeId) -> Vec3 {
    graph.node(id).map(Node::position).unwrap_or(Vec3::ZERO)
}
