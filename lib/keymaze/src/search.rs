use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use crate::{Error, Graph, KeySet};

/// Where every bot stands and which keys are held. Cost is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId {
    pub positions: Vec<usize>,
    pub keys: KeySet,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Node {
    dist: Reverse<usize>,
    id: StateId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A state was popped and its successors queued.
    Expanded,
    /// A popped entry had been superseded by a cheaper one and was dropped.
    Stale,
    /// Every key is collected; holds the minimal total cost.
    Done(usize),
    /// The queue ran dry without collecting every key.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounded {
    Done(usize),
    Unreachable,
    GaveUp,
}

/// Uniform-cost search over (bot positions, collected keys).
///
/// Each `Search` owns its own queue and best-cost table; build a new one
/// for every graph.
pub struct Search<'g> {
    graph: &'g Graph,
    all_keys: KeySet,
    queue: BinaryHeap<Node>,
    dist: HashMap<StateId, usize>,
    done: Option<usize>,
}

impl<'g> Search<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        let init = StateId {
            positions: (0..graph.bot_count()).collect(),
            keys: KeySet::new(),
        };
        let mut dist = HashMap::new();
        dist.insert(init.clone(), 0);
        let mut queue = BinaryHeap::new();
        queue.push(Node {
            dist: Reverse(0),
            id: init,
        });

        Self {
            graph,
            all_keys: graph.all_keys(),
            queue,
            dist,
            done: None,
        }
    }

    /// Pops one entry off the queue and expands it.
    pub fn step(&mut self) -> Result<Step, Error> {
        if let Some(d0) = self.done {
            return Ok(Step::Done(d0));
        }
        let Some(Node {
            dist: Reverse(d0),
            id,
        }) = self.queue.pop()
        else {
            log::info!("search exhausted after {} states", self.dist.len());
            return Ok(Step::Exhausted);
        };

        let best = self.dist.get(&id).copied().unwrap_or(usize::MAX);
        if d0 > best {
            log::trace!("stale {:?} {:?}: {} > {}", id.positions, id.keys, d0, best);
            return Ok(Step::Stale);
        }
        if d0 < best {
            log::error!(
                "popped {:?} {:?} at {} below recorded {}",
                id.positions,
                id.keys,
                d0,
                best
            );
            return Err(Error::InvariantViolation { popped: d0, best });
        }

        if id.keys == self.all_keys {
            log::info!("all keys collected in {} steps", d0);
            self.done = Some(d0);
            return Ok(Step::Done(d0));
        }

        log::debug!("expand {:?} {:?} at {}", id.positions, id.keys, d0);
        for (bot, &node) in id.positions.iter().enumerate() {
            for edge in self.graph.edges(node) {
                let Some(key) = self.graph.key_letter(edge.dest) else {
                    continue;
                };
                if id.keys.contains_key(key) || !id.keys.can_open(&edge.doors) {
                    continue;
                }
                let mut keys = id.keys;
                keys.insert_key(key);
                let mut positions = id.positions.clone();
                positions[bot] = edge.dest;
                let next = StateId { positions, keys };

                let d1 = d0 + edge.dist;
                if d1 < self.dist.get(&next).copied().unwrap_or(usize::MAX) {
                    self.dist.insert(next.clone(), d1);
                    self.queue.push(Node {
                        dist: Reverse(d1),
                        id: next,
                    });
                }
            }
        }

        Ok(Step::Expanded)
    }

    pub fn run(&mut self) -> Result<Option<usize>, Error> {
        loop {
            match self.step()? {
                Step::Done(d) => return Ok(Some(d)),
                Step::Exhausted => return Ok(None),
                Step::Expanded | Step::Stale => (),
            }
        }
    }

    /// Like `run`, but gives up after popping `max_steps` entries.
    pub fn run_bounded(&mut self, max_steps: usize) -> Result<Bounded, Error> {
        for _ in 0..max_steps {
            match self.step()? {
                Step::Done(d) => return Ok(Bounded::Done(d)),
                Step::Exhausted => return Ok(Bounded::Unreachable),
                Step::Expanded | Step::Stale => (),
            }
        }
        Ok(Bounded::GaveUp)
    }

    pub fn best_cost(&self, id: &StateId) -> Option<usize> {
        self.dist.get(id).copied()
    }

    pub fn visited(&self) -> &HashMap<StateId, usize> {
        &self.dist
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}
