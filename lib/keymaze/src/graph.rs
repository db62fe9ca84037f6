use std::collections::VecDeque;

use log::log_enabled;
use ndarray::Array2;

use crate::{Grid, KeySet, Tile};

/// Shortest walk from one node to a key node, and the doors crossed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub dest: usize,
    pub dist: usize,
    pub doors: KeySet,
}

#[derive(Clone, Copy)]
struct KeyPath {
    dist: usize,
    doors: KeySet,
}

/// The maze compressed to its points of interest.
///
/// Nodes `0..bot_count()` are the bot starts in bot id order, followed by one
/// node per key in letter order. Only key nodes are ever the destination of
/// an edge.
///
/// Each edge records the door set of the first shortest path the BFS finds.
/// When several equally short paths cross different doors, only that one is
/// kept, so an edge may demand more keys than strictly necessary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    bots: usize,
    keys: Vec<u8>,
    edges: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn build(grid: &Grid) -> Self {
        let bots = grid.entrances().len();
        let keys = grid.keys().iter().map(|&(key, _)| key).collect::<Vec<_>>();
        let mut graph = Self {
            bots,
            keys,
            edges: Vec::new(),
        };

        let starts = grid
            .entrances()
            .iter()
            .copied()
            .chain(grid.keys().iter().map(|&(_, pos)| pos))
            .collect::<Vec<_>>();
        let edges = starts
            .iter()
            .enumerate()
            .map(|(node, &start)| graph.search_path(grid, node, start))
            .collect::<Vec<_>>();
        graph.edges = edges;

        if log_enabled!(log::Level::Debug) {
            for (node, edges) in graph.edges.iter().enumerate() {
                for edge in edges {
                    log::debug!(
                        "{}-{}: {} {:?}",
                        graph.label(node),
                        graph.label(edge.dest),
                        edge.dist,
                        edge.doors
                    );
                }
            }
        }

        graph
    }

    // Breadth-first search from one node to every key reachable from it
    fn search_path(&self, grid: &Grid, source: usize, start: (usize, usize)) -> Vec<Edge> {
        let mut queue = VecDeque::new();
        let mut path: Array2<Option<KeyPath>> = Array2::from_elem(grid.dim(), None);
        path[start] = Some(KeyPath {
            dist: 0,
            doors: KeySet::new(),
        });
        queue.push_back(start);
        let mut edges = Vec::new();

        while let Some(p0) = queue.pop_front() {
            let Some(e0) = path[p0] else {
                continue;
            };
            for p1 in grid.neighbors(p0) {
                let tile = grid.tile(p1);
                if tile == Tile::Wall || path[p1].is_some() {
                    continue;
                }
                // KeySet is Copy, so every branch gets its own door set
                let mut doors = e0.doors;
                if let Tile::Door(door) = tile {
                    doors.insert_door(door);
                }
                let entry = KeyPath {
                    dist: e0.dist + 1,
                    doors,
                };
                path[p1] = Some(entry);
                if let Tile::Key(key) = tile {
                    match self.key_node(key) {
                        Some(dest) if dest != source => edges.push(Edge {
                            dest,
                            dist: entry.dist,
                            doors: entry.doors,
                        }),
                        _ => (),
                    }
                }
                // Keys do not block the walk
                queue.push_back(p1);
            }
        }

        edges
    }

    fn key_node(&self, key: u8) -> Option<usize> {
        self.keys.binary_search(&key).ok().map(|i| self.bots + i)
    }

    fn label(&self, node: usize) -> String {
        match self.key_letter(node) {
            Some(key) => (key as char).to_string(),
            None => format!("@{}", node),
        }
    }

    pub fn bot_count(&self) -> usize {
        self.bots
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self, node: usize) -> &[Edge] {
        &self.edges[node]
    }

    /// The key letter held by `node`, or `None` for a bot start.
    pub fn key_letter(&self, node: usize) -> Option<u8> {
        node.checked_sub(self.bots)
            .and_then(|i| self.keys.get(i))
            .copied()
    }

    pub fn all_keys(&self) -> KeySet {
        KeySet::from_keys(self.keys.iter().copied())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn doors(letters: &[u8]) -> KeySet {
        let mut doors = KeySet::new();
        for &door in letters {
            doors.insert_door(door);
        }
        doors
    }

    #[test]
    fn test_corridor() {
        init();

        let graph = Graph::build(&Grid::parse("@.a.A.b").unwrap());
        assert_eq!(graph.bot_count(), 1);
        assert_eq!(graph.key_count(), 2);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.key_letter(0), None);
        assert_eq!(graph.key_letter(1), Some(b'a'));
        assert_eq!(graph.key_letter(2), Some(b'b'));
        assert_eq!(
            graph.edges(0),
            &[
                Edge {
                    dest: 1,
                    dist: 2,
                    doors: KeySet::new()
                },
                Edge {
                    dest: 2,
                    dist: 6,
                    doors: doors(b"A")
                },
            ]
        );
        assert_eq!(
            graph.edges(1),
            &[Edge {
                dest: 2,
                dist: 4,
                doors: doors(b"A")
            }]
        );
        assert_eq!(
            graph.edges(2),
            &[Edge {
                dest: 1,
                dist: 4,
                doors: doors(b"A")
            }]
        );
    }

    #[test]
    fn test_tie_goes_left_first() {
        init();

        // Two 2-step walks reach b: left then up is clear, up then left
        // crosses A. Left is explored first, so the clear one is kept.
        let graph = Graph::build(&Grid::parse("bA\n.@").unwrap());
        assert_eq!(
            graph.edges(0),
            &[Edge {
                dest: 1,
                dist: 2,
                doors: KeySet::new()
            }]
        );
    }

    #[test]
    fn test_no_edges_to_bots() {
        init();

        let graph = Graph::build(&Grid::parse(include_str!("test9.txt")).unwrap());
        assert_eq!(graph.bot_count(), 4);
        for node in 0..graph.node_count() {
            for edge in graph.edges(node) {
                assert!(edge.dest >= graph.bot_count());
                assert_ne!(edge.dest, node);
            }
        }
    }

    #[test]
    fn test_walled_in_key() {
        init();

        let graph = Graph::build(&Grid::parse(include_str!("test10.txt")).unwrap());
        assert_eq!(graph.key_count(), 1);
        assert!(graph.edges(0).is_empty());
        assert!(graph.edges(1).is_empty());
    }

    #[test]
    fn test_idempotent() {
        init();

        let grid = Grid::parse(include_str!("test3.txt")).unwrap();
        assert_eq!(Graph::build(&grid), Graph::build(&grid));
    }

    #[test]
    fn test_all_keys() {
        let graph = Graph::build(&Grid::parse(include_str!("test0.txt")).unwrap());
        assert_eq!(graph.all_keys(), KeySet::from_keys(*b"ab"));
    }
}
