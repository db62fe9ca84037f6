use std::{collections::BTreeMap, str::FromStr};

use ndarray::Array2;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    Entrance,
    Key(u8),
    Door(u8),
}

impl Tile {
    fn parse(ch: char, pos: (usize, usize)) -> Result<Self, Error> {
        match ch {
            '#' => Ok(Tile::Wall),
            '.' => Ok(Tile::Open),
            '@' => Ok(Tile::Entrance),
            'a'..='z' => Ok(Tile::Key(ch as u8)),
            'A'..='Z' => Ok(Tile::Door(ch as u8)),
            _ => Err(Error::InvalidTile { tile: ch, pos }),
        }
    }
}

/// A rectangular maze. Read-only once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Array2<Tile>,
    entrances: Vec<(usize, usize)>,
    keys: Vec<(u8, (usize, usize))>,
}

impl Grid {
    /// Parses lines up to the first empty one. Rejects ragged rows, unknown
    /// characters and repeated key letters.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let lines = input
            .lines()
            .take_while(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let h = lines.len();
        let w = lines.first().map_or(0, |line| line.chars().count());

        let mut rows = Vec::with_capacity(h);
        let mut entrances = Vec::new();
        let mut keys = BTreeMap::new();
        for (r, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != w {
                return Err(Error::Ragged {
                    row: r,
                    expected: w,
                    found,
                });
            }
            let mut row = Vec::with_capacity(w);
            for (c, ch) in line.chars().enumerate() {
                let tile = Tile::parse(ch, (r, c))?;
                match tile {
                    Tile::Entrance => entrances.push((r, c)),
                    Tile::Key(key) => {
                        if let Some(&first) = keys.get(&key) {
                            return Err(Error::DuplicateKey {
                                key: key as char,
                                first,
                                second: (r, c),
                            });
                        }
                        keys.insert(key, (r, c));
                    }
                    _ => (),
                }
                row.push(tile);
            }
            rows.push(row);
        }

        Ok(Self {
            tiles: Array2::from_shape_fn((h, w), |(r, c)| rows[r][c]),
            entrances,
            keys: keys.into_iter().collect(),
        })
    }

    pub fn dim(&self) -> (usize, usize) {
        self.tiles.dim()
    }

    pub fn tile(&self, pos: (usize, usize)) -> Tile {
        self.tiles[pos]
    }

    /// Bot start positions, in row-major order. The index is the bot id.
    pub fn entrances(&self) -> &[(usize, usize)] {
        &self.entrances
    }

    /// Key letters with their positions, sorted by letter.
    pub fn keys(&self) -> &[(u8, (usize, usize))] {
        &self.keys
    }

    /// Orthogonal neighbours inside the grid, in the order left, right, up,
    /// down. The BFS in `Graph::build` depends on this order to break ties.
    pub fn neighbors(&self, (r, c): (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
        let (h, w) = self.tiles.dim();
        [
            c.checked_sub(1).map(|c| (r, c)),
            Some((r, c + 1)),
            r.checked_sub(1).map(|r| (r, c)),
            Some((r + 1, c)),
        ]
        .into_iter()
        .flatten()
        .filter(move |&(r, c)| r < h && c < w)
    }

    /// Replaces a single entrance by four, one in each diagonal corner of its
    /// 3x3 neighbourhood, and walls off the centre cross.
    pub fn split_entrance(&self) -> Result<Self, Error> {
        let &[(r0, c0)] = self.entrances.as_slice() else {
            return Err(Error::CannotSplit("expected exactly one entrance"));
        };
        let (h, w) = self.dim();
        if r0 == 0 || c0 == 0 || r0 + 1 >= h || c0 + 1 >= w {
            return Err(Error::CannotSplit("entrance touches the border"));
        }
        for r in r0 - 1..=r0 + 1 {
            for c in c0 - 1..=c0 + 1 {
                if let Tile::Key(_) | Tile::Door(_) = self.tiles[(r, c)] {
                    return Err(Error::CannotSplit("key or door next to the entrance"));
                }
            }
        }

        let mut tiles = self.tiles.clone();
        for pos in [(r0, c0), (r0, c0 - 1), (r0, c0 + 1), (r0 - 1, c0), (r0 + 1, c0)] {
            tiles[pos] = Tile::Wall;
        }
        let entrances = vec![
            (r0 - 1, c0 - 1),
            (r0 - 1, c0 + 1),
            (r0 + 1, c0 - 1),
            (r0 + 1, c0 + 1),
        ];
        for &pos in &entrances {
            tiles[pos] = Tile::Entrance;
        }

        Ok(Self {
            tiles,
            entrances,
            keys: self.keys.clone(),
        })
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let grid = Grid::parse(include_str!("test0.txt")).unwrap();
        assert_eq!(grid.dim(), (3, 9));
        assert_eq!(grid.entrances(), &[(1, 5)]);
        assert_eq!(grid.keys(), &[(b'a', (1, 7)), (b'b', (1, 1))]);
        assert_eq!(grid.tile((1, 3)), Tile::Door(b'A'));
        assert_eq!(grid.tile((0, 0)), Tile::Wall);
    }

    #[test]
    fn test_stops_at_blank_line() {
        let grid: Grid = "#@a#\n\nnot a maze\n".parse().unwrap();
        assert_eq!(grid.dim(), (1, 4));
    }

    #[test]
    fn test_ragged() {
        assert_eq!(
            Grid::parse("#####\n#@a#\n#####"),
            Err(Error::Ragged {
                row: 1,
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn test_invalid_tile() {
        assert_eq!(
            Grid::parse("#@?#"),
            Err(Error::InvalidTile {
                tile: '?',
                pos: (0, 2)
            })
        );
    }

    #[test]
    fn test_duplicate_key() {
        assert_eq!(
            Grid::parse("#a@a#"),
            Err(Error::DuplicateKey {
                key: 'a',
                first: (0, 1),
                second: (0, 3)
            })
        );
    }

    #[test]
    fn test_multiple_entrances() {
        let grid = Grid::parse(include_str!("test9.txt")).unwrap();
        assert_eq!(grid.entrances(), &[(2, 2), (2, 4), (4, 2), (4, 4)]);
    }

    #[test]
    fn test_split() {
        let split = Grid::parse(include_str!("test5.txt"))
            .unwrap()
            .split_entrance()
            .unwrap();
        assert_eq!(split, Grid::parse(include_str!("test9.txt")).unwrap());
    }

    #[test]
    fn test_split_rejects() {
        let grid = Grid::parse(include_str!("test9.txt")).unwrap();
        assert!(matches!(grid.split_entrance(), Err(Error::CannotSplit(_))));

        let grid = Grid::parse("#####\n#.@a#\n#...#").unwrap();
        assert!(matches!(grid.split_entrance(), Err(Error::CannotSplit(_))));

        let grid = Grid::parse("@..\n...").unwrap();
        assert!(matches!(grid.split_entrance(), Err(Error::CannotSplit(_))));
    }

    #[test]
    fn test_neighbors_stay_in_bounds() {
        let grid = Grid::parse("@.\n..").unwrap();
        let ns = grid.neighbors((0, 0)).collect::<Vec<_>>();
        assert_eq!(ns, vec![(0, 1), (1, 0)]);

        let grid = Grid::parse("...\n...\n...").unwrap();
        let ns = grid.neighbors((1, 1)).collect::<Vec<_>>();
        assert_eq!(ns, vec![(1, 0), (1, 2), (0, 1), (2, 1)]);
    }

    #[test]
    fn test_non_ascii_tile() {
        assert_eq!(
            Grid::parse("#@é#"),
            Err(Error::InvalidTile {
                tile: 'é',
                pos: (0, 2)
            })
        );
        assert_eq!(
            Grid::parse("#é@a#\n#####"),
            Err(Error::InvalidTile {
                tile: 'é',
                pos: (0, 1)
            })
        );
    }
}
