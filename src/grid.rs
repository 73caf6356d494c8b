use crate::constants::{PELLET_SCORE, POWER_PELLET_SCORE};
use crate::types::Vec2;

// Fixed session layout. '#' wall, '.' pellet, 'o' power pellet, '-' ghost
// house door, 'P' player start (decays to an empty floor cell), ' ' floor.
pub const LAYOUT: [&str; 21] = [
    "#####################",
    "#o.......#.........o#",
    "#.######.#.########.#",
    "#.######.#.########.#",
    "#...................#",
    "#.###.#########.###.#",
    "#.#......#........#.#",
    "#.#.####.#.######.#.#",
    "....#....-.....#.....",
    "#####.###-####.######",
    "#.....#-----#.......#",
    "#####.########.######",
    ".....................",
    "#####.#########.#####",
    "#........P..........#",
    "#.###.###.#.###.###.#",
    "#...#.....#.....#...#",
    "###.#.#########.#.###",
    "#o.................o#",
    "#####################",
    "#####################",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    PowerPellet,
    Door,
}

impl Tile {
    fn from_marker(marker: char) -> Self {
        match marker {
            '#' => Self::Wall,
            '.' => Self::Pellet,
            'o' => Self::PowerPellet,
            '-' => Self::Door,
            _ => Self::Empty,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Empty => ' ',
            Self::Pellet => '.',
            Self::PowerPellet => 'o',
            Self::Door => '-',
        }
    }
}

#[derive(Clone, Debug)]
pub struct GridMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    player_spawn: Vec2,
}

impl GridMap {
    pub fn standard() -> Self {
        Self::from_layout(&LAYOUT)
    }

    pub fn from_layout(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map(|row| row.len()).unwrap_or(0) as i32;
        let mut tiles = Vec::with_capacity((width * height) as usize);
        let mut player_spawn = Vec2 { x: 1, y: 1 };

        for (y, row) in rows.iter().enumerate() {
            debug_assert_eq!(row.len() as i32, width, "ragged layout row {y}");
            for (x, marker) in row.chars().enumerate() {
                if marker == 'P' {
                    player_spawn = Vec2 {
                        x: x as i32,
                        y: y as i32,
                    };
                    tiles.push(Tile::Empty);
                } else {
                    tiles.push(Tile::from_marker(marker));
                }
            }
        }

        Self {
            width,
            height,
            tiles,
            player_spawn,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn player_spawn(&self) -> Vec2 {
        self.player_spawn
    }

    pub fn wrap_col(&self, x: i32) -> i32 {
        if x < 0 {
            self.width - 1
        } else if x >= self.width {
            0
        } else {
            x
        }
    }

    pub fn is_wall(&self, x: i32, y: i32, for_ghost: bool) -> bool {
        if y < 0 || y >= self.height || x < 0 || x >= self.width {
            return true;
        }
        match self.tiles[self.idx(x, y)] {
            Tile::Wall => true,
            Tile::Door => !for_ghost,
            _ => false,
        }
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        self.tiles[self.idx(x, y)]
    }

    // Clears an item tile and reports what was eaten plus the score delta.
    // Anything that is not an item is a zero-delta no-op.
    pub fn consume(&mut self, x: i32, y: i32) -> (Tile, i32) {
        let idx = self.idx(x, y);
        match self.tiles[idx] {
            Tile::Pellet => {
                self.tiles[idx] = Tile::Empty;
                (Tile::Pellet, PELLET_SCORE)
            }
            Tile::PowerPellet => {
                self.tiles[idx] = Tile::Empty;
                (Tile::PowerPellet, POWER_PELLET_SCORE)
            }
            tile => (tile, 0),
        }
    }

    pub fn pellets_remaining(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| matches!(tile, Tile::Pellet | Tile::PowerPellet))
            .count()
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.tiles[self.idx(x, y)].as_char())
                    .collect()
            })
            .collect()
    }

    pub(crate) fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        let idx = self.idx(x, y);
        self.tiles[idx] = tile;
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            x >= 0 && x < self.width && y >= 0 && y < self.height,
            "grid access out of bounds: ({x},{y})"
        );
        (y * self.width + x) as usize
    }
}
