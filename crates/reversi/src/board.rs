//! 8x8 disc board with flanking and flipping.

use std::fmt;

use arrayvec::ArrayVec;

pub const BOARD_SIZE: usize = 8;

/// The eight ray directions as `(drow, dcol)`
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Squares flipped by one move. A ray flips at most 6 discs.
pub type Flips = ArrayVec<(usize, usize), { 6 * 8 }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Black, moves first
    X,
    /// White
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Player>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// `(row, col)` as board indices, if inside the board
fn in_bounds(row: i32, col: i32) -> Option<(usize, usize)> {
    let size = BOARD_SIZE as i32;
    if (0..size).contains(&row) && (0..size).contains(&col) {
        Some((row as usize, col as usize))
    } else {
        None
    }
}

impl Board {
    /// Standard opening: X on the main diagonal of the centre, O on the other
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.squares[3][3] = Some(Player::X);
        board.squares[3][4] = Some(Player::O);
        board.squares[4][3] = Some(Player::O);
        board.squares[4][4] = Some(Player::X);
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Disc at (row, col); `None` for empty or out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        self.squares.get(row)?.get(col).copied().flatten()
    }

    /// Place or remove a disc without flipping (setting up positions)
    pub fn set(&mut self, row: usize, col: usize, disc: Option<Player>) {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            self.squares[row][col] = disc;
        }
    }

    /// Opponent discs along one ray that `player` would flank from (row, col)
    fn ray_flips(&self, player: Player, row: usize, col: usize, dir: (i32, i32), out: &mut Flips) {
        let start = out.len();
        let (mut r, mut c) = (row as i32 + dir.0, col as i32 + dir.1);

        while let Some((ur, uc)) = in_bounds(r, c) {
            match self.squares[ur][uc] {
                Some(p) if p == player.opponent() => out.push((ur, uc)),
                Some(_) => return,
                None => break,
            }
            r += dir.0;
            c += dir.1;
        }
        // Ran off the board or into an empty square: nothing is flanked.
        out.truncate(start);
    }

    /// Every disc a move by `player` at (row, col) would flip.
    ///
    /// Empty when the square is occupied or the move flanks nothing.
    pub fn flips(&self, player: Player, row: usize, col: usize) -> Flips {
        let mut out = Flips::new();
        if row >= BOARD_SIZE || col >= BOARD_SIZE || self.squares[row][col].is_some() {
            return out;
        }
        for dir in DIRECTIONS {
            self.ray_flips(player, row, col, dir, &mut out);
        }
        out
    }

    pub fn is_legal(&self, player: Player, row: usize, col: usize) -> bool {
        !self.flips(player, row, col).is_empty()
    }

    /// Legal squares for `player`, row by row
    pub fn legal_moves(&self, player: Player) -> Vec<(usize, usize)> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_legal(player, row, col))
            .collect()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        (0..BOARD_SIZE).any(|row| (0..BOARD_SIZE).any(|col| self.is_legal(player, row, col)))
    }

    /// Place a disc for `player` and flip what it flanks; returns the flips.
    ///
    /// Nothing changes when the move is not legal.
    pub fn play(&mut self, player: Player, row: usize, col: usize) -> Flips {
        let flips = self.flips(player, row, col);
        if flips.is_empty() {
            return flips;
        }
        self.squares[row][col] = Some(player);
        for &(r, c) in &flips {
            self.squares[r][c] = Some(player);
        }
        flips
    }

    pub fn count(&self, player: Player) -> u32 {
        self.squares
            .iter()
            .flatten()
            .filter(|&&sq| sq == Some(player))
            .count() as u32
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().flatten().all(Option::is_some)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{row}")?;
            for sq in squares {
                write!(f, " {}", sq.map_or('-', Player::symbol))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_position() {
        let board = Board::new();
        assert_eq!(board.get(3, 3), Some(Player::X));
        assert_eq!(board.get(3, 4), Some(Player::O));
        assert_eq!(board.get(4, 3), Some(Player::O));
        assert_eq!(board.get(4, 4), Some(Player::X));
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.count(Player::O), 2);
        assert_eq!(board.get(8, 0), None);
    }

    #[test]
    fn test_opening_legal_moves() {
        let board = Board::new();
        assert_eq!(
            board.legal_moves(Player::X),
            vec![(2, 4), (3, 5), (4, 2), (5, 3)]
        );
        assert_eq!(
            board.legal_moves(Player::O),
            vec![(2, 3), (3, 2), (4, 5), (5, 4)]
        );
    }

    #[test]
    fn test_play_flips_flanked_disc() {
        let mut board = Board::new();
        let flips = board.play(Player::X, 2, 4);
        assert_eq!(flips.as_slice(), &[(3, 4)]);
        assert_eq!(board.get(2, 4), Some(Player::X));
        assert_eq!(board.get(3, 4), Some(Player::X));
        assert_eq!(board.count(Player::X), 4);
        assert_eq!(board.count(Player::O), 1);
    }

    #[test]
    fn test_ray_must_end_on_own_disc() {
        let mut board = Board::empty();
        board.set(0, 1, Some(Player::O));
        board.set(0, 2, Some(Player::O));
        // Nothing at (0, 3): the ray is open.
        assert!(board.flips(Player::X, 0, 0).is_empty());

        board.set(0, 3, Some(Player::X));
        assert_eq!(board.flips(Player::X, 0, 0).as_slice(), &[(0, 1), (0, 2)]);
    }

    #[test]
    fn test_ray_off_the_edge_flanks_nothing() {
        let mut board = Board::empty();
        for col in 1..BOARD_SIZE {
            board.set(0, col, Some(Player::O));
        }
        assert!(board.flips(Player::X, 0, 0).is_empty());
    }

    #[test]
    fn test_multi_direction_flip() {
        let mut board = Board::empty();
        board.set(3, 3, Some(Player::X));
        board.set(3, 4, Some(Player::O));
        board.set(4, 4, Some(Player::O));
        board.set(5, 5, Some(Player::X));
        board.set(4, 5, Some(Player::O));
        board.set(4, 6, Some(Player::X));
        board.set(3, 5, Some(Player::O));
        board.set(3, 6, Some(Player::X));

        // Right ray: (4,4),(4,5) then X at (4,6). The up-right ray through
        // (3,4) runs into an empty square and flips nothing.
        let flips = board.flips(Player::X, 4, 3);
        assert_eq!(flips.as_slice(), &[(4, 4), (4, 5)]);

        // Down ray ends on an empty square; down-right ray ends on X.
        let flips = board.flips(Player::X, 2, 4);
        assert_eq!(flips.as_slice(), &[(3, 5)]);
    }

    #[test]
    fn test_occupied_square_is_never_legal() {
        let board = Board::new();
        assert!(!board.is_legal(Player::X, 3, 3));
        assert!(!board.is_legal(Player::O, 3, 3));
    }

    #[test]
    fn test_display() {
        let text = Board::new().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "  0 1 2 3 4 5 6 7");
        assert_eq!(lines[4], "3 - - - X O - - -");
        assert_eq!(lines[5], "4 - - - O X - - -");
        assert_eq!(lines.len(), 9);
    }
}
